//! Map projection between geographic, grid and rendering-surface coordinates.
//!
//! Three coordinate systems are in play:
//! - geographic: latitude/longitude in degrees (east-positive longitude)
//! - grid: fractional cell coordinates `(i, j)`, `i` = column, `j` = row
//! - canvas: rendering-surface pixels, `cell_size` pixels per cell
//!
//! The projection is a plain equirectangular mapping of a lat/lon box onto the
//! grid. Rows grow with latitude, matching the storm data the host feeds in.

use super::interpolation::lerp;
use crate::core_types::{GeoPoint, Vec2};
use serde::{Deserialize, Serialize};

/// Equirectangular mapping of a lat/lon window onto a fixed-size grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapProjection {
    /// Southern edge of the map (degrees)
    pub lat_min: f32,
    /// Northern edge of the map (degrees)
    pub lat_max: f32,
    /// Longitude at grid column 0 (degrees east)
    pub lon_east_edge: f32,
    /// Longitude at the last grid column (degrees east)
    pub lon_west_edge: f32,
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Nominal cell size (km), informational
    pub cell_size_km: f32,
}

impl Default for MapProjection {
    /// North Pacific window, 200×160 cells of 20 km
    fn default() -> Self {
        Self {
            lat_min: 10.0,
            lat_max: 65.0,
            lon_east_edge: 130.0,
            lon_west_edge: 250.0,
            grid_width: 200,
            grid_height: 160,
            cell_size_km: 20.0,
        }
    }
}

impl MapProjection {
    /// Same map window on a different grid resolution
    pub fn with_grid(mut self, grid_width: usize, grid_height: usize) -> Self {
        self.grid_width = grid_width;
        self.grid_height = grid_height;
        self
    }

    /// Geographic position to fractional grid coordinates `(i, j)`
    pub fn lat_lon_to_cell(&self, point: GeoPoint) -> Vec2 {
        let i_norm = (point.lon - self.lon_east_edge) / (self.lon_west_edge - self.lon_east_edge);
        let j_norm = (point.lat - self.lat_min) / (self.lat_max - self.lat_min);
        Vec2::new(i_norm * self.grid_width as f32, j_norm * self.grid_height as f32)
    }

    /// Fractional grid coordinates to geographic position
    pub fn cell_to_lat_lon(&self, i: f32, j: f32) -> GeoPoint {
        let i_norm = i / self.grid_width as f32;
        let j_norm = j / self.grid_height as f32;
        GeoPoint::new(
            lerp(self.lat_min, self.lat_max, j_norm),
            lerp(self.lon_east_edge, self.lon_west_edge, i_norm),
        )
    }
}

/// Size of the rendering surface relative to the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasLayout {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
}

impl CanvasLayout {
    /// Create a layout for a surface of `width`×`height` pixels over a grid
    pub fn new(width: f32, height: f32, grid_width: usize, grid_height: usize) -> Self {
        Self {
            width,
            height,
            grid_width,
            grid_height,
        }
    }

    /// One pixel per cell
    pub fn unit(grid_width: usize, grid_height: usize) -> Self {
        Self::new(grid_width as f32, grid_height as f32, grid_width, grid_height)
    }

    /// Pixel size of one cell as `(cell_w, cell_h)`
    #[inline]
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.width / self.grid_width as f32,
            self.height / self.grid_height as f32,
        )
    }

    /// Fractional grid coordinates to surface pixels
    pub fn cell_to_canvas(&self, i: f32, j: f32) -> Vec2 {
        Vec2::new(
            i / self.grid_width as f32 * self.width,
            j / self.grid_height as f32 * self.height,
        )
    }

    /// Surface pixels to fractional grid coordinates
    pub fn canvas_to_cell(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x / self.width * self.grid_width as f32,
            y / self.height * self.grid_height as f32,
        )
    }

    /// Surface pixels to geographic position
    pub fn canvas_to_lat_lon(&self, projection: &MapProjection, x: f32, y: f32) -> GeoPoint {
        let cell = self.canvas_to_cell(x, y);
        projection.cell_to_lat_lon(cell.x, cell.y)
    }

    /// Integer cell containing a surface position, `None` for non-finite input.
    ///
    /// The result may lie outside the grid; bounds are the caller's concern.
    #[inline]
    pub fn cell_at(&self, position: Vec2) -> Option<(i64, i64)> {
        let cell = self.cell_size();
        let i = (position.x / cell.x).floor();
        let j = (position.y / cell.y).floor();
        if !i.is_finite() || !j.is_finite() {
            return None;
        }
        Some((i as i64, j as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lat_lon_corners() {
        let proj = MapProjection::default();
        let origin = proj.lat_lon_to_cell(GeoPoint::new(10.0, 130.0));
        assert_relative_eq!(origin.x, 0.0);
        assert_relative_eq!(origin.y, 0.0);

        let far = proj.lat_lon_to_cell(GeoPoint::new(65.0, 250.0));
        assert_relative_eq!(far.x, 200.0);
        assert_relative_eq!(far.y, 160.0);
    }

    #[test]
    fn test_lat_lon_round_trip_through_cells() {
        let proj = MapProjection::default();
        let p = GeoPoint::new(21.5, 202.2);
        let cell = proj.lat_lon_to_cell(p);
        let back = proj.cell_to_lat_lon(cell.x, cell.y);
        assert_relative_eq!(back.lat, p.lat, epsilon = 1e-3);
        assert_relative_eq!(back.lon, p.lon, epsilon = 1e-3);
    }

    #[test]
    fn test_canvas_scaling() {
        let layout = CanvasLayout::new(800.0, 640.0, 200, 160);
        let size = layout.cell_size();
        assert_relative_eq!(size.x, 4.0);
        assert_relative_eq!(size.y, 4.0);

        let px = layout.cell_to_canvas(10.0, 20.0);
        assert_relative_eq!(px.x, 40.0);
        assert_relative_eq!(px.y, 80.0);

        let cell = layout.canvas_to_cell(px.x, px.y);
        assert_relative_eq!(cell.x, 10.0);
        assert_relative_eq!(cell.y, 20.0);
    }

    #[test]
    fn test_cell_at_floors_and_rejects_nan() {
        let layout = CanvasLayout::new(800.0, 640.0, 200, 160);
        assert_eq!(layout.cell_at(Vec2::new(7.9, 4.0)), Some((1, 1)));
        assert_eq!(layout.cell_at(Vec2::new(-0.1, 4.0)), Some((-1, 1)));
        assert_eq!(layout.cell_at(Vec2::new(f32::NAN, 4.0)), None);
    }
}

//! Land/sea occupancy grid
//!
//! A fixed-size boolean grid over the simulation domain, stored row-major as
//! `row * width + column` with 0 = open water and 1 = land. The swell engine
//! only ever reads it; edits come from the host (map editing, scenario load)
//! and bump a revision counter so cached swell fields can be invalidated.

use super::land_polygons::{is_point_in_land, LandPolygon};
use crate::geometry::MapProjection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read access to a land mask.
///
/// Out-of-bounds queries must report land so rays stop at the domain edge.
pub trait LandMask: Send + Sync {
    /// Grid width in cells
    fn width(&self) -> usize;

    /// Grid height in cells
    fn height(&self) -> usize;

    /// Whether `(col, row)` is land; anything outside the grid is land
    fn is_land(&self, col: i64, row: i64) -> bool;

    /// Whether `(col, row)` lies inside the grid
    #[inline]
    fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && (col as u64) < self.width() as u64 && (row as u64) < self.height() as u64
    }

    /// Monotonic edit counter, used to invalidate cached swell fields.
    ///
    /// `None` means edits are not tracked, and cached rays are never reused.
    fn revision(&self) -> Option<u64> {
        None
    }
}

/// Errors raised while constructing a [`LandGrid`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero
    ZeroDimension { width: usize, height: usize },
    /// `width * height` does not fit in memory addressing
    DimensionOverflow { width: usize, height: usize },
    /// Supplied cell buffer has the wrong length
    CellCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "land grid dimensions must be positive, got {width}x{height}")
            }
            Self::DimensionOverflow { width, height } => {
                write!(f, "land grid dimensions {width}x{height} overflow the cell count")
            }
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "land grid expected {expected} cells, got {actual}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Row-major land occupancy grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandGrid {
    width: usize,
    height: usize,
    /// 0 = water, 1 = land, indexed `[row * width + col]`
    cells: Vec<u8>,
    revision: u64,
}

impl LandGrid {
    /// All-water grid
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if a dimension is zero or the cell count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; len],
            revision: 0,
        })
    }

    /// Grid from an existing row-major buffer; any non-zero value is land
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] on bad dimensions or a buffer of the wrong length.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        let expected = Self::checked_len(width, height)?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let cells = cells.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            width,
            height,
            cells,
            revision: 0,
        })
    }

    /// Rasterize geographic land polygons onto the projection's grid.
    ///
    /// Each cell is sampled at its corner `(i, j)` in lat/lon and marked land
    /// when any polygon contains it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if the projection's grid dimensions are invalid.
    pub fn from_polygons(projection: &MapProjection, polygons: &[LandPolygon]) -> Result<Self, GridError> {
        let mut grid = Self::new(projection.grid_width, projection.grid_height)?;
        for row in 0..grid.height {
            for col in 0..grid.width {
                let point = projection.cell_to_lat_lon(col as f32, row as f32);
                if is_point_in_land(polygons, point) {
                    grid.cells[row * grid.width + col] = 1;
                }
            }
        }
        tracing::debug!(
            "Rasterized {} land polygons onto {}x{} grid: {} land cells",
            polygons.len(),
            grid.width,
            grid.height,
            grid.land_count()
        );
        Ok(grid)
    }

    fn checked_len(width: usize, height: usize) -> Result<usize, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        width
            .checked_mul(height)
            .filter(|&len| i64::try_from(len).is_ok())
            .ok_or(GridError::DimensionOverflow { width, height })
    }

    /// Raw occupancy at `(col, row)`: 0 water, 1 land; out of bounds reads 1
    #[inline]
    pub fn get(&self, col: i64, row: i64) -> u8 {
        if !self.in_bounds(col, row) {
            return 1;
        }
        self.cells[row as usize * self.width + col as usize]
    }

    /// Mark a cell as land or water. Out-of-bounds edits are ignored.
    pub fn set_land(&mut self, col: usize, row: usize, land: bool) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = u8::from(land);
            self.revision += 1;
        }
    }

    /// Mark every cell in the half-open rectangle `[col0, col1) × [row0, row1)` as land
    pub fn fill_land_rect(&mut self, col0: usize, row0: usize, col1: usize, row1: usize) {
        for row in row0..row1.min(self.height) {
            for col in col0..col1.min(self.width) {
                self.cells[row * self.width + col] = 1;
            }
        }
        self.revision += 1;
    }

    /// Number of land cells
    pub fn land_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Row-major occupancy buffer
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl LandMask for LandGrid {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn is_land(&self, col: i64, row: i64) -> bool {
        self.get(col, row) == 1
    }

    fn revision(&self) -> Option<u64> {
        Some(self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_open_water() {
        let grid = LandGrid::new(4, 3).unwrap();
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.land_count(), 0);
        assert!(!grid.is_land(3, 2));
    }

    #[test]
    fn test_out_of_bounds_is_land() {
        let grid = LandGrid::new(4, 3).unwrap();
        assert!(grid.is_land(-1, 0));
        assert!(grid.is_land(0, -1));
        assert!(grid.is_land(4, 0));
        assert!(grid.is_land(0, 3));
        assert_eq!(grid.get(100, 100), 1);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            LandGrid::new(0, 5),
            Err(GridError::ZeroDimension { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            LandGrid::new(usize::MAX, 2),
            Err(GridError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn test_from_cells_validates_and_normalizes() {
        let err = LandGrid::from_cells(2, 2, vec![0, 1, 0]).unwrap_err();
        assert_eq!(err, GridError::CellCountMismatch { expected: 4, actual: 3 });
        assert_eq!(err.to_string(), "land grid expected 4 cells, got 3");

        let grid = LandGrid::from_cells(2, 2, vec![0, 7, 0, 1]).unwrap();
        assert_eq!(grid.cells(), &[0, 1, 0, 1]);
        assert!(grid.is_land(1, 0));
        assert!(grid.is_land(1, 1));
        assert!(!grid.is_land(0, 1));
    }

    #[test]
    fn test_row_major_addressing() {
        let mut grid = LandGrid::new(5, 4).unwrap();
        grid.set_land(3, 2, true);
        assert_eq!(grid.cells()[2 * 5 + 3], 1);
        assert!(grid.is_land(3, 2));
        assert!(!grid.is_land(2, 3));
    }

    #[test]
    fn test_polygon_rasterization_samples_cell_corners() {
        let projection = MapProjection::default();
        let polygons = LandPolygon::pacific_defaults();
        let grid = LandGrid::from_polygons(&projection, &polygons).unwrap();

        assert!(grid.land_count() > 0);
        for (row, col) in [(58, 83), (101, 166), (40, 130), (150, 20)] {
            let corner = projection.cell_to_lat_lon(col as f32, row as f32);
            assert_eq!(grid.is_land(col, row), is_point_in_land(&polygons, corner), "cell ({col}, {row})");
        }
    }

    #[test]
    fn test_edits_bump_revision() {
        let mut grid = LandGrid::new(5, 4).unwrap();
        assert_eq!(grid.revision(), Some(0));
        grid.set_land(0, 0, true);
        grid.fill_land_rect(1, 1, 3, 3);
        assert_eq!(grid.revision(), Some(2));
        assert_eq!(grid.land_count(), 5);

        // Ignored edits leave the revision alone
        grid.set_land(10, 10, true);
        assert_eq!(grid.revision(), Some(2));
    }
}

//! Coastline refraction
//!
//! When a ray enters a land cell it bends toward the open-water neighbor whose
//! direction is closest to its current heading. Candidates are the eight
//! neighbors of the land cell, scanned in a fixed order so ties always resolve
//! the same way. Cells off the grid count as land.

use crate::geometry::angle_diff;
use crate::grid::LandMask;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Neighbor scan order as `(dcol, drow, direction)`. Screen y grows southward,
/// so north is −π/2.
pub const NEIGHBOR_DIRECTIONS: [(i64, i64, f32); 8] = [
    (-1, 0, PI),              // W
    (1, 0, 0.0),              // E
    (0, -1, -FRAC_PI_2),      // N
    (0, 1, FRAC_PI_2),        // S
    (-1, -1, -3.0 * FRAC_PI_4), // NW
    (1, -1, -FRAC_PI_4),      // NE
    (-1, 1, 3.0 * FRAC_PI_4), // SW
    (1, 1, FRAC_PI_4),        // SE
];

/// Outcome of a refraction query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// Continue along this heading (radians)
    Redirect(f32),
    /// No acceptable open-water neighbor
    Blocked,
}

impl Refraction {
    /// Heading if the ray continues
    pub fn heading(self) -> Option<f32> {
        match self {
            Refraction::Redirect(h) => Some(h),
            Refraction::Blocked => None,
        }
    }
}

/// Chooses a new heading at land contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionResolver {
    max_deflection: f32,
}

impl RefractionResolver {
    /// Create a resolver that blocks turns sharper than `max_deflection` radians
    pub fn new(max_deflection: f32) -> Self {
        Self { max_deflection }
    }

    /// Deflection limit in radians
    pub fn max_deflection(&self) -> f32 {
        self.max_deflection
    }

    /// Resolve a new heading for a ray that entered land at `(col, row)`.
    ///
    /// The first candidate with the strictly smallest absolute angular
    /// difference wins. A non-finite heading is blocked.
    pub fn resolve<M: LandMask + ?Sized>(&self, mask: &M, col: i64, row: i64, heading: f32) -> Refraction {
        if !heading.is_finite() {
            return Refraction::Blocked;
        }

        let mut best: Option<(f32, f32)> = None;
        for &(dc, dr, direction) in &NEIGHBOR_DIRECTIONS {
            if mask.is_land(col + dc, row + dr) {
                continue;
            }
            let diff = angle_diff(heading, direction).abs();
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((direction, diff)),
            }
        }

        match best {
            Some((direction, diff)) if diff <= self.max_deflection => Refraction::Redirect(direction),
            _ => Refraction::Blocked,
        }
    }
}

impl Default for RefractionResolver {
    fn default() -> Self {
        Self::new(120.0_f32.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LandGrid;

    /// 5x5 all-land grid with the listed cells opened
    fn grid_with_water(open: &[(usize, usize)]) -> LandGrid {
        let mut grid = LandGrid::new(5, 5).unwrap();
        grid.fill_land_rect(0, 0, 5, 5);
        for &(c, r) in open {
            grid.set_land(c, r, false);
        }
        grid
    }

    #[test]
    fn test_surrounded_by_land_is_blocked() {
        let grid = grid_with_water(&[]);
        let r = RefractionResolver::default();
        assert_eq!(r.resolve(&grid, 2, 2, 0.0), Refraction::Blocked);
    }

    #[test]
    fn test_off_grid_neighbors_count_as_land() {
        // Corner cell: only the in-grid neighbors can be open, and they are land
        let grid = grid_with_water(&[]);
        let r = RefractionResolver::default();
        assert_eq!(r.resolve(&grid, 0, 0, PI), Refraction::Blocked);
    }

    #[test]
    fn test_picks_closest_open_direction() {
        // Heading east into land, with NE and S open: NE is 45°, S is 90°
        let grid = grid_with_water(&[(3, 1), (2, 3)]);
        let r = RefractionResolver::default();
        assert_eq!(r.resolve(&grid, 2, 2, 0.0), Refraction::Redirect(-FRAC_PI_4));
    }

    #[test]
    fn test_tie_resolves_to_first_in_scan_order() {
        // N and S are both 90° off an eastward heading; N is scanned first
        let grid = grid_with_water(&[(2, 1), (2, 3)]);
        let r = RefractionResolver::default();
        for _ in 0..10 {
            assert_eq!(r.resolve(&grid, 2, 2, 0.0), Refraction::Redirect(-FRAC_PI_2));
        }
    }

    #[test]
    fn test_sharp_turn_is_blocked() {
        // Heading east, only W open: 180° turn
        let grid = grid_with_water(&[(1, 2)]);
        let r = RefractionResolver::default();
        assert_eq!(r.resolve(&grid, 2, 2, 0.0), Refraction::Blocked);

        // Only SW open: 135° turn, still over the limit
        let grid = grid_with_water(&[(1, 3)]);
        assert_eq!(r.resolve(&grid, 2, 2, 0.0), Refraction::Blocked);
    }

    #[test]
    fn test_heading_wraps_across_pi() {
        // Heading just under 2π is effectively east, so E wins over N/S
        let grid = grid_with_water(&[(3, 2), (2, 1), (2, 3)]);
        let r = RefractionResolver::default();
        let heading = 2.0 * PI - 0.01;
        assert_eq!(r.resolve(&grid, 2, 2, heading), Refraction::Redirect(0.0));
    }

    #[test]
    fn test_nan_heading_is_blocked() {
        let grid = grid_with_water(&[(3, 2)]);
        let r = RefractionResolver::default();
        assert_eq!(r.resolve(&grid, 2, 2, f32::NAN), Refraction::Blocked);
        assert_eq!(r.resolve(&grid, 2, 2, 0.0).heading(), Some(0.0));
    }
}

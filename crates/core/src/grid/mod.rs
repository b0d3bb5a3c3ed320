//! Land grid: the read-only occupancy map rays march over

pub mod land_grid;
pub mod land_polygons;

pub use land_grid::{GridError, LandGrid, LandMask};
pub use land_polygons::{is_point_in_land, LandPolygon};

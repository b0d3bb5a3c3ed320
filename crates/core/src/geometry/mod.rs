//! Geometry and coordinate utilities
//!
//! Pure functions with no state: angle wrapping, interpolation, great-circle
//! helpers and the lat/lon ↔ grid ↔ canvas projection.

pub mod angles;
pub mod geodesy;
pub mod interpolation;
pub mod projection;

pub use angles::{
    angle_diff, angular_lerp, deg_to_rad, normalize_angle, rad_to_bearing, rad_to_deg,
};
pub use geodesy::{bearing, distance_km, move_lat_lon, EARTH_RADIUS_KM};
pub use interpolation::{bilerp, bilerp_angle, clamp, lerp};
pub use projection::{CanvasLayout, MapProjection};

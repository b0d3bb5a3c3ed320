//! Great-circle helpers on a spherical Earth

use super::angles::{deg_to_rad, rad_to_deg};
use crate::core_types::units::Kilometers;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f32 = 6371.0;

/// Initial bearing from point 1 to point 2, in degrees [0, 360)
pub fn bearing(lat1: f32, lon1: f32, lat2: f32, lon2: f32) -> f32 {
    let (lat1, lon1, lat2, lon2) = (deg_to_rad(lat1), deg_to_rad(lon1), deg_to_rad(lat2), deg_to_rad(lon2));
    let d_lon = lon2 - lon1;
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    (rad_to_deg(y.atan2(x)) + 360.0).rem_euclid(360.0)
}

/// Haversine distance between two points
pub fn distance_km(lat1: f32, lon1: f32, lat2: f32, lon2: f32) -> Kilometers {
    let (lat1, lon1, lat2, lon2) = (deg_to_rad(lat1), deg_to_rad(lon1), deg_to_rad(lat2), deg_to_rad(lon2));
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Kilometers::new(EARTH_RADIUS_KM * c)
}

/// Move a point along a great circle by `dist_km` at `bearing_rad`.
///
/// `bearing_rad` uses the heading convention (0 = east, π/2 = north here).
/// Returns `(lat, lon)` in degrees.
pub fn move_lat_lon(lat: f32, lon: f32, bearing_rad: f32, dist_km: f32) -> (f32, f32) {
    let d_r = dist_km / EARTH_RADIUS_KM;
    let lat_rad = deg_to_rad(lat);
    let lon_rad = deg_to_rad(lon);

    let lat_new = (lat_rad.sin() * d_r.cos() + lat_rad.cos() * d_r.sin() * bearing_rad.sin()).asin();
    let lon_new = lon_rad
        + (bearing_rad.cos() * d_r.sin() * lat_rad.cos()).atan2(d_r.cos() - lat_rad.sin() * lat_new.sin());

    (rad_to_deg(lat_new), rad_to_deg(lon_new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_due_north_and_east() {
        assert_relative_eq!(bearing(0.0, 180.0, 10.0, 180.0), 0.0, epsilon = 1e-3);
        assert_relative_eq!(bearing(0.0, 180.0, 0.0, 190.0), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let d = distance_km(20.0, 200.0, 21.0, 200.0);
        assert_relative_eq!(*d, 111.19, epsilon = 0.1);
    }

    #[test]
    fn test_distance_zero() {
        assert_relative_eq!(*distance_km(35.0, 140.0, 35.0, 140.0), 0.0);
    }

    #[test]
    fn test_move_then_measure() {
        // Bearing here is measured from east, so π/2 moves along the meridian.
        let (lat, lon) = move_lat_lon(20.0, 200.0, std::f32::consts::FRAC_PI_2, 111.19);
        assert_relative_eq!(lat, 21.0, epsilon = 0.01);
        assert_relative_eq!(lon, 200.0, epsilon = 0.01);
    }
}

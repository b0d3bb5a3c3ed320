//! Angle helpers shared by the refraction search and the projection code.
//!
//! Headings follow the screen `atan2` layout: 0 points east (+x), π/2 points
//! down the rendering surface (+y), ±π points west.

use std::f32::consts::{PI, TAU};

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(d: f32) -> f32 {
    d * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(r: f32) -> f32 {
    r * 180.0 / PI
}

/// Convert radians to a compass-style bearing in [0, 360)
#[inline]
pub fn rad_to_bearing(r: f32) -> f32 {
    (rad_to_deg(r) + 360.0).rem_euclid(360.0)
}

/// Signed shortest angular difference from `a` to `b`, wrapped into [−π, π].
///
/// In-range differences come back bit-exact (no wrap arithmetic is applied),
/// which keeps ties between symmetric candidates exact. Non-finite input
/// yields NaN instead of looping.
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let mut diff = b - a;
    if !diff.is_finite() {
        return f32::NAN;
    }
    if diff.abs() > 2.0 * TAU {
        diff %= TAU;
    }
    while diff > PI {
        diff -= TAU;
    }
    while diff < -PI {
        diff += TAU;
    }
    diff
}

/// Normalize an angle into (−π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle_diff(0.0, angle);
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Linear interpolation between two angles, correcting a single wrap across ±π
#[inline]
pub fn angular_lerp(a: f32, b: f32, t: f32) -> f32 {
    let mut d = b - a;
    if d > PI {
        d -= TAU;
    }
    if d < -PI {
        d += TAU;
    }
    a + d * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_angle_diff_wraps_shortest_way() {
        assert_relative_eq!(angle_diff(deg_to_rad(350.0), deg_to_rad(10.0)), deg_to_rad(20.0), epsilon = 1e-5);
        assert_relative_eq!(angle_diff(deg_to_rad(10.0), deg_to_rad(350.0)), deg_to_rad(-20.0), epsilon = 1e-5);
        assert_relative_eq!(angle_diff(0.0, 5.0 * TAU + 0.5), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_diff_is_exact_in_range() {
        assert_eq!(angle_diff(0.0, FRAC_PI_2), FRAC_PI_2);
        assert_eq!(angle_diff(0.0, -FRAC_PI_2), -FRAC_PI_2);
        assert_eq!(angle_diff(0.0, PI), PI);
    }

    #[test]
    fn test_angle_diff_non_finite() {
        assert!(angle_diff(f32::NAN, 0.0).is_nan());
        assert!(angle_diff(0.0, f32::INFINITY).is_nan());
    }

    #[test]
    fn test_normalize_angle_range() {
        assert_relative_eq!(normalize_angle(-PI), PI);
        assert_relative_eq!(normalize_angle(3.0 * PI), PI, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(deg_to_rad(270.0)), -FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_angular_lerp_crosses_wrap() {
        let a = deg_to_rad(170.0);
        let b = deg_to_rad(-170.0);
        assert_relative_eq!(angular_lerp(a, b, 0.5), PI, epsilon = 1e-5);
    }

    #[test]
    fn test_bearing_conversion() {
        assert_relative_eq!(rad_to_bearing(-FRAC_PI_2), 270.0, epsilon = 1e-4);
        assert_relative_eq!(rad_to_bearing(0.0), 0.0);
    }
}

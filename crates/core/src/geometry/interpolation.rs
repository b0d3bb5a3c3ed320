//! Scalar and grid interpolation

use super::angles::angular_lerp;

/// Linear interpolation between two values
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp a value into `[min, max]`, mapping NaN to `min`
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v.is_nan() {
        min
    } else {
        v.clamp(min, max)
    }
}

/// 2×2 stencil at fractional grid position, or `None` when any corner is off-grid
#[inline]
fn stencil(i: f32, j: f32, w: usize, h: usize) -> Option<([usize; 4], f32, f32)> {
    if !i.is_finite() || !j.is_finite() {
        return None;
    }
    let i0f = i.floor();
    let j0f = j.floor();
    if i0f < 0.0 || j0f < 0.0 || i0f + 1.0 >= w as f32 || j0f + 1.0 >= h as f32 {
        return None;
    }
    let (i0, j0) = (i0f as usize, j0f as usize);
    let idx = [
        j0 * w + i0,
        j0 * w + i0 + 1,
        (j0 + 1) * w + i0,
        (j0 + 1) * w + i0 + 1,
    ];
    Some((idx, i - i0f, j - j0f))
}

/// Bilinear interpolation on a row-major grid.
///
/// Returns `default` when the 2×2 stencil leaves the grid. When `land` is
/// given, corners flagged as land (value 1) read as `default`.
pub fn bilerp(values: &[f32], i: f32, j: f32, w: usize, h: usize, default: f32, land: Option<&[u8]>) -> f32 {
    let Some(([i00, i10, i01, i11], tx, ty)) = stencil(i, j, w, h) else {
        return default;
    };
    let read = |idx: usize| -> f32 {
        match land {
            Some(mask) if mask.get(idx).copied() == Some(1) => default,
            _ => values.get(idx).copied().unwrap_or(default),
        }
    };

    let r0 = lerp(read(i00), read(i10), tx);
    let r1 = lerp(read(i01), read(i11), tx);
    lerp(r0, r1, ty)
}

/// Bilinear interpolation for angular fields (radians), returning 0 off-grid
pub fn bilerp_angle(values: &[f32], i: f32, j: f32, w: usize, h: usize) -> f32 {
    let Some(([i00, i10, i01, i11], tx, ty)) = stencil(i, j, w, h) else {
        return 0.0;
    };
    let read = |idx: usize| values.get(idx).copied().unwrap_or(0.0);

    let r0 = angular_lerp(read(i00), read(i10), tx);
    let r1 = angular_lerp(read(i01), read(i11), tx);
    angular_lerp(r0, r1, ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_lerp_and_clamp() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
        assert_eq!(clamp(12.0, 8.0, 10.0), 10.0);
        assert_eq!(clamp(f32::NAN, 8.0, 25.0), 8.0);
    }

    #[test]
    fn test_bilerp_center_of_cell() {
        // 3x3 grid with values equal to column index
        let values = [0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
        assert_relative_eq!(bilerp(&values, 0.5, 0.5, 3, 3, -1.0, None), 0.5);
        assert_relative_eq!(bilerp(&values, 1.25, 1.0, 3, 3, -1.0, None), 1.25);
    }

    #[test]
    fn test_bilerp_out_of_bounds_returns_default() {
        let values = [1.0; 9];
        assert_eq!(bilerp(&values, 2.0, 0.0, 3, 3, -7.0, None), -7.0);
        assert_eq!(bilerp(&values, -0.1, 0.0, 3, 3, -7.0, None), -7.0);
        assert_eq!(bilerp(&values, f32::NAN, 0.0, 3, 3, -7.0, None), -7.0);
    }

    #[test]
    fn test_bilerp_land_corners_read_default() {
        let values = [4.0; 4];
        let land = [1, 0, 0, 0];
        // Top-left corner is land, reading 0 instead of 4
        assert_relative_eq!(bilerp(&values, 0.0, 0.0, 2, 2, 0.0, Some(&land)), 0.0);
        assert_relative_eq!(bilerp(&values, 0.5, 0.5, 2, 2, 0.0, Some(&land)), 3.0);
    }

    #[test]
    fn test_bilerp_angle_wraps() {
        let a = PI - 0.1;
        let b = -PI + 0.1;
        let values = [a, b, a, b];
        let mid = bilerp_angle(&values, 0.5, 0.5, 2, 2);
        assert_relative_eq!(mid.abs(), PI, epsilon = 1e-5);
    }
}

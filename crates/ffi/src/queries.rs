use std::ptr;
use swell_sim_core::{RayPoint, RayStroke, RayTermination, SwellRay};

use crate::error::{DefaultSwellSimError, SwellSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, lock_snapshot, read_state, track_error};
use crate::instance::SwellSimInstance;

/// Polyline vertex in canvas pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwellSimPoint {
    pub x: f32,
    pub y: f32,
}

/// Recorded ray sample. Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwellSimRayPoint {
    /// Canvas position (pixels).
    pub x: f32,
    pub y: f32,
    /// Distance from the storm (cells).
    pub distance: f32,
    /// Cumulative energy multiplier in (0, 1].
    pub energy: f32,
}

impl From<&RayPoint> for SwellSimRayPoint {
    fn from(p: &RayPoint) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            distance: p.distance,
            energy: p.energy,
        }
    }
}

/// Why a ray stopped.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwellSimRayOutcome {
    Exhausted = 0,
    OutOfBounds = 1,
    Blocked = 2,
    Depleted = 3,
}

impl From<RayTermination> for SwellSimRayOutcome {
    fn from(t: RayTermination) -> Self {
        match t {
            RayTermination::Exhausted => Self::Exhausted,
            RayTermination::OutOfBounds => Self::OutOfBounds,
            RayTermination::Blocked => Self::Blocked,
            RayTermination::Depleted => Self::Depleted,
        }
    }
}

/// Per-ray metadata.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellSimRayInfo {
    /// Index into the storm list passed to `swell_sim_set_storms`.
    pub storm_index: usize,
    /// Emission heading (radians, 0 = east, π/2 = down the canvas).
    pub heading: f32,
    /// Significant wave height (m).
    pub wave_height: f32,
    /// Peak period (s).
    pub wave_period: f32,
    pub point_count: usize,
    pub outcome: SwellSimRayOutcome,
}

impl From<&SwellRay> for SwellSimRayInfo {
    fn from(ray: &SwellRay) -> Self {
        Self {
            storm_index: ray.storm_index,
            heading: ray.heading,
            wave_height: *ray.wave.height,
            wave_period: *ray.wave.period,
            point_count: ray.points.len(),
            outcome: ray.outcome.into(),
        }
    }
}

/// Stroke style for one ray. Colors are 0..=255, alphas 0..=1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellSimStroke {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Stroke alpha with energy and opacity factor applied.
    pub a: f32,
    pub line_width: f32,
    /// Mean energy of the ray.
    pub opacity: f32,
    pub has_glow: bool,
    /// Shadow alpha; 0 when `has_glow` is false.
    pub glow_alpha: f32,
    /// Shadow blur radius; 0 when `has_glow` is false.
    pub glow_blur: f32,
}

impl From<&RayStroke> for SwellSimStroke {
    fn from(stroke: &RayStroke) -> Self {
        Self {
            r: stroke.color.r,
            g: stroke.color.g,
            b: stroke.color.b,
            a: stroke.color.a,
            line_width: stroke.line_width,
            opacity: stroke.opacity,
            has_glow: stroke.glow.is_some(),
            glow_alpha: stroke.glow.map_or(0.0, |g| g.color.a),
            glow_blur: stroke.glow.map_or(0.0, |g| g.blur),
        }
    }
}

fn ray_at(rays: &[SwellRay], index: usize) -> Result<&SwellRay, DefaultSwellSimError> {
    rays.get(index)
        .ok_or_else(|| DefaultSwellSimError::index_out_of_range("ray", index, rays.len()))
}

/// Metadata of ray `index` in the most recent build.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success
/// - `SwellSimErrorCode::NullPointer` if `ptr` or `out_info` is null
/// - `SwellSimErrorCode::IndexOutOfRange` if `index` ≥ ray count
///
/// # Safety
/// `out_info` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_get_ray_info(
    ptr: *const SwellSimInstance,
    index: usize,
    out_info: *mut SwellSimRayInfo,
) -> SwellSimErrorCode {
    if out_info.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_info"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = read_state(instance)?;
        let info = SwellSimRayInfo::from(ray_at(&state.field.rays, index)?);
        unsafe {
            *out_info = info;
        }
        Ok(())
    })
}

/// Return a borrowed pointer to every recorded point of ray `index`.
///
/// The buffer is reused: the pointer stays valid until the next call to this
/// function or `swell_sim_clear_snapshots`. **DO NOT FREE THIS POINTER**.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) with the array in `out_array` and its length in `out_len`
/// - `SwellSimErrorCode::NullPointer` if `ptr`, `out_len` or `out_array` is null
/// - `SwellSimErrorCode::IndexOutOfRange` if `index` ≥ ray count
/// - `SwellSimErrorCode::LockPoisoned` if an internal lock is poisoned
///
/// # Safety
/// `out_len` and `out_array` must be valid, non-null pointers.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_get_ray_points(
    ptr: *const SwellSimInstance,
    index: usize,
    out_len: *mut usize,
    out_array: *mut *const SwellSimRayPoint,
) -> SwellSimErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_len"));
    }
    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultSwellSimError::null_pointer("out_array"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut snapshot = lock_snapshot(&instance.points_snapshot, "points_snapshot")?;
        let state = read_state(instance)?;
        let ray = ray_at(&state.field.rays, index)?;

        snapshot.clear();
        snapshot.extend(ray.points.iter().map(SwellSimRayPoint::from));

        unsafe {
            *out_len = snapshot.len();
            *out_array = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != SwellSimErrorCode::Ok {
        unsafe {
            *out_array = ptr::null();
            *out_len = 0;
        }
    }
    result
}

/// Stroke style and crest-sampled polyline for ray `index`.
///
/// The polyline buffer follows the same reuse rules as
/// `swell_sim_get_ray_points`, with its own buffer.
///
/// # Safety
/// `out_stroke`, `out_len` and `out_points` must be valid, non-null pointers.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_get_ray_stroke(
    ptr: *const SwellSimInstance,
    index: usize,
    out_stroke: *mut SwellSimStroke,
    out_len: *mut usize,
    out_points: *mut *const SwellSimPoint,
) -> SwellSimErrorCode {
    if out_stroke.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_stroke"));
    }
    if out_len.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_len"));
    }
    if out_points.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultSwellSimError::null_pointer("out_points"));
    }

    let result = handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let mut snapshot = lock_snapshot(&instance.stroke_snapshot, "stroke_snapshot")?;
        let state = read_state(instance)?;
        let stroke = ray_at(&state.field.rays, index)?.stroke(&state.style);

        snapshot.clear();
        snapshot.extend(stroke.points.iter().map(|p| SwellSimPoint { x: p.x, y: p.y }));

        unsafe {
            *out_stroke = SwellSimStroke::from(&stroke);
            *out_len = snapshot.len();
            *out_points = snapshot.as_ptr();
        }
        Ok(())
    });

    if result != SwellSimErrorCode::Ok {
        unsafe {
            *out_points = ptr::null();
            *out_len = 0;
        }
    }
    result
}

/// Clear both snapshot buffers and release their memory.
///
/// Invalidates pointers returned by `swell_sim_get_ray_points` and
/// `swell_sim_get_ray_stroke`.
#[no_mangle]
pub extern "C" fn swell_sim_clear_snapshots(ptr: *const SwellSimInstance) -> SwellSimErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        clear_snapshot_buffers(instance)
    })
}

fn clear_snapshot_buffers(instance: &SwellSimInstance) -> Result<(), DefaultSwellSimError> {
    let mut points = lock_snapshot(&instance.points_snapshot, "points_snapshot")?;
    points.clear();
    points.shrink_to_fit();

    let mut stroke = lock_snapshot(&instance.stroke_snapshot, "stroke_snapshot")?;
    stroke.clear();
    stroke.shrink_to_fit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::swell_sim_build;
    use crate::instance::{swell_sim_destroy, swell_sim_new};
    use crate::storms::{swell_sim_set_storms, SwellSimStorm};

    fn built_sim() -> *mut SwellSimInstance {
        let mut sim = ptr::null_mut();
        let storm = SwellSimStorm { id: 1, lat: 37.5, lon: 190.0, wind_kt: 40.0, radius_nm: 300.0 };
        let mut rays = 0;
        unsafe {
            swell_sim_new(200, 160, ptr::null(), &mut sim);
            swell_sim_set_storms(sim, &storm, 1);
            swell_sim_build(sim, 200.0, 160.0, &mut rays);
        }
        assert_eq!(rays, 24);
        sim
    }

    #[test]
    fn test_ray_info_and_points() {
        let sim = built_sim();
        let mut info = SwellSimRayInfo {
            storm_index: 99,
            heading: -1.0,
            wave_height: 0.0,
            wave_period: 0.0,
            point_count: 0,
            outcome: SwellSimRayOutcome::Blocked,
        };
        let mut len = 0;
        let mut array: *const SwellSimRayPoint = ptr::null();
        unsafe {
            assert_eq!(swell_sim_get_ray_info(sim, 0, &mut info), SwellSimErrorCode::Ok);
            assert_eq!(swell_sim_get_ray_points(sim, 0, &mut len, &mut array), SwellSimErrorCode::Ok);
        }

        // Ray 0 heads east from cell (100, 80) and leaves the grid at x = 200
        assert_eq!(info.storm_index, 0);
        assert_eq!(info.heading, 0.0);
        assert_eq!(info.wave_height, 20.0);
        assert_eq!(info.outcome, SwellSimRayOutcome::OutOfBounds);
        assert_eq!(len, info.point_count);
        assert_eq!(len, 67);

        let points = unsafe { std::slice::from_raw_parts(array, len) };
        assert_eq!(points[0], SwellSimRayPoint { x: 100.0, y: 80.0, distance: 0.0, energy: 1.0 });
        assert!(points.iter().all(|p| p.x < 200.0));

        unsafe { swell_sim_destroy(sim) };
    }

    #[test]
    fn test_ray_stroke() {
        let sim = built_sim();
        let mut stroke = SwellSimStroke {
            r: 0,
            g: 0,
            b: 0,
            a: 0.0,
            line_width: 0.0,
            opacity: 0.0,
            has_glow: false,
            glow_alpha: 0.0,
            glow_blur: 0.0,
        };
        let mut len = 0;
        let mut points: *const SwellSimPoint = ptr::null();
        unsafe {
            assert_eq!(
                swell_sim_get_ray_stroke(sim, 3, &mut stroke, &mut len, &mut points),
                SwellSimErrorCode::Ok
            );
        }

        assert_eq!((stroke.r, stroke.g, stroke.b), (40, 100, 200));
        assert_eq!(stroke.line_width, 3.0);
        assert!(stroke.has_glow);
        assert!((stroke.glow_alpha - stroke.a * 0.5).abs() < 1e-6);
        assert!(len > 1 && !points.is_null());

        assert_eq!(swell_sim_clear_snapshots(sim), SwellSimErrorCode::Ok);
        unsafe { swell_sim_destroy(sim) };
    }

    #[test]
    fn test_out_of_range_index() {
        let sim = built_sim();
        let mut len = 5;
        let mut array: *const SwellSimRayPoint = ptr::null();
        let err = unsafe { swell_sim_get_ray_points(sim, 24, &mut len, &mut array) };
        assert_eq!(err, SwellSimErrorCode::IndexOutOfRange);
        assert_eq!(len, 0);
        assert!(array.is_null());
        assert!(!crate::error::swell_sim_get_last_error().is_null());
        unsafe { swell_sim_destroy(sim) };
    }
}

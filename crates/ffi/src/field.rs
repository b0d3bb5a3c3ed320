use swell_sim_core::{GeoPoint, Knots, NauticalMiles, Storm, SwellFieldCache, WaveEstimate};

use crate::error::{DefaultSwellSimError, SwellSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, read_state, track_error, write_state};
use crate::instance::{SwellSimInstance, SwellState};

/// Summary of the most recent build.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwellSimFieldStats {
    pub ray_count: usize,
    pub point_count: usize,
    pub storms_considered: usize,
    pub storms_active: usize,
    /// Storms whose rays were reused from an earlier build, since creation.
    pub cache_hits: u64,
    /// Storms traced from scratch, since creation.
    pub cache_misses: u64,
}

/// Trace the swell field for the current storms and land grid.
///
/// Rays are traced on a `canvas_width`×`canvas_height` pixel surface so the
/// returned points can be drawn directly. Storms that did not move since the
/// previous build on the same grid and surface reuse their rays.
///
/// Thread-safe: acquires the write lock for the duration of the build.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success with the ray count in `out_ray_count`
/// - `SwellSimErrorCode::NullPointer` if `ptr` or `out_ray_count` is null
/// - `SwellSimErrorCode::InvalidParameter` if the canvas size is not finite and positive
/// - `SwellSimErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// `out_ray_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_build(
    ptr: *const SwellSimInstance,
    canvas_width: f32,
    canvas_height: f32,
    out_ray_count: *mut usize,
) -> SwellSimErrorCode {
    if out_ray_count.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_ray_count"));
    }

    let result = handle_ffi_result_error(|| {
        for (name, value) in [("canvas_width", canvas_width), ("canvas_height", canvas_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DefaultSwellSimError::invalid_parameter(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        let instance = instance_from_ptr(ptr)?;
        let mut guard = write_state(instance)?;
        let state: &mut SwellState = &mut guard;

        let surface = Some((canvas_width, canvas_height));
        if state.cache.builder().surface() != surface {
            let builder = state
                .cache
                .builder()
                .clone()
                .with_surface(canvas_width, canvas_height);
            state.cache = SwellFieldCache::new(builder);
        }

        state.field = state.cache.build(&state.storms, &state.land);
        unsafe {
            *out_ray_count = state.field.ray_count();
        }
        Ok(())
    });

    if result != SwellSimErrorCode::Ok {
        unsafe {
            *out_ray_count = 0;
        }
    }
    result
}

/// Statistics for the most recent build.
///
/// # Safety
/// `out_stats` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_get_field_stats(
    ptr: *const SwellSimInstance,
    out_stats: *mut SwellSimFieldStats,
) -> SwellSimErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let state = read_state(instance)?;
        let cache = state.cache.stats();
        unsafe {
            *out_stats = SwellSimFieldStats {
                ray_count: state.field.ray_count(),
                point_count: state.field.point_count(),
                storms_considered: state.field.storms_considered,
                storms_active: state.field.storms_active,
                cache_hits: cache.hits,
                cache_misses: cache.misses,
            };
        }
        Ok(())
    })
}

/// Wave height (m) and period (s) the engine assigns to a storm.
///
/// # Safety
/// `out_height_m` and `out_period_s` must be valid, non-null pointers.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_estimate_wave(
    wind_kt: f32,
    radius_nm: f32,
    out_height_m: *mut f32,
    out_period_s: *mut f32,
) -> SwellSimErrorCode {
    if out_height_m.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_height_m"));
    }
    if out_period_s.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_period_s"));
    }

    let storm = Storm::new(GeoPoint::default(), Knots::new(wind_kt), NauticalMiles::new(radius_nm));
    let wave = WaveEstimate::for_storm(&storm);
    unsafe {
        *out_height_m = *wave.height;
        *out_period_s = *wave.period;
    }
    SwellSimErrorCode::Ok
}

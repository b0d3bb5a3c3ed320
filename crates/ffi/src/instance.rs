use std::ptr;
use std::sync::{Mutex, RwLock};
use swell_sim_core::{
    Degrees, Knots, LandGrid, SwellConfig, SwellField, SwellFieldBuilder, SwellFieldCache,
    SwellStyle, Storm,
};

use crate::error::{DefaultSwellSimError, SwellSimErrorCode};
use crate::helpers::{track_error, track_result};
use crate::queries::{SwellSimPoint, SwellSimRayPoint};

/// Engine parameters in C layout. Obtain defaults from `swell_sim_default_config`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellSimConfig {
    /// Angle between emitted rays (degrees).
    pub angle_step_deg: f32,
    /// Maximum ray length (cells).
    pub max_distance: f32,
    /// Step length (cells).
    pub step_size: f32,
    /// Storms below this wind speed emit nothing (knots).
    pub min_wind_kt: f32,
    /// Energy multiplier per land contact, in (0, 1].
    pub land_penalty: f32,
    /// Energy multiplier per step, in (0, 1].
    pub spreading_decay: f32,
    /// Rays stop once energy drops below this after a land contact.
    pub min_energy: f32,
    /// Sharpest allowed turn at a coastline (degrees).
    pub max_deflection_deg: f32,
    /// Rays with fewer recorded points are discarded.
    pub min_points: usize,
    /// Trace rays on the rayon thread pool.
    pub parallel: bool,
}

impl From<&SwellConfig> for SwellSimConfig {
    fn from(config: &SwellConfig) -> Self {
        Self {
            angle_step_deg: *config.angle_step,
            max_distance: config.max_distance,
            step_size: config.step_size,
            min_wind_kt: *config.min_wind,
            land_penalty: config.land_penalty,
            spreading_decay: config.spreading_decay,
            min_energy: config.min_energy,
            max_deflection_deg: *config.max_deflection,
            min_points: config.min_points,
            parallel: config.parallel,
        }
    }
}

impl From<&SwellSimConfig> for SwellConfig {
    fn from(config: &SwellSimConfig) -> Self {
        Self {
            angle_step: Degrees::new(config.angle_step_deg),
            max_distance: config.max_distance,
            step_size: config.step_size,
            min_wind: Knots::new(config.min_wind_kt),
            land_penalty: config.land_penalty,
            spreading_decay: config.spreading_decay,
            min_energy: config.min_energy,
            max_deflection: Degrees::new(config.max_deflection_deg),
            min_points: config.min_points,
            parallel: config.parallel,
        }
    }
}

/// Mutable simulation state guarded by the instance lock.
pub(crate) struct SwellState {
    pub(crate) land: LandGrid,
    pub(crate) storms: Vec<Storm>,
    pub(crate) cache: SwellFieldCache,
    pub(crate) field: SwellField,
    pub(crate) style: SwellStyle,
}

/// The swell simulation context handed to the host.
///
/// Holds the land grid, the current storm snapshots and the most recent field.
///
/// # Thread Safety
/// State sits behind an `RwLock`: queries take a read lock, edits and
/// `swell_sim_build` take the write lock. Snapshot buffers returned by the
/// point queries are reused across calls and guarded by their own `Mutex`.
///
/// # Usage (C++)
/// ```cpp
/// SwellSimInstance* sim = nullptr;
/// if (swell_sim_new(200, 160, nullptr, &sim) != SwellSimErrorCode::Ok) {
///     return;
/// }
/// swell_sim_load_pacific_land(sim);
///
/// SwellSimStorm storm = { 1, 18.0f, 160.0f, 65.0f, 300.0f };
/// swell_sim_set_storms(sim, &storm, 1);
///
/// uintptr_t rays = 0;
/// swell_sim_build(sim, 1000.0f, 800.0f, &rays);
/// // ... query rays with swell_sim_get_ray_stroke ...
/// swell_sim_destroy(sim);
/// ```
pub struct SwellSimInstance {
    pub(crate) state: RwLock<SwellState>,
    /// Reused by `swell_sim_get_ray_points`.
    pub(crate) points_snapshot: Mutex<Vec<SwellSimRayPoint>>,
    /// Reused by `swell_sim_get_ray_stroke`.
    pub(crate) stroke_snapshot: Mutex<Vec<SwellSimPoint>>,
}

impl SwellSimInstance {
    /// Creates an instance over an open-water grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` for zero or overflowing dimensions and
    /// `InvalidParameter` when the configuration fails validation.
    pub(crate) fn new(width: usize, height: usize, config: SwellConfig) -> Result<Box<Self>, DefaultSwellSimError> {
        let land = LandGrid::new(width, height).map_err(|e| DefaultSwellSimError::invalid_grid(&e))?;
        let builder = SwellFieldBuilder::new(config).map_err(|e| DefaultSwellSimError::invalid_config(&e))?;

        // One full fan of default-length rays per storm is the common case
        let snapshot_capacity = builder.config().max_steps().clamp(16, 4096);

        Ok(Box::new(Self {
            state: RwLock::new(SwellState {
                land,
                storms: Vec::new(),
                cache: SwellFieldCache::new(builder),
                field: SwellField::default(),
                style: SwellStyle::default(),
            }),
            points_snapshot: Mutex::new(Vec::with_capacity(snapshot_capacity)),
            stroke_snapshot: Mutex::new(Vec::with_capacity(snapshot_capacity)),
        }))
    }
}

/// Engine defaults (15° fan, 150-cell rays in 1.5-cell steps, 15 kt threshold).
#[no_mangle]
pub extern "C" fn swell_sim_default_config() -> SwellSimConfig {
    SwellSimConfig::from(&SwellConfig::default())
}

/// Create a `SwellSim` instance over a `width`×`height` open-water grid.
///
/// Parameters
/// - `width`, `height`: Land grid dimensions in cells. Both must be non-zero.
/// - `config`: Engine parameters, or null for `swell_sim_default_config()`.
/// - `out_instance`: Receives the instance on success, null on failure.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0): success, `out_instance` contains valid pointer
/// - `SwellSimErrorCode::NullPointer`: `out_instance` is null
/// - `SwellSimErrorCode::InvalidGrid`: zero or overflowing dimensions
/// - `SwellSimErrorCode::InvalidParameter`: configuration rejected
///
/// Call `swell_sim_get_last_error()` for a description of the failure.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - `config`, if non-null, must point to a valid `SwellSimConfig`.
/// - The caller takes ownership of the instance and MUST call `swell_sim_destroy`
///   exactly once.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_new(
    width: usize,
    height: usize,
    config: *const SwellSimConfig,
    out_instance: *mut *mut SwellSimInstance,
) -> SwellSimErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_instance"));
    }

    let config = match unsafe { config.as_ref() } {
        Some(c) => SwellConfig::from(c),
        None => SwellConfig::default(),
    };

    match track_result(SwellSimInstance::new(width, height, config)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            SwellSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroys an instance previously created by `swell_sim_new`.
///
/// A null `ptr` is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `swell_sim_new` and not freed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_destroy(ptr: *mut SwellSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `swell_sim_new` and not yet freed.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::swell_sim_get_last_error_code;

    #[test]
    fn test_config_round_trips_through_c_layout() {
        let c = swell_sim_default_config();
        assert_eq!(c.angle_step_deg, 15.0);
        assert_eq!(c.min_points, 3);
        assert_eq!(SwellConfig::from(&c), SwellConfig::default());
    }

    #[test]
    fn test_new_and_destroy() {
        let mut sim: *mut SwellSimInstance = ptr::null_mut();
        let err = unsafe { swell_sim_new(200, 160, ptr::null(), &mut sim) };
        assert_eq!(err, SwellSimErrorCode::Ok);
        assert!(!sim.is_null());
        unsafe { swell_sim_destroy(sim) };
    }

    #[test]
    fn test_zero_grid_rejected() {
        let mut sim: *mut SwellSimInstance = ptr::null_mut();
        let err = unsafe { swell_sim_new(0, 160, ptr::null(), &mut sim) };
        assert_eq!(err, SwellSimErrorCode::InvalidGrid);
        assert!(sim.is_null());
        assert_eq!(swell_sim_get_last_error_code(), SwellSimErrorCode::InvalidGrid);
    }

    #[test]
    fn test_bad_config_rejected() {
        let config = SwellSimConfig {
            step_size: -1.0,
            ..swell_sim_default_config()
        };
        let mut sim: *mut SwellSimInstance = ptr::null_mut();
        let err = unsafe { swell_sim_new(10, 10, &config, &mut sim) };
        assert_eq!(err, SwellSimErrorCode::InvalidParameter);
        assert!(sim.is_null());
    }

    #[test]
    fn test_runaway_step_count_rejected() {
        let config = SwellSimConfig {
            max_distance: 1e30,
            step_size: 1e-6,
            ..swell_sim_default_config()
        };
        let mut sim: *mut SwellSimInstance = ptr::null_mut();
        let err = unsafe { swell_sim_new(10, 10, &config, &mut sim) };
        assert_eq!(err, SwellSimErrorCode::InvalidParameter);
        assert!(sim.is_null());
    }

    #[test]
    fn test_null_out_pointer() {
        let err = unsafe { swell_sim_new(10, 10, ptr::null(), ptr::null_mut()) };
        assert_eq!(err, SwellSimErrorCode::NullPointer);
    }
}

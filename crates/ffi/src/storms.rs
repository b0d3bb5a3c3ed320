use swell_sim_core::{GeoPoint, Knots, NauticalMiles, Storm};

use crate::error::{DefaultSwellSimError, SwellSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, read_state, track_error, write_state};
use crate::instance::SwellSimInstance;

/// Storm snapshot in C layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellSimStorm {
    /// Stable identity used to reuse rays between frames. 0 = no identity.
    pub id: u64,
    /// Latitude (degrees north).
    pub lat: f32,
    /// Longitude (degrees east, 130..250 on the default map).
    pub lon: f32,
    /// Sustained wind (knots).
    pub wind_kt: f32,
    /// Radius of influence (nautical miles).
    pub radius_nm: f32,
}

impl From<&SwellSimStorm> for Storm {
    fn from(s: &SwellSimStorm) -> Self {
        let storm = Storm::new(
            GeoPoint::new(s.lat, s.lon),
            Knots::new(s.wind_kt),
            NauticalMiles::new(s.radius_nm),
        );
        if s.id == 0 {
            storm
        } else {
            storm.with_name(s.id.to_string())
        }
    }
}

/// Replace the storm list with `len` snapshots copied from `storms`.
///
/// A null `storms` with `len == 0` clears the list.
///
/// Returns
/// - `SwellSimErrorCode::Ok` (0) on success
/// - `SwellSimErrorCode::NullPointer` if `ptr` is null, or `storms` is null with `len > 0`
///
/// # Safety
/// `storms` must point to `len` valid `SwellSimStorm` values. They are copied.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_set_storms(
    ptr: *const SwellSimInstance,
    storms: *const SwellSimStorm,
    len: usize,
) -> SwellSimErrorCode {
    if storms.is_null() && len > 0 {
        return track_error(&DefaultSwellSimError::null_pointer("storms"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let snapshots: Vec<Storm> = if len == 0 {
            Vec::new()
        } else {
            // SAFETY: caller guarantees `len` valid storms at `storms`.
            unsafe { std::slice::from_raw_parts(storms, len) }
                .iter()
                .map(Storm::from)
                .collect()
        };
        let mut state = write_state(instance)?;
        state.storms = snapshots;
        Ok(())
    })
}

/// Number of storms currently set.
///
/// # Safety
/// `out_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn swell_sim_storm_count(ptr: *const SwellSimInstance, out_count: *mut usize) -> SwellSimErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultSwellSimError::null_pointer("out_count"));
    }

    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let count = read_state(instance)?.storms.len();
        unsafe {
            *out_count = count;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{swell_sim_destroy, swell_sim_new};
    use std::ptr;

    #[test]
    fn test_id_becomes_cache_identity() {
        let named = Storm::from(&SwellSimStorm {
            id: 42,
            lat: 20.0,
            lon: 170.0,
            wind_kt: 50.0,
            radius_nm: 200.0,
        });
        assert_eq!(named.name.as_deref(), Some("42"));

        let anonymous = Storm::from(&SwellSimStorm {
            id: 0,
            lat: 20.0,
            lon: 170.0,
            wind_kt: 50.0,
            radius_nm: 200.0,
        });
        assert!(anonymous.name.is_none());
    }

    #[test]
    fn test_set_and_clear_storms() {
        let mut sim = ptr::null_mut();
        unsafe { swell_sim_new(200, 160, ptr::null(), &mut sim) };

        let storms = [
            SwellSimStorm { id: 1, lat: 18.0, lon: 160.0, wind_kt: 65.0, radius_nm: 300.0 },
            SwellSimStorm { id: 2, lat: 40.0, lon: 200.0, wind_kt: 30.0, radius_nm: 150.0 },
        ];
        let mut count = 0;
        unsafe {
            assert_eq!(swell_sim_set_storms(sim, storms.as_ptr(), 2), SwellSimErrorCode::Ok);
            swell_sim_storm_count(sim, &mut count);
        }
        assert_eq!(count, 2);

        unsafe {
            assert_eq!(swell_sim_set_storms(sim, ptr::null(), 0), SwellSimErrorCode::Ok);
            swell_sim_storm_count(sim, &mut count);
            assert_eq!(swell_sim_set_storms(sim, ptr::null(), 1), SwellSimErrorCode::NullPointer);
            swell_sim_destroy(sim);
        }
        assert_eq!(count, 0);
    }
}

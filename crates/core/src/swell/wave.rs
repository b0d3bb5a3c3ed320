//! Wave height and period estimates from storm parameters
//!
//! Simplified fetch-limited significant wave height, with the storm radius
//! standing in for fetch:
//!
//! ```text
//! Hs = 0.0016 × √fetch_m × U_mps        capped at 20 m
//! Tp = 0.5 × U_mps                      clamped to [8, 25] s
//! ```
//!
//! Both are pure functions of the storm snapshot. Garbage input (NaN, negative
//! radius) lands on a clamp boundary instead of leaking NaN into ray geometry.

use crate::core_types::units::{Meters, Seconds};
use crate::core_types::Storm;
use serde::{Deserialize, Serialize};

/// Empirical fetch coefficient
pub const HEIGHT_COEFFICIENT: f32 = 0.0016;

/// Height cap (m)
pub const MAX_WAVE_HEIGHT: f32 = 20.0;

/// Period per m/s of wind
pub const PERIOD_COEFFICIENT: f32 = 0.5;

/// Shortest period reported (s)
pub const MIN_WAVE_PERIOD: f32 = 8.0;

/// Longest period reported (s)
pub const MAX_WAVE_PERIOD: f32 = 25.0;

/// Height and period derived once per storm per field build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveEstimate {
    /// Significant wave height
    pub height: Meters,
    /// Peak period
    pub period: Seconds,
}

impl WaveEstimate {
    /// Estimate both quantities for a storm
    pub fn for_storm(storm: &Storm) -> Self {
        Self {
            height: estimate_height(storm),
            period: estimate_period(storm),
        }
    }
}

/// Significant wave height in [0, 20] m. NaN maps to 0.
pub fn estimate_height(storm: &Storm) -> Meters {
    let wind_mps = *storm.wind.to_meters_per_second();
    let fetch_m = *storm.radius.to_meters();

    let hs = HEIGHT_COEFFICIENT * fetch_m.sqrt() * wind_mps;
    if hs.is_nan() {
        return Meters::new(0.0);
    }
    Meters::new(hs.clamp(0.0, MAX_WAVE_HEIGHT))
}

/// Peak period in [8, 25] s. NaN maps to 8.
pub fn estimate_period(storm: &Storm) -> Seconds {
    let wind_mps = *storm.wind.to_meters_per_second();

    let tp = PERIOD_COEFFICIENT * wind_mps;
    if tp.is_nan() {
        return Seconds::new(MIN_WAVE_PERIOD);
    }
    Seconds::new(tp.clamp(MIN_WAVE_PERIOD, MAX_WAVE_PERIOD))
}

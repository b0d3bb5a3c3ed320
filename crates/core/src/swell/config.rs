//! Tunable parameters for the swell ray engine
//!
//! All values default to the empirically tuned constants the visualization was
//! designed around. None of them are physical law: the decay factors, the
//! deflection limit and the wind threshold are knobs, and tests vary them
//! freely by building a config value rather than touching shared state.

use crate::core_types::units::{Degrees, Knots};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most steps a single ray may take (`max_distance / step_size`)
pub const MAX_STEPS_PER_RAY: usize = 100_000;

/// Most rays a single storm may emit (`360° / angle_step`)
pub const MAX_RAYS_PER_STORM: usize = 3_600;

/// Configuration for a swell field build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwellConfig {
    /// Angular spacing between emitted rays (24 rays per storm at 15°)
    pub angle_step: Degrees,

    /// Maximum distance a ray travels, in cells
    pub max_distance: f32,

    /// Distance advanced per step, in cells
    pub step_size: f32,

    /// Storms with sustained wind below this emit no rays
    pub min_wind: Knots,

    /// Energy multiplier applied each time a ray is redirected off land
    pub land_penalty: f32,

    /// Energy multiplier applied after every step (geometric spreading)
    pub spreading_decay: f32,

    /// Rays whose energy drops below this after a land hit terminate
    pub min_energy: f32,

    /// Sharpest turn the refraction search may take around an obstacle
    pub max_deflection: Degrees,

    /// Rays recording fewer points than this are discarded
    pub min_points: usize,

    /// Trace (storm, angle) pairs on the rayon pool
    pub parallel: bool,
}

impl Default for SwellConfig {
    fn default() -> Self {
        Self {
            angle_step: Degrees::new(15.0),
            max_distance: 150.0,
            step_size: 1.5,
            min_wind: Knots::new(15.0),
            land_penalty: 0.85,
            spreading_decay: 0.997,
            min_energy: 0.1,
            max_deflection: Degrees::new(120.0),
            min_points: 3,
            parallel: false,
        }
    }
}

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A distance or angle step that must be finite and positive
    NonPositive { field: &'static str, value: f32 },
    /// A multiplicative factor outside (0, 1]
    FactorOutOfRange { field: &'static str, value: f32 },
    /// A value outside its documented range
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A step ratio that would trace more samples than `limit`
    TooFine {
        field: &'static str,
        count: f32,
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be finite and positive, got {value}")
            }
            Self::FactorOutOfRange { field, value } => {
                write!(f, "{field} must lie in (0, 1], got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must lie in [{min}, {max}], got {value}"),
            Self::TooFine { field, count, limit } => {
                write!(f, "{field} yields {count} samples, limit is {limit}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn factor(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}

fn at_most(field: &'static str, count: f32, limit: usize) -> Result<(), ConfigError> {
    if count <= limit as f32 {
        Ok(())
    } else {
        Err(ConfigError::TooFine { field, count, limit })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl SwellConfig {
    /// Check every field against its valid range
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("angle_step", *self.angle_step)?;
        within("angle_step", *self.angle_step, 0.0, 360.0)?;
        positive("max_distance", self.max_distance)?;
        positive("step_size", self.step_size)?;
        at_most("step_size", self.max_distance / self.step_size, MAX_STEPS_PER_RAY)?;
        at_most("angle_step", 360.0 / *self.angle_step, MAX_RAYS_PER_STORM)?;
        within("min_wind", *self.min_wind, 0.0, f32::MAX)?;
        factor("land_penalty", self.land_penalty)?;
        factor("spreading_decay", self.spreading_decay)?;
        within("min_energy", self.min_energy, 0.0, 1.0)?;
        positive("max_deflection", *self.max_deflection)?;
        within("max_deflection", *self.max_deflection, 0.0, 180.0)?;
        Ok(())
    }

    /// Number of rays emitted per storm: every `angle_step` in [0°, 360°)
    pub fn rays_per_storm(&self) -> usize {
        (360.0 / *self.angle_step).ceil() as usize
    }

    /// Emission heading of ray `k`, in radians
    #[inline]
    pub fn ray_heading(&self, k: usize) -> f32 {
        (k as f32 * *self.angle_step).to_radians()
    }

    /// Upper bound on steps per ray
    pub fn max_steps(&self) -> usize {
        (self.max_distance / self.step_size).ceil() as usize
    }

    /// Deflection limit in radians
    #[inline]
    pub fn max_deflection_rad(&self) -> f32 {
        *self.max_deflection.to_radians()
    }
}

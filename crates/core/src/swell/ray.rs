//! Single-ray marcher
//!
//! A ray starts at a storm origin with full energy and steps outward one
//! `step_size` (in cells) at a time. Each step:
//!
//! 1. Find the cell under the current position; off-grid ends the ray.
//! 2. On land, ask the [`RefractionResolver`] for a new heading. Blocked ends
//!    the ray; otherwise the land penalty is applied and the ray may deplete.
//! 3. Record the point, move along the heading, apply spreading decay.
//!
//! The terminating step never records a point.

use super::config::SwellConfig;
use super::refraction::{Refraction, RefractionResolver};
use crate::core_types::{heading_vector, Vec2};
use crate::geometry::CanvasLayout;
use crate::grid::LandMask;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Upper bound on the up-front point buffer, whatever the step count
const TRACE_CAPACITY_HINT: usize = 4096;

/// One recorded sample along a ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayPoint {
    /// Surface position in pixels
    pub position: Vec2,
    /// Distance from the origin in cells
    pub distance: f32,
    /// Cumulative energy multiplier in (0, 1]
    pub energy: f32,
}

/// Why a ray stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RayTermination {
    /// Reached the maximum distance
    Exhausted,
    /// Left the grid (or produced a non-finite position)
    OutOfBounds,
    /// Hit land with no acceptable open-water heading
    Blocked,
    /// Energy fell below the threshold after a land penalty
    Depleted,
}

impl fmt::Display for RayTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RayTermination::Exhausted => "exhausted",
            RayTermination::OutOfBounds => "out of bounds",
            RayTermination::Blocked => "blocked",
            RayTermination::Depleted => "depleted",
        };
        f.write_str(s)
    }
}

/// Walk state of a ray between steps
///
/// Distance is derived from the step count so it never drifts from
/// `k · step_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCursor {
    /// Surface position in pixels
    pub position: Vec2,
    /// Current heading in radians
    pub heading: f32,
    /// Steps taken so far
    pub step: usize,
    /// Cumulative energy multiplier
    pub energy: f32,
}

impl RayCursor {
    /// Fresh cursor at full energy
    pub fn new(origin: Vec2, heading: f32) -> Self {
        Self {
            position: origin,
            heading,
            step: 0,
            energy: 1.0,
        }
    }

    /// Distance traveled in cells
    #[inline]
    pub fn distance(&self, step_size: f32) -> f32 {
        self.step as f32 * step_size
    }

    /// Snapshot as a recorded point
    #[inline]
    pub fn point(&self, step_size: f32) -> RayPoint {
        RayPoint {
            position: self.position,
            distance: self.distance(step_size),
            energy: self.energy,
        }
    }

    /// Adopt a refracted heading and pay the land penalty
    #[must_use]
    pub fn deflect(self, heading: f32, land_penalty: f32) -> Self {
        Self {
            heading,
            energy: self.energy * land_penalty,
            ..self
        }
    }

    /// Move one step along the heading, scaling by the cell size in each axis
    #[must_use]
    pub fn advance(self, cell_size: Vec2, step_size: f32, spreading_decay: f32) -> Self {
        let dir = heading_vector(self.heading);
        let delta = Vec2::new(dir.x * step_size * cell_size.x, dir.y * step_size * cell_size.y);
        Self {
            position: self.position + delta,
            step: self.step + 1,
            energy: self.energy * spreading_decay,
            ..self
        }
    }
}

/// Recorded points of one ray and how it ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayTrace {
    /// Points in emission order
    pub points: Vec<RayPoint>,
    /// Termination reason
    pub termination: RayTermination,
}

/// Traces rays over a land mask with a fixed configuration
///
/// The configuration must have passed [`SwellConfig::validate`]; the step
/// loop relies on a positive, finite `step_size`.
pub struct RayTracer<'a, M: LandMask + ?Sized> {
    mask: &'a M,
    layout: CanvasLayout,
    config: &'a SwellConfig,
    resolver: RefractionResolver,
}

impl<'a, M: LandMask + ?Sized> RayTracer<'a, M> {
    /// Create a tracer for one build pass
    pub fn new(mask: &'a M, layout: CanvasLayout, config: &'a SwellConfig) -> Self {
        Self {
            mask,
            layout,
            config,
            resolver: RefractionResolver::new(config.max_deflection_rad()),
        }
    }

    /// Surface layout rays are traced in
    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    /// March a ray from `origin` (surface pixels) along `heading` (radians)
    pub fn trace(&self, origin: Vec2, heading: f32) -> RayTrace {
        let config = self.config;
        let cell_size = self.layout.cell_size();
        let mut points = Vec::with_capacity(config.max_steps().min(TRACE_CAPACITY_HINT));
        let mut cursor = RayCursor::new(origin, heading);

        let termination = loop {
            let distance = cursor.distance(config.step_size);
            if distance.is_nan() || distance >= config.max_distance {
                break RayTermination::Exhausted;
            }

            let Some((col, row)) = self.layout.cell_at(cursor.position) else {
                break RayTermination::OutOfBounds;
            };
            if !self.mask.in_bounds(col, row) {
                break RayTermination::OutOfBounds;
            }

            if self.mask.is_land(col, row) {
                match self.resolver.resolve(self.mask, col, row, cursor.heading) {
                    Refraction::Blocked => break RayTermination::Blocked,
                    Refraction::Redirect(new_heading) => {
                        cursor = cursor.deflect(new_heading, config.land_penalty);
                        if cursor.energy < config.min_energy {
                            break RayTermination::Depleted;
                        }
                    }
                }
            }

            points.push(cursor.point(config.step_size));
            cursor = cursor.advance(cell_size, config.step_size, config.spreading_decay);
        };

        trace!(
            "Ray at heading {:.3} rad ended {} after {} points",
            heading,
            termination,
            points.len()
        );

        RayTrace {
            points,
            termination,
        }
    }
}

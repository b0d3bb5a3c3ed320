//! Swell field builder
//!
//! Runs every active storm through the ray tracer. Each storm gets one wave
//! estimate, an origin on the rendering surface and `rays_per_storm` rays
//! emitted at `k · angle_step`. Rays never interact, so the (storm, angle)
//! pairs can be traced in parallel; the output order is always storm order
//! then angle order.

use super::config::{ConfigError, SwellConfig};
use super::ray::{RayPoint, RayTermination, RayTracer};
use super::style::{RayStroke, SwellStyle};
use super::wave::WaveEstimate;
use crate::core_types::{Storm, Vec2};
use crate::geometry::{CanvasLayout, MapProjection};
use crate::grid::LandMask;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One non-trivial ray tagged with its source storm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwellRay {
    /// Index of the storm in the slice passed to the build
    pub storm_index: usize,
    pub storm_name: Option<String>,
    /// Emission heading in radians
    pub heading: f32,
    pub wave: WaveEstimate,
    pub points: Vec<RayPoint>,
    pub outcome: RayTermination,
}

impl SwellRay {
    /// Rendering hints for this ray
    pub fn stroke(&self, style: &SwellStyle) -> RayStroke {
        RayStroke::from_ray(self, style)
    }
}

/// Result of one build pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwellField {
    /// Rays in storm order, then emission order
    pub rays: Vec<SwellRay>,
    /// Storms passed to the build
    pub storms_considered: usize,
    /// Storms that met the wind threshold and had a usable position
    pub storms_active: usize,
}

impl SwellField {
    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// Rays emitted by the storm at `storm_index`
    pub fn rays_for_storm(&self, storm_index: usize) -> impl Iterator<Item = &SwellRay> + '_ {
        self.rays.iter().filter(move |r| r.storm_index == storm_index)
    }

    /// Total recorded points across all rays
    pub fn point_count(&self) -> usize {
        self.rays.iter().map(|r| r.points.len()).sum()
    }

    /// Rendering hints for every ray, in ray order
    pub fn strokes(&self, style: &SwellStyle) -> Vec<RayStroke> {
        self.rays.iter().map(|r| r.stroke(style)).collect()
    }
}

/// Per-storm values shared by all of its rays
struct StormEmitter<'s> {
    index: usize,
    storm: &'s Storm,
    wave: WaveEstimate,
    origin: Vec2,
}

/// Builds swell fields from storm snapshots and a land mask
#[derive(Debug, Clone, PartialEq)]
pub struct SwellFieldBuilder {
    config: SwellConfig,
    projection: MapProjection,
    surface: Option<(f32, f32)>,
}

impl SwellFieldBuilder {
    /// Create a builder, rejecting an invalid configuration
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`SwellConfig::validate`].
    pub fn new(config: SwellConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            projection: MapProjection::default(),
            surface: None,
        })
    }

    /// Use a different map projection. Its grid size is replaced by the
    /// mask's at build time.
    pub fn with_projection(mut self, projection: MapProjection) -> Self {
        self.projection = projection;
        self
    }

    /// Trace on a `width`×`height` pixel surface instead of one pixel per cell
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface = Some((width, height));
        self
    }

    pub fn config(&self) -> &SwellConfig {
        &self.config
    }

    pub fn projection(&self) -> &MapProjection {
        &self.projection
    }

    /// Surface size set by [`with_surface`](Self::with_surface)
    pub fn surface(&self) -> Option<(f32, f32)> {
        self.surface
    }

    /// Surface layout used for a mask
    pub fn layout_for<M: LandMask + ?Sized>(&self, mask: &M) -> CanvasLayout {
        match self.surface {
            Some((w, h)) => CanvasLayout::new(w, h, mask.width(), mask.height()),
            None => CanvasLayout::unit(mask.width(), mask.height()),
        }
    }

    /// True when the storm's wind meets the threshold. NaN wind never does.
    pub fn is_active(&self, storm: &Storm) -> bool {
        *storm.wind >= *self.config.min_wind
    }

    /// Storm center on the rendering surface, `None` for a non-finite position
    pub fn storm_origin(&self, storm: &Storm, layout: &CanvasLayout) -> Option<Vec2> {
        if !storm.position.is_finite() {
            return None;
        }
        let projection = self
            .projection
            .with_grid(layout.grid_width, layout.grid_height);
        let cell = projection.lat_lon_to_cell(storm.position);
        let size = layout.cell_size();
        Some(Vec2::new(cell.x * size.x, cell.y * size.y))
    }

    /// Trace every active storm
    pub fn build<M: LandMask + ?Sized>(&self, storms: &[Storm], mask: &M) -> SwellField {
        let layout = self.layout_for(mask);
        let tracer = RayTracer::new(mask, layout, &self.config);

        let emitters: Vec<StormEmitter<'_>> = storms
            .iter()
            .enumerate()
            .filter_map(|(index, storm)| self.emitter(index, storm, &layout))
            .collect();

        let per_storm = self.config.rays_per_storm();
        let jobs: Vec<(usize, usize)> = (0..emitters.len())
            .flat_map(|e| (0..per_storm).map(move |k| (e, k)))
            .collect();

        let rays = self.trace_jobs(&tracer, &emitters, &jobs);

        info!(
            "Swell field built: {} rays from {}/{} storms",
            rays.len(),
            emitters.len(),
            storms.len()
        );

        SwellField {
            rays,
            storms_considered: storms.len(),
            storms_active: emitters.len(),
        }
    }

    /// Trace a single storm as if it sat at `index` in a full build.
    ///
    /// Returns `None` when the storm is inactive or has no usable position.
    pub fn build_storm<M: LandMask + ?Sized>(&self, index: usize, storm: &Storm, mask: &M) -> Option<Vec<SwellRay>> {
        let layout = self.layout_for(mask);
        let emitter = self.emitter(index, storm, &layout)?;
        let tracer = RayTracer::new(mask, layout, &self.config);

        let jobs: Vec<(usize, usize)> = (0..self.config.rays_per_storm()).map(|k| (0, k)).collect();
        Some(self.trace_jobs(&tracer, std::slice::from_ref(&emitter), &jobs))
    }

    fn emitter<'s>(&self, index: usize, storm: &'s Storm, layout: &CanvasLayout) -> Option<StormEmitter<'s>> {
        if !self.is_active(storm) {
            return None;
        }
        let Some(origin) = self.storm_origin(storm, layout) else {
            warn!(
                "Storm {} has a non-finite position ({}, {}), skipping",
                storm.label(),
                storm.position.lat,
                storm.position.lon
            );
            return None;
        };

        let wave = WaveEstimate::for_storm(storm);
        debug!(
            "Storm {}: Hs={}, Tp={}, origin=({:.1}, {:.1}), {} rays",
            storm.label(),
            wave.height,
            wave.period,
            origin.x,
            origin.y,
            self.config.rays_per_storm()
        );

        Some(StormEmitter {
            index,
            storm,
            wave,
            origin,
        })
    }

    fn trace_jobs<M: LandMask + ?Sized>(
        &self,
        tracer: &RayTracer<'_, M>,
        emitters: &[StormEmitter<'_>],
        jobs: &[(usize, usize)],
    ) -> Vec<SwellRay> {
        let min_points = self.config.min_points;
        let run = |&(e, k): &(usize, usize)| {
            let emitter = &emitters[e];
            let heading = self.config.ray_heading(k);
            let trace = tracer.trace(emitter.origin, heading);
            (trace.points.len() >= min_points).then(|| SwellRay {
                storm_index: emitter.index,
                storm_name: emitter.storm.name.clone(),
                heading,
                wave: emitter.wave,
                points: trace.points,
                outcome: trace.termination,
            })
        };

        if self.config.parallel {
            jobs.par_iter().filter_map(run).collect()
        } else {
            jobs.iter().filter_map(run).collect()
        }
    }
}

//! Swell ray propagation engine
//!
//! Storms emit a fan of rays that march across the land grid, bend around
//! coastlines and lose energy as they go. The output is a set of polylines
//! with per-point energy, plus rendering hints for the host.

pub mod cache;
pub mod config;
pub mod field;
pub mod ray;
pub mod refraction;
pub mod render;
pub mod style;
pub mod wave;

pub use cache::{CacheStats, SwellFieldCache};
pub use config::{ConfigError, SwellConfig, MAX_RAYS_PER_STORM, MAX_STEPS_PER_RAY};
pub use field::{SwellField, SwellFieldBuilder, SwellRay};
pub use ray::{RayCursor, RayPoint, RayTermination, RayTrace, RayTracer};
pub use refraction::{Refraction, RefractionResolver, NEIGHBOR_DIRECTIONS};
pub use render::SwellRenderer;
pub use style::{Glow, HeightBand, RayStroke, Rgba, SwellStyle};
pub use wave::{estimate_height, estimate_period, WaveEstimate};

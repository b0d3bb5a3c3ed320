//! Swell Simulation Core Library
//!
//! Visualizes ocean swell radiating from storms across a discretized Pacific
//! map. Each storm emits a fan of rays that march outward over a land/sea
//! grid, refract around coastlines, decay with distance and land contact, and
//! come out as polylines with per-point energy ready for a host renderer.
//!
//! ## Pipeline
//!
//! - [`WaveEstimate`] derives significant height and peak period per storm
//! - [`RayTracer`] marches a single ray, consulting the [`LandMask`]
//! - [`RefractionResolver`] picks an open-water heading at land contact
//! - [`SwellFieldBuilder`] runs every active storm and angle
//! - [`RayStroke`] carries color, width and glow hints to a [`SwellRenderer`]
//!
//! ```no_run
//! use swell_sim_core::{
//!     GeoPoint, Knots, LandGrid, LandPolygon, MapProjection, NauticalMiles, Storm,
//!     SwellConfig, SwellFieldBuilder,
//! };
//!
//! let projection = MapProjection::default();
//! let land = LandGrid::from_polygons(&projection, &LandPolygon::pacific_defaults())?;
//! let storm = Storm::new(GeoPoint::new(30.0, 170.0), Knots::new(45.0), NauticalMiles::new(250.0));
//!
//! let builder = SwellFieldBuilder::new(SwellConfig::default())?;
//! let field = builder.build(&[storm], &land);
//! println!("{} rays", field.ray_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core types and utilities
pub mod core_types;
pub mod geometry;

// Land/sea occupancy
pub mod grid;

// Ray propagation engine
pub mod swell;

// Re-export core types
pub use core_types::{heading_vector, GeoPoint, Storm, Vec2};
pub use core_types::{
    Degrees, Kilometers, Knots, Meters, MetersPerSecond, NauticalMiles, Radians, Seconds,
};

// Re-export geometry
pub use geometry::{CanvasLayout, MapProjection};

// Re-export grid types
pub use grid::{GridError, LandGrid, LandMask, LandPolygon};

// Re-export engine types
pub use swell::{
    CacheStats, ConfigError, Glow, RayPoint, RayStroke, RayTermination, RayTracer, Refraction,
    RefractionResolver, Rgba, SwellConfig, SwellField, SwellFieldBuilder, SwellFieldCache,
    SwellRay, SwellRenderer, SwellStyle, WaveEstimate,
};

//! Core types and utilities

pub mod storm;
pub mod units;
pub mod vec2;

pub use storm::{GeoPoint, Storm};
pub use units::*;
pub use vec2::{heading_vector, Vec2};

//! Vector type alias for 2D positions and directions.

use nalgebra::Vector2;

/// 2D vector type for rendering-surface positions and step directions.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the engine for ray positions, storm origins and polyline vertices.
pub type Vec2 = Vector2<f32>;

/// Unit step direction for a heading (0 = +x/east, π/2 = +y/south on screen).
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

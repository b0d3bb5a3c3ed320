//! Handoff to the host renderer

use super::field::SwellField;
use super::style::{RayStroke, SwellStyle};

/// Drawing surface that can stroke a ray polyline
///
/// Implemented by the host. The engine calls [`stroke_ray`](Self::stroke_ray)
/// once per ray in field order.
pub trait SwellRenderer {
    fn stroke_ray(&mut self, stroke: &RayStroke);
}

/// Collects strokes instead of drawing them
impl SwellRenderer for Vec<RayStroke> {
    fn stroke_ray(&mut self, stroke: &RayStroke) {
        self.push(stroke.clone());
    }
}

impl SwellField {
    /// Stroke every ray onto `renderer`, returning the number of strokes
    pub fn render<R: SwellRenderer + ?Sized>(&self, style: &SwellStyle, renderer: &mut R) -> usize {
        for ray in &self.rays {
            renderer.stroke_ray(&ray.stroke(style));
        }
        self.rays.len()
    }
}

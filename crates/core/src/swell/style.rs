//! Rendering hints derived from a traced ray
//!
//! The engine does not draw. It hands each ray to the host as a [`RayStroke`]:
//! a crest-sampled polyline with a color band picked by wave height, an alpha
//! scaled by the ray's mean energy, a line width and an optional glow.

use super::field::SwellRay;
use super::ray::RayPoint;
use crate::core_types::units::Meters;
use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha color, channels 0..=255 and alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Color used for heights strictly below `below`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightBand {
    pub below: Meters,
    pub color: Rgba,
}

/// Tunable rendering constants
///
/// The band limits and colors are empirical display choices, not physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwellStyle {
    /// Bands checked in order; first match wins
    pub bands: Vec<HeightBand>,
    /// Color for heights above every band
    pub top_color: Rgba,
    /// Line width = height / divisor before clamping
    pub width_divisor: f32,
    pub min_line_width: f32,
    pub max_line_width: f32,
    /// Multiplier on band alpha × mean energy
    pub opacity_factor: f32,
    /// Heights strictly above this get a glow
    pub glow_threshold: Meters,
    /// Glow alpha relative to the stroke alpha
    pub glow_alpha_factor: f32,
    pub glow_blur: f32,
    /// Crest spacing in samples at the origin
    pub crest_base_spacing: f32,
    /// Distance (cells) over which spacing grows by √ of the ratio
    pub crest_growth_distance: f32,
}

impl Default for SwellStyle {
    fn default() -> Self {
        Self {
            bands: vec![
                HeightBand {
                    below: Meters::new(3.0),
                    color: Rgba::new(150, 220, 255, 0.25),
                },
                HeightBand {
                    below: Meters::new(6.0),
                    color: Rgba::new(100, 180, 255, 0.35),
                },
                HeightBand {
                    below: Meters::new(10.0),
                    color: Rgba::new(70, 140, 240, 0.45),
                },
            ],
            top_color: Rgba::new(40, 100, 200, 0.55),
            width_divisor: 4.0,
            min_line_width: 0.5,
            max_line_width: 3.0,
            opacity_factor: 0.6,
            glow_threshold: Meters::new(8.0),
            glow_alpha_factor: 0.5,
            glow_blur: 3.0,
            crest_base_spacing: 3.0,
            crest_growth_distance: 50.0,
        }
    }
}

impl SwellStyle {
    /// Band color for a wave height
    pub fn color_for_height(&self, height: Meters) -> Rgba {
        self.bands
            .iter()
            .find(|band| height < band.below)
            .map_or(self.top_color, |band| band.color)
    }

    /// Stroke width for a wave height
    pub fn line_width(&self, height: Meters) -> f32 {
        (*height / self.width_divisor).clamp(self.min_line_width, self.max_line_width)
    }

    /// Sample spacing at a distance from the origin, never below one sample
    pub fn crest_spacing(&self, distance: f32) -> f32 {
        let growth = (distance / self.crest_growth_distance).sqrt();
        (self.crest_base_spacing * (1.0 + growth)).max(1.0)
    }

    /// Indices of the points kept as crests
    ///
    /// The first point is always kept; a later point is kept once it sits at
    /// least `crest_spacing(distance)` samples after the last kept one.
    pub fn crest_indices(&self, points: &[RayPoint]) -> Vec<usize> {
        let mut kept = Vec::new();
        let mut last: Option<usize> = None;
        for (i, p) in points.iter().enumerate() {
            let keep = match last {
                None => true,
                Some(l) => (i - l) as f32 >= self.crest_spacing(p.distance),
            };
            if keep {
                kept.push(i);
                last = Some(i);
            }
        }
        kept
    }
}

/// Soft shadow behind high swells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

/// Everything a host needs to stroke one ray
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RayStroke {
    /// Crest-sampled polyline in surface pixels
    pub points: Vec<Vec2>,
    /// Band color with the final alpha applied
    pub color: Rgba,
    pub line_width: f32,
    /// Mean energy of the ray, in [0, 1]
    pub opacity: f32,
    pub glow: Option<Glow>,
}

impl RayStroke {
    /// Rendering hints for a ray, using its storm's wave height
    pub fn from_ray(ray: &SwellRay, style: &SwellStyle) -> Self {
        Self::from_points(&ray.points, ray.wave.height, style)
    }

    /// Build a stroke from recorded points and the storm's wave height
    pub fn from_points(points: &[RayPoint], height: Meters, style: &SwellStyle) -> Self {
        let opacity = mean_energy(points).clamp(0.0, 1.0);
        let band = style.color_for_height(height);
        let color = band.with_alpha(band.a * opacity * style.opacity_factor);

        let glow = (height > style.glow_threshold).then(|| Glow {
            color: color.with_alpha(color.a * style.glow_alpha_factor),
            blur: style.glow_blur,
        });

        Self {
            points: style
                .crest_indices(points)
                .into_iter()
                .map(|i| points[i].position)
                .collect(),
            color,
            line_width: style.line_width(height),
            opacity,
            glow,
        }
    }
}

fn mean_energy(points: &[RayPoint]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(|p| p.energy).sum::<f32>() / points.len() as f32
}

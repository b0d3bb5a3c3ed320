//! Storm snapshot consumed by the swell engine.
//!
//! Storms are created and advanced by an external simulation step. The engine
//! only reads a snapshot of each one for the duration of a single field build.

use super::units::{Knots, NauticalMiles};
use serde::{Deserialize, Serialize};

/// Geographic position in degrees. Longitude is east-positive and may exceed
/// 180 (the Pacific map runs 130°E to 250°E).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub lat: f32,
    /// Longitude in degrees
    pub lon: f32,
}

impl GeoPoint {
    /// Create a new geographic point
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Read-only storm snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storm {
    /// Optional identity used for caching and labelling
    pub name: Option<String>,
    /// Storm center
    pub position: GeoPoint,
    /// Sustained wind speed
    pub wind: Knots,
    /// Radius of influence, used as the fetch proxy
    pub radius: NauticalMiles,
}

impl Storm {
    /// Create an unnamed storm
    pub fn new(position: GeoPoint, wind: Knots, radius: NauticalMiles) -> Self {
        Self {
            name: None,
            position,
            wind,
            radius,
        }
    }

    /// Attach a name to the storm
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for log output
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storm_builder_and_label() {
        let storm = Storm::new(
            GeoPoint::new(30.0, 180.0),
            Knots::new(60.0),
            NauticalMiles::new(250.0),
        );
        assert_eq!(storm.label(), "<unnamed>");

        let named = storm.with_name("Kona");
        assert_eq!(named.label(), "Kona");
        assert_eq!(*named.wind, 60.0);
    }

    #[test]
    fn test_geo_point_finite() {
        assert!(GeoPoint::new(10.0, 200.0).is_finite());
        assert!(!GeoPoint::new(f32::NAN, 200.0).is_finite());
    }
}

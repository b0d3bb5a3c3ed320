//! Named geographic land outlines and point-in-polygon tests

use crate::core_types::GeoPoint;
use serde::{Deserialize, Serialize};

/// Closed land outline in lat/lon degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandPolygon {
    /// Display name
    pub name: String,
    /// Outline vertices; closing the ring is optional
    pub vertices: Vec<GeoPoint>,
}

impl LandPolygon {
    /// Build a polygon from `(lat, lon)` pairs
    pub fn from_lat_lon(name: impl Into<String>, pairs: &[(f32, f32)]) -> Self {
        Self {
            name: name.into(),
            vertices: pairs.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect(),
        }
    }

    /// Even-odd ray-crossing test (latitude as y, longitude as x)
    pub fn contains(&self, point: GeoPoint) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.lat > point.lat) != (vj.lat > point.lat) {
                let crossing_lon = (vj.lon - vi.lon) * (point.lat - vi.lat) / (vj.lat - vi.lat) + vi.lon;
                if point.lon < crossing_lon {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Coarse North Pacific coastlines used by the default map
    pub fn pacific_defaults() -> Vec<LandPolygon> {
        vec![
            Self::from_lat_lon(
                "hawaii",
                &[(22.3, 201.5), (22.3, 202.4), (21.8, 202.4), (21.2, 201.7), (21.2, 201.5), (22.3, 201.5)],
            ),
            Self::from_lat_lon(
                "japan",
                &[(30.0, 130.0), (30.0, 138.0), (35.0, 138.0), (34.0, 142.0), (40.0, 145.0), (45.0, 140.0), (42.0, 138.0), (30.0, 130.0)],
            ),
            Self::from_lat_lon(
                "kamchatka",
                &[(50.0, 155.0), (62.0, 165.0), (60.0, 170.0), (50.0, 160.0), (50.0, 155.0)],
            ),
            Self::from_lat_lon(
                "alaska",
                &[(52.0, 185.0), (55.0, 200.0), (60.0, 195.0), (65.0, 190.0), (68.0, 210.0), (68.0, 220.0), (60.0, 215.0), (55.0, 210.0), (52.0, 185.0)],
            ),
            Self::from_lat_lon(
                "namerica",
                &[(60.0, 215.0), (60.0, 230.0), (55.0, 235.0), (50.0, 240.0), (45.0, 240.0), (35.0, 245.0), (30.0, 240.0), (30.0, 220.0), (45.0, 220.0), (55.0, 215.0), (60.0, 215.0)],
            ),
        ]
    }
}

/// True when any polygon contains the point
pub fn is_point_in_land(polygons: &[LandPolygon], point: GeoPoint) -> bool {
    polygons.iter().any(|poly| poly.contains(point))
}

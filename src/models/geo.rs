//! Geographic value types used throughout the gazetteer.

use serde::{Deserialize, Serialize};

/// Geographic point (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geographic bounding box. Degenerate (zero-area) boxes are legal and
/// behave as closed intervals on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl GeoBbox {
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// Closed-interval containment, inclusive on all four bounds.
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_contains_is_inclusive() {
        let bbox = GeoBbox::new(10.0, 20.0, 11.0, 21.0);
        assert!(bbox.contains(GeoPoint::new(10.5, 20.5)));
        assert!(bbox.contains(GeoPoint::new(10.0, 20.0)));
        assert!(bbox.contains(GeoPoint::new(11.0, 21.0)));
        assert!(!bbox.contains(GeoPoint::new(9.999, 20.5)));
        assert!(!bbox.contains(GeoPoint::new(10.5, 21.001)));
    }

    #[test]
    fn test_degenerate_bbox_contains_its_point() {
        let bbox = GeoBbox::new(45.0, 9.0, 45.0, 9.0);
        assert!(bbox.contains(GeoPoint::new(45.0, 9.0)));
        assert!(!bbox.contains(GeoPoint::new(45.0, 9.000001)));
    }
}

//! Bottom-level unit: a town. Leaf of the hierarchy.

use geo::{Contains, Point, Polygon};
use serde::Serialize;

use crate::models::{GeoBbox, GeoPoint};

/// A town: the smallest administrative unit. Towns own no children, so
/// they carry only their identity and geometry.
#[derive(Debug, Clone, Serialize)]
pub struct Town {
    pub id: String,
    pub region_id: String,
    pub city_id: String,
    pub name: String,
    pub bbox: GeoBbox,
    #[serde(skip)]
    pub(crate) polygon: Polygon<f64>,
}

impl Town {
    /// Exact containment test against the town's boundary polygon.
    /// Points exactly on the boundary count as outside.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.polygon.contains(&Point::new(point.lng, point.lat))
    }

    /// Left-pad a raw source identifier to the canonical six-character
    /// form. Source files strip leading zeros ("123" for "000123").
    pub fn canonical_id(raw: &str) -> String {
        format!("{raw:0>6}")
    }
}

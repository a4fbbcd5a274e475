//! Decoded boundary records, as handed over by the format-parsing layer.
//!
//! The gazetteer never inspects raw source bytes; it consumes one of three
//! well-typed record shapes, one per hierarchy level. Geometry arrives in
//! source units together with its coordinate system tag and is normalized
//! to geographic degrees during the load.

use serde::{Deserialize, Serialize};

/// Coordinate system of a record's bounding box and boundary vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceCrs {
    /// Planar UTM coordinates: x = easting, y = northing.
    Utm { zone_number: u8, zone_letter: char },
    /// Already geographic: x = lng, y = lat.
    Geographic,
}

/// Axis-aligned bounding box in source units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// A single boundary vertex in source units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawVertex {
    pub x: f64,
    pub y: f64,
}

/// Top-level unit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRecord {
    pub id: String,
    pub name: String,
    pub bbox: RawBox,
    pub boundary: Vec<RawVertex>,
    pub crs: SourceCrs,
}

/// Mid-level unit record, carrying its parent region id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub region_id: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Provincial-capital flag from the source attributes.
    #[serde(default)]
    pub main_city: bool,
    pub bbox: RawBox,
    pub boundary: Vec<RawVertex>,
    pub crs: SourceCrs,
}

/// Bottom-level unit record, carrying both ancestor ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownRecord {
    pub region_id: String,
    pub city_id: String,
    pub id: String,
    pub name: String,
    pub bbox: RawBox,
    pub boundary: Vec<RawVertex>,
    pub crs: SourceCrs,
}

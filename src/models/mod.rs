//! Shared data types: geographic values and decoded boundary records.

mod geo;
mod record;

pub use geo::{GeoBbox, GeoPoint};
pub use record::{CityRecord, RawBox, RawVertex, RegionRecord, SourceCrs, TownRecord};

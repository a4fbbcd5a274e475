//! Muni - an administrative-boundary gazetteer.
//!
//! Loads a country's Region -> City -> Town hierarchy from decoded
//! boundary records and resolves geographic points to the smallest
//! containing unit via bounding-box prefiltering and exact
//! point-in-polygon tests.

pub mod gazetteer;
pub mod models;
pub mod projection;
pub mod source;

pub use gazetteer::{City, Country, LoadError, Region, Town};
pub use models::{GeoBbox, GeoPoint};

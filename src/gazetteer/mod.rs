//! The administrative hierarchy and its point-resolution engine.
//!
//! A [`Country`] owns regions, regions own cities, cities own towns. Each
//! level keeps an R-tree over its children's bounding boxes so point
//! queries prefilter cheaply before the exact polygon test.

mod city;
mod country;
mod geometry;
mod index;
mod region;
mod town;

pub use city::City;
pub use country::{Country, LoadError};
pub use index::BoxIndex;
pub use region::Region;
pub use town::Town;

//! Mid-level unit: a city, owning its towns.

use geo::Polygon;
use hashbrown::HashMap;
use serde::Serialize;

use super::index::BoxIndex;
use super::town::Town;
use crate::models::{GeoBbox, GeoPoint};

/// A city. Owns its towns in load order, with an id map for exact lookup
/// and an R-tree over their bounding boxes for point queries.
#[derive(Debug, Serialize)]
pub struct City {
    pub region_id: String,
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub main_city: bool,
    pub bbox: GeoBbox,
    pub towns: Vec<Town>,
    #[serde(skip)]
    pub(crate) polygon: Polygon<f64>,
    #[serde(skip)]
    towns_by_id: HashMap<String, usize>,
    #[serde(skip)]
    towns_index: BoxIndex,
}

impl City {
    pub(crate) fn new(
        region_id: String,
        id: String,
        name: String,
        short_name: Option<String>,
        main_city: bool,
        bbox: GeoBbox,
        polygon: Polygon<f64>,
    ) -> Self {
        Self {
            region_id,
            id,
            name,
            short_name,
            main_city,
            bbox,
            towns: Vec::new(),
            polygon,
            towns_by_id: HashMap::new(),
            towns_index: BoxIndex::new(),
        }
    }

    pub(crate) fn add_town(&mut self, town: Town) {
        let slot = self.towns.len();
        self.towns_by_id.insert(town.id.clone(), slot);
        self.towns_index.insert(slot, &town.bbox);
        self.towns.push(town);
    }

    /// Exact lookup by canonical (zero-padded) town id.
    pub fn town_by_id(&self, id: &str) -> Option<&Town> {
        self.towns_by_id.get(id).map(|&slot| &self.towns[slot])
    }

    /// Towns whose bounding box covers the point. Candidates only; exact
    /// polygon containment is the caller's concern.
    pub fn towns_at_point(&self, point: GeoPoint) -> Vec<&Town> {
        self.towns_index
            .query(point)
            .into_iter()
            .map(|slot| &self.towns[slot])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

    fn empty_polygon() -> Polygon<f64> {
        Polygon::new(LineString::new(vec![]), vec![])
    }

    fn town(id: &str, bbox: GeoBbox) -> Town {
        Town {
            id: Town::canonical_id(id),
            region_id: "01".to_string(),
            city_id: "001".to_string(),
            name: format!("Town {id}"),
            bbox,
            polygon: empty_polygon(),
        }
    }

    fn city_with_towns() -> City {
        let mut city = City::new(
            "01".to_string(),
            "001".to_string(),
            "Test City".to_string(),
            None,
            false,
            GeoBbox::new(10.0, 10.0, 20.0, 20.0),
            empty_polygon(),
        );
        city.add_town(town("123", GeoBbox::new(12.0, 12.0, 13.0, 13.0)));
        city.add_town(town("456", GeoBbox::new(14.0, 14.0, 15.0, 15.0)));
        city
    }

    #[test]
    fn test_town_lookup_uses_canonical_id() {
        let city = city_with_towns();
        assert!(city.town_by_id("000123").is_some());
        assert!(city.town_by_id("123").is_none());
        assert!(city.town_by_id("999999").is_none());
    }

    #[test]
    fn test_towns_at_point_prefilters_by_bbox() {
        let city = city_with_towns();
        let hits = city.towns_at_point(GeoPoint::new(12.5, 12.5));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "000123");

        assert!(city.towns_at_point(GeoPoint::new(19.0, 19.0)).is_empty());
    }
}

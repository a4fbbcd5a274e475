//! Top-level unit: a region, owning its cities.

use geo::Polygon;
use hashbrown::HashMap;
use serde::Serialize;

use super::city::City;
use super::index::BoxIndex;
use crate::models::{GeoBbox, GeoPoint};

/// A region. Structurally the same shape as [`City`]: owned children in
/// load order, id map, child bounding-box index.
#[derive(Debug, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub bbox: GeoBbox,
    pub cities: Vec<City>,
    #[serde(skip)]
    pub(crate) polygon: Polygon<f64>,
    #[serde(skip)]
    cities_by_id: HashMap<String, usize>,
    #[serde(skip)]
    cities_index: BoxIndex,
}

impl Region {
    pub(crate) fn new(id: String, name: String, bbox: GeoBbox, polygon: Polygon<f64>) -> Self {
        Self {
            id,
            name,
            bbox,
            cities: Vec::new(),
            polygon,
            cities_by_id: HashMap::new(),
            cities_index: BoxIndex::new(),
        }
    }

    pub(crate) fn add_city(&mut self, city: City) {
        let slot = self.cities.len();
        self.cities_by_id.insert(city.id.clone(), slot);
        self.cities_index.insert(slot, &city.bbox);
        self.cities.push(city);
    }

    pub(crate) fn city_mut(&mut self, id: &str) -> Option<&mut City> {
        let slot = *self.cities_by_id.get(id)?;
        Some(&mut self.cities[slot])
    }

    /// Exact lookup by city id.
    pub fn city_by_id(&self, id: &str) -> Option<&City> {
        self.cities_by_id.get(id).map(|&slot| &self.cities[slot])
    }

    /// Cities whose bounding box covers the point (candidates only).
    pub fn cities_at_point(&self, point: GeoPoint) -> Vec<&City> {
        self.cities_index
            .query(point)
            .into_iter()
            .map(|slot| &self.cities[slot])
            .collect()
    }
}

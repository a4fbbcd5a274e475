//! The country aggregate: build pipeline and point resolution.

use hashbrown::HashMap;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::city::City;
use super::geometry::{resolve_geometry, ResolvedGeometry};
use super::index::BoxIndex;
use super::region::Region;
use super::town::Town;
use crate::models::{CityRecord, GeoPoint, RegionRecord, TownRecord};
use crate::projection::InvalidZone;

/// Fatal problems during the load. A country is never usable half-built,
/// so all of these abort the build.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no regions loaded")]
    NoRegions,
    #[error("no cities loaded")]
    NoCities,
    #[error("no towns loaded")]
    NoTowns,
    #[error("record {child} references unknown region {region}")]
    UnknownRegion { region: String, child: String },
    #[error("town {town} references unknown city {city} in region {region}")]
    UnknownCity {
        region: String,
        city: String,
        town: String,
    },
    #[error(transparent)]
    Projection(#[from] InvalidZone),
}

/// The whole administrative hierarchy, built once from decoded records and
/// read-only afterwards. Queries take `&self` and never mutate, so a built
/// country is safe to share across threads.
#[derive(Debug, Serialize)]
pub struct Country {
    pub regions: Vec<Region>,
    #[serde(skip)]
    regions_by_id: HashMap<String, usize>,
    #[serde(skip)]
    regions_index: BoxIndex,
}

impl Country {
    /// Build the hierarchy from decoded records, strictly top-down:
    /// regions, then cities, then towns. Each child record must reference
    /// an already-loaded parent. Geometry is normalized to geographic
    /// degrees in parallel per pass; insertion stays sequential.
    pub fn build(
        regions: Vec<RegionRecord>,
        cities: Vec<CityRecord>,
        towns: Vec<TownRecord>,
    ) -> Result<Self, LoadError> {
        let mut country = Self {
            regions: Vec::new(),
            regions_by_id: HashMap::new(),
            regions_index: BoxIndex::new(),
        };

        country.load_regions(regions)?;
        country.load_cities(cities)?;
        country.load_towns(towns)?;

        info!(
            regions = country.regions.len(),
            "country hierarchy loaded"
        );
        Ok(country)
    }

    fn load_regions(&mut self, records: Vec<RegionRecord>) -> Result<(), LoadError> {
        if records.is_empty() {
            return Err(LoadError::NoRegions);
        }

        // Projection is per-record CPU work; insertion stays sequential.
        let resolved: Vec<(RegionRecord, ResolvedGeometry)> = records
            .into_par_iter()
            .map(|r| resolve_geometry(&r.bbox, &r.boundary, r.crs).map(|g| (r, g)))
            .collect::<Result<_, InvalidZone>>()?;

        for (record, geometry) in resolved {
            let slot = self.regions.len();
            self.regions_by_id.insert(record.id.clone(), slot);
            self.regions_index.insert(slot, &geometry.bbox);
            self.regions.push(Region::new(
                record.id,
                record.name,
                geometry.bbox,
                geometry.polygon,
            ));
        }

        info!(count = self.regions.len(), "regions loaded");
        Ok(())
    }

    fn load_cities(&mut self, records: Vec<CityRecord>) -> Result<(), LoadError> {
        if records.is_empty() {
            return Err(LoadError::NoCities);
        }

        let resolved: Vec<(CityRecord, ResolvedGeometry)> = records
            .into_par_iter()
            .map(|r| resolve_geometry(&r.bbox, &r.boundary, r.crs).map(|g| (r, g)))
            .collect::<Result<_, InvalidZone>>()?;

        let mut count = 0;
        for (record, geometry) in resolved {
            let slot = *self.regions_by_id.get(&record.region_id).ok_or_else(|| {
                LoadError::UnknownRegion {
                    region: record.region_id.clone(),
                    child: record.id.clone(),
                }
            })?;

            self.regions[slot].add_city(City::new(
                record.region_id,
                record.id,
                record.name,
                record.short_name,
                record.main_city,
                geometry.bbox,
                geometry.polygon,
            ));
            count += 1;
        }

        info!(count, "cities loaded");
        Ok(())
    }

    fn load_towns(&mut self, records: Vec<TownRecord>) -> Result<(), LoadError> {
        if records.is_empty() {
            return Err(LoadError::NoTowns);
        }

        let resolved: Vec<(TownRecord, ResolvedGeometry)> = records
            .into_par_iter()
            .map(|r| resolve_geometry(&r.bbox, &r.boundary, r.crs).map(|g| (r, g)))
            .collect::<Result<_, InvalidZone>>()?;

        let mut count = 0;
        for (record, geometry) in resolved {
            let id = Town::canonical_id(&record.id);

            let slot = *self.regions_by_id.get(&record.region_id).ok_or_else(|| {
                LoadError::UnknownRegion {
                    region: record.region_id.clone(),
                    child: id.clone(),
                }
            })?;
            let region = &mut self.regions[slot];
            let city = region
                .city_mut(&record.city_id)
                .ok_or_else(|| LoadError::UnknownCity {
                    region: record.region_id.clone(),
                    city: record.city_id.clone(),
                    town: id.clone(),
                })?;

            city.add_town(Town {
                id,
                region_id: record.region_id,
                city_id: record.city_id,
                name: record.name,
                bbox: geometry.bbox,
                polygon: geometry.polygon,
            });
            count += 1;
        }

        info!(count, "towns loaded");
        Ok(())
    }

    /// Exact lookup by region id.
    pub fn region_by_id(&self, id: &str) -> Option<&Region> {
        self.regions_by_id.get(id).map(|&slot| &self.regions[slot])
    }

    /// Regions whose bounding box covers the point (candidates only).
    pub fn regions_at_point(&self, point: GeoPoint) -> Vec<&Region> {
        self.regions_index
            .query(point)
            .into_iter()
            .map(|slot| &self.regions[slot])
            .collect()
    }

    /// Resolve a point to the smallest administrative unit containing it.
    ///
    /// Walks region -> city -> town bounding-box candidates and returns
    /// the first town whose polygon contains the point, in discovery
    /// order (region iteration x city iteration x town query order).
    /// Source polygons may overlap near digitized borders; the winner is
    /// stable for stable input ordering, nothing more.
    pub fn find_town_by_point(&self, point: GeoPoint) -> Option<&Town> {
        for region in self.regions_at_point(point) {
            for city in region.cities_at_point(point) {
                for town in city.towns_at_point(point) {
                    if town.contains(point) {
                        debug!(town = %town.id, "point resolved");
                        return Some(town);
                    }
                }
            }
        }

        debug!(lat = point.lat, lng = point.lng, "no containing town");
        None
    }
}

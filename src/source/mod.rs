//! Record source: folders of decoded boundary records.
//!
//! The byte-level boundary format is decoded upstream; its output is
//! consumed here as JSON files, each holding an array of records for one
//! hierarchy level. Files are read in sorted path order so the load order
//! (and therefore resolution tie-breaking) is stable across runs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;
use walkdir::WalkDir;

use crate::gazetteer::Country;
use crate::models::{CityRecord, RegionRecord, TownRecord};

/// Load a country from three folders of record files, one per level.
pub fn load_country(
    region_dir: impl AsRef<Path>,
    city_dir: impl AsRef<Path>,
    town_dir: impl AsRef<Path>,
) -> Result<Country> {
    let regions: Vec<RegionRecord> = read_records(region_dir.as_ref())?;
    let cities: Vec<CityRecord> = read_records(city_dir.as_ref())?;
    let towns: Vec<TownRecord> = read_records(town_dir.as_ref())?;

    let country = Country::build(regions, cities, towns)?;
    Ok(country)
}

/// Collect every record from the `.json` files under a folder.
fn read_records<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to scan {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }

        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let batch: Vec<T> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse {}", path.display()))?;
        records.extend(batch);
    }

    info!(count = records.len(), dir = %dir.display(), "records read");
    Ok(records)
}

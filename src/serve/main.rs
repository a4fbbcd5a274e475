//! Gazetteer HTTP server.
//!
//! Serves point resolution (`/search`) and read-only views of the
//! Region -> City -> Town hierarchy. The country is loaded once at
//! startup; every handler works against the immutable shared state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use muni::source::load_country;
use muni::{Country, GeoPoint};

mod config;
use config::Config;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Administrative gazetteer server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: String,

    /// TOML config file with the data folders
    #[arg(long)]
    config: Option<PathBuf>,

    /// Folder with region record files (overrides config)
    #[arg(long)]
    region_dir: Option<PathBuf>,

    /// Folder with city record files (overrides config)
    #[arg(long)]
    city_dir: Option<PathBuf>,

    /// Folder with town record files (overrides config)
    #[arg(long)]
    town_dir: Option<PathBuf>,
}

struct AppState {
    country: Country,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => Some(Config::load_from_file(path)?),
        None => None,
    };
    let data = file_config.map(|c| c.data);

    let region_dir = args
        .region_dir
        .or_else(|| data.as_ref().map(|d| d.region_dir.clone()))
        .context("region folder not set (--region-dir or config file)")?;
    let city_dir = args
        .city_dir
        .or_else(|| data.as_ref().map(|d| d.city_dir.clone()))
        .context("city folder not set (--city-dir or config file)")?;
    let town_dir = args
        .town_dir
        .or_else(|| data.as_ref().map(|d| d.town_dir.clone()))
        .context("town folder not set (--town-dir or config file)")?;

    info!(
        regions = %region_dir.display(),
        cities = %city_dir.display(),
        towns = %town_dir.display(),
        "loading country"
    );
    let country = load_country(&region_dir, &city_dir, &town_dir)?;

    let state = Arc::new(AppState { country });

    let app = Router::new()
        .route("/search", get(search_handler))
        .route("/country", get(country_handler))
        .route("/country/regions", get(regions_handler))
        .route("/country/regions/{region_id}", get(region_handler))
        .route("/country/regions/{region_id}/cities", get(cities_handler))
        .route(
            "/country/regions/{region_id}/cities/{city_id}",
            get(city_handler),
        )
        .route(
            "/country/regions/{region_id}/cities/{city_id}/towns",
            get(towns_handler),
        )
        .route(
            "/country/regions/{region_id}/cities/{city_id}/towns/{town_id}",
            get(town_handler),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("listening on {}", args.listen);
    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    /// Combined "lat,lng" form; takes precedence over the split params.
    latlng: Option<String>,
}

fn parse_point(query: &SearchQuery) -> Option<GeoPoint> {
    if let Some(latlng) = &query.latlng {
        let mut parts = latlng.splitn(2, ',');
        let lat = parts.next()?.trim().parse().ok()?;
        let lng = parts.next()?.trim().parse().ok()?;
        return Some(GeoPoint::new(lat, lng));
    }
    match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    }
}

fn to_json<T: serde::Serialize>(value: Option<&T>) -> Json<Value> {
    // Absence is a null body, not an error response.
    Json(match value {
        Some(v) => serde_json::to_value(v).unwrap_or(Value::Null),
        None => Value::Null,
    })
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Value> {
    let town = parse_point(&query).and_then(|p| state.country.find_town_by_point(p));
    to_json(town)
}

async fn country_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    to_json(Some(&state.country))
}

async fn regions_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    to_json(Some(&state.country.regions))
}

async fn region_handler(
    State(state): State<Arc<AppState>>,
    Path(region_id): Path<String>,
) -> Json<Value> {
    to_json(state.country.region_by_id(&region_id))
}

async fn cities_handler(
    State(state): State<Arc<AppState>>,
    Path(region_id): Path<String>,
) -> Json<Value> {
    to_json(
        state
            .country
            .region_by_id(&region_id)
            .map(|region| &region.cities),
    )
}

async fn city_handler(
    State(state): State<Arc<AppState>>,
    Path((region_id, city_id)): Path<(String, String)>,
) -> Json<Value> {
    to_json(
        state
            .country
            .region_by_id(&region_id)
            .and_then(|region| region.city_by_id(&city_id)),
    )
}

async fn towns_handler(
    State(state): State<Arc<AppState>>,
    Path((region_id, city_id)): Path<(String, String)>,
) -> Json<Value> {
    to_json(
        state
            .country
            .region_by_id(&region_id)
            .and_then(|region| region.city_by_id(&city_id))
            .map(|city| &city.towns),
    )
}

async fn town_handler(
    State(state): State<Arc<AppState>>,
    Path((region_id, city_id, town_id)): Path<(String, String, String)>,
) -> Json<Value> {
    to_json(
        state
            .country
            .region_by_id(&region_id)
            .and_then(|region| region.city_by_id(&city_id))
            .and_then(|city| city.town_by_id(&town_id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_latlng_takes_precedence() {
        let query = SearchQuery {
            lat: Some(1.0),
            lng: Some(2.0),
            latlng: Some("45.5,9.2".to_string()),
        };
        let point = parse_point(&query).unwrap();
        assert_eq!(point.lat, 45.5);
        assert_eq!(point.lng, 9.2);
    }

    #[test]
    fn test_parse_point_split_params() {
        let query = SearchQuery {
            lat: Some(41.9),
            lng: Some(12.5),
            latlng: None,
        };
        let point = parse_point(&query).unwrap();
        assert_eq!(point.lat, 41.9);
        assert_eq!(point.lng, 12.5);
    }

    #[test]
    fn test_parse_point_missing_or_malformed() {
        assert!(parse_point(&SearchQuery {
            lat: Some(41.9),
            lng: None,
            latlng: None,
        })
        .is_none());
        assert!(parse_point(&SearchQuery {
            lat: None,
            lng: None,
            latlng: Some("not-a-point".to_string()),
        })
        .is_none());
    }
}

//! Load the country from record folders and print it as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use muni::source::load_country;

#[derive(Parser, Debug)]
#[command(name = "dump")]
#[command(about = "Dump the loaded country hierarchy as JSON")]
struct Args {
    /// Folder with region record files
    #[arg(long)]
    region_dir: PathBuf,

    /// Folder with city record files
    #[arg(long)]
    city_dir: PathBuf,

    /// Folder with town record files
    #[arg(long)]
    town_dir: PathBuf,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let country = load_country(&args.region_dir, &args.city_dir, &args.town_dir)?;
    info!(regions = country.regions.len(), "country loaded");

    let json = if args.pretty {
        serde_json::to_string_pretty(&country)?
    } else {
        serde_json::to_string(&country)?
    };
    println!("{json}");

    Ok(())
}

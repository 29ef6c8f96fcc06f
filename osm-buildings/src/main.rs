use anyhow::Result;
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use osm_buildings::collect::global_variables::{CZML_PATH, DEFAULT_STOREY_HEIGHT};
use osm_buildings::{BoundingBox, BuildingCollection, BuildingRecord, CzmlWriter, OverpassCollect};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Fetch OSM building data and optional CZML output"
)]
struct Args {
    /// Directory for CZML output files
    #[arg(long, default_value = CZML_PATH)]
    czml_directory: String,

    /// Saved Overpass API JSON payload to use instead of network requests
    #[arg(long)]
    offline_payload: Option<PathBuf>,

    /// Override default Overpass endpoints (can be supplied multiple times)
    #[arg(
        long = "overpass-url",
        env = "OSM_BUILDINGS_OVERPASS_URLS",
        value_delimiter = ','
    )]
    overpass_urls: Vec<String>,

    /// South-west corner latitude and longitude
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        overrides_with = "sw",
        value_names = ["LAT", "LON"],
        allow_negative_numbers = true,
        default_values_t = [37.794547743358315, -122.40069761028977]
    )]
    sw: Vec<f64>,

    /// North-east corner latitude and longitude
    #[arg(
        long,
        num_args = 2,
        action = ArgAction::Set,
        overrides_with = "ne",
        value_names = ["LAT", "LON"],
        allow_negative_numbers = true,
        default_values_t = [37.79677364468366, -122.39509830705937]
    )]
    ne: Vec<f64>,

    /// Disable CZML output
    #[arg(long)]
    no_czml: bool,

    /// Also write footprints as a GeoJSON FeatureCollection
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Floor height in meters used to convert building:levels
    #[arg(long, default_value_t = DEFAULT_STOREY_HEIGHT)]
    storey_height: f64,
}

impl Args {
    fn bbox(&self) -> BoundingBox {
        BoundingBox::from_corners((self.sw[0], self.sw[1]), (self.ne[0], self.ne[1]))
    }
}

#[derive(Serialize)]
struct Output<'a> {
    count: usize,
    buildings: &'a [BuildingRecord],
    czml_files: Option<Vec<String>>,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the JSON result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let bbox = args.bbox();
    tracing::info!(bbox = %bbox.to_overpass_filter(), "Collecting OSM buildings");

    let mut collect = OverpassCollect::new(Some(args.overpass_urls.clone()))?;
    collect.set_offline_payload(args.offline_payload.clone());

    let collection = BuildingCollection::from_overpass(&collect, bbox, Some(args.storey_height))?;

    let czml_files = if args.no_czml {
        None
    } else {
        let writer = CzmlWriter::new(Some(args.czml_directory.clone()));
        Some(collection.write_czml(&writer)?)
    };

    if let Some(ref path) = args.geojson {
        collection.save_geojson(path)?;
    }

    let output = Output {
        count: collection.len(),
        buildings: collection.buildings(),
        czml_files,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

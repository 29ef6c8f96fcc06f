// Example: Fetching buildings from the Overpass API
//
// IMPORTANT:
// - Overpass requires an internet connection
// - Public instances rate-limit heavy clients, keep the bounding box small
// - Corners are (latitude, longitude) in WGS84
//
use anyhow::Result;
use osm_buildings::geo_core::BoundingBox;
use osm_buildings::geometric::building::BuildingCollection;
use osm_buildings::{CzmlWriter, OverpassCollect};

fn main() -> Result<()> {
    println!("=== Example: Loading buildings from Overpass ===\n");

    // Financial District, San Francisco
    let bbox = BoundingBox::from_corners(
        (37.794547743358315, -122.40069761028977),
        (37.79677364468366, -122.39509830705937),
    );
    println!("Bounding box: {}\n", bbox.to_overpass_filter());

    let collect = OverpassCollect::new(None)?;
    println!("Endpoints tried in order:");
    for url in &collect.overpass_urls {
        println!("  - {}", url);
    }

    match BuildingCollection::from_overpass(&collect, bbox, None) {
        Ok(collection) => {
            println!("\n✓ Buildings loaded: {}", collection.len());

            let with_height = collection
                .buildings()
                .iter()
                .filter(|b| b.height_m.is_some())
                .count();
            println!("  - With height: {}", with_height);

            let writer = CzmlWriter::new(Some("./output/czml".to_string()));
            let files = collection.write_czml(&writer)?;
            println!("  - CZML files written: {}", files.len());

            collection.save_geojson("./output/buildings.geojson")?;
            println!("  - GeoJSON: ./output/buildings.geojson");
        }
        Err(e) => {
            eprintln!("✗ Error loading from Overpass:");
            eprintln!("  {}", e);
            eprintln!("\nPossible checks:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Public Overpass instances may be overloaded, retry later");
        }
    }

    Ok(())
}

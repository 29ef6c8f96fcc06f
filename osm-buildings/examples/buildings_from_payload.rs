// Example: Resolving buildings from a saved Overpass payload
// This example shows the pipeline without any network access
use anyhow::Result;
use osm_buildings::geometric::building::BuildingCollection;

fn main() -> Result<()> {
    println!("=== Example: Resolving buildings from an Overpass payload ===\n");

    // Overpass JSON as returned by `out body;` with `(._;>;);`
    let payload = r#"
    {
        "version": 0.6,
        "elements": [
            {"type": "node", "id": 1, "lat": 37.7950, "lon": -122.3990},
            {"type": "node", "id": 2, "lat": 37.7950, "lon": -122.3985},
            {"type": "node", "id": 3, "lat": 37.7954, "lon": -122.3985},
            {"type": "node", "id": 4, "lat": 37.7954, "lon": -122.3990},
            {"type": "node", "id": 5, "lat": 37.7960, "lon": -122.3980},
            {"type": "way", "id": 100, "nodes": [1, 2, 3, 4, 1],
             "tags": {"building": "yes", "height": "42 m",
                      "addr:housenumber": "1", "addr:street": "Market Street",
                      "addr:city": "San Francisco"}},
            {"type": "way", "id": 101, "nodes": [2, 3, 5],
             "tags": {"building": "retail", "building:levels": "3"}},
            {"type": "way", "id": 102, "nodes": [4, 99],
             "tags": {"building": "shed"}}
        ]
    }
    "#;

    let collection = BuildingCollection::from_payload(payload.as_bytes(), None)?;

    println!("Buildings resolved: {}", collection.len());
    for building in collection.buildings() {
        println!("  Way {}:", building.way_id);
        println!("    - Vertices: {}", building.outline.len());
        println!("    - Height: {:?} m", building.height_m);
        println!("    - Address: {:?}", building.address);
    }

    // Way 102 only resolves one node and is dropped
    println!("\nScene documents:");
    for document in collection.scene_documents() {
        println!(
            "  {} -> extruded to {} m",
            document.geometry().id,
            document.geometry().polygon.extruded_height
        );
    }

    println!("\nResult JSON:");
    println!(
        "{}",
        serde_json::to_string_pretty(&collection.to_result(false))?
    );

    Ok(())
}

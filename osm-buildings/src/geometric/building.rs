use anyhow::{Context, Result};
use geo::Polygon;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::path::Path;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::collect::global_variables::DEFAULT_STOREY_HEIGHT;
use crate::collect::overpass::overpass_collect::OverpassCollect;
use crate::collect::overpass::payload::OverpassPayload;
use crate::geo_core::{outline_to_polygon, BoundingBox, Coordinate};
use crate::geometric::attributes::{format_address, resolve_height};
use crate::geometric::element::{Element, Way};
use crate::geometric::graph::{GraphIndex, NodeIndex};
use crate::geometric::ring::{build_ring, is_valid_ring};
use crate::scene::czml::ScenePacketDocument;
use crate::scene::czml_writer::CzmlWriter;

/// One resolved building footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub way_id: i64,
    /// Closed ring: first == last, at least 4 coordinates
    pub outline: Vec<Coordinate>,
    /// Height in meters, absent when no tag could be parsed
    pub height_m: Option<f64>,
    pub address: Option<String>,
}

impl BuildingRecord {
    /// Footprint as a geo polygon, x = longitude
    pub fn footprint(&self) -> Polygon<f64> {
        outline_to_polygon(&self.outline)
    }

    pub fn to_scene_document(&self) -> ScenePacketDocument {
        ScenePacketDocument::from_building(self)
    }
}

/// Pipeline output: `{count, buildings, scene_packets}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingQueryResult {
    pub count: usize,
    pub buildings: Vec<BuildingRecord>,
    /// Present only when scene output was requested
    pub scene_packets: Option<Vec<ScenePacketDocument>>,
}

/// Assemble one way, or None when its ring is degenerate
pub fn assemble_building(
    way: &Way,
    nodes: &NodeIndex,
    storey_height: f64,
) -> Option<BuildingRecord> {
    let outline = build_ring(&way.nodes, nodes);
    if !is_valid_ring(&outline) {
        debug!(
            way_id = way.id,
            resolved = outline.len(),
            "Skipping degenerate building ring"
        );
        return None;
    }

    Some(BuildingRecord {
        way_id: way.id,
        outline,
        height_m: resolve_height(&way.tags, storey_height),
        address: format_address(&way.tags),
    })
}

/// Assemble every building way of the index, in encounter order
pub fn assemble_buildings(index: &GraphIndex<'_>, storey_height: f64) -> Vec<BuildingRecord> {
    let nodes = index.nodes();

    #[cfg(feature = "rayon")]
    let buildings: Vec<BuildingRecord> = index
        .building_ways()
        .par_iter()
        .filter_map(|way| assemble_building(way, nodes, storey_height))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let buildings: Vec<BuildingRecord> = index
        .building_ways()
        .iter()
        .filter_map(|way| assemble_building(way, nodes, storey_height))
        .collect();

    debug!(
        candidates = index.building_count(),
        assembled = buildings.len(),
        "Assembled buildings"
    );
    buildings
}

/// Collection of buildings resolved from one Overpass response
pub struct BuildingCollection {
    pub buildings: Vec<BuildingRecord>,
    pub default_storey_height: f64,
    bbox: Option<BoundingBox>,
}

impl BuildingCollection {
    pub fn new(default_storey_height: Option<f64>) -> Self {
        BuildingCollection {
            buildings: Vec::new(),
            default_storey_height: default_storey_height.unwrap_or(DEFAULT_STOREY_HEIGHT),
            bbox: None,
        }
    }

    /// Resolve buildings from already-parsed elements
    pub fn from_elements(elements: &[Element], default_storey_height: Option<f64>) -> Self {
        let mut collection = Self::new(default_storey_height);
        collection.load_elements(elements);
        collection
    }

    /// Resolve buildings from a raw Overpass JSON document
    pub fn from_payload(bytes: &[u8], default_storey_height: Option<f64>) -> Result<Self> {
        let payload = OverpassPayload::from_slice(bytes)?;
        Ok(Self::from_elements(&payload.elements, default_storey_height))
    }

    /// Query Overpass for the bbox and resolve the answer
    pub fn from_overpass(
        collect: &OverpassCollect,
        bbox: BoundingBox,
        default_storey_height: Option<f64>,
    ) -> Result<Self> {
        let mut collection = Self::new(default_storey_height);
        collection.set_bbox(bbox);
        collection.run_internal(collect)?;
        Ok(collection)
    }

    pub fn set_bbox(&mut self, bbox: BoundingBox) {
        self.bbox = Some(bbox);
    }

    pub fn set_default_storey_height(&mut self, height: f64) {
        self.default_storey_height = height;
    }

    /// Fetch and resolve, replacing any buildings already held
    pub fn run_internal(&mut self, collect: &OverpassCollect) -> Result<()> {
        let bbox = self
            .bbox
            .context("Bounding box must be set before querying Overpass")?;
        let payload = collect.fetch(&bbox)?;
        self.load_elements(&payload.elements);
        info!(count = self.buildings.len(), "Buildings resolved");
        Ok(())
    }

    fn load_elements(&mut self, elements: &[Element]) {
        let index = GraphIndex::build(elements);
        self.buildings = assemble_buildings(&index, self.default_storey_height);
    }

    pub fn buildings(&self) -> &Vec<BuildingRecord> {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// One scene document per building, same order as `buildings()`
    pub fn scene_documents(&self) -> Vec<ScenePacketDocument> {
        self.buildings
            .iter()
            .map(BuildingRecord::to_scene_document)
            .collect()
    }

    /// Write one `way_<id>.czml` per building plus the manifest
    pub fn write_czml(&self, writer: &CzmlWriter) -> Result<Vec<String>> {
        let documents = self.scene_documents();
        writer.write_all(
            self.buildings
                .iter()
                .map(|b| b.way_id)
                .zip(documents.iter()),
        )
    }

    pub fn to_result(&self, include_scene: bool) -> BuildingQueryResult {
        BuildingQueryResult {
            count: self.buildings.len(),
            buildings: self.buildings.clone(),
            scene_packets: include_scene.then(|| self.scene_documents()),
        }
    }

    /// Footprints as a GeoJSON FeatureCollection in EPSG:4326
    pub fn to_geojson(&self) -> GeoJson {
        let features = self
            .buildings
            .iter()
            .map(|building| {
                let geometry = Geometry::new(Value::from(&building.footprint()));

                let mut properties = Map::new();
                properties.insert("way_id".to_string(), building.way_id.into());
                properties.insert(
                    "height_m".to_string(),
                    building.height_m.map_or(serde_json::Value::Null, Into::into),
                );
                properties.insert(
                    "address".to_string(),
                    building
                        .address
                        .clone()
                        .map_or(serde_json::Value::Null, Into::into),
                );

                let mut feature = Feature::from(geometry);
                feature.properties = Some(properties);
                feature
            })
            .collect();

        GeoJson::from(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    /// Save footprints to a GeoJSON file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, self.to_geojson().to_string())
            .with_context(|| format!("Failed to write GeoJSON file: {}", path.display()))?;
        info!(path = %path.display(), count = self.buildings.len(), "GeoJSON saved");
        Ok(())
    }
}

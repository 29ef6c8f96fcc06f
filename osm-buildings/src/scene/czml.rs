use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geo_core::Coordinate;
use crate::geometric::building::BuildingRecord;

/// Extrusion used when a building has no resolved height
pub const DEFAULT_EXTRUDED_HEIGHT: f64 = 10.0;

const CLOCK_INTERVAL: &str = "2020-01-01T00:00:00Z/2020-01-01T00:01:00Z";
const CLOCK_CURRENT_TIME: &str = "2020-01-01T00:00:00Z";
const CZML_VERSION: &str = "1.0";

/// Translucent orange
const FILL_RGBA: [u8; 4] = [255, 165, 0, 160];
const OUTLINE_RGBA: [u8; 4] = [0, 0, 0, 255];

/// One CZML document: `[document packet, polygon packet]`
///
/// Serializes as a two-element JSON array. Contains no timestamps or generated
/// ids, so the same building always renders to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenePacketDocument(pub DocumentPacket, pub GeometryPacket);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPacket {
    pub id: String,
    pub name: String,
    pub version: String,
    pub clock: Clock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    pub interval: String,
    pub current_time: String,
    pub multiplier: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPacket {
    pub id: String,
    pub name: String,
    pub polygon: PolygonGraphics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonGraphics {
    pub positions: Positions,
    pub per_position_height: bool,
    pub extruded_height: f64,
    pub height: f64,
    pub material: Material,
    pub outline: bool,
    pub outline_color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Positions {
    /// Flattened `[lon, lat, height]` triples
    pub cartographic_degrees: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub solid_color: SolidColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidColor {
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub rgba: [u8; 4],
}

impl ScenePacketDocument {
    /// Scene document for one assembled building
    /// Missing heights extrude to DEFAULT_EXTRUDED_HEIGHT; the record is untouched
    pub fn from_building(building: &BuildingRecord) -> Self {
        build_scene_document(building.way_id, &building.outline, building.height_m)
    }

    pub fn document(&self) -> &DocumentPacket {
        &self.0
    }

    pub fn geometry(&self) -> &GeometryPacket {
        &self.1
    }

    /// Pretty JSON (2-space indent) with a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize CZML document")?;
        json.push('\n');
        Ok(json)
    }
}

pub fn build_scene_document(
    way_id: i64,
    outline: &[Coordinate],
    height: Option<f64>,
) -> ScenePacketDocument {
    let document = DocumentPacket {
        id: "document".to_string(),
        name: format!("OSM Way {}", way_id),
        version: CZML_VERSION.to_string(),
        clock: Clock {
            interval: CLOCK_INTERVAL.to_string(),
            current_time: CLOCK_CURRENT_TIME.to_string(),
            multiplier: 1,
        },
    };

    // Vertices sit on the ground, the volume comes from extrudedHeight
    let cartographic_degrees = outline
        .iter()
        .flat_map(|c| [c.lng, c.lat, 0.0])
        .collect();

    let geometry = GeometryPacket {
        id: format!("building-{}", way_id),
        name: format!("Building {}", way_id),
        polygon: PolygonGraphics {
            positions: Positions {
                cartographic_degrees,
            },
            per_position_height: false,
            extruded_height: height.unwrap_or(DEFAULT_EXTRUDED_HEIGHT),
            height: 0.0,
            material: Material {
                solid_color: SolidColor {
                    color: Rgba { rgba: FILL_RGBA },
                },
            },
            outline: true,
            outline_color: Rgba { rgba: OUTLINE_RGBA },
        },
    };

    ScenePacketDocument(document, geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_scene_document_layout() {
        let doc = build_scene_document(100, &square(), Some(9.0));
        let value = serde_json::to_value(&doc).unwrap();

        let expected = json!([
            {
                "id": "document",
                "name": "OSM Way 100",
                "version": "1.0",
                "clock": {
                    "interval": "2020-01-01T00:00:00Z/2020-01-01T00:01:00Z",
                    "currentTime": "2020-01-01T00:00:00Z",
                    "multiplier": 1
                }
            },
            {
                "id": "building-100",
                "name": "Building 100",
                "polygon": {
                    "positions": {
                        "cartographicDegrees": [
                            0.0, 0.0, 0.0,
                            1.0, 0.0, 0.0,
                            1.0, 1.0, 0.0,
                            0.0, 0.0, 0.0
                        ]
                    },
                    "perPositionHeight": false,
                    "extrudedHeight": 9.0,
                    "height": 0.0,
                    "material": {"solidColor": {"color": {"rgba": [255, 165, 0, 160]}}},
                    "outline": true,
                    "outlineColor": {"rgba": [0, 0, 0, 255]}
                }
            }
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_longitude_comes_first() {
        let outline = vec![Coordinate::new(48.0, 2.0)];
        let doc = build_scene_document(1, &outline, None);
        assert_eq!(
            doc.geometry().polygon.positions.cartographic_degrees,
            vec![2.0, 48.0, 0.0]
        );
    }

    #[test]
    fn test_default_extruded_height() {
        let building = BuildingRecord {
            way_id: 5,
            outline: square(),
            height_m: None,
            address: None,
        };
        let doc = ScenePacketDocument::from_building(&building);
        assert_eq!(doc.geometry().polygon.extruded_height, DEFAULT_EXTRUDED_HEIGHT);
        // The record keeps its absent height
        assert_eq!(building.height_m, None);
    }

    #[test]
    fn test_deterministic_output() {
        let building = BuildingRecord {
            way_id: 42,
            outline: square(),
            height_m: Some(12.5),
            address: Some("1, Main St".to_string()),
        };
        let first = ScenePacketDocument::from_building(&building)
            .to_json_pretty()
            .unwrap();
        let second = ScenePacketDocument::from_building(&building)
            .to_json_pretty()
            .unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with("]\n"));
        assert!(first.starts_with("[\n  {\n    \"id\": \"document\""));
    }
}

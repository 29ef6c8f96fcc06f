use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// WGS84 coordinate of a resolved node
/// No altitude: heights travel separately as extrusion values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }

    /// Bit-level key, used to count distinct vertices of a ring
    pub(crate) fn bits(&self) -> (u64, u64) {
        // -0.0 + 0.0 == +0.0, so both zeros share one key
        ((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord { x: c.lng, y: c.lat }
    }
}

/// Build a single-ring polygon (x = longitude, y = latitude) from an outline
pub fn outline_to_polygon(outline: &[Coordinate]) -> Polygon<f64> {
    let exterior: LineString<f64> = outline.iter().map(|c| Coord::from(*c)).collect();
    Polygon::new(exterior, vec![])
}

/// Bounding box structure, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64, // min latitude
    pub west: f64,  // min longitude
    pub north: f64, // max latitude
    pub east: f64,  // max longitude
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        BoundingBox {
            south,
            west,
            north,
            east,
        }
    }

    /// Build from two opposite corners given as (lat, lon)
    /// Corner order does not matter, min/max are normalized
    pub fn from_corners(sw_corner: (f64, f64), ne_corner: (f64, f64)) -> Self {
        BoundingBox {
            south: sw_corner.0.min(ne_corner.0),
            north: sw_corner.0.max(ne_corner.0),
            west: sw_corner.1.min(ne_corner.1),
            east: sw_corner.1.max(ne_corner.1),
        }
    }

    /// Overpass QL bbox filter: south,west,north,east
    pub fn to_overpass_filter(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

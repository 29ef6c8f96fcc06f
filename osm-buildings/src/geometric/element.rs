use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// OSM tag mapping of a way
pub type Tags = HashMap<String, String>;

/// One entry of an Overpass `elements` array
///
/// Discriminated by the JSON `"type"` field. Relations and any other element
/// kind are kept as `Other` and ignored by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Way(Way),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    /// Ordered node references, possibly pointing at nodes absent from the payload
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub tags: Tags,
}

impl Way {
    pub fn new(id: i64, nodes: Vec<i64>, tags: Tags) -> Self {
        Way { id, nodes, tags }
    }

    /// A way is a building when it carries a non-empty `building` tag
    /// (`building=no` still counts, matching what Overpass selected)
    pub fn is_building(&self) -> bool {
        self.tags.get("building").is_some_and(|v| !v.is_empty())
    }
}

/// Tag value, treating empty strings as absent
pub(crate) fn non_empty_tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

impl Element {
    pub fn node(id: i64, lat: f64, lon: f64) -> Self {
        Element::Node(Node { id, lat, lon })
    }

    pub fn way(id: i64, nodes: Vec<i64>, tags: Tags) -> Self {
        Element::Way(Way::new(id, nodes, tags))
    }
}

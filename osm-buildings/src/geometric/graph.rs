use std::collections::HashMap;
use tracing::debug;

use crate::geo_core::Coordinate;
use crate::geometric::element::{Element, Way};

/// Node id -> coordinate lookup
pub type NodeIndex = HashMap<i64, Coordinate>;

/// Read-only lookups over one query response
///
/// Built once from the flat element list, then borrowed by every per-way step.
/// Building ways keep their encounter order; a repeated way id keeps the first
/// position and the latest record.
#[derive(Debug, Default)]
pub struct GraphIndex<'a> {
    nodes: NodeIndex,
    ways: Vec<&'a Way>,
    way_positions: HashMap<i64, usize>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(elements: &'a [Element]) -> Self {
        let mut index = GraphIndex::default();

        for element in elements {
            match element {
                Element::Node(node) => {
                    index
                        .nodes
                        .insert(node.id, Coordinate::new(node.lat, node.lon));
                }
                Element::Way(way) if way.is_building() => {
                    match index.way_positions.get(&way.id).copied() {
                        Some(pos) => index.ways[pos] = way,
                        None => {
                            index.way_positions.insert(way.id, index.ways.len());
                            index.ways.push(way);
                        }
                    }
                }
                _ => {}
            }
        }

        debug!(
            nodes = index.nodes.len(),
            buildings = index.ways.len(),
            elements = elements.len(),
            "Indexed element graph"
        );
        index
    }

    pub fn nodes(&self) -> &NodeIndex {
        &self.nodes
    }

    /// Building ways, in encounter order
    pub fn building_ways(&self) -> &[&'a Way] {
        &self.ways
    }

    pub fn building_count(&self) -> usize {
        self.ways.len()
    }
}

use std::collections::HashSet;

use crate::geo_core::Coordinate;
use crate::geometric::graph::NodeIndex;

/// Closed ring length needed for a polygon: 3 vertices + closing point
pub const MIN_RING_LEN: usize = 4;

/// Resolve node references to coordinates and close the ring
///
/// References missing from the index are skipped: extracts routinely clip
/// peripheral nodes.
pub fn build_ring(node_ids: &[i64], nodes: &NodeIndex) -> Vec<Coordinate> {
    let mut ring: Vec<Coordinate> = node_ids
        .iter()
        .filter_map(|id| nodes.get(id).copied())
        .collect();
    close_ring(&mut ring);
    ring
}

/// Append the first coordinate when the ring is open. Idempotent.
pub fn close_ring(ring: &mut Vec<Coordinate>) {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last()) {
        if first != *last {
            ring.push(first);
        }
    }
}

pub fn distinct_vertices(ring: &[Coordinate]) -> usize {
    ring.iter().map(Coordinate::bits).collect::<HashSet<_>>().len()
}

/// A closed ring that can outline a polygon
pub fn is_valid_ring(ring: &[Coordinate]) -> bool {
    ring.len() >= MIN_RING_LEN && distinct_vertices(ring) >= MIN_RING_LEN - 1
}

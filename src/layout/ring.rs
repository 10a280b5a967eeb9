//! Ring placement for root expansions.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;

use super::LayoutParams;
use crate::models::KnowledgeGraph;

/// Places every non-root node on a circle of radius `ring_gap * depth`
/// around the root.
///
/// All depth levels are recomputed on every call, members ordered
/// lexicographically by id. This is cheap for the small depth sets this graph
/// grows, and idempotent for unchanged membership, so repeated root
/// expansions leave untouched levels exactly where they were.
pub fn place(graph: &mut KnowledgeGraph, params: &LayoutParams) -> Vec<(String, Vec2)> {
    let center = graph
        .node(graph.root_id())
        .and_then(|n| n.pos)
        .unwrap_or(Vec2::ZERO);

    // Group by depth, ids sorted within each level.
    let mut levels: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for node in graph.iter_nodes() {
        if node.depth > 0 {
            levels.entry(node.depth).or_default().push(node.id.clone());
        }
    }

    let mut assignments = Vec::new();
    for (depth, mut ids) in levels {
        ids.sort();
        let radius = params.ring_gap * depth as f32;
        let count = ids.len() as f32;
        for (i, id) in ids.into_iter().enumerate() {
            let angle = TAU * i as f32 / count;
            let pos = center + radius * Vec2::new(angle.cos(), angle.sin());
            graph.set_position(&id, pos);
            assignments.push((id, pos));
        }
    }
    assignments
}

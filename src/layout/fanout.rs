//! Forward fan-out placement for non-root expansions.

use glam::Vec2;

use super::LayoutParams;
use crate::models::KnowledgeGraph;

/// Places the new children of a non-root focus.
///
/// The fan opens along the parent→focus direction: children (sorted by
/// id) are offset symmetrically to the sides, with forward distance
/// growing with lateral offset so the fan's center stays uncrowded. A
/// bounded repair loop pushes a candidate further forward while it sits
/// closer than `min_separation` to any placed node. This is best-effort
/// decluttering, not a global solve.
pub fn place(
    graph: &mut KnowledgeGraph,
    focus_id: &str,
    new_ids: &[String],
    params: &LayoutParams,
) -> Vec<(String, Vec2)> {
    let Some(focus) = graph.node(focus_id) else {
        return Vec::new();
    };
    let focus_pos = focus.pos.unwrap_or(Vec2::ZERO);
    let forward = forward_direction(graph, focus_id, focus_pos);
    let side = forward.perp();

    let mut ids = new_ids.to_vec();
    ids.sort();
    let count = ids.len() as f32;

    let mut assignments = Vec::with_capacity(ids.len());
    for (i, id) in ids.into_iter().enumerate() {
        if graph.node(&id).is_none() {
            continue;
        }
        let lateral = (i as f32 - (count - 1.0) / 2.0) * params.side_gap;
        let distance = params.forward_gap + lateral.abs() * params.crowd_factor;
        let mut candidate = focus_pos + forward * distance + side * lateral;

        let mut attempts = 0;
        while attempts < params.max_push_attempts
            && crowded(graph, &id, candidate, params.min_separation)
        {
            candidate += forward * params.push_step;
            attempts += 1;
        }

        graph.set_position(&id, candidate);
        assignments.push((id, candidate));
    }
    assignments
}

/// Unit vector from the focus's parent toward the focus.
///
/// The focus was itself created as a one-hop child, so it has exactly one
/// inbound edge in well-formed graphs. Falls back to the +X axis when no
/// usable parent direction exists.
fn forward_direction(graph: &KnowledgeGraph, focus_id: &str, focus_pos: Vec2) -> Vec2 {
    if let Some(parent) = graph.parent_of(focus_id) {
        if let Some(parent_pos) = parent.pos {
            let delta = focus_pos - parent_pos;
            if delta.length_squared() > f32::EPSILON {
                return delta.normalize();
            }
        }
    }
    Vec2::X
}

/// True while any placed node other than `id` sits within `min_separation`.
fn crowded(graph: &KnowledgeGraph, id: &str, candidate: Vec2, min_separation: f32) -> bool {
    graph.iter_nodes().any(|n| {
        n.id != id
            && n.pos
                .is_some_and(|p| p.distance(candidate) < min_separation)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Edge, ExpansionBatch, Node};

    /// root at origin, focus one ring_gap along +X, three unplaced children.
    fn fan_graph(child_ids: &[&str]) -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new(Node::new("root", "中心", "root", 0));
        g.merge(ExpansionBatch {
            nodes: vec![Node::new("focus", "焦点", "concept", 1)],
            edges: vec![Edge::new("root-focus", "root", "focus", "関連")],
        });
        g.set_position("focus", Vec2::new(200.0, 0.0));
        g.merge(ExpansionBatch {
            nodes: child_ids
                .iter()
                .map(|id| Node::new(*id, format!("{id}のラベル"), "concept", 2))
                .collect(),
            edges: child_ids
                .iter()
                .map(|id| Edge::new(format!("focus-{id}"), "focus", *id, "関連"))
                .collect(),
        });
        g
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_children_fan_forward_from_parent_direction() {
        let params = LayoutParams::default();
        let mut g = fan_graph(&["a", "b", "c"]);
        place(&mut g, "focus", &ids(&["a", "b", "c"]), &params);

        // parent→focus direction is +X, so every child lands beyond the focus
        for id in ["a", "b", "c"] {
            let pos = g.node(id).unwrap().pos.unwrap();
            assert!(pos.x > 200.0, "{id} not forward of focus: {pos:?}");
        }

        // middle child (by id order) sits on the axis, outer two symmetric
        let a = g.node("a").unwrap().pos.unwrap();
        let b = g.node("b").unwrap().pos.unwrap();
        let c = g.node("c").unwrap().pos.unwrap();
        assert!((b.y).abs() < 1e-3);
        assert!(((a.y) + (c.y)).abs() < 1e-3);
        // crowd factor pushes the outer children further forward
        assert!(a.x > b.x);
        assert!(c.x > b.x);
    }

    #[test]
    fn test_deterministic_for_unordered_id_set() {
        let params = LayoutParams::default();
        let mut g1 = fan_graph(&["a", "b", "c"]);
        let mut g2 = fan_graph(&["a", "b", "c"]);
        let first = place(&mut g1, "focus", &ids(&["c", "a", "b"]), &params);
        let second = place(&mut g2, "focus", &ids(&["a", "b", "c"]), &params);
        assert_eq!(first.len(), 3);

        let mut first_sorted = first.clone();
        first_sorted.sort_by(|x, y| x.0.cmp(&y.0));
        let mut second_sorted = second.clone();
        second_sorted.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(first_sorted, second_sorted);

        for id in ["a", "b", "c"] {
            assert_eq!(g1.node(id).unwrap().pos, g2.node(id).unwrap().pos);
        }
    }

    #[test]
    fn test_collision_pushes_along_forward_direction() {
        let params = LayoutParams::default();
        let mut g = fan_graph(&["a"]);
        // occupy the spot the single child would take
        g.merge(ExpansionBatch {
            nodes: vec![Node::new("block", "邪魔", "concept", 2)],
            edges: vec![Edge::new("focus-block", "focus", "block", "関連")],
        });
        let blocked_at = Vec2::new(200.0 + params.forward_gap, 0.0);
        g.set_position("block", blocked_at);

        place(&mut g, "focus", &ids(&["a"]), &params);
        let pos = g.node("a").unwrap().pos.unwrap();
        assert!(pos.x > blocked_at.x, "candidate was not pushed forward");
        assert!(
            pos.distance(blocked_at) >= params.min_separation,
            "candidate still crowds the blocking node"
        );
        assert!((pos.y).abs() < 1e-3, "push must stay on the forward axis");
    }

    #[test]
    fn test_push_attempts_are_bounded() {
        // a separation so large no amount of pushing can satisfy it
        let params = LayoutParams {
            min_separation: 1.0e6,
            max_push_attempts: 4,
            ..LayoutParams::default()
        };

        let mut g = fan_graph(&["a"]);
        place(&mut g, "focus", &ids(&["a"]), &params);

        // gave up after the bounded retries and accepted the final position
        let pos = g.node("a").unwrap().pos.unwrap();
        let base = 200.0 + params.forward_gap;
        let expected_x = base + params.push_step * params.max_push_attempts as f32;
        assert!((pos.x - expected_x).abs() < 1e-2);
    }

    #[test]
    fn test_only_new_nodes_move() {
        let params = LayoutParams::default();
        let mut g = fan_graph(&["a", "b"]);
        let root_before = g.node("root").unwrap().pos;
        let focus_before = g.node("focus").unwrap().pos;

        place(&mut g, "focus", &ids(&["a", "b"]), &params);
        assert_eq!(g.node("root").unwrap().pos, root_before);
        assert_eq!(g.node("focus").unwrap().pos, focus_before);
    }

    #[test]
    fn test_missing_parent_falls_back_to_fixed_axis() {
        let params = LayoutParams::default();
        let mut g = KnowledgeGraph::new(Node::new("root", "中心", "root", 0));
        // an orphaned focus: node present, inbound edge missing
        g.merge(ExpansionBatch {
            nodes: vec![Node::new("stray", "迷子", "concept", 1)],
            edges: vec![],
        });
        g.set_position("stray", Vec2::new(0.0, 300.0));
        g.merge(ExpansionBatch {
            nodes: vec![Node::new("kid", "子", "concept", 2)],
            edges: vec![Edge::new("stray-kid", "stray", "kid", "関連")],
        });

        place(&mut g, "stray", &ids(&["kid"]), &params);
        let pos = g.node("kid").unwrap().pos.unwrap();
        // fallback direction is +X from the focus position
        assert!(pos.x > 0.0);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }
}

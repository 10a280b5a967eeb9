//! Incremental layout for newly merged nodes.
//!
//! The engine assigns 2-D coordinates to the nodes a merge just added and
//! touches nothing else. Strategy selection is structural:
//!
//! - focus is the root → [ring placement](ring): all nodes regrouped by
//!   depth onto concentric circles around the root,
//! - focus is any other node → [forward fan-out](fanout): children spread
//!   along the parent→focus direction with local collision avoidance.
//!
//! Both strategies sort by node id, never by insertion order, so identical
//! graph state and an identical new-id set always produce identical
//! coordinates.

mod fanout;
mod ring;

use glam::Vec2;
use serde::Deserialize;

use crate::models::KnowledgeGraph;

// Spacing constants the default layout was tuned with.
const DEFAULT_RING_GAP: f32 = 160.0;
const DEFAULT_SIDE_GAP: f32 = 110.0;
const DEFAULT_FORWARD_GAP: f32 = 170.0;
const DEFAULT_CROWD_FACTOR: f32 = 0.45;
const DEFAULT_MIN_SEPARATION: f32 = 80.0;
const DEFAULT_PUSH_STEP: f32 = 60.0;
const DEFAULT_MAX_PUSH_ATTEMPTS: u32 = 6;

/// Tunable geometry for both placement strategies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Radius increment per depth level for ring placement.
    pub ring_gap: f32,
    /// Lateral spacing between fan siblings.
    pub side_gap: f32,
    /// Base forward distance from the focus to its children.
    pub forward_gap: f32,
    /// Extra forward distance per unit of lateral offset, so the fan's
    /// center does not crowd.
    pub crowd_factor: f32,
    /// Minimum distance a candidate position keeps from existing nodes.
    pub min_separation: f32,
    /// Forward distance added per collision-avoidance retry.
    pub push_step: f32,
    /// Bound on collision-avoidance retries per child.
    pub max_push_attempts: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            ring_gap: DEFAULT_RING_GAP,
            side_gap: DEFAULT_SIDE_GAP,
            forward_gap: DEFAULT_FORWARD_GAP,
            crowd_factor: DEFAULT_CROWD_FACTOR,
            min_separation: DEFAULT_MIN_SEPARATION,
            push_step: DEFAULT_PUSH_STEP,
            max_push_attempts: DEFAULT_MAX_PUSH_ATTEMPTS,
        }
    }
}

/// Positions newly merged elements without disturbing placed ones.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    params: LayoutParams,
}

impl LayoutEngine {
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Places the batch just merged for `focus_id`.
    ///
    /// `new_ids` are the node ids the merge added. Returns the applied
    /// `(id, position)` assignments, in assignment order, for renderer
    /// consumption. Ring placement may reassign earlier ring members when
    /// a depth level gained nodes; fan-out only ever writes `new_ids`.
    pub fn place(
        &self,
        graph: &mut KnowledgeGraph,
        focus_id: &str,
        new_ids: &[String],
    ) -> Vec<(String, Vec2)> {
        if focus_id == graph.root_id() {
            ring::place(graph, &self.params)
        } else {
            fanout::place(graph, focus_id, new_ids, &self.params)
        }
    }
}

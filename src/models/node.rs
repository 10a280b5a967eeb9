//! Node model representing concepts in the knowledge map.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A node in the knowledge map.
///
/// Nodes represent the concepts, people, products and other knowledge
/// artifacts discovered by expanding a focus node. Identifiers are opaque
/// strings, unique across nodes *and* edges of one graph, and immutable
/// once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the graph.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Kind drawn from the active domain catalog's vocabulary.
    pub kind: String,
    /// Hop distance from the root. Children of a focus always sit at
    /// `focus.depth + 1`; the root sits at 0.
    pub depth: u32,
    /// On-screen position. `None` until the layout engine places the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec2>,
}

impl Node {
    /// Creates an unplaced node.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: impl Into<String>,
        depth: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: kind.into(),
            depth,
            pos: None,
        }
    }
}

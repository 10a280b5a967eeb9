//! Expansion batch types.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::{Edge, Node};

/// The nodes and edges produced by one sanitization pass.
///
/// A batch is ephemeral: it is folded into the graph immediately after
/// sanitization and never persisted on its own. Its contents satisfy the
/// sanitizer's output guarantees (every node targeted by at least one edge,
/// every edge sourced at the batch's focus).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpansionBatch {
    /// Nodes created by this expansion, at most [`crate::sanitize::MAX_CHILDREN`].
    pub nodes: Vec<Node>,
    /// Edges from the focus to the nodes above.
    pub edges: Vec<Edge>,
}

impl ExpansionBatch {
    /// True when the batch carries neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Key tagging the transient elements of one expansion attempt.
///
/// Placeholder nodes and edges inserted while the generator call is in
/// flight carry this key so they can be retracted in one step, on success
/// and failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchKey(String);

impl BatchKey {
    /// Generates a fresh key (ULID).
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// The key as a string slice, used to derive placeholder element ids.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BatchKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

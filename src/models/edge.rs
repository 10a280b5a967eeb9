//! Edge model connecting a focus node to its expansion children.

use serde::{Deserialize, Serialize};

/// A directed edge in the knowledge map.
///
/// Every edge is produced by exactly one expansion batch and always points
/// from that batch's focus node to a node created in the same batch:
/// expansions are star-shaped and one hop, with no sibling links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier, drawn from the same namespace as node ids.
    pub id: String,
    /// Source node id. Always the focus of the batch that produced it.
    pub source: String,
    /// Target node id. Always a node created in the same batch.
    pub target: String,
    /// Relation label shown on the edge.
    pub label: String,
}

impl Edge {
    /// Creates an edge from a focus node to one of its children.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

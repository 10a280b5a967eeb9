//! The generator boundary.
//!
//! The generative model that proposes expansions is an external
//! collaborator reached through the [`Generator`] trait. Its output is
//! untrusted by contract: whatever comes back is decoded here at the
//! transport level (the only place malformed JSON is an *error*) and then
//! handed to the sanitizer, which tolerates every content-level anomaly.
//! Prompting and transport mechanics live behind the trait.

mod replay;

pub use replay::ReplayGenerator;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::{KnowledgeGraph, Node};

/// Focus descriptor sent with an expansion request.
#[derive(Debug, Clone, Serialize)]
pub struct FocusDescriptor {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub depth: u32,
}

impl From<&Node> for FocusDescriptor {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            kind: node.kind.clone(),
            depth: node.depth,
        }
    }
}

/// One expansion request, as put on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionRequest {
    /// The node being expanded.
    pub focus_node: FocusDescriptor,
    /// Every element id the graph currently claims: node ids *and* edge
    /// ids, so the generator can be steered away from both namespaces.
    pub existing_element_ids: Vec<String>,
}

impl ExpansionRequest {
    /// Builds a request against the graph's full element-id set.
    ///
    /// Ids are sorted for a stable wire representation.
    pub fn for_focus(graph: &KnowledgeGraph, focus: &Node) -> Self {
        let mut ids: Vec<String> = graph.used_ids().into_iter().collect();
        ids.sort();
        Self {
            focus_node: focus.into(),
            existing_element_ids: ids,
        }
    }

    /// Builds a request from node ids only (the older request shape).
    ///
    /// With this shape, edge-id collision resolution downstream degrades
    /// to checking node ids only. That gap is accepted; the missing edge
    /// ids are not invented here.
    pub fn from_node_ids(focus: &Node, mut node_ids: Vec<String>) -> Self {
        node_ids.sort();
        Self {
            focus_node: focus.into(),
            existing_element_ids: node_ids,
        }
    }
}

/// An expansion proposal source.
///
/// Implementations return the raw response body for one request. The body
/// is treated as adversarial input from here on: decoding happens in
/// [`parse_expansion`], content repair in [`crate::sanitize::sanitize`].
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produces the raw, untrusted response for one expansion request.
    async fn expand(&self, request: &ExpansionRequest) -> Result<String, AppError>;
}

/// Transport-level decode of a generator response.
///
/// This is the one place a malformed response surfaces as an error; the
/// expansion attempt it belonged to fails terminally and the graph stays
/// unchanged. Shape anomalies *inside* valid JSON are not checked here.
pub fn parse_expansion(raw: &str) -> Result<Value, AppError> {
    Ok(serde_json::from_str(raw)?)
}

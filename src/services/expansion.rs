//! Expansion orchestration.
//!
//! One service method drives the whole flow for a single focus node:
//! no-op and busy checks, speculative placeholders while the generator
//! call is in flight, transport decoding, sanitization, merge, layout and
//! the terminal expanded flag. Mutation order is fixed (placeholder
//! insert, placeholder retraction, real-batch insert, position
//! assignment, expanded-flag set) and the renderer observes every step
//! in that order.

use std::sync::Arc;

use crate::catalog::DomainCatalog;
use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::generator::{parse_expansion, ExpansionRequest, Generator};
use crate::layout::LayoutEngine;
use crate::models::{BatchKey, Edge, ExpansionBatch, KnowledgeGraph, Node};
use crate::render::Renderer;
use crate::sanitize::{sanitize, SanitizeContext, MAX_CHILDREN};

/// What one expansion request amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandOutcome {
    /// A sanitized batch was merged and placed.
    Expanded {
        /// Ids of the merged nodes.
        nodes: Vec<String>,
        /// Ids of the merged edges.
        edges: Vec<String>,
    },
    /// The focus had already been expanded; nothing happened.
    AlreadyExpanded,
    /// Another expansion is in flight; the request was ignored.
    Busy,
}

/// Service driving one-hop expansions of a caller-owned graph.
#[derive(FromContext, Clone)]
pub struct ExpansionService {
    catalog: Arc<DomainCatalog>,
    generator: Arc<dyn Generator>,
    layout: LayoutEngine,
}

impl ExpansionService {
    /// Expands `focus_id` by one hop.
    ///
    /// Re-expanding an expanded node and expanding while another request
    /// is in flight are silent no-ops, reported through the outcome. A
    /// generator transport or decode failure is terminal for this one
    /// attempt: the graph is left unchanged (placeholders retracted, busy
    /// flag cleared) and the same focus can be retried.
    pub async fn expand(
        &self,
        graph: &mut KnowledgeGraph,
        focus_id: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<ExpandOutcome, AppError> {
        if graph.is_expanded(focus_id) {
            tracing::debug!(focus = %focus_id, "already expanded, ignoring");
            return Ok(ExpandOutcome::AlreadyExpanded);
        }
        if graph.in_flight() {
            tracing::debug!(focus = %focus_id, "expansion in flight, ignoring");
            return Ok(ExpandOutcome::Busy);
        }
        let focus = graph
            .node(focus_id)
            .cloned()
            .ok_or_else(|| AppError::FocusNotFound(focus_id.to_string()))?;

        let request = ExpansionRequest::for_focus(graph, &focus);

        graph.set_in_flight(true);
        let key = BatchKey::new();
        self.insert_placeholders(graph, &focus, &key, renderer);

        // The single suspension point of the whole operation.
        let response = self.generator.expand(&request).await;

        // Guaranteed cleanup: the speculative batch and the busy flag go
        // away on success and failure alike.
        for id in graph.retract(&key) {
            renderer.remove_element(&id);
        }
        graph.set_in_flight(false);

        let payload = parse_expansion(&response?)?;

        let used_ids = graph.used_ids();
        let ctx = SanitizeContext {
            focus_id: &focus.id,
            focus_depth: focus.depth,
            used_ids: &used_ids,
            catalog: &self.catalog,
        };
        let batch = sanitize(&ctx, &payload);
        tracing::info!(
            focus = %focus.id,
            nodes = batch.nodes.len(),
            edges = batch.edges.len(),
            "merging sanitized batch"
        );

        let node_ids: Vec<String> = batch.nodes.iter().map(|n| n.id.clone()).collect();
        let edge_ids: Vec<String> = batch.edges.iter().map(|e| e.id.clone()).collect();
        for node in &batch.nodes {
            renderer.insert_node(node);
        }
        for edge in &batch.edges {
            renderer.insert_edge(edge);
        }
        graph.merge(batch);

        for (id, pos) in self.layout.place(graph, &focus.id, &node_ids) {
            renderer.set_position(&id, pos);
        }

        // Terminal and idempotent, also for an empty batch.
        graph.mark_expanded(&focus.id);

        Ok(ExpandOutcome::Expanded {
            nodes: node_ids,
            edges: edge_ids,
        })
    }

    /// Inserts the speculative batch shown while the generator call is in
    /// flight: a full fan of placeholder children, tagged with `key`.
    fn insert_placeholders(
        &self,
        graph: &mut KnowledgeGraph,
        focus: &Node,
        key: &BatchKey,
        renderer: &mut dyn Renderer,
    ) {
        let mut nodes = Vec::with_capacity(MAX_CHILDREN);
        let mut edges = Vec::with_capacity(MAX_CHILDREN);
        for i in 0..MAX_CHILDREN {
            let node_id = format!("pending-{key}-{i}");
            let edge_id = format!("pending-{key}-{i}-edge");
            nodes.push(Node::new(
                node_id.clone(),
                "…",
                self.catalog.fallback_kind().id.clone(),
                focus.depth + 1,
            ));
            edges.push(Edge::new(edge_id, focus.id.clone(), node_id, "…"));
        }

        let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
        for node in &nodes {
            renderer.insert_node(node);
        }
        for edge in &edges {
            renderer.insert_edge(edge);
        }
        graph.insert_pending(key, ExpansionBatch { nodes, edges });

        for (id, pos) in self.layout.place(graph, &focus.id, &ids) {
            renderer.set_position(&id, pos);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::generator::ReplayGenerator;
    use glam::Vec2;
    use serde_json::json;

    /// Renderer recording the mutation order it observes.
    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn insert_node(&mut self, node: &Node) {
            self.events.push(format!("+node:{}", node.id));
        }
        fn insert_edge(&mut self, edge: &Edge) {
            self.events.push(format!("+edge:{}", edge.id));
        }
        fn set_position(&mut self, id: &str, _pos: Vec2) {
            self.events.push(format!("pos:{id}"));
        }
        fn remove_element(&mut self, id: &str) {
            self.events.push(format!("-{id}"));
        }
    }

    fn service(generator: Arc<dyn Generator>) -> ExpansionService {
        ExpansionService {
            catalog: Arc::new(catalog::builtin("technology").unwrap()),
            generator,
            layout: LayoutEngine::default(),
        }
    }

    fn fresh_graph() -> KnowledgeGraph {
        KnowledgeGraph::new(catalog::builtin("technology").unwrap().root_node())
    }

    #[tokio::test]
    async fn test_expand_merges_places_and_marks_expanded() {
        let response = json!({
            "nodes": [
                {"id": "ai", "label": "人工知能", "kind": "field"},
                {"id": "robotics", "label": "ロボット工学", "kind": "field"},
            ],
        });
        let svc = service(Arc::new(ReplayGenerator::new(vec![response.to_string()])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        let outcome = svc.expand(&mut graph, "root", &mut renderer).await.unwrap();
        let ExpandOutcome::Expanded { nodes, edges } = outcome else {
            panic!("expected an expanded outcome");
        };
        assert_eq!(nodes, vec!["ai", "robotics"]);
        assert_eq!(edges.len(), 2);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_expanded("root"));
        assert!(!graph.in_flight());
        for id in ["ai", "robotics"] {
            let node = graph.node(id).unwrap();
            assert_eq!(node.depth, 1);
            assert!(node.pos.is_some(), "{id} was not placed");
        }
        // no speculative elements survive
        assert!(graph.iter_nodes().all(|n| !n.id.starts_with("pending-")));
    }

    #[tokio::test]
    async fn test_placeholders_retracted_before_real_batch() {
        let response = json!({"nodes": [{"id": "ai", "label": "人工知能", "kind": "field"}]});
        let svc = service(Arc::new(ReplayGenerator::new(vec![response.to_string()])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        svc.expand(&mut graph, "root", &mut renderer).await.unwrap();

        let last_removal = renderer
            .events
            .iter()
            .rposition(|e| e.starts_with("-pending-"))
            .expect("placeholders were never retracted");
        let real_insert = renderer
            .events
            .iter()
            .position(|e| e == "+node:ai")
            .expect("real node never inserted");
        assert!(
            last_removal < real_insert,
            "real batch inserted before placeholder retraction: {:?}",
            renderer.events
        );
    }

    #[tokio::test]
    async fn test_reexpansion_is_noop() {
        let response = json!({"nodes": [{"id": "ai", "label": "人工知能", "kind": "field"}]});
        let svc = service(Arc::new(ReplayGenerator::new(vec![response.to_string()])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        svc.expand(&mut graph, "root", &mut renderer).await.unwrap();
        let count = graph.node_count();

        // no response is queued anymore; the no-op must return before the
        // generator is ever consulted
        let outcome = svc.expand(&mut graph, "root", &mut renderer).await.unwrap();
        assert_eq!(outcome, ExpandOutcome::AlreadyExpanded);
        assert_eq!(graph.node_count(), count);
    }

    #[tokio::test]
    async fn test_busy_graph_ignores_request() {
        let svc = service(Arc::new(ReplayGenerator::new(vec![])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        graph.set_in_flight(true);
        let outcome = svc.expand(&mut graph, "root", &mut renderer).await.unwrap();
        assert_eq!(outcome, ExpandOutcome::Busy);
        assert_eq!(graph.node_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_terminal_and_retryable() {
        let replay = Arc::new(ReplayGenerator::new(vec![]));
        let svc = service(replay.clone());
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        // exhausted queue acts as an unreachable generator
        let err = svc.expand(&mut graph, "root", &mut renderer).await;
        assert!(matches!(err, Err(AppError::Generator(_))));
        assert_eq!(graph.node_count(), 1);
        assert!(!graph.in_flight());
        assert!(!graph.is_expanded("root"));

        // the same focus can be retried once the generator recovers
        replay.push(json!({"nodes": [{"id": "ai", "label": "人工知能", "kind": "field"}]}).to_string());
        let outcome = svc.expand(&mut graph, "root", &mut renderer).await.unwrap();
        assert!(matches!(outcome, ExpandOutcome::Expanded { .. }));
        assert!(graph.is_expanded("root"));
    }

    #[tokio::test]
    async fn test_undecodable_response_leaves_graph_unchanged() {
        let svc = service(Arc::new(ReplayGenerator::new(vec![
            "this is not json".to_string(),
        ])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        let err = svc.expand(&mut graph, "root", &mut renderer).await;
        assert!(matches!(err, Err(AppError::Parse(_))));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.in_flight());
        assert!(graph.iter_nodes().all(|n| !n.id.starts_with("pending-")));
    }

    #[tokio::test]
    async fn test_unknown_focus_is_an_error() {
        let svc = service(Arc::new(ReplayGenerator::new(vec![])));
        let mut graph = fresh_graph();
        let mut renderer = RecordingRenderer::default();

        let err = svc.expand(&mut graph, "nope", &mut renderer).await;
        assert!(matches!(err, Err(AppError::FocusNotFound(_))));
    }
}

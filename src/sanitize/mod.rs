//! Expansion payload sanitization.
//!
//! The generator is an untrusted collaborator: its payloads may be
//! malformed, may claim wrong depths, may reference nodes that do not
//! exist, may reuse identifiers the graph already owns. [`sanitize`] is a
//! total function over that input: it never fails, it repairs. Every
//! anomaly is handled locally by dropping, coercing or synthesizing, and
//! the output always satisfies the batch invariants:
//!
//! - every node sits at `focus_depth + 1`,
//! - every edge runs from the focus to a node of the same batch,
//! - no output id collides with the existing graph or with the batch,
//! - every node is the target of at least one edge,
//! - at most [`MAX_CHILDREN`] nodes survive.
//!
//! Malformed JSON is not this module's concern: the transport layer
//! rejects undecodable responses before `sanitize` is ever called.

mod script;

pub use script::{contains_japanese, is_all_ascii, label_passes};

use std::collections::HashSet;

use serde_json::Value;

use crate::catalog::DomainCatalog;
use crate::models::{Edge, ExpansionBatch, Node};

/// Maximum number of child nodes one expansion may contribute.
pub const MAX_CHILDREN: usize = 3;

/// Everything the sanitizer needs to know about the graph it repairs for.
#[derive(Debug)]
pub struct SanitizeContext<'a> {
    /// Id of the node being expanded.
    pub focus_id: &'a str,
    /// Depth of the node being expanded; children land at `focus_depth + 1`.
    pub focus_depth: u32,
    /// Every element id (nodes *and* edges) the graph already claims.
    pub used_ids: &'a HashSet<String>,
    /// The active domain's vocabulary, exemptions and relation labels.
    pub catalog: &'a DomainCatalog,
}

/// Validates and repairs one raw expansion payload.
///
/// Stages run in a fixed order; each stage consumes the previous stage's
/// output. See the module docs for the guaranteed output invariants.
pub fn sanitize(ctx: &SanitizeContext<'_>, payload: &Value) -> ExpansionBatch {
    let mut pool = IdPool::new(ctx.used_ids);

    let nodes = extract_nodes(ctx, payload, &mut pool);
    let nodes = cap_children(nodes);
    let nodes = filter_labels(ctx, nodes);
    let mut edges = extract_edges(ctx, payload, &nodes, &mut pool);
    complete_connectivity(ctx, &nodes, &mut edges, &mut pool);

    // Should be unreachable after connectivity completion; kept as a guard
    // against logic drift.
    if !nodes.is_empty() && edges.is_empty() {
        let first = &nodes[0];
        edges.push(synthesize_edge(ctx, first, &mut pool));
    }

    ExpansionBatch { nodes, edges }
}

// ============================================================================
// Id resolution
// ============================================================================

/// The shared node+edge identifier namespace for one sanitization pass.
///
/// Seeded with the graph's existing element ids; every resolved id is
/// claimed immediately, so two colliding candidates in the same payload
/// deterministically receive different suffixes in payload order.
struct IdPool {
    used: HashSet<String>,
}

impl IdPool {
    fn new(used: &HashSet<String>) -> Self {
        Self { used: used.clone() }
    }

    /// Resolves `candidate` to an unclaimed id, appending `__1`, `__2`, …
    /// until unique, and claims the result.
    fn claim(&mut self, candidate: &str) -> String {
        if self.used.insert(candidate.to_string()) {
            return candidate.to_string();
        }
        let mut n = 1u32;
        loop {
            let resolved = format!("{candidate}__{n}");
            if self.used.insert(resolved.clone()) {
                return resolved;
            }
            n += 1;
        }
    }
}

// ============================================================================
// Pipeline stages
// ============================================================================

/// Stages 1–2: extraction, normalization, collision resolution.
///
/// Keeps candidates with a non-empty string id, trims id and label,
/// defaults the label to the id, coerces unknown kinds to the catalog's
/// fallback and forces `depth = focus_depth + 1`. Depth is never trusted
/// from the generator.
fn extract_nodes(ctx: &SanitizeContext<'_>, payload: &Value, pool: &mut IdPool) -> Vec<Node> {
    let Some(candidates) = payload.get("nodes").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut nodes = Vec::new();
    for candidate in candidates {
        let Some(raw_id) = candidate.get("id").and_then(Value::as_str) else {
            continue;
        };
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            continue;
        }

        let label = candidate
            .get("label")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(raw_id);

        let kind = candidate
            .get("kind")
            .and_then(Value::as_str)
            .filter(|k| ctx.catalog.contains(k))
            .unwrap_or(&ctx.catalog.fallback_kind().id);

        let id = pool.claim(raw_id);
        nodes.push(Node::new(id, label, kind, ctx.focus_depth + 1));
    }
    nodes
}

/// Stage 3: cardinality cap, keeping the first [`MAX_CHILDREN`] in payload order.
fn cap_children(mut nodes: Vec<Node>) -> Vec<Node> {
    nodes.truncate(MAX_CHILDREN);
    nodes
}

/// Stage 4: language-policy filter.
///
/// Proper-noun kinds are exempt; for the rest a purely-ASCII label is
/// treated as an untranslated generic term and dropped.
fn filter_labels(ctx: &SanitizeContext<'_>, nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|n| label_passes(&n.label, ctx.catalog.is_proper_noun(&n.kind)))
        .collect()
}

/// Stage 5: edge extraction and enforcement.
///
/// Drops edges without source/target, edges not sourced at the focus and
/// edges whose target is not a surviving node of this batch. Edge ids
/// resolve against the same pool as node ids. Purely-ASCII labels are
/// replaced by the kind-derived default relation label.
fn extract_edges(
    ctx: &SanitizeContext<'_>,
    payload: &Value,
    nodes: &[Node],
    pool: &mut IdPool,
) -> Vec<Edge> {
    let Some(candidates) = payload.get("edges").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut edges = Vec::new();
    for candidate in candidates {
        let Some(source) = candidate.get("source").and_then(Value::as_str) else {
            continue;
        };
        let Some(target) = candidate.get("target").and_then(Value::as_str) else {
            continue;
        };
        if source != ctx.focus_id {
            continue;
        }
        let Some(target_node) = nodes.iter().find(|n| n.id == target) else {
            continue;
        };

        let label = candidate
            .get("label")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|l| !l.is_empty() && !is_all_ascii(l))
            .unwrap_or_else(|| ctx.catalog.relation_label(&target_node.kind));

        let raw_id = candidate
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|i| !i.is_empty());
        let id = match raw_id {
            Some(raw) => pool.claim(raw),
            None => pool.claim(&edge_id_base(ctx.focus_id, target)),
        };

        edges.push(Edge::new(id, source, target, label));
    }
    edges
}

/// Stage 6: connectivity completion.
///
/// The generator's edge output is advisory: any surviving node left
/// without an inbound edge gets a synthesized `focus → node` edge, so no
/// node ever enters the graph disconnected.
fn complete_connectivity(
    ctx: &SanitizeContext<'_>,
    nodes: &[Node],
    edges: &mut Vec<Edge>,
    pool: &mut IdPool,
) {
    for node in nodes {
        if edges.iter().any(|e| e.target == node.id) {
            continue;
        }
        edges.push(synthesize_edge(ctx, node, pool));
    }
}

fn synthesize_edge(ctx: &SanitizeContext<'_>, target: &Node, pool: &mut IdPool) -> Edge {
    Edge::new(
        pool.claim(&edge_id_base(ctx.focus_id, &target.id)),
        ctx.focus_id,
        target.id.clone(),
        ctx.catalog.relation_label(&target.kind),
    )
}

fn edge_id_base(focus_id: &str, target_id: &str) -> String {
    format!("{focus_id}-{target_id}")
}

// ============================================================================
// Tests
// ============================================================================

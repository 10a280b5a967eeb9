//! The mutable knowledge graph aggregate.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{BatchKey, Edge, ExpansionBatch, Node};

/// The single mutable graph a session explores.
///
/// Created with exactly one root node at depth 0 and grows monotonically:
/// nodes and edges are never removed, with one exception: transient
/// placeholder elements tagged with a [`BatchKey`] are fully retracted
/// before (or in place of) the real batch they stood in for.
///
/// Identifier uniqueness is enforced across one shared namespace: node ids
/// and edge ids never collide with each other. [`KnowledgeGraph::used_ids`]
/// exposes that namespace for the sanitizer's collision resolution.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    root_id: String,
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
    expanded: HashSet<String>,
    in_flight: bool,
    pending: HashMap<BatchKey, Vec<String>>,
}

/// A serializable point-in-time view of the graph, sorted by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl KnowledgeGraph {
    /// Creates a graph holding only the given root node.
    ///
    /// The root's depth is forced to 0 and it is centered at the origin.
    pub fn new(mut root: Node) -> Self {
        root.depth = 0;
        root.pos = Some(Vec2::ZERO);
        let root_id = root.id.clone();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), root);
        Self {
            root_id,
            nodes,
            edges: HashMap::new(),
            expanded: HashSet::new(),
            in_flight: false,
            pending: HashMap::new(),
        }
    }

    /// The root node's id.
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Iterates over all nodes, in no particular order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over all edges, in no particular order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes currently in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges currently in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every node id and edge id currently claimed, as one set.
    ///
    /// This is the full element-id namespace the sanitizer resolves new
    /// candidates against. Edges are included, so a generated node can never
    /// shadow an existing edge id or vice versa.
    pub fn used_ids(&self) -> HashSet<String> {
        self.nodes
            .keys()
            .chain(self.edges.keys())
            .cloned()
            .collect()
    }

    /// The parent of `id`: the source node of its unique inbound edge.
    ///
    /// Every non-root node was created as a one-hop child, so in a
    /// well-formed graph there is exactly one inbound edge. Returns `None`
    /// for the root (and for nodes whose inbound edge is missing).
    pub fn parent_of(&self, id: &str) -> Option<&Node> {
        let inbound = self.edges.values().find(|e| e.target == id)?;
        self.nodes.get(&inbound.source)
    }

    /// Assigns a position to a node. Returns false if the node is unknown.
    pub fn set_position(&mut self, id: &str, pos: Vec2) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.pos = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Whether an expansion has already been merged for this node.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Marks a node as expanded. Idempotent.
    pub fn mark_expanded(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    /// Whether an expansion is currently awaiting its generator call.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Flips the in-flight flag.
    pub fn set_in_flight(&mut self, value: bool) {
        self.in_flight = value;
    }

    /// Folds a sanitized batch into the graph.
    ///
    /// The batch's ids were resolved against [`used_ids`](Self::used_ids),
    /// so insertion never displaces an existing element.
    pub fn merge(&mut self, batch: ExpansionBatch) {
        for node in batch.nodes {
            self.nodes.insert(node.id.clone(), node);
        }
        for edge in batch.edges {
            self.edges.insert(edge.id.clone(), edge);
        }
    }

    /// Inserts a speculative batch tagged with `key`.
    ///
    /// The element ids are recorded so [`retract`](Self::retract) can
    /// remove exactly these elements later, regardless of what else
    /// happens to the graph in between.
    pub fn insert_pending(&mut self, key: &BatchKey, batch: ExpansionBatch) {
        let mut ids = Vec::with_capacity(batch.nodes.len() + batch.edges.len());
        for node in batch.nodes {
            ids.push(node.id.clone());
            self.nodes.insert(node.id.clone(), node);
        }
        for edge in batch.edges {
            ids.push(edge.id.clone());
            self.edges.insert(edge.id.clone(), edge);
        }
        self.pending.insert(key.clone(), ids);
    }

    /// Removes every element inserted under `key`. Idempotent.
    ///
    /// Returns the ids that were actually removed, for renderer retraction.
    pub fn retract(&mut self, key: &BatchKey) -> Vec<String> {
        let Some(ids) = self.pending.remove(key) else {
            return Vec::new();
        };
        for id in &ids {
            self.nodes.remove(id);
            self.edges.remove(id);
        }
        ids
    }

    /// A serializable view of the graph with nodes and edges sorted by id.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<Node> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        let mut edges: Vec<Edge> = self.edges.values().cloned().collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        GraphSnapshot { nodes, edges }
    }
}

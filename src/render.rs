//! Renderer seam.
//!
//! Actual drawing, animation and styling live outside the core. The
//! pipeline notifies a [`Renderer`] of every graph mutation (element
//! insertions, position assignments, retractions) in the exact order the
//! graph itself is mutated, so a drawing surface can mirror the graph
//! without ever inspecting it.

use glam::Vec2;

use crate::models::{Edge, Node};

/// A graph-drawing surface.
pub trait Renderer {
    /// A node was merged into the graph.
    fn insert_node(&mut self, node: &Node);
    /// An edge was merged into the graph.
    fn insert_edge(&mut self, edge: &Edge);
    /// A node received a position.
    fn set_position(&mut self, id: &str, pos: Vec2);
    /// An element (node or edge) was retracted.
    fn remove_element(&mut self, id: &str);
}

/// Renderer that emits structured log events instead of pixels.
///
/// The default sink for headless runs; also handy for tracing a live
/// session's mutation order.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl Renderer for TracingRenderer {
    fn insert_node(&mut self, node: &Node) {
        tracing::debug!(id = %node.id, kind = %node.kind, depth = node.depth, "insert node");
    }

    fn insert_edge(&mut self, edge: &Edge) {
        tracing::debug!(id = %edge.id, source = %edge.source, target = %edge.target, "insert edge");
    }

    fn set_position(&mut self, id: &str, pos: Vec2) {
        tracing::debug!(id = %id, x = pos.x, y = pos.y, "set position");
    }

    fn remove_element(&mut self, id: &str) {
        tracing::debug!(id = %id, "remove element");
    }
}

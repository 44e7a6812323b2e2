//! Node identifier for directed graphs.
//!
//! [`NodeId`] is a newtype over `usize` that keeps node indices from being
//! confused with edge indices or other integers. In a control flow graph a
//! `NodeId` names one basic block.

use std::fmt;

/// A strongly-typed identifier for a node within a directed graph.
///
/// Node IDs are assigned sequentially from 0 as nodes are added and are
/// stable for the lifetime of the graph. Obtain them from
/// [`DirectedGraph::add_node`](crate::graph::DirectedGraph::add_node) or
/// [`ControlFlowGraph::add_block`](crate::cfg::ControlFlowGraph::add_block);
/// the raw constructor exists for tests and for indexing per-node tables.
///
/// `NodeId` is [`Copy`], [`Send`], and [`Sync`], and can be used as a key
/// in hash maps and sets.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a `NodeId` from a raw index value.
    ///
    /// Primarily intended for tests; normal usage obtains node IDs from
    /// graph construction.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw 0-based index of this node.
    ///
    /// Suitable for indexing into vectors that store per-node data.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}

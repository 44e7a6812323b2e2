//! Trait definitions for graph abstractions.
//!
//! The dominance analyses in [`algorithms`](crate::graph::algorithms) are
//! written against these traits rather than a concrete graph type, so any
//! structure that can enumerate its nodes and adjacencies in a stable
//! order can be analyzed - the bundled
//! [`DirectedGraph`](crate::graph::DirectedGraph) and
//! [`ControlFlowGraph`](crate::cfg::ControlFlowGraph), or a caller's own
//! block layout.
//!
//! The hierarchy is minimal and composable:
//!
//! - [`GraphBase`] - node count and node iteration
//! - [`Successors`] - forward edge traversal
//! - [`Predecessors`] - backward edge traversal
//! - [`RootedGraph`] - a designated entry node (required by the dominator
//!   computation)
//!
//! Adjacency queries return iterators, not collections, and must yield
//! neighbors in a stable order: the dominator tree is deterministic
//! *given* the successor iteration order, so that order is part of the
//! contract.

use crate::graph::NodeId;

/// Base trait providing core graph properties.
///
/// Every graph must know how many nodes it has and be able to enumerate
/// their identifiers. Iteration order is the order nodes were added
/// (ascending [`NodeId`]).
pub trait GraphBase {
    /// Returns the number of nodes in the graph, connected or not.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers in the graph.
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that support forward edge traversal.
///
/// For a directed edge `(u, v)`, node `v` is a successor of `u`. In a
/// control flow graph the successors of a block are its possible
/// fall-through and branch targets.
pub trait Successors: GraphBase {
    /// Returns an iterator over the successors of the given node, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that support backward edge traversal.
///
/// For a directed edge `(u, v)`, node `u` is a predecessor of `v`. The
/// semidominator computation walks predecessor lists, so rooted analyses
/// require this alongside [`Successors`].
pub trait Predecessors: GraphBase {
    /// Returns an iterator over the predecessors of the given node, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs with a designated entry (root) node.
///
/// Dominance is only defined relative to an entry: a node `d` dominates
/// `n` when every path from the entry to `n` passes through `d`. In a
/// control flow graph the entry is the function's first basic block.
pub trait RootedGraph: Successors + Predecessors {
    /// Returns the entry node of the graph.
    fn entry(&self) -> NodeId;
}

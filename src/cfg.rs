//! Key-addressable control flow graph.
//!
//! The lifter identifies basic blocks by an opaque key - typically the
//! block's start address - while the graph algorithms work in terms of
//! dense [`NodeId`] indices. [`ControlFlowGraph`] bridges the two: it owns
//! a [`DirectedGraph`] whose node payloads are the block keys, maintains
//! the key-to-node index, and carries the designated entry block the
//! rooted analyses require.
//!
//! # Examples
//!
//! ```rust
//! use liftir::cfg::ControlFlowGraph;
//!
//! let mut cfg: ControlFlowGraph<u64> = ControlFlowGraph::new();
//! cfg.add_block(0x1000);
//! cfg.add_block(0x1010);
//! cfg.add_edge(0x1000, 0x1010)?;
//! cfg.set_entry(0x1000)?;
//!
//! let doms = cfg.dominator_tree()?;
//! let entry = cfg.block(0x1000).unwrap();
//! let succ = cfg.block(0x1010).unwrap();
//! assert!(doms.strictly_dominates(entry, succ));
//! # Ok::<(), liftir::Error>(())
//! ```

use std::{fmt, hash::Hash};

use rustc_hash::FxHashMap;

use crate::{
    graph::{
        algorithms::{compute_dominators, DfsTree, DominatorTree},
        DirectedGraph, EdgeId, GraphBase, NodeId, Predecessors, Successors,
    },
    Error, Result,
};

/// A rooted control flow graph whose blocks are addressable by key.
///
/// `K` is the block key type, typically a `u64` start address. Keys are
/// unique; blocks and edges are kept in insertion order, and successor and
/// predecessor lists preserve the order edges were added - the dominance
/// analyses are deterministic given that order.
///
/// The graph is built incrementally by the lifter (blocks first, then
/// edges, then the entry), after which the analyses treat it as
/// read-only.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph<K> {
    /// Underlying graph; each node's payload is its block key
    graph: DirectedGraph<K, ()>,
    /// Index from block key to node
    blocks: FxHashMap<K, NodeId>,
    /// The designated entry block, once set
    entry: Option<NodeId>,
}

impl<K> Default for ControlFlowGraph<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ControlFlowGraph<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Creates a new empty control flow graph with no entry.
    #[must_use]
    pub fn new() -> Self {
        ControlFlowGraph {
            graph: DirectedGraph::new(),
            blocks: FxHashMap::default(),
            entry: None,
        }
    }

    /// Creates a new control flow graph with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(block_capacity: usize, edge_capacity: usize) -> Self {
        ControlFlowGraph {
            graph: DirectedGraph::with_capacity(block_capacity, edge_capacity),
            blocks: FxHashMap::with_capacity_and_hasher(block_capacity, Default::default()),
            entry: None,
        }
    }

    /// Builds a graph from a block list, an edge list, and the entry key.
    ///
    /// Blocks are added in iteration order, edges in slice order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if an edge references a key not in
    /// the block list, or if `entry` is not in the block list.
    pub fn from_edges(
        blocks: impl IntoIterator<Item = K>,
        edges: &[(K, K)],
        entry: K,
    ) -> Result<Self> {
        let mut cfg = Self::new();
        for key in blocks {
            cfg.add_block(key);
        }
        for &(from, to) in edges {
            cfg.add_edge(from, to)?;
        }
        cfg.set_entry(entry)?;
        Ok(cfg)
    }

    /// Adds a basic block with the given key.
    ///
    /// Duplicate keys are idempotent: the existing node is returned
    /// unchanged. (A block's payload is its key, so re-adding a key has
    /// nothing to overwrite.)
    ///
    /// # Returns
    ///
    /// The [`NodeId`] for this block, newly assigned or existing.
    pub fn add_block(&mut self, key: K) -> NodeId {
        if let Some(&node) = self.blocks.get(&key) {
            return node;
        }
        let node = self.graph.add_node(key);
        self.blocks.insert(key, node);
        node
    }

    /// Adds a control-transfer edge between two blocks.
    ///
    /// Parallel edges are allowed (a conditional branch whose arms share
    /// a target produces one edge per arm).
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either key has no block. An edge
    /// to a block that was never added is a lifter bug; the graph is left
    /// unchanged.
    pub fn add_edge(&mut self, from: K, to: K) -> Result<EdgeId> {
        let source = self.blocks.get(&from).copied().ok_or_else(|| {
            Error::GraphError(format!("edge source references unknown block {from:?}"))
        })?;
        let target = self.blocks.get(&to).copied().ok_or_else(|| {
            Error::GraphError(format!("edge target references unknown block {to:?}"))
        })?;
        self.graph.add_edge(source, target, ())
    }

    /// Designates the entry block of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if the key has no block.
    pub fn set_entry(&mut self, key: K) -> Result<()> {
        match self.blocks.get(&key) {
            Some(&node) => {
                self.entry = Some(node);
                Ok(())
            }
            None => Err(Error::GraphError(format!(
                "entry references unknown block {key:?}"
            ))),
        }
    }

    /// Returns the entry block, if one has been designated.
    #[must_use]
    pub fn entry(&self) -> Option<NodeId> {
        self.entry
    }

    /// Returns the key of the entry block, if one has been designated.
    #[must_use]
    pub fn entry_key(&self) -> Option<&K> {
        self.entry.and_then(|node| self.graph.node(node))
    }

    /// Returns the node for a block key, or `None` if the key is unknown.
    #[must_use]
    pub fn block(&self, key: K) -> Option<NodeId> {
        self.blocks.get(&key).copied()
    }

    /// Returns the key of a node, or `None` if the node does not exist.
    #[must_use]
    pub fn key(&self, node: NodeId) -> Option<&K> {
        self.graph.node(node)
    }

    /// Returns an iterator over `(NodeId, &K)` pairs in insertion order.
    pub fn blocks(&self) -> impl Iterator<Item = (NodeId, &K)> + '_ {
        self.graph.nodes()
    }

    /// Returns the number of blocks in the graph.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph contains no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Returns an iterator over the successors of a block, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.successors(node)
    }

    /// Returns an iterator over the predecessors of a block, in
    /// edge-insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.predecessors(node)
    }

    /// Returns a reference to the underlying [`DirectedGraph`].
    #[must_use]
    pub fn inner(&self) -> &DirectedGraph<K, ()> {
        &self.graph
    }

    /// Builds the depth-first spanning tree from the entry.
    ///
    /// Blocks unreachable from the entry are omitted from the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntry`] if no entry has been designated.
    pub fn dfs_tree(&self) -> Result<DfsTree> {
        let entry = self.entry.ok_or(Error::MissingEntry)?;
        Ok(DfsTree::build(&self.graph, entry))
    }

    /// Computes the dominator tree of the graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEntry`] if no entry has been designated.
    pub fn dominator_tree(&self) -> Result<DominatorTree> {
        let entry = self.entry.ok_or(Error::MissingEntry)?;
        Ok(compute_dominators(&self.graph, entry))
    }
}

impl<K> GraphBase for ControlFlowGraph<K> {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.graph.node_ids()
    }
}

impl<K> Successors for ControlFlowGraph<K> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        Successors::successors(&self.graph, node)
    }
}

impl<K> Predecessors for ControlFlowGraph<K> {
    fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        Predecessors::predecessors(&self.graph, node)
    }
}

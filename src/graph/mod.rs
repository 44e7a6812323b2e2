//! Generic directed graph infrastructure for control-flow analysis.
//!
//! This module provides the reusable graph layer the IR analyses are built
//! on: strongly-typed identifiers, an adjacency-list graph, and the
//! abstraction traits the algorithms are written against.
//!
//! # Architecture
//!
//! - **Core Types**: [`NodeId`], [`EdgeId`], and [`DirectedGraph`]
//! - **Traits**: [`GraphBase`], [`Successors`], [`Predecessors`], and
//!   [`RootedGraph`] let the algorithms run over any graph representation
//! - **Algorithms**: [`algorithms`] holds traversal and dominance analyses
//!
//! The key-addressable control flow graph built on top of this layer lives
//! in [`crate::cfg`].
//!
//! # Design Principles
//!
//! - **Strongly-typed identifiers** - node and edge indices are newtypes,
//!   so they cannot be mixed with each other or with plain integers.
//! - **Stable adjacency order** - successor and predecessor lists preserve
//!   edge insertion order, and the analyses are deterministic given that
//!   order.
//! - **Immutable after construction** - graphs are built incrementally,
//!   then treated as read-only by every analysis.
//!
//! # Examples
//!
//! ```rust
//! use liftir::graph::{algorithms, DirectedGraph};
//!
//! // Diamond: entry -> a, entry -> b, a -> exit, b -> exit
//! let mut graph: DirectedGraph<&str, ()> = DirectedGraph::new();
//! let entry = graph.add_node("entry");
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let exit = graph.add_node("exit");
//! graph.add_edge(entry, a, ())?;
//! graph.add_edge(entry, b, ())?;
//! graph.add_edge(a, exit, ())?;
//! graph.add_edge(b, exit, ())?;
//!
//! let doms = algorithms::compute_dominators(&graph, entry);
//! assert!(doms.dominates(entry, exit));
//! assert_eq!(doms.immediate_dominator(exit), Some(entry));
//! # Ok::<(), liftir::Error>(())
//! ```

mod directed;
mod edge;
mod node;
mod traits;

pub mod algorithms;

pub use directed::DirectedGraph;
pub use edge::EdgeId;
pub use node::NodeId;
pub use traits::{GraphBase, Predecessors, RootedGraph, Successors};

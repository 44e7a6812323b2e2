//! # liftir Prelude
//!
//! Convenient re-exports of the types most callers need: the expression
//! model and simplifier entry points, the control flow graph, and the
//! dominance analyses.
//!
//! ```rust
//! use liftir::prelude::*;
//!
//! let mut e = Expr::binary(BinaryOp::Add, Expr::reg(0, 32), Expr::value(0, 32));
//! reduce_expr(&mut e);
//! assert_eq!(e, Expr::reg(0, 32));
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all liftir operations
pub use crate::Error;

/// The result type used throughout liftir
pub use crate::Result;

// ================================================================================================
// Expression Model and Simplifier
// ================================================================================================

/// Expression trees, operators, and statements
pub use crate::ir::{BinaryOp, Expr, Stmt, UnaryOp};

/// Fixed-point simplification entry points
pub use crate::ir::{reduce_expr, reduce_stmt};

// ================================================================================================
// Graphs and Dominance Analyses
// ================================================================================================

/// Key-addressable rooted control flow graph
pub use crate::cfg::ControlFlowGraph;

/// Generic graph infrastructure
pub use crate::graph::{DirectedGraph, EdgeId, NodeId};

/// Graph abstraction traits
pub use crate::graph::{GraphBase, Predecessors, RootedGraph, Successors};

/// Dominance analyses
pub use crate::graph::algorithms::{
    compute_dominance_frontiers, compute_dominators, DfsTree, DominanceFrontiers, DominatorTree,
};

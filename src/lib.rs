// Copyright 2025-2026 The liftir developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # liftir
//!
//! The intermediate-representation core of a decompiler: an algebraic
//! expression simplifier and the control-flow graph analyses that SSA
//! construction and code generation build on.
//!
//! The crate deliberately stops at the IR boundary. Lifting machine code
//! into expression trees and basic blocks, driving the decompilation
//! pipeline, and printing the result are the host tool's concern; `liftir`
//! takes the lifter's output and normalizes it into a canonical, analyzable
//! form.
//!
//! # Architecture
//!
//! Two independent subsystems cooperate without depending on each other:
//!
//! - [`ir`] - The expression data model ([`ir::Expr`], [`ir::Stmt`]) and
//!   the fixed-point rewrite engine ([`ir::reduce_expr`],
//!   [`ir::reduce_stmt`]). Rewrites run in a fixed priority order and
//!   mutate the tree in place until no rule fires anywhere.
//! - [`graph`] and [`cfg`] - Generic directed-graph infrastructure
//!   ([`graph::DirectedGraph`], traversal, Lengauer-Tarjan dominators,
//!   dominance frontiers) plus [`cfg::ControlFlowGraph`], a rooted graph
//!   whose nodes are addressable by basic-block key.
//!
//! # Usage Examples
//!
//! ## Simplifying an expression
//!
//! ```rust
//! use liftir::ir::{reduce_expr, BinaryOp, Expr};
//!
//! // (x * 1) + 0  reduces to  x
//! let x = Expr::reg(0, 32);
//! let mut e = Expr::binary(
//!     BinaryOp::Add,
//!     Expr::binary(BinaryOp::Mul, x.clone(), Expr::value(1, 32)),
//!     Expr::value(0, 32),
//! );
//! reduce_expr(&mut e);
//! assert_eq!(e, x);
//! ```
//!
//! ## Dominators of a control flow graph
//!
//! ```rust
//! use liftir::cfg::ControlFlowGraph;
//!
//! let mut cfg: ControlFlowGraph<u64> = ControlFlowGraph::new();
//! let a = cfg.add_block(0x00);
//! let b = cfg.add_block(0x10);
//! cfg.add_block(0x20);
//! let d = cfg.add_block(0x30);
//! cfg.add_edge(0x00, 0x10)?;
//! cfg.add_edge(0x00, 0x20)?;
//! cfg.add_edge(0x10, 0x30)?;
//! cfg.add_edge(0x20, 0x30)?;
//! cfg.set_entry(0x00)?;
//!
//! let doms = cfg.dominator_tree()?;
//! assert_eq!(doms.immediate_dominator(d), Some(a));
//! assert!(doms.dominates(a, d));
//! assert!(!doms.strictly_dominates(b, d));
//! # Ok::<(), liftir::Error>(())
//! ```
//!
//! # Design Notes
//!
//! - All analyses are single-threaded, synchronous, and deterministic
//!   given the input; the simplifier's output depends only on the input
//!   tree, and dominator construction depends only on successor order.
//! - Structural misuse (an edge referencing an unknown block, a rooted
//!   analysis on an unrooted graph) fails fast with a descriptive
//!   [`Error`]; there are no recoverable failures in scope.

pub mod cfg;
pub mod graph;
pub mod ir;
pub mod prelude;

mod error;

pub use error::{Error, Result};

//! IR statement representation.
//!
//! A [`Stmt`] is one lifted instruction: an assignment, a control
//! transfer, or a return. Statements own their expressions; the
//! simplifier reaches them through
//! [`expressions_mut`](Stmt::expressions_mut), which yields every
//! top-level expression in a fixed operand order.

use std::fmt;

use crate::ir::expr::Expr;

/// A lifted IR statement.
///
/// Block-local control flow is expressed through explicit jump targets
/// (basic-block keys); expression operands are the same [`Expr`] trees
/// the simplifier rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// An assignment of `src` into `dest`.
    Assign {
        /// The destination expression (register, variable, or memory).
        dest: Expr,
        /// The value being assigned.
        src: Expr,
    },

    /// A conditional branch, taken when `cond` is non-zero.
    Branch {
        /// The branch condition.
        cond: Expr,
        /// The key of the target basic block.
        target: u64,
    },

    /// An unconditional jump.
    Jump {
        /// The key of the target basic block.
        target: u64,
    },

    /// A return, optionally carrying a value.
    Return(Option<Expr>),
}

impl Stmt {
    /// Returns the statement's top-level expressions in operand order
    /// (destination before source, condition, return value).
    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        let slots: [Option<&Expr>; 2] = match self {
            Self::Assign { dest, src } => [Some(dest), Some(src)],
            Self::Branch { cond, .. } => [Some(cond), None],
            Self::Jump { .. } => [None, None],
            Self::Return(value) => [value.as_ref(), None],
        };
        slots.into_iter().flatten()
    }

    /// Returns the statement's top-level expressions mutably, in the same
    /// order as [`expressions`](Self::expressions).
    pub fn expressions_mut(&mut self) -> impl Iterator<Item = &mut Expr> {
        let slots: [Option<&mut Expr>; 2] = match self {
            Self::Assign { dest, src } => [Some(dest), Some(src)],
            Self::Branch { cond, .. } => [Some(cond), None],
            Self::Jump { .. } => [None, None],
            Self::Return(value) => [value.as_mut(), None],
        };
        slots.into_iter().flatten()
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign { dest, src } => write!(f, "{dest} = {src}"),
            Self::Branch { cond, target } => write!(f, "if {cond} goto {target:#x}"),
            Self::Jump { target } => write!(f, "goto {target:#x}"),
            Self::Return(Some(value)) => write!(f, "return {value}"),
            Self::Return(None) => write!(f, "return"),
        }
    }
}

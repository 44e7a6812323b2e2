//! Intermediate-representation data model and simplification.
//!
//! The lifter hands this module expression trees ([`Expr`]) and
//! statements ([`Stmt`]); the simplifier ([`reduce_expr`],
//! [`reduce_stmt`]) normalizes them in place by running a fixed,
//! prioritized set of local rewrite rules to a fixed point. Downstream
//! passes then see a canonical form: identities eliminated, constants
//! folded and gathered rightward, logical negation pushed onto
//! comparisons.
//!
//! # Examples
//!
//! ```rust
//! use liftir::ir::{reduce_expr, BinaryOp, Expr, UnaryOp};
//!
//! // !((r0 - r1) == 0)  reduces to  r0 != r1
//! let mut cond = Expr::unary(
//!     UnaryOp::BoolNot,
//!     Expr::binary(
//!         BinaryOp::Eq,
//!         Expr::binary(BinaryOp::Sub, Expr::reg(0, 32), Expr::reg(1, 32)),
//!         Expr::value(0, 32),
//!     ),
//! );
//! reduce_expr(&mut cond);
//! assert_eq!(
//!     cond,
//!     Expr::binary(BinaryOp::Ne, Expr::reg(0, 32), Expr::reg(1, 32))
//! );
//! ```

mod expr;
mod ops;
mod simplify;
mod stmt;

pub use expr::{Expr, PostOrder};
pub use ops::{BinaryOp, UnaryOp};
pub use simplify::{reduce_expr, reduce_stmt};
pub use stmt::Stmt;

//! Fixed-point expression simplification.
//!
//! [`reduce_expr`] rewrites an expression tree in place until no rule in
//! the rule set matches any subexpression. One *pass* walks the tree in
//! post-order and tries the rules in priority order at each node; the
//! first rewrite commits through the visited slot and ends the pass.
//! Passes repeat until one comes back clean.
//!
//! # Rule ordering
//!
//! The table order is load-bearing:
//!
//! - Arithmetic and sign corrections run before folding so `x + (-1)`
//!   becomes `x - 1` and later folds see canonical operators.
//! - De Morgan and comparison inversion run before re-association so
//!   boolean structure settles before arithmetic regrouping.
//! - Constant folding runs before the contextual folds so evaluated
//!   literals collapse before re-association creates fresh fold
//!   candidates.
//!
//! # Termination
//!
//! Every rewrite either shrinks the tree (folding, identities, double
//! negation), pushes `!` strictly inward (De Morgan), moves constants
//! rightward and merges them (the contextual folds), or replaces an
//! operator with a canonical form chosen so no earlier-priority rule
//! rewrites it back (sign correction, comparison inversion). Two guards
//! keep degenerate constants from cycling: sign correction skips
//! `i64::MIN` (no positive counterpart) and the contextual arithmetic
//! fold skips a negation that would overflow.

use crate::ir::{
    expr::Expr,
    ops::{BinaryOp, UnaryOp},
    stmt::Stmt,
};

/// A rewrite rule: returns the replacement for a matching subexpression,
/// or `None` when the shape does not match.
type Rule = fn(&Expr) -> Option<Expr>;

/// The rewrite rules in priority order. First match wins per
/// subexpression visit.
const RULES: [Rule; 10] = [
    correct_arith,
    correct_sign,
    correct_ref,
    correct_bitwise,
    equality,
    negate,
    converged_cond,
    constant_folding,
    fold_associative,
    fold_arithmetic,
];

/// Reduces an expression to a fixed point, in place.
///
/// On return, no rule matches any subexpression of `expr`. Reducing an
/// already-reduced expression is a no-op, so the operation is idempotent.
///
/// # Examples
///
/// ```rust
/// use liftir::ir::{reduce_expr, BinaryOp, Expr};
///
/// let mut e = Expr::binary(
///     BinaryOp::Add,
///     Expr::binary(BinaryOp::Add, Expr::reg(0, 32), Expr::value(2, 32)),
///     Expr::value(3, 32),
/// );
/// reduce_expr(&mut e);
/// assert_eq!(
///     e,
///     Expr::binary(BinaryOp::Add, Expr::reg(0, 32), Expr::value(5, 32))
/// );
/// ```
pub fn reduce_expr(expr: &mut Expr) {
    while reduce_once(expr) {}
}

/// Reduces every expression held by a statement, in place.
///
/// Applies [`reduce_expr`] to each expression the statement exposes, in
/// the statement's operand order.
pub fn reduce_stmt(stmt: &mut Stmt) {
    for expr in stmt.expressions_mut() {
        reduce_expr(expr);
    }
}

/// One simplification pass: post-order walk, first rewrite anywhere
/// commits in place and ends the pass.
///
/// Returns `true` if a rewrite fired.
fn reduce_once(expr: &mut Expr) -> bool {
    match expr {
        Expr::Unary { operand, .. } => {
            if reduce_once(operand) {
                return true;
            }
        }
        Expr::Binary { left, right, .. } => {
            if reduce_once(left) {
                return true;
            }
            if reduce_once(right) {
                return true;
            }
        }
        _ => {}
    }

    for rule in RULES {
        if let Some(replacement) = rule(expr) {
            *expr = replacement;
            return true;
        }
    }
    false
}

/// All-ones mask for a bit width, computed in `u64` so a 64-bit width
/// does not overflow the shift.
fn ones(size: u32) -> u64 {
    if size >= 64 {
        u64::MAX
    } else {
        (1u64 << size) - 1
    }
}

/// Checks whether every bit of the width is set in `value`.
#[allow(clippy::cast_sign_loss)]
fn is_all_ones(value: i64, size: u32) -> bool {
    (value as u64) & ones(size) == ones(size)
}

/// Identity elimination: `x + 0` and `x - 0` reduce to `x`; `x * 1` and
/// `x / 1` reduce to `x`.
fn correct_arith(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op, left, right, ..
    } = expr
    else {
        return None;
    };

    match op {
        BinaryOp::Add | BinaryOp::Sub if right.is_const(0) => Some((**left).clone()),
        BinaryOp::Mul | BinaryOp::Div if right.is_const(1) => Some((**left).clone()),
        _ => None,
    }
}

/// Sign normalization: `x + (-c)` becomes `x - c` and `x - (-c)` becomes
/// `x + c`, flipping the operator and taking the absolute value.
///
/// `i64::MIN` has no positive counterpart; the rule skips it so the pair
/// of rewrites cannot cycle.
fn correct_sign(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op, left, right, ..
    } = expr
    else {
        return None;
    };

    let flipped = match op {
        BinaryOp::Add => BinaryOp::Sub,
        BinaryOp::Sub => BinaryOp::Add,
        _ => return None,
    };
    let v = right.as_value()?;
    if v >= 0 {
        return None;
    }
    let abs = v.checked_abs()?;

    Some(Expr::binary(
        flipped,
        (**left).clone(),
        Expr::value(abs, right.size()),
    ))
}

/// Reference collapsing: `&*x` and `*&x` both reduce to `x`.
fn correct_ref(expr: &Expr) -> Option<Expr> {
    let Expr::Unary { op, operand, .. } = expr else {
        return None;
    };
    let Expr::Unary {
        op: inner,
        operand: x,
        ..
    } = operand.as_ref()
    else {
        return None;
    };

    match (op, inner) {
        (UnaryOp::AddrOf, UnaryOp::Deref) | (UnaryOp::Deref, UnaryOp::AddrOf) => {
            Some((**x).clone())
        }
        _ => None,
    }
}

/// Bitwise identities.
///
/// - `x ^ 0` is `x`; `x ^ x` is `0`; `x ^ all-ones` is `~x`
/// - `x | 0` and `x | x` are `x`; `x | all-ones` is all-ones
/// - `x & 0` is `0`; `x & x` and `x & all-ones` are `x`
/// - `(x >> c) << c` keeps only the bits the shift pair clears:
///   `x & ~((1 << c) - 1)`, masked to the operand width
fn correct_bitwise(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op,
        size,
        left,
        right,
    } = expr
    else {
        return None;
    };
    let size = *size;

    match op {
        BinaryOp::Xor => {
            if right.is_const(0) {
                return Some((**left).clone());
            }
            if left == right {
                return Some(Expr::value(0, size));
            }
            if right.as_value().is_some_and(|v| is_all_ones(v, size)) {
                return Some(Expr::unary(UnaryOp::Not, (**left).clone()));
            }
            None
        }
        BinaryOp::Or => {
            if right.is_const(0) || left == right {
                return Some((**left).clone());
            }
            if right.as_value().is_some_and(|v| is_all_ones(v, size)) {
                return Some((**right).clone());
            }
            None
        }
        BinaryOp::And => {
            if right.is_const(0) {
                return Some(Expr::value(0, size));
            }
            if left == right {
                return Some((**left).clone());
            }
            if right.as_value().is_some_and(|v| is_all_ones(v, size)) {
                return Some((**left).clone());
            }
            None
        }
        BinaryOp::Shl => {
            let c = right.as_value()?;
            let Expr::Binary {
                op: BinaryOp::Shr,
                left: x,
                right: inner_c,
                ..
            } = left.as_ref()
            else {
                return None;
            };
            if inner_c.as_value() != Some(c) || !(0..64).contains(&c) {
                return None;
            }

            #[allow(clippy::cast_possible_wrap)]
            let mask = (ones(size) & !((1u64 << c) - 1)) as i64;
            Some(Expr::binary(
                BinaryOp::And,
                (**x).clone(),
                Expr::value(mask, size),
            ))
        }
        _ => None,
    }
}

/// Equality normalization: moves constants across `==` and drops
/// zero-comparisons of sums and differences.
///
/// - `x + c1 == c2` becomes `x == c2 - c1`
/// - `x - c1 == c2` becomes `x == c2 + c1`
/// - `x - y == 0` becomes `x == y`
/// - `x + y == 0` becomes `x == -y`
fn equality(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op: BinaryOp::Eq,
        left: lhand,
        right: rhand,
        ..
    } = expr
    else {
        return None;
    };
    let Expr::Binary {
        op,
        left: x,
        right: y,
        ..
    } = lhand.as_ref()
    else {
        return None;
    };

    if let (Some(c1), Some(c2)) = (y.as_value(), rhand.as_value()) {
        let moved = match op {
            BinaryOp::Add => c2.wrapping_sub(c1),
            BinaryOp::Sub => c2.wrapping_add(c1),
            _ => return None,
        };
        return Some(Expr::binary(
            BinaryOp::Eq,
            (**x).clone(),
            Expr::value(moved, rhand.size()),
        ));
    }

    if rhand.is_const(0) {
        match op {
            BinaryOp::Sub => {
                return Some(Expr::binary(BinaryOp::Eq, (**x).clone(), (**y).clone()));
            }
            BinaryOp::Add => {
                return Some(Expr::binary(
                    BinaryOp::Eq,
                    (**x).clone(),
                    Expr::unary(UnaryOp::Neg, (**y).clone()),
                ));
            }
            _ => {}
        }
    }
    None
}

/// Pushes logical NOT inward.
///
/// - De Morgan over `&&` and `||`
/// - Comparison inversion: `!(a < b)` is `a >= b` and so on
/// - `!!x` is `x`
fn negate(expr: &Expr) -> Option<Expr> {
    let Expr::Unary {
        op: UnaryOp::BoolNot,
        operand,
        ..
    } = expr
    else {
        return None;
    };

    match operand.as_ref() {
        Expr::Binary {
            op: BinaryOp::BoolAnd,
            left,
            right,
            ..
        } => Some(Expr::binary(
            BinaryOp::BoolOr,
            Expr::unary(UnaryOp::BoolNot, (**left).clone()),
            Expr::unary(UnaryOp::BoolNot, (**right).clone()),
        )),
        Expr::Binary {
            op: BinaryOp::BoolOr,
            left,
            right,
            ..
        } => Some(Expr::binary(
            BinaryOp::BoolAnd,
            Expr::unary(UnaryOp::BoolNot, (**left).clone()),
            Expr::unary(UnaryOp::BoolNot, (**right).clone()),
        )),
        Expr::Binary {
            op, left, right, ..
        } => {
            let inverted = op.negated()?;
            Some(Expr::binary(inverted, (**left).clone(), (**right).clone()))
        }
        Expr::Unary {
            op: UnaryOp::BoolNot,
            operand: inner,
            ..
        } => Some((**inner).clone()),
        _ => None,
    }
}

/// Merges a disjunction of comparisons over the same operand pair:
/// `(x > y) || (x == y)` is `x >= y`, `(x < y) || (x == y)` is `x <= y`,
/// and `(x < y) || (x > y)` is `x != y`.
fn converged_cond(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op: BinaryOp::BoolOr,
        left,
        right,
        ..
    } = expr
    else {
        return None;
    };
    let Expr::Binary {
        op: lop,
        left: lx,
        right: ly,
        ..
    } = left.as_ref()
    else {
        return None;
    };
    let Expr::Binary {
        op: rop,
        left: rx,
        right: ry,
        ..
    } = right.as_ref()
    else {
        return None;
    };

    if lx != rx || ly != ry {
        return None;
    }

    let merged = match (lop, rop) {
        (BinaryOp::Gt, BinaryOp::Eq) | (BinaryOp::Eq, BinaryOp::Gt) => BinaryOp::Ge,
        (BinaryOp::Lt, BinaryOp::Eq) | (BinaryOp::Eq, BinaryOp::Lt) => BinaryOp::Le,
        (BinaryOp::Lt, BinaryOp::Gt) | (BinaryOp::Gt, BinaryOp::Lt) => BinaryOp::Ne,
        _ => return None,
    };
    Some(Expr::binary(merged, (**lx).clone(), (**ly).clone()))
}

/// Folds a binary operation over two literals into one literal.
///
/// Arithmetic runs in `i64` with wrapping semantics; the result carries
/// the left operand's width, and truncation to that width is the
/// caller's concern. Division and modulo by zero do not fire, leaving
/// the expression unchanged.
fn constant_folding(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op, left, right, ..
    } = expr
    else {
        return None;
    };
    let l = left.as_value()?;
    let r = right.as_value()?;

    let result = match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                return None;
            }
            l.wrapping_div(r)
        }
        BinaryOp::Mod => {
            if r == 0 {
                return None;
            }
            l.wrapping_rem(r)
        }
        BinaryOp::And => l & r,
        BinaryOp::Or => l | r,
        BinaryOp::Xor => l ^ r,
        _ => return None,
    };
    Some(Expr::value(result, left.size()))
}

/// Re-brackets `(x op c1) op c0` to `x op (c1 op c0)` for associative
/// `op`, queueing the constant pair for the folding rule on the next
/// pass.
fn fold_associative(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op, left, right, ..
    } = expr
    else {
        return None;
    };
    if !op.is_associative() || right.as_value().is_none() {
        return None;
    }
    let Expr::Binary {
        op: inner_op,
        left: x,
        right: c1,
        ..
    } = left.as_ref()
    else {
        return None;
    };
    if inner_op != op || c1.as_value().is_none() {
        return None;
    }

    Some(Expr::binary(
        *op,
        (**x).clone(),
        Expr::binary(*op, (**c1).clone(), (**right).clone()),
    ))
}

/// Folds stacked `+`/`-` constants: `(x op1 c1) op0 c0` becomes
/// `x op0 (±c1 + c0)`, where the sign is positive when the operators
/// agree. The outer operator is retained; the folding rule collapses the
/// new right-hand side on the next pass.
fn fold_arithmetic(expr: &Expr) -> Option<Expr> {
    let Expr::Binary {
        op: op0,
        left,
        right,
        ..
    } = expr
    else {
        return None;
    };
    if !matches!(op0, BinaryOp::Add | BinaryOp::Sub) || right.as_value().is_none() {
        return None;
    }
    let Expr::Binary {
        op: op1,
        left: x,
        right: c1,
        ..
    } = left.as_ref()
    else {
        return None;
    };
    if !matches!(op1, BinaryOp::Add | BinaryOp::Sub) {
        return None;
    }

    let c1v = c1.as_value()?;
    let signed = if op1 == op0 { c1v } else { c1v.checked_neg()? };

    Some(Expr::binary(
        *op0,
        (**x).clone(),
        Expr::binary(
            BinaryOp::Add,
            Expr::value(signed, c1.size()),
            (**right).clone(),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg() -> Expr {
        Expr::reg(0, 32)
    }

    fn reduced(mut e: Expr) -> Expr {
        reduce_expr(&mut e);
        e
    }

    #[test]
    fn test_identity_chain_reduces_to_operand() {
        // (x * 1) + 0  ->  x
        let e = Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Mul, reg(), Expr::value(1, 32)),
            Expr::value(0, 32),
        );
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_constant_subtraction_folds() {
        let e = Expr::binary(BinaryOp::Sub, Expr::value(5, 32), Expr::value(3, 32));
        assert_eq!(reduced(e), Expr::value(2, 32));
    }

    #[test]
    fn test_stacked_additions_merge() {
        // (x + 2) + 3  ->  x + 5
        let e = Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Add, reg(), Expr::value(2, 32)),
            Expr::value(3, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Add, reg(), Expr::value(5, 32))
        );
    }

    #[test]
    fn test_mixed_add_sub_merge() {
        // (x + 2) - 5  ->  x - 3
        let e = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Add, reg(), Expr::value(2, 32)),
            Expr::value(5, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Sub, reg(), Expr::value(3, 32))
        );

        // (x - 2) - 5  ->  x - 7
        let e = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Sub, reg(), Expr::value(2, 32)),
            Expr::value(5, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Sub, reg(), Expr::value(7, 32))
        );
    }

    #[test]
    fn test_difference_compared_to_zero() {
        // x - y == 0  ->  x == y
        let y = Expr::reg(1, 32);
        let e = Expr::binary(
            BinaryOp::Eq,
            Expr::binary(BinaryOp::Sub, reg(), y.clone()),
            Expr::value(0, 32),
        );
        assert_eq!(reduced(e), Expr::binary(BinaryOp::Eq, reg(), y));
    }

    #[test]
    fn test_sum_compared_to_zero() {
        // x + y == 0  ->  x == -y
        let y = Expr::reg(1, 32);
        let e = Expr::binary(
            BinaryOp::Eq,
            Expr::binary(BinaryOp::Add, reg(), y.clone()),
            Expr::value(0, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Eq, reg(), Expr::unary(UnaryOp::Neg, y))
        );
    }

    #[test]
    fn test_constant_moves_across_equality() {
        // x + 2 == 5  ->  x == 3
        let e = Expr::binary(
            BinaryOp::Eq,
            Expr::binary(BinaryOp::Add, reg(), Expr::value(2, 32)),
            Expr::value(5, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Eq, reg(), Expr::value(3, 32))
        );

        // x - 2 == 5  ->  x == 7
        let e = Expr::binary(
            BinaryOp::Eq,
            Expr::binary(BinaryOp::Sub, reg(), Expr::value(2, 32)),
            Expr::value(5, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Eq, reg(), Expr::value(7, 32))
        );
    }

    #[test]
    fn test_negated_comparison_inverts() {
        // !(x < y)  ->  x >= y
        let y = Expr::reg(1, 32);
        let e = Expr::unary(
            UnaryOp::BoolNot,
            Expr::binary(BinaryOp::Lt, reg(), y.clone()),
        );
        assert_eq!(reduced(e), Expr::binary(BinaryOp::Ge, reg(), y));
    }

    #[test]
    fn test_de_morgan() {
        // !(a && b)  ->  !a || !b
        let a = Expr::reg(1, 32);
        let b = Expr::reg(2, 32);
        let e = Expr::unary(
            UnaryOp::BoolNot,
            Expr::binary(BinaryOp::BoolAnd, a.clone(), b.clone()),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(
                BinaryOp::BoolOr,
                Expr::unary(UnaryOp::BoolNot, a.clone()),
                Expr::unary(UnaryOp::BoolNot, b.clone()),
            )
        );

        // !(a || b)  ->  !a && !b
        let e = Expr::unary(
            UnaryOp::BoolNot,
            Expr::binary(BinaryOp::BoolOr, a.clone(), b.clone()),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(
                BinaryOp::BoolAnd,
                Expr::unary(UnaryOp::BoolNot, a),
                Expr::unary(UnaryOp::BoolNot, b),
            )
        );
    }

    #[test]
    fn test_double_bool_not_cancels() {
        let e = Expr::unary(UnaryOp::BoolNot, Expr::unary(UnaryOp::BoolNot, reg()));
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_de_morgan_inverts_nested_comparisons() {
        // !((x < y) && (x > z))  ->  (x >= y) || (x <= z)
        let y = Expr::reg(1, 32);
        let z = Expr::reg(2, 32);
        let e = Expr::unary(
            UnaryOp::BoolNot,
            Expr::binary(
                BinaryOp::BoolAnd,
                Expr::binary(BinaryOp::Lt, reg(), y.clone()),
                Expr::binary(BinaryOp::Gt, reg(), z.clone()),
            ),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(
                BinaryOp::BoolOr,
                Expr::binary(BinaryOp::Ge, reg(), y),
                Expr::binary(BinaryOp::Le, reg(), z),
            )
        );
    }

    #[test]
    fn test_converged_conditions() {
        let y = Expr::reg(1, 32);
        let cmp = |op| Expr::binary(op, reg(), y.clone());

        // (x > y) || (x == y)  ->  x >= y
        let e = Expr::binary(BinaryOp::BoolOr, cmp(BinaryOp::Gt), cmp(BinaryOp::Eq));
        assert_eq!(reduced(e), cmp(BinaryOp::Ge));

        // (x < y) || (x == y)  ->  x <= y
        let e = Expr::binary(BinaryOp::BoolOr, cmp(BinaryOp::Lt), cmp(BinaryOp::Eq));
        assert_eq!(reduced(e), cmp(BinaryOp::Le));

        // (x < y) || (x > y)  ->  x != y
        let e = Expr::binary(BinaryOp::BoolOr, cmp(BinaryOp::Lt), cmp(BinaryOp::Gt));
        assert_eq!(reduced(e), cmp(BinaryOp::Ne));
    }

    #[test]
    fn test_converged_requires_matching_operands() {
        // (x > y) || (x == z) stays as-is.
        let y = Expr::reg(1, 32);
        let z = Expr::reg(2, 32);
        let e = Expr::binary(
            BinaryOp::BoolOr,
            Expr::binary(BinaryOp::Gt, reg(), y),
            Expr::binary(BinaryOp::Eq, reg(), z),
        );
        assert_eq!(reduced(e.clone()), e);
    }

    #[test]
    fn test_sign_correction() {
        // x + (-1)  ->  x - 1
        let e = Expr::binary(BinaryOp::Add, reg(), Expr::value(-1, 32));
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Sub, reg(), Expr::value(1, 32))
        );

        // x - (-3)  ->  x + 3
        let e = Expr::binary(BinaryOp::Sub, reg(), Expr::value(-3, 32));
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Add, reg(), Expr::value(3, 32))
        );
    }

    #[test]
    fn test_sign_correction_skips_i64_min() {
        let e = Expr::binary(BinaryOp::Add, reg(), Expr::value(i64::MIN, 64));
        // Must terminate and leave the expression alone.
        assert_eq!(reduced(e.clone()), e);
    }

    #[test]
    fn test_reference_collapsing() {
        // &*x  ->  x
        let e = Expr::unary(UnaryOp::AddrOf, Expr::unary(UnaryOp::Deref, reg()));
        assert_eq!(reduced(e), reg());

        // *&x  ->  x
        let e = Expr::unary(UnaryOp::Deref, Expr::unary(UnaryOp::AddrOf, reg()));
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_xor_identities() {
        let e = Expr::binary(BinaryOp::Xor, reg(), Expr::value(0, 32));
        assert_eq!(reduced(e), reg());

        let e = Expr::binary(BinaryOp::Xor, reg(), reg());
        assert_eq!(reduced(e), Expr::value(0, 32));

        // x ^ all-ones  ->  ~x
        let e = Expr::binary(BinaryOp::Xor, reg(), Expr::value(0xFFFF_FFFF, 32));
        assert_eq!(reduced(e), Expr::unary(UnaryOp::Not, reg()));
    }

    #[test]
    fn test_or_identities() {
        let e = Expr::binary(BinaryOp::Or, reg(), Expr::value(0, 32));
        assert_eq!(reduced(e), reg());

        let e = Expr::binary(BinaryOp::Or, reg(), reg());
        assert_eq!(reduced(e), reg());

        let all = Expr::value(0xFFFF_FFFF, 32);
        let e = Expr::binary(BinaryOp::Or, reg(), all.clone());
        assert_eq!(reduced(e), all);
    }

    #[test]
    fn test_and_identities() {
        let e = Expr::binary(BinaryOp::And, reg(), Expr::value(0, 32));
        assert_eq!(reduced(e), Expr::value(0, 32));

        let e = Expr::binary(BinaryOp::And, reg(), reg());
        assert_eq!(reduced(e), reg());

        let e = Expr::binary(BinaryOp::And, reg(), Expr::value(0xFFFF_FFFF, 32));
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_all_ones_width_64() {
        // The 64-bit mask must not overflow the shift computing it.
        let x = Expr::reg(0, 64);
        let e = Expr::binary(BinaryOp::And, x.clone(), Expr::value(-1, 64));
        assert_eq!(reduced(e), x);

        let e = Expr::binary(BinaryOp::Xor, x.clone(), Expr::value(-1, 64));
        assert_eq!(reduced(e), Expr::unary(UnaryOp::Not, x));
    }

    #[test]
    fn test_shift_pair_becomes_mask() {
        // (x >> 4) << 4  ->  x & 0xFFFFFFF0
        let e = Expr::binary(
            BinaryOp::Shl,
            Expr::binary(BinaryOp::Shr, reg(), Expr::value(4, 32)),
            Expr::value(4, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::And, reg(), Expr::value(0xFFFF_FFF0, 32))
        );
    }

    #[test]
    fn test_shift_pair_requires_equal_counts() {
        let e = Expr::binary(
            BinaryOp::Shl,
            Expr::binary(BinaryOp::Shr, reg(), Expr::value(4, 32)),
            Expr::value(8, 32),
        );
        assert_eq!(reduced(e.clone()), e);
    }

    #[test]
    fn test_folding_agreement() {
        let cases = [
            (BinaryOp::Add, 7 + 5),
            (BinaryOp::Sub, 7 - 5),
            (BinaryOp::Mul, 7 * 5),
            (BinaryOp::Div, 7 / 5),
            (BinaryOp::Mod, 7 % 5),
            (BinaryOp::And, 7 & 5),
            (BinaryOp::Or, 7 | 5),
            (BinaryOp::Xor, 7 ^ 5),
        ];
        for (op, expected) in cases {
            let e = Expr::binary(op, Expr::value(7, 32), Expr::value(5, 32));
            assert_eq!(reduced(e), Expr::value(expected, 32), "folding {op}");
        }
    }

    #[test]
    fn test_folding_result_takes_left_width() {
        let e = Expr::binary(BinaryOp::Add, Expr::value(1, 16), Expr::value(2, 16));
        assert_eq!(reduced(e), Expr::value(3, 16));
    }

    #[test]
    fn test_division_by_zero_is_preserved() {
        let e = Expr::binary(BinaryOp::Div, Expr::value(5, 32), Expr::value(0, 32));
        assert_eq!(reduced(e.clone()), e);

        let e = Expr::binary(BinaryOp::Mod, Expr::value(5, 32), Expr::value(0, 32));
        assert_eq!(reduced(e.clone()), e);
    }

    #[test]
    fn test_folding_wraps_instead_of_overflowing() {
        let e = Expr::binary(
            BinaryOp::Add,
            Expr::value(i64::MAX, 64),
            Expr::value(1, 64),
        );
        assert_eq!(reduced(e), Expr::value(i64::MIN, 64));
    }

    #[test]
    fn test_shifts_are_not_constant_folded() {
        // Shl/Shr are outside the folding set.
        let e = Expr::binary(BinaryOp::Shl, Expr::value(1, 32), Expr::value(3, 32));
        assert_eq!(reduced(e.clone()), e);
    }

    #[test]
    fn test_associative_regroup_with_bitwise_ops() {
        // (x & 0xF0) & 0x0F  ->  x & 0
        let e = Expr::binary(
            BinaryOp::And,
            Expr::binary(BinaryOp::And, reg(), Expr::value(0xF0, 32)),
            Expr::value(0x0F, 32),
        );
        // The merged mask is 0, and the zero identity then absorbs x.
        assert_eq!(reduced(e), Expr::value(0, 32));

        // (x ^ 3) ^ 3  ->  x
        let e = Expr::binary(
            BinaryOp::Xor,
            Expr::binary(BinaryOp::Xor, reg(), Expr::value(3, 32)),
            Expr::value(3, 32),
        );
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_leaves_are_fixed_points() {
        assert_eq!(reduced(reg()), reg());
        assert_eq!(reduced(Expr::value(9, 32)), Expr::value(9, 32));
        assert_eq!(reduced(Expr::var("tmp", 32)), Expr::var("tmp", 32));
        assert_eq!(reduced(Expr::mem(3, 32)), Expr::mem(3, 32));
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let exprs = [
            Expr::binary(
                BinaryOp::Add,
                Expr::binary(BinaryOp::Add, reg(), Expr::value(2, 32)),
                Expr::value(3, 32),
            ),
            Expr::unary(
                UnaryOp::BoolNot,
                Expr::binary(
                    BinaryOp::BoolAnd,
                    Expr::binary(BinaryOp::Lt, reg(), Expr::reg(1, 32)),
                    Expr::binary(BinaryOp::Eq, reg(), Expr::reg(2, 32)),
                ),
            ),
            Expr::binary(
                BinaryOp::Eq,
                Expr::binary(BinaryOp::Sub, reg(), Expr::reg(1, 32)),
                Expr::value(0, 32),
            ),
        ];
        for e in exprs {
            let once = reduced(e);
            let twice = reduced(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_compound_reduction() {
        // ((x ^ 0) + (5 - 3)) - 2  ->  x
        let e = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(
                BinaryOp::Add,
                Expr::binary(BinaryOp::Xor, reg(), Expr::value(0, 32)),
                Expr::binary(BinaryOp::Sub, Expr::value(5, 32), Expr::value(3, 32)),
            ),
            Expr::value(2, 32),
        );
        assert_eq!(reduced(e), reg());
    }

    #[test]
    fn test_rewrites_fire_deep_in_the_tree() {
        // The zero-add is buried under an untouched Mul.
        let e = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, reg(), Expr::value(0, 32)),
            Expr::reg(1, 32),
        );
        assert_eq!(
            reduced(e),
            Expr::binary(BinaryOp::Mul, reg(), Expr::reg(1, 32))
        );
    }
}

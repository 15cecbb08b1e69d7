//! Structural and algebraic fingerprints of expressions.
//!
//! A fingerprint evaluates the expression over the field after substituting every leaf with the
//! element chosen by a [`LeafMapper`]. Since field addition and multiplication are commutative,
//! associative and distributive, expressions related by those laws evaluate to the same element
//! without any canonicalization.
//!
//! The fixed assignment [`MixingMapper::DEFAULT`] is affine in the leaf key, so it cannot tell
//! apart expressions whose only difference is an integer-linear relation between identifiers,
//! e.g. `var10 - var3` and `var20 - var13`. Use [`crate::equivalency::EquivalenceChecker`] with
//! trials to catch those.
//!
//! Trees are walked with an explicit stack, so their depth is only bounded by memory.

use exprfp_base::{Felt, LeafMapper, MixingMapper, Mode};

use crate::{
    error::{Error, Result},
    expr::{BinaryOp, Expr, ExprNode},
};

/// Pending work of the post-order walk.
enum Visit<'a> {
    /// Compute the value of the node.
    Enter(&'a Expr),
    /// Both operands of the node are on the value stack.
    Exit(&'a Expr),
}

impl Expr {
    /// Returns the fingerprint of the expression under the fixed leaf assignment
    /// [`MixingMapper::DEFAULT`].
    ///
    /// The result is memoized in every node visited. Memoized fingerprints of one mode are never
    /// affected by computing the other. If a division by zero is found the error is propagated and
    /// nothing is memoized for the nodes above the division.
    pub fn fingerprint(&self, mode: Mode) -> Result<Felt> {
        self.fold(mode, &MixingMapper::DEFAULT, true)
    }

    /// Returns the memoized fingerprint, if it was already computed.
    pub fn cached_fingerprint(&self, mode: Mode) -> Option<Felt> {
        self.cache().get(mode)
    }

    /// Evaluates the expression under an arbitrary leaf assignment. Nothing is memoized.
    pub fn evaluate<M>(&self, mapper: &M, mode: Mode) -> Result<Felt>
    where
        M: LeafMapper + ?Sized,
    {
        self.fold(mode, mapper, false)
    }

    /// Evaluates the tree bottom up, left operand first.
    fn fold<M>(&self, mode: Mode, mapper: &M, memoize: bool) -> Result<Felt>
    where
        M: LeafMapper + ?Sized,
    {
        let mut todo = vec![Visit::Enter(self)];
        let mut values: Vec<Felt> = vec![];
        while let Some(visit) = todo.pop() {
            let (expr, value) = match visit {
                Visit::Enter(expr) => {
                    let cached = if memoize { expr.cache().get(mode) } else { None };
                    if let Some(value) = cached {
                        values.push(value);
                        continue;
                    }
                    match expr.node() {
                        ExprNode::Leaf(leaf) => (expr, mapper.leaf_value(&leaf, mode)),
                        ExprNode::Binary(_, lhs, rhs) => {
                            todo.push(Visit::Exit(expr));
                            todo.push(Visit::Enter(rhs));
                            todo.push(Visit::Enter(lhs));
                            continue;
                        }
                    }
                }
                Visit::Exit(expr) => {
                    let (r, l) = (values.pop(), values.pop());
                    let (ExprNode::Binary(op, _, rhs), Some(l), Some(r)) = (expr.node(), l, r)
                    else {
                        return Err(Error::MalformedExpression("missing operand"));
                    };
                    (expr, apply(op, l, r, rhs, mode)?)
                }
            };
            if memoize {
                log::trace!("{mode} fingerprint of {} node = {value}", expr.label());
                values.push(expr.cache().store(mode, value));
            } else {
                values.push(value);
            }
        }
        values
            .pop()
            .ok_or(Error::MalformedExpression("expression produced no value"))
    }
}

/// Applies a binary operator to the values of its operands.
fn apply(op: BinaryOp, l: Felt, r: Felt, divisor: &Expr, mode: Mode) -> Result<Felt> {
    Ok(match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            let inv = r.inverse().map_err(|_| {
                log::debug!("Divisor {divisor:?} is zero in the {mode} fingerprint");
                Error::DivisionByZeroInField {
                    divisor: format!("{divisor:?}"),
                    mode,
                }
            })?;
            l * inv
        }
    })
}

//! Structs for handling arithmetic expressions.

use std::{mem, ops};

use exprfp_base::{Leaf, LeafCategory};

use crate::error::{Error, Result};

mod cache;
mod display;

pub(crate) use cache::FingerprintCache;

/// Binary operators of the expression language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Infix symbol of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Returns true if swapping the operands preserves the value.
    pub fn is_commutative(&self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Mul)
    }
}

/// Shape of an expression node.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ExprKind {
    /// Free variable.
    Var(u32),
    /// Bound or structural parameter.
    Param(u32),
    /// Represents the sum of the inner expressions.
    Add(Box<Expr>, Box<Expr>),
    /// Represents the difference of the inner expressions.
    Sub(Box<Expr>, Box<Expr>),
    /// Represents the product of the inner expressions.
    Mul(Box<Expr>, Box<Expr>),
    /// Represents the quotient of the inner expressions.
    Div(Box<Expr>, Box<Expr>),
}

/// Borrowed view of an expression node.
#[derive(Copy, Clone, Debug)]
pub enum ExprNode<'a> {
    Leaf(Leaf),
    Binary(BinaryOp, &'a Expr, &'a Expr),
}

/// Represents an arithmetic expression.
///
/// Every node exclusively owns its children and memoizes its fingerprints. Nodes cannot be
/// modified once built, so a memoized fingerprint never goes stale.
///
/// Fingerprinting, comparison, traversal and dropping use an explicit stack and accept trees of
/// any depth. `Clone`, `Debug`, `Display` and the divisor named in a division error recurse, so
/// they are limited to a few thousand levels.
#[derive(Clone)]
pub struct Expr {
    kind: ExprKind,
    cache: FingerprintCache,
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            cache: Default::default(),
        }
    }

    /// Creates a free variable.
    pub fn var(id: u32) -> Self {
        Self::new(ExprKind::Var(id))
    }

    /// Creates a parameter.
    pub fn param(id: u32) -> Self {
        Self::new(ExprKind::Param(id))
    }

    /// Creates a leaf from its description.
    pub fn leaf(leaf: Leaf) -> Self {
        match leaf.category() {
            LeafCategory::Variable => Self::var(leaf.id()),
            LeafCategory::Parameter => Self::param(leaf.id()),
        }
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Mul, lhs, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Div, lhs, rhs)
    }

    /// Creates a binary node that takes ownership of both operands.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        Self::new(match op {
            BinaryOp::Add => ExprKind::Add(lhs, rhs),
            BinaryOp::Sub => ExprKind::Sub(lhs, rhs),
            BinaryOp::Mul => ExprKind::Mul(lhs, rhs),
            BinaryOp::Div => ExprKind::Div(lhs, rhs),
        })
    }

    /// Same as [`Expr::binary`] but for operands that may be missing, e.g. partial results of a
    /// rewrite.
    pub fn try_binary(op: BinaryOp, lhs: Option<Expr>, rhs: Option<Expr>) -> Result<Self> {
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Ok(Self::binary(op, lhs, rhs)),
            (None, _) => Err(Error::MalformedExpression(
                "binary expression is missing its left operand",
            )),
            (_, None) => Err(Error::MalformedExpression(
                "binary expression is missing its right operand",
            )),
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub(crate) fn cache(&self) -> &FingerprintCache {
        &self.cache
    }

    /// Returns a view of the node that distinguishes leaves from binary nodes.
    pub fn node(&self) -> ExprNode<'_> {
        match &self.kind {
            ExprKind::Var(id) => ExprNode::Leaf(Leaf::variable(*id)),
            ExprKind::Param(id) => ExprNode::Leaf(Leaf::parameter(*id)),
            ExprKind::Add(lhs, rhs) => ExprNode::Binary(BinaryOp::Add, lhs, rhs),
            ExprKind::Sub(lhs, rhs) => ExprNode::Binary(BinaryOp::Sub, lhs, rhs),
            ExprKind::Mul(lhs, rhs) => ExprNode::Binary(BinaryOp::Mul, lhs, rhs),
            ExprKind::Div(lhs, rhs) => ExprNode::Binary(BinaryOp::Div, lhs, rhs),
        }
    }

    /// Returns `Some(_)` if the expression is a leaf. None otherwise.
    pub fn as_leaf(&self) -> Option<Leaf> {
        match self.node() {
            ExprNode::Leaf(leaf) => Some(leaf),
            ExprNode::Binary(..) => None,
        }
    }

    /// Returns the operator and operands if the expression is a binary node.
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self.node() {
            ExprNode::Leaf(_) => None,
            ExprNode::Binary(op, lhs, rhs) => Some((op, lhs, rhs)),
        }
    }

    /// Returns the number of nodes in the expression.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0;
        while let Some(expr) = pending.pop() {
            count += 1;
            if let ExprNode::Binary(_, lhs, rhs) = expr.node() {
                pending.extend([lhs, rhs]);
            }
        }
        count
    }

    /// Returns the leaves of the expression from left to right.
    pub fn leaves(&self) -> Vec<Leaf> {
        let mut pending = vec![self];
        let mut leaves = vec![];
        while let Some(expr) = pending.pop() {
            match expr.node() {
                ExprNode::Leaf(leaf) => leaves.push(leaf),
                ExprNode::Binary(_, lhs, rhs) => pending.extend([rhs, lhs]),
            }
        }
        leaves
    }
}

/// Syntactic equality. Memoized fingerprints are not compared.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((lhs, rhs)) = pending.pop() {
            match (lhs.node(), rhs.node()) {
                (ExprNode::Leaf(l), ExprNode::Leaf(r)) if l == r => {}
                (ExprNode::Binary(lop, ll, lr), ExprNode::Binary(rop, rl, rr)) if lop == rop => {
                    pending.extend([(lr, rr), (ll, rl)]);
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expr {}

impl Drop for Expr {
    fn drop(&mut self) {
        if self.as_leaf().is_some() {
            return;
        }
        // Children are detached before they are dropped, so each drop is shallow.
        let mut pending = vec![mem::replace(&mut self.kind, ExprKind::Var(0))];
        while let Some(kind) = pending.pop() {
            if let ExprKind::Add(lhs, rhs)
            | ExprKind::Sub(lhs, rhs)
            | ExprKind::Mul(lhs, rhs)
            | ExprKind::Div(lhs, rhs) = kind
            {
                for mut child in [lhs, rhs] {
                    pending.push(mem::replace(&mut child.kind, ExprKind::Var(0)));
                }
            }
        }
    }
}

impl From<Leaf> for Expr {
    fn from(leaf: Leaf) -> Self {
        Self::leaf(leaf)
    }
}

macro_rules! expr_ops {
    ($($op:ident::$mthd:ident => $binop:ident);+ $(;)?) => {
        $(
            impl ops::$op for Expr {
                type Output = Expr;

                fn $mthd(self, rhs: Self) -> Self::Output {
                    Expr::binary(BinaryOp::$binop, self, rhs)
                }
            }
        )+
    };
}

expr_ops! {
    Add::add => Add;
    Sub::sub => Sub;
    Mul::mul => Mul;
    Div::div => Div;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn factored() -> Expr {
        Expr::param(1) * (Expr::var(2) + Expr::var(3))
    }

    #[rstest]
    fn operators_build_nodes(factored: Expr) {
        let expected = Expr::mul(Expr::param(1), Expr::add(Expr::var(2), Expr::var(3)));
        assert_eq!(factored, expected);
    }

    #[rstest]
    fn size_counts_nodes(factored: Expr) {
        assert_eq!(factored.size(), 5);
        assert_eq!(Expr::var(0).size(), 1);
    }

    #[rstest]
    fn leaves_in_order(factored: Expr) {
        assert_eq!(
            factored.leaves(),
            vec![Leaf::parameter(1), Leaf::variable(2), Leaf::variable(3)]
        );
    }

    #[rstest]
    fn as_binary_exposes_operands(factored: Expr) {
        let (op, lhs, rhs) = factored.as_binary().unwrap();
        assert_eq!(op, BinaryOp::Mul);
        assert_eq!(lhs, &Expr::param(1));
        assert_eq!(rhs.as_binary().map(|(op, _, _)| op), Some(BinaryOp::Add));
        assert!(lhs.as_binary().is_none());
    }

    #[rstest]
    fn kind_exposes_boxed_operands(factored: Expr) {
        let ExprKind::Mul(lhs, rhs) = factored.kind() else {
            panic!("expected a product, got {factored:?}");
        };
        assert_eq!(lhs.kind(), &ExprKind::Param(1));
        assert!(matches!(rhs.kind(), ExprKind::Add(..)));
    }

    #[test]
    fn equality_compares_shape_and_leaves() {
        let lhs = Expr::var(1) - Expr::var(2);
        assert_eq!(lhs, Expr::var(1) - Expr::var(2));
        assert_ne!(lhs, Expr::var(2) - Expr::var(1));
        assert_ne!(lhs, Expr::var(1) + Expr::var(2));
        assert_ne!(lhs, Expr::var(1));
    }

    #[test]
    fn deep_chains_compare_and_drop() {
        let chain = |depth: u32| (1..depth).fold(Expr::var(0), |acc, id| acc * Expr::var(id));
        let (lhs, rhs) = (chain(200_000), chain(200_000));
        assert!(lhs == rhs);
        assert_eq!(lhs.size(), 2 * 200_000 - 1);
        assert_eq!(lhs.leaves().len(), 200_000);
        assert_eq!(lhs.leaves()[1], Leaf::variable(1));
    }

    #[test]
    fn leaf_round_trip() {
        let leaf = Leaf::parameter(9);
        assert_eq!(Expr::from(leaf).as_leaf(), Some(leaf));
    }

    #[test]
    fn variables_and_parameters_differ() {
        assert_ne!(Expr::var(4), Expr::param(4));
    }

    #[rstest]
    #[case(BinaryOp::Add)]
    #[case(BinaryOp::Sub)]
    #[case(BinaryOp::Mul)]
    #[case(BinaryOp::Div)]
    fn try_binary_with_operands(#[case] op: BinaryOp) {
        let e = Expr::try_binary(op, Some(Expr::var(1)), Some(Expr::var(2))).unwrap();
        assert_eq!(e, Expr::binary(op, Expr::var(1), Expr::var(2)));
    }

    #[test]
    fn try_binary_missing_left() {
        let err = Expr::try_binary(BinaryOp::Add, None, Some(Expr::var(1))).unwrap_err();
        assert!(matches!(err, Error::MalformedExpression(_)));
    }

    #[test]
    fn try_binary_missing_right() {
        let err = Expr::try_binary(BinaryOp::Div, Some(Expr::var(1)), None).unwrap_err();
        assert!(matches!(err, Error::MalformedExpression(_)));
    }
}

//! Text renderings of expressions.
//!
//! [`fmt::Display`] produces fully parenthesized infix notation with every leaf rendered as the
//! character its identifier encodes. [`fmt::Debug`] produces the prefix form used in logs.

use std::fmt;

use exprfp_base::{Leaf, LeafCategory};

use super::{Expr, ExprNode};

/// Renders a leaf as a single character, or as `v<id>`/`p<id>` when the identifier is not a
/// printable character.
struct LeafChar(Leaf);

impl fmt::Display for LeafChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaf = self.0;
        match char::from_u32(leaf.id()).filter(|c| !c.is_control() && !c.is_whitespace()) {
            Some(c) => write!(f, "{c}"),
            None => match leaf.category() {
                LeafCategory::Variable => write!(f, "v{}", leaf.id()),
                LeafCategory::Parameter => write!(f, "p{}", leaf.id()),
            },
        }
    }
}

impl Expr {
    /// Describes the node without its operands.
    pub(crate) fn label(&self) -> String {
        match self.node() {
            ExprNode::Leaf(leaf) => format!("{leaf:?}"),
            ExprNode::Binary(op, _, _) => op.symbol().to_owned(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExprNode::Leaf(leaf) => write!(f, "{}", LeafChar(leaf)),
            ExprNode::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", op.symbol()),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            ExprNode::Leaf(leaf) => write!(f, "{leaf:?}"),
            ExprNode::Binary(op, lhs, rhs) => write!(f, "({} {lhs:?} {rhs:?})", op.symbol()),
        }
    }
}

#![doc = include_str!("../README.md")]

pub mod equivalency;
pub mod error;
pub mod expr;
mod fingerprint;
pub mod params;
pub mod system;

pub use equivalency::{AlgebraicEqv, EqvRelation, EquivalenceChecker, StructuralEqv, equivalent};
pub use error::{Error, Result};
pub use expr::{BinaryOp, Expr, ExprKind, ExprNode};
pub use exprfp_base::{Felt, KeyedMapper, Leaf, LeafCategory, LeafMapper, MixingMapper, Mode};
pub use params::{EqvParams, EqvParamsBuilder};
pub use system::{ExprId, ExprSystem};

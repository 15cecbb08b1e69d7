#![doc = include_str!("../README.md")]
#![deny(missing_debug_implementations)]

pub mod error;
pub mod felt;
pub mod leaf;

pub use error::FieldError;
pub use felt::Felt;
pub use leaf::{KeyedMapper, Leaf, LeafCategory, LeafMapper, MixingMapper};

/// Selects which fingerprint of an expression is computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    /// Leaves are identified only by their category, so expressions with the same shape collide.
    Structural,
    /// Leaves are identified by their identifier.
    Algebraic,
}

impl Mode {
    /// Both modes, structural first.
    pub const ALL: [Mode; 2] = [Mode::Structural, Mode::Algebraic];
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Structural => write!(f, "structural"),
            Mode::Algebraic => write!(f, "algebraic"),
        }
    }
}

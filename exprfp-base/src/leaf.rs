//! Mapping of expression leaves to field elements.

use std::fmt;

use ff::Field as _;
use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{Mode, felt::Felt};

/// Kind of a leaf. The discriminant is the key used by structural fingerprints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LeafCategory {
    /// A free variable.
    Variable = 0,
    /// A bound or structural parameter.
    Parameter = 1,
}

/// A leaf of an expression: its category and its identifier.
///
/// Identifiers of both categories share a single namespace.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Leaf {
    category: LeafCategory,
    id: u32,
}

impl Leaf {
    pub fn new(category: LeafCategory, id: u32) -> Self {
        Self { category, id }
    }

    pub fn variable(id: u32) -> Self {
        Self::new(LeafCategory::Variable, id)
    }

    pub fn parameter(id: u32) -> Self {
        Self::new(LeafCategory::Parameter, id)
    }

    pub fn category(&self) -> LeafCategory {
        self.category
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the key that identifies this leaf under the given mode.
    pub fn key(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Structural => self.category as u64,
            Mode::Algebraic => self.id.into(),
        }
    }
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            LeafCategory::Variable => write!(f, "var{}", self.id),
            LeafCategory::Parameter => write!(f, "par{}", self.id),
        }
    }
}

/// Assigns a field element to every leaf.
///
/// Implementations must be deterministic: the same leaf under the same mode always maps to the
/// same element.
pub trait LeafMapper {
    fn leaf_value(&self, leaf: &Leaf, mode: Mode) -> Felt;
}

impl<F> LeafMapper for F
where
    F: Fn(&Leaf, Mode) -> Felt,
{
    fn leaf_value(&self, leaf: &Leaf, mode: Mode) -> Felt {
        self(leaf, mode)
    }
}

/// Multiplicative mixing of the leaf key: `offset + key * multiplier (mod p)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MixingMapper {
    offset: Felt,
    multiplier: Felt,
}

/// Knuth's multiplicative hashing constant.
const DEFAULT_MULTIPLIER: u64 = 2654435761;
const DEFAULT_OFFSET: u64 = 31;

impl MixingMapper {
    /// The fixed assignment used for memoized fingerprints.
    pub const DEFAULT: MixingMapper = MixingMapper {
        offset: Felt::new(DEFAULT_OFFSET),
        multiplier: Felt::new(DEFAULT_MULTIPLIER),
    };

    /// Creates a mapper. A zero multiplier would map every leaf to the offset.
    pub fn new(offset: Felt, multiplier: Felt) -> Option<Self> {
        if multiplier == Felt::ZERO {
            return None;
        }
        Some(Self { offset, multiplier })
    }

    pub fn offset(&self) -> Felt {
        self.offset
    }

    pub fn multiplier(&self) -> Felt {
        self.multiplier
    }

    /// Mixes a raw key into a field element.
    pub fn mix(&self, key: u64) -> Felt {
        self.offset + Felt::new(key) * self.multiplier
    }
}

impl Default for MixingMapper {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LeafMapper for MixingMapper {
    fn leaf_value(&self, leaf: &Leaf, mode: Mode) -> Felt {
        self.mix(leaf.key(mode))
    }
}

/// Assigns every key an independent pseudo-random element derived from a seed.
///
/// Unlike [`MixingMapper`], whose values lie on an arithmetic progression of the keys, the values
/// of distinct keys are unrelated, so linear relations between identifiers are not preserved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyedMapper {
    seed: u64,
}

/// Odd 64-bit golden ratio constant; multiplying by it is a bijection on `u64`.
const KEY_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

impl KeyedMapper {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Draws a mapper from the given source of randomness.
    pub fn random(mut rng: impl RngCore) -> Self {
        let seed = rng.next_u64();
        log::trace!("Drew keyed leaf assignment with seed {seed:#x}");
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the element assigned to a raw key.
    pub fn value_of(&self, key: u64) -> Felt {
        let stream = self.seed.wrapping_add(key.wrapping_mul(KEY_SPREAD));
        Felt::random(StdRng::seed_from_u64(stream))
    }
}

impl LeafMapper for KeyedMapper {
    fn leaf_value(&self, leaf: &Leaf, mode: Mode) -> Felt {
        self.value_of(leaf.key(mode))
    }
}

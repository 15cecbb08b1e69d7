use std::sync::OnceLock;

use exprfp_base::{Felt, Mode};

/// Memoized fingerprints of a single node, one slot per [`Mode`].
///
/// A slot is written at most once. Concurrent writers race with the same deterministic value and
/// the losing write is dropped.
#[derive(Clone, Default, Debug)]
pub(crate) struct FingerprintCache {
    structural: OnceLock<Felt>,
    algebraic: OnceLock<Felt>,
}

impl FingerprintCache {
    fn slot(&self, mode: Mode) -> &OnceLock<Felt> {
        match mode {
            Mode::Structural => &self.structural,
            Mode::Algebraic => &self.algebraic,
        }
    }

    pub fn get(&self, mode: Mode) -> Option<Felt> {
        self.slot(mode).get().copied()
    }

    /// Stores the fingerprint for `mode` and returns the value held by the slot.
    pub fn store(&self, mode: Mode, value: Felt) -> Felt {
        *self.slot(mode).get_or_init(|| value)
    }
}

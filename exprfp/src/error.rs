//! Error type.

use exprfp_base::Mode;
use thiserror::Error;

/// Fingerprinting error type.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Happens when the divisor of a division fingerprints to zero, i.e. it has no inverse in the
    /// field.
    #[error("Divisor {divisor} evaluates to zero in the {mode} fingerprint")]
    DivisionByZeroInField {
        /// Prefix rendering of the divisor.
        divisor: String,
        mode: Mode,
    },
    /// Happens when a binary expression is assembled without one of its operands.
    #[error("Malformed expression: {0}")]
    MalformedExpression(&'static str),
    /// Happens when comparing collections of expressions element-wise.
    #[error("Cannot compare {0} expressions against {1} expressions")]
    LengthMismatch(usize, usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

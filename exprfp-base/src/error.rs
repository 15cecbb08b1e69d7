//! Error type.

use thiserror::Error;

/// Errors raised by field arithmetic.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Happens when the multiplicative inverse of zero is requested.
    #[error("zero has no multiplicative inverse in the field")]
    DivisionByZeroInField,
}

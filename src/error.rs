//! Error types for the Collatz engines.
//!
//! All variants are fatal programmer errors: a broken chain invariant, an
//! accumulator that outlived its expected shape, or an exponent of 3 too
//! large to represent. There is no recoverable external failure mode here —
//! no I/O, no network, no persistence — so a plain enum consumed through
//! `anyhow` at the CLI boundary is all the occasion calls for.

use std::fmt;

/// Errors raised by the chained-accumulator and engine internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollatzError {
    /// An internal invariant of the accu chain or an engine was violated.
    InvariantViolation { detail: String },
    /// A value was used where the chain expected a different limb width.
    TypeMismatch,
    /// An exponent of 3 exceeded what the target integer type can hold.
    Overflow { exponent: u64, limit: u64 },
}

impl fmt::Display for CollatzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollatzError::InvariantViolation { detail } => {
                write!(f, "collatz engine invariant violated: {detail}")
            }
            CollatzError::TypeMismatch => {
                write!(f, "mismatched limb width between chain and accumulator")
            }
            CollatzError::Overflow { exponent, limit } => write!(
                f,
                "exponent of 3 ({exponent}) exceeds representable limit ({limit})"
            ),
        }
    }
}

impl std::error::Error for CollatzError {}

pub type Result<T> = std::result::Result<T, CollatzError>;

//! Structured error types for the synthguard crates.

use thiserror::Error;

/// Unified error type for all synthguard operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthguardError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Sequence cannot be split into whole codons
    #[error("sequence length {len} is not a multiple of 3")]
    IncompleteCodon { len: usize },

    /// Triplet that has no entry in the genetic code (1-indexed position)
    #[error("undefined codon '{codon}' at position {position}")]
    UndefinedCodon { codon: String, position: usize },
}

/// Convenience alias used throughout the synthguard crates.
pub type Result<T> = std::result::Result<T, SynthguardError>;

//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! Every failure is signaled at the call that triggered it and propagates
//! to the caller; no operation leaves its receiver partially mutated.

use thiserror::Error;

/// Main error type for haplokit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HaplokitError {
    /// An index or half-open range outside `[0, len)`
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Two sequences of unequal length were combined or compared
    #[error("length mismatch: {left} vs {right} loci")]
    LengthMismatch { left: usize, right: usize },

    /// A construction value outside the valid call set
    /// (`{0, 1, 9}` for alleles, `{0, 1, 2, 9}` for dosages)
    #[error("invalid call value {value}")]
    InvalidAlleleValue { value: u8 },

    /// Malformed text in the space-separated decimal form
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration errors (thread pool construction)
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Type alias for Results using HaplokitError
pub type Result<T> = std::result::Result<T, HaplokitError>;

impl HaplokitError {
    /// Create an out-of-range error for an index against a sequence length
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a length mismatch error from two sequence lengths
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }

    /// Create an invalid call value error
    pub fn invalid_value(value: u8) -> Self {
        Self::InvalidAlleleValue { value }
    }

    /// Create a parse error with a message
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Check that `index` addresses a valid locus in a sequence of `len` loci.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(HaplokitError::index_out_of_range(index, len));
    }
    Ok(())
}

/// Check that `[start, end)` is a well-formed window into `len` loci.
///
/// `start > end` and `end > len` are both rejected as out-of-range.
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start > end {
        return Err(HaplokitError::index_out_of_range(start, len));
    }
    if end > len {
        return Err(HaplokitError::index_out_of_range(end, len));
    }
    Ok(())
}

/// Check that two sequence lengths agree before a pairwise operation.
pub(crate) fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(HaplokitError::length_mismatch(left, right));
    }
    Ok(())
}

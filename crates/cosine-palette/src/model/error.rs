//! Shape validation errors for coefficient and modifier input.

use thiserror::Error;

/// Raised when dynamically shaped palette data does not fit the fixed
/// 4x4 coefficient / 4-value modifier layout, or carries non-finite numbers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Coefficients must have exactly four rows
    #[error("expected 4 coefficient vectors, got {0}")]
    CoeffRows(usize),

    /// Every coefficient row must have four values
    #[error("coefficient vector {row} has {len} values (expected 4)")]
    CoeffColumns { row: usize, len: usize },

    /// Global modifiers must have exactly four values
    #[error("expected 4 global modifiers, got {0}")]
    GlobalsLength(usize),

    /// A value is NaN or infinite
    #[error("non-finite {what} value at index {index}")]
    NonFinite { what: &'static str, index: usize },
}

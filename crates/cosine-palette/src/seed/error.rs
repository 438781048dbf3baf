//! Seed decoding errors.

use thiserror::Error;

/// Raised when a seed string cannot be decoded into a palette.
///
/// [`is_valid_seed`](super::is_valid_seed) reports every one of these as
/// `false` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSeedError {
    /// Decompression produced nothing
    #[error("seed is empty")]
    Empty,

    /// The string is not a valid compressed payload
    #[error("seed could not be decompressed")]
    Decompress,

    /// Payload did not hold 12 or 16 numbers
    #[error("seed holds {0} values (expected 12 or 16)")]
    TokenCount(usize),

    /// A token is not a number
    #[error("seed value {index} is not a number: '{token}'")]
    InvalidToken { index: usize, token: String },

    /// A token parsed to NaN or infinity
    #[error("seed value {index} is not finite")]
    NonFinite { index: usize },
}

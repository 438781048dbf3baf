//! Unified error type for the cosine-palette public API.

use thiserror::Error;

use crate::color::ParseColorError;
use crate::model::ValidationError;
use crate::seed::InvalidSeedError;

/// Wraps every error the crate raises for convenient `?` propagation.
///
/// # Example
///
/// ```
/// use cosine_palette::{deserialize, serialize, PaletteError};
///
/// fn reencode(seed: &str) -> Result<String, PaletteError> {
///     let (coeffs, globals) = deserialize(seed)?;
///     Ok(serialize(&coeffs, &globals)?)
/// }
///
/// assert!(reencode("garbage").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("invalid palette: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid seed: {0}")]
    InvalidSeed(#[from] InvalidSeedError),

    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
}

use cosine_palette::{InvalidSeedError, PaletteError, ParseColorError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid preset '{name}': {reason}")]
    InvalidPreset { name: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No share_base_url configured")]
    MissingShareUrl,

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InvalidSeedError> for AppError {
    fn from(e: InvalidSeedError) -> Self {
        AppError::Palette(e.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Palette(e.into())
    }
}

impl From<ParseColorError> for AppError {
    fn from(e: ParseColorError) -> Self {
        AppError::Palette(e.into())
    }
}

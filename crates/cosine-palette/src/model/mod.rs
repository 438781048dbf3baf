//! Palette data model
//!
//! Fixed-shape value types for cosine palettes. Every transform in this
//! crate takes these by value or reference and returns a fresh copy.

mod coeffs;
mod error;
mod globals;

pub use coeffs::{Channel, CoeffVector, CosineCoeffs, Slot};
pub use error::ValidationError;
pub use globals::GlobalModifiers;

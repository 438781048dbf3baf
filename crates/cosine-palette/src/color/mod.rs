//! Color samples and hex conversion
//!
//! # Example
//!
//! ```
//! use cosine_palette::Rgb;
//!
//! let c: Rgb = "#336699".parse().unwrap();
//! assert_eq!(c.to_hex(), "#336699");
//! ```

mod error;
mod rgb;

pub use error::ParseColorError;
pub use rgb::{average_brightness, hex_to_rgb, rgb_to_hex, Rgb};

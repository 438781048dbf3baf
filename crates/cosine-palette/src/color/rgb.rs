//! RGB sample type
//!
//! Palette evaluation produces plain gamma-encoded sRGB channel values in
//! `0.0..=1.0`. No linearization happens anywhere in this crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseColorError;

/// A color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel (0.0..=1.0)
    pub r: f64,
    /// Green channel (0.0..=1.0)
    pub g: f64,
    /// Blue channel (0.0..=1.0)
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Rgb color from 8-bit values.
    ///
    /// # Example
    /// ```
    /// use cosine_palette::Rgb;
    /// let red = Rgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    #[inline]
    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to `[R, G, B]` bytes, rounding `x * 255` and clamping to 0..=255.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        let q = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Lowercase `#rrggbb` form.
    ///
    /// # Example
    /// ```
    /// use cosine_palette::Rgb;
    /// assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode(self.to_bytes()))
    }

    /// Rec. 601 luma on a 0..1 scale.
    #[inline]
    pub fn luma(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// ```
    /// use cosine_palette::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.r, 1.0);
    ///
    /// let red: Rgb = "#f00".parse().unwrap();
    /// assert_eq!(red.g, 0.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = match s.len() {
            // Shorthand: each digit doubles (F -> FF)
            3 => s.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => s.to_string(),
            _ => return Err(ParseColorError::InvalidLength),
        };

        let mut bytes = [0u8; 3];
        hex::decode_to_slice(&digits, &mut bytes)?;
        Ok(Self::from_u8(bytes[0], bytes[1], bytes[2]))
    }
}

/// Format a color as `#rrggbb`.
pub fn rgb_to_hex(color: Rgb) -> String {
    color.to_hex()
}

/// Parse a `#rrggbb` (or shorthand) string.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ParseColorError> {
    hex.parse()
}

/// Mean Rec. 601 luma of a list of hex colors, 0..1.
///
/// Entries that do not parse are skipped. An empty list, or one where
/// nothing parses, reports mid-gray (0.5).
pub fn average_brightness<S: AsRef<str>>(hexes: &[S]) -> f64 {
    let lumas: Vec<f64> = hexes
        .iter()
        .filter_map(|h| h.as_ref().parse::<Rgb>().ok())
        .map(Rgb::luma)
        .collect();

    if lumas.is_empty() {
        return 0.5;
    }
    lumas.iter().sum::<f64>() / lumas.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_rounds() {
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(Rgb::new(1.0, 1.0, 1.0).to_hex(), "#ffffff");
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(Rgb::new(0.5, 0.5, 0.5).to_hex(), "#808080");
        // Out-of-range values clamp rather than wrap
        assert_eq!(Rgb::new(1.2, -0.1, 0.0).to_hex(), "#ff0000");
    }

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Rgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Rgb::new(1.0, 1.0, 1.0));

        let black: Rgb = "000000".parse().unwrap();
        assert_eq!(black, Rgb::new(0.0, 0.0, 0.0));

        let color = hex_to_rgb("#1a2b3c").unwrap();
        assert_eq!(color.to_bytes(), [0x1a, 0x2b, 0x3c]);
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let color: Rgb = "#ABC".parse().unwrap();
        assert_eq!(color, Rgb::from_u8(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_case_insensitive() {
        let upper: Rgb = "#ABCDEF".parse().unwrap();
        let lower: Rgb = "#abcdef".parse().unwrap();
        let mixed: Rgb = "  #AbCdEf ".parse().unwrap();

        assert_eq!(upper, lower);
        assert_eq!(upper, mixed);
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGGGGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
    }

    #[test]
    fn test_hex_round_trip_all_bytes() {
        for v in 0..=255u8 {
            let c = Rgb::from_u8(v, 255 - v, v / 2);
            let back: Rgb = c.to_hex().parse().unwrap();
            assert_eq!(back.to_bytes(), c.to_bytes());
        }
    }

    #[test]
    fn test_hex_parsing_agrees_with_palette_crate() {
        use palette::Srgb;

        for hex in ["#000000", "#ff8000", "#12ab9f", "#FEDCBA"] {
            let ours: Rgb = hex.parse().unwrap();
            let theirs: Srgb<u8> = hex.parse().unwrap();
            assert_eq!(ours.to_bytes(), [theirs.red, theirs.green, theirs.blue]);
        }
    }

    #[test]
    fn test_average_brightness() {
        assert_eq!(average_brightness::<&str>(&[]), 0.5);
        assert!((average_brightness(&["#ffffff"]) - 1.0).abs() < 1e-12);
        assert!(average_brightness(&["#000000"]).abs() < 1e-12);

        let mixed = average_brightness(&["#ffffff", "#000000"]);
        assert!((mixed - 0.5).abs() < 1e-12);

        // Pure green carries most of the luma weight
        assert!((average_brightness(&["#00ff00"]) - 0.587).abs() < 1e-12);
    }

    #[test]
    fn test_average_brightness_skips_garbage() {
        assert!((average_brightness(&["#ffffff", "nope"]) - 1.0).abs() < 1e-12);
        assert_eq!(average_brightness(&["nope"]), 0.5);
    }
}

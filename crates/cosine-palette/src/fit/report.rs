//! Fit quality report.

use serde::Serialize;

use crate::color::Rgb;
use crate::model::CosineCoeffs;
use crate::sampler::{evaluate, sample_position};

/// Error of a fitted palette at one of the target colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorError {
    /// Position in the target list
    pub index: usize,
    /// Palette position the target was fitted at
    pub t: f64,
    /// Target color as `#rrggbb`
    pub target: String,
    /// Fitted color as `#rrggbb`
    pub fitted: String,
    /// Absolute per-channel error on a 0..255 scale
    pub delta: [f64; 3],
}

impl ColorError {
    /// Largest channel error.
    pub fn max(&self) -> f64 {
        self.delta.iter().copied().fold(0.0, f64::max)
    }
}

/// Per-color errors of a fit, with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub colors: Vec<ColorError>,
    /// Mean channel error over all colors (0..255)
    pub mean_error: f64,
    /// Largest channel error over all colors (0..255)
    pub max_error: f64,
}

impl FitReport {
    /// True when every channel of every color is within `tolerance` (0..255).
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_error < tolerance
    }
}

/// Re-evaluate `coeffs` at each target's position and measure the error.
pub fn validate_fit(coeffs: &CosineCoeffs, targets: &[Rgb]) -> FitReport {
    let n = targets.len();
    let colors: Vec<ColorError> = targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let t = sample_position(index, n);
            let fitted = evaluate(coeffs, t);
            let f = fitted.to_array();
            let e = target.to_array();
            ColorError {
                index,
                t,
                target: target.to_hex(),
                fitted: fitted.to_hex(),
                delta: [0, 1, 2].map(|i| ((f[i] - e[i]) * 255.0).abs()),
            }
        })
        .collect();

    let channel_count = (colors.len() * 3).max(1) as f64;
    let mean_error = colors.iter().flat_map(|c| c.delta).sum::<f64>() / channel_count;
    let max_error = colors.iter().map(ColorError::max).fold(0.0, f64::max);

    FitReport {
        colors,
        mean_error,
        max_error,
    }
}

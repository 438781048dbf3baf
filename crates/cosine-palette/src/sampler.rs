//! Forward evaluation of cosine palettes.

use std::f64::consts::TAU;

use crate::color::Rgb;
use crate::model::{Channel, CosineCoeffs};

/// Evaluate one channel: `offset + amplitude * cos(2π(frequency * t + phase))`.
#[inline]
pub fn channel_value(params: [f64; 4], t: f64) -> f64 {
    let [offset, amplitude, frequency, phase] = params;
    offset + amplitude * (TAU * (frequency * t + phase)).cos()
}

/// Evaluate the palette at `t` without clamping.
///
/// Used where the raw model output matters, e.g. comparing two palettes
/// for exact equivalence.
pub fn evaluate_raw(coeffs: &CosineCoeffs, t: f64) -> [f64; 3] {
    Channel::ALL.map(|ch| channel_value(coeffs.channel_params(ch), t))
}

/// Evaluate the palette at `t`, clamping every channel to `0.0..=1.0`.
pub fn evaluate(coeffs: &CosineCoeffs, t: f64) -> Rgb {
    Rgb::from_array(evaluate_raw(coeffs, t).map(|v| v.clamp(0.0, 1.0)))
}

/// Position of sample `index` out of `steps` evenly spaced samples.
///
/// A single sample sits at `t = 0`; otherwise the first sample is at 0 and
/// the last at 1.
#[inline]
pub fn sample_position(index: usize, steps: usize) -> f64 {
    if steps <= 1 {
        0.0
    } else {
        index as f64 / (steps - 1) as f64
    }
}

/// Sample `steps` evenly spaced colors from the palette.
///
/// # Example
///
/// ```
/// use cosine_palette::{sample, CosineCoeffs};
///
/// let colors = sample(3, &CosineCoeffs::default());
/// assert_eq!(colors.len(), 3);
/// ```
pub fn sample(steps: usize, coeffs: &CosineCoeffs) -> Vec<Rgb> {
    (0..steps)
        .map(|i| evaluate(coeffs, sample_position(i, steps)))
        .collect()
}

/// Sample from dynamically shaped coefficient rows.
///
/// Rows that are not 4x4 produce an empty sequence instead of an error, so
/// callers rendering untrusted data never have to branch.
pub fn sample_rows<R: AsRef<[f64]>>(steps: usize, rows: &[R]) -> Vec<Rgb> {
    match CosineCoeffs::try_from_rows(rows) {
        Ok(coeffs) => sample(steps, &coeffs),
        Err(_) => Vec::new(),
    }
}

/// Sample `steps` colors as `#rrggbb` strings.
pub fn sample_hex(steps: usize, coeffs: &CosineCoeffs) -> Vec<String> {
    sample(steps, coeffs).into_iter().map(Rgb::to_hex).collect()
}

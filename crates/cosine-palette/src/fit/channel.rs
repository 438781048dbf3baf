//! Single-channel least-squares fit over the frequency grid.

use std::f64::consts::TAU;

use super::solve::solve3;
use crate::sampler::channel_value;

/// Amplitudes below this are treated as zero and get phase 0.
const ZERO_AMPLITUDE: f64 = 1e-10;

/// Half-width of the refinement window around the best grid frequency.
const REFINE_RADIUS: f64 = 0.1;

/// Golden-section iterations for refinement (window shrinks by ~0.618 each).
const REFINE_ITERATIONS: usize = 40;

pub const MIN_OFFSET: f64 = 0.0;
pub const MAX_OFFSET: f64 = 1.0;
pub const MAX_AMPLITUDE: f64 = 0.6;
pub const MIN_FREQUENCY: f64 = 0.1;
pub const MAX_FREQUENCY: f64 = 3.0;

/// Candidate frequencies: 0.3 to 2.5 in steps of 0.1 (23 values).
pub fn frequency_grid() -> impl Iterator<Item = f64> {
    (3..=25).map(|i| i as f64 / 10.0)
}

/// Parameters recovered for one channel, with their squared error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelFit {
    pub offset: f64,
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
    pub error: f64,
}

impl ChannelFit {
    /// Clamp into the ranges the palette model expects and wrap the phase
    /// into `[0, 1)`.
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset.clamp(MIN_OFFSET, MAX_OFFSET),
            amplitude: self.amplitude.clamp(-MAX_AMPLITUDE, MAX_AMPLITUDE),
            frequency: self.frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY),
            phase: wrap_unit(self.phase),
            error: self.error,
        }
    }
}

/// Wrap into `[0, 1)`.
pub fn wrap_unit(v: f64) -> f64 {
    let w = v.rem_euclid(1.0);
    // rem_euclid of a tiny negative can round up to exactly 1.0
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.5
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Best linear fit at a fixed frequency, clamped into model ranges.
///
/// For fixed `c`, `a + b·cos(2π(ct + d))` equals `A + B·cos(2πct) + C·sin(2πct)`,
/// so (A, B, C) come from the 3x3 normal equations. A singular system falls
/// back to the flat fit `[mean, 0, 0]`.
///
/// The error is measured on the clamped parameters, so a candidate that only
/// fits with an out-of-range offset or amplitude scores what it will render.
pub fn fit_at_frequency(ts: &[f64], ys: &[f64], frequency: f64) -> ChannelFit {
    let mut m = [[0.0; 3]; 3];
    let mut rhs = [0.0; 3];

    for (&t, &y) in ts.iter().zip(ys) {
        let angle = TAU * frequency * t;
        let row = [1.0, angle.cos(), angle.sin()];
        for i in 0..3 {
            for j in 0..3 {
                m[i][j] += row[i] * row[j];
            }
            rhs[i] += row[i] * y;
        }
    }

    let [a, b_cos, c_sin] = solve3(&m, &rhs).unwrap_or([mean(ys), 0.0, 0.0]);

    let amplitude = b_cos.hypot(c_sin);
    let phase = if amplitude < ZERO_AMPLITUDE {
        0.0
    } else {
        (-c_sin).atan2(b_cos) / TAU
    };

    let fit = ChannelFit {
        offset: a,
        amplitude,
        frequency,
        phase,
        error: 0.0,
    }
    .clamped();

    let params = [fit.offset, fit.amplitude, fit.frequency, fit.phase];
    let error = ts
        .iter()
        .zip(ys)
        .map(|(&t, &y)| {
            let diff = channel_value(params, t) - y;
            diff * diff
        })
        .sum();

    ChannelFit { error, ..fit }
}

/// Scan the frequency grid and keep the lowest-error candidate.
///
/// Ties keep the earlier (lower) frequency.
pub fn fit_channel(ts: &[f64], ys: &[f64]) -> ChannelFit {
    let mut best: Option<ChannelFit> = None;
    for frequency in frequency_grid() {
        let candidate = fit_at_frequency(ts, ys, frequency);
        tracing::trace!(frequency, error = candidate.error, "fit candidate");
        if best.map_or(true, |b| candidate.error < b.error) {
            best = Some(candidate);
        }
    }
    // The grid is never empty
    best.unwrap_or_else(|| fit_at_frequency(ts, ys, 1.0))
}

/// Golden-section search for a better frequency near `start`.
///
/// Only returns a result when it beats `start`; otherwise the grid
/// candidate stands.
pub fn refine_channel(ts: &[f64], ys: &[f64], start: ChannelFit) -> ChannelFit {
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;

    let mut lo = (start.frequency - REFINE_RADIUS).max(MIN_FREQUENCY);
    let mut hi = (start.frequency + REFINE_RADIUS).min(MAX_FREQUENCY);
    let mut x1 = hi - inv_phi * (hi - lo);
    let mut x2 = lo + inv_phi * (hi - lo);
    let mut f1 = fit_at_frequency(ts, ys, x1);
    let mut f2 = fit_at_frequency(ts, ys, x2);

    for _ in 0..REFINE_ITERATIONS {
        if f1.error < f2.error {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - inv_phi * (hi - lo);
            f1 = fit_at_frequency(ts, ys, x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + inv_phi * (hi - lo);
            f2 = fit_at_frequency(ts, ys, x2);
        }
    }

    let refined = if f1.error < f2.error { f1 } else { f2 };
    if refined.error < start.error {
        tracing::trace!(
            from = start.frequency,
            to = refined.frequency,
            "refined channel frequency"
        );
        refined
    } else {
        start
    }
}

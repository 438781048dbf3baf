//! Least-squares palette fitting
//!
//! Recovers cosine palette coefficients from an ordered list of target
//! colors. Target `i` of `N` is placed at `t = i / (N - 1)`.
//!
//! Each channel is fitted independently. Frequency is the only nonlinear
//! parameter, so it is scanned over a fixed 23-point grid (0.3..=2.5, step
//! 0.1); for each candidate the remaining parameters are the closed-form
//! solution of a 3x3 normal-equation system. The lowest squared error wins.
//! Cost is `O(3 * 23 * N)` and the result is fully deterministic.
//!
//! Fitted values are clamped to offset `[0, 1]`, amplitude `[-0.6, 0.6]`,
//! frequency `[0.1, 3]` and phase `[0, 1)`.
//!
//! # Example
//!
//! ```
//! use cosine_palette::{fit_hex, validate_fit, Rgb};
//!
//! let colors = ["#ff0000", "#00ff00", "#0000ff", "#ff0000"];
//! let coeffs = fit_hex(&colors).unwrap();
//!
//! let targets: Vec<Rgb> = colors.iter().map(|c| c.parse().unwrap()).collect();
//! let report = validate_fit(&coeffs, &targets);
//! assert_eq!(report.colors.len(), 4);
//! ```

mod channel;
mod report;
mod solve;

pub use channel::frequency_grid;
pub use report::{validate_fit, ColorError, FitReport};
pub use solve::{solve3, SINGULAR_DETERMINANT};

use crate::color::{ParseColorError, Rgb};
use crate::model::{Channel, CoeffVector, CosineCoeffs};
use crate::sampler::sample_position;
use channel::{fit_channel, refine_channel, ChannelFit};

/// Fitting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitOptions {
    /// Run a golden-section search around the best grid frequency.
    ///
    /// The refined frequency is only kept when it lowers the error, so the
    /// grid result is always the floor. Off by default.
    pub refine: bool,
}

impl FitOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn refine(mut self, enabled: bool) -> Self {
        self.refine = enabled;
        self
    }
}

/// Fit coefficients to `targets` with default options.
pub fn fit(targets: &[Rgb]) -> CosineCoeffs {
    fit_with(targets, &FitOptions::default())
}

/// Fit coefficients to `targets`.
///
/// Never fails: fewer than three targets simply yield a flatter palette.
pub fn fit_with(targets: &[Rgb], options: &FitOptions) -> CosineCoeffs {
    let n = targets.len();
    let ts: Vec<f64> = (0..n).map(|i| sample_position(i, n)).collect();

    let fits = Channel::ALL.map(|channel| {
        let ys: Vec<f64> = targets.iter().map(|c| c.to_array()[channel.index()]).collect();
        let mut best = fit_channel(&ts, &ys);
        if options.refine {
            best = refine_channel(&ts, &ys, best);
        }
        tracing::debug!(
            ?channel,
            frequency = best.frequency,
            error = best.error,
            "fitted channel"
        );
        best.clamped()
    });

    CosineCoeffs::new(
        assemble(&fits, |f| f.offset),
        assemble(&fits, |f| f.amplitude),
        assemble(&fits, |f| f.frequency),
        assemble(&fits, |f| f.phase),
    )
}

fn assemble(fits: &[ChannelFit; 3], pick: impl Fn(&ChannelFit) -> f64) -> CoeffVector {
    CoeffVector::new(pick(&fits[0]), pick(&fits[1]), pick(&fits[2]))
}

/// Parse hex colors and fit them.
pub fn fit_hex<S: AsRef<str>>(hexes: &[S]) -> Result<CosineCoeffs, ParseColorError> {
    fit_hex_with(hexes, &FitOptions::default())
}

/// Parse hex colors and fit them with `options`.
pub fn fit_hex_with<S: AsRef<str>>(
    hexes: &[S],
    options: &FitOptions,
) -> Result<CosineCoeffs, ParseColorError> {
    let targets = hexes
        .iter()
        .map(|h| h.as_ref().parse::<Rgb>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(fit_with(&targets, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::sample;

    fn known() -> CosineCoeffs {
        CosineCoeffs::new(
            CoeffVector::new(0.5, 0.45, 0.55),
            CoeffVector::new(0.4, 0.3, 0.35),
            CoeffVector::new(1.0, 1.0, 1.0),
            CoeffVector::new(0.1, 0.3, 0.6),
        )
    }

    #[test]
    fn test_recovers_known_palette_within_5() {
        for n in [5usize, 8, 16] {
            let hexes: Vec<String> = sample(n, &known()).iter().map(|c| c.to_hex()).collect();
            let targets: Vec<Rgb> = hexes.iter().map(|h| h.parse().unwrap()).collect();

            let coeffs = fit_hex(&hexes).unwrap();
            let report = validate_fit(&coeffs, &targets);
            assert!(
                report.within(5.0),
                "n={n}: max error {} exceeds 5/255",
                report.max_error
            );
        }
    }

    #[test]
    fn test_three_key_colors_within_5() {
        let hexes: Vec<String> = sample(3, &CosineCoeffs::default())
            .iter()
            .map(|c| c.to_hex())
            .collect();
        let targets: Vec<Rgb> = hexes.iter().map(|h| h.parse().unwrap()).collect();

        for options in [FitOptions::new(), FitOptions::new().refine(true)] {
            let coeffs = fit_hex_with(&hexes, &options).unwrap();
            let report = validate_fit(&coeffs, &targets);
            assert!(
                report.within(5.0),
                "refine={}: max error {} exceeds 5/255",
                options.refine,
                report.max_error
            );
        }
    }

    #[test]
    fn test_output_alpha_and_ranges() {
        let targets = sample(6, &CosineCoeffs::default());
        let coeffs = fit(&targets);
        for vector in [coeffs.offset, coeffs.amplitude, coeffs.frequency, coeffs.phase] {
            assert_eq!(vector.alpha, 1.0);
        }
        for v in coeffs.offset.rgb() {
            assert!((0.0..=1.0).contains(&v));
        }
        for v in coeffs.amplitude.rgb() {
            assert!((-0.6..=0.6).contains(&v));
        }
        for v in coeffs.frequency.rgb() {
            assert!((0.1..=3.0).contains(&v));
        }
        for v in coeffs.phase.rgb() {
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_deterministic() {
        let targets = sample(7, &known());
        assert_eq!(fit(&targets), fit(&targets));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let single = fit(&[Rgb::new(0.2, 0.4, 0.6)]);
        assert!((single.offset.r - 0.2).abs() < 1e-9);
        assert!((single.offset.b - 0.6).abs() < 1e-9);

        let empty = fit(&[]);
        assert_eq!(empty.offset, CoeffVector::splat(0.5));
        assert_eq!(empty.amplitude, CoeffVector::splat(0.0));
    }

    #[test]
    fn test_refine_keeps_recovery() {
        let targets: Vec<Rgb> = sample(8, &known())
            .iter()
            .map(|c| c.to_hex().parse().unwrap())
            .collect();

        let options = FitOptions::new().refine(true);
        let report = validate_fit(&fit_with(&targets, &options), &targets);
        assert!(report.within(5.0), "max error {}", report.max_error);
    }

    #[test]
    fn test_fit_hex_rejects_bad_color() {
        assert!(fit_hex(&["#000000", "nothex", "#ffffff"]).is_err());
    }
}

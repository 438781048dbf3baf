//! Global modifier application, inversion and taring.
//!
//! Globals are applied uniformly on top of the base coefficients:
//!
//! | Slot      | Global            | Combination   |
//! |-----------|-------------------|---------------|
//! | offset    | `exposure`        | `a + g`       |
//! | amplitude | `contrast`        | `b * g`       |
//! | frequency | `frequency_scale` | `c * g`       |
//! | phase     | `phase_shift`     | `d + g`       |
//!
//! Only the color channels are touched; alpha always passes through.
//!
//! A multiplicative global of zero has no inverse. Inversions and tares that
//! would divide by zero leave the base value untouched instead of producing
//! infinities.

use crate::model::{Channel, CosineCoeffs, GlobalModifiers, Slot};

/// Divisors smaller than this are treated as zero.
const MIN_DIVISOR: f64 = f64::EPSILON;

#[inline]
fn combine(slot: Slot, base: f64, global: f64) -> f64 {
    if slot.is_additive() {
        base + global
    } else {
        base * global
    }
}

#[inline]
fn uncombine(slot: Slot, value: f64, global: f64) -> f64 {
    if slot.is_additive() {
        value - global
    } else if global.abs() < MIN_DIVISOR {
        value
    } else {
        value / global
    }
}

/// Apply all four globals onto the coefficients.
///
/// # Example
///
/// ```
/// use cosine_palette::{apply_globals, CosineCoeffs, GlobalModifiers};
///
/// let base = CosineCoeffs::default();
/// let brighter = apply_globals(&base, &GlobalModifiers::new(0.1, 1.0, 1.0, 0.0));
/// assert!((brighter.offset.r - 0.6).abs() < 1e-12);
/// assert_eq!(brighter.offset.alpha, 1.0);
/// ```
pub fn apply_globals(coeffs: &CosineCoeffs, globals: &GlobalModifiers) -> CosineCoeffs {
    Slot::ALL.iter().fold(*coeffs, |acc, &slot| {
        let g = globals.get(slot);
        let vector = coeffs.vector(slot).map_rgb(|v| combine(slot, v, g));
        acc.with_vector(slot, vector)
    })
}

/// Full inverse of [`apply_globals`]: recover base coefficients from
/// globally modified ones.
pub fn normalize_to_defaults(coeffs: &CosineCoeffs, globals: &GlobalModifiers) -> CosineCoeffs {
    Slot::ALL.iter().fold(*coeffs, |acc, &slot| {
        let g = globals.get(slot);
        let vector = coeffs.vector(slot).map_rgb(|v| uncombine(slot, v, g));
        acc.with_vector(slot, vector)
    })
}

/// Base value that produces the displayed `value` once the slot's global
/// is applied.
///
/// Additive slots subtract the global, multiplicative slots divide by it.
pub fn invert_global(slot: Slot, value: f64, globals: &GlobalModifiers) -> f64 {
    uncombine(slot, value, globals.get(slot))
}

/// Replace one base coefficient so that, with the current globals applied,
/// it displays as `display_value`.
///
/// This is what an editor does when the user drags a slider showing the
/// modified value.
pub fn update_slot_with_inverse(
    coeffs: &CosineCoeffs,
    slot: Slot,
    channel: Channel,
    display_value: f64,
    globals: &GlobalModifiers,
) -> CosineCoeffs {
    let base = invert_global(slot, display_value, globals);
    coeffs.with_value(slot, channel, base)
}

/// Fold the global for `slot` into the base coefficients and reset it to
/// `default_value`, keeping the rendered output identical.
///
/// Returns the inputs unchanged when the global already equals
/// `default_value`, or when a multiplicative slot is asked to tare onto a
/// zero default.
///
/// # Example
///
/// ```
/// use cosine_palette::{apply_globals, tare, CosineCoeffs, GlobalModifiers, Slot};
///
/// let coeffs = CosineCoeffs::default();
/// let globals = GlobalModifiers::new(0.0, 0.5, 1.0, 0.0);
/// let (tared, tared_globals) = tare(&coeffs, &globals, Slot::Amplitude, 1.0);
///
/// assert_eq!(tared_globals.contrast, 1.0);
/// assert!((tared.amplitude.r - 0.25).abs() < 1e-12);
/// assert_eq!(
///     apply_globals(&tared, &tared_globals),
///     apply_globals(&coeffs, &globals),
/// );
/// ```
pub fn tare(
    coeffs: &CosineCoeffs,
    globals: &GlobalModifiers,
    slot: Slot,
    default_value: f64,
) -> (CosineCoeffs, GlobalModifiers) {
    let current = globals.get(slot);
    if current == default_value {
        return (*coeffs, *globals);
    }
    if !slot.is_additive() && default_value.abs() < MIN_DIVISOR {
        tracing::debug!(%slot, "cannot tare a multiplicative slot onto zero");
        return (*coeffs, *globals);
    }

    let vector = coeffs.vector(slot).map_rgb(|old| {
        if slot.is_additive() {
            old + current - default_value
        } else {
            old * current / default_value
        }
    });

    (
        coeffs.with_vector(slot, vector),
        globals.with(slot, default_value),
    )
}

/// Tare every slot back to its identity global.
pub fn tare_all(coeffs: &CosineCoeffs, globals: &GlobalModifiers) -> (CosineCoeffs, GlobalModifiers) {
    Slot::ALL
        .iter()
        .fold((*coeffs, *globals), |(c, g), &slot| {
            tare(&c, &g, slot, slot.identity())
        })
}

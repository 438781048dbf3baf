//! Global modifiers applied uniformly across all channels.

use serde::{Deserialize, Serialize};

use super::coeffs::Slot;
use super::error::ValidationError;

/// Four global adjustments, one per coefficient slot.
///
/// `exposure` and `phase_shift` are added to the offset and phase vectors,
/// `contrast` and `frequency_scale` multiply the amplitude and frequency
/// vectors. [`GlobalModifiers::IDENTITY`] leaves a palette unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalModifiers {
    pub exposure: f64,
    pub contrast: f64,
    pub frequency_scale: f64,
    pub phase_shift: f64,
}

impl Default for GlobalModifiers {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GlobalModifiers {
    /// Exposure 0, contrast 1, frequency scale 1, phase shift 0.
    pub const IDENTITY: GlobalModifiers = GlobalModifiers {
        exposure: 0.0,
        contrast: 1.0,
        frequency_scale: 1.0,
        phase_shift: 0.0,
    };

    #[inline]
    pub fn new(exposure: f64, contrast: f64, frequency_scale: f64, phase_shift: f64) -> Self {
        Self {
            exposure,
            contrast,
            frequency_scale,
            phase_shift,
        }
    }

    #[inline]
    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [
            self.exposure,
            self.contrast,
            self.frequency_scale,
            self.phase_shift,
        ]
    }

    /// Build from a dynamically sized slice, which must hold exactly four values.
    pub fn try_from_slice(values: &[f64]) -> Result<Self, ValidationError> {
        let array: [f64; 4] = values
            .try_into()
            .map_err(|_| ValidationError::GlobalsLength(values.len()))?;
        Ok(Self::from_array(array))
    }

    /// The modifier bound to `slot`.
    #[inline]
    pub fn get(&self, slot: Slot) -> f64 {
        self.to_array()[slot.index()]
    }

    /// Copy with the modifier bound to `slot` replaced.
    #[inline]
    pub fn with(self, slot: Slot, value: f64) -> Self {
        let mut values = self.to_array();
        values[slot.index()] = value;
        Self::from_array(values)
    }

    /// True when every modifier is within `epsilon` of the identity.
    pub fn is_identity_within(&self, epsilon: f64) -> bool {
        self.to_array()
            .iter()
            .zip(Self::IDENTITY.to_array())
            .all(|(v, id)| (v - id).abs() < epsilon)
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

//! Cosine palette coefficients
//!
//! A palette is four parameter vectors evaluated per channel as
//! `offset + amplitude * cos(2π * (frequency * t + phase))`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// One of the three color channels a coefficient vector carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel inside a vector (0 = red).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Which of the four parameter vectors (and its matching global) is meant.
///
/// Slots are ordered the same way in [`CosineCoeffs`] and in
/// [`GlobalModifiers`](super::GlobalModifiers): offset pairs with exposure,
/// amplitude with contrast, frequency with frequency scale and phase with
/// phase shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Offset,
    Amplitude,
    Frequency,
    Phase,
}

impl Slot {
    /// All slots in storage order.
    pub const ALL: [Slot; 4] = [Slot::Offset, Slot::Amplitude, Slot::Frequency, Slot::Phase];

    /// Position of the slot (0 = offset).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::Offset => 0,
            Slot::Amplitude => 1,
            Slot::Frequency => 2,
            Slot::Phase => 3,
        }
    }

    /// Slot for a storage position, if in range.
    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    /// Additive slots combine with their global by addition, the others
    /// by multiplication.
    #[inline]
    pub fn is_additive(self) -> bool {
        matches!(self, Slot::Offset | Slot::Phase)
    }

    /// The global value that leaves this slot unchanged.
    #[inline]
    pub fn identity(self) -> f64 {
        if self.is_additive() {
            0.0
        } else {
            1.0
        }
    }

    /// Name of the global modifier bound to this slot.
    pub fn global_name(self) -> &'static str {
        match self {
            Slot::Offset => "exposure",
            Slot::Amplitude => "contrast",
            Slot::Frequency => "frequency_scale",
            Slot::Phase => "phase_shift",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Offset => "offset",
            Slot::Amplitude => "amplitude",
            Slot::Frequency => "frequency",
            Slot::Phase => "phase",
        };
        f.write_str(name)
    }
}

impl FromStr for Slot {
    type Err = String;

    /// Accepts either the vector name or the name of its global
    /// (`exposure`, `contrast`, `frequency_scale`, `phase_shift`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "offset" | "a" | "exposure" => Ok(Slot::Offset),
            "amplitude" | "b" | "contrast" => Ok(Slot::Amplitude),
            "frequency" | "c" | "frequency_scale" | "frequencyscale" => Ok(Slot::Frequency),
            "phase" | "d" | "phase_shift" | "phaseshift" => Ok(Slot::Phase),
            other => Err(format!("unknown slot '{other}'")),
        }
    }
}

/// One parameter vector: a value per color channel plus the alpha slot.
///
/// Alpha is carried through every transform untouched and is 1 for all
/// authored, fitted and decoded palettes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoeffVector {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl CoeffVector {
    /// Create a vector with alpha set to 1.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Same value on all three channels.
    #[inline]
    pub fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            r: values[0],
            g: values[1],
            b: values[2],
            alpha: values[3],
        }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.alpha]
    }

    /// The three color channels, alpha excluded.
    #[inline]
    pub fn rgb(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn channel(self, channel: Channel) -> f64 {
        self.rgb()[channel.index()]
    }

    /// Copy of this vector with one channel replaced.
    #[inline]
    pub fn with_channel(self, channel: Channel, value: f64) -> Self {
        match channel {
            Channel::Red => Self { r: value, ..self },
            Channel::Green => Self { g: value, ..self },
            Channel::Blue => Self { b: value, ..self },
        }
    }

    /// Apply `f` to the color channels, leaving alpha alone.
    #[inline]
    pub fn map_rgb(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            alpha: self.alpha,
        }
    }
}

/// A complete cosine palette: offset, amplitude, frequency and phase vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosineCoeffs {
    pub offset: CoeffVector,
    pub amplitude: CoeffVector,
    pub frequency: CoeffVector,
    pub phase: CoeffVector,
}

impl Default for CosineCoeffs {
    /// The classic rainbow palette.
    fn default() -> Self {
        Self {
            offset: CoeffVector::splat(0.5),
            amplitude: CoeffVector::splat(0.5),
            frequency: CoeffVector::splat(1.0),
            phase: CoeffVector::new(0.0, 0.333, 0.667),
        }
    }
}

impl CosineCoeffs {
    #[inline]
    pub fn new(
        offset: CoeffVector,
        amplitude: CoeffVector,
        frequency: CoeffVector,
        phase: CoeffVector,
    ) -> Self {
        Self {
            offset,
            amplitude,
            frequency,
            phase,
        }
    }

    /// Build from four `[r, g, b, alpha]` rows in slot order.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self {
            offset: CoeffVector::from_array(rows[0]),
            amplitude: CoeffVector::from_array(rows[1]),
            frequency: CoeffVector::from_array(rows[2]),
            phase: CoeffVector::from_array(rows[3]),
        }
    }

    /// Four `[r, g, b, alpha]` rows in slot order.
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        [
            self.offset.to_array(),
            self.amplitude.to_array(),
            self.frequency.to_array(),
            self.phase.to_array(),
        ]
    }

    /// Build from dynamically shaped rows, checking for exactly four rows
    /// of four values.
    pub fn try_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ValidationError> {
        if rows.len() != 4 {
            return Err(ValidationError::CoeffRows(rows.len()));
        }
        let mut out = [[0.0; 4]; 4];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != 4 {
                return Err(ValidationError::CoeffColumns {
                    row: i,
                    len: row.len(),
                });
            }
            out[i].copy_from_slice(row);
        }
        Ok(Self::from_rows(out))
    }

    #[inline]
    pub fn vector(&self, slot: Slot) -> CoeffVector {
        match slot {
            Slot::Offset => self.offset,
            Slot::Amplitude => self.amplitude,
            Slot::Frequency => self.frequency,
            Slot::Phase => self.phase,
        }
    }

    /// Copy with one vector replaced.
    #[inline]
    pub fn with_vector(self, slot: Slot, vector: CoeffVector) -> Self {
        match slot {
            Slot::Offset => Self {
                offset: vector,
                ..self
            },
            Slot::Amplitude => Self {
                amplitude: vector,
                ..self
            },
            Slot::Frequency => Self {
                frequency: vector,
                ..self
            },
            Slot::Phase => Self {
                phase: vector,
                ..self
            },
        }
    }

    /// Copy with a single channel of one vector replaced.
    #[inline]
    pub fn with_value(self, slot: Slot, channel: Channel, value: f64) -> Self {
        let vector = self.vector(slot).with_channel(channel, value);
        self.with_vector(slot, vector)
    }

    /// The parameters of one channel as `(offset, amplitude, frequency, phase)`.
    #[inline]
    pub fn channel_params(&self, channel: Channel) -> [f64; 4] {
        [
            self.offset.channel(channel),
            self.amplitude.channel(channel),
            self.frequency.channel(channel),
            self.phase.channel(channel),
        ]
    }

    /// The twelve color parameters in slot-major order, alpha excluded.
    pub fn color_values(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        for (i, slot) in Slot::ALL.iter().enumerate() {
            out[i * 3..i * 3 + 3].copy_from_slice(&self.vector(*slot).rgb());
        }
        out
    }

    /// Inverse of [`color_values`](Self::color_values); alpha is set to 1.
    pub fn from_color_values(values: [f64; 12]) -> Self {
        let v = |i: usize| CoeffVector::new(values[i * 3], values[i * 3 + 1], values[i * 3 + 2]);
        Self::new(v(0), v(1), v(2), v(3))
    }

    /// True when every parameter, alpha included, is finite.
    pub fn is_finite(&self) -> bool {
        self.to_rows().iter().flatten().all(|v| v.is_finite())
    }
}

//! Rounding mode and rounding precision controls.
//!
//! The encodings follow the x87 control word:
//!
//! | Value | Mode | Description                |
//! |-------|------|----------------------------|
//! | 0b00  | RN   | Round to Nearest, ties to Even |
//! | 0b01  | RD   | Round Down (towards −∞)    |
//! | 0b10  | RU   | Round Up (towards +∞)      |
//! | 0b11  | RZ   | Round towards Zero (chop)  |
//!
//! Rounding precision applies to the extended format only: results are
//! rounded as if to a 24-bit or 53-bit significand but still packed into
//! the 80-bit encoding.

use serde::Deserialize;

/// Rounding mode, encoded as the x87 RC field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    NearestEven = 0b00,
    /// Round Down (towards −∞).
    Down = 0b01,
    /// Round Up (towards +∞).
    Up = 0b10,
    /// Round towards Zero.
    TowardZero = 0b11,
}

impl RoundingMode {
    /// Decodes a 2-bit RC field from a control word.
    ///
    /// All four encodings are defined, so this never fails; only the low
    /// two bits of `bits` are examined.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0b00 => Self::NearestEven,
            0b01 => Self::Down,
            0b10 => Self::Up,
            _ => Self::TowardZero,
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        Self::NearestEven
    }
}

/// Rounding precision for extended-format results, per the x87 PC field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoundingPrecision {
    /// Round the significand to 24 bits (single).
    Single = 0b00,
    /// Round the significand to 53 bits (double).
    Double = 0b10,
    /// Keep the full 64-bit significand.
    Extended = 0b11,
}

impl RoundingPrecision {
    /// Decodes a 2-bit PC field from a control word.
    ///
    /// Returns `None` for the reserved encoding 0b01.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x3 {
            0b00 => Some(Self::Single),
            0b10 => Some(Self::Double),
            0b11 => Some(Self::Extended),
            _ => None, // 0b01 reserved
        }
    }
}

impl Default for RoundingPrecision {
    fn default() -> Self {
        Self::Extended
    }
}

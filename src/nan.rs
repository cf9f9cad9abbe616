//! NaN encodings, predicates, and propagation.
//!
//! NaNs are partitioned by the top fraction bit: set means quiet, clear
//! (with a nonzero payload below it) means signaling. The extended format
//! keys off bit 62, the bit immediately below the explicit integer bit.
//!
//! - **Default NaN**: the fixed pattern produced when an operation invents
//!   a NaN from non-NaN inputs (0×∞, ∞−∞, 0/0, ∞/∞, √negative, ...):
//!   positive sign, quiet bit set, payload zero.
//! - **Propagation**: when one or both inputs are NaN, the first operand's
//!   NaN is preferred, any signaling input raises `invalid`, and the chosen
//!   NaN is returned with its quiet bit forced.
//! - **Conversion**: NaNs cross formats through a [`CommonNan`]
//!   intermediate that preserves the sign and the top payload bits and
//!   always emerges quiet.

use crate::double::Float64;
use crate::exceptions::ExceptionFlags;
use crate::extended::FloatX80;
use crate::single::Float32;
use crate::status::Status;

/// Default quiet NaN for binary32.
pub const DEFAULT_NAN_32: u32 = 0x7FC0_0000;

/// Default quiet NaN for binary64.
pub const DEFAULT_NAN_64: u64 = 0x7FF8_0000_0000_0000;

/// Default quiet NaN for the extended format: sign/exponent word.
pub const DEFAULT_NAN_X80_EXP: u16 = 0x7FFF;

/// Default quiet NaN for the extended format: significand.
pub const DEFAULT_NAN_X80_FRAC: u64 = 0xC000_0000_0000_0000;

/// Quiet bit of a binary32 NaN.
pub(crate) const QUIET_BIT_32: u32 = 0x0040_0000;

/// Quiet bit of a binary64 NaN.
pub(crate) const QUIET_BIT_64: u64 = 0x0008_0000_0000_0000;

/// Quiet bit of an extended NaN (immediately below the integer bit).
pub(crate) const QUIET_BIT_X80: u64 = 0x4000_0000_0000_0000;

/// Sign and left-aligned payload of a NaN, shared between formats.
///
/// `payload` holds the fraction bits below the quiet bit, aligned so the
/// most significant payload bit sits at bit 63.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CommonNan {
    pub sign: bool,
    pub payload: u64,
}

/// Selects and quiets the NaN result of a two-operand binary32 operation.
///
/// At least one of `a`, `b` must be a NaN. Raises `invalid` when either
/// operand is signaling.
pub(crate) fn propagate_nan_32(a: Float32, b: Float32, status: &mut Status) -> Float32 {
    if a.is_signaling_nan() || b.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    if a.is_nan() {
        Float32::from_bits(a.to_bits() | QUIET_BIT_32)
    } else {
        Float32::from_bits(b.to_bits() | QUIET_BIT_32)
    }
}

/// Selects and quiets the NaN result of a two-operand binary64 operation.
pub(crate) fn propagate_nan_64(a: Float64, b: Float64, status: &mut Status) -> Float64 {
    if a.is_signaling_nan() || b.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    if a.is_nan() {
        Float64::from_bits(a.to_bits() | QUIET_BIT_64)
    } else {
        Float64::from_bits(b.to_bits() | QUIET_BIT_64)
    }
}

/// Selects and quiets the NaN result of a two-operand extended operation.
pub(crate) fn propagate_nan_x80(a: FloatX80, b: FloatX80, status: &mut Status) -> FloatX80 {
    if a.is_signaling_nan() || b.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    if a.is_nan() {
        FloatX80::new(a.sign_exp, a.frac | QUIET_BIT_X80)
    } else {
        FloatX80::new(b.sign_exp, b.frac | QUIET_BIT_X80)
    }
}

/// Decomposes a binary32 NaN; raises `invalid` if it is signaling.
pub(crate) fn common_nan_from_32(a: Float32, status: &mut Status) -> CommonNan {
    if a.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    CommonNan {
        sign: (a.to_bits() >> 31) != 0,
        payload: u64::from(a.to_bits()) << 41,
    }
}

/// Decomposes a binary64 NaN; raises `invalid` if it is signaling.
pub(crate) fn common_nan_from_64(a: Float64, status: &mut Status) -> CommonNan {
    if a.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    CommonNan {
        sign: (a.to_bits() >> 63) != 0,
        payload: a.to_bits() << 12,
    }
}

/// Decomposes an extended NaN; raises `invalid` if it is signaling.
pub(crate) fn common_nan_from_x80(a: FloatX80, status: &mut Status) -> CommonNan {
    if a.is_signaling_nan() {
        status.raise(ExceptionFlags::INVALID);
    }
    CommonNan {
        sign: (a.sign_exp >> 15) != 0,
        payload: a.frac << 1,
    }
}

/// Rebuilds a quiet binary32 NaN from a common NaN.
pub(crate) fn common_nan_to_32(nan: CommonNan) -> Float32 {
    Float32::from_bits(((nan.sign as u32) << 31) | DEFAULT_NAN_32 | (nan.payload >> 41) as u32)
}

/// Rebuilds a quiet binary64 NaN from a common NaN.
pub(crate) fn common_nan_to_64(nan: CommonNan) -> Float64 {
    Float64::from_bits(((nan.sign as u64) << 63) | DEFAULT_NAN_64 | (nan.payload >> 12))
}

/// Rebuilds a quiet extended NaN from a common NaN.
pub(crate) fn common_nan_to_x80(nan: CommonNan) -> FloatX80 {
    FloatX80::new(
        ((nan.sign as u16) << 15) | 0x7FFF,
        DEFAULT_NAN_X80_FRAC | (nan.payload >> 1),
    )
}

//! binary64 (double-precision) format.
//!
//! Layout: sign(1) | biased exponent(11, bias 1023) | fraction(52).
//! Organization mirrors the other format modules: the codec and
//! round-and-pack machinery live here, with the operation surface split
//! across [`arith`], [`convert`], and [`compare`].

mod arith;
mod compare;
mod convert;

use crate::classify::FloatClass;
use crate::exceptions::ExceptionFlags;
use crate::primitives::{count_leading_zeros_64, shift_right_jam_64};
use crate::rounding::RoundingMode;
use crate::status::{Status, TininessMode};

/// Biased exponent of infinities and NaNs.
pub(crate) const EXP_MAX_64: i32 = 0x7FF;

/// Implicit integer bit position in the packed fraction.
pub(crate) const IMPLICIT_BIT_64: u64 = 0x0010_0000_0000_0000;

/// A binary64 value as its packed 64-bit encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Float64(u64);

impl Float64 {
    /// Positive zero.
    pub const ZERO: Self = Self(0);

    /// Reinterprets a packed 64-bit encoding.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the packed 64-bit encoding.
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Determines the class of the value.
    pub fn classify(self) -> FloatClass {
        let sign = self.sign();
        let exp = self.exp();
        let frac = self.frac();

        if exp == EXP_MAX_64 {
            if frac == 0 {
                return if sign {
                    FloatClass::NegativeInf
                } else {
                    FloatClass::PositiveInf
                };
            }
            return FloatClass::Nan;
        }

        if exp == 0 {
            if frac == 0 {
                return if sign {
                    FloatClass::NegativeZero
                } else {
                    FloatClass::PositiveZero
                };
            }
            return FloatClass::Denormal;
        }

        FloatClass::Normalized
    }

    /// Returns true for any NaN, quiet or signaling.
    #[inline]
    pub fn is_nan(self) -> bool {
        (self.0 & 0x7FFF_FFFF_FFFF_FFFF) > 0x7FF0_0000_0000_0000
    }

    /// Returns true for a signaling NaN (quiet bit clear, payload nonzero).
    #[inline]
    pub fn is_signaling_nan(self) -> bool {
        (self.0 & 0x7FF8_0000_0000_0000) == 0x7FF0_0000_0000_0000
            && (self.0 & 0x0007_FFFF_FFFF_FFFF) != 0
    }

    /// Returns true for a quiet NaN.
    #[inline]
    pub fn is_quiet_nan(self) -> bool {
        (self.0 & 0x7FF8_0000_0000_0000) == 0x7FF8_0000_0000_0000
    }

    /// Fraction field (low 52 bits).
    #[inline]
    pub(crate) fn frac(self) -> u64 {
        self.0 & 0x000F_FFFF_FFFF_FFFF
    }

    /// Biased exponent field.
    #[inline]
    pub(crate) fn exp(self) -> i32 {
        ((self.0 >> 52) & 0x7FF) as i32
    }

    /// Sign bit.
    #[inline]
    pub(crate) fn sign(self) -> bool {
        (self.0 >> 63) != 0
    }
}

/// Assembles a packed value from its fields.
///
/// Performed with additions so a fraction that has overflowed its field
/// carries into the exponent.
#[inline]
pub(crate) fn pack(sign: bool, exp: i32, sig: u64) -> Float64 {
    Float64(
        ((sign as u64) << 63)
            .wrapping_add((exp as u64) << 52)
            .wrapping_add(sig),
    )
}

/// Normalizes a subnormal significand for the abstract-value pipeline.
pub(crate) fn normalize_subnormal(sig: u64) -> (i32, u64) {
    let shift = count_leading_zeros_64(sig) as i32 - 11;
    (1 - shift, sig << shift)
}

/// Rounds and packs an abstract value into the binary64 format.
///
/// `z_sig` carries the significand with its binary point between bits 62
/// and 61, leaving ten guard bits at the low end; it must be normalized
/// or smaller, and `z_exp` must be one less than the true exponent.
/// Overflow, underflow, tininess detection, and flush-to-zero behave as
/// in the binary32 routine.
pub(crate) fn round_and_pack(
    z_sign: bool,
    mut z_exp: i32,
    mut z_sig: u64,
    status: &mut Status,
) -> Float64 {
    let rounding_mode = status.rounding_mode();
    let round_nearest_even = rounding_mode == RoundingMode::NearestEven;
    let round_increment: u64 = match rounding_mode {
        RoundingMode::NearestEven => 0x200,
        RoundingMode::TowardZero => 0,
        RoundingMode::Up => {
            if z_sign {
                0
            } else {
                0x3FF
            }
        }
        RoundingMode::Down => {
            if z_sign {
                0x3FF
            } else {
                0
            }
        }
    };

    let mut round_bits = z_sig & 0x3FF;
    if (z_exp as u32) >= 0x7FD {
        if z_exp > 0x7FD
            || (z_exp == 0x7FD && (z_sig.wrapping_add(round_increment) as i64) < 0)
        {
            status.raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
            return Float64(
                pack(z_sign, EXP_MAX_64, 0).to_bits() - (round_increment == 0) as u64,
            );
        }
        if z_exp < 0 {
            let is_tiny = status.tininess() == TininessMode::BeforeRounding
                || z_exp < -1
                || z_sig.wrapping_add(round_increment) < 0x8000_0000_0000_0000;
            z_sig = shift_right_jam_64(z_sig, (-z_exp) as u32);
            z_exp = 0;
            round_bits = z_sig & 0x3FF;
            if is_tiny && round_bits != 0 {
                status.raise(ExceptionFlags::UNDERFLOW);
                if status.flush_underflow_to_zero() {
                    status.raise(ExceptionFlags::INEXACT);
                    return pack(z_sign, 0, 0);
                }
            }
        }
    }
    if round_bits != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    z_sig = z_sig.wrapping_add(round_increment) >> 10;
    if round_nearest_even && round_bits == 0x200 {
        z_sig &= !1;
    }
    if z_sig == 0 {
        z_exp = 0;
    }
    pack(z_sign, z_exp, z_sig)
}

/// Round-and-pack for an unnormalized significand (bit 63 clear).
pub(crate) fn normalize_round_and_pack(
    z_sign: bool,
    z_exp: i32,
    z_sig: u64,
    status: &mut Status,
) -> Float64 {
    let shift = count_leading_zeros_64(z_sig) as i32 - 1;
    round_and_pack(z_sign, z_exp - shift, z_sig << shift, status)
}

//! 80-bit extended-precision format.
//!
//! Stored as a 16-bit sign/exponent word (sign at bit 15, 15-bit biased
//! exponent, bias 16383) plus a 64-bit significand whose integer bit is
//! explicit at bit 63. Intermediates carry a second significand word of
//! guard bits, and the round-and-pack machinery honors the status
//! object's rounding precision: results may be rounded to 24 or 53
//! significand bits while still packing into the 80-bit encoding.

mod arith;
mod compare;
mod convert;

use crate::classify::FloatClass;
use crate::exceptions::ExceptionFlags;
use crate::primitives::{
    count_leading_zeros_64, shift_right_extra_jam_64, shift_right_jam_64,
    short_shift_left_128,
};
use crate::rounding::{RoundingMode, RoundingPrecision};
use crate::status::{Status, TininessMode};

/// Biased exponent of infinities and NaNs.
pub(crate) const EXP_MAX_X80: i32 = 0x7FFF;

/// Explicit integer bit of the significand.
pub(crate) const INTEGER_BIT: u64 = 0x8000_0000_0000_0000;

/// An 80-bit extended-precision value.
///
/// `sign_exp` combines the sign (bit 15) with the biased exponent;
/// `frac` is the full 64-bit significand including the integer bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FloatX80 {
    /// Sign and biased exponent word.
    pub sign_exp: u16,
    /// Significand with the integer bit explicit at bit 63.
    pub frac: u64,
}

impl FloatX80 {
    /// Positive zero.
    pub const ZERO: Self = Self { sign_exp: 0, frac: 0 };

    /// Builds a value from its stored words.
    #[inline]
    pub const fn new(sign_exp: u16, frac: u64) -> Self {
        Self { sign_exp, frac }
    }

    /// Determines the class of the value.
    pub fn classify(self) -> FloatClass {
        let sign = self.sign();
        let exp = self.exp();
        let frac = self.frac;

        if exp == EXP_MAX_X80 {
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
    ///
    /// Infinity carries the integer bit with an otherwise clear
    /// significand, so the low 63 bits distinguish the two.
    #[inline]
    pub fn is_nan(self) -> bool {
        (self.sign_exp & 0x7FFF) == 0x7FFF && (self.frac << 1) != 0
    }

    /// Returns true for a signaling NaN: quiet bit (bit 62) clear with a
    /// nonzero payload below it.
    #[inline]
    pub fn is_signaling_nan(self) -> bool {
        let low = self.frac & !0x4000_0000_0000_0000;
        (self.sign_exp & 0x7FFF) == 0x7FFF && (low << 1) != 0 && self.frac == low
    }

    /// Returns true for a quiet NaN.
    #[inline]
    pub fn is_quiet_nan(self) -> bool {
        self.is_nan() && (self.frac & 0x4000_0000_0000_0000) != 0
    }

    /// Biased exponent field.
    #[inline]
    pub(crate) fn exp(self) -> i32 {
        i32::from(self.sign_exp & 0x7FFF)
    }

    /// Sign bit.
    #[inline]
    pub(crate) fn sign(self) -> bool {
        (self.sign_exp >> 15) != 0
    }
}

/// Assembles a value from sign, biased exponent, and significand.
#[inline]
pub(crate) fn pack(sign: bool, exp: i32, sig: u64) -> FloatX80 {
    FloatX80 {
        sign_exp: ((sign as u16) << 15).wrapping_add(exp as u16),
        frac: sig,
    }
}

/// Normalizes a subnormal significand: shifts the leading bit up to the
/// integer-bit position and returns the matching exponent.
pub(crate) fn normalize_subnormal(sig: u64) -> (i32, u64) {
    let shift = count_leading_zeros_64(sig);
    (1 - shift as i32, sig << shift)
}

/// Shared overflow exit: rounding toward zero (or away from the
/// overflow direction) yields the largest finite value at the active
/// precision, everything else yields infinity.
fn overflow_result(
    round_mask: u64,
    z_sign: bool,
    rounding_mode: RoundingMode,
    status: &mut Status,
) -> FloatX80 {
    status.raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
    if rounding_mode == RoundingMode::TowardZero
        || (z_sign && rounding_mode == RoundingMode::Up)
        || (!z_sign && rounding_mode == RoundingMode::Down)
    {
        return pack(z_sign, 0x7FFE, !round_mask);
    }
    pack(z_sign, EXP_MAX_X80, INTEGER_BIT)
}

/// Rounds and packs with the significand cut to 24 or 53 bits.
///
/// The guard word is collapsed into the sticky bit first; the wide round
/// mask then behaves exactly like the single/double round-and-pack but
/// the result still packs into the 80-bit encoding.
fn round_and_pack_reduced(
    default_increment: u64,
    mut round_mask: u64,
    z_sign: bool,
    mut z_exp: i32,
    mut z_sig0: u64,
    z_sig1: u64,
    status: &mut Status,
) -> FloatX80 {
    let rounding_mode = status.rounding_mode();
    let round_nearest_even = rounding_mode == RoundingMode::NearestEven;
    let round_increment = match rounding_mode {
        RoundingMode::NearestEven => default_increment,
        RoundingMode::TowardZero => 0,
        RoundingMode::Up => {
            if z_sign {
                0
            } else {
                round_mask
            }
        }
        RoundingMode::Down => {
            if z_sign {
                round_mask
            } else {
                0
            }
        }
    };

    z_sig0 |= (z_sig1 != 0) as u64;
    let mut round_bits = z_sig0 & round_mask;
    if ((z_exp - 1) as u32) >= 0x7FFD {
        if z_exp > 0x7FFE
            || (z_exp == 0x7FFE && z_sig0.wrapping_add(round_increment) < z_sig0)
        {
            return overflow_result(round_mask, z_sign, rounding_mode, status);
        }
        if z_exp <= 0 {
            let is_tiny = status.tininess() == TininessMode::BeforeRounding
                || z_exp < 0
                || z_sig0 <= z_sig0.wrapping_add(round_increment);
            z_sig0 = shift_right_jam_64(z_sig0, (1 - z_exp) as u32);
            z_exp = 0;
            round_bits = z_sig0 & round_mask;
            if is_tiny && round_bits != 0 {
                status.raise(ExceptionFlags::UNDERFLOW);
            }
            if round_bits != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            z_sig0 = z_sig0.wrapping_add(round_increment);
            if (z_sig0 as i64) < 0 {
                z_exp = 1;
            }
            let carry_mask = round_mask + 1;
            if round_nearest_even && (round_bits << 1) == carry_mask {
                round_mask |= carry_mask;
            }
            z_sig0 &= !round_mask;
            return pack(z_sign, z_exp, z_sig0);
        }
    }
    if round_bits != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    z_sig0 = z_sig0.wrapping_add(round_increment);
    if z_sig0 < round_increment {
        z_exp += 1;
        z_sig0 = INTEGER_BIT;
    }
    let carry_mask = round_mask + 1;
    if round_nearest_even && (round_bits << 1) == carry_mask {
        round_mask |= carry_mask;
    }
    z_sig0 &= !round_mask;
    if z_sig0 == 0 {
        z_exp = 0;
    }
    pack(z_sign, z_exp, z_sig0)
}

/// Rounds and packs an abstract value into the extended format.
///
/// The significand arrives as the pair `z_sig0:z_sig1`; it must be
/// normalized or smaller, with `z_exp` equal to the true biased exponent
/// (not offset by one as in the narrower formats, since the integer bit
/// is explicit). `precision` selects full 64-bit rounding or the widened
/// 24/53-bit round masks.
pub(crate) fn round_and_pack(
    precision: RoundingPrecision,
    z_sign: bool,
    mut z_exp: i32,
    mut z_sig0: u64,
    mut z_sig1: u64,
    status: &mut Status,
) -> FloatX80 {
    match precision {
        RoundingPrecision::Double => {
            return round_and_pack_reduced(
                0x0000_0000_0000_0400,
                0x0000_0000_0000_07FF,
                z_sign,
                z_exp,
                z_sig0,
                z_sig1,
                status,
            )
        }
        RoundingPrecision::Single => {
            return round_and_pack_reduced(
                0x0000_0080_0000_0000,
                0x0000_00FF_FFFF_FFFF,
                z_sign,
                z_exp,
                z_sig0,
                z_sig1,
                status,
            )
        }
        RoundingPrecision::Extended => {}
    }

    let rounding_mode = status.rounding_mode();
    let round_nearest_even = rounding_mode == RoundingMode::NearestEven;
    let mut increment = match rounding_mode {
        RoundingMode::NearestEven => (z_sig1 as i64) < 0,
        RoundingMode::TowardZero => false,
        RoundingMode::Up => !z_sign && z_sig1 != 0,
        RoundingMode::Down => z_sign && z_sig1 != 0,
    };
    if ((z_exp - 1) as u32) >= 0x7FFD {
        if z_exp > 0x7FFE || (z_exp == 0x7FFE && z_sig0 == u64::MAX && increment) {
            return overflow_result(0, z_sign, rounding_mode, status);
        }
        if z_exp <= 0 {
            let is_tiny = status.tininess() == TininessMode::BeforeRounding
                || z_exp < 0
                || !increment
                || z_sig0 < u64::MAX;
            let (s0, s1) = shift_right_extra_jam_64(z_sig0, z_sig1, (1 - z_exp) as u32);
            z_sig0 = s0;
            z_sig1 = s1;
            z_exp = 0;
            if is_tiny && z_sig1 != 0 {
                status.raise(ExceptionFlags::UNDERFLOW);
            }
            if z_sig1 != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            increment = match rounding_mode {
                RoundingMode::NearestEven => (z_sig1 as i64) < 0,
                RoundingMode::TowardZero => false,
                RoundingMode::Up => !z_sign && z_sig1 != 0,
                RoundingMode::Down => z_sign && z_sig1 != 0,
            };
            if increment {
                z_sig0 = z_sig0.wrapping_add(1);
                if round_nearest_even && (z_sig1 << 1) == 0 {
                    z_sig0 &= !1;
                }
                if (z_sig0 as i64) < 0 {
                    z_exp = 1;
                }
            }
            return pack(z_sign, z_exp, z_sig0);
        }
    }
    if z_sig1 != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    if increment {
        z_sig0 = z_sig0.wrapping_add(1);
        if z_sig0 == 0 {
            z_exp += 1;
            z_sig0 = INTEGER_BIT;
        } else if round_nearest_even && (z_sig1 << 1) == 0 {
            z_sig0 &= !1;
        }
    } else if z_sig0 == 0 {
        z_exp = 0;
    }
    pack(z_sign, z_exp, z_sig0)
}

/// Round-and-pack for an unnormalized two-word significand.
pub(crate) fn normalize_round_and_pack(
    precision: RoundingPrecision,
    z_sign: bool,
    mut z_exp: i32,
    mut z_sig0: u64,
    mut z_sig1: u64,
    status: &mut Status,
) -> FloatX80 {
    if z_sig0 == 0 {
        z_sig0 = z_sig1;
        z_sig1 = 0;
        z_exp -= 64;
        if z_sig0 == 0 {
            return pack(z_sign, 0, 0);
        }
    }
    let shift = count_leading_zeros_64(z_sig0);
    let (s0, s1) = short_shift_left_128(z_sig0, z_sig1, shift);
    round_and_pack(precision, z_sign, z_exp - shift as i32, s0, s1, status)
}

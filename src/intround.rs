//! Rounding of fixed-point intermediates to two's complement integers.
//!
//! Shared by every float→integer conversion: the caller aligns the
//! operand's significand into a fixed-point value with guard bits at the
//! low end, and these routines apply the current rounding mode, saturate
//! on overflow with `invalid`, and raise `inexact` for discarded bits.

use crate::exceptions::ExceptionFlags;
use crate::rounding::RoundingMode;
use crate::status::Status;

/// Rounds a 64-bit fixed-point value with the binary point between bits
/// 6 and 7 to a 32-bit integer, negating first when `sign` is set.
///
/// Bit 63 of `abs_z` must be zero. Out-of-range inputs raise `invalid`
/// and saturate to the most positive or most negative integer.
pub(crate) fn round_to_i32(sign: bool, mut abs_z: u64, status: &mut Status) -> i32 {
    let rounding_mode = status.rounding_mode();
    let round_nearest_even = rounding_mode == RoundingMode::NearestEven;
    let round_increment: u64 = match rounding_mode {
        RoundingMode::NearestEven => 0x40,
        RoundingMode::TowardZero => 0,
        RoundingMode::Up => {
            if sign {
                0
            } else {
                0x7F
            }
        }
        RoundingMode::Down => {
            if sign {
                0x7F
            } else {
                0
            }
        }
    };
    let round_bits = abs_z & 0x7F;
    abs_z = (abs_z + round_increment) >> 7;
    if round_nearest_even && round_bits == 0x40 {
        abs_z &= !1;
    }
    let mut z = abs_z as u32 as i32;
    if sign {
        z = z.wrapping_neg();
    }
    if (abs_z >> 32) != 0 || (z != 0 && ((z < 0) != sign)) {
        status.raise(ExceptionFlags::INVALID);
        return if sign { i32::MIN } else { i32::MAX };
    }
    if round_bits != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    z
}

/// Rounds the 128-bit fixed-point value `abs_z0:abs_z1` (binary point
/// between the words) to a 64-bit integer, negating first when `sign` is
/// set.
///
/// Out-of-range inputs raise `invalid` and saturate to the most positive
/// or most negative integer.
pub(crate) fn round_to_i64(
    sign: bool,
    mut abs_z0: u64,
    abs_z1: u64,
    status: &mut Status,
) -> i64 {
    let rounding_mode = status.rounding_mode();
    let round_nearest_even = rounding_mode == RoundingMode::NearestEven;
    let increment = match rounding_mode {
        RoundingMode::NearestEven => (abs_z1 as i64) < 0,
        RoundingMode::TowardZero => false,
        RoundingMode::Up => !sign && abs_z1 != 0,
        RoundingMode::Down => sign && abs_z1 != 0,
    };
    if increment {
        abs_z0 = abs_z0.wrapping_add(1);
        if abs_z0 == 0 {
            status.raise(ExceptionFlags::INVALID);
            return if sign { i64::MIN } else { i64::MAX };
        }
        if round_nearest_even && (abs_z1 << 1) == 0 {
            abs_z0 &= !1;
        }
    }
    let mut z = abs_z0 as i64;
    if sign {
        z = z.wrapping_neg();
    }
    if z != 0 && ((z < 0) != sign) {
        status.raise(ExceptionFlags::INVALID);
        return if sign { i64::MIN } else { i64::MAX };
    }
    if abs_z1 != 0 {
        status.raise(ExceptionFlags::INEXACT);
    }
    z
}

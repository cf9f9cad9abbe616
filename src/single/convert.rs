//! binary32 conversions: integers, wider formats, round-to-integral.

use crate::double::{self, Float64};
use crate::exceptions::ExceptionFlags;
use crate::extended::{self, FloatX80};
use crate::intround::{round_to_i32, round_to_i64};
use crate::nan::{common_nan_from_32, common_nan_to_64, common_nan_to_x80, propagate_nan_32};
use crate::primitives::{shift_right_extra_jam_64, shift_right_jam_64};
use crate::rounding::RoundingMode;
use crate::status::Status;

use super::{normalize_round_and_pack, normalize_subnormal, pack, Float32, EXP_MAX_32, IMPLICIT_BIT_32};

impl Float32 {
    /// Converts a signed 32-bit integer, rounding when it has more than
    /// 24 significant bits.
    pub fn from_i32(a: i32, status: &mut Status) -> Self {
        if a == 0 {
            return Float32::ZERO;
        }
        if a == i32::MIN {
            return pack(true, 0x9E, 0);
        }
        let z_sign = a < 0;
        normalize_round_and_pack(z_sign, 0x9C, a.unsigned_abs(), status)
    }

    /// Converts a signed 64-bit integer under the current rounding mode.
    pub fn from_i64(a: i64, status: &mut Status) -> Self {
        if a == 0 {
            return Float32::ZERO;
        }
        let z_sign = a < 0;
        let mut abs_a = a.unsigned_abs();
        let shift_count = abs_a.leading_zeros() as i32 - 40;
        if shift_count >= 0 {
            return pack(z_sign, 0x95 - shift_count, (abs_a << shift_count) as u32);
        }
        let shift_count = shift_count + 7;
        if shift_count < 0 {
            abs_a = shift_right_jam_64(abs_a, (-shift_count) as u32);
        } else {
            abs_a <<= shift_count;
        }
        super::round_and_pack(z_sign, 0x9C - shift_count, abs_a as u32, status)
    }

    /// Converts to a signed 32-bit integer under the current rounding
    /// mode; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i32(self, status: &mut Status) -> i32 {
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let mut a_sign = self.sign();
        if a_exp == EXP_MAX_32 && a_sig != 0 {
            a_sign = false;
        }
        if a_exp != 0 {
            a_sig |= IMPLICIT_BIT_32;
        }
        let shift_count = 0xAF - a_exp;
        let mut a_sig64 = u64::from(a_sig) << 32;
        if shift_count > 0 {
            a_sig64 = shift_right_jam_64(a_sig64, shift_count as u32);
        }
        round_to_i32(a_sign, a_sig64, status)
    }

    /// Converts to a signed 32-bit integer, always truncating toward
    /// zero; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i32_round_to_zero(self, status: &mut Status) -> i32 {
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();
        let shift_count = a_exp - 0x9E;
        if shift_count >= 0 {
            if self.to_bits() != 0xCF00_0000 {
                status.raise(ExceptionFlags::INVALID);
                if !a_sign || (a_exp == EXP_MAX_32 && a_sig != 0) {
                    return i32::MAX;
                }
            }
            return i32::MIN;
        } else if a_exp <= 0x7E {
            if a_exp != 0 || a_sig != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            return 0;
        }
        a_sig = (a_sig | IMPLICIT_BIT_32) << 8;
        let z = (a_sig >> (-shift_count) as u32) as i32;
        if (a_sig << (shift_count & 31) as u32) != 0 {
            status.raise(ExceptionFlags::INEXACT);
        }
        if a_sign {
            z.wrapping_neg()
        } else {
            z
        }
    }

    /// Converts to a signed 64-bit integer under the current rounding
    /// mode; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i64(self, status: &mut Status) -> i64 {
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();
        let shift_count = 0xBE - a_exp;
        if shift_count < 0 {
            status.raise(ExceptionFlags::INVALID);
            if !a_sign || (a_exp == EXP_MAX_32 && a_sig != 0) {
                return i64::MAX;
            }
            return i64::MIN;
        }
        if a_exp != 0 {
            a_sig |= IMPLICIT_BIT_32;
        }
        let a_sig64 = u64::from(a_sig) << 40;
        let (a_sig64, a_sig_extra) =
            shift_right_extra_jam_64(a_sig64, 0, shift_count as u32);
        round_to_i64(a_sign, a_sig64, a_sig_extra, status)
    }

    /// Converts to a signed 64-bit integer, always truncating toward
    /// zero; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i64_round_to_zero(self, status: &mut Status) -> i64 {
        let a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();
        let shift_count = a_exp - 0xBE;
        if shift_count >= 0 {
            if self.to_bits() != 0xDF00_0000 {
                status.raise(ExceptionFlags::INVALID);
                if !a_sign || (a_exp == EXP_MAX_32 && a_sig != 0) {
                    return i64::MAX;
                }
            }
            return i64::MIN;
        } else if a_exp <= 0x7E {
            if a_exp != 0 || a_sig != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            return 0;
        }
        let a_sig64 = u64::from(a_sig | IMPLICIT_BIT_32) << 40;
        let z = (a_sig64 >> (-shift_count) as u32) as i64;
        if (a_sig64 << (shift_count & 63) as u32) != 0 {
            status.raise(ExceptionFlags::INEXACT);
        }
        if a_sign {
            z.wrapping_neg()
        } else {
            z
        }
    }

    /// Widens to binary64; exact except that signaling NaNs are quieted
    /// with `invalid` and subnormal inputs raise `denormal`.
    pub fn to_float64(self, status: &mut Status) -> Float64 {
        let mut a_sig = self.frac();
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return common_nan_to_64(common_nan_from_32(self, status));
            }
            return double::pack(a_sign, double::EXP_MAX_64, 0);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return double::pack(a_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp - 1;
            a_sig = sig;
        }
        double::pack(a_sign, a_exp + 0x380, u64::from(a_sig) << 29)
    }

    /// Widens to the 80-bit extended format; exact except for NaN
    /// quieting and the `denormal` flag on subnormal inputs.
    pub fn to_floatx80(self, status: &mut Status) -> FloatX80 {
        let mut a_sig = self.frac();
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return common_nan_to_x80(common_nan_from_32(self, status));
            }
            return extended::pack(a_sign, extended::EXP_MAX_X80, 0x8000_0000_0000_0000);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return extended::pack(a_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }
        a_sig |= IMPLICIT_BIT_32;
        extended::pack(a_sign, a_exp + 0x3F80, u64::from(a_sig) << 40)
    }

    /// Rounds to an integral value in the same format.
    ///
    /// Raises `inexact` when the result differs from the operand;
    /// magnitudes below one collapse to ±0 or ±1 depending on the sign
    /// and rounding mode.
    pub fn round_to_int(self, status: &mut Status) -> Self {
        let a = self;
        let a_exp = a.exp();
        if a_exp >= 0x96 {
            if a_exp == EXP_MAX_32 && a.frac() != 0 {
                return propagate_nan_32(a, a, status);
            }
            return a;
        }
        if a_exp <= 0x7E {
            if (a.to_bits() << 1) == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INEXACT);
            let a_sign = a.sign();
            match status.rounding_mode() {
                RoundingMode::NearestEven => {
                    if a_exp == 0x7E && a.frac() != 0 {
                        return pack(a_sign, 0x7F, 0);
                    }
                }
                RoundingMode::Down => {
                    return if a_sign {
                        Float32::from_bits(0xBF80_0000)
                    } else {
                        Float32::ZERO
                    };
                }
                RoundingMode::Up => {
                    return if a_sign {
                        Float32::from_bits(0x8000_0000)
                    } else {
                        Float32::from_bits(0x3F80_0000)
                    };
                }
                RoundingMode::TowardZero => {}
            }
            return pack(a_sign, 0, 0);
        }
        let last_bit_mask = 1u32 << (0x96 - a_exp);
        let round_bits_mask = last_bit_mask - 1;
        let mut z = a.to_bits();
        let rounding_mode = status.rounding_mode();
        if rounding_mode == RoundingMode::NearestEven {
            z += last_bit_mask >> 1;
            if (z & round_bits_mask) == 0 {
                z &= !last_bit_mask;
            }
        } else if rounding_mode != RoundingMode::TowardZero {
            if ((z >> 31) != 0) != (rounding_mode == RoundingMode::Up) {
                z += round_bits_mask;
            }
        }
        z &= !round_bits_mask;
        if z != a.to_bits() {
            status.raise(ExceptionFlags::INEXACT);
        }
        Float32::from_bits(z)
    }
}

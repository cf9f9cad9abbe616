//! Extended-precision conversions: integers, narrower formats,
//! round-to-integral.

use crate::double::{self, Float64};
use crate::exceptions::ExceptionFlags;
use crate::intround::{round_to_i32, round_to_i64};
use crate::nan::{common_nan_from_x80, common_nan_to_32, common_nan_to_64, propagate_nan_x80};
use crate::primitives::{
    count_leading_zeros_32, count_leading_zeros_64, shift_right_extra_jam_64,
    shift_right_jam_64,
};
use crate::rounding::RoundingMode;
use crate::single::{self, Float32};
use crate::status::Status;

use super::{pack, FloatX80, EXP_MAX_X80, INTEGER_BIT};

impl FloatX80 {
    /// Converts a signed 32-bit integer; always exact.
    pub fn from_i32(a: i32) -> Self {
        if a == 0 {
            return pack(false, 0, 0);
        }
        let z_sign = a < 0;
        let abs_a = a.unsigned_abs();
        let shift_count = count_leading_zeros_32(abs_a) as i32 + 32;
        pack(z_sign, 0x403E - shift_count, u64::from(abs_a) << shift_count)
    }

    /// Converts a signed 64-bit integer; always exact.
    pub fn from_i64(a: i64) -> Self {
        if a == 0 {
            return pack(false, 0, 0);
        }
        let z_sign = a < 0;
        let abs_a = a.unsigned_abs();
        let shift_count = count_leading_zeros_64(abs_a) as i32;
        pack(z_sign, 0x403E - shift_count, abs_a << shift_count)
    }

    /// Converts to a signed 32-bit integer under the current rounding
    /// mode; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i32(self, status: &mut Status) -> i32 {
        let mut a_sig = self.frac;
        let a_exp = self.exp();
        let mut a_sign = self.sign();
        if a_exp == EXP_MAX_X80 && (a_sig << 1) != 0 {
            a_sign = false;
        }
        let mut shift_count = 0x4037 - a_exp;
        if shift_count <= 0 {
            shift_count = 1;
        }
        a_sig = shift_right_jam_64(a_sig, shift_count as u32);
        round_to_i32(a_sign, a_sig, status)
    }

    /// Converts to a signed 32-bit integer, always truncating toward
    /// zero.
    pub fn to_i32_round_to_zero(self, status: &mut Status) -> i32 {
        let a_sig = self.frac;
        let a_exp = self.exp();
        let mut a_sign = self.sign();

        if a_exp > 0x401E {
            if a_exp == EXP_MAX_X80 && (a_sig << 1) != 0 {
                a_sign = false;
            }
            status.raise(ExceptionFlags::INVALID);
            return if a_sign { i32::MIN } else { i32::MAX };
        } else if a_exp < 0x3FFF {
            if a_exp != 0 || a_sig != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            return 0;
        }
        let shift_count = (0x403E - a_exp) as u32;
        let saved_a_sig = a_sig;
        let a_sig = a_sig >> shift_count;
        let mut z = a_sig as u32 as i32;
        if a_sign {
            z = z.wrapping_neg();
        }
        if (z < 0) != a_sign {
            status.raise(ExceptionFlags::INVALID);
            return if a_sign { i32::MIN } else { i32::MAX };
        }
        if (a_sig << shift_count) != saved_a_sig {
            status.raise(ExceptionFlags::INEXACT);
        }
        z
    }

    /// Converts to a signed 64-bit integer under the current rounding
    /// mode; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i64(self, status: &mut Status) -> i64 {
        let a_sig = self.frac;
        let a_exp = self.exp();
        let a_sign = self.sign();

        let shift_count = 0x403E - a_exp;
        if shift_count <= 0 {
            if shift_count != 0 {
                status.raise(ExceptionFlags::INVALID);
                if !a_sign || (a_exp == EXP_MAX_X80 && a_sig != INTEGER_BIT) {
                    return i64::MAX;
                }
                return i64::MIN;
            }
            round_to_i64(a_sign, a_sig, 0, status)
        } else {
            let (a_sig, a_sig_extra) =
                shift_right_extra_jam_64(a_sig, 0, shift_count as u32);
            round_to_i64(a_sign, a_sig, a_sig_extra, status)
        }
    }

    /// Converts to a signed 64-bit integer, always truncating toward
    /// zero.
    pub fn to_i64_round_to_zero(self, status: &mut Status) -> i64 {
        let mut a_sig = self.frac;
        let a_exp = self.exp();
        let a_sign = self.sign();

        let shift_count = a_exp - 0x403E;
        if shift_count >= 0 {
            a_sig &= !INTEGER_BIT;
            if self.sign_exp != 0xC03E || a_sig != 0 {
                status.raise(ExceptionFlags::INVALID);
                if !a_sign || (a_exp == EXP_MAX_X80 && a_sig != 0) {
                    return i64::MAX;
                }
            }
            return i64::MIN;
        } else if a_exp < 0x3FFF {
            if a_exp != 0 || a_sig != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            return 0;
        }
        let z = (a_sig >> (-shift_count) as u32) as i64;
        if (a_sig << (shift_count & 63) as u32) != 0 {
            status.raise(ExceptionFlags::INEXACT);
        }
        if a_sign {
            z.wrapping_neg()
        } else {
            z
        }
    }

    /// Narrows to binary32, re-rounding under the current mode.
    pub fn to_float32(self, status: &mut Status) -> Float32 {
        let mut a_sig = self.frac;
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 {
                return common_nan_to_32(common_nan_from_x80(self, status));
            }
            return single::pack(a_sign, single::EXP_MAX_32, 0);
        }
        a_sig = shift_right_jam_64(a_sig, 33);
        if a_exp != 0 || a_sig != 0 {
            a_exp -= 0x3F81;
        }
        single::round_and_pack(a_sign, a_exp, a_sig as u32, status)
    }

    /// Narrows to binary64, re-rounding under the current mode.
    pub fn to_float64(self, status: &mut Status) -> Float64 {
        let a_sig = self.frac;
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 {
                return common_nan_to_64(common_nan_from_x80(self, status));
            }
            return double::pack(a_sign, double::EXP_MAX_64, 0);
        }
        let z_sig = shift_right_jam_64(a_sig, 1);
        if a_exp != 0 || a_sig != 0 {
            a_exp -= 0x3C01;
        }
        double::round_and_pack(a_sign, a_exp, z_sig, status)
    }

    /// Rounds to an integral value in the same format.
    ///
    /// When the masked fraction collapses to zero the biased exponent is
    /// incremented and the integer bit reinstated, absorbing the carry
    /// out of bit 63.
    pub fn round_to_int(self, status: &mut Status) -> Self {
        let a = self;
        let a_exp = a.exp();
        if a_exp >= 0x403E {
            if a_exp == EXP_MAX_X80 && (a.frac << 1) != 0 {
                return propagate_nan_x80(a, a, status);
            }
            return a;
        }
        if a_exp < 0x3FFF {
            if a_exp == 0 && (a.frac << 1) == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INEXACT);
            let a_sign = a.sign();
            match status.rounding_mode() {
                RoundingMode::NearestEven => {
                    if a_exp == 0x3FFE && (a.frac << 1) != 0 {
                        return pack(a_sign, 0x3FFF, INTEGER_BIT);
                    }
                }
                RoundingMode::Down => {
                    return if a_sign {
                        pack(true, 0x3FFF, INTEGER_BIT)
                    } else {
                        pack(false, 0, 0)
                    };
                }
                RoundingMode::Up => {
                    return if a_sign {
                        pack(true, 0, 0)
                    } else {
                        pack(false, 0x3FFF, INTEGER_BIT)
                    };
                }
                RoundingMode::TowardZero => {}
            }
            return pack(a_sign, 0, 0);
        }
        let last_bit_mask = 1u64 << (0x403E - a_exp);
        let round_bits_mask = last_bit_mask - 1;
        let mut z = a;
        let rounding_mode = status.rounding_mode();
        if rounding_mode == RoundingMode::NearestEven {
            z.frac = z.frac.wrapping_add(last_bit_mask >> 1);
            if (z.frac & round_bits_mask) == 0 {
                z.frac &= !last_bit_mask;
            }
        } else if rounding_mode != RoundingMode::TowardZero {
            if z.sign() != (rounding_mode == RoundingMode::Up) {
                z.frac = z.frac.wrapping_add(round_bits_mask);
            }
        }
        z.frac &= !round_bits_mask;
        if z.frac == 0 {
            z.sign_exp += 1;
            z.frac = INTEGER_BIT;
        }
        if z.frac != a.frac {
            status.raise(ExceptionFlags::INEXACT);
        }
        z
    }
}

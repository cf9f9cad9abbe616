//! binary64 conversions: integers, the other formats, round-to-integral.

use crate::exceptions::ExceptionFlags;
use crate::extended::{self, FloatX80};
use crate::intround::{round_to_i32, round_to_i64};
use crate::nan::{common_nan_from_64, common_nan_to_32, common_nan_to_x80, propagate_nan_64};
use crate::primitives::{shift_right_extra_jam_64, shift_right_jam_64};
use crate::rounding::RoundingMode;
use crate::single::{self, Float32};
use crate::status::Status;

use super::{
    normalize_round_and_pack, normalize_subnormal, pack, Float64, EXP_MAX_64,
    IMPLICIT_BIT_64,
};

impl Float64 {
    /// Converts a signed 32-bit integer; always exact.
    pub fn from_i32(a: i32) -> Self {
        if a == 0 {
            return Float64::ZERO;
        }
        let z_sign = a < 0;
        let abs_a = a.unsigned_abs();
        let shift_count = abs_a.leading_zeros() as i32 + 21;
        pack(z_sign, 0x432 - shift_count, u64::from(abs_a) << shift_count)
    }

    /// Converts a signed 64-bit integer, rounding when it has more than
    /// 53 significant bits.
    pub fn from_i64(a: i64, status: &mut Status) -> Self {
        if a == 0 {
            return Float64::ZERO;
        }
        if a == i64::MIN {
            return pack(true, 0x43E, 0);
        }
        let z_sign = a < 0;
        normalize_round_and_pack(z_sign, 0x43C, a.unsigned_abs(), status)
    }

    /// Converts to a signed 32-bit integer under the current rounding
    /// mode; NaNs and out-of-range values raise `invalid` and saturate.
    pub fn to_i32(self, status: &mut Status) -> i32 {
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let mut a_sign = self.sign();
        if a_exp == EXP_MAX_64 && a_sig != 0 {
            a_sign = false;
        }
        if a_exp != 0 {
            a_sig |= IMPLICIT_BIT_64;
        }
        let shift_count = 0x42C - a_exp;
        if shift_count > 0 {
            a_sig = shift_right_jam_64(a_sig, shift_count as u32);
        }
        round_to_i32(a_sign, a_sig, status)
    }

    /// Converts to a signed 32-bit integer, always truncating toward
    /// zero.
    pub fn to_i32_round_to_zero(self, status: &mut Status) -> i32 {
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp > 0x41E {
            let invalid_sign = if a_exp == EXP_MAX_64 && a_sig != 0 {
                false
            } else {
                a_sign
            };
            status.raise(ExceptionFlags::INVALID);
            return if invalid_sign { i32::MIN } else { i32::MAX };
        } else if a_exp < 0x3FF {
            if a_exp != 0 || a_sig != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
            return 0;
        }
        a_sig |= IMPLICIT_BIT_64;
        let shift_count = (0x433 - a_exp) as u32;
        let saved_a_sig = a_sig;
        a_sig >>= shift_count;
        let mut z = a_sig as i32;
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
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();
        if a_exp != 0 {
            a_sig |= IMPLICIT_BIT_64;
        }
        let shift_count = 0x433 - a_exp;
        if shift_count <= 0 {
            if a_exp > 0x43E {
                status.raise(ExceptionFlags::INVALID);
                if !a_sign || (a_exp == EXP_MAX_64 && a_sig != IMPLICIT_BIT_64) {
                    return i64::MAX;
                }
                return i64::MIN;
            }
            let a_sig = a_sig << (-shift_count) as u32;
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
        let mut a_sig = self.frac();
        let a_exp = self.exp();
        let a_sign = self.sign();
        if a_exp != 0 {
            a_sig |= IMPLICIT_BIT_64;
        }
        let shift_count = a_exp - 0x433;
        let z: i64;
        if shift_count >= 0 {
            if a_exp >= 0x43E {
                if self.to_bits() != 0xC3E0_0000_0000_0000 {
                    status.raise(ExceptionFlags::INVALID);
                    if !a_sign || (a_exp == EXP_MAX_64 && a_sig != IMPLICIT_BIT_64) {
                        return i64::MAX;
                    }
                }
                return i64::MIN;
            }
            z = (a_sig << shift_count as u32) as i64;
        } else {
            if a_exp < 0x3FE {
                if a_exp != 0 || a_sig != 0 {
                    status.raise(ExceptionFlags::INEXACT);
                }
                return 0;
            }
            z = (a_sig >> (-shift_count) as u32) as i64;
            if (a_sig << (shift_count & 63) as u32) != 0 {
                status.raise(ExceptionFlags::INEXACT);
            }
        }
        if a_sign {
            z.wrapping_neg()
        } else {
            z
        }
    }

    /// Narrows to binary32, re-rounding under the current mode.
    pub fn to_float32(self, status: &mut Status) -> Float32 {
        let mut a_sig = self.frac();
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return common_nan_to_32(common_nan_from_64(self, status));
            }
            return single::pack(a_sign, single::EXP_MAX_32, 0);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return single::pack(a_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
        }
        a_sig = shift_right_jam_64(a_sig, 22);
        let mut z_sig = a_sig as u32;
        if a_exp != 0 || z_sig != 0 {
            z_sig |= 0x4000_0000;
            a_exp -= 0x381;
        }
        single::round_and_pack(a_sign, a_exp, z_sig, status)
    }

    /// Widens to the 80-bit extended format; exact except for NaN
    /// quieting and the `denormal` flag on subnormal inputs.
    pub fn to_floatx80(self, status: &mut Status) -> FloatX80 {
        let mut a_sig = self.frac();
        let mut a_exp = self.exp();
        let a_sign = self.sign();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return common_nan_to_x80(common_nan_from_64(self, status));
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
        extended::pack(a_sign, a_exp + 0x3C00, (a_sig | IMPLICIT_BIT_64) << 11)
    }

    /// Rounds to an integral value in the same format.
    pub fn round_to_int(self, status: &mut Status) -> Self {
        let a = self;
        let a_exp = a.exp();
        if a_exp >= 0x433 {
            if a_exp == EXP_MAX_64 && a.frac() != 0 {
                return propagate_nan_64(a, a, status);
            }
            return a;
        }
        if a_exp < 0x3FF {
            if (a.to_bits() << 1) == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INEXACT);
            let a_sign = a.sign();
            match status.rounding_mode() {
                RoundingMode::NearestEven => {
                    if a_exp == 0x3FE && a.frac() != 0 {
                        return pack(a_sign, 0x3FF, 0);
                    }
                }
                RoundingMode::Down => {
                    return if a_sign {
                        Float64::from_bits(0xBFF0_0000_0000_0000)
                    } else {
                        Float64::ZERO
                    };
                }
                RoundingMode::Up => {
                    return if a_sign {
                        Float64::from_bits(0x8000_0000_0000_0000)
                    } else {
                        Float64::from_bits(0x3FF0_0000_0000_0000)
                    };
                }
                RoundingMode::TowardZero => {}
            }
            return pack(a_sign, 0, 0);
        }
        let last_bit_mask = 1u64 << (0x433 - a_exp);
        let round_bits_mask = last_bit_mask - 1;
        let mut z = a.to_bits();
        let rounding_mode = status.rounding_mode();
        if rounding_mode == RoundingMode::NearestEven {
            z += last_bit_mask >> 1;
            if (z & round_bits_mask) == 0 {
                z &= !last_bit_mask;
            }
        } else if rounding_mode != RoundingMode::TowardZero {
            if ((z >> 63) != 0) != (rounding_mode == RoundingMode::Up) {
                z += round_bits_mask;
            }
        }
        z &= !round_bits_mask;
        if z != a.to_bits() {
            status.raise(ExceptionFlags::INEXACT);
        }
        Float64::from_bits(z)
    }
}

//! binary64 arithmetic: add, sub, mul, div, remainder, square root.
//!
//! Same structure as the binary32 versions, widened to 64-bit
//! significands: multiplication and division work through the 128-bit
//! primitives, and the square root refines a 32-bit seed with one
//! division step before the correction loop.

use crate::exceptions::ExceptionFlags;
use crate::nan::{propagate_nan_64, DEFAULT_NAN_64};
use crate::primitives::{
    add_128, estimate_div_128_by_64, estimate_sqrt_32, mul_64_to_128, shift_right_jam_64,
    sub_128,
};
use crate::rounding::RoundingMode;
use crate::status::Status;

use super::{
    normalize_round_and_pack, normalize_subnormal, pack, round_and_pack, Float64,
    EXP_MAX_64, IMPLICIT_BIT_64,
};

/// Adds the magnitudes of `a` and `b`; the result carries `z_sign`.
///
/// Significands are pre-shifted left by 9 for the carry and guard bits.
fn add_sigs(a: Float64, b: Float64, z_sign: bool, status: &mut Status) -> Float64 {
    let mut a_sig = a.frac() << 9;
    let a_exp = a.exp();
    let mut b_sig = b.frac() << 9;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    let z_exp;
    if exp_diff > 0 {
        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return a;
        }
        if b_exp == 0 {
            if b_sig != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            exp_diff -= 1;
        } else {
            b_sig |= 0x2000_0000_0000_0000;
        }
        b_sig = shift_right_jam_64(b_sig, exp_diff as u32);
        z_exp = a_exp;
    } else if exp_diff < 0 {
        if b_exp == EXP_MAX_64 {
            if b_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_64, 0);
        }
        if a_exp == 0 {
            if a_sig != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            exp_diff += 1;
        } else {
            a_sig |= 0x2000_0000_0000_0000;
        }
        a_sig = shift_right_jam_64(a_sig, (-exp_diff) as u32);
        z_exp = b_exp;
    } else {
        if a_exp == EXP_MAX_64 {
            if (a_sig | b_sig) != 0 {
                return propagate_nan_64(a, b, status);
            }
            return a;
        }
        if a_exp == 0 {
            if (a_sig | b_sig) != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, 0, (a_sig + b_sig) >> 9);
        }
        let z_sig = 0x4000_0000_0000_0000 + a_sig + b_sig;
        return round_and_pack(z_sign, a_exp, z_sig, status);
    }
    // The shifted operand sits below bit 61; the OR injects the larger
    // operand's implicit bit into the sum.
    a_sig |= 0x2000_0000_0000_0000;
    let mut z_sig = (a_sig + b_sig) << 1;
    let mut z_exp = z_exp - 1;
    if (z_sig as i64) < 0 {
        z_sig = a_sig + b_sig;
        z_exp += 1;
    }
    round_and_pack(z_sign, z_exp, z_sig, status)
}

/// Subtracts the magnitude of `b` from that of `a`; the difference
/// carries `z_sign`, flipped when `b`'s magnitude is larger.
fn sub_sigs(a: Float64, b: Float64, z_sign: bool, status: &mut Status) -> Float64 {
    let mut a_sig = a.frac() << 10;
    let mut a_exp = a.exp();
    let mut b_sig = b.frac() << 10;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    if exp_diff == 0 {
        if a_exp == EXP_MAX_64 {
            if (a_sig | b_sig) != 0 {
                return propagate_nan_64(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return Float64::from_bits(DEFAULT_NAN_64);
        }
        if a_exp == 0 {
            if (a_sig | b_sig) != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            a_exp = 1;
        }
        if b_sig < a_sig {
            return normalize_round_and_pack(z_sign, a_exp - 1, a_sig - b_sig, status);
        }
        if a_sig < b_sig {
            return normalize_round_and_pack(!z_sign, a_exp - 1, b_sig - a_sig, status);
        }
        return pack(status.rounding_mode() == RoundingMode::Down, 0, 0);
    }

    if exp_diff > 0 {
        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return a;
        }
        if b_exp == 0 {
            if b_sig != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            exp_diff -= 1;
        } else {
            b_sig |= 0x4000_0000_0000_0000;
        }
        b_sig = shift_right_jam_64(b_sig, exp_diff as u32);
        a_sig |= 0x4000_0000_0000_0000;
        return normalize_round_and_pack(z_sign, a_exp - 1, a_sig - b_sig, status);
    }

    if b_exp == EXP_MAX_64 {
        if b_sig != 0 {
            return propagate_nan_64(a, b, status);
        }
        if a_sig != 0 && a_exp == 0 {
            status.raise(ExceptionFlags::DENORMAL);
        }
        return pack(!z_sign, EXP_MAX_64, 0);
    }
    if a_exp == 0 {
        if a_sig != 0 {
            status.raise(ExceptionFlags::DENORMAL);
        }
        exp_diff += 1;
    } else {
        a_sig |= 0x4000_0000_0000_0000;
    }
    a_sig = shift_right_jam_64(a_sig, (-exp_diff) as u32);
    b_sig |= 0x4000_0000_0000_0000;
    normalize_round_and_pack(!z_sign, b_exp - 1, b_sig - a_sig, status)
}

impl Float64 {
    /// Adds `b` to `self` under the current rounding mode.
    pub fn add(self, b: Self, status: &mut Status) -> Self {
        if self.sign() == b.sign() {
            add_sigs(self, b, self.sign(), status)
        } else {
            sub_sigs(self, b, self.sign(), status)
        }
    }

    /// Subtracts `b` from `self` under the current rounding mode.
    pub fn sub(self, b: Self, status: &mut Status) -> Self {
        if self.sign() == b.sign() {
            sub_sigs(self, b, self.sign(), status)
        } else {
            add_sigs(self, b, self.sign(), status)
        }
    }

    /// Multiplies `self` by `b` under the current rounding mode.
    pub fn mul(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 || (b_exp == EXP_MAX_64 && b_sig != 0) {
                return propagate_nan_64(a, b, status);
            }
            if b_exp == 0 && b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float64::from_bits(DEFAULT_NAN_64);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_64, 0);
        }
        if b_exp == EXP_MAX_64 {
            if b_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if a_exp == 0 && a_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float64::from_bits(DEFAULT_NAN_64);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_64, 0);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                if b_sig != 0 && b_exp == 0 {
                    status.raise(ExceptionFlags::DENORMAL);
                }
                return pack(z_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                return pack(z_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(b_sig);
            b_exp = exp;
            b_sig = sig;
        }
        let mut z_exp = a_exp + b_exp - 0x3FF;
        a_sig = (a_sig | IMPLICIT_BIT_64) << 10;
        b_sig = (b_sig | IMPLICIT_BIT_64) << 11;
        let (mut z_sig, z_sig_low) = mul_64_to_128(a_sig, b_sig);
        z_sig |= (z_sig_low != 0) as u64;
        if (z_sig << 1) as i64 >= 0 {
            z_sig <<= 1;
            z_exp -= 1;
        }
        round_and_pack(z_sign, z_exp, z_sig, status)
    }

    /// Divides `self` by `b` under the current rounding mode.
    ///
    /// The quotient estimate from the 128÷64 primitive is verified by
    /// back-multiplication and corrected downward; the final remainder
    /// sets the sticky bit.
    pub fn div(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if b_exp == EXP_MAX_64 {
                if b_sig != 0 {
                    return propagate_nan_64(a, b, status);
                }
                status.raise(ExceptionFlags::INVALID);
                return Float64::from_bits(DEFAULT_NAN_64);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_64, 0);
        }
        if b_exp == EXP_MAX_64 {
            if b_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, 0, 0);
        }
        if b_exp == 0 {
            if b_sig == 0 {
                if a_exp == 0 && a_sig == 0 {
                    status.raise(ExceptionFlags::INVALID);
                    return Float64::from_bits(DEFAULT_NAN_64);
                }
                status.raise(ExceptionFlags::DIV_BY_ZERO);
                return pack(z_sign, EXP_MAX_64, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(b_sig);
            b_exp = exp;
            b_sig = sig;
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return pack(z_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }
        let mut z_exp = a_exp - b_exp + 0x3FD;
        a_sig = (a_sig | IMPLICIT_BIT_64) << 10;
        b_sig = (b_sig | IMPLICIT_BIT_64) << 11;
        if b_sig <= a_sig + a_sig {
            a_sig >>= 1;
            z_exp += 1;
        }
        let mut z_sig = estimate_div_128_by_64(a_sig, 0, b_sig);
        if (z_sig & 0x1FF) <= 2 {
            let (term0, term1) = mul_64_to_128(b_sig, z_sig);
            let (mut rem0, mut rem1) = sub_128(a_sig, 0, term0, term1);
            while (rem0 as i64) < 0 {
                z_sig -= 1;
                let (r0, r1) = add_128(rem0, rem1, 0, b_sig);
                rem0 = r0;
                rem1 = r1;
            }
            z_sig |= (rem1 != 0) as u64;
        }
        round_and_pack(z_sign, z_exp, z_sig, status)
    }

    /// IEEE remainder of `self` with respect to `b`; exact by
    /// construction, so `inexact` is never raised.
    pub fn rem(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let a_sign = a.sign();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 || (b_exp == EXP_MAX_64 && b_sig != 0) {
                return propagate_nan_64(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return Float64::from_bits(DEFAULT_NAN_64);
        }
        if b_exp == EXP_MAX_64 {
            if b_sig != 0 {
                return propagate_nan_64(a, b, status);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return a;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float64::from_bits(DEFAULT_NAN_64);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(b_sig);
            b_exp = exp;
            b_sig = sig;
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return pack(a_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }

        let mut exp_diff = a_exp - b_exp;
        a_sig = (a_sig | IMPLICIT_BIT_64) << 11;
        b_sig = (b_sig | IMPLICIT_BIT_64) << 11;
        if exp_diff < 0 {
            if exp_diff < -1 {
                return a;
            }
            a_sig >>= 1;
        }
        let mut q = (b_sig <= a_sig) as u64;
        if q != 0 {
            a_sig -= b_sig;
        }
        exp_diff -= 64;
        while exp_diff > 0 {
            q = estimate_div_128_by_64(a_sig, 0, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            a_sig = (b_sig >> 2).wrapping_mul(q).wrapping_neg();
            exp_diff -= 62;
        }
        exp_diff += 64;
        if exp_diff > 0 {
            q = estimate_div_128_by_64(a_sig, 0, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            q >>= 64 - exp_diff;
            b_sig >>= 2;
            a_sig = ((a_sig >> 1) << (exp_diff - 1)).wrapping_sub(b_sig.wrapping_mul(q));
        } else {
            a_sig >>= 2;
            b_sig >>= 2;
        }

        let mut alternate_a_sig;
        loop {
            alternate_a_sig = a_sig;
            q = q.wrapping_add(1);
            a_sig = a_sig.wrapping_sub(b_sig);
            if (a_sig as i64) < 0 {
                break;
            }
        }
        let sig_mean = a_sig.wrapping_add(alternate_a_sig) as i64;
        if sig_mean < 0 || (sig_mean == 0 && (q & 1) != 0) {
            a_sig = alternate_a_sig;
        }
        let z_sign = (a_sig as i64) < 0;
        if z_sign {
            a_sig = a_sig.wrapping_neg();
        }
        normalize_round_and_pack(a_sign != z_sign, b_exp, a_sig, status)
    }

    /// Square root of `self` under the current rounding mode.
    pub fn sqrt(self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let a_sign = a.sign();

        if a_exp == EXP_MAX_64 {
            if a_sig != 0 {
                return propagate_nan_64(a, a, status);
            }
            if !a_sign {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return Float64::from_bits(DEFAULT_NAN_64);
        }
        if a_sign {
            if a_exp == 0 && a_sig == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return Float64::from_bits(DEFAULT_NAN_64);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return Float64::ZERO;
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }
        let z_exp = ((a_exp - 0x3FF) >> 1) + 0x3FE;
        a_sig |= IMPLICIT_BIT_64;
        let seed = estimate_sqrt_32(a_exp, (a_sig >> 21) as u32) as u64;
        a_sig <<= 9 - (a_exp & 1) as u32;
        let mut z_sig = estimate_div_128_by_64(a_sig, 0, seed << 32).wrapping_add(seed << 30);
        if (z_sig & 0x1FF) <= 5 {
            let mut double_z_sig = z_sig << 1;
            let (term0, term1) = mul_64_to_128(z_sig, z_sig);
            let (mut rem0, mut rem1) = sub_128(a_sig, 0, term0, term1);
            while (rem0 as i64) < 0 {
                z_sig -= 1;
                double_z_sig -= 2;
                let (r0, r1) = add_128(rem0, rem1, z_sig >> 63, double_z_sig | 1);
                rem0 = r0;
                rem1 = r1;
            }
            z_sig |= ((rem0 | rem1) != 0) as u64;
        }
        round_and_pack(false, z_exp, z_sig, status)
    }
}

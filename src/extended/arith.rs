//! Extended-precision arithmetic: add, sub, mul, div, remainder, sqrt.
//!
//! Intermediates carry a 128-bit significand pair. Division and square
//! root build the quotient/root one 64-bit word at a time from the
//! saturating estimate primitive, correcting each word against a wide
//! back-multiplied remainder. The remainder keeps full 80-bit precision
//! regardless of the status object's rounding-precision control.

use crate::exceptions::ExceptionFlags;
use crate::nan::{propagate_nan_x80, DEFAULT_NAN_X80_EXP, DEFAULT_NAN_X80_FRAC};
use crate::primitives::{
    add_128, add_192, eq_128, estimate_div_128_by_64, estimate_sqrt_32, le_128, lt_128,
    mul_64_to_128, shift_right_128, shift_right_extra_jam_64, shift_right_jam_128,
    short_shift_left_128, sub_128, sub_192,
};
use crate::rounding::{RoundingMode, RoundingPrecision};
use crate::status::Status;

use super::{
    normalize_round_and_pack, normalize_subnormal, pack, round_and_pack, FloatX80,
    EXP_MAX_X80, INTEGER_BIT,
};

/// Default NaN result for operations that invent a NaN.
fn default_nan() -> FloatX80 {
    FloatX80::new(DEFAULT_NAN_X80_EXP, DEFAULT_NAN_X80_FRAC)
}

/// Adds the magnitudes of `a` and `b`; the result carries `z_sign`.
fn add_sigs(a: FloatX80, b: FloatX80, z_sign: bool, status: &mut Status) -> FloatX80 {
    let mut a_sig = a.frac;
    let a_exp = a.exp();
    let mut b_sig = b.frac;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    let z_exp;
    let z_sig1;
    if exp_diff > 0 {
        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return a;
        }
        if b_exp == 0 {
            exp_diff -= 1;
        }
        let (s, extra) = shift_right_extra_jam_64(b_sig, 0, exp_diff as u32);
        b_sig = s;
        z_sig1 = extra;
        z_exp = a_exp;
    } else if exp_diff < 0 {
        if b_exp == EXP_MAX_X80 {
            if (b_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return pack(z_sign, EXP_MAX_X80, INTEGER_BIT);
        }
        if a_exp == 0 {
            exp_diff += 1;
        }
        let (s, extra) = shift_right_extra_jam_64(a_sig, 0, (-exp_diff) as u32);
        a_sig = s;
        z_sig1 = extra;
        z_exp = b_exp;
    } else {
        if a_exp == EXP_MAX_X80 {
            if ((a_sig | b_sig) << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return a;
        }
        let z_sig0 = a_sig.wrapping_add(b_sig);
        if a_exp == 0 {
            if z_sig0 == 0 {
                return pack(z_sign, 0, 0);
            }
            let (exp, sig) = normalize_subnormal(z_sig0);
            return round_and_pack(
                status.rounding_precision(),
                z_sign,
                exp,
                sig,
                0,
                status,
            );
        }
        // Two explicit integer bits always carry out of bit 63.
        let (s0, s1) = shift_right_extra_jam_64(z_sig0, 0, 1);
        return round_and_pack(
            status.rounding_precision(),
            z_sign,
            a_exp + 1,
            s0 | INTEGER_BIT,
            s1,
            status,
        );
    }
    let z_sig0 = a_sig.wrapping_add(b_sig);
    if (z_sig0 as i64) < 0 {
        return round_and_pack(
            status.rounding_precision(),
            z_sign,
            z_exp,
            z_sig0,
            z_sig1,
            status,
        );
    }
    // The sum wrapped past bit 63; renormalize with the carry restored.
    let (s0, s1) = shift_right_extra_jam_64(z_sig0, z_sig1, 1);
    round_and_pack(
        status.rounding_precision(),
        z_sign,
        z_exp + 1,
        s0 | INTEGER_BIT,
        s1,
        status,
    )
}

/// Subtracts the magnitude of `b` from that of `a`; the difference
/// carries `z_sign`, flipped when `b`'s magnitude is larger.
fn sub_sigs(a: FloatX80, b: FloatX80, z_sign: bool, status: &mut Status) -> FloatX80 {
    let mut a_sig = a.frac;
    let mut a_exp = a.exp();
    let mut b_sig = b.frac;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    if exp_diff == 0 {
        if a_exp == EXP_MAX_X80 {
            if ((a_sig | b_sig) << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return default_nan();
        }
        if a_exp == 0 {
            a_exp = 1;
        }
        if b_sig < a_sig {
            let (s0, s1) = sub_128(a_sig, 0, b_sig, 0);
            return normalize_round_and_pack(
                status.rounding_precision(),
                z_sign,
                a_exp,
                s0,
                s1,
                status,
            );
        }
        if a_sig < b_sig {
            let (s0, s1) = sub_128(b_sig, 0, a_sig, 0);
            return normalize_round_and_pack(
                status.rounding_precision(),
                !z_sign,
                a_exp,
                s0,
                s1,
                status,
            );
        }
        return pack(status.rounding_mode() == RoundingMode::Down, 0, 0);
    }

    if exp_diff > 0 {
        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return a;
        }
        if b_exp == 0 {
            exp_diff -= 1;
        }
        let (s, extra) = shift_right_jam_128(b_sig, 0, exp_diff as u32);
        b_sig = s;
        let (s0, s1) = sub_128(a_sig, 0, b_sig, extra);
        return normalize_round_and_pack(
            status.rounding_precision(),
            z_sign,
            a_exp,
            s0,
            s1,
            status,
        );
    }

    if b_exp == EXP_MAX_X80 {
        if (b_sig << 1) != 0 {
            return propagate_nan_x80(a, b, status);
        }
        return pack(!z_sign, EXP_MAX_X80, INTEGER_BIT);
    }
    if a_exp == 0 {
        exp_diff += 1;
    }
    let (s, extra) = shift_right_jam_128(a_sig, 0, (-exp_diff) as u32);
    a_sig = s;
    let (s0, s1) = sub_128(b_sig, 0, a_sig, extra);
    normalize_round_and_pack(
        status.rounding_precision(),
        !z_sign,
        b_exp,
        s0,
        s1,
        status,
    )
}

impl FloatX80 {
    /// Adds `b` to `self` under the current rounding mode and precision.
    pub fn add(self, b: Self, status: &mut Status) -> Self {
        if self.sign() == b.sign() {
            add_sigs(self, b, self.sign(), status)
        } else {
            sub_sigs(self, b, self.sign(), status)
        }
    }

    /// Subtracts `b` from `self` under the current rounding mode and
    /// precision.
    pub fn sub(self, b: Self, status: &mut Status) -> Self {
        if self.sign() == b.sign() {
            sub_sigs(self, b, self.sign(), status)
        } else {
            add_sigs(self, b, self.sign(), status)
        }
    }

    /// Multiplies `self` by `b`.
    pub fn mul(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac;
        let mut a_exp = a.exp();
        let mut b_sig = b.frac;
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 || (b_exp == EXP_MAX_X80 && (b_sig << 1) != 0) {
                return propagate_nan_x80(a, b, status);
            }
            if b_exp == 0 && b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return default_nan();
            }
            return pack(z_sign, EXP_MAX_X80, INTEGER_BIT);
        }
        if b_exp == EXP_MAX_X80 {
            if (b_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            if a_exp == 0 && a_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return default_nan();
            }
            return pack(z_sign, EXP_MAX_X80, INTEGER_BIT);
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
        if b_exp == 0 {
            if b_sig == 0 {
                return pack(z_sign, 0, 0);
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(b_sig);
            b_exp = exp;
            b_sig = sig;
        }
        let mut z_exp = a_exp + b_exp - 0x3FFE;
        let (mut z_sig0, mut z_sig1) = mul_64_to_128(a_sig, b_sig);
        if (z_sig0 as i64) > 0 {
            let (s0, s1) = short_shift_left_128(z_sig0, z_sig1, 1);
            z_sig0 = s0;
            z_sig1 = s1;
            z_exp -= 1;
        }
        round_and_pack(
            status.rounding_precision(),
            z_sign,
            z_exp,
            z_sig0,
            z_sig1,
            status,
        )
    }

    /// Divides `self` by `b`.
    ///
    /// The quotient is built from two estimated 64-bit words, each
    /// corrected against a back-multiplied remainder; the final remainder
    /// sets the sticky bit.
    pub fn div(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac;
        let mut a_exp = a.exp();
        let mut b_sig = b.frac;
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_X80 {
            if (a_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            if b_exp == EXP_MAX_X80 {
                if (b_sig << 1) != 0 {
                    return propagate_nan_x80(a, b, status);
                }
                status.raise(ExceptionFlags::INVALID);
                return default_nan();
            }
            return pack(z_sign, EXP_MAX_X80, INTEGER_BIT);
        }
        if b_exp == EXP_MAX_X80 {
            if (b_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return pack(z_sign, 0, 0);
        }
        if b_exp == 0 {
            if b_sig == 0 {
                if a_exp == 0 && a_sig == 0 {
                    status.raise(ExceptionFlags::INVALID);
                    return default_nan();
                }
                status.raise(ExceptionFlags::DIV_BY_ZERO);
                return pack(z_sign, EXP_MAX_X80, INTEGER_BIT);
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
        let mut z_exp = a_exp - b_exp + 0x3FFE;
        let mut rem1 = 0;
        if b_sig <= a_sig {
            let (s0, s1) = shift_right_128(a_sig, 0, 1);
            a_sig = s0;
            rem1 = s1;
            z_exp += 1;
        }
        let mut z_sig0 = estimate_div_128_by_64(a_sig, rem1, b_sig);
        let (term0, term1) = mul_64_to_128(b_sig, z_sig0);
        let (mut rem0, mut rem1) = sub_128(a_sig, rem1, term0, term1);
        while (rem0 as i64) < 0 {
            z_sig0 = z_sig0.wrapping_sub(1);
            let (r0, r1) = add_128(rem0, rem1, 0, b_sig);
            rem0 = r0;
            rem1 = r1;
        }
        let mut z_sig1 = estimate_div_128_by_64(rem1, 0, b_sig);
        if (z_sig1 << 1) <= 8 {
            let (term1, term2) = mul_64_to_128(b_sig, z_sig1);
            let (r1, mut rem2) = sub_128(rem1, 0, term1, term2);
            rem1 = r1;
            while (rem1 as i64) < 0 {
                z_sig1 = z_sig1.wrapping_sub(1);
                let (r1, r2) = add_128(rem1, rem2, 0, b_sig);
                rem1 = r1;
                rem2 = r2;
            }
            z_sig1 |= ((rem1 | rem2) != 0) as u64;
        }
        round_and_pack(
            status.rounding_precision(),
            z_sign,
            z_exp,
            z_sig0,
            z_sig1,
            status,
        )
    }

    /// IEEE remainder of `self` with respect to `b`.
    ///
    /// Computed at full 80-bit precision regardless of the rounding
    /// precision control; exact, so `inexact` is never raised.
    pub fn rem(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig0 = a.frac;
        let mut a_exp = a.exp();
        let mut b_sig = b.frac;
        let mut b_exp = b.exp();

        if a_exp == EXP_MAX_X80 {
            if (a_sig0 << 1) != 0 || (b_exp == EXP_MAX_X80 && (b_sig << 1) != 0) {
                return propagate_nan_x80(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return default_nan();
        }
        if b_exp == EXP_MAX_X80 {
            if (b_sig << 1) != 0 {
                return propagate_nan_x80(a, b, status);
            }
            return a;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return default_nan();
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(b_sig);
            b_exp = exp;
            b_sig = sig;
        }
        if a_exp == 0 {
            if (a_sig0 << 1) == 0 {
                return a;
            }
            let (exp, sig) = normalize_subnormal(a_sig0);
            a_exp = exp;
            a_sig0 = sig;
        }
        b_sig |= INTEGER_BIT;
        let mut z_sign = a.sign();
        let mut exp_diff = a_exp - b_exp;
        let mut a_sig1 = 0;
        if exp_diff < 0 {
            if exp_diff < -1 {
                return a;
            }
            let (s0, s1) = shift_right_128(a_sig0, 0, 1);
            a_sig0 = s0;
            a_sig1 = s1;
            exp_diff = 0;
        }
        let mut q = u64::from(b_sig <= a_sig0);
        if q != 0 {
            a_sig0 -= b_sig;
        }
        exp_diff -= 64;
        while exp_diff > 0 {
            q = estimate_div_128_by_64(a_sig0, a_sig1, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            let (term0, term1) = mul_64_to_128(b_sig, q);
            let (s0, s1) = sub_128(a_sig0, a_sig1, term0, term1);
            let (s0, s1) = short_shift_left_128(s0, s1, 62);
            a_sig0 = s0;
            a_sig1 = s1;
            exp_diff -= 62;
        }
        exp_diff += 64;
        let term0;
        let term1;
        if exp_diff > 0 {
            q = estimate_div_128_by_64(a_sig0, a_sig1, b_sig);
            q = if q > 2 { q - 2 } else { 0 };
            q >>= 64 - exp_diff;
            let (t0, t1) = mul_64_to_128(b_sig, q << (64 - exp_diff));
            let (s0, s1) = sub_128(a_sig0, a_sig1, t0, t1);
            a_sig0 = s0;
            a_sig1 = s1;
            let (t0, t1) = short_shift_left_128(0, b_sig, (64 - exp_diff) as u32);
            term0 = t0;
            term1 = t1;
            while le_128(term0, term1, a_sig0, a_sig1) {
                q = q.wrapping_add(1);
                let (s0, s1) = sub_128(a_sig0, a_sig1, term0, term1);
                a_sig0 = s0;
                a_sig1 = s1;
            }
        } else {
            term1 = 0;
            term0 = b_sig;
        }
        let (alt_a_sig0, alt_a_sig1) = sub_128(term0, term1, a_sig0, a_sig1);
        if lt_128(alt_a_sig0, alt_a_sig1, a_sig0, a_sig1)
            || (eq_128(alt_a_sig0, alt_a_sig1, a_sig0, a_sig1) && (q & 1) != 0)
        {
            a_sig0 = alt_a_sig0;
            a_sig1 = alt_a_sig1;
            z_sign = !z_sign;
        }
        normalize_round_and_pack(
            RoundingPrecision::Extended,
            z_sign,
            b_exp + exp_diff,
            a_sig0,
            a_sig1,
            status,
        )
    }

    /// Square root of `self`.
    ///
    /// A 32-bit seed is lifted to a 64-bit root word by one division
    /// step, corrected against the squared remainder, then extended by a
    /// second word the same way.
    pub fn sqrt(self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig0 = a.frac;
        let mut a_exp = a.exp();
        let a_sign = a.sign();

        if a_exp == EXP_MAX_X80 {
            if (a_sig0 << 1) != 0 {
                return propagate_nan_x80(a, a, status);
            }
            if !a_sign {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return default_nan();
        }
        if a_sign {
            if a_exp == 0 && a_sig0 == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return default_nan();
        }
        if a_exp == 0 {
            if a_sig0 == 0 {
                return FloatX80::ZERO;
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig0);
            a_exp = exp;
            a_sig0 = sig;
        }
        let z_exp = ((a_exp - 0x3FFF) >> 1) + 0x3FFF;
        let seed = u64::from(estimate_sqrt_32(a_exp, (a_sig0 >> 32) as u32));
        let (s0, s1) = shift_right_128(a_sig0, 0, (2 + (a_exp & 1)) as u32);
        a_sig0 = s0;
        let a_sig1 = s1;
        let mut z_sig0 =
            estimate_div_128_by_64(a_sig0, a_sig1, seed << 32).wrapping_add(seed << 30);
        let mut double_z_sig0 = z_sig0 << 1;
        let (term0, term1) = mul_64_to_128(z_sig0, z_sig0);
        let (mut rem0, mut rem1) = sub_128(a_sig0, a_sig1, term0, term1);
        while (rem0 as i64) < 0 {
            z_sig0 = z_sig0.wrapping_sub(1);
            double_z_sig0 -= 2;
            let (r0, r1) = add_128(rem0, rem1, z_sig0 >> 63, double_z_sig0 | 1);
            rem0 = r0;
            rem1 = r1;
        }
        let mut z_sig1 = estimate_div_128_by_64(rem1, 0, double_z_sig0);
        if (z_sig1 & 0x3FFF_FFFF_FFFF_FFFF) <= 5 {
            if z_sig1 == 0 {
                z_sig1 = 1;
            }
            let (term1, term2) = mul_64_to_128(double_z_sig0, z_sig1);
            let (r1, rem2) = sub_128(rem1, 0, term1, term2);
            let (term2, term3) = mul_64_to_128(z_sig1, z_sig1);
            let (mut rem1, mut rem2, mut rem3) = sub_192(r1, rem2, 0, 0, term2, term3);
            while (rem1 as i64) < 0 {
                z_sig1 = z_sig1.wrapping_sub(1);
                let (t2, t3) = short_shift_left_128(0, z_sig1, 1);
                let (r1, r2, r3) =
                    add_192(rem1, rem2, rem3, 0, t2 | double_z_sig0, t3 | 1);
                rem1 = r1;
                rem2 = r2;
                rem3 = r3;
            }
            z_sig1 |= ((rem1 | rem2 | rem3) != 0) as u64;
        }
        let (s0, s1) = short_shift_left_128(0, z_sig1, 1);
        z_sig0 = s0 | double_z_sig0;
        z_sig1 = s1;
        round_and_pack(
            status.rounding_precision(),
            false,
            z_exp,
            z_sig0,
            z_sig1,
            status,
        )
    }
}

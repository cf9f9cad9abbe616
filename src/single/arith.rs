//! binary32 arithmetic: add, sub, mul, div, remainder, square root.
//!
//! Addition and subtraction share two magnitude helpers selected by the
//! operand signs. All paths decode the operands, handle specials (NaN,
//! infinity, zero, subnormal) up front, compute in widened integers with
//! guard bits at the low end, and finish in the round-and-pack machinery.

use crate::exceptions::ExceptionFlags;
use crate::nan::{propagate_nan_32, DEFAULT_NAN_32};
use crate::primitives::{estimate_div_128_by_64, estimate_sqrt_32, shift_right_jam_32, shift_right_jam_64};
use crate::rounding::RoundingMode;
use crate::status::Status;

use super::{
    normalize_round_and_pack, normalize_subnormal, pack, round_and_pack, Float32,
    EXP_MAX_32, IMPLICIT_BIT_32,
};

/// Adds the magnitudes of `a` and `b`; the result carries `z_sign`.
///
/// Significands are pre-shifted left by 6 so the sum keeps a carry bit
/// plus guard bits. `z_sign` is ignored when the result is a NaN.
fn add_sigs(a: Float32, b: Float32, z_sign: bool, status: &mut Status) -> Float32 {
    let mut a_sig = a.frac() << 6;
    let a_exp = a.exp();
    let mut b_sig = b.frac() << 6;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    let z_exp;
    if exp_diff > 0 {
        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return propagate_nan_32(a, b, status);
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
            b_sig |= 0x2000_0000;
        }
        b_sig = shift_right_jam_32(b_sig, exp_diff as u32);
        z_exp = a_exp;
    } else if exp_diff < 0 {
        if b_exp == EXP_MAX_32 {
            if b_sig != 0 {
                return propagate_nan_32(a, b, status);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_32, 0);
        }
        if a_exp == 0 {
            if a_sig != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            exp_diff += 1;
        } else {
            a_sig |= 0x2000_0000;
        }
        a_sig = shift_right_jam_32(a_sig, (-exp_diff) as u32);
        z_exp = b_exp;
    } else {
        if a_exp == EXP_MAX_32 {
            if (a_sig | b_sig) != 0 {
                return propagate_nan_32(a, b, status);
            }
            return a;
        }
        if a_exp == 0 {
            if (a_sig | b_sig) != 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            // A subnormal sum may carry into the smallest normal; the
            // addition-based pack absorbs that into the exponent field.
            return pack(z_sign, 0, (a_sig + b_sig) >> 6);
        }
        let z_sig = 0x4000_0000 + a_sig + b_sig;
        return round_and_pack(z_sign, a_exp, z_sig, status);
    }
    // The shifted operand now sits entirely below bit 29, so this OR
    // injects the larger operand's implicit bit into the sum.
    a_sig |= 0x2000_0000;
    let mut z_sig = (a_sig + b_sig) << 1;
    let mut z_exp = z_exp - 1;
    if (z_sig as i32) < 0 {
        z_sig = a_sig + b_sig;
        z_exp += 1;
    }
    round_and_pack(z_sign, z_exp, z_sig, status)
}

/// Subtracts the magnitude of `b` from that of `a`; the difference
/// carries `z_sign`, flipped when `b`'s magnitude is larger.
///
/// Significands are pre-shifted left by 7. Equal magnitudes produce a
/// zero whose sign is negative only under round-down.
fn sub_sigs(a: Float32, b: Float32, z_sign: bool, status: &mut Status) -> Float32 {
    let mut a_sig = a.frac() << 7;
    let mut a_exp = a.exp();
    let mut b_sig = b.frac() << 7;
    let b_exp = b.exp();

    let mut exp_diff = a_exp - b_exp;
    if exp_diff == 0 {
        if a_exp == EXP_MAX_32 {
            if (a_sig | b_sig) != 0 {
                return propagate_nan_32(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return Float32::from_bits(DEFAULT_NAN_32);
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
        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return propagate_nan_32(a, b, status);
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
            b_sig |= 0x4000_0000;
        }
        b_sig = shift_right_jam_32(b_sig, exp_diff as u32);
        a_sig |= 0x4000_0000;
        return normalize_round_and_pack(z_sign, a_exp - 1, a_sig - b_sig, status);
    }

    if b_exp == EXP_MAX_32 {
        if b_sig != 0 {
            return propagate_nan_32(a, b, status);
        }
        if a_sig != 0 && a_exp == 0 {
            status.raise(ExceptionFlags::DENORMAL);
        }
        return pack(!z_sign, EXP_MAX_32, 0);
    }
    if a_exp == 0 {
        if a_sig != 0 {
            status.raise(ExceptionFlags::DENORMAL);
        }
        exp_diff += 1;
    } else {
        a_sig |= 0x4000_0000;
    }
    a_sig = shift_right_jam_32(a_sig, (-exp_diff) as u32);
    b_sig |= 0x4000_0000;
    normalize_round_and_pack(!z_sign, b_exp - 1, b_sig - a_sig, status)
}

impl Float32 {
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
    ///
    /// 0×∞ raises `invalid` and yields the default NaN.
    pub fn mul(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 || (b_exp == EXP_MAX_32 && b_sig != 0) {
                return propagate_nan_32(a, b, status);
            }
            if b_exp == 0 && b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float32::from_bits(DEFAULT_NAN_32);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_32, 0);
        }
        if b_exp == EXP_MAX_32 {
            if b_sig != 0 {
                return propagate_nan_32(a, b, status);
            }
            if a_exp == 0 && a_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float32::from_bits(DEFAULT_NAN_32);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_32, 0);
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
        let mut z_exp = a_exp + b_exp - 0x7F;
        a_sig = (a_sig | IMPLICIT_BIT_32) << 7;
        b_sig = (b_sig | IMPLICIT_BIT_32) << 8;
        let mut z_sig =
            shift_right_jam_64(u64::from(a_sig) * u64::from(b_sig), 32) as u32;
        if (z_sig << 1) as i32 >= 0 {
            z_sig <<= 1;
            z_exp -= 1;
        }
        round_and_pack(z_sign, z_exp, z_sig, status)
    }

    /// Divides `self` by `b` under the current rounding mode.
    ///
    /// 0/0 and ∞/∞ raise `invalid`; a finite nonzero dividend over zero
    /// raises `divide_by_zero` and returns a signed infinity.
    pub fn div(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();
        let z_sign = a.sign() != b.sign();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return propagate_nan_32(a, b, status);
            }
            if b_exp == EXP_MAX_32 {
                if b_sig != 0 {
                    return propagate_nan_32(a, b, status);
                }
                status.raise(ExceptionFlags::INVALID);
                return Float32::from_bits(DEFAULT_NAN_32);
            }
            if b_sig != 0 && b_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return pack(z_sign, EXP_MAX_32, 0);
        }
        if b_exp == EXP_MAX_32 {
            if b_sig != 0 {
                return propagate_nan_32(a, b, status);
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
                    return Float32::from_bits(DEFAULT_NAN_32);
                }
                status.raise(ExceptionFlags::DIV_BY_ZERO);
                return pack(z_sign, EXP_MAX_32, 0);
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
        let mut z_exp = a_exp - b_exp + 0x7D;
        a_sig = (a_sig | IMPLICIT_BIT_32) << 7;
        b_sig = (b_sig | IMPLICIT_BIT_32) << 8;
        if b_sig <= a_sig + a_sig {
            a_sig >>= 1;
            z_exp += 1;
        }
        let mut z_sig = ((u64::from(a_sig) << 32) / u64::from(b_sig)) as u32;
        if (z_sig & 0x3F) == 0 {
            z_sig |=
                (u64::from(b_sig) * u64::from(z_sig) != u64::from(a_sig) << 32) as u32;
        }
        round_and_pack(z_sign, z_exp, z_sig, status)
    }

    /// IEEE remainder of `self` with respect to `b`.
    ///
    /// The quotient is rounded to the nearest integer with ties to even,
    /// so the remainder is exact and `inexact` is never raised. A zero
    /// divisor or infinite dividend raises `invalid`.
    pub fn rem(self, b: Self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let a_sign = a.sign();
        let mut b_sig = b.frac();
        let mut b_exp = b.exp();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 || (b_exp == EXP_MAX_32 && b_sig != 0) {
                return propagate_nan_32(a, b, status);
            }
            status.raise(ExceptionFlags::INVALID);
            return Float32::from_bits(DEFAULT_NAN_32);
        }
        if b_exp == EXP_MAX_32 {
            if b_sig != 0 {
                return propagate_nan_32(a, b, status);
            }
            if a_sig != 0 && a_exp == 0 {
                status.raise(ExceptionFlags::DENORMAL);
            }
            return a;
        }
        if b_exp == 0 {
            if b_sig == 0 {
                status.raise(ExceptionFlags::INVALID);
                return Float32::from_bits(DEFAULT_NAN_32);
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
        a_sig |= IMPLICIT_BIT_32;
        b_sig |= IMPLICIT_BIT_32;
        let mut q: u32;
        if exp_diff < 32 {
            a_sig <<= 8;
            b_sig <<= 8;
            if exp_diff < 0 {
                if exp_diff < -1 {
                    return a;
                }
                a_sig >>= 1;
            }
            q = (b_sig <= a_sig) as u32;
            if q != 0 {
                a_sig -= b_sig;
            }
            if exp_diff > 0 {
                q = ((u64::from(a_sig) << 32) / u64::from(b_sig)) as u32;
                q >>= 32 - exp_diff;
                b_sig >>= 2;
                a_sig = ((a_sig >> 1) << (exp_diff - 1)).wrapping_sub(b_sig.wrapping_mul(q));
            } else {
                a_sig >>= 2;
                b_sig >>= 2;
            }
        } else {
            if b_sig <= a_sig {
                a_sig -= b_sig;
            }
            let b_sig64 = u64::from(b_sig) << 40;
            let mut a_sig64 = u64::from(a_sig) << 40;
            exp_diff -= 64;
            while exp_diff > 0 {
                let mut q64 = estimate_div_128_by_64(a_sig64, 0, b_sig64);
                q64 = if q64 > 2 { q64 - 2 } else { 0 };
                a_sig64 = (u64::from(b_sig).wrapping_mul(q64) << 38).wrapping_neg();
                exp_diff -= 62;
            }
            exp_diff += 64;
            let mut q64 = estimate_div_128_by_64(a_sig64, 0, b_sig64);
            q64 = if q64 > 2 { q64 - 2 } else { 0 };
            q = (q64 >> (64 - exp_diff)) as u32;
            b_sig <<= 6;
            a_sig = (((a_sig64 >> 33) << (exp_diff - 1)) as u32)
                .wrapping_sub(b_sig.wrapping_mul(q));
        }

        let mut alternate_a_sig;
        loop {
            alternate_a_sig = a_sig;
            q = q.wrapping_add(1);
            a_sig = a_sig.wrapping_sub(b_sig);
            if (a_sig as i32) < 0 {
                break;
            }
        }
        let sig_mean = a_sig.wrapping_add(alternate_a_sig) as i32;
        if sig_mean < 0 || (sig_mean == 0 && (q & 1) != 0) {
            a_sig = alternate_a_sig;
        }
        let z_sign = (a_sig as i32) < 0;
        if z_sign {
            a_sig = a_sig.wrapping_neg();
        }
        normalize_round_and_pack(a_sign != z_sign, b_exp, a_sig, status)
    }

    /// Square root of `self` under the current rounding mode.
    ///
    /// √(−0) is −0; any other negative operand raises `invalid` and
    /// yields the default NaN.
    pub fn sqrt(self, status: &mut Status) -> Self {
        let a = self;
        let mut a_sig = a.frac();
        let mut a_exp = a.exp();
        let a_sign = a.sign();

        if a_exp == EXP_MAX_32 {
            if a_sig != 0 {
                return propagate_nan_32(a, a, status);
            }
            if !a_sign {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return Float32::from_bits(DEFAULT_NAN_32);
        }
        if a_sign {
            if a_exp == 0 && a_sig == 0 {
                return a;
            }
            status.raise(ExceptionFlags::INVALID);
            return Float32::from_bits(DEFAULT_NAN_32);
        }
        if a_exp == 0 {
            if a_sig == 0 {
                return Float32::ZERO;
            }
            status.raise(ExceptionFlags::DENORMAL);
            let (exp, sig) = normalize_subnormal(a_sig);
            a_exp = exp;
            a_sig = sig;
        }
        let z_exp = ((a_exp - 0x7F) >> 1) + 0x7E;
        a_sig = (a_sig | IMPLICIT_BIT_32) << 8;
        let mut z_sig = estimate_sqrt_32(a_exp, a_sig).wrapping_add(2);
        if (z_sig & 0x7F) <= 5 {
            if z_sig < 2 {
                return round_and_pack(false, z_exp, 0x7FFF_FFFF, status);
            }
            a_sig >>= (a_exp & 1) as u32;
            let term = u64::from(z_sig) * u64::from(z_sig);
            let mut rem = (u64::from(a_sig) << 32).wrapping_sub(term);
            while (rem as i64) < 0 {
                z_sig -= 1;
                rem = rem.wrapping_add((u64::from(z_sig) << 1) | 1);
            }
            z_sig |= (rem != 0) as u32;
        }
        z_sig = shift_right_jam_32(z_sig, 1);
        round_and_pack(false, z_exp, z_sig, status)
    }
}

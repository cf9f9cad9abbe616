//! Extended-precision comparisons.
//!
//! Same rules as the narrower formats, with the magnitude comparison run
//! over the `(sign_exp, frac)` pair as a 128-bit quantity. Equality must
//! tolerate the explicit integer bit: two encodings are equal when both
//! words match, or when both are zeros of either sign.

use crate::classify::{FloatClass, FloatRelation};
use crate::exceptions::ExceptionFlags;
use crate::primitives::{le_128, lt_128};
use crate::status::Status;

use super::FloatX80;

/// True when `a` and `b` are both zeros (of either sign).
#[inline]
fn both_zero(a: FloatX80, b: FloatX80) -> bool {
    ((a.sign_exp | b.sign_exp) << 1) == 0 && (a.frac | b.frac) == 0
}

/// Bit-level equality modulo zero signs.
#[inline]
fn eq_bits(a: FloatX80, b: FloatX80) -> bool {
    a.frac == b.frac
        && (a.sign_exp == b.sign_exp
            || (a.frac == 0 && ((a.sign_exp | b.sign_exp) << 1) == 0))
}

/// Magnitude-ordered less-than for same-sign operands.
#[inline]
fn lt_same_sign(a: FloatX80, b: FloatX80) -> bool {
    if a.sign() {
        lt_128(u64::from(b.sign_exp), b.frac, u64::from(a.sign_exp), a.frac)
    } else {
        lt_128(u64::from(a.sign_exp), a.frac, u64::from(b.sign_exp), b.frac)
    }
}

/// Magnitude-ordered less-or-equal for same-sign operands.
#[inline]
fn le_same_sign(a: FloatX80, b: FloatX80) -> bool {
    if a.sign() {
        le_128(u64::from(b.sign_exp), b.frac, u64::from(a.sign_exp), a.frac)
    } else {
        le_128(u64::from(a.sign_exp), a.frac, u64::from(b.sign_exp), b.frac)
    }
}

/// Raises `denormal` when either operand is subnormal.
fn check_denormal(a_class: FloatClass, b_class: FloatClass, status: &mut Status) {
    if a_class == FloatClass::Denormal || b_class == FloatClass::Denormal {
        status.raise(ExceptionFlags::DENORMAL);
    }
}

/// Handles NaN operands: raises `invalid` per the variant's rule and
/// reports whether the comparison is unordered.
fn check_nan(a: FloatX80, b: FloatX80, signal_any_nan: bool, status: &mut Status) -> bool {
    if a.classify() == FloatClass::Nan || b.classify() == FloatClass::Nan {
        if signal_any_nan || a.is_signaling_nan() || b.is_signaling_nan() {
            status.raise(ExceptionFlags::INVALID);
        }
        return true;
    }
    false
}

/// Ordered relation of two non-NaN operands.
fn ordered_relation(a: FloatX80, b: FloatX80) -> FloatRelation {
    if eq_bits(a, b) {
        return FloatRelation::Equal;
    }
    let a_sign = a.sign();
    if a_sign != b.sign() {
        return if a_sign {
            FloatRelation::Less
        } else {
            FloatRelation::Greater
        };
    }
    if lt_same_sign(a, b) {
        FloatRelation::Less
    } else {
        FloatRelation::Greater
    }
}

impl FloatX80 {
    /// Quiet equality: signaling NaNs raise `invalid`, quiet NaNs
    /// compare unequal silently.
    pub fn eq(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        eq_bits(self, b)
    }

    /// Less-or-equal; any NaN operand raises `invalid`.
    pub fn le(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        if self.sign() != b.sign() {
            return self.sign() || both_zero(self, b);
        }
        le_same_sign(self, b)
    }

    /// Less-than; any NaN operand raises `invalid`.
    pub fn lt(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        if self.sign() != b.sign() {
            return self.sign() && !both_zero(self, b);
        }
        lt_same_sign(self, b)
    }

    /// Equality that raises `invalid` for any NaN operand.
    pub fn eq_signaling(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        eq_bits(self, b)
    }

    /// Quiet less-or-equal: `invalid` only for signaling NaNs.
    pub fn le_quiet(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        if self.sign() != b.sign() {
            return self.sign() || both_zero(self, b);
        }
        le_same_sign(self, b)
    }

    /// Quiet less-than: `invalid` only for signaling NaNs.
    pub fn lt_quiet(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        if self.sign() != b.sign() {
            return self.sign() && !both_zero(self, b);
        }
        lt_same_sign(self, b)
    }

    /// True when either operand is a NaN; `invalid` only for signaling
    /// NaNs.
    pub fn unordered(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return true;
        }
        check_denormal(self.classify(), b.classify(), status);
        false
    }

    /// Four-way comparison; any NaN operand raises `invalid`.
    pub fn compare(self, b: Self, status: &mut Status) -> FloatRelation {
        if check_nan(self, b, true, status) {
            return FloatRelation::Unordered;
        }
        check_denormal(self.classify(), b.classify(), status);
        ordered_relation(self, b)
    }

    /// Four-way comparison; `invalid` only for signaling NaNs.
    pub fn compare_quiet(self, b: Self, status: &mut Status) -> FloatRelation {
        if check_nan(self, b, false, status) {
            return FloatRelation::Unordered;
        }
        check_denormal(self.classify(), b.classify(), status);
        ordered_relation(self, b)
    }
}

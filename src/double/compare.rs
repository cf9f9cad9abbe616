//! binary64 comparisons.
//!
//! Same rules as the binary32 family: NaNs make the relation unordered
//! (raising `invalid` per the variant), subnormal operands raise
//! `denormal`, zeros compare equal regardless of sign, and same-sign
//! magnitudes compare as raw bits, reversed when both are negative.

use crate::classify::{FloatClass, FloatRelation};
use crate::exceptions::ExceptionFlags;
use crate::status::Status;

use super::Float64;

/// True when `a` and `b` are both zeros (of either sign).
#[inline]
fn both_zero(a: Float64, b: Float64) -> bool {
    ((a.to_bits() | b.to_bits()) << 1) == 0
}

/// Raises `denormal` when either operand is subnormal.
fn check_denormal(a_class: FloatClass, b_class: FloatClass, status: &mut Status) {
    if a_class == FloatClass::Denormal || b_class == FloatClass::Denormal {
        status.raise(ExceptionFlags::DENORMAL);
    }
}

/// Handles NaN operands: raises `invalid` per the variant's rule and
/// reports whether the comparison is unordered.
fn check_nan(a: Float64, b: Float64, signal_any_nan: bool, status: &mut Status) -> bool {
    if a.classify() == FloatClass::Nan || b.classify() == FloatClass::Nan {
        if signal_any_nan || a.is_signaling_nan() || b.is_signaling_nan() {
            status.raise(ExceptionFlags::INVALID);
        }
        return true;
    }
    false
}

/// Ordered relation of two non-NaN operands.
fn ordered_relation(a: Float64, b: Float64) -> FloatRelation {
    if a.to_bits() == b.to_bits() || both_zero(a, b) {
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
    if a_sign != (a.to_bits() < b.to_bits()) {
        FloatRelation::Less
    } else {
        FloatRelation::Greater
    }
}

impl Float64 {
    /// Quiet equality: signaling NaNs raise `invalid`, quiet NaNs
    /// compare unequal silently.
    pub fn eq(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        self.to_bits() == b.to_bits() || both_zero(self, b)
    }

    /// Less-or-equal; any NaN operand raises `invalid`.
    pub fn le(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        let a_sign = self.sign();
        if a_sign != b.sign() {
            return a_sign || both_zero(self, b);
        }
        self.to_bits() == b.to_bits() || (a_sign != (self.to_bits() < b.to_bits()))
    }

    /// Less-than; any NaN operand raises `invalid`.
    pub fn lt(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        let a_sign = self.sign();
        if a_sign != b.sign() {
            return a_sign && !both_zero(self, b);
        }
        self.to_bits() != b.to_bits() && (a_sign != (self.to_bits() < b.to_bits()))
    }

    /// Equality that raises `invalid` for any NaN operand.
    pub fn eq_signaling(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, true, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        self.to_bits() == b.to_bits() || both_zero(self, b)
    }

    /// Quiet less-or-equal: `invalid` only for signaling NaNs.
    pub fn le_quiet(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        let a_sign = self.sign();
        if a_sign != b.sign() {
            return a_sign || both_zero(self, b);
        }
        self.to_bits() == b.to_bits() || (a_sign != (self.to_bits() < b.to_bits()))
    }

    /// Quiet less-than: `invalid` only for signaling NaNs.
    pub fn lt_quiet(self, b: Self, status: &mut Status) -> bool {
        if check_nan(self, b, false, status) {
            return false;
        }
        check_denormal(self.classify(), b.classify(), status);
        let a_sign = self.sign();
        if a_sign != b.sign() {
            return a_sign && !both_zero(self, b);
        }
        self.to_bits() != b.to_bits() && (a_sign != (self.to_bits() < b.to_bits()))
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

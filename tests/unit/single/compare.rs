//! binary32 comparison tests.

use softfpu::{ExceptionFlags, Float32, FloatRelation};

use super::bits;
use crate::common::status;

fn f(bits: u32) -> Float32 {
    Float32::from_bits(bits)
}

#[test]
fn signed_zeros_compare_equal() {
    let mut status = status();
    let pos = Float32::ZERO;
    let neg = f(0x8000_0000);
    assert!(pos.eq(neg, &mut status));
    assert!(neg.le(pos, &mut status), "-0 <= +0");
    assert!(!neg.lt(pos, &mut status), "-0 < +0 is false");
    assert_eq!(pos.compare(neg, &mut status), FloatRelation::Equal);
    assert!(status.flags().is_empty());
}

#[test]
fn sign_decides_for_nonzero() {
    let mut status = status();
    assert!(f(bits::NEG_ONE).lt(f(bits::ONE), &mut status));
    assert!(!f(bits::ONE).lt(f(bits::NEG_ONE), &mut status));
    assert_eq!(f(bits::NEG_ONE).compare(f(bits::ONE), &mut status), FloatRelation::Less);
    assert!(status.flags().is_empty());
}

#[test]
fn same_sign_magnitudes() {
    let mut status = status();
    assert!(f(bits::ONE).lt(f(bits::TWO), &mut status));
    assert!(f(bits::ONE).le(f(bits::ONE), &mut status));
    // Reversed ordering for two negatives.
    assert!(f(0xC000_0000).lt(f(bits::NEG_ONE), &mut status), "-2 < -1");
    assert!(!f(bits::NEG_ONE).lt(f(0xC000_0000), &mut status));
    assert!(status.flags().is_empty());
}

#[test]
fn infinities_are_ordered() {
    let mut status = status();
    assert!(f(bits::NEG_INF).lt(f(bits::INF), &mut status));
    assert!(f(bits::MAX_FINITE).lt(f(bits::INF), &mut status));
    assert!(f(bits::INF).le(f(bits::INF), &mut status));
    assert_eq!(f(bits::INF).compare(f(bits::INF), &mut status), FloatRelation::Equal);
    assert!(status.flags().is_empty());
}

#[test]
fn quiet_nan_is_silent_on_quiet_predicates() {
    let mut status = status();
    let nan = f(bits::QNAN);
    let one = f(bits::ONE);
    assert!(!nan.eq(one, &mut status));
    assert!(!nan.lt_quiet(one, &mut status));
    assert!(!nan.le_quiet(one, &mut status));
    assert_eq!(nan.compare_quiet(one, &mut status), FloatRelation::Unordered);
    assert!(nan.unordered(one, &mut status));
    assert!(status.flags().is_empty(), "quiet NaN raises nothing on quiet variants");
}

#[test]
fn quiet_nan_signals_on_ordered_predicates() {
    let mut status = status();
    assert!(!f(bits::QNAN).lt(f(bits::ONE), &mut status));
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert!(!f(bits::QNAN).le(f(bits::ONE), &mut status));
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert!(!f(bits::QNAN).eq_signaling(f(bits::ONE), &mut status));
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert_eq!(f(bits::QNAN).compare(f(bits::ONE), &mut status), FloatRelation::Unordered);
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
}

#[test]
fn signaling_nan_always_raises_invalid() {
    let snan = f(0x7F80_0001);
    let one = f(bits::ONE);

    let mut status = status();
    assert!(!snan.eq(one, &mut status));
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert_eq!(snan.compare_quiet(one, &mut status), FloatRelation::Unordered);
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert!(snan.unordered(one, &mut status));
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
}

#[test]
fn denormal_operands_raise_denormal() {
    let mut status = status();
    assert!(f(bits::MIN_SUBNORMAL).lt(f(bits::ONE), &mut status));
    assert_eq!(status.flags(), ExceptionFlags::DENORMAL);

    let mut status = crate::common::status();
    assert_eq!(
        f(bits::MIN_SUBNORMAL).compare(f(0x0000_0002), &mut status),
        FloatRelation::Less
    );
    assert_eq!(status.flags(), ExceptionFlags::DENORMAL);
}

#[test]
fn eq_is_bitwise_modulo_zeros() {
    let mut status = status();
    assert!(f(bits::ONE).eq(f(bits::ONE), &mut status));
    assert!(!f(bits::ONE).eq(f(0x3F80_0001), &mut status));
    assert!(status.flags().is_empty());
}

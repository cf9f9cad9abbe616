//! NaN encoding, predicate, and propagation tests.

use softfpu::nan::{
    DEFAULT_NAN_32, DEFAULT_NAN_64, DEFAULT_NAN_X80_EXP, DEFAULT_NAN_X80_FRAC,
};
use softfpu::{ExceptionFlags, Float32, Float64};

use crate::common::{status, x80};

// ══════════════════════════════════════════════════════════
// 1. Default NaN bit patterns (part of the contract)
// ══════════════════════════════════════════════════════════

#[test]
fn default_nan_patterns() {
    assert_eq!(DEFAULT_NAN_32, 0x7FC0_0000);
    assert_eq!(DEFAULT_NAN_64, 0x7FF8_0000_0000_0000);
    assert_eq!(DEFAULT_NAN_X80_EXP, 0x7FFF);
    assert_eq!(DEFAULT_NAN_X80_FRAC, 0xC000_0000_0000_0000);
}

#[test]
fn default_nans_are_quiet() {
    assert!(Float32::from_bits(DEFAULT_NAN_32).is_quiet_nan());
    assert!(Float64::from_bits(DEFAULT_NAN_64).is_quiet_nan());
    assert!(x80(DEFAULT_NAN_X80_EXP, DEFAULT_NAN_X80_FRAC).is_quiet_nan());
}

// ══════════════════════════════════════════════════════════
// 2. Signaling/quiet predicates
// ══════════════════════════════════════════════════════════

#[test]
fn predicates_float32() {
    let quiet = Float32::from_bits(0x7FC0_0001);
    let signaling = Float32::from_bits(0x7F80_0001);
    let inf = Float32::from_bits(0x7F80_0000);
    assert!(quiet.is_nan() && quiet.is_quiet_nan() && !quiet.is_signaling_nan());
    assert!(signaling.is_nan() && signaling.is_signaling_nan() && !signaling.is_quiet_nan());
    assert!(!inf.is_nan());
    // Sign does not matter.
    assert!(Float32::from_bits(0xFFC0_0000).is_quiet_nan());
    assert!(Float32::from_bits(0xFF80_0001).is_signaling_nan());
}

#[test]
fn predicates_float64() {
    let quiet = Float64::from_bits(0x7FF8_0000_0000_0001);
    let signaling = Float64::from_bits(0x7FF0_0000_0000_0001);
    let inf = Float64::from_bits(0x7FF0_0000_0000_0000);
    assert!(quiet.is_quiet_nan() && !quiet.is_signaling_nan());
    assert!(signaling.is_signaling_nan() && !signaling.is_quiet_nan());
    assert!(!inf.is_nan());
}

#[test]
fn predicates_floatx80() {
    // Quiet bit is bit 62, just under the explicit integer bit.
    let quiet = x80(0x7FFF, 0xC000_0000_0000_0001);
    let signaling = x80(0x7FFF, 0x8000_0000_0000_0001);
    let inf = x80(0x7FFF, 0x8000_0000_0000_0000);
    assert!(quiet.is_quiet_nan() && !quiet.is_signaling_nan());
    assert!(signaling.is_signaling_nan() && !signaling.is_quiet_nan());
    assert!(!inf.is_nan());
}

// ══════════════════════════════════════════════════════════
// 3. Propagation: first operand preferred, quiet bit forced
// ══════════════════════════════════════════════════════════

#[test]
fn two_quiet_nans_prefer_first_operand() {
    let mut status = status();
    let a = Float32::from_bits(0x7FC0_0011);
    let b = Float32::from_bits(0x7FC0_0022);
    let z = a.add(b, &mut status);
    assert_eq!(z.to_bits(), 0x7FC0_0011, "first operand's payload wins");
    assert!(status.flags().is_empty());
    // Reversed operands pick the other payload.
    let z = b.add(a, &mut status);
    assert_eq!(z.to_bits(), 0x7FC0_0022);
}

#[test]
fn signaling_nan_is_quieted_with_invalid() {
    let mut status = status();
    let a = Float32::from_bits(0x7F80_0011);
    let one = Float32::from_bits(0x3F80_0000);
    let z = a.add(one, &mut status);
    assert_eq!(z.to_bits(), 0x7FC0_0011, "payload preserved, quiet bit set");
    assert!(status.flags().contains(ExceptionFlags::INVALID));
}

#[test]
fn quiet_nan_second_operand_propagates() {
    let mut status = status();
    let one = Float64::from_bits(0x3FF0_0000_0000_0000);
    let b = Float64::from_bits(0x7FF8_0000_0000_0ABC);
    let z = one.mul(b, &mut status);
    assert_eq!(z.to_bits(), 0x7FF8_0000_0000_0ABC);
    assert!(status.flags().is_empty());
}

#[test]
fn x80_propagation_forces_quiet_bit() {
    let mut status = status();
    let a = x80(0x7FFF, 0x8000_0000_0000_0123);
    let b = x80(0x3FFF, 0x8000_0000_0000_0000);
    let z = a.mul(b, &mut status);
    assert_eq!(z.sign_exp, 0x7FFF);
    assert_eq!(z.frac, 0xC000_0000_0000_0123);
    assert!(status.flags().contains(ExceptionFlags::INVALID));
}

// ══════════════════════════════════════════════════════════
// 4. Conversion through the common-NaN intermediate
// ══════════════════════════════════════════════════════════

#[test]
fn widening_preserves_quiet_payload() {
    let mut status = status();
    let a = Float32::from_bits(0x7FC0_0123);
    let z = a.to_float64(&mut status);
    // Payload bits slide from below bit 22 to below bit 51.
    assert_eq!(z.to_bits(), 0x7FF8_0024_6000_0000);
    assert!(status.flags().is_empty());
}

#[test]
fn widening_signaling_nan_raises_invalid_and_quiets() {
    let mut status = status();
    let a = Float32::from_bits(0x7F80_0001);
    let z = a.to_float64(&mut status);
    assert!(z.is_quiet_nan());
    assert!(status.flags().contains(ExceptionFlags::INVALID));
}

#[test]
fn narrowing_preserves_sign_and_quietness() {
    let mut status = status();
    let a = Float64::from_bits(0xFFF8_0240_0000_0000);
    let z = a.to_float32(&mut status);
    assert_eq!(z.to_bits(), 0xFFC0_1200);
    assert!(status.flags().is_empty());
}

#[test]
fn x80_nan_to_float32() {
    let mut status = status();
    // Signaling NaN in extended: payload below bit 62.
    let a = x80(0x7FFF, 0x8000_0200_0000_0000);
    let z = a.to_float32(&mut status);
    assert!(z.is_quiet_nan());
    assert!(status.flags().contains(ExceptionFlags::INVALID));
}

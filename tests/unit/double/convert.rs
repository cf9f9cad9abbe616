//! binary64 conversion tests.

use softfpu::{ExceptionFlags, Float64, RoundingMode};

use super::bits;
use crate::common::{status, status_with};

fn f(bits: u64) -> Float64 {
    Float64::from_bits(bits)
}

// ══════════════════════════════════════════════════════════
// 1. Integer → float
// ══════════════════════════════════════════════════════════

#[test]
fn from_i32_is_always_exact() {
    assert_eq!(Float64::from_i32(0).to_bits(), 0);
    assert_eq!(Float64::from_i32(1).to_bits(), bits::ONE);
    assert_eq!(Float64::from_i32(-1).to_bits(), bits::NEG_ONE);
    assert_eq!(Float64::from_i32(7).to_bits(), 0x401C_0000_0000_0000);
    assert_eq!(Float64::from_i32(i32::MIN).to_bits(), 0xC1E0_0000_0000_0000);
    assert_eq!(Float64::from_i32(i32::MAX).to_bits(), 0x41DF_FFFF_FFC0_0000);
}

#[test]
fn from_i64_exact_and_rounded() {
    let mut status = status();
    assert_eq!(Float64::from_i64(1 << 52, &mut status).to_bits(), 0x4330_0000_0000_0000);
    assert_eq!(Float64::from_i64(i64::MIN, &mut status).to_bits(), 0xC3E0_0000_0000_0000);
    assert!(status.flags().is_empty());
    let z = Float64::from_i64((1 << 53) + 1, &mut status);
    assert_eq!(z.to_bits(), 0x4340_0000_0000_0000, "2^53+1 rounds to 2^53");
    assert_eq!(status.flags(), ExceptionFlags::INEXACT);
}

// ══════════════════════════════════════════════════════════
// 2. Float → integer
// ══════════════════════════════════════════════════════════

#[test]
fn to_i32_rounds_by_mode() {
    let mut status = status();
    assert_eq!(f(0x3FF8_0000_0000_0000).to_i32(&mut status), 2, "1.5 ties to 2");
    assert_eq!(f(0x4004_0000_0000_0000).to_i32(&mut status), 2, "2.5 ties to 2");
    let mut status = status_with(RoundingMode::TowardZero);
    assert_eq!(f(0x3FF8_0000_0000_0000).to_i32(&mut status), 1);
}

#[test]
fn to_i32_round_to_zero_saturates() {
    let mut status = status();
    assert_eq!(f(0x41E0_0000_0000_0000).to_i32_round_to_zero(&mut status), i32::MAX);
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
    let mut status = crate::common::status();
    assert_eq!(f(0xC1E0_0000_0000_0000).to_i32_round_to_zero(&mut status), i32::MIN);
    assert!(status.flags().is_empty(), "-2^31 is in range");
}

#[test]
fn to_i64_round_trip_boundaries() {
    let mut status = status();
    assert_eq!(f(bits::ONE).to_i64(&mut status), 1);
    assert_eq!(f(0x4330_0000_0000_0000).to_i64(&mut status), 1 << 52);
    assert!(status.flags().is_empty());
}

#[test]
fn to_i64_round_to_zero_most_negative_is_exact() {
    let mut status = status();
    assert_eq!(f(0xC3E0_0000_0000_0000).to_i64_round_to_zero(&mut status), i64::MIN);
    assert!(status.flags().is_empty());
}

#[test]
fn to_i64_nan_saturates_positive() {
    let mut status = status();
    assert_eq!(f(bits::QNAN).to_i64(&mut status), i64::MAX);
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
}

// ══════════════════════════════════════════════════════════
// 3. Format conversions
// ══════════════════════════════════════════════════════════

#[test]
fn to_float32_exact() {
    let mut status = status();
    assert_eq!(f(bits::ONE).to_float32(&mut status).to_bits(), 0x3F80_0000);
    assert_eq!(f(bits::NEG_INF).to_float32(&mut status).to_bits(), 0xFF80_0000);
    assert!(status.flags().is_empty());
}

#[test]
fn to_float32_rounds_narrow() {
    // 1 + 2^-24 is halfway between f32 neighbors; ties to 1.0.
    let mut status = status();
    let z = f(0x3FF0_0000_1000_0000).to_float32(&mut status);
    assert_eq!(z.to_bits(), 0x3F80_0000);
    assert_eq!(status.flags(), ExceptionFlags::INEXACT);
}

#[test]
fn to_float32_overflow_gives_infinity() {
    let mut status = status();
    let z = f(0x47F0_0000_0000_0000).to_float32(&mut status);
    assert_eq!(z.to_bits(), 0x7F80_0000, "2^128 overflows binary32");
    assert_eq!(status.flags(), ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);
}

#[test]
fn to_float32_tiny_becomes_subnormal() {
    let mut status = status();
    // 2^-149 is the smallest binary32 subnormal; exact conversion.
    let z = f(0x36A0_0000_0000_0000).to_float32(&mut status);
    assert_eq!(z.to_bits(), 0x0000_0001);
    assert!(status.flags().is_empty());
}

#[test]
fn to_floatx80_is_exact() {
    let mut status = status();
    let z = f(bits::THREE).to_floatx80(&mut status);
    assert_eq!(z.sign_exp, 0x4000);
    assert_eq!(z.frac, 0xC000_0000_0000_0000);
    assert!(status.flags().is_empty());
}

// ══════════════════════════════════════════════════════════
// 4. Round to integral
// ══════════════════════════════════════════════════════════

#[test]
fn round_to_int_nearest() {
    let mut status = status();
    assert_eq!(
        f(0x4004_0000_0000_0000).round_to_int(&mut status).to_bits(),
        bits::TWO,
        "2.5 ties to 2"
    );
    assert_eq!(
        f(0x3FF8_0000_0000_0000).round_to_int(&mut status).to_bits(),
        bits::TWO,
        "1.5 ties to 2"
    );
    assert!(status.flags().contains(ExceptionFlags::INEXACT));
}

#[test]
fn round_to_int_small_magnitudes() {
    let mut status = status();
    assert_eq!(f(bits::HALF).round_to_int(&mut status).to_bits(), 0);
    let mut status = status_with(RoundingMode::Up);
    assert_eq!(f(bits::HALF).round_to_int(&mut status).to_bits(), bits::ONE);
    let mut status = status_with(RoundingMode::Down);
    assert_eq!(
        f(0xBFE0_0000_0000_0000).round_to_int(&mut status).to_bits(),
        bits::NEG_ONE
    );
}

#[test]
fn round_to_int_exact_values_unchanged() {
    let mut status = status();
    assert_eq!(f(bits::TWO).round_to_int(&mut status).to_bits(), bits::TWO);
    assert_eq!(f(bits::INF).round_to_int(&mut status).to_bits(), bits::INF);
    assert!(status.flags().is_empty());
}

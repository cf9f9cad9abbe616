//! binary32 conversion tests.

use softfpu::{ExceptionFlags, Float32, RoundingMode};

use super::bits;
use crate::common::{status, status_with};

fn f(bits: u32) -> Float32 {
    Float32::from_bits(bits)
}

// ══════════════════════════════════════════════════════════
// 1. Integer → float
// ══════════════════════════════════════════════════════════

#[test]
fn from_i32_exact_values() {
    let mut status = status();
    assert_eq!(Float32::from_i32(0, &mut status).to_bits(), 0);
    assert_eq!(Float32::from_i32(1, &mut status).to_bits(), bits::ONE);
    assert_eq!(Float32::from_i32(-1, &mut status).to_bits(), bits::NEG_ONE);
    assert_eq!(Float32::from_i32(100, &mut status).to_bits(), 0x42C8_0000);
    assert!(status.flags().is_empty());
}

#[test]
fn from_i32_min_is_exact() {
    let mut status = status();
    let z = Float32::from_i32(i32::MIN, &mut status);
    assert_eq!(z.to_bits(), 0xCF00_0000, "-2^31 is exactly representable");
    assert!(status.flags().is_empty());
}

#[test]
fn from_i32_rounds_wide_values() {
    let mut status = status();
    let z = Float32::from_i32(i32::MAX, &mut status);
    assert_eq!(z.to_bits(), 0x4F00_0000, "2^31-1 rounds to 2^31");
    assert_eq!(status.flags(), ExceptionFlags::INEXACT);
}

#[test]
fn from_i64_paths() {
    let mut status = status();
    assert_eq!(Float32::from_i64(1 << 40, &mut status).to_bits(), 0x5380_0000);
    assert!(status.flags().is_empty());
    let z = Float32::from_i64((1 << 40) + 1, &mut status);
    assert_eq!(z.to_bits(), 0x5380_0000);
    assert_eq!(status.flags(), ExceptionFlags::INEXACT);
}

// ══════════════════════════════════════════════════════════
// 2. Float → integer
// ══════════════════════════════════════════════════════════

#[test]
fn to_i32_rounds_by_mode() {
    let mut status = status();
    assert_eq!(f(0x3FC0_0000).to_i32(&mut status), 2, "1.5 ties to even 2");
    assert_eq!(f(0x4020_0000).to_i32(&mut status), 2, "2.5 ties to even 2");
    assert!(status.flags().contains(ExceptionFlags::INEXACT));

    let mut status = status_with(RoundingMode::Down);
    assert_eq!(f(0x3FC0_0000).to_i32(&mut status), 1);
    let mut status = status_with(RoundingMode::Up);
    assert_eq!(f(0xBFC0_0000).to_i32(&mut status), -1);
}

#[test]
fn to_i32_round_to_zero_truncates() {
    let mut status = status();
    assert_eq!(f(0x3FF3_3333).to_i32_round_to_zero(&mut status), 1, "1.9 -> 1");
    assert_eq!(f(0xBFF3_3333).to_i32_round_to_zero(&mut status), -1);
    assert!(status.flags().contains(ExceptionFlags::INEXACT));
}

#[test]
fn to_i32_saturates_with_invalid() {
    let mut status = status();
    assert_eq!(f(0x4F00_0000).to_i32(&mut status), i32::MAX, "2^31 overflows");
    assert_eq!(status.flags(), ExceptionFlags::INVALID);

    let mut status = crate::common::status();
    assert_eq!(f(bits::QNAN).to_i32(&mut status), i32::MAX, "NaN saturates positive");
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
}

#[test]
fn to_i32_round_to_zero_most_negative_is_exact() {
    let mut status = status();
    assert_eq!(f(0xCF00_0000).to_i32_round_to_zero(&mut status), i32::MIN);
    assert!(status.flags().is_empty(), "-2^31 converts without invalid");
}

#[test]
fn to_i64_basics() {
    let mut status = status();
    assert_eq!(f(bits::ONE).to_i64(&mut status), 1);
    assert_eq!(f(0x5380_0000).to_i64(&mut status), 1 << 40);
    assert!(status.flags().is_empty());
}

#[test]
fn to_i64_round_to_zero_most_negative_is_exact() {
    let mut status = status();
    assert_eq!(f(0xDF00_0000).to_i64_round_to_zero(&mut status), i64::MIN);
    assert!(status.flags().is_empty());
}

#[test]
fn to_i64_overflow_saturates() {
    let mut status = status();
    assert_eq!(f(0x5F80_0000).to_i64(&mut status), i64::MAX, "2^64 overflows");
    assert_eq!(status.flags(), ExceptionFlags::INVALID);
}

// ══════════════════════════════════════════════════════════
// 3. Widening conversions
// ══════════════════════════════════════════════════════════

#[test]
fn to_float64_is_exact() {
    let mut status = status();
    assert_eq!(f(bits::ONE).to_float64(&mut status).to_bits(), 0x3FF0_0000_0000_0000);
    assert_eq!(
        f(0x3F80_0001).to_float64(&mut status).to_bits(),
        0x3FF0_0000_2000_0000
    );
    assert_eq!(f(bits::INF).to_float64(&mut status).to_bits(), 0x7FF0_0000_0000_0000);
    assert_eq!(f(0x8000_0000).to_float64(&mut status).to_bits(), 0x8000_0000_0000_0000);
    assert!(status.flags().is_empty());
}

#[test]
fn to_float64_subnormal_raises_denormal() {
    let mut status = status();
    // 2^-149 widens exactly but flags the subnormal consumption.
    let z = f(bits::MIN_SUBNORMAL).to_float64(&mut status);
    assert_eq!(z.to_bits(), 0x36A0_0000_0000_0000);
    assert_eq!(status.flags(), ExceptionFlags::DENORMAL);
}

#[test]
fn to_floatx80_is_exact() {
    let mut status = status();
    let z = f(0x3FC0_0000).to_floatx80(&mut status);
    assert_eq!(z.sign_exp, 0x3FFF);
    assert_eq!(z.frac, 0xC000_0000_0000_0000, "1.5 carries the integer bit");
    let z = f(bits::NEG_INF).to_floatx80(&mut status);
    assert_eq!(z.sign_exp, 0xFFFF);
    assert_eq!(z.frac, 0x8000_0000_0000_0000);
    assert!(status.flags().is_empty());
}

// ══════════════════════════════════════════════════════════
// 4. Round to integral
// ══════════════════════════════════════════════════════════

#[test]
fn round_to_int_nearest() {
    let mut status = status();
    assert_eq!(f(0x3FC0_0000).round_to_int(&mut status).to_bits(), bits::TWO, "1.5 -> 2");
    assert_eq!(f(0x4020_0000).round_to_int(&mut status).to_bits(), bits::TWO, "2.5 -> 2");
    assert!(status.flags().contains(ExceptionFlags::INEXACT));
}

#[test]
fn round_to_int_small_magnitudes() {
    let mut status = status();
    assert_eq!(f(bits::HALF).round_to_int(&mut status).to_bits(), 0, "0.5 ties to 0");
    assert_eq!(f(0x3F40_0000).round_to_int(&mut status).to_bits(), bits::ONE, "0.75 -> 1");

    let mut status = status_with(RoundingMode::Down);
    assert_eq!(f(0xBF00_0000).round_to_int(&mut status).to_bits(), bits::NEG_ONE);
    let mut status = status_with(RoundingMode::Up);
    assert_eq!(f(bits::HALF).round_to_int(&mut status).to_bits(), bits::ONE);
    assert_eq!(f(0xBF00_0000).round_to_int(&mut status).to_bits(), 0x8000_0000);
}

#[test]
fn round_to_int_exact_values_unchanged() {
    let mut status = status();
    assert_eq!(f(bits::TWO).round_to_int(&mut status).to_bits(), bits::TWO);
    assert_eq!(Float32::ZERO.round_to_int(&mut status).to_bits(), 0);
    assert_eq!(f(bits::INF).round_to_int(&mut status).to_bits(), bits::INF);
    assert!(status.flags().is_empty());
}

#[test]
fn round_to_int_large_values_are_already_integral() {
    let mut status = status();
    assert_eq!(f(0x5380_0000).round_to_int(&mut status).to_bits(), 0x5380_0000);
    assert!(status.flags().is_empty());
}

//! Status object behavior tests.

use softfpu::{
    ExceptionFlags, RoundingMode, RoundingPrecision, Status, TininessMode,
};

#[test]
fn reset_defaults() {
    let status = Status::default();
    assert_eq!(status.rounding_mode(), RoundingMode::NearestEven);
    assert_eq!(status.rounding_precision(), RoundingPrecision::Extended);
    assert_eq!(status.tininess(), TininessMode::AfterRounding);
    assert!(!status.flush_underflow_to_zero());
    assert!(status.flags().is_empty());
}

#[test]
fn flags_are_sticky() {
    let mut status = Status::default();
    status.raise(ExceptionFlags::INEXACT);
    status.raise(ExceptionFlags::OVERFLOW);
    // Raising the same flag twice must not clear anything.
    status.raise(ExceptionFlags::INEXACT);
    assert!(status.flags().contains(ExceptionFlags::INEXACT | ExceptionFlags::OVERFLOW));
}

#[test]
fn clear_flags_leaves_controls() {
    let mut status = Status::new(RoundingMode::Up);
    status.set_flush_underflow_to_zero(true);
    status.raise(ExceptionFlags::UNDERFLOW);
    status.clear_flags();
    assert!(status.flags().is_empty());
    assert_eq!(status.rounding_mode(), RoundingMode::Up);
    assert!(status.flush_underflow_to_zero());
}

#[test]
fn control_setters() {
    let mut status = Status::default();
    status.set_rounding_mode(RoundingMode::TowardZero);
    status.set_rounding_precision(RoundingPrecision::Single);
    status.set_tininess(TininessMode::BeforeRounding);
    assert_eq!(status.rounding_mode(), RoundingMode::TowardZero);
    assert_eq!(status.rounding_precision(), RoundingPrecision::Single);
    assert_eq!(status.tininess(), TininessMode::BeforeRounding);
}

//! Exception flag layout tests.
//!
//! The bit positions are part of the ABI: they match the exception byte
//! of the emulated FPU's status word.

use softfpu::ExceptionFlags;

#[test]
fn bit_layout_matches_status_word() {
    assert_eq!(ExceptionFlags::INVALID.bits(), 0x01);
    assert_eq!(ExceptionFlags::DENORMAL.bits(), 0x02);
    assert_eq!(ExceptionFlags::DIV_BY_ZERO.bits(), 0x04);
    assert_eq!(ExceptionFlags::OVERFLOW.bits(), 0x08);
    assert_eq!(ExceptionFlags::UNDERFLOW.bits(), 0x10);
    assert_eq!(ExceptionFlags::INEXACT.bits(), 0x20);
}

#[test]
fn flags_combine_with_or() {
    let flags = ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT;
    assert_eq!(flags.bits(), 0x28);
    assert!(flags.contains(ExceptionFlags::OVERFLOW));
    assert!(flags.contains(ExceptionFlags::INEXACT));
    assert!(!flags.contains(ExceptionFlags::INVALID));
}

#[test]
fn contains_requires_every_bit() {
    let flags = ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT;
    assert!(flags.contains(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT));
    assert!(!flags.contains(ExceptionFlags::OVERFLOW | ExceptionFlags::UNDERFLOW));
}

#[test]
fn empty_and_round_trip() {
    assert!(ExceptionFlags::NONE.is_empty());
    assert!(!ExceptionFlags::INVALID.is_empty());
    let flags = ExceptionFlags::from_bits(0x3F);
    assert_eq!(flags.bits(), 0x3F);
    // Out-of-range bits are masked off.
    assert_eq!(ExceptionFlags::from_bits(0xFF).bits(), 0x3F);
}

//! Sticky floating-point exception flags.
//!
//! Six flags accumulate in the layout of the x87 status word's exception
//! byte:
//!
//! | Bit | Flag | Description            |
//! |-----|------|------------------------|
//! |  0  | IE   | Invalid operation      |
//! |  1  | DE   | Denormal operand       |
//! |  2  | ZE   | Divide by zero         |
//! |  3  | OE   | Overflow               |
//! |  4  | UE   | Underflow              |
//! |  5  | PE   | Inexact (precision)    |
//!
//! Flags are sticky: operations only ever OR bits in, and clearing is the
//! caller's responsibility.

use std::ops::{BitOr, BitOrAssign};

/// Floating-point exception flag set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExceptionFlags(u8);

impl ExceptionFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid operation.
    pub const INVALID: Self = Self(1 << 0);
    /// Denormal (subnormal) operand consumed.
    pub const DENORMAL: Self = Self(1 << 1);
    /// Finite nonzero value divided by zero.
    pub const DIV_BY_ZERO: Self = Self(1 << 2);
    /// Rounded magnitude exceeded the largest finite value.
    pub const OVERFLOW: Self = Self(1 << 3);
    /// Tiny and inexact result.
    pub const UNDERFLOW: Self = Self(1 << 4);
    /// Result was not exactly representable.
    pub const INEXACT: Self = Self(1 << 5);

    /// Returns the raw 6-bit flag value in status-word layout.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Reconstructs a flag set from raw status-word bits.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x3F)
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for ExceptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExceptionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

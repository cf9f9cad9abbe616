//! 80-bit extended-precision operation tests.

/// Comparison family.
pub mod compare;

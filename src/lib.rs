//! Software IEEE 754 floating-point engine.
//!
//! This crate implements a bit-exact, integer-only floating-point arithmetic
//! kernel for CPU emulation, covering three formats with the following:
//! 1. **Formats:** binary32 ([`Float32`]), binary64 ([`Float64`]), and 80-bit
//!    extended precision with an explicit integer bit ([`FloatX80`]).
//! 2. **Operations:** add, sub, mul, div, IEEE remainder, square root,
//!    round-to-integral, every format/integer conversion pair, and the full
//!    ordered/unordered comparison family.
//! 3. **Status:** a caller-owned [`Status`] object carrying the rounding
//!    mode, extended-precision rounding control, tininess detection mode,
//!    flush-to-zero switch, and sticky [`ExceptionFlags`].
//! 4. **Determinism:** results and exception flags depend only on operand
//!    bits and the status object, never on the host FPU.
//!
//! No operation panics, allocates, or performs I/O; pathological inputs
//! produce well-defined sentinel results (NaN, infinity, saturated
//! integers) plus flags.

/// Value classification and comparison-relation types.
pub mod classify;
/// JSON-friendly construction of [`Status`] objects.
pub mod config;
/// binary64 format: codec, arithmetic, conversions, comparisons.
pub mod double;
/// Sticky floating-point exception flags.
pub mod exceptions;
/// 80-bit extended format: codec, arithmetic, conversions, comparisons.
pub mod extended;
mod intround;
/// NaN encodings, predicates, and propagation rules.
pub mod nan;
/// Wide-integer primitives used by the arithmetic core.
pub mod primitives;
/// Rounding mode and rounding precision controls.
pub mod rounding;
/// binary32 format: codec, arithmetic, conversions, comparisons.
pub mod single;
/// Per-operation status object (controls in, sticky flags out).
pub mod status;

/// Classification of a floating-point value; use `Float32::classify` etc.
pub use crate::classify::{FloatClass, FloatRelation};
/// Deserializable control-field mirror; use `StatusConfig::build`.
pub use crate::config::StatusConfig;
/// binary64 value as packed bits.
pub use crate::double::Float64;
/// Sticky exception flag set; accumulate with `Status::raise`.
pub use crate::exceptions::ExceptionFlags;
/// 80-bit extended-precision value (sign/exponent word + significand).
pub use crate::extended::FloatX80;
/// Rounding controls; encodings match the x87 control word.
pub use crate::rounding::{RoundingMode, RoundingPrecision};
/// binary32 value as packed bits.
pub use crate::single::Float32;
/// Per-operation status object; construct with `Status::new`.
pub use crate::status::{Status, TininessMode};

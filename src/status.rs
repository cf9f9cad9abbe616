//! Per-operation status object.
//!
//! A [`Status`] is passed by mutable reference into every operation. It
//! carries the control fields that steer rounding and underflow handling,
//! and the sticky exception register that operations OR into. It is the
//! only mutable state in the engine: operands are never modified, and
//! distinct status objects are fully independent, so a multi-threaded
//! emulator simply gives each thread its own.

use crate::exceptions::ExceptionFlags;
use crate::rounding::{RoundingMode, RoundingPrecision};

/// When underflow tininess is detected, relative to rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TininessMode {
    /// Tiny when the infinitely-precise result is below the smallest
    /// normal, regardless of whether rounding would bring it back up.
    BeforeRounding,
    /// Tiny only when the rounded result is itself below the smallest
    /// normal.
    AfterRounding,
}

impl Default for TininessMode {
    fn default() -> Self {
        Self::AfterRounding
    }
}

/// Floating-point control and sticky exception state.
///
/// Owned by the emulated FPU context; its lifetime spans a sequence of
/// operations. Flags accumulate across operations until the caller clears
/// them.
#[derive(Clone, Debug)]
pub struct Status {
    rounding_mode: RoundingMode,
    rounding_precision: RoundingPrecision,
    tininess: TininessMode,
    flush_underflow_to_zero: bool,
    flags: ExceptionFlags,
}

impl Status {
    /// Creates a status object with the given rounding mode and all other
    /// controls at their reset defaults.
    pub fn new(rounding_mode: RoundingMode) -> Self {
        Self {
            rounding_mode,
            rounding_precision: RoundingPrecision::default(),
            tininess: TininessMode::default(),
            flush_underflow_to_zero: false,
            flags: ExceptionFlags::NONE,
        }
    }

    /// Current rounding mode.
    #[inline]
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Sets the rounding mode.
    pub fn set_rounding_mode(&mut self, mode: RoundingMode) {
        self.rounding_mode = mode;
    }

    /// Current rounding precision (extended-format results only).
    #[inline]
    pub fn rounding_precision(&self) -> RoundingPrecision {
        self.rounding_precision
    }

    /// Sets the rounding precision for extended-format results.
    pub fn set_rounding_precision(&mut self, precision: RoundingPrecision) {
        self.rounding_precision = precision;
    }

    /// Current tininess detection mode.
    #[inline]
    pub fn tininess(&self) -> TininessMode {
        self.tininess
    }

    /// Sets the tininess detection mode.
    pub fn set_tininess(&mut self, tininess: TininessMode) {
        self.tininess = tininess;
    }

    /// Whether tiny inexact results are flushed to a signed zero.
    #[inline]
    pub fn flush_underflow_to_zero(&self) -> bool {
        self.flush_underflow_to_zero
    }

    /// Enables or disables flush-to-zero on underflow.
    pub fn set_flush_underflow_to_zero(&mut self, flush: bool) {
        self.flush_underflow_to_zero = flush;
    }

    /// ORs `flags` into the sticky exception register.
    #[inline]
    pub fn raise(&mut self, flags: ExceptionFlags) {
        self.flags |= flags;
    }

    /// Accumulated sticky exception flags.
    #[inline]
    pub fn flags(&self) -> ExceptionFlags {
        self.flags
    }

    /// Clears the sticky exception flags; controls are untouched.
    pub fn clear_flags(&mut self) {
        self.flags = ExceptionFlags::NONE;
    }
}

impl Default for Status {
    /// Reset state: round to nearest even, extended precision, tininess
    /// after rounding, flush-to-zero off, no flags.
    fn default() -> Self {
        Self::new(RoundingMode::NearestEven)
    }
}

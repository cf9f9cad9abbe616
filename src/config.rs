//! Deserializable construction of status objects.
//!
//! An embedding emulator typically derives the engine's controls from a
//! guest-visible control word or from host-side configuration (JSON or
//! similar). [`StatusConfig`] mirrors the control fields of [`Status`]
//! without the sticky flag register, provides the hardware reset values as
//! defaults, and builds fresh status objects on demand.

use serde::Deserialize;

use crate::rounding::{RoundingMode, RoundingPrecision};
use crate::status::{Status, TininessMode};

/// Reset values matching an x87 control word of 0x037F.
mod defaults {
    use crate::rounding::{RoundingMode, RoundingPrecision};
    use crate::status::TininessMode;

    /// Round to nearest, ties to even.
    pub const ROUNDING_MODE: RoundingMode = RoundingMode::NearestEven;

    /// Full 64-bit significand for extended results.
    pub const ROUNDING_PRECISION: RoundingPrecision = RoundingPrecision::Extended;

    /// Underflow tininess detected after rounding.
    pub const TININESS: TininessMode = TininessMode::AfterRounding;

    /// Tiny results are kept as subnormals, not flushed.
    pub const FLUSH_UNDERFLOW_TO_ZERO: bool = false;
}

/// Control-field configuration for the engine.
///
/// Every field is optional in the serialized form and falls back to the
/// hardware reset value, so `{}` deserializes to the default controls.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    /// Rounding mode applied by every operation.
    #[serde(default = "default_rounding_mode")]
    pub rounding_mode: RoundingMode,

    /// Rounding precision applied to extended-format results.
    #[serde(default = "default_rounding_precision")]
    pub rounding_precision: RoundingPrecision,

    /// Underflow tininess detection mode.
    #[serde(default = "default_tininess")]
    pub tininess: TininessMode,

    /// Flush tiny inexact results to a signed zero.
    #[serde(default = "default_flush_underflow_to_zero")]
    pub flush_underflow_to_zero: bool,
}

fn default_rounding_mode() -> RoundingMode {
    defaults::ROUNDING_MODE
}

fn default_rounding_precision() -> RoundingPrecision {
    defaults::ROUNDING_PRECISION
}

fn default_tininess() -> TininessMode {
    defaults::TININESS
}

fn default_flush_underflow_to_zero() -> bool {
    defaults::FLUSH_UNDERFLOW_TO_ZERO
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            rounding_mode: defaults::ROUNDING_MODE,
            rounding_precision: defaults::ROUNDING_PRECISION,
            tininess: defaults::TININESS,
            flush_underflow_to_zero: defaults::FLUSH_UNDERFLOW_TO_ZERO,
        }
    }
}

impl StatusConfig {
    /// Builds a fresh [`Status`] with these controls and no flags set.
    pub fn build(&self) -> Status {
        let mut status = Status::new(self.rounding_mode);
        status.set_rounding_precision(self.rounding_precision);
        status.set_tininess(self.tininess);
        status.set_flush_underflow_to_zero(self.flush_underflow_to_zero);
        status
    }
}

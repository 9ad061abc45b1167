//! Configuration errors.
//!
//! The sampling pipeline itself never fails: missing readers, flat calibration
//! ranges and a lost line all collapse into defined values. Only a bad
//! configuration is reported, and only when it is applied.

use thiserror::Error;

/// Rejected [`LineSensorConfig`](crate::LineSensorConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output resolution must be at least 1.
    #[error("resolution must be greater than zero")]
    ZeroResolution,
    /// Oversampling needs at least one read per sample.
    #[error("average filter count must be greater than zero")]
    ZeroAverageFilterCount,
    /// Gate percentages are relative to the resolution.
    #[error("gate percent {percent} is above 100")]
    GateOutOfRange { percent: u8 },
    /// The line gate must be at least as strict as the noise gate.
    #[error("line detect gate {line_detect}% is below noise gate {noise_gate}%")]
    GateOrder { line_detect: u8, noise_gate: u8 },
    /// A hysteresis band with its bounds swapped.
    #[error("band [{low}, {high}] is inverted")]
    InvertedBand { low: u16, high: u16 },
    /// LOW and HIGH bands must leave a dead zone between them.
    #[error("lower band ends at {lower_high}, upper band starts at {upper_low}")]
    OverlappingBands { lower_high: u16, upper_low: u16 },
}

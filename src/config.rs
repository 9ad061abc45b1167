//! Line sensor configuration.
//!
//! Start from [`LineSensorConfig::default`] and override fields, the same way
//! the firmware configures the UART:
//!
//! ```
//! use liru_sense::LineSensorConfig;
//!
//! let mut config = LineSensorConfig::default();
//! config.inverted_readings = true; // white line on black floor
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::position::LineSide;
use crate::threshold::HysteresisBands;

/// Default output scale of normalized readings.
pub const DEFAULT_RESOLUTION: u16 = 100;

/// Default number of raw reads averaged per sample.
pub const DEFAULT_AVERAGE_FILTER_COUNT: u8 = 5;

/// Default strong-signal gate, percent of resolution.
pub const DEFAULT_LINE_DETECT_PERCENT: u8 = 70;

/// Default noise gate for the centroid, percent of resolution.
pub const DEFAULT_NOISE_GATE_PERCENT: u8 = 50;

/// Tunables of a [`SensorArray`](crate::SensorArray).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineSensorConfig {
    /// Normalized readings span `0..=resolution`.
    pub resolution: u16,
    /// Raw reads averaged into one sample.
    pub average_filter_count: u8,
    /// Use `resolution - value` when estimating position (light line on dark floor).
    pub inverted_readings: bool,
    /// A sensor above this gate means the line is under the array.
    pub line_detect_percent: u8,
    /// Sensors at or below this gate are left out of the centroid.
    pub noise_gate_percent: u8,
    /// Raw-unit bands used by [`SensorArray::threshold`](crate::SensorArray::threshold).
    pub bands: HysteresisBands,
    /// Where to look when the line is lost before it was ever seen.
    pub lost_line_side: LineSide,
}

impl LineSensorConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.average_filter_count == 0 {
            return Err(ConfigError::ZeroAverageFilterCount);
        }
        for percent in [self.line_detect_percent, self.noise_gate_percent] {
            if percent > 100 {
                return Err(ConfigError::GateOutOfRange { percent });
            }
        }
        if self.line_detect_percent < self.noise_gate_percent {
            return Err(ConfigError::GateOrder {
                line_detect: self.line_detect_percent,
                noise_gate: self.noise_gate_percent,
            });
        }
        self.bands.validate()
    }
}

impl Default for LineSensorConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            average_filter_count: DEFAULT_AVERAGE_FILTER_COUNT,
            inverted_readings: false,
            line_detect_percent: DEFAULT_LINE_DETECT_PERCENT,
            noise_gate_percent: DEFAULT_NOISE_GATE_PERCENT,
            bands: HysteresisBands::default(),
            lost_line_side: LineSide::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(LineSensorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_values_are_rejected() {
        let mut config = LineSensorConfig::default();
        config.resolution = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroResolution));

        let mut config = LineSensorConfig::default();
        config.average_filter_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroAverageFilterCount));
    }

    #[test]
    fn line_gate_must_not_be_looser_than_noise_gate() {
        let mut config = LineSensorConfig::default();
        config.line_detect_percent = 40;
        assert_eq!(
            config.validate(),
            Err(ConfigError::GateOrder {
                line_detect: 40,
                noise_gate: 50
            })
        );

        config.line_detect_percent = 50;
        assert_eq!(config.validate(), Ok(()));

        config.noise_gate_percent = 101;
        assert_eq!(
            config.validate(),
            Err(ConfigError::GateOutOfRange { percent: 101 })
        );
    }
}

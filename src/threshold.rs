//! Hysteretic binarization of raw readings.

use crate::error::ConfigError;

/// Logic state of a single sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    /// Reading inside the lower band.
    Low,
    /// Reading inside the upper band.
    High,
    /// Dead zone or outside both bands.
    Indeterminate,
}

/// Two disjoint, inclusive bands over raw ADC units.
///
/// A reading in `[upper_low, upper_high]` is HIGH, one in
/// `[lower_low, lower_high]` is LOW. Anything else, including the gap
/// between the bands, is indeterminate, so a reading drifting inside one
/// band never flips the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HysteresisBands {
    pub lower_low: u16,
    pub lower_high: u16,
    pub upper_low: u16,
    pub upper_high: u16,
}

impl HysteresisBands {
    pub const UPPER_HIGH: u16 = 100;
    pub const UPPER_LOW: u16 = 80;
    pub const LOWER_HIGH: u16 = 20;
    pub const LOWER_LOW: u16 = 0;

    /// Classify a raw reading.
    pub fn classify(&self, raw: u16) -> SensorState {
        if (self.upper_low..=self.upper_high).contains(&raw) {
            SensorState::High
        } else if (self.lower_low..=self.lower_high).contains(&raw) {
            SensorState::Low
        } else {
            SensorState::Indeterminate
        }
    }

    /// Check that both bands are ordered and do not touch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lower_low > self.lower_high {
            return Err(ConfigError::InvertedBand {
                low: self.lower_low,
                high: self.lower_high,
            });
        }
        if self.upper_low > self.upper_high {
            return Err(ConfigError::InvertedBand {
                low: self.upper_low,
                high: self.upper_high,
            });
        }
        if self.lower_high >= self.upper_low {
            return Err(ConfigError::OverlappingBands {
                lower_high: self.lower_high,
                upper_low: self.upper_low,
            });
        }
        Ok(())
    }
}

impl Default for HysteresisBands {
    fn default() -> Self {
        Self {
            lower_low: Self::LOWER_LOW,
            lower_high: Self::LOWER_HIGH,
            upper_low: Self::UPPER_LOW,
            upper_high: Self::UPPER_HIGH,
        }
    }
}

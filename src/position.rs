//! Line position from a normalized snapshot.
//!
//! Positions run from `0` (under sensor 0) to `(N - 1) * resolution`
//! (under the last sensor), so each sensor is `resolution` units apart.

/// Which end of the array to steer towards when the line is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineSide {
    /// Towards sensor 0, position 0.
    Left,
    /// Towards the last sensor, position `(N - 1) * resolution`.
    Right,
}

/// Detection gates as percentages of the resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gates {
    /// Above this the line counts as seen.
    pub line_detect_percent: u8,
    /// At or below this a sensor is noise and stays out of the centroid.
    pub noise_gate_percent: u8,
}

/// Accumulators of one centroid pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineEstimate {
    /// Sum of `value * index * resolution` over sensors above the noise gate.
    pub weighted_total: u64,
    /// Sum of `value` over sensors above the noise gate.
    pub denominator: u32,
    /// At least one sensor passed the line gate.
    pub on_the_line: bool,
}

impl LineEstimate {
    /// Weighted centroid, `None` when the line was not seen.
    pub fn centroid(&self) -> Option<u32> {
        if !self.on_the_line || self.denominator == 0 {
            return None;
        }
        Some((self.weighted_total / u64::from(self.denominator)) as u32)
    }
}

/// `value > percent% of resolution`, without rounding.
fn above(value: u16, percent: u8, resolution: u16) -> bool {
    u32::from(value) * 100 > u32::from(percent) * u32::from(resolution)
}

/// Accumulate the noise-gated centroid over `normalized`.
///
/// Sensors at or below the noise gate are excluded outright. Because the line
/// gate is never looser than the noise gate, every sensor that sets
/// `on_the_line` also lands in `denominator`.
pub fn estimate(normalized: &[u16], resolution: u16, inverted: bool, gates: Gates) -> LineEstimate {
    let mut estimate = LineEstimate::default();

    for (index, &raw) in normalized.iter().enumerate() {
        let value = if inverted {
            resolution.saturating_sub(raw)
        } else {
            raw
        };

        if above(value, gates.line_detect_percent, resolution) {
            estimate.on_the_line = true;
        }

        if above(value, gates.noise_gate_percent, resolution) {
            estimate.weighted_total +=
                u64::from(value) * index as u64 * u64::from(resolution);
            estimate.denominator += u32::from(value);
        }
    }

    estimate
}

/// Largest position an array of `sensors` can report.
pub fn max_position(sensors: usize, resolution: u16) -> u32 {
    sensors.saturating_sub(1) as u32 * u32::from(resolution)
}

/// Position to report while the line is lost.
///
/// Steers to the end of the array on the side the line was last seen.
/// Exactly at the midpoint counts as right. Without any sighting yet,
/// `default_side` decides.
pub fn fallback_position(
    last_seen: Option<u32>,
    default_side: LineSide,
    sensors: usize,
    resolution: u16,
) -> u32 {
    let max = max_position(sensors, resolution);
    let side = match last_seen {
        Some(position) if position < max / 2 => LineSide::Left,
        Some(_) => LineSide::Right,
        None => default_side,
    };

    match side {
        LineSide::Left => 0,
        LineSide::Right => max,
    }
}

//! Calibrated reflectance sensor array.
//!
//! Typical cycle on the robot:
//!
//! 1. [`SensorArray::reset_calibration`], then [`SensorArray::calibrate`]
//!    repeatedly while the robot sweeps across the line.
//! 2. [`SensorArray::update`] once per control tick.
//! 3. [`SensorArray::line_position`] to steer.
//!
//! ```
//! use core::cell::Cell;
//! use liru_sense::{LineSensorConfig, SensorArray};
//!
//! let raw = Cell::new([100u16; 8]);
//! let mut sensors =
//!     SensorArray::<_, 8>::with_reader(|i: usize| raw.get()[i], LineSensorConfig::default())
//!         .unwrap();
//!
//! // Sweep every sensor over the floor and over the line.
//! sensors.calibrate();
//! raw.set([900; 8]);
//! sensors.calibrate();
//!
//! raw.set([100, 100, 100, 100, 900, 100, 100, 100]);
//! sensors.update();
//! assert_eq!(sensors.line_position(), 400);
//! ```

use crate::calibration::CalibrationBounds;
use crate::config::LineSensorConfig;
use crate::error::ConfigError;
use crate::logging::{log_debug, log_info, log_trace, log_warn};
use crate::normalize::normalize;
use crate::position::{self, Gates, LineEstimate};
use crate::reader::{SensorReader, oversample};
use crate::threshold::SensorState;

/// `N` reflectance sensors behind one [`SensorReader`].
///
/// Per-index accessors panic when `index >= N`, the same as slice indexing.
pub struct SensorArray<R, const N: usize> {
    reader: Option<R>,
    config: LineSensorConfig,
    /// Latest oversampled raw reading per sensor.
    current: [u16; N],
    bounds: CalibrationBounds<N>,
    /// Output of the two-stage normalization, `0..=resolution`.
    normalized: [u16; N],
    last_estimate: LineEstimate,
    /// Last centroid computed while the line was in sight.
    last_seen: Option<u32>,
}

impl<R: SensorReader, const N: usize> SensorArray<R, N> {
    /// Array without a reader. Every read returns 0 until [`set_reader`](Self::set_reader).
    pub fn new(config: LineSensorConfig) -> Result<Self, ConfigError> {
        let array = Self::build(None, config)?;
        log_warn!("line sensors created without a reader, reads return 0");
        Ok(array)
    }

    /// Array reading through `reader`.
    pub fn with_reader(reader: R, config: LineSensorConfig) -> Result<Self, ConfigError> {
        Self::build(Some(reader), config)
    }

    fn build(reader: Option<R>, config: LineSensorConfig) -> Result<Self, ConfigError> {
        const { assert!(N > 0, "a sensor array needs at least one sensor") };
        config.validate()?;
        Ok(Self {
            reader,
            config,
            current: [0; N],
            bounds: CalibrationBounds::new(),
            normalized: [0; N],
            last_estimate: LineEstimate::default(),
            last_seen: None,
        })
    }

    /// Install or replace the read capability.
    pub fn set_reader(&mut self, reader: R) {
        self.reader = Some(reader);
    }

    /// Remove the read capability, handing it back.
    pub fn take_reader(&mut self) -> Option<R> {
        let reader = self.reader.take();
        if reader.is_some() {
            log_warn!("line sensor reader removed, reads return 0");
        }
        reader
    }

    /// Oversampled raw reading of one sensor.
    ///
    /// # Panics
    ///
    /// If `index >= N`.
    pub fn read_filtered(&mut self, index: usize) -> u16 {
        assert!(index < N, "sensor index {} out of range for {} sensors", index, N);
        match self.reader.as_mut() {
            Some(reader) => oversample(reader, index, self.config.average_filter_count),
            None => 0,
        }
    }

    fn sample_all(&mut self) {
        if self.reader.is_none() {
            log_trace!("line sensors sampled without a reader installed");
        }
        for index in 0..N {
            self.current[index] = self.read_filtered(index);
        }
    }

    fn renormalize(&mut self) {
        normalize(
            &self.current,
            self.bounds.min(),
            self.bounds.max(),
            self.config.resolution,
            &mut self.normalized,
        );
    }

    /// Sample every sensor, widen the calibration bounds and renormalize.
    ///
    /// Call as often as the calibration phase lasts; bounds never narrow.
    pub fn calibrate(&mut self) {
        self.sample_all();
        self.bounds.widen(&self.current);
        self.renormalize();

        log_trace!("calibration current: {:?}", self.current);
        log_trace!("calibration minimum: {:?}", self.bounds.min());
        log_trace!("calibration maximum: {:?}", self.bounds.max());
        log_trace!("calibration normalized: {:?}", self.normalized);
    }

    /// Drop all calibration data and the line memory.
    pub fn reset_calibration(&mut self) {
        self.bounds.reset();
        self.normalized = [0; N];
        self.last_estimate = LineEstimate::default();
        self.last_seen = None;
        log_info!("line sensor calibration reset");
    }

    /// Sample every sensor and renormalize against the current bounds.
    pub fn update(&mut self) {
        self.sample_all();
        self.renormalize();
    }

    /// Line position in `0..=(N - 1) * resolution`.
    ///
    /// When no sensor passes the line gate, returns the end of the array on
    /// the side the line was last seen (see [`position::fallback_position`]).
    /// Repeated calls without a new sample return the same value.
    pub fn line_position(&mut self) -> u32 {
        let gates = Gates {
            line_detect_percent: self.config.line_detect_percent,
            noise_gate_percent: self.config.noise_gate_percent,
        };
        self.last_estimate = position::estimate(
            &self.normalized,
            self.config.resolution,
            self.config.inverted_readings,
            gates,
        );

        match self.last_estimate.centroid() {
            Some(centroid) => {
                self.last_seen = Some(centroid);
                centroid
            }
            None => {
                log_debug!("line lost, last seen at {:?}", self.last_seen);
                position::fallback_position(
                    self.last_seen,
                    self.config.lost_line_side,
                    N,
                    self.config.resolution,
                )
            }
        }
    }

    /// Accumulators from the latest [`line_position`](Self::line_position) call.
    pub fn last_estimate(&self) -> &LineEstimate {
        &self.last_estimate
    }

    /// Whether the latest [`line_position`](Self::line_position) call saw the line.
    pub fn is_on_the_line(&self) -> bool {
        self.last_estimate.on_the_line
    }

    /// Latest oversampled raw reading.
    ///
    /// # Panics
    ///
    /// If `index >= N`.
    pub fn sensor(&self, index: usize) -> u16 {
        self.current[index]
    }

    /// Hysteretic state of one sensor's raw reading.
    ///
    /// # Panics
    ///
    /// If `index >= N`.
    pub fn threshold(&self, index: usize) -> SensorState {
        self.config.bands.classify(self.current[index])
    }

    /// Bit `i` set when sensor `i` classifies as [`SensorState::High`].
    pub fn line_mask(&self) -> u32 {
        const { assert!(N <= 32, "line mask holds at most 32 sensors") };
        (0..N)
            .filter(|&index| self.threshold(index) == SensorState::High)
            .fold(0, |mask, index| mask | 1 << index)
    }

    /// Latest oversampled raw readings, one per sensor.
    pub fn current(&self) -> &[u16; N] {
        &self.current
    }

    /// Normalized readings, each in `0..=resolution`.
    pub fn normalized(&self) -> &[u16; N] {
        &self.normalized
    }

    /// Calibration bounds gathered since the last reset.
    pub fn bounds(&self) -> &CalibrationBounds<N> {
        &self.bounds
    }

    /// Number of sensors in the array.
    pub const fn sensors_count(&self) -> usize {
        N
    }

    /// Active configuration.
    pub fn config(&self) -> &LineSensorConfig {
        &self.config
    }

    /// Output scale of normalized readings.
    pub fn resolution(&self) -> u16 {
        self.config.resolution
    }

    /// Change the output scale and renormalize the stored snapshot.
    ///
    /// The remembered line position is rescaled too, so a lost line is still
    /// sought on the side it was last seen.
    pub fn set_resolution(&mut self, resolution: u16) -> Result<(), ConfigError> {
        if resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        let old = u64::from(self.config.resolution);
        self.last_seen = self
            .last_seen
            .map(|position| (u64::from(position) * u64::from(resolution) / old) as u32);
        self.config.resolution = resolution;
        self.renormalize();
        log_debug!("line sensor resolution set to {}", resolution);
        Ok(())
    }

    /// Whether normalized values are flipped before estimating position.
    pub fn inverted_readings(&self) -> bool {
        self.config.inverted_readings
    }

    /// Flip normalized values for a light line on a dark floor.
    pub fn set_inverted_readings(&mut self, inverted: bool) {
        self.config.inverted_readings = inverted;
        log_debug!("line sensor inverted readings: {}", inverted);
    }

    /// Raw reads averaged into one sample.
    pub fn average_filter_count(&self) -> u8 {
        self.config.average_filter_count
    }

    /// Change the oversampling factor. Zero is rejected.
    pub fn set_average_filter_count(&mut self, count: u8) -> Result<(), ConfigError> {
        if count == 0 {
            return Err(ConfigError::ZeroAverageFilterCount);
        }
        self.config.average_filter_count = count;
        Ok(())
    }
}

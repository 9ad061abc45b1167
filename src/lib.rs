#![cfg_attr(not(test), no_std)]

//! Line sensing core for the LiRu robot.
//!
//! Turns an array of reflectance sensors into a single line position:
//! oversampled reads, calibration bounds, two-stage normalization,
//! hysteretic binarization and a noise-gated centroid.
//!
//! Hardware access is injected through [`SensorReader`], so everything here
//! runs the same on the robot and on the host.

mod logging;

pub mod calibration;
pub mod config;
pub mod error;
pub mod line_sensor;
pub mod normalize;
pub mod position;
pub mod reader;
pub mod threshold;

pub use calibration::CalibrationBounds;
pub use config::LineSensorConfig;
pub use error::ConfigError;
pub use line_sensor::SensorArray;
pub use position::{LineEstimate, LineSide};
pub use reader::{OneShotReader, SensorReader};
pub use threshold::{HysteresisBands, SensorState};

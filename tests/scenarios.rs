//! End-to-end behaviour of the sensing pipeline with a synthetic reader.

use std::cell::Cell;

use liru_sense::{LineSensorConfig, SensorArray, SensorState};

const FLOOR: u16 = 100;
const LINE: u16 = 900;
const MIDPOINT: u16 = 500;

/// Eight sensors calibrated over `FLOOR..=LINE`, reading from `raw`.
fn calibrated(
    raw: &Cell<[u16; 8]>,
    config: LineSensorConfig,
) -> SensorArray<impl FnMut(usize) -> u16 + '_, 8> {
    let mut sensors = SensorArray::with_reader(move |i: usize| raw.get()[i], config).unwrap();
    raw.set([FLOOR; 8]);
    sensors.calibrate();
    raw.set([LINE; 8]);
    sensors.calibrate();
    sensors
}

fn line_under(index: usize) -> [u16; 8] {
    let mut readings = [FLOOR; 8];
    readings[index] = LINE;
    readings
}

#[test]
fn lost_line_at_midpoint_never_reports_mid_value() {
    let raw = Cell::new([MIDPOINT; 8]);
    let mut sensors = calibrated(&raw, LineSensorConfig::default());

    raw.set([MIDPOINT; 8]);
    sensors.update();
    assert!(sensors.normalized().iter().all(|&v| v <= 50));

    let position = sensors.line_position();
    assert!(!sensors.is_on_the_line());
    assert!(position == 0 || position == 700);
}

#[test]
fn single_sensor_on_line() {
    let raw = Cell::new([FLOOR; 8]);
    let mut sensors = calibrated(&raw, LineSensorConfig::default());

    raw.set(line_under(4));
    sensors.update();
    assert_eq!(sensors.normalized(), &[0, 0, 0, 0, 100, 0, 0, 0]);

    assert_eq!(sensors.line_position(), 400);
    assert!(sensors.is_on_the_line());
    assert_eq!(sensors.last_estimate().denominator, 100);
}

#[test]
fn inverted_readings_mirror_position() {
    let raw = Cell::new([FLOOR; 8]);
    let mut config = LineSensorConfig::default();
    config.inverted_readings = true;
    let mut sensors = calibrated(&raw, config);

    // Light line on a dark floor: every sensor high except the one over the line.
    let mut readings = [LINE; 8];
    readings[7 - 4] = FLOOR;
    raw.set(readings);
    sensors.update();

    assert_eq!(sensors.line_position(), 300);
}

#[test]
fn lost_line_remembers_direction() {
    let raw = Cell::new([FLOOR; 8]);
    let mut sensors = calibrated(&raw, LineSensorConfig::default());

    raw.set(line_under(6));
    sensors.update();
    assert_eq!(sensors.line_position(), 600);

    raw.set([FLOOR; 8]);
    sensors.update();
    assert_eq!(sensors.line_position(), 700);

    raw.set(line_under(1));
    sensors.update();
    assert_eq!(sensors.line_position(), 100);

    raw.set([FLOOR; 8]);
    sensors.update();
    assert_eq!(sensors.line_position(), 0);
}

#[test]
fn weak_neighbours_shift_centroid_only_above_noise_gate() {
    let raw = Cell::new([FLOOR; 8]);
    let mut sensors = calibrated(&raw, LineSensorConfig::default());

    // Sensor 3 sits at 60% and is averaged in; sensor 5 at 40% is not.
    let mut readings = line_under(4);
    readings[3] = FLOOR + 480;
    readings[5] = FLOOR + 320;
    raw.set(readings);
    sensors.update();

    assert_eq!(sensors.normalized()[3], 60);
    assert_eq!(sensors.normalized()[5], 40);
    assert_eq!(sensors.last_estimate().denominator, 0);

    let position = sensors.line_position();
    assert_eq!(sensors.last_estimate().denominator, 160);
    // (60 * 300 + 100 * 400) / 160
    assert_eq!(position, 362);
}

#[test]
fn hysteresis_holds_high_inside_upper_band() {
    let raw = Cell::new([0; 8]);
    let mut sensors = SensorArray::<_, 8>::with_reader(
        |i: usize| raw.get()[i],
        LineSensorConfig::default(),
    )
    .unwrap();

    let mut states = Vec::new();
    for value in [100, 81, 100, 81, 81, 100] {
        raw.set([value; 8]);
        sensors.update();
        states.push(sensors.threshold(0));
    }
    assert!(states.iter().all(|&s| s == SensorState::High));

    raw.set([50; 8]);
    sensors.update();
    assert_eq!(sensors.threshold(0), SensorState::Indeterminate);

    raw.set([20; 8]);
    sensors.update();
    assert_eq!(sensors.threshold(0), SensorState::Low);
    assert_eq!(sensors.sensor(0), 20);
}

#[test]
fn calibration_without_reader_degenerates_quietly() {
    let mut sensors =
        SensorArray::<fn(usize) -> u16, 8>::new(LineSensorConfig::default()).unwrap();
    sensors.calibrate();
    sensors.update();

    assert_eq!(sensors.bounds().min(), &[0; 8]);
    assert_eq!(sensors.bounds().max(), &[0; 8]);
    assert_eq!(sensors.line_position(), 0);
}

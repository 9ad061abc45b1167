#![no_std]
#![no_main]

mod sensors;

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::Config;
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use liru_sense::SensorArray;
use sensors::{LineSensors, SENSOR_COUNT};

/// Length of the calibration sweep.
const CALIBRATION_SECS: u64 = 10;

/// Control loop period.
const TICK_MS: u64 = 10;

/// Log the line position every this many ticks.
const REPORT_EVERY: u32 = 50;

defmt::timestamp!("{=u64}", { embassy_time::Instant::now().as_millis() });

#[embassy_executor::task]
async fn blink_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        Timer::after_millis(500).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Config::default());

    info!("=== LiRu Line Sensing ===");

    // LED blink task
    let led = Output::new(p.PA5, Level::Low, Speed::Low);
    spawner.spawn(blink_task(led)).unwrap();

    // Initialize sensors via ADC
    let adc = Adc::new(p.ADC1);
    let reader = LineSensors::new(adc, p.PA0, p.PA1, p.PA4, p.PB0, p.PC1, p.PC0, p.PC3, p.PC2);
    let config = sensors::config();
    let mut sensors = match SensorArray::<_, SENSOR_COUNT>::with_reader(reader, config) {
        Ok(sensors) => sensors,
        Err(err) => defmt::panic!("invalid line sensor config: {}", err),
    };
    info!("Sensors initialized");

    // Sweep the robot across the line while this runs.
    info!("Calibrating for {} s...", CALIBRATION_SECS);
    sensors.reset_calibration();
    let start = Instant::now();
    while start.elapsed().as_secs() < CALIBRATION_SECS {
        sensors.calibrate();
        Timer::after_millis(TICK_MS).await;
    }
    info!(
        "Calibration complete: min {} max {}",
        sensors.bounds().min(),
        sensors.bounds().max()
    );

    let mut ticks: u32 = 0;
    loop {
        sensors.update();
        let position = sensors.line_position();

        ticks = ticks.wrapping_add(1);
        if ticks % REPORT_EVERY == 0 {
            info!(
                "position {} on_line {} mask {:08b}",
                position,
                sensors.is_on_the_line(),
                sensors.line_mask()
            );
        }

        Timer::after_millis(TICK_MS).await;
    }
}

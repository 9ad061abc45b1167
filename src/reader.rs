//! Raw sensor access.
//!
//! The array never touches hardware itself. Whatever owns the ADC implements
//! [`SensorReader`] and hands it over; tests use a closure.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use crate::logging::log_warn;

/// One raw read of the sensor at `index`, in ADC units.
pub trait SensorReader {
    /// Single raw conversion of sensor `index`.
    fn read(&mut self, index: usize) -> u16;
}

impl<F> SensorReader for F
where
    F: FnMut(usize) -> u16,
{
    fn read(&mut self, index: usize) -> u16 {
        self(index)
    }
}

/// Average `count` reads of one sensor, truncating the mean.
///
/// Returns 0 when `count` is 0.
pub fn oversample<R: SensorReader + ?Sized>(reader: &mut R, index: usize, count: u8) -> u16 {
    if count == 0 {
        return 0;
    }
    let sum: u32 = (0..count).map(|_| u32::from(reader.read(index))).sum();
    (sum / u32::from(count)) as u16
}

/// [`SensorReader`] over an embedded-hal ADC with one channel type for all sensors.
///
/// Useful with type-erased channels or an external multiplexer. Reads block
/// until the conversion finishes. A failed conversion, or an index without a
/// pin, reads as 0.
pub struct OneShotReader<ADC, A, PIN, const N: usize> {
    adc: A,
    pins: [PIN; N],
    _adc: PhantomData<ADC>,
}

impl<ADC, A, PIN, const N: usize> OneShotReader<ADC, A, PIN, N>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    /// Wrap `adc` with one pin per sensor, in sensor order.
    pub fn new(adc: A, pins: [PIN; N]) -> Self {
        Self {
            adc,
            pins,
            _adc: PhantomData,
        }
    }

    /// Give the ADC and pins back.
    pub fn release(self) -> (A, [PIN; N]) {
        (self.adc, self.pins)
    }
}

impl<ADC, A, PIN, const N: usize> SensorReader for OneShotReader<ADC, A, PIN, N>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    fn read(&mut self, index: usize) -> u16 {
        let Some(pin) = self.pins.get_mut(index) else {
            return 0;
        };
        match nb::block!(self.adc.read(pin)) {
            Ok(value) => value,
            Err(_) => {
                log_warn!("ADC conversion failed on sensor {}", index);
                0
            }
        }
    }
}

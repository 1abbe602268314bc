//! DHT11 sensor access over a GPIO line.
//!
//! The single-wire protocol itself is handled by the `dht11` driver crate;
//! this module owns the GPIO line, adds the driver-level retry policy, and
//! converts raw measurements into floating-point units.

use crate::{Error, Result};
use dht11::Dht11;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, Delay};
use std::time::Duration;
use tracing::{debug, info};

/// GPIO character device for the Raspberry Pi header pins.
const GPIO_CHIP: &str = "/dev/gpiochip0";

/// Extra low-level read attempts before a driver error surfaces.
const DRIVER_RETRIES: u32 = 2;

/// Delay between low-level read attempts.
const DRIVER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A raw temperature/humidity measurement, unvalidated and unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl Measurement {
    /// Builds a measurement from the sensor's fixed-point wire format
    /// (tenths of a degree / tenths of a percent).
    pub fn from_tenths(temperature: i16, humidity: u16) -> Self {
        Self {
            temperature: f64::from(temperature) / 10.0,
            humidity: f64::from(humidity) / 10.0,
        }
    }
}

/// The sensor-driver capability.
///
/// A single blocking call that produces a measurement or a typed failure.
/// The call may block for a few seconds across internal retries.
pub trait DhtSensor {
    fn read(&mut self) -> Result<Measurement>;
}

/// DHT11 sensor on a Raspberry Pi GPIO line.
pub struct Dht11Sensor {
    driver: Dht11<CdevPin>,
    delay: Delay,
    pin: u8,
}

impl Dht11Sensor {
    /// Claims the GPIO line and prepares the driver.
    ///
    /// The line is requested as an output driven high, the bus idle state
    /// for the DHT11 single-wire protocol.
    pub fn open(pin: u8) -> Result<Self> {
        let mut chip = Chip::new(GPIO_CHIP)?;
        let handle = chip
            .get_line(u32::from(pin))?
            .request(LineRequestFlags::OUTPUT, 1, "dhtmon")?;
        let cdev_pin = CdevPin::new(handle)?;

        info!("DHT11 sensor opened on GPIO pin {}", pin);

        Ok(Self {
            driver: Dht11::new(cdev_pin),
            delay: Delay,
            pin,
        })
    }

    /// The GPIO pin this sensor is wired to.
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl DhtSensor for Dht11Sensor {
    fn read(&mut self) -> Result<Measurement> {
        let mut attempt = 0;
        loop {
            match self.driver.perform_measurement(&mut self.delay) {
                Ok(m) => return Ok(Measurement::from_tenths(m.temperature, m.humidity)),
                Err(e) => {
                    attempt += 1;
                    if attempt > DRIVER_RETRIES {
                        return Err(convert_driver_error(e));
                    }
                    debug!(
                        "driver read failed on pin {} (attempt {}/{})",
                        self.pin,
                        attempt,
                        DRIVER_RETRIES + 1
                    );
                    std::thread::sleep(DRIVER_RETRY_DELAY);
                }
            }
        }
    }
}

fn convert_driver_error<E: std::fmt::Debug>(error: dht11::Error<E>) -> Error {
    match error {
        dht11::Error::Timeout => Error::Timeout,
        dht11::Error::CrcMismatch => Error::Communication("checksum mismatch".to_string()),
        dht11::Error::Gpio(e) => Error::Communication(format!("GPIO fault: {e:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_from_tenths() {
        let m = Measurement::from_tenths(225i16, 550u16);
        assert_eq!(m.temperature, 22.5);
        assert_eq!(m.humidity, 55.0);

        // Temperature is signed on the wire, humidity is not.
        let m = Measurement::from_tenths(-15i16, 0u16);
        assert_eq!(m.temperature, -1.5);
        assert_eq!(m.humidity, 0.0);
    }

    #[test]
    fn test_convert_driver_error() {
        assert!(matches!(
            convert_driver_error(dht11::Error::<()>::Timeout),
            Error::Timeout
        ));
        assert!(matches!(
            convert_driver_error(dht11::Error::<()>::CrcMismatch),
            Error::Communication(_)
        ));
        assert!(matches!(
            convert_driver_error(dht11::Error::Gpio(())),
            Error::Communication(_)
        ));
    }
}

//! Character LCD output sink.

use super::Sink;
use crate::reading::AcquisitionResult;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use dht_monitor_hw::Lcd1602;
use embedded_hal::blocking::i2c::Write;
use linux_embedded_hal::I2cdev;
use std::fmt::Debug;
use std::time::Duration;
use tracing::warn;

/// How long the shutdown message stays up before the final blank.
const FAREWELL_PAUSE: Duration = Duration::from_secs(1);

/// Shows the latest reading on a 16x2 LCD.
///
/// If the display failed to initialize, the handle is absent and every
/// emit is a no-op for the rest of the run. Write failures on a present
/// display are transient bus glitches: reported upward for logging, the
/// handle stays alive for the next cycle.
pub struct DisplaySink<I2C> {
    lcd: Option<Lcd1602<I2C>>,
}

impl DisplaySink<I2cdev> {
    /// Tries to open the LCD, degrading to an absent display on failure.
    /// Absence is permanent for the run; no re-initialization is attempted.
    pub fn open(bus: u8, address: u8) -> Self {
        match Lcd1602::open(bus, address) {
            Ok(mut lcd) => {
                if let Err(e) = lcd.write_str("DHT11 monitor") {
                    warn!("LCD greeting failed: {}", e);
                }
                Self { lcd: Some(lcd) }
            }
            Err(e) => {
                warn!("LCD initialization failed: {}. Continuing without display.", e);
                Self { lcd: None }
            }
        }
    }
}

impl<I2C, E> DisplaySink<I2C>
where
    I2C: Write<Error = E>,
    E: Debug,
{
    /// Wraps an already-open (or absent) display handle.
    #[allow(dead_code)]
    pub fn new(lcd: Option<Lcd1602<I2C>>) -> Self {
        Self { lcd }
    }
}

impl<I2C, E> Sink for DisplaySink<I2C>
where
    I2C: Write<Error = E> + Send,
    E: Debug,
{
    fn name(&self) -> &str {
        "display"
    }

    fn emit(&mut self, result: &AcquisitionResult, _timestamp: &DateTime<Local>) -> Result<()> {
        let Some(lcd) = self.lcd.as_mut() else {
            return Ok(());
        };

        lcd.clear().context("clear failed")?;
        match result {
            AcquisitionResult::Success(reading) => {
                lcd.write_str(&format!("Temp: {:.1}C", reading.temperature))?;
                lcd.set_cursor(1, 0)?;
                lcd.write_str(&format!("Humidity: {:.1}%", reading.humidity))?;
            }
            AcquisitionResult::Failed(_) => {
                lcd.write_str("Read error")?;
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        // Take the handle so a second close is a no-op.
        if let Some(mut lcd) = self.lcd.take() {
            // Show the farewell briefly, then leave the panel blank.
            let farewell = lcd
                .clear()
                .and_then(|_| lcd.write_str("Stopped"))
                .and_then(|_| {
                    std::thread::sleep(FAREWELL_PAUSE);
                    lcd.clear()
                });
            if let Err(e) = farewell {
                warn!("LCD shutdown message failed: {}", e);
            }
        }
    }
}

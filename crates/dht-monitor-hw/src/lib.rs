//! DHT11 Monitor Hardware Library
//!
//! Provides hardware abstraction for the DHT11 temperature/humidity sensor
//! and the HD44780-compatible 16x2 character LCD behind a PCF8574 I2C
//! expander, as wired on a Raspberry Pi.

pub mod dht;
pub mod error;
pub mod lcd;

pub use dht::{Dht11Sensor, DhtSensor, Measurement};
pub use error::{Error, Result};
pub use lcd::Lcd1602;

/// LCD display dimensions (character cells).
pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;

/// Default I2C address of the PCF8574 LCD backpack.
pub const LCD_DEFAULT_ADDRESS: u8 = 0x27;

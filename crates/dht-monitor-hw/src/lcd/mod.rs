//! HD44780 character LCD behind a PCF8574 I2C expander.

pub mod device;
pub mod protocol;

pub use device::Lcd1602;

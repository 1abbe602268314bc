//! Error types for the DHT11 monitor hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// GPIO character device could not be opened.
    #[error("GPIO error: {0}")]
    Gpio(#[from] linux_embedded_hal::gpio_cdev::errors::Error),

    /// The sensor did not answer within the protocol deadline.
    #[error("sensor read timed out")]
    Timeout,

    /// Corrupt or otherwise unusable data on the sensor wire.
    #[error("sensor communication error: {0}")]
    Communication(String),

    /// I2C bus for the LCD could not be opened or written.
    #[error("LCD bus error: {0}")]
    LcdBus(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! LCD device communication over I2C.

use crate::{Error, Result, LCD_COLS};
use embedded_hal::blocking::i2c::Write;
use linux_embedded_hal::I2cdev;
use std::fmt::Debug;
use std::time::Duration;
use tracing::info;

use super::protocol::{byte_frames, set_cursor_command, text_frames, CMD_CLEAR, INIT_SEQUENCE};

/// Settling time after commands that rewrite the whole display RAM.
const CLEAR_DELAY: Duration = Duration::from_millis(2);

/// Settling time between initialization commands. The controller is still
/// switching bus modes here and ignores traffic sent too early.
const INIT_DELAY: Duration = Duration::from_millis(5);

/// 16x2 character LCD controller behind a PCF8574 expander.
pub struct Lcd1602<I2C> {
    i2c: I2C,
    address: u8,
}

impl Lcd1602<I2cdev> {
    /// Opens the LCD on a Linux I2C bus and runs the init sequence.
    pub fn open(bus: u8, address: u8) -> Result<Self> {
        let dev = I2cdev::new(format!("/dev/i2c-{bus}"))
            .map_err(|e| Error::LcdBus(format!("cannot open /dev/i2c-{bus}: {e}")))?;
        let lcd = Self::new(dev, address)?;
        info!("LCD opened on bus {} at address 0x{:02X}", bus, address);
        Ok(lcd)
    }
}

impl<I2C, E> Lcd1602<I2C>
where
    I2C: Write<Error = E>,
    E: Debug,
{
    /// Wraps an I2C bus and initializes the controller into 4-bit,
    /// two-line mode with the display on.
    pub fn new(i2c: I2C, address: u8) -> Result<Self> {
        let mut lcd = Self { i2c, address };
        for cmd in INIT_SEQUENCE {
            lcd.command(cmd)?;
            std::thread::sleep(INIT_DELAY);
        }
        lcd.clear()?;
        Ok(lcd)
    }

    /// Blanks the display and returns the cursor to the first cell.
    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        std::thread::sleep(CLEAR_DELAY);
        Ok(())
    }

    /// Moves the cursor to the given row (0 or 1) and column.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<()> {
        self.command(set_cursor_command(row, col))
    }

    /// Writes text at the cursor, truncated to the panel width.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let frames = text_frames(text, LCD_COLS);
        self.write_frames(&frames)
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.write_frames(&byte_frames(cmd, false))
    }

    fn write_frames(&mut self, frames: &[u8]) -> Result<()> {
        self.i2c
            .write(self.address, frames)
            .map_err(|e| Error::LcdBus(format!("{e:?}")))
    }
}

//! Configuration management: TOML file plus command-line overrides.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved configuration, immutable for the life of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// GPIO pin the DHT11 data line is wired to (1-40)
    #[serde(default = "default_gpio_pin")]
    pub gpio_pin: u8,

    /// Poll interval in seconds (minimum 1)
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// CSV log file path; no CSV logging when absent
    #[serde(default)]
    pub csv_file: Option<PathBuf>,

    /// I2C address of the LCD backpack
    #[serde(default = "default_lcd_address")]
    pub lcd_address: u8,

    /// I2C bus number
    #[serde(default = "default_i2c_bus")]
    pub i2c_bus: u8,
}

fn default_gpio_pin() -> u8 {
    18
}

fn default_interval() -> u64 {
    10
}

fn default_lcd_address() -> u8 {
    0x27
}

fn default_i2c_bus() -> u8 {
    1
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            gpio_pin: default_gpio_pin(),
            interval: default_interval(),
            csv_file: None,
            lcd_address: default_lcd_address(),
            i2c_bus: default_i2c_bus(),
        }
    }
}

impl MonitorConfig {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: MonitorConfig =
            toml::from_str(&content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values a config file could smuggle past the CLI parsers.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=40).contains(&self.gpio_pin),
            "gpio_pin must be between 1 and 40, got {}",
            self.gpio_pin
        );
        ensure!(
            self.interval >= 1,
            "interval must be at least 1 second, got {}",
            self.interval
        );
        Ok(())
    }
}

/// Command-line interface. Flags override config-file values.
#[derive(Parser, Debug)]
#[command(name = "dhtmon")]
#[command(about = "DHT11 temperature/humidity monitor")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// GPIO pin the DHT11 data line is wired to (default: 18)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
    gpio: Option<u8>,

    /// Poll interval in seconds (default: 10)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// CSV log file path (no CSV logging if omitted)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// LCD I2C address, hex accepted (default: 0x27)
    #[arg(long, value_parser = parse_lcd_address)]
    lcd_addr: Option<u8>,

    /// I2C bus number (default: 1)
    #[arg(long)]
    i2c_bus: Option<u8>,
}

impl Cli {
    /// Resolves the final configuration from the optional file and flags.
    pub fn into_config(self) -> Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::load(path)?,
            None => MonitorConfig::default(),
        };

        if let Some(pin) = self.gpio {
            config.gpio_pin = pin;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(path) = self.csv {
            config.csv_file = Some(path);
        }
        if let Some(addr) = self.lcd_addr {
            config.lcd_address = addr;
        }
        if let Some(bus) = self.i2c_bus {
            config.i2c_bus = bus;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses an I2C address given as decimal or 0x-prefixed hex.
fn parse_lcd_address(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid I2C address: {s}"))
}

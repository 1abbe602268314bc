//! Value types for one poll cycle.

#![allow(dead_code)]

use chrono::{DateTime, Local};
use std::fmt;

/// Timestamp format used on the console and in CSV rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated temperature/humidity pair with its capture timestamp.
/// Values are rounded to one decimal place at construction and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: DateTime<Local>,
}

impl Reading {
    pub fn new(temperature: f64, humidity: f64, timestamp: DateTime<Local>) -> Self {
        Self {
            temperature: round_one_decimal(temperature),
            humidity: round_one_decimal(humidity),
            timestamp,
        }
    }

    /// Temperature in degrees Fahrenheit, same one-decimal precision.
    pub fn temperature_fahrenheit(&self) -> f64 {
        round_one_decimal(self.temperature * 9.0 / 5.0 + 32.0)
    }
}

/// Why a poll cycle produced no reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Sensor wire glitch, expected to recur and always tolerated.
    Transient,
    /// The sensor answered with a physically implausible value.
    OutOfRange,
    /// The sensor never answered.
    Timeout,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Transient => write!(f, "transient I/O error"),
            FailureReason::OutOfRange => write!(f, "reading out of range"),
            FailureReason::Timeout => write!(f, "timeout"),
        }
    }
}

/// Outcome of one acquisition, dispatched to every sink as a value.
/// Failures are ordinary cycle results, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionResult {
    Success(Reading),
    Failed(FailureReason),
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

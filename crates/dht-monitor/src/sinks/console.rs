//! Console output sink.

use super::Sink;
use crate::reading::{AcquisitionResult, TIMESTAMP_FORMAT};
use anyhow::Result;
use chrono::{DateTime, Local};

/// Prints one line per cycle to stdout.
pub struct ConsoleSink;

impl ConsoleSink {
    fn format_line(result: &AcquisitionResult, timestamp: &DateTime<Local>) -> String {
        let ts = timestamp.format(TIMESTAMP_FORMAT);
        match result {
            AcquisitionResult::Success(reading) => format!(
                "{} - temperature: {:.1}C, humidity: {:.1}%",
                ts, reading.temperature, reading.humidity
            ),
            AcquisitionResult::Failed(_) => format!("{ts} - read failed"),
        }
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&mut self, result: &AcquisitionResult, timestamp: &DateTime<Local>) -> Result<()> {
        println!("{}", Self::format_line(result, timestamp));
        Ok(())
    }
}

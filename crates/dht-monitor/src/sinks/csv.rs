//! CSV file output sink.

use super::Sink;
use crate::reading::{AcquisitionResult, TIMESTAMP_FORMAT};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Header row written when the file is created.
pub const CSV_HEADER: &str = "timestamp,temperature,humidity";

/// Appends one row per successful cycle to a CSV file.
///
/// Failure cycles write nothing. The file is opened and closed on every
/// append so an abrupt termination never leaves a handle mid-write; at
/// multi-second polling intervals the reopen cost is irrelevant.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates the log file and writes the header row.
    ///
    /// An existing file at `path` is truncated.
    pub fn create(path: PathBuf) -> Result<Self> {
        let mut file = File::create(&path)
            .with_context(|| format!("cannot create CSV file {}", path.display()))?;
        writeln!(file, "{CSV_HEADER}").context("cannot write CSV header")?;

        info!("CSV log initialized: {}", path.display());
        Ok(Self { path })
    }
}

impl Sink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn emit(&mut self, result: &AcquisitionResult, _timestamp: &DateTime<Local>) -> Result<()> {
        // Failure cycles are skipped, not logged as empty rows.
        let AcquisitionResult::Success(reading) = result else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("cannot open CSV file {}", self.path.display()))?;
        writeln!(
            file,
            "{},{:.1},{:.1}",
            reading.timestamp.format(TIMESTAMP_FORMAT),
            reading.temperature,
            reading.humidity
        )
        .context("cannot append CSV row")?;
        Ok(())
    }
}

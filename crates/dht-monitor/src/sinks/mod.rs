//! Output sinks: independent consumers of each poll cycle's result.

mod console;
mod csv;
mod display;

pub use console::ConsoleSink;
pub use csv::CsvSink;
pub use display::DisplaySink;

use crate::reading::AcquisitionResult;
use anyhow::Result;
use chrono::{DateTime, Local};

/// One consumer of cycle results.
///
/// `emit` failures are logged by the loop and never stop the other sinks
/// or the next cycle. `close` runs once during shutdown.
pub trait Sink: Send {
    /// Sink name used in log lines.
    fn name(&self) -> &str;

    /// Consumes one cycle's result.
    fn emit(&mut self, result: &AcquisitionResult, timestamp: &DateTime<Local>) -> Result<()>;

    /// Releases the sink's resources. Must be idempotent.
    fn close(&mut self) {}
}

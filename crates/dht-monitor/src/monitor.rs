//! The polling loop: acquire, dispatch to sinks, sleep, repeat.

use crate::reader::SensorReader;
use crate::sinks::Sink;
use chrono::Local;
use dht_monitor_hw::DhtSensor;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Owns the sensor reader and the sink list for the life of the run.
pub struct Monitor<D> {
    reader: SensorReader<D>,
    sinks: Vec<Box<dyn Sink>>,
    interval: Duration,
}

impl<D: DhtSensor> Monitor<D> {
    pub fn new(reader: SensorReader<D>, sinks: Vec<Box<dyn Sink>>, interval: Duration) -> Self {
        Self {
            reader,
            sinks,
            interval,
        }
    }

    /// Runs poll cycles until a message arrives on the shutdown channel,
    /// then cleans up. The channel is only checked during the inter-cycle
    /// sleep, so a cycle that has started always completes.
    ///
    /// Consuming `self` means cleanup runs exactly once and the sensor
    /// handle is released when the monitor is dropped on return.
    pub async fn run(mut self, mut shutdown: mpsc::Receiver<()>) {
        info!("monitoring started (interval: {:?})", self.interval);

        loop {
            let timestamp = Local::now();
            let result = self.reader.acquire(timestamp);

            // Fixed dispatch order; one sink failing never stops the rest.
            for sink in &mut self.sinks {
                if let Err(e) = sink.emit(&result, &timestamp) {
                    warn!("{} sink error: {:#}", sink.name(), e);
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.recv() => {
                    info!("shutdown requested, stopping poll loop");
                    break;
                }
            }
        }

        for sink in &mut self.sinks {
            sink.close();
        }
        info!("monitoring stopped");
    }
}

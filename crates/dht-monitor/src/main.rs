//! DHT11 Temperature/Humidity Monitor
//!
//! Polls a DHT11 sensor at a fixed interval and fans each reading out to
//! the console, an optional 16x2 character LCD, and an optional CSV log.

mod config;
mod monitor;
mod reader;
mod reading;
mod sinks;

use anyhow::{Context, Result};
use clap::Parser;
use dht_monitor_hw::Dht11Sensor;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Cli;
use monitor::Monitor;
use reader::SensorReader;
use sinks::{ConsoleSink, CsvSink, DisplaySink, Sink};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Cli::parse().into_config()?;

    info!("poll interval: {}s", config.interval);
    info!("GPIO pin: {}", config.gpio_pin);
    if let Some(path) = &config.csv_file {
        info!("CSV log: {}", path.display());
    }
    info!("press Ctrl+C to stop");

    // No sensor, no program.
    let sensor =
        Dht11Sensor::open(config.gpio_pin).context("failed to open the DHT11 sensor")?;
    let reader = SensorReader::new(sensor);

    // Sinks in dispatch order: console, display, CSV. The display and the
    // CSV log degrade to disabled if they cannot initialize.
    let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(ConsoleSink)];
    sinks.push(Box::new(DisplaySink::open(
        config.i2c_bus,
        config.lcd_address,
    )));
    if let Some(path) = &config.csv_file {
        match CsvSink::create(path.clone()) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => warn!("CSV logging disabled: {:#}", e),
        }
    }

    // Forward SIGINT/SIGTERM into the shutdown channel the loop selects on.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        }
        let _ = shutdown_tx.send(()).await;
    });

    let monitor = Monitor::new(reader, sinks, Duration::from_secs(config.interval));
    monitor.run(shutdown_rx).await;

    Ok(())
}

//! Sensor acquisition with retry and plausibility validation.

use crate::reading::{AcquisitionResult, FailureReason, Reading};
use chrono::{DateTime, Local};
use dht_monitor_hw::{DhtSensor, Error};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::warn;

/// Read attempts per acquisition before giving up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Physically plausible envelope for the DHT11, wider than its rated
/// accurate range so noisy-but-real values survive while garbage does not.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -40.0..=80.0;
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Wraps a sensor driver and turns its instability into a typed result.
///
/// No driver failure ever crosses this boundary as an error; every
/// acquisition yields either a validated [`Reading`] or a
/// [`FailureReason`].
pub struct SensorReader<D> {
    sensor: D,
    retry_delay: Duration,
}

impl<D: DhtSensor> SensorReader<D> {
    pub fn new(sensor: D) -> Self {
        Self::with_retry_delay(sensor, RETRY_DELAY)
    }

    /// Same as [`new`](Self::new) with a custom inter-attempt delay.
    pub fn with_retry_delay(sensor: D, retry_delay: Duration) -> Self {
        Self {
            sensor,
            retry_delay,
        }
    }

    /// Acquires one validated reading, retrying up to [`MAX_ATTEMPTS`]
    /// times with a delay between attempts. The failure reason reported
    /// after the final attempt is the reason of the last failure seen.
    pub fn acquire(&mut self, timestamp: DateTime<Local>) -> AcquisitionResult {
        let mut reason = FailureReason::Transient;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.sensor.read() {
                Ok(m) => {
                    if HUMIDITY_RANGE.contains(&m.humidity)
                        && TEMPERATURE_RANGE.contains(&m.temperature)
                    {
                        return AcquisitionResult::Success(Reading::new(
                            m.temperature,
                            m.humidity,
                            timestamp,
                        ));
                    }
                    warn!(
                        "implausible reading discarded: temperature={}C, humidity={}%",
                        m.temperature, m.humidity
                    );
                    reason = FailureReason::OutOfRange;
                }
                Err(e) => {
                    reason = match e {
                        Error::Timeout => FailureReason::Timeout,
                        _ => FailureReason::Transient,
                    };
                    warn!("sensor read failed ({}), attempt {}/{}", e, attempt, MAX_ATTEMPTS);
                }
            }

            if attempt < MAX_ATTEMPTS {
                std::thread::sleep(self.retry_delay);
            }
        }

        AcquisitionResult::Failed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dht_monitor_hw::Measurement;
    use rstest::rstest;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    /// Driver stand-in that plays back a script of outcomes.
    struct ScriptedSensor {
        outcomes: VecDeque<dht_monitor_hw::Result<Measurement>>,
        reads: Arc<AtomicUsize>,
    }

    impl ScriptedSensor {
        fn new(outcomes: Vec<dht_monitor_hw::Result<Measurement>>) -> (Self, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            let sensor = Self {
                outcomes: outcomes.into(),
                reads: reads.clone(),
            };
            (sensor, reads)
        }
    }

    impl DhtSensor for ScriptedSensor {
        fn read(&mut self) -> dht_monitor_hw::Result<Measurement> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .pop_front()
                .unwrap_or(Err(Error::Timeout))
        }
    }

    fn ok(temperature: f64, humidity: f64) -> dht_monitor_hw::Result<Measurement> {
        Ok(Measurement {
            temperature,
            humidity,
        })
    }

    fn comm_error() -> dht_monitor_hw::Result<Measurement> {
        Err(Error::Communication("checksum mismatch".to_string()))
    }

    #[rstest]
    #[case(22.5, 55.0)]
    #[case(-40.0, 0.0)]
    #[case(80.0, 100.0)]
    #[case(0.0, 50.0)]
    fn test_first_attempt_success(#[case] temperature: f64, #[case] humidity: f64) {
        let (sensor, reads) = ScriptedSensor::new(vec![ok(temperature, humidity)]);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        let result = reader.acquire(Local::now());
        match result {
            AcquisitionResult::Success(reading) => {
                assert_eq!(reading.temperature, temperature);
                assert_eq!(reading.humidity, humidity);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_success_rounds_to_one_decimal() {
        let (sensor, _) = ScriptedSensor::new(vec![ok(22.54, 55.06)]);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        match reader.acquire(Local::now()) {
            AcquisitionResult::Success(reading) => {
                assert_eq!(reading.temperature, 22.5);
                assert_eq!(reading.humidity, 55.1);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[rstest]
    #[case(150.0, 50.0)]
    #[case(25.0, 100.1)]
    #[case(-40.1, 50.0)]
    #[case(25.0, -0.1)]
    fn test_out_of_range_exhausts_attempts(#[case] temperature: f64, #[case] humidity: f64) {
        let script = vec![
            ok(temperature, humidity),
            ok(temperature, humidity),
            ok(temperature, humidity),
        ];
        let (sensor, reads) = ScriptedSensor::new(script);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        let result = reader.acquire(Local::now());
        assert_eq!(result, AcquisitionResult::Failed(FailureReason::OutOfRange));
        assert_eq!(reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_waits_between_attempts() {
        let delay = Duration::from_millis(50);
        let (sensor, _) = ScriptedSensor::new(vec![comm_error(), comm_error(), comm_error()]);
        let mut reader = SensorReader::with_retry_delay(sensor, delay);

        let start = Instant::now();
        let result = reader.acquire(Local::now());
        let elapsed = start.elapsed();

        assert_eq!(result, AcquisitionResult::Failed(FailureReason::Transient));
        // Two inter-attempt waits, none after the final attempt.
        assert!(elapsed >= delay * 2, "only waited {elapsed:?}");
        assert!(elapsed < delay * 6, "waited too long: {elapsed:?}");
    }

    #[test]
    fn test_recovers_on_third_attempt() {
        let script = vec![comm_error(), comm_error(), ok(21.0, 60.0)];
        let (sensor, reads) = ScriptedSensor::new(script);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        match reader.acquire(Local::now()) {
            AcquisitionResult::Success(reading) => {
                assert_eq!(reading.temperature, 21.0);
                assert_eq!(reading.humidity, 60.0);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_reports_last_failure_reason() {
        let script = vec![comm_error(), comm_error(), Err(Error::Timeout)];
        let (sensor, _) = ScriptedSensor::new(script);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        let result = reader.acquire(Local::now());
        assert_eq!(result, AcquisitionResult::Failed(FailureReason::Timeout));
    }

    #[test]
    fn test_out_of_range_then_valid() {
        let script = vec![ok(150.0, 50.0), ok(22.0, 45.0)];
        let (sensor, reads) = ScriptedSensor::new(script);
        let mut reader = SensorReader::with_retry_delay(sensor, Duration::ZERO);

        match reader.acquire(Local::now()) {
            AcquisitionResult::Success(reading) => {
                assert_eq!(reading.temperature, 22.0);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }
}

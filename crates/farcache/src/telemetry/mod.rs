// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Telemetry for adapter operations.
//!
//! Every operation outcome is logged through `tracing` (hits and misses at
//! debug level, failures at warn). With the `metrics` feature enabled, a
//! [`Telemetry`] built from an OpenTelemetry meter provider additionally
//! records an event counter and an operation-duration histogram.

use std::time::Duration;

#[cfg(feature = "metrics")]
pub(crate) mod metrics;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Operation {
    Get,
    Set,
    Delete,
    BulkGet,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "cache.get",
            Self::Set => "cache.set",
            Self::Delete => "cache.delete",
            Self::BulkGet => "cache.bulk_get",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Activity {
    Hit,
    Miss,
    Stored,
    Deleted,
    Ok,
    Error,
    Unsupported,
}

impl Activity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Stored => "cache.stored",
            Self::Deleted => "cache.deleted",
            Self::Ok => "cache.ok",
            Self::Error => "cache.error",
            Self::Unsupported => "cache.unsupported",
        }
    }

    fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Unsupported)
    }
}

/// Telemetry recorder for cache operations.
///
/// The default recorder logs outcomes through `tracing` only. Construct one
/// with [`Telemetry::with_meter_provider`] (behind the `metrics` feature) to
/// also emit OpenTelemetry metrics, then pass it to the client builder.
#[derive(Clone, Debug, Default)]
pub struct Telemetry {
    #[cfg(feature = "metrics")]
    event_counter: Option<opentelemetry::metrics::Counter<u64>>,
    #[cfg(feature = "metrics")]
    operation_duration: Option<opentelemetry::metrics::Histogram<f64>>,
}

impl Telemetry {
    /// Creates a recorder that logs outcomes without emitting metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that also emits OpenTelemetry metrics.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_meter_provider(provider: &dyn opentelemetry::metrics::MeterProvider) -> Self {
        let meter = metrics::create_meter(provider);
        Self {
            event_counter: Some(metrics::create_event_counter(&meter)),
            operation_duration: Some(metrics::create_operation_duration_histogram(&meter)),
        }
    }

    /// Records a call to an operation the adapter refuses to implement.
    ///
    /// No duration is recorded: the call fails before anything is timed.
    pub(crate) fn record_unsupported(&self, cache: &str, operation: &'static str) {
        tracing::warn!(
            cache,
            operation,
            activity = Activity::Unsupported.as_str(),
            "unsupported cache operation"
        );

        #[cfg(feature = "metrics")]
        if let Some(counter) = &self.event_counter {
            counter.add(
                1,
                &[
                    opentelemetry::KeyValue::new(metrics::CACHE_NAME, cache.to_owned()),
                    opentelemetry::KeyValue::new(metrics::CACHE_OPERATION, operation),
                    opentelemetry::KeyValue::new(metrics::CACHE_ACTIVITY, Activity::Unsupported.as_str()),
                ],
            );
        }
    }

    pub(crate) fn record(&self, cache: &str, operation: Operation, activity: Activity, duration: Duration) {
        if activity.is_failure() {
            tracing::warn!(
                cache,
                operation = operation.as_str(),
                activity = activity.as_str(),
                "cache operation failed"
            );
        } else {
            tracing::debug!(
                cache,
                operation = operation.as_str(),
                activity = activity.as_str(),
                elapsed_us = duration.as_micros() as u64,
                "cache operation"
            );
        }

        #[cfg(feature = "metrics")]
        {
            let attributes = [
                opentelemetry::KeyValue::new(metrics::CACHE_NAME, cache.to_owned()),
                opentelemetry::KeyValue::new(metrics::CACHE_OPERATION, operation.as_str()),
                opentelemetry::KeyValue::new(metrics::CACHE_ACTIVITY, activity.as_str()),
            ];
            if let Some(counter) = &self.event_counter {
                counter.add(1, &attributes);
            }
            if let Some(histogram) = &self.operation_duration {
                histogram.record(duration.as_secs_f64(), &attributes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_as_str() {
        assert_eq!(Operation::Get.as_str(), "cache.get");
        assert_eq!(Operation::Set.as_str(), "cache.set");
        assert_eq!(Operation::Delete.as_str(), "cache.delete");
        assert_eq!(Operation::BulkGet.as_str(), "cache.bulk_get");
    }

    #[test]
    fn activity_as_str() {
        assert_eq!(Activity::Hit.as_str(), "cache.hit");
        assert_eq!(Activity::Miss.as_str(), "cache.miss");
        assert_eq!(Activity::Stored.as_str(), "cache.stored");
        assert_eq!(Activity::Deleted.as_str(), "cache.deleted");
        assert_eq!(Activity::Ok.as_str(), "cache.ok");
        assert_eq!(Activity::Error.as_str(), "cache.error");
        assert_eq!(Activity::Unsupported.as_str(), "cache.unsupported");
    }

    #[test]
    fn failures_are_classified() {
        assert!(Activity::Error.is_failure());
        assert!(Activity::Unsupported.is_failure());
        assert!(!Activity::Hit.is_failure());
        assert!(!Activity::Miss.is_failure());
    }

    #[test]
    fn plain_recorder_records_without_panicking() {
        let telemetry = Telemetry::new();
        telemetry.record("products", Operation::Get, Activity::Hit, Duration::from_millis(1));
        telemetry.record("products", Operation::Get, Activity::Error, Duration::ZERO);
    }
}

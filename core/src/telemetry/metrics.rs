use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Counter values at the time of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub sweeps_processed: usize,
    pub sweeps_skipped: usize,
    pub ring_overflows: usize,
    pub timing_anomalies: usize,
    pub retained_points: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_processed(&self, retained_points: usize, timing_anomalies: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sweeps_processed += 1;
            metrics.retained_points += retained_points;
            metrics.timing_anomalies += timing_anomalies;
        }
    }

    pub fn record_skipped(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.sweeps_skipped += 1;
        }
    }

    pub fn record_overflow(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ring_overflows += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

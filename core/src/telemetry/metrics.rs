use crate::prelude::Advisory;
use std::sync::Mutex;

/// Counts advisories answered with data vs. those that came back unavailable.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    answered: usize,
    unavailable: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                answered: 0,
                unavailable: 0,
            }),
        }
    }

    pub fn record<T>(&self, advisory: &Advisory<T>) {
        if advisory.is_available() {
            self.record_answered();
        } else {
            self.record_unavailable();
        }
    }

    pub fn record_answered(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.answered += 1;
        }
    }

    pub fn record_unavailable(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.unavailable += 1;
        }
    }

    /// `(answered, unavailable)`
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.answered, metrics.unavailable)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::AdvisoryReason;

    #[test]
    fn counts_by_outcome() {
        let metrics = MetricsRecorder::new();
        metrics.record(&Advisory::Available(1u8));
        metrics.record(&Advisory::<u8>::Unavailable(AdvisoryReason::NoData));
        metrics.record(&Advisory::<u8>::Unavailable(AdvisoryReason::DriverNotFound));
        assert_eq!(metrics.snapshot(), (1, 2));
    }
}

use std::sync::Mutex;

/// Counters describing how boundary resolution went this session.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub remote: usize,
    pub fallback: usize,
    pub discarded: usize,
}

struct Metrics {
    remote: usize,
    fallback: usize,
    discarded: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                remote: 0,
                fallback: 0,
                discarded: 0,
            }),
        }
    }

    pub fn record_remote(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.remote += 1;
        }
    }

    pub fn record_fallback(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.fallback += 1;
        }
    }

    pub fn record_discarded(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.discarded += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                remote: metrics.remote,
                fallback: metrics.fallback,
                discarded: metrics.discarded,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

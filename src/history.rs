//! history.rs — in-memory log of recent analytics computations for diagnostics.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::DerivedMetrics;

#[derive(Debug, Clone)]
pub struct ComputationEntry {
    pub ts_unix: u64,
    pub record_count: usize,
    // headline aggregates for quick diagnostics; None = undefined
    pub avg_ccc: Option<f64>,
    pub avg_roic: Option<f64>,
    pub avg_utilization: Option<f64>,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<ComputationEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, record_count: usize, metrics: &DerivedMetrics) {
        let entry = ComputationEntry {
            ts_unix: now_unix(),
            record_count,
            avg_ccc: metrics.ccc.average,
            avg_roic: metrics.roic.average,
            avg_utilization: metrics.utilization_rate.average,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<ComputationEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

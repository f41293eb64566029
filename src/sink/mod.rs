//! Observation sinks fed by the validation engine.
//!
//! Sinks are fire-and-forget: the engine hands them data after each
//! validation pass and never learns whether delivery worked. Implementations
//! that talk to real backends must swallow their own failures.
//!
//! [`NoopAuditSink`] and [`NoopMetricsSink`] are the defaults;
//! [`MemoryAuditSink`] and [`WindowedMetrics`] cover tests and in-process
//! observability.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drift::ConsistencyCheck;

/// One audit record per completed validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub feature_count: usize,
    pub speculative_count: usize,
    pub assumption_count: usize,
    pub llm_judge_calls: u32,
    pub internal_consistency_check: ConsistencyCheck,
    pub final_score: f64,
    pub duration_ms: u64,
}

/// Receives one [`AuditEntry`] per validation.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry);
}

/// Receives per-validation latency and confidence observations.
pub trait MetricsSink: Send + Sync {
    fn record_latency(&self, elapsed_ms: u64);
    fn record_confidence(&self, score: f64);
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _entry: AuditEntry) {}
}

/// Discards every observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record_latency(&self, _elapsed_ms: u64) {}
    fn record_confidence(&self, _score: f64) {}
}

/// Unbounded in-process audit log.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the recorded entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: AuditEntry) {
        self.entries.lock().push(entry);
    }
}

/// Rolling-window metrics over the most recent validations.
///
/// Both buffers keep at most `capacity` observations; older ones fall off
/// the front as new ones arrive.
#[derive(Debug)]
pub struct WindowedMetrics {
    capacity: usize,
    latencies_ms: Mutex<VecDeque<u64>>,
    confidences: Mutex<VecDeque<f64>>,
}

impl WindowedMetrics {
    const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            latencies_ms: Mutex::new(VecDeque::new()),
            confidences: Mutex::new(VecDeque::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latency_count(&self) -> usize {
        self.latencies_ms.lock().len()
    }

    pub fn confidence_count(&self) -> usize {
        self.confidences.lock().len()
    }

    /// Mean latency over the current window, if any observations exist.
    pub fn mean_latency_ms(&self) -> Option<f64> {
        let window = self.latencies_ms.lock();
        if window.is_empty() {
            return None;
        }
        Some(window.iter().sum::<u64>() as f64 / window.len() as f64)
    }

    /// Mean confidence over the current window, if any observations exist.
    pub fn mean_confidence(&self) -> Option<f64> {
        let window = self.confidences.lock();
        if window.is_empty() {
            return None;
        }
        Some(window.iter().sum::<f64>() / window.len() as f64)
    }

    fn push_bounded<T>(window: &mut VecDeque<T>, value: T, capacity: usize) {
        window.push_back(value);
        while window.len() > capacity {
            window.pop_front();
        }
    }
}

impl Default for WindowedMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for WindowedMetrics {
    fn record_latency(&self, elapsed_ms: u64) {
        Self::push_bounded(&mut self.latencies_ms.lock(), elapsed_ms, self.capacity);
    }

    fn record_confidence(&self, score: f64) {
        Self::push_bounded(&mut self.confidences.lock(), score, self.capacity);
    }
}

//! Advisory service runtime state
//!
//! Shared counters and server start time, read by the status endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Core service state shared across requests
#[derive(Debug)]
pub struct AdvisoryState {
    server_start_time: Instant,
    crop_requests: AtomicU64,
    fertilizer_requests: AtomicU64,
    records_persisted: AtomicU64,
    persistence_failures: AtomicU64,
}

/// Point-in-time view of the counters for the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    pub uptime_seconds: u64,
    pub crop_requests: u64,
    pub fertilizer_requests: u64,
    pub records_persisted: u64,
    pub persistence_failures: u64,
}

impl AdvisoryState {
    /// Create fresh state at server startup
    pub fn new() -> Self {
        Self {
            server_start_time: Instant::now(),
            crop_requests: AtomicU64::new(0),
            fertilizer_requests: AtomicU64::new(0),
            records_persisted: AtomicU64::new(0),
            persistence_failures: AtomicU64::new(0),
        }
    }

    pub fn record_crop_request(&self) {
        self.crop_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fertilizer_request(&self) {
        self.fertilizer_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persisted(&self) {
        self.records_persisted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persistence_failure(&self) {
        self.persistence_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters for reporting
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            uptime_seconds: self.server_start_time.elapsed().as_secs(),
            crop_requests: self.crop_requests.load(Ordering::Relaxed),
            fertilizer_requests: self.fertilizer_requests.load(Ordering::Relaxed),
            records_persisted: self.records_persisted.load(Ordering::Relaxed),
            persistence_failures: self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for AdvisoryState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let state = AdvisoryState::new();
        let snapshot = state.snapshot();

        assert_eq!(snapshot.crop_requests, 0);
        assert_eq!(snapshot.fertilizer_requests, 0);
        assert_eq!(snapshot.records_persisted, 0);
        assert_eq!(snapshot.persistence_failures, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let state = AdvisoryState::new();

        state.record_crop_request();
        state.record_crop_request();
        state.record_fertilizer_request();
        state.record_persisted();
        state.record_persistence_failure();

        let snapshot = state.snapshot();
        assert_eq!(snapshot.crop_requests, 2);
        assert_eq!(snapshot.fertilizer_requests, 1);
        assert_eq!(snapshot.records_persisted, 1);
        assert_eq!(snapshot.persistence_failures, 1);
    }
}

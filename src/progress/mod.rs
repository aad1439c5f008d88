//! Progress accounting for a crawl run
//!
//! The tracker owns a pair of counters against a fixed total and exposes
//! both a pull-based snapshot and a push-based notification: every counter
//! change synchronously invokes the registered observer with a fresh
//! snapshot. The orchestrator drives one page at a time, so the counters
//! need no locking.

use serde::Serialize;

/// Point-in-time view of crawl progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    /// Number of pages in the run
    pub total: usize,
    /// Pages crawled successfully so far
    pub completed: usize,
    /// Pages that failed so far
    pub failed: usize,
    /// Processed share of the total, rounded to a whole percent.
    /// Defined as 100 for an empty run.
    pub percentage: u8,
}

/// Observer invoked with a fresh snapshot after every counter change
pub type ProgressCallback = Box<dyn FnMut(ProgressSnapshot) + Send>;

/// Mutable counters for one crawl run
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    failed: usize,
    on_progress: Option<ProgressCallback>,
}

impl ProgressTracker {
    /// Creates a tracker for `total` pages with an optional observer
    pub fn new(total: usize, on_progress: Option<ProgressCallback>) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
            on_progress,
        }
    }

    /// Records one successful page and notifies the observer
    pub fn increment_completed(&mut self) {
        self.completed += 1;
        self.notify();
    }

    /// Records one failed page and notifies the observer
    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.notify();
    }

    /// Derives a snapshot from the current counters
    pub fn snapshot(&self) -> ProgressSnapshot {
        let processed = self.completed + self.failed;
        let percentage = if self.total == 0 {
            100
        } else {
            (processed as f64 / self.total as f64 * 100.0).round() as u8
        };

        ProgressSnapshot {
            total: self.total,
            completed: self.completed,
            failed: self.failed,
            percentage,
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let Some(on_progress) = &mut self.on_progress {
            on_progress(snapshot);
        }
    }
}

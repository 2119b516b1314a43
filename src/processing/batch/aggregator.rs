//! Progress aggregation for a running batch.
//!
//! The aggregator is owned by the scheduler's single result-consuming loop,
//! so its state is never touched concurrently.

use std::time::{Duration, Instant};
use crate::core::{BatchSummary, FailedFile, JobResult, ProgressReport};

/// Running counters for one batch.
#[derive(Debug, Clone)]
pub struct BatchStats {
    pub total: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub started: Instant,
}

impl BatchStats {
    /// Progress percentage (0-100), floored.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }

    /// `(elapsed / completed) * (total - completed)`; `None` before the first completion.
    pub fn eta(&self, elapsed: Duration) -> Option<Duration> {
        if self.completed == 0 {
            return None;
        }
        let per_job = elapsed.as_secs_f64() / self.completed as f64;
        let remaining = self.total.saturating_sub(self.completed) as f64;
        Some(Duration::from_secs_f64(per_job * remaining))
    }
}

/// Turns job results into progress reports and, at the end, a summary.
#[derive(Debug)]
pub struct ProgressAggregator {
    stats: BatchStats,
    failures: Vec<FailedFile>,
}

impl ProgressAggregator {
    pub fn new(total: usize) -> Self {
        Self::starting_at(total, Instant::now())
    }

    pub fn starting_at(total: usize, started: Instant) -> Self {
        Self {
            stats: BatchStats {
                total,
                completed: 0,
                succeeded: 0,
                failed: 0,
                started,
            },
            failures: Vec::new(),
        }
    }

    /// Records one result, timestamped now.
    pub fn on_result(&mut self, result: &JobResult) -> ProgressReport {
        self.record(result, Instant::now())
    }

    /// Records one result as of `now`.
    pub fn record(&mut self, result: &JobResult, now: Instant) -> ProgressReport {
        debug_assert!(
            self.stats.completed < self.stats.total,
            "more results than jobs"
        );

        if result.is_success() {
            self.stats.succeeded += 1;
        } else {
            self.stats.failed += 1;
            self.failures.push(FailedFile {
                input_path: result.input_path.clone(),
                error: result.error().unwrap_or_default().to_string(),
            });
        }
        self.stats.completed = self.stats.succeeded + self.stats.failed;

        let elapsed = now.saturating_duration_since(self.stats.started);
        ProgressReport {
            completed: self.stats.completed,
            total: self.stats.total,
            percent: self.stats.percent(),
            eta: self.stats.eta(elapsed),
        }
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// Freezes the counters into a [`BatchSummary`].
    pub fn into_summary(self, skipped_entries: usize, cancelled: bool, elapsed: Duration) -> BatchSummary {
        BatchSummary {
            total: self.stats.total,
            succeeded: self.stats.succeeded,
            failed: self.stats.failed,
            skipped_entries,
            cancelled,
            elapsed,
            failures: self.failures,
        }
    }
}

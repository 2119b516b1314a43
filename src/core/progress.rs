use std::path::PathBuf;
use std::time::Duration;
use serde::Serialize;

/// Progress tick handed to the caller after every completed job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Number of completed jobs
    pub completed: usize,
    /// Total number of jobs in the batch
    pub total: usize,
    /// Progress percentage (0-100), never decreasing
    pub percent: u8,
    /// Linear estimate of the time left; `None` before the first completion
    pub eta: Option<Duration>,
}

impl ProgressReport {
    /// Estimated seconds remaining, `0.0` when no estimate exists yet.
    pub fn eta_seconds(&self) -> f64 {
        self.eta.map(|d| d.as_secs_f64()).unwrap_or(0.0)
    }
}

/// A failed file as recorded in the batch summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedFile {
    pub input_path: PathBuf,
    pub error: String,
}

/// Outcome of a whole batch run.
///
/// A batch that ran with failed files is still a successful run; only
/// configuration errors prevent a summary from being produced.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Matching files discovered
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Unreadable entries skipped during discovery
    pub skipped_entries: usize,
    /// Dispatch stopped early because the batch was cancelled
    pub cancelled: bool,
    pub elapsed: Duration,
    pub failures: Vec<FailedFile>,
}

impl BatchSummary {
    /// Summary for a batch that found nothing to do.
    pub fn empty(skipped_entries: usize, elapsed: Duration) -> Self {
        Self {
            skipped_entries,
            elapsed,
            ..Self::default()
        }
    }

    /// `true` when discovery found no matching images
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }
}

//! File job definition and its result.

use std::path::PathBuf;
use std::time::Duration;
use serde::Serialize;
use crate::core::EncodeSettings;

/// Represents a single file conversion.
///
/// Built by the scheduler from discovery output and consumed exactly once
/// by a worker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileJob {
    /// Absolute path to the source image
    pub input_path: PathBuf,
    /// Derived path the converted image is written to
    pub output_path: PathBuf,
    /// Shared batch parameters
    pub settings: EncodeSettings,
}

/// What happened to one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum JobOutcome {
    /// Output written with these dimensions
    Converted { width: u32, height: u32 },
    /// Any step failed; carries the triggering error's description
    Failed { error: String },
}

/// Result of running one [`FileJob`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub outcome: JobOutcome,
    /// Wall-clock time the worker spent on the job
    pub elapsed: Duration,
}

impl JobResult {
    pub fn converted(job: &FileJob, width: u32, height: u32, elapsed: Duration) -> Self {
        Self {
            input_path: job.input_path.clone(),
            output_path: job.output_path.clone(),
            outcome: JobOutcome::Converted { width, height },
            elapsed,
        }
    }

    pub fn failed(job: &FileJob, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            input_path: job.input_path.clone(),
            output_path: job.output_path.clone(),
            outcome: JobOutcome::Failed { error: error.into() },
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, JobOutcome::Converted { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            JobOutcome::Failed { error } => Some(error),
            JobOutcome::Converted { .. } => None,
        }
    }
}

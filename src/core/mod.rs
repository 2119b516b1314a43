//! Core batch types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`ConversionRequest`]: Parameters of one batch invocation
//! - [`FileJob`]: One input/output pair to convert
//! - [`JobResult`]: Typed outcome of one job
//! - [`ProgressReport`]: Progress tick delivered to the caller
//! - [`BatchSummary`]: Aggregate outcome of a batch

mod types;
mod task;
mod progress;

pub use types::{ConversionRequest, EncodeSettings, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY};
pub use task::{FileJob, JobOutcome, JobResult};
pub use progress::{BatchSummary, FailedFile, ProgressReport};

//! Batch image conversion engine.
//!
//! Walks an input tree, resizes every recognized image to a fixed width and
//! re-encodes it into a mirrored output tree, reporting progress and a
//! time-remaining estimate after each file.

// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;

use std::path::PathBuf;

// Public exports for external consumers
pub use crate::core::{BatchSummary, ConversionRequest, FileJob, JobOutcome, JobResult, ProgressReport};
pub use crate::processing::{BatchScheduler, CancellationFlag, EngineConfig};
pub use crate::utils::{ConvertError, ConvertResult, OutputFormat};

/// Converts every image under `input_dir` into `output_dir`.
///
/// `on_progress` receives `(percent, eta_seconds)` once per completed file.
/// Uses one worker slot per CPU and the ambient `tracing` subscriber; build a
/// [`BatchScheduler`] directly to change either.
pub async fn convert_images<F>(
    input_dir: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
    format: OutputFormat,
    max_width: u32,
    quality: u32,
    mut on_progress: F,
) -> ConvertResult<BatchSummary>
where
    F: FnMut(u8, f64) + Send,
{
    let request = ConversionRequest::new(input_dir, output_dir)
        .with_format(format)
        .with_max_width(max_width)
        .with_quality(quality);

    BatchScheduler::new(EngineConfig::default())
        .run(&request, |report| on_progress(report.percent, report.eta_seconds()))
        .await
}

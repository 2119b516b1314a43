// src/processing/codec/executor.rs

//! Transform worker: decode → normalise → resize → encode → write for one job.
//!
//! [`process`] is synchronous and touches no shared state, so any number of
//! calls may run side by side on blocking threads. It never returns an error:
//! whatever step fails is captured in a failed [`JobResult`].

use std::path::Path;
use std::time::Instant;
use image::{DynamicImage, ImageReader};
use tracing::{debug, warn};

use crate::core::{FileJob, JobResult};
use crate::utils::{ConvertError, ConvertResult, ensure_parent_dir, write_atomic};

use super::formats::encode;
use super::resize::{normalize_color, resize_to_width};

/// Converts one file, reporting the outcome as a [`JobResult`].
pub fn process(job: &FileJob) -> JobResult {
    let started = Instant::now();

    match convert(job) {
        Ok((width, height)) => {
            let elapsed = started.elapsed();
            debug!(
                "'{}' → '{}' ({width}×{height}) in {elapsed:.2?}",
                job.input_path.display(),
                job.output_path.display(),
            );
            JobResult::converted(job, width, height, elapsed)
        }
        Err(e) => {
            let elapsed = started.elapsed();
            warn!("Conversion failed for {}: {e}", job.input_path.display());
            JobResult::failed(job, e.to_string(), elapsed)
        }
    }
}

// ── Blocking pipeline ─────────────────────────────────────────────────────────────────

fn convert(job: &FileJob) -> ConvertResult<(u32, u32)> {
    let settings = &job.settings;

    let image = decode(&job.input_path)?;
    debug!(
        "Loaded '{}': {}×{} {:?}",
        job.input_path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    let image = normalize_color(image);
    let image = resize_to_width(&image, settings.max_width)?;

    ensure_parent_dir(&job.output_path)?;
    let bytes = encode(&image, settings.format, settings.quality)?;
    write_atomic(&job.output_path, &bytes)?;

    Ok((image.width(), image.height()))
}

/// Decodes by content rather than by extension, so mislabelled files still load.
fn decode(path: &Path) -> ConvertResult<DynamicImage> {
    let load_error = |e: &dyn std::fmt::Display| {
        ConvertError::processing(format!("Failed to load '{}': {e}", path.display()))
    };

    ImageReader::open(path)
        .map_err(|e| load_error(&e))?
        .with_guessed_format()
        .map_err(|e| load_error(&e))?
        .decode()
        .map_err(|e| load_error(&e))
}

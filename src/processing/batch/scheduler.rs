//! Batch scheduler: discovery, bounded dispatch and result fan-in.
//!
//! Jobs run on tokio's blocking pool, at most `pool_width` at a time, gated
//! by a semaphore. Each finished job sends its [`JobResult`] over a channel
//! to the single loop in [`BatchScheduler::run`], which alone owns the
//! [`ProgressAggregator`] and calls the progress callback. The callback is
//! therefore never invoked concurrently with itself.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::instrument::WithSubscriber;
use tracing::{debug, dispatcher, error, info, warn, Dispatch};

use crate::core::{BatchSummary, ConversionRequest, EncodeSettings, FileJob, JobResult, ProgressReport};
use crate::processing::codec::process;
use crate::processing::discovery::{map_output_path, ImageFiles};
use crate::utils::{validate_request, ConvertError, ConvertResult, ValidatedRoots};

use super::aggregator::ProgressAggregator;
use super::cancel::CancellationFlag;
use super::config::EngineConfig;

/// Runs conversion batches.
#[derive(Debug, Clone, Default)]
pub struct BatchScheduler {
    config: EngineConfig,
    cancel: CancellationFlag,
    dispatch: Option<Dispatch>,
}

impl BatchScheduler {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: CancellationFlag::new(),
            dispatch: None,
        }
    }

    /// Routes every log event of this scheduler's batches, worker threads
    /// included, to `dispatch` instead of the ambient default subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Uses `flag` to stop dispatching new jobs.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = flag;
        self
    }

    /// Handle that cancels batches run by this scheduler.
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Converts every image under `request.input_root`.
    ///
    /// Fails only when the request is invalid; per-file failures are
    /// counted in the returned summary. `on_progress` is called once per
    /// completed file, in non-decreasing percent order, and never when no
    /// image was found. All workers have finished when this returns, and the
    /// cancellation flag is lowered again so the next run starts fresh.
    pub async fn run<F>(&self, request: &ConversionRequest, on_progress: F) -> ConvertResult<BatchSummary>
    where
        F: FnMut(ProgressReport) + Send,
    {
        let dispatch = self
            .dispatch
            .clone()
            .unwrap_or_else(|| dispatcher::get_default(Dispatch::clone));

        let outcome = self
            .run_batch(request, on_progress, dispatch.clone())
            .with_subscriber(dispatch)
            .await;
        self.cancel.reset();
        outcome
    }

    async fn run_batch<F>(
        &self,
        request: &ConversionRequest,
        mut on_progress: F,
        dispatch: Dispatch,
    ) -> ConvertResult<BatchSummary>
    where
        F: FnMut(ProgressReport) + Send,
    {
        let started = Instant::now();
        let roots = validate_request(request).await?;
        let workers = self.config.pool_width();

        info!(
            "Starting batch: {} → {} as {} (width {}, quality {}, {} workers)",
            roots.input_root.display(),
            roots.output_root.display(),
            request.format,
            request.max_width,
            request.quality,
            workers
        );

        if !request.format.is_lossy() {
            debug!("Quality {} ignored for {} output", request.quality, request.format);
        }

        let settings = EncodeSettings::from(request);
        let discovery_dispatch = dispatch.clone();
        let (jobs, skipped_entries) = tokio::task::spawn_blocking(move || {
            dispatcher::with_default(&discovery_dispatch, || build_jobs(&roots, settings))
        })
        .await
        .map_err(|e| ConvertError::worker(format!("Discovery task failed: {e}")))??;

        if skipped_entries > 0 {
            warn!("Skipped {skipped_entries} unreadable entries during discovery");
        }

        let total = jobs.len();
        if total == 0 {
            info!("No matching images found; nothing to convert");
            return Ok(BatchSummary::empty(skipped_entries, started.elapsed()));
        }
        info!("Discovered {total} images");

        let mut aggregator = ProgressAggregator::new(total);
        let (results_tx, mut results_rx) = mpsc::channel(workers);
        let dispatcher_task = tokio::spawn(
            dispatch_jobs(jobs, workers, self.cancel.clone(), results_tx, dispatch.clone())
                .with_subscriber(dispatch),
        );

        // Closes once the dispatcher and every worker have dropped their sender.
        while let Some(result) = results_rx.recv().await {
            let report = aggregator.on_result(&result);
            on_progress(report);
        }

        let dispatched = dispatcher_task
            .await
            .map_err(|e| ConvertError::worker(format!("Dispatcher failed: {e}")))?;

        let cancelled = dispatched < total;
        if cancelled {
            info!("Batch cancelled after dispatching {dispatched} of {total} jobs");
        }

        let summary = aggregator.into_summary(skipped_entries, cancelled, started.elapsed());
        if summary.failed > 0 {
            warn!(
                "Batch finished: {} converted, {} failed of {} in {:.2?}",
                summary.succeeded, summary.failed, summary.total, summary.elapsed
            );
        } else {
            info!(
                "Batch finished: {} converted of {} in {:.2?}",
                summary.succeeded, summary.total, summary.elapsed
            );
        }

        Ok(summary)
    }
}

/// Walks the input root and pairs each image with its output path.
///
/// Returns the jobs and the number of unreadable entries skipped.
fn build_jobs(roots: &ValidatedRoots, settings: EncodeSettings) -> ConvertResult<(Vec<FileJob>, usize)> {
    let mut files = ImageFiles::excluding(&roots.input_root, roots.nested_output());
    let mut jobs = Vec::new();
    let mut outputs = HashSet::new();

    for file in files.by_ref() {
        let output_path = map_output_path(&roots.input_root, &roots.output_root, settings.format, &file.path)?;
        if !outputs.insert(output_path.clone()) {
            warn!(
                "{} maps to an output already claimed by another input: {}",
                file.path.display(),
                output_path.display()
            );
        }
        jobs.push(FileJob {
            input_path: file.path,
            output_path,
            settings,
        });
    }

    Ok((jobs, files.skipped()))
}

/// Submits jobs while slots are free, then waits for all of them.
///
/// Returns how many jobs were dispatched; fewer than `jobs.len()` only
/// when cancelled.
async fn dispatch_jobs(
    jobs: Vec<FileJob>,
    workers: usize,
    cancel: CancellationFlag,
    results: mpsc::Sender<JobResult>,
    dispatch: Dispatch,
) -> usize {
    let slots = Arc::new(Semaphore::new(workers));
    let mut running = JoinSet::new();
    let mut dispatched = 0;

    for job in jobs {
        let Ok(permit) = slots.clone().acquire_owned().await else {
            error!("Worker slots closed unexpectedly");
            break;
        };
        if cancel.is_cancelled() {
            break;
        }

        let results = results.clone();
        let dispatch = dispatch.clone();
        running.spawn(
            async move {
                let result = run_job(job, dispatch).await;
                drop(permit);
                // Only fails if the consumer is gone, in which case nobody wants the result.
                let _ = results.send(result).await;
            }
            .with_current_subscriber(),
        );
        dispatched += 1;
    }
    drop(results);

    while let Some(joined) = running.join_next().await {
        if let Err(e) = joined {
            error!("Worker task failed: {e}");
        }
    }
    debug!("All {dispatched} dispatched jobs drained");

    dispatched
}

/// Runs one job on the blocking pool. A panicking worker still yields a
/// failed result so the fan-in loop sees exactly one result per job.
async fn run_job(job: FileJob, dispatch: Dispatch) -> JobResult {
    let fallback = job.clone();
    let handle = tokio::task::spawn_blocking(move || {
        dispatcher::with_default(&dispatch, || process(&job))
    });

    match handle.await {
        Ok(result) => result,
        Err(e) => {
            error!("Worker panicked on {}: {e}", fallback.input_path.display());
            JobResult::failed(&fallback, format!("Worker panicked: {e}"), Duration::ZERO)
        }
    }
}

// This is the command-line entry point for the converter.
// The lib.rs file holds the engine; this file only collects arguments,
// draws progress and prints the summary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bulk_image_converter::core::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY};
use bulk_image_converter::{BatchScheduler, BatchSummary, ConversionRequest, EngineConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "bulk-image-converter")]
#[command(version, about = "Resize and re-encode every image in a directory tree", long_about = None)]
struct Cli {
    /// Directory to read images from (searched recursively)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory the mirrored output tree is written to
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Output format: webp, jpeg or png
    #[arg(short, long, default_value = "webp")]
    format: OutputFormat,

    /// Width every output is resized to
    #[arg(short, long, default_value_t = DEFAULT_MAX_WIDTH)]
    width: u32,

    /// Encode quality (1-100), ignored for png
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: u32,

    /// Concurrent conversions [default: one per CPU]
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)       // Remove module path
        .with_thread_ids(false)
        .with_ansi(true)
        .with_writer(std::io::stderr) // stdout is reserved for the summary
        .compact()
        .init();

    let cli = Cli::parse();

    let request = ConversionRequest::new(&cli.input, &cli.output)
        .with_format(cli.format)
        .with_max_width(cli.width)
        .with_quality(cli.quality);
    let scheduler = BatchScheduler::new(EngineConfig { workers: cli.workers });

    let cancel = scheduler.cancellation_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; finishing in-flight files");
            cancel.cancel();
        }
    });

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .context("invalid progress bar template")?
            .progress_chars("█▓░"),
    );

    let progress = bar.clone();
    let summary = scheduler
        .run(&request, move |report| {
            progress.set_position(u64::from(report.percent));
            let eta = report.eta.map(format_eta).unwrap_or_else(|| "--".to_string());
            progress.set_message(format!("{}/{} · ETA {eta}", report.completed, report.total));
        })
        .await
        .context("conversion did not start")?;
    bar.finish_and_clear();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &cli.input);
    }

    info!("Done");
    Ok(())
}

fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

fn print_summary(summary: &BatchSummary, input: &std::path::Path) {
    if summary.is_empty() {
        println!("No images found under {}", input.display());
        return;
    }

    println!(
        "Converted {}/{} images in {:.1?} ({} failed)",
        summary.succeeded, summary.total, summary.elapsed, summary.failed
    );
    for failure in &summary.failures {
        println!("  ✗ {}: {}", failure.input_path.display(), failure.error);
    }
    if summary.skipped_entries > 0 {
        println!("Skipped {} unreadable entries", summary.skipped_entries);
    }
    if summary.cancelled {
        println!("Cancelled before all files were dispatched");
    }
}

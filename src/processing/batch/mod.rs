mod aggregator;
mod cancel;
mod config;
mod scheduler;

pub use aggregator::{BatchStats, ProgressAggregator};
pub use cancel::CancellationFlag;
pub use config::EngineConfig;
pub use scheduler::BatchScheduler;

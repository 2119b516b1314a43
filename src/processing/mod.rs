pub mod batch;
pub mod codec;
pub mod discovery;

pub use batch::{BatchScheduler, CancellationFlag, EngineConfig, ProgressAggregator};
pub use discovery::{map_output_path, DiscoveredFile, ImageFiles};

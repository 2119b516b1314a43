use serde::{Deserialize, Serialize};

/// Engine-level settings that are not part of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Concurrent transform slots; `None` means one per CPU
    #[serde(default)]
    pub workers: Option<usize>,
}

impl EngineConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: Some(workers) }
    }

    /// Effective pool width, always at least one slot.
    pub fn pool_width(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

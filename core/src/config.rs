use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_SNAPSHOT_PATH: &str = "queue_data.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Where the snapshot file lives.
    pub snapshot_path: PathBuf,
    /// Save after every command that changes the queue.
    pub autosave:      bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            autosave:      false,
        }
    }
}

impl DeskConfig {
    /// Load from a JSON config file. Fields left out keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DeskConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))?;
        Ok(config)
    }

    /// Config with hardcoded values for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            snapshot_path: PathBuf::from("test_queue.json"),
            autosave:      true,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Top-level relaunch configuration, deserialized from relaunch.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelaunchConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Delayed-eviction cache parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a closed tool stays tracked before eviction.
    #[serde(default = "default_grace_window_seconds")]
    pub grace_window_seconds: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            grace_window_seconds: default_grace_window_seconds(),
        }
    }
}

/// Where the session snapshot lives, relative to the project's saved directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_subdir")]
    pub subdir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            subdir: default_subdir(),
            file_name: default_file_name(),
        }
    }
}

fn default_grace_window_seconds() -> f64 {
    2.0
}

fn default_subdir() -> String {
    "pytemp".to_string()
}

fn default_file_name() -> String {
    "editor_tool_cache.json".to_string()
}

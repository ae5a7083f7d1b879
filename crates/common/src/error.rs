use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for relaunch operations.
#[derive(Debug, Error)]
pub enum RelaunchError {
    // --- Persistence errors ---
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed snapshot {path}: {detail}")]
    Snapshot { path: PathBuf, detail: String },

    // --- Per-tool errors (one tool affected, others continue) ---
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Host error: {0}")]
    Host(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RelaunchError {
    /// Whether this error only affects a single tool (remaining tools keep processing).
    pub fn is_per_tool(&self) -> bool {
        matches!(self, Self::AssetNotFound(_) | Self::Host(_))
    }
}

/// Result type alias for relaunch operations.
pub type Result<T> = std::result::Result<T, RelaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_tool_classification() {
        assert!(RelaunchError::AssetNotFound("/Game/X".into()).is_per_tool());
        assert!(RelaunchError::Host("tab refused".into()).is_per_tool());
        assert!(!RelaunchError::Config("bad".into()).is_per_tool());
        assert!(!RelaunchError::Snapshot {
            path: PathBuf::from("x.json"),
            detail: "eof".into(),
        }
        .is_per_tool());
    }
}

use std::path::{Path, PathBuf};

use relaunch_common::config::RelaunchConfig;

use super::validation;

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "relaunch.toml";

/// Load relaunch configuration from `{config_dir}/relaunch.toml`.
///
/// Fails loudly with clear error messages if anything is misconfigured.
pub fn load_config(config_dir: &Path) -> Result<RelaunchConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let path = config_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
        path: path.clone(),
        source: e,
    })?;

    let config: RelaunchConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        detail: e.to_string(),
    })?;

    validation::validate(&config)?;

    tracing::info!(
        grace_window_seconds = config.cache.grace_window_seconds,
        snapshot_file = %config.snapshot.file_name,
        "Configuration loaded successfully"
    );

    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[cache]\ngrace_window_seconds = 3.5\n\n[snapshot]\nsubdir = \"relaunch\"\n",
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.cache.grace_window_seconds, 3.5);
        assert_eq!(config.snapshot.subdir, "relaunch");
        assert_eq!(config.snapshot.file_name, "editor_tool_cache.json");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[cache\n").unwrap();

        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[cache]\ngrace_window_seconds = -1.0\n",
        )
        .unwrap();

        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

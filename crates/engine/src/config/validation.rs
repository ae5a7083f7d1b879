use std::path::{Component, Path};

use relaunch_common::config::RelaunchConfig;

use super::loader::ConfigError;

/// One day.
const MAX_GRACE_WINDOW_SECONDS: f64 = 86_400.0;

/// Validate the complete relaunch configuration.
///
/// Collects every problem before failing so a single run reports them all.
pub fn validate(config: &RelaunchConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_cache(config, &mut errors);
    validate_snapshot(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_cache(config: &RelaunchConfig, errors: &mut Vec<String>) {
    let grace = config.cache.grace_window_seconds;

    if !grace.is_finite() || grace <= 0.0 {
        errors.push("cache.grace_window_seconds must be a finite number > 0".into());
    } else if grace > MAX_GRACE_WINDOW_SECONDS {
        errors.push(format!(
            "cache.grace_window_seconds must be <= {}",
            MAX_GRACE_WINDOW_SECONDS
        ));
    }
}

fn validate_snapshot(config: &RelaunchConfig, errors: &mut Vec<String>) {
    let s = &config.snapshot;

    if s.file_name.is_empty() {
        errors.push("snapshot.file_name must not be empty".into());
    } else if !s.file_name.ends_with(".json") {
        errors.push("snapshot.file_name must end with .json".into());
    }
    if s.file_name.contains('/') || s.file_name.contains('\\') {
        errors.push("snapshot.file_name must not contain a path separator".into());
    }
    let subdir = Path::new(&s.subdir);
    if subdir.is_absolute() {
        errors.push("snapshot.subdir must be relative to the project saved dir".into());
    }
    if subdir.components().any(|c| c == Component::ParentDir) {
        errors.push("snapshot.subdir must not contain '..'".into());
    }
}

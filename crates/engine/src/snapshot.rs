use std::io::Write;
use std::path::{Path, PathBuf};

use relaunch_common::config::SnapshotConfig;
use relaunch_common::ids::ToolPath;
use relaunch_common::types::SessionSnapshot;
use relaunch_common::{RelaunchError, Result};

/// Snapshot file location, e.g. `{project}/Saved/pytemp/editor_tool_cache.json`.
pub fn snapshot_path(saved_dir: &Path, config: &SnapshotConfig) -> PathBuf {
    saved_dir.join(&config.subdir).join(&config.file_name)
}

/// Write the pending tool list. An empty list still produces a file.
///
/// Written to a sibling temp file and renamed into place, so a crash
/// mid-write leaves the previous snapshot intact.
pub fn save(path: &Path, identifiers: &[ToolPath]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| RelaunchError::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let snapshot = SessionSnapshot::new(identifiers.to_vec());
    let json = serde_json::to_string_pretty(&snapshot)?;

    let io_err = |source: std::io::Error| RelaunchError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(
        path = %path.display(),
        tools = identifiers.len(),
        "Saved editor tool snapshot"
    );
    Ok(())
}

/// Read the pending tool list. A missing file means nothing is pending.
pub fn load(path: &Path) -> Result<Vec<ToolPath>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No editor tool snapshot, nothing to reopen");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| RelaunchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let snapshot: SessionSnapshot =
        serde_json::from_str(&content).map_err(|e| RelaunchError::Snapshot {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        tools = snapshot.tools_to_open.len(),
        saved_at = ?snapshot.saved_at,
        "Loaded editor tool snapshot"
    );
    Ok(snapshot.tools_to_open)
}

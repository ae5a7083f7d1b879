//! Editor startup and shutdown orchestration.
//!
//! Startup runs in two steps. Pre-startup happens immediately on `run()`.
//! Post-startup waits on a tick subscription until the host's asset index
//! finishes loading, then reopens the tools pending from the previous session
//! and registers the shutdown hook. On shutdown the tools still inside their
//! grace window are written to the snapshot.

use std::path::PathBuf;
use std::time::Duration;

use relaunch_common::config::RelaunchConfig;
use relaunch_common::ids::{HookHandle, TickHandle, ToolPath};
use relaunch_common::types::AssetRef;
use relaunch_common::{RelaunchError, Result};

use crate::cache::{DelayedEvictionCache, TickOutcome};
use crate::config;
use crate::host::EditorHost;
use crate::launcher;
use crate::snapshot;

/// Where the layer is in its startup/shutdown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `run()` not called yet.
    Uninitialized,
    /// Pre-startup done; polling the asset index every tick.
    AwaitingAssetIndex,
    /// Post-startup done; pending tools reopened.
    Ready,
    /// Shutdown done, all subscriptions released.
    ShutDown,
}

/// Outcome of reopening the previous session's tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReopenReport {
    pub opened: Vec<ToolPath>,
    pub failed: Vec<(ToolPath, String)>,
    /// Set when the snapshot itself could not be read; nothing was reopened.
    pub snapshot_error: Option<String>,
}

/// What `shutdown` did with the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Tracked tools written to this path.
    Saved(PathBuf),
    /// Post-startup never ran (or shutdown already happened); the file on
    /// disk still holds the previous session's pending tools.
    Skipped,
}

/// Owns the host handle, the delayed-eviction cache, and the startup state.
pub struct Relauncher<H: EditorHost> {
    host: H,
    cache: DelayedEvictionCache,
    config: RelaunchConfig,
    phase: Phase,
    startup_handle: Option<TickHandle>,
    shutdown_hook: Option<HookHandle>,
    last_report: Option<ReopenReport>,
}

impl<H: EditorHost> Relauncher<H> {
    /// Build a relauncher. Refuses invalid configuration.
    pub fn new(host: H, config: RelaunchConfig) -> Result<Self> {
        config::validate(&config).map_err(|e| RelaunchError::Config(e.to_string()))?;
        let grace_window = Duration::from_secs_f64(config.cache.grace_window_seconds);

        Ok(Self {
            host,
            cache: DelayedEvictionCache::new(grace_window),
            config,
            phase: Phase::Uninitialized,
            startup_handle: None,
            shutdown_hook: None,
            last_report: None,
        })
    }

    /// Process entry point. Safe to call more than once; later calls are no-ops.
    pub fn run(&mut self) -> bool {
        if self.phase != Phase::Uninitialized {
            tracing::info!(phase = ?self.phase, "Relauncher has already been initialized");
            return false;
        }

        self.startup_handle = Some(self.host.subscribe_tick());
        self.phase = Phase::AwaitingAssetIndex;
        self.pre_startup();
        true
    }

    /// Single tick entry point for every subscription this layer holds.
    pub fn on_tick(&mut self, handle: TickHandle, delta: f64) {
        if self.startup_handle == Some(handle) {
            self.asset_index_check();
            return;
        }
        if self.cache.dispatch(handle, delta, &mut self.host) == TickOutcome::Untracked {
            tracing::trace!(handle = %handle, "Tick for a handle this layer no longer owns");
        }
    }

    /// A managed tool window closed.
    ///
    /// Drops it from the host's own reopen list and tracks it for the grace
    /// window. Duplicate close signals inside the window are ignored.
    pub fn on_tool_closed(&mut self, asset: AssetRef) -> bool {
        let path = asset.path().clone();
        if self.phase == Phase::ShutDown {
            tracing::debug!(tool = %path, "Tool closed after shutdown, ignoring");
            return false;
        }
        if self.cache.contains(&path) {
            return false;
        }

        match launcher::resolve(asset, &mut self.host) {
            Ok(loaded) => self.host.clear_from_prefs(&loaded),
            Err(e) => {
                tracing::warn!(tool = %path, error = %e, "Could not resolve closed tool, tracking by path only");
            }
        }

        self.cache.track(path, &mut self.host)
    }

    /// Open an editor tool from a loaded asset or its path.
    pub fn launch_tool(&mut self, asset: AssetRef) -> Result<()> {
        launcher::launch_tool(asset, &mut self.host)
    }

    /// Reopen every tool listed in the snapshot, each independently.
    pub fn reopen_pending(&mut self) -> ReopenReport {
        let path = self.snapshot_path();
        let mut report = ReopenReport::default();

        let pending = match snapshot::load(&path) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read editor tool snapshot");
                report.snapshot_error = Some(e.to_string());
                return report;
            }
        };

        for tool in pending {
            tracing::info!(tool = %tool, "Opening cached editor tool");
            match launcher::launch_tool(AssetRef::Path(tool.clone()), &mut self.host) {
                Ok(()) => {
                    metrics::counter!("relaunch.reopen.opened").increment(1);
                    report.opened.push(tool);
                }
                Err(e) => {
                    if e.is_per_tool() {
                        tracing::warn!(tool = %tool, error = %e, "Skipping cached editor tool");
                    } else {
                        tracing::error!(tool = %tool, error = %e, "Unexpected failure opening cached editor tool");
                    }
                    metrics::counter!("relaunch.reopen.failed").increment(1);
                    report.failed.push((tool, e.to_string()));
                }
            }
        }

        report
    }

    /// Persist the still-tracked tools and cancel every pending timer.
    ///
    /// The snapshot is only written once post-startup has registered the
    /// shutdown hook. Before that, the previous session's list has not been
    /// reopened yet and must stay on disk.
    pub fn shutdown(&mut self) -> Result<ShutdownOutcome> {
        let saved = if self.shutdown_hook.is_none() || self.phase == Phase::ShutDown {
            tracing::info!(
                phase = ?self.phase,
                dropped = self.cache.len(),
                "Snapshot not written, keeping previous file"
            );
            Ok(ShutdownOutcome::Skipped)
        } else {
            let path = self.snapshot_path();
            let pending = self.cache.snapshot_identifiers();
            snapshot::save(&path, &pending).map(|()| ShutdownOutcome::Saved(path))
        };

        self.cache.clear(&mut self.host);
        if let Some(handle) = self.startup_handle.take() {
            self.host.unsubscribe_tick(handle);
        }
        self.phase = Phase::ShutDown;

        saved
    }

    pub fn snapshot_path(&self) -> PathBuf {
        snapshot::snapshot_path(&self.host.project_saved_dir(), &self.config.snapshot)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cache(&self) -> &DelayedEvictionCache {
        &self.cache
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn shutdown_hook(&self) -> Option<HookHandle> {
        self.shutdown_hook
    }

    /// Report from the most recent post-startup reopen.
    pub fn last_report(&self) -> Option<&ReopenReport> {
        self.last_report.as_ref()
    }

    fn pre_startup(&mut self) {
        tracing::info!(
            asset_index_ready = !self.host.is_loading_assets(),
            "Running pre startup"
        );
    }

    fn asset_index_check(&mut self) {
        if self.host.is_loading_assets() {
            tracing::debug!("Asset index scan is still in progress");
            return;
        }

        if let Some(handle) = self.startup_handle.take() {
            self.host.unsubscribe_tick(handle);
        }

        self.post_startup();
        self.register_shutdown_hook();
    }

    fn post_startup(&mut self) {
        tracing::info!(
            asset_index_ready = !self.host.is_loading_assets(),
            "Running post startup"
        );
        let report = self.reopen_pending();
        tracing::info!(
            opened = report.opened.len(),
            failed = report.failed.len(),
            "Reopened editor tools from previous session"
        );
        self.last_report = Some(report);
        self.phase = Phase::Ready;
    }

    fn register_shutdown_hook(&mut self) -> bool {
        if let Some(hook) = self.shutdown_hook {
            tracing::info!(hook = %hook, "Shutdown hook already registered");
            return false;
        }
        let hook = self.host.register_shutdown_hook();
        tracing::info!(hook = %hook, "Registered shutdown hook");
        self.shutdown_hook = Some(hook);
        true
    }
}

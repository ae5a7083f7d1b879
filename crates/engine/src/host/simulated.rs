use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use relaunch_common::ids::{HookHandle, TickHandle, ToolPath};
use relaunch_common::types::LoadedAsset;
use relaunch_common::{RelaunchError, Result};

use super::{AssetHost, ShutdownHost, TickHost, ToolHost};

/// In-memory editor host. Records every call so tests can assert on them.
#[derive(Debug)]
pub struct SimulatedHost {
    saved_dir: PathBuf,
    next_handle: u64,
    live_ticks: BTreeSet<TickHandle>,
    subscribed: Vec<TickHandle>,
    unsubscribed: Vec<TickHandle>,
    /// Frames left before the asset index reports ready.
    loading_frames: u32,
    assets: HashMap<ToolPath, LoadedAsset>,
    failing_tabs: HashSet<ToolPath>,
    opened_tabs: Vec<ToolPath>,
    cleared_prefs: Vec<ToolPath>,
    shutdown_hooks: Vec<HookHandle>,
}

impl SimulatedHost {
    pub fn new(saved_dir: impl AsRef<Path>) -> Self {
        Self {
            saved_dir: saved_dir.as_ref().to_path_buf(),
            next_handle: 1,
            live_ticks: BTreeSet::new(),
            subscribed: Vec::new(),
            unsubscribed: Vec::new(),
            loading_frames: 0,
            assets: HashMap::new(),
            failing_tabs: HashSet::new(),
            opened_tabs: Vec::new(),
            cleared_prefs: Vec::new(),
            shutdown_hooks: Vec::new(),
        }
    }

    /// Asset index stays busy for this many frames.
    pub fn with_loading_frames(mut self, frames: u32) -> Self {
        self.loading_frames = frames;
        self
    }

    pub fn with_asset(mut self, path: impl Into<ToolPath>) -> Self {
        self.add_asset(path);
        self
    }

    pub fn add_asset(&mut self, path: impl Into<ToolPath>) {
        let path = path.into();
        let asset = LoadedAsset::new(path.clone()).with_class("EditorUtilityWidgetBlueprint");
        self.assets.insert(path, asset);
    }

    pub fn remove_asset(&mut self, path: &ToolPath) {
        self.assets.remove(path);
    }

    /// Make `spawn_and_register_tab` fail for this tool.
    pub fn fail_tab(&mut self, path: impl Into<ToolPath>) {
        self.failing_tabs.insert(path.into());
    }

    /// A fresh process on the same project: same assets and saved dir, no live state.
    pub fn next_session(&self, loading_frames: u32) -> Self {
        let mut host = Self::new(&self.saved_dir).with_loading_frames(loading_frames);
        host.assets = self.assets.clone();
        host
    }

    /// Advance the asset scan by one frame and return the handles to deliver this frame.
    pub fn begin_frame(&mut self) -> Vec<TickHandle> {
        self.loading_frames = self.loading_frames.saturating_sub(1);
        self.live_ticks.iter().copied().collect()
    }

    pub fn live_ticks(&self) -> usize {
        self.live_ticks.len()
    }

    pub fn subscribed(&self) -> &[TickHandle] {
        &self.subscribed
    }

    pub fn unsubscribed(&self) -> &[TickHandle] {
        &self.unsubscribed
    }

    pub fn opened_tabs(&self) -> &[ToolPath] {
        &self.opened_tabs
    }

    pub fn cleared_prefs(&self) -> &[ToolPath] {
        &self.cleared_prefs
    }

    pub fn shutdown_hooks(&self) -> &[HookHandle] {
        &self.shutdown_hooks
    }

    fn issue(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }
}

impl TickHost for SimulatedHost {
    fn subscribe_tick(&mut self) -> TickHandle {
        let handle = TickHandle(self.issue());
        self.live_ticks.insert(handle);
        self.subscribed.push(handle);
        handle
    }

    fn unsubscribe_tick(&mut self, handle: TickHandle) {
        if !self.live_ticks.remove(&handle) {
            tracing::warn!(handle = %handle, "Unsubscribe for a handle that is not live");
        }
        self.unsubscribed.push(handle);
    }
}

impl AssetHost for SimulatedHost {
    fn is_loading_assets(&self) -> bool {
        self.loading_frames > 0
    }

    fn asset_exists(&self, path: &ToolPath) -> bool {
        self.assets.contains_key(path)
    }

    fn load_asset(&mut self, path: &ToolPath) -> Option<LoadedAsset> {
        self.assets.get(path).cloned()
    }
}

impl ToolHost for SimulatedHost {
    fn spawn_and_register_tab(&mut self, asset: &LoadedAsset) -> Result<()> {
        if self.failing_tabs.contains(&asset.path) {
            return Err(RelaunchError::Host(format!(
                "tab manager refused {}",
                asset.path
            )));
        }
        self.opened_tabs.push(asset.path.clone());
        Ok(())
    }

    fn clear_from_prefs(&mut self, asset: &LoadedAsset) {
        self.cleared_prefs.push(asset.path.clone());
    }

    fn project_saved_dir(&self) -> PathBuf {
        self.saved_dir.clone()
    }
}

impl ShutdownHost for SimulatedHost {
    fn register_shutdown_hook(&mut self) -> HookHandle {
        let handle = HookHandle(self.issue());
        self.shutdown_hooks.push(handle);
        handle
    }
}

//! Contracts the editor host provides. Consumed here, never reimplemented.
//!
//! Every call happens on the host's main thread, between ticks.

mod simulated;

use std::path::PathBuf;

use relaunch_common::ids::{HookHandle, TickHandle, ToolPath};
use relaunch_common::types::LoadedAsset;
use relaunch_common::Result;

pub use simulated::SimulatedHost;

/// Per-frame tick subscriptions.
///
/// The host delivers `(handle, delta_seconds)` for each live handle to the
/// layer's single tick entry point.
pub trait TickHost {
    fn subscribe_tick(&mut self) -> TickHandle;
    fn unsubscribe_tick(&mut self, handle: TickHandle);
}

/// Asset index queries.
pub trait AssetHost {
    /// True while the host is still scanning content on startup.
    fn is_loading_assets(&self) -> bool;
    fn asset_exists(&self, path: &ToolPath) -> bool;
    fn load_asset(&mut self, path: &ToolPath) -> Option<LoadedAsset>;
}

/// Tool window management.
pub trait ToolHost {
    fn spawn_and_register_tab(&mut self, asset: &LoadedAsset) -> Result<()>;
    /// Drop the tool from the host's own per-project reopen list.
    fn clear_from_prefs(&mut self, asset: &LoadedAsset);
    fn project_saved_dir(&self) -> PathBuf;
}

/// Process shutdown notification.
pub trait ShutdownHost {
    fn register_shutdown_hook(&mut self) -> HookHandle;
}

/// Everything the lifecycle needs from the editor.
pub trait EditorHost: TickHost + AssetHost + ToolHost + ShutdownHost {}

impl<T> EditorHost for T where T: TickHost + AssetHost + ToolHost + ShutdownHost {}

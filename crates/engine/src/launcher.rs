use relaunch_common::types::{AssetRef, LoadedAsset};
use relaunch_common::{RelaunchError, Result};

use crate::host::{AssetHost, ToolHost};

/// Turn an asset reference into a loaded asset, loading by path if needed.
pub fn resolve(asset: AssetRef, host: &mut impl AssetHost) -> Result<LoadedAsset> {
    match asset {
        AssetRef::Loaded(loaded) => Ok(loaded),
        AssetRef::Path(path) => {
            if !host.asset_exists(&path) {
                return Err(RelaunchError::AssetNotFound(path.into_inner()));
            }
            host.load_asset(&path)
                .ok_or_else(|| RelaunchError::AssetNotFound(path.into_inner()))
        }
    }
}

/// Open an editor tool tab from a loaded asset or its path.
pub fn launch_tool<H>(asset: AssetRef, host: &mut H) -> Result<()>
where
    H: AssetHost + ToolHost,
{
    let path = asset.path().clone();
    let loaded = resolve(asset, host).inspect_err(|e| {
        tracing::error!(tool = %path, error = %e, "The given editor tool path does not exist");
    })?;

    host.spawn_and_register_tab(&loaded)?;
    tracing::debug!(tool = %path, "Editor tool tab spawned");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedHost;
    use relaunch_common::ids::ToolPath;

    #[test]
    fn test_launch_by_path() {
        let mut host = SimulatedHost::new("/tmp/saved").with_asset("/Game/A");
        launch_tool(AssetRef::from("/Game/A"), &mut host).unwrap();
        assert_eq!(host.opened_tabs(), &[ToolPath::from("/Game/A")]);
    }

    #[test]
    fn test_launch_loaded_skips_lookup() {
        // Not registered with the host: a loaded asset is trusted as-is.
        let mut host = SimulatedHost::new("/tmp/saved");
        launch_tool(AssetRef::Loaded(LoadedAsset::new("/Game/B")), &mut host).unwrap();
        assert_eq!(host.opened_tabs(), &[ToolPath::from("/Game/B")]);
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let mut host = SimulatedHost::new("/tmp/saved");
        let err = launch_tool(AssetRef::from("/Game/Gone"), &mut host).unwrap_err();

        assert!(matches!(err, RelaunchError::AssetNotFound(ref p) if p == "/Game/Gone"));
        assert!(host.opened_tabs().is_empty());
    }

    #[test]
    fn test_host_refusal_propagates() {
        let mut host = SimulatedHost::new("/tmp/saved").with_asset("/Game/A");
        host.fail_tab("/Game/A");

        let err = launch_tool(AssetRef::from("/Game/A"), &mut host).unwrap_err();
        assert!(matches!(err, RelaunchError::Host(_)));
    }
}

use serde::{Deserialize, Serialize};

use crate::ids::ToolPath;

/// A tool asset the host has already loaded into memory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAsset {
    pub path: ToolPath,
    /// Host class name (e.g. "EditorUtilityWidgetBlueprint").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl LoadedAsset {
    pub fn new(path: impl Into<ToolPath>) -> Self {
        Self {
            path: path.into(),
            class_name: None,
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

/// Either an asset the caller already holds or the path to load it from.
/// Resolved once at the boundary, before any cache or host call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetRef {
    Loaded(LoadedAsset),
    Path(ToolPath),
}

impl AssetRef {
    /// The durable identifier regardless of variant.
    pub fn path(&self) -> &ToolPath {
        match self {
            Self::Loaded(asset) => &asset.path,
            Self::Path(path) => path,
        }
    }
}

impl From<&str> for AssetRef {
    fn from(path: &str) -> Self {
        Self::Path(ToolPath::from(path))
    }
}

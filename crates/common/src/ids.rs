use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_handle {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_handle!(
    TickHandle,
    "Host-issued handle for a per-tick subscription."
);
define_handle!(
    HookHandle,
    "Host-issued handle for a registered shutdown hook."
);

/// Durable, path-like identifier of a reopenable editor tool asset
/// (e.g. `/Game/Tools/EUW_Outliner.EUW_Outliner`).
///
/// Compared byte-for-byte; never normalized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolPath(String);

impl ToolPath {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ToolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

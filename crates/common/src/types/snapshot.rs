use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ToolPath;

/// Tools still pending reopen when the editor shut down.
///
/// Built fresh at shutdown, loaded once at the next startup, then dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Insertion-ordered identifiers. Key name kept stable for older files.
    #[serde(default)]
    pub tools_to_open: Vec<ToolPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn new(tools_to_open: Vec<ToolPath>) -> Self {
        Self {
            tools_to_open,
            saved_at: Some(Utc::now()),
        }
    }
}

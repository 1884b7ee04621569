//! Version control project info data models.

use serde::{Deserialize, Serialize};

use crate::types::core::TeamProjectReference;

/// Which version control capabilities a team project carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionControlProjectInfo {
    /// The team project
    pub project: Option<TeamProjectReference>,
    /// Default source control type ("tfvc" or "git")
    pub default_source_control_type: Option<String>,
    /// Whether the project hosts git repositories
    #[serde(default)]
    pub supports_git: bool,
    /// Whether the project hosts a TFVC tree
    #[serde(rename = "supportsTFVC", default)]
    pub supports_tfvc: bool,
}

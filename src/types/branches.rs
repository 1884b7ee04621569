//! Branch data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::core::IdentityRef;

/// Minimal branch reference: just the server path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcShallowBranchRef {
    /// Server path of the branch, e.g. "$/Fabrikam/Main"
    pub path: String,
}

/// Branch metadata without hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcBranchRef {
    /// Server path of the branch
    pub path: String,
    /// Branch description
    pub description: Option<String>,
    /// Branch owner
    pub owner: Option<IdentityRef>,
    /// When the branch was created
    pub created_date: DateTime<Utc>,
    /// Whether the branch has been deleted
    #[serde(default)]
    pub is_deleted: bool,
    /// Resource URL
    pub url: Option<String>,
}

/// Branch hierarchy node with parents and children.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcBranch {
    /// Server path of the branch
    pub path: String,
    /// Branch description
    pub description: Option<String>,
    /// Branch owner
    pub owner: Option<IdentityRef>,
    /// When the branch was created
    pub created_date: DateTime<Utc>,
    /// Whether the branch has been deleted
    #[serde(default)]
    pub is_deleted: bool,
    /// Child branches, present when requested
    #[serde(default)]
    pub children: Vec<TfvcBranch>,
    /// Parent branch, present when requested
    pub parent: Option<TfvcShallowBranchRef>,
    /// Branch mappings
    #[serde(default)]
    pub mappings: Vec<TfvcBranchMapping>,
    /// Branches related by merge history
    #[serde(default)]
    pub related_branches: Vec<TfvcShallowBranchRef>,
    /// Resource URL
    pub url: Option<String>,
}

/// One workspace mapping of a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcBranchMapping {
    /// Server item of the mapping
    pub server_item: Option<String>,
    /// Mapping kind
    #[serde(rename = "type")]
    pub mapping_type: Option<String>,
    /// Mapping depth ("full" or "none")
    pub depth: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_hierarchy_deserialize() {
        let json = r#"{
            "path": "$/Fabrikam/Main",
            "description": "mainline",
            "owner": { "displayName": "Normal Paulk" },
            "createdDate": "2014-03-18T17:03:39.42Z",
            "children": [
                { "path": "$/Fabrikam/Main/Dev", "createdDate": "2014-04-02T10:00:00Z" }
            ],
            "parent": { "path": "$/Fabrikam" }
        }"#;

        let branch: TfvcBranch = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(branch.path, "$/Fabrikam/Main");
        assert_eq!(branch.children.len(), 1);
        assert_eq!(branch.children[0].path, "$/Fabrikam/Main/Dev");
        assert_eq!(branch.parent.expect("parent").path, "$/Fabrikam");
        assert!(!branch.is_deleted);
    }
}

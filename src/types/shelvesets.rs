//! Shelveset data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::changesets::{CheckinNote, PolicyOverrideInfo, TfvcChange};
use crate::types::core::{AssociatedWorkItem, IdentityRef};

/// Shelveset metadata without details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcShelvesetRef {
    /// Shelveset id, "name;owner"
    pub id: Option<String>,
    /// Shelveset name
    pub name: String,
    /// Shelveset owner
    pub owner: Option<IdentityRef>,
    /// When the shelveset was created
    pub created_date: DateTime<Utc>,
    /// Shelve comment, possibly truncated
    pub comment: Option<String>,
    /// Whether the comment was truncated to the requested length
    #[serde(default)]
    pub comment_truncated: bool,
    /// Resource URL
    pub url: Option<String>,
}

/// Full shelveset including details requested via options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcShelveset {
    /// Shelveset id, "name;owner"
    pub id: Option<String>,
    /// Shelveset name
    pub name: String,
    /// Shelveset owner
    pub owner: Option<IdentityRef>,
    /// When the shelveset was created
    pub created_date: DateTime<Utc>,
    /// Shelve comment, possibly truncated
    pub comment: Option<String>,
    /// Whether the comment was truncated to the requested length
    #[serde(default)]
    pub comment_truncated: bool,
    /// Shelved changes, when details were requested
    #[serde(default)]
    pub changes: Vec<TfvcChange>,
    /// Check-in notes
    #[serde(default)]
    pub notes: Vec<CheckinNote>,
    /// Policy override details
    pub policy_override: Option<PolicyOverrideInfo>,
    /// Associated work items, when requested
    #[serde(default)]
    pub work_items: Vec<AssociatedWorkItem>,
    /// Resource URL
    pub url: Option<String>,
}

/// Filter for shelveset queries, flattened onto the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelvesetRequestData {
    /// Only shelvesets with this name
    pub name: Option<String>,
    /// Only shelvesets owned by this identity
    pub owner: Option<String>,
    /// Whether to include full details
    pub include_details: Option<bool>,
    /// Whether to include associated work items
    pub include_work_items: Option<bool>,
    /// Whether to include reference links
    pub include_links: Option<bool>,
    /// Cap on changes returned
    pub max_change_count: Option<i32>,
    /// Truncate comments to this length
    pub max_comment_length: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelveset_ref_deserialize() {
        let json = r#"{
            "id": "Bug fix;d6245f20-2af8-44f4-9451-8107cb2767db",
            "name": "Bug fix",
            "owner": { "displayName": "Normal Paulk" },
            "createdDate": "2014-08-05T15:12:10.5Z",
            "comment": "Fixes the trust issue"
        }"#;

        let shelveset: TfvcShelvesetRef = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(shelveset.name, "Bug fix");
        assert!(shelveset.id.expect("id").contains(';'));
    }
}

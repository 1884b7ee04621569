//! Changeset data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::core::{AssociatedWorkItem, IdentityRef};
use crate::types::items::TfvcItem;

/// Changeset metadata without details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcChangesetRef {
    /// Changeset number
    pub changeset_id: i32,
    /// Author of the change
    pub author: Option<IdentityRef>,
    /// Identity that performed the check-in
    pub checked_in_by: Option<IdentityRef>,
    /// When the changeset was created
    pub created_date: DateTime<Utc>,
    /// Check-in comment, possibly truncated
    pub comment: Option<String>,
    /// Whether the comment was truncated to the requested length
    #[serde(default)]
    pub comment_truncated: bool,
    /// Resource URL
    pub url: Option<String>,
}

/// Full changeset including details requested via options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcChangeset {
    /// Changeset number
    pub changeset_id: i32,
    /// Author of the change
    pub author: Option<IdentityRef>,
    /// Identity that performed the check-in
    pub checked_in_by: Option<IdentityRef>,
    /// When the changeset was created
    pub created_date: DateTime<Utc>,
    /// Check-in comment, possibly truncated
    pub comment: Option<String>,
    /// Whether the comment was truncated to the requested length
    #[serde(default)]
    pub comment_truncated: bool,
    /// Account the changeset belongs to
    pub account_id: Option<Uuid>,
    /// Collection the changeset belongs to
    pub collection_id: Option<Uuid>,
    /// Whether more changes exist than were returned
    #[serde(default)]
    pub has_more_changes: bool,
    /// Changes in the changeset, when details were requested
    #[serde(default)]
    pub changes: Vec<TfvcChange>,
    /// Check-in notes
    #[serde(default)]
    pub checkin_notes: Vec<CheckinNote>,
    /// Policy override details, when a policy was overridden
    pub policy_override: Option<PolicyOverrideInfo>,
    /// Associated work items, when requested
    #[serde(default)]
    pub work_items: Vec<AssociatedWorkItem>,
    /// Resource URL
    pub url: Option<String>,
}

/// One changed item within a changeset or shelveset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcChange {
    /// The item as of this change
    pub item: Option<TfvcItem>,
    /// Change kinds, comma-separated (e.g. "edit, rename")
    pub change_type: Option<String>,
    /// Merge sources for merge changes
    #[serde(default)]
    pub merge_sources: Vec<TfvcMergeSource>,
}

/// Source of a merge change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcMergeSource {
    /// Server item the change was merged from
    pub server_item: Option<String>,
    /// Whether the merge was a rename
    #[serde(default)]
    pub is_rename: bool,
    /// First changeset of the merged range
    pub version_from: Option<i32>,
    /// Last changeset of the merged range
    pub version_to: Option<i32>,
}

/// One check-in note field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinNote {
    /// Note field name (e.g. "Code Reviewer")
    pub name: Option<String>,
    /// Note field value
    pub value: Option<String>,
}

/// Details of an overridden check-in policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOverrideInfo {
    /// Override justification
    pub comment: Option<String>,
    /// The policies that failed
    #[serde(default)]
    pub policy_failures: Vec<PolicyFailureInfo>,
}

/// One failed check-in policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyFailureInfo {
    /// Policy name
    pub policy_name: Option<String>,
    /// Failure message
    pub message: Option<String>,
}

/// Filter for changeset queries, flattened onto the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetSearchCriteria {
    /// Only changes under this server path
    pub item_path: Option<String>,
    /// Only changesets by this author
    pub author: Option<String>,
    /// Lowest changeset number to include
    pub from_id: Option<i32>,
    /// Highest changeset number to include
    pub to_id: Option<i32>,
    /// Only changesets created on or after this date
    pub from_date: Option<String>,
    /// Only changesets created on or before this date
    pub to_date: Option<String>,
}

/// Body of the batched changeset query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesetsRequestData {
    /// Changeset numbers to fetch
    pub changeset_ids: Vec<i32>,
    /// Truncate comments to this length
    pub comment_length: Option<i32>,
    /// Whether to include reference links
    pub include_links: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changeset_ref_deserialize() {
        let json = r#"{
            "changesetId": 16,
            "author": { "displayName": "Chuck Reinhart" },
            "checkedInBy": { "displayName": "Chuck Reinhart" },
            "createdDate": "2014-03-12T21:39:51.46Z",
            "comment": "Fix navigation",
            "url": "https://tfs.example.com/DefaultCollection/_apis/tfvc/changesets/16"
        }"#;

        let changeset: TfvcChangesetRef = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(changeset.changeset_id, 16);
        assert!(!changeset.comment_truncated);
    }

    #[test]
    fn test_changeset_with_details_deserialize() {
        let json = r#"{
            "changesetId": 18,
            "createdDate": "2014-03-24T12:00:00Z",
            "comment": "Checked in with override",
            "hasMoreChanges": true,
            "changes": [
                {
                    "item": { "path": "$/Fabrikam/Main/program.cs", "version": 18 },
                    "changeType": "edit",
                    "mergeSources": [
                        { "serverItem": "$/Fabrikam/Dev/program.cs", "versionFrom": 12, "versionTo": 17 }
                    ]
                }
            ],
            "checkinNotes": [ { "name": "Code Reviewer", "value": "Johnnie McLeod" } ],
            "policyOverride": {
                "comment": "deadline",
                "policyFailures": [ { "policyName": "Work Items", "message": "No associated work item" } ]
            },
            "workItems": [ { "id": 9, "workItemType": "Bug" } ]
        }"#;

        let changeset: TfvcChangeset = serde_json::from_str(json).expect("should deserialize");
        assert!(changeset.has_more_changes);
        assert_eq!(changeset.changes.len(), 1);
        assert_eq!(changeset.changes[0].merge_sources[0].version_to, Some(17));
        assert_eq!(changeset.checkin_notes[0].value.as_deref(), Some("Johnnie McLeod"));
        assert_eq!(changeset.work_items[0].id, 9);
        let override_info = changeset.policy_override.expect("override info");
        assert_eq!(override_info.policy_failures.len(), 1);
    }

    #[test]
    fn test_request_data_serializes_camel_case() {
        let request = ChangesetsRequestData {
            changeset_ids: vec![16, 17, 18],
            comment_length: Some(80),
            include_links: None,
        };

        let value = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(value["changesetIds"], serde_json::json!([16, 17, 18]));
        assert_eq!(value["commentLength"], 80);
    }
}

//! Item and version descriptor data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One versioned item (file or folder) in the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcItem {
    /// Server path of the item
    pub path: String,
    /// Changeset the item content is from
    pub version: Option<i32>,
    /// When the item last changed
    pub change_date: Option<DateTime<Utc>>,
    /// Deletion id, non-zero when the item is deleted
    pub deletion_id: Option<i32>,
    /// Content size in bytes
    pub size: Option<u64>,
    /// Content hash
    pub hash_value: Option<String>,
    /// Whether the item is a folder
    #[serde(default)]
    pub is_folder: bool,
    /// Whether the item is a branch root
    #[serde(default)]
    pub is_branch: bool,
    /// Whether the item has a pending change in the querying workspace
    #[serde(default)]
    pub is_pending_change: bool,
    /// Content metadata, when requested
    pub content_metadata: Option<ItemContentMetadata>,
    /// Resource URL
    pub url: Option<String>,
}

/// Content metadata of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemContentMetadata {
    /// Content type reported by the server
    pub content_type: Option<String>,
    /// Code page of the content
    pub encoding: Option<i32>,
    /// File extension
    pub extension: Option<String>,
    /// File name
    pub file_name: Option<String>,
    /// Whether the content is binary
    #[serde(default)]
    pub is_binary: bool,
    /// Whether the content is an image
    #[serde(default)]
    pub is_image: bool,
    /// Visual Studio web access link
    pub vs_link: Option<String>,
}

/// Body of the batched item query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestData {
    /// Whether to include content metadata per item
    pub include_content_metadata: Option<bool>,
    /// Whether to include reference links
    pub include_links: Option<bool>,
    /// One descriptor per requested item set
    pub item_descriptors: Vec<ItemDescriptor>,
}

/// One requested item set within a batched item query.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    /// Server path to query
    pub path: String,
    /// Version to query at
    pub version: Option<String>,
    /// How to interpret the version value
    pub version_type: Option<VersionType>,
    /// Version adjustment relative to the version value
    pub version_option: Option<VersionOption>,
    /// Folder recursion to apply
    pub recursion_level: Option<RecursionLevel>,
}

/// Version selector for item queries, flattened onto the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    /// Version value, interpreted per `version_type`
    pub version: Option<String>,
    /// How to interpret the version value
    pub version_type: Option<VersionType>,
    /// Version adjustment relative to the version value
    pub version_option: Option<VersionOption>,
}

impl VersionDescriptor {
    /// Select a specific changeset.
    #[must_use]
    pub fn changeset(id: i32) -> Self {
        Self {
            version: Some(id.to_string()),
            version_type: Some(VersionType::Changeset),
            version_option: None,
        }
    }

    /// Select the latest version.
    #[must_use]
    pub fn latest() -> Self {
        Self {
            version: None,
            version_type: Some(VersionType::Latest),
            version_option: None,
        }
    }
}

/// How a version value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionType {
    None,
    Changeset,
    Shelveset,
    Change,
    Date,
    Latest,
    Tip,
    MergeSource,
}

/// Version adjustment applied on top of the version value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionOption {
    None,
    Previous,
    UseRename,
}

/// Folder recursion for item queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecursionLevel {
    None,
    OneLevel,
    OneLevelPlusNestedEmptyFolders,
    Full,
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::None => "none",
            Self::Changeset => "changeset",
            Self::Shelveset => "shelveset",
            Self::Change => "change",
            Self::Date => "date",
            Self::Latest => "latest",
            Self::Tip => "tip",
            Self::MergeSource => "mergeSource",
        };
        f.write_str(rendered)
    }
}

impl fmt::Display for VersionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::None => "none",
            Self::Previous => "previous",
            Self::UseRename => "useRename",
        };
        f.write_str(rendered)
    }
}

impl fmt::Display for RecursionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::None => "none",
            Self::OneLevel => "oneLevel",
            Self::OneLevelPlusNestedEmptyFolders => "oneLevelPlusNestedEmptyFolders",
            Self::Full => "full",
        };
        f.write_str(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserialize() {
        let json = r#"{
            "path": "$/Fabrikam/Main/program.cs",
            "version": 18,
            "changeDate": "2014-03-24T12:00:00Z",
            "size": 1507,
            "hashValue": "UyldTHNmSCtSjbRFFpLVrQ==",
            "isFolder": false,
            "contentMetadata": { "encoding": 65001, "contentType": "text/plain", "fileName": "program.cs" },
            "url": "https://tfs.example.com/DefaultCollection/_apis/tfvc/items/$/Fabrikam/Main/program.cs"
        }"#;

        let item: TfvcItem = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(item.version, Some(18));
        assert!(!item.is_folder);
        assert_eq!(
            item.content_metadata.expect("metadata").encoding,
            Some(65001)
        );
    }

    #[test]
    fn test_enum_display_matches_wire_casing() {
        assert_eq!(VersionType::MergeSource.to_string(), "mergeSource");
        assert_eq!(VersionOption::UseRename.to_string(), "useRename");
        assert_eq!(RecursionLevel::OneLevel.to_string(), "oneLevel");
        assert_eq!(RecursionLevel::Full.to_string(), "full");
    }

    #[test]
    fn test_enum_serialize_matches_display() {
        for (value, expected) in [
            (serde_json::to_value(VersionType::Changeset), "changeset"),
            (serde_json::to_value(VersionType::MergeSource), "mergeSource"),
        ] {
            assert_eq!(value.expect("should serialize"), serde_json::json!(expected));
        }
    }

    #[test]
    fn test_version_descriptor_changeset_helper() {
        let descriptor = VersionDescriptor::changeset(42);
        assert_eq!(descriptor.version.as_deref(), Some("42"));
        assert_eq!(descriptor.version_type, Some(VersionType::Changeset));
    }

    #[test]
    fn test_item_request_data_serializes_descriptors() {
        let request = ItemRequestData {
            include_content_metadata: Some(true),
            include_links: None,
            item_descriptors: vec![ItemDescriptor {
                path: "$/Fabrikam/Main".to_string(),
                version: Some("18".to_string()),
                version_type: Some(VersionType::Changeset),
                version_option: None,
                recursion_level: Some(RecursionLevel::OneLevel),
            }],
        };

        let value = serde_json::to_value(&request).expect("should serialize");
        assert_eq!(value["includeContentMetadata"], true);
        assert_eq!(value["itemDescriptors"][0]["path"], "$/Fabrikam/Main");
        assert_eq!(value["itemDescriptors"][0]["recursionLevel"], "oneLevel");
    }
}

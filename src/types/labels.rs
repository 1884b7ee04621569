//! Label data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::core::IdentityRef;
use crate::types::items::TfvcItem;

/// Label metadata without items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcLabelRef {
    /// Label id
    pub id: i32,
    /// Label name
    pub name: String,
    /// Server path scope the label applies under
    pub label_scope: Option<String>,
    /// Label description
    pub description: Option<String>,
    /// When the label was last modified
    pub modified_date: Option<DateTime<Utc>>,
    /// Label owner
    pub owner: Option<IdentityRef>,
    /// Resource URL
    pub url: Option<String>,
}

/// Full label including labelled items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfvcLabel {
    /// Label id
    pub id: i32,
    /// Label name
    pub name: String,
    /// Server path scope the label applies under
    pub label_scope: Option<String>,
    /// Label description
    pub description: Option<String>,
    /// When the label was last modified
    pub modified_date: Option<DateTime<Utc>>,
    /// Label owner
    pub owner: Option<IdentityRef>,
    /// Labelled items, capped by the request's item count
    #[serde(default)]
    pub items: Vec<TfvcItem>,
    /// Resource URL
    pub url: Option<String>,
}

/// Filter for label queries, flattened onto the query string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequestData {
    /// Only labels scoped under this server path
    pub label_scope: Option<String>,
    /// Only labels with this name
    pub name: Option<String>,
    /// Only labels owned by this identity
    pub owner: Option<String>,
    /// Only labels applied to this item
    pub item_label_filter: Option<String>,
    /// Cap on items returned per label
    pub max_item_count: Option<i32>,
    /// Whether to include reference links
    pub include_links: Option<bool>,
}

//! Shared data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a team project, by human-readable name or by id.
///
/// Project-scoped operations accept either form; only the rendering of the
/// route value differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Project {
    /// Project name, e.g. "Fabrikam".
    Name(String),
    /// Opaque project identifier.
    Id(Uuid),
}

impl Project {
    /// Reference a project by name.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Reference a project by id.
    #[must_use]
    pub fn id(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for Project {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Project {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Uuid> for Project {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

/// Reference to an identity (owner, author, check-in user).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Identity id
    pub id: Option<Uuid>,
    /// Display name
    pub display_name: Option<String>,
    /// Unique name (e.g. domain account)
    pub unique_name: Option<String>,
    /// Resource URL
    pub url: Option<String>,
    /// Avatar URL
    pub image_url: Option<String>,
}

/// Reference to a team project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    /// Project id
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Project description
    pub description: Option<String>,
    /// Resource URL
    pub url: Option<String>,
    /// Project state (e.g. "wellFormed")
    pub state: Option<String>,
}

/// Work item associated with a changeset or shelveset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociatedWorkItem {
    /// Work item id
    pub id: i32,
    /// Title
    pub title: Option<String>,
    /// Assigned-to display name
    pub assigned_to: Option<String>,
    /// State (e.g. "Active")
    pub state: Option<String>,
    /// Work item type (e.g. "Bug")
    pub work_item_type: Option<String>,
    /// Web access URL
    pub web_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_renders_name_as_route_value() {
        assert_eq!(Project::name("Fabrikam").to_string(), "Fabrikam");
    }

    #[test]
    fn test_project_renders_id_as_route_value() {
        let id = Uuid::parse_str("252d9c40-0643-41cf-85b2-044d80f9b675").expect("valid uuid");
        assert_eq!(
            Project::id(id).to_string(),
            "252d9c40-0643-41cf-85b2-044d80f9b675"
        );
    }

    #[test]
    fn test_identity_ref_deserialize() {
        let json = r#"{
            "id": "d6245f20-2af8-44f4-9451-8107cb2767db",
            "displayName": "Normal Paulk",
            "uniqueName": "fabrikamfiber16@hotmail.com",
            "url": "https://tfs.example.com/DefaultCollection/_apis/Identities/d6245f20-2af8-44f4-9451-8107cb2767db",
            "imageUrl": "https://tfs.example.com/DefaultCollection/_api/_common/identityImage?id=d6245f20-2af8-44f4-9451-8107cb2767db"
        }"#;

        let identity: IdentityRef = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(identity.display_name.as_deref(), Some("Normal Paulk"));
    }

    #[test]
    fn test_associated_work_item_deserialize() {
        let json = r#"{
            "id": 9,
            "title": "Fix trust issue",
            "assignedTo": "Chuck Reinhart",
            "state": "Active",
            "workItemType": "Bug",
            "webUrl": "https://tfs.example.com/web/wi.aspx?id=9"
        }"#;

        let item: AssociatedWorkItem = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(item.id, 9);
        assert_eq!(item.work_item_type.as_deref(), Some("Bug"));
    }
}

//! Labels resource client.

use std::sync::Arc;

use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::RequestSpec;
use crate::transport::HttpTransport;
use crate::types::{LabelRequestData, Project, TfvcItem, TfvcLabel, TfvcLabelRef};
use crate::version::ApiVersion;

/// Location of the labels resource.
const LABELS_LOCATION: Uuid = uuid!("a5d9bd7f-b661-4d0e-b9be-d9c16affae54");

/// Location of the labelled-items resource.
const LABEL_ITEMS_LOCATION: Uuid = uuid!("06166e34-de17-4b60-8cd1-23182a346fda");

fn api_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Client for label operations.
pub struct LabelsClient {
    transport: Arc<HttpTransport>,
}

impl LabelsClient {
    /// Create a new labels client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the items under a label.
    ///
    /// # Arguments
    ///
    /// * `label_id` - Label id
    /// * `top` - Cap on items returned
    /// * `skip` - Number of items to skip
    ///
    /// # Errors
    ///
    /// Returns an error if the label does not exist or the request fails.
    pub async fn get_label_items(
        &self,
        label_id: &str,
        top: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<TfvcItem>, Error> {
        self.transport
            .send_collection(get_label_items_spec(label_id, top, skip))
            .await
    }

    /// Get a single deep label.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, when project-scoped
    /// * `label_id` - Label id
    /// * `request` - maxItemCount and filter options
    ///
    /// # Errors
    ///
    /// Returns an error if the label does not exist or the request fails.
    pub async fn get_label(
        &self,
        project: Option<&Project>,
        label_id: &str,
        request: &LabelRequestData,
    ) -> Result<TfvcLabel, Error> {
        self.transport
            .send_json(get_label_spec(project, label_id, request)?)
            .await
    }

    /// Get a collection of shallow label references.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_labels(
        &self,
        project: Option<&Project>,
        request: &LabelRequestData,
        top: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<TfvcLabelRef>, Error> {
        self.transport
            .send_collection(get_labels_spec(project, request, top, skip)?)
            .await
    }
}

fn get_label_items_spec(label_id: &str, top: Option<i32>, skip: Option<i32>) -> RequestSpec {
    let mut spec = RequestSpec::get(LABEL_ITEMS_LOCATION, api_version());
    spec.route_values.insert("labelId", label_id);
    spec.query.add("$top", top);
    spec.query.add("$skip", skip);
    spec
}

fn get_label_spec(
    project: Option<&Project>,
    label_id: &str,
    request: &LabelRequestData,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(LABELS_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.route_values.insert("labelId", label_id);
    spec.query.add_model("requestData", request)?;
    Ok(spec)
}

fn get_labels_spec(
    project: Option<&Project>,
    request: &LabelRequestData,
    top: Option<i32>,
    skip: Option<i32>,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(LABELS_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add_model("requestData", request)?;
    spec.query.add("$top", top);
    spec.query.add("$skip", skip);
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_get_label_items_spec() {
        let spec = get_label_items_spec("7", Some(50), None);

        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.location_id, LABEL_ITEMS_LOCATION);
        assert_eq!(spec.route_values.get("labelId"), Some("7"));
        assert_eq!(spec.query.get("$top"), Some("50"));
        assert_eq!(spec.query.get("$skip"), None);
    }

    #[test]
    fn test_get_label_spec_flattens_request_data() {
        let project = Project::name("Fabrikam");
        let request = LabelRequestData {
            max_item_count: Some(10),
            include_links: Some(false),
            ..Default::default()
        };

        let spec = get_label_spec(Some(&project), "7", &request).expect("should build spec");

        assert_eq!(spec.location_id, LABELS_LOCATION);
        assert_eq!(spec.route_values.get("project"), Some("Fabrikam"));
        assert_eq!(spec.route_values.get("labelId"), Some("7"));
        assert_eq!(spec.query.get("requestData.maxItemCount"), Some("10"));
        assert_eq!(spec.query.get("requestData.includeLinks"), Some("false"));
        assert_eq!(spec.query.get("requestData.name"), None);
    }

    #[test]
    fn test_get_labels_spec() {
        let request = LabelRequestData {
            label_scope: Some("$/Fabrikam".to_string()),
            owner: Some("Normal Paulk".to_string()),
            ..Default::default()
        };

        let spec = get_labels_spec(None, &request, Some(25), Some(5)).expect("should build spec");

        assert_eq!(spec.route_values.get("labelId"), None);
        assert_eq!(spec.query.get("requestData.labelScope"), Some("$/Fabrikam"));
        assert_eq!(spec.query.get("requestData.owner"), Some("Normal Paulk"));
        assert_eq!(spec.query.get("$top"), Some("25"));
        assert_eq!(spec.query.get("$skip"), Some("5"));
    }
}

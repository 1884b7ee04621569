//! Items resource client.
//!
//! Item content can be retrieved in four renditions: item metadata as JSON,
//! raw bytes, plain text, and a zip of a folder subtree. All four share the
//! same route and query construction and differ only in the requested
//! response content type.

use std::sync::Arc;

use bytes::Bytes;
use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::{Accept, RequestSpec};
use crate::transport::HttpTransport;
use crate::types::{
    ItemRequestData, Project, RecursionLevel, TfvcItem, VersionDescriptor,
};
use crate::version::ApiVersion;

/// Location of the items resource.
const ITEMS_LOCATION: Uuid = uuid!("ba9fc436-9a38-4578-89d6-e4f3241f5040");

/// Location of the batched item query resource.
const ITEM_BATCH_LOCATION: Uuid = uuid!("fe6f827b-5f64-480f-b8af-1eca3b80e833");

fn api_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Optional parameters shared by the single-item retrievals.
#[derive(Debug, Clone, Default)]
pub struct GetItemOptions {
    /// File name to report in the download response
    pub file_name: Option<String>,
    /// Ask the server for a download disposition
    pub download: Option<bool>,
    /// Server path scoping the query
    pub scope_path: Option<String>,
    /// Folder recursion to apply
    pub recursion_level: Option<RecursionLevel>,
    /// Version to query at; latest when absent
    pub version_descriptor: Option<VersionDescriptor>,
}

/// Client for item operations.
pub struct ItemsClient {
    transport: Arc<HttpTransport>,
}

impl ItemsClient {
    /// Create a new items client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Post for retrieving a set of items given a list of paths or a long
    /// path, in one round-trip.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, when project-scoped
    /// * `request` - Descriptors of the item sets to retrieve
    ///
    /// # Returns
    ///
    /// One list of items per descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_items_batch(
        &self,
        project: Option<&Project>,
        request: &ItemRequestData,
    ) -> Result<Vec<Vec<TfvcItem>>, Error> {
        self.transport
            .send_collection(get_items_batch_spec(project, request)?)
            .await
    }

    /// Get item metadata, and optionally content, for a single item.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, when project-scoped
    /// * `path` - Server path of the item
    /// * `options` - Version and scope options
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist at the requested
    /// version or the request fails.
    pub async fn get_item(
        &self,
        project: Option<&Project>,
        path: &str,
        options: &GetItemOptions,
    ) -> Result<TfvcItem, Error> {
        self.transport
            .send_json(item_query_spec(project, path, options)?)
            .await
    }

    /// Get the content of a single item as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist at the requested
    /// version or the request fails.
    pub async fn get_item_content(
        &self,
        project: Option<&Project>,
        path: &str,
        options: &GetItemOptions,
    ) -> Result<Bytes, Error> {
        self.transport
            .send_bytes(item_query_spec(project, path, options)?.accepting(Accept::OctetStream))
            .await
    }

    /// Get a list of items under a scope path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_items(
        &self,
        project: Option<&Project>,
        scope_path: Option<&str>,
        recursion_level: Option<RecursionLevel>,
        include_links: Option<bool>,
        version_descriptor: Option<&VersionDescriptor>,
    ) -> Result<Vec<TfvcItem>, Error> {
        self.transport
            .send_collection(get_items_spec(
                project,
                scope_path,
                recursion_level,
                include_links,
                version_descriptor,
            )?)
            .await
    }

    /// Get the content of a single item as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist at the requested
    /// version or the request fails.
    pub async fn get_item_text(
        &self,
        project: Option<&Project>,
        path: &str,
        options: &GetItemOptions,
    ) -> Result<String, Error> {
        self.transport
            .send_text(item_query_spec(project, path, options)?.accepting(Accept::Text))
            .await
    }

    /// Get the content of a single item, or a folder subtree, as a zip.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist at the requested
    /// version or the request fails.
    pub async fn get_item_zip(
        &self,
        project: Option<&Project>,
        path: &str,
        options: &GetItemOptions,
    ) -> Result<Bytes, Error> {
        self.transport
            .send_bytes(item_query_spec(project, path, options)?.accepting(Accept::Zip))
            .await
    }
}

fn get_items_batch_spec(
    project: Option<&Project>,
    request: &ItemRequestData,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::post(
        ITEM_BATCH_LOCATION,
        api_version(),
        serde_json::to_value(request)?,
    );
    spec.route_values.insert_opt("project", project);
    Ok(spec)
}

fn item_query_spec(
    project: Option<&Project>,
    path: &str,
    options: &GetItemOptions,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(ITEMS_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add_string("path", Some(path));
    spec.query.add_string("fileName", options.file_name.as_deref());
    spec.query.add("download", options.download);
    spec.query
        .add_string("scopePath", options.scope_path.as_deref());
    spec.query.add("recursionLevel", options.recursion_level);
    if let Some(descriptor) = &options.version_descriptor {
        spec.query.add_model("versionDescriptor", descriptor)?;
    }
    Ok(spec)
}

fn get_items_spec(
    project: Option<&Project>,
    scope_path: Option<&str>,
    recursion_level: Option<RecursionLevel>,
    include_links: Option<bool>,
    version_descriptor: Option<&VersionDescriptor>,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(ITEMS_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add_string("scopePath", scope_path);
    spec.query.add("recursionLevel", recursion_level);
    spec.query.add("includeLinks", include_links);
    if let Some(descriptor) = version_descriptor {
        spec.query.add_model("versionDescriptor", descriptor)?;
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemDescriptor, VersionType};
    use reqwest::Method;

    #[test]
    fn test_item_query_spec() {
        let project = Project::name("Fabrikam");
        let options = GetItemOptions {
            file_name: Some("program.cs".to_string()),
            download: Some(true),
            recursion_level: Some(RecursionLevel::None),
            version_descriptor: Some(VersionDescriptor::changeset(18)),
            ..Default::default()
        };

        let spec = item_query_spec(Some(&project), "$/Fabrikam/Main/program.cs", &options)
            .expect("should build spec");

        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.location_id, ITEMS_LOCATION);
        assert_eq!(spec.accept, Accept::Json);
        assert_eq!(spec.route_values.get("project"), Some("Fabrikam"));
        assert_eq!(spec.query.get("path"), Some("$/Fabrikam/Main/program.cs"));
        assert_eq!(spec.query.get("fileName"), Some("program.cs"));
        assert_eq!(spec.query.get("download"), Some("true"));
        assert_eq!(spec.query.get("recursionLevel"), Some("none"));
        assert_eq!(spec.query.get("versionDescriptor.version"), Some("18"));
        assert_eq!(
            spec.query.get("versionDescriptor.versionType"),
            Some("changeset")
        );
        assert_eq!(spec.query.get("versionDescriptor.versionOption"), None);
    }

    #[test]
    fn test_item_query_spec_content_renditions() {
        let options = GetItemOptions::default();

        let spec = item_query_spec(None, "$/Fabrikam/readme.md", &options)
            .expect("should build spec")
            .accepting(Accept::OctetStream);
        assert_eq!(spec.accept, Accept::OctetStream);

        let spec = item_query_spec(None, "$/Fabrikam/readme.md", &options)
            .expect("should build spec")
            .accepting(Accept::Text);
        assert_eq!(spec.accept, Accept::Text);

        let spec = item_query_spec(None, "$/Fabrikam/Main", &options)
            .expect("should build spec")
            .accepting(Accept::Zip);
        assert_eq!(spec.accept, Accept::Zip);
    }

    #[test]
    fn test_get_items_spec() {
        let spec = get_items_spec(
            None,
            Some("$/Fabrikam/Main"),
            Some(RecursionLevel::Full),
            Some(true),
            None,
        )
        .expect("should build spec");

        assert_eq!(spec.query.get("scopePath"), Some("$/Fabrikam/Main"));
        assert_eq!(spec.query.get("recursionLevel"), Some("full"));
        assert_eq!(spec.query.get("includeLinks"), Some("true"));
        assert_eq!(spec.query.get("versionDescriptor.version"), None);
    }

    #[test]
    fn test_get_items_batch_spec() {
        let project = Project::name("Fabrikam");
        let request = ItemRequestData {
            include_content_metadata: Some(true),
            include_links: None,
            item_descriptors: vec![ItemDescriptor {
                path: "$/Fabrikam/Main".to_string(),
                version: Some("18".to_string()),
                version_type: Some(VersionType::Changeset),
                version_option: None,
                recursion_level: None,
            }],
        };

        let spec = get_items_batch_spec(Some(&project), &request).expect("should build spec");

        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.location_id, ITEM_BATCH_LOCATION);
        assert_eq!(spec.route_values.get("project"), Some("Fabrikam"));
        let body = spec.body.expect("body");
        assert_eq!(body["itemDescriptors"][0]["versionType"], "changeset");
    }
}

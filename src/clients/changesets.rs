//! Changesets resource client.

use std::sync::Arc;

use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::RequestSpec;
use crate::transport::HttpTransport;
use crate::types::{
    AssociatedWorkItem, ChangesetSearchCriteria, ChangesetsRequestData, Project, TfvcChange,
    TfvcChangeset, TfvcChangesetRef,
};
use crate::version::ApiVersion;

/// Location of the changesets resource.
const CHANGESETS_LOCATION: Uuid = uuid!("0bc8f0a4-6bfb-42a9-ba84-139da7b99c49");

/// Location of the changes-in-changeset resource.
const CHANGESET_CHANGES_LOCATION: Uuid = uuid!("f32b86f2-15b9-4fe6-81b1-6f8938617ee5");

/// Location of the batched changeset query resource.
const BATCHED_CHANGESETS_LOCATION: Uuid = uuid!("b7e7c173-803c-4fea-9ec8-31ee35c5502a");

/// Location of the changeset work items resource.
const CHANGESET_WORK_ITEMS_LOCATION: Uuid = uuid!("64ae0bea-1d71-47c9-a9e5-fe73f5ea0ff4");

fn api_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Optional parameters shared by the changeset queries.
#[derive(Debug, Clone, Default)]
pub struct GetChangesetOptions {
    /// Cap on changes returned inside each changeset
    pub max_change_count: Option<i32>,
    /// Include check-in notes and policy override details
    pub include_details: Option<bool>,
    /// Include associated work items
    pub include_work_items: Option<bool>,
    /// Truncate comments to this length
    pub max_comment_length: Option<i32>,
    /// Follow renames when filtering by item path
    pub include_source_rename: Option<bool>,
    /// Number of results to skip
    pub skip: Option<i32>,
    /// Cap on results returned
    pub top: Option<i32>,
    /// Result ordering, e.g. "id desc"
    pub orderby: Option<String>,
    /// Changeset filter
    pub search_criteria: Option<ChangesetSearchCriteria>,
}

/// Client for changeset operations.
pub struct ChangesetsClient {
    transport: Arc<HttpTransport>,
}

impl ChangesetsClient {
    /// Create a new changesets client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Retrieve the changes for a given changeset.
    ///
    /// # Arguments
    ///
    /// * `id` - Changeset number
    /// * `skip` - Number of changes to skip
    /// * `top` - Cap on changes returned
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset does not exist or the request
    /// fails.
    pub async fn get_changeset_changes(
        &self,
        id: i32,
        skip: Option<i32>,
        top: Option<i32>,
    ) -> Result<Vec<TfvcChange>, Error> {
        self.transport
            .send_collection(get_changeset_changes_spec(id, skip, top))
            .await
    }

    /// Retrieve a single changeset.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, when project-scoped
    /// * `id` - Changeset number
    /// * `options` - Detail and filter options
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset does not exist or the request
    /// fails.
    pub async fn get_changeset(
        &self,
        project: Option<&Project>,
        id: i32,
        options: &GetChangesetOptions,
    ) -> Result<TfvcChangeset, Error> {
        self.transport
            .send_json(changeset_query_spec(project, Some(id), options)?)
            .await
    }

    /// Retrieve changesets matching the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_changesets(
        &self,
        project: Option<&Project>,
        options: &GetChangesetOptions,
    ) -> Result<Vec<TfvcChangesetRef>, Error> {
        self.transport
            .send_collection(changeset_query_spec(project, None, options)?)
            .await
    }

    /// Retrieve a batch of changesets by number in one round-trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_batched_changesets(
        &self,
        request: &ChangesetsRequestData,
    ) -> Result<Vec<TfvcChangesetRef>, Error> {
        self.transport
            .send_collection(get_batched_changesets_spec(request)?)
            .await
    }

    /// Retrieve the work items associated with a changeset.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset does not exist or the request
    /// fails.
    pub async fn get_changeset_work_items(
        &self,
        id: i32,
    ) -> Result<Vec<AssociatedWorkItem>, Error> {
        self.transport
            .send_collection(get_changeset_work_items_spec(id))
            .await
    }
}

fn get_changeset_changes_spec(id: i32, skip: Option<i32>, top: Option<i32>) -> RequestSpec {
    let mut spec = RequestSpec::get(CHANGESET_CHANGES_LOCATION, api_version());
    spec.route_values.insert("id", id);
    spec.query.add("$skip", skip);
    spec.query.add("$top", top);
    spec
}

fn changeset_query_spec(
    project: Option<&Project>,
    id: Option<i32>,
    options: &GetChangesetOptions,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(CHANGESETS_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.route_values.insert_opt("id", id);
    spec.query.add("maxChangeCount", options.max_change_count);
    spec.query.add("includeDetails", options.include_details);
    spec.query.add("includeWorkItems", options.include_work_items);
    spec.query.add("maxCommentLength", options.max_comment_length);
    spec.query
        .add("includeSourceRename", options.include_source_rename);
    spec.query.add("$skip", options.skip);
    spec.query.add("$top", options.top);
    spec.query.add_string("$orderby", options.orderby.as_deref());
    if let Some(criteria) = &options.search_criteria {
        spec.query.add_model("searchCriteria", criteria)?;
    }
    Ok(spec)
}

fn get_batched_changesets_spec(request: &ChangesetsRequestData) -> Result<RequestSpec, Error> {
    Ok(RequestSpec::post(
        BATCHED_CHANGESETS_LOCATION,
        api_version(),
        serde_json::to_value(request)?,
    ))
}

fn get_changeset_work_items_spec(id: i32) -> RequestSpec {
    let mut spec = RequestSpec::get(CHANGESET_WORK_ITEMS_LOCATION, api_version());
    spec.route_values.insert("id", id);
    spec
}

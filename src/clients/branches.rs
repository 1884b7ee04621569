//! Branches resource client.

use std::sync::Arc;

use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::RequestSpec;
use crate::transport::HttpTransport;
use crate::types::{Project, TfvcBranch, TfvcBranchRef};
use crate::version::ApiVersion;

/// Location of the branches resource.
const BRANCHES_LOCATION: Uuid = uuid!("bc1f417e-239d-42e7-85e1-76e80cb2d6eb");

fn api_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Client for branch hierarchy operations.
pub struct BranchesClient {
    transport: Arc<HttpTransport>,
}

impl BranchesClient {
    /// Create a new branches client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get a single branch hierarchy at the given path, with parents or
    /// children if requested.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, when the branch is project-scoped
    /// * `path` - Server path of the branch
    /// * `include_parent` - Include the parent branch
    /// * `include_children` - Include child branches
    ///
    /// # Errors
    ///
    /// Returns an error if the branch does not exist or the request fails.
    pub async fn get_branch(
        &self,
        project: Option<&Project>,
        path: Option<&str>,
        include_parent: Option<bool>,
        include_children: Option<bool>,
    ) -> Result<TfvcBranch, Error> {
        self.transport
            .send_json(get_branch_spec(
                project,
                path,
                include_parent,
                include_children,
            ))
            .await
    }

    /// Get the collection of branch roots: first-level children, branches
    /// with no parents.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id, to scope the roots
    /// * `include_parent` - Include parent branches
    /// * `include_children` - Include child branches
    /// * `include_deleted` - Include deleted branches
    /// * `include_links` - Include reference links
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_branches(
        &self,
        project: Option<&Project>,
        include_parent: Option<bool>,
        include_children: Option<bool>,
        include_deleted: Option<bool>,
        include_links: Option<bool>,
    ) -> Result<Vec<TfvcBranch>, Error> {
        self.transport
            .send_collection(get_branches_spec(
                project,
                include_parent,
                include_children,
                include_deleted,
                include_links,
            ))
            .await
    }

    /// Get branch hierarchies below the specified scope path.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_branch_refs(
        &self,
        project: Option<&Project>,
        scope_path: Option<&str>,
        include_deleted: Option<bool>,
        include_links: Option<bool>,
    ) -> Result<Vec<TfvcBranchRef>, Error> {
        self.transport
            .send_collection(get_branch_refs_spec(
                project,
                scope_path,
                include_deleted,
                include_links,
            ))
            .await
    }
}

fn get_branch_spec(
    project: Option<&Project>,
    path: Option<&str>,
    include_parent: Option<bool>,
    include_children: Option<bool>,
) -> RequestSpec {
    let mut spec = RequestSpec::get(BRANCHES_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add_string("path", path);
    spec.query.add("includeParent", include_parent);
    spec.query.add("includeChildren", include_children);
    spec
}

fn get_branches_spec(
    project: Option<&Project>,
    include_parent: Option<bool>,
    include_children: Option<bool>,
    include_deleted: Option<bool>,
    include_links: Option<bool>,
) -> RequestSpec {
    let mut spec = RequestSpec::get(BRANCHES_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add("includeParent", include_parent);
    spec.query.add("includeChildren", include_children);
    spec.query.add("includeDeleted", include_deleted);
    spec.query.add("includeLinks", include_links);
    spec
}

fn get_branch_refs_spec(
    project: Option<&Project>,
    scope_path: Option<&str>,
    include_deleted: Option<bool>,
    include_links: Option<bool>,
) -> RequestSpec {
    let mut spec = RequestSpec::get(BRANCHES_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add_string("scopePath", scope_path);
    spec.query.add("includeDeleted", include_deleted);
    spec.query.add("includeLinks", include_links);
    spec
}

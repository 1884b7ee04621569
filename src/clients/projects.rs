//! Version control project info resource client.

use std::sync::Arc;

use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::RequestSpec;
use crate::transport::HttpTransport;
use crate::types::{Project, VersionControlProjectInfo};
use crate::version::ApiVersion;

/// Location of the project info resource.
const PROJECT_INFO_LOCATION: Uuid = uuid!("252d9c40-0643-41cf-85b2-044d80f9b675");

fn api_version() -> ApiVersion {
    ApiVersion::preview(2, 0, 1)
}

/// Client for version control project info.
pub struct ProjectsClient {
    transport: Arc<HttpTransport>,
}

impl ProjectsClient {
    /// Create a new projects client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the version control capabilities of a single team project.
    ///
    /// # Arguments
    ///
    /// * `project` - Project name or id as the route value
    /// * `project_id` - Project id as a query filter
    ///
    /// # Errors
    ///
    /// Returns an error if the project does not exist or the request fails.
    pub async fn get_project_info(
        &self,
        project: Option<&Project>,
        project_id: Option<Uuid>,
    ) -> Result<VersionControlProjectInfo, Error> {
        self.transport
            .send_json(get_project_info_spec(project, project_id))
            .await
    }

    /// Get the version control capabilities of all team projects in the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_project_infos(
        &self,
        project: Option<&Project>,
    ) -> Result<Vec<VersionControlProjectInfo>, Error> {
        self.transport
            .send_collection(get_project_infos_spec(project))
            .await
    }
}

fn get_project_info_spec(project: Option<&Project>, project_id: Option<Uuid>) -> RequestSpec {
    let mut spec = RequestSpec::get(PROJECT_INFO_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec.query.add("projectId", project_id);
    spec
}

fn get_project_infos_spec(project: Option<&Project>) -> RequestSpec {
    let mut spec = RequestSpec::get(PROJECT_INFO_LOCATION, api_version());
    spec.route_values.insert_opt("project", project);
    spec
}

//! Shelvesets resource client.
//!
//! Shelveset ids travel as query parameters rather than route values; the
//! "name;owner" id format contains characters the route grammar does not
//! allow.

use std::sync::Arc;

use uuid::{uuid, Uuid};

use crate::error::Error;
use crate::request::RequestSpec;
use crate::transport::HttpTransport;
use crate::types::{
    AssociatedWorkItem, ShelvesetRequestData, TfvcChange, TfvcShelveset, TfvcShelvesetRef,
};
use crate::version::ApiVersion;

/// Location of the shelvesets resource.
const SHELVESETS_LOCATION: Uuid = uuid!("e36d44fb-e907-4b0a-b194-f83f1ed32ad3");

/// Location of the shelveset changes resource.
const SHELVESET_CHANGES_LOCATION: Uuid = uuid!("dbaf075b-0445-4c34-9e5b-82292f856522");

/// Location of the shelveset work items resource.
const SHELVESET_WORK_ITEMS_LOCATION: Uuid = uuid!("a7a0c1c1-373e-425a-b031-a519474d743d");

fn api_version() -> ApiVersion {
    ApiVersion::new(2, 0)
}

/// Client for shelveset operations.
pub struct ShelvesetsClient {
    transport: Arc<HttpTransport>,
}

impl ShelvesetsClient {
    /// Create a new shelvesets client.
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the changes in a shelveset.
    ///
    /// # Arguments
    ///
    /// * `shelveset_id` - Shelveset id, "name;owner"
    /// * `top` - Cap on changes returned
    /// * `skip` - Number of changes to skip
    ///
    /// # Errors
    ///
    /// Returns an error if the shelveset does not exist or the request
    /// fails.
    pub async fn get_shelveset_changes(
        &self,
        shelveset_id: &str,
        top: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<TfvcChange>, Error> {
        self.transport
            .send_collection(get_shelveset_changes_spec(shelveset_id, top, skip))
            .await
    }

    /// Get a single deep shelveset.
    ///
    /// # Errors
    ///
    /// Returns an error if the shelveset does not exist or the request
    /// fails.
    pub async fn get_shelveset(
        &self,
        shelveset_id: &str,
        request: &ShelvesetRequestData,
    ) -> Result<TfvcShelveset, Error> {
        self.transport
            .send_json(get_shelveset_spec(shelveset_id, request)?)
            .await
    }

    /// Get a collection of shallow shelveset references.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_shelvesets(
        &self,
        request: &ShelvesetRequestData,
        top: Option<i32>,
        skip: Option<i32>,
    ) -> Result<Vec<TfvcShelvesetRef>, Error> {
        self.transport
            .send_collection(get_shelvesets_spec(request, top, skip)?)
            .await
    }

    /// Get the work items associated with a shelveset.
    ///
    /// # Errors
    ///
    /// Returns an error if the shelveset does not exist or the request
    /// fails.
    pub async fn get_shelveset_work_items(
        &self,
        shelveset_id: &str,
    ) -> Result<Vec<AssociatedWorkItem>, Error> {
        self.transport
            .send_collection(get_shelveset_work_items_spec(shelveset_id))
            .await
    }
}

fn get_shelveset_changes_spec(
    shelveset_id: &str,
    top: Option<i32>,
    skip: Option<i32>,
) -> RequestSpec {
    let mut spec = RequestSpec::get(SHELVESET_CHANGES_LOCATION, api_version());
    spec.query.add_string("shelvesetId", Some(shelveset_id));
    spec.query.add("$top", top);
    spec.query.add("$skip", skip);
    spec
}

fn get_shelveset_spec(
    shelveset_id: &str,
    request: &ShelvesetRequestData,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(SHELVESETS_LOCATION, api_version());
    spec.query.add_string("shelvesetId", Some(shelveset_id));
    spec.query.add_model("requestData", request)?;
    Ok(spec)
}

fn get_shelvesets_spec(
    request: &ShelvesetRequestData,
    top: Option<i32>,
    skip: Option<i32>,
) -> Result<RequestSpec, Error> {
    let mut spec = RequestSpec::get(SHELVESETS_LOCATION, api_version());
    spec.query.add_model("requestData", request)?;
    spec.query.add("$top", top);
    spec.query.add("$skip", skip);
    Ok(spec)
}

fn get_shelveset_work_items_spec(shelveset_id: &str) -> RequestSpec {
    let mut spec = RequestSpec::get(SHELVESET_WORK_ITEMS_LOCATION, api_version());
    spec.query.add_string("shelvesetId", Some(shelveset_id));
    spec
}

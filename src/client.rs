//! TFVC main client.
//!
//! Provides the primary interface for talking to the Team Foundation
//! Version Control web API of a project collection.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::{
    BranchesClient, ChangesetsClient, ItemsClient, LabelsClient, ProjectsClient, ShelvesetsClient,
};
use crate::credentials::Credentials;
use crate::error::Error;
use crate::transport::{HttpTransport, RetryConfig};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main client for the TFVC web API.
///
/// Aggregates all resource clients over one shared transport.
///
/// # Example
///
/// ```rust,ignore
/// use tfvc_client::{Credentials, TfvcClient};
///
/// let client = TfvcClient::new(
///     "https://tfs.example.com/DefaultCollection",
///     Credentials::pat("token"),
///     None,
///     None,
/// )?;
///
/// let branches = client.branches().get_branches(None, None, None, None, None).await?;
/// let item = client
///     .items()
///     .get_item_text(None, "$/Fabrikam/Main/program.cs", &Default::default())
///     .await?;
/// ```
pub struct TfvcClient {
    transport: Arc<HttpTransport>,
    branches: BranchesClient,
    changesets: ChangesetsClient,
    items: ItemsClient,
    labels: LabelsClient,
    shelvesets: ShelvesetsClient,
    projects: ProjectsClient,
}

impl TfvcClient {
    /// Create a new TFVC client.
    ///
    /// # Arguments
    ///
    /// * `collection_url` - Project collection URL (e.g.
    ///   "<https://tfs.example.com/DefaultCollection>")
    /// * `credentials` - Credentials applied to every request
    /// * `timeout` - Request timeout (default: 30 seconds)
    /// * `retry_config` - Configuration for retry behavior (optional)
    ///
    /// # Errors
    ///
    /// Returns an error if the collection URL is invalid or the HTTP
    /// transport cannot be created.
    pub fn new(
        collection_url: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let timeout = timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(
            collection_url,
            credentials,
            timeout,
            retry_config,
        )?);

        Ok(Self {
            branches: BranchesClient::new(Arc::clone(&transport)),
            changesets: ChangesetsClient::new(Arc::clone(&transport)),
            items: ItemsClient::new(Arc::clone(&transport)),
            labels: LabelsClient::new(Arc::clone(&transport)),
            shelvesets: ShelvesetsClient::new(Arc::clone(&transport)),
            projects: ProjectsClient::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `TFVC_COLLECTION_URL` - Project collection URL (required)
    /// * `TFVC_PAT` - Personal access token (optional)
    /// * `TFVC_USERNAME` / `TFVC_PASSWORD` - Basic credentials, used when
    ///   no token is set (optional)
    /// * `TFVC_TIMEOUT_SECS` - Request timeout in seconds (optional)
    ///
    /// When neither a token nor basic credentials are set the client is
    /// anonymous.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, Error> {
        let collection_url = env::var("TFVC_COLLECTION_URL").map_err(|_| {
            Error::Configuration("TFVC_COLLECTION_URL environment variable not set".to_string())
        })?;

        let credentials = match env::var("TFVC_PAT") {
            Ok(token) => Credentials::pat(token),
            Err(_) => match (env::var("TFVC_USERNAME"), env::var("TFVC_PASSWORD")) {
                (Ok(username), Ok(password)) => Credentials::basic(username, password),
                _ => Credentials::anonymous(),
            },
        };

        let timeout = match env::var("TFVC_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(secs.parse::<u64>().map_err(|_| {
                Error::Configuration(format!("invalid TFVC_TIMEOUT_SECS: {secs}"))
            })?)),
            Err(_) => None,
        };

        Self::new(&collection_url, credentials, timeout, None)
    }

    /// Get the collection URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Get the underlying HTTP transport (for advanced use cases).
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Check whether an authenticated round-trip to the collection works.
    pub async fn check_connection(&self) -> bool {
        self.transport.check_connection().await
    }

    /// Get the branches client.
    #[must_use]
    pub fn branches(&self) -> &BranchesClient {
        &self.branches
    }

    /// Get the changesets client.
    #[must_use]
    pub fn changesets(&self) -> &ChangesetsClient {
        &self.changesets
    }

    /// Get the items client.
    #[must_use]
    pub fn items(&self) -> &ItemsClient {
        &self.items
    }

    /// Get the labels client.
    #[must_use]
    pub fn labels(&self) -> &LabelsClient {
        &self.labels
    }

    /// Get the shelvesets client.
    #[must_use]
    pub fn shelvesets(&self) -> &ShelvesetsClient {
        &self.shelvesets
    }

    /// Get the projects client.
    #[must_use]
    pub fn projects(&self) -> &ProjectsClient {
        &self.projects
    }
}

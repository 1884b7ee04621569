//! Typed Rust client for the Team Foundation Version Control (TFVC)
//! REST API.
//!
//! Each operation method builds a declarative request (operation id, route
//! values, query parameters, API version, response content type) and
//! delegates execution, serialization, retry, and error translation to a
//! shared transport.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tfvc_client::{Credentials, TfvcClient};
//!
//! # async fn run() -> Result<(), tfvc_client::Error> {
//! let client = TfvcClient::new(
//!     "https://tfs.example.com/DefaultCollection",
//!     Credentials::pat("personal-access-token"),
//!     None,
//!     None,
//! )?;
//!
//! let changesets = client
//!     .changesets()
//!     .get_changesets(None, &Default::default())
//!     .await?;
//! println!("{} changesets", changesets.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod clients;
pub mod credentials;
pub mod error;
pub mod locations;
mod request;
pub mod transport;
pub mod types;
pub mod version;

// Re-exports
pub use client::TfvcClient;
pub use clients::{
    BranchesClient, ChangesetsClient, GetChangesetOptions, GetItemOptions, ItemsClient,
    LabelsClient, ProjectsClient, ShelvesetsClient,
};
pub use credentials::Credentials;
pub use error::{Error, ServiceError};
pub use locations::ApiResourceLocation;
pub use transport::{HttpTransport, RetryConfig};
pub use types::{
    AssociatedWorkItem, ChangesetSearchCriteria, ChangesetsRequestData, CheckinNote, IdentityRef,
    ItemContentMetadata, ItemDescriptor, ItemRequestData, LabelRequestData, PolicyFailureInfo,
    PolicyOverrideInfo, Project, RecursionLevel, ShelvesetRequestData, TeamProjectReference,
    TfvcBranch, TfvcBranchMapping, TfvcBranchRef, TfvcChange, TfvcChangeset, TfvcChangesetRef,
    TfvcItem, TfvcLabel, TfvcLabelRef, TfvcMergeSource, TfvcShallowBranchRef, TfvcShelveset,
    TfvcShelvesetRef, VersionControlProjectInfo, VersionDescriptor, VersionOption, VersionType,
};
pub use version::ApiVersion;

//! Data contracts for the TFVC web API.
//!
//! These are pass-through shapes defined by the service; this layer
//! enforces no invariants of its own.

pub mod branches;
pub mod changesets;
pub mod core;
pub mod items;
pub mod labels;
pub mod projects;
pub mod shelvesets;

// Re-exports
pub use branches::{TfvcBranch, TfvcBranchMapping, TfvcBranchRef, TfvcShallowBranchRef};
pub use changesets::{
    ChangesetSearchCriteria, ChangesetsRequestData, CheckinNote, PolicyFailureInfo,
    PolicyOverrideInfo, TfvcChange, TfvcChangeset, TfvcChangesetRef, TfvcMergeSource,
};
pub use core::{AssociatedWorkItem, IdentityRef, Project, TeamProjectReference};
pub use items::{
    ItemContentMetadata, ItemDescriptor, ItemRequestData, RecursionLevel, TfvcItem,
    VersionDescriptor, VersionOption, VersionType,
};
pub use labels::{LabelRequestData, TfvcLabel, TfvcLabelRef};
pub use projects::VersionControlProjectInfo;
pub use shelvesets::{ShelvesetRequestData, TfvcShelveset, TfvcShelvesetRef};

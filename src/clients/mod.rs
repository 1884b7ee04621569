//! Resource clients for the TFVC web API.

pub mod branches;
pub mod changesets;
pub mod items;
pub mod labels;
pub mod projects;
pub mod shelvesets;

// Re-exports
pub use branches::BranchesClient;
pub use changesets::{ChangesetsClient, GetChangesetOptions};
pub use items::{GetItemOptions, ItemsClient};
pub use labels::LabelsClient;
pub use projects::ProjectsClient;
pub use shelvesets::ShelvesetsClient;

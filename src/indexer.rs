//! Workspace discovery and loading of catalog files.
pub mod types;
pub mod workspace;

pub use types::{
    IndexerError,
    LoadFailure,
};
pub use workspace::{
    WorkspaceIndexer,
    default_num_threads,
};

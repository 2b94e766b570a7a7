mod fs;
mod memory;

pub use fs::FsInspector;
pub use memory::MemoryInspector;

use thiserror::Error;

/// Error raised when an inspector cannot answer a query
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InspectorError {
    #[error("path escapes the repository root: {0}")]
    OutsideRoot(String),

    #[error("{path} is not valid UTF-8 text")]
    NotText { path: String },

    #[error("cannot inspect {path}: {reason}")]
    Unavailable { path: String, reason: String },
}

/// Read-only view of the repository under evaluation.
///
/// Paths are relative to the repository root and use `/` as separator.
/// Implementations must be safe to share across evaluation tasks.
pub trait RepositoryInspector: Send + Sync {
    /// Whether `path` names an existing regular file
    fn file_exists(&self, path: &str) -> Result<bool, InspectorError>;

    /// Whether `path` names an existing directory
    fn dir_exists(&self, path: &str) -> Result<bool, InspectorError>;

    /// Contents of the file at `path`, or `None` if it does not exist
    fn read_file(&self, path: &str) -> Result<Option<String>, InspectorError>;
}

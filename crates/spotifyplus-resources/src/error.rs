//! Error types for response resource lookups
//!
//! These errors never reach callers of [`crate::ResponseResolver::resolve`];
//! they are turned into diagnostic text there. They are public for callers
//! that want the raw lookup via [`crate::ResponseResolver::find_template`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type for response resource operations
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failures while locating response text
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Language directory missing or not a directory
    #[error("response resource directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Language directory could not be listed
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A response document could not be read
    #[error("failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A response document is not valid YAML
    #[error("failed to parse YAML in {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The blocking lookup task panicked or was cancelled
    #[error("response lookup task failed: {message}")]
    TaskFailed { message: String },
}

impl ResolveError {
    /// True for errors that mean the language directory is unusable
    pub fn is_directory_error(&self) -> bool {
        matches!(self, Self::DirectoryNotFound { .. } | Self::ReadDir { .. })
    }
}

use git2::Oid;
use thiserror::Error;

/// Unified error type for release-range operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag '{tag}' points at commit {target}, which is not reachable from HEAD")]
    TagNotInHistory { tag: String, target: Oid },

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-range
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseError::Repository(msg.into())
    }

    /// Create an editor error with context
    pub fn editor(msg: impl Into<String>) -> Self {
        ReleaseError::Editor(msg.into())
    }

    /// True when the selected release tag cannot serve as a baseline
    pub fn is_tag_not_in_history(&self) -> bool {
        matches!(self, ReleaseError::TagNotInHistory { .. })
    }
}

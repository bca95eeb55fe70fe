//! Error taxonomy for filesystem operations.

use thiserror::Error;

/// Result type for VFS operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors from VFS operations.
///
/// Each variant carries the absolute path it concerns. Builtins report the
/// path the user typed instead, so they format errors with
/// [`VfsError::unix_message`] rather than `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("is a directory: {0}")]
    IsADirectory(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("filesystem lock poisoned")]
    Poisoned,
}

impl VfsError {
    /// The message a Unix coreutil prints for this condition.
    pub fn unix_message(&self) -> &'static str {
        match self {
            VfsError::NotFound(_) => "No such file or directory",
            VfsError::NotADirectory(_) => "Not a directory",
            VfsError::IsADirectory(_) => "Is a directory",
            VfsError::AlreadyExists(_) => "File exists",
            VfsError::PermissionDenied(_) => "Permission denied",
            VfsError::InvalidMode(_) => "invalid mode",
            VfsError::InvalidPath(_) => "Invalid argument",
            VfsError::InvalidSnapshot(_) => "invalid filesystem document",
            VfsError::Poisoned => "Input/output error",
        }
    }

    /// True for the not-found case (`rm -f` and `touch` tolerate it).
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}

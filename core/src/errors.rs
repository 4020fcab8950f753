//! Error types for the filechooser core crate.
//!
//! Read-only queries on [`FileSystemView`](crate::view::FileSystemView) never
//! surface these; they substitute a default and report it through
//! [`Lookup`](crate::view::Lookup). Mutating operations (folder creation,
//! rename) return them so the frontend can show the failure.

use thiserror::Error;

/// Convenience alias used by providers and mutating view operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Top-level error type encompassing all core error categories.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A virtual-filesystem error.
    #[error("VFS error: {0}")]
    Vfs(#[from] VfsError),

    /// A configuration error (invalid values, missing fields, parse failures).
    #[error("Config error: {0}")]
    Config(String),

    /// A low-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by virtual-filesystem providers and mutating view operations.
#[derive(Error, Debug)]
pub enum VfsError {
    /// The provider call itself failed (I/O error, protocol error, lock poisoned).
    #[error("Backend fault: {0}")]
    BackendFault(String),

    /// The requested file, directory or parent does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The target already exists and no free name could be found.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The provider does not implement this optional capability.
    #[error("Operation not supported: {0}")]
    Unsupported(String),

    /// The string could not be parsed as a resource locator.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// A low-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VfsError {
    /// Map a `std::io::Error` to a `VfsError` based on its kind.
    pub fn from_io(e: std::io::Error, path: &str) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => VfsError::AlreadyExists(path.to_string()),
            std::io::ErrorKind::Unsupported => VfsError::Unsupported(path.to_string()),
            _ => VfsError::BackendFault(format!("{path}: {e}")),
        }
    }
}

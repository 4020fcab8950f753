//! Virtual-filesystem abstraction.
//!
//! Each backend (local disk, SFTP, in-memory) implements [`VfsProvider`].
//! The [`FileSystemManager`](manager::FileSystemManager) routes a
//! [`FileObject`] to the provider registered for its scheme, so nothing above
//! this module depends on a concrete backend type.

pub mod local;
pub mod manager;
pub mod memory;
#[cfg(feature = "sftp")]
pub mod sftp;
pub mod uri;

use std::hash::{Hash, Hasher};
use std::time::SystemTime;

use crate::errors::VfsResult;

pub use manager::FileSystemManager;
pub use uri::VfsUri;

/// Attribute snapshot of an entry, captured when the provider already had it
/// at hand (typically while listing a directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttrs {
    /// Whether the entry can have children.
    pub is_container: bool,
    /// Size in bytes; `0` for containers.
    pub size: u64,
    /// Last modification time, when the backend reports one.
    pub modified: Option<SystemTime>,
}

/// Handle to an entry in a virtual filesystem.
///
/// Handles are cheap values: a locator plus an optional attribute snapshot.
/// Equality and hashing only consider the locator.
#[derive(Debug, Clone)]
pub struct FileObject {
    uri: VfsUri,
    attrs: Option<FileAttrs>,
}

impl FileObject {
    pub fn new(uri: VfsUri) -> Self {
        Self { uri, attrs: None }
    }

    pub fn with_attrs(uri: VfsUri, attrs: FileAttrs) -> Self {
        Self {
            uri,
            attrs: Some(attrs),
        }
    }

    pub fn uri(&self) -> &VfsUri {
        &self.uri
    }

    pub fn attrs(&self) -> Option<&FileAttrs> {
        self.attrs.as_ref()
    }

    /// Last path segment; empty for a root.
    pub fn base_name(&self) -> &str {
        self.uri.base_name()
    }

    pub fn scheme(&self) -> &str {
        self.uri.scheme()
    }

    /// Drop the attribute snapshot, forcing fresh provider queries.
    pub fn without_attrs(&self) -> Self {
        Self::new(self.uri.clone())
    }
}

impl PartialEq for FileObject {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for FileObject {}

impl Hash for FileObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl From<VfsUri> for FileObject {
    fn from(uri: VfsUri) -> Self {
        Self::new(uri)
    }
}

/// Children of a directory. Each entry is fallible on its own so a single
/// unreadable entry does not fail the whole listing.
pub type ChildEntries = Vec<VfsResult<FileObject>>;

/// Capability set every virtual-filesystem backend provides.
///
/// Providers are shared across threads behind an `Arc`, so all methods take
/// `&self` and implementations guard their own mutable state.
pub trait VfsProvider: Send + Sync {
    /// The URI scheme this provider serves, e.g. `"sftp"`.
    fn scheme(&self) -> &str;

    /// Whether this provider exposes the machine's own disks.
    fn is_local(&self) -> bool {
        false
    }

    /// Resolve a locator to a handle. The entry does not need to exist.
    fn resolve(&self, uri: &VfsUri) -> VfsResult<FileObject> {
        Ok(FileObject::new(uri.clone()))
    }

    /// List the children of a container.
    fn children(&self, dir: &FileObject) -> VfsResult<ChildEntries>;

    /// Containing directory, `None` at the root.
    fn parent(&self, file: &FileObject) -> VfsResult<Option<FileObject>> {
        Ok(file.uri().parent().map(FileObject::new))
    }

    /// Resolve `name` relative to `dir`.
    fn resolve_child(&self, dir: &FileObject, name: &str) -> VfsResult<FileObject> {
        self.resolve(&dir.uri().join(name))
    }

    fn exists(&self, file: &FileObject) -> VfsResult<bool>;

    /// Fetch fresh attributes for an entry.
    fn stat(&self, file: &FileObject) -> VfsResult<FileAttrs>;

    fn size(&self, file: &FileObject) -> VfsResult<u64> {
        self.stat(file).map(|attrs| attrs.size)
    }

    fn last_modified(&self, file: &FileObject) -> VfsResult<Option<SystemTime>> {
        self.stat(file).map(|attrs| attrs.modified)
    }

    fn is_container(&self, file: &FileObject) -> VfsResult<bool> {
        self.stat(file).map(|attrs| attrs.is_container)
    }

    /// Create a folder at the handle's location.
    fn create_folder(&self, file: &FileObject) -> VfsResult<()>;

    /// Rename or move an entry within this provider.
    fn rename(&self, from: &FileObject, to: &FileObject) -> VfsResult<()>;

    /// Filesystem roots reachable from `file`: the single root of its own
    /// filesystem unless the provider knows better.
    fn roots(&self, file: &FileObject) -> VfsResult<Vec<FileObject>> {
        Ok(vec![FileObject::new(file.uri().root())])
    }
}

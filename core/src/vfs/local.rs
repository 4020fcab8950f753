//! Local disk provider for the `file` scheme.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::uri::{VfsUri, FILE_SCHEME};
use super::{ChildEntries, FileAttrs, FileObject, VfsProvider};
use crate::errors::{VfsError, VfsResult};

/// Provider backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }

    fn local_path(file: &FileObject) -> VfsResult<PathBuf> {
        file.uri()
            .to_local_path()
            .ok_or_else(|| VfsError::InvalidUri(file.uri().to_string()))
    }
}

fn attrs_from_metadata(metadata: &Metadata) -> FileAttrs {
    let is_container = metadata.is_dir();
    FileAttrs {
        is_container,
        size: if is_container { 0 } else { metadata.len() },
        modified: metadata.modified().ok(),
    }
}

impl VfsProvider for LocalProvider {
    fn scheme(&self) -> &str {
        FILE_SCHEME
    }

    fn is_local(&self) -> bool {
        true
    }

    fn children(&self, dir: &FileObject) -> VfsResult<ChildEntries> {
        let path = Self::local_path(dir)?;
        let shown = path.display().to_string();
        let entries = std::fs::read_dir(&path).map_err(|e| VfsError::from_io(e, &shown))?;

        let mut result = Vec::new();
        for entry in entries {
            let child = entry
                .map_err(|e| VfsError::from_io(e, &shown))
                .and_then(|entry| {
                    let name = entry.file_name().to_string_lossy().to_string();
                    // `DirEntry::metadata` does not follow symlinks; `fs::metadata` does.
                    let metadata = std::fs::metadata(entry.path())
                        .map_err(|e| VfsError::from_io(e, &entry.path().display().to_string()))?;
                    Ok(FileObject::with_attrs(
                        dir.uri().join(&name),
                        attrs_from_metadata(&metadata),
                    ))
                });
            result.push(child);
        }

        debug!(path = %shown, count = result.len(), "Listed local directory");
        Ok(result)
    }

    fn exists(&self, file: &FileObject) -> VfsResult<bool> {
        let path = Self::local_path(file)?;
        path.try_exists()
            .map_err(|e| VfsError::from_io(e, &path.display().to_string()))
    }

    fn stat(&self, file: &FileObject) -> VfsResult<FileAttrs> {
        let path = Self::local_path(file)?;
        let metadata = std::fs::metadata(&path)
            .map_err(|e| VfsError::from_io(e, &path.display().to_string()))?;
        Ok(attrs_from_metadata(&metadata))
    }

    fn create_folder(&self, file: &FileObject) -> VfsResult<()> {
        let path = Self::local_path(file)?;
        std::fs::create_dir(&path).map_err(|e| VfsError::from_io(e, &path.display().to_string()))
    }

    fn rename(&self, from: &FileObject, to: &FileObject) -> VfsResult<()> {
        let old = Self::local_path(from)?;
        let new = Self::local_path(to)?;
        std::fs::rename(&old, &new).map_err(|e| VfsError::from_io(e, &old.display().to_string()))
    }

    fn roots(&self, _file: &FileObject) -> VfsResult<Vec<FileObject>> {
        list_drive_roots()
            .into_iter()
            .map(|root| VfsUri::from_local_path(&root).map(FileObject::new))
            .collect()
    }
}

/// Drive roots of this machine.
#[cfg(windows)]
fn list_drive_roots() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|root| root.exists())
        .collect()
}

/// Drive roots of this machine.
#[cfg(not(windows))]
fn list_drive_roots() -> Vec<PathBuf> {
    vec![Path::new("/").to_path_buf()]
}

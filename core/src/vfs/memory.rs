//! In-memory provider for the `ram` scheme.
//!
//! Useful for scratch trees and for exercising frontends without touching
//! the disk. The tree is shared: every handle resolved through the same
//! provider sees the same entries, regardless of the URI authority.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::SystemTime;

use super::uri::VfsUri;
use super::{ChildEntries, FileAttrs, FileObject, VfsProvider};
use crate::errors::{VfsError, VfsResult};

/// Scheme served by [`MemoryProvider`].
pub const RAM_SCHEME: &str = "ram";

#[derive(Debug, Clone, Copy)]
struct Node {
    is_container: bool,
    size: u64,
    modified: SystemTime,
}

impl Node {
    fn folder() -> Self {
        Self {
            is_container: true,
            size: 0,
            modified: SystemTime::now(),
        }
    }

    fn attrs(&self) -> FileAttrs {
        FileAttrs {
            is_container: self.is_container,
            size: self.size,
            modified: Some(self.modified),
        }
    }
}

/// Provider keeping a directory tree in memory.
///
/// Nodes are keyed by normalized path; the root `/` always exists.
#[derive(Debug)]
pub struct MemoryProvider {
    nodes: RwLock<BTreeMap<String, Node>>,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::folder());
        Self {
            nodes: RwLock::new(nodes),
        }
    }

    fn read(&self) -> VfsResult<std::sync::RwLockReadGuard<'_, BTreeMap<String, Node>>> {
        self.nodes
            .read()
            .map_err(|e| VfsError::BackendFault(format!("Failed to lock memory tree: {e}")))
    }

    fn write(&self) -> VfsResult<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Node>>> {
        self.nodes
            .write()
            .map_err(|e| VfsError::BackendFault(format!("Failed to lock memory tree: {e}")))
    }

    fn uri_for(path: &str) -> VfsResult<VfsUri> {
        let path = path.trim_start_matches('/');
        VfsUri::parse(&format!("{RAM_SCHEME}:///{path}"))
    }

    /// Create a folder and any missing ancestors. Existing folders are kept.
    pub fn create_folders(&self, path: &str) -> VfsResult<FileObject> {
        let uri = Self::uri_for(path)?;
        let mut nodes = self.write()?;
        let mut current = Some(uri.clone());
        let mut missing = Vec::new();
        while let Some(u) = current {
            match nodes.get(u.path()) {
                Some(node) if node.is_container => break,
                Some(_) => return Err(VfsError::AlreadyExists(u.to_string())),
                None => {
                    missing.push(u.path().to_string());
                    current = u.parent();
                }
            }
        }
        for p in missing {
            nodes.insert(p, Node::folder());
        }
        Ok(FileObject::new(uri))
    }

    /// Create (or overwrite) a file of the given size. The parent folder must exist.
    pub fn create_file(&self, path: &str, size: u64, modified: SystemTime) -> VfsResult<FileObject> {
        let uri = Self::uri_for(path)?;
        let mut nodes = self.write()?;
        let parent = uri
            .parent()
            .ok_or_else(|| VfsError::AlreadyExists(uri.to_string()))?;
        match nodes.get(parent.path()) {
            Some(node) if node.is_container => {}
            _ => return Err(VfsError::NotFound(parent.to_string())),
        }
        if nodes.get(uri.path()).is_some_and(|n| n.is_container) {
            return Err(VfsError::AlreadyExists(uri.to_string()));
        }
        nodes.insert(
            uri.path().to_string(),
            Node {
                is_container: false,
                size,
                modified,
            },
        );
        Ok(FileObject::new(uri))
    }

    fn lookup(&self, file: &FileObject) -> VfsResult<Node> {
        self.read()?
            .get(file.uri().path())
            .copied()
            .ok_or_else(|| VfsError::NotFound(file.uri().to_string()))
    }
}

impl VfsProvider for MemoryProvider {
    fn scheme(&self) -> &str {
        RAM_SCHEME
    }

    fn children(&self, dir: &FileObject) -> VfsResult<ChildEntries> {
        let nodes = self.read()?;
        match nodes.get(dir.uri().path()) {
            Some(node) if node.is_container => {}
            Some(_) => {
                return Err(VfsError::BackendFault(format!(
                    "{} is not a folder",
                    dir.uri()
                )))
            }
            None => return Err(VfsError::NotFound(dir.uri().to_string())),
        }

        let entries: ChildEntries = nodes
            .iter()
            .filter(|(path, _)| path.as_str() != "/")
            .filter_map(|(path, node)| {
                let child = dir.uri().join(path);
                let is_direct_child = child.parent().is_some_and(|p| p.path() == dir.uri().path());
                is_direct_child.then(|| Ok(FileObject::with_attrs(child, node.attrs())))
            })
            .collect();
        Ok(entries)
    }

    fn exists(&self, file: &FileObject) -> VfsResult<bool> {
        Ok(self.read()?.contains_key(file.uri().path()))
    }

    fn stat(&self, file: &FileObject) -> VfsResult<FileAttrs> {
        self.lookup(file).map(|node| node.attrs())
    }

    fn create_folder(&self, file: &FileObject) -> VfsResult<()> {
        let mut nodes = self.write()?;
        if nodes.contains_key(file.uri().path()) {
            return Err(VfsError::AlreadyExists(file.uri().to_string()));
        }
        let parent = file
            .uri()
            .parent()
            .ok_or_else(|| VfsError::AlreadyExists(file.uri().to_string()))?;
        if !nodes.get(parent.path()).is_some_and(|n| n.is_container) {
            return Err(VfsError::NotFound(parent.to_string()));
        }
        nodes.insert(file.uri().path().to_string(), Node::folder());
        Ok(())
    }

    fn rename(&self, from: &FileObject, to: &FileObject) -> VfsResult<()> {
        let mut nodes = self.write()?;
        let old = from.uri().path().to_string();
        let new = to.uri().path().to_string();
        if from.uri().is_root() {
            return Err(VfsError::Unsupported(format!(
                "cannot rename the root {}",
                from.uri()
            )));
        }
        if !nodes.contains_key(&old) {
            return Err(VfsError::NotFound(from.uri().to_string()));
        }
        if nodes.contains_key(&new) {
            return Err(VfsError::AlreadyExists(to.uri().to_string()));
        }
        if new.starts_with(&format!("{old}/")) {
            return Err(VfsError::BackendFault(format!(
                "cannot move {} into itself",
                from.uri()
            )));
        }
        let parent = to
            .uri()
            .parent()
            .ok_or_else(|| VfsError::AlreadyExists(to.uri().to_string()))?;
        if !nodes.get(parent.path()).is_some_and(|n| n.is_container) {
            return Err(VfsError::NotFound(parent.to_string()));
        }

        // Move the node and its whole subtree.
        let prefix = format!("{old}/");
        let moved: Vec<String> = nodes
            .keys()
            .filter(|k| **k == old || k.starts_with(&prefix))
            .cloned()
            .collect();
        for key in moved {
            if let Some(node) = nodes.remove(&key) {
                let renamed = format!("{new}{}", &key[old.len()..]);
                nodes.insert(renamed, node);
            }
        }
        Ok(())
    }
}

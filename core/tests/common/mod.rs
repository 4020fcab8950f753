//! Shared test utilities for filechooser-core integration tests.
//!
//! Provides a fault-injecting provider stub, view/manager builders and the
//! Docker availability check used by the SFTP tests.

// Each integration test is compiled as its own crate, so not every test file
// uses every function from this shared module. Suppress dead_code warnings.
#![allow(dead_code)]

use std::collections::HashSet;
use std::net::TcpStream;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use filechooser_core::config::ChooserConfig;
use filechooser_core::errors::{VfsError, VfsResult};
use filechooser_core::vfs::memory::{MemoryProvider, RAM_SCHEME};
use filechooser_core::vfs::{ChildEntries, FileAttrs, FileObject, FileSystemManager, VfsProvider};
use filechooser_core::view::FileSystemView;

/// Check if a TCP port is reachable on the given host.
///
/// Returns `true` if a TCP connection can be established within 2 seconds.
pub fn is_port_reachable(host: &str, port: u16) -> bool {
    let addr = format!("{host}:{port}");
    if let Ok(addr) = addr.parse() {
        TcpStream::connect_timeout(&addr, Duration::from_secs(2)).is_ok()
    } else {
        false
    }
}

/// Skip the current test if a Docker container is not reachable on the given port.
///
/// Prints a message to stderr and returns early (runtime check instead of `#[ignore]`).
macro_rules! require_docker {
    ($port:expr) => {
        if !common::is_port_reachable("127.0.0.1", $port) {
            eprintln!(
                "SKIPPED: Docker container not reachable on port {} \
                 (start with: docker compose -f tests/docker/docker-compose.yml up -d, from the workspace root)",
                $port
            );
            return;
        }
    };
}
pub(crate) use require_docker;

/// SFTP test container (user `testuser`, password `testpass`).
pub const PORT_SFTP: u16 = 2210;

/// `ram` provider wrapping a [`MemoryProvider`] that fails on request.
///
/// Listings never carry attribute snapshots, so every attribute question
/// reaches [`VfsProvider::stat`] and can be made to fault.
pub struct FaultyProvider {
    inner: MemoryProvider,
    broken_stat: RwLock<HashSet<String>>,
    broken_entries: RwLock<HashSet<String>>,
    broken_listings: RwLock<HashSet<String>>,
    broken_exists: RwLock<HashSet<String>>,
    fail_create: RwLock<bool>,
}

fn fault(what: &str, path: &str) -> VfsError {
    VfsError::BackendFault(format!("injected {what} fault: {path}"))
}

impl FaultyProvider {
    pub fn new() -> Self {
        Self {
            inner: MemoryProvider::new(),
            broken_stat: RwLock::new(HashSet::new()),
            broken_entries: RwLock::new(HashSet::new()),
            broken_listings: RwLock::new(HashSet::new()),
            broken_exists: RwLock::new(HashSet::new()),
            fail_create: RwLock::new(false),
        }
    }

    /// The wrapped tree, for seeding entries.
    pub fn tree(&self) -> &MemoryProvider {
        &self.inner
    }

    /// Attribute queries on `path` fail.
    pub fn break_stat(&self, path: &str) {
        self.broken_stat.write().unwrap().insert(path.to_string());
    }

    /// `path` shows up as a failed entry when its parent is listed.
    pub fn break_entry(&self, path: &str) {
        self.broken_entries.write().unwrap().insert(path.to_string());
    }

    /// Listing the directory at `path` fails as a whole.
    pub fn break_listing(&self, path: &str) {
        self.broken_listings.write().unwrap().insert(path.to_string());
    }

    /// Existence checks on `path` fail.
    pub fn break_exists(&self, path: &str) {
        self.broken_exists.write().unwrap().insert(path.to_string());
    }

    /// Every folder creation fails.
    pub fn break_create(&self) {
        *self.fail_create.write().unwrap() = true;
    }

    fn is_broken(set: &RwLock<HashSet<String>>, file: &FileObject) -> bool {
        set.read().unwrap().contains(file.uri().path())
    }
}

impl VfsProvider for FaultyProvider {
    fn scheme(&self) -> &str {
        RAM_SCHEME
    }

    fn children(&self, dir: &FileObject) -> VfsResult<ChildEntries> {
        if Self::is_broken(&self.broken_listings, dir) {
            return Err(fault("listing", dir.uri().path()));
        }
        let entries = self.inner.children(dir)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let file = entry?.without_attrs();
                if Self::is_broken(&self.broken_entries, &file) {
                    Err(fault("entry", file.uri().path()))
                } else {
                    Ok(file)
                }
            })
            .collect())
    }

    fn exists(&self, file: &FileObject) -> VfsResult<bool> {
        if Self::is_broken(&self.broken_exists, file) {
            return Err(fault("exists", file.uri().path()));
        }
        self.inner.exists(file)
    }

    fn stat(&self, file: &FileObject) -> VfsResult<FileAttrs> {
        if Self::is_broken(&self.broken_stat, file) {
            return Err(fault("stat", file.uri().path()));
        }
        self.inner.stat(file)
    }

    fn create_folder(&self, file: &FileObject) -> VfsResult<()> {
        if *self.fail_create.read().unwrap() {
            return Err(fault("create", file.uri().path()));
        }
        self.inner.create_folder(file)
    }

    fn rename(&self, from: &FileObject, to: &FileObject) -> VfsResult<()> {
        self.inner.rename(from, to)
    }
}

/// A view whose only provider is `provider`.
pub fn view_over(provider: Arc<dyn VfsProvider>, config: &ChooserConfig) -> FileSystemView {
    let mut manager = FileSystemManager::new();
    manager.register(provider);
    FileSystemView::new(Arc::new(manager), config)
}

/// A view over a fresh [`FaultyProvider`].
pub fn faulty_view() -> (FileSystemView, Arc<FaultyProvider>) {
    let provider = Arc::new(FaultyProvider::new());
    let view = view_over(provider.clone(), &ChooserConfig::default());
    (view, provider)
}

/// Base names of `files`, in order.
pub fn names(files: &[FileObject]) -> Vec<String> {
    files.iter().map(|f| f.base_name().to_string()).collect()
}

//! Scheme → provider routing.
//!
//! A [`FileSystemManager`] is built once and handed (usually as an `Arc`) to
//! every component that needs filesystem access. Tests build their own
//! manager around stub providers instead of swapping a global.
//!
//! # Example
//!
//! ```ignore
//! let mut manager = FileSystemManager::new();
//! manager.register(Arc::new(MemoryProvider::new()));
//!
//! let dir = manager.resolve("ram:///projects")?;
//! let provider = manager.provider_for(&dir)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::local::LocalProvider;
use super::memory::MemoryProvider;
use super::uri::VfsUri;
use super::{FileObject, VfsProvider};
use crate::config::ChooserConfig;
use crate::errors::{VfsError, VfsResult};

/// Registry of providers keyed by URI scheme.
pub struct FileSystemManager {
    providers: HashMap<String, Arc<dyn VfsProvider>>,
    /// Insertion order for deterministic iteration.
    order: Vec<String>,
}

impl FileSystemManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a manager with every built-in provider registered:
    /// `file`, `ram` and, with the `sftp` feature, `sftp`.
    pub fn with_defaults(config: &ChooserConfig) -> Self {
        let mut manager = Self::new();
        manager.register(Arc::new(LocalProvider::new()));
        manager.register(Arc::new(MemoryProvider::new()));
        #[cfg(feature = "sftp")]
        manager.register(Arc::new(super::sftp::SftpProvider::new(
            config.sftp.clone().expand(),
        )));
        #[cfg(not(feature = "sftp"))]
        let _ = config;
        manager
    }

    /// Register a provider under its scheme, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn VfsProvider>) {
        let scheme = provider.scheme().to_ascii_lowercase();
        debug!(%scheme, "Registering VFS provider");
        if !self.providers.contains_key(&scheme) {
            self.order.push(scheme.clone());
        }
        self.providers.insert(scheme, provider);
    }

    /// Registered schemes, in registration order.
    pub fn schemes(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.providers.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Provider registered for `scheme`.
    pub fn provider(&self, scheme: &str) -> VfsResult<&Arc<dyn VfsProvider>> {
        self.providers
            .get(&scheme.to_ascii_lowercase())
            .ok_or_else(|| VfsError::Unsupported(format!("No provider for scheme: {scheme}")))
    }

    /// Provider serving `file`.
    pub fn provider_for(&self, file: &FileObject) -> VfsResult<&Arc<dyn VfsProvider>> {
        self.provider(file.scheme())
    }

    /// Resolve a URI or local path to a handle.
    pub fn resolve(&self, input: &str) -> VfsResult<FileObject> {
        let uri = VfsUri::parse(input)?;
        self.provider(uri.scheme())?.resolve(&uri)
    }
}

impl Default for FileSystemManager {
    fn default() -> Self {
        Self::new()
    }
}

//! Chooser-facing adapter over the virtual filesystem.
//!
//! [`FileSystemView`] answers the questions a file-chooser widget asks
//! (what is in this folder, is this a directory, how big is it, what should
//! the row say) and performs the two mutations it needs (new folder, rename).
//! Read-only questions never fail: a provider fault is logged and a safe
//! default comes back as [`Lookup::Fallback`]. Mutations return
//! [`VfsResult`] so the frontend can tell the user.

pub mod display;
pub mod filter;
pub mod lookup;
pub mod sort;

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::config::ChooserConfig;
use crate::errors::{VfsError, VfsResult};
use crate::messages::{MessageCatalog, MessageSource, NEW_FOLDER, NEW_FOLDER_SUBSEQUENT};
use crate::vfs::{FileObject, FileSystemManager, VfsProvider, VfsUri};

pub use lookup::Lookup;

/// Synchronous file-chooser adapter.
pub struct FileSystemView {
    manager: Arc<FileSystemManager>,
    messages: Arc<dyn MessageSource>,
    exclude_local_prefix: bool,
    max_folder_attempts: u32,
    start_directory: Option<String>,
}

impl FileSystemView {
    pub fn new(manager: Arc<FileSystemManager>, config: &ChooserConfig) -> Self {
        Self {
            manager,
            messages: Arc::new(MessageCatalog::with_overrides(&config.messages)),
            exclude_local_prefix: config.exclude_local_prefix,
            max_folder_attempts: config.max_folder_attempts,
            start_directory: config.start_directory.clone(),
        }
    }

    /// Replace the message source (e.g. with a frontend's translations).
    pub fn with_messages(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.messages = messages;
        self
    }

    pub fn manager(&self) -> &Arc<FileSystemManager> {
        &self.manager
    }

    pub fn messages(&self) -> &dyn MessageSource {
        self.messages.as_ref()
    }

    /// Run a read-only provider query, substituting `default` on any fault,
    /// including a missing provider.
    fn query<T>(
        &self,
        file: &FileObject,
        what: &str,
        default: T,
        op: impl FnOnce(&dyn VfsProvider) -> VfsResult<T>,
    ) -> Lookup<T> {
        let result = self
            .manager
            .provider_for(file)
            .and_then(|provider| op(provider.as_ref()));
        Lookup::from_result(result, default, what)
    }

    // --- Navigation ---

    /// Resolve a URI or a local path.
    pub fn resolve(&self, input: &str) -> VfsResult<FileObject> {
        self.manager.resolve(input)
    }

    pub fn resolve_child(&self, dir: &FileObject, name: &str) -> VfsResult<FileObject> {
        self.manager.provider_for(dir)?.resolve_child(dir, name)
    }

    /// Children of `dir`, containers first, otherwise in provider order.
    ///
    /// Entries that fail on their own are skipped. Unless `include_hidden`
    /// is set, dot-files are dropped. A failed listing yields an empty
    /// fallback.
    pub fn list_children(&self, dir: &FileObject, include_hidden: bool) -> Lookup<Vec<FileObject>> {
        let entries = match self
            .manager
            .provider_for(dir)
            .and_then(|provider| provider.children(dir))
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!(uri = %dir.uri(), "Failed to list directory: {e}");
                return Lookup::Fallback(Vec::new());
            }
        };

        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Ok(file) if include_hidden || !self.is_hidden(&file) => files.push(file),
                Ok(_) => {}
                Err(e) => warn!(uri = %dir.uri(), "Skipping unreadable entry: {e}"),
            }
        }
        files.sort_by(|a, b| sort::directories_first(self, a, b, |_, _| Ordering::Equal));

        debug!(uri = %dir.uri(), count = files.len(), "Listed children");
        Lookup::Resolved(files)
    }

    /// Containing directory; `None` at a root or when the provider fails.
    pub fn parent(&self, file: &FileObject) -> Lookup<Option<FileObject>> {
        self.query(file, "parent", None, |p| p.parent(file))
    }

    /// Filesystem roots reachable from `file`.
    pub fn roots(&self, file: &FileObject) -> Lookup<Vec<FileObject>> {
        self.query(file, "roots", Vec::new(), |p| p.roots(file))
    }

    /// The user's home directory on the local filesystem.
    pub fn home_directory(&self) -> VfsResult<FileObject> {
        let home = dirs::home_dir()
            .ok_or_else(|| VfsError::NotFound("home directory".to_string()))?;
        self.resolve_local(&home)
    }

    /// Where a chooser opens: the configured start directory, else the home
    /// directory, else the process working directory.
    pub fn default_directory(&self) -> VfsResult<FileObject> {
        if let Some(start) = &self.start_directory {
            return self.resolve(start);
        }
        match self.home_directory() {
            Ok(home) => Ok(home),
            Err(_) => {
                let cwd = std::env::current_dir()?;
                self.resolve_local(&cwd)
            }
        }
    }

    fn resolve_local(&self, path: &Path) -> VfsResult<FileObject> {
        let uri = VfsUri::from_local_path(path)?;
        self.manager.provider(uri.scheme())?.resolve(&uri)
    }

    // --- Attribute queries ---

    pub fn exists(&self, file: &FileObject) -> Lookup<bool> {
        self.query(file, "exists", false, |p| p.exists(file))
    }

    /// Size in bytes, `0` on fault.
    pub fn size(&self, file: &FileObject) -> Lookup<u64> {
        if let Some(attrs) = file.attrs() {
            return Lookup::Resolved(attrs.size);
        }
        self.query(file, "size", 0, |p| p.size(file))
    }

    /// Last-modified time, the Unix epoch on fault or when unknown.
    pub fn last_modified(&self, file: &FileObject) -> Lookup<SystemTime> {
        if let Some(attrs) = file.attrs() {
            return Lookup::Resolved(attrs.modified.unwrap_or(UNIX_EPOCH));
        }
        self.query(file, "last_modified", UNIX_EPOCH, |p| {
            p.last_modified(file).map(|t| t.unwrap_or(UNIX_EPOCH))
        })
    }

    /// Whether the entry can have children, `false` on fault.
    pub fn is_container(&self, file: &FileObject) -> Lookup<bool> {
        if let Some(attrs) = file.attrs() {
            return Lookup::Resolved(attrs.is_container);
        }
        self.query(file, "is_container", false, |p| p.is_container(file))
    }

    // --- Naming ---

    /// Base name; empty for a root.
    pub fn name<'a>(&self, file: &'a FileObject) -> &'a str {
        file.base_name()
    }

    /// Full locator string, credentials included.
    pub fn uri(&self, file: &FileObject) -> String {
        file.uri().to_string()
    }

    pub fn is_hidden(&self, file: &FileObject) -> bool {
        self.name(file).starts_with('.')
    }

    /// An entry without a parent. Entries whose parent cannot be determined
    /// count as roots too.
    pub fn is_root(&self, file: &FileObject) -> bool {
        self.parent(file).value().is_none()
    }

    /// Whether `folder` directly contains `file`.
    pub fn is_parent(&self, folder: &FileObject, file: &FileObject) -> bool {
        self.parent(file).value().as_ref() == Some(folder)
    }

    /// Credential-free locator, honoring the configured local-prefix setting.
    pub fn friendly_name(&self, file: &FileObject) -> String {
        display::friendly_name(&file.uri().to_string(), self.exclude_local_prefix)
    }

    /// Row label: the base name, or the friendly locator for a root.
    pub fn display_name(&self, file: &FileObject) -> String {
        let name = self.name(file);
        if name.is_empty() {
            self.friendly_name(file)
        } else {
            name.to_string()
        }
    }

    /// Size label using the view's message source.
    pub fn size_label(&self, file: &FileObject) -> String {
        display::human_size_with(self.messages(), self.size(file).value())
    }

    // --- Mutations ---

    /// Create a fresh folder in `dir` named "New Folder", or
    /// "New Folder (n)" with the first free `n` when that is taken.
    pub fn create_unique_folder(&self, dir: &FileObject) -> VfsResult<FileObject> {
        let provider = self.manager.provider_for(dir)?;

        let mut candidate = provider.resolve_child(dir, &self.messages.format(NEW_FOLDER, &[]))?;
        let mut attempt: u32 = 1;
        while self.exists(&candidate).value() {
            if attempt > self.max_folder_attempts {
                return Err(VfsError::AlreadyExists(format!(
                    "no free folder name in {} after {} attempts",
                    self.friendly_name(dir),
                    self.max_folder_attempts
                )));
            }
            let name = self
                .messages
                .format(NEW_FOLDER_SUBSEQUENT, &[&attempt.to_string()]);
            candidate = provider.resolve_child(dir, &name)?;
            attempt += 1;
        }

        provider.create_folder(&candidate).map_err(|e| match e {
            VfsError::Unsupported(_) | VfsError::BackendFault(_) => e,
            other => VfsError::BackendFault(format!(
                "Failed to create {}: {other}",
                self.friendly_name(&candidate)
            )),
        })?;

        info!(uri = %self.friendly_name(&candidate), "Created folder");
        Ok(candidate)
    }

    /// Rename or move an entry. Both ends must live on the same provider.
    pub fn rename(&self, from: &FileObject, to: &FileObject) -> VfsResult<()> {
        if from.scheme() != to.scheme() {
            return Err(VfsError::Unsupported(format!(
                "rename across schemes: {} -> {}",
                from.scheme(),
                to.scheme()
            )));
        }
        self.manager.provider_for(from)?.rename(from, to)?;
        info!(
            from = %self.friendly_name(from),
            to = %self.friendly_name(to),
            "Renamed entry"
        );
        Ok(())
    }
}

//! Async file browsing facade for frontends running on tokio.
//!
//! [`FileSystemView`] is synchronous and providers may block on the network
//! (SFTP), so [`ViewBrowser`] runs every call on the blocking pool and hands
//! back serializable [`FileEntry`] rows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CoreError, VfsError};
use crate::files::FileEntry;
use crate::view::filter::{filter_files, GlobFilter};
use crate::view::sort::{sort_files, SortOrder};
use crate::view::FileSystemView;

/// How [`FileBrowser::list_dir`] shapes a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub sort: SortOrder,
    /// Glob applied to file names, e.g. `*.txt`. Directories always pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Async file browsing capability.
#[async_trait::async_trait]
pub trait FileBrowser: Send + Sync {
    /// List a directory. A directory that cannot be read lists as empty.
    async fn list_dir(&self, uri: &str, options: &ListOptions) -> Result<Vec<FileEntry>, CoreError>;

    /// Describe a single entry; fails with `NotFound` if it does not exist.
    async fn stat(&self, uri: &str) -> Result<FileEntry, CoreError>;

    /// Create a uniquely named new folder inside `dir_uri`.
    async fn create_folder(&self, dir_uri: &str) -> Result<FileEntry, CoreError>;

    /// Rename or move an entry.
    async fn rename(&self, from: &str, to: &str) -> Result<(), CoreError>;

    /// Filesystem roots reachable from `uri`.
    async fn roots(&self, uri: &str) -> Result<Vec<FileEntry>, CoreError>;
}

/// [`FileBrowser`] backed by a shared [`FileSystemView`].
#[derive(Clone)]
pub struct ViewBrowser {
    view: Arc<FileSystemView>,
}

impl ViewBrowser {
    pub fn new(view: Arc<FileSystemView>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &Arc<FileSystemView> {
        &self.view
    }

    async fn run<T, F>(&self, op: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(&FileSystemView) -> Result<T, CoreError> + Send + 'static,
    {
        let view = Arc::clone(&self.view);
        tokio::task::spawn_blocking(move || op(&view))
            .await
            .map_err(|e| VfsError::BackendFault(format!("Task join failed: {e}")))?
    }
}

#[async_trait::async_trait]
impl FileBrowser for ViewBrowser {
    async fn list_dir(&self, uri: &str, options: &ListOptions) -> Result<Vec<FileEntry>, CoreError> {
        let uri = uri.to_string();
        let options = options.clone();
        self.run(move |view| {
            let dir = view.resolve(&uri)?;
            let mut files = view.list_children(&dir, options.include_hidden).value();
            if let Some(pattern) = options.pattern.as_deref() {
                let filter = GlobFilter::new(pattern)?;
                files = filter_files(view, files, &filter);
            }
            sort_files(view, &mut files, options.sort);
            debug!(%uri, count = files.len(), "Listed directory");
            Ok(files.iter().map(|f| FileEntry::from_view(view, f)).collect())
        })
        .await
    }

    async fn stat(&self, uri: &str) -> Result<FileEntry, CoreError> {
        let uri = uri.to_string();
        self.run(move |view| {
            let file = view.resolve(&uri)?;
            if !view.exists(&file).value() {
                return Err(VfsError::NotFound(view.friendly_name(&file)).into());
            }
            Ok(FileEntry::from_view(view, &file))
        })
        .await
    }

    async fn create_folder(&self, dir_uri: &str) -> Result<FileEntry, CoreError> {
        let dir_uri = dir_uri.to_string();
        self.run(move |view| {
            let dir = view.resolve(&dir_uri)?;
            let folder = view.create_unique_folder(&dir)?;
            Ok(FileEntry::from_view(view, &folder))
        })
        .await
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), CoreError> {
        let (from, to) = (from.to_string(), to.to_string());
        self.run(move |view| {
            let from = view.resolve(&from)?;
            let to = view.resolve(&to)?;
            view.rename(&from, &to)?;
            Ok(())
        })
        .await
    }

    async fn roots(&self, uri: &str) -> Result<Vec<FileEntry>, CoreError> {
        let uri = uri.to_string();
        self.run(move |view| {
            let file = view.resolve(&uri)?;
            let roots = view.roots(&file).value();
            Ok(roots.iter().map(|r| FileEntry::from_view(view, r)).collect())
        })
        .await
    }
}

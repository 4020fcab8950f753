use glob::Pattern;

use super::FileSystemView;
use crate::errors::CoreError;
use crate::messages::{MessageSource, ACCEPT_ALL_FILTER};
use crate::vfs::FileObject;

/// Predicate deciding which entries a chooser shows.
pub trait FileFilter: Send + Sync {
    fn accept(&self, view: &FileSystemView, file: &FileObject) -> bool;

    /// Text shown in the filter drop-down.
    fn description(&self) -> String;
}

/// Shows everything.
#[derive(Debug, Clone)]
pub struct AcceptAllFilter {
    description: String,
}

impl AcceptAllFilter {
    pub fn new(messages: &dyn MessageSource) -> Self {
        Self {
            description: messages.format(ACCEPT_ALL_FILTER, &[]),
        }
    }
}

impl FileFilter for AcceptAllFilter {
    fn accept(&self, _view: &FileSystemView, _file: &FileObject) -> bool {
        true
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Matches base names against a shell glob such as `*.rs`.
///
/// Containers are always accepted so the user can still navigate.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    pattern: Pattern,
}

impl GlobFilter {
    pub fn new(pattern: &str) -> Result<Self, CoreError> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| CoreError::Config(format!("Invalid file pattern '{pattern}': {e}")))?;
        Ok(Self { pattern })
    }
}

impl FileFilter for GlobFilter {
    fn accept(&self, view: &FileSystemView, file: &FileObject) -> bool {
        view.is_container(file).value() || self.pattern.matches(view.name(file))
    }

    fn description(&self) -> String {
        self.pattern.as_str().to_string()
    }
}

/// Keep the entries `filter` accepts, preserving order.
pub fn filter_files(
    view: &FileSystemView,
    files: Vec<FileObject>,
    filter: &dyn FileFilter,
) -> Vec<FileObject> {
    files
        .into_iter()
        .filter(|file| filter.accept(view, file))
        .collect()
}

pub mod browser;

use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::vfs::FileObject;
use crate::view::FileSystemView;

/// A row in a file-chooser listing.
///
/// Field names are serialized as camelCase for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    /// Full locator; pass it back to navigate or operate on the entry.
    pub uri: String,
    /// Credential-free label (base name, or the friendly URI for roots).
    pub display_name: String,
    pub is_directory: bool,
    pub is_hidden: bool,
    pub size: u64,
    /// Human-readable size, empty for directories.
    pub size_label: String,
    /// ISO 8601 timestamp, empty when the provider could not report one.
    pub modified: String,
}

impl FileEntry {
    /// Build a row from the view's (fault-tolerant) queries.
    pub fn from_view(view: &FileSystemView, file: &FileObject) -> Self {
        let is_directory = view.is_container(file).value();
        let size = view.size(file).value();
        let modified = view.last_modified(file);
        Self {
            name: view.name(file).to_string(),
            uri: view.uri(file),
            display_name: view.display_name(file),
            is_directory,
            is_hidden: view.is_hidden(file),
            size,
            size_label: if is_directory {
                String::new()
            } else {
                view.size_label(file)
            },
            modified: if modified.is_fallback() {
                String::new()
            } else {
                iso_timestamp(modified.value())
            },
        }
    }
}

/// Format a system time as RFC 3339 in UTC, second precision.
pub fn iso_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

//! Three-way comparators for directory listings.
//!
//! Every comparator built by [`file_comparator`] puts containers before
//! leaves; the sort key only decides within those two groups. Attribute
//! lookups that fall back (provider fault) sort as the lesser side whatever
//! the direction, so one unreadable entry cannot make a sort inconsistent.
//! Equal keys have no tie-break: [`sort_files`] is stable and keeps the
//! provider's order for them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{FileSystemView, Lookup};
use crate::vfs::FileObject;

/// Attribute a listing is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Modified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

/// Sort key plus direction, as chosen by clicking a column header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrder {
    #[serde(default)]
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Same key, opposite direction.
    pub fn reversed(self) -> Self {
        let direction = match self.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
        Self::new(self.key, direction)
    }
}

fn directed(ord: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

fn compare_lookups<T: Ord>(a: Lookup<T>, b: Lookup<T>, ascending: bool) -> Ordering {
    match (a, b) {
        (Lookup::Fallback(_), Lookup::Fallback(_)) => Ordering::Equal,
        (Lookup::Fallback(_), Lookup::Resolved(_)) => Ordering::Less,
        (Lookup::Resolved(_), Lookup::Fallback(_)) => Ordering::Greater,
        (Lookup::Resolved(x), Lookup::Resolved(y)) => directed(x.cmp(&y), ascending),
    }
}

/// Case-insensitive comparison of base names.
pub fn compare_by_name(
    view: &FileSystemView,
    a: &FileObject,
    b: &FileObject,
    ascending: bool,
) -> Ordering {
    let na = view.name(a).to_lowercase();
    let nb = view.name(b).to_lowercase();
    directed(na.cmp(&nb), ascending)
}

/// Numeric comparison of sizes in bytes.
pub fn compare_by_size(
    view: &FileSystemView,
    a: &FileObject,
    b: &FileObject,
    ascending: bool,
) -> Ordering {
    compare_lookups(view.size(a), view.size(b), ascending)
}

/// Comparison of last-modified times.
pub fn compare_by_modified(
    view: &FileSystemView,
    a: &FileObject,
    b: &FileObject,
    ascending: bool,
) -> Ordering {
    compare_lookups(view.last_modified(a), view.last_modified(b), ascending)
}

/// Containers first; `delegate` decides when both or neither are containers.
pub fn directories_first(
    view: &FileSystemView,
    a: &FileObject,
    b: &FileObject,
    delegate: impl FnOnce(&FileObject, &FileObject) -> Ordering,
) -> Ordering {
    let a_dir = view.is_container(a).value();
    let b_dir = view.is_container(b).value();
    match (a_dir, b_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => delegate(a, b),
    }
}

/// Comparator for `order`, wrapped in [`directories_first`].
pub fn file_comparator(
    view: &FileSystemView,
    order: SortOrder,
) -> impl Fn(&FileObject, &FileObject) -> Ordering + '_ {
    let ascending = order.direction.is_ascending();
    move |a: &FileObject, b: &FileObject| {
        directories_first(view, a, b, |a, b| match order.key {
            SortKey::Name => compare_by_name(view, a, b, ascending),
            SortKey::Size => compare_by_size(view, a, b, ascending),
            SortKey::Modified => compare_by_modified(view, a, b, ascending),
        })
    }
}

/// Sort `files` in place (stable).
pub fn sort_files(view: &FileSystemView, files: &mut [FileObject], order: SortOrder) {
    let cmp = file_comparator(view, order);
    files.sort_by(|a, b| cmp(a, b));
}

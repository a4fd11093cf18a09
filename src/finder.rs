use crate::model::IconClass;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Looks for an entry called exactly `name` anywhere below `root`.
///
/// Directories are visited depth-first in pre-order, siblings sorted by file
/// name, without following symlinked directories. In each directory a file
/// called `name` is preferred over a subdirectory of that name. The first
/// directory holding a match ends the search, so with several candidates the
/// result is the first one encountered in traversal order, which is not
/// necessarily the one the shortcut originally pointed at.
///
/// Returns an empty path and [`IconClass::Unset`] when nothing matches.
pub fn find_by_name(root: &Path, name: &str) -> (PathBuf, IconClass) {
    if !is_plain_name(name) {
        return (PathBuf::new(), IconClass::Unset);
    }

    let dirs = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_type().is_dir())
        .filter_map(|e| e.ok());

    for dir in dirs {
        let candidate = dir.path().join(name);
        // Follows symlinks, so a link to a directory counts as a folder.
        let Ok(metadata) = fs::metadata(&candidate) else {
            continue;
        };
        let icon = if metadata.is_dir() {
            IconClass::Folder
        } else {
            IconClass::WebLink
        };
        return (candidate, icon);
    }

    (PathBuf::new(), IconClass::Unset)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\0')
}

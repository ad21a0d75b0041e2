//! Size-based difference detection

use sizesync_types::{FileClassification, FileSize};
use std::fs;
use std::path::Path;

/// Whether any entry, including a dangling symlink, exists at `path`
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Size of the file at `path`, following symlinks
///
/// Returns `None` when the size cannot be determined: the entry vanished, a
/// permission error, or a symlink whose target is missing.
pub fn size_of(path: &Path) -> Option<FileSize> {
    fs::metadata(path).ok().map(|metadata| metadata.len())
}

/// Classify a source file against its destination counterpart
///
/// This only observes the filesystem; no data is read or written.
pub fn classify(source: &Path, destination: &Path) -> FileClassification {
    if !entry_exists(destination) {
        return FileClassification::New;
    }
    FileClassification::from_sizes(size_of(source), Some(size_of(destination)))
}

/// Whether `path` is a symlink that resolves to a directory
pub fn is_directory_link(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_ok_and(|m| m.is_dir())
}

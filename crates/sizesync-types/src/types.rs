//! Core data types for SizeSync
//!
//! This module provides the per-file classification and the accumulated
//! outcome of one synchronization run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// File size in bytes
pub type FileSize = u64;

/// Decision taken for one (source file, destination file) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FileClassification {
    /// Destination was absent and the file was copied
    New,
    /// Destination sizes differed, or could not be read, and the file was copied over it
    Overwritten,
    /// Destination had the same size and was left untouched
    Skipped,
}

impl FileClassification {
    /// Classify a pair from the sizes observed on each side.
    ///
    /// `None` for the destination means there is no destination entry at all.
    /// `Some(None)` means an entry exists but its size could not be determined.
    pub fn from_sizes(source: Option<FileSize>, destination: Option<Option<FileSize>>) -> Self {
        match destination {
            None => Self::New,
            Some(destination) => match (source, destination) {
                (Some(src), Some(dst)) if src == dst => Self::Skipped,
                _ => Self::Overwritten,
            },
        }
    }

    /// Whether this classification requires copying the source
    pub fn requires_copy(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

impl fmt::Display for FileClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "new",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
        };
        f.write_str(label)
    }
}

/// Outcome of a synchronization run
///
/// Paths are stored as source-relative strings.
/// Error entries are preformatted as `"<source-relative-path> -> <message>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncResult {
    /// Files that did not exist in the destination
    pub new: Vec<String>,
    /// Files copied over an existing destination entry
    pub overwritten: Vec<String>,
    /// Files left untouched because sizes matched
    pub skipped: Vec<String>,
    /// Per-file failures
    pub errors: Vec<String>,
}

impl SyncResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classified file
    pub fn record(&mut self, classification: FileClassification, relative_path: impl Into<String>) {
        let path = relative_path.into();
        match classification {
            FileClassification::New => self.new.push(path),
            FileClassification::Overwritten => self.overwritten.push(path),
            FileClassification::Skipped => self.skipped.push(path),
        }
    }

    /// Record a per-file failure
    pub fn record_error(&mut self, relative_path: &str, message: impl fmt::Display) {
        self.errors.push(format!("{} -> {}", relative_path, message));
    }

    /// Total number of file entries accounted for
    pub fn total(&self) -> usize {
        self.new.len() + self.overwritten.len() + self.skipped.len() + self.errors.len()
    }

    /// Whether any file failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Counts in report order
    pub fn counts(&self) -> SyncCounts {
        SyncCounts {
            new: self.new.len(),
            overwritten: self.overwritten.len(),
            skipped: self.skipped.len(),
            errors: self.errors.len(),
        }
    }
}

/// Summary counts of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SyncCounts {
    /// Number of new files
    pub new: usize,
    /// Number of overwritten files
    pub overwritten: usize,
    /// Number of skipped files
    pub skipped: usize,
    /// Number of errors
    pub errors: usize,
}

impl SyncCounts {
    /// Counts used for a run that failed before producing any result
    pub fn fatal() -> Self {
        Self {
            errors: 1,
            ..Self::default()
        }
    }
}

impl fmt::Display for SyncCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "New: {}, Overwritten: {}, Skipped: {}, Errors: {}",
            self.new, self.overwritten, self.skipped, self.errors
        )
    }
}

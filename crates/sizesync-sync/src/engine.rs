//! Main synchronization engine

use crate::{copy::copy_entry, diff};
use sizesync_types::{
    Cancellable, CancellationToken, Error, FileClassification, NoopObserver, Result,
    SyncObserver, SyncResult,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Synchronization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Source directory path
    pub source: PathBuf,
    /// Destination directory path
    pub destination: PathBuf,
}

impl SyncRequest {
    /// Create a new sync request
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
        }
    }
}

/// Main synchronization engine
///
/// Walks the source tree once, mirrors every directory and classifies every
/// file entry. A failure on one file, or on a directory that cannot be read, is
/// recorded in [`SyncResult::errors`] and the walk moves on; only source
/// validation, directory mirroring and cancellation abort a run.
pub struct SyncEngine {
    observer: Box<dyn SyncObserver>,
    cancellation: Option<CancellationToken>,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new() -> Self {
        Self {
            observer: Box::new(NoopObserver),
            cancellation: None,
        }
    }

    /// Report progress to an observer
    pub fn with_observer<O: SyncObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Stop the walk between files once the token is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Perform synchronization
    pub fn sync(&self, request: &SyncRequest) -> Result<SyncResult> {
        let start_time = Instant::now();
        let source = absolute(&request.source)?;
        let destination = absolute(&request.destination)?;

        validate_source(&source)?;

        info!(
            "Starting sync: {} -> {}",
            source.display(),
            destination.display()
        );

        let mut result = SyncResult::new();
        let walker = WalkDir::new(&source).follow_links(false).sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record_walk_error(&source, &e, &mut result);
                    continue;
                }
            };

            let relative = entry
                .path()
                .strip_prefix(&source)
                .map_err(|e| Error::other(format!("{}: {}", entry.path().display(), e)))?;

            if entry.file_type().is_dir() {
                mirror_directory(&destination.join(relative))?;
                continue;
            }

            if entry.path_is_symlink() && diff::is_directory_link(entry.path()) {
                debug!("Not descending into directory link {}", entry.path().display());
                continue;
            }

            self.check_cancelled()?;
            self.sync_entry(entry.path(), &destination.join(relative), relative, &mut result);
        }

        info!(
            "Sync completed in {:?}: {}",
            start_time.elapsed(),
            result.counts()
        );

        Ok(result)
    }

    fn sync_entry(
        &self,
        source: &Path,
        destination: &Path,
        relative: &Path,
        result: &mut SyncResult,
    ) {
        let relative = relative.to_string_lossy();
        self.observer.file_started(&relative);

        match sync_file(source, destination) {
            Ok(classification) => {
                debug!("{}: {}", relative, classification);
                self.observer.file_finished(&relative, classification);
                result.record(classification, relative.into_owned());
            }
            Err(e) => {
                let message = e.to_string();
                warn!("{} -> {}", relative, message);
                self.observer.file_failed(&relative, &message);
                result.record_error(&relative, message);
            }
        }
    }

    /// Record an entry the walk could not read; nothing below it is visited
    fn record_walk_error(&self, source: &Path, error: &walkdir::Error, result: &mut SyncResult) {
        let path = error.path().unwrap_or(source);
        let relative = path.strip_prefix(source).unwrap_or(path).to_string_lossy();
        let message = error
            .io_error()
            .map_or_else(|| error.to_string(), ToString::to_string);

        warn!("Skipping unreadable entry {} -> {}", relative, message);
        self.observer.file_failed(&relative, &message);
        result.record_error(&relative, message);
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancellation {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("cancellation", &self.cancellation)
            .finish_non_exhaustive()
    }
}

/// Classify one file and copy it when needed
pub fn sync_file(source: &Path, destination: &Path) -> std::io::Result<FileClassification> {
    let classification = diff::classify(source, destination);
    if classification.requires_copy() {
        copy_entry(source, destination)?;
    }
    Ok(classification)
}

/// Synchronize `source` into `destination` with a default engine
pub fn sync<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<SyncResult> {
    SyncEngine::new().sync(&SyncRequest::new(source, destination))
}

/// Pre-flight checks run before a sync: the source must be a directory and
/// the destination root must be creatable.
pub fn validate_paths<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = absolute(source.as_ref())?;
    let destination = absolute(destination.as_ref())?;

    validate_source(&source)?;

    fs::create_dir_all(&destination).map_err(|e| Error::DestinationUncreatable {
        path: destination.clone(),
        message: e.to_string(),
    })?;

    Ok(())
}

fn validate_source(source: &Path) -> Result<()> {
    if !source.exists() {
        return Err(Error::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    if !source.is_dir() {
        return Err(Error::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    Ok(())
}

fn mirror_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::DirectoryMirror {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

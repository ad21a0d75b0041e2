//! Unified test utilities for SizeSync tests
//!
//! Scratch trees are described as `(relative path, contents)` pairs and
//! materialised under a [`TempDir`] that is removed when the fixture drops.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Create every file of `files` under `root`
pub fn create_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, content) in files {
        write_file(root, relative, content);
    }
}

/// Sorted relative paths of every regular file under `root`
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("Entry outside root");
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

/// Sort a list of relative paths for order-independent comparison
pub fn sorted(paths: &[String]) -> Vec<String> {
    let mut paths = paths.to_vec();
    paths.sort();
    paths
}

/// Source, destination and report directories of one scenario
pub struct SyncFixture {
    temp_dir: TempDir,
}

impl SyncFixture {
    /// Create empty source and report directories; the destination is left absent
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("src")).expect("Failed to create source");
        fs::create_dir_all(temp_dir.path().join("reports")).expect("Failed to create reports");
        Self { temp_dir }
    }

    /// The two-file scenario: `a.txt` (4 bytes) and `sub/b.txt` (10 bytes)
    pub fn scenario() -> Self {
        let fixture = Self::new();
        create_tree(
            &fixture.source(),
            &[("a.txt", b"abcd"), ("sub/b.txt", b"0123456789")],
        );
        fixture
    }

    /// Root of the scratch area
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Source directory
    pub fn source(&self) -> PathBuf {
        self.root().join("src")
    }

    /// Destination directory
    pub fn destination(&self) -> PathBuf {
        self.root().join("dst")
    }

    /// Report directory
    pub fn reports(&self) -> PathBuf {
        self.root().join("reports")
    }
}

impl Default for SyncFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tree_and_list_files() {
        let temp_dir = TempDir::new().unwrap();
        create_tree(temp_dir.path(), &[("z.txt", b"z"), ("a/b/c.txt", b"c")]);

        assert_eq!(list_files(temp_dir.path()), vec!["a/b/c.txt", "z.txt"]);
    }

    #[test]
    fn test_scenario_fixture() {
        let fixture = SyncFixture::scenario();

        assert_eq!(list_files(&fixture.source()), vec!["a.txt", "sub/b.txt"]);
        assert!(!fixture.destination().exists());
        assert!(fixture.reports().is_dir());
    }
}

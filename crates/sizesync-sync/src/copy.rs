//! Metadata-preserving copy primitive
//!
//! Regular files are copied with their permission bits and access and
//! modification times. Symlinks are never followed: the link itself is
//! recreated at the destination, pointing at the same target. Any other kind
//! of entry is refused with an error.

use filetime::FileTime;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use tracing::debug;

/// Copy `source` to `destination`, replacing whatever non-directory entry is there
pub fn copy_entry(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(source)?;

    let file_type = metadata.file_type();
    if file_type.is_symlink() {
        copy_symlink(source, destination, &metadata)
    } else if file_type.is_file() {
        copy_file(source, destination, &metadata)
    } else {
        // Pipes, sockets and device nodes are never opened
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", source.display()),
        ))
    }
}

fn copy_file(source: &Path, destination: &Path, metadata: &Metadata) -> io::Result<()> {
    // Writing through a destination link would modify its target instead
    if is_symlink(destination) {
        fs::remove_file(destination)?;
    }

    let bytes = fs::copy(source, destination)?;
    filetime::set_file_times(
        destination,
        FileTime::from_last_access_time(metadata),
        FileTime::from_last_modification_time(metadata),
    )?;

    debug!(
        "Copied {} bytes: {} -> {}",
        bytes,
        source.display(),
        destination.display()
    );
    Ok(())
}

fn copy_symlink(source: &Path, destination: &Path, metadata: &Metadata) -> io::Result<()> {
    let target = fs::read_link(source)?;

    match fs::symlink_metadata(destination) {
        Ok(existing) if existing.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "cannot replace directory {} with a symlink",
                    destination.display()
                ),
            ));
        }
        Ok(_) => fs::remove_file(destination)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    create_symlink(&target, destination)?;
    filetime::set_symlink_file_times(
        destination,
        FileTime::from_last_access_time(metadata),
        FileTime::from_last_modification_time(metadata),
    )?;

    debug!("Linked {} -> {}", destination.display(), target.display());
    Ok(())
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    let resolved = link
        .parent()
        .map_or_else(|| target.to_path_buf(), |parent| parent.join(target));
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_preserves_content_and_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.txt");
        let destination = temp_dir.path().join("dest.txt");
        fs::write(&source, b"hello world").unwrap();
        let mtime = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&source, mtime).unwrap();

        copy_entry(&source, &destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"hello world");
        let copied = fs::metadata(&destination).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied), mtime);
    }

    #[test]
    fn test_copy_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.txt");
        let destination = temp_dir.path().join("dest.txt");
        fs::write(&source, b"new content").unwrap();
        fs::write(&destination, b"old").unwrap();

        copy_entry(&source, &destination).unwrap();

        assert_eq!(fs::read(&destination).unwrap(), b"new content");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_preserves_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("script.sh");
        let destination = temp_dir.path().join("copy.sh");
        fs::write(&source, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();

        copy_entry(&source, &destination).unwrap();

        let mode = fs::metadata(&destination).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_copied_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link");
        let destination = temp_dir.path().join("copied-link");
        fs::write(&target, b"payload").unwrap();
        std::os::unix::fs::symlink("target.txt", &link).unwrap();

        copy_entry(&link, &destination).unwrap();

        assert!(is_symlink(&destination));
        assert_eq!(
            fs::read_link(&destination).unwrap(),
            Path::new("target.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("link");
        let destination = temp_dir.path().join("dest");
        std::os::unix::fs::symlink("nowhere", &link).unwrap();
        fs::write(&destination, b"regular file").unwrap();

        copy_entry(&link, &destination).unwrap();

        assert_eq!(fs::read_link(&destination).unwrap(), Path::new("nowhere"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_replaces_destination_link_without_touching_target() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source.txt");
        let other = temp_dir.path().join("other.txt");
        let destination = temp_dir.path().join("dest");
        fs::write(&source, b"fresh").unwrap();
        fs::write(&other, b"keep me").unwrap();
        std::os::unix::fs::symlink(&other, &destination).unwrap();

        copy_entry(&source, &destination).unwrap();

        assert!(!is_symlink(&destination));
        assert_eq!(fs::read(&destination).unwrap(), b"fresh");
        assert_eq!(fs::read(&other).unwrap(), b"keep me");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_onto_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("link");
        let destination = temp_dir.path().join("dir");
        std::os::unix::fs::symlink("nowhere", &link).unwrap();
        fs::create_dir(&destination).unwrap();

        let error = copy_entry(&link, &destination).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::AlreadyExists);
        assert!(destination.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_named_pipe_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let fifo = temp_dir.path().join("pipe");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        let error = copy_entry(&fifo, &temp_dir.path().join("dest")).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
        assert!(error.to_string().ends_with("is not a regular file"));
        assert!(!temp_dir.path().join("dest").exists());
    }

    #[test]
    fn test_missing_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let error = copy_entry(
            &temp_dir.path().join("missing"),
            &temp_dir.path().join("dest"),
        )
        .unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }
}

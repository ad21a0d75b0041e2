//! Size-based one-way directory synchronization for SizeSync
//!
//! This crate walks a source tree, mirrors its directories under a
//! destination and decides per file whether to copy it:
//!
//! - **New**: nothing exists at the destination path, the file is copied
//! - **Overwritten**: sizes differ, or either size cannot be read, the file is copied over
//! - **Skipped**: sizes match, nothing is touched
//!
//! Size equality is the only identity check. Two files with the same length but
//! different content are treated as unchanged.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sizesync_sync::{SyncEngine, SyncRequest};
//!
//! let engine = SyncEngine::new();
//! let result = engine.sync(&SyncRequest::new("source_dir", "dest_dir"))?;
//! println!("{}", result.counts());
//! # Ok::<(), sizesync_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod copy;
pub mod diff;
pub mod engine;

pub use copy::copy_entry;
pub use diff::classify;
pub use engine::{sync, sync_file, validate_paths, SyncEngine, SyncRequest};

//! Core type system and error handling for SizeSync
//!
//! This crate provides the foundational types shared by the SizeSync crates:
//!
//! - **Error handling**: fatal and per-file error types
//! - **Core types**: the per-file classification and the accumulated run result
//! - **Traits**: run observation and cancellation
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use sizesync_types::{FileClassification, SyncResult};
//!
//! let mut result = SyncResult::new();
//! result.record(FileClassification::New, "a.txt");
//! result.record_error("b.txt", "Permission denied");
//! assert_eq!(result.counts().to_string(), "New: 1, Overwritten: 0, Skipped: 0, Errors: 1");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use traits::*;
pub use types::*;

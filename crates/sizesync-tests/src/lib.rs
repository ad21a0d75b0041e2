//! SizeSync Testing Suite
//!
//! Cross-crate integration tests for SizeSync, plus the tree-building helpers
//! they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Builders for scratch source and destination trees used across the
/// integration tests.
pub mod test_utils;

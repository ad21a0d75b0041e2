//! Dated summary reports for SizeSync runs
//!
//! Every run produces exactly one text report: a summary of a completed sync,
//! or a single-error report when the run failed before producing a result.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sizesync_report::write_success_report;
//! use sizesync_types::SyncResult;
//!
//! let path = write_success_report(&SyncResult::new(), "reports", "nightly")?;
//! println!("Report written to: {}", path.display());
//! # Ok::<(), sizesync_types::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod writer;

pub use clock::{DateStrategy, ReportClock};
pub use writer::{render, ReportWriter};

use sizesync_types::{Result, SyncResult};
use std::path::{Path, PathBuf};

/// Reference timezone for report dates
pub const REFERENCE_TIMEZONE: &str = "America/Chicago";

/// Write the summary report of a completed run and return its path
pub fn write_success_report<P: AsRef<Path>>(
    result: &SyncResult,
    report_directory: P,
    file_name: &str,
) -> Result<PathBuf> {
    ReportWriter::new(report_directory.as_ref(), file_name).write_success(result)
}

/// Write a single-error report for a failed run and return its path
pub fn write_error_report<P: AsRef<Path>>(
    message: &str,
    report_directory: P,
    file_name: &str,
) -> Result<PathBuf> {
    ReportWriter::new(report_directory.as_ref(), file_name).write_error(message)
}

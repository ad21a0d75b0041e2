//! JSON output structures for the SizeSync CLI

use crate::Cli;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sizesync_types::{SyncCounts, SyncResult};
use std::path::Path;

/// Complete JSON output for one run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunOutputJson {
    /// Run metadata
    pub metadata: RunMetadata,
    /// Counts as written to the report
    pub counts: SyncCounts,
    /// Overall result
    pub result: RunResult,
}

/// Run metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    /// SizeSync version
    pub version: String,
    /// Timestamp when the output was produced
    pub timestamp: String,
    /// Source path
    pub source_path: String,
    /// Destination path
    pub destination_path: String,
    /// Report date
    pub report_date: String,
    /// Path of the report file
    pub report_path: String,
}

/// Overall run result
#[derive(Debug, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether the sync completed
    pub success: bool,
    /// Fatal error message when the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal_error: Option<String>,
    /// Per-file error lines
    pub errors: Vec<String>,
}

impl RunOutputJson {
    /// Output for a completed run
    pub fn success(cli: &Cli, result: &SyncResult, report_path: &Path, date: NaiveDate) -> Self {
        Self {
            metadata: RunMetadata::new(cli, report_path, date),
            counts: result.counts(),
            result: RunResult {
                success: true,
                fatal_error: None,
                errors: result.errors.clone(),
            },
        }
    }

    /// Output for a run that failed with a fatal error
    pub fn failure(cli: &Cli, message: &str, report_path: &Path, date: NaiveDate) -> Self {
        Self {
            metadata: RunMetadata::new(cli, report_path, date),
            counts: SyncCounts::fatal(),
            result: RunResult {
                success: false,
                fatal_error: Some(message.to_string()),
                errors: vec![message.to_string()],
            },
        }
    }

    /// Print as pretty JSON on stdout
    pub fn print(&self) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

impl RunMetadata {
    fn new(cli: &Cli, report_path: &Path, date: NaiveDate) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            source_path: cli.source.display().to_string(),
            destination_path: cli.destination.display().to_string(),
            report_date: date.format("%Y-%m-%d").to_string(),
            report_path: report_path.display().to_string(),
        }
    }
}

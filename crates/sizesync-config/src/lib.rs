//! Configuration management system for SizeSync
//!
//! Configuration is read only from a file named explicitly by the caller
//! (YAML, TOML or JSON), layered over built-in defaults. Command line flags are
//! applied on top by the binary.
//!
//! # Examples
//!
//! ```rust
//! use sizesync_config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .add_source_file("sizesync.yaml")
//!     .build()
//!     .expect("Failed to load configuration");
//!
//! assert_eq!(config.report.file_name, "example");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod builder;
pub mod error;
pub mod loader;

pub use builder::ConfigBuilder;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

/// Reference timezone used for report dates unless configured otherwise
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Base name used in report file names unless configured otherwise
pub const DEFAULT_REPORT_NAME: &str = "example";

/// Main configuration structure for SizeSync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Directory the report goes to for a run syncing into `destination`
    pub fn report_directory<'a>(&'a self, destination: &'a Path) -> &'a Path {
        self.report.directory.as_deref().unwrap_or(destination)
    }
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory for report files; the destination directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Base name used in `<date>_<file_name>.txt`
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// IANA name of the reference timezone for the report date
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Use the local clock when the reference timezone cannot be resolved
    #[serde(default = "default_fallback_to_local")]
    pub fallback_to_local: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_name: default_file_name(),
            timezone: default_timezone(),
            fallback_to_local: default_fallback_to_local(),
        }
    }
}

fn default_file_name() -> String {
    DEFAULT_REPORT_NAME.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_fallback_to_local() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when neither `RUST_LOG` nor a verbosity flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable colored console output
    #[serde(default = "default_colored_output")]
    pub colored_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            colored_output: default_colored_output(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_colored_output() -> bool {
    true
}

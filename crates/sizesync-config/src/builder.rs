//! Configuration builder for layered configuration loading

use crate::{Config, ConfigError, ConfigResult};
use config::{ConfigBuilder as ConfigBuilderInner, File, FileFormat};
use std::path::{Path, PathBuf};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration builder layering configuration files over built-in defaults
#[derive(Debug)]
pub struct ConfigBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    files: Vec<(PathBuf, FileFormat)>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            files: Vec::new(),
        }
    }

    /// Add a configuration file source; missing files are ignored
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.files.push((path, format));
        self
    }

    /// Build the configuration
    pub fn build(mut self) -> ConfigResult<Config> {
        // Defaults always form the base layer
        let defaults_value = serde_yaml::to_value(Config::default())?;
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&defaults_value)?);

        for (path, format) in &self.files {
            if path.exists() {
                self.inner = self.inner.add_source(File::from(path.clone()).format(*format));
            }
        }

        let config = self.inner.build()?;
        let result: Config = config.try_deserialize()?;

        Self::validate(&result)?;

        Ok(result)
    }

    /// Detect file format from extension
    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }

    /// Validate the configuration
    pub(crate) fn validate(config: &Config) -> ConfigResult<()> {
        let file_name = config.report.file_name.trim();
        if file_name.is_empty() {
            return Err(ConfigError::validation("Report file name must not be empty"));
        }
        if file_name.contains(['/', '\\']) {
            return Err(ConfigError::validation(
                "Report file name must not contain path separators",
            ));
        }

        if config.report.timezone.trim().is_empty() {
            return Err(ConfigError::validation("Report timezone must not be empty"));
        }

        if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::validation(
                "Log level must be one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_yaml_file() {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            temp_file,
            r#"
report:
  file_name: nightly
  directory: /var/reports
logging:
  level: debug
"#
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .add_source_file(temp_file.path())
            .build()
            .unwrap();

        assert_eq!(config.report.file_name, "nightly");
        assert_eq!(config.report.directory, Some(PathBuf::from("/var/reports")));
        assert_eq!(config.report.timezone, "America/Chicago");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_builder_toml_file() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            temp_file,
            r#"
[report]
timezone = "Europe/Berlin"
fallback_to_local = false
"#
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .add_source_file(temp_file.path())
            .build()
            .unwrap();

        assert_eq!(config.report.timezone, "Europe/Berlin");
        assert!(!config.report.fallback_to_local);
        assert_eq!(config.report.file_name, "example");
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let config = ConfigBuilder::new()
            .add_source_file("/definitely/not/here/sizesync.yaml")
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[rstest]
    #[case("report:\n  file_name: \"\"\n", "must not be empty")]
    #[case("report:\n  file_name: a/b\n", "path separators")]
    #[case("logging:\n  level: loud\n", "Log level must be one of")]
    #[case("report:\n  timezone: \" \"\n", "timezone must not be empty")]
    fn test_builder_validation(#[case] yaml: &str, #[case] expected: &str) {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let result = ConfigBuilder::new()
            .add_source_file(temp_file.path())
            .build();

        let message = result.unwrap_err().to_string();
        assert!(message.contains(expected), "unexpected message: {}", message);
    }
}

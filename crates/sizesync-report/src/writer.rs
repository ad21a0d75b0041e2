//! Plain-text report rendering and writing

use crate::ReportClock;
use chrono::NaiveDate;
use sizesync_types::{Error, Result, SyncCounts, SyncResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes one report file per run into a report directory
///
/// The file is named `<YYYY-MM-DD>_<file_name>.txt` and silently replaces any
/// report already written under that name.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    file_name: String,
    clock: ReportClock,
}

impl ReportWriter {
    /// Create a writer using the default reference clock
    pub fn new<P: Into<PathBuf>, S: Into<String>>(directory: P, file_name: S) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            clock: ReportClock::default(),
        }
    }

    /// Use a specific clock for the report date
    pub fn with_clock(mut self, clock: ReportClock) -> Self {
        self.clock = clock;
        self
    }

    /// Directory reports are written into
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the report for a given date
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("{}_{}.txt", date.format("%Y-%m-%d"), self.file_name))
    }

    /// Write the summary of a completed run
    pub fn write_success(&self, result: &SyncResult) -> Result<PathBuf> {
        self.write(result.counts(), &result.errors)
    }

    /// Write a report for a run that failed with a single fatal error
    pub fn write_error(&self, message: &str) -> Result<PathBuf> {
        self.write(SyncCounts::fatal(), &[message.to_string()])
    }

    fn write(&self, counts: SyncCounts, errors: &[String]) -> Result<PathBuf> {
        let date = self.clock.today()?;
        let path = self.report_path(date);

        fs::create_dir_all(&self.directory).map_err(|e| Error::report(&self.directory, &e))?;

        let content = render(self.clock.label(), date, counts, errors);
        let file = File::create(&path).map_err(|e| Error::report(&path, &e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| Error::report(&path, &e))?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}

/// Render the fixed report layout
pub fn render(
    timezone_label: &str,
    date: NaiveDate,
    counts: SyncCounts,
    errors: &[String],
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Report date ({}): {}\n",
        timezone_label,
        date.format("%Y-%m-%d")
    ));
    out.push_str("Summary:\n");
    out.push_str(&format!("  New files:         {}\n", counts.new));
    out.push_str(&format!("  Overwritten files: {}\n", counts.overwritten));
    out.push_str(&format!("  Skipped files:     {}\n", counts.skipped));
    out.push_str(&format!("  Errors:            {}\n", counts.errors));
    out.push('\n');

    if !errors.is_empty() {
        out.push_str("Errors:\n");
        for error in errors {
            out.push_str(&format!("  {}\n", error));
        }
        out.push('\n');
    }

    out.push_str("End of report\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizesync_types::FileClassification;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    fn writer(dir: &Path) -> ReportWriter {
        ReportWriter::new(dir, "example").with_clock(ReportClock::default().pinned_to(date()))
    }

    #[test]
    fn test_render_without_errors() {
        let counts = SyncCounts {
            new: 2,
            ..SyncCounts::default()
        };
        let text = render("America/Chicago", date(), counts, &[]);

        assert_eq!(
            text,
            "Report date (America/Chicago): 2025-03-09\n\
             Summary:\n  \
             New files:         2\n  \
             Overwritten files: 0\n  \
             Skipped files:     0\n  \
             Errors:            0\n\
             \n\
             End of report\n"
        );
    }

    #[test]
    fn test_render_with_errors() {
        let errors = vec!["a.txt -> boom".to_string(), "sub/b.txt -> bang".to_string()];
        let counts = SyncCounts {
            skipped: 1,
            errors: 2,
            ..SyncCounts::default()
        };
        let text = render("America/Chicago", date(), counts, &errors);

        assert!(text.ends_with(
            "  Errors:            2\n\n\
             Errors:\n  a.txt -> boom\n  sub/b.txt -> bang\n\n\
             End of report\n"
        ));
    }

    #[test]
    fn test_write_success_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let report_dir = temp_dir.path().join("nested").join("reports");

        let mut result = SyncResult::new();
        result.record(FileClassification::New, "a.txt");
        result.record(FileClassification::Overwritten, "b.txt");

        let path = writer(&report_dir).write_success(&result).unwrap();

        assert_eq!(path, report_dir.join("2025-03-09_example.txt"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("  New files:         1\n"));
        assert!(text.contains("  Overwritten files: 1\n"));
        assert!(!text.contains("Errors:\n"));
    }

    #[test]
    fn test_write_error_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = writer(temp_dir.path())
            .write_error("Source directory does not exist: /missing")
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("  New files:         0\n"));
        assert!(text.contains("  Errors:            1\n"));
        assert!(text.contains("Errors:\n  Source directory does not exist: /missing\n"));
    }

    #[test]
    fn test_same_day_rerun_replaces_report() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path());

        let first = writer.write_error("first failure").unwrap();
        let second = writer.write_success(&SyncResult::new()).unwrap();

        assert_eq!(first, second);
        let text = fs::read_to_string(&second).unwrap();
        assert!(!text.contains("first failure"));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_report_directory_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let error = writer(&blocker.join("reports"))
            .write_success(&SyncResult::new())
            .unwrap_err();
        assert!(matches!(error, Error::Report { .. }));
    }
}

//! Terminal output for the SizeSync CLI

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use sizesync_types::{FileClassification, SyncObserver, SyncResult};
use std::path::Path;
use std::time::Duration;

/// Print the source and destination before a run starts
pub fn print_header(source: &Path, destination: &Path) {
    println!("Copying from: {}", style(source.display()).cyan());
    println!("Copying to:   {}", style(destination.display()).cyan());
}

/// Print the outcome of a completed run
pub fn print_success(result: &SyncResult, report_path: &Path) {
    println!();
    println!("{}", style("Done.").green().bold());
    println!("Report written to: {}", style(report_path.display()).cyan());

    let counts = result.counts();
    if counts.errors > 0 {
        println!("{}", style(counts).yellow());
    } else {
        println!("{}", counts);
    }
}

/// Print a fatal error and where its report went
pub fn print_fatal(message: &str, report_path: &Path) {
    println!("{} {}", style("Fatal error:").red().bold(), style(message).red());
    println!(
        "Error report written to: {}",
        style(report_path.display()).cyan()
    );
}

/// Observer driving a spinner with the file currently being processed
pub struct SpinnerObserver {
    spinner: ProgressBar,
}

impl SpinnerObserver {
    /// Create and start the spinner
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("Scanning...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }
}

impl SyncObserver for SpinnerObserver {
    fn file_started(&self, relative_path: &str) {
        self.spinner.set_message(relative_path.to_string());
    }

    fn file_finished(&self, _relative_path: &str, _classification: FileClassification) {
        self.spinner.inc(1);
    }

    fn file_failed(&self, relative_path: &str, message: &str) {
        self.spinner.suspend(|| {
            eprintln!(
                "{} {} -> {}",
                style("⚠").yellow().bold(),
                relative_path,
                style(message).yellow()
            );
        });
    }
}

impl Drop for SpinnerObserver {
    fn drop(&mut self) {
        self.spinner.finish_and_clear();
    }
}

//! SizeSync - one-way directory sync with a dated report
//!
//! Copies every file from a source tree into a destination tree, skipping files
//! whose size already matches, and writes a dated plain-text summary of what
//! happened. A report is written for every run, including failed ones.
//!
//! Settings come from built-in defaults, then the file given with `--config`,
//! then flags. No environment variables or working-directory files are read.
//!
//! The binary installs no interrupt handler, so a run cannot be cancelled from
//! the terminal. Cancellation is available to library callers through
//! [`SyncEngine::with_cancellation`].

mod display;
mod json_output;

use anyhow::{Context, Result};
use clap::Parser;
use display::SpinnerObserver;
use json_output::RunOutputJson;
use sizesync_config::{Config, ConfigLoader};
use sizesync_report::{ReportClock, ReportWriter};
use sizesync_sync::{validate_paths, SyncEngine, SyncRequest};
use sizesync_types::SyncResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// SizeSync - size-based one-way directory sync with a dated report
#[derive(Parser, Debug)]
#[command(
    name = "sizesync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sync copy with size-based overwrite and report",
    long_about = "SizeSync copies a source directory tree into a destination tree.\n\
                  Files already present with the same size are skipped, everything\n\
                  else is copied, and a dated summary report is written for every run."
)]
struct Cli {
    /// Source directory to copy from
    source: PathBuf,

    /// Destination directory to copy to
    destination: PathBuf,

    /// Directory where the report file will be written. Defaults to the destination directory
    #[arg(short = 'r', long = "report-dir")]
    report_dir: Option<PathBuf>,

    /// File name for the report file. Defaults to example
    #[arg(short = 'f', long = "file_name")]
    file_name: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - no progress spinner
    #[arg(short, long)]
    quiet: bool,

    /// Print the outcome as a JSON object
    #[arg(long)]
    json: bool,
}

/// Report settings after flags are applied over configuration
#[derive(Debug, Clone)]
struct ReportSettings {
    directory: PathBuf,
    file_name: String,
    clock: ReportClock,
}

impl ReportSettings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let directory = cli
            .report_dir
            .clone()
            .unwrap_or_else(|| config.report_directory(&cli.destination).to_path_buf());
        let file_name = cli
            .file_name
            .clone()
            .unwrap_or_else(|| config.report.file_name.clone());
        let clock = ReportClock::new(config.report.timezone.clone())
            .with_fallback(config.report.fallback_to_local);

        Self {
            directory,
            file_name,
            clock,
        }
    }

    /// Resolve the report date once and return a writer pinned to it
    fn writer(&self) -> sizesync_types::Result<(ReportWriter, chrono::NaiveDate)> {
        let date = self.clock.today()?;
        let writer = ReportWriter::new(&self.directory, self.file_name.clone())
            .with_clock(self.clock.clone().pinned_to(date));
        Ok((writer, date))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", console::style("error:").red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let loaded = cli
        .config
        .as_ref()
        .map_or_else(|| Ok(Config::default()), ConfigLoader::load_from_file);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(cli, &config)?;
    info!("SizeSync v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = ReportSettings::resolve(cli, &config);

    let outcome = loaded
        .map_err(sizesync_types::Error::from)
        .and_then(|_| sync(cli));

    match outcome {
        Ok(result) => {
            let (writer, date) = settings.writer().context("Cannot determine report date")?;
            let report_path = writer
                .write_success(&result)
                .context("Cannot write report")?;

            if cli.json {
                RunOutputJson::success(cli, &result, &report_path, date).print()?;
            } else {
                display::print_success(&result, &report_path);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let message = e.to_string();
            error!("{}", message);

            let (writer, date) = settings.writer().context("Cannot determine report date")?;
            let report_path = writer
                .write_error(&message)
                .context("Cannot write error report")?;

            if cli.json {
                RunOutputJson::failure(cli, &message, &report_path, date).print()?;
            } else {
                display::print_fatal(&message, &report_path);
            }
            Ok(ExitCode::from(1))
        }
    }
}

fn sync(cli: &Cli) -> sizesync_types::Result<SyncResult> {
    validate_paths(&cli.source, &cli.destination)?;

    if !cli.json {
        display::print_header(&cli.source, &cli.destination);
    }

    let mut engine = SyncEngine::new();
    if !cli.quiet && !cli.json {
        engine = engine.with_observer(SpinnerObserver::new());
    }

    engine.sync(&SyncRequest::new(&cli.source, &cli.destination))
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log level")?;

    if !config.logging.colored_output {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

//! xcproj-lint CLI tool.
//!
//! Usage:
//! ```bash
//! xcproj-lint [--strict] [--clean] path/to/Demo.xcodeproj
//! xcproj-lint --format json path/to/project.pbxproj
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Consistency checker for Xcode project files: localization
/// completeness and file-reference reconciliation against disk.
#[derive(Parser)]
#[command(name = "xcproj-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Treat every localization gap as an error, media assets included
    #[arg(long)]
    strict: bool,

    /// Delete files not referenced by the project (destructive!)
    #[arg(long)]
    clean: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Path to a project.pbxproj file or a .xcodeproj bundle
    project: PathBuf,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                e.exit();
            }
            // Usage errors exit 1, not clap's default 2.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = commands::check::run(
        &cli.project,
        cli.strict,
        cli.clean,
        cli.format,
        cli.config.as_deref(),
    ) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

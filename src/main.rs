use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use covview::cli::{self, AnnotateArgs};
use covview::html::Theme;

/// covview: coverage-annotated source and per-directory coverage trees.
#[derive(Parser)]
#[command(name = "covview", version, about)]
struct Cli {
    /// Override report format detection (lcov, gocover).
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-directory coverage as a collapsible tree.
    Tree {
        /// Path to the coverage report.
        report: PathBuf,

        /// Expand every directory instead of only single-child chains.
        #[arg(long)]
        expand_all: bool,
    },

    /// Print the per-file list with revision metadata as JSON.
    Files {
        /// Path to the coverage report.
        report: PathBuf,

        /// Revision the report was produced for.
        #[arg(long, default_value = "")]
        revision: String,

        /// Report time (RFC 3339). Defaults to now.
        #[arg(long)]
        time: Option<String>,
    },

    /// Render a source file as coverage-annotated HTML lines.
    Annotate {
        /// Path to the coverage report.
        report: PathBuf,

        /// Source file to annotate.
        source: PathBuf,

        /// File name as recorded in the report (default: SOURCE).
        #[arg(long)]
        name: Option<String>,

        /// Pre-highlighted markup to use instead of the plain source.
        #[arg(long)]
        markup: Option<PathBuf>,

        /// Hit/miss color scheme for --standalone pages.
        #[arg(long, value_enum, default_value_t = Theme::Light)]
        theme: Theme,

        /// Emit a complete HTML page instead of bare lines.
        #[arg(long)]
        standalone: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("COVVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_time(time: Option<&str>) -> Result<DateTime<Utc>> {
    match time {
        Some(t) => Ok(DateTime::parse_from_rfc3339(t)
            .with_context(|| format!("Invalid --time '{t}'"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let format = cli.format.as_deref();

    let output = match cli.command {
        Commands::Tree { report, expand_all } => cli::cmd_tree(&report, format, expand_all)?,
        Commands::Files {
            report,
            revision,
            time,
        } => cli::cmd_files(&report, format, &revision, parse_time(time.as_deref())?)?,
        Commands::Annotate {
            report,
            source,
            name,
            markup,
            theme,
            standalone,
        } => {
            let args = AnnotateArgs {
                source,
                name,
                markup,
                theme,
                standalone,
            };
            cli::cmd_annotate(&report, format, &args)?
        }
    };

    print!("{output}");
    Ok(())
}

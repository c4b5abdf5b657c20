//! HPI cleaning CLI.
//!
//! Reads the raw county (and, if present, state) HPI spreadsheets from
//! `data/raw/` under the project root and writes the cleaned growth-rate
//! CSVs to `output/`, then prints a summary of what was written.

use anyhow::{Context, Result};
use clap::Parser;
use hpi_core::{ProjectPaths, XlsxReader};
use hpi_runner::{run, RunConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "hpi-clean",
    about = "Clean raw HPI spreadsheets into growth-rate CSVs"
)]
struct Cli {
    /// Project root containing data/raw/. Defaults to the current directory,
    /// or to the project the binary was built in when the current directory
    /// has no data/raw/.
    #[arg(long)]
    root: Option<PathBuf>,

    /// TOML file overriding input file names, sheets, header offsets or columns.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run report as JSON instead of the text summary.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Show loader details.
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let paths = match cli.root {
        Some(root) => ProjectPaths::from_root(root),
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            default_paths(&cwd, std::env::current_exe().ok().as_deref())
        }
    };

    let config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    let report = run(&paths, &config, &XlsxReader::new())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}

/// Directories from the built binary (`<root>/target/<profile>/hpi-clean`)
/// up to the project root.
const BINARY_DEPTH: usize = 3;

/// Layout used without `--root`: the current directory if it holds
/// `data/raw/`, else the project above the binary if that one does. Falls
/// back to the current directory so a missing input is reported there.
fn default_paths(cwd: &Path, exe: Option<&Path>) -> ProjectPaths {
    let here = ProjectPaths::from_root(cwd);
    if here.raw_dir.is_dir() {
        return here;
    }
    exe.map(|exe| ProjectPaths::from_anchor(exe, BINARY_DEPTH))
        .filter(|anchored| anchored.raw_dir.is_dir())
        .unwrap_or(here)
}

/// Progress lines go to stdout as plain text. With `--json` they move to
/// stderr so stdout stays parseable.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let writer = if cli.json {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_level(false)
                .with_writer(writer),
        )
        .init();
}

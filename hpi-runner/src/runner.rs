//! Full cleaning run: county table, optional state table, then the summary.

use hpi_core::{
    build_county_growth_rates, build_state_growth_rates, PipelineError, ProjectPaths,
    SheetReader, COUNTY_OUTPUT_FILE, STATE_OUTPUT_FILE,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, RunConfig};
use crate::report::{summarize, ReportError, SummaryReport};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("summary error: {0}")]
    Report(#[from] ReportError),
}

/// Run both pipelines under `paths` and summarize what they wrote.
///
/// The county input is required; its absence fails the run before anything
/// is written. The state input is optional and is skipped with a notice.
pub fn run(
    paths: &ProjectPaths,
    config: &RunConfig,
    reader: &dyn SheetReader,
) -> Result<SummaryReport, RunError> {
    let county_input = paths.raw_dir.join(&config.county.file_name);
    if !county_input.exists() {
        return Err(PipelineError::MissingInput { path: county_input }.into());
    }

    info!("Building {COUNTY_OUTPUT_FILE} ...");
    let county = build_county_growth_rates(reader, &config.county, &paths.raw_dir, &paths.out_dir)?;

    let state_input = paths.raw_dir.join(&config.state.file_name);
    let state = if state_input.exists() {
        info!("Building {STATE_OUTPUT_FILE} ...");
        Some(build_state_growth_rates(
            reader,
            &config.state,
            &paths.raw_dir,
            &paths.out_dir,
        )?)
    } else {
        warn!(
            "Skipping {STATE_OUTPUT_FILE} ({} not found in data/raw/). \
             Add it per data/README.md to generate state output.",
            config.state.file_name
        );
        None
    };

    Ok(summarize(&county, state.as_ref(), &paths.out_dir)?)
}

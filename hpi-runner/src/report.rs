//! Run summary: re-reads the written CSVs and reports what ended up in them.
//!
//! Statistics come from the files on disk, not from the in-memory rows, so
//! the summary reflects exactly what a downstream reader will load. FIPS
//! codes are read back as text to keep their leading zeros.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use hpi_core::{CountySummary, StateSummary, COUNTY_OUTPUT_FILE, STATE_OUTPUT_FILE};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot re-read {}: {source}", .path.display())]
    Reread {
        path: std::path::PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Aggregates over one written output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputStats {
    pub rows: usize,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    /// Distinct values of the `State` column.
    pub unique_states: usize,
    /// Distinct values of the key column (FIPS code or Abbreviation).
    pub unique_keys: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountySection {
    pub summary: CountySummary,
    pub output: OutputStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSection {
    pub summary: StateSummary,
    pub output: OutputStats,
}

/// Everything printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub county: CountySection,
    /// Absent when the state pipeline was skipped or wrote no file.
    pub state: Option<StateSection>,
}

/// Value columns of `county_growth_rates.csv`.
pub const COUNTY_VALUE_COLUMNS: [&str; 2] = ["Annual Change (%)", "HPI"];

/// Value columns of `state_growth_rates.csv`.
pub const STATE_VALUE_COLUMNS: [&str; 2] =
    ["Annual Change (%)", "Rolling Avg Growth Rate (3yr)"];

/// Read `path` and compute [`OutputStats`].
///
/// `key_column` is forced to text and `value_columns` to Float64. Whole
/// numbers are written without a decimal point, so inference alone could
/// type a value column as integer and then fail on a later fraction.
pub fn collect_stats(
    path: &Path,
    key_column: &str,
    value_columns: &[&str],
) -> Result<OutputStats, ReportError> {
    let reread = |source| ReportError::Reread {
        path: path.to_path_buf(),
        source,
    };

    let mut fields = vec![
        Field::new(key_column.into(), DataType::String),
        Field::new("Year".into(), DataType::Int64),
    ];
    fields.extend(
        value_columns
            .iter()
            .map(|name| Field::new((*name).into(), DataType::Float64)),
    );
    let overwrite = Schema::from_iter(fields);
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_dtype_overwrite(Some(Arc::new(overwrite)))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(reread)?;

    let rows = df.height();
    let agg = df
        .lazy()
        .select([
            col("Year").min().alias("year_min"),
            col("Year").max().alias("year_max"),
            col("State")
                .n_unique()
                .cast(DataType::Int64)
                .alias("unique_states"),
            col(key_column)
                .n_unique()
                .cast(DataType::Int64)
                .alias("unique_keys"),
        ])
        .collect()
        .map_err(reread)?;

    let first_i64 = |name: &str| -> Result<Option<i64>, PolarsError> {
        Ok(agg.column(name)?.i64()?.get(0))
    };

    Ok(OutputStats {
        rows,
        year_min: first_i64("year_min").map_err(reread)?,
        year_max: first_i64("year_max").map_err(reread)?,
        unique_states: first_i64("unique_states").map_err(reread)?.unwrap_or(0) as usize,
        unique_keys: first_i64("unique_keys").map_err(reread)?.unwrap_or(0) as usize,
    })
}

/// Build the run summary from the files in `out_dir`.
///
/// The state section is omitted, without error, when `state` is `None`
/// or `state_growth_rates.csv` does not exist.
pub fn summarize(
    county: &CountySummary,
    state: Option<&StateSummary>,
    out_dir: &Path,
) -> Result<SummaryReport, ReportError> {
    let county_output = collect_stats(
        &out_dir.join(COUNTY_OUTPUT_FILE),
        "FIPS code",
        &COUNTY_VALUE_COLUMNS,
    )?;

    let state_path = out_dir.join(STATE_OUTPUT_FILE);
    let state = match state {
        Some(summary) if state_path.exists() => Some(StateSection {
            summary: *summary,
            output: collect_stats(&state_path, "Abbreviation", &STATE_VALUE_COLUMNS)?,
        }),
        _ => None,
    };

    Ok(SummaryReport {
        county: CountySection {
            summary: *county,
            output: county_output,
        },
        state,
    })
}

fn year_range(stats: &OutputStats) -> String {
    match (stats.year_min, stats.year_max) {
        (Some(min), Some(max)) => format!("{min} to {max}"),
        _ => "n/a".to_string(),
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "DATA CLEANING SUMMARY")?;
        writeln!(f, "{rule}")?;

        let county = &self.county;
        writeln!(f)?;
        writeln!(f, "--- {COUNTY_OUTPUT_FILE} ---")?;
        writeln!(f, "  Rows: {}", county.output.rows)?;
        writeln!(f, "  Year range: {}", year_range(&county.output))?;
        writeln!(f, "  Unique states: {}", county.output.unique_states)?;
        writeln!(f, "  Unique counties (FIPS): {}", county.output.unique_keys)?;
        writeln!(
            f,
            "  Rows dropped (missing Annual Change %): {}",
            county.summary.dropped_annual_change
        )?;
        writeln!(
            f,
            "  Rows dropped (missing key columns): {}",
            county.summary.dropped_missing_key
        )?;

        if let Some(state) = &self.state {
            writeln!(f)?;
            writeln!(f, "--- {STATE_OUTPUT_FILE} ---")?;
            writeln!(f, "  Rows: {}", state.output.rows)?;
            writeln!(f, "  Year range: {}", year_range(&state.output))?;
            writeln!(f, "  Unique states: {}", state.output.unique_states)?;
            writeln!(f, "  Unique abbreviations: {}", state.output.unique_keys)?;
            writeln!(
                f,
                "  Rows dropped (missing key columns): {}",
                state.summary.dropped_missing
            )?;
        }

        write!(f, "{rule}")
    }
}

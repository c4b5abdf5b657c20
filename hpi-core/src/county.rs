//! County growth rates for the choropleth map.
//!
//! Steps, in order:
//! 1. read the county sheet into typed records
//! 2. normalize FIPS codes to five zero-padded characters
//! 3. drop rows whose Annual Change (%) is not numeric
//! 4. drop rows missing FIPS code, State, County or Year
//! 5. sort by (State, County, Year) and write `county_growth_rates.csv`
//!
//! Steps 3 and 4 are counted separately; a row failing both is counted
//! once, under Annual Change.

use std::path::Path;

use tracing::info;

use crate::coerce::{to_integer, to_number, to_text};
use crate::error::PipelineError;
use crate::output::{optional_number, write_csv, CsvRecord, COUNTY_OUTPUT_FILE};
use crate::sheet::{LoadError, SheetReader, SheetTable};
use crate::source::{CountyColumns, CountySource};
use crate::summary::CountySummary;

/// Width of a county FIPS code (2-digit state + 3-digit county).
pub const FIPS_WIDTH: usize = 5;

/// One row of the county sheet, with each cell coerced to its column type.
/// `None` marks a value that was missing or could not be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCountyRecord {
    pub fips: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub year: Option<i64>,
    pub annual_change: Option<f64>,
    pub hpi: Option<f64>,
}

/// One row of `county_growth_rates.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyRow {
    pub state: String,
    pub county: String,
    pub fips: String,
    pub year: i64,
    pub annual_change: f64,
    pub hpi: Option<f64>,
}

impl CsvRecord for CountyRow {
    fn header() -> &'static [&'static str] {
        &[
            "State",
            "County",
            "FIPS code",
            "Year",
            "Annual Change (%)",
            "HPI",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.state.clone(),
            self.county.clone(),
            self.fips.clone(),
            self.year.to_string(),
            optional_number(Some(self.annual_change)),
            optional_number(self.hpi),
        ]
    }
}

/// Pad a FIPS code to five characters: `"1001"` becomes `"01001"`.
///
/// Surrounding whitespace is stripped first. Values already five characters
/// or longer are returned unchanged; nothing is truncated.
pub fn clean_county_fips(raw: &str) -> String {
    let trimmed = raw.trim();
    format!("{:0>width$}", trimmed, width = FIPS_WIDTH)
}

/// Map each sheet row to a typed record. Fails only when a configured
/// column is absent from the header.
pub fn read_county_records(
    table: &SheetTable,
    columns: &CountyColumns,
) -> Result<Vec<RawCountyRecord>, LoadError> {
    let fips = table.require_column(&columns.fips)?;
    let state = table.require_column(&columns.state)?;
    let county = table.require_column(&columns.county)?;
    let year = table.require_column(&columns.year)?;
    let annual_change = table.require_column(&columns.annual_change)?;
    let hpi = table.require_column(&columns.hpi)?;

    Ok((0..table.row_count())
        .map(|row| RawCountyRecord {
            fips: to_text(table.cell(row, fips)),
            state: to_text(table.cell(row, state)),
            county: to_text(table.cell(row, county)),
            year: to_integer(table.cell(row, year)),
            annual_change: to_number(table.cell(row, annual_change)),
            hpi: to_number(table.cell(row, hpi)),
        })
        .collect())
}

/// Normalize every FIPS code in place. Codes that are blank after
/// trimming become missing.
pub fn normalize_fips(records: &mut [RawCountyRecord]) {
    for record in records {
        record.fips = record
            .fips
            .take()
            .filter(|f| !f.trim().is_empty())
            .map(|f| clean_county_fips(&f));
    }
}

/// Drop rows without a numeric Annual Change (%). Returns the kept rows
/// and the number dropped.
pub fn drop_missing_annual_change(
    records: Vec<RawCountyRecord>,
) -> (Vec<RawCountyRecord>, usize) {
    let before = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|r| r.annual_change.is_some())
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Drop rows missing any key column and convert the rest to output rows.
pub fn drop_missing_keys(records: Vec<RawCountyRecord>) -> (Vec<CountyRow>, usize) {
    let before = records.len();
    let rows: Vec<CountyRow> = records
        .into_iter()
        .filter_map(|r| {
            Some(CountyRow {
                state: r.state?,
                county: r.county?,
                fips: r.fips?,
                year: r.year?,
                annual_change: r.annual_change?,
                hpi: r.hpi,
            })
        })
        .collect();
    let dropped = before - rows.len();
    (rows, dropped)
}

/// Stable sort by (State, County, Year).
pub fn sort_county_rows(rows: &mut [CountyRow]) {
    rows.sort_by(|a, b| {
        (&a.state, &a.county, a.year).cmp(&(&b.state, &b.county, b.year))
    });
}

/// Run every cleaning step over an already-loaded table.
pub fn clean_county_table(
    table: &SheetTable,
    columns: &CountyColumns,
) -> Result<(Vec<CountyRow>, CountySummary), LoadError> {
    let mut summary = CountySummary {
        initial_rows: table.row_count(),
        ..Default::default()
    };

    let mut records = read_county_records(table, columns)?;
    normalize_fips(&mut records);

    let (records, dropped) = drop_missing_annual_change(records);
    summary.dropped_annual_change = dropped;
    if dropped > 0 {
        info!(
            "  Dropped {dropped} rows with missing or non-numeric '{}'.",
            columns.annual_change
        );
    }

    let (mut rows, dropped) = drop_missing_keys(records);
    summary.dropped_missing_key = dropped;
    if dropped > 0 {
        info!(
            "  Dropped {dropped} rows missing one of [{}, {}, {}, {}].",
            columns.fips, columns.state, columns.county, columns.year
        );
    }

    sort_county_rows(&mut rows);
    summary.final_rows = rows.len();
    Ok((rows, summary))
}

/// Build `county_growth_rates.csv` from the county spreadsheet in `raw_dir`.
pub fn build_county_growth_rates(
    reader: &dyn SheetReader,
    source: &CountySource,
    raw_dir: &Path,
    out_dir: &Path,
) -> Result<CountySummary, PipelineError> {
    let input = raw_dir.join(&source.file_name);
    let table = reader
        .read(&input, source.sheet.as_deref(), source.header_offset)
        .map_err(|e| PipelineError::read(&input, e))?;

    let (rows, summary) =
        clean_county_table(&table, &source.columns).map_err(|e| PipelineError::read(&input, e))?;

    let path = write_csv(out_dir, COUNTY_OUTPUT_FILE, &rows)?;
    info!("  Saved {} rows to {}.", summary.final_rows, path.display());
    Ok(summary)
}

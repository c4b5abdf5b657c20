//! State growth rates for the ranking view.
//!
//! Unlike the county table, a non-numeric Annual Change (%) does not drop
//! the row: the value is left blank and the row is kept. Only rows missing
//! Abbreviation, State or Year are dropped.

use std::path::Path;

use tracing::info;

use crate::coerce::{to_integer, to_number, to_text};
use crate::error::PipelineError;
use crate::output::{optional_number, write_csv, CsvRecord, STATE_OUTPUT_FILE};
use crate::sheet::{LoadError, SheetReader, SheetTable};
use crate::source::{StateColumns, StateSource};
use crate::summary::StateSummary;

/// Trailing window, in years, for the rolling growth average.
pub const ROLLING_WINDOW: usize = 3;

/// One row of the state sheet after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStateRecord {
    pub abbreviation: Option<String>,
    pub state: Option<String>,
    pub year: Option<i64>,
    pub annual_change: Option<f64>,
}

/// One row of `state_growth_rates.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRow {
    pub abbreviation: String,
    pub state: String,
    pub year: i64,
    pub annual_change: Option<f64>,
    pub rolling_avg: Option<f64>,
}

impl CsvRecord for StateRow {
    fn header() -> &'static [&'static str] {
        &[
            "Abbreviation",
            "State",
            "Year",
            "Annual Change (%)",
            "Rolling Avg Growth Rate (3yr)",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.abbreviation.clone(),
            self.state.clone(),
            self.year.to_string(),
            optional_number(self.annual_change),
            optional_number(self.rolling_avg),
        ]
    }
}

pub fn read_state_records(
    table: &SheetTable,
    columns: &StateColumns,
) -> Result<Vec<RawStateRecord>, LoadError> {
    let abbreviation = table.require_column(&columns.abbreviation)?;
    let state = table.require_column(&columns.state)?;
    let year = table.require_column(&columns.year)?;
    let annual_change = table.require_column(&columns.annual_change)?;

    Ok((0..table.row_count())
        .map(|row| RawStateRecord {
            abbreviation: to_text(table.cell(row, abbreviation)),
            state: to_text(table.cell(row, state)),
            year: to_integer(table.cell(row, year)),
            annual_change: to_number(table.cell(row, annual_change)),
        })
        .collect())
}

/// Drop rows missing Abbreviation, State or Year. A blank Annual Change (%)
/// is carried through as `None`.
pub fn drop_missing_keys(records: Vec<RawStateRecord>) -> (Vec<StateRow>, usize) {
    let before = records.len();
    let rows: Vec<StateRow> = records
        .into_iter()
        .filter_map(|r| {
            Some(StateRow {
                abbreviation: r.abbreviation?,
                state: r.state?,
                year: r.year?,
                annual_change: r.annual_change,
                rolling_avg: None,
            })
        })
        .collect();
    let dropped = before - rows.len();
    (rows, dropped)
}

/// Stable sort by (Abbreviation, Year).
pub fn sort_state_rows(rows: &mut [StateRow]) {
    rows.sort_by(|a, b| (&a.abbreviation, a.year).cmp(&(&b.abbreviation, b.year)));
}

/// Trailing mean over up to `window` values ending at each position.
///
/// Absent values are excluded from both the sum and the count; a window
/// with no present values yields `None`. There is no minimum number of
/// observations, so the first positions average over what is available.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// Fill `rolling_avg` per Abbreviation group. Rows must already be sorted
/// by (Abbreviation, Year).
pub fn apply_rolling_average(rows: &mut [StateRow]) {
    let mut start = 0;
    while start < rows.len() {
        let end = rows[start..]
            .iter()
            .position(|r| r.abbreviation != rows[start].abbreviation)
            .map_or(rows.len(), |len| start + len);

        let changes: Vec<Option<f64>> = rows[start..end].iter().map(|r| r.annual_change).collect();
        for (row, avg) in rows[start..end]
            .iter_mut()
            .zip(rolling_mean(&changes, ROLLING_WINDOW))
        {
            row.rolling_avg = avg;
        }
        start = end;
    }
}

/// Run every cleaning step over an already-loaded table.
pub fn clean_state_table(
    table: &SheetTable,
    columns: &StateColumns,
) -> Result<(Vec<StateRow>, StateSummary), LoadError> {
    let mut summary = StateSummary {
        initial_rows: table.row_count(),
        ..Default::default()
    };

    let records = read_state_records(table, columns)?;
    let (mut rows, dropped) = drop_missing_keys(records);
    summary.dropped_missing = dropped;
    if dropped > 0 {
        info!(
            "  Dropped {dropped} rows missing one of [{}, {}, {}].",
            columns.abbreviation, columns.state, columns.year
        );
    }

    sort_state_rows(&mut rows);
    apply_rolling_average(&mut rows);
    // Output order: (Abbreviation, Year).
    sort_state_rows(&mut rows);

    summary.final_rows = rows.len();
    Ok((rows, summary))
}

/// Build `state_growth_rates.csv` from the state spreadsheet in `raw_dir`.
pub fn build_state_growth_rates(
    reader: &dyn SheetReader,
    source: &StateSource,
    raw_dir: &Path,
    out_dir: &Path,
) -> Result<StateSummary, PipelineError> {
    let input = raw_dir.join(&source.file_name);
    let table = reader
        .read(&input, source.sheet.as_deref(), source.header_offset)
        .map_err(|e| PipelineError::read(&input, e))?;

    let (rows, summary) =
        clean_state_table(&table, &source.columns).map_err(|e| PipelineError::read(&input, e))?;

    let path = write_csv(out_dir, STATE_OUTPUT_FILE, &rows)?;
    info!("  Saved {} rows to {}.", summary.final_rows, path.display());
    Ok(summary)
}

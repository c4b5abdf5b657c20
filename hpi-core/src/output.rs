//! CSV output for the cleaned tables.
//!
//! Both outputs are plain comma-separated UTF-8 with a header row and no
//! index column. Missing values are empty fields. Text is written
//! verbatim, so a FIPS code reads back as `01001` and a text-typed reader
//! keeps the leading zero.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::coerce::format_number;
use crate::error::PipelineError;

pub const COUNTY_OUTPUT_FILE: &str = "county_growth_rates.csv";
pub const STATE_OUTPUT_FILE: &str = "state_growth_rates.csv";

/// A row that can be written as one CSV record.
pub trait CsvRecord {
    /// Output column names, in order.
    fn header() -> &'static [&'static str];

    /// Field values, in header order.
    fn fields(&self) -> Vec<String>;
}

/// Render an optional number; absent values become an empty field.
pub fn optional_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Serialize `rows` to CSV bytes.
pub fn to_csv_bytes<R: CsvRecord>(rows: &[R]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(R::header())?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Write `rows` to `out_dir/file_name`, creating `out_dir` if needed.
/// Returns the written path.
pub fn write_csv<R: CsvRecord>(
    out_dir: &Path,
    file_name: &str,
    rows: &[R],
) -> Result<PathBuf, PipelineError> {
    std::fs::create_dir_all(out_dir).map_err(|e| PipelineError::write(out_dir, e))?;

    let path = out_dir.join(file_name);
    let bytes = to_csv_bytes(rows).map_err(|e| PipelineError::write(&path, e))?;

    let mut file = File::create(&path).map_err(|e| PipelineError::write(&path, e))?;
    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| PipelineError::write(&path, e))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote csv");
    Ok(path)
}

//! Input layouts for the two raw spreadsheets.
//!
//! Both exports share the same shape: five banner rows, then a header row,
//! then data. File names, sheet selection, the banner height and every
//! column name are kept here so a change in the export format is a
//! configuration change rather than a code change.

use serde::{Deserialize, Serialize};

/// Rows above the header in the published HPI exports.
pub const DEFAULT_HEADER_OFFSET: usize = 5;

pub const COUNTY_INPUT_FILE: &str = "hpi_at_county.xlsx";
pub const STATE_INPUT_FILE: &str = "hpi_at_state.xlsx";

/// Column names in the county export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountyColumns {
    pub fips: String,
    pub state: String,
    pub county: String,
    pub year: String,
    pub annual_change: String,
    pub hpi: String,
}

impl Default for CountyColumns {
    fn default() -> Self {
        Self {
            fips: "FIPS code".into(),
            state: "State".into(),
            county: "County".into(),
            year: "Year".into(),
            annual_change: "Annual Change (%)".into(),
            hpi: "HPI".into(),
        }
    }
}

/// Column names in the state export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateColumns {
    pub abbreviation: String,
    pub state: String,
    pub year: String,
    pub annual_change: String,
}

impl Default for StateColumns {
    fn default() -> Self {
        Self {
            abbreviation: "Abbreviation".into(),
            state: "State".into(),
            year: "Year".into(),
            annual_change: "Annual Change (%)".into(),
        }
    }
}

/// Where and how to read the county spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountySource {
    /// File name inside the raw data directory.
    pub file_name: String,
    /// Sheet to read. `None` reads the first sheet in the workbook.
    pub sheet: Option<String>,
    /// Number of rows skipped before the header row.
    pub header_offset: usize,
    pub columns: CountyColumns,
}

impl Default for CountySource {
    fn default() -> Self {
        Self {
            file_name: COUNTY_INPUT_FILE.into(),
            sheet: None,
            header_offset: DEFAULT_HEADER_OFFSET,
            columns: CountyColumns::default(),
        }
    }
}

/// Where and how to read the state spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateSource {
    pub file_name: String,
    pub sheet: Option<String>,
    pub header_offset: usize,
    pub columns: StateColumns,
}

impl Default for StateSource {
    fn default() -> Self {
        Self {
            file_name: STATE_INPUT_FILE.into(),
            sheet: None,
            header_offset: DEFAULT_HEADER_OFFSET,
            columns: StateColumns::default(),
        }
    }
}

//! HPI Core: loading and cleaning of the raw housing price index exports.
//!
//! This crate contains the two fixed cleaning pipelines and what they share:
//! - Project layout (`data/raw/` in, `output/` out)
//! - Input layouts: file names, banner height, column names
//! - Spreadsheet loading behind the `SheetReader` trait (calamine in production)
//! - Lenient cell coercion
//! - County pipeline: FIPS padding, drops, sort, `county_growth_rates.csv`
//! - State pipeline: drops, 3-year rolling growth, `state_growth_rates.csv`

pub mod coerce;
pub mod county;
pub mod error;
pub mod output;
pub mod paths;
pub mod sheet;
pub mod source;
pub mod state;
pub mod summary;

pub use county::{build_county_growth_rates, clean_county_fips, CountyRow, RawCountyRecord};
pub use error::PipelineError;
pub use output::{COUNTY_OUTPUT_FILE, STATE_OUTPUT_FILE};
pub use paths::ProjectPaths;
pub use sheet::{Cell, LoadError, SheetReader, SheetTable, XlsxReader};
pub use source::{CountyColumns, CountySource, StateColumns, StateSource};
pub use state::{build_state_growth_rates, RawStateRecord, StateRow};
pub use summary::{CountySummary, StateSummary};

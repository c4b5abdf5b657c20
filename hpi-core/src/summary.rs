use serde::{Deserialize, Serialize};

/// Row accounting for one county run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountySummary {
    pub initial_rows: usize,
    /// Rows whose Annual Change (%) was missing or not numeric.
    pub dropped_annual_change: usize,
    /// Rows missing FIPS code, State, County or Year.
    pub dropped_missing_key: usize,
    pub final_rows: usize,
}

/// Row accounting for one state run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub initial_rows: usize,
    /// Rows missing Abbreviation, State or Year.
    pub dropped_missing: usize,
    pub final_rows: usize,
}

//! HPI Runner: drives a complete cleaning run.
//!
//! This crate builds on `hpi-core` to provide:
//! - TOML run configuration overriding the default input layouts
//! - The orchestrator (county required, state optional)
//! - The end-of-run summary, computed by re-reading the written CSVs

pub mod config;
pub mod report;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use report::{
    collect_stats, summarize, CountySection, OutputStats, ReportError, StateSection,
    SummaryReport, COUNTY_VALUE_COLUMNS, STATE_VALUE_COLUMNS,
};
pub use runner::{run, RunError};

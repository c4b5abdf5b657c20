//! Whole-run scenarios against a scratch project root.

use std::collections::HashMap;
use std::path::Path;

use hpi_core::{
    Cell, LoadError, PipelineError, ProjectPaths, SheetReader, SheetTable, COUNTY_OUTPUT_FILE,
    STATE_OUTPUT_FILE,
};
use hpi_runner::{
    collect_stats, run, RunConfig, RunError, COUNTY_VALUE_COLUMNS, STATE_VALUE_COLUMNS,
};

/// Serves tables by input file name. The files themselves only need to
/// exist on disk so the orchestrator sees them.
struct MemoryReader {
    tables: HashMap<String, SheetTable>,
}

impl SheetReader for MemoryReader {
    fn read(&self, path: &Path, _: Option<&str>, _: usize) -> Result<SheetTable, LoadError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.tables.get(&name).cloned().ok_or_else(|| LoadError::Open {
            path: path.to_path_buf(),
            reason: "no such table".into(),
        })
    }
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn county_table() -> SheetTable {
    let row = |fips: &str, state: &str, county: &str, year: i64, change: Cell| {
        vec![
            Cell::from(fips),
            Cell::from(state),
            Cell::from(county),
            Cell::from(year),
            change,
            Cell::from(100.0),
        ]
    };
    SheetTable::new(
        header(&["FIPS code", "State", "County", "Year", "Annual Change (%)", "HPI"]),
        vec![
            row("1001", "Alabama", "Autauga", 2000, Cell::from(3.5)),
            row("1001", "Alabama", "Autauga", 2001, Cell::from(2.5)),
            row("2020", "Alaska", "Anchorage", 2002, Cell::from(-1.0)),
            row("1003", "Alabama", "Baldwin", 2001, Cell::from("N/A")),
        ],
    )
}

fn state_table() -> SheetTable {
    let row = |abbr: &str, state: &str, year: i64, change: f64| {
        vec![Cell::from(abbr), Cell::from(state), Cell::from(year), Cell::from(change)]
    };
    SheetTable::new(
        header(&["Abbreviation", "State", "Year", "Annual Change (%)"]),
        vec![
            row("AL", "Alabama", 1999, 1.0),
            row("AL", "Alabama", 2000, 2.0),
            row("AK", "Alaska", 2000, 3.0),
        ],
    )
}

fn reader() -> MemoryReader {
    let mut tables = HashMap::new();
    tables.insert("hpi_at_county.xlsx".to_string(), county_table());
    tables.insert("hpi_at_state.xlsx".to_string(), state_table());
    MemoryReader { tables }
}

/// Scratch project with placeholder files for the named raw inputs.
fn project(inputs: &[&str]) -> (tempfile::TempDir, ProjectPaths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = ProjectPaths::from_root(dir.path());
    std::fs::create_dir_all(&paths.raw_dir).unwrap();
    for name in inputs {
        std::fs::write(paths.raw_dir.join(name), b"").unwrap();
    }
    (dir, paths)
}

#[test]
fn missing_county_input_fails_before_any_output() {
    let (_dir, paths) = project(&["hpi_at_state.xlsx"]);

    let err = run(&paths, &RunConfig::default(), &reader()).unwrap_err();

    match &err {
        RunError::Pipeline(PipelineError::MissingInput { path }) => {
            assert_eq!(path, &paths.raw_dir.join("hpi_at_county.xlsx"));
        }
        other => panic!("expected MissingInput, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("County data not found: "));
    assert!(message.ends_with("per data/README.md."));
    assert!(!paths.out_dir.exists());
}

#[test]
fn absent_state_input_is_skipped() {
    let (_dir, paths) = project(&["hpi_at_county.xlsx"]);

    let report = run(&paths, &RunConfig::default(), &reader()).unwrap();

    assert!(report.state.is_none());
    assert!(paths.out_dir.join(COUNTY_OUTPUT_FILE).exists());
    assert!(!paths.out_dir.join(STATE_OUTPUT_FILE).exists());
    assert!(!report.to_string().contains(STATE_OUTPUT_FILE));
}

#[test]
fn county_stats_come_from_the_written_file() {
    let (_dir, paths) = project(&["hpi_at_county.xlsx"]);

    let report = run(&paths, &RunConfig::default(), &reader()).unwrap();
    let county = &report.county;

    assert_eq!(county.summary.initial_rows, 4);
    assert_eq!(county.summary.dropped_annual_change, 1);
    assert_eq!(county.summary.final_rows, 3);
    assert_eq!(county.output.rows, 3);
    assert_eq!(county.output.year_min, Some(2000));
    assert_eq!(county.output.year_max, Some(2002));
    assert_eq!(county.output.unique_states, 2);
    assert_eq!(county.output.unique_keys, 2);
}

#[test]
fn both_inputs_produce_both_sections() {
    let (_dir, paths) = project(&["hpi_at_county.xlsx", "hpi_at_state.xlsx"]);

    let report = run(&paths, &RunConfig::default(), &reader()).unwrap();

    let state = report.state.as_ref().expect("state section");
    assert_eq!(state.summary.final_rows, 3);
    assert_eq!(state.output.rows, 3);
    assert_eq!(state.output.year_min, Some(1999));
    assert_eq!(state.output.year_max, Some(2000));
    assert_eq!(state.output.unique_states, 2);
    assert_eq!(state.output.unique_keys, 2);

    let text = report.to_string();
    assert!(text.contains("--- county_growth_rates.csv ---"));
    assert!(text.contains("--- state_growth_rates.csv ---"));
}

#[test]
fn state_read_failure_fails_the_run() {
    let (_dir, paths) = project(&["hpi_at_county.xlsx", "hpi_at_state.xlsx"]);
    let mut reader = reader();
    reader.tables.remove("hpi_at_state.xlsx");

    let err = run(&paths, &RunConfig::default(), &reader).unwrap_err();

    assert!(matches!(
        err,
        RunError::Pipeline(PipelineError::FileRead { .. })
    ));
    assert!(!paths.out_dir.join(STATE_OUTPUT_FILE).exists());
}

#[test]
fn configured_file_names_are_used() {
    let (_dir, paths) = project(&["counties.xlsx"]);
    let config = RunConfig::from_toml("[county]\nfile_name = \"counties.xlsx\"\n").unwrap();
    let mut reader = reader();
    let table = reader.tables.remove("hpi_at_county.xlsx").unwrap();
    reader.tables.insert("counties.xlsx".to_string(), table);

    let report = run(&paths, &config, &reader).unwrap();

    assert_eq!(report.county.output.rows, 3);
}

#[test]
fn report_serializes_absent_state_as_null() {
    let (_dir, paths) = project(&["hpi_at_county.xlsx"]);

    let report = run(&paths, &RunConfig::default(), &reader()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["state"].is_null());
    assert_eq!(json["county"]["output"]["rows"], 3);
    assert_eq!(json["county"]["summary"]["dropped_annual_change"], 1);
}

#[test]
fn fips_codes_keep_leading_zeros_on_reread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(COUNTY_OUTPUT_FILE);
    std::fs::write(
        &path,
        "State,County,FIPS code,Year,Annual Change (%),HPI\n\
         Alabama,Autauga,01001,2000,3.5,100\n\
         Alabama,Autauga,1001,2001,2.5,101\n",
    )
    .unwrap();

    let stats = collect_stats(&path, "FIPS code", &COUNTY_VALUE_COLUMNS).unwrap();

    // "01001" and "1001" are distinct codes when read as text.
    assert_eq!(stats.unique_keys, 2);
    assert_eq!(stats.rows, 2);
}

#[test]
fn county_stats_survive_a_fraction_after_many_whole_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(COUNTY_OUTPUT_FILE);
    let mut text = String::from("State,County,FIPS code,Year,Annual Change (%),HPI\n");
    for i in 0..150 {
        text.push_str(&format!("Alabama,Autauga,01001,{},2,{}\n", 1850 + i, 100 + i));
    }
    text.push_str("Alabama,Autauga,01001,2000,2.5,100.25\n");
    std::fs::write(&path, text).unwrap();

    let stats = collect_stats(&path, "FIPS code", &COUNTY_VALUE_COLUMNS).unwrap();

    assert_eq!(stats.rows, 151);
    assert_eq!(stats.year_min, Some(1850));
    assert_eq!(stats.year_max, Some(2000));
    assert_eq!(stats.unique_keys, 1);
}

#[test]
fn state_stats_survive_a_fraction_after_many_whole_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(STATE_OUTPUT_FILE);
    let mut text = String::from(
        "Abbreviation,State,Year,Annual Change (%),Rolling Avg Growth Rate (3yr)\n",
    );
    for i in 0..150 {
        text.push_str(&format!("AL,Alabama,{},3,3\n", 1850 + i));
    }
    text.push_str("AL,Alabama,2000,4.5,3.5\n");
    std::fs::write(&path, text).unwrap();

    let stats = collect_stats(&path, "Abbreviation", &STATE_VALUE_COLUMNS).unwrap();

    assert_eq!(stats.rows, 151);
    assert_eq!(stats.unique_states, 1);
    assert_eq!(stats.unique_keys, 1);
}

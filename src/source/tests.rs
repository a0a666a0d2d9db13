use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, tempdir};

use super::schema::{ACCOUNT, SERVICE_LEVEL_PERCENT};
use super::{AGENT_STATUS_SCHEMA, SERVICE_LEVEL_SCHEMA, SourceError, read_snapshot};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::with_suffix(".csv").expect("temp file should be created");
    write!(temp_file, "{}", content).expect("csv should be written");
    temp_file
}

#[test]
fn missing_file_is_not_found() {
    let temp = tempdir().expect("tempdir should be created");
    let path = temp.path().join("agent_status.csv");

    let error = read_snapshot(&path, &AGENT_STATUS_SCHEMA).expect_err("file is absent");
    assert!(matches!(error, SourceError::NotFound { .. }));
    assert_eq!(error.kind(), "not_found");
}

#[test]
fn zero_byte_file_is_empty() {
    let temp = tempdir().expect("tempdir should be created");
    let path = temp.path().join("agent_status.csv");
    fs::write(&path, "").expect("file should be written");

    let error = read_snapshot(&path, &AGENT_STATUS_SCHEMA).expect_err("file is empty");
    assert!(matches!(error, SourceError::Empty { .. }));
}

#[test]
fn header_only_file_is_empty() {
    let file = create_temp_csv("Login ID,Status,Duration (min)\n");

    let error = read_snapshot(file.path(), &AGENT_STATUS_SCHEMA).expect_err("no data rows");
    assert!(matches!(error, SourceError::Empty { .. }));
}

#[test]
fn ragged_row_is_parse_error() {
    let file = create_temp_csv(
        "Login ID,Status,Duration (min)\n1001,AUX,15\n1002,Break,7,extra,cells\n",
    );

    let error = read_snapshot(file.path(), &AGENT_STATUS_SCHEMA).expect_err("row has extra fields");
    assert!(matches!(error, SourceError::Parse { .. }));
    assert_eq!(error.kind(), "parse");
}

#[test]
fn missing_required_column_is_schema_mismatch() {
    let file = create_temp_csv("Login ID,Status\n1001,AUX\n");

    let error = read_snapshot(file.path(), &AGENT_STATUS_SCHEMA).expect_err("duration is absent");
    match error {
        SourceError::SchemaMismatch { missing, .. } => {
            assert_eq!(missing, vec!["duration_minutes".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn preserves_header_order_and_reads_cells_as_text() {
    let file = create_temp_csv(
        "Agent Name,Login ID,Account,Status,Duration (min)\nMona,1001,SMB Account,AUX,15\nSami,1002,SMB Account,Break,7.5\n",
    );

    let snapshot = read_snapshot(file.path(), &AGENT_STATUS_SCHEMA).expect("read should succeed");
    let names: Vec<String> = snapshot
        .frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    assert_eq!(
        names,
        vec!["Agent Name", "Login ID", "Account", "Status", "Duration (min)"]
    );
    assert_eq!(snapshot.height(), 2);

    let login_ids = super::text_column(&snapshot.frame, "Login ID").expect("login ids");
    assert_eq!(login_ids.get(0), Some("1001"));
    let durations = super::text_column(&snapshot.frame, "Duration (min)").expect("durations");
    assert_eq!(durations.get(1), Some("7.5"));
}

#[test]
fn service_level_reader_accepts_either_header_spelling() {
    let modern = create_temp_csv("Account,SL %\nX,80.0\n");
    let legacy = create_temp_csv("Account,Service Level\nX,80.0\n");

    let modern = read_snapshot(modern.path(), &SERVICE_LEVEL_SCHEMA).expect("modern header");
    let legacy = read_snapshot(legacy.path(), &SERVICE_LEVEL_SCHEMA).expect("legacy header");

    assert_eq!(modern.columns.get(SERVICE_LEVEL_PERCENT), Some("SL %"));
    assert_eq!(legacy.columns.get(SERVICE_LEVEL_PERCENT), Some("Service Level"));
    assert_eq!(legacy.columns.get(ACCOUNT), Some("Account"));
}

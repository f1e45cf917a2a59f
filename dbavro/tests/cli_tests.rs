//! Command-line tests for the dbavro binary.
//!
//! Each test runs the compiled binary against the demo snapshot and checks
//! the emitted `.avsc` or the failure exit status.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::{Command, Output};

fn demo(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("demos")
        .join(file)
}

fn dbavro(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dbavro"))
        .args(args)
        .env_remove("DBAVRO_CONFIG")
        .output()
        .expect("Failed to run dbavro")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "dbavro failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_generate_table_to_stdout() {
    let snapshot = demo("snapshot.json");
    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--table",
        "ORDERS",
    ]);
    let schema = stdout_json(&output);

    assert_eq!(schema["type"], "record");
    assert_eq!(schema["name"], "ORDERS");
    assert_eq!(schema["doc"], "Import of ORDERS");
    assert_eq!(schema["tableName"], "ORDERS");

    let fields = schema["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0]["name"], "ORDER_ID");
    assert_eq!(fields[0]["type"], json!(["null", "long"]));
    assert_eq!(fields[0]["default"], Value::Null);
    assert_eq!(fields[0]["sqlType"], "-5");
    // decimal logical type is off by default
    assert_eq!(fields[2]["type"], json!(["null", "string"]));
}

#[test]
fn test_generate_with_config_file_to_output() {
    let snapshot = demo("snapshot.json");
    let config = demo("config.json");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("orders.avsc");

    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--table",
        "ORDERS",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let schema: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(schema["namespace"], "com.example.shop");
    assert_eq!(
        schema["fields"][2]["type"],
        json!(["null", {"type": "bytes", "logicalType": "decimal", "precision": 12, "scale": 2}])
    );
    assert_eq!(schema["fields"][3]["type"], json!(["null", "string"]));
}

#[test]
fn test_flags_override_config_file() {
    let snapshot = demo("snapshot.json");
    let config = demo("config.json");
    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--table",
        "ORDERS",
        "--map-column-java",
        "ORDER_ID=String,TOTAL=double",
        "--package-name",
        "org.example",
    ]);
    let schema = stdout_json(&output);

    assert_eq!(schema["namespace"], "org.example");
    assert_eq!(schema["fields"][0]["type"], json!(["null", "string"]));
    assert_eq!(schema["fields"][2]["type"], json!(["null", "double"]));
}

#[test]
fn test_query_import_with_schema_name() {
    let snapshot = demo("snapshot.json");
    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--schema-name",
        "CustomName",
        "--decimal-logical-types",
        "--decimal-default-scale",
        "4",
    ]);
    let schema = stdout_json(&output);

    assert_eq!(schema["name"], "CustomName");
    assert_eq!(schema["doc"], "Import of QueryResult");
    assert_eq!(
        schema["fields"][2]["type"][1],
        json!({"type": "bytes", "logicalType": "decimal", "precision": 38, "scale": 4})
    );
}

#[test]
fn test_invalid_override_fails() {
    let snapshot = demo("snapshot.json");
    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--table",
        "ORDERS",
        "--map-column-java",
        "TOTAL=Money",
    ]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TOTAL"), "{stderr}");
    assert!(stderr.contains("Money"), "{stderr}");
}

#[test]
fn test_unknown_table_fails() {
    let snapshot = demo("snapshot.json");
    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--table",
        "CUSTOMERS",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CUSTOMERS"));
}

#[test]
fn test_missing_metadata_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let output = dbavro(&["generate", "--metadata", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_malformed_config_fails() {
    let snapshot = demo("snapshot.json");
    let mut config = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut config, br#"{"decimal_default_precision": 40}"#).unwrap();

    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_flag_corrects_config_file_value() {
    let snapshot = demo("snapshot.json");
    let mut config = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(
        &mut config,
        br#"{"enable_decimal_logical_type": true, "decimal_default_precision": 40}"#,
    )
    .unwrap();

    let output = dbavro(&[
        "generate",
        "--metadata",
        snapshot.to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
        "--decimal-default-precision",
        "20",
    ]);
    let schema = stdout_json(&output);

    // REVENUE reports no precision, so it takes the flag's default
    assert_eq!(
        schema["fields"][2]["type"][1],
        json!({"type": "bytes", "logicalType": "decimal", "precision": 20, "scale": 0})
    );
}

#[test]
fn test_types_lists_vendor_mapping() {
    let output = dbavro(&["types", "--database-type", "postgres"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("postgresql"));
    assert!(stdout.contains("BIGINT"));
    assert!(stdout.lines().any(|l| l.contains("OTHER") && l.ends_with("string")));
}

#[test]
fn test_unsupported_database_type_fails() {
    let output = dbavro(&["types", "--database-type", "db2"]);
    assert!(!output.status.success());
}

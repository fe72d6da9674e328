//! Integration tests for `jsv_cli::check_fs`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use jsv::{FailurePolicy, Schema, SchemaError, Value, ValidatorConfig};
use jsv_cli::{CheckConfig, ScanErrorKind, check_fs, load_schema, output};
use serde_json::json;
use tempfile::TempDir;

fn check_config(paths: Vec<PathBuf>) -> CheckConfig {
    let mut cfg = CheckConfig::default();
    cfg.paths = paths;
    cfg
}

fn person_schema() -> Schema {
    Value::from(json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "required": true},
            "age": {"type": "integer", "minimum": 0}
        },
        "additionalProperties": false
    }))
    .into_schema()
    .unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_fs_empty_paths_errors() {
    let result = check_fs(&check_config(vec![]), &person_schema(), &ValidatorConfig::default());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("No paths provided"), "got: {msg}");
}

#[test]
fn test_check_fs_nonexistent_path_errors() {
    let tmp = TempDir::new().unwrap();
    let result = check_fs(
        &check_config(vec![tmp.path().join("missing")]),
        &person_schema(),
        &ValidatorConfig::default(),
    );
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("does not exist"), "got: {msg}");
}

#[test]
fn test_check_fs_valid_documents() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "ada.json", r#"{"name": "Ada", "age": 36}"#);
    write(tmp.path(), "people.yaml", "name: Grace\n---\nname: Alan\nage: 41\n");
    write(tmp.path(), "notes.txt", "not a document");

    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &person_schema(),
        &ValidatorConfig::default(),
    )
    .unwrap();

    assert!(report.ok);
    assert_eq!(report.checked_files, 2);
    assert_eq!(report.checked_documents, 3);
    assert_eq!(report.failed_files, 0);
}

#[test]
fn test_check_fs_reports_violations_with_location() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "bad.yaml", "name: Ada\n---\nname: Bob\nage: -1\n");

    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &person_schema(),
        &ValidatorConfig::default(),
    )
    .unwrap();

    assert!(!report.ok);
    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.document, 2);
    assert_eq!(violation.instance_path, "/age");
    assert_eq!(violation.keyword, "minimum");
    assert_eq!(violation.message, "-1 is less than the minimum of 0");
}

#[test]
fn test_check_fs_first_violation_per_document_by_default() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "bad.json", r#"{"age": "old", "extra": true}"#);

    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &person_schema(),
        &ValidatorConfig::default(),
    )
    .unwrap();
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].keyword, "additionalProperties");
}

#[test]
fn test_check_fs_all_errors() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "bad.json", r#"{"age": "old", "extra": true}"#);

    let mut validator_config = ValidatorConfig::default();
    validator_config.failure_policy = FailurePolicy::CollectAll;
    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &person_schema(),
        &validator_config,
    )
    .unwrap();

    let keywords: Vec<&str> = report.violations.iter().map(|v| v.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["additionalProperties", "type", "required"]);
}

#[test]
fn test_check_fs_parse_errors_are_scan_errors() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "broken.json", "{ not json");
    write(tmp.path(), "good.json", r#"{"name": "Ada"}"#);

    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &person_schema(),
        &ValidatorConfig::default(),
    )
    .unwrap();

    assert!(!report.ok);
    assert!(report.violations.is_empty());
    assert_eq!(report.failed_files, 1);
    assert_eq!(report.checked_files, 1);
    assert_eq!(report.scan_errors[0].kind, ScanErrorKind::JsonParseError);
}

#[test]
fn test_check_fs_exclude() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "good.json", r#"{"name": "Ada"}"#);
    write(tmp.path(), "fixtures/bad.json", r#"{"age": 1}"#);

    let mut cfg = check_config(vec![tmp.path().to_path_buf()]);
    cfg.exclude = vec!["*/fixtures/*".to_owned()];
    let report = check_fs(&cfg, &person_schema(), &ValidatorConfig::default()).unwrap();

    assert!(report.ok, "violations: {:?}", report.violations);
    assert_eq!(report.checked_files, 1);
}

#[test]
fn test_check_fs_file_too_large() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "big.json", &format!(r#"{{"name": "{}"}}"#, "a".repeat(64)));

    let mut cfg = check_config(vec![tmp.path().to_path_buf()]);
    cfg.max_file_size = 16;
    let report = check_fs(&cfg, &person_schema(), &ValidatorConfig::default()).unwrap();

    assert!(!report.ok);
    assert_eq!(report.scan_errors[0].kind, ScanErrorKind::FileTooLarge);
}

#[test]
fn test_check_fs_max_files_limit() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.json", "b.json", "c.json"] {
        write(tmp.path(), name, r#"{"name": "x"}"#);
    }

    let mut cfg = check_config(vec![tmp.path().to_path_buf()]);
    cfg.max_files = 2;
    let report = check_fs(&cfg, &person_schema(), &ValidatorConfig::default()).unwrap();

    assert_eq!(report.checked_files, 2);
    assert_eq!(report.scan_errors.len(), 1);
    assert_eq!(report.scan_errors[0].kind, ScanErrorKind::LimitExceeded);
}

#[test]
fn test_check_fs_malformed_schema_aborts() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "doc.json", "1");
    let schema = Value::from(json!({"type": "decimal"})).into_schema().unwrap();

    let err = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &schema,
        &ValidatorConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<SchemaError>(),
        Some(&SchemaError::UnknownType {
            name: "decimal".to_owned()
        })
    );
}

#[test]
fn test_number_types_narrowing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "n.json", "1.5");
    let schema = Value::from(json!({"type": "number"})).into_schema().unwrap();

    let mut validator_config = ValidatorConfig::default();
    validator_config.number_types = vec![jsv::Category::Integer];
    let report = check_fs(
        &check_config(vec![tmp.path().to_path_buf()]),
        &schema,
        &validator_config,
    )
    .unwrap();
    assert_eq!(report.violations.len(), 1);
}

#[test]
fn test_load_schema_and_render() {
    let tmp = TempDir::new().unwrap();
    let schema_path = write(
        tmp.path(),
        "schema/person.yaml",
        "properties:\n  name:\n    required: true\n",
    );
    write(tmp.path(), "data/anon.json", "{}");

    let schema = load_schema(&schema_path, 1024).unwrap();
    let report = check_fs(
        &check_config(vec![tmp.path().join("data")]),
        &schema,
        &ValidatorConfig::default(),
    )
    .unwrap();

    let mut human = Vec::new();
    output::write_human(&report, &mut human).unwrap();
    let human = String::from_utf8(human).unwrap();
    assert!(human.contains("'name' is a required property [required]"), "got: {human}");

    let mut json_out = Vec::new();
    output::write_json(&report, &mut json_out).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json_out).unwrap();
    assert_eq!(parsed["ok"], json!(false));
    assert_eq!(parsed["violations"][0]["keyword"], json!("required"));
}

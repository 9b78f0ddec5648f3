//! Tests for error handling behavior.
//!
//! These tests verify that sparkling returns appropriate errors
//! for invalid input and edge cases.

mod common;

use common::spark;
use sparkling::{DataFrame, EngineError, Value};

#[test]
fn test_conflicting_column_types() {
    let rows = vec![
        sparkling::Row::new(vec![Value::Long(1)]),
        sparkling::Row::new(vec![Value::from("one")]),
    ];
    match DataFrame::from_rows(rows, &["x"]) {
        Err(EngineError::User(msg)) => assert!(msg.contains("can not merge type")),
        Err(e) => panic!("Expected User error, got: {e:?}"),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_all_null_column() {
    let result = spark().create_dataframe(vec![(1i64, None::<String>)], &["id", "name"]);
    assert!(matches!(result, Err(EngineError::User(_))));
}

#[test]
fn test_duplicate_column_names() {
    let result = spark().create_dataframe(vec![(1i64, 2i64)], &["a", "a"]);
    assert!(result.is_err());
}

#[test]
fn test_ragged_rows() {
    let rows = vec![
        sparkling::Row::new(vec![Value::Long(1), Value::Long(2)]),
        sparkling::Row::new(vec![Value::Long(3)]),
    ];
    assert!(DataFrame::from_rows(rows, &["a", "b"]).is_err());
}

#[test]
fn test_error_display() {
    let e = EngineError::Config("unsupported master URL 'yarn'".to_string());
    assert_eq!(e.to_string(), "config error: unsupported master URL 'yarn'");
}

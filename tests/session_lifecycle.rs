//! Session acquisition, reuse and shutdown.
//!
//! The active session is process-wide, so the whole lifecycle runs in one test.

use sparkling::config::{KEY_DEFAULT_PARALLELISM, KEY_MASTER};
use sparkling::{EngineError, SparkSession, SparklessConfig};

#[test]
fn session_lifecycle() {
    if let Some(s) = SparkSession::active() {
        s.stop();
    }
    assert!(SparkSession::active().is_none());

    // initialisation failures surface as config errors and leave no active session
    for master in ["yarn", "spark://host:7077", "local[0]"] {
        let err = SparkSession::builder().master(master).get_or_create().err().unwrap();
        assert!(matches!(err, EngineError::Config(_)), "{master}: {err}");
    }
    let err = SparkSession::builder()
        .config(KEY_DEFAULT_PARALLELISM, "zero")
        .get_or_create()
        .err()
        .unwrap();
    assert!(matches!(err, EngineError::Config(_)));
    assert!(SparkSession::active().is_none());

    // a fresh session picks up builder and config-file options
    let config = SparklessConfig {
        default_parallelism: Some("3".to_string()),
        ..Default::default()
    };
    let first = SparkSession::builder()
        .app_name("lifecycle")
        .master("local[2]")
        .with_config(&config)
        .get_or_create()
        .unwrap();
    assert_eq!(first.app_name(), "lifecycle");
    assert_eq!(first.master(), "local[2]");
    assert_eq!(first.spark_context().default_parallelism(), 3);
    assert_eq!(first.conf(KEY_MASTER).as_deref(), Some("local[2]"));

    // get_or_create reuses it; runtime options apply, static ones do not
    let again = SparkSession::builder()
        .master("local[8]")
        .config("spark.sql.session.timeZone", "UTC")
        .get_or_create()
        .unwrap();
    assert_eq!(again.id(), first.id());
    assert_eq!(again.master(), "local[2]");
    assert_eq!(first.conf(KEY_MASTER).as_deref(), Some("local[2]"));
    assert_eq!(
        first.conf("spark.sql.session.timeZone").as_deref(),
        Some("UTC")
    );
    assert_eq!(SparkSession::active().map(|s| s.id()), Some(first.id()));

    // even an invalid master is ignored while a session is active
    let reused = SparkSession::builder().master("yarn").get_or_create().unwrap();
    assert_eq!(reused.id(), first.id());

    // stop releases it; the next call starts a new one
    first.stop();
    assert!(SparkSession::active().is_none());
    let second = SparkSession::builder().master("local").get_or_create().unwrap();
    assert_ne!(second.id(), first.id());
    assert_eq!(second.spark_context().default_parallelism(), 1);

    // stopping a stale handle does not affect the new active session
    first.stop();
    assert_eq!(SparkSession::active().map(|s| s.id()), Some(second.id()));
    second.stop();
}

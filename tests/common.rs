//! Shared helpers for integration tests (SparkSession and RDD setup).
#![allow(dead_code)]

use sparkling::{Rdd, SparkSession};

/// Get (or start) the process-wide SparkSession used by tests.
pub fn spark() -> SparkSession {
    SparkSession::builder()
        .app_name("sparkling_tests")
        .master("local[4]")
        .get_or_create()
        .unwrap()
}

/// The four walkthrough records, distributed over `slices` partitions.
pub fn people_rdd(slices: usize) -> Rdd<(String, i64)> {
    spark()
        .spark_context()
        .parallelize_with_slices(sparkling::intro::people(), slices)
}

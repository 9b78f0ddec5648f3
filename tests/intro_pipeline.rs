//! The introductory walkthrough end to end: mean age, names below sixty,
//! DataFrame conversion, printed report.

mod common;

use common::{people_rdd, spark};
use sparkling::intro::{self, AGE_THRESHOLD, COLUMNS};
use sparkling::{DataType, Value};
use std::collections::HashSet;

fn run_to_string() -> (intro::IntroOutcome, String) {
    let mut out = Vec::new();
    let outcome = intro::run(&spark(), &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn mean_age_is_57() {
    let (outcome, _) = run_to_string();
    assert_eq!(outcome.mean_age, 57.0);
}

#[test]
fn mean_age_does_not_depend_on_partitioning() {
    for slices in 1..=6 {
        let mean = people_rdd(slices).map(|(_, age)| age).mean();
        assert_eq!(mean, 57.0, "slices = {slices}");
    }
}

#[test]
fn below_threshold_names() {
    let (outcome, _) = run_to_string();
    let got: HashSet<&str> = outcome.below_threshold.iter().map(String::as_str).collect();
    let expected: HashSet<&str> = ["Ιουλιανός", "尤利安"].into_iter().collect();
    assert_eq!(got, expected);

    for slices in [1, 3, 8] {
        let names: HashSet<String> = people_rdd(slices)
            .filter(|(_, age)| *age < AGE_THRESHOLD)
            .map(|(name, _)| name)
            .collect()
            .into_iter()
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains("Ιουλιανός") && names.contains("尤利安"));
    }
}

#[test]
fn dataframe_has_name_and_age_columns() {
    let (outcome, _) = run_to_string();
    let df = outcome.frame;
    assert_eq!(df.count().unwrap(), 4);
    assert_eq!(df.columns().unwrap(), COLUMNS.to_vec());
    let schema = df.schema().unwrap();
    assert_eq!(schema.fields()[0].data_type, DataType::String);
    assert_eq!(schema.fields()[1].data_type, DataType::Long);
}

#[test]
fn unicode_names_round_trip() {
    let expected: Vec<String> = intro::people().into_iter().map(|(n, _)| n).collect();
    let collected: Vec<String> = people_rdd(3).map(|(n, _)| n).collect();
    assert_eq!(collected, expected);

    let rows = people_rdd(2).to_df(&COLUMNS).unwrap().collect().unwrap();
    let from_frame: Vec<String> = rows
        .iter()
        .map(|r| match r.get(0) {
            Some(Value::String(s)) => s.clone(),
            other => panic!("unexpected name cell {other:?}"),
        })
        .collect();
    assert_eq!(from_frame, expected);
}

#[test]
fn report_text() {
    let (_, text) = run_to_string();
    let expected = "\
Mean age is 57.0
[\"Ιουλιανός\", \"尤利安\"] are below 60
+---------+---+
|     Name|Age|
+---------+---+
|   Julien| 67|
|Ιουλιανός| 32|
|    Юлиан| 89|
|   尤利安| 40|
+---------+---+

root
 |-- Name: string (nullable = true)
 |-- Age: long (nullable = true)

";
    assert_eq!(text, expected);
}

#[test]
fn rerunning_is_idempotent() {
    let (first, first_text) = run_to_string();
    let (second, second_text) = run_to_string();
    assert_eq!(first.mean_age, second.mean_age);
    assert_eq!(first.below_threshold, second.below_threshold);
    assert_eq!(
        first.frame.schema().unwrap(),
        second.frame.schema().unwrap()
    );
    assert_eq!(first_text, second_text);
}

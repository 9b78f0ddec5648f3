//! DataFrame creation, display and schema output.

mod common;

use common::{people_rdd, spark};
use sparkling::{DataType, StructField, StructType, Value};

#[test]
fn create_dataframe_and_collect() {
    let df = spark()
        .create_dataframe(
            vec![(1i64, 25i64, "Alice"), (2, 30, "Bob"), (3, 35, "Carol")],
            &["id", "age", "name"],
        )
        .unwrap();
    assert_eq!(df.count().unwrap(), 3);
    let rows = df.collect_as_json_rows().unwrap();
    assert_eq!(rows[0]["id"].as_i64().unwrap(), 1);
    assert_eq!(rows[2]["name"].as_str().unwrap(), "Carol");
}

#[test]
fn int32_values_infer_integer() {
    let df = spark()
        .create_dataframe(vec![(1i32, true), (2, false)], &["n", "flag"])
        .unwrap();
    let schema = df.schema().unwrap();
    assert_eq!(schema.fields()[0].data_type, DataType::Integer);
    assert_eq!(schema.fields()[1].data_type, DataType::Boolean);
    assert_eq!(
        df.tree_string().unwrap(),
        "root\n |-- n: integer (nullable = true)\n |-- flag: boolean (nullable = true)\n"
    );
}

#[test]
fn explicit_schema() {
    let schema = StructType::new(vec![
        StructField::new("Name".to_string(), DataType::String, false),
        StructField::new("Score".to_string(), DataType::Double, true),
    ]);
    let rows = vec![
        sparkling::Row::new(vec![Value::from("Юлиан"), Value::Double(9.5)]),
        sparkling::Row::new(vec![Value::from("尤利安"), Value::Null]),
    ];
    let df = sparkling::DataFrame::from_rows_with_schema(rows, &schema).unwrap();
    assert_eq!(df.count().unwrap(), 2);
    assert!(
        df.tree_string()
            .unwrap()
            .contains(" |-- Score: double (nullable = true)")
    );
    let table = df.show_string(20, 20).unwrap();
    assert!(table.contains("| Юлиан|  9.5|"));
    assert!(table.contains("|尤利安| NULL|"));
}

#[test]
fn show_string_footer_when_rows_are_cut() {
    let df = people_rdd(2).to_df(&["Name", "Age"]).unwrap();
    let table = df.show_string(2, 20).unwrap();
    assert!(table.contains("|   Julien| 67|"));
    assert!(!table.contains("Юлиан"));
    assert!(table.ends_with("only showing top 2 rows\n"));

    let full = df.show_string(4, 20).unwrap();
    assert!(!full.contains("only showing"));
}

#[test]
fn show_and_print_schema_succeed() {
    let df = people_rdd(2).to_df(&["Name", "Age"]).unwrap();
    df.show().unwrap();
    df.show_with(1, 0).unwrap();
    df.print_schema().unwrap();
}

#[test]
fn json_rows_keep_unicode() {
    let df = people_rdd(1).to_df(&["Name", "Age"]).unwrap();
    let json = df.to_json_rows().unwrap();
    for name in ["Julien", "Ιουλιανός", "Юлиан", "尤利安"] {
        assert!(json.contains(name), "{name} missing from {json}");
    }
    let schema_json = df.schema().unwrap().to_json().unwrap();
    assert!(schema_json.contains("\"Long\""));
}

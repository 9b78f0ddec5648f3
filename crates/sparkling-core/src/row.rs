//! Untyped row values and schema inference for rows headed into a DataFrame.

use crate::error::EngineError;
use crate::schema::{DataType, StructField, StructType};
use serde_json::Value as JsonValue;

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
}

impl Value {
    /// Type of this value, or `None` for null (null merges with anything).
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Integer(_) => Some(DataType::Integer),
            Value::Long(_) => Some(DataType::Long),
            Value::Double(_) => Some(DataType::Double),
            Value::String(_) => Some(DataType::String),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Integer(i) => JsonValue::from(*i),
            Value::Long(i) => JsonValue::from(*i),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// An ordered sequence of values, one per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Conversion of a record into a [`Row`].
pub trait IntoRow {
    fn into_row(self) -> Row;
}

impl IntoRow for Row {
    fn into_row(self) -> Row {
        self
    }
}

impl IntoRow for Vec<Value> {
    fn into_row(self) -> Row {
        Row::new(self)
    }
}

macro_rules! impl_into_row_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoRow for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_row(self) -> Row {
                let ($($name,)+) = self;
                Row::new(vec![$($name.into()),+])
            }
        }
    };
}

impl_into_row_for_tuple!(A);
impl_into_row_for_tuple!(A, B);
impl_into_row_for_tuple!(A, B, C);
impl_into_row_for_tuple!(A, B, C, D);

fn merge_type(
    column: &str,
    current: Option<DataType>,
    next: Option<DataType>,
) -> Result<Option<DataType>, EngineError> {
    match (current, next) {
        (None, t) | (t, None) => Ok(t),
        (Some(a), Some(b)) if a == b => Ok(Some(a)),
        (Some(a), Some(b)) => Err(EngineError::User(format!(
            "can not merge type {a} and {b} in column '{column}'"
        ))),
    }
}

/// Infer a schema for `rows` with the given column names.
///
/// Every row must have exactly `names.len()` values. Each column's type is the
/// common type of its non-null values; a column with only nulls, or with two
/// different non-null types, is an error. Inferred fields are nullable.
pub fn infer_schema(rows: &[Row], names: &[&str]) -> Result<StructType, EngineError> {
    if rows.is_empty() {
        return Err(EngineError::User(
            "can not infer schema from empty dataset".to_string(),
        ));
    }
    let mut types: Vec<Option<DataType>> = vec![None; names.len()];
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(EngineError::User(format!(
                "row {row_idx} has {} values but {} column names were given",
                row.len(),
                names.len()
            )));
        }
        for (col_idx, value) in row.values().iter().enumerate() {
            let current = types[col_idx].take();
            types[col_idx] = merge_type(names[col_idx], current, value.data_type())?;
        }
    }
    let fields = names
        .iter()
        .zip(types)
        .map(|(name, t)| {
            t.map(|data_type| StructField::new(name.to_string(), data_type, true))
                .ok_or_else(|| {
                    EngineError::User(format!(
                        "some of types cannot be determined after inferring: column '{name}' is all null"
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StructType::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Row> {
        vec![
            ("Julien", 67i64).into_row(),
            ("Ιουλιανός", 32i64).into_row(),
            ("Юлиан", 89i64).into_row(),
            ("尤利安", 40i64).into_row(),
        ]
    }

    #[test]
    fn test_tuple_into_row() {
        let row = ("Юлиан", 89i64, Some(1.5f64), None::<bool>).into_row();
        assert_eq!(row.len(), 4);
        assert_eq!(row.get(0), Some(&Value::String("Юлиан".to_string())));
        assert_eq!(row.get(1), Some(&Value::Long(89)));
        assert_eq!(row.get(2), Some(&Value::Double(1.5)));
        assert!(row.get(3).unwrap().is_null());
    }

    #[test]
    fn test_infer_people_schema() {
        let schema = infer_schema(&people(), &["Name", "Age"]).unwrap();
        assert_eq!(schema.field_names(), vec!["Name", "Age"]);
        assert_eq!(schema.fields()[0].data_type, DataType::String);
        assert_eq!(schema.fields()[1].data_type, DataType::Long);
        assert!(schema.fields().iter().all(|f| f.nullable));
    }

    #[test]
    fn test_null_merges_with_later_type() {
        let rows = vec![(None::<i64>,).into_row(), (Some(3i64),).into_row()];
        let schema = infer_schema(&rows, &["x"]).unwrap();
        assert_eq!(schema.fields()[0].data_type, DataType::Long);
    }

    #[test]
    fn test_conflicting_types_error() {
        let rows = vec![(1i64,).into_row(), ("one",).into_row()];
        let err = infer_schema(&rows, &["x"]).unwrap_err();
        assert!(err.to_string().contains("can not merge type long and string"));
    }

    #[test]
    fn test_all_null_column_error() {
        let rows = vec![(1i64, None::<String>).into_row()];
        let err = infer_schema(&rows, &["a", "b"]).unwrap_err();
        assert!(matches!(err, EngineError::User(ref m) if m.contains("'b'")));
    }

    #[test]
    fn test_width_mismatch_error() {
        assert!(infer_schema(&people(), &["Name"]).is_err());
        assert!(infer_schema(&people(), &["Name", "Age", "Extra"]).is_err());
    }

    #[test]
    fn test_empty_rows_error() {
        assert!(infer_schema(&[], &["Name"]).is_err());
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(Value::from("尤利安").to_json(), JsonValue::from("尤利安"));
        assert_eq!(Value::Long(40).to_json(), JsonValue::from(40));
        assert_eq!(Value::Double(f64::NAN).to_json(), JsonValue::Null);
    }
}

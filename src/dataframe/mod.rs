//! DataFrame module: schema-typed tabular view, backed by an eager Polars `DataFrame`.

mod show;

pub use show::DEFAULT_TRUNCATE;

use crate::error::EngineError;
use crate::schema::{StructType, StructTypePolarsExt};
use polars::prelude::{AnyValue, Column, DataFrame as PlDataFrame, NamedFrom, PolarsResult, Series};
use serde_json::Value as JsonValue;
use sparkling_core::{DataType, IntoRow, Row, StructField, Value, infer_schema};
use std::collections::HashMap;
use std::sync::Arc;

/// Rows as list of maps: column name -> JSON value.
pub type CollectedRows = Vec<HashMap<String, JsonValue>>;

/// DataFrame - main tabular data structure.
/// Thin wrapper around an eager Polars `DataFrame`.
#[derive(Clone)]
pub struct DataFrame {
    pub(crate) df: Arc<PlDataFrame>,
}

impl DataFrame {
    /// Create a new DataFrame from a Polars DataFrame.
    pub fn from_polars(df: PlDataFrame) -> Self {
        DataFrame { df: Arc::new(df) }
    }

    /// Create an empty DataFrame
    pub fn empty() -> Self {
        DataFrame {
            df: Arc::new(PlDataFrame::empty()),
        }
    }

    /// Build a DataFrame from records, inferring column types from the values.
    pub fn from_rows<R: IntoRow>(rows: Vec<R>, column_names: &[&str]) -> Result<Self, EngineError> {
        let rows: Vec<Row> = rows.into_iter().map(IntoRow::into_row).collect();
        let schema = infer_schema(&rows, column_names)?;
        Self::from_rows_with_schema(rows, &schema)
    }

    /// Build a DataFrame from rows with an explicit schema. Non-null values must
    /// match their field's type exactly.
    pub fn from_rows_with_schema(rows: Vec<Row>, schema: &StructType) -> Result<Self, EngineError> {
        let width = schema.fields().len();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::User(format!(
                    "row {row_idx} has {} values but the schema has {width} fields",
                    row.len()
                )));
            }
            for (field, value) in schema.fields().iter().zip(row.values()) {
                match value.data_type() {
                    Some(t) if t != field.data_type => {
                        return Err(EngineError::User(format!(
                            "field {}: {} can not accept a value of type {t} (row {row_idx})",
                            field.name, field.data_type
                        )));
                    }
                    None if !field.nullable => {
                        return Err(EngineError::User(format!(
                            "field {}: this field is not nullable, but got null (row {row_idx})",
                            field.name
                        )));
                    }
                    _ => {}
                }
            }
        }
        let target = schema.to_polars_schema();
        let columns = schema
            .fields()
            .iter()
            .zip(target.iter_values())
            .enumerate()
            .map(|(idx, (field, dtype))| {
                let column = build_column(field, idx, &rows);
                if column.dtype() == dtype {
                    Ok(column)
                } else {
                    column.cast(dtype)
                }
            })
            .collect::<PolarsResult<Vec<Column>>>()?;
        Ok(Self::from_polars(PlDataFrame::new(columns)?))
    }

    /// Borrow the underlying Polars frame.
    pub fn as_polars(&self) -> &PlDataFrame {
        self.df.as_ref()
    }

    /// Get the schema of the DataFrame
    pub fn schema(&self) -> Result<StructType, EngineError> {
        Ok(StructType::from_polars_schema(&self.df.schema()))
    }

    /// Get column names
    pub fn columns(&self) -> Result<Vec<String>, EngineError> {
        Ok(self
            .df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    /// Count the number of rows
    pub fn count(&self) -> Result<usize, EngineError> {
        Ok(self.df.height())
    }

    /// Print the first 20 rows, truncating long cells (PySpark `df.show()`).
    pub fn show(&self) -> Result<(), EngineError> {
        self.show_with(20, DEFAULT_TRUNCATE)
    }

    /// Print the first `n` rows; cells wider than `truncate` display columns are
    /// cut, and `truncate == 0` disables cutting.
    pub fn show_with(&self, n: usize, truncate: usize) -> Result<(), EngineError> {
        println!("{}", self.show_string(n, truncate)?);
        Ok(())
    }

    /// Render the first `n` rows as a bordered text table.
    pub fn show_string(&self, n: usize, truncate: usize) -> Result<String, EngineError> {
        let head = DataFrame::from_polars(self.df.head(Some(n)));
        let rows = head.collect()?;
        let has_more = self.df.height() > n;
        Ok(show::render_table(
            &self.columns()?,
            &rows,
            truncate,
            has_more.then_some(n),
        ))
    }

    /// Print the schema as a tree (PySpark `df.printSchema()`).
    pub fn print_schema(&self) -> Result<(), EngineError> {
        println!("{}", self.tree_string()?);
        Ok(())
    }

    pub fn tree_string(&self) -> Result<String, EngineError> {
        Ok(self.schema()?.tree_string())
    }

    /// Collect all rows to the driver.
    pub fn collect(&self) -> Result<Vec<Row>, EngineError> {
        let df = self.df.as_ref();
        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let values = df
                .get_columns()
                .iter()
                .map(|c| c.get(i).map(any_value_to_value))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(Row::new(values));
        }
        Ok(rows)
    }

    /// Collect as rows of column-name -> JSON value.
    pub fn collect_as_json_rows(&self) -> Result<CollectedRows, EngineError> {
        let names = self.columns()?;
        Ok(self
            .collect()?
            .into_iter()
            .map(|row| {
                names
                    .iter()
                    .cloned()
                    .zip(row.values().iter().map(Value::to_json))
                    .collect()
            })
            .collect())
    }

    /// Collected rows serialized as a JSON array string.
    pub fn to_json_rows(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.collect_as_json_rows()?)?)
    }
}

fn build_column(field: &StructField, idx: usize, rows: &[Row]) -> Column {
    let name = field.name.as_str().into();
    let cells = rows.iter().map(|r| r.get(idx));
    let series = match field.data_type {
        DataType::String => {
            let values: Vec<Option<String>> = cells
                .map(|v| match v {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Integer => {
            let values: Vec<Option<i32>> = cells
                .map(|v| match v {
                    Some(Value::Integer(i)) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Long => {
            let values: Vec<Option<i64>> = cells
                .map(|v| match v {
                    Some(Value::Long(i)) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Double => {
            let values: Vec<Option<f64>> = cells
                .map(|v| match v {
                    Some(Value::Double(d)) => Some(*d),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        DataType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .map(|v| match v {
                    Some(Value::Boolean(b)) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
    };
    Column::from(series)
}

fn any_value_to_value(av: AnyValue<'_>) -> Value {
    match av {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Boolean(b),
        AnyValue::Int32(i) => Value::Integer(i),
        AnyValue::Int64(i) => Value::Long(i),
        AnyValue::UInt32(i) => Value::Long(i64::from(i)),
        AnyValue::Float32(f) => Value::Double(f64::from(f)),
        AnyValue::Float64(f) => Value::Double(f),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string()),
    }
}

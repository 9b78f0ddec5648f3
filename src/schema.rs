//! Schema types (from core) and Polars conversion.

use polars::prelude::{DataType as PlDataType, Field, Schema};

pub use sparkling_core::{DataType, StructField, StructType};

/// Extension trait for Polars schema conversion. Implemented for [`StructType`] from core.
/// Bring this trait into scope to use `StructType::from_polars_schema` and `to_polars_schema`.
pub trait StructTypePolarsExt: Sized {
    fn from_polars_schema(schema: &Schema) -> Self;
    fn to_polars_schema(&self) -> Schema;
}

impl StructTypePolarsExt for StructType {
    fn from_polars_schema(schema: &Schema) -> Self {
        let fields = schema
            .iter()
            .map(|(name, dtype)| StructField {
                name: name.to_string(),
                data_type: polars_type_to_data_type(dtype),
                nullable: true, // Polars doesn't track nullability per field
            })
            .collect();
        StructType::new(fields)
    }

    fn to_polars_schema(&self) -> Schema {
        let fields: Vec<Field> = self
            .fields()
            .iter()
            .map(|f| {
                Field::new(
                    f.name.as_str().into(),
                    data_type_to_polars_type(&f.data_type),
                )
            })
            .collect();
        Schema::from_iter(fields)
    }
}

fn polars_type_to_data_type(polars_type: &PlDataType) -> DataType {
    match polars_type {
        PlDataType::Int32 => DataType::Integer,
        PlDataType::Int64 | PlDataType::UInt32 | PlDataType::UInt64 => DataType::Long,
        PlDataType::Float32 | PlDataType::Float64 => DataType::Double,
        PlDataType::Boolean => DataType::Boolean,
        _ => DataType::String,
    }
}

pub(crate) fn data_type_to_polars_type(data_type: &DataType) -> PlDataType {
    match data_type {
        DataType::String => PlDataType::String,
        DataType::Integer => PlDataType::Int32,
        DataType::Long => PlDataType::Int64,
        DataType::Double => PlDataType::Float64,
        DataType::Boolean => PlDataType::Boolean,
    }
}

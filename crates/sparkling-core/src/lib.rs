//! Sparkling core: shared types, config, error and row inference (no Polars dependency).

pub mod config;
pub mod error;
pub mod row;
pub mod schema;

pub use config::SparklessConfig;
pub use error::EngineError;
pub use row::{IntoRow, Row, Value, infer_schema};
pub use schema::{DataType, StructField, StructType};

//! One-stop prelude for application code.
//!
//! Use `use sparkling::prelude::*` to get the most common types.

pub use crate::config::SparklessConfig;
pub use crate::context::SparkContext;
pub use crate::dataframe::DataFrame;
pub use crate::error::EngineError;
pub use crate::rdd::Rdd;
pub use crate::schema::{DataType, StructField, StructType};
pub use crate::session::{SparkSession, SparkSessionBuilder};
pub use crate::stats::StatCounter;
pub use sparkling_core::{IntoRow, Row, Value};

//! Sparkling - partitioned collections and DataFrames with a PySpark-like API.
//!
//! A [`SparkSession`] owns a [`SparkContext`] whose worker pool evaluates the
//! partitions of an [`Rdd`]. Transformations are lazy; actions such as
//! [`Rdd::collect`] or [`Rdd::mean`] run a job. [`Rdd::to_df`] turns records
//! into a schema-typed [`DataFrame`] backed by Polars.
//!
//! ```
//! use sparkling::prelude::*;
//!
//! let spark = SparkSession::builder().get_or_create()?;
//! let rdd = spark.spark_context().parallelize(vec![("a".to_string(), 1i64), ("b".to_string(), 3)]);
//! assert_eq!(rdd.map(|(_, n)| n).mean(), 2.0);
//! let df = rdd.to_df(&["key", "n"])?;
//! assert_eq!(df.columns()?, vec!["key", "n"]);
//! # Ok::<(), sparkling::EngineError>(())
//! ```

pub mod config;
pub mod context;
pub mod dataframe;
pub mod error;
pub mod intro;
pub mod prelude;
pub mod rdd;
pub mod schema;
pub mod session;
pub mod stats;

pub use config::SparklessConfig;
pub use context::{Master, SparkContext};
pub use dataframe::{CollectedRows, DataFrame};
pub use error::EngineError;
pub use rdd::{PartitionIter, Rdd};
pub use schema::{DataType, StructField, StructType, StructTypePolarsExt};
pub use session::{SparkSession, SparkSessionBuilder};
pub use sparkling_core::{IntoRow, Row, Value};
pub use stats::{Numeric, StatCounter};

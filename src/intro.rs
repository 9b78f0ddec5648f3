//! The introductory walkthrough: distribute a few people, average their ages,
//! list the ones under sixty and look at them as a DataFrame.

use crate::dataframe::{DEFAULT_TRUNCATE, DataFrame};
use crate::error::EngineError;
use crate::session::SparkSession;
use std::io::Write;
use tracing::debug;

pub const AGE_THRESHOLD: i64 = 60;
pub const COLUMNS: [&str; 2] = ["Name", "Age"];

/// The four (name, age) records the walkthrough distributes.
pub fn people() -> Vec<(String, i64)> {
    vec![
        ("Julien".to_string(), 67),
        ("Ιουλιανός".to_string(), 32),
        ("Юлиан".to_string(), 89),
        ("尤利安".to_string(), 40),
    ]
}

/// What the walkthrough computed, alongside the text it wrote.
pub struct IntroOutcome {
    pub mean_age: f64,
    pub below_threshold: Vec<String>,
    pub frame: DataFrame,
}

/// Run the walkthrough on `spark`, writing its report to `out`.
pub fn run(spark: &SparkSession, out: &mut impl Write) -> Result<IntroOutcome, EngineError> {
    let rdd = spark.spark_context().parallelize(people());
    debug!(
        rdd_id = rdd.id(),
        partitions = rdd.num_partitions(),
        "distributed people"
    );

    let mean_age = rdd.map(|(_, age)| age).mean();
    writeln!(out, "Mean age is {mean_age:?}")?;

    let below_threshold = rdd
        .filter(|(_, age)| *age < AGE_THRESHOLD)
        .map(|(name, _)| name)
        .collect();
    writeln!(out, "{below_threshold:?} are below {AGE_THRESHOLD}")?;

    let frame = rdd.to_df(&COLUMNS)?;
    writeln!(out, "{}", frame.show_string(20, DEFAULT_TRUNCATE)?)?;
    writeln!(out, "{}", frame.tree_string()?)?;

    Ok(IntroOutcome {
        mean_age,
        below_threshold,
        frame,
    })
}

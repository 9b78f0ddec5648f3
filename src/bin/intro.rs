//! Driver for the introductory walkthrough.
//!
//! Configure with `SPARKLING_MASTER`, `SPARKLING_APP_NAME`,
//! `SPARKLING_DEFAULT_PARALLELISM` and `SPARKLING_LOG_LEVEL`; `RUST_LOG` overrides
//! the log filter. Logs go to stderr, the report to stdout.

use sparkling::prelude::*;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = SparklessConfig::from_env();
    let default_filter = config.log_level.clone().unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let spark = match SparkSession::builder().with_config(&config).get_or_create() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialise session");
            return ExitCode::FAILURE;
        }
    };

    let result = sparkling::intro::run(&spark, &mut io::stdout().lock());
    spark.stop();
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "walkthrough failed");
            ExitCode::FAILURE
        }
    }
}

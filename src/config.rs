//! Configuration for sparkling sessions.
//!
//! Use [`SparklessConfig`] to configure a session from code or environment variables,
//! then apply it with [`SparkSessionBuilder::with_config`](crate::SparkSessionBuilder::with_config).

pub use sparkling_core::SparklessConfig;
pub use sparkling_core::config::{
    ENV_APP_NAME, ENV_DEFAULT_PARALLELISM, ENV_LOG_LEVEL, ENV_MASTER, KEY_APP_NAME,
    KEY_DEFAULT_PARALLELISM, KEY_MASTER,
};

//! Session configuration that can be built in code or read from the environment.
//!
//! Environment variables (all optional):
//! - `SPARKLING_MASTER`: master URL (`local`, `local[N]`, `local[*]`)
//! - `SPARKLING_APP_NAME`: application name
//! - `SPARKLING_DEFAULT_PARALLELISM`: default number of partitions for `parallelize`
//! - `SPARKLING_LOG_LEVEL`: default log filter for binaries (`RUST_LOG` wins when set)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ENV_MASTER: &str = "SPARKLING_MASTER";
pub const ENV_APP_NAME: &str = "SPARKLING_APP_NAME";
pub const ENV_DEFAULT_PARALLELISM: &str = "SPARKLING_DEFAULT_PARALLELISM";
pub const ENV_LOG_LEVEL: &str = "SPARKLING_LOG_LEVEL";

/// Session configuration keys understood by the engine.
pub const KEY_MASTER: &str = "spark.master";
pub const KEY_APP_NAME: &str = "spark.app.name";
pub const KEY_DEFAULT_PARALLELISM: &str = "spark.default.parallelism";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparklessConfig {
    pub master: Option<String>,
    pub app_name: Option<String>,
    /// Kept as text so a malformed value surfaces when the session starts.
    pub default_parallelism: Option<String>,
    pub log_level: Option<String>,
    /// Extra `spark.*` keys passed through to the session config.
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

impl SparklessConfig {
    /// Read configuration from `SPARKLING_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment, file, test map).
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        SparklessConfig {
            master: get(ENV_MASTER),
            app_name: get(ENV_APP_NAME),
            default_parallelism: get(ENV_DEFAULT_PARALLELISM),
            log_level: get(ENV_LOG_LEVEL),
            extra: HashMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Flatten into `spark.*` session config pairs.
    pub fn to_session_config(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(m) = &self.master {
            out.push((KEY_MASTER.to_string(), m.clone()));
        }
        if let Some(a) = &self.app_name {
            out.push((KEY_APP_NAME.to_string(), a.clone()));
        }
        if let Some(p) = &self.default_parallelism {
            out.push((KEY_DEFAULT_PARALLELISM.to_string(), p.clone()));
        }
        for (k, v) in &self.extra {
            out.push((k.clone(), v.clone()));
        }
        out
    }
}

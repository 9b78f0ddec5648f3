//! SparkSession: the process-wide entry point, obtained through [`SparkSessionBuilder`].

use crate::config::{KEY_APP_NAME, KEY_DEFAULT_PARALLELISM, KEY_MASTER, SparklessConfig};
use crate::context::SparkContext;
use crate::dataframe::DataFrame;
use crate::error::EngineError;
use sparkling_core::IntoRow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

const DEFAULT_APP_NAME: &str = "sparkling";
const DEFAULT_MASTER: &str = "local[*]";

/// Keys fixed at session start; changing them needs a new session.
const STATIC_KEYS: [&str; 3] = [KEY_MASTER, KEY_APP_NAME, KEY_DEFAULT_PARALLELISM];

static ACTIVE_SESSION: OnceLock<Mutex<Option<SparkSession>>> = OnceLock::new();
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(0);

fn active_slot() -> MutexGuard<'static, Option<SparkSession>> {
    ACTIVE_SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Builder for creating a SparkSession with configuration options
#[derive(Clone, Debug, Default)]
pub struct SparkSessionBuilder {
    options: HashMap<String, String>,
}

impl SparkSessionBuilder {
    pub fn new() -> Self {
        SparkSessionBuilder {
            options: HashMap::new(),
        }
    }

    pub fn app_name(self, name: impl Into<String>) -> Self {
        self.config(KEY_APP_NAME, name)
    }

    pub fn master(self, master: impl Into<String>) -> Self {
        self.config(KEY_MASTER, master)
    }

    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Apply configuration from a [`SparklessConfig`]. Later calls win over earlier ones.
    pub fn with_config(mut self, config: &SparklessConfig) -> Self {
        for (k, v) in config.to_session_config() {
            self.options.insert(k, v);
        }
        self
    }

    /// Return the active session, or start one from this builder's options.
    ///
    /// When a session is already active its runtime options are updated from the
    /// builder; static options (master, app name, default parallelism) are ignored.
    pub fn get_or_create(self) -> Result<SparkSession, EngineError> {
        let mut slot = active_slot();
        if let Some(existing) = slot.as_ref() {
            existing.apply_options(self.options);
            debug!(session_id = existing.id(), "reusing active session");
            return Ok(existing.clone());
        }
        let session = SparkSession::start(self.options)?;
        *slot = Some(session.clone());
        Ok(session)
    }
}

/// Main entry point for distributing data and creating DataFrames.
/// Cheap to clone; clones refer to the same session.
#[derive(Clone)]
pub struct SparkSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    id: u64,
    context: SparkContext,
    conf: RwLock<HashMap<String, String>>,
}

impl SparkSession {
    pub fn builder() -> SparkSessionBuilder {
        SparkSessionBuilder::new()
    }

    /// The session registered by the last successful `get_or_create`, if not stopped.
    pub fn active() -> Option<SparkSession> {
        active_slot().as_ref().cloned()
    }

    fn start(mut options: HashMap<String, String>) -> Result<Self, EngineError> {
        let master = options
            .entry(KEY_MASTER.to_string())
            .or_insert_with(|| DEFAULT_MASTER.to_string())
            .clone();
        let app_name = options
            .entry(KEY_APP_NAME.to_string())
            .or_insert_with(|| DEFAULT_APP_NAME.to_string())
            .clone();
        let default_parallelism = options
            .get(KEY_DEFAULT_PARALLELISM)
            .map(|v| parse_parallelism(v.as_str()))
            .transpose()?;
        let context = SparkContext::new(&app_name, &master, default_parallelism)?;
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        info!(
            session_id = id,
            app_name = %app_name,
            master = %master,
            default_parallelism = context.default_parallelism(),
            "started session"
        );
        Ok(SparkSession {
            inner: Arc::new(SessionInner {
                id,
                context,
                conf: RwLock::new(options),
            }),
        })
    }

    fn apply_options(&self, options: HashMap<String, String>) {
        let mut conf = self
            .inner
            .conf
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (key, value) in options {
            if STATIC_KEYS.contains(&key.as_str()) {
                if conf.get(&key) != Some(&value) {
                    warn!(
                        key = %key,
                        "using an existing session; static config is not applied"
                    );
                }
                continue;
            }
            conf.insert(key, value);
        }
    }

    /// Process-unique id; equal ids mean the same session.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn spark_context(&self) -> &SparkContext {
        &self.inner.context
    }

    pub fn app_name(&self) -> &str {
        self.inner.context.app_name()
    }

    pub fn master(&self) -> &str {
        self.inner.context.master()
    }

    pub fn conf(&self, key: &str) -> Option<String> {
        self.inner
            .conf
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Set a runtime option. Static options are rejected.
    pub fn set_conf(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), EngineError> {
        let key = key.into();
        if STATIC_KEYS.contains(&key.as_str()) {
            return Err(EngineError::User(format!(
                "cannot modify the value of a static config: {key}"
            )));
        }
        self.inner
            .conf
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.into());
        Ok(())
    }

    /// Create a DataFrame from local records, inferring column types.
    ///
    /// # Example
    /// ```
    /// use sparkling::SparkSession;
    ///
    /// let spark = SparkSession::builder().app_name("doc").get_or_create()?;
    /// let df = spark.create_dataframe(vec![("Julien", 67i64), ("Юлиан", 89i64)], &["Name", "Age"])?;
    /// assert_eq!(df.count()?, 2);
    /// # Ok::<(), sparkling::EngineError>(())
    /// ```
    pub fn create_dataframe<R: IntoRow>(
        &self,
        rows: Vec<R>,
        column_names: &[&str],
    ) -> Result<DataFrame, EngineError> {
        DataFrame::from_rows(rows, column_names)
    }

    /// Stop the session. The next `get_or_create` starts a fresh one.
    pub fn stop(&self) {
        let mut slot = active_slot();
        if slot.as_ref().is_some_and(|s| s.id() == self.id()) {
            *slot = None;
            info!(session_id = self.id(), "stopped session");
        }
    }
}

fn parse_parallelism(value: &str) -> Result<usize, EngineError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(EngineError::Config(format!(
            "{KEY_DEFAULT_PARALLELISM} must be a positive integer, got '{value}'"
        ))),
    }
}

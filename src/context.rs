//! SparkContext: owns the worker pool, slices local data into RDDs and runs jobs.

use crate::error::EngineError;
use crate::rdd::{ComputeFn, PartitionIter, Rdd};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Parsed master URL. Only in-process masters are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Master {
    /// `local`, `local[N]` or `local[*]`: N worker threads in this process.
    Local { threads: usize },
}

impl Master {
    pub fn parse(url: &str) -> Result<Self, EngineError> {
        let url = url.trim();
        if url == "local" {
            return Ok(Master::Local { threads: 1 });
        }
        let inner = url
            .strip_prefix("local[")
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "unsupported master URL '{url}': expected local, local[N] or local[*]"
                ))
            })?;
        if inner == "*" {
            let threads = std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1);
            return Ok(Master::Local { threads });
        }
        match inner.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Master::Local { threads: n }),
            _ => Err(EngineError::Config(format!(
                "invalid thread count in master URL '{url}'"
            ))),
        }
    }

    pub fn threads(&self) -> usize {
        match self {
            Master::Local { threads } => *threads,
        }
    }
}

/// Entry point for RDD creation. Cheap to clone; clones share one worker pool.
#[derive(Clone)]
pub struct SparkContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    app_name: String,
    master: String,
    default_parallelism: usize,
    pool: ThreadPool,
    next_rdd_id: AtomicUsize,
    next_job_id: AtomicUsize,
}

impl SparkContext {
    pub(crate) fn new(
        app_name: &str,
        master: &str,
        default_parallelism: Option<usize>,
    ) -> Result<Self, EngineError> {
        let threads = Master::parse(master)?.threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("sparkling-worker-{i}"))
            .build()?;
        debug!(master, threads, "worker pool started");
        Ok(SparkContext {
            inner: Arc::new(ContextInner {
                app_name: app_name.to_string(),
                master: master.to_string(),
                default_parallelism: default_parallelism.unwrap_or(threads),
                pool,
                next_rdd_id: AtomicUsize::new(0),
                next_job_id: AtomicUsize::new(0),
            }),
        })
    }

    pub fn app_name(&self) -> &str {
        &self.inner.app_name
    }

    pub fn master(&self) -> &str {
        &self.inner.master
    }

    /// Number of slices `parallelize` uses: `spark.default.parallelism` if set,
    /// otherwise the worker thread count.
    pub fn default_parallelism(&self) -> usize {
        self.inner.default_parallelism
    }

    /// Distribute a local collection over `default_parallelism()` partitions.
    pub fn parallelize<T>(&self, data: Vec<T>) -> Rdd<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.parallelize_with_slices(data, self.default_parallelism())
    }

    /// Distribute a local collection over `num_slices` partitions (at least one).
    pub fn parallelize_with_slices<T>(&self, data: Vec<T>, num_slices: usize) -> Rdd<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let num_slices = num_slices.max(1);
        let slices = Arc::new(slice(data, num_slices));
        let compute: ComputeFn<T> = Arc::new(move |p: usize| -> PartitionIter<T> {
            Box::new(slices[p].clone().into_iter())
        });
        Rdd::from_compute(self.clone(), num_slices, compute)
    }

    /// RDD of `start..end` (PySpark `sc.range`).
    pub fn range(&self, start: i64, end: i64) -> Rdd<i64> {
        self.parallelize((start..end).collect())
    }

    pub(crate) fn new_rdd_id(&self) -> usize {
        self.inner.next_rdd_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Evaluate every partition of `rdd` on the worker pool; results are in partition order.
    pub fn run_job<T, U, F>(&self, rdd: &Rdd<T>, func: F) -> Vec<U>
    where
        T: 'static,
        U: Send,
        F: Fn(PartitionIter<T>) -> U + Send + Sync,
    {
        let partitions: Vec<usize> = (0..rdd.num_partitions()).collect();
        self.run_job_on_partitions(rdd, &partitions, func)
    }

    /// Evaluate the given partitions of `rdd`; results follow the order of `partitions`.
    pub(crate) fn run_job_on_partitions<T, U, F>(
        &self,
        rdd: &Rdd<T>,
        partitions: &[usize],
        func: F,
    ) -> Vec<U>
    where
        T: 'static,
        U: Send,
        F: Fn(PartitionIter<T>) -> U + Send + Sync,
    {
        let job_id = self.inner.next_job_id.fetch_add(1, Ordering::Relaxed);
        debug!(
            job_id,
            rdd_id = rdd.id(),
            partitions = partitions.len(),
            "running job"
        );
        let results = self.inner.pool.install(|| {
            partitions
                .par_iter()
                .map(|&p| func(rdd.compute_partition(p)))
                .collect::<Vec<U>>()
        });
        debug!(job_id, "job finished");
        results
    }
}

/// Split `data` into `num_slices` contiguous runs; slice `i` holds
/// `data[i * len / n .. (i + 1) * len / n]`.
fn slice<T>(data: Vec<T>, num_slices: usize) -> Vec<Vec<T>> {
    let len = data.len();
    let mut iter = data.into_iter();
    (0..num_slices)
        .map(|i| {
            let start = i * len / num_slices;
            let end = (i + 1) * len / num_slices;
            iter.by_ref().take(end - start).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_master() {
        assert_eq!(Master::parse("local").unwrap(), Master::Local { threads: 1 });
        assert_eq!(Master::parse("local[3]").unwrap(), Master::Local { threads: 3 });
        assert!(Master::parse("local[*]").unwrap().threads() >= 1);
    }

    #[test]
    fn test_parse_master_rejects_cluster_urls() {
        for bad in ["yarn", "spark://host:7077", "local[0]", "local[x]", "local[2"] {
            let err = Master::parse(bad).unwrap_err();
            assert!(matches!(err, EngineError::Config(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_slice_positions() {
        let slices = slice((0..10).collect::<Vec<_>>(), 3);
        assert_eq!(slices, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8, 9]]);
    }

    #[test]
    fn test_slice_more_slices_than_items() {
        let slices = slice(vec!["a", "b"], 4);
        assert_eq!(slices.len(), 4);
        assert_eq!(slices.concat(), vec!["a", "b"]);
        assert_eq!(slices.iter().filter(|s| s.is_empty()).count(), 2);
    }

    #[test]
    fn test_context_defaults() {
        let sc = SparkContext::new("ctx_test", "local[2]", None).unwrap();
        assert_eq!(sc.default_parallelism(), 2);
        assert_eq!(sc.master(), "local[2]");
        assert_eq!(sc.app_name(), "ctx_test");
        let sc = SparkContext::new("ctx_test", "local[2]", Some(5)).unwrap();
        assert_eq!(sc.default_parallelism(), 5);
    }

    #[test]
    fn test_run_job_on_partitions_follows_requested_order() {
        let sc = SparkContext::new("ctx_test", "local[2]", None).unwrap();
        let rdd = sc.parallelize_with_slices((0..9).collect::<Vec<i32>>(), 3);
        let sums = sc.run_job_on_partitions(&rdd, &[2, 0], |it| it.sum::<i32>());
        assert_eq!(sums, vec![21, 3]);
        assert_eq!(rdd.take(100), (0..9).collect::<Vec<_>>());
    }
}

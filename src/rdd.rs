//! Rdd: an immutable, partitioned collection with lazy transformations.
//!
//! Transformations (`map`, `filter`, `flat_map`, `map_partitions`, `glom`) only
//! compose per-partition iterators. Actions (`collect`, `count`, `reduce`,
//! `mean`, ...) submit a job to the owning [`SparkContext`], which evaluates the
//! partitions on its worker pool.

use crate::context::SparkContext;
use crate::dataframe::DataFrame;
use crate::error::EngineError;
use crate::stats::{Numeric, StatCounter};
use sparkling_core::IntoRow;
use std::sync::Arc;
use tracing::debug;

/// Iterator over the elements of one partition.
pub type PartitionIter<T> = Box<dyn Iterator<Item = T>>;

/// Computes the iterator for a partition index.
pub(crate) type ComputeFn<T> = Arc<dyn Fn(usize) -> PartitionIter<T> + Send + Sync>;

pub struct Rdd<T> {
    id: usize,
    context: SparkContext,
    num_partitions: usize,
    compute: ComputeFn<T>,
}

impl<T> Clone for Rdd<T> {
    fn clone(&self) -> Self {
        Rdd {
            id: self.id,
            context: self.context.clone(),
            num_partitions: self.num_partitions,
            compute: self.compute.clone(),
        }
    }
}

impl<T: 'static> Rdd<T> {
    pub(crate) fn from_compute(
        context: SparkContext,
        num_partitions: usize,
        compute: ComputeFn<T>,
    ) -> Self {
        let id = context.new_rdd_id();
        debug!(rdd_id = id, num_partitions, "created rdd");
        Rdd {
            id,
            context,
            num_partitions,
            compute,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    pub fn context(&self) -> &SparkContext {
        &self.context
    }

    pub(crate) fn compute_partition(&self, partition: usize) -> PartitionIter<T> {
        (self.compute)(partition)
    }

    fn derive<U: 'static>(&self, compute: ComputeFn<U>) -> Rdd<U> {
        Rdd::from_compute(self.context.clone(), self.num_partitions, compute)
    }

    // ---------- transformations ----------

    pub fn map<U, F>(&self, f: F) -> Rdd<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let parent = self.compute.clone();
        let f = Arc::new(f);
        let compute: ComputeFn<U> = Arc::new(move |p: usize| -> PartitionIter<U> {
            let f = f.clone();
            Box::new(parent(p).map(move |x| f(x)))
        });
        self.derive(compute)
    }

    pub fn filter<F>(&self, predicate: F) -> Rdd<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let parent = self.compute.clone();
        let predicate = Arc::new(predicate);
        let compute: ComputeFn<T> = Arc::new(move |p: usize| -> PartitionIter<T> {
            let predicate = predicate.clone();
            Box::new(parent(p).filter(move |x| predicate(x)))
        });
        self.derive(compute)
    }

    pub fn flat_map<U, I, F>(&self, f: F) -> Rdd<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        let parent = self.compute.clone();
        let f = Arc::new(f);
        let compute: ComputeFn<U> = Arc::new(move |p: usize| -> PartitionIter<U> {
            let f = f.clone();
            Box::new(parent(p).flat_map(move |x| f(x)))
        });
        self.derive(compute)
    }

    /// Transform each partition as a whole.
    pub fn map_partitions<U, I, F>(&self, f: F) -> Rdd<U>
    where
        U: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(PartitionIter<T>) -> I + Send + Sync + 'static,
    {
        let parent = self.compute.clone();
        let compute: ComputeFn<U> = Arc::new(move |p: usize| -> PartitionIter<U> {
            Box::new(f(parent(p)).into_iter())
        });
        self.derive(compute)
    }

    /// One element per partition holding all of that partition's elements.
    pub fn glom(&self) -> Rdd<Vec<T>> {
        self.map_partitions(|it| std::iter::once(it.collect::<Vec<T>>()))
    }

    // ---------- actions ----------

    /// Bring every element back to the driver, in partition order.
    pub fn collect(&self) -> Vec<T>
    where
        T: Send,
    {
        self.context
            .run_job(self, |it| it.collect::<Vec<T>>())
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.context.run_job(self, |it| it.count()).into_iter().sum()
    }

    pub fn is_empty(&self) -> bool
    where
        T: Send,
    {
        self.take(1).is_empty()
    }

    /// First `n` elements, scanning partitions in order and stopping early.
    pub fn take(&self, n: usize) -> Vec<T>
    where
        T: Send,
    {
        let mut out = Vec::with_capacity(n);
        for p in 0..self.num_partitions {
            if out.len() >= n {
                break;
            }
            let remaining = n - out.len();
            let part = self.context.run_job_on_partitions(self, &[p], move |it| {
                it.take(remaining).collect::<Vec<T>>()
            });
            out.extend(part.into_iter().flatten());
        }
        out
    }

    pub fn first(&self) -> Result<T, EngineError>
    where
        T: Send,
    {
        self.take(1)
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::User("RDD is empty".to_string()))
    }

    /// Reduce with an associative, commutative function.
    pub fn reduce<F>(&self, f: F) -> Result<T, EngineError>
    where
        T: Send,
        F: Fn(T, T) -> T + Send + Sync,
    {
        self.context
            .run_job(self, |it| it.reduce(|a, b| f(a, b)))
            .into_iter()
            .flatten()
            .reduce(|a, b| f(a, b))
            .ok_or_else(|| EngineError::User("can not reduce() empty RDD".to_string()))
    }

    /// Fold each partition from `zero`, then fold the partition results from `zero` again.
    pub fn fold<F>(&self, zero: T, f: F) -> T
    where
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Send + Sync,
    {
        self.context
            .run_job(self, |it| it.fold(zero.clone(), |a, b| f(a, b)))
            .into_iter()
            .fold(zero, |a, b| f(a, b))
    }

    pub fn max(&self) -> Result<T, EngineError>
    where
        T: PartialOrd + Send,
    {
        self.reduce(|a, b| if b > a { b } else { a })
    }

    pub fn min(&self) -> Result<T, EngineError>
    where
        T: PartialOrd + Send,
    {
        self.reduce(|a, b| if b < a { b } else { a })
    }

    /// Convert into a DataFrame with the given column names; types are inferred.
    pub fn to_df(&self, column_names: &[&str]) -> Result<DataFrame, EngineError>
    where
        T: IntoRow + Send,
    {
        DataFrame::from_rows(self.collect(), column_names)
    }
}

impl<T: Numeric> Rdd<T> {
    /// Count, mean, variance, min and max in a single job.
    pub fn stats(&self) -> StatCounter {
        self.context
            .run_job(self, StatCounter::from_values)
            .iter()
            .fold(StatCounter::new(), |mut acc, s| {
                acc.merge_stats(s);
                acc
            })
    }

    /// Arithmetic mean; `NaN` for an empty RDD.
    pub fn mean(&self) -> f64 {
        self.stats().mean()
    }

    pub fn sum(&self) -> f64 {
        self.stats().sum()
    }

    pub fn variance(&self) -> f64 {
        self.stats().variance()
    }

    pub fn stdev(&self) -> f64 {
        self.stats().stdev()
    }

    pub fn sample_variance(&self) -> f64 {
        self.stats().sample_variance()
    }

    pub fn sample_stdev(&self) -> f64 {
        self.stats().sample_stdev()
    }
}

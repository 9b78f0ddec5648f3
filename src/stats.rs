//! Mergeable summary statistics for numeric RDDs (PySpark: `rdd.stats()`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element types that numeric RDD actions (`mean`, `sum`, `stats`, ...) accept.
pub trait Numeric: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// Running count, mean, sum of squared deviations (`m2`), min and max.
///
/// Partitions each build a counter and the driver merges them, so the result
/// does not depend on how the data was sliced. `sum` is tracked directly so
/// the mean of integral data is exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatCounter {
    count: u64,
    mu: f64,
    m2: f64,
    sum: f64,
    max: f64,
    min: f64,
}

impl Default for StatCounter {
    fn default() -> Self {
        StatCounter {
            count: 0,
            mu: 0.0,
            m2: 0.0,
            sum: 0.0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }
}

impl StatCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Numeric,
    {
        let mut counter = Self::new();
        for v in values {
            counter.merge_value(v.to_f64());
        }
        counter
    }

    /// Add one value (Welford update).
    pub fn merge_value(&mut self, value: f64) -> &mut Self {
        let delta = value - self.mu;
        self.count += 1;
        self.mu += delta / self.count as f64;
        self.m2 += delta * (value - self.mu);
        self.sum += value;
        self.max = self.max.max(value);
        self.min = self.min.min(value);
        self
    }

    /// Combine with a counter built over disjoint data.
    pub fn merge_stats(&mut self, other: &StatCounter) -> &mut Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            *self = *other;
            return self;
        }
        let n = self.count as f64;
        let m = other.count as f64;
        let delta = other.mu - self.mu;
        // Weighted update is unstable when one side dwarfs the other.
        self.mu = if m * 10.0 < n {
            self.mu + delta * m / (n + m)
        } else if n * 10.0 < m {
            other.mu - delta * n / (n + m)
        } else {
            (self.mu * n + other.mu * m) / (n + m)
        };
        self.m2 += other.m2 + delta * delta * n * m / (n + m);
        self.count += other.count;
        self.sum += other.sum;
        self.max = self.max.max(other.max);
        self.min = self.min.min(other.min);
        self
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean; `NaN` when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// Population variance; `NaN` when empty.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Sample variance (n - 1 denominator); `NaN` for fewer than two values.
    pub fn sample_variance(&self) -> f64 {
        if self.count <= 1 {
            f64::NAN
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn stdev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn sample_stdev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

impl fmt::Display for StatCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(count: {}, mean: {:?}, stdev: {:?}, max: {:?}, min: {:?})",
            self.count,
            self.mean(),
            self.stdev(),
            self.max,
            self.min
        )
    }
}

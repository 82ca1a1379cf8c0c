//! The streaming statistics accumulator

use super::config::{StatBuilder, StatConfig};
use crate::histogram::HistogramBuilder;
use crate::math;
use crate::order::{OrderBuffer, Retain};
use crate::report::{HistogramChart, Summary};
use crate::traits::Sketch;
use core::fmt;

#[cfg(feature = "std")]
use std::string::{String, ToString};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

/// Streaming statistics over a sequence of observations
///
/// Tracks count, sum and sum of squares (for mean and standard deviation), the
/// N smallest and N largest values (for raw and smoothed extremes) and a
/// histogram whose edges are fixed from the first cache-full of values.
/// Memory use is bounded by the configuration, not by the number of values.
///
/// Not synchronized: wrap in a `Mutex` to share between threads.
///
/// # Example
///
/// ```
/// use streamstat::Stat;
///
/// let mut stat = Stat::new("ms");
/// stat.add_all([1.0, 2.0, 3.0]);
///
/// assert_eq!(stat.count(), 3);
/// assert_eq!(stat.min(), 1.0);
/// assert_eq!(stat.max(), 3.0);
/// assert!((stat.mean() - 2.0).abs() < 1e-12);
/// assert!((stat.std_dev() - 0.81649658).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    units: String,
    config: StatConfig,

    sum: f64,
    sum_sq: f64,
    count: u64,

    smallest: OrderBuffer,
    largest: OrderBuffer,

    histogram: HistogramBuilder,
}

impl Stat {
    /// Create a stat with the default settings
    pub fn new(units: impl Into<String>) -> Self {
        Self::with_config(units, StatConfig::default())
    }

    /// Start configuring a stat
    pub fn builder(units: impl Into<String>) -> StatBuilder {
        StatBuilder::new(units)
    }

    /// Create a stat from validated settings
    pub fn with_config(units: impl Into<String>, config: StatConfig) -> Self {
        Self {
            units: units.into(),
            config,
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
            smallest: OrderBuffer::empty(Retain::Smallest, config.order_capacity()),
            largest: OrderBuffer::empty(Retain::Largest, config.order_capacity()),
            histogram: HistogramBuilder::validated(
                config.cache_capacity(),
                config.bucket_count(),
            ),
        }
    }

    /// Add an observation
    ///
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        self.sum += value;
        self.sum_sq += value * value;
        self.count += 1;

        self.smallest.consider(value);
        self.largest.consider(value);

        let observed = self.min()..=self.max();
        self.histogram.record(value, observed);
    }

    /// Add every observation from an iterator
    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Return to the just-constructed state, keeping the settings
    pub fn reset(&mut self) {
        tracing::debug!(units = %self.units, count = self.count, "resetting stat");

        self.sum = 0.0;
        self.sum_sq = 0.0;
        self.count = 0;
        self.smallest.clear();
        self.largest.clear();
        self.histogram.reset();
    }

    /// Display label for the observed values
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Settings this stat was created with
    pub fn config(&self) -> &StatConfig {
        &self.config
    }

    /// Number of observations added
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of all observations
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest observation, `0.0` if none
    pub fn min(&self) -> f64 {
        self.smallest.first().unwrap_or(0.0)
    }

    /// Mean of the N smallest observations, `0.0` if none
    pub fn mean_of_smallest(&self) -> f64 {
        self.smallest.mean()
    }

    /// Largest observation, `0.0` if none
    pub fn max(&self) -> f64 {
        self.largest.last().unwrap_or(0.0)
    }

    /// Mean of the N largest observations, `0.0` if none
    pub fn mean_of_largest(&self) -> f64 {
        self.largest.mean()
    }

    /// Mean of all observations, `0.0` if none
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population standard deviation, `0.0` for fewer than two observations
    ///
    /// Computed as `sqrt(E[x²] - E[x]²)` from the running sums. This loses
    /// precision when the deviation is tiny relative to the mean.
    pub fn std_dev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        math::sqrt(self.sum_sq / n - mean * mean)
    }

    /// The N smallest observations in ascending order
    pub fn smallest(&self) -> &[f64] {
        self.smallest.values()
    }

    /// The N largest observations in ascending order
    pub fn largest(&self) -> &[f64] {
        self.largest.values()
    }

    /// Histogram state
    pub fn histogram(&self) -> &HistogramBuilder {
        &self.histogram
    }

    /// All derived statistics at once
    pub fn summary(&self) -> Summary {
        Summary {
            count: self.count,
            min: self.min(),
            mean_of_smallest: self.mean_of_smallest(),
            mean: self.mean(),
            std_dev: self.std_dev(),
            max: self.max(),
            mean_of_largest: self.mean_of_largest(),
        }
    }

    /// Histogram chart, if there are enough observations to draw one
    ///
    /// Before the histogram is finalized the chart is drawn from a provisional
    /// bucketing of the cached values.
    pub fn chart(&self) -> Option<HistogramChart<'_>> {
        HistogramChart::of(self)
    }

    /// Multi-line histogram chart, or an empty string if there are fewer
    /// observations than buckets
    pub fn histogram_report(&self) -> String {
        self.chart().map(|chart| chart.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.summary(), f)
    }
}

impl Sketch for Stat {
    type Item = f64;

    fn update(&mut self, item: &Self::Item) {
        self.add(*item);
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.units.capacity()
            + self.smallest.heap_bytes()
            + self.largest.heap_bytes()
            + self.histogram.heap_bytes()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

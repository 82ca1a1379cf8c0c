//! Two-phase histogram: buffer raw samples, then count into fixed buckets

use super::buckets::{Buckets, Placement};
use crate::traits::{ConfigError, Setting};
use core::ops::RangeInclusive;

#[cfg(feature = "std")]
use std::{borrow::Cow, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{borrow::Cow, vec::Vec};

/// Default number of values buffered before the histogram is finalized
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
/// Smallest permitted sample cache
pub const MIN_CACHE_CAPACITY: usize = 2;
/// Default (and adaptive upper bound of the) number of buckets
pub const DEFAULT_BUCKET_COUNT: usize = 50;
/// Smallest permitted number of buckets
pub const MIN_BUCKET_COUNT: usize = 2;
/// Target average occupancy used when sizing the histogram adaptively
pub const MIN_SAMPLES_PER_BUCKET: usize = 5;

/// How the number of buckets is chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BucketCount {
    /// Exactly this many buckets
    Fixed(usize),
    /// At most this many, shrunk at finalization so each bucket holds
    /// [`MIN_SAMPLES_PER_BUCKET`] samples on average
    Adaptive(usize),
}

impl Default for BucketCount {
    fn default() -> Self {
        BucketCount::Adaptive(DEFAULT_BUCKET_COUNT)
    }
}

impl BucketCount {
    /// Configured (fixed or maximum) number of buckets
    pub fn limit(self) -> usize {
        match self {
            BucketCount::Fixed(n) | BucketCount::Adaptive(n) => n,
        }
    }

    /// Number of buckets to use for `samples` buffered values
    pub fn resolve(self, samples: usize) -> usize {
        match self {
            BucketCount::Fixed(n) => n,
            BucketCount::Adaptive(max) => {
                if samples / max < MIN_SAMPLES_PER_BUCKET {
                    (samples / MIN_SAMPLES_PER_BUCKET).clamp(MIN_BUCKET_COUNT, max)
                } else {
                    max
                }
            }
        }
    }
}

/// Phase of a [`HistogramBuilder`]
#[derive(Clone, Debug, PartialEq)]
pub enum HistogramState {
    /// Edges unknown; raw values retained verbatim
    Buffering { cache: Vec<f64> },
    /// Edges fixed; values counted directly
    Finalized(Buckets),
}

/// Histogram whose edges are chosen from an initial sample
///
/// The first `cache_capacity` values are buffered. When the cache fills, the
/// bucket edges are computed once from the observed extremes, the cached values
/// are replayed into the buckets and the cache is dropped. Edges are never
/// recomputed: later values outside the range count as underflow or overflow.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBuilder {
    cache_capacity: usize,
    bucket_count: BucketCount,
    state: HistogramState,
}

impl HistogramBuilder {
    /// Create a builder buffering `cache_capacity` values before finalizing
    ///
    /// Fails if the cache holds fewer than [`MIN_CACHE_CAPACITY`] values, the
    /// bucket count is below [`MIN_BUCKET_COUNT`] or a fixed bucket count
    /// exceeds the cache capacity.
    pub fn new(cache_capacity: usize, bucket_count: BucketCount) -> Result<Self, ConfigError> {
        if cache_capacity < MIN_CACHE_CAPACITY {
            return Err(ConfigError::BelowMinimum {
                setting: Setting::CacheCapacity,
                value: cache_capacity,
                minimum: MIN_CACHE_CAPACITY,
            });
        }
        if bucket_count.limit() < MIN_BUCKET_COUNT {
            return Err(ConfigError::BelowMinimum {
                setting: Setting::BucketCount,
                value: bucket_count.limit(),
                minimum: MIN_BUCKET_COUNT,
            });
        }
        if let BucketCount::Fixed(count) = bucket_count {
            if count > cache_capacity {
                return Err(ConfigError::AboveMaximum {
                    setting: Setting::BucketCount,
                    value: count,
                    maximum: cache_capacity,
                });
            }
        }

        Ok(Self::validated(cache_capacity, bucket_count))
    }

    /// Create a builder whose settings have already been validated
    pub(crate) fn validated(cache_capacity: usize, bucket_count: BucketCount) -> Self {
        Self {
            cache_capacity,
            bucket_count,
            state: HistogramState::Buffering {
                cache: Vec::with_capacity(cache_capacity),
            },
        }
    }

    /// Record a value
    ///
    /// `observed` is the full range of values seen so far, including `value`.
    /// It is only read when this value fills the cache.
    pub fn record(&mut self, value: f64, observed: RangeInclusive<f64>) {
        match &mut self.state {
            HistogramState::Buffering { cache } => {
                cache.push(value);
                if cache.len() >= self.cache_capacity {
                    self.finalize(observed);
                }
            }
            HistogramState::Finalized(buckets) => {
                buckets.record(value);
            }
        }
    }

    /// Fix the bucket edges and replay the cache into them
    ///
    /// # Panics
    ///
    /// Panics if the cache is empty.
    fn finalize(&mut self, observed: RangeInclusive<f64>) {
        let HistogramState::Buffering { cache } = &self.state else {
            return;
        };

        let buckets = self.bucket_cache(cache, &observed);
        tracing::debug!(
            samples = cache.len(),
            buckets = buckets.len(),
            start = buckets.start(),
            width = buckets.width(),
            underflow = buckets.underflow(),
            overflow = buckets.overflow(),
            "histogram finalized"
        );
        self.state = HistogramState::Finalized(buckets);
    }

    fn bucket_cache(&self, cache: &[f64], observed: &RangeInclusive<f64>) -> Buckets {
        assert!(
            !cache.is_empty(),
            "cannot finalize a histogram with no cached samples"
        );

        let count = self.bucket_count.resolve(cache.len());
        if let BucketCount::Adaptive(max) = self.bucket_count {
            if count < max {
                tracing::trace!(samples = cache.len(), from = max, to = count, "shrinking bucket count");
            }
        }

        let mut buckets = Buckets::spanning(*observed.start(), *observed.end(), count);
        for &v in cache {
            buckets.record(v);
        }
        buckets
    }

    /// Finalized buckets, or a provisional bucketing of the cache
    ///
    /// While buffering, the cached values are bucketed into a copy using the
    /// `observed` range; the builder itself is not changed. Returns `None` if
    /// nothing has been recorded.
    pub fn snapshot(&self, observed: RangeInclusive<f64>) -> Option<Cow<'_, Buckets>> {
        match &self.state {
            HistogramState::Finalized(buckets) => Some(Cow::Borrowed(buckets)),
            HistogramState::Buffering { cache } if cache.is_empty() => None,
            HistogramState::Buffering { cache } => {
                Some(Cow::Owned(self.bucket_cache(cache, &observed)))
            }
        }
    }

    /// Return to buffering with an empty cache
    pub fn reset(&mut self) {
        match &mut self.state {
            HistogramState::Buffering { cache } => cache.clear(),
            HistogramState::Finalized(_) => {
                self.state = HistogramState::Buffering {
                    cache: Vec::with_capacity(self.cache_capacity),
                };
            }
        }
    }

    /// Current phase
    pub fn state(&self) -> &HistogramState {
        &self.state
    }

    /// Check if the bucket edges have been fixed
    pub fn is_finalized(&self) -> bool {
        matches!(self.state, HistogramState::Finalized(_))
    }

    /// Finalized buckets, if any
    pub fn buckets(&self) -> Option<&Buckets> {
        match &self.state {
            HistogramState::Finalized(buckets) => Some(buckets),
            HistogramState::Buffering { .. } => None,
        }
    }

    /// Values buffered so far; empty once finalized
    pub fn cached(&self) -> &[f64] {
        match &self.state {
            HistogramState::Buffering { cache } => cache,
            HistogramState::Finalized(_) => &[],
        }
    }

    /// Lower edge of the first bucket, `0.0` before finalization
    pub fn bucket_start(&self) -> f64 {
        self.buckets().map_or(0.0, Buckets::start)
    }

    /// Bucket width, `0.0` before finalization
    pub fn bucket_width(&self) -> f64 {
        self.buckets().map_or(0.0, Buckets::width)
    }

    /// Values below the first bucket, `0` before finalization
    pub fn underflow(&self) -> u64 {
        self.buckets().map_or(0, Buckets::underflow)
    }

    /// Values beyond the last bucket, `0` before finalization
    pub fn overflow(&self) -> u64 {
        self.buckets().map_or(0, Buckets::overflow)
    }

    /// Number of values buffered before finalization
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Bucket sizing policy
    pub fn bucket_count(&self) -> BucketCount {
        self.bucket_count
    }

    /// Where a value would land in the finalized histogram
    pub fn locate(&self, value: f64) -> Option<Placement> {
        self.buckets().map(|b| b.locate(value))
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        match &self.state {
            HistogramState::Buffering { cache } => cache.capacity() * core::mem::size_of::<f64>(),
            HistogramState::Finalized(buckets) => buckets.heap_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(builder: &mut HistogramBuilder, values: &[f64]) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in values {
            lo = lo.min(v);
            hi = hi.max(v);
            builder.record(v, lo..=hi);
        }
    }

    #[test]
    fn test_resolve_adaptive() {
        let sizing = BucketCount::Adaptive(50);
        assert_eq!(sizing.resolve(10_000), 50);
        assert_eq!(sizing.resolve(250), 50);
        assert_eq!(sizing.resolve(249), 49);
        assert_eq!(sizing.resolve(100), 20);
        assert_eq!(sizing.resolve(9), 2);
        assert_eq!(sizing.resolve(2), 2);
    }

    #[test]
    fn test_resolve_fixed() {
        assert_eq!(BucketCount::Fixed(7).resolve(3), 7);
        assert_eq!(BucketCount::Fixed(7).resolve(100_000), 7);
    }

    #[test]
    fn test_rejects_small_settings() {
        let err = HistogramBuilder::new(1, BucketCount::default()).unwrap_err();
        assert_eq!(err.setting(), Setting::CacheCapacity);

        let err = HistogramBuilder::new(10, BucketCount::Fixed(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BelowMinimum {
                setting: Setting::BucketCount,
                value: 1,
                minimum: 2,
            }
        );

        let err = HistogramBuilder::new(10, BucketCount::Fixed(11)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::AboveMaximum {
                setting: Setting::BucketCount,
                value: 11,
                maximum: 10,
            }
        );
        assert!(HistogramBuilder::new(10, BucketCount::Fixed(usize::MAX)).is_err());
        assert!(HistogramBuilder::new(10, BucketCount::Fixed(10)).is_ok());
        assert!(HistogramBuilder::new(10, BucketCount::Adaptive(50)).is_ok());
    }

    #[test]
    fn test_buffers_until_full() {
        let mut builder = HistogramBuilder::new(4, BucketCount::Fixed(2)).unwrap();
        feed(&mut builder, &[1.0, 2.0, 3.0]);

        assert!(!builder.is_finalized());
        assert_eq!(builder.cached(), &[1.0, 2.0, 3.0]);
        assert_eq!(builder.bucket_width(), 0.0);
        assert_eq!(builder.bucket_start(), 0.0);
        assert!(builder.buckets().is_none());
        assert!(builder.locate(2.0).is_none());
        assert!(matches!(
            builder.state(),
            HistogramState::Buffering { cache } if cache.as_slice() == [1.0, 2.0, 3.0]
        ));
    }

    #[test]
    fn test_finalizes_once_full() {
        let mut builder = HistogramBuilder::new(4, BucketCount::Fixed(2)).unwrap();
        feed(&mut builder, &[1.0, 2.0, 3.0, 4.0]);

        assert!(builder.is_finalized());
        assert!(builder.cached().is_empty());
        let buckets = builder.buckets().unwrap();
        assert_eq!(buckets.start(), 1.0);
        assert_eq!(buckets.counts(), &[2, 2]);
        assert_eq!(buckets.total(), 4);
    }

    #[test]
    fn test_edges_fixed_after_finalization() {
        let mut builder = HistogramBuilder::new(2, BucketCount::Fixed(2)).unwrap();
        feed(&mut builder, &[0.0, 10.0, -5.0, 50.0, 7.0]);

        let buckets = builder.buckets().unwrap();
        assert_eq!(buckets.start(), 0.0);
        assert_eq!(builder.underflow(), 1);
        assert_eq!(builder.overflow(), 1);
        assert_eq!(buckets.counts(), &[1, 2]);

        assert_eq!(builder.locate(-5.0), Some(Placement::Underflow));
        assert_eq!(builder.locate(7.0), Some(Placement::Bucket(1)));
        assert_eq!(builder.locate(50.0), Some(Placement::Overflow));
        assert!(matches!(builder.state(), HistogramState::Finalized(b) if b.len() == 2));
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut builder = HistogramBuilder::new(100, BucketCount::Fixed(3)).unwrap();
        assert!(builder.snapshot(0.0..=0.0).is_none());

        feed(&mut builder, &[1.0, 2.0, 3.0, 4.0]);
        let snapshot = builder.snapshot(1.0..=4.0).unwrap();
        assert!(matches!(snapshot, Cow::Owned(_)));
        assert_eq!(snapshot.total(), 4);
        assert_eq!(snapshot.len(), 3);

        assert!(!builder.is_finalized());
        assert_eq!(builder.cached().len(), 4);
    }

    #[test]
    fn test_reset() {
        let mut builder = HistogramBuilder::new(3, BucketCount::default()).unwrap();
        feed(&mut builder, &[1.0, 2.0, 3.0, 4.0]);
        assert!(builder.is_finalized());

        builder.reset();
        assert!(!builder.is_finalized());
        assert!(builder.cached().is_empty());
        assert_eq!(builder.underflow(), 0);
        assert_eq!(builder.overflow(), 0);
        assert_eq!(builder.cache_capacity(), 3);
    }

    #[test]
    #[should_panic(expected = "no cached samples")]
    fn test_empty_bucketing_panics() {
        let builder = HistogramBuilder::new(3, BucketCount::default()).unwrap();
        builder.bucket_cache(&[], &(0.0..=1.0));
    }
}

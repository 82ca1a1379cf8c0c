//! Self-sizing histogram built from an initial sample
//!
//! The bucket edges of a [`HistogramBuilder`] are unknown until enough values
//! have been seen. Raw values are cached until the cache fills; the edges are
//! then fixed from the observed extremes and every later value is counted
//! directly into [`Buckets`].
//!
//! # Example
//!
//! ```
//! use streamstat::histogram::{BucketCount, HistogramBuilder};
//!
//! let mut hist = HistogramBuilder::new(4, BucketCount::Fixed(2)).unwrap();
//!
//! for value in [1.0, 2.0, 3.0, 4.0] {
//!     hist.record(value, 1.0..=value);
//! }
//! hist.record(0.5, 0.5..=4.0);
//!
//! let buckets = hist.buckets().unwrap();
//! assert_eq!(buckets.counts(), &[2, 2]);
//! assert_eq!(buckets.underflow(), 1);
//! ```

mod buckets;
mod builder;

pub use buckets::{Buckets, Placement, BUCKET_WIDTH_SCALE};
pub use builder::{
    BucketCount, HistogramBuilder, HistogramState, DEFAULT_BUCKET_COUNT, DEFAULT_CACHE_CAPACITY,
    MIN_BUCKET_COUNT, MIN_CACHE_CAPACITY, MIN_SAMPLES_PER_BUCKET,
};

//! Fixed-width bucket counts with underflow and overflow

use crate::math;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Factor applied to the bucket width so the largest observed value falls
/// strictly inside the last bucket rather than on its upper edge.
pub const BUCKET_WIDTH_SCALE: f64 = 1.000001;

/// Where a counted value landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Below the first bucket
    Underflow,
    /// Inside the bucket with this index
    Bucket(usize),
    /// At or beyond the end of the last bucket
    Overflow,
}

/// Histogram with fixed, uniform bucket edges
///
/// Bucket `i` covers the half-open interval
/// `[start + i * width, start + (i + 1) * width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Buckets {
    start: f64,
    width: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl Buckets {
    /// Create empty buckets spanning `[low, high]` split `bucket_count` ways
    ///
    /// The width is scaled by [`BUCKET_WIDTH_SCALE`]. A zero span is widened
    /// to one unit so the width stays strictly positive.
    pub fn spanning(low: f64, high: f64, bucket_count: usize) -> Self {
        debug_assert!(bucket_count > 0, "bucket count must be positive");

        let mut span = high - low;
        if span <= 0.0 {
            span = 1.0;
        }

        Self {
            start: low,
            width: BUCKET_WIDTH_SCALE * span / bucket_count as f64,
            counts: vec_of_zeros(bucket_count),
            underflow: 0,
            overflow: 0,
        }
    }

    /// Count a value into its bucket
    ///
    /// A non-finite bucket index (from infinite input) counts as overflow.
    pub fn record(&mut self, value: f64) -> Placement {
        let placement = self.locate(value);
        match placement {
            Placement::Underflow => self.underflow += 1,
            Placement::Bucket(idx) => self.counts[idx] += 1,
            Placement::Overflow => self.overflow += 1,
        }
        placement
    }

    /// Find where a value would be counted without counting it
    pub fn locate(&self, value: f64) -> Placement {
        let idx = math::floor((value - self.start) / self.width);

        if idx < 0.0 {
            Placement::Underflow
        } else if idx.is_nan() || idx >= self.counts.len() as f64 {
            Placement::Overflow
        } else {
            Placement::Bucket(idx as usize)
        }
    }

    /// Lower edge of the first bucket
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Width shared by every bucket
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Upper edge of the last bucket
    pub fn end(&self) -> f64 {
        self.start + self.width * self.counts.len() as f64
    }

    /// Per-bucket counts, lowest bucket first
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if there are no buckets
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Values below the first bucket
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Values at or beyond the end of the last bucket
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Every counted value including underflow and overflow
    pub fn total(&self) -> u64 {
        self.underflow + self.overflow + self.counts.iter().sum::<u64>()
    }

    /// Iterate `(lower, upper, count)` for every bucket
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        let mut lower = self.start;
        self.counts.iter().map(move |&count| {
            let upper = lower + self.width;
            let bucket = (lower, upper, count);
            lower = upper;
            bucket
        })
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.counts.capacity() * core::mem::size_of::<u64>()
    }
}

fn vec_of_zeros(len: usize) -> Vec<u64> {
    let mut counts = Vec::with_capacity(len);
    counts.resize(len, 0);
    counts
}

#[cfg(feature = "serde")]
impl serde::Serialize for Buckets {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Buckets", 5)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("counts", self.counts.as_slice())?;
        state.serialize_field("underflow", &self.underflow)?;
        state.serialize_field("overflow", &self.overflow)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanning() {
        let buckets = Buckets::spanning(10.0, 20.0, 4);
        assert_eq!(buckets.start(), 10.0);
        assert!((buckets.width() - 2.5 * BUCKET_WIDTH_SCALE).abs() < 1e-12);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.end() > 20.0);
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn test_record_placement() {
        let mut buckets = Buckets::spanning(0.0, 10.0, 5);

        assert_eq!(buckets.record(-0.1), Placement::Underflow);
        assert_eq!(buckets.record(0.0), Placement::Bucket(0));
        assert_eq!(buckets.record(3.9), Placement::Bucket(1));
        assert_eq!(buckets.record(10.0), Placement::Bucket(4));
        assert_eq!(buckets.record(10.1), Placement::Overflow);

        assert_eq!(buckets.counts(), &[1, 1, 0, 0, 1]);
        assert_eq!(buckets.underflow(), 1);
        assert_eq!(buckets.overflow(), 1);
        assert_eq!(buckets.total(), 5);
    }

    #[test]
    fn test_maximum_inside_last_bucket() {
        let buckets = Buckets::spanning(1.0, 3.0, 2);
        assert_eq!(buckets.locate(3.0), Placement::Bucket(1));
        assert_eq!(buckets.locate(1.0), Placement::Bucket(0));
    }

    #[test]
    fn test_zero_span() {
        let mut buckets = Buckets::spanning(7.0, 7.0, 3);
        assert!(buckets.width() > 0.0);
        assert_eq!(buckets.record(7.0), Placement::Bucket(0));
    }

    #[test]
    fn test_infinite_values() {
        let mut buckets = Buckets::spanning(0.0, 1.0, 2);
        assert_eq!(buckets.record(f64::INFINITY), Placement::Overflow);
        assert_eq!(buckets.record(f64::NEG_INFINITY), Placement::Underflow);
    }

    #[test]
    fn test_iter_edges() {
        let buckets = Buckets::spanning(0.0, 4.0, 4);
        let edges: Vec<_> = buckets.iter().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0].0, 0.0);
        assert!((edges[3].1 - buckets.end()).abs() < 1e-9);
        for pair in edges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }
}

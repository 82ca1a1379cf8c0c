//! Validated settings for a [`Stat`] and the builder that produces them

use super::Stat;
use crate::histogram::{
    BucketCount, DEFAULT_BUCKET_COUNT, DEFAULT_CACHE_CAPACITY, MIN_BUCKET_COUNT,
    MIN_CACHE_CAPACITY,
};
use crate::order::MIN_ORDER_CAPACITY;
use crate::traits::{ConfigError, Setting};

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Default capacity of the smallest-N and largest-N buffers
pub const DEFAULT_ORDER_CAPACITY: usize = 20;

/// Settings of a [`Stat`]
///
/// Only obtainable through validation (or [`Default`]), so every instance
/// satisfies the minimum bounds of its settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatConfig {
    order_capacity: usize,
    cache_capacity: usize,
    bucket_count: BucketCount,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            bucket_count: BucketCount::Adaptive(DEFAULT_BUCKET_COUNT),
        }
    }
}

impl StatConfig {
    /// Capacity of the smallest-N and largest-N buffers
    pub fn order_capacity(&self) -> usize {
        self.order_capacity
    }

    /// Number of values buffered before the histogram is finalized
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Bucket sizing policy
    pub fn bucket_count(&self) -> BucketCount {
        self.bucket_count
    }
}

/// Builder for a [`Stat`]
///
/// Each setting may be supplied at most once. Invalid or repeated settings are
/// reported by [`build`](Self::build).
///
/// # Example
///
/// ```
/// use streamstat::Stat;
///
/// let stat = Stat::builder("ms")
///     .order_capacity(5)
///     .cache_capacity(1_000)
///     .bucket_count(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(stat.config().order_capacity(), 5);
///
/// let err = Stat::builder("ms").bucket_count(1).build().unwrap_err();
/// assert_eq!(err.to_string(), "invalid histogram bucket count (1): it must be >= 2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct StatBuilder {
    units: String,
    order_capacity: Option<usize>,
    cache_capacity: Option<usize>,
    bucket_count: Option<usize>,
    duplicate: Option<Setting>,
}

impl StatBuilder {
    /// Start configuring a stat measured in `units`
    pub fn new(units: impl Into<String>) -> Self {
        Self {
            units: units.into(),
            order_capacity: None,
            cache_capacity: None,
            bucket_count: None,
            duplicate: None,
        }
    }

    /// Number of smallest and largest values retained (default 20, minimum 1)
    pub fn order_capacity(mut self, capacity: usize) -> Self {
        self.note_duplicate(Setting::OrderCapacity, self.order_capacity.is_some());
        self.order_capacity = Some(capacity);
        self
    }

    /// Number of values buffered before the histogram edges are fixed
    /// (default 10000, minimum 2)
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.note_duplicate(Setting::CacheCapacity, self.cache_capacity.is_some());
        self.cache_capacity = Some(capacity);
        self
    }

    /// Exact number of histogram buckets (minimum 2, at most the cache
    /// capacity)
    ///
    /// Without this the count is chosen at finalization, at most 50, so that
    /// buckets average at least five samples each.
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.note_duplicate(Setting::BucketCount, self.bucket_count.is_some());
        self.bucket_count = Some(count);
        self
    }

    fn note_duplicate(&mut self, setting: Setting, already_set: bool) {
        if already_set && self.duplicate.is_none() {
            self.duplicate = Some(setting);
        }
    }

    /// Validate the settings without building
    pub fn config(&self) -> Result<StatConfig, ConfigError> {
        if let Some(setting) = self.duplicate {
            return Err(ConfigError::Duplicate(setting));
        }

        let defaults = StatConfig::default();
        let order_capacity = at_least(
            Setting::OrderCapacity,
            self.order_capacity.unwrap_or(defaults.order_capacity),
            MIN_ORDER_CAPACITY,
        )?;
        let cache_capacity = at_least(
            Setting::CacheCapacity,
            self.cache_capacity.unwrap_or(defaults.cache_capacity),
            MIN_CACHE_CAPACITY,
        )?;
        let bucket_count = match self.bucket_count {
            Some(count) => {
                let count = at_least(Setting::BucketCount, count, MIN_BUCKET_COUNT)?;
                if count > cache_capacity {
                    return Err(ConfigError::AboveMaximum {
                        setting: Setting::BucketCount,
                        value: count,
                        maximum: cache_capacity,
                    });
                }
                BucketCount::Fixed(count)
            }
            None => defaults.bucket_count,
        };

        Ok(StatConfig {
            order_capacity,
            cache_capacity,
            bucket_count,
        })
    }

    /// Build the stat, reporting invalid or repeated settings
    pub fn build(self) -> Result<Stat, ConfigError> {
        let config = self.config()?;
        Ok(Stat::with_config(self.units, config))
    }

    /// Build the stat
    ///
    /// # Panics
    ///
    /// Panics if any setting is invalid or repeated.
    pub fn build_or_panic(self) -> Stat {
        match self.build() {
            Ok(stat) => stat,
            Err(err) => panic!("cannot create stat: {}", err),
        }
    }
}

fn at_least(setting: Setting, value: usize, minimum: usize) -> Result<usize, ConfigError> {
    if value < minimum {
        return Err(ConfigError::BelowMinimum {
            setting,
            value,
            minimum,
        });
    }
    Ok(value)
}

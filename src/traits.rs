//! Core traits and error types shared across the crate
//!
//! Every accumulator implements the base [`Sketch`] trait. Construction-time
//! validation failures are reported through [`ConfigError`].

use core::fmt::{self, Debug};

/// A configurable setting of a [`Stat`](crate::Stat)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Capacity of the smallest-N and largest-N order buffers
    OrderCapacity,
    /// Number of raw values buffered before the histogram is finalized
    CacheCapacity,
    /// Number of histogram buckets
    BucketCount,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::OrderCapacity => f.write_str("order buffer capacity"),
            Setting::CacheCapacity => f.write_str("sample cache capacity"),
            Setting::BucketCount => f.write_str("histogram bucket count"),
        }
    }
}

/// Error raised while validating a configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A setting is below its permitted minimum
    #[error("invalid {setting} ({value}): it must be >= {minimum}")]
    BelowMinimum {
        setting: Setting,
        value: usize,
        minimum: usize,
    },
    /// A setting is above its permitted maximum
    #[error("invalid {setting} ({value}): it must be <= {maximum}")]
    AboveMaximum {
        setting: Setting,
        value: usize,
        maximum: usize,
    },
    /// The same setting was supplied more than once
    #[error("the {0} has already been configured")]
    Duplicate(Setting),
}

impl ConfigError {
    /// The setting this error refers to
    pub fn setting(&self) -> Setting {
        match self {
            ConfigError::BelowMinimum { setting, .. }
            | ConfigError::AboveMaximum { setting, .. } => *setting,
            ConfigError::Duplicate(setting) => *setting,
        }
    }
}

/// Core trait for all streaming accumulators
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Reset sketch to empty state, keeping its configuration
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

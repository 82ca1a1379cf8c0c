//! Fixed-capacity sorted buffer of extreme values

use crate::math;
use crate::traits::{ConfigError, Setting};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Smallest permitted buffer capacity
pub const MIN_ORDER_CAPACITY: usize = 1;

/// Which end of the distribution a buffer retains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Retain {
    /// Keep the N smallest values, discarding from the end when full
    Smallest,
    /// Keep the N largest values, discarding from the start when full
    Largest,
}

/// Sorted buffer holding the N smallest or N largest values of a stream
///
/// Values are always stored in ascending order. Until the buffer is full every
/// value is inserted; afterwards a value is only admitted if it strictly beats
/// the current boundary element, which is then discarded. Ties never displace.
///
/// Insertion is an O(N) shift, which is cheap for the small capacities (tens
/// of values) this is intended for.
///
/// # Example
///
/// ```
/// use streamstat::order::OrderBuffer;
///
/// let mut highs = OrderBuffer::largest(2).unwrap();
/// for value in [3.0, 9.0, 1.0, 7.0] {
///     highs.consider(value);
/// }
///
/// assert_eq!(highs.values(), &[7.0, 9.0]);
/// assert_eq!(highs.last(), Some(9.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OrderBuffer {
    retain: Retain,
    capacity: usize,
    values: Vec<f64>,
}

impl OrderBuffer {
    /// Create an empty buffer retaining `capacity` values
    ///
    /// Fails if `capacity` is below [`MIN_ORDER_CAPACITY`].
    pub fn new(retain: Retain, capacity: usize) -> Result<Self, ConfigError> {
        if capacity < MIN_ORDER_CAPACITY {
            return Err(ConfigError::BelowMinimum {
                setting: Setting::OrderCapacity,
                value: capacity,
                minimum: MIN_ORDER_CAPACITY,
            });
        }

        Ok(Self::empty(retain, capacity))
    }

    /// Create a buffer whose capacity has already been validated
    pub(crate) fn empty(retain: Retain, capacity: usize) -> Self {
        Self {
            retain,
            capacity,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer keeping the `capacity` smallest values
    pub fn smallest(capacity: usize) -> Result<Self, ConfigError> {
        Self::new(Retain::Smallest, capacity)
    }

    /// Create a buffer keeping the `capacity` largest values
    pub fn largest(capacity: usize) -> Result<Self, ConfigError> {
        Self::new(Retain::Largest, capacity)
    }

    /// Offer a value to the buffer
    ///
    /// Returns `true` if the value was admitted. NaN is never admitted.
    pub fn consider(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }

        if self.values.len() < self.capacity {
            let idx = self.values.partition_point(|&v| v < value);
            self.values.insert(idx, value);
            return true;
        }

        match self.retain {
            Retain::Smallest => {
                let last = self.capacity - 1;
                if value >= self.values[last] {
                    return false;
                }
                // First element >= value; the old maximum falls off the end.
                let idx = self.values.partition_point(|&v| v < value);
                self.values.copy_within(idx..last, idx + 1);
                self.values[idx] = value;
            }
            Retain::Largest => {
                if value <= self.values[0] {
                    return false;
                }
                // Last element < value; the old minimum falls off the start.
                let idx = self.values.partition_point(|&v| v < value) - 1;
                self.values.copy_within(1..=idx, 0);
                self.values[idx] = value;
            }
        }
        true
    }

    /// Which end of the distribution this buffer keeps
    pub fn retain(&self) -> Retain {
        self.retain
    }

    /// Maximum number of values retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no value has been admitted yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check if the buffer holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Retained values in ascending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest retained value
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Largest retained value
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Mean of the retained values, `0.0` when empty
    pub fn mean(&self) -> f64 {
        math::mean(&self.values)
    }

    /// Drop all values, keeping the allocation
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Memory usage in bytes
    pub fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.heap_bytes()
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.values.capacity() * core::mem::size_of::<f64>()
    }
}

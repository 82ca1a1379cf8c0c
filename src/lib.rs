//! # Streamstat
//!
//! Bounded-memory statistics for long-running instrumentation.
//!
//! Streamstat summarizes a stream of numeric observations of unknown length
//! without keeping the observations themselves. A [`Stat`] tracks:
//!
//! - **Moments**: count, mean and population standard deviation
//! - **Extremes**: the N smallest and N largest values, giving the raw min/max
//!   and smoothed estimates (the mean of each buffer)
//! - **Distribution**: a histogram whose bucket edges are chosen from the first
//!   cache-full of values and then stay fixed
//!
//! ## Quick Start
//!
//! ```rust
//! use streamstat::prelude::*;
//!
//! let mut latency = Stat::new("ms");
//! for v in [12.0, 15.5, 11.2, 40.1, 13.3] {
//!     latency.add(v);
//! }
//!
//! println!("{}", latency);
//! assert_eq!(latency.max(), 40.1);
//! ```
//!
//! ## Configuration
//!
//! Settings are validated once, when the stat is built:
//!
//! ```rust
//! use streamstat::{ConfigError, Setting, Stat};
//!
//! let stat = Stat::builder("bytes")
//!     .order_capacity(10)
//!     .cache_capacity(500)
//!     .build()
//!     .unwrap();
//! assert_eq!(stat.config().cache_capacity(), 500);
//!
//! let err = Stat::builder("bytes")
//!     .order_capacity(10)
//!     .order_capacity(20)
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::Duplicate(Setting::OrderCapacity));
//! ```
//!
//! ## Thread Safety
//!
//! A [`Stat`] has no internal synchronization. Share it behind a `Mutex` and
//! hold the lock for reads as well as writes.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of [`Summary`] and histogram buckets

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

// Core traits always available
pub mod traits;

pub mod histogram;
pub mod order;
pub mod report;
pub mod stat;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::histogram::{BucketCount, Buckets, HistogramBuilder};
    pub use crate::order::{OrderBuffer, Retain};
    pub use crate::report::{HistogramChart, Summary};
    pub use crate::stat::{Stat, StatBuilder, StatConfig};
}

pub use report::Summary;
pub use stat::{Stat, StatBuilder, StatConfig};
pub use traits::{ConfigError, Setting, Sketch};

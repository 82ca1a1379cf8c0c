//! Streaming statistics accumulator
//!
//! [`Stat`] combines running sums, bounded extreme-value buffers and a
//! self-sizing histogram into one bounded-memory summary of a stream.
//!
//! # Example
//!
//! ```
//! use streamstat::Stat;
//!
//! let mut latency = Stat::builder("ms").cache_capacity(100).build().unwrap();
//!
//! for i in 0..1_000 {
//!     latency.add(10.0 + (i % 50) as f64);
//! }
//!
//! println!("{}", latency);
//! print!("{}", latency.histogram_report());
//! ```

mod accumulator;
mod config;

pub use accumulator::Stat;
pub use config::{StatBuilder, StatConfig, DEFAULT_ORDER_CAPACITY};

//! Bounded sorted buffers tracking the extremes of a stream
//!
//! An [`OrderBuffer`] keeps the N smallest or N largest values seen so far in
//! ascending order, using a fixed amount of memory regardless of stream length.
//!
//! # Example
//!
//! ```
//! use streamstat::order::OrderBuffer;
//!
//! let mut lows = OrderBuffer::smallest(3).unwrap();
//!
//! for value in [5.0, 1.0, 4.0, 2.0, 3.0] {
//!     lows.consider(value);
//! }
//!
//! assert_eq!(lows.values(), &[1.0, 2.0, 3.0]);
//! assert_eq!(lows.mean(), 2.0);
//! ```

mod buffer;

pub use buffer::{OrderBuffer, Retain, MIN_ORDER_CAPACITY};

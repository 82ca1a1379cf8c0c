//! Human-readable reports
//!
//! [`Summary`] renders the derived statistics of a [`Stat`](crate::Stat) as a
//! single line; [`HistogramChart`] draws its histogram as text. Both only read
//! the stat.

mod chart;
mod format;
mod summary;

pub use chart::HistogramChart;
pub use summary::Summary;

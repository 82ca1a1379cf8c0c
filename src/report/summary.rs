//! One-line summary of a stat

use super::format::Scientific;
use core::fmt;

/// Derived statistics of a [`Stat`](crate::Stat) at one point in time
///
/// All fields are zero for a stat with no observations. Displays as a single
/// line in scientific notation:
///
/// ```
/// use streamstat::Stat;
///
/// let mut stat = Stat::new("s");
/// stat.add_all([1.0, 2.0, 3.0]);
///
/// assert_eq!(
///     stat.summary().to_string(),
///     "      3 observations, min: 1.00e+00 (2.00e+00), avg: 2.00e+00, \
///      max: 3.00e+00 (2.00e+00), SD: 8.16e-01"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    /// Number of observations
    pub count: u64,
    /// Smallest observation
    pub min: f64,
    /// Mean of the N smallest observations
    pub mean_of_smallest: f64,
    /// Mean of all observations
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Largest observation
    pub max: f64,
    /// Mean of the N largest observations
    pub mean_of_largest: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sci = |v: f64| Scientific::new(v, 2, 8);
        write!(
            f,
            "{:7} observations, min: {} ({}), avg: {}, max: {} ({}), SD: {}",
            self.count,
            sci(self.min),
            sci(self.mean_of_smallest),
            sci(self.mean),
            sci(self.max),
            sci(self.mean_of_largest),
            sci(self.std_dev),
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Summary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Summary", 7)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("mean_of_smallest", &self.mean_of_smallest)?;
        state.serialize_field("mean", &self.mean)?;
        state.serialize_field("std_dev", &self.std_dev)?;
        state.serialize_field("max", &self.max)?;
        state.serialize_field("mean_of_largest", &self.mean_of_largest)?;
        state.end()
    }
}

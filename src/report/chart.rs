//! Text histogram chart

use super::format::{decimal_digits, FixedLayout};
use crate::histogram::Buckets;
use crate::Stat;
use core::fmt;

#[cfg(feature = "std")]
use std::borrow::Cow;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::borrow::Cow;

/// Significant figures shown for bucket edges
const EDGE_SIG_FIGS: usize = 3;
/// Bar characters per percentage point
const BAR_SCALE: f64 = 0.5;

/// Histogram of a [`Stat`] rendered as text
///
/// One line per bucket with its half-open interval, count, percentage of all
/// observations and a bar of `*`, framed by underflow and overflow lines.
///
/// ```text
/// units: ms
///           < 1.00: 0   0.00%
/// >= 1.00 , < 2.50: 2  50.00% *************************
/// >= 2.50 , < 4.00: 2  50.00% *************************
/// >= 4.00         : 0   0.00%
/// ```
#[derive(Clone, Debug)]
pub struct HistogramChart<'a> {
    units: &'a str,
    buckets: Cow<'a, Buckets>,
    total: u64,
}

impl<'a> HistogramChart<'a> {
    /// Chart a stat, or `None` if it has fewer observations than buckets
    ///
    /// A stat that is still buffering is charted from a provisional bucketing
    /// of its cache; the stat is not modified.
    pub fn of(stat: &'a Stat) -> Option<Self> {
        if stat.count() == 0 {
            return None;
        }

        let buckets = stat.histogram().snapshot(stat.min()..=stat.max())?;
        if (buckets.len() as u64) > stat.count() {
            return None;
        }

        Some(Self {
            units: stat.units(),
            buckets,
            total: stat.count(),
        })
    }

    /// Buckets being charted
    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }
}

impl fmt::Display for HistogramChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buckets = &*self.buckets;
        let FixedLayout { width, precision } = FixedLayout::for_sig_figs(
            EDGE_SIG_FIGS,
            &[buckets.start(), buckets.width(), buckets.end()],
        );
        let digits = decimal_digits(self.total);
        let tally = |count: u64| Tally {
            count,
            total: self.total,
            digits,
        };

        writeln!(f, "units: {}", self.units)?;
        writeln!(
            f,
            "{:width$}      < {:width$.precision$}: {}",
            "",
            buckets.start(),
            tally(buckets.underflow()),
        )?;
        for (lower, upper, count) in buckets.iter() {
            writeln!(
                f,
                ">= {:width$.precision$} , < {:width$.precision$}: {}",
                lower,
                upper,
                tally(count),
            )?;
        }
        writeln!(
            f,
            ">= {:width$.precision$}     {:width$}: {}",
            buckets.end(),
            "",
            tally(buckets.overflow()),
        )
    }
}

/// Count, percentage and bar for one chart line
struct Tally {
    count: u64,
    total: u64,
    digits: usize,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = 100.0 * self.count as f64 / self.total as f64;
        write!(f, "{:>digits$} {:6.2}% ", self.count, pct, digits = self.digits)?;
        for _ in 0..(pct * BAR_SCALE) as usize {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::histogram::BUCKET_WIDTH_SCALE;

    fn small_stat() -> Stat {
        let mut stat = Stat::builder("ms")
            .cache_capacity(4)
            .bucket_count(2)
            .build()
            .unwrap();
        stat.add_all([1.0, 2.0, 3.0, 4.0]);
        stat
    }

    #[test]
    fn test_chart_lines() {
        let stat = small_stat();
        let expected = "units: ms\n\
                        \x20         < 1.00: 0   0.00% \n\
                        >= 1.00 , < 2.50: 2  50.00% *************************\n\
                        >= 2.50 , < 4.00: 2  50.00% *************************\n\
                        >= 4.00         : 0   0.00% \n";
        assert_eq!(stat.histogram_report(), expected);
    }

    #[test]
    fn test_lines_align() {
        let mut stat = small_stat();
        stat.add_all([0.0, 100.0]);

        let report = stat.histogram_report();
        let colons: Vec<usize> = report
            .lines()
            .skip(1)
            .map(|line| line.find(':').unwrap())
            .collect();
        assert_eq!(colons.len(), 4);
        assert!(colons.windows(2).all(|w| w[0] == w[1]), "{}", report);
        assert!(report.contains(" 1  16.67% ********\n"), "{}", report);
    }

    #[test]
    fn test_lines_align_when_edge_rounds_up() {
        let mut stat = Stat::builder("ms")
            .cache_capacity(2)
            .bucket_count(2)
            .build()
            .unwrap();
        stat.add_all([0.0, 99.9995 / BUCKET_WIDTH_SCALE]);

        let report = stat.histogram_report();
        let colons: Vec<usize> = report
            .lines()
            .skip(1)
            .map(|line| line.find(':').unwrap())
            .collect();
        assert_eq!(colons.len(), 4);
        assert!(colons.windows(2).all(|w| w[0] == w[1]), "{}", report);
        assert!(report.contains(">=  50.00 , < 100.00: "), "{}", report);
        assert!(report.contains(">= 100.00           : "), "{}", report);
    }

    #[test]
    fn test_too_few_observations() {
        let mut stat = Stat::builder("ms").bucket_count(5).build().unwrap();
        stat.add_all([1.0, 2.0, 3.0, 4.0]);
        assert!(stat.chart().is_none());
        assert_eq!(stat.histogram_report(), "");

        stat.add(5.0);
        assert!(stat.chart().is_some());
    }

    #[test]
    fn test_preview_while_buffering() {
        let mut stat = Stat::new("req");
        stat.add_all((1..=10).map(f64::from));

        let chart = stat.chart().unwrap();
        assert!(matches!(chart.buckets, Cow::Owned(_)));
        assert_eq!(chart.buckets().len(), 2);
        assert_eq!(chart.buckets().counts(), &[5, 5]);
        assert!(!stat.histogram().is_finalized());
        assert_eq!(stat.histogram().cached().len(), 10);
    }
}

//! Number formatting helpers shared by the reports

use crate::math;
use core::fmt::{self, Write};

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

const MAX_PRECISION: usize = 16;

/// Scientific notation with a signed, at least two digit exponent
/// (`1.00e+00`), right-aligned to a minimum width
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scientific {
    value: f64,
    precision: usize,
    width: usize,
}

impl Scientific {
    pub(crate) fn new(value: f64, precision: usize, width: usize) -> Self {
        Self {
            value,
            precision,
            width,
        }
    }
}

impl fmt::Display for Scientific {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width;
        if !self.value.is_finite() {
            return write!(f, "{:>width$}", self.value);
        }

        let mut raw = String::new();
        write!(raw, "{:.*e}", self.precision, self.value)?;
        let (mantissa, exponent) = raw.split_once('e').ok_or(fmt::Error)?;
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
        let sign = if exponent < 0 { '-' } else { '+' };

        let mut out = String::new();
        write!(out, "{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())?;
        write!(f, "{:>width$}", out)
    }
}

/// Width and precision for printing a group of numbers in fixed-point
/// notation, aligned, each with at least a given number of significant figures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FixedLayout {
    pub(crate) width: usize,
    pub(crate) precision: usize,
}

impl FixedLayout {
    pub(crate) fn for_sig_figs(sig_figs: usize, values: &[f64]) -> Self {
        let precision = values
            .iter()
            .map(|&v| {
                let decimals = sig_figs as i32 - 1 - magnitude(v);
                (decimals.max(0) as usize).min(MAX_PRECISION)
            })
            .max()
            .unwrap_or(0);

        let width = values
            .iter()
            .map(|&v| rendered_width(v, precision))
            .max()
            .unwrap_or(1);

        Self { width, precision }
    }
}

/// Power of ten of the leading digit; zero for zero and non-finite values
fn magnitude(value: f64) -> i32 {
    let abs = math::abs(value);
    if abs == 0.0 || !abs.is_finite() {
        return 0;
    }
    math::floor(math::log10(abs)) as i32
}

/// Characters in `value` printed with `precision` decimals, after rounding
fn rendered_width(value: f64, precision: usize) -> usize {
    let mut width = WidthCounter(0);
    match write!(width, "{:.*}", precision, value) {
        Ok(()) => width.0,
        Err(_) => 0,
    }
}

struct WidthCounter(usize);

impl Write for WidthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.chars().count();
        Ok(())
    }
}

/// Number of decimal digits needed to print `n`
pub(crate) fn decimal_digits(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

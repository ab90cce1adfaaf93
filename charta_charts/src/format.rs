// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatters.
//!
//! A formatter is any `Fn(&V) -> String`. Axes store them as [`Formatter`] and
//! fall back to [`TickValue::default_label`] when none is set.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt::Write;

use chrono::{DateTime, Utc};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A shared tick label formatter.
pub type Formatter<V> = Arc<dyn Fn(&V) -> String>;

/// Domain values that have a default tick label.
pub trait TickValue: Clone {
    /// The label used when an axis has no custom formatter.
    fn default_label(&self) -> String;
}

/// Integer-valued floats print without a decimal point; others with two
/// fractional digits.
impl TickValue for f64 {
    fn default_label(&self) -> String {
        let v = *self;
        if !v.is_finite() {
            return v.to_string();
        }
        if v == 0.0 {
            return String::from("0");
        }
        if v == v.round() {
            format!("{v:.0}")
        } else {
            format!("{v:.2}")
        }
    }
}

/// `YYYY-MM-DD`.
impl TickValue for DateTime<Utc> {
    fn default_label(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl TickValue for String {
    fn default_label(&self) -> String {
        self.clone()
    }
}

/// Fixed-point formatting with `precision` fractional digits.
pub fn number(precision: usize) -> impl Fn(&f64) -> String + Clone {
    move |v| format!("{v:.precision$}")
}

/// Formats instants with a `strftime`-style pattern (see [`chrono::format::strftime`]).
///
/// A pattern chrono cannot render falls back to the default `YYYY-MM-DD` label.
pub fn time(pattern: impl Into<String>) -> impl Fn(&DateTime<Utc>) -> String + Clone {
    let pattern: String = pattern.into();
    move |t| {
        let mut out = String::new();
        if write!(out, "{}", t.format(&pattern)).is_err() {
            return t.default_label();
        }
        out
    }
}

/// SI prefixes, largest first.
const SI_PREFIXES: [(f64, &str); 9] = [
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "μ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Formats a value with an SI prefix: `1500 → "1.5k"`, `1e6 → "1M"`.
///
/// The scaled value prints as an integer when exact, otherwise with one
/// fractional digit. A value that would round up to `1000` moves to the next
/// larger prefix (`999999 → "1.0M"`). Magnitudes below `1e-12` use scientific
/// notation.
pub fn si(value: &f64) -> String {
    let v = *value;
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return String::from("0");
    }
    let magnitude = v.abs();
    for (i, (threshold, suffix)) in SI_PREFIXES.into_iter().enumerate() {
        if magnitude >= threshold {
            let mut scaled = v / threshold;
            let mut suffix = suffix;
            if (scaled.abs() * 10.0).round() >= 10_000.0
                && let Some(&(larger, larger_suffix)) =
                    i.checked_sub(1).and_then(|j| SI_PREFIXES.get(j))
            {
                scaled = v / larger;
                suffix = larger_suffix;
            }
            return if scaled == scaled.round() {
                format!("{scaled:.0}{suffix}")
            } else {
                format!("{scaled:.1}{suffix}")
            };
        }
    }
    format!("{v:e}")
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn default_float_labels() {
        assert_eq!(100.0_f64.default_label(), "100");
        assert_eq!((-20.0_f64).default_label(), "-20");
        assert_eq!(0.25_f64.default_label(), "0.25");
        assert_eq!((1.0_f64 / 3.0).default_label(), "0.33");
        assert_eq!((-0.0_f64).default_label(), "0");
    }

    #[test]
    fn default_time_and_string_labels() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 17, 0, 0).unwrap();
        assert_eq!(t.default_label(), "2024-03-09");
        assert_eq!(String::from("Mon").default_label(), "Mon");
    }

    #[test]
    fn fixed_precision() {
        let f = number(3);
        assert_eq!(f(&2.5), "2.500");
        assert_eq!(number(0)(&7.0), "7");
    }

    #[test]
    fn time_pattern() {
        let t = Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 0).unwrap();
        assert_eq!(time("%H:%M")(&t), "17:05");
        assert_eq!(time("%Y-%")(&t), "2024-03-09");
    }

    #[test]
    fn si_prefixes() {
        assert_eq!(si(&1500.0), "1.5k");
        assert_eq!(si(&1_000_000.0), "1M");
        assert_eq!(si(&0.001), "1m");
        assert_eq!(si(&0.0), "0");
        assert_eq!(si(&-2e9), "-2G");
        assert_eq!(si(&42.0), "42");
        assert_eq!(si(&2.5e-6), "2.5μ");
        assert_eq!(si(&3e-15), "3e-15");
    }

    #[test]
    fn si_rounding_carries_into_the_next_prefix() {
        assert_eq!(si(&999_999.0), "1.0M");
        assert_eq!(si(&-999_999.0), "-1.0M");
        assert_eq!(si(&999.96), "1.0k");
        assert_eq!(si(&0.999_96), "1.0");
        assert_eq!(si(&999.94), "999.9");
        assert_eq!(si(&999_940.0), "999.9k");
        assert_eq!(si(&1234.0), "1.2k");
        assert_eq!(si(&1e15), "1000T");
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time scale and calendar-aligned tick intervals.

extern crate alloc;

use alloc::vec::Vec;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeDelta, Utc};

use super::linear::ScaleLinear;
use super::{Domain, Scale};
use crate::error::{ScaleError, check_number};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Upper bound on instants produced by a single interval walk.
const MAX_INSTANTS: usize = 10_000;

/// A calendar interval used to place time ticks.
///
/// Sub-day intervals align to UTC multiples of the interval since the epoch;
/// longer intervals align to calendar boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    /// Every `n` seconds.
    Seconds(u32),
    /// Every `n` minutes.
    Minutes(u32),
    /// Every `n` hours.
    Hours(u32),
    /// Every midnight.
    Day,
    /// Every Monday at midnight.
    Week,
    /// The first of every `n`-th month (Jan, Apr, Jul, Oct for quarters).
    Months(u32),
    /// January 1st of every year divisible by `n`.
    Years(u32),
}

impl TimeInterval {
    /// Candidate intervals, finest first.
    pub const LADDER: [Self; 19] = [
        Self::Seconds(1),
        Self::Seconds(5),
        Self::Seconds(15),
        Self::Seconds(30),
        Self::Minutes(1),
        Self::Minutes(5),
        Self::Minutes(15),
        Self::Minutes(30),
        Self::Hours(1),
        Self::Hours(3),
        Self::Hours(6),
        Self::Hours(12),
        Self::Day,
        Self::Week,
        Self::Months(1),
        Self::Months(3),
        Self::Years(1),
        Self::Years(5),
        Self::Years(10),
    ];

    /// The latest boundary at or before `t`.
    pub fn floor(self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Seconds(n) => floor_seconds(t, i64::from(n)),
            Self::Minutes(n) => floor_seconds(t, 60 * i64::from(n)),
            Self::Hours(n) => floor_seconds(t, 3600 * i64::from(n)),
            Self::Day => midnight(t.date_naive()),
            Self::Week => {
                let d = t.date_naive();
                let back = u64::from(d.weekday().num_days_from_monday());
                midnight(d.checked_sub_days(Days::new(back))?)
            }
            Self::Months(n) => {
                let n = n.max(1);
                let m0 = t.month0() - t.month0() % n;
                midnight(NaiveDate::from_ymd_opt(t.year(), m0 + 1, 1)?)
            }
            Self::Years(n) => {
                let n = i32::try_from(n.max(1)).ok()?;
                let y = t.year() - t.year().rem_euclid(n);
                midnight(NaiveDate::from_ymd_opt(y, 1, 1)?)
            }
        }
    }

    /// The boundary one interval after `t`.
    pub fn offset(self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Seconds(n) => t.checked_add_signed(TimeDelta::try_seconds(i64::from(n))?),
            Self::Minutes(n) => t.checked_add_signed(TimeDelta::try_minutes(i64::from(n))?),
            Self::Hours(n) => t.checked_add_signed(TimeDelta::try_hours(i64::from(n))?),
            Self::Day => t.checked_add_days(Days::new(1)),
            Self::Week => t.checked_add_days(Days::new(7)),
            Self::Months(n) => t.checked_add_months(Months::new(n.max(1))),
            Self::Years(n) => t.checked_add_months(Months::new(n.max(1).saturating_mul(12))),
        }
    }

    /// Boundaries inside `[lo, hi]`, ascending, at most `limit` of them.
    pub fn range(self, lo: DateTime<Utc>, hi: DateTime<Utc>, limit: usize) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let Some(mut t) = self.floor(lo) else {
            return out;
        };
        if t < lo {
            match self.offset(t) {
                Some(next) => t = next,
                None => return out,
            }
        }
        while t <= hi && out.len() < limit {
            out.push(t);
            match self.offset(t) {
                Some(next) if next > t => t = next,
                _ => break,
            }
        }
        out
    }
}

fn floor_seconds(t: DateTime<Utc>, step: i64) -> Option<DateTime<Utc>> {
    let s = t.timestamp();
    DateTime::from_timestamp(s - s.rem_euclid(step.max(1)), 0)
}

fn midnight(d: NaiveDate) -> Option<DateTime<Utc>> {
    Some(d.and_hms_opt(0, 0, 0)?.and_utc())
}

/// A linear mapping from UTC instants to a pixel range.
///
/// Instants are interpolated by their millisecond timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    domain: (DateTime<Utc>, DateTime<Utc>),
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> Self {
        let inner = ScaleLinear::new((millis(domain.0), millis(domain.1)), range);
        Self { domain, inner }
    }

    /// Maps a millisecond timestamp into range space.
    pub fn map(&self, ms: f64) -> f64 {
        self.inner.map(ms)
    }

    /// The interval `ticks(count)` uses: the finest rung of
    /// [`TimeInterval::LADDER`] with at most `count` boundaries in the domain.
    ///
    /// Domains too wide for the ladder fall back to decades and centuries.
    pub fn tick_interval(&self, count: usize) -> Option<TimeInterval> {
        if count == 0 {
            return None;
        }
        let (lo, hi) = self.ordered();
        let fits = |iv: TimeInterval| iv.range(lo, hi, count + 1).len() <= count;
        if let Some(iv) = TimeInterval::LADDER.into_iter().find(|&iv| fits(iv)) {
            return Some(iv);
        }
        let mut years: u32 = 10;
        loop {
            for m in [2, 5, 10] {
                let iv = TimeInterval::Years(years.saturating_mul(m));
                if fits(iv) {
                    return Some(iv);
                }
            }
            if years >= 100_000 {
                return None;
            }
            years = years.saturating_mul(10);
        }
    }

    fn ordered(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (a, b) = self.domain;
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "millisecond timestamps stay far below 2^53"
)]
fn millis(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64
}

impl Scale for ScaleTime {
    type Domain = DateTime<Utc>;

    fn apply(&self, value: &DateTime<Utc>) -> Result<f64, ScaleError> {
        Ok(self.inner.map(millis(*value)))
    }

    fn invert(&self, position: f64) -> Result<DateTime<Utc>, ScaleError> {
        let ms = self.inner.unmap(check_number(position)?).round();
        if !ms.is_finite() || ms.abs() > 8.64e18 {
            return Err(ScaleError::NotInvertible { position });
        }
        #[allow(clippy::cast_possible_truncation, reason = "bounded above")]
        let ms = ms as i64;
        DateTime::from_timestamp_millis(ms).ok_or(ScaleError::NotInvertible { position })
    }

    /// Calendar-aligned instants; see [`ScaleTime::tick_interval`].
    fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let (lo, hi) = self.ordered();
        if count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return alloc::vec![lo];
        }
        let Some(interval) = self.tick_interval(count) else {
            return Vec::new();
        };
        crate::log::debug!(?interval, count, "time ticks: chose interval");
        interval.range(lo, hi, MAX_INSTANTS.min(count))
    }

    fn domain(&self) -> Domain {
        Domain::Temporal(self.domain.0, self.domain.1)
    }

    fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::TimeZone;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn one_year_with_twelve_ticks_is_monthly() {
        let s = ScaleTime::new((ymd(2024, 1, 1), ymd(2024, 12, 31)), (0.0, 1000.0));
        assert_eq!(s.tick_interval(12), Some(TimeInterval::Months(1)));
        let ticks = s.ticks(12);
        assert_eq!(ticks.len(), 12);
        for (i, t) in ticks.iter().enumerate() {
            assert_eq!(*t, ymd(2024, u32::try_from(i).unwrap() + 1, 1));
        }
    }

    #[test]
    fn quarters_start_in_january() {
        let s = ScaleTime::new((ymd(2023, 2, 10), ymd(2024, 11, 1)), (0.0, 1.0));
        assert_eq!(s.tick_interval(7), Some(TimeInterval::Months(3)));
        assert_eq!(s.ticks(7)[0], ymd(2023, 4, 1));
    }

    #[test]
    fn weeks_align_to_monday() {
        // 2024-03-06 is a Wednesday.
        let t = Utc.with_ymd_and_hms(2024, 3, 6, 13, 45, 0).unwrap();
        assert_eq!(TimeInterval::Week.floor(t), Some(ymd(2024, 3, 4)));
    }

    #[test]
    fn sub_day_intervals() {
        let lo = Utc.with_ymd_and_hms(2024, 5, 1, 10, 7, 0).unwrap();
        let hi = Utc.with_ymd_and_hms(2024, 5, 1, 11, 2, 0).unwrap();
        let s = ScaleTime::new((lo, hi), (0.0, 600.0));
        assert_eq!(s.tick_interval(6), Some(TimeInterval::Minutes(15)));
        let ticks = s.ticks(6);
        assert_eq!(
            ticks.first().copied(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap())
        );
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn wide_domains_fall_back_to_long_year_steps() {
        let s = ScaleTime::new((ymd(1000, 1, 1), ymd(2000, 1, 1)), (0.0, 1.0));
        assert_eq!(s.tick_interval(11), Some(TimeInterval::Years(100)));
    }

    #[test]
    fn endpoints_and_inverse() {
        let (a, b) = (ymd(2024, 1, 1), ymd(2024, 1, 11));
        let s = ScaleTime::new((a, b), (0.0, 100.0));
        assert_eq!(s.apply(&a), Ok(0.0));
        assert_eq!(s.apply(&b), Ok(100.0));
        assert_eq!(s.invert(50.0), Ok(ymd(2024, 1, 6)));
        let t = Utc.with_ymd_and_hms(2024, 1, 3, 7, 30, 0).unwrap();
        assert_eq!(s.invert(s.apply(&t).unwrap()), Ok(t));
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use super::linear::lerp;
use super::{Domain, Scale};
use crate::error::{ScaleError, check_number};

/// Multipliers used to subdivide a decade when too few powers fit.
const SUBDIVISIONS: [f64; 4] = [1.0, 2.0, 3.0, 5.0];

/// A logarithmic mapping from a strictly positive domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a base-10 log scale.
    ///
    /// Fails with [`ScaleError::NonPositiveLogDomain`] if either endpoint is
    /// not strictly positive, and [`ScaleError::EmptyDomain`] if one is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        for d in [domain.0, domain.1] {
            check_number(d)?;
            if d <= 0.0 {
                return Err(ScaleError::NonPositiveLogDomain { value: d });
            }
            if !d.is_finite() {
                return Err(ScaleError::EmptyDomain);
            }
        }
        Ok(Self {
            domain,
            range,
            base: 10.0,
        })
    }

    /// Sets the log base.
    pub fn with_base(mut self, base: f64) -> Result<Self, ScaleError> {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return Err(ScaleError::InvalidBase { base });
        }
        self.base = base;
        Ok(self)
    }

    /// Returns the log base.
    pub fn base(&self) -> f64 {
        self.base
    }

    fn log_base(&self, x: f64) -> f64 {
        if self.base == 10.0 {
            x.log10()
        } else {
            x.ln() / self.base.ln()
        }
    }

    fn pow_base(&self, e: f64) -> f64 {
        if self.base == 10.0 {
            10_f64.powf(e)
        } else {
            (e * self.base.ln()).exp()
        }
    }

    /// `m · base^e`, dividing for negative exponents so decimal ticks stay exact.
    fn power(&self, m: f64, e: i32) -> f64 {
        if e < 0 {
            m / self.base.powi(-e)
        } else {
            m * self.base.powi(e)
        }
    }

    /// Maps a positive value into range space.
    ///
    /// Non-positive input maps to `r0`; use [`Scale::apply`] to get an error instead.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        if x <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(self.domain.0);
        let ld1 = self.log_base(self.domain.1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        if x == self.domain.1 {
            return r1;
        }
        lerp(r0, r1, (self.log_base(x) - ld0) / denom)
    }

    /// Returns the first domain endpoint (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the second domain endpoint (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

impl Scale for ScaleLog {
    type Domain = f64;

    fn apply(&self, value: &f64) -> Result<f64, ScaleError> {
        let v = check_number(*value)?;
        if v <= 0.0 {
            return Err(ScaleError::NonPositiveLogDomain { value: v });
        }
        Ok(self.map(v))
    }

    fn invert(&self, position: f64) -> Result<f64, ScaleError> {
        let p = check_number(position)?;
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return Ok(d0);
        }
        let t = (p - r0) / denom;
        if t == 0.0 {
            return Ok(d0);
        }
        if t == 1.0 {
            return Ok(d1);
        }
        let l = lerp(self.log_base(d0), self.log_base(d1), t);
        Ok(self.pow_base(l))
    }

    /// Integer powers of the base inside the domain.
    ///
    /// When fewer than `count` powers fit, each decade is subdivided at
    /// `{2, 3, 5}·base^k`, keeping every `⌈len / 2·count⌉`-th value so at most
    /// `2·count` remain; when more fit, every `⌈powers / count⌉`-th power is kept.
    fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let eps = 1e-9;
        let first = exponent(self.log_base(lo).floor());
        let last = exponent(self.log_base(hi).ceil());
        let inside = |v: f64| v >= lo * (1.0 - eps) && v <= hi * (1.0 + eps);

        let powers: Vec<i32> = (first..=last)
            .filter(|&e| inside(self.power(1.0, e)))
            .collect();

        if powers.len() > count {
            let stride = powers.len().div_ceil(count);
            crate::log::debug!(powers = powers.len(), stride, "log ticks: thinning powers");
            return powers
                .iter()
                .step_by(stride)
                .map(|&e| self.power(1.0, e))
                .collect();
        }
        if powers.len() < count {
            crate::log::debug!(powers = powers.len(), "log ticks: subdividing decades");
            let mut out = Vec::new();
            for e in first..=last {
                for m in SUBDIVISIONS {
                    if m >= self.base {
                        continue;
                    }
                    let v = self.power(m, e);
                    if inside(v) {
                        out.push(v.clamp(lo, hi));
                    }
                }
            }
            let limit = 2 * count;
            if out.len() > limit {
                let stride = out.len().div_ceil(limit);
                return out.into_iter().step_by(stride).collect();
            }
            return out;
        }
        powers.iter().map(|&e| self.power(1.0, e)).collect()
    }

    fn domain(&self) -> Domain {
        Domain::Continuous(self.domain.0, self.domain.1)
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }
}

fn exponent(v: f64) -> i32 {
    let v = v.clamp(-1000.0, 1000.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    {
        v as i32
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn endpoints_map_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0)).unwrap();
        assert_eq!(s.apply(&1.0), Ok(0.0));
        assert_eq!(s.apply(&100.0), Ok(10.0));
        assert!((s.apply(&10.0).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_values_are_domain_errors() {
        assert_eq!(
            ScaleLog::new((0.0, 10.0), (0.0, 1.0)),
            Err(ScaleError::NonPositiveLogDomain { value: 0.0 })
        );
        let s = ScaleLog::new((1.0, 10.0), (0.0, 1.0)).unwrap();
        assert_eq!(
            s.apply(&-2.0),
            Err(ScaleError::NonPositiveLogDomain { value: -2.0 })
        );
    }

    #[test]
    fn invalid_base_is_rejected() {
        let s = ScaleLog::new((1.0, 10.0), (0.0, 1.0)).unwrap();
        assert_eq!(s.with_base(1.0), Err(ScaleError::InvalidBase { base: 1.0 }));
        assert!(s.with_base(2.0).is_ok());
    }

    #[test]
    fn invert_round_trips() {
        let s = ScaleLog::new((1.0, 1e4), (0.0, 400.0)).unwrap();
        for v in [1.0, 3.0, 42.0, 999.0, 1e4] {
            let back = s.invert(s.apply(&v).unwrap()).unwrap();
            assert!((back - v).abs() < 1e-9 * v, "{v} -> {back}");
        }
    }

    #[test]
    fn narrow_domain_subdivides_decades() {
        let s = ScaleLog::new((1.0, 1000.0), (0.0, 300.0)).unwrap();
        assert_eq!(
            s.ticks(10),
            vec![1.0, 2.0, 3.0, 5.0, 10.0, 20.0, 30.0, 50.0, 100.0, 200.0, 300.0, 500.0, 1000.0]
        );
    }

    #[test]
    fn powers_only_when_they_fill_the_request() {
        let s = ScaleLog::new((1.0, 1000.0), (0.0, 300.0)).unwrap();
        assert_eq!(s.ticks(4), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn wide_domain_thins_powers() {
        let s = ScaleLog::new((1.0, 1e20), (0.0, 300.0)).unwrap();
        let ticks = s.ticks(5);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0], 1.0);
        assert_eq!(ticks[4], 1e20);
    }

    #[test]
    fn subdivided_decades_are_thinned_to_twice_the_request() {
        let s = ScaleLog::new((1.0, 1e5), (0.0, 300.0)).unwrap();
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks.first().copied(), Some(1.0));
        assert_eq!(ticks.last().copied(), Some(1e5));

        for &(d0, d1) in &[(0.5, 2000.0), (1.0, 1e5), (0.02, 7.0), (3.0, 4e8)] {
            let s = ScaleLog::new((d0, d1), (0.0, 1.0)).unwrap();
            for n in 1..=20_usize {
                let ticks = s.ticks(n);
                assert!(ticks.len() <= 2 * n, "{} ticks for n={n}", ticks.len());
                assert!(ticks.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn negative_exponents_are_exact() {
        let s = ScaleLog::new((0.001, 1.0), (0.0, 300.0)).unwrap();
        assert_eq!(s.ticks(4), vec![0.001, 0.01, 0.1, 1.0]);
    }

    #[test]
    fn base_two_uses_powers_of_two() {
        let s = ScaleLog::new((1.0, 16.0), (0.0, 100.0))
            .unwrap()
            .with_base(2.0)
            .unwrap();
        assert_eq!(s.ticks(5), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
    }
}

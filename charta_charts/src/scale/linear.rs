// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::vec::Vec;

use super::ticks::{linear_ticks, nice_domain};
use super::{Domain, Scale};
use crate::error::{ScaleError, check_domain, check_number};

/// A linear mapping from a continuous domain to a pixel range.
///
/// Either pair may be reversed; a reversed range gives a decreasing mapping,
/// which is the usual setup for y axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` positions.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Makes `apply` clamp its output into the range instead of extrapolating.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Returns a copy whose domain is extended to the enclosing tick multiples.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_domain(self.domain.0, self.domain.1, count);
        self
    }

    /// Maps a value from domain space into range space.
    ///
    /// Endpoints map exactly: `map(d0) == r0` and `map(d1) == r1`. A degenerate
    /// domain maps everything to `r0`.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let mut t = (x - d0) / denom;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        lerp(r0, r1, t)
    }

    /// Maps a range position back into domain space.
    pub fn unmap(&self, p: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let mut t = (p - r0) / denom;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        lerp(d0, d1, t)
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

/// `a` at `t = 0` and `b` at `t = 1`, both exactly.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 { b } else { a + t * (b - a) }
}

impl Scale for ScaleLinear {
    type Domain = f64;

    /// Fails with [`ScaleError::EmptyDomain`] when a domain end is not finite.
    fn apply(&self, value: &f64) -> Result<f64, ScaleError> {
        check_domain(self.domain.0, self.domain.1)?;
        Ok(self.map(check_number(*value)?))
    }

    fn invert(&self, position: f64) -> Result<f64, ScaleError> {
        check_domain(self.domain.0, self.domain.1)?;
        Ok(self.unmap(check_number(position)?))
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    fn domain(&self) -> Domain {
        Domain::Continuous(self.domain.0, self.domain.1)
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn endpoints_map_exactly() {
        let s = ScaleLinear::new((0.3, 7.1), (0.1, 0.7));
        assert_eq!(s.map(0.3), 0.1);
        assert_eq!(s.map(7.1), 0.7);
    }

    #[test]
    fn apply_and_invert_round_trip() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.apply(&5.0), Ok(50.0));
        let v = s.invert(50.0).unwrap();
        assert!((v - 5.0).abs() < 1e-9);

        let s = ScaleLinear::new((-3.0, 17.0), (480.0, 20.0));
        for i in 0..=40 {
            let v = -3.0 + f64::from(i) * 0.5;
            let back = s.invert(s.apply(&v).unwrap()).unwrap();
            assert!((back - v).abs() < 1e-9, "{v} -> {back}");
        }
    }

    #[test]
    fn reversed_range_decreases() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert!(s.map(2.0) > s.map(8.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((4.0, 4.0), (10.0, 20.0));
        assert_eq!(s.map(4.0), 10.0);
        assert_eq!(s.map(100.0), 10.0);
    }

    #[test]
    fn clamp_limits_extrapolation() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.map(20.0), 200.0);
        let s = s.with_clamp(true);
        assert_eq!(s.map(20.0), 100.0);
        assert_eq!(s.map(-5.0), 0.0);
    }

    #[test]
    fn nan_is_rejected() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(s.apply(&f64::NAN), Err(ScaleError::NotANumber));
        assert_eq!(s.invert(f64::NAN), Err(ScaleError::NotANumber));
    }

    #[test]
    fn non_finite_domain_is_an_error() {
        for domain in [(f64::NAN, 1.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 0.0)] {
            let s = ScaleLinear::new(domain, (0.0, 100.0));
            assert_eq!(s.apply(&0.5), Err(ScaleError::EmptyDomain));
            assert_eq!(s.invert(50.0), Err(ScaleError::EmptyDomain));
            assert!(s.ticks(5).is_empty());
        }
    }

    #[test]
    fn ticks_far_from_zero() {
        let s = ScaleLinear::new((1e12, 1e12 + 10.0), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(s.apply(&ticks[5]), Ok(0.5));
    }

    #[test]
    fn nice_extends_domain() {
        let s = ScaleLinear::new((0.3, 9.7), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), Domain::Continuous(0.0, 10.0));
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let s = ScaleLinear::new((0.0, 100.0), (0.0, 500.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert!(ticks.iter().all(|t| (0.0..=100.0).contains(t)));
    }
}

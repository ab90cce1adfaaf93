// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use super::linear::lerp;
use super::ticks::linear_ticks;
use super::{Domain, Scale};
use crate::error::{ScaleError, check_domain, check_number};

/// A power mapping: the offset from `d0` is raised to an exponent before
/// being interpolated into the range.
///
/// `apply(v) = r0 + (sp(v − d0) / sp(d1 − d0)) · (r1 − r0)` where
/// `sp(x) = sign(x) · |x|^e`, so values below `d0` extrapolate symmetrically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePow {
    domain: (f64, f64),
    range: (f64, f64),
    exponent: f64,
}

impl ScalePow {
    /// Creates a power scale with exponent 1 (equivalent to linear).
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            exponent: 1.0,
        }
    }

    /// Creates a square-root scale.
    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            exponent: 0.5,
            ..Self::new(domain, range)
        }
    }

    /// Sets the exponent; it must be finite and strictly positive.
    pub fn with_exponent(mut self, exponent: f64) -> Result<Self, ScaleError> {
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(ScaleError::InvalidExponent { exponent });
        }
        self.exponent = exponent;
        Ok(self)
    }

    /// Returns the exponent.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    fn signed_pow(x: f64, e: f64) -> f64 {
        if x < 0.0 { -(-x).powf(e) } else { x.powf(e) }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = Self::signed_pow(d1 - d0, self.exponent);
        if denom == 0.0 || !denom.is_finite() {
            return r0;
        }
        if x == d1 {
            return r1;
        }
        lerp(r0, r1, Self::signed_pow(x - d0, self.exponent) / denom)
    }

    /// Maps a range position back into domain space.
    pub fn unmap(&self, p: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        let t = (p - r0) / span;
        if t == 1.0 {
            return d1;
        }
        let scaled = t * Self::signed_pow(d1 - d0, self.exponent);
        d0 + Self::signed_pow(scaled, 1.0 / self.exponent)
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

impl Scale for ScalePow {
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
    fn square_root_mapping() {
        let s = ScalePow::sqrt((0.0, 100.0), (0.0, 10.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(100.0), 10.0);
        assert!((s.map(25.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn squared_mapping_round_trips() {
        let s = ScalePow::new((2.0, 12.0), (300.0, 0.0))
            .with_exponent(2.0)
            .unwrap();
        for v in [2.0, 3.5, 7.0, 11.0, 12.0] {
            let back = s.invert(s.apply(&v).unwrap()).unwrap();
            assert!((back - v).abs() < 1e-9, "{v} -> {back}");
        }
        assert!(s.map(3.0) > s.map(10.0));
    }

    #[test]
    fn values_below_origin_extrapolate_symmetrically() {
        let s = ScalePow::new((0.0, 4.0), (0.0, 100.0))
            .with_exponent(0.5)
            .unwrap();
        assert!((s.map(-4.0) + 100.0).abs() < 1e-9);
    }

    #[test]
    fn bad_exponents_are_rejected() {
        let s = ScalePow::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(
            s.with_exponent(0.0),
            Err(ScaleError::InvalidExponent { exponent: 0.0 })
        );
        assert!(s.with_exponent(f64::INFINITY).is_err());
    }

    #[test]
    fn non_finite_domain_is_an_error() {
        let s = ScalePow::sqrt((f64::NAN, 1.0), (0.0, 10.0));
        assert_eq!(s.apply(&0.5), Err(ScaleError::EmptyDomain));
        assert_eq!(s.invert(5.0), Err(ScaleError::EmptyDomain));
        assert!(s.ticks(5).is_empty());

        let s = ScalePow::new((0.0, f64::INFINITY), (0.0, 10.0));
        assert_eq!(s.apply(&0.5), Err(ScaleError::EmptyDomain));
    }

    #[test]
    fn ticks_match_linear() {
        let s = ScalePow::sqrt((0.0, 100.0), (0.0, 10.0));
        assert_eq!(s.ticks(5).len(), 6);
    }
}

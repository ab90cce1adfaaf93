// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Nice number" tick generation for continuous domains.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Nice step multipliers, finest first.
const NICE_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Upper bound on generated ticks, whatever the request.
const MAX_TICKS: usize = 10_000;

/// Upper bound on step refinements for a single request.
const MAX_REFINEMENTS: usize = 64;

/// A nice step: `k · 10^e` for some multiplier `k` and decimal exponent `e`.
///
/// Kept factored so tick values can be computed as `i · k / 10^-e` for negative
/// exponents, which is exact for decimal steps such as `0.1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NiceStep {
    multiplier: f64,
    exponent: i32,
}

impl NiceStep {
    /// The step as a float.
    pub(crate) fn value(self) -> f64 {
        self.nth(1.0)
    }

    /// The next finer nice step (`5 · 10^e` follows `1 · 10^(e+1)`).
    pub(crate) fn finer(self) -> Self {
        match NICE_MULTIPLIERS.iter().position(|&k| k == self.multiplier) {
            Some(i) if i > 0 => Self {
                multiplier: NICE_MULTIPLIERS[i - 1],
                exponent: self.exponent,
            },
            _ => Self {
                multiplier: 5.0,
                exponent: self.exponent - 1,
            },
        }
    }

    /// `i · step` for an integral `i`, computed without accumulating error.
    pub(crate) fn nth(self, i: f64) -> f64 {
        if self.exponent < 0 {
            i * self.multiplier / 10_f64.powi(-self.exponent)
        } else {
            i * self.multiplier * 10_f64.powi(self.exponent)
        }
    }
}

/// Picks the finest nice step that splits `span` into at most `count` intervals.
pub(crate) fn nice_step(span: f64, count: usize) -> Option<NiceStep> {
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }
    let raw = span / count as f64;
    let exponent = {
        let e = raw.log10().floor().clamp(-300.0, 300.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            e as i32
        }
    };
    let limit = count as f64 * (1.0 + 1e-9);
    for multiplier in NICE_MULTIPLIERS {
        let step = NiceStep {
            multiplier,
            exponent,
        };
        if span / step.value() <= limit {
            return Some(step);
        }
    }
    // `raw < 10^(e+1)` so the multiplier 10 always fits; this is only reached
    // through rounding at the extremes of the float range.
    Some(NiceStep {
        multiplier: 1.0,
        exponent: exponent + 1,
    })
}

/// Ascending multiples of a nice step inside `[min(d0, d1), max(d0, d1)]`.
///
/// Returns no ticks for `count == 0` or a non-finite domain, and the single
/// value for a degenerate domain.
pub(crate) fn linear_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    if count == 0 || !d0.is_finite() || !d1.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    if lo == hi {
        return alloc::vec![lo];
    }
    let Some(mut step) = nice_step(hi - lo, count) else {
        return Vec::new();
    };
    let mut ticks = multiples_within(step, lo, hi);
    // A coarse step can straddle a narrow, offset domain; refine until at least
    // half the requested ticks land inside it, without overshooting twice the
    // request. Steps below the float resolution at `lo`/`hi` cannot separate
    // ticks, so refinement stops there.
    let min_ticks = count.div_ceil(2);
    let resolution = lo.abs().max(hi.abs()) * f64::EPSILON * count as f64;
    for _ in 0..MAX_REFINEMENTS {
        if ticks.len() >= min_ticks {
            break;
        }
        let finer = step.finer();
        if finer.value() < resolution {
            break;
        }
        let candidate = multiples_within(finer, lo, hi);
        if candidate.len() > 2 * count {
            break;
        }
        step = finer;
        ticks = candidate;
    }
    ticks
}

fn multiples_within(step: NiceStep, lo: f64, hi: f64) -> Vec<f64> {
    let s = step.value();
    let eps = 1e-9;
    let first = (lo / s - eps).ceil();
    let last = (hi / s + eps).floor();
    if last < first {
        return Vec::new();
    }
    let mut ticks: Vec<f64> = Vec::new();
    let mut i = first;
    while i <= last && ticks.len() < MAX_TICKS {
        let v = step.nth(i).clamp(lo, hi);
        // Indices past 2^53 collapse onto the same float.
        if ticks.last().is_none_or(|&prev| v > prev) {
            ticks.push(v);
        }
        let next = i + 1.0;
        if next == i {
            break;
        }
        i = next;
    }
    ticks
}

/// Extends `[d0, d1]` outward to the enclosing multiples of the tick step,
/// keeping the domain's direction.
pub(crate) fn nice_domain(d0: f64, d1: f64, count: usize) -> (f64, f64) {
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let Some(step) = nice_step(hi - lo, count) else {
        return (d0, d1);
    };
    let s = step.value();
    let lo = step.nth((lo / s).floor());
    let hi = step.nth((hi / s).ceil());
    if d0 <= d1 { (lo, hi) } else { (hi, lo) }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    /// The smallest positive gap between consecutive ticks.
    fn tick_spacing(ticks: &[f64]) -> f64 {
        let step = ticks
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(f64::INFINITY, f64::min);
        if step.is_finite() { step } else { 0.0 }
    }

    fn assert_count_bounds(d0: f64, d1: f64, n: usize) -> Vec<f64> {
        let ticks = linear_ticks(d0, d1, n);
        assert!(
            ticks.len() >= n.div_ceil(2) && ticks.len() <= 2 * n,
            "{} ticks for n={n} over [{d0}, {d1}]",
            ticks.len()
        );
        for t in &ticks {
            assert!(*t >= d0.min(d1) && *t <= d0.max(d1));
        }
        ticks
    }

    #[test]
    fn zero_to_hundred_in_tens() {
        let ticks = linear_ticks(0.0, 100.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[10], 100.0);
        assert_eq!(ticks[3], 30.0);
    }

    #[test]
    fn decimal_steps_are_exact() {
        let ticks = linear_ticks(0.0, 1.0, 10);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks[7], 0.7);
    }

    #[test]
    fn two_and_a_half_multiplier_is_used() {
        // span 10 with 4 intervals: 1 and 2 give too many, 2.5 fits exactly.
        let ticks = linear_ticks(0.0, 10.0, 4);
        assert_eq!(ticks, [0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn reversed_domain_gives_ascending_ticks() {
        let ticks = linear_ticks(10.0, 0.0, 5);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(10.0));
    }

    #[test]
    fn count_stays_within_half_and_double_request() {
        for &(d0, d1) in &[(0.0, 1.0), (-3.7, 12.2), (0.001, 0.0173), (1e3, 9.9e5)] {
            for n in 1..=20_usize {
                let ticks = assert_count_bounds(d0, d1, n);
                let s = tick_spacing(&ticks);
                for w in ticks.windows(2) {
                    assert!(((w[1] - w[0]) - s).abs() < 1e-9 * s.max(1.0));
                }
            }
        }
    }

    #[test]
    fn count_bounds_hold_over_varied_domains() {
        // Deterministic xorshift walk over spans from 1e-3 to 1e6 and offsets
        // up to a million spans away from zero.
        let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
        let mut unit = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1_u64 << 53) as f64
        };
        for _ in 0..2_000 {
            let span = 10_f64.powf(unit() * 9.0 - 3.0);
            let offset = (unit() * 2.0 - 1.0) * span * 10_f64.powf(unit() * 6.0);
            let n = 1 + (unit() * 20.0) as usize;
            let (d0, d1) = if unit() < 0.5 {
                (offset, offset + span)
            } else {
                (offset + span, offset)
            };
            assert_count_bounds(d0, d1, n);
        }
    }

    #[test]
    fn domains_far_from_zero_terminate() {
        let ticks = assert_count_bounds(1e12, 1e12 + 10.0, 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 1e12);
        assert_eq!(ticks[10], 1e12 + 10.0);

        assert_count_bounds(30_890.730_566_630_366, 30_890.730_567_179_27, 6);
        assert_count_bounds(1.7e12, 1.7e12 + 5000.0, 5);
    }

    #[test]
    fn domains_below_float_resolution_return_what_fits() {
        // Only a handful of floats lie between the endpoints.
        let lo = 1e16;
        let hi = lo + 4.0;
        let ticks = linear_ticks(lo, hi, 10);
        assert!(!ticks.is_empty() && ticks.len() <= 20);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert!(ticks.iter().all(|t| (lo..=hi).contains(t)));
    }

    #[test]
    fn nice_domain_extends_outward() {
        assert_eq!(nice_domain(0.3, 9.7, 10), (0.0, 10.0));
        assert_eq!(nice_domain(9.7, 0.3, 10), (10.0, 0.0));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(linear_ticks(0.0, 1.0, 0).is_empty());
        assert_eq!(linear_ticks(5.0, 5.0, 4), [5.0]);
        assert!(linear_ticks(f64::NAN, 1.0, 4).is_empty());
    }
}

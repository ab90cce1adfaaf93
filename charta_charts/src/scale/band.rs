// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use super::{Domain, Scale};
use crate::error::{ScaleError, check_number};

/// A categorical scale that gives each key a band of equal width.
///
/// The range is split into `m` steps. With inner padding `p_in` and outer
/// padding `p_out` (both fractions of a step):
///
/// - `step = span / max(1, m − p_in + 2·p_out)`
/// - `bandwidth = step · (1 − p_in)`
/// - the bands are centred in the range (`align = 0.5` by default).
///
/// [`Scale::apply`] returns a band's leading edge (its smallest coordinate);
/// add `bandwidth() / 2` for its centre. For a reversed range the key order
/// is mirrored so positions decrease.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl ScaleBand {
    /// Creates a band scale with no padding.
    ///
    /// Duplicate keys are dropped; the first occurrence keeps its place.
    pub fn new<I, K>(keys: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut unique = Vec::new();
        let mut index = HashMap::new();
        for key in keys {
            let key = key.into();
            if !index.contains_key(&key) {
                index.insert(key.clone(), unique.len());
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            index,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding, each clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding(self, inner: f64, outer: f64) -> Self {
        self.with_padding_inner(inner).with_padding_outer(outer)
    }

    /// Sets the padding between bands as a fraction of the step.
    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = unit(padding);
        self
    }

    /// Sets the padding before the first and after the last band.
    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = unit(padding);
        self
    }

    /// Sets how leftover space is distributed: 0 packs bands at the start, 1 at the end.
    #[must_use]
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = unit(align);
        self
    }

    /// The keys, in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The distance between the starts of adjacent bands.
    #[allow(clippy::cast_precision_loss, reason = "key counts are small")]
    pub fn step(&self) -> f64 {
        let m = self.keys.len() as f64;
        let denom = (m - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        self.span() / denom
    }

    fn span(&self) -> f64 {
        (self.range.1 - self.range.0).abs()
    }

    #[allow(clippy::cast_precision_loss, reason = "key counts are small")]
    fn start(&self) -> f64 {
        let m = self.keys.len() as f64;
        let lo = self.range.0.min(self.range.1);
        let used = self.step() * (m - self.padding_inner);
        lo + (self.span() - used).max(0.0) * self.align
    }

    fn reversed(&self) -> bool {
        self.range.1 < self.range.0
    }

    /// Leading edge of the band at `index`.
    #[allow(clippy::cast_precision_loss, reason = "key counts are small")]
    pub fn position(&self, index: usize) -> f64 {
        let slot = if self.reversed() {
            self.keys.len().saturating_sub(index + 1)
        } else {
            index
        };
        self.start() + self.step() * slot as f64
    }

    /// Index of `key` in the domain.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl Scale for ScaleBand {
    type Domain = String;

    fn apply(&self, value: &String) -> Result<f64, ScaleError> {
        self.index_of(value)
            .map(|i| self.position(i))
            .ok_or_else(|| ScaleError::UnknownCategory { key: value.clone() })
    }

    /// The key whose band contains `position`.
    fn invert(&self, position: f64) -> Result<String, ScaleError> {
        let p = check_number(position)?;
        let bw = self.bandwidth();
        (0..self.keys.len())
            .find(|&i| {
                let x = self.position(i);
                p >= x && p <= x + bw
            })
            .map(|i| self.keys[i].clone())
            .ok_or(ScaleError::NotInvertible { position })
    }

    /// One tick per key, in key order.
    fn ticks(&self, _count: usize) -> Vec<String> {
        self.keys.clone()
    }

    fn domain(&self) -> Domain {
        Domain::Categorical(self.keys.clone())
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }
}

/// A categorical scale that maps each key to a single position.
///
/// This is a band scale with full inner padding: every band collapses to a
/// point, and `padding` (default 0.5) steps are left at either end.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePoint {
    band: ScaleBand,
}

impl ScalePoint {
    /// Creates a point scale with half a step of padding at either end.
    pub fn new<I, K>(keys: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            band: ScaleBand::new(keys, range).with_padding(1.0, 0.5),
        }
    }

    /// Sets the outer padding in steps, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.band = self.band.with_padding_outer(padding);
        self
    }

    /// Sets how leftover space is distributed (see [`ScaleBand::with_align`]).
    #[must_use]
    pub fn with_align(mut self, align: f64) -> Self {
        self.band = self.band.with_align(align);
        self
    }

    /// The keys, in order.
    pub fn keys(&self) -> &[String] {
        self.band.keys()
    }

    /// The distance between adjacent points.
    pub fn step(&self) -> f64 {
        self.band.step()
    }

    /// Position of the point at `index`.
    pub fn position(&self, index: usize) -> f64 {
        self.band.position(index)
    }
}

impl Scale for ScalePoint {
    type Domain = String;

    fn apply(&self, value: &String) -> Result<f64, ScaleError> {
        self.band.apply(value)
    }

    /// The key nearest to `position`.
    fn invert(&self, position: f64) -> Result<String, ScaleError> {
        let p = check_number(position)?;
        let keys = self.band.keys();
        let nearest = (0..keys.len()).min_by(|&a, &b| {
            let da = (self.position(a) - p).abs();
            let db = (self.position(b) - p).abs();
            da.total_cmp(&db)
        });
        nearest
            .map(|i| keys[i].clone())
            .ok_or(ScaleError::NotInvertible { position })
    }

    fn ticks(&self, count: usize) -> Vec<String> {
        self.band.ticks(count)
    }

    fn domain(&self) -> Domain {
        self.band.domain()
    }

    fn range(&self) -> (f64, f64) {
        self.band.range()
    }
}

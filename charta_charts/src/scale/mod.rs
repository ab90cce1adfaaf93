// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: invertible mappings from a data domain to a pixel range.
//!
//! Every scale implements the [`Scale`] capability set. Guides (axes) consume
//! only that trait, so they never need to know which variant they were given.
//!
//! | Scale | Domain | Ticks |
//! |---|---|---|
//! | [`ScaleLinear`] | `f64` | nice multiples of `{1, 2, 2.5, 5}·10^k` |
//! | [`ScaleLog`] | `f64 > 0` | powers of the base, subdivided when sparse |
//! | [`ScalePow`] | `f64` | as linear |
//! | [`ScaleTime`] | `DateTime<Utc>` | calendar-aligned instants |
//! | [`ScaleBand`] | `String` keys | one per key, at band centres |
//! | [`ScalePoint`] | `String` keys | one per key |
//!
//! [`ScaleOrdinal`] maps keys to arbitrary values (colours, symbols) and is not
//! a positional scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, Utc};

use crate::error::ScaleError;
use crate::format::TickValue;

mod band;
mod linear;
mod log;
mod ordinal;
mod pow;
pub(crate) mod ticks;
mod time;

pub use band::{ScaleBand, ScalePoint};
pub use linear::ScaleLinear;
pub use log::ScaleLog;
pub use ordinal::ScaleOrdinal;
pub use pow::ScalePow;
pub use time::{ScaleTime, TimeInterval};

/// The capability set shared by all positional scales.
pub trait Scale {
    /// The domain value type (`f64`, an instant, or a category key).
    type Domain: TickValue;

    /// Maps a domain value to a pixel position.
    fn apply(&self, value: &Self::Domain) -> Result<f64, ScaleError>;

    /// Maps a pixel position back to a domain value.
    fn invert(&self, position: f64) -> Result<Self::Domain, ScaleError>;

    /// Readable tick values, ascending in domain order.
    fn ticks(&self, count: usize) -> Vec<Self::Domain>;

    /// The domain as configured.
    fn domain(&self) -> Domain;

    /// The pixel range `(r0, r1)` as configured.
    fn range(&self) -> (f64, f64);

    /// Width of each band; zero for scales that map to single positions.
    fn bandwidth(&self) -> f64 {
        0.0
    }
}

/// A scale domain, by variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// An ordered pair of reals (may be reversed).
    Continuous(f64, f64),
    /// An ordered pair of instants.
    Temporal(DateTime<Utc>, DateTime<Utc>),
    /// Distinct keys in order.
    Categorical(Vec<String>),
}

impl Domain {
    /// Whether the domain holds no values (only possible for categorical domains).
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Categorical(keys) if keys.is_empty())
    }
}

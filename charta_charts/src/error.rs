// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Structural errors raised by scale construction, `apply` and `invert`.
///
/// Soft failures (no ticks, empty legends, clipped layout) are not errors and
/// never appear here.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ScaleError {
    /// A log scale was given a domain endpoint or input that is not strictly positive.
    #[error("log scale requires strictly positive values, got {value}")]
    NonPositiveLogDomain {
        /// The offending value.
        value: f64,
    },
    /// A NaN reached a scale.
    #[error("NaN is not a valid scale input")]
    NotANumber,
    /// A domain (or ordinal range) had no usable extent.
    #[error("scale domain is empty or not finite")]
    EmptyDomain,
    /// A log base that cannot define a logarithm.
    #[error("invalid log base {base}; expected a finite base > 0 and != 1")]
    InvalidBase {
        /// The rejected base.
        base: f64,
    },
    /// A power exponent that cannot be inverted.
    #[error("invalid exponent {exponent}; expected a finite exponent > 0")]
    InvalidExponent {
        /// The rejected exponent.
        exponent: f64,
    },
    /// A categorical scale was asked about a key outside its domain.
    #[error("unknown category {key:?}")]
    UnknownCategory {
        /// The unknown key.
        key: String,
    },
    /// A pixel position that maps back to no domain value.
    #[error("position {position} does not fall inside any band")]
    NotInvertible {
        /// The pixel position.
        position: f64,
    },
}

/// Rejects NaN inputs.
pub(crate) fn check_number(v: f64) -> Result<f64, ScaleError> {
    if v.is_nan() {
        Err(ScaleError::NotANumber)
    } else {
        Ok(v)
    }
}

/// Rejects continuous domains with a non-finite endpoint.
pub(crate) fn check_domain(d0: f64, d1: f64) -> Result<(), ScaleError> {
    if d0.is_finite() && d1.is_finite() {
        Ok(())
    } else {
        Err(ScaleError::EmptyDomain)
    }
}

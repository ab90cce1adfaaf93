// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lengths with deferred pixel resolution.
//!
//! A [`Length`] is stored as a linear combination `px + percent% + em`. Every
//! arithmetic operation acts on the three components independently, so chained
//! layout arithmetic never rounds a relative quantity to pixels early. Only
//! [`Length::resolve`] (called at emission) collapses it to a pixel value.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// The references needed to turn a [`Length`] into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthContext {
    /// Pixel value that `100%` resolves to.
    pub reference: f64,
    /// Pixel value that `1em` resolves to.
    pub font_size: f64,
}

impl LengthContext {
    /// Creates a context from a percentage reference and a font size.
    pub const fn new(reference: f64, font_size: f64) -> Self {
        Self {
            reference,
            font_size,
        }
    }

    /// Returns a copy with a different percentage reference.
    #[must_use]
    pub const fn with_reference(mut self, reference: f64) -> Self {
        self.reference = reference;
        self
    }

    /// Returns a copy with a different font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Default for LengthContext {
    fn default() -> Self {
        Self::new(0.0, 12.0)
    }
}

/// A length in pixels, percent of a reference, ems, or any sum of those.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Length {
    px: f64,
    percent: f64,
    em: f64,
}

impl Length {
    /// The zero length.
    pub const ZERO: Self = Self::px(0.0);

    /// An absolute pixel length.
    pub const fn px(value: f64) -> Self {
        Self {
            px: value,
            percent: 0.0,
            em: 0.0,
        }
    }

    /// A percentage of the reference (`50.0` is half of it).
    pub const fn percent(value: f64) -> Self {
        Self {
            px: 0.0,
            percent: value,
            em: 0.0,
        }
    }

    /// A multiple of the font size.
    pub const fn em(value: f64) -> Self {
        Self {
            px: 0.0,
            percent: 0.0,
            em: value,
        }
    }

    /// Applies the percentage component to an already resolved pixel total.
    ///
    /// The pixel and em components are preserved unchanged.
    #[must_use]
    pub fn of(self, total: f64) -> Self {
        Self {
            px: self.px + self.percent * 0.01 * total,
            percent: 0.0,
            em: self.em,
        }
    }

    /// Resolves this length to pixels.
    pub fn resolve(self, ctx: LengthContext) -> f64 {
        self.px + self.percent * 0.01 * ctx.reference + self.em * ctx.font_size
    }

    /// Returns the pixel value if this length has no relative component.
    pub fn as_px(self) -> Option<f64> {
        self.is_absolute().then_some(self.px)
    }

    /// Whether this length resolves without any context.
    pub fn is_absolute(self) -> bool {
        self.percent == 0.0 && self.em == 0.0
    }

    /// The absolute pixel component.
    pub fn px_part(self) -> f64 {
        self.px
    }

    /// The percentage component.
    pub fn percent_part(self) -> f64 {
        self.percent
    }

    /// The em component.
    pub fn em_part(self) -> f64 {
        self.em
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

impl Add for Length {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            px: self.px + rhs.px,
            percent: self.percent + rhs.percent,
            em: self.em + rhs.em,
        }
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Length {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Length {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for Length {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            px: self.px * rhs,
            percent: self.percent * rhs,
            em: self.em * rhs,
        }
    }
}

impl Div<f64> for Length {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self {
            px: self.px / rhs,
            percent: self.percent / rhs,
            em: self.em / rhs,
        }
    }
}

/// A four-sided spacing record (margin or padding).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    /// Top side.
    pub top: Length,
    /// Right side.
    pub right: Length,
    /// Bottom side.
    pub bottom: Length,
    /// Left side.
    pub left: Length,
}

impl Spacing {
    /// No spacing on any side.
    pub const ZERO: Self = Self::uniform(Length::ZERO);

    /// Creates spacing from explicit sides, in CSS order.
    pub const fn new(top: Length, right: Length, bottom: Length, left: Length) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same length on all four sides.
    pub const fn uniform(all: Length) -> Self {
        Self::new(all, all, all, all)
    }

    /// Uniform pixel spacing.
    pub const fn px(all: f64) -> Self {
        Self::uniform(Length::px(all))
    }

    /// `vertical` on top/bottom and `horizontal` on left/right.
    pub const fn symmetric(vertical: Length, horizontal: Length) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> Length {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> Length {
        self.top + self.bottom
    }

    /// Replaces the top side.
    #[must_use]
    pub fn with_top(mut self, top: Length) -> Self {
        self.top = top;
        self
    }

    /// Replaces the right side.
    #[must_use]
    pub fn with_right(mut self, right: Length) -> Self {
        self.right = right;
        self
    }

    /// Replaces the bottom side.
    #[must_use]
    pub fn with_bottom(mut self, bottom: Length) -> Self {
        self.bottom = bottom;
        self
    }

    /// Replaces the left side.
    #[must_use]
    pub fn with_left(mut self, left: Length) -> Self {
        self.left = left;
        self
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn mixed_units_stay_symbolic_until_resolved() {
        let l = Length::px(10.0) + Length::percent(50.0) + Length::em(2.0);
        assert!(!l.is_absolute());
        assert_eq!(l.as_px(), None);

        let ctx = LengthContext::new(200.0, 12.0);
        assert!((l.resolve(ctx) - (10.0 + 100.0 + 24.0)).abs() < 1e-9);
    }

    #[test]
    fn percent_of_resolved_total_becomes_pixels() {
        let l = Length::percent(25.0).of(400.0);
        assert_eq!(l.as_px(), Some(100.0));
    }

    #[test]
    fn scaling_preserves_units() {
        let l = (Length::percent(10.0) + Length::px(4.0)) * 3.0;
        assert_eq!(l.percent_part(), 30.0);
        assert_eq!(l.px_part(), 12.0);
        assert_eq!((l / 3.0).percent_part(), 10.0);
    }

    #[test]
    fn repeated_percent_addition_does_not_accumulate_rounding() {
        let mut acc = Length::ZERO;
        for _ in 0..3 {
            acc += Length::percent(100.0 / 3.0);
        }
        let ctx = LengthContext::new(300.0, 12.0);
        assert!((acc.resolve(ctx) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn spacing_sums_sides() {
        let s = Spacing::new(
            Length::px(1.0),
            Length::px(2.0),
            Length::px(3.0),
            Length::px(4.0),
        );
        assert_eq!(s.horizontal().as_px(), Some(6.0));
        assert_eq!(s.vertical().as_px(), Some(4.0));
    }
}

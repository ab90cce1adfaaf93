// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Axes and legends must know how large their labels are before they can place
//! anything. Shaping lives downstream, so guides depend only on this small trait.

use crate::style::TextStyle;

/// A minimal text measurement interface used by guide generators.
///
/// Implementations can be heuristic (fast, but inaccurate) or backed by a real
/// shaping engine; both are interchangeable from the guides' point of view.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers split on `\n` themselves if
    /// they want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Estimated advance width: `chars · font_size · 0.6`.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    0.6 * font_size * text.chars().count() as f64
}

/// A tiny heuristic text measurer.
///
/// It assumes an average glyph width of 0.6em and a baseline at 0.8em, so one
/// line is exactly one em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: estimate_text_width(text, style.font_size),
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

use charta_text::TextStyle;

/// A paint + width pair for stroked geometry (axis lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub width: f64,
    /// Alternating dash/gap lengths; empty for a solid line.
    pub dash: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
            dash: SmallVec::new(),
        }
    }

    /// Sets a dash pattern.
    #[must_use]
    pub fn with_dash(mut self, dash: &[f64]) -> Self {
        self.dash = dash.iter().copied().collect();
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Presentation attributes a group passes down to its children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupStyle {
    /// Inherited fill.
    pub fill: Option<Brush>,
    /// Inherited stroke.
    pub stroke: Option<StrokeStyle>,
    /// Inherited font.
    pub font: Option<TextStyle>,
}

impl GroupStyle {
    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.font.is_none()
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend symbols.

use kurbo::{BezPath, Circle, Rect, Shape, Size};
use peniko::Brush;

use charta_core::{Command, Line, PathCommand, RectCommand, StrokeStyle};

/// Flattening tolerance for circle outlines, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// The glyph drawn next to a legend label.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendSymbol {
    /// A filled rectangle (a colour swatch).
    Rect {
        /// Width in pixels.
        width: f64,
        /// Height in pixels.
        height: f64,
        /// Fill paint.
        fill: Brush,
    },
    /// A filled circle.
    Circle {
        /// Diameter in pixels.
        diameter: f64,
        /// Fill paint.
        fill: Brush,
    },
    /// A short horizontal stroke, for line series.
    Line {
        /// Length in pixels.
        width: f64,
        /// Stroke.
        stroke: StrokeStyle,
    },
}

impl LegendSymbol {
    /// A 12×12 colour swatch.
    pub fn swatch(fill: impl Into<Brush>) -> Self {
        Self::Rect {
            width: 12.0,
            height: 12.0,
            fill: fill.into(),
        }
    }

    /// A circle of the given diameter.
    pub fn circle(diameter: f64, fill: impl Into<Brush>) -> Self {
        Self::Circle {
            diameter,
            fill: fill.into(),
        }
    }

    /// A horizontal line sample of the given length.
    pub fn line(width: f64, stroke: StrokeStyle) -> Self {
        Self::Line { width, stroke }
    }

    /// The intrinsic size of the symbol.
    ///
    /// A line is as tall as its stroke.
    pub fn size(&self) -> Size {
        match self {
            Self::Rect { width, height, .. } => Size::new(width.max(0.0), height.max(0.0)),
            Self::Circle { diameter, .. } => Size::new(diameter.max(0.0), diameter.max(0.0)),
            Self::Line { width, stroke } => Size::new(width.max(0.0), stroke.width.max(0.0)),
        }
    }

    /// Draws the symbol centred in `rect`.
    pub fn render(&self, rect: Rect) -> Command {
        let c = rect.center();
        match self {
            Self::Rect { fill, .. } => {
                let size = self.size();
                RectCommand::filled(Rect::from_center_size(c, size), fill.clone()).into()
            }
            Self::Circle { diameter, fill } => {
                PathCommand::filled(circle_path(c.x, c.y, *diameter), fill.clone()).into()
            }
            Self::Line { width, stroke } => {
                let half = 0.5 * width.max(0.0);
                Line::new(c.x - half, c.y, c.x + half, c.y)
                    .with_stroke(stroke.clone())
                    .into()
            }
        }
    }
}

fn circle_path(cx: f64, cy: f64, diameter: f64) -> BezPath {
    let circle = Circle::new((cx, cy), 0.5 * diameter.max(0.0));
    circle.path_elements(CIRCLE_TOLERANCE).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn intrinsic_sizes() {
        assert_eq!(LegendSymbol::swatch(css::RED).size(), Size::new(12.0, 12.0));
        assert_eq!(LegendSymbol::circle(8.0, css::RED).size(), Size::new(8.0, 8.0));
        let line = LegendSymbol::line(20.0, StrokeStyle::solid(css::RED, 2.0));
        assert_eq!(line.size(), Size::new(20.0, 2.0));
    }

    #[test]
    fn symbols_are_centred() {
        let slot = Rect::new(0.0, 0.0, 20.0, 30.0);
        let Command::Rect(r) = LegendSymbol::swatch(css::RED).render(slot) else {
            panic!("expected a rect");
        };
        assert_eq!(r.rect, Rect::new(4.0, 9.0, 16.0, 21.0));

        let line = LegendSymbol::line(20.0, StrokeStyle::default()).render(slot);
        let Command::Line(l) = line else {
            panic!("expected a line");
        };
        assert_eq!((l.x1, l.y1, l.x2, l.y2), (0.0, 15.0, 20.0, 15.0));

        let Command::Path(p) = LegendSymbol::circle(10.0, css::RED).render(slot) else {
            panic!("expected a path");
        };
        let b = p.path.bounding_box();
        assert!((b.center().x - 10.0).abs() < 1e-6);
        assert!((b.width() - 10.0).abs() < 1e-3);
    }
}

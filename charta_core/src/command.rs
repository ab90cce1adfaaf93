// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

use charta_text::{TextAnchor, TextBaseline, TextStyle};

use crate::style::{GroupStyle, StrokeStyle};
use crate::transform::Transform;

/// One abstract graphical primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// A straight stroked segment.
    Line(Line),
    /// A single line of text.
    Text(Text),
    /// An axis-aligned rectangle.
    Rect(RectCommand),
    /// An arbitrary path.
    Path(PathCommand),
    /// A group of commands sharing classes, a transform and inherited style.
    Group(Group),
    /// A reusable marker definition, referenced by [`Line`] markers.
    Marker(MarkerDef),
}

impl Command {
    /// Visits this command and all nested commands, depth-first, in paint order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        if let Self::Group(g) = self {
            for child in &g.children {
                child.walk(f);
            }
        }
    }
}

impl From<Line> for Command {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Text> for Command {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}

impl From<RectCommand> for Command {
    fn from(value: RectCommand) -> Self {
        Self::Rect(value)
    }
}

impl From<PathCommand> for Command {
    fn from(value: PathCommand) -> Self {
        Self::Path(value)
    }
}

impl From<Group> for Command {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl From<MarkerDef> for Command {
    fn from(value: MarkerDef) -> Self {
        Self::Marker(value)
    }
}

/// A stroked segment from `(x1, y1)` to `(x2, y2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
    /// Stroke.
    pub stroke: StrokeStyle,
    /// Id of a [`MarkerDef`] drawn at the start.
    pub marker_start: Option<String>,
    /// Id of a [`MarkerDef`] drawn at the end.
    pub marker_end: Option<String>,
}

impl Line {
    /// Creates a line with the default 1px black stroke.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke: StrokeStyle::default(),
            marker_start: None,
            marker_end: None,
        }
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Draws the marker `id` at the end of the line.
    #[must_use]
    pub fn with_marker_end(mut self, id: impl Into<String>) -> Self {
        self.marker_end = Some(id.into());
        self
    }

    /// Draws the marker `id` at the start of the line.
    #[must_use]
    pub fn with_marker_start(mut self, id: impl Into<String>) -> Self {
        self.marker_start = Some(id.into());
        self
    }
}

/// One line of (unescaped) text anchored at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// The raw text; backends escape it.
    pub text: String,
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Font.
    pub style: TextStyle,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
}

impl Text {
    /// Creates black, start-anchored, alphabetic-baseline text.
    pub fn new(text: impl Into<String>, x: f64, y: f64, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            style,
            fill: css::BLACK.into(),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Sets the fill paint.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets anchor and baseline.
    #[must_use]
    pub fn with_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }
}

/// A rectangle with optional fill and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct RectCommand {
    /// Geometry.
    pub rect: Rect,
    /// Fill paint; `None` leaves the interior unpainted.
    pub fill: Option<Brush>,
    /// Outline.
    pub stroke: Option<StrokeStyle>,
    /// Corner radius.
    pub corner_radius: f64,
}

impl RectCommand {
    /// A filled rectangle.
    pub fn filled(rect: Rect, fill: impl Into<Brush>) -> Self {
        Self {
            rect,
            fill: Some(fill.into()),
            stroke: None,
            corner_radius: 0.0,
        }
    }

    /// Adds an outline.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// An arbitrary path with optional fill and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    /// Geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Option<Brush>,
    /// Outline.
    pub stroke: Option<StrokeStyle>,
}

impl PathCommand {
    /// A filled path.
    pub fn filled(path: BezPath, fill: impl Into<Brush>) -> Self {
        Self {
            path,
            fill: Some(fill.into()),
            stroke: None,
        }
    }

    /// A stroked, unfilled path.
    pub fn stroked(path: BezPath, stroke: StrokeStyle) -> Self {
        Self {
            path,
            fill: None,
            stroke: Some(stroke),
        }
    }
}

/// A group of commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    /// Children in paint order.
    pub children: Vec<Command>,
    /// Transform steps, applied left to right as in SVG.
    pub transform: SmallVec<[Transform; 2]>,
    /// Class tags for downstream styling/selection (e.g. `axis`, `axis-bottom`).
    pub classes: SmallVec<[String; 2]>,
    /// Inherited presentation attributes.
    pub style: GroupStyle,
}

impl Group {
    /// Creates a group around `children`.
    pub fn new(children: Vec<Command>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// Adds a class tag.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Appends a transform step.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }

    /// Sets the inherited style.
    #[must_use]
    pub fn with_style(mut self, style: GroupStyle) -> Self {
        self.style = style;
        self
    }
}

/// A marker shape that lines can reference by `id`.
///
/// The path is drawn in a `width` x `height` box whose `(ref_x, ref_y)` point
/// lands on the line endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDef {
    /// Unique id within one document.
    pub id: String,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Reference x inside the box.
    pub ref_x: f64,
    /// Reference y inside the box.
    pub ref_y: f64,
    /// Marker geometry in box coordinates.
    pub path: BezPath,
    /// Marker fill.
    pub fill: Brush,
}

impl MarkerDef {
    /// A filled triangular arrowhead of the given size, pointing along the line.
    pub fn arrow(id: impl Into<String>, size: f64) -> Self {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((size, 0.5 * size));
        path.line_to((0.0, size));
        path.close_path();
        Self {
            id: id.into(),
            width: size,
            height: size,
            ref_x: size,
            ref_y: 0.5 * size,
            path,
            fill: css::BLACK.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn walk_visits_nested_commands_in_order() {
        let tree: Command = Group::new(vec![
            Line::new(0.0, 0.0, 1.0, 0.0).into(),
            Group::new(vec![
                Text::new("a", 0.0, 0.0, TextStyle::default()).into(),
            ])
            .into(),
        ])
        .with_class("outer")
        .into();

        let mut kinds = alloc::vec::Vec::new();
        tree.walk(&mut |c| {
            kinds.push(match c {
                Command::Line(_) => "line",
                Command::Text(_) => "text",
                Command::Group(_) => "group",
                _ => "other",
            });
        });
        assert_eq!(kinds, ["group", "line", "group", "text"]);
    }
}

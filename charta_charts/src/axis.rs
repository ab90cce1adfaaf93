// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis rendering.
//!
//! An [`Axis`] borrows a [`Scale`] and an [`Orientation`] (`top`, `bottom`,
//! `left` or `right`). It can be measured (for layout) and rendered into draw
//! commands: the domain line, one tick mark and label per tick, optional grid
//! lines, and an optional title. The output is wrapped in a [`Group`] tagged
//! `axis` and `axis-{orientation}`.
//!
//! The axis only uses the [`Scale`] capability set, so the same code path
//! serves continuous, temporal and categorical scales.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;

use charta_core::{Command, Group, Line, StrokeStyle, Text, Transform};
use charta_text::{
    FontFamily, FontWeight, HeuristicTextMeasurer, Length, LengthContext, TextAnchor,
    TextBaseline, TextMeasurer, TextStyle,
};

use crate::format::{Formatter, TickValue};
use crate::scale::Scale;

/// Axis placement relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// A horizontal axis above the plot; ticks point up.
    Top,
    /// A horizontal axis below the plot; ticks point down.
    Bottom,
    /// A vertical axis left of the plot; ticks point left.
    Left,
    /// A vertical axis right of the plot; ticks point right.
    Right,
}

impl Orientation {
    /// The lowercase name used in class tags (`axis-bottom`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the axis runs along x.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Sign of the direction away from the plot along the axis normal.
    fn outward(self) -> f64 {
        match self {
            Self::Bottom | Self::Right => 1.0,
            Self::Top | Self::Left => -1.0,
        }
    }

    fn label_alignment(self) -> (TextAnchor, TextBaseline) {
        match self {
            Self::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            Self::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            Self::Left => (TextAnchor::End, TextBaseline::Middle),
            Self::Right => (TextAnchor::Start, TextBaseline::Middle),
        }
    }

    /// Maps `(along, across)` axis coordinates to `(x, y)`.
    fn point(self, along: f64, across: f64) -> (f64, f64) {
        if self.is_horizontal() {
            (along, across)
        } else {
            (across, along)
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke for gridlines (colour, width, dash).
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0),
        }
    }
}

/// Axis title styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitleStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Fill paint.
    pub fill: Brush,
}

impl Default for AxisTitleStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            font_weight: FontWeight::NORMAL,
            fill: css::BLACK.into(),
        }
    }
}

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Stroke for the domain line and tick marks.
    pub stroke: StrokeStyle,
    /// Fill paint for tick labels.
    pub text_fill: Brush,
    /// Font size for tick labels.
    pub font_size: f64,
    /// Font family for labels and title.
    pub font_family: FontFamily,
    /// Gridline style (used when the axis has a grid).
    pub grid: GridStyle,
    /// Title style.
    pub title: AxisTitleStyle,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            text_fill: css::BLACK.into(),
            font_size: 10.0,
            font_family: FontFamily::SansSerif,
            grid: GridStyle::default(),
            title: AxisTitleStyle::default(),
        }
    }
}

impl AxisStyle {
    fn label_style(&self) -> TextStyle {
        TextStyle::new(self.font_size).with_family(self.font_family.clone())
    }

    fn title_style(&self) -> TextStyle {
        TextStyle::new(self.title.font_size)
            .with_family(self.font_family.clone())
            .with_weight(self.title.font_weight)
    }
}

/// Per-render inputs for [`Axis::render`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisRenderOptions {
    /// The baseline coordinate of the axis across its direction (y for
    /// horizontal axes, x for vertical ones).
    pub position: Length,
    /// Styling.
    pub style: AxisStyle,
    /// Context for resolving relative lengths.
    pub context: LengthContext,
}

impl AxisRenderOptions {
    /// Options with the given baseline position and default style.
    pub fn new(position: impl Into<Length>) -> Self {
        Self {
            position: position.into(),
            ..Self::default()
        }
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the length resolution context.
    #[must_use]
    pub fn with_context(mut self, context: LengthContext) -> Self {
        self.context = context;
        self
    }
}

/// A labelled anchor point on an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick<V> {
    /// The domain value.
    pub value: V,
    /// Pixel position along the axis.
    pub position: f64,
    /// The formatted label.
    pub label: String,
}

/// An axis over a borrowed scale.
///
/// Several axes may share one scale (for example top and bottom axes of the
/// same chart).
pub struct Axis<'a, S: Scale> {
    scale: &'a S,
    orientation: Orientation,
    title: String,
    tick_count: usize,
    tick_size: Length,
    tick_padding: Length,
    title_padding: Length,
    grid: Option<Length>,
    show_domain: bool,
    formatter: Option<Formatter<S::Domain>>,
}

impl<S: Scale> Clone for Axis<'_, S> {
    fn clone(&self) -> Self {
        Self {
            scale: self.scale,
            orientation: self.orientation,
            title: self.title.clone(),
            tick_count: self.tick_count,
            tick_size: self.tick_size,
            tick_padding: self.tick_padding,
            title_padding: self.title_padding,
            grid: self.grid,
            show_domain: self.show_domain,
            formatter: self.formatter.clone(),
        }
    }
}

impl<S: Scale + core::fmt::Debug> core::fmt::Debug for Axis<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Axis")
            .field("scale", self.scale)
            .field("orientation", &self.orientation)
            .field("title", &self.title)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("title_padding", &self.title_padding)
            .field("grid", &self.grid)
            .field("show_domain", &self.show_domain)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl<'a, S: Scale> Axis<'a, S> {
    /// Creates an axis with:
    /// - `tick_count = 10`
    /// - `tick_size = 6px`, `tick_padding = 3px`, `title_padding = 8px`
    /// - a domain line, no title and no grid.
    pub fn new(scale: &'a S, orientation: Orientation) -> Self {
        Self {
            scale,
            orientation,
            title: String::new(),
            tick_count: 10,
            tick_size: Length::px(6.0),
            tick_padding: Length::px(3.0),
            title_padding: Length::px(8.0),
            grid: None,
            show_domain: true,
            formatter: None,
        }
    }

    /// Sets the title; an empty title is not drawn.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the approximate tick count.
    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the tick mark length.
    #[must_use]
    pub fn with_tick_size(mut self, tick_size: impl Into<Length>) -> Self {
        self.tick_size = tick_size.into();
        self
    }

    /// Sets the gap between a tick mark's outer end and its label.
    #[must_use]
    pub fn with_tick_padding(mut self, tick_padding: impl Into<Length>) -> Self {
        self.tick_padding = tick_padding.into();
        self
    }

    /// Sets the gap between the labels and the title.
    #[must_use]
    pub fn with_title_padding(mut self, title_padding: impl Into<Length>) -> Self {
        self.title_padding = title_padding.into();
        self
    }

    /// Sets a custom tick label formatter.
    #[must_use]
    pub fn with_tick_formatter(mut self, f: impl Fn(&S::Domain) -> String + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Draws grid lines of `length` from the axis line into the plot.
    #[must_use]
    pub fn with_grid(mut self, length: impl Into<Length>) -> Self {
        self.grid = Some(length.into());
        self
    }

    /// Disables grid lines.
    #[must_use]
    pub fn without_grid(mut self) -> Self {
        self.grid = None;
        self
    }

    /// Enables or disables the domain line.
    #[must_use]
    pub fn with_domain_line(mut self, show: bool) -> Self {
        self.show_domain = show;
        self
    }

    /// The borrowed scale.
    pub fn scale(&self) -> &'a S {
        self.scale
    }

    /// The orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The title (empty when unset).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Formats a value with the axis formatter, or its default label.
    pub fn label(&self, value: &S::Domain) -> String {
        match &self.formatter {
            Some(f) => f(value),
            None => value.default_label(),
        }
    }

    /// Ticks with their positions and labels.
    ///
    /// Categorical ticks sit at band centres.
    pub fn ticks(&self) -> Vec<Tick<S::Domain>> {
        let offset = 0.5 * self.scale.bandwidth();
        self.scale
            .ticks(self.tick_count)
            .into_iter()
            .filter_map(|value| {
                let position = self.scale.apply(&value).ok()? + offset;
                let label = self.label(&value);
                Some(Tick {
                    value,
                    position,
                    label,
                })
            })
            .collect()
    }

    /// The thickness this axis needs along its normal: ticks, labels and title.
    ///
    /// Returns zero when there are no ticks, since nothing is rendered then.
    pub fn measure(&self, options: &AxisRenderOptions, measurer: &dyn TextMeasurer) -> f64 {
        let ticks = self.ticks();
        if ticks.is_empty() {
            return 0.0;
        }
        let ctx = options.context;
        let mut out = self.tick_size.resolve(ctx).abs()
            + self.tick_padding.resolve(ctx).max(0.0)
            + self.label_extent(&ticks, &options.style, measurer);
        if !self.title.is_empty() {
            let title = measurer.measure(&self.title, &options.style.title_style());
            out += self.title_padding.resolve(ctx).max(0.0) + title.line_height();
        }
        out
    }

    /// Extent of the tick labels along the axis normal.
    fn label_extent(
        &self,
        ticks: &[Tick<S::Domain>],
        style: &AxisStyle,
        measurer: &dyn TextMeasurer,
    ) -> f64 {
        let text = style.label_style();
        if self.orientation.is_horizontal() {
            ticks
                .iter()
                .map(|t| measurer.measure(&t.label, &text).line_height())
                .fold(0.0, f64::max)
        } else {
            ticks
                .iter()
                .map(|t| measurer.measure(&t.label, &text).advance_width)
                .fold(0.0, f64::max)
        }
    }

    /// Renders with heuristic text metrics.
    pub fn render(&self, options: &AxisRenderOptions) -> Vec<Command> {
        self.render_with(options, &HeuristicTextMeasurer)
    }

    /// Renders the axis into draw commands.
    ///
    /// Emission order: domain line, then per tick its mark, grid line and
    /// label, then the title. An axis without ticks renders nothing.
    pub fn render_with(
        &self,
        options: &AxisRenderOptions,
        measurer: &dyn TextMeasurer,
    ) -> Vec<Command> {
        let ticks = self.ticks();
        if ticks.is_empty() {
            crate::log::debug!(
                orientation = self.orientation.as_str(),
                "axis has no ticks; rendering nothing"
            );
            return Vec::new();
        }

        let ctx = options.context;
        let style = &options.style;
        let orient = self.orientation;
        let out_sign = orient.outward();
        let pos = options.position.resolve(ctx);
        let tick_size = self.tick_size.resolve(ctx).abs();
        let label_offset = tick_size + self.tick_padding.resolve(ctx).max(0.0);
        let label_style = style.label_style();
        let (anchor, baseline) = orient.label_alignment();

        let mut children = Vec::with_capacity(3 * ticks.len() + 2);

        if self.show_domain {
            let (r0, r1) = self.scale.range();
            let (x1, y1) = orient.point(r0, pos);
            let (x2, y2) = orient.point(r1, pos);
            children.push(
                Line::new(x1, y1, x2, y2)
                    .with_stroke(style.stroke.clone())
                    .into(),
            );
        }

        let grid = self.grid.map(|g| g.resolve(ctx));
        for tick in &ticks {
            let p = tick.position;
            let (x1, y1) = orient.point(p, pos);
            let (x2, y2) = orient.point(p, pos + out_sign * tick_size);
            children.push(
                Line::new(x1, y1, x2, y2)
                    .with_stroke(style.stroke.clone())
                    .into(),
            );

            if let Some(length) = grid {
                let (gx, gy) = orient.point(p, pos - out_sign * length);
                children.push(
                    Line::new(x1, y1, gx, gy)
                        .with_stroke(style.grid.stroke.clone())
                        .into(),
                );
            }

            let (lx, ly) = orient.point(p, pos + out_sign * label_offset);
            children.push(
                Text::new(tick.label.clone(), lx, ly, label_style.clone())
                    .with_fill(style.text_fill.clone())
                    .with_alignment(anchor, baseline)
                    .into(),
            );
        }

        if !self.title.is_empty() {
            let (r0, r1) = self.scale.range();
            let centre = 0.5 * (r0 + r1);
            let title_offset = label_offset
                + self.label_extent(&ticks, style, measurer)
                + self.title_padding.resolve(ctx).max(0.0)
                + 0.5 * style.title.font_size;
            let (tx, ty) = orient.point(centre, pos + out_sign * title_offset);
            let text: Command = Text::new(self.title.clone(), tx, ty, style.title_style())
                .with_fill(style.title.fill.clone())
                .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
                .into();
            children.push(match orient {
                Orientation::Top | Orientation::Bottom => text,
                Orientation::Left => Group::new(alloc::vec![text])
                    .with_transform(Transform::rotate(90.0, tx, ty))
                    .into(),
                Orientation::Right => Group::new(alloc::vec![text])
                    .with_transform(Transform::rotate(-90.0, tx, ty))
                    .into(),
            });
        }

        let mut class = String::from("axis-");
        class.push_str(orient.as_str());
        alloc::vec![Group::new(children).with_class("axis").with_class(class).into()]
    }
}

/// An axis with its scale type erased, as held by a [`Figure`](crate::Figure).
pub trait AxisGuide {
    /// Which side of the plot the axis is on.
    fn orientation(&self) -> Orientation;

    /// See [`Axis::measure`].
    fn measure(&self, options: &AxisRenderOptions, measurer: &dyn TextMeasurer) -> f64;

    /// See [`Axis::render_with`].
    fn render_with(
        &self,
        options: &AxisRenderOptions,
        measurer: &dyn TextMeasurer,
    ) -> Vec<Command>;
}

impl<S: Scale> AxisGuide for Axis<'_, S> {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn measure(&self, options: &AxisRenderOptions, measurer: &dyn TextMeasurer) -> f64 {
        Axis::measure(self, options, measurer)
    }

    fn render_with(
        &self,
        options: &AxisRenderOptions,
        measurer: &dyn TextMeasurer,
    ) -> Vec<Command> {
        Axis::render_with(self, options, measurer)
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legends.
//!
//! A [`Legend`] is a list of items. Each item is a symbol, a label and an
//! optional value. The legend is built as a [`LayoutNode`] tree and rendered
//! into draw commands wrapped in a [`Group`] tagged `legend`:
//!
//! - the root is a vertical or horizontal stack padded by
//!   [`LegendStyle::padding`];
//! - each item is a horizontal row `[symbol, label, value?]` whose cells are
//!   separated by margins;
//! - every item after the first carries [`LegendStyle::item_spacing`] as a
//!   leading margin.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Brush;
use peniko::color::palette::css;

use charta_core::{Command, Group, RectCommand, StrokeStyle, Text};
use charta_text::{FontFamily, Length, Spacing, TextAnchor, TextBaseline, TextMeasurer, TextStyle};

use crate::layout::{Align, Constraints, LayoutNode};
use crate::scale::ScaleOrdinal;
use crate::symbol::LegendSymbol;

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Label text.
    pub label: String,
    /// The symbol drawn before the label.
    pub symbol: LegendSymbol,
    /// Optional trailing value, such as a total or percentage.
    pub value: Option<String>,
}

impl LegendItem {
    /// Creates an item without a value.
    pub fn new(label: impl Into<String>, symbol: LegendSymbol) -> Self {
        Self {
            label: label.into(),
            symbol,
            value: None,
        }
    }

    /// An item with a 12×12 colour swatch.
    pub fn swatch(label: impl Into<String>, fill: impl Into<Brush>) -> Self {
        Self::new(label, LegendSymbol::swatch(fill))
    }

    /// Sets the trailing value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Where a legend sits relative to the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LegendPosition {
    /// Inside the plot, top-left corner.
    TopLeft,
    /// Inside the plot, top-right corner.
    TopRight,
    /// Above the plot, centred.
    TopCenter,
    /// Inside the plot, bottom-left corner.
    BottomLeft,
    /// Inside the plot, bottom-right corner.
    BottomRight,
    /// Below the plot, centred.
    BottomCenter,
    /// Left of the plot, top-aligned.
    Left,
    /// Right of the plot, top-aligned.
    #[default]
    Right,
    /// Not drawn.
    None,
}

/// Stacking direction of legend items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LegendLayout {
    /// One item per row.
    Vertical,
    /// All items on one row.
    Horizontal,
    /// Horizontal for [`LegendPosition::TopCenter`] and
    /// [`LegendPosition::BottomCenter`], vertical otherwise.
    #[default]
    Auto,
}

/// Legend styling.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendStyle {
    /// Label and value text paint.
    pub text_fill: Brush,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: FontFamily,
    /// Padding around the items.
    pub padding: f64,
    /// Gap between items.
    pub item_spacing: f64,
    /// Gap between a symbol and its label.
    pub symbol_spacing: f64,
    /// Gap between a label and its value.
    pub value_spacing: f64,
    /// Background fill behind the whole legend.
    pub background: Option<Brush>,
    /// Border around the whole legend.
    pub border: Option<StrokeStyle>,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            text_fill: css::BLACK.into(),
            font_size: 12.0,
            font_family: FontFamily::SansSerif,
            padding: 10.0,
            item_spacing: 8.0,
            symbol_spacing: 6.0,
            value_spacing: 6.0,
            background: None,
            border: None,
        }
    }
}

impl LegendStyle {
    fn text_style(&self) -> TextStyle {
        TextStyle::new(self.font_size).with_family(self.font_family.clone())
    }
}

/// A legend: items, a position, a layout and a style.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    items: Vec<LegendItem>,
    position: LegendPosition,
    layout: LegendLayout,
    style: LegendStyle,
    offset: f64,
}

impl Legend {
    /// Creates a legend to the right of the plot with automatic layout.
    pub fn new(items: Vec<LegendItem>) -> Self {
        Self {
            items,
            position: LegendPosition::default(),
            layout: LegendLayout::default(),
            style: LegendStyle::default(),
            offset: 10.0,
        }
    }

    /// One swatch per key of a colour scale, in key order.
    pub fn from_ordinal<T>(scale: &ScaleOrdinal<T>) -> Self
    where
        T: Clone + Into<Brush>,
    {
        Self::new(
            scale
                .entries()
                .map(|(key, fill)| LegendItem::swatch(key, fill.clone()))
                .collect(),
        )
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LegendLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: LegendStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the distance from the plot (outside) or from its edges (corners).
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset.max(0.0);
        self
    }

    /// The items.
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// The position.
    pub fn position(&self) -> LegendPosition {
        self.position
    }

    /// The style.
    pub fn style(&self) -> &LegendStyle {
        &self.style
    }

    /// The distance from the plot.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The layout with [`LegendLayout::Auto`] resolved against the position.
    pub fn resolved_layout(&self) -> LegendLayout {
        match (self.layout, self.position) {
            (LegendLayout::Auto, LegendPosition::TopCenter | LegendPosition::BottomCenter) => {
                LegendLayout::Horizontal
            }
            (LegendLayout::Auto, _) => LegendLayout::Vertical,
            (layout, _) => layout,
        }
    }

    /// Builds the layout tree and lays it out with its top-left at the origin.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> LayoutNode {
        let mut root = self.tree(measurer);
        root.layout(Constraints::unbounded().with_font_size(self.style.font_size));
        root
    }

    /// The size of the legend box.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        self.layout(measurer).rect().size()
    }

    fn tree(&self, measurer: &dyn TextMeasurer) -> LayoutNode {
        let style = &self.style;
        let text = style.text_style();
        let horizontal = self.resolved_layout() == LegendLayout::Horizontal;
        let leading = |gap: f64| {
            let gap = Length::px(gap.max(0.0));
            if horizontal {
                Spacing::ZERO.with_left(gap)
            } else {
                Spacing::ZERO.with_top(gap)
            }
        };
        let text_cell = |s: &str, gap: f64| {
            let m = measurer.measure(s, &text);
            LayoutNode::fixed(m.advance_width, m.line_height())
                .with_margin(Spacing::ZERO.with_left(Length::px(gap.max(0.0))))
        };

        let rows = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let symbol = item.symbol.size();
                let mut cells = alloc::vec![
                    LayoutNode::fixed(symbol.width, symbol.height),
                    text_cell(&item.label, style.symbol_spacing),
                ];
                if let Some(value) = &item.value {
                    cells.push(text_cell(value, style.value_spacing));
                }
                let row = LayoutNode::hstack(cells).with_align(Align::Center);
                if i == 0 {
                    row
                } else {
                    row.with_margin(leading(style.item_spacing))
                }
            })
            .collect();

        let root = if horizontal {
            LayoutNode::hstack(rows).with_align(Align::Center)
        } else {
            LayoutNode::vstack(rows)
        };
        root.with_padding(Spacing::px(style.padding.max(0.0)))
    }

    /// Top-left corner of a legend of `size` placed against `plot`.
    ///
    /// `None` when the position is [`LegendPosition::None`].
    pub fn origin(&self, plot: Rect, size: Size) -> Option<Point> {
        let (w, h) = (size.width, size.height);
        let d = self.offset;
        let cx = plot.center().x - 0.5 * w;
        let p = match self.position {
            LegendPosition::TopLeft => Point::new(plot.x0 + d, plot.y0 + d),
            LegendPosition::TopRight => Point::new(plot.x1 - d - w, plot.y0 + d),
            LegendPosition::BottomLeft => Point::new(plot.x0 + d, plot.y1 - d - h),
            LegendPosition::BottomRight => Point::new(plot.x1 - d - w, plot.y1 - d - h),
            LegendPosition::TopCenter => Point::new(cx, plot.y0 - d - h),
            LegendPosition::BottomCenter => Point::new(cx, plot.y1 + d),
            LegendPosition::Left => Point::new(plot.x0 - d - w, plot.y0),
            LegendPosition::Right => Point::new(plot.x1 + d, plot.y0),
            LegendPosition::None => return None,
        };
        Some(p)
    }

    /// Renders the legend placed against `plot` by its position.
    ///
    /// Returns nothing for [`LegendPosition::None`] or an empty item list.
    pub fn render(&self, plot: Rect, measurer: &dyn TextMeasurer) -> Vec<Command> {
        let size = self.measure(measurer);
        match self.origin(plot, size) {
            Some(origin) => self.render_at(origin, measurer),
            None => Vec::new(),
        }
    }

    /// Renders the legend with its top-left corner at `origin`.
    ///
    /// Emission order: background, then per item its symbol, label and value.
    pub fn render_at(&self, origin: Point, measurer: &dyn TextMeasurer) -> Vec<Command> {
        if self.items.is_empty() {
            crate::log::debug!("legend has no items; rendering nothing");
            return Vec::new();
        }
        let style = &self.style;
        let text = style.text_style();
        let root = self.layout(measurer);
        let offset = origin.to_vec2();

        let mut children: Vec<Command> = Vec::with_capacity(3 * self.items.len() + 1);
        if style.background.is_some() || style.border.is_some() {
            children.push(
                RectCommand {
                    rect: root.rect() + offset,
                    fill: style.background.clone(),
                    stroke: style.border.clone(),
                    corner_radius: 0.0,
                }
                .into(),
            );
        }

        let label = |s: &str, cell: &LayoutNode| -> Command {
            let r = cell.rect() + offset;
            Text::new(s, r.x0, r.center().y, text.clone())
                .with_fill(style.text_fill.clone())
                .with_alignment(TextAnchor::Start, TextBaseline::Middle)
                .into()
        };

        for (item, row) in self.items.iter().zip(root.children()) {
            let [symbol, label_cell, rest @ ..] = row.children() else {
                continue;
            };
            children.push(item.symbol.render(symbol.rect() + offset));
            children.push(label(&item.label, label_cell));
            if let (Some(value), Some(cell)) = (&item.value, rest.first()) {
                children.push(label(value, cell));
            }
        }

        alloc::vec![Group::new(children).with_class("legend").into()]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use charta_text::{HeuristicTextMeasurer, estimate_text_width};

    use super::*;

    fn two_items() -> Vec<LegendItem> {
        vec![
            LegendItem::swatch("Alpha", css::STEEL_BLUE),
            LegendItem::swatch("Beta", css::ORANGE),
        ]
    }

    fn group(commands: &[Command]) -> &Group {
        match commands {
            [Command::Group(g)] => g,
            _ => panic!("expected one group, got {commands:?}"),
        }
    }

    #[test]
    fn vertical_legend_size() {
        let legend = Legend::new(two_items()).with_layout(LegendLayout::Vertical);
        let size = legend.measure(&HeuristicTextMeasurer);
        assert!((size.height - (2.0 * 10.0 + 2.0 * 12.0 + 8.0)).abs() < 1e-9);
        let label = estimate_text_width("Alpha", 12.0);
        assert!(size.width >= 10.0 + 12.0 + 6.0 + label + 10.0 - 1e-9);
    }

    #[test]
    fn horizontal_legend_size() {
        let legend = Legend::new(two_items()).with_layout(LegendLayout::Horizontal);
        let size = legend.measure(&HeuristicTextMeasurer);
        let a = estimate_text_width("Alpha", 12.0);
        let b = estimate_text_width("Beta", 12.0);
        let expected = 10.0 + (12.0 + 6.0 + a) + 8.0 + (12.0 + 6.0 + b) + 10.0;
        assert!((size.width - expected).abs() < 1e-9);
        assert!((size.height - 32.0).abs() < 1e-9);
    }

    #[test]
    fn auto_layout_follows_position() {
        let legend = Legend::new(two_items());
        assert_eq!(legend.resolved_layout(), LegendLayout::Vertical);
        let top = legend.clone().with_position(LegendPosition::TopCenter);
        assert_eq!(top.resolved_layout(), LegendLayout::Horizontal);
        let forced = top.with_layout(LegendLayout::Vertical);
        assert_eq!(forced.resolved_layout(), LegendLayout::Vertical);
    }

    #[test]
    fn render_at_places_symbols_then_labels() {
        let legend = Legend::new(two_items());
        let out = legend.render_at(Point::new(100.0, 50.0), &HeuristicTextMeasurer);
        let g = group(&out);
        assert_eq!(g.classes.as_slice(), ["legend"]);
        assert_eq!(g.children.len(), 4);

        let Command::Rect(swatch) = &g.children[0] else {
            panic!("expected a swatch");
        };
        let expected = Rect::new(110.0, 60.0, 122.0, 72.0);
        assert!((swatch.rect.origin() - expected.origin()).hypot() < 1e-9);
        assert!((swatch.rect.width() - 12.0).abs() < 1e-9);

        let Command::Text(label) = &g.children[1] else {
            panic!("expected a label");
        };
        assert_eq!(label.text, "Alpha");
        assert!((label.x - 128.0).abs() < 1e-9);
        assert!((label.y - 66.0).abs() < 1e-9);
        assert_eq!(label.baseline, TextBaseline::Middle);

        let Command::Text(second) = &g.children[3] else {
            panic!("expected a label");
        };
        assert!((second.y - (66.0 + 12.0 + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn values_follow_labels() {
        let items = vec![LegendItem::swatch("Sales", css::RED).with_value("42%")];
        let legend = Legend::new(items);
        let out = legend.render_at(Point::ORIGIN, &HeuristicTextMeasurer);
        let g = group(&out);
        let Command::Text(value) = &g.children[2] else {
            panic!("expected a value");
        };
        assert_eq!(value.text, "42%");
        let expected = 10.0 + 12.0 + 6.0 + estimate_text_width("Sales", 12.0) + 6.0;
        assert!((value.x - expected).abs() < 1e-9);
    }

    #[test]
    fn background_is_drawn_first() {
        let style = LegendStyle {
            background: Some(css::WHITE.into()),
            border: Some(StrokeStyle::default()),
            ..LegendStyle::default()
        };
        let legend = Legend::new(two_items()).with_style(style);
        let out = legend.render_at(Point::ORIGIN, &HeuristicTextMeasurer);
        let g = group(&out);
        let Command::Rect(bg) = &g.children[0] else {
            panic!("expected a background");
        };
        assert_eq!(bg.rect.size(), legend.measure(&HeuristicTextMeasurer));
        assert!(bg.stroke.is_some());
    }

    #[test]
    fn empty_or_hidden_legends_render_nothing() {
        let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
        let empty = Legend::new(Vec::new());
        assert!(empty.render(plot, &HeuristicTextMeasurer).is_empty());
        let hidden = Legend::new(two_items()).with_position(LegendPosition::None);
        assert!(hidden.render(plot, &HeuristicTextMeasurer).is_empty());
    }

    #[test]
    fn placement_relative_to_plot() {
        let plot = Rect::new(50.0, 20.0, 450.0, 320.0);
        let size = Size::new(80.0, 40.0);
        let at = |p| Legend::new(two_items()).with_position(p).origin(plot, size);
        assert_eq!(at(LegendPosition::Right), Some(Point::new(460.0, 20.0)));
        assert_eq!(at(LegendPosition::Left), Some(Point::new(-40.0, 20.0)));
        assert_eq!(at(LegendPosition::TopRight), Some(Point::new(360.0, 30.0)));
        assert_eq!(at(LegendPosition::BottomLeft), Some(Point::new(60.0, 270.0)));
        assert_eq!(at(LegendPosition::TopCenter), Some(Point::new(210.0, -30.0)));
        assert_eq!(at(LegendPosition::BottomCenter), Some(Point::new(210.0, 330.0)));
        assert_eq!(at(LegendPosition::None), None);
    }

    #[test]
    fn items_from_a_colour_scale() {
        let colours: Vec<Brush> = vec![css::RED.into(), css::BLUE.into()];
        let scale = ScaleOrdinal::new(["x", "y", "z"], colours).unwrap();
        let legend = Legend::from_ordinal(&scale);
        let labels: Vec<&str> = legend.items().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["x", "y", "z"]);
        assert_eq!(legend.items()[2].symbol, LegendSymbol::swatch(css::RED));
    }
}

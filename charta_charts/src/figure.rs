// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figure composition: a plot rectangle framed by axes, a legend and a title.
//!
//! A [`Figure`] runs a measure/arrange pass:
//! - **Measure**: each guide reports the space it needs. Axes report their
//!   thickness, the legend its box and the title its band height.
//! - **Arrange**: guide thicknesses become margins around the plot, and
//!   [`Figure::arrange`] returns every rectangle as a [`FigureLayout`].
//!
//! Axes and series are drawn in *plot-local* coordinates. The plot's top-left
//! corner is `(0, 0)`, x runs over `0..plot.width()` and y over
//! `0..plot.height()`. Build scales with ranges `(0, width)` for x and
//! `(height, 0)` for y. [`Figure::render`] translates them into place.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use charta_core::{Command, Group, Transform};
use charta_text::{LengthContext, TextMeasurer};

use crate::axis::{AxisGuide, AxisRenderOptions, AxisStyle, Orientation};
use crate::legend::{Legend, LegendPosition};
use crate::title::Title;

/// Rectangles computed by [`Figure::arrange`], in view coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FigureLayout {
    /// The whole figure.
    pub view: Rect,
    /// The title band, if the figure has a title.
    pub title: Option<Rect>,
    /// The plot (data) rectangle.
    pub plot: Rect,
    /// Space reserved for the top axis.
    pub axis_top: Option<Rect>,
    /// Space reserved for the bottom axis.
    pub axis_bottom: Option<Rect>,
    /// Space reserved for the left axis.
    pub axis_left: Option<Rect>,
    /// Space reserved for the right axis.
    pub axis_right: Option<Rect>,
    /// The legend box, unless there is no legend or it is hidden.
    pub legend: Option<Rect>,
}

impl FigureLayout {
    /// The reserved rectangle for the axis on side `orientation`.
    pub fn axis(&self, orientation: Orientation) -> Option<Rect> {
        match orientation {
            Orientation::Top => self.axis_top,
            Orientation::Bottom => self.axis_bottom,
            Orientation::Left => self.axis_left,
            Orientation::Right => self.axis_right,
        }
    }
}

/// A plot with up to four axes, a legend and a title.
pub struct Figure<'a> {
    plot_size: Size,
    view_size: Option<Size>,
    padding: f64,
    title: Option<Title>,
    axes: Vec<&'a dyn AxisGuide>,
    axis_style: AxisStyle,
    legend: Option<Legend>,
}

impl core::fmt::Debug for Figure<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let axes: Vec<Orientation> = self.axes.iter().map(|a| a.orientation()).collect();
        f.debug_struct("Figure")
            .field("plot_size", &self.plot_size)
            .field("view_size", &self.view_size)
            .field("padding", &self.padding)
            .field("title", &self.title)
            .field("axes", &axes)
            .field("axis_style", &self.axis_style)
            .field("legend", &self.legend)
            .finish()
    }
}

impl<'a> Figure<'a> {
    /// A figure whose plot rectangle has the given size.
    ///
    /// The view grows to fit the guides, plus 10px of padding on every side.
    pub fn new(plot_size: Size) -> Self {
        Self {
            plot_size,
            view_size: None,
            padding: 10.0,
            title: None,
            axes: Vec::new(),
            axis_style: AxisStyle::default(),
            legend: None,
        }
    }

    /// Fixes the outer size; the plot takes whatever the guides leave.
    ///
    /// Axes are measured before the plot size is known, so this suits
    /// scales whose tick labels do not depend on the range (all built-in ones).
    #[must_use]
    pub fn with_view_size(mut self, view_size: Size) -> Self {
        self.view_size = Some(view_size);
        self
    }

    /// Sets the padding around the whole figure.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Adds an axis, replacing any axis already on the same side.
    #[must_use]
    pub fn with_axis(mut self, axis: &'a dyn AxisGuide) -> Self {
        let side = axis.orientation();
        self.axes.retain(|a| a.orientation() != side);
        self.axes.push(axis);
        self
    }

    /// Sets the style shared by all axes.
    #[must_use]
    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.axis_style = style;
        self
    }

    /// Sets the legend.
    #[must_use]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// The axis on side `orientation`.
    pub fn axis(&self, orientation: Orientation) -> Option<&'a dyn AxisGuide> {
        self.axes.iter().copied().find(|a| a.orientation() == orientation)
    }

    /// Axis options for side `orientation` of a plot of `plot` size.
    ///
    /// Percentages resolve against the plot extent across the axis, so a
    /// `100%` grid spans the plot.
    fn axis_options(&self, orientation: Orientation, plot: Size) -> AxisRenderOptions {
        let (reference, position) = match orientation {
            Orientation::Bottom => (plot.height, plot.height),
            Orientation::Top => (plot.height, 0.0),
            Orientation::Left => (plot.width, 0.0),
            Orientation::Right => (plot.width, plot.width),
        };
        AxisRenderOptions::new(position)
            .with_style(self.axis_style.clone())
            .with_context(LengthContext::new(reference, self.axis_style.font_size))
    }

    fn thickness(&self, orientation: Orientation, measurer: &dyn TextMeasurer) -> f64 {
        self.axis(orientation).map_or(0.0, |a| {
            let options = self.axis_options(orientation, self.plot_size);
            a.measure(&options, measurer).max(0.0)
        })
    }

    /// The legend, if it is drawn at all.
    fn visible_legend(&self) -> Option<&Legend> {
        self.legend
            .as_ref()
            .filter(|l| l.position() != LegendPosition::None && !l.items().is_empty())
    }

    /// Computes the figure's rectangles.
    pub fn arrange(&self, measurer: &dyn TextMeasurer) -> FigureLayout {
        let pad = self.padding;
        let title_h = self.title.as_ref().map_or(0.0, |t| t.measure(measurer));
        let top = self.thickness(Orientation::Top, measurer);
        let bottom = self.thickness(Orientation::Bottom, measurer);
        let left = self.thickness(Orientation::Left, measurer);
        let right = self.thickness(Orientation::Right, measurer);

        let mut margin_left = pad + left;
        let mut margin_right = pad + right;
        let mut margin_top = pad + title_h + top;
        let mut margin_bottom = pad + bottom;

        let legend = self.visible_legend().map(|l| (l, l.measure(measurer)));
        if let Some((l, size)) = legend {
            let d = l.offset();
            match l.position() {
                LegendPosition::Left => margin_left += size.width + d,
                LegendPosition::Right => margin_right += size.width + d,
                LegendPosition::TopCenter => margin_top += size.height + d,
                LegendPosition::BottomCenter => margin_bottom += size.height + d,
                LegendPosition::TopLeft
                | LegendPosition::TopRight
                | LegendPosition::BottomLeft
                | LegendPosition::BottomRight
                | LegendPosition::None => {}
            }
        }

        let plot_size = match self.view_size {
            Some(v) => Size::new(
                (v.width - margin_left - margin_right).max(0.0),
                (v.height - margin_top - margin_bottom).max(0.0),
            ),
            None => Size::new(self.plot_size.width.max(0.0), self.plot_size.height.max(0.0)),
        };
        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_size.width,
            margin_top + plot_size.height,
        );

        let reserve = |o: Orientation, r: Rect| self.axis(o).map(|_| r);
        let axis_top = reserve(
            Orientation::Top,
            Rect::new(plot.x0, plot.y0 - top, plot.x1, plot.y0),
        );
        let axis_bottom = reserve(
            Orientation::Bottom,
            Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + bottom),
        );
        let axis_left = reserve(
            Orientation::Left,
            Rect::new(plot.x0 - left, plot.y0, plot.x0, plot.y1),
        );
        let axis_right = reserve(
            Orientation::Right,
            Rect::new(plot.x1, plot.y0, plot.x1 + right, plot.y1),
        );

        // Outside legends clear the axes; corner legends sit inside the plot.
        let legend = legend.and_then(|(l, size)| {
            let anchor = match l.position() {
                LegendPosition::Left | LegendPosition::Right => {
                    Rect::new(plot.x0 - left, plot.y0, plot.x1 + right, plot.y1)
                }
                LegendPosition::TopCenter | LegendPosition::BottomCenter => {
                    Rect::new(plot.x0, plot.y0 - top, plot.x1, plot.y1 + bottom)
                }
                _ => plot,
            };
            l.origin(anchor, size).map(|p| Rect::from_origin_size(p, size))
        });

        let view_size = self.view_size.unwrap_or(Size::new(
            margin_left + plot_size.width + margin_right,
            margin_top + plot_size.height + margin_bottom,
        ));
        let view = Rect::from_origin_size((0.0, 0.0), view_size);
        let title = self
            .title
            .as_ref()
            .map(|_| Rect::new(0.0, pad, view.x1, pad + title_h));

        FigureLayout {
            view,
            title,
            plot,
            axis_top,
            axis_bottom,
            axis_left,
            axis_right,
            legend,
        }
    }

    /// Arranges the figure and renders it.
    ///
    /// `series` receives the layout and returns plot-local commands. The
    /// output order is:
    /// 1. one `plot` group, translated to the plot corner, holding the series
    ///    then the axes (bottom, top, left, right);
    /// 2. the legend;
    /// 3. the title.
    pub fn render(
        &self,
        measurer: &dyn TextMeasurer,
        series: impl FnOnce(&FigureLayout) -> Vec<Command>,
    ) -> (FigureLayout, Vec<Command>) {
        let layout = self.arrange(measurer);
        let plot = layout.plot;

        let mut inner = series(&layout);
        for side in [
            Orientation::Bottom,
            Orientation::Top,
            Orientation::Left,
            Orientation::Right,
        ] {
            if let Some(axis) = self.axis(side) {
                let options = self.axis_options(side, plot.size());
                inner.extend(axis.render_with(&options, measurer));
            }
        }

        let mut out: Vec<Command> = Vec::new();
        out.push(
            Group::new(inner)
                .with_class("plot")
                .with_transform(Transform::translate(plot.x0, plot.y0))
                .into(),
        );
        if let (Some(legend), Some(rect)) = (self.visible_legend(), layout.legend) {
            out.extend(legend.render_at(rect.origin(), measurer));
        }
        if let (Some(title), Some(band)) = (&self.title, layout.title) {
            out.extend(title.render(band, measurer));
        }
        (layout, out)
    }
}

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders sample Charta figures to SVG files.
//!
//! Usage: `charta_demo [OUT_DIR]` (defaults to `charta_demo_out`). Set
//! `RUST_LOG=charta_charts=debug` to see tick and layout decisions.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use kurbo::{BezPath, Point, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

use charta_charts::{
    Axis, AxisRenderOptions, AxisStyle, Figure, FigureLayout, GridStyle, Legend, LegendItem,
    LegendPosition, LegendSymbol, Orientation, Scale, ScaleBand, ScaleLinear, ScaleLog,
    ScaleOrdinal, ScaleTime, Title, format,
};
use charta_core::{Command, PathCommand, RectCommand, StrokeStyle};
use charta_svg::SvgDocument;
use charta_text::HeuristicTextMeasurer;

type DemoResult<T> = Result<T, Box<dyn Error>>;

fn main() -> DemoResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("charta_demo_out"), PathBuf::from);
    std::fs::create_dir_all(&out_dir)?;

    let pages = [
        ("axis_linear.svg", linear_axis_demo()),
        ("axis_band.svg", band_axis_demo()),
        ("axis_time.svg", time_axis_demo()),
        ("legend.svg", legend_demo()),
        ("bar_figure.svg", bar_figure_demo()?),
        ("log_figure.svg", log_figure_demo()?),
    ];
    for (name, svg) in pages {
        write_page(&out_dir, name, &svg)?;
    }
    Ok(())
}

fn write_page(dir: &Path, name: &str, svg: &str) -> DemoResult<()> {
    let path = dir.join(name);
    std::fs::write(&path, svg)?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "wrote figure");
    Ok(())
}

fn document(size: Size, commands: Vec<Command>) -> String {
    let mut doc = SvgDocument::new(size.width, size.height).with_background(css::WHITE);
    doc.extend(commands);
    doc.to_svg_string()
}

fn linear_axis_demo() -> String {
    let x = ScaleLinear::new((0.0, 100.0), (20.0, 520.0));
    let axis = Axis::new(&x, Orientation::Bottom)
        .with_tick_count(10)
        .with_title("X Axis");
    document(
        Size::new(540.0, 80.0),
        axis.render(&AxisRenderOptions::new(20.0)),
    )
}

fn band_axis_demo() -> String {
    let days = ScaleBand::new(["Mon", "Tue", "Wed", "Thu", "Fri"], (20.0, 520.0));
    let axis = Axis::new(&days, Orientation::Bottom).with_title("Weekday");
    document(
        Size::new(540.0, 80.0),
        axis.render(&AxisRenderOptions::new(20.0)),
    )
}

fn time_axis_demo() -> String {
    let (Some(start), Some(end)) = (
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).single(),
    ) else {
        return String::new();
    };
    let t = ScaleTime::new((start, end), (40.0, 1160.0));
    let axis = Axis::new(&t, Orientation::Bottom)
        .with_tick_count(12)
        .with_tick_formatter(format::time("%Y-%m-%d"));
    document(
        Size::new(1200.0, 60.0),
        axis.render(&AxisRenderOptions::new(20.0)),
    )
}

fn legend_demo() -> String {
    let measurer = HeuristicTextMeasurer;
    let legend = Legend::new(vec![
        LegendItem::swatch("Revenue", css::STEEL_BLUE).with_value("1.2M"),
        LegendItem::new("Forecast", LegendSymbol::line(16.0, dashed(css::TOMATO))),
        LegendItem::new("Outlier", LegendSymbol::circle(10.0, css::SEA_GREEN)),
    ]);
    let size = legend.measure(&measurer);
    document(
        Size::new(size.width + 20.0, size.height + 20.0),
        legend.render_at(Point::new(10.0, 10.0), &measurer),
    )
}

fn dashed(color: Color) -> StrokeStyle {
    StrokeStyle::solid(color, 2.0).with_dash(&[4.0, 2.0])
}

fn bar_figure_demo() -> DemoResult<String> {
    let measurer = HeuristicTextMeasurer;
    let plot = Size::new(400.0, 240.0);
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let sales = [12_500.0, 18_200.0, 9_800.0, 22_400.0, 30_100.0, 27_600.0];

    let x = ScaleBand::new(months, (0.0, plot.width)).with_padding(0.2, 0.1);
    let y = ScaleLinear::new((0.0, 35_000.0), (plot.height, 0.0)).nice(5);
    let colors = ScaleOrdinal::new(["2024"], vec![css::STEEL_BLUE])?;

    let bottom = Axis::new(&x, Orientation::Bottom).with_title("Month");
    let left = Axis::new(&y, Orientation::Left)
        .with_tick_count(5)
        .with_tick_formatter(format::si)
        .with_grid(plot.width)
        .with_title("Sales");
    let style = AxisStyle {
        grid: GridStyle {
            stroke: StrokeStyle::solid(css::LIGHT_GRAY, 1.0).with_dash(&[3.0, 3.0]),
        },
        ..AxisStyle::default()
    };

    let figure = Figure::new(plot)
        .with_title(Title::new("Monthly sales").with_subtitle("First half of 2024"))
        .with_axis(&bottom)
        .with_axis(&left)
        .with_axis_style(style)
        .with_legend(Legend::from_ordinal(&colors).with_position(LegendPosition::TopRight));

    let mut failure = None;
    let (layout, commands) = figure.render(&measurer, |_| {
        bars(&x, &y, &months, &sales, css::STEEL_BLUE).unwrap_or_else(|e| {
            failure = Some(e);
            Vec::new()
        })
    });
    if let Some(e) = failure {
        return Err(e.into());
    }
    Ok(document(layout.view.size(), commands))
}

fn bars(
    x: &ScaleBand,
    y: &ScaleLinear,
    keys: &[&str],
    values: &[f64],
    fill: Color,
) -> Result<Vec<Command>, charta_charts::ScaleError> {
    let base = y.apply(&0.0)?;
    keys.iter()
        .zip(values)
        .map(|(key, value)| {
            let x0 = x.apply(&(*key).to_string())?;
            let top = y.apply(value)?;
            Ok(RectCommand::filled(Rect::new(x0, top, x0 + x.bandwidth(), base), fill).into())
        })
        .collect()
}

fn log_figure_demo() -> DemoResult<String> {
    let measurer = HeuristicTextMeasurer;
    let plot = Size::new(360.0, 220.0);
    let x = ScaleLinear::new((0.0, 300.0), (0.0, plot.width));
    let y = ScaleLog::new((1.0, 1000.0), (plot.height, 0.0))?;
    let points = [
        (0.0, 1.0),
        (30.0, 3.0),
        (60.0, 10.0),
        (120.0, 30.0),
        (180.0, 100.0),
        (240.0, 300.0),
        (300.0, 1000.0),
    ];

    let bottom = Axis::new(&x, Orientation::Bottom)
        .with_tick_count(6)
        .with_title("time (s)");
    let left = Axis::new(&y, Orientation::Left)
        .with_tick_count(4)
        .with_title("value");
    let legend = Legend::new(vec![LegendItem::new(
        "growth",
        LegendSymbol::line(16.0, StrokeStyle::solid(css::DARK_ORANGE, 2.0)),
    )])
    .with_position(LegendPosition::BottomCenter);

    let figure = Figure::new(plot)
        .with_title(Title::new("Exponential growth"))
        .with_axis(&bottom)
        .with_axis(&left)
        .with_legend(legend);

    let mut path = BezPath::new();
    for (i, (px, py)) in points.iter().enumerate() {
        let p = Point::new(x.apply(px)?, y.apply(py)?);
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    let (layout, commands) = figure.render(&measurer, |_: &FigureLayout| {
        vec![PathCommand::stroked(path, StrokeStyle::solid(css::DARK_ORANGE, 2.0)).into()]
    });
    Ok(document(layout.view.size(), commands))
}

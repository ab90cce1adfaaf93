// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-to-markup serialisation.

use kurbo::{BezPath, PathEl, Point};
use peniko::Brush;

use charta_core::{
    Command, Group, GroupStyle, Line, MarkerDef, PathCommand, RectCommand, StrokeStyle, Text,
    TextBaseline, TextStyle, Transform,
};
use charta_text::{FontStyle, FontWeight, escape_xml};

/// Formats a coordinate with at most three fractional digits.
///
/// Trailing zeros are dropped, `-0` prints as `0`, and non-finite values
/// print as `0` so the markup stays well-formed.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        "0".to_string()
    } else {
        format!("{r}")
    }
}

/// Serialises a solid brush as `#rrggbb` plus its opacity (when not opaque).
///
/// Gradients and images have no attribute form here and serialise as `none`.
pub(crate) fn paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (value, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

/// SVG path data for `path`.
pub(crate) fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    let pt = |d: &mut String, p: Point| {
        d.push_str(&num(p.x));
        d.push(' ');
        d.push_str(&num(p.y));
    };
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match *el {
            PathEl::MoveTo(p) => {
                d.push('M');
                pt(&mut d, p);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                pt(&mut d, p);
            }
            PathEl::QuadTo(a, b) => {
                d.push('Q');
                pt(&mut d, a);
                d.push(' ');
                pt(&mut d, b);
            }
            PathEl::CurveTo(a, b, c) => {
                d.push('C');
                pt(&mut d, a);
                d.push(' ');
                pt(&mut d, b);
                d.push(' ');
                pt(&mut d, c);
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Streams commands into an SVG string, one element per line.
#[derive(Debug, Default)]
pub(crate) struct Writer {
    out: String,
    depth: usize,
    /// Whether marker definitions were hoisted into the document `<defs>`.
    hoisted_markers: bool,
}

impl Writer {
    pub(crate) fn new(depth: usize, hoisted_markers: bool) -> Self {
        Self {
            out: String::new(),
            depth,
            hoisted_markers,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    pub(crate) fn line_start(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    pub(crate) fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push_str(&format!(r#" {name}="{value}""#));
    }

    fn attr_num(&mut self, name: &str, value: f64) {
        self.attr(name, &num(value));
    }

    fn paint_attr(&mut self, name: &str, brush: &Brush) {
        let (value, opacity) = paint(brush);
        self.attr(name, &value);
        if let Some(o) = opacity {
            self.attr_num(&format!("{name}-opacity"), o);
        }
    }

    fn stroke_attrs(&mut self, stroke: &StrokeStyle) {
        self.paint_attr("stroke", &stroke.brush);
        self.attr_num("stroke-width", stroke.width);
        if !stroke.dash.is_empty() {
            let dash: Vec<String> = stroke.dash.iter().map(|&d| num(d)).collect();
            self.attr("stroke-dasharray", &dash.join(" "));
        }
    }

    fn font_attrs(&mut self, style: &TextStyle) {
        self.attr("font-family", &escape_xml(style.font_family.as_css_family()));
        self.attr_num("font-size", style.font_size);
        if style.font_weight != FontWeight::NORMAL {
            self.attr("font-weight", &style.font_weight.0.to_string());
        }
        if style.font_style != FontStyle::Normal {
            self.attr("font-style", style.font_style.as_svg_str());
        }
    }

    pub(crate) fn commands(&mut self, commands: &[Command]) {
        for command in commands {
            self.command(command);
        }
    }

    fn command(&mut self, command: &Command) {
        match command {
            Command::Line(l) => self.line(l),
            Command::Text(t) => self.text(t),
            Command::Rect(r) => self.rect(r),
            Command::Path(p) => self.path(p),
            Command::Group(g) => self.group(g),
            Command::Marker(m) => {
                if !self.hoisted_markers {
                    self.line_start();
                    self.raw("<defs>\n");
                    self.depth += 1;
                    self.marker(m);
                    self.depth -= 1;
                    self.line_start();
                    self.raw("</defs>\n");
                }
            }
        }
    }

    fn line(&mut self, l: &Line) {
        self.line_start();
        self.raw("<line");
        self.attr_num("x1", l.x1);
        self.attr_num("y1", l.y1);
        self.attr_num("x2", l.x2);
        self.attr_num("y2", l.y2);
        self.stroke_attrs(&l.stroke);
        if let Some(id) = &l.marker_start {
            self.attr("marker-start", &format!("url(#{})", escape_xml(id)));
        }
        if let Some(id) = &l.marker_end {
            self.attr("marker-end", &format!("url(#{})", escape_xml(id)));
        }
        self.raw("/>\n");
    }

    fn text(&mut self, t: &Text) {
        self.line_start();
        self.raw("<text");
        self.attr_num("x", t.x);
        self.attr_num("y", t.y);
        self.attr("text-anchor", t.anchor.as_svg_str());
        // The alphabetic baseline is the SVG default.
        if t.baseline != TextBaseline::Alphabetic {
            self.attr("dominant-baseline", t.baseline.as_svg_str());
        }
        self.font_attrs(&t.style);
        self.paint_attr("fill", &t.fill);
        self.raw(">");
        self.raw(&escape_xml(&t.text));
        self.raw("</text>\n");
    }

    fn rect(&mut self, r: &RectCommand) {
        self.line_start();
        self.raw("<rect");
        self.attr_num("x", r.rect.x0.min(r.rect.x1));
        self.attr_num("y", r.rect.y0.min(r.rect.y1));
        self.attr_num("width", r.rect.width().abs());
        self.attr_num("height", r.rect.height().abs());
        if r.corner_radius > 0.0 {
            self.attr_num("rx", r.corner_radius);
        }
        self.fill_and_stroke(r.fill.as_ref(), r.stroke.as_ref());
        self.raw("/>\n");
    }

    fn path(&mut self, p: &PathCommand) {
        self.line_start();
        self.raw("<path");
        self.attr("d", &path_data(&p.path));
        self.fill_and_stroke(p.fill.as_ref(), p.stroke.as_ref());
        self.raw("/>\n");
    }

    fn fill_and_stroke(&mut self, fill: Option<&Brush>, stroke: Option<&StrokeStyle>) {
        match fill {
            Some(fill) => self.paint_attr("fill", fill),
            None => self.attr("fill", "none"),
        }
        if let Some(stroke) = stroke {
            self.stroke_attrs(stroke);
        }
    }

    fn group(&mut self, g: &Group) {
        self.line_start();
        self.raw("<g");
        if !g.classes.is_empty() {
            let classes: Vec<String> = g.classes.iter().map(|c| escape_xml(c)).collect();
            self.attr("class", &classes.join(" "));
        }
        if !g.transform.is_empty() {
            let steps: Vec<String> = g.transform.iter().map(transform).collect();
            self.attr("transform", &steps.join(" "));
        }
        self.group_style(&g.style);
        if g.children.is_empty() {
            self.raw("/>\n");
            return;
        }
        self.raw(">\n");
        self.depth += 1;
        self.commands(&g.children);
        self.depth -= 1;
        self.line_start();
        self.raw("</g>\n");
    }

    fn group_style(&mut self, style: &GroupStyle) {
        if let Some(fill) = &style.fill {
            self.paint_attr("fill", fill);
        }
        if let Some(stroke) = &style.stroke {
            self.stroke_attrs(stroke);
        }
        if let Some(font) = &style.font {
            self.font_attrs(font);
        }
    }

    pub(crate) fn marker(&mut self, m: &MarkerDef) {
        self.line_start();
        self.raw("<marker");
        self.attr("id", &escape_xml(&m.id));
        self.attr_num("markerWidth", m.width);
        self.attr_num("markerHeight", m.height);
        self.attr_num("refX", m.ref_x);
        self.attr_num("refY", m.ref_y);
        self.attr("orient", "auto");
        self.attr("markerUnits", "userSpaceOnUse");
        self.raw(">\n");
        self.depth += 1;
        self.line_start();
        self.raw("<path");
        self.attr("d", &path_data(&m.path));
        self.paint_attr("fill", &m.fill);
        self.raw("/>\n");
        self.depth -= 1;
        self.line_start();
        self.raw("</marker>\n");
    }
}

fn transform(t: &Transform) -> String {
    match *t {
        Transform::Translate { x, y } => format!("translate({} {})", num(x), num(y)),
        Transform::Rotate { angle, cx, cy } => {
            format!("rotate({} {} {})", num(angle), num(cx), num(cy))
        }
        Transform::Scale { sx, sy } => format!("scale({} {})", num(sx), num(sy)),
    }
}

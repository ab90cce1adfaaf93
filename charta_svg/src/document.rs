// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Standalone SVG documents.

use kurbo::{Rect, Size};
use peniko::Brush;

use charta_core::{Backend, Command, MarkerDef, RectCommand};

use crate::writer::{Writer, num};

/// A complete `<svg>` document built from draw commands.
///
/// Marker definitions found anywhere in the command tree are hoisted into a
/// single `<defs>` block ahead of the content, first occurrence per id wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgDocument {
    size: Size,
    background: Option<Brush>,
    commands: Vec<Command>,
}

impl SvgDocument {
    /// An empty document with the given viewport size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            background: None,
            commands: Vec::new(),
        }
    }

    /// Paints the whole viewport with `brush` behind the content.
    #[must_use]
    pub fn with_background(mut self, brush: impl Into<Brush>) -> Self {
        self.background = Some(brush.into());
        self
    }

    /// Viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Commands in paint order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Appends one command.
    pub fn push(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    /// Appends commands in order.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands.extend(commands);
    }

    /// Serialises the document.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (num(self.size.width), num(self.size.height));
        let mut writer = Writer::new(0, true);
        writer.raw(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        ));
        writer.raw("\n");

        let mut inner = Writer::new(1, true);
        if let Some(bg) = &self.background {
            let rect = Rect::from_origin_size((0.0, 0.0), self.size);
            inner.commands(&[RectCommand::filled(rect, bg.clone()).into()]);
        }

        let markers = collect_markers(&self.commands);
        if !markers.is_empty() {
            inner.line_start();
            inner.raw("<defs>\n");
            let mut defs = Writer::new(2, true);
            for marker in markers {
                defs.marker(marker);
            }
            inner.raw(&defs.finish());
            inner.line_start();
            inner.raw("</defs>\n");
        }

        inner.commands(&self.commands);
        writer.raw(&inner.finish());
        writer.raw("</svg>\n");
        writer.finish()
    }
}

/// Unique markers in first-seen order.
fn collect_markers(commands: &[Command]) -> Vec<&MarkerDef> {
    let mut markers: Vec<&MarkerDef> = Vec::new();
    for command in commands {
        command.walk(&mut |c| {
            if let Command::Marker(m) = c
                && !markers.iter().any(|seen| seen.id == m.id)
            {
                markers.push(m);
            }
        });
    }
    markers
}

/// Renders command lists as SVG markup.
///
/// Each call produces a fragment (no `<svg>` root). Markers stay inline in
/// their own `<defs>` block. Use [`SvgDocument`] for a standalone file.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgBackend;

impl Backend for SvgBackend {
    type Output = String;

    fn render(&mut self, commands: &[Command]) -> String {
        render_fragment(commands)
    }
}

/// Serialises `commands` as an SVG fragment.
pub fn render_fragment(commands: &[Command]) -> String {
    let mut writer = Writer::new(0, false);
    writer.commands(commands);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use charta_core::{
        Group, Line, StrokeStyle, Text, TextAnchor, TextBaseline, TextStyle, Transform,
    };

    use super::*;

    #[test]
    fn document_root_and_background() {
        let doc = SvgDocument::new(200.0, 100.5).with_background(css::WHITE);
        let svg = doc.to_svg_string();
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100.5" viewBox="0 0 200 100.5">"#
        ));
        assert!(svg.contains(
            r##"  <rect x="0" y="0" width="200" height="100.5" fill="#ffffff"/>"##
        ));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn lines_carry_stroke_and_dashes() {
        let line = Line::new(0.0, 0.5, 10.0, 0.5)
            .with_stroke(StrokeStyle::solid(css::GRAY, 1.0).with_dash(&[4.0, 2.0]));
        let out = render_fragment(&[line.into()]);
        assert_eq!(
            out,
            "<line x1=\"0\" y1=\"0.5\" x2=\"10\" y2=\"0.5\" stroke=\"#808080\" stroke-width=\"1\" stroke-dasharray=\"4 2\"/>\n"
        );
    }

    #[test]
    fn text_is_escaped_and_aligned() {
        let text = Text::new("a < b & c", 5.0, 6.0, TextStyle::new(12.0))
            .with_alignment(TextAnchor::Middle, TextBaseline::Hanging);
        let out = render_fragment(&[text.into()]);
        assert!(out.contains(r#"text-anchor="middle""#));
        assert!(out.contains(r#"dominant-baseline="hanging""#));
        assert!(out.contains(r#"font-size="12""#));
        assert!(!out.contains("font-weight"));
        assert!(out.contains(">a &lt; b &amp; c</text>"));
    }

    #[test]
    fn alphabetic_baseline_is_omitted() {
        let text = Text::new("x", 0.0, 0.0, TextStyle::new(10.0));
        let out = render_fragment(&[text.into()]);
        assert!(!out.contains("dominant-baseline"));
    }

    #[test]
    fn groups_nest_with_class_and_transform() {
        let rect = RectCommand::filled(Rect::new(0.0, 0.0, 4.0, 2.0), css::RED);
        let group = Group::new(vec![rect.into()])
            .with_class("axis")
            .with_class("axis-left")
            .with_transform(Transform::translate(30.0, 10.0))
            .with_transform(Transform::rotate(-90.0, 0.0, 0.0));
        let out = render_fragment(&[group.into()]);
        assert_eq!(
            out,
            "<g class=\"axis axis-left\" transform=\"translate(30 10) rotate(-90 0 0)\">\n  <rect x=\"0\" y=\"0\" width=\"4\" height=\"2\" fill=\"#ff0000\"/>\n</g>\n"
        );
    }

    #[test]
    fn markers_are_hoisted_once() {
        let arrow = MarkerDef::arrow("arrow", 6.0);
        let mut doc = SvgDocument::new(50.0, 50.0);
        doc.push(Group::new(vec![arrow.clone().into()]));
        doc.push(arrow);
        doc.push(Line::new(0.0, 0.0, 40.0, 0.0).with_marker_end("arrow"));
        let svg = doc.to_svg_string();
        assert_eq!(svg.matches("<marker ").count(), 1);
        assert_eq!(svg.matches("<defs>").count(), 1);
        let defs = svg.find("<defs>").unwrap();
        let line = svg.find("<line").unwrap();
        assert!(defs < line);
        assert!(svg.contains(r##"marker-end="url(#arrow)""##));
    }

    #[test]
    fn backend_output_is_deterministic() {
        let commands: Vec<Command> = vec![
            Line::new(0.0, 0.0, 1.0 / 3.0, 2.0).into(),
            Text::new("t", 1.0, 1.0, TextStyle::new(11.0)).into(),
        ];
        let mut backend = SvgBackend;
        let a = backend.render(&commands);
        let b = backend.render(&commands);
        assert_eq!(a, b);
        assert!(a.contains(r#"x2="0.333""#));
    }
}

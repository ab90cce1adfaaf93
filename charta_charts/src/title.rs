// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figure titles.
//!
//! A title reserves a band above the plot in [`Figure`](crate::Figure) layout
//! and renders as one or two text commands centred in that band.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use charta_core::{Command, Text};
use charta_text::{FontWeight, TextAnchor, TextBaseline, TextMeasurer, TextStyle};

/// A figure title with an optional subtitle.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    /// Title text.
    pub text: String,
    /// Optional subtitle text.
    pub subtitle: Option<String>,
    /// Title font.
    pub style: TextStyle,
    /// Subtitle font.
    pub subtitle_style: TextStyle,
    /// Title paint.
    pub fill: Brush,
    /// Subtitle paint.
    pub subtitle_fill: Brush,
    /// Vertical padding above and below the text.
    pub padding: f64,
    /// Gap between title and subtitle.
    pub subtitle_gap: f64,
    /// Horizontal placement within the title band.
    pub anchor: TextAnchor,
}

impl Title {
    /// A bold 14px title, centred.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            subtitle: None,
            style: TextStyle::new(14.0).with_weight(FontWeight::BOLD),
            subtitle_style: TextStyle::new(11.0),
            fill: css::BLACK.into(),
            subtitle_fill: css::DIM_GRAY.into(),
            padding: 6.0,
            subtitle_gap: 2.0,
            anchor: TextAnchor::Middle,
        }
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the title font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.style.font_size = font_size;
        self
    }

    /// Sets the title paint.
    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the horizontal placement.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// The height of the band this title needs.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let pad = self.padding.max(0.0);
        let mut total = 2.0 * pad + measurer.measure(&self.text, &self.style).line_height();
        if let Some(sub) = &self.subtitle {
            total += self.subtitle_gap.max(0.0)
                + measurer.measure(sub, &self.subtitle_style).line_height();
        }
        total
    }

    /// Renders the title inside `band`.
    pub fn render(&self, band: Rect, measurer: &dyn TextMeasurer) -> Vec<Command> {
        let x = match self.anchor {
            TextAnchor::Start => band.x0,
            TextAnchor::Middle => band.center().x,
            TextAnchor::End => band.x1,
        };
        let th = measurer.measure(&self.text, &self.style).line_height();
        let y = band.y0 + self.padding.max(0.0) + 0.5 * th;

        let mut out = Vec::with_capacity(2);
        out.push(
            Text::new(self.text.clone(), x, y, self.style.clone())
                .with_fill(self.fill.clone())
                .with_alignment(self.anchor, TextBaseline::Middle)
                .into(),
        );
        if let Some(sub) = &self.subtitle {
            let sh = measurer.measure(sub, &self.subtitle_style).line_height();
            let y_sub = y + 0.5 * th + self.subtitle_gap.max(0.0) + 0.5 * sh;
            out.push(
                Text::new(sub.clone(), x, y_sub, self.subtitle_style.clone())
                    .with_fill(self.subtitle_fill.clone())
                    .with_alignment(self.anchor, TextBaseline::Middle)
                    .into(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use charta_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn subtitle_adds_height_and_a_second_line() {
        let measurer = HeuristicTextMeasurer;
        let plain = Title::new("Sales");
        let h0 = plain.measure(&measurer);
        assert!((h0 - (12.0 + 14.0)).abs() < 1e-9);

        let full = plain.with_subtitle("2024");
        let h1 = full.measure(&measurer);
        assert!((h1 - (h0 + 2.0 + 11.0)).abs() < 1e-9);

        let out = full.render(Rect::new(0.0, 0.0, 200.0, h1), &measurer);
        assert_eq!(out.len(), 2);
        let Command::Text(t) = &out[0] else {
            panic!("expected text");
        };
        assert_eq!(t.x, 100.0);
        assert!((t.y - 13.0).abs() < 1e-9);
    }
}

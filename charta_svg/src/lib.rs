// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG 1.1 output for Charta draw commands.
//!
//! [`SvgDocument`] writes a standalone `<svg>` file with hoisted marker
//! definitions and an optional background. [`SvgBackend`] implements
//! [`charta_core::Backend`] and writes fragments, which is handy for tests and
//! for embedding into a larger document.
//!
//! Output is deterministic: coordinates are rounded to three decimals and
//! attributes are written in a fixed order, so the same commands always yield
//! the same bytes.
//!
//! ```
//! use charta_core::Line;
//! use charta_svg::SvgDocument;
//!
//! let mut doc = SvgDocument::new(100.0, 20.0);
//! doc.push(Line::new(0.0, 10.0, 100.0, 10.0));
//! let svg = doc.to_svg_string();
//! assert!(svg.contains(r#"<line x1="0" y1="10" x2="100" y2="10""#));
//! ```

mod document;
mod writer;

pub use document::{SvgBackend, SvgDocument, render_fragment};
pub use writer::num as format_number;

// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw commands for Charta.
//!
//! The positioning engine in `charta_charts` never paints pixels. It emits an
//! ordered stream of [`Command`]s (lines, text, rects, paths, groups, marker
//! definitions) which a [`Backend`] translates into its output format. SVG text
//! is the primary backend (`charta_svg`).
//!
//! Commands are plain owned values: construct them, hand them to a backend, drop
//! them. Emission order is paint order; backends never reorder.

#![no_std]

extern crate alloc;

mod command;
mod style;
mod transform;

pub use command::{Command, Group, Line, MarkerDef, PathCommand, RectCommand, Text};
pub use style::{GroupStyle, StrokeStyle};
pub use transform::Transform;

pub use charta_text::{TextAnchor, TextBaseline, TextStyle};

/// A consumer of draw commands.
///
/// A backend is free to produce any output (markup, a raster, terminal cells);
/// it must preserve the order of the commands it is given.
pub trait Backend {
    /// What the backend produces.
    type Output;

    /// Translates `commands`, in order.
    fn render(&mut self, commands: &[Command]) -> Self::Output;
}

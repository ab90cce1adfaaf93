// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales, axes, legends and layout for Charta.
//!
//! This crate turns data values into positioned [`charta_core::Command`]s:
//! - **Scales** map a domain (numbers, instants, category keys) to a pixel
//!   range, invert that mapping, and choose readable ticks.
//! - **Axes** borrow a scale and emit the domain line, tick marks, labels,
//!   gridlines and a title for one side of a plot.
//! - **Legends** are laid out with a small box [layout tree](LayoutNode) and
//!   emit symbols and labels.
//! - **Figures** arrange a plot, its axes, a legend and a title with a
//!   measure/arrange pass.
//!
//! Everything is a pure function of its inputs. Nothing is cached and nothing
//! is shared mutably, so rendering the same inputs twice yields the same
//! commands.
//!
//! ```
//! use charta_charts::{Axis, AxisRenderOptions, Orientation, Scale, ScaleLinear};
//!
//! let x = ScaleLinear::new((0.0, 100.0), (0.0, 500.0));
//! assert_eq!(x.apply(&50.0), Ok(250.0));
//!
//! let axis = Axis::new(&x, Orientation::Bottom).with_title("X Axis");
//! let commands = axis.render(&AxisRenderOptions::new(300.0));
//! assert_eq!(commands.len(), 1);
//! ```
//!
//! ## Features
//!
//! - `libm` (default): float math through `libm` in `no_std` builds.
//! - `std`: float math through `std`.
//! - `tracing`: debug logs for tick selection, empty guides and layout clipping.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod axis;
mod error;
mod figure;
#[cfg(not(feature = "std"))]
mod float;
pub mod format;
mod layout;
mod legend;
mod log;
mod scale;
mod symbol;
mod title;

pub use axis::{
    Axis, AxisGuide, AxisRenderOptions, AxisStyle, AxisTitleStyle, GridStyle, Orientation, Tick,
};
pub use error::ScaleError;
pub use figure::{Figure, FigureLayout};
pub use format::{Formatter, TickValue};
pub use layout::{Align, Constraints, LayoutNode, NodeKind, NodeStyle, layout_simple};
pub use legend::{Legend, LegendItem, LegendLayout, LegendPosition, LegendStyle};
pub use scale::{
    Domain, Scale, ScaleBand, ScaleLinear, ScaleLog, ScaleOrdinal, ScalePoint, ScalePow,
    ScaleTime, TimeInterval,
};
pub use symbol::LegendSymbol;
pub use title::Title;

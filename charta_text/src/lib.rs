// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typography and unit arithmetic for Charta.
//!
//! Everything that turns values into pixels eventually needs two small things:
//! - **lengths** that may be relative (percentages, ems) and are only resolved to
//!   pixels at emission time, and
//! - **text metrics** so guides (axes, legends) can reserve space for labels.
//!
//! This crate is intentionally:
//! - small and dependency-free,
//! - `no_std`-friendly (it uses `alloc` for owned strings), and
//! - renderer-agnostic: the [`TextMeasurer`] trait is the plug-in point for real
//!   shaping engines, while [`HeuristicTextMeasurer`] gives a cheap estimate.
//!
//! All user text that reaches a markup backend should pass through [`escape_xml`].

#![no_std]

extern crate alloc;

mod escape;
mod length;
mod measure;
mod style;

pub use escape::escape_xml;
pub use length::{Length, LengthContext, Spacing};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, estimate_text_width};
pub use style::{FontFamily, FontStyle, FontWeight, TextAnchor, TextBaseline, TextStyle};

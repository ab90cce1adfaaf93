// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small box layout tree for legends and composite figures.
//!
//! A tree is built from [`LayoutNode`]s: fixed boxes plus horizontal and
//! vertical stacks. Every node has a margin and a padding. [`layout_simple`]
//! fills in each node's rectangle in absolute coordinates, with the root at
//! the origin.
//!
//! The pass has two phases:
//! - **Measure** walks the tree bottom-up. Each node gets its size from its
//!   children, and each child is placed relative to its parent.
//! - **Place** walks top-down. It turns relative rectangles into absolute
//!   ones and clips them to the root constraint.
//!
//! Children are always measured unconstrained. Only the root is clamped.
//!
//! Percentages resolve against the constraint the parent was given, less the
//! parent's padding. Horizontal lengths use the width and vertical lengths use
//! the height. `em` lengths use [`Constraints::font_size`].

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size, Vec2};

use charta_text::{Length, LengthContext, Spacing};

/// Cross-axis placement of children within a stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Top of a horizontal stack, left of a vertical one.
    #[default]
    Start,
    /// Centred.
    Center,
    /// Bottom of a horizontal stack, right of a vertical one.
    End,
}

impl Align {
    fn offset(self, free: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5 * free,
            Self::End => free,
        }
    }
}

/// What a node is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// A leaf with an intrinsic size.
    Fixed {
        /// Intrinsic width.
        width: Length,
        /// Intrinsic height.
        height: Length,
    },
    /// Children laid out left to right.
    HStack,
    /// Children laid out top to bottom.
    VStack,
}

/// Box-model styling of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeStyle {
    /// Space outside the node's rectangle. The parent reserves it.
    pub margin: Spacing,
    /// Space between a container's rectangle and its children.
    pub padding: Spacing,
    /// Cross-axis placement of this container's children.
    pub align: Align,
}

/// The bounds a layout pass runs under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    /// Largest size the root may take; components may be infinite.
    pub max: Size,
    /// What `100%` resolves to, per axis.
    pub reference: Size,
    /// What `1em` resolves to.
    pub font_size: f64,
}

impl Constraints {
    /// Bounded constraints. Percentages resolve against the same bounds.
    pub fn new(max_width: f64, max_height: f64) -> Self {
        let max = Size::new(max_width.max(0.0), max_height.max(0.0));
        Self {
            max,
            reference: Size::new(finite_or_zero(max.width), finite_or_zero(max.height)),
            font_size: 12.0,
        }
    }

    /// No bounds. Percentages resolve to zero unless a reference is set.
    pub fn unbounded() -> Self {
        Self {
            max: Size::new(f64::INFINITY, f64::INFINITY),
            reference: Size::ZERO,
            font_size: 12.0,
        }
    }

    /// Sets the size percentages resolve against.
    #[must_use]
    pub fn with_reference(mut self, reference: Size) -> Self {
        self.reference = reference;
        self
    }

    /// Sets the font size `em` lengths resolve against.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn horizontal(&self) -> LengthContext {
        LengthContext::new(self.reference.width, self.font_size)
    }

    fn vertical(&self) -> LengthContext {
        LengthContext::new(self.reference.height, self.font_size)
    }

    fn clamp(&self, size: Size) -> Size {
        Size::new(size.width.min(self.max.width), size.height.min(self.max.height))
    }

    fn resolve(&self, spacing: &Spacing) -> Insets {
        let (h, v) = (self.horizontal(), self.vertical());
        Insets::new(
            spacing.left.resolve(h).max(0.0),
            spacing.top.resolve(v).max(0.0),
            spacing.right.resolve(h).max(0.0),
            spacing.bottom.resolve(v).max(0.0),
        )
    }

    /// Constraints for the children of a container with `padding`.
    fn inner(&self, padding: Insets) -> Self {
        Self::unbounded()
            .with_font_size(self.font_size)
            .with_reference(Size::new(
                (self.reference.width - padding.x_value()).max(0.0),
                (self.reference.height - padding.y_value()).max(0.0),
            ))
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// A node in a layout tree.
///
/// Nodes own their children, so a tree cannot contain cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
    kind: NodeKind,
    style: NodeStyle,
    children: Vec<LayoutNode>,
    rect: Rect,
}

impl LayoutNode {
    fn with_kind(kind: NodeKind, children: Vec<Self>) -> Self {
        Self {
            kind,
            style: NodeStyle::default(),
            children,
            rect: Rect::ZERO,
        }
    }

    /// A leaf of the given intrinsic size.
    pub fn fixed(width: impl Into<Length>, height: impl Into<Length>) -> Self {
        Self::with_kind(
            NodeKind::Fixed {
                width: width.into(),
                height: height.into(),
            },
            Vec::new(),
        )
    }

    /// A left-to-right stack.
    pub fn hstack(children: Vec<Self>) -> Self {
        Self::with_kind(NodeKind::HStack, children)
    }

    /// A top-to-bottom stack.
    pub fn vstack(children: Vec<Self>) -> Self {
        Self::with_kind(NodeKind::VStack, children)
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.style.margin = margin;
        self
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.style.padding = padding;
        self
    }

    /// Sets the cross-axis alignment of children.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.style.align = align;
        self
    }

    /// The node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The node style.
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// The children, in layout order.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// The rectangle computed by the last layout pass, in absolute coordinates.
    ///
    /// Zero until the node has been laid out.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Runs [`layout_simple`] on this node.
    pub fn layout(&mut self, constraints: Constraints) -> Size {
        layout_simple(self, constraints)
    }
}

/// Lays out `node` and all of its descendants.
///
/// The root is placed at the origin. The return value is the root's size:
/// its intrinsic size clamped to `constraints.max`. Content that does not fit
/// is clipped. Every rectangle is intersected with the root rectangle and no
/// error is raised. Running the pass twice with the same constraints gives
/// the same rectangles.
pub fn layout_simple(node: &mut LayoutNode, constraints: Constraints) -> Size {
    let size = measure(node, &constraints);
    let clip = Rect::from_origin_size(Point::ORIGIN, size);
    place(node, Vec2::ZERO, clip);
    size
}

/// Sizes `node` and places its children relative to it.
///
/// Leaves `node.rect` at the origin with the clamped size.
fn measure(node: &mut LayoutNode, constraints: &Constraints) -> Size {
    let intrinsic = match node.kind {
        NodeKind::Fixed { width, height } => Size::new(
            width.resolve(constraints.horizontal()).max(0.0),
            height.resolve(constraints.vertical()).max(0.0),
        ),
        NodeKind::HStack => stack(node, constraints, true),
        NodeKind::VStack => stack(node, constraints, false),
    };
    let size = constraints.clamp(intrinsic);
    if size != intrinsic {
        crate::log::debug!(
            width = intrinsic.width,
            height = intrinsic.height,
            max_width = constraints.max.width,
            max_height = constraints.max.height,
            "layout: clipping node to its constraint"
        );
    }
    crate::log::trace!(
        kind = ?node.kind,
        width = size.width,
        height = size.height,
        "layout: measured"
    );
    node.rect = Rect::from_origin_size(Point::ORIGIN, size);
    size
}

fn stack(node: &mut LayoutNode, constraints: &Constraints, horizontal: bool) -> Size {
    let padding = constraints.resolve(&node.style.padding);
    let inner = constraints.inner(padding);

    let mut slots: Vec<(Size, Insets)> = Vec::with_capacity(node.children.len());
    for child in &mut node.children {
        let size = measure(child, &inner);
        let margin = inner.resolve(&child.style.margin);
        slots.push((size, margin));
    }

    // Main-axis extent and cross-axis extent, margins included.
    let extent = |size: &Size, m: &Insets| {
        if horizontal {
            (m.x0 + size.width + m.x1, m.y0 + size.height + m.y1)
        } else {
            (m.y0 + size.height + m.y1, m.x0 + size.width + m.x1)
        }
    };
    let (main, cross) = slots.iter().fold((0.0, 0.0_f64), |(main, cross), (s, m)| {
        let (a, c) = extent(s, m);
        (main + a, cross.max(c))
    });

    let align = node.style.align;
    let mut cursor = 0.0;
    for (child, (size, m)) in node.children.iter_mut().zip(&slots) {
        let (along, across) = extent(size, m);
        let shift = align.offset(cross - across);
        let origin = if horizontal {
            Point::new(padding.x0 + cursor + m.x0, padding.y0 + shift + m.y0)
        } else {
            Point::new(padding.x0 + shift + m.x0, padding.y0 + cursor + m.y0)
        };
        cursor += along;
        child.rect = Rect::from_origin_size(origin, *size);
    }

    if horizontal {
        Size::new(main + padding.x_value(), cross + padding.y_value())
    } else {
        Size::new(cross + padding.x_value(), main + padding.y_value())
    }
}

/// Converts parent-relative rectangles to absolute ones, clipped to `clip`.
fn place(node: &mut LayoutNode, offset: Vec2, clip: Rect) {
    let absolute = node.rect + offset;
    node.rect = absolute.intersect(clip);
    let origin = absolute.origin().to_vec2();
    let clip = node.rect;
    for child in &mut node.children {
        place(child, origin, clip);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn rects(node: &LayoutNode) -> Vec<Rect> {
        node.children().iter().map(LayoutNode::rect).collect()
    }

    #[test]
    fn fixed_node_is_clamped() {
        let mut n = LayoutNode::fixed(100.0, 50.0);
        assert_eq!(n.layout(Constraints::unbounded()), Size::new(100.0, 50.0));
        assert_eq!(n.layout(Constraints::new(40.0, 80.0)), Size::new(40.0, 50.0));
        assert_eq!(n.rect(), Rect::new(0.0, 0.0, 40.0, 50.0));
    }

    #[test]
    fn hstack_places_children_left_to_right() {
        let mut n = LayoutNode::hstack(vec![
            LayoutNode::fixed(10.0, 20.0),
            LayoutNode::fixed(30.0, 5.0),
        ])
        .with_padding(Spacing::px(2.0));
        let size = n.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(44.0, 24.0));
        assert_eq!(
            rects(&n),
            [Rect::new(2.0, 2.0, 12.0, 22.0), Rect::new(12.0, 2.0, 42.0, 7.0)]
        );
    }

    #[test]
    fn margins_separate_children() {
        let mut n = LayoutNode::hstack(vec![
            LayoutNode::fixed(10.0, 10.0).with_margin(Spacing::ZERO.with_right(Length::px(3.0))),
            LayoutNode::fixed(10.0, 10.0).with_margin(
                Spacing::ZERO
                    .with_left(Length::px(5.0))
                    .with_top(Length::px(4.0)),
            ),
        ]);
        let size = n.layout(Constraints::unbounded());
        let r = rects(&n);
        assert_eq!(r[1].x0, 10.0 + 3.0 + 5.0);
        assert_eq!(r[1].y0, 4.0);
        assert_eq!(size, Size::new(28.0, 14.0));
    }

    #[test]
    fn hstack_children_never_overlap() {
        let widths = [3.0, 0.0, 17.5, 8.0, 1.0];
        let children = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                #[allow(clippy::cast_precision_loss, reason = "tiny test index")]
                let m = i as f64;
                LayoutNode::fixed(w, 4.0).with_margin(Spacing::px(m))
            })
            .collect();
        let mut n = LayoutNode::hstack(children).with_padding(Spacing::px(1.5));
        n.layout(Constraints::unbounded());
        let inner = n.rect().inset(-1.5);
        let r = rects(&n);
        for pair in r.windows(2) {
            assert!(pair[1].x0 >= pair[0].x0 + pair[0].width());
        }
        for c in &r {
            assert_eq!(c.union(inner), inner);
        }
    }

    #[test]
    fn vstack_is_symmetric() {
        let mut n = LayoutNode::vstack(vec![
            LayoutNode::fixed(10.0, 20.0),
            LayoutNode::fixed(30.0, 5.0).with_margin(Spacing::ZERO.with_top(Length::px(8.0))),
        ])
        .with_padding(Spacing::px(10.0));
        let size = n.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(50.0, 53.0));
        assert_eq!(
            rects(&n),
            [Rect::new(10.0, 10.0, 20.0, 30.0), Rect::new(10.0, 38.0, 40.0, 43.0)]
        );
    }

    #[test]
    fn nested_rects_are_absolute() {
        let mut n = LayoutNode::vstack(vec![
            LayoutNode::fixed(5.0, 5.0),
            LayoutNode::hstack(vec![LayoutNode::fixed(4.0, 4.0), LayoutNode::fixed(6.0, 6.0)])
                .with_padding(Spacing::px(1.0)),
        ])
        .with_padding(Spacing::px(4.0));
        n.layout(Constraints::unbounded());
        let row = &n.children()[1];
        assert_eq!(row.rect(), Rect::new(4.0, 9.0, 16.0, 17.0));
        assert_eq!(row.children()[1].rect(), Rect::new(9.0, 10.0, 15.0, 16.0));
    }

    #[test]
    fn centre_alignment() {
        let mut n = LayoutNode::hstack(vec![
            LayoutNode::fixed(10.0, 20.0),
            LayoutNode::fixed(10.0, 10.0),
        ])
        .with_align(Align::Center);
        n.layout(Constraints::unbounded());
        assert_eq!(rects(&n)[1].y0, 5.0);
        n = n.with_align(Align::End);
        n.layout(Constraints::unbounded());
        assert_eq!(rects(&n)[1].y0, 10.0);
    }

    #[test]
    fn tight_constraints_clip_children() {
        let mut n = LayoutNode::hstack(vec![
            LayoutNode::fixed(30.0, 10.0),
            LayoutNode::fixed(30.0, 10.0),
        ]);
        let size = n.layout(Constraints::new(45.0, 100.0));
        assert_eq!(size, Size::new(45.0, 10.0));
        let r = rects(&n);
        assert_eq!(r[0], Rect::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(r[1], Rect::new(30.0, 0.0, 45.0, 10.0));
    }

    #[test]
    fn percentages_resolve_against_the_parent_constraint() {
        let mut n = LayoutNode::fixed(Length::percent(50.0), Length::px(10.0));
        assert_eq!(n.layout(Constraints::new(200.0, 100.0)), Size::new(100.0, 10.0));

        let mut n = LayoutNode::hstack(vec![LayoutNode::fixed(Length::percent(50.0), 10.0)])
            .with_padding(Spacing::px(10.0));
        n.layout(Constraints::new(200.0, 100.0));
        assert_eq!(rects(&n)[0].width(), 90.0);
    }

    #[test]
    fn em_lengths_use_the_font_size() {
        let mut n = LayoutNode::fixed(Length::em(2.0), Length::em(1.0));
        let c = Constraints::unbounded().with_font_size(12.0);
        assert_eq!(n.layout(c), Size::new(24.0, 12.0));
    }

    #[test]
    fn empty_stack_is_its_padding() {
        let mut n = LayoutNode::vstack(Vec::new()).with_padding(Spacing::px(3.0));
        assert_eq!(n.layout(Constraints::unbounded()), Size::new(6.0, 6.0));
    }

    #[test]
    fn layout_is_idempotent() {
        let mut n = LayoutNode::hstack(vec![
            LayoutNode::fixed(10.0, 20.0).with_margin(Spacing::px(2.0)),
            LayoutNode::vstack(vec![LayoutNode::fixed(3.0, 3.0)]).with_padding(Spacing::px(1.0)),
        ]);
        let c = Constraints::new(25.0, 25.0);
        n.layout(c);
        let first = n.clone();
        n.layout(c);
        assert_eq!(n, first);
    }
}

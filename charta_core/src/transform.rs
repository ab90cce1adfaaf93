// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A single group transform step.
///
/// Kept symbolic (rather than as an affine matrix) so backends can emit the
/// readable form, e.g. SVG `rotate(angle cx cy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Translate by `(x, y)`.
    Translate {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Rotate by `angle` degrees (clockwise on screen) around `(cx, cy)`.
    Rotate {
        /// Angle in degrees.
        angle: f64,
        /// Pivot x.
        cx: f64,
        /// Pivot y.
        cy: f64,
    },
    /// Scale by `(sx, sy)` around the origin.
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
}

impl Transform {
    /// A translation.
    pub fn translate(x: f64, y: f64) -> Self {
        Self::Translate { x, y }
    }

    /// A rotation around a pivot point.
    pub fn rotate(angle: f64, cx: f64, cy: f64) -> Self {
        Self::Rotate { angle, cx, cy }
    }

    /// Applies this transform to a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        match *self {
            Self::Translate { x: dx, y: dy } => (x + dx, y + dy),
            Self::Scale { sx, sy } => (x * sx, y * sy),
            Self::Rotate { angle, cx, cy } => {
                let p = kurbo::Affine::rotate_about(angle.to_radians(), kurbo::Point::new(cx, cy))
                    * kurbo::Point::new(x, y);
                (p.x, p.y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn quarter_turn_about_pivot() {
        let (x, y) = Transform::rotate(90.0, 10.0, 10.0).apply(20.0, 10.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 20.0).abs() < 1e-9);
    }
}

// Copyright 2018 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Range;

use crate::{Point, Rect, Vec2};

/// A single cubic Bézier segment.
///
/// Lines and quadratic Béziers are represented as degree-elevated cubics, see
/// [`CubicBez::from_line`] and [`CubicBez::from_quad`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// A straight line from `p0` to `p1`, with evenly spaced control points.
    pub fn from_line(p0: impl Into<Point>, p1: impl Into<Point>) -> CubicBez {
        let p0 = p0.into();
        let p1 = p1.into();
        CubicBez {
            p0,
            p1: p0.lerp(p1, 1.0 / 3.0),
            p2: p0.lerp(p1, 2.0 / 3.0),
            p3: p1,
        }
    }

    /// Raise a quadratic Bézier to the equivalent cubic.
    pub fn from_quad(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> CubicBez {
        let p0 = p0.into();
        let p1 = p1.into();
        let p2 = p2.into();
        CubicBez {
            p0,
            p1: p0 + (2.0 / 3.0) * (p1 - p0),
            p2: p2 + (2.0 / 3.0) * (p1 - p2),
            p3: p2,
        }
    }

    /// The four control points, in order.
    #[inline]
    pub fn control_points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Evaluate the curve at parameter `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// The derivative at parameter `t`.
    #[inline]
    pub fn deriv_at(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        let d0 = self.p1 - self.p0;
        let d1 = self.p2 - self.p1;
        let d2 = self.p3 - self.p2;
        3.0 * (d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t))
    }

    /// The start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.p0
    }

    /// The end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.p3
    }

    /// Split at parameter `t`, using de Casteljau.
    pub fn subdivide_at(&self, t: f64) -> (CubicBez, CubicBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        (
            CubicBez::new(self.p0, p01, p012, pm),
            CubicBez::new(pm, p123, p23, self.p3),
        )
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    pub fn subdivide(&self) -> (CubicBez, CubicBez) {
        self.subdivide_at(0.5)
    }

    /// Get the part of the curve for the given parameter range.
    ///
    /// A descending range yields the reversed sub-curve.
    pub fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        if t0 > t1 {
            return self.subsegment(t1..t0).reverse();
        }
        if t0 >= 1.0 {
            let p = self.p3;
            return CubicBez::new(p, p, p, p);
        }
        let tail = if t0 > 0.0 {
            self.subdivide_at(t0).1
        } else {
            *self
        };
        if t1 >= 1.0 {
            return tail;
        }
        tail.subdivide_at((t1 - t0) / (1.0 - t0)).0
    }

    /// The same curve, traversed from `p3` to `p0`.
    #[inline]
    #[must_use]
    pub fn reverse(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    /// Bounding box of the control polygon.
    ///
    /// This is conservative: it always contains the curve.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p0, self.p3)
            .union_pt(self.p1)
            .union_pt(self.p2)
    }

    /// Whether every control point is within `accuracy` of `p0`.
    pub fn is_point(&self, accuracy: f64) -> bool {
        self.p1.is_near(self.p0, accuracy)
            && self.p2.is_near(self.p0, accuracy)
            && self.p3.is_near(self.p0, accuracy)
    }

    /// Whether any control point is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.control_points().iter().all(|p| p.is_finite())
    }
}

// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths made of cubic Bézier elements.

use smallvec::SmallVec;

use crate::{CubicBez, Error, Point, Rect, Result, Vec2};

/// Control point distance for approximating a quarter circle of unit radius.
const QUARTER_ARC_K: f64 = 0.552_284_749_830_793_4;

/// A sequence of cubic Béziers, each starting where the previous one ends.
///
/// Element `i` is the `i`-th cubic. A closed path also joins its last element
/// back to its first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicPath {
    elements: Vec<CubicBez>,
    closed: bool,
}

/// A position on a path: element index and parameter on that element.
pub(crate) type PathPos = (usize, f64);

impl CubicPath {
    /// Create an empty, open path.
    #[inline]
    pub fn new() -> CubicPath {
        CubicPath::default()
    }

    /// Create a path from its elements.
    pub fn from_elements(elements: impl IntoIterator<Item = CubicBez>, closed: bool) -> CubicPath {
        CubicPath {
            elements: elements.into_iter().collect(),
            closed,
        }
    }

    /// A circle as four counterclockwise quarter arcs, starting at
    /// `center + (radius, 0)`.
    pub fn circle(center: impl Into<Point>, radius: f64) -> CubicPath {
        let c = center.into();
        let k = QUARTER_ARC_K * radius;
        let quadrant = |u: Vec2| {
            let v = u.turn_90();
            CubicBez::new(
                c + u * radius,
                c + u * radius + v * k,
                c + v * radius + u * k,
                c + v * radius,
            )
        };
        let axes = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
        ];
        CubicPath::from_elements(axes.into_iter().map(quadrant), true)
    }

    /// Append an element.
    pub fn push(&mut self, el: CubicBez) {
        self.elements.push(el);
    }

    /// Mark the path as closed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// The elements of the path.
    #[inline]
    pub fn elements(&self) -> &[CubicBez] {
        &self.elements
    }

    /// The element at index `ix`, if any.
    #[inline]
    pub fn get(&self, ix: usize) -> Option<&CubicBez> {
        self.elements.get(ix)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the path has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether the path is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Evaluate the path at a position.
    pub fn eval(&self, element: usize, t: f64) -> Option<Point> {
        self.get(element).map(|c| c.eval(t))
    }

    /// Union of the element bounding boxes, or `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(CubicBez::bounding_box)
            .reduce(|a, b| a.union(b))
    }

    /// The same path traversed backwards.
    #[must_use]
    pub fn reverse(&self) -> CubicPath {
        CubicPath {
            elements: self.elements.iter().rev().map(CubicBez::reverse).collect(),
            closed: self.closed,
        }
    }

    /// Fail with [`Error::Degenerate`] if any control point is not finite.
    pub fn check_finite(&self) -> Result<()> {
        if self.elements.iter().all(CubicBez::is_finite) {
            Ok(())
        } else {
            Err(Error::Degenerate("non-finite control point"))
        }
    }

    /// The point at `pos`, measured in elements: element `i` covers
    /// `i..i + 1`.
    ///
    /// Closed paths wrap around; open paths clamp to their ends.
    pub(crate) fn eval_along(&self, pos: f64) -> Option<Point> {
        let n = self.elements.len();
        if n == 0 || !pos.is_finite() {
            return None;
        }
        let len = n as f64;
        let pos = if self.closed {
            pos.rem_euclid(len)
        } else {
            pos.clamp(0.0, len)
        };
        let ix = (pos.floor() as usize).min(n - 1);
        Some(self.elements[ix].eval(pos - ix as f64))
    }

    /// Signed distance in elements from `from` to `to`, the short way round
    /// on a closed path.
    pub(crate) fn span(&self, from: PathPos, to: PathPos) -> f64 {
        let d = (to.0 as f64 + to.1) - (from.0 as f64 + from.1);
        let len = self.elements.len() as f64;
        if self.closed && d.abs() > 0.5 * len {
            d - len.copysign(d)
        } else {
            d
        }
    }

    /// The geometry running forward from `from` to `to`.
    ///
    /// On a closed path the walk wraps past the last element when `to` is not
    /// ahead of `from`; equal positions give the whole loop. On an open path
    /// `to` must not be behind `from`.
    pub(crate) fn pieces_between(&self, from: PathPos, to: PathPos) -> SmallVec<[CubicBez; 2]> {
        let mut out = SmallVec::new();
        let n = self.elements.len();
        if n == 0 {
            return out;
        }
        let ahead = from.0 < to.0 || (from.0 == to.0 && from.1 < to.1);
        if ahead && from.0 == to.0 {
            out.push(self.elements[from.0].subsegment(from.1..to.1));
            return out;
        }
        if !ahead && !self.closed {
            return out;
        }
        // first partial element, whole elements in between, last partial
        if from.1 < 1.0 {
            out.push(self.elements[from.0].subsegment(from.1..1.0));
        }
        let mut ix = (from.0 + 1) % n;
        let mut steps = if ahead {
            to.0 - from.0 - 1
        } else {
            n - from.0 - 1 + to.0
        };
        while steps > 0 {
            out.push(self.elements[ix]);
            ix = (ix + 1) % n;
            steps -= 1;
        }
        if to.1 > 0.0 {
            out.push(self.elements[to.0].subsegment(0.0..to.1));
        }
        out
    }
}

// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection points between two paths.

use core::cmp::Ordering;

use crate::{CubicBez, Point};

/// Sine of the crossing angle below which an intersection counts as tangent.
const TANGENT_SINE: f64 = 1e-4;

/// Which of two input paths the "first" role of an [`IntersectionPoint`]
/// refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathTag {
    /// The first role is on the first input path.
    First,
    /// The roles are swapped: the first role is on the second input path.
    Second,
}

impl PathTag {
    /// The other tag.
    #[inline]
    #[must_use]
    pub fn toggled(self) -> PathTag {
        match self {
            PathTag::First => PathTag::Second,
            PathTag::Second => PathTag::First,
        }
    }
}

/// A point where an element of one path meets an element of another.
///
/// The two locations are held in "roles" 1 and 2. Role 1 is the path being
/// cut; the [`PathTag`] records whether that is the first or the second input
/// path, so that the same crossing can be compared from either side.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionPoint {
    element1: usize,
    t1: f64,
    element2: usize,
    t2: f64,
    point: Point,
    tag: PathTag,
    is_tangent: bool,
}

impl IntersectionPoint {
    /// Create an intersection point from its parts.
    pub fn new(
        (element1, t1): (usize, f64),
        (element2, t2): (usize, f64),
        point: Point,
        tag: PathTag,
    ) -> IntersectionPoint {
        IntersectionPoint {
            element1,
            t1,
            element2,
            t2,
            point,
            tag,
            is_tangent: false,
        }
    }

    /// Promote a clipper hit on two curves to an intersection point.
    ///
    /// The location is the midpoint of the two evaluated points, and the
    /// point is marked tangent when the curves meet at a negligible angle.
    pub fn from_curves(
        (element1, c1, t1): (usize, &CubicBez, f64),
        (element2, c2, t2): (usize, &CubicBez, f64),
        tag: PathTag,
    ) -> IntersectionPoint {
        let point = c1.eval(t1).midpoint(c2.eval(t2));
        let is_tangent = match (
            c1.deriv_at(t1).try_normalize(0.0),
            c2.deriv_at(t2).try_normalize(0.0),
        ) {
            (Some(u1), Some(u2)) => u1.cross(u2).abs() < TANGENT_SINE,
            _ => false,
        };
        IntersectionPoint {
            is_tangent,
            ..IntersectionPoint::new((element1, t1), (element2, t2), point, tag)
        }
    }

    /// Builder method for setting the tangency flag.
    pub fn with_tangent(mut self, is_tangent: bool) -> IntersectionPoint {
        self.is_tangent = is_tangent;
        self
    }

    /// Element index on the path in role 1.
    #[inline]
    pub fn element1(&self) -> usize {
        self.element1
    }

    /// Parameter on element 1.
    #[inline]
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// Element index on the path in role 2.
    #[inline]
    pub fn element2(&self) -> usize {
        self.element2
    }

    /// Parameter on element 2.
    #[inline]
    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// The location of the intersection.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    /// Which input path role 1 refers to.
    #[inline]
    pub fn tag(&self) -> PathTag {
        self.tag
    }

    /// Whether the curves touch here rather than cross.
    #[inline]
    pub fn is_tangent(&self) -> bool {
        self.is_tangent
    }

    /// Swap roles 1 and 2, toggling the tag.
    #[must_use]
    pub fn flipped(&self) -> IntersectionPoint {
        IntersectionPoint {
            element1: self.element2,
            t1: self.t2,
            element2: self.element1,
            t2: self.t1,
            tag: self.tag.toggled(),
            ..*self
        }
    }

    /// The same intersection with role 1 on the first input path.
    #[must_use]
    pub fn canonical(&self) -> IntersectionPoint {
        match self.tag {
            PathTag::First => *self,
            PathTag::Second => self.flipped(),
        }
    }

    /// Whether `other` is the same intersection, with parameters within `eps`.
    ///
    /// If the tags differ, `other` is flipped before comparing.
    pub fn matches(&self, other: &IntersectionPoint, eps: f64) -> bool {
        let other = if other.tag == self.tag {
            *other
        } else {
            other.flipped()
        };
        self.element1 == other.element1
            && self.element2 == other.element2
            && (self.t1 - other.t1).abs() <= eps
            && (self.t2 - other.t2).abs() <= eps
    }

    /// Order by position along the path in role 1.
    pub fn cmp_along_first(&self, other: &IntersectionPoint) -> Ordering {
        self.element1
            .cmp(&other.element1)
            .then(self.t1.total_cmp(&other.t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IntersectionPoint {
        IntersectionPoint::new((2, 0.25), (5, 0.75), Point::new(1.0, 2.0), PathTag::First)
    }

    #[test]
    fn flip_swaps_roles() {
        let ix = sample();
        let f = ix.flipped();
        assert_eq!(f.element1(), 5);
        assert_eq!(f.t1(), 0.75);
        assert_eq!(f.element2(), 2);
        assert_eq!(f.t2(), 0.25);
        assert_eq!(f.tag(), PathTag::Second);
        assert_eq!(f.point(), ix.point());
        assert_eq!(f.flipped(), ix);
        assert_eq!(f.canonical(), ix);
    }

    #[test]
    fn matching_is_role_aware() {
        let ix = sample();
        assert!(ix.matches(&ix.flipped(), 0.0));
        assert!(ix.flipped().matches(&ix, 0.0));
        let nudged = IntersectionPoint::new((2, 0.25 + 1e-10), (5, 0.75), ix.point(), PathTag::First);
        assert!(ix.matches(&nudged, 1e-9));
        assert!(!ix.matches(&nudged, 1e-11));
        let other_element = IntersectionPoint::new((3, 0.25), (5, 0.75), ix.point(), PathTag::First);
        assert!(!ix.matches(&other_element, 1.0));
        // a flipped point with the tag reset is a different intersection
        let swapped = IntersectionPoint::new((5, 0.75), (2, 0.25), ix.point(), PathTag::First);
        assert!(!ix.matches(&swapped, 1e-9));
    }

    #[test]
    fn ordering_along_first() {
        let a = IntersectionPoint::new((0, 0.9), (1, 0.0), Point::ZERO, PathTag::First);
        let b = IntersectionPoint::new((1, 0.1), (0, 0.0), Point::ZERO, PathTag::First);
        let c = IntersectionPoint::new((1, 0.5), (0, 0.0), Point::ZERO, PathTag::First);
        let mut v = vec![c, a, b];
        v.sort_by(IntersectionPoint::cmp_along_first);
        assert_eq!(v, vec![a, b, c]);
    }

    #[test]
    fn tangency_from_curves() {
        let arch = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 4.0 / 3.0), (2.0 / 3.0, 4.0 / 3.0), (1.0, 0.0));
        let roof = CubicBez::from_line((0.0, 1.0), (1.0, 1.0));
        let touch = IntersectionPoint::from_curves((0, &arch, 0.5), (0, &roof, 0.5), PathTag::First);
        assert!(touch.is_tangent());
        assert!(touch.point().is_near(Point::new(0.5, 1.0), 1e-12));

        let a = CubicBez::from_line((0.0, 0.0), (1.0, 1.0));
        let b = CubicBez::from_line((0.0, 1.0), (1.0, 0.0));
        let cross = IntersectionPoint::from_curves((0, &a, 0.5), (1, &b, 0.5), PathTag::First);
        assert!(!cross.is_tangent());
        assert_eq!(cross.element2(), 1);
    }
}

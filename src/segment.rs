// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pieces of a path between consecutive intersections.

use core::f64::consts::PI;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::path::PathPos;
use crate::{CubicBez, CubicPath, Error, IntersectionPoint, Point, Result, Vec2};

/// The part of a path between two intersection points.
///
/// A segment remembers the path it was cut from, and whether it has been
/// reversed (traversed from end to start) or flipped (intersection roles
/// swapped). Both transforms return new segments, are their own inverse and
/// commute.
#[derive(Clone, Debug)]
pub struct ClippedSegment {
    start: IntersectionPoint,
    end: IntersectionPoint,
    geometry: SmallVec<[CubicBez; 2]>,
    source: Arc<CubicPath>,
    is_reversed: bool,
    is_flipped: bool,
}

/// Segments joined end to start.
///
/// Each segment's end intersection matches the next one's start. In a closed
/// chain the last end also matches the first start.
#[derive(Clone, Debug, Default)]
pub struct SegmentChain {
    segments: Vec<ClippedSegment>,
}

impl ClippedSegment {
    /// Create a segment running from `start` to `end` along `geometry`.
    ///
    /// Fails with [`Error::DegenerateSegment`] when the segment has no
    /// geometry, or when `start` and `end` are the same intersection and the
    /// geometry has no length. A segment from an intersection all the way
    /// around a closed path back to itself is fine.
    pub fn new(
        start: IntersectionPoint,
        end: IntersectionPoint,
        geometry: impl IntoIterator<Item = CubicBez>,
        source: Arc<CubicPath>,
        eps: f64,
    ) -> Result<ClippedSegment> {
        let geometry: SmallVec<[CubicBez; 2]> = geometry.into_iter().collect();
        if !geometry.iter().all(CubicBez::is_finite) {
            return Err(Error::Degenerate("non-finite segment geometry"));
        }
        if geometry.is_empty()
            || (start.matches(&end, eps) && geometry.iter().all(|c| c.is_point(eps)))
        {
            return Err(Error::DegenerateSegment);
        }
        Ok(ClippedSegment {
            start,
            end,
            geometry,
            source,
            is_reversed: false,
            is_flipped: false,
        })
    }

    /// The intersection the segment starts at.
    #[inline]
    pub fn start(&self) -> &IntersectionPoint {
        &self.start
    }

    /// The intersection the segment ends at.
    #[inline]
    pub fn end(&self) -> &IntersectionPoint {
        &self.end
    }

    /// The curves between the two intersections, in traversal order.
    #[inline]
    pub fn geometry(&self) -> &[CubicBez] {
        &self.geometry
    }

    /// The path this segment was cut from.
    #[inline]
    pub fn source(&self) -> &Arc<CubicPath> {
        &self.source
    }

    /// Whether the segment runs against its source path's direction.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    /// Whether the intersection roles are swapped.
    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// The point where the segment starts.
    pub fn start_point(&self) -> Point {
        self.geometry[0].start()
    }

    /// The point where the segment ends.
    pub fn end_point(&self) -> Point {
        self.geometry[self.geometry.len() - 1].end()
    }

    /// A point halfway through the segment's pieces.
    ///
    /// This is the same point for a segment and its reverse.
    pub fn middle_point(&self) -> Point {
        let n = self.geometry.len();
        if n % 2 == 1 {
            self.geometry[n / 2].eval(0.5)
        } else {
            self.geometry[n / 2].start()
        }
    }

    /// Whether this segment's end is `other`'s start.
    pub fn can_be_prepended_to(&self, other: &ClippedSegment, eps: f64) -> bool {
        self.end.matches(&other.start, eps)
    }

    /// Join this segment in front of `other`.
    ///
    /// Geometry isn't merged; the result just records that the two can be
    /// walked in order.
    pub fn prepend_to(&self, other: &ClippedSegment, eps: f64) -> Result<SegmentChain> {
        if !self.can_be_prepended_to(other, eps) {
            return Err(Error::NotPrependable);
        }
        Ok(SegmentChain {
            segments: vec![self.clone(), other.clone()],
        })
    }

    /// The same segment with intersection roles swapped. Direction is
    /// unchanged.
    #[must_use]
    pub fn flipped_segment(&self) -> ClippedSegment {
        ClippedSegment {
            start: self.start.flipped(),
            end: self.end.flipped(),
            is_flipped: !self.is_flipped,
            ..self.clone()
        }
    }

    /// The same segment traversed the other way.
    #[must_use]
    pub fn reversed_segment(&self) -> ClippedSegment {
        ClippedSegment {
            start: self.end,
            end: self.start,
            geometry: self.geometry.iter().rev().map(CubicBez::reverse).collect(),
            source: self.source.clone(),
            is_reversed: !self.is_reversed,
            is_flipped: self.is_flipped,
        }
    }

    /// Unit tangent where the segment starts.
    pub fn start_vector(&self) -> Vec2 {
        start_tangent(&self.geometry[0])
    }

    /// Unit tangent where the segment ends, pointing along the direction of
    /// travel.
    pub fn end_vector(&self) -> Vec2 {
        -start_tangent(&self.geometry[self.geometry.len() - 1].reverse())
    }

    /// The signed turn, in `(-π, π]`, from this segment's end tangent to
    /// `other`'s start tangent. Positive is counterclockwise.
    pub fn angle_between(&self, other: &ClippedSegment) -> f64 {
        let angle = self.end_vector().angle_to(other.start_vector());
        if angle <= -PI {
            PI
        } else {
            angle
        }
    }

    /// Whether `other` is the same piece of the same path.
    ///
    /// Source paths are compared by identity. Intersections are compared in
    /// canonical roles and in either order, so reversing or flipping a segment
    /// doesn't change what it is equal to.
    pub fn is_equal_to_segment(&self, other: &ClippedSegment, eps: f64) -> bool {
        if !Arc::ptr_eq(&self.source, &other.source) {
            return false;
        }
        let (a0, a1) = (self.start.canonical(), self.end.canonical());
        let (b0, b1) = (other.start.canonical(), other.end.canonical());
        let same_ends = (a0.matches(&b0, eps) && a1.matches(&b1, eps))
            || (a0.matches(&b1, eps) && a1.matches(&b0, eps));
        same_ends && self.middle_point().is_near(other.middle_point(), eps)
    }
}

/// The direction a curve leaves its start point.
///
/// The derivative vanishes when `p1 == p0`; then the next distinct control
/// point gives the direction, then the chord.
fn start_tangent(c: &CubicBez) -> Vec2 {
    c.deriv_at(0.0)
        .try_normalize(0.0)
        .or_else(|| (c.p2 - c.p0).try_normalize(0.0))
        .or_else(|| (c.p3 - c.p0).try_normalize(0.0))
        .unwrap_or(Vec2::ZERO)
}

impl SegmentChain {
    /// A chain of one segment.
    pub fn from_segment(segment: ClippedSegment) -> SegmentChain {
        SegmentChain {
            segments: vec![segment],
        }
    }

    /// Append a segment, which must start where the chain ends.
    pub fn push(&mut self, segment: ClippedSegment, eps: f64) -> Result<()> {
        if let Some(last) = self.segments.last() {
            if !last.can_be_prepended_to(&segment, eps) {
                return Err(Error::NotPrependable);
            }
        }
        self.segments.push(segment);
        Ok(())
    }

    /// The segments, in walking order.
    #[inline]
    pub fn segments(&self) -> &[ClippedSegment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chain has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The intersection the chain starts at.
    pub fn start(&self) -> Option<&IntersectionPoint> {
        self.segments.first().map(ClippedSegment::start)
    }

    /// The intersection the chain ends at.
    pub fn end(&self) -> Option<&IntersectionPoint> {
        self.segments.last().map(ClippedSegment::end)
    }

    /// Whether the chain ends where it started.
    pub fn is_closed(&self, eps: f64) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => end.matches(start, eps),
            _ => false,
        }
    }

    /// The geometry of all segments, concatenated into one path.
    pub fn to_path(&self, eps: f64) -> CubicPath {
        CubicPath::from_elements(
            self.segments
                .iter()
                .flat_map(|s| s.geometry().iter().copied()),
            self.is_closed(eps),
        )
    }
}

/// Cut a path into segments at the given intersections.
///
/// Role 1 of each intersection must refer to `path`. Intersections are sorted
/// along the path and duplicates are dropped. Each pair of neighbors gives one
/// segment; a closed path also gets the segment that wraps from the last
/// intersection back to the first, which is the whole loop if there is only
/// one. On an open path the pieces before the first and after the last
/// intersection are not bounded by intersections and are left out.
pub fn cut_path_at_intersections(
    path: &Arc<CubicPath>,
    intersections: &[IntersectionPoint],
    eps: f64,
) -> Result<Vec<ClippedSegment>> {
    path.check_finite()?;
    let mut ixs: Vec<IntersectionPoint> = intersections
        .iter()
        .filter(|ix| ix.element1() < path.len())
        .copied()
        .collect();
    ixs.sort_by(IntersectionPoint::cmp_along_first);
    ixs.dedup_by(|b, a| a.element1() == b.element1() && (a.t1() - b.t1()).abs() <= eps);

    let pos = |ix: &IntersectionPoint| -> PathPos { (ix.element1(), ix.t1()) };
    let n = ixs.len();
    let pairs = match (n, path.is_closed()) {
        (0, _) => 0,
        (_, true) => n,
        (_, false) => n - 1,
    };
    let mut segments = Vec::with_capacity(pairs);
    for i in 0..pairs {
        let (a, b) = (ixs[i], ixs[(i + 1) % n]);
        let geometry = path.pieces_between(pos(&a), pos(&b));
        segments.push(ClippedSegment::new(a, b, geometry, path.clone(), eps)?);
    }
    Ok(segments)
}

// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reassembling clipped segments into closed loops.
//!
//! Segments are edges of a directed multigraph whose nodes are intersection
//! points. Walking from a segment's end, the next edge is the candidate that
//! turns by the smallest signed angle, which keeps the winding consistent.

use crate::{ClippedSegment, Error, Result, SegmentChain, DEFAULT_TOLERANCE};

/// Options for [`stitch_closed_paths`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StitchOptions {
    /// Tolerance for matching intersection points.
    pub epsilon: f64,
    /// Whether a segment may also be walked backwards.
    pub allow_reversed: bool,
}

/// The result of stitching.
#[derive(Clone, Debug, Default)]
pub struct Stitched {
    /// Chains that returned to their start.
    pub closed: Vec<SegmentChain>,
    /// Chains that ran out of continuations.
    pub open: Vec<SegmentChain>,
}

/// Walks a pool of segments into chains.
///
/// Each segment is used at most once, in either direction when reversal is
/// allowed.
#[derive(Clone, Debug)]
pub struct Stitcher {
    pool: Vec<ClippedSegment>,
    used: Vec<bool>,
    options: StitchOptions,
}

impl Default for StitchOptions {
    fn default() -> Self {
        StitchOptions {
            epsilon: DEFAULT_TOLERANCE,
            allow_reversed: false,
        }
    }
}

impl StitchOptions {
    /// Builder method for setting the matching tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method for allowing segments to be walked backwards.
    pub fn with_reversed(mut self, allow_reversed: bool) -> Self {
        self.allow_reversed = allow_reversed;
        self
    }
}

impl Stitched {
    /// Whether every segment ended up in a closed loop.
    pub fn is_complete(&self) -> bool {
        self.open.is_empty()
    }

    /// The closed loops, or [`Error::InconsistentSegmentSet`] carrying the open
    /// chains if there are any.
    pub fn into_loops(self) -> Result<Vec<SegmentChain>> {
        if self.open.is_empty() {
            Ok(self.closed)
        } else {
            Err(Error::InconsistentSegmentSet { open: self.open })
        }
    }
}

impl Stitcher {
    /// Create a stitcher over `segments`.
    ///
    /// Segments equal to an earlier one (see
    /// [`ClippedSegment::is_equal_to_segment`]) are dropped.
    pub fn new(segments: Vec<ClippedSegment>, options: &StitchOptions) -> Stitcher {
        let mut pool: Vec<ClippedSegment> = Vec::with_capacity(segments.len());
        for seg in segments {
            if pool
                .iter()
                .any(|s| s.is_equal_to_segment(&seg, options.epsilon))
            {
                log::debug!("dropping duplicate segment at {:?}", seg.start_point());
                continue;
            }
            pool.push(seg);
        }
        Stitcher {
            used: vec![false; pool.len()],
            pool,
            options: *options,
        }
    }

    /// Number of segments not yet walked.
    pub fn remaining(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }

    /// Walk one chain, starting from the earliest unused segment.
    ///
    /// Returns the chain and whether it closed, or `None` once every segment
    /// has been used.
    pub fn next_chain(&mut self) -> Option<(SegmentChain, bool)> {
        let first = self.used.iter().position(|u| !*u)?;
        self.used[first] = true;
        let eps = self.options.epsilon;
        let mut current = self.pool[first].clone();
        let origin = *current.start();
        let mut chain = SegmentChain::from_segment(current.clone());
        loop {
            if current.end().matches(&origin, eps) {
                return Some((chain, true));
            }
            let candidates = self.candidates(&current);
            let forms: Vec<ClippedSegment> =
                candidates.iter().map(|(_, seg)| seg.clone()).collect();
            let Some(choice) = select_next(&current, &forms) else {
                return Some((chain, false));
            };
            let (ix, next) = candidates.into_iter().nth(choice)?;
            self.used[ix] = true;
            // candidates start where the chain ends, so this can't fail
            if chain.push(next.clone(), eps).is_err() {
                return Some((chain, false));
            }
            current = next;
        }
    }

    /// Walk every segment.
    pub fn run(mut self) -> Stitched {
        let mut out = Stitched::default();
        while let Some((chain, closed)) = self.next_chain() {
            if closed {
                out.closed.push(chain);
            } else {
                out.open.push(chain);
            }
        }
        log::debug!(
            "stitched {} closed and {} open chain(s)",
            out.closed.len(),
            out.open.len()
        );
        if !out.open.is_empty() {
            log::warn!("{} chain(s) could not be closed", out.open.len());
        }
        out
    }

    /// Unused segments, in pool order, that can follow `current`.
    fn candidates(&self, current: &ClippedSegment) -> Vec<(usize, ClippedSegment)> {
        let eps = self.options.epsilon;
        let mut out = Vec::new();
        for (ix, seg) in self.pool.iter().enumerate() {
            if self.used[ix] {
                continue;
            }
            if current.can_be_prepended_to(seg, eps) {
                out.push((ix, seg.clone()));
            }
            if self.options.allow_reversed {
                let rev = seg.reversed_segment();
                if current.can_be_prepended_to(&rev, eps) {
                    out.push((ix, rev));
                }
            }
        }
        out
    }
}

/// Choose the continuation of `current` among `candidates`.
///
/// The winner turns by the smallest signed angle from `current`'s end, that is
/// the sharpest turn clockwise. Exact ties go to the earliest candidate.
pub fn select_next(current: &ClippedSegment, candidates: &[ClippedSegment]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (ix, seg) in candidates.iter().enumerate() {
        let angle = current.angle_between(seg);
        if best.map_or(true, |(_, a)| angle < a) {
            best = Some((ix, angle));
        }
    }
    best.map(|(ix, _)| ix)
}

/// Stitch segments into closed loops.
///
/// Chains that can't be closed are returned in [`Stitched::open`]; they mean
/// the segment set was inconsistent.
pub fn stitch_closed_paths(segments: Vec<ClippedSegment>, options: &StitchOptions) -> Stitched {
    Stitcher::new(segments, options).run()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{cut_path_at_intersections, CubicBez, CubicPath, IntersectionPoint, PathTag, Point};

    const EPS: f64 = 1e-9;

    fn ix(element1: usize, element2: usize, p: (f64, f64)) -> IntersectionPoint {
        IntersectionPoint::new((element1, 0.5), (element2, 0.5), p.into(), PathTag::First)
    }

    fn line_seg(a: IntersectionPoint, b: IntersectionPoint, src: &Arc<CubicPath>) -> ClippedSegment {
        let geometry = [CubicBez::from_line(a.point(), b.point())];
        ClippedSegment::new(a, b, geometry, src.clone(), EPS).unwrap()
    }

    #[test]
    fn picks_sharpest_turn() {
        let src = Arc::new(CubicPath::new());
        let o = ix(0, 0, (0.0, 0.0));
        let w = ix(1, 0, (-1.0, 0.0));
        let n = ix(2, 0, (0.0, 1.0));
        let e = ix(3, 0, (1.0, 0.0));
        let s = ix(4, 0, (0.0, -1.0));
        // arriving at the origin heading east
        let incoming = line_seg(w, o, &src);
        let left = line_seg(o, n, &src);
        let ahead = line_seg(o, e, &src);
        let right = line_seg(o, s, &src);
        let all = [left.clone(), ahead.clone(), right];
        assert_eq!(select_next(&incoming, &all), Some(2));
        assert_eq!(select_next(&incoming, &[left.clone(), ahead.clone()]), Some(1));
        // exact tie keeps the first
        assert_eq!(select_next(&incoming, &[ahead.clone(), ahead]), Some(0));
        assert_eq!(select_next(&incoming, &[]), None);
    }

    fn square_path() -> Arc<CubicPath> {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        Arc::new(CubicPath::from_elements(
            (0..4).map(|i| CubicBez::from_line(pts[i], pts[(i + 1) % 4])),
            true,
        ))
    }

    fn cut(path: &Arc<CubicPath>, at: &[(usize, f64)]) -> Vec<ClippedSegment> {
        let ixs: Vec<_> = at
            .iter()
            .enumerate()
            .map(|(k, &(e, t))| {
                let p = path.eval(e, t).unwrap_or(Point::ZERO);
                IntersectionPoint::new((e, t), (k, 0.0), p, PathTag::First)
            })
            .collect();
        cut_path_at_intersections(path, &ixs, EPS).unwrap()
    }

    #[test]
    fn single_path_recloses() {
        let sq = square_path();
        let segs = cut(&sq, &[(0, 0.5), (1, 0.5), (2, 0.5)]);
        assert_eq!(segs.len(), 3);
        let stitched = stitch_closed_paths(segs, &StitchOptions::default());
        assert!(stitched.is_complete());
        let loops = stitched.into_loops().unwrap();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert!(loops[0].is_closed(EPS));
        assert_eq!(loops[0].to_path(EPS).len(), 7);
    }

    #[test]
    fn duplicates_are_used_once() {
        let sq = square_path();
        let segs = cut(&sq, &[(0, 0.5), (2, 0.5)]);
        let doubled: Vec<_> = segs.iter().chain(segs.iter()).cloned().collect();
        let mut stitcher = Stitcher::new(doubled, &StitchOptions::default());
        assert_eq!(stitcher.remaining(), 2);
        let (chain, closed) = stitcher.next_chain().unwrap();
        assert!(closed);
        assert_eq!(chain.len(), 2);
        assert_eq!(stitcher.remaining(), 0);
        assert!(stitcher.next_chain().is_none());
    }

    #[test]
    fn dangling_chain_is_reported() {
        let sq = square_path();
        let mut segs = cut(&sq, &[(0, 0.5), (1, 0.5), (2, 0.5)]);
        segs.remove(1);
        let stitched = stitch_closed_paths(segs, &StitchOptions::default());
        assert!(stitched.closed.is_empty());
        assert_eq!(stitched.open.len(), 2);
        match stitched.into_loops() {
            Err(Error::InconsistentSegmentSet { open }) => {
                assert_eq!(open.iter().map(SegmentChain::len).sum::<usize>(), 2);
            }
            other => panic!("expected open chains, got {other:?}"),
        }
    }

    #[test]
    fn reversed_segments_close_loops() {
        let sq = square_path();
        let segs = cut(&sq, &[(0, 0.5), (2, 0.5)]);
        // one half walked backwards: both halves now run from the same start
        let input = vec![segs[0].clone(), segs[1].reversed_segment()];
        let strict = stitch_closed_paths(input.clone(), &StitchOptions::default());
        assert_eq!(strict.open.len(), 2);

        let loose = stitch_closed_paths(input, &StitchOptions::default().with_reversed(true));
        assert!(loose.is_complete());
        assert_eq!(loose.closed.len(), 1);
        let chain = &loose.closed[0];
        assert_eq!(chain.len(), 2);
        // walking the backwards half in reverse restores the path's direction
        assert!(!chain.segments()[1].is_reversed());
        assert!(chain.segments()[1].is_equal_to_segment(&segs[1], EPS));
    }
}

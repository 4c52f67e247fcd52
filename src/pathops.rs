// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path operations: intersect two paths, cut them, stitch the pieces.

use std::sync::Arc;

use crate::{
    cut_path_at_intersections, stitch_closed_paths, Clipper, CubicPath, Error, IntersectionPoint,
    PathTag, Point, Result, StitchOptions, Stitched,
};

const JOINT_SLACK: f64 = 4.0;

/// Find all intersections between two paths.
///
/// Every pair of elements whose bounding boxes overlap is clipped. Hits are
/// promoted to [`IntersectionPoint`]s with role 1 on `a` and tag
/// [`PathTag::First`]. A hit at the joint between two elements is moved to
/// the start of the later element, so it is reported once. Hits found by
/// different element pairs that belong to one contact, such as a tangency at
/// a joint, are merged. The result is sorted along `a`.
pub fn intersect_paths(
    a: &CubicPath,
    b: &CubicPath,
    clipper: &Clipper,
) -> Result<Vec<IntersectionPoint>> {
    a.check_finite()?;
    b.check_finite()?;
    let eps = clipper.tolerance();
    let mut out: Vec<IntersectionPoint> = Vec::new();
    for (i, ca) in a.elements().iter().enumerate() {
        let box_a = ca.bounding_box().inflate(eps);
        for (j, cb) in b.elements().iter().enumerate() {
            if !box_a.overlaps(&cb.bounding_box()) {
                continue;
            }
            let outcome = clipper.clip(ca, cb);
            if let Some((t1, t2, depth)) = outcome.undetermined.into_iter().next() {
                log::warn!("elements {i} and {j} could not be resolved");
                return Err(Error::RecursionLimitExceeded { depth, t1, t2 });
            }
            for (t1, t2) in outcome.hits {
                let ix = IntersectionPoint::from_curves((i, ca, t1), (j, cb, t2), PathTag::First);
                let (e1, t1) = at_joint(a, i, t1, ix.point(), eps);
                let (e2, t2) = at_joint(b, j, t2, ix.point(), eps);
                let ix = IntersectionPoint::new((e1, t1), (e2, t2), ix.point(), PathTag::First)
                    .with_tangent(ix.is_tangent());
                let same = out
                    .iter_mut()
                    .find(|o| o.matches(&ix, eps) || same_contact(a, b, o, &ix, eps));
                match same {
                    Some(old) => {
                        if gap(a, b, &ix) < gap(a, b, old) {
                            log::trace!("merging {:?} into {:?}", old.point(), ix.point());
                            *old = ix;
                        }
                    }
                    None => out.push(ix),
                }
            }
        }
    }
    out.sort_by(IntersectionPoint::cmp_along_first);
    log::debug!("{} intersection(s) between paths", out.len());
    Ok(out)
}

/// Whether two hits are one contact: the paths stay within tolerance of each
/// other all along the short way between them.
///
/// Each element pair meeting at a tangent joint reports its own hit, a little
/// way off the joint.
fn same_contact(
    a: &CubicPath,
    b: &CubicPath,
    x: &IntersectionPoint,
    y: &IntersectionPoint,
    eps: f64,
) -> bool {
    let (xa, xb) = ((x.element1(), x.t1()), (x.element2(), x.t2()));
    let (ya, yb) = ((y.element1(), y.t1()), (y.element2(), y.t2()));
    let (da, db) = (a.span(xa, ya), b.span(xb, yb));
    let (sa, sb) = (xa.0 as f64 + xa.1, xb.0 as f64 + xb.1);
    (1..4).all(|k| {
        let s = k as f64 / 4.0;
        match (a.eval_along(sa + da * s), b.eval_along(sb + db * s)) {
            (Some(p), Some(q)) => p.is_near(q, 4.0 * eps),
            _ => false,
        }
    })
}

/// Distance between the two sides of a hit.
fn gap(a: &CubicPath, b: &CubicPath, ix: &IntersectionPoint) -> f64 {
    match (a.eval(ix.element1(), ix.t1()), b.eval(ix.element2(), ix.t2())) {
        (Some(p), Some(q)) => p.distance(q),
        _ => f64::INFINITY,
    }
}

/// Normalize a position that sits on the joint between two elements.
///
/// The end of an element becomes the start of the next one; on a closed path
/// the end of the last element becomes the start of the first.
fn at_joint(path: &CubicPath, element: usize, t: f64, at: Point, eps: f64) -> (usize, f64) {
    let n = path.len();
    let Some(curve) = path.get(element) else {
        return (element, t);
    };
    // clipped hits are only within tolerance of the true point
    let near = JOINT_SLACK * eps;
    if curve.start().is_near(at, near) {
        return (element, 0.0);
    }
    if curve.end().is_near(at, near) {
        if element + 1 < n {
            return (element + 1, 0.0);
        }
        if path.is_closed() {
            return (0, 0.0);
        }
        return (element, 1.0);
    }
    (element, t)
}

/// Cut two paths at their intersections and stitch the pieces into loops.
///
/// Segments of `b` are flipped so that every segment has role 1 on `a`, which
/// lets segments of both paths meet at the same intersection points.
pub fn clip_paths(
    a: &Arc<CubicPath>,
    b: &Arc<CubicPath>,
    clipper: &Clipper,
    options: &StitchOptions,
) -> Result<Stitched> {
    let hits = intersect_paths(a, b, clipper)?;
    let eps = options.epsilon;
    let mut segments = cut_path_at_intersections(a, &hits, eps)?;
    let flipped: Vec<IntersectionPoint> = hits.iter().map(IntersectionPoint::flipped).collect();
    segments.extend(
        cut_path_at_intersections(b, &flipped, eps)?
            .iter()
            .map(|s| s.flipped_segment()),
    );
    Ok(stitch_closed_paths(segments, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CubicBez;

    fn square(x0: f64, y0: f64, size: f64) -> CubicPath {
        let pts = [
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ];
        CubicPath::from_elements(
            (0..4).map(|i| CubicBez::from_line(pts[i], pts[(i + 1) % 4])),
            true,
        )
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let hits = intersect_paths(&a, &b, &Clipper::default()).unwrap();
        assert_eq!(hits.len(), 2, "{hits:?}");
        assert!(hits[0].point().is_near(Point::new(2.0, 1.0), 1e-6));
        assert!(hits[1].point().is_near(Point::new(1.0, 2.0), 1e-6));
        assert!(hits.iter().all(|h| h.tag() == PathTag::First && !h.is_tangent()));

        let stitched = clip_paths(
            &Arc::new(a),
            &Arc::new(b),
            &Clipper::default(),
            &StitchOptions::default(),
        )
        .unwrap();
        assert!(stitched.is_complete());
        assert_eq!(stitched.closed.len(), 2);
        assert_eq!(stitched.closed.iter().map(|c| c.len()).sum::<usize>(), 4);
    }

    #[test]
    fn joint_hits_are_reported_once() {
        // b's corner sits exactly on a's corner at (2, 2)
        let a = square(0.0, 0.0, 2.0);
        let b = CubicPath::from_elements(
            [
                CubicBez::from_line((1.0, 3.0), (2.0, 2.0)),
                CubicBez::from_line((2.0, 2.0), (3.0, 3.0)),
            ],
            false,
        );
        let hits = intersect_paths(&a, &b, &Clipper::default()).unwrap();
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert_eq!(hits[0].element1(), 2);
        assert_eq!(hits[0].t1(), 0.0);
        assert_eq!(hits[0].element2(), 1);
        assert_eq!(hits[0].t2(), 0.0);
    }

    #[test]
    fn tangent_circles_touch_once_at_joint() {
        // (1, 0) is the joint between a's last and first quarter arcs
        let a = CubicPath::circle((0.0, 0.0), 1.0);
        let b = CubicPath::circle((2.0, 0.0), 1.0);
        let hits = intersect_paths(&a, &b, &Clipper::default()).unwrap();
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert!(hits[0].is_tangent());
        assert!(hits[0].point().is_near(Point::new(1.0, 0.0), 1e-4));
    }

    #[test]
    fn crossings_stay_apart() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        let hits = intersect_paths(&a, &b, &Clipper::default()).unwrap();
        assert!(!same_contact(&a, &b, &hits[0], &hits[1], 1e-9));
        assert!(same_contact(&a, &b, &hits[0], &hits[0], 1e-9));
    }

    #[test]
    fn disjoint_paths() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(5.0, 5.0, 1.0);
        assert!(intersect_paths(&a, &b, &Clipper::default()).unwrap().is_empty());
        let stitched = clip_paths(
            &Arc::new(a),
            &Arc::new(b),
            &Clipper::default(),
            &StitchOptions::default(),
        )
        .unwrap();
        assert!(stitched.closed.is_empty() && stitched.open.is_empty());
    }

    #[test]
    fn non_finite_input_rejected() {
        let a = square(0.0, 0.0, 1.0);
        let bad = CubicBez::from_line((0.0, 0.0), (f64::INFINITY, 1.0));
        let b = CubicPath::from_elements([bad], false);
        assert!(matches!(
            intersect_paths(&a, &b, &Clipper::default()),
            Err(Error::Degenerate(_))
        ));
    }
}

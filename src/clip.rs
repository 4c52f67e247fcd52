// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve/curve intersection by Bézier clipping.
//!
//! Each round narrows the parameter interval of one curve to the part whose
//! convex hull lies inside the other curve's [`FatLine`], then swaps roles.
//! Pending work is an explicit list of interval pairs, so depth and total
//! work are bounded.
//!
//! See T. W. Sederberg and T. Nishita, "Curve intersection using Bézier
//! clipping", Computer-Aided Design 22(9), 1990.

use core::ops::Range;

use arrayvec::ArrayVec;

use crate::{convex_hull, CubicBez, Error, FatLine, Point, Result};

/// Default spatial tolerance for intersections.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default maximum number of clip rounds along one branch.
pub const DEFAULT_MAX_DEPTH: u32 = 128;

/// Default shrink ratio at or above which a round counts as stalled.
pub const DEFAULT_STALL_RATIO: f64 = 0.8;

/// Default number of consecutive stalled rounds before both curves are
/// bisected.
pub const DEFAULT_STALL_ROUNDS: u32 = 2;

/// Default cap on the number of interval pairs created by bisection.
pub const DEFAULT_MAX_TASKS: usize = 4096;

/// Configuration for curve/curve intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clipper {
    tolerance: f64,
    max_depth: u32,
    stall_ratio: f64,
    stall_rounds: u32,
    max_tasks: usize,
}

/// The result of clipping two curves.
#[derive(Clone, Debug, Default)]
pub struct ClipOutcome {
    /// Parameter pairs `(t1, t2)` with `curve1.eval(t1) ≈ curve2.eval(t2)`,
    /// sorted by `t1`.
    pub hits: Vec<(f64, f64)>,
    /// Interval pairs that were abandoned at a depth or work limit, with the
    /// depth they reached. Nothing is known about intersections in them.
    pub undetermined: Vec<(Range<f64>, Range<f64>, u32)>,
    /// Number of clip rounds run.
    pub rounds: usize,
}

#[derive(Clone, Debug)]
struct Task {
    d1: Range<f64>,
    d2: Range<f64>,
    depth: u32,
    stalled: u32,
}

enum Step {
    Pruned,
    Converged(f64, f64),
    Narrowed(Task),
    Split(Task),
}

impl Default for Clipper {
    fn default() -> Self {
        Clipper::new(DEFAULT_TOLERANCE)
    }
}

impl Clipper {
    /// A clipper with the given spatial tolerance and default limits.
    pub fn new(tolerance: f64) -> Self {
        Clipper {
            tolerance,
            max_depth: DEFAULT_MAX_DEPTH,
            stall_ratio: DEFAULT_STALL_RATIO,
            stall_rounds: DEFAULT_STALL_ROUNDS,
            max_tasks: DEFAULT_MAX_TASKS,
        }
    }

    /// Builder method for setting the spatial tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method for setting the maximum number of rounds on one branch.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method for setting the stall ratio.
    ///
    /// A round whose parameter intervals all keep at least this fraction of
    /// their width makes no real progress.
    pub fn with_stall_ratio(mut self, ratio: f64) -> Self {
        self.stall_ratio = ratio;
        self
    }

    /// Builder method for setting how many stalled rounds in a row trigger a
    /// bisection.
    pub fn with_stall_rounds(mut self, rounds: u32) -> Self {
        self.stall_rounds = rounds.max(1);
        self
    }

    /// Builder method for capping the interval pairs created by bisection.
    pub fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = max_tasks;
        self
    }

    /// The spatial tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Find all intersections of two curves.
    ///
    /// Regions where clipping hit a limit are listed in
    /// [`ClipOutcome::undetermined`] rather than guessed at.
    pub fn clip(&self, c1: &CubicBez, c2: &CubicBez) -> ClipOutcome {
        let mut outcome = ClipOutcome::default();
        let tol = self.effective_tolerance(c1, c2);
        if !c1.bounding_box().inflate(tol).overlaps(&c2.bounding_box()) {
            return outcome;
        }

        let mut work = vec![Task {
            d1: 0.0..1.0,
            d2: 0.0..1.0,
            depth: 0,
            stalled: 0,
        }];
        let mut created = 1;
        let mut raw = Vec::new();
        while let Some(task) = work.pop() {
            if task.depth > self.max_depth {
                log::warn!(
                    "clipping gave up at depth {} on {:?} x {:?}",
                    task.depth,
                    task.d1,
                    task.d2
                );
                outcome.undetermined.push((task.d1, task.d2, task.depth));
                continue;
            }
            outcome.rounds += 1;
            match self.step(c1, c2, &task, tol) {
                Step::Pruned => {}
                Step::Converged(t1, t2) => raw.push((t1, t2)),
                Step::Narrowed(next) => work.push(next),
                Step::Split(task) => {
                    let halves = bisect(c1, c2, &task, tol);
                    if created + halves.len() > self.max_tasks {
                        log::warn!(
                            "clipping ran out of work budget on {:?} x {:?}",
                            task.d1,
                            task.d2
                        );
                        outcome.undetermined.push((task.d1, task.d2, task.depth));
                        continue;
                    }
                    log::debug!(
                        "stalled at depth {}, bisecting {:?} x {:?}",
                        task.depth,
                        task.d1,
                        task.d2
                    );
                    created += halves.len();
                    work.extend(halves);
                }
            }
        }
        outcome.hits = merge_hits(c1, c2, raw, tol);
        log::trace!(
            "{} intersection(s) in {} rounds",
            outcome.hits.len(),
            outcome.rounds
        );
        outcome
    }

    // Never smaller than what the coordinates can resolve.
    fn effective_tolerance(&self, c1: &CubicBez, c2: &CubicBez) -> f64 {
        let b = c1.bounding_box().union(c2.bounding_box());
        let scale = b.x0.abs().max(b.y0.abs()).max(b.x1.abs()).max(b.y1.abs());
        self.tolerance.max(scale * 1e-12).max(f64::EPSILON)
    }

    fn step(&self, c1: &CubicBez, c2: &CubicBez, task: &Task, tol: f64) -> Step {
        let mut d1 = task.d1.clone();
        let mut d2 = task.d2.clone();
        let mut sub1 = c1.subsegment(d1.clone());
        let sub2 = c2.subsegment(d2.clone());
        if !sub1.bounding_box().inflate(tol).overlaps(&sub2.bounding_box()) {
            return Step::Pruned;
        }
        let small1 = sub1.bounding_box().diagonal() <= tol;
        let small2 = sub2.bounding_box().diagonal() <= tol;
        if small1 && small2 {
            return Step::Converged(mid(&d1), mid(&d2));
        }

        let slack = CLIP_SLACK * tol;
        let mut ratio = f64::INFINITY;
        if !small1 {
            let Some((lo, hi)) = clip_interval(&sub1, &sub2, tol, slack) else {
                return Step::Pruned;
            };
            d1 = lerp(&d1, lo)..lerp(&d1, hi);
            sub1 = c1.subsegment(d1.clone());
            ratio = ratio.min(hi - lo);
        }
        if !small2 {
            let Some((lo, hi)) = clip_interval(&sub2, &sub1, tol, slack) else {
                return Step::Pruned;
            };
            d2 = lerp(&d2, lo)..lerp(&d2, hi);
            ratio = ratio.min(hi - lo);
        }

        let stalled = if ratio >= self.stall_ratio {
            task.stalled + 1
        } else {
            0
        };
        if stalled < self.stall_rounds {
            return Step::Narrowed(Task {
                d1,
                d2,
                depth: task.depth + 1,
                stalled,
            });
        }
        let sub2 = c2.subsegment(d2.clone());
        if in_flat_contact(&sub1, &sub2, tol) {
            return Step::Converged(mid(&d1), mid(&d2));
        }
        // bisect takes the depth step
        Step::Split(Task {
            d1,
            d2,
            depth: task.depth,
            stalled,
        })
    }
}

/// Find all intersections of two curves, as `(t1, t2)` parameter pairs.
///
/// Fails with [`Error::RecursionLimitExceeded`] if some region couldn't be
/// resolved, which happens for curves that overlap along a stretch.
pub fn find_intersections(
    c1: &CubicBez,
    c2: &CubicBez,
    tolerance: f64,
) -> Result<Vec<(f64, f64)>> {
    Clipper::new(tolerance).clip(c1, c2).into_result()
}

impl ClipOutcome {
    /// Whether every region was resolved.
    pub fn is_complete(&self) -> bool {
        self.undetermined.is_empty()
    }

    /// The hits, or an error naming the first undetermined region.
    pub fn into_result(self) -> Result<Vec<(f64, f64)>> {
        match self.undetermined.into_iter().next() {
            None => Ok(self.hits),
            Some((t1, t2, depth)) => Err(Error::RecursionLimitExceeded { depth, t1, t2 }),
        }
    }
}

/// Fraction of the tolerance added to each side of a fat line when clipping.
const CLIP_SLACK: f64 = 0.25;

/// Narrow `target` to the parameter range that can meet `other`.
///
/// Returns `None` if `target` provably misses `other`. The range is with
/// respect to `target`'s own `0..1` parameterization.
fn clip_interval(target: &CubicBez, other: &CubicBez, tol: f64, slack: f64) -> Option<(f64, f64)> {
    let mut lo: f64 = 0.0;
    let mut hi: f64 = 1.0;
    for line in [
        FatLine::from_cubic(other, tol),
        FatLine::perpendicular(other, tol),
    ] {
        let hull = convex_hull(&line.distance_polygon(target));
        let (a, b) = hull_strip_interval(&hull, line.d_min - slack, line.d_max + slack)?;
        lo = lo.max(a);
        hi = hi.min(b);
    }
    (lo <= hi).then_some((lo, hi))
}

/// Whether two sub-curves are both flat to within `tol` and each lies in the
/// other's fat line.
///
/// This is where clipping stops making progress at a tangency: the curves
/// stay within tolerance of each other along a stretch longer than `tol`.
fn in_flat_contact(sub1: &CubicBez, sub2: &CubicBez, tol: f64) -> bool {
    let l1 = FatLine::from_cubic(sub1, tol);
    let l2 = FatLine::from_cubic(sub2, tol);
    l1.width() <= tol
        && l2.width() <= tol
        && sub1.control_points().into_iter().all(|p| l2.contains(p, tol))
        && sub2.control_points().into_iter().all(|p| l1.contains(p, tol))
}

/// The x-extent of the part of a convex polygon with `y_min <= y <= y_max`.
fn hull_strip_interval(hull: &[Point], y_min: f64, y_max: f64) -> Option<(f64, f64)> {
    let mut xs = ArrayVec::<f64, 12>::new();
    let n = hull.len();
    for i in 0..n {
        let p = hull[i];
        if p.y >= y_min && p.y <= y_max {
            xs.push(p.x);
        }
        if n > 1 {
            let q = hull[(i + 1) % n];
            for level in [y_min, y_max] {
                if (p.y - level) * (q.y - level) < 0.0 {
                    xs.push(p.x + (level - p.y) * (q.x - p.x) / (q.y - p.y));
                }
            }
        }
    }
    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (lo <= hi).then(|| (lo.clamp(0.0, 1.0), hi.clamp(0.0, 1.0)))
}

/// Split the curves that are still larger than `tol` at their midpoints.
fn bisect(c1: &CubicBez, c2: &CubicBez, task: &Task, tol: f64) -> ArrayVec<Task, 4> {
    let halves = |curve: &CubicBez, d: &Range<f64>| -> ArrayVec<Range<f64>, 2> {
        let mut out = ArrayVec::new();
        if curve.subsegment(d.clone()).bounding_box().diagonal() <= tol {
            out.push(d.clone());
        } else {
            let m = mid(d);
            out.push(d.start..m);
            out.push(m..d.end);
        }
        out
    };
    let mut tasks = ArrayVec::new();
    for d1 in halves(c1, &task.d1) {
        for d2 in halves(c2, &task.d2) {
            tasks.push(Task {
                d1: d1.clone(),
                d2,
                depth: task.depth + 1,
                stalled: 0,
            });
        }
    }
    tasks
}

/// Collapse hits that belong to the same contact.
///
/// Near a tangency several converged intervals can report what is really
/// one touching point. Two hits are the same contact if they land on the same
/// spot, or if the curves stay within tolerance of each other all the way
/// between them. Of each group, the hit with the closest sample points wins.
fn merge_hits(c1: &CubicBez, c2: &CubicBez, mut raw: Vec<(f64, f64)>, tol: f64) -> Vec<(f64, f64)> {
    raw.sort_by(|a, b| a.0.total_cmp(&b.0));
    let gap = |h: (f64, f64)| c1.eval(h.0).distance(c2.eval(h.1));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(raw.len());
    for hit in raw {
        let hit = (snap_unit(hit.0, tol), snap_unit(hit.1, tol));
        match merged.iter_mut().find(|old| same_contact(c1, c2, **old, hit, tol)) {
            Some(old) => {
                if gap(hit) < gap(*old) {
                    *old = hit;
                }
            }
            None => merged.push(hit),
        }
    }
    merged.sort_by(|a, b| a.0.total_cmp(&b.0));
    merged
}

fn same_contact(c1: &CubicBez, c2: &CubicBez, a: (f64, f64), b: (f64, f64), tol: f64) -> bool {
    if c1.eval(a.0).is_near(c1.eval(b.0), 2.0 * tol) && c2.eval(a.1).is_near(c2.eval(b.1), 2.0 * tol)
    {
        return true;
    }
    (1..4).all(|k| {
        let s = k as f64 / 4.0;
        let p = c1.eval(a.0 + (b.0 - a.0) * s);
        let q = c2.eval(a.1 + (b.1 - a.1) * s);
        p.is_near(q, 4.0 * tol)
    })
}

/// Pull parameters that are within rounding of an endpoint onto it.
fn snap_unit(t: f64, tol: f64) -> f64 {
    let eps = tol.min(1e-12);
    if t < eps {
        0.0
    } else if t > 1.0 - eps {
        1.0
    } else {
        t
    }
}

#[inline]
fn mid(d: &Range<f64>) -> f64 {
    0.5 * (d.start + d.end)
}

/// The point of `d` corresponding to `t` in `0..=1`.
#[inline]
fn lerp(d: &Range<f64>, t: f64) -> f64 {
    d.start + (d.end - d.start) * t
}

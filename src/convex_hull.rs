// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convex hulls of small point sets.

use smallvec::SmallVec;

use crate::Point;

/// An ordered, finite sequence of points.
///
/// Hulls of Bézier control polygons have at most four vertices, so those stay
/// inline.
pub type Polygon = SmallVec<[Point; 4]>;

/// Compute the convex hull of `points`, counterclockwise in a y-up space.
///
/// This is Andrew's monotone chain. Collinear points are dropped, so a hull
/// of collinear input collapses to its two extreme points and a hull of
/// coincident input to a single point. Such zero-area hulls are valid results.
/// Empty input gives an empty polygon.
pub fn convex_hull(points: &[Point]) -> Polygon {
    let mut sorted: SmallVec<[Point; 4]> = points.iter().copied().collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let turn = |o: Point, a: Point, b: Point| (a - o).cross(b - o);
    let mut hull = Polygon::new();
    // lower chain
    for &p in &sorted {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // upper chain
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // The last point repeats the first.
    hull.pop();
    hull
}

/// Whether `pt` is inside or on the boundary of a counterclockwise convex
/// polygon, allowing `accuracy` of slack.
///
/// Degenerate polygons (a point or a segment) are handled as such.
pub fn convex_polygon_contains(polygon: &[Point], pt: Point, accuracy: f64) -> bool {
    match polygon.len() {
        0 => false,
        1 => polygon[0].is_near(pt, accuracy),
        2 => distance_to_segment(polygon[0], polygon[1], pt) <= accuracy,
        n => (0..n).all(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            let edge = b - a;
            let len = edge.hypot();
            // signed distance, positive on the inside (left) of a ccw edge
            len == 0.0 || edge.cross(pt - a) / len >= -accuracy
        }),
    }
}

fn distance_to_segment(a: Point, b: Point, pt: Point) -> f64 {
    let d = b - a;
    let len2 = d.hypot2();
    if len2 == 0.0 {
        return pt.distance(a);
    }
    let t = ((pt - a).dot(d) / len2).clamp(0.0, 1.0);
    pt.distance(a + d * t)
}

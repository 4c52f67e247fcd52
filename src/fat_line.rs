// Copyright 2026 the Kurbo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fat lines: strips bounding a curve's control polygon.

use core::fmt;

use crate::{CubicBez, Point, Vec2};

/// A line in normalized implicit form, together with a band of signed
/// distances around it.
///
/// Every point `p` of the curve the fat line was built from satisfies
/// `d_min <= a * p.x + b * p.y + c <= d_max`, since the curve lies in the
/// convex hull of its control points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FatLine {
    /// x coefficient of the unit normal.
    pub a: f64,
    /// y coefficient of the unit normal.
    pub b: f64,
    /// Offset, so that the base line is `a * x + b * y + c = 0`.
    pub c: f64,
    /// The min distance from the base line (zero or less).
    pub d_min: f64,
    /// The max distance from the base line (zero or more).
    pub d_max: f64,
}

impl FatLine {
    /// Creates the fat line of a curve, with its base line through `p0` and `p3`.
    ///
    /// When `p0` and `p3` coincide (within `accuracy`) the direction is taken
    /// from the control point farthest from `p0` instead. If all control points
    /// coincide the base line is horizontal.
    pub fn from_cubic(curve: &CubicBez, accuracy: f64) -> FatLine {
        let dir = base_direction(curve, accuracy);
        FatLine::from_normal(curve, dir.turn_90())
    }

    /// Creates a fat line perpendicular to [`FatLine::from_cubic`], through `p0`.
    ///
    /// Clipping against both bounds the other curve from two directions.
    pub fn perpendicular(curve: &CubicBez, accuracy: f64) -> FatLine {
        let dir = base_direction(curve, accuracy);
        FatLine::from_normal(curve, dir)
    }

    fn from_normal(curve: &CubicBez, normal: Vec2) -> FatLine {
        let a = normal.x;
        let b = normal.y;
        let c = -(a * curve.p0.x + b * curve.p0.y);
        let mut line = FatLine {
            a,
            b,
            c,
            d_min: 0.0,
            d_max: 0.0,
        };
        for p in curve.control_points() {
            let d = line.distance(p);
            line.d_min = line.d_min.min(d);
            line.d_max = line.d_max.max(d);
        }
        line
    }

    /// Signed distance from the base line to `pt`.
    #[inline]
    pub fn distance(&self, pt: Point) -> f64 {
        self.a * pt.x + self.b * pt.y + self.c
    }

    /// Whether `pt` lies within the band, allowing `slack` on either side.
    #[inline]
    pub fn contains(&self, pt: Point, slack: f64) -> bool {
        let d = self.distance(pt);
        d >= self.d_min - slack && d <= self.d_max + slack
    }

    /// The unit normal of the base line.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        Vec2::new(self.a, self.b)
    }

    /// Width of the band.
    #[inline]
    pub fn width(&self) -> f64 {
        self.d_max - self.d_min
    }

    /// The signed distances of `curve`'s control points to this line, paired
    /// with their parameter values 0, 1/3, 2/3 and 1.
    ///
    /// The curve's distance function is itself a cubic Bézier with these
    /// control points, so its graph lies in their convex hull.
    pub fn distance_polygon(&self, curve: &CubicBez) -> [Point; 4] {
        let [p0, p1, p2, p3] = curve.control_points();
        [
            Point::new(0.0, self.distance(p0)),
            Point::new(1.0 / 3.0, self.distance(p1)),
            Point::new(2.0 / 3.0, self.distance(p2)),
            Point::new(1.0, self.distance(p3)),
        ]
    }
}

/// Unit direction of the base line of `curve`'s fat line.
fn base_direction(curve: &CubicBez, accuracy: f64) -> Vec2 {
    if let Some(dir) = (curve.p3 - curve.p0).try_normalize(accuracy) {
        return dir;
    }
    let far = [curve.p1, curve.p2, curve.p3]
        .into_iter()
        .max_by(|a, b| {
            a.distance_squared(curve.p0)
                .total_cmp(&b.distance_squared(curve.p0))
        })
        .unwrap_or(curve.p0);
    (far - curve.p0)
        .try_normalize(0.0)
        .unwrap_or(Vec2::new(1.0, 0.0))
}

impl fmt::Display for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FatLine({}x + {}y + {} in [{}, {}])",
            self.a, self.b, self.c, self.d_min, self.d_max
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn check_containment(curve: &CubicBez) {
        for line in [
            FatLine::from_cubic(curve, 1e-12),
            FatLine::perpendicular(curve, 1e-12),
        ] {
            assert!((line.a * line.a + line.b * line.b - 1.0).abs() < 1e-12);
            assert!(line.d_min <= 0.0 && line.d_max >= 0.0);
            for p in curve.control_points() {
                assert!(line.contains(p, 1e-9), "{p:?} outside {line}");
            }
            for i in 0..=20 {
                assert!(line.contains(curve.eval(i as f64 / 20.0), 1e-9));
            }
        }
    }

    #[test]
    fn arch_bounds() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let line = FatLine::from_cubic(&c, 1e-12);
        // base line is the x axis, normal points up or down
        assert!(line.a.abs() < 1e-12);
        assert!(line.width() > 0.99 && line.width() < 1.01);
        check_containment(&c);
    }

    #[test]
    fn random_curves_are_contained() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut pt = || Point::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0));
            let c = CubicBez::new(pt(), pt(), pt(), pt());
            check_containment(&c);
        }
    }

    #[test]
    fn closed_control_polygon() {
        // p0 == p3: the base line follows the control point spread instead.
        let c = CubicBez::new((0.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 0.0));
        let line = FatLine::from_cubic(&c, 1e-12);
        assert!(line.a.is_finite() && line.b.is_finite() && line.c.is_finite());
        check_containment(&c);
    }

    #[test]
    fn single_point_curve() {
        let c = CubicBez::new((3.0, 3.0), (3.0, 3.0), (3.0, 3.0), (3.0, 3.0));
        let line = FatLine::from_cubic(&c, 1e-12);
        assert_eq!(line.normal(), Vec2::new(0.0, 1.0));
        assert_eq!(line.width(), 0.0);
        assert!(line.contains(Point::new(100.0, 3.0), 0.0));
    }

    #[test]
    fn distance_polygon_parameters() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let line = FatLine::from_cubic(&CubicBez::from_line((0.0, 0.5), (1.0, 0.5)), 1e-12);
        let poly = line.distance_polygon(&c);
        assert_eq!(poly[1].x, 1.0 / 3.0);
        assert!((poly[0].y.abs() - 0.5).abs() < 1e-12);
        assert!((poly[1].y.abs() - 0.5).abs() < 1e-12);
        assert!(poly[0].y * poly[1].y < 0.0);
    }
}

// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Mul;

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{Affine, BoundingBox, Point};

/// Added to the middle control delta of an axis when the derivative of that
/// axis degenerates to a linear function, so the quadratic formula stays
/// usable.
const DEGENERACY_NUDGE: f64 = 0.01;

/// A single cubic Bézier segment.
///
/// Every curve type in a path is lowered to this before it is bounded.
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

    /// The parameter values in `(0, 1)` where the curve reaches an extreme
    /// value in x or y, in increasing order.
    ///
    /// An axis whose control points both lie within the range spanned by the
    /// endpoints contributes nothing, since its extent is already given by
    /// the endpoints.
    pub fn extrema(&self) -> ArrayVec<f64, 4> {
        let mut result = ArrayVec::new();
        result.extend(axis_extrema(self.p0.x, self.p1.x, self.p2.x, self.p3.x));
        result.extend(axis_extrema(self.p0.y, self.p1.y, self.p2.y, self.p3.y));
        result.sort_unstable_by(f64::total_cmp);
        result
    }

    /// The tight axis-aligned bounding box of the curve for `t` in `[0, 1]`.
    ///
    /// ```
    /// use svgbounds::CubicBez;
    ///
    /// let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
    /// let bbox = c.bounding_box();
    /// assert_eq!((bbox.left(), bbox.top(), bbox.right()), (0.0, 0.0, 1.0));
    /// assert!((bbox.bottom() - 0.75).abs() < 1e-3);
    /// ```
    pub fn bounding_box(&self) -> BoundingBox {
        self.extrema()
            .iter()
            .fold(BoundingBox::from_points(self.p0, self.p3), |bbox, &t| {
                bbox.union_pt(self.eval(t))
            })
    }

    /// The box enclosing all four control points.
    ///
    /// This always contains the curve, and equals [`bounding_box`] when the
    /// control points lie within the box of the endpoints.
    ///
    /// [`bounding_box`]: CubicBez::bounding_box
    #[inline]
    pub fn control_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.p0, self.p3)
            .union_pt(self.p1)
            .union_pt(self.p2)
    }

    /// A bounding rectangle aligned with the chord from `p0` to `p3`.
    ///
    /// The curve is rotated about `p0` until its chord is horizontal, bounded
    /// there, and the corners of that box are rotated back. For curves that
    /// run diagonally this is usually much smaller than the axis-aligned
    /// box. The corners are returned in the order of
    /// [`BoundingBox::corners`] in the chord-aligned frame.
    pub fn straightened_bounds(&self) -> [Point; 4] {
        let chord = self.p3 - self.p0;
        if chord.y == 0.0 {
            return self.bounding_box().corners();
        }
        let th = chord.atan2();
        let local = |p: Point| (p - self.p0).rotate(-th).to_point();
        let flat = CubicBez::new(Point::ZERO, local(self.p1), local(self.p2), local(self.p3));
        flat.bounding_box()
            .corners()
            .map(|corner| self.p0 + corner.to_vec2().rotate(th))
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}

/// Extremum parameters of one coordinate of a cubic.
fn axis_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> ArrayVec<f64, 2> {
    let (lo, hi) = (p0.min(p3), p0.max(p3));
    if (lo..=hi).contains(&p1) && (lo..=hi).contains(&p2) {
        return ArrayVec::new();
    }
    let a = p1 - p0;
    let mut b = p2 - p1;
    let c = p3 - p2;
    if a + c == 2.0 * b {
        b += DEGENERACY_NUDGE;
    }
    // The derivative is proportional to (a - 2b + c)t² + 2(b - a)t + a.
    solve_quadratic(a, 2.0 * (b - a), a - 2.0 * b + c)
        .into_iter()
        .filter(|&t| t > 0.0 && t < 1.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_near(a: f64, b: f64, epsilon: f64) {
        assert!((a - b).abs() < epsilon, "{a} != {b}");
    }

    /// The box from dense sampling, which the exact box must match closely.
    fn sampled_box(c: &CubicBez) -> BoundingBox {
        let n = 10_000;
        BoundingBox::enclosing((0..=n).map(|i| c.eval(f64::from(i) / f64::from(n))))
            .unwrap()
    }

    #[test]
    fn cubicbez_eval() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 3.0), (2.0, 3.0), (3.0, 0.0));
        assert_eq!(c.eval(0.0), c.p0);
        assert_eq!(c.eval(1.0), c.p3);
        assert_eq!(c.eval(0.5), Point::new(1.5, 2.25));
    }

    #[test]
    fn cubicbez_extrema() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        let extrema = c.extrema();
        assert_eq!(extrema.len(), 1);
        assert_near(extrema[0], 0.5, 1e-2);

        let c = CubicBez::new((0.4, 0.5), (0.0, 1.0), (1.0, 0.0), (0.5, 0.4));
        let extrema = c.extrema();
        assert_eq!(extrema.len(), 4);
        assert!(extrema.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn bounding_box_exact() {
        let c = CubicBez::new((0.0, 0.0), (-10.0, 20.0), (30.0, 20.0), (20.0, 0.0));
        let bbox = c.bounding_box();
        let sampled = sampled_box(&c);
        assert_near(bbox.left(), sampled.left(), 1e-3);
        assert_near(bbox.right(), sampled.right(), 1e-3);
        assert_near(bbox.top(), 0.0, 1e-12);
        assert_near(bbox.bottom(), 15.0, 1e-3);
    }

    #[test]
    fn collinear_control_deltas() {
        // Control deltas of -1, 0, 1 in y make the derivative linear. The
        // true minimum is -0.75 at t = 0.5.
        let c = CubicBez::new((0.0, 0.0), (1.0, -1.0), (2.0, -1.0), (3.0, 0.0));
        let bbox = c.bounding_box();
        assert_near(bbox.top(), -0.75, 1e-3);
        assert_near(bbox.bottom(), 0.0, 1e-12);

        // The same curve on its side exercises the x axis.
        let c = CubicBez::new((0.0, 0.0), (-1.0, 1.0), (-1.0, 2.0), (0.0, 3.0));
        assert_near(c.bounding_box().left(), -0.75, 1e-3);
    }

    #[test]
    fn inner_controls_match_control_box() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let p0 = Point::new(rng.random_range(-100.0..0.0), rng.random_range(-100.0..0.0));
            let p3 = Point::new(rng.random_range(1.0..100.0), rng.random_range(1.0..100.0));
            let inner = |rng: &mut StdRng| {
                Point::new(
                    rng.random_range(p0.x..p3.x),
                    rng.random_range(p0.y..p3.y),
                )
            };
            let p1 = inner(&mut rng);
            let p2 = inner(&mut rng);
            let c = CubicBez::new(p0, p1, p2, p3);
            assert_eq!(c.bounding_box(), c.control_box());
        }
    }

    #[test]
    fn exact_is_contained_in_control_box() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut pt = || Point::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0));
            let c = CubicBez::new(pt(), pt(), pt(), pt());
            let exact = c.bounding_box();
            assert!(c.control_box().contains_box(&exact, 1e-9), "{c:?}");
            assert!(exact.contains_box(&sampled_box(&c), 1e-2), "{c:?}");
        }
    }

    #[test]
    fn straightened_horizontal_chord() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        assert_eq!(c.straightened_bounds(), c.bounding_box().corners());
    }

    #[test]
    fn straightened_diagonal() {
        // A straight diagonal line has a zero-height chord-aligned box.
        let c = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        let corners = c.straightened_bounds();
        for corner in corners {
            assert_near(corner.x, corner.y, 1e-9);
        }
        let d = corners[0].distance(corners[1]);
        assert_near(d, 18f64.sqrt(), 1e-9);

        // A bump on a diagonal chord: the box rotated back is as wide as the
        // chord and as tall as the bump.
        let flat = CubicBez::new((0.0, 0.0), (0.0, 4.0), (10.0, 4.0), (10.0, 0.0));
        let rot = Affine::rotate(crate::Angle::from_degrees(30.0));
        let corners = (rot * flat).straightened_bounds();
        let expected = flat.bounding_box().corners().map(|p| rot * p);
        for (got, want) in corners.iter().zip(expected) {
            assert!(got.distance(want) < 1e-3, "{got:?} != {want:?}");
        }
    }
}

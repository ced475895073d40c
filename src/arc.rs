// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG elliptical arcs, and their conversion to cubic Béziers.

use core::f64::consts::{FRAC_PI_2, TAU};

use smallvec::SmallVec;

use crate::{Angle, CubicBez, Point, Vec2};

/// A single SVG arc segment, in endpoint parameterization.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvgArc {
    /// The arc's start point.
    pub from: Point,
    /// The arc's end point.
    pub to: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// How much the arc is rotated.
    pub x_rotation: Angle,
    /// Does this arc sweep through more than π radians?
    pub large_arc: bool,
    /// Determines if the arc should begin moving at positive angles.
    pub sweep: bool,
}

impl SvgArc {
    /// Checks that arc is actually a straight line.
    ///
    /// Renderers draw an arc with a zero radius as a line to its end point.
    #[inline]
    pub fn is_straight_line(&self) -> bool {
        self.radii.x == 0.0 || self.radii.y == 0.0
    }

    /// Approximate the arc with cubic Béziers, each spanning at most a
    /// quarter turn.
    ///
    /// The first segment starts at `from` and the last ends at `to`. Returns
    /// no segments for a straight line or when `from` and `to` coincide.
    /// Radii too small to connect the endpoints are scaled up uniformly until
    /// they do.
    ///
    /// ```
    /// use svgbounds::{Angle, Point, SvgArc, Vec2};
    ///
    /// let arc = SvgArc {
    ///     from: Point::new(1.0, 0.0),
    ///     to: Point::new(-1.0, 0.0),
    ///     radii: Vec2::new(1.0, 1.0),
    ///     x_rotation: Angle::ZERO,
    ///     large_arc: false,
    ///     sweep: true,
    /// };
    /// let cubics = arc.to_cubics();
    /// assert_eq!(cubics.len(), 2);
    /// assert_eq!(cubics[1].p3, Point::new(-1.0, 0.0));
    /// ```
    pub fn to_cubics(&self) -> SmallVec<[CubicBez; 4]> {
        let mut result = SmallVec::new();
        if self.is_straight_line() {
            return result;
        }
        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();
        let phi = self.x_rotation.radians();

        // Half the chord, rotated into the ellipse's frame.
        let p = ((self.from - self.to) * 0.5).rotate(-phi);
        if p.x == 0.0 && p.y == 0.0 {
            return result;
        }

        // Scale up radii that cannot reach from one end to the other.
        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let (rx2, ry2) = (rx * rx, ry * ry);
        let (px2, py2) = (p.x * p.x, p.y * p.y);
        let radicand = (rx2 * ry2 - rx2 * py2 - ry2 * px2).max(0.0) / (rx2 * py2 + ry2 * px2);
        let sign = if self.large_arc == self.sweep {
            -1.0
        } else {
            1.0
        };
        let coef = sign * radicand.sqrt();
        let center_p = Vec2::new(coef * rx / ry * p.y, -coef * ry / rx * p.x);
        let center = self.from.midpoint(self.to) + center_p.rotate(phi);

        let v1 = Vec2::new((p.x - center_p.x) / rx, (p.y - center_p.y) / ry);
        let v2 = Vec2::new((-p.x - center_p.x) / rx, (-p.y - center_p.y) / ry);
        let mut angle = vector_angle(Vec2::new(1.0, 0.0), v1);
        let mut sweep_angle = vector_angle(v1, v2);
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }

        let n = (sweep_angle.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep_angle / n as f64;
        let arm_len = (4.0 / 3.0) * (step / 4.0).tan();
        let map = |v: Vec2| center + Vec2::new(v.x * rx, v.y * ry).rotate(phi);

        let mut p0 = self.from;
        for i in 0..n {
            let (s0, c0) = angle.sin_cos();
            let (s1, c1) = (angle + step).sin_cos();
            let p1 = map(Vec2::new(c0 - s0 * arm_len, s0 + c0 * arm_len));
            let p2 = map(Vec2::new(c1 + s1 * arm_len, s1 - c1 * arm_len));
            let p3 = if i + 1 == n {
                self.to
            } else {
                map(Vec2::new(c1, s1))
            };
            result.push(CubicBez { p0, p1, p2, p3 });
            p0 = p3;
            angle += step;
        }
        result
    }
}

/// The signed angle from `u` to `v`.
fn vector_angle(u: Vec2, v: Vec2) -> f64 {
    let sign = if u.cross(v) < 0.0 { -1.0 } else { 1.0 };
    let cos = (u.dot(v) / (u.hypot() * v.hypot())).clamp(-1.0, 1.0);
    sign * cos.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    fn arc(from: (f64, f64), to: (f64, f64), r: (f64, f64), large_arc: bool, sweep: bool) -> SvgArc {
        SvgArc {
            from: from.into(),
            to: to.into(),
            radii: r.into(),
            x_rotation: Angle::ZERO,
            large_arc,
            sweep,
        }
    }

    fn max_radial_error(cubics: &[CubicBez], center: Point, r: f64) -> f64 {
        cubics
            .iter()
            .flat_map(|c| (0..=32).map(move |i| c.eval(f64::from(i) / 32.0)))
            .map(|p| (p.distance(center) - r).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn degenerate() {
        assert!(arc((0.0, 0.0), (10.0, 0.0), (0.0, 5.0), false, true).to_cubics().is_empty());
        assert!(arc((0.0, 0.0), (10.0, 0.0), (0.0, 5.0), false, true).is_straight_line());
        assert!(arc((3.0, 3.0), (3.0, 3.0), (5.0, 5.0), true, true).to_cubics().is_empty());
        assert!(!arc((3.0, 3.0), (3.0, 3.0), (5.0, 5.0), true, true).is_straight_line());
    }

    #[test]
    fn full_circle_from_two_halves() {
        let r = 5.0;
        let center = Point::new(10.0, 10.0);
        let top = arc((10.0, 5.0), (10.0, 15.0), (r, r), true, true);
        let bottom = arc((10.0, 15.0), (10.0, 5.0), (r, r), true, true);
        let mut cubics: Vec<CubicBez> = top.to_cubics().into_iter().collect();
        cubics.extend(bottom.to_cubics());
        assert_eq!(cubics.len(), 4);
        assert!(max_radial_error(&cubics, center, r) < 2e-3 * r);
        for pair in cubics.windows(2) {
            assert!(pair[0].p3.distance(pair[1].p0) < 1e-9);
        }
    }

    #[test]
    fn full_circle_from_one_arc() {
        // End points a hair apart, so the large sweeping arc is nearly a
        // whole turn around the origin.
        let r = 10.0;
        let cubics = arc((10.0, 0.0), (10.0, -1e-6), (r, r), true, true).to_cubics();
        assert_eq!(cubics.len(), 4);
        assert!(max_radial_error(&cubics, Point::ZERO, r) < 2e-3 * r);
        assert_eq!(cubics[3].p3, Point::new(10.0, -1e-6));
        for pair in cubics.windows(2) {
            assert!(pair[0].p3.distance(pair[1].p0) < 1e-9);
        }
        // The quarter turns pass through the other three axis points.
        assert!(cubics[0].p3.distance(Point::new(0.0, 10.0)) < 1e-5);
        assert!(cubics[1].p3.distance(Point::new(-10.0, 0.0)) < 1e-5);
        assert!(cubics[2].p3.distance(Point::new(0.0, -10.0)) < 1e-5);
    }

    #[test]
    fn sweep_direction() {
        // Half circle through y < 0 (clockwise on screen) or y > 0.
        let up = arc((-1.0, 0.0), (1.0, 0.0), (1.0, 1.0), false, true).to_cubics();
        let down = arc((-1.0, 0.0), (1.0, 0.0), (1.0, 1.0), false, false).to_cubics();
        assert!(up.iter().all(|c| c.eval(0.5).y <= 1e-9));
        assert!(down.iter().all(|c| c.eval(0.5).y >= -1e-9));
    }

    #[test]
    fn large_arc_flag() {
        let small = arc((0.0, 0.0), (10.0, 0.0), (10.0, 10.0), false, true).to_cubics();
        let large = arc((0.0, 0.0), (10.0, 0.0), (10.0, 10.0), true, true).to_cubics();
        assert_eq!(small.len(), 1);
        assert_eq!(large.len(), 4);
        // The small arc spans 60°, so its sagitta is r(1 - cos 30°).
        let sag = small[0].bounding_box().height();
        assert!((sag - 10.0 * (1.0 - (PI / 6.0).cos())).abs() < 1e-3, "{sag}");
    }

    #[test]
    fn radii_scaled_up() {
        // Radii of 1 cannot span 10 units; the result is a half circle of 5.
        let cubics = arc((0.0, 0.0), (10.0, 0.0), (1.0, 1.0), false, true).to_cubics();
        assert_eq!(cubics.len(), 2);
        assert!(max_radial_error(&cubics, Point::new(5.0, 0.0), 5.0) < 1e-2);
    }

    #[test]
    fn rotated_ellipse() {
        let a = SvgArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(20.0, 20.0),
            radii: Vec2::new(20.0, 10.0),
            x_rotation: Angle::from_degrees(45.0),
            large_arc: false,
            sweep: true,
        };
        let cubics = a.to_cubics();
        assert!(!cubics.is_empty());
        assert_eq!(cubics[0].p0, a.from);
        assert_eq!(cubics.last().map(|c| c.p3), Some(a.to));
    }
}

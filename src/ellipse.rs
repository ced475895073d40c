// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned ellipses and their bounds under affine maps.

use crate::common::solve_quadratic;
use crate::{Affine, BoundingBox, BoundsError, Point, Vec2};

/// An axis-aligned ellipse.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    center: Point,
    radii: Vec2,
}

impl Ellipse {
    /// A new ellipse from its center and radii.
    ///
    /// Since the ellipse is symmetric about both axes, the absolute values of
    /// the radii are used.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>) -> Ellipse {
        let radii = radii.into();
        Ellipse {
            center: center.into(),
            radii: Vec2::new(radii.x.abs(), radii.y.abs()),
        }
    }

    /// A circle, as an ellipse with equal radii.
    #[inline]
    pub fn circle(center: impl Into<Point>, radius: f64) -> Ellipse {
        Ellipse::new(center, (radius, radius))
    }

    /// The center of the ellipse.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radii along the x and y axes.
    #[inline]
    pub fn radii(&self) -> Vec2 {
        self.radii
    }

    /// The untransformed bounding box.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.center - self.radii, self.center + self.radii)
    }

    /// The tight bounding box of the ellipse after applying `affine`.
    ///
    /// The map is substituted into the implicit equation of the ellipse,
    /// giving a conic `Ax² + Bxy + Cy² + Dx + Ey + F = 0` in the transformed
    /// space. Its horizontal and vertical tangents are the roots of two
    /// quadratics, which are the edges of the box.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::SingularTransform`] if `affine` cannot be
    /// inverted or has a non-finite coefficient, or if the tangent equations have no finite solution.
    /// Ellipses with a zero radius are mapped as the segment they are.
    ///
    /// ```
    /// use svgbounds::{parse_transform, Ellipse};
    ///
    /// let shear = parse_transform("matrix(1,0,0.5,1,0,0)").unwrap();
    /// let bbox = Ellipse::circle((0.0, 0.0), 1.0).bounding_box_under(shear).unwrap();
    /// assert!((bbox.right() - 1.118).abs() < 1e-2);
    /// assert!((bbox.bottom() - 1.0).abs() < 1e-9);
    /// ```
    pub fn bounding_box_under(&self, affine: Affine) -> Result<BoundingBox, BoundsError> {
        let det = affine.determinant();
        if det == 0.0 || !affine.is_finite() {
            return Err(BoundsError::SingularTransform);
        }
        if self.radii.x == 0.0 || self.radii.y == 0.0 {
            // A flat ellipse is a segment along one axis, whose box maps
            // exactly.
            return Ok(self.bounding_box().transform(affine));
        }
        let [ma, mb, mc, md, me, mf] = affine.as_coeffs();
        let Point { x: cx, y: cy } = self.center;
        let rx2 = self.radii.x * self.radii.x;
        let ry2 = self.radii.y * self.radii.y;

        let a = ry2 * md * md + rx2 * mb * mb;
        let b = -2.0 * (mc * md * ry2 + ma * mb * rx2);
        let c = ry2 * mc * mc + rx2 * ma * ma;
        let d = 2.0 * ry2 * (mc * md * mf - md * md * me) + 2.0 * rx2 * (ma * mb * mf - mb * mb * me)
            - 2.0 * (cx * ry2 * md - cy * rx2 * mb) * det;
        let e = 2.0 * ry2 * (mc * md * me - mc * mc * mf) + 2.0 * rx2 * (ma * mb * me - ma * ma * mf)
            + 2.0 * (cx * ry2 * mc - cy * rx2 * ma) * det;
        let f = ry2 * (mc * mc * mf * mf - 2.0 * mc * md * me * mf + md * md * me * me)
            + rx2 * (ma * ma * mf * mf - 2.0 * ma * mb * me * mf + mb * mb * me * me)
            + (2.0 * cx * ry2 * (md * me - mc * mf) + 2.0 * cy * rx2 * (ma * mf - mb * me)) * det
            + (ry2 * cx * cx + rx2 * cy * cy - rx2 * ry2) * det * det;

        // Tangent lines y = const and x = const are double roots of the conic
        // restricted to that line.
        let quad = 4.0 * a * c - b * b;
        let y_extent = tangent_pair(quad, 4.0 * a * e - 2.0 * b * d, 4.0 * a * f - d * d)?;
        let x_extent = tangent_pair(quad, 4.0 * c * d - 2.0 * b * e, 4.0 * c * f - e * e)?;
        Ok(BoundingBox::new(
            x_extent.0,
            y_extent.0,
            x_extent.1,
            y_extent.1,
        ))
    }
}

/// The two roots of `a·t² + b·t + c`, which must both be finite.
fn tangent_pair(a: f64, b: f64, c: f64) -> Result<(f64, f64), BoundsError> {
    match solve_quadratic(c, b, a).as_slice() {
        &[t0, t1] if t0.is_finite() && t1.is_finite() => Ok((t0, t1)),
        _ => Err(BoundsError::SingularTransform),
    }
}

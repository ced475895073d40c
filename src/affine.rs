// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use core::fmt;
use core::ops::{Mul, MulAssign};

use crate::{round_to, Angle, Point};

/// A 2D affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Construct an affine transform from coefficients.
    ///
    /// If the coefficients are `(a, b, c, d, e, f)`, then the resulting
    /// transformation represents this augmented matrix:
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    ///
    /// This is the argument order of the SVG `matrix(a, b, c, d, e, f)`
    /// transform function. The idea is that `(A * B) * p == A * (B * p)`,
    /// where `*` is the [`Mul`] trait.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub const fn translate(tx: f64, ty: f64) -> Affine {
        Affine([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// An affine transform representing non-uniform scaling
    /// with different scale values for x and y.
    #[inline(always)]
    pub const fn scale(sx: f64, sy: f64) -> Affine {
        Affine([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale_uniform(s: f64) -> Affine {
        Affine::scale(s, s)
    }

    /// An affine transform representing rotation.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. Thus, in a Y-down coordinate
    /// system (as is common for graphics), it is a clockwise rotation, and
    /// in Y-up (traditional for math), it is anti-clockwise.
    #[inline]
    pub fn rotate(angle: Angle) -> Affine {
        let (s, c) = angle.radians().sin_cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing a rotation about `center`.
    ///
    /// This is `translate(center) * rotate(angle) * translate(-center)`, the
    /// expansion of the three-argument SVG `rotate(angle, cx, cy)`.
    #[inline]
    pub fn rotate_about(angle: Angle, center: impl Into<Point>) -> Affine {
        let center = center.into();
        Affine::translate(center.x, center.y)
            * Affine::rotate(angle)
            * Affine::translate(-center.x, -center.y)
    }

    /// A skew along the x axis: `x' = x + tan(angle)·y`.
    #[inline]
    pub fn skew_x(angle: Angle) -> Affine {
        Affine([1.0, 0.0, angle.radians().tan(), 1.0, 0.0, 0.0])
    }

    /// A skew along the y axis: `y' = tan(angle)·x + y`.
    #[inline]
    pub fn skew_y(angle: Angle) -> Affine {
        Affine([1.0, angle.radians().tan(), 0.0, 1.0, 0.0, 0.0])
    }

    /// A skew along both axes, as the CSS `skew(ax, ay)` function.
    #[inline]
    pub fn skew(ax: Angle, ay: Angle) -> Affine {
        Affine([1.0, ay.radians().tan(), ax.radians().tan(), 1.0, 0.0, 0.0])
    }

    /// Get the coefficients of the transform.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// The element at 1-based `(row, col)` of the 3×3 augmented matrix.
    ///
    /// The third row is always `[0, 0, 1]`. Returns `None` when either index
    /// is outside `1..=3`.
    ///
    /// ```
    /// use svgbounds::Affine;
    ///
    /// let m = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m.coeff(1, 2), Some(3.0));
    /// assert_eq!(m.coeff(2, 3), Some(6.0));
    /// assert_eq!(m.coeff(3, 3), Some(1.0));
    /// assert_eq!(m.coeff(4, 1), None);
    /// ```
    pub fn coeff(self, row: usize, col: usize) -> Option<f64> {
        let [a, b, c, d, e, f] = self.0;
        let value = match (row, col) {
            (1, 1) => a,
            (1, 2) => c,
            (1, 3) => e,
            (2, 1) => b,
            (2, 2) => d,
            (2, 3) => f,
            (3, 1) | (3, 2) => 0.0,
            (3, 3) => 1.0,
            _ => return None,
        };
        Some(value)
    }

    /// Compute the determinant of this transform.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[3] - self.0[1] * self.0[2]
    }

    /// Compute the inverse transform.
    ///
    /// Produces NaN values when the determinant is zero.
    pub fn inverse(self) -> Affine {
        let inv_det = self.determinant().recip();
        Affine([
            inv_det * self.0[3],
            -inv_det * self.0[1],
            -inv_det * self.0[2],
            inv_det * self.0[0],
            inv_det * (self.0[2] * self.0[5] - self.0[3] * self.0[4]),
            inv_det * (self.0[1] * self.0[4] - self.0[0] * self.0[5]),
        ])
    }

    /// Apply the transform to a point, rounding the result to `decimals`
    /// fractional digits.
    ///
    /// See [`round_to`] for how values near zero are handled.
    pub fn transform_point_rounded(self, pt: Point, decimals: u32) -> Point {
        let p = self * pt;
        Point::new(round_to(p.x, decimals), round_to(p.y, decimals))
    }

    /// Is this map finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

/// Writes the canonical `matrix(a,b,c,d,e,f)` form, each coefficient
/// rounded to 4 decimals.
impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matrix(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            // Adding zero turns a rounded `-0` into `0`.
            write!(f, "{}", round_to(*c, 4) + 0.0)?;
        }
        write!(f, ")")
    }
}

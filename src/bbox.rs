// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use core::fmt;

use crate::{Affine, Point};

/// An axis-aligned bounding box.
///
/// Edges are named for a y-down coordinate system, as in SVG: `top` is the
/// minimum y coordinate and `bottom` the maximum. Width and height are always
/// derived from the edges and never stored.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl BoundingBox {
    /// A new box from its edges.
    ///
    /// The result is normalized so that `left <= right` and `top <= bottom`.
    #[inline]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> BoundingBox {
        BoundingBox {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// A new box spanning two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> BoundingBox {
        let p0 = p0.into();
        let p1 = p1.into();
        BoundingBox::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// The zero-area box containing only `pt`.
    #[inline]
    pub fn from_point(pt: impl Into<Point>) -> BoundingBox {
        let pt = pt.into();
        BoundingBox {
            left: pt.x,
            top: pt.y,
            right: pt.x,
            bottom: pt.y,
        }
    }

    /// A new box from origin and size.
    #[inline]
    pub fn from_origin_size(origin: impl Into<Point>, width: f64, height: f64) -> BoundingBox {
        let origin = origin.into();
        BoundingBox::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    /// The smallest box enclosing all of `points`.
    ///
    /// Returns `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<BoundingBox> {
        let mut points = points.into_iter();
        let first = BoundingBox::from_point(points.next()?);
        Some(points.fold(first, BoundingBox::union_pt))
    }

    /// The minimum x coordinate.
    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    /// The minimum y coordinate.
    #[inline]
    pub fn top(&self) -> f64 {
        self.top
    }

    /// The maximum x coordinate.
    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// The maximum y coordinate.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// The width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// The height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.left + self.right), 0.5 * (self.top + self.bottom))
    }

    /// The four corners, clockwise from the top left in a y-down space.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// The smallest box enclosing two boxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Compute the union with one point.
    ///
    /// A succession of `union_pt` operations on a series of points yields
    /// their enclosing box.
    #[inline]
    #[must_use]
    pub fn union_pt(self, pt: Point) -> BoundingBox {
        BoundingBox {
            left: self.left.min(pt.x),
            top: self.top.min(pt.y),
            right: self.right.max(pt.x),
            bottom: self.bottom.max(pt.y),
        }
    }

    /// Does the box contain `other`, allowing `epsilon` of slack on each edge?
    #[inline]
    pub fn contains_box(&self, other: &BoundingBox, epsilon: f64) -> bool {
        other.left >= self.left - epsilon
            && other.top >= self.top - epsilon
            && other.right <= self.right + epsilon
            && other.bottom <= self.bottom + epsilon
    }

    /// The bounding box of this box under an affine transform.
    ///
    /// All four corners are mapped and the enclosing axis-aligned box of the
    /// images is returned. This is not the transformed quadrilateral; under
    /// rotation or skew the result is strictly larger than it.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> BoundingBox {
        let [p0, p1, p2, p3] = self.corners().map(|pt| affine * pt);
        BoundingBox::from_points(p0, p2).union(BoundingBox::from_points(p1, p3))
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundingBox")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("right", &self.right)
            .field("bottom", &self.bottom)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Builds a box by repeated point unions, starting from nothing.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BoxAccumulator(Option<BoundingBox>);

impl BoxAccumulator {
    #[inline]
    pub(crate) fn add_point(&mut self, pt: Point) {
        self.0 = Some(match self.0 {
            Some(bbox) => bbox.union_pt(pt),
            None => BoundingBox::from_point(pt),
        });
    }

    #[inline]
    pub(crate) fn add_box(&mut self, other: BoundingBox) {
        self.0 = Some(match self.0 {
            Some(bbox) => bbox.union(other),
            None => other,
        });
    }

    #[inline]
    pub(crate) fn finish(self) -> Option<BoundingBox> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Angle;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn normalizes_edges() {
        let b = BoundingBox::new(10.0, 20.0, 0.0, 5.0);
        assert_eq!(b.left(), 0.0);
        assert_eq!(b.top(), 5.0);
        assert_eq!(b.right(), 10.0);
        assert_eq!(b.bottom(), 20.0);
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 15.0);
    }

    #[test]
    fn union_and_points() {
        let b = BoundingBox::enclosing([
            Point::new(1.0, 1.0),
            Point::new(-2.0, 4.0),
            Point::new(3.0, 0.5),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox::new(-2.0, 0.5, 3.0, 4.0));
        assert!(BoundingBox::enclosing(core::iter::empty()).is_none());

        let u = b.union(BoundingBox::new(0.0, 0.0, 10.0, 1.0));
        assert_eq!(u, BoundingBox::new(-2.0, 0.0, 10.0, 4.0));
    }

    #[test]
    fn accumulator() {
        let mut acc = BoxAccumulator::default();
        assert!(acc.finish().is_none());
        acc.add_point(Point::new(5.0, 5.0));
        acc.add_box(BoundingBox::new(0.0, 6.0, 1.0, 7.0));
        assert_eq!(acc.finish(), Some(BoundingBox::new(0.0, 5.0, 5.0, 7.0)));
    }

    #[test]
    fn transform_translate_scale() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 5.0);
        let t = Affine::translate(3.0, 4.0) * Affine::scale(2.0, -1.0);
        assert_eq!(b.transform(t), BoundingBox::new(3.0, -1.0, 23.0, 4.0));
    }

    #[test]
    fn transform_rotate() {
        // A square rotated by 45° about its center grows to the diagonal.
        let b = BoundingBox::new(-1.0, -1.0, 1.0, 1.0);
        let t = b.transform(Affine::rotate(Angle::from_degrees(45.0)));
        let d = 2f64.sqrt();
        assert!((t.left() + d).abs() < 1e-12);
        assert!((t.right() - d).abs() < 1e-12);
        assert!((t.top() + d).abs() < 1e-12);
        assert!((t.bottom() - d).abs() < 1e-12);
    }

    #[test]
    fn inverse_round_trip_contains() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let b = BoundingBox::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
                rng.random_range(-50.0..50.0),
            );
            let m = Affine::new([
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-20.0..20.0),
                rng.random_range(-20.0..20.0),
            ]);
            if m.determinant().abs() < 0.1 {
                continue;
            }
            let back = b.transform(m).transform(m.inverse());
            assert!(back.contains_box(&b, 1e-6), "{b:?} under {m:?} gave {back:?}");
        }
    }
}

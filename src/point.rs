// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positions in user space.

use core::fmt;
use core::ops::{Add, Sub};

use crate::Vec2;

/// A position in SVG user space, y pointing down.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin, where every path walk starts.
    pub const ZERO: Point = Point::new(0.0, 0.0);

    /// The point `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The displacement of this point from the origin.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Halfway between two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// The point reflection of `other` about `self`, `2·self − other`.
    ///
    /// This is how the implicit first control point of a smooth curve
    /// command is derived from the previous command's last control point.
    #[inline]
    pub fn reflect(self, other: Point) -> Point {
        Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vec2) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, v: Vec2) -> Point {
        Point::new(self.x - v.x, self.y - v.y)
    }
}

impl Sub for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

/// Written as `x,y`, the way coordinate pairs appear in path data; a
/// precision applies to both coordinates.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.x, f)?;
        f.write_str(",")?;
        fmt::Display::fmt(&self.y, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differences() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p - Vec2::new(10.0, 0.0), Point::new(-7.0, 4.0));
        assert_eq!(p - Point::new(-5.0, 101.0), Vec2::new(8.0, -97.0));
        assert_eq!(Point::ZERO.distance(p), 5.0);
        assert_eq!(p.midpoint(Point::ZERO), Point::new(1.5, 2.0));
    }

    #[test]
    fn reflect() {
        // 2·end − ctrl2, as for an `S` following a `C`.
        let end = Point::new(10.0, 10.0);
        let ctrl2 = Point::new(8.0, 4.0);
        assert_eq!(end.reflect(ctrl2), Point::new(12.0, 16.0));
    }

    #[test]
    fn display() {
        let p = Point::new(0.12345, -9.87654);
        assert_eq!(p.to_string(), "0.12345,-9.87654");
        assert_eq!(format!("{p:.2}"), "0.12,-9.88");
    }
}

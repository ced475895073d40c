// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rewriting path data with a transform applied to its coordinates.

use core::fmt::{self, Write};

use crate::{parse_path, parse_transform, walk, Affine, BoundsError, Command, PathEl, Point};

/// Decimal places kept in rewritten coordinates.
const COORDINATE_DECIMALS: u32 = 2;

/// Apply the transform list `transform` to the path data `d`.
///
/// The result draws the same outline in the transformed space, using only
/// absolute `M`, `L`, `C` and `Z` commands: lines of every kind become `L`,
/// and quadratics and arcs are lowered to `C`. Coordinates are rounded to
/// two decimals.
///
/// # Errors
///
/// Malformed path data or a malformed transform is a [`BoundsError`].
///
/// ```
/// use svgbounds::transform_path_data;
///
/// let d = transform_path_data("m10 10 h5 v5 z", "translate(1 2)").unwrap();
/// assert_eq!(d, "M11 12L16 12L16 17Z");
/// ```
pub fn transform_path_data(d: &str, transform: &str) -> Result<String, BoundsError> {
    let affine = parse_transform(transform)?;
    let commands = parse_path(d)?;
    Ok(write_path_data(&commands, affine))
}

/// Write the commands as absolute path data, mapping every point through
/// `affine`.
pub fn write_path_data(commands: &[Command], affine: Affine) -> String {
    PathData { commands, affine }.to_string()
}

/// Commands written as absolute path data under a transform.
struct PathData<'a> {
    commands: &'a [Command],
    affine: Affine,
}

impl fmt::Display for PathData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        walk(self.commands, |el| {
            if result.is_ok() {
                result = write_element(f, self.affine, el);
            }
        });
        result
    }
}

fn write_element(out: &mut fmt::Formatter<'_>, affine: Affine, el: PathEl) -> fmt::Result {
    let pt = |p: Point| Coord(affine.transform_point_rounded(p, COORDINATE_DECIMALS));
    match el {
        PathEl::MoveTo(p) => write!(out, "M{}", pt(p)),
        PathEl::LineTo(p) => write!(out, "L{}", pt(p)),
        PathEl::CurveTo(c) => write!(out, "C{} {} {}", pt(c.p1), pt(c.p2), pt(c.p3)),
        PathEl::ClosePath => out.write_char('Z'),
    }
}

/// A point written as `x y`.
struct Coord(Point);

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding zero turns `-0` into `0`.
        write!(f, "{} {}", self.0.x + 0.0, self.0.y + 0.0)
    }
}

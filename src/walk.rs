// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking path commands into absolute drawing elements, and bounding them.
//!
//! Path commands are relative to state left behind by earlier commands: the
//! current point, the start of the sub-path, and for the smooth curve
//! commands the control point of the previous curve. [`PathCursor`] holds
//! that state and is threaded by value through a fold over the commands, so
//! every step is a plain function from one cursor to the next.

use core::ops::Mul;

use crate::bbox::BoxAccumulator;
use crate::{Affine, Angle, BoundingBox, Command, CommandKind, CubicBez, Point, QuadBez, SvgArc, Vec2};

/// An absolute drawing element produced by walking a path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// sub-path.
    MoveTo(Point),
    /// Draw a line from the current location to the point. An arc with a
    /// zero radius is drawn as this line to its end point.
    LineTo(Point),
    /// Draw a cubic Bézier. Quadratics and arcs are lowered to this.
    CurveTo(CubicBez),
    /// Close off the sub-path.
    ClosePath,
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::CurveTo(c) => PathEl::CurveTo(self * c),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

/// The control point a smooth curve command reflects.
///
/// Cubic and quadratic curves keep separate memories: `S` only reflects the
/// control point of `C` or `S`, and `T` only that of `Q` or `T`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reflection {
    /// The reflected second control point of a cubic.
    Cubic(Point),
    /// The reflected control point of a quadratic.
    Quadratic(Point),
}

/// The implicit state of a path walk.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathCursor {
    /// The current point.
    pub current: Point,
    /// Where the current sub-path started; close path returns here.
    pub subpath_start: Point,
    /// The control point available for reflection by the next command.
    pub reflection: Option<Reflection>,
}

impl PathCursor {
    /// Apply one command, handing every element it draws to `sink`, and
    /// return the cursor for the next command.
    pub fn step(self, command: &Command, sink: &mut impl FnMut(PathEl)) -> PathCursor {
        tracing::trace!(
            command = %command.letter(),
            args = command.args.len(),
            current = %self.current,
            "path command"
        );
        if command.kind == CommandKind::ClosePath {
            sink(PathEl::ClosePath);
            return PathCursor {
                current: self.subpath_start,
                subpath_start: self.subpath_start,
                reflection: None,
            };
        }
        command
            .groups()
            .enumerate()
            .fold(self, |cursor, (index, args)| {
                cursor.group(command.kind, command.relative, index, args, sink)
            })
    }

    /// Apply one argument group of a command.
    fn group(
        self,
        kind: CommandKind,
        relative: bool,
        index: usize,
        args: &[f64],
        sink: &mut impl FnMut(PathEl),
    ) -> PathCursor {
        let base = if relative {
            self.current.to_vec2()
        } else {
            Vec2::ZERO
        };
        let pt = |i: usize| Point::new(args[i], args[i + 1]) + base;
        match kind {
            CommandKind::MoveTo if index == 0 => {
                let p = pt(0);
                sink(PathEl::MoveTo(p));
                PathCursor {
                    current: p,
                    subpath_start: p,
                    reflection: None,
                }
            }
            // Extra pairs after a move are implicit lines.
            CommandKind::MoveTo | CommandKind::LineTo => self.line(pt(0), sink),
            CommandKind::HorizontalLineTo => {
                let x = args[0] + base.x;
                self.line(Point::new(x, self.current.y), sink)
            }
            CommandKind::VerticalLineTo => {
                let y = args[0] + base.y;
                self.line(Point::new(self.current.x, y), sink)
            }
            CommandKind::CubicCurveTo => self.cubic(pt(0), pt(2), pt(4), sink),
            CommandKind::SmoothCubicCurveTo => {
                let p1 = match self.reflection {
                    Some(Reflection::Cubic(p)) => p,
                    _ => self.current,
                };
                self.cubic(p1, pt(0), pt(2), sink)
            }
            CommandKind::QuadraticCurveTo => self.quad(pt(0), pt(2), sink),
            CommandKind::SmoothQuadraticCurveTo => {
                let p1 = match self.reflection {
                    Some(Reflection::Quadratic(p)) => p,
                    _ => self.current,
                };
                self.quad(p1, pt(0), sink)
            }
            CommandKind::ArcTo => {
                let arc = SvgArc {
                    from: self.current,
                    to: pt(5),
                    radii: Vec2::new(args[0], args[1]),
                    x_rotation: Angle::from_degrees(args[2]),
                    large_arc: args[3] != 0.0,
                    sweep: args[4] != 0.0,
                };
                self.arc(&arc, sink)
            }
            // Close path has no argument groups.
            CommandKind::ClosePath => self,
        }
    }

    fn line(self, p: Point, sink: &mut impl FnMut(PathEl)) -> PathCursor {
        sink(PathEl::LineTo(p));
        PathCursor {
            current: p,
            reflection: None,
            ..self
        }
    }

    fn cubic(self, p1: Point, p2: Point, p3: Point, sink: &mut impl FnMut(PathEl)) -> PathCursor {
        sink(PathEl::CurveTo(CubicBez::new(self.current, p1, p2, p3)));
        PathCursor {
            current: p3,
            reflection: Some(Reflection::Cubic(p3.reflect(p2))),
            ..self
        }
    }

    fn quad(self, p1: Point, p2: Point, sink: &mut impl FnMut(PathEl)) -> PathCursor {
        let q = QuadBez::new(self.current, p1, p2);
        sink(PathEl::CurveTo(q.raise()));
        PathCursor {
            current: p2,
            reflection: Some(Reflection::Quadratic(p2.reflect(p1))),
            ..self
        }
    }

    fn arc(self, arc: &SvgArc, sink: &mut impl FnMut(PathEl)) -> PathCursor {
        let cubics = arc.to_cubics();
        if cubics.is_empty() {
            if arc.from != arc.to {
                tracing::debug!(from = %arc.from, to = %arc.to, "arc with zero radius drawn as a line");
                sink(PathEl::LineTo(arc.to));
            } else {
                tracing::debug!(at = %arc.from, "arc with coincident endpoints skipped");
            }
        }
        for c in cubics {
            sink(PathEl::CurveTo(c));
        }
        PathCursor {
            current: arc.to,
            reflection: None,
            ..self
        }
    }
}

/// Walk `commands` from the origin, handing every absolute element to
/// `sink`. Returns the final cursor.
///
/// Arcs are lowered to cubics. An arc with a zero radius draws a straight
/// [`PathEl::LineTo`] to its end point, and an arc whose end points coincide
/// draws nothing. Either way the next `S` or `T` has no control point to
/// reflect.
///
/// ```
/// use svgbounds::{parse_path, walk, PathEl, Point};
///
/// let cmds = parse_path("m10 10 h5 v5 z").unwrap();
/// let mut els = Vec::new();
/// walk(&cmds, |el| els.push(el));
/// assert_eq!(els[2], PathEl::LineTo(Point::new(15.0, 15.0)));
/// assert_eq!(els[3], PathEl::ClosePath);
/// ```
pub fn walk(commands: &[Command], mut sink: impl FnMut(PathEl)) -> PathCursor {
    commands
        .iter()
        .fold(PathCursor::default(), |cursor, command| {
            cursor.step(command, &mut sink)
        })
}

/// How the curves of a path are bounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundingMode {
    /// Bound each curve by its control points. The result always contains
    /// the shape and may be larger; browsers report boxes this way.
    #[default]
    Approximate,
    /// Bound each curve by its extreme points, and ellipses under transforms
    /// in closed form.
    Exact,
}

/// A strategy for bounding one cubic segment.
pub trait CurveEvaluator {
    /// A box containing `curve`.
    fn curve_bounds(&self, curve: &CubicBez) -> BoundingBox;
}

/// Bounds a curve by its four control points.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlHull;

impl CurveEvaluator for ControlHull {
    #[inline]
    fn curve_bounds(&self, curve: &CubicBez) -> BoundingBox {
        curve.control_box()
    }
}

/// Bounds a curve tightly by solving for its extrema.
#[derive(Clone, Copy, Debug, Default)]
pub struct Extrema;

impl CurveEvaluator for Extrema {
    #[inline]
    fn curve_bounds(&self, curve: &CubicBez) -> BoundingBox {
        curve.bounding_box()
    }
}

/// The bounding box of a parsed path.
///
/// Returns `None` when the path draws nothing.
///
/// ```
/// use svgbounds::{parse_path, path_bounding_box, BoundingBox, BoundingMode};
///
/// let cmds = parse_path("M0 0 C0 10 10 10 10 0").unwrap();
/// let rough = path_bounding_box(&cmds, BoundingMode::Approximate).unwrap();
/// assert_eq!(rough, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
/// let exact = path_bounding_box(&cmds, BoundingMode::Exact).unwrap();
/// assert!((exact.bottom() - 7.5).abs() < 1e-3);
/// ```
pub fn path_bounding_box(commands: &[Command], mode: BoundingMode) -> Option<BoundingBox> {
    path_bounding_box_under(commands, Affine::IDENTITY, mode)
}

/// The bounding box of a parsed path after applying `affine`.
///
/// Every segment is mapped before it is bounded, so the result is as tight
/// as the mode allows in the transformed space, not the transformed box of
/// the untransformed path.
pub fn path_bounding_box_under(
    commands: &[Command],
    affine: Affine,
    mode: BoundingMode,
) -> Option<BoundingBox> {
    match mode {
        BoundingMode::Approximate => bounds_with(commands, affine, &ControlHull),
        BoundingMode::Exact => bounds_with(commands, affine, &Extrema),
    }
}

/// The bounding box of a parsed path with a caller-supplied curve strategy.
pub fn bounds_with<E: CurveEvaluator + ?Sized>(
    commands: &[Command],
    affine: Affine,
    evaluator: &E,
) -> Option<BoundingBox> {
    let mut acc = BoxAccumulator::default();
    walk(commands, |el| match affine * el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => acc.add_point(p),
        PathEl::CurveTo(c) => acc.add_box(evaluator.curve_bounds(&c)),
        PathEl::ClosePath => {}
    });
    acc.finish()
}

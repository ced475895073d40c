// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding boxes of SVG shapes, without rendering them.
//!
//! The svgbounds library computes the axis-aligned extent of SVG elements
//! from their attributes alone. Path data is parsed and walked into absolute
//! segments, quadratics and elliptical arcs are lowered to cubic Béziers, and
//! each segment is bounded either by its control points or exactly, by
//! solving for its extrema. Transforms are parsed into affine maps; ellipses
//! under a transform are bounded in closed form.
//!
//! # Examples
//!
//! Bounding a path, roughly and exactly:
//! ```
//! use svgbounds::{parse_path, path_bounding_box, BoundingBox, BoundingMode};
//!
//! let commands = parse_path("M10 80 C40 10 65 10 95 80").unwrap();
//! let rough = path_bounding_box(&commands, BoundingMode::Approximate).unwrap();
//! assert_eq!(rough, BoundingBox::new(10.0, 10.0, 95.0, 80.0));
//!
//! let exact = path_bounding_box(&commands, BoundingMode::Exact).unwrap();
//! assert!((exact.top() - 27.5).abs() < 1e-3);
//! ```
//!
//! Bounding an element from its attributes:
//! ```
//! use svgbounds::{bounding_box, Attributes, BoundingMode};
//!
//! let mut attrs = Attributes::new();
//! attrs.insert("rx".into(), "1".into());
//! attrs.insert("ry".into(), "1".into());
//! attrs.insert("transform".into(), "matrix(1,0,0.5,1,0,0)".into());
//!
//! let bbox = bounding_box("ellipse", &attrs, BoundingMode::Exact)
//!     .unwrap()
//!     .unwrap();
//! assert!((bbox.width() - 2.236).abs() < 1e-3);
//! assert!((bbox.height() - 2.0).abs() < 1e-9);
//! ```
//!
//! # Features
//!
//! The `serde` feature derives `Serialize` and `Deserialize` for the value
//! types, [`BoundingMode`], [`AttrValue`] and [`Shape`].

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    single_use_lifetimes,
    variant_size_differences,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::missing_assert_message,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

mod affine;
mod angle;
mod arc;
mod bbox;
mod common;
mod cubicbez;
mod ellipse;
mod error;
mod number;
mod path_data;
mod point;
mod quadbez;
mod shape;
mod svg;
mod transform;
mod vec2;
mod walk;

pub use crate::affine::Affine;
pub use crate::angle::Angle;
pub use crate::arc::SvgArc;
pub use crate::bbox::BoundingBox;
pub use crate::cubicbez::CubicBez;
pub use crate::ellipse::Ellipse;
pub use crate::error::{BoundsError, PathError, TransformError};
pub use crate::number::round_to;
pub use crate::path_data::{transform_path_data, write_path_data};
pub use crate::point::Point;
pub use crate::quadbez::QuadBez;
pub use crate::shape::{bounding_box, AttrValue, Attributes, Shape};
pub use crate::svg::{parse_path, split_commands, Command, CommandKind};
pub use crate::transform::parse_transform;
pub use crate::vec2::Vec2;
pub use crate::walk::{
    bounds_with, path_bounding_box, path_bounding_box_under, walk, BoundingMode, ControlHull,
    CurveEvaluator, Extrema, PathCursor, PathEl, Reflection,
};

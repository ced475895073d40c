// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG shape elements and their bounding boxes.
//!
//! Elements arrive as a tag name and a dictionary of attributes, the way an
//! XML or DOM adapter hands them over. [`Shape::from_attributes`] normalizes
//! them once into a closed [`Shape`] value, and [`Shape::bounding_box`]
//! dispatches on it.

use std::collections::BTreeMap;

use crate::{
    parse_path, parse_transform, path_bounding_box_under, Affine, BoundingBox, BoundingMode,
    BoundsError, Command, Ellipse, Point,
};

/// The value of one attribute.
///
/// Adapters that already know an attribute is numeric may pass a
/// [`Number`](AttrValue::Number); everything else is passed as text and
/// parsed where a number is needed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// A numeric value.
    Number(f64),
    /// Attribute text as written.
    Text(String),
}

impl From<f64> for AttrValue {
    #[inline]
    fn from(value: f64) -> AttrValue {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    #[inline]
    fn from(value: &str) -> AttrValue {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    #[inline]
    fn from(value: String) -> AttrValue {
        AttrValue::Text(value)
    }
}

/// The attributes of one element, by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A shape element, with its attributes parsed.
///
/// Position attributes that are absent are zero. A `transform`, where the
/// element kind has one, is kept as the composed affine map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// `<path>`.
    Path {
        /// The parsed path data.
        commands: Vec<Command>,
        /// The element transform.
        transform: Option<Affine>,
    },
    /// `<rect>`.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// The element transform.
        transform: Option<Affine>,
    },
    /// `<circle>`.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// The element transform.
        transform: Option<Affine>,
    },
    /// `<ellipse>`.
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
        /// The element transform.
        transform: Option<Affine>,
    },
    /// `<line>`.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// `<polygon>`.
    Polygon {
        /// The vertices.
        points: Vec<Point>,
    },
    /// `<polyline>`.
    Polyline {
        /// The vertices.
        points: Vec<Point>,
    },
    /// `<image>`. The image is placed at the origin and positioned only by
    /// its transform.
    Image {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// The element transform.
        transform: Option<Affine>,
    },
    /// `<linearGradient>`, bounded by its gradient vector.
    LinearGradient {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// `<radialGradient>`, bounded by its end circle.
    RadialGradient {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
}

impl Shape {
    /// Normalize the attributes of an element with tag name `tag`.
    ///
    /// Tag names are matched case-insensitively. Returns `Ok(None)` for a tag
    /// that is not a shape.
    ///
    /// # Errors
    ///
    /// A missing or unusable structurally required attribute (such as the
    /// `r` of a circle), malformed path data, or a malformed `transform` is
    /// a [`BoundsError`].
    pub fn from_attributes(tag: &str, attrs: &Attributes) -> Result<Option<Shape>, BoundsError> {
        let shape = match tag.to_ascii_lowercase().as_str() {
            "path" => {
                let a = AttrReader::new("path", attrs);
                Shape::Path {
                    commands: parse_path(a.required_text("d")?)?,
                    transform: a.transform()?,
                }
            }
            "rect" => {
                let a = AttrReader::new("rect", attrs);
                Shape::Rect {
                    x: a.number("x"),
                    y: a.number("y"),
                    width: a.required_number("width")?,
                    height: a.required_number("height")?,
                    transform: a.transform()?,
                }
            }
            "circle" => {
                let a = AttrReader::new("circle", attrs);
                Shape::Circle {
                    cx: a.number("cx"),
                    cy: a.number("cy"),
                    r: a.required_number("r")?,
                    transform: a.transform()?,
                }
            }
            "ellipse" => {
                let a = AttrReader::new("ellipse", attrs);
                Shape::Ellipse {
                    cx: a.number("cx"),
                    cy: a.number("cy"),
                    rx: a.required_number("rx")?,
                    ry: a.required_number("ry")?,
                    transform: a.transform()?,
                }
            }
            "line" => {
                let a = AttrReader::new("line", attrs);
                Shape::Line {
                    x1: a.number("x1"),
                    y1: a.number("y1"),
                    x2: a.number("x2"),
                    y2: a.number("y2"),
                }
            }
            "polygon" => Shape::Polygon {
                points: AttrReader::new("polygon", attrs).points()?,
            },
            "polyline" => Shape::Polyline {
                points: AttrReader::new("polyline", attrs).points()?,
            },
            "image" => {
                let a = AttrReader::new("image", attrs);
                Shape::Image {
                    width: a.required_number("width")?,
                    height: a.required_number("height")?,
                    transform: a.transform()?,
                }
            }
            "lineargradient" => {
                let a = AttrReader::new("linearGradient", attrs);
                Shape::LinearGradient {
                    x1: a.number("x1"),
                    y1: a.number("y1"),
                    x2: a.number("x2"),
                    y2: a.number("y2"),
                }
            }
            "radialgradient" => {
                let a = AttrReader::new("radialGradient", attrs);
                Shape::RadialGradient {
                    cx: a.number("cx"),
                    cy: a.number("cy"),
                    r: a.required_number("r")?,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(shape))
    }

    /// The element name of this kind of shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Path { .. } => "path",
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Line { .. } => "line",
            Shape::Polygon { .. } => "polygon",
            Shape::Polyline { .. } => "polyline",
            Shape::Image { .. } => "image",
            Shape::LinearGradient { .. } => "linearGradient",
            Shape::RadialGradient { .. } => "radialGradient",
        }
    }

    /// The bounding box of the shape in the coordinate space its
    /// `transform` maps into.
    ///
    /// Returns `Ok(None)` for a path that draws nothing or a polygon without
    /// points.
    ///
    /// # Errors
    ///
    /// In [`BoundingMode::Exact`], a circle or ellipse under a singular
    /// transform is [`BoundsError::SingularTransform`].
    pub fn bounding_box(&self, mode: BoundingMode) -> Result<Option<BoundingBox>, BoundsError> {
        let bbox = match *self {
            Shape::Path {
                ref commands,
                transform,
            } => {
                return Ok(path_bounding_box_under(
                    commands,
                    transform.unwrap_or_default(),
                    mode,
                ))
            }
            Shape::Rect {
                x,
                y,
                width,
                height,
                transform,
            } => mapped(BoundingBox::from_origin_size((x, y), width, height), transform),
            Shape::Circle { cx, cy, r, transform } => {
                ellipse_bounds(Ellipse::circle((cx, cy), r), transform, mode)?
            }
            Shape::Ellipse {
                cx,
                cy,
                rx,
                ry,
                transform,
            } => ellipse_bounds(Ellipse::new((cx, cy), (rx, ry)), transform, mode)?,
            Shape::Line { x1, y1, x2, y2 } | Shape::LinearGradient { x1, y1, x2, y2 } => {
                BoundingBox::from_points((x1, y1), (x2, y2))
            }
            Shape::Polygon { ref points } | Shape::Polyline { ref points } => {
                return Ok(BoundingBox::enclosing(points.iter().copied()))
            }
            Shape::Image {
                width,
                height,
                transform,
            } => mapped(
                BoundingBox::from_origin_size(Point::ZERO, width, height),
                transform,
            ),
            Shape::RadialGradient { cx, cy, r } => Ellipse::circle((cx, cy), r).bounding_box(),
        };
        Ok(Some(bbox))
    }
}

fn mapped(bbox: BoundingBox, transform: Option<Affine>) -> BoundingBox {
    match transform {
        Some(affine) => bbox.transform(affine),
        None => bbox,
    }
}

fn ellipse_bounds(
    ellipse: Ellipse,
    transform: Option<Affine>,
    mode: BoundingMode,
) -> Result<BoundingBox, BoundsError> {
    match (transform, mode) {
        (Some(affine), BoundingMode::Exact) => ellipse.bounding_box_under(affine),
        (transform, _) => Ok(mapped(ellipse.bounding_box(), transform)),
    }
}

/// The bounding box of the element with tag name `tag` and attributes
/// `attrs`.
///
/// Returns `Ok(None)` when the tag is not a shape, or the shape has nothing
/// to bound.
///
/// # Errors
///
/// See [`Shape::from_attributes`] and [`Shape::bounding_box`].
///
/// ```
/// use svgbounds::{bounding_box, Attributes, BoundingBox, BoundingMode};
///
/// let mut attrs = Attributes::new();
/// attrs.insert("width".into(), "10".into());
/// attrs.insert("height".into(), 20.0.into());
/// attrs.insert("transform".into(), "translate(5 5)".into());
/// let bbox = bounding_box("rect", &attrs, BoundingMode::Approximate).unwrap();
/// assert_eq!(bbox, Some(BoundingBox::new(5.0, 5.0, 15.0, 25.0)));
///
/// assert_eq!(bounding_box("text", &attrs, BoundingMode::Exact), Ok(None));
/// ```
pub fn bounding_box(
    tag: &str,
    attrs: &Attributes,
    mode: BoundingMode,
) -> Result<Option<BoundingBox>, BoundsError> {
    let Some(shape) = Shape::from_attributes(tag, attrs)? else {
        tracing::debug!(tag, "not a shape");
        return Ok(None);
    };
    let bbox = shape.bounding_box(mode)?;
    tracing::debug!(kind = shape.kind(), ?mode, ?bbox, "shape bounds");
    Ok(bbox)
}

/// Typed access to the attributes of one element.
struct AttrReader<'a> {
    shape: &'static str,
    attrs: &'a Attributes,
}

impl<'a> AttrReader<'a> {
    fn new(shape: &'static str, attrs: &'a Attributes) -> AttrReader<'a> {
        AttrReader { shape, attrs }
    }

    /// An optional number; absent or unreadable values are zero.
    fn number(&self, name: &str) -> f64 {
        match self.attrs.get(name) {
            Some(AttrValue::Number(v)) if v.is_finite() => *v,
            Some(AttrValue::Text(text)) => leading_number(text).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    fn required_number(&self, name: &'static str) -> Result<f64, BoundsError> {
        let invalid = |value: String| BoundsError::InvalidAttribute {
            attribute: name,
            value,
        };
        match self.attrs.get(name) {
            None => Err(self.missing(name)),
            Some(AttrValue::Number(v)) if v.is_finite() => Ok(*v),
            Some(AttrValue::Number(v)) => Err(invalid(v.to_string())),
            Some(AttrValue::Text(text)) => leading_number(text).ok_or_else(|| invalid(text.clone())),
        }
    }

    fn text(&self, name: &'static str) -> Result<Option<&'a str>, BoundsError> {
        match self.attrs.get(name) {
            None => Ok(None),
            Some(AttrValue::Text(text)) => Ok(Some(text.as_str())),
            Some(AttrValue::Number(v)) => Err(BoundsError::InvalidAttribute {
                attribute: name,
                value: v.to_string(),
            }),
        }
    }

    fn required_text(&self, name: &'static str) -> Result<&'a str, BoundsError> {
        self.text(name)?.ok_or_else(|| self.missing(name))
    }

    fn transform(&self) -> Result<Option<Affine>, BoundsError> {
        match self.text("transform")? {
            Some(text) => Ok(Some(parse_transform(text)?)),
            None => Ok(None),
        }
    }

    /// The `points` list of a polygon or polyline.
    ///
    /// Coordinates are separated by commas or whitespace. A trailing odd
    /// coordinate has no partner and is dropped.
    fn points(&self) -> Result<Vec<Point>, BoundsError> {
        let text = self.required_text("points")?;
        let coords = text
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                leading_number(token).ok_or_else(|| BoundsError::InvalidAttribute {
                    attribute: "points",
                    value: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        if coords.len() % 2 != 0 {
            tracing::debug!(shape = self.shape, "odd coordinate in points dropped");
        }
        Ok(coords
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect())
    }

    fn missing(&self, attribute: &'static str) -> BoundsError {
        BoundsError::MissingAttribute {
            shape: self.shape,
            attribute,
        }
    }
}

/// The longest numeric prefix of `text`, after leading whitespace.
///
/// Attribute values such as `10px` or `50.5%` read as their number.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    (1..=end)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttrValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    fn text(s: &str) -> AttrValue {
        AttrValue::from(s)
    }

    fn assert_box_near(got: BoundingBox, want: BoundingBox) {
        let near = (got.left() - want.left()).abs() < 1e-9
            && (got.top() - want.top()).abs() < 1e-9
            && (got.right() - want.right()).abs() < 1e-9
            && (got.bottom() - want.bottom()).abs() < 1e-9;
        assert!(near, "{got:?} != {want:?}");
    }

    fn bounds(tag: &str, pairs: &[(&str, AttrValue)], mode: BoundingMode) -> BoundingBox {
        bounding_box(tag, &attrs(pairs), mode).unwrap().unwrap()
    }

    #[test]
    fn lenient_numbers() {
        assert_eq!(leading_number("10"), Some(10.0));
        assert_eq!(leading_number(" 10px"), Some(10.0));
        assert_eq!(leading_number("50.5%"), Some(50.5));
        assert_eq!(leading_number("1e2e"), Some(100.0));
        assert_eq!(leading_number("-.5"), Some(-0.5));
        assert_eq!(leading_number("px"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn unknown_tag() {
        let a = attrs(&[("x", 1.0.into())]);
        assert_eq!(Shape::from_attributes("text", &a), Ok(None));
        assert_eq!(bounding_box("g", &a, BoundingMode::Exact), Ok(None));
    }

    #[test]
    fn tag_is_case_insensitive() {
        let a = attrs(&[("r", 5.0.into())]);
        assert_eq!(
            Shape::from_attributes("CIRCLE", &a).unwrap().unwrap().kind(),
            "circle"
        );
        assert_eq!(
            Shape::from_attributes("RadialGradient", &a)
                .unwrap()
                .unwrap()
                .kind(),
            "radialGradient"
        );
    }

    #[test]
    fn missing_and_invalid_attributes() {
        assert_eq!(
            bounding_box("circle", &attrs(&[("cx", 1.0.into())]), BoundingMode::Exact),
            Err(BoundsError::MissingAttribute {
                shape: "circle",
                attribute: "r"
            })
        );
        assert_eq!(
            bounding_box("rect", &attrs(&[("width", text("wide"))]), BoundingMode::Exact),
            Err(BoundsError::InvalidAttribute {
                attribute: "width",
                value: "wide".to_string()
            })
        );
        assert_eq!(
            bounding_box("path", &attrs(&[("d", 3.0.into())]), BoundingMode::Exact),
            Err(BoundsError::InvalidAttribute {
                attribute: "d",
                value: "3".to_string()
            })
        );
        assert!(matches!(
            bounding_box("path", &attrs(&[("d", text("M1 2 3"))]), BoundingMode::Exact),
            Err(BoundsError::MalformedPathData(_))
        ));
        assert!(matches!(
            bounding_box(
                "rect",
                &attrs(&[
                    ("width", 1.0.into()),
                    ("height", 1.0.into()),
                    ("transform", text("spin(3)"))
                ]),
                BoundingMode::Exact
            ),
            Err(BoundsError::Transform(_))
        ));
    }

    #[test]
    fn optional_positions_default_to_zero() {
        let b = bounds(
            "rect",
            &[("x", text("junk")), ("width", text("4px")), ("height", 2.0.into())],
            BoundingMode::Approximate,
        );
        assert_eq!(b, BoundingBox::new(0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn rect_under_rotation() {
        let b = bounds(
            "rect",
            &[
                ("width", 10.0.into()),
                ("height", 20.0.into()),
                ("transform", text("rotate(90)")),
            ],
            BoundingMode::Approximate,
        );
        assert_box_near(b, BoundingBox::new(-20.0, 0.0, 0.0, 10.0));
    }

    #[test]
    fn circle_modes() {
        let pairs = [
            ("cx", 10.0.into()),
            ("cy", 10.0.into()),
            ("r", 5.0.into()),
            ("transform", text("rotate(45 10 10)")),
        ];
        let exact = bounds("circle", &pairs, BoundingMode::Exact);
        assert_box_near(exact, BoundingBox::new(5.0, 5.0, 15.0, 15.0));
        let rough = bounds("circle", &pairs, BoundingMode::Approximate);
        let half = 5.0 * 2f64.sqrt();
        assert_box_near(
            rough,
            BoundingBox::new(10.0 - half, 10.0 - half, 10.0 + half, 10.0 + half),
        );
    }

    #[test]
    fn ellipse_under_shear() {
        let pairs = [
            ("rx", 1.0.into()),
            ("ry", 1.0.into()),
            ("transform", text("matrix(1,0,0.5,1,0,0)")),
        ];
        let b = bounds("ellipse", &pairs, BoundingMode::Exact);
        let half = 1.25f64.sqrt();
        assert_box_near(b, BoundingBox::new(-half, -1.0, half, 1.0));
        let singular = [
            ("rx", 1.0.into()),
            ("ry", 1.0.into()),
            ("transform", text("scale(0 1)")),
        ];
        assert_eq!(
            bounding_box("ellipse", &attrs(&singular), BoundingMode::Exact),
            Err(BoundsError::SingularTransform)
        );
        // The mapped box needs no inverse.
        let b = bounds("ellipse", &singular, BoundingMode::Approximate);
        assert_box_near(b, BoundingBox::new(0.0, -1.0, 0.0, 1.0));
    }

    #[test]
    fn path_with_transform() {
        let pairs = [
            ("d", text("M0 0 C0 10 10 10 10 0")),
            ("transform", text("translate(100)")),
        ];
        let rough = bounds("path", &pairs, BoundingMode::Approximate);
        assert_box_near(rough, BoundingBox::new(100.0, 0.0, 110.0, 10.0));
        let exact = bounds("path", &pairs, BoundingMode::Exact);
        assert!((exact.bottom() - 7.5).abs() < 1e-3, "{exact:?}");
    }

    #[test]
    fn empty_path() {
        let a = attrs(&[("d", text(""))]);
        assert_eq!(bounding_box("path", &a, BoundingMode::Exact), Ok(None));
    }

    #[test]
    fn lines_and_polygons() {
        let b = bounds(
            "line",
            &[("x1", 5.0.into()), ("y1", 1.0.into()), ("x2", 1.0.into()), ("y2", 5.0.into())],
            BoundingMode::Exact,
        );
        assert_eq!(b, BoundingBox::new(1.0, 1.0, 5.0, 5.0));
        let pts = text("10,20 30,5\n-4 8,\t12 40 7");
        let b = bounds("polygon", &[("points", pts.clone())], BoundingMode::Exact);
        assert_eq!(b, BoundingBox::new(-4.0, 5.0, 30.0, 40.0));
        let b = bounds("polyline", &[("points", pts)], BoundingMode::Exact);
        assert_eq!(b, BoundingBox::new(-4.0, 5.0, 30.0, 40.0));
        let a = attrs(&[("points", text("  "))]);
        assert_eq!(bounding_box("polygon", &a, BoundingMode::Exact), Ok(None));
    }

    #[test]
    fn image_is_placed_by_transform() {
        let pairs = [
            ("x", 100.0.into()),
            ("width", 10.0.into()),
            ("height", 5.0.into()),
            ("transform", text("matrix(1 0 0 1 3 4)")),
        ];
        let b = bounds("image", &pairs, BoundingMode::Approximate);
        assert_eq!(b, BoundingBox::new(3.0, 4.0, 13.0, 9.0));
        let b = bounds(
            "image",
            &[("width", 10.0.into()), ("height", 5.0.into())],
            BoundingMode::Approximate,
        );
        assert_eq!(b, BoundingBox::new(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn gradients() {
        let b = bounds(
            "linearGradient",
            &[("x1", 10.0.into()), ("x2", 2.0.into()), ("y2", 3.0.into())],
            BoundingMode::Exact,
        );
        assert_eq!(b, BoundingBox::new(2.0, 0.0, 10.0, 3.0));
        let b = bounds(
            "radialGradient",
            &[("cx", 5.0.into()), ("cy", 5.0.into()), ("r", 2.0.into())],
            BoundingMode::Exact,
        );
        assert_eq!(b, BoundingBox::new(3.0, 3.0, 7.0, 7.0));
    }
}

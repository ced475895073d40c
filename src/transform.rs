// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of the SVG `transform` attribute.

use core::str::FromStr;

use smallvec::SmallVec;

use crate::{Affine, Angle, TransformError};

/// Arguments of one transform function; `matrix` has the most, with six.
type Args<'a> = SmallVec<[&'a str; 6]>;

/// Parse a transform list into a single affine map.
///
/// Supported functions are `matrix`, `translate`, `translateX`, `translateY`,
/// `scale`, `scaleX`, `scaleY`, `rotate`, `skew`, `skewX` and `skewY`.
/// Functions may be separated by whitespace or commas, and are composed left
/// to right so that the rightmost function applies to the shape first. An
/// empty list is the identity.
///
/// Lengths may carry a `px` suffix. Angles may carry a `deg`, `rad`, `grad`
/// or `turn` suffix and are in degrees otherwise.
///
/// # Errors
///
/// An unknown function name, a wrong number of arguments, an unreadable
/// argument, or a missing closing parenthesis is a [`TransformError`].
///
/// ```
/// use svgbounds::{parse_transform, Affine, Point};
///
/// let m = parse_transform("translate(10 20) scale(2)").unwrap();
/// assert_eq!(m, Affine::translate(10.0, 20.0) * Affine::scale_uniform(2.0));
/// assert_eq!(m * Point::new(1.0, 1.0), Point::new(12.0, 22.0));
/// ```
pub fn parse_transform(s: &str) -> Result<Affine, TransformError> {
    let mut lexer = TransformLexer::new(s);
    let mut affine = Affine::IDENTITY;
    while let Some((name, args)) = lexer.next_function()? {
        affine *= function_affine(name, &args)?;
    }
    Ok(affine)
}

impl FromStr for Affine {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Affine, TransformError> {
        parse_transform(s)
    }
}

fn function_affine(name: &str, args: &[&str]) -> Result<Affine, TransformError> {
    let wrong_count = || TransformError::ArgumentCount {
        function: name.to_owned(),
        count: args.len(),
    };
    let affine = match name {
        "matrix" => {
            let [a, b, c, d, e, f] = args else {
                return Err(wrong_count());
            };
            Affine::new([
                number(a)?,
                number(b)?,
                number(c)?,
                number(d)?,
                length(e)?,
                length(f)?,
            ])
        }
        "translate" => match args {
            [tx] => Affine::translate(length(tx)?, 0.0),
            [tx, ty] => Affine::translate(length(tx)?, length(ty)?),
            _ => return Err(wrong_count()),
        },
        "translateX" => match args {
            [tx] => Affine::translate(length(tx)?, 0.0),
            _ => return Err(wrong_count()),
        },
        "translateY" => match args {
            [ty] => Affine::translate(0.0, length(ty)?),
            _ => return Err(wrong_count()),
        },
        "scale" => match args {
            [s] => Affine::scale_uniform(number(s)?),
            [sx, sy] => Affine::scale(number(sx)?, number(sy)?),
            _ => return Err(wrong_count()),
        },
        "scaleX" => match args {
            [sx] => Affine::scale(number(sx)?, 1.0),
            _ => return Err(wrong_count()),
        },
        "scaleY" => match args {
            [sy] => Affine::scale(1.0, number(sy)?),
            _ => return Err(wrong_count()),
        },
        "rotate" => match args {
            [a] => Affine::rotate(angle(a)?),
            [a, cx, cy] => Affine::rotate_about(angle(a)?, (length(cx)?, length(cy)?)),
            _ => return Err(wrong_count()),
        },
        "skew" => match args {
            [ax] => Affine::skew(angle(ax)?, Angle::ZERO),
            [ax, ay] => Affine::skew(angle(ax)?, angle(ay)?),
            _ => return Err(wrong_count()),
        },
        "skewX" => match args {
            [a] => Affine::skew_x(angle(a)?),
            _ => return Err(wrong_count()),
        },
        "skewY" => match args {
            [a] => Affine::skew_y(angle(a)?),
            _ => return Err(wrong_count()),
        },
        _ => return Err(TransformError::UnknownFunction(name.to_owned())),
    };
    Ok(affine)
}

fn number(text: &str) -> Result<f64, TransformError> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TransformError::InvalidNumber(text.to_owned()))
}

fn length(text: &str) -> Result<f64, TransformError> {
    number(text.strip_suffix("px").unwrap_or(text))
        .map_err(|_| TransformError::InvalidNumber(text.to_owned()))
}

fn angle(text: &str) -> Result<Angle, TransformError> {
    text.parse()
}

/// Splits a transform list into function names and argument tokens.
struct TransformLexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> TransformLexer<'a> {
    fn new(data: &'a str) -> TransformLexer<'a> {
        TransformLexer { data, ix: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.data[self.ix..]
    }

    fn skip_separators(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b',' || c.is_ascii_whitespace()) {
                break;
            }
            self.ix += 1;
        }
    }

    /// Read the next `name(args)` group, or `None` at the end of input.
    fn next_function(&mut self) -> Result<Option<(&'a str, Args<'a>)>, TransformError> {
        self.skip_separators();
        if self.ix >= self.data.len() {
            return Ok(None);
        }
        let start = self.ix;
        let name_len = self
            .rest()
            .bytes()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if name_len == 0 {
            return Err(TransformError::UnexpectedInput(self.rest().to_owned()));
        }
        let name = &self.data[start..start + name_len];
        self.ix += name_len;
        let after_name = self.rest().trim_start();
        let Some(body) = after_name.strip_prefix('(') else {
            return Err(TransformError::UnexpectedInput(
                self.data[start..].to_owned(),
            ));
        };
        let Some(close) = body.find(')') else {
            return Err(TransformError::Unterminated(name.to_owned()));
        };
        let args = body[..close]
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|arg| !arg.is_empty())
            .collect();
        self.ix = self.data.len() - body.len() + close + 1;
        Ok(Some((name, args)))
    }
}

// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// An error produced while parsing path data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// The number of arguments is not a multiple of the command's arity.
    #[error("`{command}` takes groups of {arity} arguments, found {count}")]
    Arity {
        /// The command letter, as written.
        command: char,
        /// The number of arguments found.
        count: usize,
        /// The size of one argument group.
        arity: usize,
    },
    /// A command other than close path was given no arguments.
    #[error("`{command}` requires arguments")]
    MissingArguments {
        /// The command letter, as written.
        command: char,
    },
    /// A numeric token could not be read.
    #[error("invalid number in arguments of `{command}`: \"{text}\"")]
    InvalidNumber {
        /// The command letter, as written.
        command: char,
        /// The unreadable remainder of the argument text.
        text: String,
    },
}

/// An error produced while parsing a `transform` attribute.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The function name is not a known transform function.
    #[error("unknown transform function `{0}`")]
    UnknownFunction(String),
    /// The function was given the wrong number of arguments.
    #[error("`{function}` does not take {count} arguments")]
    ArgumentCount {
        /// The function name.
        function: String,
        /// The number of arguments found.
        count: usize,
    },
    /// An argument is not a finite number.
    #[error("invalid number \"{0}\"")]
    InvalidNumber(String),
    /// An angle argument has an unknown unit or no numeric part.
    #[error("invalid angle \"{0}\"")]
    InvalidAngle(String),
    /// A function's argument list is missing its closing parenthesis.
    #[error("unterminated argument list for `{0}`")]
    Unterminated(String),
    /// Text that is not a transform function was found.
    #[error("unexpected input \"{0}\"")]
    UnexpectedInput(String),
}

/// An error produced while computing the bounding box of a shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// The path data of a `path` could not be parsed.
    #[error("malformed path data: {0}")]
    MalformedPathData(#[from] PathError),
    /// The `transform` attribute could not be parsed.
    #[error("malformed transform: {0}")]
    Transform(#[from] TransformError),
    /// The transform cannot be inverted, so the mapped shape has no
    /// well-defined extent.
    #[error("transform is singular")]
    SingularTransform,
    /// A structurally required attribute is absent.
    #[error("`{shape}` is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// The shape kind.
        shape: &'static str,
        /// The attribute name.
        attribute: &'static str,
    },
    /// An attribute is present but its value cannot be used.
    #[error("attribute `{attribute}` has invalid value \"{value}\"")]
    InvalidAttribute {
        /// The attribute name.
        attribute: &'static str,
        /// The offending value.
        value: String,
    },
}

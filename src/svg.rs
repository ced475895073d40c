// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of SVG path data.
//!
//! Path data is split into command letters and their argument text, and the
//! argument text is scanned into numbers. The scanner is deliberately
//! lenient about separators: `l.495.495-3.181 3.182` is four numbers.

use crate::PathError;

/// The kind of a path command, without its absolute/relative flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// `M`: start a new sub-path.
    MoveTo,
    /// `L`: straight line.
    LineTo,
    /// `H`: horizontal line.
    HorizontalLineTo,
    /// `V`: vertical line.
    VerticalLineTo,
    /// `C`: cubic Bézier.
    CubicCurveTo,
    /// `S`: cubic Bézier whose first control point is reflected.
    SmoothCubicCurveTo,
    /// `Q`: quadratic Bézier.
    QuadraticCurveTo,
    /// `T`: quadratic Bézier whose control point is reflected.
    SmoothQuadraticCurveTo,
    /// `A`: elliptical arc.
    ArcTo,
    /// `Z`: close the current sub-path.
    ClosePath,
}

impl CommandKind {
    /// The kind and relative flag of a command letter.
    pub fn from_letter(letter: char) -> Option<(CommandKind, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'C' => CommandKind::CubicCurveTo,
            'S' => CommandKind::SmoothCubicCurveTo,
            'Q' => CommandKind::QuadraticCurveTo,
            'T' => CommandKind::SmoothQuadraticCurveTo,
            'A' => CommandKind::ArcTo,
            'Z' => CommandKind::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The number of arguments in one group of this command.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::ClosePath => 0,
            CommandKind::HorizontalLineTo | CommandKind::VerticalLineTo => 1,
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadraticCurveTo => 2,
            CommandKind::SmoothCubicCurveTo | CommandKind::QuadraticCurveTo => 4,
            CommandKind::CubicCurveTo => 6,
            CommandKind::ArcTo => 7,
        }
    }

    /// The upper-case command letter.
    pub fn letter(self) -> char {
        match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalLineTo => 'H',
            CommandKind::VerticalLineTo => 'V',
            CommandKind::CubicCurveTo => 'C',
            CommandKind::SmoothCubicCurveTo => 'S',
            CommandKind::QuadraticCurveTo => 'Q',
            CommandKind::SmoothQuadraticCurveTo => 'T',
            CommandKind::ArcTo => 'A',
            CommandKind::ClosePath => 'Z',
        }
    }
}

/// One path command with all of its argument groups.
///
/// `args.len()` is always a multiple of `kind.arity()`; repeated groups are
/// implicit repeats of the command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    /// What the command draws.
    pub kind: CommandKind,
    /// Whether coordinates are relative to the current point.
    pub relative: bool,
    /// The flattened argument groups.
    pub args: Vec<f64>,
}

impl Command {
    /// The command letter as it would be written.
    pub fn letter(&self) -> char {
        let letter = self.kind.letter();
        if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    /// Iterate over the argument groups.
    ///
    /// Yields nothing for a close path.
    pub fn groups(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // `chunks_exact(0)` panics, and close path has no groups anyway.
        self.args.chunks_exact(self.kind.arity().max(1))
    }
}

/// Split path data into command letters and their argument text.
///
/// Line breaks are removed before splitting. Text before the first command
/// letter is discarded; the argument text of a command is everything up to
/// the next command letter.
///
/// ```
/// use svgbounds::split_commands;
///
/// let parts = split_commands("M1 2L3,4z");
/// let letters: String = parts.iter().map(|(letter, _)| letter).collect();
/// assert_eq!(letters, "MLz");
/// assert_eq!(parts[1].1, "3,4");
/// ```
pub fn split_commands(d: &str) -> Vec<(char, String)> {
    let mut out: Vec<(char, String)> = Vec::new();
    for c in d.chars().filter(|&c| c != '\r' && c != '\n') {
        if CommandKind::from_letter(c).is_some() {
            out.push((c, String::new()));
        } else if let Some((_, text)) = out.last_mut() {
            text.push(c);
        }
    }
    out
}

/// Parse path data into commands.
///
/// # Errors
///
/// A command whose arguments are missing, not a whole number of groups, or
/// contain a numeric token that cannot be read is a [`PathError`], and the
/// whole path is rejected.
///
/// ```
/// use svgbounds::{parse_path, CommandKind};
///
/// let cmds = parse_path("M8.52 13.763L11.7 10.58l.495.495-3.181 3.182z").unwrap();
/// assert_eq!(cmds.len(), 4);
/// assert_eq!(cmds[2].kind, CommandKind::LineTo);
/// assert!(cmds[2].relative);
/// assert_eq!(cmds[2].args, [0.495, 0.495, -3.181, 3.182]);
/// ```
pub fn parse_path(d: &str) -> Result<Vec<Command>, PathError> {
    split_commands(d)
        .into_iter()
        .filter_map(|(letter, text)| {
            let (kind, relative) = CommandKind::from_letter(letter)?;
            Some(parse_command(letter, kind, relative, &text))
        })
        .collect()
}

fn parse_command(
    letter: char,
    kind: CommandKind,
    relative: bool,
    text: &str,
) -> Result<Command, PathError> {
    if kind == CommandKind::ClosePath {
        return Ok(Command {
            kind,
            relative,
            args: Vec::new(),
        });
    }
    let mut lexer = NumberLexer::new(text);
    let mut args = Vec::new();
    while let Some(value) = lexer.next_number() {
        args.push(value);
    }
    let rest = lexer.rest();
    if rest.bytes().any(|c| c.is_ascii_digit()) {
        return Err(PathError::InvalidNumber {
            command: letter,
            text: rest.trim().to_owned(),
        });
    }
    if args.is_empty() {
        return Err(PathError::MissingArguments { command: letter });
    }
    let arity = kind.arity();
    if args.len() % arity != 0 {
        return Err(PathError::Arity {
            command: letter,
            count: args.len(),
            arity,
        });
    }
    Ok(Command {
        kind,
        relative,
        args,
    })
}

/// Scans numbers out of the argument text of one command.
struct NumberLexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> NumberLexer<'a> {
    fn new(data: &'a str) -> NumberLexer<'a> {
        NumberLexer { data, ix: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    /// The text from the last failed scan onward.
    fn rest(&self) -> &'a str {
        &self.data[self.ix.min(self.data.len())..]
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c == b'-' || c == b'.' || c.is_ascii_digit() {
                break;
            }
            self.ix += 1;
        }
    }

    /// Read the next number, or `None` when no further number can be read.
    ///
    /// A second `.` or a `-` that does not follow an exponent marker ends the
    /// current number and starts the next one.
    fn next_number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.ix;
        let mut end = start;
        let bytes = self.data.as_bytes();
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        let mut seen_period = false;
        while let Some(&c) = bytes.get(end) {
            match c {
                b'0'..=b'9' | b'e' | b'E' => {}
                b'.' if !seen_period => seen_period = true,
                b'-' | b'+' if end > start && matches!(bytes[end - 1], b'e' | b'E') => {}
                _ => break,
            }
            end += 1;
        }
        // Read the longest prefix that is a number, so that a dangling
        // exponent such as `1e` still yields `1`.
        let token = &self.data[start..end];
        let value = (1..=token.len())
            .rev()
            .find_map(|len| token[..len].parse::<f64>().ok())?;
        self.ix = end;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(text: &str) -> Vec<f64> {
        let mut lexer = NumberLexer::new(text);
        core::iter::from_fn(|| lexer.next_number()).collect()
    }

    #[test]
    fn concatenated_fractions() {
        assert_eq!(numbers(".495.495-3.181 3.182"), [0.495, 0.495, -3.181, 3.182]);
        assert_eq!(numbers("100.5-38.4"), [100.5, -38.4]);
    }

    #[test]
    fn exponents() {
        assert_eq!(numbers("1.14251219e-14"), [1.14251219e-14]);
        assert_eq!(numbers("-1.4e-1-38.4"), [-0.14, -38.4]);
        assert_eq!(numbers("2E+2,3"), [200.0, 3.0]);
        assert_eq!(numbers("1e"), [1.0]);
    }

    #[test]
    fn separators() {
        assert_eq!(numbers("  10 , 20\t30"), [10.0, 20.0, 30.0]);
        assert_eq!(numbers("+5"), [5.0]);
        assert!(numbers("").is_empty());
        assert!(numbers(" , ").is_empty());
    }

    #[test]
    fn tokenize_relative_line() {
        let cmds = parse_path("M8.52 13.763L11.7 10.58l.495.495-3.181 3.182z").unwrap();
        let letters: String = cmds.iter().map(Command::letter).collect();
        assert_eq!(letters, "MLlz");
        assert_eq!(cmds[0].args, [8.52, 13.763]);
        assert_eq!(cmds[1].args, [11.7, 10.58]);
        assert_eq!(cmds[2].args, [0.495, 0.495, -3.181, 3.182]);
        assert!(cmds[3].args.is_empty());
    }

    #[test]
    fn tokenize_scientific_groups() {
        let cmds = parse_path("M100.5,100.5l-1.4e-1-38.4-29.3-1.7e-1-31.3,32.1Z").unwrap();
        assert_eq!(cmds.len(), 3);
        let groups: Vec<&[f64]> = cmds[1].groups().collect();
        assert_eq!(
            groups,
            [&[-0.14, -38.4][..], &[-29.3, -0.17][..], &[-31.3, 32.1][..]]
        );
        assert_eq!(cmds[2].kind, CommandKind::ClosePath);
        assert_eq!(cmds[2].groups().count(), 0);
    }

    #[test]
    fn leading_text_and_line_breaks() {
        let parts = split_commands("junk M1\r\n 2 L 3 4");
        assert_eq!(parts, [('M', "1 2 ".to_owned()), ('L', " 3 4".to_owned())]);
        assert!(split_commands("").is_empty());
        assert!(parse_path("   ").unwrap().is_empty());
    }

    #[test]
    fn malformed() {
        assert_eq!(
            parse_path("M1 2 3"),
            Err(PathError::Arity {
                command: 'M',
                count: 3,
                arity: 2
            })
        );
        assert_eq!(
            parse_path("M1 2L"),
            Err(PathError::MissingArguments { command: 'L' })
        );
        assert_eq!(
            parse_path("M1 2 -.-5 1"),
            Err(PathError::InvalidNumber {
                command: 'M',
                text: "-.-5 1".to_owned()
            })
        );
        assert!(parse_path("A10 10 0 0 1 20").is_err());
    }
}

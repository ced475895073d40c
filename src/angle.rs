// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angles with units.

use core::f64::consts::{PI, TAU};
use core::str::FromStr;

use crate::TransformError;

/// An angle, stored in radians.
///
/// Parsed from CSS/SVG notation: a number with an optional unit suffix of
/// `deg`, `rad`, `grad` or `turn`. A bare number is in degrees, as it is in
/// an SVG `transform` attribute.
///
/// ```
/// use svgbounds::Angle;
///
/// let a: Angle = "90deg".parse().unwrap();
/// assert_eq!(a, "90".parse().unwrap());
/// assert_eq!(a, Angle::from_radians(core::f64::consts::FRAC_PI_2));
/// assert!("90px".parse::<Angle>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle(f64);

impl Angle {
    /// The zero angle.
    pub const ZERO: Angle = Angle(0.0);

    /// An angle of `rad` radians.
    #[inline]
    pub const fn from_radians(rad: f64) -> Angle {
        Angle(rad)
    }

    /// An angle of `deg` degrees.
    #[inline]
    pub fn from_degrees(deg: f64) -> Angle {
        Angle(deg.to_radians())
    }

    /// The angle in radians.
    #[inline]
    pub const fn radians(self) -> f64 {
        self.0
    }
}

impl FromStr for Angle {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Angle, TransformError> {
        let s = s.trim();
        let unit_start = s
            .rfind(|c: char| !c.is_ascii_alphabetic())
            .map_or(0, |ix| ix + 1);
        let (number, unit) = s.split_at(unit_start);
        let value: f64 = number
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| TransformError::InvalidAngle(s.to_owned()))?;
        let rad = match unit.to_ascii_lowercase().as_str() {
            "" | "deg" => value.to_radians(),
            "rad" => value,
            "grad" => value * (PI / 200.0),
            "turn" => value * TAU,
            _ => return Err(TransformError::InvalidAngle(s.to_owned())),
        };
        Ok(Angle(rad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rad(s: &str, expected: f64) {
        let a: Angle = s.parse().unwrap();
        assert!(
            (a.radians() - expected).abs() < 1e-12,
            "{s} parsed to {a:?}, expected {expected}"
        );
    }

    #[test]
    fn units() {
        assert_rad("180", PI);
        assert_rad("180deg", PI);
        assert_rad(" -90deg ", -PI / 2.0);
        assert_rad("1.5rad", 1.5);
        assert_rad("100grad", PI / 2.0);
        assert_rad("0.25turn", PI / 2.0);
        assert_rad("0", 0.0);
        assert_rad("1e1deg", 10f64.to_radians());
        assert_rad("45DEG", PI / 4.0);
    }

    #[test]
    fn invalid() {
        assert!("".parse::<Angle>().is_err());
        assert!("deg".parse::<Angle>().is_err());
        assert!("30px".parse::<Angle>().is_err());
        assert!("abc".parse::<Angle>().is_err());
    }
}

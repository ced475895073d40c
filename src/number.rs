// Copyright 2024 the svgbounds Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decimal rounding of coordinates.

/// Magnitude at and above which the shortest decimal form of an `f64` is
/// written in scientific notation; fractional digits are meaningless there.
const SCIENTIFIC_LARGE: f64 = 1e21;

/// Magnitude below which the shortest decimal form of an `f64` is written in
/// scientific notation; such values are treated as zero.
const SCIENTIFIC_SMALL: f64 = 1e-6;

/// Round `value` to `decimals` fractional digits.
///
/// The scaling is done on the decimal representation rather than by
/// multiplying with a power of ten, so that values such as `1.005` round the
/// way they read (`1.01`) instead of the way they are stored. Halves round
/// toward positive infinity, so `-0.125` becomes `-0.12`.
///
/// Values that are too large to carry fractional digits are returned as they
/// are, and values so close to zero that they would print in scientific
/// notation collapse to `0.0`. This keeps results of matrix products such as
/// `cos(π/2) = 6.1e-17` from leaking into serialized output.
///
/// # Examples
///
/// ```
/// use svgbounds::round_to;
///
/// assert_eq!(round_to(1.23456, 2), 1.23);
/// assert_eq!(round_to(1.005, 2), 1.01);
/// assert_eq!(round_to(6.123e-17, 4), 0.0);
/// assert_eq!(round_to(-2.5, 0), -2.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    if magnitude >= SCIENTIFIC_LARGE {
        return value;
    }
    if magnitude < SCIENTIFIC_SMALL {
        return 0.0;
    }
    let scaled: f64 = match format!("{value}e{decimals}").parse() {
        Ok(scaled) => scaled,
        Err(_) => return value,
    };
    let rounded = (scaled + 0.5).floor();
    format!("{rounded}e-{decimals}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_to_decimals() {
        assert_eq!(round_to(3.14159, 4), 3.1416);
        assert_eq!(round_to(3.14159, 0), 3.0);
        assert_eq!(round_to(100.0, 2), 100.0);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.51, 0), -3.0);
    }

    #[test]
    fn decimal_scaling() {
        // 1.005 is stored as 1.00499999999999989..., naive scaling gives 1.0.
        assert_eq!(round_to(1.005, 2), 1.01);
        assert_eq!(round_to(8.345, 2), 8.35);
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(round_to(1.2e-7, 2), 0.0);
        assert_eq!(round_to(-6.123233995736766e-17, 4), 0.0);
        assert_eq!(round_to(1.5e22, 2), 1.5e22);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn non_finite() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }
}

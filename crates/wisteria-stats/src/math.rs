//! Small numeric helpers shared by the statistics and binning code.
//!
//! Floating point comparisons throughout the workspace go through the
//! `compare_doubles*` family so that values that only differ by accumulated
//! rounding error (for example `0.1 * 3.0` and `0.3`) land in the same bin.

use std::ops::RangeInclusive;

/// Default tolerance used by the `compare_doubles*` family.
pub const DEFAULT_DELTA: f64 = 1e-6;

/// Divides `dividend` by `divisor`, returning zero when either operand is zero.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::math::safe_divide;
/// assert_eq!(safe_divide(10.0, 4.0), 2.5);
/// assert_eq!(safe_divide(10.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn safe_divide(dividend: f64, divisor: f64) -> f64 {
    if dividend == 0.0 || divisor == 0.0 {
        return 0.0;
    }
    dividend / divisor
}

/// Remainder of `dividend / divisor`, or zero when either operand is zero.
#[must_use]
pub fn safe_modulus(dividend: usize, divisor: usize) -> usize {
    if dividend == 0 || divisor == 0 {
        return 0;
    }
    dividend % divisor
}

/// Returns `true` if `actual` and `expected` differ by no more than `delta`.
#[must_use]
pub fn compare_doubles(actual: f64, expected: f64, delta: f64) -> bool {
    (actual - expected).abs() <= delta.abs()
}

#[must_use]
pub fn compare_doubles_less(left: f64, right: f64, delta: f64) -> bool {
    (left - right).abs() > delta.abs() && left < right
}

#[must_use]
pub fn compare_doubles_less_or_equal(left: f64, right: f64, delta: f64) -> bool {
    compare_doubles_less(left, right, delta) || compare_doubles(left, right, delta)
}

#[must_use]
pub fn compare_doubles_greater(left: f64, right: f64, delta: f64) -> bool {
    (left - right).abs() > delta.abs() && left > right
}

#[must_use]
pub fn compare_doubles_greater_or_equal(left: f64, right: f64, delta: f64) -> bool {
    compare_doubles_greater(left, right, delta) || compare_doubles(left, right, delta)
}

/// Returns `true` if `value` has a fractional part larger than `1e-6`.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::math::has_fractional_part;
/// assert!(has_fractional_part(2.5));
/// assert!(!has_fractional_part(-7.0));
/// assert!(!has_fractional_part(3.000_000_1));
/// ```
#[must_use]
pub fn has_fractional_part(value: f64) -> bool {
    !compare_doubles(value.fract(), 0.0, DEFAULT_DELTA)
}

/// Rounds `value` to the nearest integer, with halves rounded away from zero.
///
/// A fractional part within `1e-3` of one half counts as a half, so values such
/// as `2.4999999` that were meant to be `2.5` still round up.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::math::round_to_integer;
/// assert_eq!(round_to_integer(2.5), 3.0);
/// assert_eq!(round_to_integer(2.4999), 3.0);
/// assert_eq!(round_to_integer(2.49), 2.0);
/// assert_eq!(round_to_integer(-2.5), -3.0);
/// assert_eq!(round_to_integer(-2.2), -2.0);
/// ```
#[must_use]
pub fn round_to_integer(value: f64) -> f64 {
    let integral = value.trunc();
    if compare_doubles(value.fract().abs(), 0.5, 1e-3) {
        return if value < 0.0 {
            integral - 1.0
        } else {
            integral + 1.0
        };
    }
    if value < 0.0 {
        (value - 0.5).ceil()
    } else {
        (value + 0.5).floor()
    }
}

/// Rounds `value` up to the next multiple of `10^(digits - 1)`.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::math::next_interval;
/// assert_eq!(next_interval(112.1, 1), 113.0);
/// assert_eq!(next_interval(112.1, 2), 120.0);
/// assert_eq!(next_interval(112.1, 3), 200.0);
/// ```
#[must_use]
pub fn next_interval(value: f64, digits: i32) -> f64 {
    if digits == 0 {
        return value;
    }
    let step = 10_f64.powi(digits - 1);
    (value / step).ceil() * step
}

/// Rounds `value` down to the previous multiple of `10^(digits - 1)`.
#[must_use]
pub fn previous_interval(value: f64, digits: i32) -> f64 {
    if digits == 0 {
        return value;
    }
    let step = 10_f64.powi(digits - 1);
    (value / step).floor() * step
}

/// Returns `true` if `value` lies within `range` (inclusive on both ends).
///
/// NaN is never within a range.
#[must_use]
pub fn is_within(range: &RangeInclusive<f64>, value: f64) -> bool {
    range.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(0.0, 5.0), 0.0);
        assert_eq!(safe_divide(5.0, 0.0), 0.0);
        assert_eq!(safe_divide(-9.0, 3.0), -3.0);
    }

    #[test]
    fn test_safe_modulus() {
        assert_eq!(safe_modulus(0, 4), 0);
        assert_eq!(safe_modulus(7, 0), 0);
        assert_eq!(safe_modulus(7, 4), 3);
    }

    #[test]
    fn test_compare_doubles_family() {
        assert!(compare_doubles(0.1 * 3.0, 0.3, DEFAULT_DELTA));
        assert!(!compare_doubles(1.0, 1.1, DEFAULT_DELTA));

        assert!(compare_doubles_less(1.0, 2.0, DEFAULT_DELTA));
        assert!(!compare_doubles_less(1.0, 1.000_000_1, DEFAULT_DELTA));
        assert!(compare_doubles_less_or_equal(1.0, 1.000_000_1, DEFAULT_DELTA));

        assert!(compare_doubles_greater(2.0, 1.0, DEFAULT_DELTA));
        assert!(!compare_doubles_greater(1.000_000_1, 1.0, DEFAULT_DELTA));
        assert!(compare_doubles_greater_or_equal(1.000_000_1, 1.0, DEFAULT_DELTA));
    }

    #[test]
    fn test_round_to_integer() {
        assert_eq!(round_to_integer(0.0), 0.0);
        assert_eq!(round_to_integer(4.4), 4.0);
        assert_eq!(round_to_integer(4.5), 5.0);
        assert_eq!(round_to_integer(4.6), 5.0);
        assert_eq!(round_to_integer(-4.4), -4.0);
        assert_eq!(round_to_integer(-4.5), -5.0);
        assert_eq!(round_to_integer(-4.6), -5.0);
    }

    #[test]
    fn test_intervals() {
        assert_eq!(next_interval(112.1, 0), 112.1);
        assert_eq!(next_interval(51_234.0, 5), 60_000.0);
        assert_eq!(previous_interval(112.1, 1), 112.0);
        assert_eq!(previous_interval(112.1, 2), 110.0);
        assert_eq!(previous_interval(112.1, 4), 0.0);
    }

    #[test]
    fn test_is_within() {
        assert!(is_within(&(1.0..=2.0), 1.0));
        assert!(is_within(&(1.0..=2.0), 2.0));
        assert!(!is_within(&(1.0..=2.0), 2.1));
        assert!(!is_within(&(1.0..=2.0), f64::NAN));
    }
}

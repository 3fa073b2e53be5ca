//! Rescaling and two-variable association measures.

use crate::{error::StatsError, math::safe_divide};

/// Linearly rescales `value` from `[range_min, range_max]` to `[0, 1]`.
///
/// A missing (NaN) argument returns `value` unchanged. A zero-width range
/// maps to `0.0`.
///
/// # Errors
///
/// Returns [`StatsError::InvalidNormalizationRange`] if `range_max < range_min`
/// or `value` lies outside the range.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::association::normalize;
/// assert_eq!(normalize(1.0, 50.0, 50.0).unwrap(), 1.0);
/// assert_eq!(normalize(-50.0, 50.0, 0.0).unwrap(), 0.5);
/// assert!(normalize(1.0, 50.0, 51.0).is_err());
/// assert!(normalize(51.0, 50.0, 50.0).is_err());
/// ```
pub fn normalize(range_min: f64, range_max: f64, value: f64) -> Result<f64, StatsError> {
    if range_min.is_nan() || range_max.is_nan() || value.is_nan() {
        return Ok(value);
    }
    if range_max < range_min || value < range_min || value > range_max {
        return Err(StatsError::InvalidNormalizationRange);
    }
    Ok(safe_divide(value - range_min, range_max - range_min))
}

/// Computes the phi coefficient between two dichotomous sequences.
///
/// Entries greater than zero count as "present" and entries equal to zero as
/// "absent"; anything else (negative or NaN) is ignored for that pair.
///
/// # Errors
///
/// Returns [`StatsError::LengthMismatch`] if the sequences differ in length.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::association::phi_coefficient;
/// let a = [1.0, 1.0, 0.0, 0.0];
/// assert_eq!(phi_coefficient(&a, &a).unwrap(), 1.0);
/// assert_eq!(phi_coefficient(&a, &[0.0, 0.0, 1.0, 1.0]).unwrap(), -1.0);
/// ```
pub fn phi_coefficient(first: &[f64], second: &[f64]) -> Result<f64, StatsError> {
    if first.len() != second.len() {
        return Err(StatsError::LengthMismatch {
            operation: "phi coefficient",
            left: first.len(),
            right: second.len(),
        });
    }

    let (mut n11, mut n10, mut n01, mut n00) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    for (&a, &b) in first.iter().zip(second) {
        match (a > 0.0, a == 0.0, b > 0.0, b == 0.0) {
            (true, _, true, _) => n11 += 1.0,
            (true, _, _, true) => n10 += 1.0,
            (_, true, true, _) => n01 += 1.0,
            (_, true, _, true) => n00 += 1.0,
            _ => {}
        }
    }

    let row_present = n11 + n10;
    let row_absent = n01 + n00;
    let column_present = n11 + n01;
    let column_absent = n10 + n00;
    Ok(safe_divide(
        n11 * n00 - n10 * n01,
        (row_present * row_absent * column_present * column_absent).sqrt(),
    ))
}

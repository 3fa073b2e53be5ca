//! Descriptive statistics over columns of `f64` observations.
//!
//! Every function in this module treats NaN as a missing observation: it is
//! excluded from `N` and from every sum. Functions whose name ends in
//! `_presorted` expect the caller to have removed NaN and sorted the values
//! already.

use serde::Serialize;

use crate::{error::StatsError, math::safe_divide, quartiles};

/// Counts the non-NaN values in `data`.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::descriptive::valid_n;
/// assert_eq!(valid_n(&[]), 0);
/// assert_eq!(valid_n(&[f64::NAN]), 0);
/// assert_eq!(valid_n(&[-7.8, f64::NAN, 1.0, 5.1]), 3);
/// ```
#[must_use]
pub fn valid_n(data: &[f64]) -> usize {
    data.iter().filter(|v| !v.is_nan()).count()
}

/// Copies the non-NaN values out of `data` and sorts them in ascending order.
#[must_use]
pub fn sorted_valid_values(data: &[f64]) -> Vec<f64> {
    let mut values = data
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect::<Vec<_>>();
    values.sort_by(f64::total_cmp);
    values
}

#[expect(clippy::cast_precision_loss)]
fn count_as_f64(n: usize) -> f64 {
    n as f64
}

/// Computes the arithmetic mean of the non-NaN values in `data`.
///
/// # Errors
///
/// Returns [`StatsError::NoObservations`] if `data` has no valid values.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, f64::NAN, 6.0]).unwrap(), 3.0);
/// assert!(mean(&[f64::NAN]).is_err());
/// ```
pub fn mean(data: &[f64]) -> Result<f64, StatsError> {
    let n = valid_n(data);
    StatsError::require("mean", 1, n)?;
    let sum = data.iter().filter(|v| !v.is_nan()).sum::<f64>();
    Ok(sum / count_as_f64(n))
}

/// Computes the median of values that are already sorted and free of NaN.
///
/// Even-sized inputs average the two middle values.
///
/// # Errors
///
/// Returns [`StatsError::NoObservations`] if `sorted_values` is empty.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::descriptive::median_presorted;
/// let median = median_presorted(&[-1.1, 5.2, 67.0, 555.684]).unwrap();
/// assert!((median - 36.1).abs() < 1e-9);
/// assert_eq!(median_presorted(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
/// ```
pub fn median_presorted(sorted_values: &[f64]) -> Result<f64, StatsError> {
    let n = sorted_values.len();
    StatsError::require("median", 1, n)?;
    let middle = n / 2;
    if n % 2 == 0 {
        Ok((sorted_values[middle - 1] + sorted_values[middle]) / 2.0)
    } else {
        Ok(sorted_values[middle])
    }
}

/// Computes the median of the non-NaN values in `data`.
///
/// The values are copied and sorted internally; `data` is left untouched.
///
/// # Errors
///
/// Returns [`StatsError::NoObservations`] if `data` has no valid values.
pub fn median(data: &[f64]) -> Result<f64, StatsError> {
    median_presorted(&sorted_valid_values(data))
}

/// Sums the deviations from the mean raised to `power`.
///
/// # Errors
///
/// Returns [`StatsError::NoObservations`] if `data` has no valid values.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::descriptive::sum_of_powers;
/// // mean is 2; deviations are -1, 0, 1
/// assert_eq!(sum_of_powers(&[1.0, 2.0, 3.0], 2).unwrap(), 2.0);
/// assert_eq!(sum_of_powers(&[1.0, 2.0, 3.0], 3).unwrap(), 0.0);
/// ```
pub fn sum_of_powers(data: &[f64], power: i32) -> Result<f64, StatsError> {
    let mean = mean(data)?;
    Ok(data
        .iter()
        .filter(|v| !v.is_nan())
        .map(|v| (v - mean).powi(power))
        .sum())
}

/// Computes the variance of `data`.
///
/// # Arguments
///
/// * `data` - The observations. NaN values are ignored.
/// * `is_sample` - Divide by `N - 1` (sample) instead of `N` (population).
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than two values are valid.
pub fn variance(data: &[f64], is_sample: bool) -> Result<f64, StatsError> {
    let n = valid_n(data);
    StatsError::require("variance", 2, n)?;
    let divisor = if is_sample { n - 1 } else { n };
    Ok(sum_of_powers(data, 2)? / count_as_f64(divisor))
}

/// Computes the standard deviation of `data` (square root of [`variance`]).
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than two values are valid.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::descriptive::standard_deviation;
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(standard_deviation(&values, false).unwrap(), 2.0);
/// ```
pub fn standard_deviation(data: &[f64], is_sample: bool) -> Result<f64, StatsError> {
    Ok(variance(data, is_sample)?.sqrt())
}

/// Computes the standard error of the mean, `sd / sqrt(N)`.
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than two values are valid.
pub fn standard_error_of_mean(data: &[f64], is_sample: bool) -> Result<f64, StatsError> {
    let sd = standard_deviation(data, is_sample)?;
    Ok(safe_divide(sd, count_as_f64(valid_n(data)).sqrt()))
}

/// Computes the skewness (third standardized moment) of `data`.
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than three values are valid.
pub fn skewness(data: &[f64], is_sample: bool) -> Result<f64, StatsError> {
    let n = valid_n(data);
    StatsError::require("skewness", 3, n)?;
    let n = count_as_f64(n);
    let sd = standard_deviation(data, is_sample)?;
    Ok(safe_divide(
        n * sum_of_powers(data, 3)?,
        (n - 1.0) * (n - 2.0) * sd.powi(3),
    ))
}

/// Computes the excess kurtosis (fourth standardized moment) of `data`.
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than four values are valid.
pub fn kurtosis(data: &[f64], is_sample: bool) -> Result<f64, StatsError> {
    let n = valid_n(data);
    StatsError::require("kurtosis", 4, n)?;
    let n = count_as_f64(n);
    let sd = standard_deviation(data, is_sample)?;
    let squares = sum_of_powers(data, 2)?;
    Ok(safe_divide(
        n * (n + 1.0) * sum_of_powers(data, 4)? - 3.0 * squares * squares * (n - 1.0),
        (n - 1.0) * (n - 2.0) * (n - 3.0) * sd.powi(4),
    ))
}

/// Returns how many standard deviations `value` lies from `mean`.
///
/// A zero standard deviation yields `0.0`.
#[must_use]
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    safe_divide(value - mean, std_dev)
}

/// Converts every value of `data` to its z-score using the sample standard deviation.
///
/// Missing values stay NaN so that the result lines up with `data` row by row.
///
/// # Errors
///
/// Returns [`StatsError::NotEnoughObservations`] if fewer than two values are valid.
pub fn z_scores(data: &[f64]) -> Result<Vec<f64>, StatsError> {
    let mean = mean(data)?;
    let sd = standard_deviation(data, true)?;
    Ok(data
        .iter()
        .map(|&v| if v.is_nan() { v } else { z_score(v, mean, sd) })
        .collect())
}

/// Descriptive summary of one column.
///
/// Measures that need more observations than the column has are `None`.
/// Dispersion and shape measures use the sample formulas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of valid (non-NaN) observations.
    pub n: usize,
    /// Number of NaN observations.
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Lower Tukey hinge.
    pub lower_quartile: f64,
    /// Upper Tukey hinge.
    pub upper_quartile: f64,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub std_error: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl Summary {
    /// Summarizes `data`.
    ///
    /// # Returns
    ///
    /// * `Some(Summary)` - if the column contains at least one valid value
    /// * `None` - if every value is missing
    ///
    /// # Examples
    ///
    /// ```
    /// # use wisteria_stats::descriptive::Summary;
    /// let summary = Summary::new(&[5.0, 2.0, f64::NAN, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(summary.n, 5);
    /// assert_eq!(summary.missing, 1);
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.lower_quartile, 2.0);
    /// assert_eq!(summary.upper_quartile, 4.0);
    /// assert!(summary.kurtosis.is_some());
    /// ```
    #[must_use]
    pub fn new(data: &[f64]) -> Option<Self> {
        let sorted = sorted_valid_values(data);
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let (lower_quartile, upper_quartile) = quartiles::quartiles_presorted(&sorted).ok()?;
        Some(Self {
            n: sorted.len(),
            missing: data.len() - sorted.len(),
            min,
            max,
            mean: mean(&sorted).ok()?,
            median: median_presorted(&sorted).ok()?,
            lower_quartile,
            upper_quartile,
            variance: variance(&sorted, true).ok(),
            std_dev: standard_deviation(&sorted, true).ok(),
            std_error: standard_error_of_mean(&sorted, true).ok(),
            skewness: skewness(&sorted, true).ok(),
            kurtosis: kurtosis(&sorted, true).ok(),
        })
    }
}

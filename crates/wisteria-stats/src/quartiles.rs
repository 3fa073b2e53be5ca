//! Tukey-hinge quartiles and box-plot style outlier detection.
//!
//! # Examples
//!
//! ```
//! use wisteria_stats::quartiles::OutlierFinder;
//!
//! let data = [5.0, 9.0, -3.0, 6.0, 7.0, 6.0, 6.0, 4.0, 3.0, 17.0];
//! let outliers = OutlierFinder::new(&data).unwrap().collect::<Vec<_>>();
//! assert_eq!(outliers, [(2, -3.0), (9, 17.0)]);
//! ```

use std::iter::FusedIterator;

use serde::Serialize;

use crate::{
    descriptive::{median_presorted, sorted_valid_values},
    error::StatsError,
};

/// Computes the lower and upper quartiles of sorted, NaN-free values using Tukey's hinges.
///
/// The values are split at `ceil(N / 2)`. For odd `N` the overall median
/// belongs to both halves.
///
/// # Errors
///
/// Returns [`StatsError::NoObservations`] if `sorted_values` is empty.
///
/// # Panics
///
/// Panics in debug mode if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::quartiles::quartiles_presorted;
/// let (lower, upper) = quartiles_presorted(&[-1.1, 0.0, 5.2, 67.0, 555.684]).unwrap();
/// assert_eq!(lower, 0.0);
/// assert_eq!(upper, 67.0);
/// ```
pub fn quartiles_presorted(sorted_values: &[f64]) -> Result<(f64, f64), StatsError> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    let n = sorted_values.len();
    StatsError::require("quartiles", 1, n)?;
    let middle = n.div_ceil(2);
    let lower = median_presorted(&sorted_values[..middle])?;
    let upper_start = if n % 2 == 1 { middle - 1 } else { middle };
    let upper = median_presorted(&sorted_values[upper_start..])?;
    Ok((lower, upper))
}

/// Fences derived from the quartiles of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBoundaries {
    /// `lower quartile - 1.5 * IQR`
    pub lower_outlier: f64,
    /// `upper quartile + 1.5 * IQR`
    pub upper_outlier: f64,
    /// `lower quartile - 3 * IQR`
    pub lower_extreme: f64,
    /// `upper quartile + 3 * IQR`
    pub upper_extreme: f64,
}

impl OutlierBoundaries {
    /// Returns `true` if `value` falls outside the outlier fences.
    #[must_use]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_outlier || value > self.upper_outlier
    }

    /// Returns `true` if `value` falls outside the extreme fences.
    #[must_use]
    pub fn is_extreme(&self, value: f64) -> bool {
        value < self.lower_extreme || value > self.upper_extreme
    }
}

/// Computes the outlier and extreme fences from the lower and upper quartiles.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::quartiles::outlier_extreme_ranges;
/// let fences = outlier_extreme_ranges(4.0, 7.0);
/// assert_eq!(fences.lower_outlier, -0.5);
/// assert_eq!(fences.upper_outlier, 11.5);
/// assert_eq!(fences.lower_extreme, -5.0);
/// assert_eq!(fences.upper_extreme, 16.0);
/// ```
#[must_use]
pub fn outlier_extreme_ranges(lower_quartile: f64, upper_quartile: f64) -> OutlierBoundaries {
    let iqr = upper_quartile - lower_quartile;
    OutlierBoundaries {
        lower_outlier: lower_quartile - 1.5 * iqr,
        upper_outlier: upper_quartile + 1.5 * iqr,
        lower_extreme: lower_quartile - 3.0 * iqr,
        upper_extreme: upper_quartile + 3.0 * iqr,
    }
}

/// Walks a column and yields every observation outside its outlier fences.
///
/// The fences are computed once, from a sorted copy of the valid values,
/// when the finder is created. Iteration yields `(index, value)` pairs in
/// the column's original order; missing values are never reported. Once
/// the column is exhausted the finder keeps returning `None`.
#[derive(Debug, Clone)]
pub struct OutlierFinder<'a> {
    data: &'a [f64],
    position: usize,
    boundaries: OutlierBoundaries,
}

impl<'a> OutlierFinder<'a> {
    /// Creates a finder over `data`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoObservations`] if `data` has no valid values.
    pub fn new(data: &'a [f64]) -> Result<Self, StatsError> {
        let sorted = sorted_valid_values(data);
        let (lower, upper) = quartiles_presorted(&sorted)?;
        let boundaries = outlier_extreme_ranges(lower, upper);
        tracing::debug!(?boundaries, n = sorted.len(), "outlier fences computed");
        Ok(Self {
            data,
            position: 0,
            boundaries,
        })
    }

    #[must_use]
    pub fn boundaries(&self) -> &OutlierBoundaries {
        &self.boundaries
    }

    #[must_use]
    pub fn lower_outlier_boundary(&self) -> f64 {
        self.boundaries.lower_outlier
    }

    #[must_use]
    pub fn upper_outlier_boundary(&self) -> f64 {
        self.boundaries.upper_outlier
    }

    #[must_use]
    pub fn lower_extreme_boundary(&self) -> f64 {
        self.boundaries.lower_extreme
    }

    #[must_use]
    pub fn upper_extreme_boundary(&self) -> f64 {
        self.boundaries.upper_extreme
    }
}

impl Iterator for OutlierFinder<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&value) = self.data.get(self.position) {
            let index = self.position;
            self.position += 1;
            if self.boundaries.is_outlier(value) {
                return Some((index, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.data.len().saturating_sub(self.position)))
    }
}

impl FusedIterator for OutlierFinder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_presorted() {
        let (lower, upper) = quartiles_presorted(&[0.0; 5]).unwrap();
        assert_eq!((lower, upper), (0.0, 0.0));

        let negative = [-579_954.265_78, -500_142.254_1, -84689.265_47, -5974.256_81];
        let (lower, upper) = quartiles_presorted(&negative).unwrap();
        assert_close!(lower, -540_048.259_94, 1e-4);
        assert_close!(upper, -45331.761_14, 1e-4);

        let mut fractions = [
            0.266_448_615,
            0.117_038_29,
            0.665_102_469,
            0.633_862_468,
            0.509_262_405,
            0.371_353_823,
            0.494_912_922,
            0.608_961_596,
        ];
        fractions.sort_by(f64::total_cmp);
        let (lower, upper) = quartiles_presorted(&fractions).unwrap();
        assert_close!(lower, 0.318_901, 1e-6);
        assert_close!(upper, 0.621_412, 1e-6);

        assert_eq!(quartiles_presorted(&[5.2]).unwrap(), (5.2, 5.2));
        assert_eq!(
            quartiles_presorted(&[]),
            Err(StatsError::NoObservations {
                operation: "quartiles"
            })
        );
    }

    #[test]
    fn test_outlier_finder_boundaries() {
        let data = [5.0, 9.0, -3.0, 6.0, 7.0, 6.0, 6.0, 4.0, 3.0, 17.0];
        let finder = OutlierFinder::new(&data).unwrap();
        assert_close!(finder.lower_outlier_boundary(), -0.5, 1e-6);
        assert_close!(finder.upper_outlier_boundary(), 11.5, 1e-6);
        assert_close!(finder.lower_extreme_boundary(), -5.0, 1e-6);
        assert_close!(finder.upper_extreme_boundary(), 16.0, 1e-6);
        assert!(finder.boundaries().is_extreme(17.0));
        assert!(!finder.boundaries().is_extreme(-3.0));
    }

    #[test]
    fn test_outlier_finder_is_idempotent_at_end() {
        let data = [5.0, 9.0, -3.0, 6.0, 7.0, 6.0, 6.0, 4.0, 3.0, 17.0];
        let mut finder = OutlierFinder::new(&data).unwrap();
        assert_eq!(finder.next(), Some((2, -3.0)));
        assert_eq!(finder.next(), Some((9, 17.0)));
        assert_eq!(finder.next(), None);
        assert_eq!(finder.next(), None);
        assert_eq!(finder.next(), None);
    }

    #[test]
    fn test_outlier_finder_order_follows_input() {
        let data = [5.0, 9.0, 6.0, 7.0, 6.0, 4.0, 3.0, -3.0, 6.0, 17.0];
        let indices = OutlierFinder::new(&data)
            .unwrap()
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        assert_eq!(indices, [7, 9]);
    }

    #[test]
    fn test_outlier_finder_skips_missing() {
        let data = [f64::NAN, 5.0, 9.0, -3.0, 6.0, 7.0, 6.0, 6.0, 4.0, 3.0, 17.0];
        let found = OutlierFinder::new(&data).unwrap().collect::<Vec<_>>();
        assert_eq!(found, [(3, -3.0), (10, 17.0)]);
        assert!(OutlierFinder::new(&[f64::NAN]).is_err());
    }
}

//! Mode (most frequent value) computation.
//!
//! Ties are kept: every value that shares the highest frequency is returned.

use std::collections::BTreeSet;

use crate::{frequency::FrequencySet, key::Real};

/// Returns every value tied at the highest frequency.
///
/// An empty input yields an empty set.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::mode::mode;
/// let modes = mode([7, 6, 5, 6, 7, 5, 5, 7, 3, -3, 17, 6]);
/// assert_eq!(modes.into_iter().collect::<Vec<_>>(), [5, 6, 7]);
/// ```
#[must_use]
pub fn mode<T, I>(values: I) -> BTreeSet<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let frequencies = values.into_iter().collect::<FrequencySet<_>>();
    let max_count = frequencies.max_count();
    frequencies
        .into_iter()
        .filter(|(_, count)| *count == max_count)
        .map(|(value, _)| value)
        .collect()
}

/// Like [`mode`], but groups values by `transform(value)` first.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::mode::mode_by;
/// let values = [5.2, 5.2, 6.52, 5.3, 6.0, 4.9, 3.1, -3.13, 17.958, 6.955];
/// let modes = mode_by(values, |v: &f64| v.floor() as i64);
/// assert_eq!(modes.into_iter().collect::<Vec<_>>(), [5, 6]);
/// ```
#[must_use]
pub fn mode_by<T, K, I, F>(values: I, mut transform: F) -> BTreeSet<K>
where
    K: Ord,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> K,
{
    mode(values.into_iter().map(|v| transform(&v)))
}

/// Returns the modes of a column of floats in ascending order, ignoring NaN.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::mode::real_mode;
/// assert_eq!(real_mode(&[5.0, 5.0, 9.0, 9.0, f64::NAN]), [5.0, 9.0]);
/// ```
#[must_use]
pub fn real_mode(data: &[f64]) -> Vec<f64> {
    mode(data.iter().copied().filter(|v| !v.is_nan()).map(Real::new))
        .into_iter()
        .map(Real::get)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::NoCase;

    #[test]
    fn test_mode_integers() {
        assert_eq!(
            mode([5, 9, 6, 7, 6, 4, 3, -3, 17, 6]),
            BTreeSet::from([6])
        );
        assert_eq!(mode([5, 5]), BTreeSet::from([5]));
        assert_eq!(mode([5]), BTreeSet::from([5]));
        assert_eq!(mode([5, 5, 9, 9]), BTreeSet::from([5, 9]));
        assert!(mode(Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn test_mode_floats() {
        let values = [5.2, 5.2, 6.52, 7.1, 6.0, 4.9, 3.1, -3.13, 17.958, 6.955];
        assert_eq!(real_mode(&values), [5.2]);

        #[expect(clippy::cast_possible_truncation)]
        let floored = mode_by(values, |v: &f64| v.floor() as i64);
        assert_eq!(floored, BTreeSet::from([6]));
        assert!(real_mode(&[]).is_empty());
    }

    #[test]
    fn test_mode_strings() {
        let drinks = ["Coke", "pepsi", "coke", "Sprite", "COKE", "Pepsi"];
        let modes = mode_by(drinks, |d: &&str| NoCase::from(*d));
        assert_eq!(modes.len(), 1);
        assert_eq!(modes.first(), Some(&NoCase::from("coke")));
    }
}

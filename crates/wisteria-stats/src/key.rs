//! Key adaptors that give floats and strings the ordering the frequency
//! containers need.

use std::{cmp::Ordering, fmt};

use serde::Serialize;

/// An `f64` with a total order, usable as a `BTreeMap` key.
///
/// Negative zero is folded into positive zero on construction so that
/// `-0.0` and `0.0` share a bucket.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::key::Real;
/// assert_eq!(Real::new(-0.0), Real::new(0.0));
/// assert!(Real::new(1.5) < Real::new(2.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct Real(f64);

impl Real {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value + 0.0)
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A string that compares and orders without regard to case.
///
/// The original spelling is kept for display.
///
/// # Examples
///
/// ```
/// # use wisteria_stats::key::NoCase;
/// assert_eq!(NoCase::from("Apple"), NoCase::from("APPLE"));
/// assert!(NoCase::from("apple") < NoCase::from("Banana"));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NoCase(String);

impl NoCase {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Compares two strings case-insensitively.
#[must_use]
pub fn cmp_no_case(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

impl From<&str> for NoCase {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for NoCase {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq for NoCase {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NoCase {}

impl PartialOrd for NoCase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NoCase {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_no_case(&self.0, &other.0)
    }
}

impl fmt::Display for NoCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//! Statistical building blocks for the Wisteria charting engine.
//!
//! This crate provides the numeric layer the chart builders sit on:
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation,
//!   standard error, skewness, kurtosis and z-scores with NaN-aware counting
//! - **Quartiles and outliers**: Tukey hinges, outlier/extreme fences and a
//!   fused iterator over outlying observations
//! - **Mode**: every value tied at the highest frequency
//! - **Association**: range normalization and the phi coefficient
//! - **Frequency containers**: ordered maps that count or total observations per key
//!
//! Missing observations are represented as `f64::NAN` and are excluded from
//! every computation.
//!
//! # Modules
//!
//! - [`math`]: tolerant float comparison, safe division and rounding helpers
//! - [`descriptive`]: descriptive statistics and the column [`descriptive::Summary`]
//! - [`quartiles`]: quartiles, fences and [`quartiles::OutlierFinder`]
//! - [`mode`]: mode computation with tie preservation
//! - [`association`]: normalization and phi coefficient
//! - [`frequency`]: frequency and aggregate containers
//! - [`key`]: ordered key adaptors for floats and case-insensitive strings
//! - [`error`]: the [`StatsError`] type
//!
//! # Examples
//!
//! ## Summarizing a column
//!
//! ```
//! use wisteria_stats::descriptive::Summary;
//!
//! let summary = Summary::new(&[1.0, 2.0, f64::NAN, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(summary.n, 5);
//! assert_eq!(summary.mean, 3.0);
//! ```
//!
//! ## Handling too few observations
//!
//! ```
//! use wisteria_stats::{StatsError, descriptive::variance};
//!
//! assert!(matches!(
//!     variance(&[42.0], true),
//!     Err(StatsError::NotEnoughObservations { required: 2, .. })
//! ));
//! ```

#[cfg(test)]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tolerance:expr $(,)?) => {{
        let (actual, expected, tolerance): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (actual - expected).abs() <= tolerance,
            "`{actual}` is not within {tolerance} of `{expected}`"
        );
    }};
}

pub mod association;
pub mod descriptive;
pub mod error;
pub mod frequency;
pub mod key;
pub mod math;
pub mod mode;
pub mod quartiles;

pub use self::error::{StatsError, StatsErrorKind};

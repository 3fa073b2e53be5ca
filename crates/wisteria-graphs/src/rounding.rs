use serde::{Deserialize, Serialize};
use wisteria_stats::math::round_to_integer;

/// How observations are rounded before they are binned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMethod {
    #[default]
    NoRounding,
    /// Halves round away from zero.
    Round,
    RoundDown,
    RoundUp,
}

impl RoundingMethod {
    #[must_use]
    pub fn is_rounding(self) -> bool {
        self != Self::NoRounding
    }
}

/// Applies `rounding` to `value`, producing the value used to sort it into a bin.
///
/// # Examples
///
/// ```
/// # use wisteria_graphs::rounding::{RoundingMethod, convert_to_sortable_value};
/// assert_eq!(convert_to_sortable_value(2.5, RoundingMethod::Round), 3.0);
/// assert_eq!(convert_to_sortable_value(2.5, RoundingMethod::RoundDown), 2.0);
/// assert_eq!(convert_to_sortable_value(2.1, RoundingMethod::RoundUp), 3.0);
/// assert_eq!(convert_to_sortable_value(2.1, RoundingMethod::NoRounding), 2.1);
/// ```
#[must_use]
pub fn convert_to_sortable_value(value: f64, rounding: RoundingMethod) -> f64 {
    match rounding {
        RoundingMethod::NoRounding => value,
        RoundingMethod::Round => round_to_integer(value),
        RoundingMethod::RoundDown => value.floor(),
        RoundingMethod::RoundUp => value.ceil(),
    }
}

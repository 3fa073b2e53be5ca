use serde::{Deserialize, Serialize};

/// Settings shared by every chart builder.
///
/// Loaded from JSON with missing fields taking their defaults:
///
/// ```
/// # use wisteria_graphs::settings::ChartSettings;
/// let settings: ChartSettings = serde_json::from_str(r#"{ "max_bin_count": 50 }"#).unwrap();
/// assert_eq!(settings.max_bin_count, 50);
/// assert_eq!(settings.max_observations_in_bin, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Most observation ids listed in a bar block's selection label.
    pub max_observations_in_bin: usize,
    /// Upper limit on the number of histogram bins.
    pub max_bin_count: usize,
}

impl ChartSettings {
    pub const DEFAULT_MAX_OBSERVATIONS_IN_BIN: usize = 25;
    pub const DEFAULT_MAX_BIN_COUNT: usize = 255;
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_observations_in_bin: Self::DEFAULT_MAX_OBSERVATIONS_IN_BIN,
            max_bin_count: Self::DEFAULT_MAX_BIN_COUNT,
        }
    }
}

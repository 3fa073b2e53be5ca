//! The closed set of chart kinds and what they share.

use serde::Serialize;

use crate::{
    bar::BarChart, categorical::CategoricalBarChart, error::ChartKind, group::LegendEntry,
    histogram::Histogram,
};

/// A built chart of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Chart {
    Histogram(Histogram),
    Categorical(CategoricalBarChart),
}

impl Chart {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Histogram(_) => ChartKind::Histogram,
            Self::Categorical(_) => ChartKind::CategoricalBarChart,
        }
    }

    #[must_use]
    pub fn bar_chart(&self) -> &BarChart {
        match self {
            Self::Histogram(histogram) => &histogram.chart,
            Self::Categorical(categorical) => &categorical.chart,
        }
    }

    /// Number of positions the bars occupy along the bar axis.
    #[must_use]
    pub fn bar_slot_count(&self) -> usize {
        match self {
            Self::Histogram(histogram) => histogram.bar_slot_count(),
            Self::Categorical(categorical) => categorical.bar_slot_count(),
        }
    }

    /// Legend entries in scheme-index order; empty for an ungrouped chart.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        match self {
            Self::Histogram(histogram) => &histogram.legend,
            Self::Categorical(categorical) => &categorical.legend,
        }
    }
}

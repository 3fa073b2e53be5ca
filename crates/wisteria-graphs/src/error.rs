use serde::Serialize;
use wisteria_stats::StatsError;

use crate::dataset::GroupId;

/// The role a column plays in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ColumnKind {
    #[display("continuous")]
    Continuous,
    #[display("categorical/ID")]
    Categorical,
    #[display("grouping")]
    Group,
    #[display("weight")]
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    #[display("histogram")]
    Histogram,
    #[display("categorical bar chart")]
    CategoricalBarChart,
}

/// Error returned when a chart cannot be built from a dataset.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ChartError {
    #[display("'{name}': {kind} column not found for {chart}.")]
    #[from(ignore)]
    ColumnNotFound {
        kind: ColumnKind,
        name: String,
        chart: ChartKind,
    },
    #[display("{code}: group code not found in the '{column}' column.")]
    #[from(ignore)]
    GroupCodeNotFound { code: GroupId, column: String },
    #[display("{_0}")]
    Stats(#[error(source)] StatsError),
}

impl ChartError {
    pub(crate) fn column_not_found(kind: ColumnKind, name: &str, chart: ChartKind) -> Self {
        Self::ColumnNotFound {
            kind,
            name: name.to_owned(),
            chart,
        }
    }
}

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use wisteria_graphs::{
    bar::Orientation,
    categorical::{CategoricalBarChart, CategoricalOptions},
    chart::Chart,
};

use super::histogram::BinLabelArg;
use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OrientationArg {
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Self::Vertical,
            OrientationArg::Horizontal => Self::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct BarChartArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,
    /// Categorical column (or the id column) whose values become bars
    #[arg(long)]
    pub column: String,
    /// Continuous column summed per bar instead of counting rows
    #[arg(long)]
    pub weight: Option<String>,
    /// Categorical column splitting each bar into groups
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long, value_enum, default_value_t = OrientationArg::Vertical)]
    pub orientation: OrientationArg,
    #[arg(long, value_enum, default_value_t = BinLabelArg::Value)]
    pub bin_label: BinLabelArg,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl BarChartArg {
    fn options(&self) -> CategoricalOptions {
        CategoricalOptions {
            weight_column: self.weight.clone(),
            group_column: self.group.clone(),
            bin_label_display: self.bin_label.into(),
            orientation: self.orientation.into(),
        }
    }
}

pub(crate) fn run(arg: &BarChartArg) -> anyhow::Result<()> {
    let chart = build_chart(arg)?;
    ReportTarget::new(arg.output.as_deref()).write(&chart)
}

fn build_chart(arg: &BarChartArg) -> anyhow::Result<Chart> {
    let dataset = util::read_dataset_file(&arg.dataset)?;
    let chart = CategoricalBarChart::new(&dataset, &arg.column, &arg.options())?;
    Ok(Chart::from(chart))
}

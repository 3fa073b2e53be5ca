use std::path::PathBuf;

use clap::{Args, ValueEnum};
use wisteria_graphs::{
    bar::BinLabelDisplay,
    chart::Chart,
    histogram::{BinningMethod, Histogram, HistogramOptions, IntervalDisplay},
    rounding::RoundingMethod,
    settings::ChartSettings,
};

use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BinningArg {
    /// One bin per distinct value
    Unique,
    /// Equal-width floating point ranges
    Range,
    /// Equal-width integer ranges
    IntegerRange,
}

impl From<BinningArg> for BinningMethod {
    fn from(arg: BinningArg) -> Self {
        match arg {
            BinningArg::Unique => Self::BinUniqueValues,
            BinningArg::Range => Self::BinByRange,
            BinningArg::IntegerRange => Self::BinByIntegerRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum RoundingArg {
    None,
    Round,
    Down,
    Up,
}

impl From<RoundingArg> for RoundingMethod {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::None => Self::NoRounding,
            RoundingArg::Round => Self::Round,
            RoundingArg::Down => Self::RoundDown,
            RoundingArg::Up => Self::RoundUp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum IntervalDisplayArg {
    Cutpoints,
    Midpoints,
}

impl From<IntervalDisplayArg> for IntervalDisplay {
    fn from(arg: IntervalDisplayArg) -> Self {
        match arg {
            IntervalDisplayArg::Cutpoints => Self::Cutpoints,
            IntervalDisplayArg::Midpoints => Self::Midpoints,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BinLabelArg {
    /// Bar length
    Value,
    /// Share of all observations
    Percentage,
    ValueAndPercentage,
    /// Axis label of the bar
    Name,
    None,
}

impl From<BinLabelArg> for BinLabelDisplay {
    fn from(arg: BinLabelArg) -> Self {
        match arg {
            BinLabelArg::Value => Self::BinValue,
            BinLabelArg::Percentage => Self::BinPercentage,
            BinLabelArg::ValueAndPercentage => Self::BinValueAndPercentage,
            BinLabelArg::Name => Self::BinName,
            BinLabelArg::None => Self::NoDisplay,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,
    /// Continuous column to bin
    #[arg(long)]
    pub column: String,
    /// Categorical column splitting each bar into groups
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long, value_enum, default_value_t = BinningArg::IntegerRange)]
    pub binning: BinningArg,
    #[arg(long, value_enum, default_value_t = RoundingArg::None)]
    pub rounding: RoundingArg,
    #[arg(long, value_enum, default_value_t = IntervalDisplayArg::Cutpoints)]
    pub interval_display: IntervalDisplayArg,
    #[arg(long, value_enum, default_value_t = BinLabelArg::Value)]
    pub bin_label: BinLabelArg,
    /// Place unique-value bars at consecutive slots instead of at their values
    #[arg(long)]
    pub compact: bool,
    /// Force the first bin to start at this value
    #[arg(long, allow_negative_numbers = true)]
    pub bins_start: Option<f64>,
    /// Number of range bins (computed from the data when omitted)
    #[arg(long)]
    pub bin_count: Option<usize>,
    /// Upper limit on the number of bins
    #[arg(long)]
    pub max_bins: Option<usize>,
    /// Round bin sizes up to 5, 10, 20, 25, 50, 100, ...
    #[arg(long)]
    pub neat_intervals: bool,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl HistogramArg {
    fn options(&self) -> HistogramOptions {
        HistogramOptions {
            binning_method: self.binning.into(),
            rounding: self.rounding.into(),
            interval_display: self.interval_display.into(),
            bin_label_display: self.bin_label.into(),
            show_full_range_of_values: !self.compact,
            bins_start: self.bins_start,
            bin_count: self.bin_count,
            max_bin_count: self.max_bins,
            neat_intervals: self.neat_intervals,
        }
    }
}

pub(crate) fn run(arg: &HistogramArg, settings: &ChartSettings) -> anyhow::Result<()> {
    let chart = build_chart(arg, settings)?;
    ReportTarget::new(arg.output.as_deref()).write(&chart)
}

fn build_chart(arg: &HistogramArg, settings: &ChartSettings) -> anyhow::Result<Chart> {
    let dataset = util::read_dataset_file(&arg.dataset)?;
    let histogram = Histogram::new(
        &dataset,
        &arg.column,
        arg.group.as_deref(),
        &arg.options(),
        settings,
    )?;
    if histogram.valid_n == 0 {
        tracing::warn!(column = %arg.column, "no valid observations to bin");
    }
    Ok(Chart::from(histogram))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use wisteria_graphs::error::ChartKind;

    use super::*;
    use crate::{
        command::{CommandArgs, Mode},
        util::tests::{EXAM_JSON, write_file},
    };

    fn parse(args: &[&str]) -> HistogramArg {
        let args = ["wisteria", "histogram", "exam.json", "--column", "Score"]
            .iter()
            .chain(args)
            .copied();
        match CommandArgs::try_parse_from(args).unwrap().mode {
            Mode::Histogram(arg) => arg,
            mode => panic!("unexpected mode: {mode:?}"),
        }
    }

    #[test]
    fn test_default_options() {
        let arg = parse(&[]);
        assert_eq!(arg.options(), HistogramOptions::default());
    }

    #[test]
    fn test_options_from_flags() {
        let arg = parse(&[
            "--binning",
            "range",
            "--rounding",
            "down",
            "--interval-display",
            "midpoints",
            "--bin-label",
            "value-and-percentage",
            "--compact",
            "--bins-start",
            "-5",
            "--bin-count",
            "6",
            "--max-bins",
            "20",
            "--neat-intervals",
        ]);
        let options = arg.options();
        assert_eq!(options.binning_method, BinningMethod::BinByRange);
        assert_eq!(options.rounding, RoundingMethod::RoundDown);
        assert_eq!(options.interval_display, IntervalDisplay::Midpoints);
        assert_eq!(
            options.bin_label_display,
            BinLabelDisplay::BinValueAndPercentage
        );
        assert!(!options.show_full_range_of_values);
        assert_eq!(options.bins_start, Some(-5.0));
        assert_eq!(options.bin_count, Some(6));
        assert_eq!(options.max_bin_count, Some(20));
        assert!(options.neat_intervals);
    }

    #[test]
    fn test_value_enum_conversions() {
        assert_eq!(
            BinningMethod::from(BinningArg::Unique),
            BinningMethod::BinUniqueValues
        );
        assert_eq!(
            BinningMethod::from(BinningArg::IntegerRange),
            BinningMethod::BinByIntegerRange
        );
        assert_eq!(RoundingMethod::from(RoundingArg::None), RoundingMethod::NoRounding);
        assert_eq!(RoundingMethod::from(RoundingArg::Round), RoundingMethod::Round);
        assert_eq!(RoundingMethod::from(RoundingArg::Up), RoundingMethod::RoundUp);
        assert_eq!(
            IntervalDisplay::from(IntervalDisplayArg::Cutpoints),
            IntervalDisplay::Cutpoints
        );
        assert_eq!(BinLabelDisplay::from(BinLabelArg::Value), BinLabelDisplay::BinValue);
        assert_eq!(
            BinLabelDisplay::from(BinLabelArg::Percentage),
            BinLabelDisplay::BinPercentage
        );
        assert_eq!(BinLabelDisplay::from(BinLabelArg::Name), BinLabelDisplay::BinName);
        assert_eq!(BinLabelDisplay::from(BinLabelArg::None), BinLabelDisplay::NoDisplay);
    }

    #[test]
    fn test_unknown_binning_is_rejected() {
        let args = [
            "wisteria", "histogram", "exam.json", "--column", "Score", "--binning", "log",
        ];
        assert!(CommandArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_build_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "exam.json", EXAM_JSON);
        let mut arg = parse(&["--group", "Class"]);
        arg.dataset = path;
        let chart = build_chart(&arg, &ChartSettings::default()).unwrap();
        assert_eq!(chart.kind(), ChartKind::Histogram);
        let lengths = chart
            .bar_chart()
            .bars
            .iter()
            .map(|b| b.length())
            .collect::<Vec<_>>();
        assert_eq!(lengths, [1.0, 2.0, 3.0]);
        assert_eq!(chart.legend().len(), 2);

        arg.column = "Missing".to_owned();
        let err = build_chart(&arg, &ChartSettings::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Missing': continuous column not found for histogram."
        );
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use wisteria_graphs::settings::ChartSettings;

use self::{
    bar_chart::BarChartArg, describe::DescribeArg, histogram::HistogramArg, outliers::OutliersArg,
};
use crate::util;

mod bar_chart;
mod describe;
mod histogram;
mod outliers;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Chart settings JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log binning decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize continuous columns
    Describe(#[clap(flatten)] DescribeArg),
    /// List the outlying observations of a continuous column
    Outliers(#[clap(flatten)] OutliersArg),
    /// Bin a continuous column into a histogram
    Histogram(#[clap(flatten)] HistogramArg),
    /// Aggregate a categorical column into a bar chart
    BarChart(#[clap(flatten)] BarChartArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);

    let settings = match &args.config {
        Some(path) => util::read_settings_file(path)?,
        None => ChartSettings::default(),
    };
    match &args.mode {
        Mode::Describe(arg) => describe::run(arg)?,
        Mode::Outliers(arg) => outliers::run(arg)?,
        Mode::Histogram(arg) => histogram::run(arg, &settings)?,
        Mode::BarChart(arg) => bar_chart::run(arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags() {
        let args = CommandArgs::try_parse_from([
            "wisteria",
            "histogram",
            "exam.json",
            "--column",
            "Score",
            "--config",
            "settings.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("settings.json")));
        assert!(args.verbose);
        assert!(matches!(args.mode, Mode::Histogram(_)));

        let args = CommandArgs::try_parse_from(["wisteria", "--verbose", "describe", "exam.json"])
            .unwrap();
        assert_eq!(args.config, None);
        assert!(args.verbose);
    }

    #[test]
    fn test_subcommands() {
        let args = CommandArgs::try_parse_from(["wisteria", "describe", "exam.json"]).unwrap();
        assert!(matches!(args.mode, Mode::Describe(_)));
        assert!(!args.verbose);

        let args = CommandArgs::try_parse_from([
            "wisteria",
            "outliers",
            "exam.json",
            "--column",
            "Score",
            "--output",
            "out.json",
        ])
        .unwrap();
        let arg = match args.mode {
            Mode::Outliers(arg) => arg,
            mode => panic!("unexpected mode: {mode:?}"),
        };
        assert_eq!(arg.column, "Score");
        assert_eq!(arg.output, Some(PathBuf::from("out.json")));

        let args =
            CommandArgs::try_parse_from(["wisteria", "bar-chart", "exam.json", "--column", "Class"])
                .unwrap();
        assert!(matches!(args.mode, Mode::BarChart(_)));
    }

    #[test]
    fn test_required_arguments() {
        assert!(CommandArgs::try_parse_from(["wisteria"]).is_err());
        assert!(CommandArgs::try_parse_from(["wisteria", "histogram", "exam.json"]).is_err());
        assert!(CommandArgs::try_parse_from(["wisteria", "outliers", "exam.json"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory as _;
        CommandArgs::command().debug_assert();
    }
}

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use wisteria_graphs::dataset::{ContinuousColumn, Dataset};
use wisteria_stats::descriptive::Summary;

use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Args)]
pub(crate) struct DescribeArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,
    /// Continuous columns to describe (comma-separated); all when omitted
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ColumnSummary<'a> {
    column: &'a str,
    /// `None` when the column has no valid observations.
    summary: Option<Summary>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.dataset)?;
    let summaries = summarize(&dataset, arg)?;
    ReportTarget::new(arg.output.as_deref()).write(&summaries)
}

fn summarize<'a>(
    dataset: &'a Dataset,
    arg: &DescribeArg,
) -> anyhow::Result<Vec<ColumnSummary<'a>>> {
    let columns = if arg.columns.is_empty() {
        dataset.continuous_columns.iter().collect::<Vec<_>>()
    } else {
        arg.columns
            .iter()
            .map(|name| {
                dataset.continuous_column(name).with_context(|| {
                    format!(
                        "'{name}': continuous column not found in {}",
                        arg.dataset.display()
                    )
                })
            })
            .collect::<anyhow::Result<Vec<&ContinuousColumn>>>()?
    };

    Ok(columns
        .into_iter()
        .map(|column| {
            let summary = Summary::new(&column.values);
            if summary.is_none() {
                tracing::warn!(column = %column.name, "column has no valid observations");
            }
            ColumnSummary {
                column: &column.name,
                summary,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::{
        command::{CommandArgs, Mode},
        util::tests::EXAM_JSON,
    };

    fn parse(args: &[&str]) -> DescribeArg {
        let args = ["wisteria", "describe", "exam.json"].iter().chain(args).copied();
        match CommandArgs::try_parse_from(args).unwrap().mode {
            Mode::Describe(arg) => arg,
            mode => panic!("unexpected mode: {mode:?}"),
        }
    }

    #[test]
    fn test_comma_separated_columns() {
        let arg = parse(&["--columns", "score,Hours"]);
        assert_eq!(arg.columns, ["score", "Hours"]);
        assert!(parse(&[]).columns.is_empty());
    }

    #[test]
    fn test_summarize() {
        let dataset: Dataset = serde_json::from_str(EXAM_JSON).unwrap();
        let summaries = summarize(&dataset, &parse(&[])).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column, "Score");
        let summary = summaries[0].summary.as_ref().unwrap();
        assert_eq!(summary.n, 6);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summaries[1].column, "Hours");
        assert!(summaries[1].summary.is_none());

        let summaries = summarize(&dataset, &parse(&["--columns", "SCORE"])).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].column, "Score");
    }

    #[test]
    fn test_unknown_column() {
        let dataset: Dataset = serde_json::from_str(EXAM_JSON).unwrap();
        let err = summarize(&dataset, &parse(&["--columns", "Score,Age"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Age': continuous column not found in exam.json"
        );
    }
}

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use wisteria_graphs::dataset::Dataset;
use wisteria_stats::quartiles::{OutlierBoundaries, OutlierFinder};

use crate::util::{self, ReportTarget};

#[derive(Debug, Clone, Args)]
pub(crate) struct OutliersArg {
    /// Path to the dataset JSON file
    pub dataset: PathBuf,
    /// Continuous column to search
    #[arg(long)]
    pub column: String,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OutlierRow<'a> {
    row: usize,
    id: &'a str,
    value: f64,
    /// Also beyond the extreme fences.
    extreme: bool,
}

#[derive(Debug, Serialize)]
struct OutlierReport<'a> {
    column: &'a str,
    boundaries: OutlierBoundaries,
    outliers: Vec<OutlierRow<'a>>,
}

pub(crate) fn run(arg: &OutliersArg) -> anyhow::Result<()> {
    let dataset = util::read_dataset_file(&arg.dataset)?;
    let report = find_outliers(&dataset, arg)?;
    ReportTarget::new(arg.output.as_deref()).write(&report)
}

fn find_outliers<'a>(
    dataset: &'a Dataset,
    arg: &OutliersArg,
) -> anyhow::Result<OutlierReport<'a>> {
    let column = dataset.continuous_column(&arg.column).with_context(|| {
        format!(
            "'{}': continuous column not found in {}",
            arg.column,
            arg.dataset.display()
        )
    })?;

    let finder = OutlierFinder::new(&column.values)
        .with_context(|| format!("Failed to compute outlier fences of '{}'", column.name))?;
    let boundaries = *finder.boundaries();
    let outliers = finder
        .map(|(row, value)| OutlierRow {
            row,
            id: dataset.id(row),
            value,
            extreme: boundaries.is_extreme(value),
        })
        .collect::<Vec<_>>();
    tracing::debug!(column = %column.name, count = outliers.len(), "found outliers");

    Ok(OutlierReport {
        column: &column.name,
        boundaries,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn arg(column: &str) -> OutliersArg {
        OutliersArg {
            dataset: PathBuf::from("plants.json"),
            column: column.to_owned(),
            output: None,
        }
    }

    #[test]
    fn test_find_outliers() {
        let mut dataset = Dataset::new("plants");
        dataset
            .set_id_column("Plant", (1..=9).map(|i| format!("p{i}")))
            .unwrap();
        dataset
            .add_continuous_column(
                "Height",
                [10.0, 11.0, 12.0, 12.0, 13.0, 14.0, 15.0, 22.0, 60.0],
            )
            .unwrap();

        let report = find_outliers(&dataset, &arg("height")).unwrap();
        assert_eq!(report.column, "Height");
        // Hinges 12 and 15: fences at 7.5/19.5 and 3/24.
        assert_eq!(report.boundaries.lower_outlier, 7.5);
        assert_eq!(report.boundaries.upper_outlier, 19.5);
        let rows = report
            .outliers
            .iter()
            .map(|o| (o.row, o.id, o.extreme))
            .collect::<Vec<_>>();
        assert_eq!(rows, [(7, "p8", false), (8, "p9", true)]);
    }

    #[test]
    fn test_missing_column_and_empty_column() {
        let mut dataset = Dataset::new("plants");
        dataset
            .add_continuous_column("Height", [f64::NAN, f64::NAN])
            .unwrap();
        let err = find_outliers(&dataset, &arg("Width")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Width': continuous column not found in plants.json"
        );
        let err = find_outliers(&dataset, &arg("Height")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to compute outlier fences of 'Height'");
    }
}

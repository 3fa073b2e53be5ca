//! Bar charts of a categorical column.
//!
//! Each category becomes a bar whose length is either the number of rows in
//! it or the sum of a weight column over those rows. With a grouping column
//! the bars are split into one block per group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wisteria_stats::{frequency::AggregateFrequencySet, key::NoCase};

use crate::{
    bar::{
        Bar, BarBlock, BarChart, BarSortComparison, BinLabelDisplay, Orientation, SortDirection,
        format_count,
    },
    dataset::{CategoricalColumn, Dataset, GroupId},
    error::{ChartError, ChartKind, ColumnKind},
    group::{GroupIdMap, LegendEntry, RowGroup},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoricalOptions {
    /// Continuous column summed per category instead of counting rows.
    pub weight_column: Option<String>,
    pub group_column: Option<String>,
    pub bin_label_display: BinLabelDisplay,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalBarChart {
    pub chart: BarChart,
    /// The bars are the distinct values of the id column.
    pub uses_id_column: bool,
    pub weighted: bool,
    pub legend: Vec<LegendEntry>,
}

/// Source of a row's category.
enum Categories<'a> {
    Column(&'a CategoricalColumn),
    /// Distinct ids numbered in order of first appearance, with the first
    /// spelling of each.
    Ids {
        indices: Vec<GroupId>,
        names: Vec<String>,
    },
}

/// Orders blocks by category, then by group label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CategoryBlockKey {
    bin: GroupId,
    group_label: NoCase,
    scheme_index: usize,
    bin_name: String,
}

impl CategoricalBarChart {
    /// Aggregates `categorical_column` into bars.
    ///
    /// If no categorical column is named `categorical_column` but the id
    /// column is, each distinct id becomes a bar. Rows with a missing weight
    /// are left out of both the count and the total.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ColumnNotFound`] for a missing categorical, group
    /// or weight column.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// use wisteria_graphs::{
    ///     categorical::{CategoricalBarChart, CategoricalOptions},
    ///     dataset::Dataset,
    /// };
    ///
    /// let mut dataset = Dataset::new("orders");
    /// dataset
    ///     .add_categorical_column(
    ///         "Fruit",
    ///         BTreeMap::from([(0, "Apple".to_owned()), (1, "Pear".to_owned())]),
    ///         [0, 1, 1],
    ///     )
    ///     .unwrap();
    /// let chart = CategoricalBarChart::new(&dataset, "Fruit", &CategoricalOptions::default()).unwrap();
    /// let bars = chart
    ///     .chart
    ///     .bars
    ///     .iter()
    ///     .map(|b| (b.axis_label.as_str(), b.length()))
    ///     .collect::<Vec<_>>();
    /// assert_eq!(bars, [("Apple", 1.0), ("Pear", 2.0)]);
    /// ```
    pub fn new(
        dataset: &Dataset,
        categorical_column: &str,
        options: &CategoricalOptions,
    ) -> Result<Self, ChartError> {
        let chart_kind = ChartKind::CategoricalBarChart;
        let categories = match dataset.categorical_column(categorical_column) {
            Some(column) => Categories::Column(column),
            None if dataset.is_id_column(categorical_column) => {
                let (indices, names) = first_seen_indices(dataset);
                Categories::Ids { indices, names }
            }
            None => {
                return Err(ChartError::column_not_found(
                    ColumnKind::Categorical,
                    categorical_column,
                    chart_kind,
                ));
            }
        };
        let group_column = options
            .group_column
            .as_deref()
            .map(|name| {
                dataset
                    .categorical_column(name)
                    .ok_or_else(|| ChartError::column_not_found(ColumnKind::Group, name, chart_kind))
            })
            .transpose()?;
        let weights = options
            .weight_column
            .as_deref()
            .map(|name| {
                dataset
                    .continuous_column(name)
                    .map(|c| c.values.as_slice())
                    .ok_or_else(|| ChartError::column_not_found(ColumnKind::Weight, name, chart_kind))
            })
            .transpose()?;
        let groups = group_column.map(GroupIdMap::new);

        let uses_id_column = matches!(categories, Categories::Ids { .. });
        let weighted = weights.is_some();
        let legend = groups
            .as_ref()
            .map(|g| g.legend().to_vec())
            .unwrap_or_default();
        let mut chart = BarChart::new(options.orientation);
        if dataset.row_count() == 0 {
            chart.reset_axes_for_empty_data();
            return Ok(Self {
                chart,
                uses_id_column,
                weighted,
                legend,
            });
        }

        let mut blocks = AggregateFrequencySet::new();
        for row in 0..dataset.row_count() {
            let amount = match weights {
                Some(weights) => match weights.get(row) {
                    Some(weight) if !weight.is_nan() => *weight,
                    _ => continue,
                },
                None => 1.0,
            };
            let group = match &groups {
                Some(groups) => groups.row_group(row)?,
                None => RowGroup::default(),
            };
            let (bin, bin_name) = match &categories {
                Categories::Column(column) => {
                    let code = column.codes.get(row).copied().unwrap_or_default();
                    (code, column.label(code))
                }
                Categories::Ids { indices, names } => {
                    let index = indices.get(row).copied().unwrap_or_default();
                    let name = usize::try_from(index)
                        .ok()
                        .and_then(|i| names.get(i))
                        .cloned()
                        .unwrap_or_default();
                    (index, name)
                }
            };
            blocks.insert(
                CategoryBlockKey {
                    bin,
                    group_label: NoCase::from(group.label),
                    scheme_index: group.scheme_index,
                    bin_name,
                },
                amount,
            );
        }

        let is_grouped = groups.is_some();
        for (key, aggregate) in &blocks {
            let mut selection_label = if weighted {
                format!(
                    "{} item(s), totaling {:.2}",
                    format_count_usize(aggregate.count),
                    aggregate.total
                )
            } else {
                format!("{} item(s)", format_count_usize(aggregate.count))
            };
            if is_grouped {
                selection_label = format!("{}: {selection_label}", key.group_label);
            }
            let block = BarBlock {
                length: aggregate.total,
                count: aggregate.count,
                scheme_index: key.scheme_index,
                tag: key.group_label.as_str().to_owned(),
                selection_label,
            };

            #[expect(clippy::cast_precision_loss)]
            let position = key.bin as f64;
            if let Some(bar) = chart.bar_at_mut(position) {
                bar.blocks.push(block);
            } else {
                let mut bar = Bar::new(position, key.bin_name.clone());
                bar.blocks.push(block);
                chart.add_bar(bar);
            }
        }
        chart.refit_scaling_axis();
        let total = chart.total_length();
        chart.update_bar_labels(options.bin_label_display, total);

        if is_grouped {
            chart.sort_bars(BarSortComparison::ByAxisLabel, SortDirection::Ascending);
        } else {
            // Largest bar on the outer edge.
            let direction = match options.orientation {
                Orientation::Horizontal => SortDirection::Descending,
                Orientation::Vertical => SortDirection::Ascending,
            };
            chart.sort_bars(BarSortComparison::ByBarLength, direction);
        }

        chart.bar_axis.title = match &categories {
            Categories::Column(column) => column.name.clone(),
            Categories::Ids { .. } => dataset
                .id_column()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        };
        chart.scaling_axis.title = "Frequency".to_owned();
        tracing::debug!(
            column = categorical_column,
            bars = chart.bars.len(),
            uses_id_column,
            "built categorical bar chart"
        );
        Ok(Self {
            chart,
            uses_id_column,
            weighted,
            legend,
        })
    }

    #[must_use]
    pub fn bar_slot_count(&self) -> usize {
        self.chart.bar_slot_count()
    }
}

/// Numbers the distinct ids (ignoring case) in order of first appearance.
///
/// Returns each row's number and the first spelling of every id.
fn first_seen_indices(dataset: &Dataset) -> (Vec<GroupId>, Vec<String>) {
    let mut seen = BTreeMap::<NoCase, GroupId>::new();
    let mut names = vec![];
    let indices = (0..dataset.row_count())
        .map(|row| {
            let id = dataset.id(row);
            let next = names.len() as GroupId;
            *seen.entry(NoCase::from(id)).or_insert_with(|| {
                names.push(id.to_owned());
                next
            })
        })
        .collect();
    (indices, names)
}

#[expect(clippy::cast_precision_loss)]
fn format_count_usize(count: usize) -> String {
    format_count(count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit(codes: &[GroupId]) -> Dataset {
        let mut dataset = Dataset::new("fruit");
        dataset
            .add_categorical_column(
                "Fruit",
                BTreeMap::from([
                    (0, "Apple".to_owned()),
                    (1, "Banana".to_owned()),
                    (2, "Cherry".to_owned()),
                ]),
                codes.iter().copied(),
            )
            .unwrap();
        dataset
    }

    fn bars(chart: &CategoricalBarChart) -> Vec<(f64, &str, f64)> {
        chart
            .chart
            .bars
            .iter()
            .map(|b| (b.axis_position, b.axis_label.as_str(), b.length()))
            .collect()
    }

    #[test]
    fn test_vertical_bars_sort_by_length_ascending() {
        let dataset = fruit(&[0, 0, 0, 1, 2, 2]);
        let chart = CategoricalBarChart::new(&dataset, "fruit", &CategoricalOptions::default())
            .unwrap();
        assert_eq!(
            bars(&chart),
            [(0.0, "Banana", 1.0), (1.0, "Cherry", 2.0), (2.0, "Apple", 3.0)]
        );
        assert_eq!(chart.chart.bar_axis.custom_label(2.0), Some("Apple"));
        assert_eq!(chart.chart.bar_axis.title, "Fruit");
        assert_eq!(chart.chart.scaling_axis.title, "Frequency");
    }

    #[test]
    fn test_horizontal_bars_put_largest_on_top() {
        let dataset = fruit(&[0, 0, 0, 1, 2, 2]);
        let options = CategoricalOptions {
            orientation: Orientation::Horizontal,
            ..CategoricalOptions::default()
        };
        let chart = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap();
        let last = chart.chart.bars.last().unwrap();
        assert_eq!(last.axis_label, "Apple");
        assert_eq!(last.axis_position, 2.0);
    }

    #[test]
    fn test_weighted_totals_skip_missing_weights() {
        let mut dataset = fruit(&[0, 0, 1, 1]);
        dataset
            .add_continuous_column("Sales", [10.0, f64::NAN, 2.5, 4.0])
            .unwrap();
        let options = CategoricalOptions {
            weight_column: Some("Sales".to_owned()),
            ..CategoricalOptions::default()
        };
        let chart = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap();
        assert!(chart.weighted);
        assert_eq!(
            bars(&chart),
            [(0.0, "Banana", 6.5), (1.0, "Apple", 10.0)]
        );
        let apple = &chart.chart.bars[1].blocks[0];
        assert_eq!(apple.count, 1);
        assert_eq!(apple.selection_label, "1 item(s), totaling 10.00");
        assert_eq!(
            chart.chart.bars[0].blocks[0].selection_label,
            "2 item(s), totaling 6.50"
        );
    }

    #[test]
    fn test_grouped_bars_sort_by_label() {
        let mut dataset = fruit(&[2, 2, 0, 1, 0]);
        dataset
            .add_categorical_column(
                "Store",
                BTreeMap::from([(0, "north".to_owned()), (1, "East".to_owned())]),
                [0, 1, 0, 0, 1],
            )
            .unwrap();
        let options = CategoricalOptions {
            group_column: Some("Store".to_owned()),
            ..CategoricalOptions::default()
        };
        let chart = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap();
        let labels = chart
            .chart
            .bars
            .iter()
            .map(|b| b.axis_label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Apple", "Banana", "Cherry"]);

        let apple = &chart.chart.bars[0];
        let tags = apple.blocks.iter().map(|b| b.tag.as_str()).collect::<Vec<_>>();
        assert_eq!(tags, ["East", "north"]);
        assert_eq!(apple.blocks[0].scheme_index, 0);
        assert_eq!(apple.blocks[1].selection_label, "north: 1 item(s)");

        let cherry = &chart.chart.bars[2];
        assert_eq!(cherry.blocks.len(), 2);
        assert_eq!(
            chart
                .legend
                .iter()
                .map(|e| e.label.as_str())
                .collect::<Vec<_>>(),
            ["East", "north"]
        );
    }

    #[test]
    fn test_id_column_bars() {
        let mut dataset = Dataset::new("visits");
        dataset.set_id_column("Name", ["x", "y", "X", "z"]).unwrap();
        let chart = CategoricalBarChart::new(&dataset, "name", &CategoricalOptions::default())
            .unwrap();
        assert!(chart.uses_id_column);
        assert_eq!(
            bars(&chart),
            [(0.0, "y", 1.0), (1.0, "z", 1.0), (2.0, "x", 2.0)]
        );
        assert_eq!(chart.chart.bar_axis.title, "Name");
    }

    #[test]
    fn test_missing_columns() {
        let dataset = fruit(&[0, 1]);
        let err = CategoricalBarChart::new(&dataset, "Nope", &CategoricalOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Nope': categorical/ID column not found for categorical bar chart."
        );

        let options = CategoricalOptions {
            weight_column: Some("Sales".to_owned()),
            ..CategoricalOptions::default()
        };
        let err = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Sales': weight column not found for categorical bar chart."
        );

        let options = CategoricalOptions {
            group_column: Some("Store".to_owned()),
            ..CategoricalOptions::default()
        };
        let err = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'Store': grouping column not found for categorical bar chart."
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = fruit(&[]);
        let chart = CategoricalBarChart::new(&dataset, "Fruit", &CategoricalOptions::default())
            .unwrap();
        assert!(chart.chart.bars.is_empty());
        assert_eq!(chart.chart.scaling_axis.range, (0.0, 10.0));
    }

    #[test]
    fn test_percentage_labels() {
        let dataset = fruit(&[0, 1, 1, 1]);
        let options = CategoricalOptions {
            bin_label_display: BinLabelDisplay::BinPercentage,
            ..CategoricalOptions::default()
        };
        let chart = CategoricalBarChart::new(&dataset, "Fruit", &options).unwrap();
        let labels = chart
            .chart
            .bars
            .iter()
            .map(|b| b.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["25%", "75%"]);
    }
}

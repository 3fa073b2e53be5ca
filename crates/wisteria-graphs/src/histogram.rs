//! Histogram binning of a continuous column.
//!
//! Observations are sorted either into one bin per distinct (rounded) value
//! or into equal-width ranges. The number of ranges comes from the caller or
//! from Sturges' rule (fewer than 200 observations) or Scott's rule, capped at
//! the maximum bin count.
//!
//! # Examples
//!
//! ```
//! use wisteria_graphs::{
//!     dataset::Dataset,
//!     histogram::{BinningMethod, Histogram, HistogramOptions},
//!     settings::ChartSettings,
//! };
//!
//! let mut dataset = Dataset::new("exam");
//! dataset
//!     .add_continuous_column("Score", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
//!     .unwrap();
//! let options = HistogramOptions {
//!     bin_count: Some(4),
//!     ..HistogramOptions::default()
//! };
//! let histogram = Histogram::new(&dataset, "Score", None, &options, &ChartSettings::default()).unwrap();
//! assert_eq!(histogram.binning_method, BinningMethod::BinByIntegerRange);
//! let lengths = histogram.chart.bars.iter().map(|b| b.length()).collect::<Vec<_>>();
//! assert_eq!(lengths, [3.0, 2.0, 2.0, 2.0]);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use wisteria_stats::{
    descriptive::standard_deviation,
    frequency::{FrequencySet, MultiValueAggregateMap, MultiValueEntry},
    key::{NoCase, Real},
    math::{
        DEFAULT_DELTA, compare_doubles, compare_doubles_greater, compare_doubles_less_or_equal,
        has_fractional_part, safe_divide,
    },
};

use crate::{
    bar::{Bar, BarBlock, BarChart, BinLabelDisplay, Orientation, format_count, format_number},
    dataset::Dataset,
    error::{ChartError, ChartKind, ColumnKind},
    group::{GroupIdMap, LegendEntry, RowGroup},
    rounding::{RoundingMethod, convert_to_sortable_value},
    settings::ChartSettings,
};

/// Bin sizes tried, in order, when neat intervals are requested.
const NEAT_BIN_SIZES: [f64; 10] = [
    5.0, 10.0, 20.0, 25.0, 50.0, 100.0, 200.0, 250.0, 500.0, 1_000.0,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinningMethod {
    /// Each distinct value is its own bin.
    BinUniqueValues,
    /// Equal-width bins with floating point boundaries.
    BinByRange,
    /// Equal-width bins with integral boundaries.
    #[default]
    BinByIntegerRange,
}

/// How range bins are drawn along the bar axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalDisplay {
    /// Bars span their bin; the axis shows the cutpoints between bins.
    #[default]
    Cutpoints,
    /// Bars sit at the bin midpoints labeled with their ranges.
    Midpoints,
}

/// Per-histogram options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramOptions {
    pub binning_method: BinningMethod,
    pub rounding: RoundingMethod,
    pub interval_display: IntervalDisplay,
    pub bin_label_display: BinLabelDisplay,
    /// Position unique-value bars at their values rather than at consecutive slots.
    pub show_full_range_of_values: bool,
    /// Forces the first bin to start at this value.
    pub bins_start: Option<f64>,
    /// Suggested number of range bins.
    pub bin_count: Option<usize>,
    /// Lowers the maximum bin count from [`ChartSettings::max_bin_count`].
    pub max_bin_count: Option<usize>,
    /// Round range bin sizes up to 5, 10, 20, 25, 50, 100, ... (integer ranges only).
    pub neat_intervals: bool,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            binning_method: BinningMethod::default(),
            rounding: RoundingMethod::default(),
            interval_display: IntervalDisplay::default(),
            bin_label_display: BinLabelDisplay::default(),
            show_full_range_of_values: true,
            bins_start: None,
            bin_count: None,
            max_bin_count: None,
            neat_intervals: false,
        }
    }
}

/// A binned continuous column.
///
/// The binning method, rounding and full-range flag are the ones actually
/// used, which may differ from the requested options (few distinct values
/// force unique-value binning, too many force range binning, and a data range
/// narrower than 2 forces unrounded floating point ranges).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub chart: BarChart,
    pub binning_method: BinningMethod,
    pub rounding: RoundingMethod,
    pub interval_display: IntervalDisplay,
    pub show_full_range_of_values: bool,
    /// Number of bins the observations were sorted into.
    pub bin_count: usize,
    pub bins_with_values_count: usize,
    pub valid_n: usize,
    pub legend: Vec<LegendEntry>,
}

impl Histogram {
    /// Bins `continuous_column`, optionally splitting each bar by `group_column`.
    ///
    /// NaN observations are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::ColumnNotFound`] if either column is missing,
    /// [`ChartError::GroupCodeNotFound`] if a row's group code has no label.
    pub fn new(
        dataset: &Dataset,
        continuous_column: &str,
        group_column: Option<&str>,
        options: &HistogramOptions,
        settings: &ChartSettings,
    ) -> Result<Self, ChartError> {
        let group_column = group_column
            .map(|name| {
                dataset.categorical_column(name).ok_or_else(|| {
                    ChartError::column_not_found(ColumnKind::Group, name, ChartKind::Histogram)
                })
            })
            .transpose()?;
        let column = dataset.continuous_column(continuous_column).ok_or_else(|| {
            ChartError::column_not_found(
                ColumnKind::Continuous,
                continuous_column,
                ChartKind::Histogram,
            )
        })?;
        let groups = group_column.map(GroupIdMap::new);

        let max_bin_count = options
            .max_bin_count
            .map_or(settings.max_bin_count, |n| n.min(settings.max_bin_count))
            .max(1);
        let mut binner = Binner {
            dataset,
            values: &column.values,
            groups: groups.as_ref(),
            binning_method: options.binning_method,
            rounding: options.rounding,
            interval_display: options.interval_display,
            show_full_range_of_values: options.show_full_range_of_values,
            bins_start: options.bins_start.filter(|start| !start.is_nan()),
            bin_count_hint: options.bin_count.map(|n| n.clamp(1, max_bin_count)),
            max_bin_count,
            max_observations_in_bin: settings.max_observations_in_bin,
            neat_intervals: options.neat_intervals,
            valid_n: column.values.iter().filter(|v| v.is_finite()).count(),
            chart: BarChart::new(Orientation::Vertical),
            bin_count: 0,
        };
        binner.run()?;

        let Binner {
            binning_method,
            rounding,
            show_full_range_of_values,
            valid_n,
            mut chart,
            bin_count,
            ..
        } = binner;
        chart.bar_axis.title.clone_from(&column.name);
        chart.scaling_axis.title = "Frequency".to_owned();
        #[expect(clippy::cast_precision_loss)]
        chart.update_bar_labels(options.bin_label_display, valid_n as f64);
        let bins_with_values_count = chart.bars.iter().filter(|b| b.length() > 0.0).count();
        tracing::debug!(
            column = %column.name,
            ?binning_method,
            bin_count,
            bins_with_values_count,
            "built histogram"
        );

        Ok(Self {
            chart,
            binning_method,
            rounding,
            interval_display: options.interval_display,
            show_full_range_of_values,
            bin_count,
            bins_with_values_count,
            valid_n,
            legend: groups.map(|g| g.legend().to_vec()).unwrap_or_default(),
        })
    }

    /// Number of positions the bars occupy along the bar axis.
    #[must_use]
    pub fn bar_slot_count(&self) -> usize {
        self.chart.bar_slot_count()
    }
}

/// Key of a unique-value block: the bin value, then the group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct UniqueBlockKey {
    bin: Real,
    group_label: NoCase,
    scheme_index: usize,
}

/// Key of a range block: the bin index, then the group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RangeBlockKey {
    bin: usize,
    group_label: NoCase,
    scheme_index: usize,
}

struct Binner<'a> {
    dataset: &'a Dataset,
    values: &'a [f64],
    groups: Option<&'a GroupIdMap<'a>>,
    binning_method: BinningMethod,
    rounding: RoundingMethod,
    interval_display: IntervalDisplay,
    show_full_range_of_values: bool,
    bins_start: Option<f64>,
    bin_count_hint: Option<usize>,
    max_bin_count: usize,
    max_observations_in_bin: usize,
    neat_intervals: bool,
    valid_n: usize,
    chart: BarChart,
    bin_count: usize,
}

impl Binner<'_> {
    fn run(&mut self) -> Result<(), ChartError> {
        if self.valid_n == 0 {
            self.chart.reset_axes_for_empty_data();
            return Ok(());
        }
        if self.unique_values_count() <= 4 {
            if self.binning_method != BinningMethod::BinUniqueValues {
                tracing::debug!("four or fewer distinct values, binning by unique values");
            }
            self.binning_method = BinningMethod::BinUniqueValues;
        }
        match self.binning_method {
            BinningMethod::BinUniqueValues => self.sort_into_unique_values(),
            BinningMethod::BinByRange | BinningMethod::BinByIntegerRange => {
                self.sort_into_ranges()
            }
        }
    }

    /// Row index and value of every finite observation.
    ///
    /// Missing values and infinities are left out of the bins.
    fn observations(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
    }

    fn sortable(&self, value: f64) -> f64 {
        convert_to_sortable_value(value, self.rounding)
    }

    fn row_group(&self, row: usize) -> Result<RowGroup, ChartError> {
        self.groups
            .map_or_else(|| Ok(RowGroup::default()), |groups| groups.row_group(row))
    }

    fn row_id(&self, row: usize) -> NoCase {
        NoCase::from(self.dataset.id(row))
    }

    fn unique_values_count(&self) -> usize {
        self.observations()
            .map(|(_, value)| Real::new(self.sortable(value)))
            .collect::<FrequencySet<_>>()
            .len()
    }

    /// Minimum and maximum of the finite observations.
    fn value_range(&self) -> (f64, f64) {
        self.observations()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (_, v)| {
                (min.min(v), max.max(v))
            })
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn calc_number_of_bins(&self) -> Result<usize, ChartError> {
        let n = self.valid_n;
        if n <= 1 {
            return Ok(1);
        }
        // Sturges
        if n < 200 {
            return Ok((n as f64).log2().ceil() as usize + 1);
        }
        // Scott
        let (min, max) = self.value_range();
        let finite = self.observations().map(|(_, v)| v).collect::<Vec<_>>();
        let std_dev = standard_deviation(&finite, true)?;
        let width = 3.5 * safe_divide(std_dev, (n as f64).cbrt());
        Ok((safe_divide(max - min, width) as usize).max(1))
    }

    fn bar_block(
        &self,
        group_label: &NoCase,
        scheme_index: usize,
        entry: &MultiValueEntry<BTreeSet<NoCase>>,
    ) -> BarBlock {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = entry.total as usize;
        BarBlock {
            length: entry.total,
            count,
            scheme_index,
            tag: group_label.as_str().to_owned(),
            selection_label: selection_label(count, &entry.values),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn sort_into_unique_values(&mut self) -> Result<(), ChartError> {
        let mut blocks = MultiValueAggregateMap::new();
        blocks.set_values_list_max_size(Some(self.max_observations_in_bin));
        let mut has_floating_point_value = false;
        for (row, value) in self.observations() {
            let group = self.row_group(row)?;
            blocks.insert(
                UniqueBlockKey {
                    bin: Real::new(self.sortable(value)),
                    group_label: NoCase::from(group.label),
                    scheme_index: group.scheme_index,
                },
                self.row_id(row),
                1.0,
            );
            if !self.rounding.is_rounding() && has_fractional_part(value) {
                has_floating_point_value = true;
            }
        }

        let distinct_bins = blocks.keys().map(|k| k.bin).collect::<BTreeSet<_>>();
        if distinct_bins.len() > self.max_bin_count {
            self.binning_method = if has_floating_point_value {
                BinningMethod::BinByRange
            } else {
                BinningMethod::BinByIntegerRange
            };
            tracing::debug!(
                distinct = distinct_bins.len(),
                max_bin_count = self.max_bin_count,
                binning_method = ?self.binning_method,
                "too many distinct values, binning by range"
            );
            return self.sort_into_ranges();
        }

        // Unrounded floats are shown at consecutive slots labeled with their values.
        if has_floating_point_value {
            self.show_full_range_of_values = false;
            self.chart.bar_axis.precision = 4;
        } else {
            self.chart.bar_axis.precision = 0;
        }

        if let Some(start) = self.bins_start.filter(|&start| {
            self.show_full_range_of_values && !distinct_bins.contains(&Real::new(start))
        }) {
            self.chart.add_bar(Bar::new(start, ""));
        }

        let mut slot = 0_usize;
        let mut previous_bin = None;
        for (key, entry) in &blocks {
            let bin = key.bin.get();
            let position = if self.show_full_range_of_values {
                bin
            } else {
                if previous_bin != Some(key.bin) {
                    slot += 1;
                }
                slot as f64
            };
            previous_bin = Some(key.bin);

            let block = self.bar_block(&key.group_label, key.scheme_index, entry);
            if let Some(bar) = self.chart.bar_at_mut(position) {
                bar.blocks.push(block);
            } else {
                let axis_label = if self.show_full_range_of_values {
                    String::new()
                } else {
                    format_number(bin, if has_fractional_part(bin) { 2 } else { 0 })
                };
                let mut bar = Bar::new(position, axis_label);
                bar.blocks.push(block);
                self.chart.add_bar(bar);
            }
        }
        self.chart.refit_scaling_axis();
        self.bin_count = distinct_bins.len();
        Ok(())
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn sort_into_ranges(&mut self) -> Result<(), ChartError> {
        let (raw_min, raw_max) = self.value_range();
        // A narrow range would collapse into one or two integer bins.
        if raw_max - raw_min < 2.0 && raw_max - raw_min > 0.0 {
            tracing::debug!(
                range = raw_max - raw_min,
                "narrow data range, binning by unrounded floating point ranges"
            );
            self.binning_method = BinningMethod::BinByRange;
            self.rounding = RoundingMethod::NoRounding;
        }
        if self.binning_method == BinningMethod::BinByIntegerRange
            && raw_max - raw_min > MAX_INTEGER_SPAN
        {
            tracing::debug!(
                range = raw_max - raw_min,
                "data range too wide for integer bins, binning by floating point ranges"
            );
            self.binning_method = BinningMethod::BinByRange;
        }
        let is_integer_mode = self.binning_method == BinningMethod::BinByIntegerRange;

        // Rounding a value up into the lowest integer gets a bin of its own.
        let sortable_min = self.sortable(raw_min);
        let is_lowest_value_adjusted = raw_min.floor() == sortable_min
            && !compare_doubles(sortable_min, 0.0, DEFAULT_DELTA)
            && self.bins_start.is_none_or(|start| raw_min < start);

        let (mut min, mut max) = self
            .observations()
            .map(|(_, value)| self.sortable(value))
            .fold((raw_min, raw_max), |(min, max), v| (min.min(v), max.max(v)));
        if let Some(start) = self.bins_start {
            min = min.min(start);
        }

        let mut bin_count = match self.bin_count_hint {
            Some(count) => count,
            None => self.calc_number_of_bins()?.min(self.max_bin_count),
        };

        if is_integer_mode {
            min = min.floor();
            if self.rounding.is_rounding() && is_lowest_value_adjusted {
                min -= 1.0;
            }
            max = max.ceil().max(min + 1.0);

            let raw_size = (max - min) / bin_count as f64;
            if self.neat_intervals && raw_size > 5.0 {
                let mut size = neat_bin_size(raw_size);
                loop {
                    let low = if self.bins_start.is_some() {
                        min
                    } else {
                        (min / size).floor() * size
                    };
                    let count = (((max - low) / size).ceil() as usize).max(1);
                    if count <= self.max_bin_count {
                        min = low;
                        max = low + size * count as f64;
                        bin_count = count;
                        break;
                    }
                    size = neat_bin_size(size * 2.0);
                }
                tracing::debug!(size, bin_count, "using neat intervals");
            } else {
                let (pad_low, pad_high) =
                    range_padding(max - min, bin_count, self.bins_start.is_some());
                min -= pad_low;
                max += pad_high;
            }
            tracing::debug!(min, max, bin_count, "padded integer range");
        } else if max <= min {
            max = min + 1.0;
        }
        let bin_size = safe_divide(max - min, bin_count as f64);

        let mut blocks = MultiValueAggregateMap::new();
        blocks.set_values_list_max_size(Some(self.max_observations_in_bin));
        for (row, value) in self.observations() {
            let value = self.sortable(value);
            // The minimum goes into the first bin even though it sits on its lower edge.
            let bin = if compare_doubles(value, min, DEFAULT_DELTA) {
                Some(0)
            } else {
                (0..bin_count).find(|&j| {
                    let low = min + j as f64 * bin_size;
                    compare_doubles_greater(value, low, DEFAULT_DELTA)
                        && compare_doubles_less_or_equal(value, low + bin_size, DEFAULT_DELTA)
                })
            };
            let Some(bin) = bin else {
                tracing::debug!(row, value, "observation outside of the bins");
                continue;
            };
            let group = self.row_group(row)?;
            blocks.insert(
                RangeBlockKey {
                    bin,
                    group_label: NoCase::from(group.label),
                    scheme_index: group.scheme_index,
                },
                self.row_id(row),
                1.0,
            );
        }

        let start_position = min + safe_divide(bin_size, 2.0);
        self.chart.bar_axis.precision = if !is_integer_mode
            && (has_fractional_part(start_position) || has_fractional_part(bin_size))
        {
            4
        } else {
            0
        };
        self.chart.bar_axis.interval = bin_size;

        let mut bins = vec![Vec::new(); bin_count];
        for (key, entry) in &blocks {
            bins[key.bin].push(self.bar_block(&key.group_label, key.scheme_index, entry));
        }
        while bins.last().is_some_and(Vec::is_empty) {
            bins.pop();
        }

        let mut first_bin_with_values_found = false;
        for (i, bar_blocks) in bins.iter().enumerate() {
            let position = start_position + i as f64 * bin_size;
            // Leading empty bins are dropped unless they are past a forced start.
            if !first_bin_with_values_found
                && bar_blocks.is_empty()
                && self.bins_start.is_none_or(|start| position < start)
            {
                continue;
            }
            first_bin_with_values_found = true;

            let axis_label = match self.interval_display {
                IntervalDisplay::Midpoints => {
                    self.range_label(i, min, bin_size, is_lowest_value_adjusted)
                }
                IntervalDisplay::Cutpoints => String::new(),
            };
            let mut bar = Bar::new(position, axis_label);
            bar.blocks.clone_from(bar_blocks);
            if self.interval_display == IntervalDisplay::Cutpoints {
                bar.custom_width = Some(bin_size);
            }
            self.chart.add_bar(bar);
        }
        self.bin_count = bins.len();
        Ok(())
    }

    #[expect(clippy::cast_precision_loss)]
    fn range_label(
        &self,
        i: usize,
        min: f64,
        bin_size: f64,
        is_lowest_value_adjusted: bool,
    ) -> String {
        let low = min + i as f64 * bin_size;
        let high = low + bin_size;
        if self.binning_method == BinningMethod::BinByIntegerRange && self.rounding.is_rounding() {
            // Integer bins start at the integer after the cutpoint, except the
            // first which also holds the minimum.
            let start = match (i, is_lowest_value_adjusted) {
                (0, true) => min + 1.0,
                (0, false) => min,
                _ => low + 1.0,
            };
            if compare_doubles(start, high, DEFAULT_DELTA) {
                format_count(start)
            } else {
                format!("{}-{}", format_count(start), format_count(high))
            }
        } else {
            format!(
                "{} {} and <= {}",
                if i == 0 { ">=" } else { ">" },
                format_number(low, 6),
                format_number(high, 6)
            )
        }
    }
}

/// Widest span whose integer endpoints are all exactly representable.
const MAX_INTEGER_SPAN: f64 = 9_007_199_254_740_992.0;

/// Amounts to widen an integer span by at the low and high ends so that it
/// divides evenly into `bin_count` bins.
///
/// Padding alternates between the high and the low end, starting with the
/// high end. A forced start pads only the high end.
#[expect(clippy::cast_precision_loss)]
fn range_padding(span: f64, bin_count: usize, is_start_forced: bool) -> (f64, f64) {
    let bin_count = bin_count as f64;
    let remainder = span % bin_count;
    if span <= 0.0 || remainder == 0.0 {
        return (0.0, 0.0);
    }
    let padding = bin_count - remainder;
    if is_start_forced {
        (0.0, padding)
    } else {
        let low = (padding / 2.0).floor();
        (low, padding - low)
    }
}

fn neat_bin_size(raw_size: f64) -> f64 {
    NEAT_BIN_SIZES
        .iter()
        .copied()
        .find(|&size| size >= raw_size)
        .unwrap_or_else(|| (raw_size / 1_000.0).ceil() * 1_000.0)
}

/// `"N item(s)"` followed by the listed observation ids, one per line.
///
/// An ellipsis marks a list that holds more than one id but not all of them.
fn selection_label(count: usize, ids: &BTreeSet<NoCase>) -> String {
    #[expect(clippy::cast_precision_loss)]
    let mut label = format!("{} item(s)", format_count(count as f64));
    let mut listed = 0;
    for id in ids.iter().filter(|id| !id.as_str().is_empty()) {
        label.push('\n');
        label.push_str(id.as_str());
        listed += 1;
    }
    if listed > 1 && listed < count {
        label.push_str("...");
    }
    label
}

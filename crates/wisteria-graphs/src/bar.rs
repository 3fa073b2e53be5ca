//! Bars, axes and the bar chart sink the builders write into.
//!
//! A [`BarChart`] owns the bars produced by a builder together with the bar
//! axis (where bars sit) and the scaling axis (how long they are). Adding a
//! bar widens the bar axis to hold it and stretches the scaling axis to fit
//! the longest bar.

use serde::{Deserialize, Serialize};
use wisteria_stats::{
    key::cmp_no_case,
    math::{DEFAULT_DELTA, compare_doubles, has_fractional_part, next_interval, safe_divide},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarSortComparison {
    ByBarLength,
    ByAxisLabel,
}

/// What text is shown on each bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinLabelDisplay {
    /// The bar's length (e.g. `"1,024"`).
    #[default]
    BinValue,
    /// The bar's share of the total (e.g. `"12%"`).
    BinPercentage,
    /// Both (e.g. `"1,024 (12%)"`).
    BinValueAndPercentage,
    NoDisplay,
    /// The bar's axis label.
    BinName,
}

/// A segment of a bar, one per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarBlock {
    pub length: f64,
    /// Number of observations in the block.
    pub count: usize,
    pub scheme_index: usize,
    /// Group label, empty when ungrouped.
    pub tag: String,
    /// Text shown when the block is selected: a count header followed by
    /// some of the observation ids.
    pub selection_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub axis_position: f64,
    pub blocks: Vec<BarBlock>,
    pub label: String,
    pub axis_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<f64>,
}

impl Bar {
    #[must_use]
    pub fn new(axis_position: f64, axis_label: impl Into<String>) -> Self {
        Self {
            axis_position,
            blocks: vec![],
            label: String::new(),
            axis_label: axis_label.into(),
            custom_width: None,
        }
    }

    /// Total length of the bar's blocks.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.blocks.iter().map(|b| b.length).sum()
    }

    /// Total number of observations in the bar's blocks.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.blocks.iter().map(|b| b.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub position: f64,
    pub label: String,
}

/// The axis the bars sit along.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarAxis {
    pub title: String,
    pub precision: usize,
    pub interval: f64,
    pub range: (f64, f64),
    /// Labels replacing the numeric tick labels, ordered by position.
    pub custom_labels: Vec<AxisLabel>,
}

impl Default for BarAxis {
    fn default() -> Self {
        Self {
            title: String::new(),
            precision: 0,
            interval: 1.0,
            range: (0.0, 10.0),
            custom_labels: vec![],
        }
    }
}

impl BarAxis {
    pub fn set_custom_label(&mut self, position: f64, label: impl Into<String>) {
        let label = label.into();
        match self
            .custom_labels
            .iter_mut()
            .find(|l| compare_doubles(l.position, position, DEFAULT_DELTA))
        {
            Some(existing) => existing.label = label,
            None => {
                let index = self
                    .custom_labels
                    .partition_point(|l| l.position < position);
                self.custom_labels
                    .insert(index, AxisLabel { position, label });
            }
        }
    }

    #[must_use]
    pub fn custom_label(&self, position: f64) -> Option<&str> {
        self.custom_labels
            .iter()
            .find(|l| compare_doubles(l.position, position, DEFAULT_DELTA))
            .map(|l| l.label.as_str())
    }

    pub fn clear_custom_labels(&mut self) {
        self.custom_labels.clear();
    }
}

/// The axis bar lengths are measured along.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingAxis {
    pub title: String,
    pub range: (f64, f64),
    pub precision: usize,
    pub interval: f64,
}

impl Default for ScalingAxis {
    fn default() -> Self {
        Self {
            title: String::new(),
            range: (0.0, 10.0),
            precision: 0,
            interval: 1.0,
        }
    }
}

impl ScalingAxis {
    /// Stretches the axis so that a bar of `longest` fits, snapping the end to
    /// a readable interval for long bars.
    fn fit(&mut self, longest: f64) {
        let (end, interval) = match longest {
            l if l >= 50_000.0 => (next_interval(l, 5), 10_000.0),
            l if l >= 20_000.0 => (next_interval(l, 4), 5_000.0),
            l if l >= 10_000.0 => (next_interval(l, 4), 1_000.0),
            l if l >= 1_500.0 => (next_interval(l, 4), 500.0),
            l if l > 300.0 => (next_interval(l, 3), 100.0),
            l if l > 10.0 => (next_interval(l, 2), 10.0),
            l => (l.ceil().max(1.0), 1.0),
        };
        self.range = (0.0, end);
        self.interval = interval;
        if has_fractional_part(longest) {
            self.precision = self.precision.max(2);
        }
    }
}

/// Bars plus their axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub orientation: Orientation,
    pub bars: Vec<Bar>,
    pub bar_axis: BarAxis,
    pub scaling_axis: ScalingAxis,
    #[serde(skip)]
    lowest_position: Option<f64>,
    #[serde(skip)]
    highest_position: Option<f64>,
    #[serde(skip)]
    longest_bar: f64,
}

impl BarChart {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            bars: vec![],
            bar_axis: BarAxis::default(),
            scaling_axis: ScalingAxis::default(),
            lowest_position: None,
            highest_position: None,
            longest_bar: 0.0,
        }
    }

    /// Adds `bar`, widening the bar axis and the scaling axis to hold it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wisteria_graphs::bar::{Bar, BarBlock, BarChart, Orientation};
    /// let mut chart = BarChart::new(Orientation::Vertical);
    /// let mut bar = Bar::new(1.0, "Apples");
    /// bar.blocks.push(BarBlock {
    ///     length: 420.0,
    ///     count: 420,
    ///     scheme_index: 0,
    ///     tag: String::new(),
    ///     selection_label: String::new(),
    /// });
    /// chart.add_bar(bar);
    /// assert_eq!(chart.scaling_axis.range, (0.0, 500.0));
    /// assert_eq!(chart.bar_axis.range, (0.0, 2.0));
    /// assert_eq!(chart.bar_axis.custom_label(1.0), Some("Apples"));
    /// ```
    pub fn add_bar(&mut self, bar: Bar) {
        let half_width = bar.custom_width.map_or(0.0, |w| w / 2.0);
        let low = bar.axis_position - half_width;
        let high = bar.axis_position + half_width;
        let lowest = self.lowest_position.map_or(low, |p| p.min(low));
        let highest = self.highest_position.map_or(high, |p| p.max(high));
        self.lowest_position = Some(lowest);
        self.highest_position = Some(highest);
        self.bar_axis.range = (
            lowest - self.bar_axis.interval,
            highest + self.bar_axis.interval,
        );
        if !bar.axis_label.is_empty() {
            self.bar_axis
                .set_custom_label(bar.axis_position, bar.axis_label.clone());
        }
        let length = bar.length();
        if length > self.longest_bar {
            self.longest_bar = length;
            self.scaling_axis.fit(length);
        }
        self.bars.push(bar);
    }

    /// Re-fits the scaling axis after bar lengths were changed in place.
    pub fn refit_scaling_axis(&mut self) {
        self.longest_bar = self.bars.iter().map(Bar::length).fold(0.0, f64::max);
        if self.longest_bar > 0.0 {
            self.scaling_axis.fit(self.longest_bar);
        }
    }

    #[must_use]
    pub fn bar_index_at(&self, position: f64) -> Option<usize> {
        self.bars
            .iter()
            .position(|b| compare_doubles(b.axis_position, position, DEFAULT_DELTA))
    }

    pub fn bar_at_mut(&mut self, position: f64) -> Option<&mut Bar> {
        let index = self.bar_index_at(position)?;
        self.bars.get_mut(index)
    }

    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.bars.iter().map(Bar::length).sum()
    }

    /// Number of positions the bars occupy.
    #[must_use]
    pub fn bar_slot_count(&self) -> usize {
        self.bars.len()
    }

    /// Resets both axes to the empty `0..10` range used when there is no data.
    pub fn reset_axes_for_empty_data(&mut self) {
        self.bar_axis.range = (0.0, 10.0);
        self.bar_axis.interval = 1.0;
        self.scaling_axis.range = (0.0, 10.0);
        self.scaling_axis.interval = 1.0;
    }

    /// Sets every bar's label according to `display`.
    ///
    /// Percentages are relative to `total`; pass [`BarChart::total_length`]
    /// for a share of the chart.
    pub fn update_bar_labels(&mut self, display: BinLabelDisplay, total: f64) {
        for bar in &mut self.bars {
            bar.label = bar_label(bar, display, total);
        }
    }

    /// Sorts the bars and re-seats them at consecutive axis positions.
    ///
    /// The bar axis starts at the origin, so ascending order along a
    /// vertical axis and descending order along a horizontal axis both fill
    /// the positions from the lowest one upward.
    pub fn sort_bars(&mut self, comparison: BarSortComparison, direction: SortDirection) {
        if self.bars.is_empty() {
            return;
        }
        let fill_upward = matches!(
            (direction, self.orientation),
            (SortDirection::Ascending, Orientation::Vertical)
                | (SortDirection::Descending, Orientation::Horizontal)
        );
        // Stable sort: tied bars keep their current order either way.
        self.bars.sort_by(|a, b| {
            let order = match comparison {
                BarSortComparison::ByBarLength => a.length().total_cmp(&b.length()),
                BarSortComparison::ByAxisLabel => cmp_no_case(&a.axis_label, &b.axis_label),
            };
            if fill_upward { order } else { order.reverse() }
        });

        let interval = if self.bar_axis.interval > 0.0 {
            self.bar_axis.interval
        } else {
            1.0
        };
        let lowest = self.lowest_position.unwrap_or_else(|| {
            self.bars
                .iter()
                .map(|b| b.axis_position)
                .fold(f64::INFINITY, f64::min)
        });
        self.bar_axis.clear_custom_labels();
        let mut position = lowest;
        for bar in &mut self.bars {
            bar.axis_position = position;
            if !bar.axis_label.is_empty() {
                self.bar_axis
                    .set_custom_label(position, bar.axis_label.clone());
            }
            position += interval;
        }
        let highest = position - interval;
        self.highest_position = Some(highest);
        self.bar_axis.range = (lowest - interval, highest + interval);
    }
}

fn bar_label(bar: &Bar, display: BinLabelDisplay, total: f64) -> String {
    let length = bar.length();
    if length == 0.0 {
        return String::new();
    }
    let percentage = safe_divide(length, total) * 100.0;
    let percentage_text = || {
        let decimals = if percentage < 1.0 { 2 } else { 0 };
        format!("{}%", format_number(percentage, decimals))
    };
    match display {
        BinLabelDisplay::NoDisplay => String::new(),
        BinLabelDisplay::BinName => bar.axis_label.clone(),
        BinLabelDisplay::BinValue => format_count(length),
        BinLabelDisplay::BinPercentage => percentage_text(),
        BinLabelDisplay::BinValueAndPercentage => {
            format!("{} ({})", format_count(length), percentage_text())
        }
    }
}

/// Formats `value` with at most `max_decimals` decimals, dropping trailing zeros.
///
/// # Examples
///
/// ```
/// # use wisteria_graphs::bar::format_number;
/// assert_eq!(format_number(2.5, 6), "2.5");
/// assert_eq!(format_number(1.0 / 3.0, 2), "0.33");
/// assert_eq!(format_number(7.0, 4), "7");
/// ```
#[must_use]
pub fn format_number(value: f64, max_decimals: usize) -> String {
    let text = format!("{value:.max_decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

/// Formats `value` as a whole number with thousands separators.
///
/// # Examples
///
/// ```
/// # use wisteria_graphs::bar::format_count;
/// assert_eq!(format_count(1_234_567.0), "1,234,567");
/// assert_eq!(format_count(-1_200.4), "-1,200");
/// assert_eq!(format_count(12.0), "12");
/// ```
#[must_use]
pub fn format_count(value: f64) -> String {
    let text = format_number(value, 0);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(length: f64) -> BarBlock {
        BarBlock {
            length,
            count: 1,
            scheme_index: 0,
            tag: String::new(),
            selection_label: String::new(),
        }
    }

    fn bar(position: f64, label: &str, length: f64) -> Bar {
        let mut bar = Bar::new(position, label);
        bar.blocks.push(block(length));
        bar
    }

    #[test]
    fn test_bar_length_sums_blocks() {
        let mut b = bar(1.0, "a", 2.0);
        b.blocks.push(block(3.5));
        assert_eq!(b.length(), 5.5);
        assert_eq!(b.observation_count(), 2);
    }

    #[test]
    fn test_add_bar_with_width() {
        let mut chart = BarChart::new(Orientation::Vertical);
        chart.bar_axis.interval = 5.0;
        let mut b = bar(2.5, "", 4.0);
        b.custom_width = Some(5.0);
        chart.add_bar(b);
        assert_eq!(chart.bar_axis.range, (-5.0, 10.0));
        assert!(chart.bar_axis.custom_labels.is_empty());
        assert_eq!(chart.scaling_axis.range, (0.0, 4.0));
    }

    #[test]
    fn test_scaling_axis_fit() {
        let mut axis = ScalingAxis::default();
        axis.fit(51_234.0);
        assert_eq!(axis.range, (0.0, 60_000.0));
        assert_eq!(axis.interval, 10_000.0);
        axis.fit(301.0);
        assert_eq!(axis.range, (0.0, 400.0));
        axis.fit(42.0);
        assert_eq!(axis.range, (0.0, 50.0));
        axis.fit(2.5);
        assert_eq!(axis.range, (0.0, 3.0));
        assert_eq!(axis.precision, 2);
    }

    #[test]
    fn test_bar_labels() {
        let mut chart = BarChart::new(Orientation::Vertical);
        chart.add_bar(bar(1.0, "small", 1.0));
        chart.add_bar(bar(2.0, "large", 1_499.0));
        chart.add_bar(bar(3.0, "empty", 0.0));
        let total = chart.total_length();

        chart.update_bar_labels(BinLabelDisplay::BinValue, total);
        assert_eq!(chart.bars[1].label, "1,499");
        assert_eq!(chart.bars[2].label, "");

        chart.update_bar_labels(BinLabelDisplay::BinPercentage, total);
        assert_eq!(chart.bars[0].label, "0.07%");
        assert_eq!(chart.bars[1].label, "100%");

        chart.update_bar_labels(BinLabelDisplay::BinValueAndPercentage, total);
        assert_eq!(chart.bars[1].label, "1,499 (100%)");

        chart.update_bar_labels(BinLabelDisplay::BinName, total);
        assert_eq!(chart.bars[0].label, "small");

        chart.update_bar_labels(BinLabelDisplay::NoDisplay, total);
        assert!(chart.bars.iter().all(|b| b.label.is_empty()));
    }

    fn positions_and_labels(chart: &BarChart) -> Vec<(f64, &str)> {
        chart
            .bars
            .iter()
            .map(|b| (b.axis_position, b.axis_label.as_str()))
            .collect()
    }

    #[test]
    fn test_sort_by_length() {
        let mut chart = BarChart::new(Orientation::Vertical);
        chart.add_bar(bar(1.0, "b", 5.0));
        chart.add_bar(bar(2.0, "a", 9.0));
        chart.add_bar(bar(3.0, "c", 1.0));

        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Ascending);
        assert_eq!(
            positions_and_labels(&chart),
            [(1.0, "c"), (2.0, "b"), (3.0, "a")]
        );
        assert_eq!(chart.bar_axis.custom_label(1.0), Some("c"));

        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Descending);
        assert_eq!(
            positions_and_labels(&chart),
            [(1.0, "a"), (2.0, "b"), (3.0, "c")]
        );
    }

    #[test]
    fn test_sort_horizontal_descending_fills_upward() {
        let mut chart = BarChart::new(Orientation::Horizontal);
        chart.add_bar(bar(0.0, "b", 5.0));
        chart.add_bar(bar(1.0, "a", 9.0));
        chart.add_bar(bar(2.0, "c", 1.0));
        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Descending);
        assert_eq!(
            positions_and_labels(&chart),
            [(0.0, "c"), (1.0, "b"), (2.0, "a")]
        );
        assert_eq!(chart.bar_axis.range, (-1.0, 3.0));
    }

    #[test]
    fn test_sort_keeps_tied_bars_in_order() {
        let mut chart = BarChart::new(Orientation::Vertical);
        chart.add_bar(bar(1.0, "a", 5.0));
        chart.add_bar(bar(2.0, "b", 5.0));
        chart.add_bar(bar(3.0, "c", 1.0));
        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Descending);
        assert_eq!(
            positions_and_labels(&chart),
            [(1.0, "a"), (2.0, "b"), (3.0, "c")]
        );

        let mut chart = BarChart::new(Orientation::Horizontal);
        chart.add_bar(bar(0.0, "a", 5.0));
        chart.add_bar(bar(1.0, "b", 5.0));
        chart.add_bar(bar(2.0, "c", 9.0));
        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Descending);
        assert_eq!(
            positions_and_labels(&chart),
            [(0.0, "a"), (1.0, "b"), (2.0, "c")]
        );
        chart.sort_bars(BarSortComparison::ByBarLength, SortDirection::Ascending);
        assert_eq!(
            positions_and_labels(&chart),
            [(0.0, "c"), (1.0, "a"), (2.0, "b")]
        );
    }

    #[test]
    fn test_sort_by_label_ignores_case() {
        let mut chart = BarChart::new(Orientation::Vertical);
        chart.add_bar(bar(1.0, "beta", 1.0));
        chart.add_bar(bar(2.0, "Gamma", 1.0));
        chart.add_bar(bar(3.0, "ALPHA", 1.0));
        chart.sort_bars(BarSortComparison::ByAxisLabel, SortDirection::Ascending);
        assert_eq!(
            positions_and_labels(&chart),
            [(1.0, "ALPHA"), (2.0, "beta"), (3.0, "Gamma")]
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-0.000_01, 2), "0");
        assert_eq!(format_number(10.0, 0), "10");
        assert_eq!(format_number(12.345_678_9, 6), "12.345679");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_000.0), "1,000");
    }
}

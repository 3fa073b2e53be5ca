//! Grouping support shared by the chart builders.
//!
//! A group's scheme index (the slot used to pick its color or brush) is the
//! alphabetical, case-insensitive rank of its label. The index therefore does
//! not depend on how the integer codes were assigned when the data was
//! imported.

use std::collections::BTreeMap;

use serde::Serialize;
use wisteria_stats::key::NoCase;

use crate::{
    dataset::{CategoricalColumn, GroupId},
    error::ChartError,
};

/// One legend line: a group label and its scheme index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub scheme_index: usize,
}

/// Maps the codes of a grouping column to scheme indices.
#[derive(Debug, Clone)]
pub struct GroupIdMap<'a> {
    column: &'a CategoricalColumn,
    indices: BTreeMap<GroupId, usize>,
    legend: Vec<LegendEntry>,
}

impl<'a> GroupIdMap<'a> {
    /// Builds the map from the column's string table, or from the codes
    /// present in the data when the column has no string table.
    ///
    /// Labels that differ only in case share one slot; the first code seen
    /// for such a label keeps it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// # use wisteria_graphs::{dataset::CategoricalColumn, group::GroupIdMap};
    /// let column = CategoricalColumn {
    ///     name: "Region".to_owned(),
    ///     labels: BTreeMap::from([(0, "West".to_owned()), (1, "east".to_owned()), (2, "North".to_owned())]),
    ///     codes: vec![0, 1, 2],
    /// };
    /// let groups = GroupIdMap::new(&column);
    /// assert_eq!(groups.scheme_index(1).unwrap(), 0); // east
    /// assert_eq!(groups.scheme_index(2).unwrap(), 1); // North
    /// assert_eq!(groups.scheme_index(0).unwrap(), 2); // West
    /// ```
    #[must_use]
    pub fn new(column: &'a CategoricalColumn) -> Self {
        let mut by_label = BTreeMap::<NoCase, GroupId>::new();
        if column.has_labels() {
            for (&code, label) in &column.labels {
                by_label.entry(NoCase::from(label.as_str())).or_insert(code);
            }
        } else {
            for &code in &column.codes {
                by_label.entry(NoCase::from(code.to_string())).or_insert(code);
            }
        }

        let mut indices = BTreeMap::new();
        let mut legend = Vec::with_capacity(by_label.len());
        for (scheme_index, (label, code)) in by_label.into_iter().enumerate() {
            indices.insert(code, scheme_index);
            legend.push(LegendEntry {
                label: label.into_inner(),
                scheme_index,
            });
        }
        Self {
            column,
            indices,
            legend,
        }
    }

    #[must_use]
    pub fn column(&self) -> &'a CategoricalColumn {
        self.column
    }

    pub fn scheme_index(&self, code: GroupId) -> Result<usize, ChartError> {
        self.indices
            .get(&code)
            .copied()
            .ok_or_else(|| ChartError::GroupCodeNotFound {
                code,
                column: self.column.name.clone(),
            })
    }

    /// Returns the group code, label and scheme index of `row`.
    pub fn row_group(&self, row: usize) -> Result<RowGroup, ChartError> {
        let code = self.column.codes.get(row).copied().unwrap_or_default();
        Ok(RowGroup {
            code,
            label: self.column.label(code),
            scheme_index: self.scheme_index(code)?,
        })
    }

    /// Legend entries in scheme-index order.
    #[must_use]
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }
}

/// The group a row belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowGroup {
    pub code: GroupId,
    pub label: String,
    pub scheme_index: usize,
}

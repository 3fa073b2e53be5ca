//! Column-oriented dataset the chart builders read from.
//!
//! A [`Dataset`] holds an optional id column (per-row display strings),
//! continuous columns of `f64` where NaN marks a missing value, and
//! categorical columns of integer codes with an optional code-to-label
//! string table. Column names are matched case-insensitively.
//!
//! # JSON format
//!
//! ```
//! # use wisteria_graphs::dataset::Dataset;
//! let json = r#"{
//!     "name": "exam",
//!     "id_column": { "name": "Student", "values": ["ann", "bob", "cal"] },
//!     "continuous_columns": [{ "name": "Score", "values": [71.5, null, 88] }],
//!     "categorical_columns": [{
//!         "name": "Class",
//!         "labels": { "0": "Morning", "1": "Evening" },
//!         "codes": [0, 1, 1]
//!     }]
//! }"#;
//! let dataset: Dataset = serde_json::from_str(json).unwrap();
//! dataset.validate().unwrap();
//! assert_eq!(dataset.row_count(), 3);
//! assert!(dataset.continuous_column("score").unwrap().values[1].is_nan());
//! assert_eq!(dataset.categorical_column("CLASS").unwrap().label(1), "Evening");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wisteria_stats::key::cmp_no_case;

/// Integer code of a categorical value.
pub type GroupId = u64;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("'{column}': column has {actual} rows, expected {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[display("'{name}': column already exists in the dataset")]
    DuplicateColumn { name: String },
}

/// Per-row display strings (e.g. names of the observations).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdColumn {
    pub name: String,
    pub values: Vec<String>,
}

/// A numeric column; NaN marks a missing observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousColumn {
    pub name: String,
    #[serde(with = "missing_as_null")]
    pub values: Vec<f64>,
}

/// A column of category codes with an optional code-to-label table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<GroupId, String>,
    pub codes: Vec<GroupId>,
}

impl CategoricalColumn {
    /// Returns `true` if the column carries a string table.
    #[must_use]
    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Returns the label of `code`, falling back to the code itself.
    #[must_use]
    pub fn label(&self, code: GroupId) -> String {
        self.labels
            .get(&code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Returns the label of the value in `row`.
    #[must_use]
    pub fn label_at(&self, row: usize) -> String {
        self.codes
            .get(row)
            .map(|&code| self.label(code))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<IdColumn>,
    #[serde(default)]
    pub continuous_columns: Vec<ContinuousColumn>,
    #[serde(default)]
    pub categorical_columns: Vec<CategoricalColumn>,
}

impl Dataset {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of rows, taken from the first column present.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.column_lengths()
            .next()
            .map_or(0, |(_, length)| length)
    }

    fn column_lengths(&self) -> impl Iterator<Item = (&str, usize)> {
        let ids = self
            .id_column
            .iter()
            .map(|c| (c.name.as_str(), c.values.len()));
        let continuous = self
            .continuous_columns
            .iter()
            .map(|c| (c.name.as_str(), c.values.len()));
        let categorical = self
            .categorical_columns
            .iter()
            .map(|c| (c.name.as_str(), c.codes.len()));
        ids.chain(continuous).chain(categorical)
    }

    fn column_names(&self) -> impl Iterator<Item = &str> {
        self.column_lengths().map(|(name, _)| name)
    }

    /// Checks that every column has the same number of rows and that column
    /// names are unique (ignoring case).
    pub fn validate(&self) -> Result<(), DatasetError> {
        let expected = self.row_count();
        for (column, actual) in self.column_lengths() {
            if actual != expected {
                return Err(DatasetError::RowCountMismatch {
                    column: column.to_owned(),
                    expected,
                    actual,
                });
            }
        }
        let names = self.column_names().collect::<Vec<_>>();
        for (i, name) in names.iter().enumerate() {
            if names[..i].iter().any(|n| cmp_no_case(n, name).is_eq()) {
                return Err(DatasetError::DuplicateColumn {
                    name: (*name).to_owned(),
                });
            }
        }
        Ok(())
    }

    fn check_new_column(&self, name: &str, length: usize) -> Result<(), DatasetError> {
        if self.column_names().any(|n| cmp_no_case(n, name).is_eq()) {
            return Err(DatasetError::DuplicateColumn {
                name: name.to_owned(),
            });
        }
        if self.column_lengths().next().is_some() && length != self.row_count() {
            return Err(DatasetError::RowCountMismatch {
                column: name.to_owned(),
                expected: self.row_count(),
                actual: length,
            });
        }
        Ok(())
    }

    pub fn set_id_column<I, S>(&mut self, name: &str, values: I) -> Result<(), DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let previous = self.id_column.take();
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        if let Err(err) = self.check_new_column(name, values.len()) {
            self.id_column = previous;
            return Err(err);
        }
        self.id_column = Some(IdColumn {
            name: name.to_owned(),
            values,
        });
        Ok(())
    }

    pub fn add_continuous_column<I>(&mut self, name: &str, values: I) -> Result<(), DatasetError>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        self.check_new_column(name, values.len())?;
        self.continuous_columns.push(ContinuousColumn {
            name: name.to_owned(),
            values,
        });
        Ok(())
    }

    pub fn add_categorical_column<I, L>(
        &mut self,
        name: &str,
        labels: L,
        codes: I,
    ) -> Result<(), DatasetError>
    where
        I: IntoIterator<Item = GroupId>,
        L: IntoIterator<Item = (GroupId, String)>,
    {
        let codes = codes.into_iter().collect::<Vec<_>>();
        self.check_new_column(name, codes.len())?;
        self.categorical_columns.push(CategoricalColumn {
            name: name.to_owned(),
            labels: labels.into_iter().collect(),
            codes,
        });
        Ok(())
    }

    #[must_use]
    pub fn id_column(&self) -> Option<&IdColumn> {
        self.id_column.as_ref()
    }

    /// Returns the id of `row`, or an empty string if there is no id column.
    #[must_use]
    pub fn id(&self, row: usize) -> &str {
        self.id_column
            .as_ref()
            .and_then(|c| c.values.get(row))
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn continuous_column(&self, name: &str) -> Option<&ContinuousColumn> {
        self.continuous_columns
            .iter()
            .find(|c| cmp_no_case(&c.name, name).is_eq())
    }

    #[must_use]
    pub fn categorical_column(&self, name: &str) -> Option<&CategoricalColumn> {
        self.categorical_columns
            .iter()
            .find(|c| cmp_no_case(&c.name, name).is_eq())
    }

    /// Returns `true` if `name` is the id column's name (ignoring case).
    #[must_use]
    pub fn is_id_column(&self, name: &str) -> bool {
        self.id_column
            .as_ref()
            .is_some_and(|c| cmp_no_case(&c.name, name).is_eq())
    }
}

mod missing_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(|v| (!v.is_nan()).then_some(*v)))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new("sample");
        dataset.set_id_column("Name", ["a", "b", "c"]).unwrap();
        dataset
            .add_continuous_column("Height", [1.5, f64::NAN, 2.0])
            .unwrap();
        dataset
            .add_categorical_column(
                "Team",
                [(1, "Red".to_owned()), (2, "Blue".to_owned())],
                [1, 2, 2],
            )
            .unwrap();
        dataset
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dataset = sample();
        assert!(dataset.continuous_column("HEIGHT").is_some());
        assert!(dataset.categorical_column("team").is_some());
        assert!(dataset.continuous_column("Team").is_none());
        assert!(dataset.is_id_column("name"));
        assert_eq!(dataset.id(1), "b");
        assert_eq!(dataset.id(9), "");
    }

    #[test]
    fn test_labels() {
        let dataset = sample();
        let team = dataset.categorical_column("Team").unwrap();
        assert!(team.has_labels());
        assert_eq!(team.label_at(0), "Red");
        assert_eq!(team.label(7), "7");
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut dataset = sample();
        assert_eq!(
            dataset.add_continuous_column("Weight", [1.0]),
            Err(DatasetError::RowCountMismatch {
                column: "Weight".to_owned(),
                expected: 3,
                actual: 1
            })
        );
        assert_eq!(
            dataset.add_continuous_column("height", [1.0, 2.0, 3.0]),
            Err(DatasetError::DuplicateColumn {
                name: "height".to_owned()
            })
        );
        assert!(dataset.validate().is_ok());

        dataset.continuous_columns[0].values.push(4.0);
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_missing_values() {
        let dataset = sample();
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains("[1.5,null,2.0]"));
        let parsed: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.row_count(), 3);
        assert!(parsed.continuous_column("Height").unwrap().values[1].is_nan());
        assert_eq!(parsed.categorical_column("Team").unwrap().label(2), "Blue");
    }
}

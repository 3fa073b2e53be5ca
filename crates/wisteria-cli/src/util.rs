use std::{
    fmt, fs,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};
use wisteria_graphs::{dataset::Dataset, settings::ChartSettings};

/// Where a command writes its JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget<'a> {
    Stdout,
    File(&'a Path),
}

impl<'a> ReportTarget<'a> {
    /// Writes to `path`, or to stdout when no path is given.
    pub fn new(path: Option<&'a Path>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Writes `report` as pretty-printed JSON followed by a newline.
    pub fn write<T>(self, report: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let mut json = serde_json::to_string_pretty(report)
            .with_context(|| format!("Failed to serialize the report for {self}"))?;
        json.push('\n');
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(json.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("Failed to write the report to stdout")?;
            }
            Self::File(path) => fs::write(path, json)
                .with_context(|| format!("Failed to write the report to {}", path.display()))?,
        }
        tracing::debug!(output = %self, "wrote report");
        Ok(())
    }
}

impl fmt::Display for ReportTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads one of the tool's JSON inputs; `what` names it in error messages.
fn read_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {what} JSON file: {}", path.display()))
}

/// Reads a dataset from a JSON file and checks that its columns line up.
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or if the columns
/// have differing row counts or duplicate names
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<Dataset>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dataset: Dataset = read_json("dataset", path)?;
    dataset
        .validate()
        .with_context(|| format!("Invalid dataset file: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Reads chart settings from a JSON file; missing fields keep their defaults.
pub fn read_settings_file<P>(path: P) -> anyhow::Result<ChartSettings>
where
    P: AsRef<Path>,
{
    read_json("settings", path.as_ref())
}

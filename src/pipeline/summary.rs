//! The run summary document

use super::result::ProcessingResult;
use crate::error::{ErrorExt, IngestError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info};

/// Results keyed by file name, in the order the files were processed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResults(Vec<(String, ProcessingResult)>);

impl RunResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result, replacing any earlier one for the same file
    pub fn insert(&mut self, file_name: impl Into<String>, result: ProcessingResult) {
        let file_name = file_name.into();
        match self.0.iter_mut().find(|(name, _)| *name == file_name) {
            Some((_, existing)) => *existing = result,
            None => self.0.push((file_name, result)),
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&ProcessingResult> {
        self.0
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProcessingResult)> {
        self.0.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RunResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, result)| (name, result)))
    }
}

impl<'de> Deserialize<'de> for RunResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut results = RunResults::new();
        for (name, result) in deserialize_entries::<D, ProcessingResult>(deserializer)? {
            results.insert(name, result);
        }
        Ok(results)
    }
}

/// Read a JSON object as its entries, keeping document order
fn deserialize_entries<'de, D, V>(
    deserializer: D,
) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of file name to processing result")
        }

        fn visit_map<A: MapAccess<'de>>(
            self,
            mut access: A,
        ) -> std::result::Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = access.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

/// Aggregate record of one pipeline run
///
/// `files_processed` and `records_processed` are derived from `results`
/// when the summary is built and are never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub timestamp: DateTime<Utc>,
    pub duration_seconds: f64,
    pub files_processed: usize,
    pub records_processed: usize,
    pub results: RunResults,
}

impl PipelineSummary {
    pub fn new(results: RunResults, timestamp: DateTime<Utc>, duration_seconds: f64) -> Self {
        let files_processed = results.iter().filter(|(_, r)| r.is_success()).count();
        let records_processed = results.iter().map(|(_, r)| r.records()).sum();
        Self {
            timestamp,
            duration_seconds,
            files_processed,
            records_processed,
            results,
        }
    }

    /// Every file that did not succeed, with its reason
    pub fn failures(&self) -> impl Iterator<Item = (&str, String)> {
        self.results
            .iter()
            .filter_map(|(name, result)| result.reason().map(|reason| (name, reason)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Write the summary as pretty JSON, replacing any previous run's
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).to_summary_error(path)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // write to a sibling temp file and rename so readers never see half a document
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        fs::write(&temp, json).to_summary_error(path)?;
        fs::rename(&temp, path).to_summary_error(path)?;

        info!(path = %path.display(), "Saved pipeline summary");
        Ok(())
    }

    /// Read a summary back; `None` when absent or unreadable
    ///
    /// Summary readers treat both cases as "pipeline not run".
    pub fn load(path: &Path) -> Option<Self> {
        match Self::try_load(path) {
            Ok(summary) => Some(summary),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No usable pipeline summary");
                None
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| IngestError::from(e).with_context(format!("reading {}", path.display())))?;
    Ok(serde_json::from_str(&contents)?)
}

/// One file's entry as a summary reader sees it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResultView {
    pub status: String,
    pub records: Option<usize>,
    pub reason: Option<String>,
}

impl ResultView {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// A run summary read leniently, for display
///
/// Only the `status` of each result is relied on. Everything else may be
/// missing: the timestamp is kept as written (naive or zoned), and absent
/// totals are derived from the results. Documents written by other tools
/// with this shape are read just like [`PipelineSummary`]'s own output.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummaryView {
    pub timestamp: Option<String>,
    pub duration_seconds: Option<f64>,
    pub files_processed: Option<usize>,
    pub records_processed: Option<usize>,
    #[serde(deserialize_with = "deserialize_entries")]
    pub results: Vec<(String, ResultView)>,
}

impl SummaryView {
    /// Read a summary for display; `None` when absent or unreadable
    pub fn load(path: &Path) -> Option<Self> {
        match read_json(path) {
            Ok(view) => Some(view),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No usable pipeline summary");
                None
            }
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files_processed
            .unwrap_or_else(|| self.results.iter().filter(|(_, r)| r.is_success()).count())
    }

    pub fn records_processed(&self) -> usize {
        self.records_processed.unwrap_or_else(|| {
            self.results
                .iter()
                .filter(|(_, r)| r.is_success())
                .filter_map(|(_, r)| r.records)
                .sum()
        })
    }

    /// The run timestamp as `YYYY-MM-DD HH:MM:SS`, suffixed `UTC` when zoned
    ///
    /// Text that parses as neither form is returned unchanged.
    pub fn display_timestamp(&self) -> Option<String> {
        let raw = self.timestamp.as_deref()?;
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(at.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(at.format("%Y-%m-%d %H:%M:%S").to_string());
            }
        }
        Some(raw.to_string())
    }
}

//! Basic data-quality reporting

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::info;

/// Expected `[min, max]` range for a numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

impl FromStr for RangeRule {
    type Err = String;

    /// Parse `column=min:max`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, range) = s
            .split_once('=')
            .ok_or_else(|| format!("expected column=min:max, got '{}'", s))?;
        let (min, max) = range
            .split_once(':')
            .ok_or_else(|| format!("expected min:max after '=', got '{}'", range))?;
        let min: f64 = min
            .trim()
            .parse()
            .map_err(|_| format!("invalid minimum '{}'", min))?;
        let max: f64 = max
            .trim()
            .parse()
            .map_err(|_| format!("invalid maximum '{}'", max))?;
        if column.trim().is_empty() {
            return Err("column name is empty".to_string());
        }
        if min > max {
            return Err(format!("minimum {} is greater than maximum {}", min, max));
        }
        Ok(Self {
            column: column.trim().to_string(),
            min,
            max,
        })
    }
}

/// Observed versus expected range of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub expected_min: f64,
    pub expected_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_rows: usize,
    /// Only columns with at least one null appear here
    pub null_counts: BTreeMap<String, usize>,
    pub value_ranges: BTreeMap<String, ValueRange>,
    pub issues: Vec<String>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Count nulls per column and compare numeric columns against expected ranges
///
/// Range rules naming a column the dataset lacks are ignored. Non-numeric
/// cells are left out of the observed range.
pub fn quality_report(dataset: &Dataset, range_rules: &[RangeRule]) -> QualityReport {
    let mut report = QualityReport {
        total_rows: dataset.len(),
        ..Default::default()
    };

    for column in dataset.columns() {
        let nulls = dataset
            .column_values(column)
            .map(|values| values.filter(|v| v.is_null()).count())
            .unwrap_or(0);
        if nulls > 0 {
            report.null_counts.insert(column.clone(), nulls);
            report
                .issues
                .push(format!("Column {} has {} null values", column, nulls));
        }
    }

    for rule in range_rules {
        let Some(values) = dataset.column_values(&rule.column) else {
            continue;
        };

        let observed = values
            .filter_map(|v| v.as_f64())
            .fold(None, |acc: Option<(f64, f64)>, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            });

        let Some((lo, hi)) = observed else {
            report.issues.push(format!(
                "Column {} has no numeric values to compare against [{}, {}]",
                rule.column, rule.min, rule.max
            ));
            continue;
        };

        report.value_ranges.insert(
            rule.column.clone(),
            ValueRange {
                min: lo,
                max: hi,
                expected_min: rule.min,
                expected_max: rule.max,
            },
        );

        if lo < rule.min || hi > rule.max {
            report.issues.push(format!(
                "Column {} outside expected range [{}, {}]: [{}, {}]",
                rule.column, rule.min, rule.max, lo, hi
            ));
        }
    }

    info!(
        rows = report.total_rows,
        issues = report.issues.len(),
        "Data quality check complete"
    );
    report
}

//! Declarative schema contracts

use super::issue::{ValidationIssue, ValidationResult};
use super::rules::BusinessRule;
use super::{DataType, Validator};
use crate::dataset::Dataset;
use tracing::{debug, warn};

/// A column the contract requires
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRequirement {
    pub name: String,
    /// Set for critical columns: the schema-drift notice emitted when the
    /// column goes missing
    pub drift_message: Option<String>,
}

/// Required columns and business rules for one data type
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaContract {
    pub data_type: DataType,
    pub required: Vec<ColumnRequirement>,
    pub rules: Vec<BusinessRule>,
}

impl SchemaContract {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            required: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn require(mut self, column: impl Into<String>) -> Self {
        self.required.push(ColumnRequirement {
            name: column.into(),
            drift_message: None,
        });
        self
    }

    /// Require a column whose absence is reported as schema drift
    pub fn require_critical(
        mut self,
        column: impl Into<String>,
        drift_message: impl Into<String>,
    ) -> Self {
        self.required.push(ColumnRequirement {
            name: column.into(),
            drift_message: Some(drift_message.into()),
        });
        self
    }

    pub fn rule(mut self, rule: BusinessRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn check_columns(&self, dataset: &Dataset, result: &mut ValidationResult) {
        let missing: Vec<&ColumnRequirement> = self
            .required
            .iter()
            .filter(|req| !dataset.has_column(&req.name))
            .collect();

        if missing.is_empty() {
            return;
        }

        result.push(ValidationIssue::MissingColumns {
            columns: missing.iter().map(|req| req.name.clone()).collect(),
        });

        for req in missing {
            if let Some(message) = &req.drift_message {
                warn!(
                    data_type = %self.data_type,
                    column = %req.name,
                    "Schema drift: critical column missing"
                );
                result.push(ValidationIssue::SchemaDrift {
                    column: req.name.clone(),
                    message: message.clone(),
                });
            }
        }
    }

    fn check_rules(&self, dataset: &Dataset, result: &mut ValidationResult) {
        for rule in &self.rules {
            let Some(values) = dataset.column_values(&rule.column) else {
                debug!(column = %rule.column, "Rule column absent, skipping");
                continue;
            };

            match rule.count_violations(values) {
                Ok(0) => {}
                Ok(count) => result.push(ValidationIssue::RuleViolation {
                    column: rule.column.clone(),
                    count,
                    message: rule.violation_message(count),
                }),
                Err(e) => result.push(ValidationIssue::RuleEvaluation {
                    column: rule.column.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }
}

impl Validator for SchemaContract {
    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn validate(&self, dataset: &Dataset) -> ValidationResult {
        let mut result = ValidationResult::default();
        self.check_columns(dataset, &mut result);
        self.check_rules(dataset, &mut result);
        result
    }
}

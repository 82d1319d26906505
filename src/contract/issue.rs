//! Validation outcomes

use std::fmt;

/// A single reason a dataset was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// One or more required columns are absent (reported once, aggregated)
    MissingColumns { columns: Vec<String> },
    /// A critical column is absent; the message is the contract's drift notice
    SchemaDrift { column: String, message: String },
    /// Values are present but some rows fail the column's business rule
    RuleViolation {
        column: String,
        count: usize,
        message: String,
    },
    /// The business rule could not be evaluated at all
    RuleEvaluation { column: String, reason: String },
}

impl ValidationIssue {
    pub fn is_schema_drift(&self) -> bool {
        matches!(self, Self::SchemaDrift { .. })
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumns { columns } => {
                write!(f, "Missing required columns: {:?}", columns)
            }
            Self::SchemaDrift { message, .. } => f.write_str(message),
            Self::RuleViolation { message, .. } => f.write_str(message),
            Self::RuleEvaluation { column, reason } => {
                write!(f, "Error checking rule for {}: {}", column, reason)
            }
        }
    }
}

/// Result of validating one dataset against one contract
///
/// Validity is derived from the issue list, so a result can never claim to
/// be valid while carrying errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new(errors: Vec<ValidationIssue>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Rendered error messages, in the order they were found
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has_schema_drift(&self) -> bool {
        self.errors.iter().any(ValidationIssue::is_schema_drift)
    }

    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }
}

//! Column-level business rules

use crate::dataset::Value;
use thiserror::Error;

/// Numeric predicate applied to every value of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    AtLeast(f64),
    /// Inclusive on both ends
    Between { min: f64, max: f64 },
}

impl Predicate {
    pub fn holds(&self, value: f64) -> bool {
        match *self {
            Predicate::AtLeast(min) => value >= min,
            Predicate::Between { min, max } => value >= min && value <= max,
        }
    }
}

/// How non-numeric cells are treated before the predicate runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Text cells make the rule unevaluable
    Strict,
    /// Text cells that do not parse as numbers become missing values
    Lenient,
}

/// Whether a missing value satisfies the rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    Pass,
    Fail,
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("non-numeric value '{value}' ({type_name}) at row {row}")]
    NonNumeric {
        row: usize,
        value: String,
        type_name: &'static str,
    },
}

/// A predicate bound to a column, with its violation message
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessRule {
    pub column: String,
    pub predicate: Predicate,
    pub coercion: Coercion,
    pub nulls: NullPolicy,
    /// Violation message template; `{count}` is replaced by the number of
    /// failing rows
    pub message: Option<String>,
}

impl BusinessRule {
    pub fn new(column: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            column: column.into(),
            predicate,
            coercion: Coercion::Strict,
            nulls: NullPolicy::Pass,
            message: None,
        }
    }

    pub fn at_least(column: impl Into<String>, min: f64) -> Self {
        Self::new(column, Predicate::AtLeast(min))
    }

    pub fn between(column: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(column, Predicate::Between { min, max })
    }

    pub fn lenient(mut self) -> Self {
        self.coercion = Coercion::Lenient;
        self
    }

    pub fn nulls(mut self, policy: NullPolicy) -> Self {
        self.nulls = policy;
        self
    }

    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Count the values that fail the rule
    pub fn count_violations<'a>(
        &self,
        values: impl IntoIterator<Item = &'a Value>,
    ) -> Result<usize, RuleError> {
        let mut violations = 0;
        for (row, value) in values.into_iter().enumerate() {
            let coerced;
            let value = match self.coercion {
                Coercion::Strict => value,
                Coercion::Lenient => {
                    coerced = value.coerce_numeric();
                    &coerced
                }
            };

            if value.is_null() {
                if self.nulls == NullPolicy::Fail {
                    violations += 1;
                }
                continue;
            }

            let number = value.as_f64().ok_or_else(|| RuleError::NonNumeric {
                row,
                value: value.to_string(),
                type_name: value.type_name(),
            })?;
            if !self.predicate.holds(number) {
                violations += 1;
            }
        }
        Ok(violations)
    }

    pub fn violation_message(&self, count: usize) -> String {
        match &self.message {
            Some(template) => template.replace("{count}", &count.to_string()),
            None => format!(
                "Business rule violation in {}: {} records failed",
                self.column, count
            ),
        }
    }
}

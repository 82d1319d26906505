//! Schema contracts and the registry that dispatches on data type
//!
//! Every input file is validated by exactly one [`Validator`], looked up by
//! its [`DataType`] in a [`ContractRegistry`]. The standard registry carries
//! the retail contracts:
//!
//! - `stores`: `store_id`, `store_name`, `region` required
//! - `sales`: no required columns; `total_sales` and `transaction_count`
//!   must not be negative when present
//! - `inventory`: `date`, `store_id` required
//! - `promotions`: six required columns, `discount_pct` critical, and
//!   discounts must lie in `[0, 1]`
//!
//! Validation is pure: no I/O, and it never fails. Problems evaluating a
//! rule are reported as issues in the [`ValidationResult`].

pub mod issue;
pub mod rules;
pub mod schema;


pub use issue::{ValidationIssue, ValidationResult};
pub use rules::{BusinessRule, Coercion, NullPolicy, Predicate, RuleError};
pub use schema::{ColumnRequirement, SchemaContract};

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const DISCOUNT_DRIFT_MESSAGE: &str = "SCHEMA DRIFT DETECTED: discount_pct column missing. \
     Pipeline stopped to protect data trust. \
     Contact upstream team to resolve column name change.";

/// The kinds of dataset the pipeline knows how to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Stores,
    Sales,
    Inventory,
    Promotions,
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::Stores,
        DataType::Sales,
        DataType::Inventory,
        DataType::Promotions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Stores => "stores",
            DataType::Sales => "sales",
            DataType::Inventory => "inventory",
            DataType::Promotions => "promotions",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown data type '{}'", s))
    }
}

/// Anything that can accept or reject a dataset
pub trait Validator: Send + Sync {
    fn data_type(&self) -> DataType;

    fn validate(&self, dataset: &Dataset) -> ValidationResult;
}

/// Dispatch table from data type to its validator
pub struct ContractRegistry {
    validators: HashMap<DataType, Box<dyn Validator>>,
}

impl ContractRegistry {
    /// An empty registry; every lookup passes until validators are registered
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// The retail contracts for all four data types
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for contract in standard_contracts() {
            registry.register(contract);
        }
        registry
    }

    /// Register a validator, replacing any existing one for its data type
    pub fn register(&mut self, validator: impl Validator + 'static) {
        self.validators
            .insert(validator.data_type(), Box::new(validator));
    }

    pub fn get(&self, data_type: DataType) -> Option<&dyn Validator> {
        self.validators.get(&data_type).map(|v| v.as_ref())
    }

    /// Validate a dataset against the contract for `data_type`
    ///
    /// A data type with no registered validator has nothing to enforce and
    /// is accepted.
    pub fn validate(&self, dataset: &Dataset, data_type: DataType) -> ValidationResult {
        match self.get(data_type) {
            Some(validator) => validator.validate(dataset),
            None => ValidationResult::default(),
        }
    }
}

impl Default for ContractRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_contracts() -> Vec<SchemaContract> {
    vec![
        SchemaContract::new(DataType::Stores)
            .require("store_id")
            .require("store_name")
            .require("region"),
        SchemaContract::new(DataType::Sales)
            .rule(
                BusinessRule::at_least("total_sales", 0.0)
                    .with_message("Found {count} records with negative sales"),
            )
            .rule(
                BusinessRule::at_least("transaction_count", 0.0)
                    .with_message("Found {count} records with negative transaction count"),
            ),
        SchemaContract::new(DataType::Inventory)
            .require("date")
            .require("store_id"),
        SchemaContract::new(DataType::Promotions)
            .require("promotion_id")
            .require("store_id")
            .require("start_date")
            .require("end_date")
            .require_critical("discount_pct", DISCOUNT_DRIFT_MESSAGE)
            .require("promotion_type")
            .rule(
                BusinessRule::between("discount_pct", 0.0, 1.0)
                    .lenient()
                    .nulls(NullPolicy::Fail)
                    .with_message("Found {count} invalid discount values (not between 0-1)"),
            ),
    ]
}

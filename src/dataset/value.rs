//! Scalar cell values

use std::fmt;

/// A single cell of a dataset
///
/// Cells are typed per cell, not per column: a column may hold a mix of
/// numbers and text, which is exactly the situation business rules need to
/// detect.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Cell text read as a missing value
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Value {
    /// Infer a value from raw CSV cell text
    ///
    /// Empty cells and the usual spreadsheet/dataframe missing markers
    /// (`NA`, `N/A`, `NaN`, `null`, `None`, ...) become [`Value::Null`].
    pub fn parse(raw: &str) -> Self {
        if NA_TOKENS.contains(&raw) {
            return Value::Null;
        }
        match raw {
            "True" | "true" | "TRUE" => return Value::Bool(true),
            "False" | "false" | "FALSE" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Value::Integer(i);
        }
        if looks_numeric(raw) {
            if let Ok(f) = raw.parse::<f64>() {
                return Value::Float(f);
            }
        }
        Value::Text(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value; booleans count as 0/1, text and nulls have none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Lenient numeric conversion: anything non-numeric becomes `Null`
    pub fn coerce_numeric(&self) -> Value {
        match self {
            Value::Integer(_) | Value::Float(_) => self.clone(),
            Value::Bool(b) => Value::Integer(i64::from(*b)),
            Value::Text(s) => match Value::parse(s.trim()) {
                v @ (Value::Integer(_) | Value::Float(_)) => v,
                _ => Value::Null,
            },
            Value::Null => Value::Null,
        }
    }

    /// Render the value back to CSV cell text
    pub fn to_csv_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) if f.is_nan() => String::new(),
            // keep a fractional part so the cell reads back as a float
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "str",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            other => write!(f, "{}", other.to_csv_field()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// Rust's float parser accepts "inf" and "infinity"; CSV data treats those as text.
fn looks_numeric(raw: &str) -> bool {
    raw.bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
        && raw.bytes().any(|b| b.is_ascii_digit())
}

//! Cell operations used by cleaning plans.
//!
//! Each operation maps one JSON cell to another. `Null` means "missing" and
//! passes through every operation untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{FieldParseError, FieldResult};

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").expect("static regex"));

/// All available cleaning operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Remove leading and trailing whitespace
    Trim,

    /// Keep the integer before the first non-digit ("25-123" -> 25)
    LeadingInteger,

    /// Remove every character outside `[0-9.]`
    StripNonNumeric,

    /// Parse a non-negative integer, ignoring thousands separators
    ToInteger,

    /// Parse a float
    ToFloat,

    /// Reject numbers that are zero or negative
    Positive,

    /// Turn numbers outside `[min, max]` into missing values
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl Operation {
    /// Apply this operation to a cell.
    pub fn apply(&self, value: &Value) -> FieldResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match self {
            Operation::Trim => Ok(map_text(value, |s| s.trim().to_string())),
            Operation::LeadingInteger => apply_leading_integer(value),
            Operation::StripNonNumeric => {
                Ok(map_text(value, |s| NON_NUMERIC.replace_all(s, "").into_owned()))
            }
            Operation::ToInteger => apply_to_integer(value),
            Operation::ToFloat => apply_to_float(value),
            Operation::Positive => apply_positive(value),
            Operation::Range { min, max } => Ok(apply_range(value, *min, *max)),
        }
    }

    /// Short label for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Trim => "trim",
            Operation::LeadingInteger => "leading_integer",
            Operation::StripNonNumeric => "strip_non_numeric",
            Operation::ToInteger => "to_integer",
            Operation::ToFloat => "to_float",
            Operation::Positive => "positive",
            Operation::Range { .. } => "range",
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn map_text(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

fn apply_leading_integer(value: &Value) -> FieldResult<Value> {
    if let Value::Number(n) = value {
        if n.is_u64() {
            return Ok(value.clone());
        }
    }
    let text = as_text(value).unwrap_or_default();
    let trimmed = text.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(FieldParseError::new(text, "no leading digits"));
    }
    digits
        .parse::<u64>()
        .map(|n| Value::Number(n.into()))
        .map_err(|e| FieldParseError::new(text.clone(), e.to_string()))
}

fn apply_to_integer(value: &Value) -> FieldResult<Value> {
    let text = match value {
        Value::Number(n) if n.is_u64() => return Ok(value.clone()),
        other => as_text(other).unwrap_or_default(),
    };
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(n) = cleaned.parse::<u64>() {
        return Ok(Value::Number(n.into()));
    }
    // Exported spreadsheets sometimes write counts as "12.0".
    match cleaned.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Ok(Value::Number((f as u64).into()))
        }
        Ok(_) => Err(FieldParseError::new(text, "expected a non-negative integer")),
        Err(_) => Err(FieldParseError::new(text, "not an integer")),
    }
}

fn apply_to_float(value: &Value) -> FieldResult<Value> {
    let text = match value {
        Value::Number(_) => return Ok(value.clone()),
        other => as_text(other).unwrap_or_default(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    let parsed = trimmed
        .parse::<f64>()
        .map_err(|_| FieldParseError::new(text.clone(), "not a number"))?;
    Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| FieldParseError::new(text.clone(), "not a finite number"))
}

fn apply_positive(value: &Value) -> FieldResult<Value> {
    match value.as_f64() {
        Some(n) if n <= 0.0 => Err(FieldParseError::new(
            as_text(value).unwrap_or_default(),
            "expected a positive number",
        )),
        _ => Ok(value.clone()),
    }
}

fn apply_range(value: &Value, min: Option<f64>, max: Option<f64>) -> Value {
    let Some(n) = value.as_f64() else {
        return value.clone();
    };
    let below = min.is_some_and(|m| n < m);
    let above = max.is_some_and(|m| n > m);
    if below || above {
        Value::Null
    } else {
        value.clone()
    }
}

/// Operations the standard plan runs on the age column.
pub fn age_operations() -> Vec<Operation> {
    vec![Operation::Trim, Operation::LeadingInteger, Operation::Positive]
}

/// Parse a raw age cell ("25-123" -> 25).
pub fn parse_age(raw: &str) -> FieldResult<u32> {
    let value = age_operations()
        .iter()
        .try_fold(Value::String(raw.to_string()), |value, op| op.apply(&value))?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| FieldParseError::new(raw, "age out of range"))
}

/// Parse a raw pass-completion cell; `None` means missing.
pub fn parse_pass_completion(raw: &str) -> Option<f64> {
    let ops = [
        Operation::StripNonNumeric,
        Operation::ToFloat,
        Operation::Range {
            min: Some(0.0),
            max: Some(100.0),
        },
    ];
    let mut value = Value::String(raw.to_string());
    for op in &ops {
        value = op.apply(&value).ok()?;
    }
    value.as_f64()
}

/// Describe the available operations for `pl-analyzer plan --describe`.
pub fn operations_description() -> String {
    r#"Available cleaning operations:

| Operation | Description | Parameters |
|-----------|-------------|------------|
| trim | Remove leading/trailing whitespace | - |
| leading_integer | Integer before the first non-digit | - |
| strip_non_numeric | Drop every character outside [0-9.] | - |
| to_integer | Non-negative integer, thousands separators ignored | - |
| to_float | Floating point number | - |
| positive | Zero or negative numbers are errors | - |
| range | Out-of-range numbers become missing | min, max (optional) |

Example rule in JSON:
{"column": "Pass Completion %", "operations": [
  {"type": "strip_non_numeric"},
  {"type": "to_float"},
  {"type": "range", "min": 0, "max": 100}
]}"#
        .to_string()
}

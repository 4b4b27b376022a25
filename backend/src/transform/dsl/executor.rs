//! Plan executor
//!
//! Runs a [`CleaningPlan`] over parsed rows. Cells that fail an operation
//! become `Null` and the failure is recorded; a bad cell never drops its row.

use serde_json::{Map, Value};

use super::plan::CleaningPlan;
use crate::error::FieldParseError;

/// Result of executing a cleaning plan
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Cleaned rows, drops and renames applied
    pub records: Vec<Value>,
    /// Cells that could not be coerced
    pub errors: Vec<FieldParseError>,
    /// Rows that were not JSON objects
    pub skipped: usize,
}

impl CleanResult {
    /// Summary line for logs
    pub fn summary(&self) -> String {
        format!(
            "Cleaned: {} rows, {} unparseable cells, {} skipped",
            self.records.len(),
            self.errors.len(),
            self.skipped
        )
    }
}

/// Execute a cleaning plan on parsed rows.
pub fn execute(rows: &[Value], plan: &CleaningPlan) -> CleanResult {
    let mut result = CleanResult::default();

    for (row_idx, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            result.skipped += 1;
            continue;
        };
        let cleaned = clean_row(obj, plan, row_idx, &mut result.errors);
        result.records.push(Value::Object(cleaned));
    }

    result
}

fn clean_row(
    row: &Map<String, Value>,
    plan: &CleaningPlan,
    row_idx: usize,
    errors: &mut Vec<FieldParseError>,
) -> Map<String, Value> {
    let mut out = row.clone();

    for rule in &plan.rules {
        let Some(raw) = out.get(&rule.column) else {
            continue;
        };
        let mut value = if is_blank(raw) { Value::Null } else { raw.clone() };

        for op in &rule.operations {
            match op.apply(&value) {
                Ok(v) => value = v,
                Err(err) => {
                    errors.push(err.in_column(rule.column.clone()).at_row(row_idx));
                    value = Value::Null;
                    break;
                }
            }
        }
        out.insert(rule.column.clone(), value);
    }

    for column in &plan.drop_columns {
        out.remove(column);
    }

    for rename in &plan.renames {
        if let Some(value) = out.remove(&rename.from) {
            out.insert(rename.to.clone(), value);
        }
    }

    out
}

/// Blank means missing: null or whitespace-only text.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

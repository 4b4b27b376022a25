//! Cleaning plan definition.
//!
//! A plan lists the per-column operation chains, then the columns to drop,
//! then the columns to rename. It is plain JSON so a dataset with slightly
//! different conventions can ship its own plan.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::operations::{age_operations, Operation};
use crate::error::{PlanError, PlanResult};
use crate::models::*;

/// A complete cleaning plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningPlan {
    /// Version of the plan format
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Per-column operation chains, applied in order
    #[serde(default)]
    pub rules: Vec<FieldRule>,

    /// Columns removed after the rules ran
    #[serde(default)]
    pub drop_columns: Vec<String>,

    /// Column aliases applied last
    #[serde(default)]
    pub renames: Vec<ColumnRename>,
}

/// Operations applied to one source column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub column: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Rename `from` to `to`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl CleaningPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self {
            version: default_version(),
            description: String::new(),
            rules: Vec::new(),
            drop_columns: Vec::new(),
            renames: Vec::new(),
        }
    }

    /// Parse and validate a plan from JSON
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let plan: CleaningPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Read a plan file
    pub fn from_file(path: &Path) -> PlanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a rule
    pub fn with_rule(mut self, column: &str, operations: Vec<Operation>) -> Self {
        self.rules.push(FieldRule {
            column: column.to_string(),
            operations,
        });
        self
    }

    /// Reject plans with blank names, duplicate rules or clashing renames.
    pub fn validate(&self) -> PlanResult<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.column.trim().is_empty() {
                return Err(PlanError::Invalid("rule with empty column name".to_string()));
            }
            if !seen.insert(rule.column.as_str()) {
                return Err(PlanError::Invalid(format!("duplicate rule for '{}'", rule.column)));
            }
        }

        let mut targets = HashSet::new();
        for rename in &self.renames {
            if rename.from.trim().is_empty() || rename.to.trim().is_empty() {
                return Err(PlanError::Invalid("rename with empty column name".to_string()));
            }
            if !targets.insert(rename.to.as_str()) {
                return Err(PlanError::Invalid(format!("two columns renamed to '{}'", rename.to)));
            }
        }
        Ok(())
    }

    /// Headers as they look after drops and renames.
    pub fn output_columns(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .filter(|h| !self.drop_columns.iter().any(|d| d == *h))
            .map(|h| self.renamed(h).to_string())
            .collect()
    }

    /// Name a column ends up with.
    pub fn renamed<'a>(&'a self, column: &'a str) -> &'a str {
        self.renames
            .iter()
            .find(|r| r.from == column)
            .map(|r| r.to.as_str())
            .unwrap_or(column)
    }
}

impl Default for CleaningPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Columns dropped by the standard plan.
pub const LOW_VALUE_COLUMNS: &[&str] = &[
    "Nation",
    "Penalty Kicks",
    "Penalty Kick Attempts",
    "Carries",
    "Progressive Carries",
    "Dribble Attempts",
    "Red Cards",
];

/// The plan for the standard player-statistics export.
pub fn default_plan() -> CleaningPlan {
    let counts = [COL_MINUTES, COL_GOALS, COL_ASSISTS, COL_YELLOW_CARDS];
    let floats = [
        COL_XG,
        COL_DRIBBLES,
        COL_TOUCHES,
        COL_TACKLES,
        COL_SCA,
        COL_PROGRESSIVE_PASSES,
    ];

    let mut plan = CleaningPlan::new()
        .with_rule(COL_PLAYER, vec![Operation::Trim])
        .with_rule(COL_TEAM, vec![Operation::Trim])
        .with_rule(COL_POSITION, vec![Operation::Trim])
        .with_rule(COL_AGE, age_operations())
        .with_rule(
            COL_PASS_COMPLETION,
            vec![
                Operation::StripNonNumeric,
                Operation::ToFloat,
                Operation::Range {
                    min: Some(0.0),
                    max: Some(100.0),
                },
            ],
        )
        .with_rule("#", vec![Operation::Trim, Operation::ToInteger]);

    for col in counts {
        plan = plan.with_rule(col, vec![Operation::Trim, Operation::ToInteger]);
    }
    for col in floats {
        plan = plan.with_rule(col, vec![Operation::Trim, Operation::ToFloat]);
    }

    plan.description = "Standard Premier League player statistics export".to_string();
    plan.drop_columns = LOW_VALUE_COLUMNS.iter().map(|c| c.to_string()).collect();
    plan.renames = vec![ColumnRename {
        from: "#".to_string(),
        to: COL_JERSEY.to_string(),
    }];
    plan
}

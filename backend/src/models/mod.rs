//! Domain models for the player-statistics pipeline.
//!
//! - [`PlayerRecord`] - one cleaned player-season-team row
//! - [`PlayerTable`] - the immutable cleaned dataset
//! - [`Field`] - numeric columns addressable by the metrics engine
//! - [`GroupKey`] - columns rows can be grouped by

use serde::{Deserialize, Serialize};

use crate::error::FieldParseError;

// =============================================================================
// Column Names
// =============================================================================

pub const COL_PLAYER: &str = "Player";
pub const COL_TEAM: &str = "Team";
pub const COL_POSITION: &str = "Position";
pub const COL_JERSEY: &str = "Jersey Number";
pub const COL_AGE: &str = "Age";
pub const COL_MINUTES: &str = "Minutes";
pub const COL_GOALS: &str = "Goals";
pub const COL_ASSISTS: &str = "Assists";
pub const COL_PASS_COMPLETION: &str = "Pass Completion %";
pub const COL_YELLOW_CARDS: &str = "Yellow Cards";
pub const COL_XG: &str = "xG";
pub const COL_DRIBBLES: &str = "Dribbles";
pub const COL_TOUCHES: &str = "Touches";
pub const COL_TACKLES: &str = "Tackles";
pub const COL_SCA: &str = "Shot-Creating Actions";
pub const COL_PROGRESSIVE_PASSES: &str = "Progressive Passes";

/// Columns a dataset must carry (after cleaning) to be usable.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_PLAYER,
    COL_TEAM,
    COL_POSITION,
    COL_AGE,
    COL_MINUTES,
    COL_GOALS,
    COL_ASSISTS,
    COL_PASS_COMPLETION,
    COL_YELLOW_CARDS,
];

// =============================================================================
// Player Record
// =============================================================================

/// One row per player-season-team entry.
///
/// Numeric attributes are `None` when the cell was empty or failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u32>,
    pub age: Option<u32>,
    pub minutes: Option<u32>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub pass_completion: Option<f64>,
    pub yellow_cards: Option<u32>,
    pub expected_goals: Option<f64>,
    pub dribbles: Option<f64>,
    pub touches: Option<f64>,
    pub tackles: Option<f64>,
    pub shot_creating_actions: Option<f64>,
    pub progressive_passes: Option<f64>,
}

impl PlayerRecord {
    /// Create a record with identity columns only.
    pub fn new(name: impl Into<String>, team: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    /// Value of a grouping column.
    pub fn key(&self, key: GroupKey) -> &str {
        match key {
            GroupKey::Player => &self.name,
            GroupKey::Team => &self.team,
            GroupKey::Position => &self.position,
        }
    }

    /// Minutes as a float, zero when missing.
    pub fn minutes_or_zero(&self) -> f64 {
        self.minutes.map(f64::from).unwrap_or(0.0)
    }
}

// =============================================================================
// Player Table
// =============================================================================

/// The cleaned, read-only dataset.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerTable {
    /// Rows in source order.
    pub records: Vec<PlayerRecord>,
    /// Column headers after cleaning (drops and renames applied).
    pub columns: Vec<String>,
    /// Cells that could not be coerced and were treated as missing.
    pub parse_errors: Vec<FieldParseError>,
}

impl PlayerTable {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self {
            records,
            columns: Vec::new(),
            parse_errors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow every row, the unfiltered view.
    pub fn rows(&self) -> Vec<&PlayerRecord> {
        self.records.iter().collect()
    }
}

// =============================================================================
// Fields & Group Keys
// =============================================================================

/// Numeric columns of a [`PlayerRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Minutes,
    Goals,
    Assists,
    PassCompletion,
    YellowCards,
    ExpectedGoals,
    Dribbles,
    Touches,
    Tackles,
    ShotCreatingActions,
    ProgressivePasses,
}

impl Field {
    /// Read this field from a record.
    pub fn value(self, record: &PlayerRecord) -> Option<f64> {
        match self {
            Field::Age => record.age.map(f64::from),
            Field::Minutes => record.minutes.map(f64::from),
            Field::Goals => record.goals.map(f64::from),
            Field::Assists => record.assists.map(f64::from),
            Field::PassCompletion => record.pass_completion,
            Field::YellowCards => record.yellow_cards.map(f64::from),
            Field::ExpectedGoals => record.expected_goals,
            Field::Dribbles => record.dribbles,
            Field::Touches => record.touches,
            Field::Tackles => record.tackles,
            Field::ShotCreatingActions => record.shot_creating_actions,
            Field::ProgressivePasses => record.progressive_passes,
        }
    }

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Field::Age => COL_AGE,
            Field::Minutes => COL_MINUTES,
            Field::Goals => COL_GOALS,
            Field::Assists => COL_ASSISTS,
            Field::PassCompletion => COL_PASS_COMPLETION,
            Field::YellowCards => COL_YELLOW_CARDS,
            Field::ExpectedGoals => COL_XG,
            Field::Dribbles => COL_DRIBBLES,
            Field::Touches => COL_TOUCHES,
            Field::Tackles => COL_TACKLES,
            Field::ShotCreatingActions => COL_SCA,
            Field::ProgressivePasses => COL_PROGRESSIVE_PASSES,
        }
    }
}

/// Columns rows can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Player,
    Team,
    Position,
}

impl GroupKey {
    pub fn column(self) -> &'static str {
        match self {
            GroupKey::Player => COL_PLAYER,
            GroupKey::Team => COL_TEAM,
            GroupKey::Position => COL_POSITION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_reads_missing_as_none() {
        let mut record = PlayerRecord::new("Saka", "Arsenal", "FW");
        record.goals = Some(14);
        assert_eq!(Field::Goals.value(&record), Some(14.0));
        assert_eq!(Field::ExpectedGoals.value(&record), None);
    }

    #[test]
    fn test_group_key_lookup() {
        let record = PlayerRecord::new("Rodri", "Manchester City", "MF");
        assert_eq!(record.key(GroupKey::Player), "Rodri");
        assert_eq!(record.key(GroupKey::Team), "Manchester City");
        assert_eq!(record.key(GroupKey::Position), "MF");
    }

    #[test]
    fn test_record_serialization_is_camel_case() {
        let mut record = PlayerRecord::new("Son", "Tottenham", "FW");
        record.yellow_cards = Some(2);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["yellowCards"], 2);
        assert!(json.get("jerseyNumber").is_none());
    }
}

//! Row filtering.
//!
//! A [`FilterSet`] is a conjunction of predicates over player, team,
//! position, age, minutes and goals. Filtering borrows rows out of the table
//! and never mutates it; an empty result is a valid outcome.

use serde::{Deserialize, Serialize};

use crate::models::{PlayerRecord, PlayerTable};

/// Wildcard label for "every team"
pub const ALL_TEAMS: &str = "All";

// =============================================================================
// Predicates
// =============================================================================

/// Inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub min: u32,
    pub max: u32,
}

impl RangeFilter {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Missing values never match a bounded range.
    pub fn matches(&self, value: Option<u32>) -> bool {
        value.is_some_and(|v| self.min <= v && v <= self.max)
    }
}

impl std::str::FromStr for RangeFilter {
    type Err = String;

    /// Parse "MIN-MAX" or a single value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid range bound '{}'", part.trim()))
        };
        let range = match s.split_once('-') {
            Some((lo, hi)) => RangeFilter::new(parse(lo)?, parse(hi)?),
            None => {
                let v = parse(s)?;
                RangeFilter::new(v, v)
            }
        };
        if range.min > range.max {
            return Err(format!("range '{}' has min greater than max", s));
        }
        Ok(range)
    }
}

/// Team selection: the "All" wildcard or one team
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamSelection {
    #[default]
    All,
    Team(String),
}

impl TeamSelection {
    pub fn matches(&self, team: &str) -> bool {
        match self {
            TeamSelection::All => true,
            TeamSelection::Team(selected) => selected == team,
        }
    }
}

impl From<String> for TeamSelection {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TEAMS) {
            TeamSelection::All
        } else {
            TeamSelection::Team(trimmed.to_string())
        }
    }
}

impl From<TeamSelection> for String {
    fn from(value: TeamSelection) -> Self {
        match value {
            TeamSelection::All => ALL_TEAMS.to_string(),
            TeamSelection::Team(team) => team,
        }
    }
}

// =============================================================================
// Filter Set
// =============================================================================

/// User-chosen predicates. `None` means "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub team: TeamSelection,
    #[serde(default)]
    pub positions: Option<Vec<String>>,
    #[serde(default)]
    pub age: Option<RangeFilter>,
    #[serde(default)]
    pub minutes: Option<RangeFilter>,
    #[serde(default)]
    pub goals: Option<RangeFilter>,
}

impl FilterSet {
    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        let allowed = |set: &Option<Vec<String>>, value: &str| {
            set.as_ref().map_or(true, |values| values.iter().any(|v| v == value))
        };
        let in_range = |range: &Option<RangeFilter>, value: Option<u32>| {
            range.as_ref().map_or(true, |r| r.matches(value))
        };

        allowed(&self.players, &record.name)
            && self.team.matches(&record.team)
            && allowed(&self.positions, &record.position)
            && in_range(&self.age, record.age)
            && in_range(&self.minutes, record.minutes)
            && in_range(&self.goals, record.goals)
    }

    /// True when nothing is constrained.
    pub fn is_unrestricted(&self) -> bool {
        *self == FilterSet::default()
    }
}

/// Apply a filter set, returning the matching rows in table order.
pub fn apply_filters<'a>(table: &'a PlayerTable, filters: &FilterSet) -> Vec<&'a PlayerRecord> {
    table.records.iter().filter(|r| filters.matches(r)).collect()
}

// =============================================================================
// Filter Options
// =============================================================================

/// Domain of each filter, as offered to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub players: Vec<String>,
    pub teams: Vec<String>,
    pub positions: Vec<String>,
    pub age: Option<RangeFilter>,
    pub minutes: Option<RangeFilter>,
    pub goals: Option<RangeFilter>,
}

impl FilterOptions {
    /// Unique values in first-appearance order, and min/max of each range.
    pub fn from_table(table: &PlayerTable) -> Self {
        let mut players = Vec::new();
        let mut teams = Vec::new();
        let mut positions = Vec::new();
        for record in &table.records {
            push_unique(&mut players, &record.name);
            push_unique(&mut teams, &record.team);
            push_unique(&mut positions, &record.position);
        }

        Self {
            players,
            teams,
            positions,
            age: span(table.records.iter().filter_map(|r| r.age)),
            minutes: span(table.records.iter().filter_map(|r| r.minutes)),
            goals: span(table.records.iter().filter_map(|r| r.goals)),
        }
    }

    /// Every option selected and every range at its full span.
    pub fn default_filters(&self) -> FilterSet {
        FilterSet {
            players: Some(self.players.clone()),
            team: TeamSelection::All,
            positions: Some(self.positions.clone()),
            age: self.age,
            minutes: self.minutes,
            goals: self.goals,
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn span(values: impl Iterator<Item = u32>) -> Option<RangeFilter> {
    values.fold(None, |acc, v| match acc {
        None => Some(RangeFilter::new(v, v)),
        Some(r) => Some(RangeFilter::new(r.min.min(v), r.max.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, team: &str, position: &str, age: u32, minutes: u32, goals: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new(name, team, position);
        r.age = Some(age);
        r.minutes = Some(minutes);
        r.goals = Some(goals);
        r
    }

    fn table() -> PlayerTable {
        PlayerTable::new(vec![
            player("Saka", "Arsenal", "FW", 22, 2900, 16),
            player("Rice", "Arsenal", "MF", 25, 3200, 7),
            player("Palmer", "Chelsea", "MF", 21, 2600, 22),
            player("Sanchez", "Chelsea", "GK", 26, 1400, 0),
        ])
    }

    #[test]
    fn test_unrestricted_keeps_everything() {
        let t = table();
        let rows = apply_filters(&t, &FilterSet::default());
        assert_eq!(rows.len(), 4);
        assert!(FilterSet::default().is_unrestricted());
    }

    #[test]
    fn test_conjunction_of_predicates() {
        let t = table();
        let filters = FilterSet {
            team: TeamSelection::Team("Arsenal".into()),
            positions: Some(vec!["MF".into()]),
            ..FilterSet::default()
        };
        let rows = apply_filters(&t, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Rice");
    }

    #[test]
    fn test_player_allow_list() {
        let mut t = table();
        t.records.push(player("Saka", "Arsenal", "FW", 22, 300, 2));

        let only_saka = FilterSet {
            players: Some(vec!["Saka".into()]),
            ..FilterSet::default()
        };
        let rows = apply_filters(&t, &only_saka);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.name == "Saka"));

        let unknown = FilterSet {
            players: Some(vec!["Nobody".into()]),
            ..FilterSet::default()
        };
        assert!(apply_filters(&t, &unknown).is_empty());

        // an empty allow-list admits nobody
        let none = FilterSet {
            players: Some(Vec::new()),
            ..FilterSet::default()
        };
        assert!(apply_filters(&t, &none).is_empty());
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let t = table();
        let filters = FilterSet {
            goals: Some(RangeFilter::new(7, 16)),
            ..FilterSet::default()
        };
        let names: Vec<&str> = apply_filters(&t, &filters).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Saka", "Rice"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let t = table();
        let filters = FilterSet {
            age: Some(RangeFilter::new(40, 45)),
            ..FilterSet::default()
        };
        assert!(apply_filters(&t, &filters).is_empty());
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_missing_value_fails_bounded_range() {
        let mut t = table();
        t.records[0].age = None;
        let filters = FilterSet {
            age: Some(RangeFilter::new(0, 100)),
            ..FilterSet::default()
        };
        assert_eq!(apply_filters(&t, &filters).len(), 3);
    }

    #[test]
    fn test_team_selection_json() {
        let all: TeamSelection = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(all, TeamSelection::All);
        let team: TeamSelection = serde_json::from_str("\"Chelsea\"").unwrap();
        assert_eq!(team, TeamSelection::Team("Chelsea".into()));
        assert_eq!(serde_json::to_string(&TeamSelection::All).unwrap(), "\"All\"");
    }

    #[test]
    fn test_filter_set_from_partial_json() {
        let filters: FilterSet = serde_json::from_str(r#"{"team": "Arsenal", "minutes": {"min": 3000, "max": 4000}}"#).unwrap();
        let t = table();
        let rows = apply_filters(&t, &filters);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Rice");
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("18-30".parse::<RangeFilter>().unwrap(), RangeFilter::new(18, 30));
        assert_eq!("5".parse::<RangeFilter>().unwrap(), RangeFilter::new(5, 5));
        assert!("30-18".parse::<RangeFilter>().is_err());
        assert!("a-b".parse::<RangeFilter>().is_err());
    }

    #[test]
    fn test_options_and_defaults() {
        let t = table();
        let options = FilterOptions::from_table(&t);
        assert_eq!(options.teams, vec!["Arsenal", "Chelsea"]);
        assert_eq!(options.positions, vec!["FW", "MF", "GK"]);
        assert_eq!(options.age, Some(RangeFilter::new(21, 26)));
        assert_eq!(options.goals, Some(RangeFilter::new(0, 22)));

        let defaults = options.default_filters();
        assert_eq!(apply_filters(&t, &defaults).len(), 4);
    }
}

//! Extended insights over regular players.
//!
//! Every question first keeps rows with more than [`MIN_MINUTES`] minutes,
//! then scores each row on its own. A question with nobody left reports
//! [`Outcome::Empty`] and the rest still run.

use serde::Serialize;

use super::aggregate::{rank_records, RankedRow};
use super::buckets::{bucketize, BucketAverage, BucketSpec};
use super::derived::{DerivedMetric, Measure};
use super::{Outcome, NO_QUALIFYING_PLAYERS};
use crate::models::{Field, PlayerRecord};

/// Rows need strictly more minutes than this to qualify.
pub const MIN_MINUTES: u32 = 60;

const BOARD_SIZE: usize = 10;

/// Rows with minutes > [`MIN_MINUTES`].
pub fn qualifying_players<'a>(rows: &[&'a PlayerRecord]) -> Vec<&'a PlayerRecord> {
    rows.iter()
        .copied()
        .filter(|r| r.minutes.is_some_and(|m| m > MIN_MINUTES))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedInsights {
    pub qualifying_rows: usize,
    pub clinical_finisher: Outcome<RankedRow>,
    pub overperformers: Outcome<Vec<RankedRow>>,
    pub creators: Outcome<Vec<RankedRow>>,
    pub complete_player: Outcome<RankedRow>,
    pub mvp: Outcome<RankedRow>,
    pub value_board: Outcome<Vec<RankedRow>>,
    pub goals_per_90: Outcome<Vec<RankedRow>>,
    pub ball_magnets: Outcome<Vec<RankedRow>>,
    pub impact_per_90: Outcome<Vec<RankedRow>>,
    pub age_profile: Outcome<Vec<BucketAverage>>,
}

fn board(rows: &[&PlayerRecord], metric: DerivedMetric) -> Outcome<Vec<RankedRow>> {
    Outcome::from_vec(rank_records(rows, metric.into(), BOARD_SIZE), NO_QUALIFYING_PLAYERS)
}

fn leader(rows: &[&PlayerRecord], metric: DerivedMetric) -> Outcome<RankedRow> {
    let best = rank_records(rows, metric.into(), 1).into_iter().next();
    Outcome::from_option(best, NO_QUALIFYING_PLAYERS)
}

/// Run all ten extended questions over already-filtered rows.
pub fn extended_insights(rows: &[&PlayerRecord]) -> ExtendedInsights {
    let regulars = qualifying_players(rows);
    let value: Measure = DerivedMetric::ValueScore.into();

    ExtendedInsights {
        qualifying_rows: regulars.len(),
        clinical_finisher: leader(&regulars, DerivedMetric::Efficiency),
        overperformers: board(&regulars, DerivedMetric::Efficiency),
        creators: board(&regulars, DerivedMetric::CreativityIndex),
        complete_player: leader(&regulars, DerivedMetric::CompletePlayerIndex),
        mvp: leader(&regulars, DerivedMetric::ValueScore),
        value_board: board(&regulars, DerivedMetric::ValueScore),
        goals_per_90: board(&regulars, DerivedMetric::GoalsPer90),
        ball_magnets: board(&regulars, DerivedMetric::TouchesPerMinute),
        impact_per_90: board(&regulars, DerivedMetric::ImpactPer90),
        age_profile: Outcome::from_vec(
            bucketize(&regulars, Field::Age, value, &BucketSpec::age()),
            NO_QUALIFYING_PLAYERS,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular(name: &str, minutes: u32, goals: u32, xg: f64) -> PlayerRecord {
        let mut r = PlayerRecord::new(name, "TeamA", "FW");
        r.age = Some(25);
        r.minutes = Some(minutes);
        r.goals = Some(goals);
        r.assists = Some(1);
        r.expected_goals = Some(xg);
        r.touches = Some(f64::from(minutes));
        r.tackles = Some(5.0);
        r.shot_creating_actions = Some(10.0);
        r.pass_completion = Some(80.0);
        r
    }

    #[test]
    fn test_threshold_is_strict() {
        let data = vec![regular("A", 60, 1, 1.0), regular("B", 61, 1, 1.0)];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let kept = qualifying_players(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "B");
    }

    #[test]
    fn test_nobody_qualifies() {
        let data = vec![regular("A", 30, 1, 0.2), regular("B", 60, 0, 0.1)];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let insights = extended_insights(&rows);

        assert_eq!(insights.qualifying_rows, 0);
        let Outcome::Empty(empty) = &insights.mvp else {
            panic!("expected an empty selection");
        };
        assert_eq!(empty.reason, "no qualifying players");
        assert!(insights.clinical_finisher.is_empty());
        assert!(insights.value_board.is_empty());
        assert!(insights.age_profile.is_empty());
    }

    #[test]
    fn test_questions_answer_independently() {
        let mut no_xg = regular("NoXg", 900, 3, 0.0);
        no_xg.expected_goals = None;
        let data = vec![no_xg];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let insights = extended_insights(&rows);

        // efficiency needs xG; the other questions still answer
        assert!(insights.clinical_finisher.is_empty());
        assert_eq!(insights.mvp.ready().unwrap().label, "NoXg");
        assert!(insights.creators.ready().is_some());
    }

    #[test]
    fn test_leaders_and_boards() {
        let data = vec![
            regular("Sharp", 1800, 15, 9.0),
            regular("Busy", 2700, 10, 12.0),
            regular("Bench", 45, 2, 0.1),
        ];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let insights = extended_insights(&rows);

        assert_eq!(insights.qualifying_rows, 2);
        let finisher = insights.clinical_finisher.ready().unwrap();
        assert_eq!(finisher.label, "Sharp");
        assert!((finisher.value - 6.0).abs() < 1e-9);

        let board = insights.overperformers.ready().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[1].label, "Busy");

        // Busy: 30 + 2 + 18 + 4 + 270 = 324, Sharp: 45 + 2 + 13.5 + 4 + 180 = 244.5
        assert_eq!(insights.mvp.ready().unwrap().label, "Busy");

        let ages = insights.age_profile.ready().unwrap();
        assert_eq!(ages.len(), 1);
        assert_eq!(ages[0].label, "Prime (24-28)");
        assert_eq!(ages[0].count, 2);
    }
}

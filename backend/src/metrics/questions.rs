//! Ranked question tables.
//!
//! Each basic question is a grouping, a measure and a row limit, paired with
//! a bar chart description that a front end can render as-is.

use serde::Serialize;

use super::aggregate::{top_n, Aggregation, GroupTotal};
use super::Outcome;
use crate::models::{Field, GroupKey, PlayerRecord};

/// Bar chart description for one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: &'static str,
    pub title: &'static str,
    pub x_field: &'static str,
    pub x_title: &'static str,
    pub y_field: &'static str,
    pub y_title: &'static str,
    pub color_scheme: &'static str,
    pub width: u32,
    pub height: u32,
    /// Sort order of the x axis, `-y` = descending by value
    pub sort: &'static str,
}

/// A basic question definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSpec {
    pub id: u8,
    pub title: &'static str,
    pub group: GroupKey,
    pub field: Field,
    pub aggregation: Aggregation,
    pub limit: usize,
    pub chart: ChartSpec,
}

impl QuestionSpec {
    /// Run the question over already-filtered rows.
    pub fn run(&self, rows: &[&PlayerRecord]) -> QuestionResult {
        let totals = top_n(rows, self.group, self.field.into(), self.aggregation, self.limit);
        QuestionResult {
            id: self.id,
            title: self.title,
            outcome: Outcome::from_vec(totals, "no rows match the current filters"),
            chart: self.chart.clone(),
        }
    }
}

/// Answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub id: u8,
    pub title: &'static str,
    pub outcome: Outcome<Vec<GroupTotal>>,
    pub chart: ChartSpec,
}

fn bar(
    title: &'static str,
    group: GroupKey,
    field: Field,
    y_title: &'static str,
    color_scheme: &'static str,
) -> ChartSpec {
    ChartSpec {
        kind: "bar",
        title,
        x_field: group.column(),
        x_title: group.column(),
        y_field: field.column(),
        y_title,
        color_scheme,
        width: 600,
        height: 400,
        sort: "-y",
    }
}

fn question(
    id: u8,
    title: &'static str,
    group: GroupKey,
    field: Field,
    limit: usize,
    y_title: &'static str,
    color_scheme: &'static str,
) -> QuestionSpec {
    QuestionSpec {
        id,
        title,
        group,
        field,
        aggregation: Aggregation::Sum,
        limit,
        chart: bar(title, group, field, y_title, color_scheme),
    }
}

/// The seven basic questions, in display order.
pub fn basic_questions() -> Vec<QuestionSpec> {
    use Field::*;
    use GroupKey::{Player, Position, Team};

    let mut assisters = question(2, "Top 10 Assisters", Player, Assists, 10, "Number of Assists", "cividis");
    assisters.chart.height = 480;

    vec![
        question(1, "Top 10 Goal Scorers", Player, Goals, 10, "Number of Goals", "plasma"),
        assisters,
        question(3, "Top 5 Players with the Most Yellow Cards", Player, YellowCards, 5, "Number of Cards", "inferno"),
        question(4, "Top 10 Teams by Goals", Team, Goals, 10, "Number of Goals", "turbo"),
        question(5, "Top 10 Players by Dribbles", Player, Dribbles, 10, "Number of Dribbles", "tealblues"),
        // one row per position, so the limit only caps unusual data
        question(6, "Goals by Position", Position, Goals, 10, "Number of Goals", "cividis"),
        question(7, "Top 10 Players by Progressive Passes", Player, ProgressivePasses, 10, "Number of Passes", "plasma"),
    ]
}

/// Run every basic question over the same rows. Each result stands alone.
pub fn run_basic_questions(rows: &[&PlayerRecord]) -> Vec<QuestionResult> {
    basic_questions().iter().map(|q| q.run(rows)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, team: &str, position: &str, goals: u32, cards: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new(name, team, position);
        r.goals = Some(goals);
        r.yellow_cards = Some(cards);
        r
    }

    #[test]
    fn test_question_catalogue() {
        let questions = basic_questions();
        assert_eq!(questions.len(), 7);
        assert_eq!(questions[2].limit, 5);
        assert_eq!(questions[3].group, GroupKey::Team);
        assert_eq!(questions[5].chart.title, "Goals by Position");
        assert_eq!(questions[1].chart.height, 480);
        assert!(questions.iter().all(|q| q.chart.sort == "-y"));
    }

    #[test]
    fn test_questions_run_independently() {
        let data: Vec<PlayerRecord> = (0..7)
            .map(|i| player(&format!("P{}", i), if i % 2 == 0 { "A" } else { "B" }, "FW", i, 1))
            .collect();
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let results = run_basic_questions(&rows);

        let cards = results[2].outcome.ready().unwrap();
        assert_eq!(cards.len(), 5);

        let teams = results[3].outcome.ready().unwrap();
        // A: 0+2+4+6, B: 1+3+5
        assert_eq!(teams[0].key, "A");
        assert_eq!(teams[0].value, 12.0);

        // no dribble data at all
        assert!(results[4].outcome.is_empty());
        assert!(!results[0].outcome.is_empty());
    }

    #[test]
    fn test_goals_by_position() {
        let data = vec![
            player("A", "X", "FW", 10, 0),
            player("B", "X", "MF", 4, 0),
            player("C", "Y", "FW", 7, 0),
        ];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let result = basic_questions()[5].run(&rows);
        let table = result.outcome.ready().unwrap();
        assert_eq!(table[0].key, "FW");
        assert_eq!(table[0].value, 17.0);
        assert_eq!(table[1].key, "MF");
    }

    #[test]
    fn test_chart_json_shape() {
        let json = serde_json::to_value(&basic_questions()[0].chart).unwrap();
        assert_eq!(json["xField"], "Player");
        assert_eq!(json["yField"], "Goals");
        assert_eq!(json["colorScheme"], "plasma");
    }
}

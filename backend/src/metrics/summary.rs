//! Headline sentences built from insight results.

use serde::Serialize;

use super::aggregate::RankedRow;
use super::insights::ExtendedInsights;
use super::Outcome;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InsightSummary {
    pub headlines: Vec<String>,
}

impl InsightSummary {
    /// Sentences for every answered question. Empty questions add nothing.
    pub fn from_insights(insights: &ExtendedInsights) -> Self {
        let mut headlines = Vec::new();

        let finisher = insights.clinical_finisher.ready();
        let mvp = insights.mvp.ready();

        if let Some(f) = finisher {
            headlines.push(format!(
                "{} is the most clinical finisher, scoring {:+.2} goals against expected.",
                f.label, f.value
            ));
        }
        if let Some(c) = insights.complete_player.ready() {
            headlines.push(format!(
                "{} is the most complete player (index {:.1}).",
                c.label, c.value
            ));
        }
        if let Some(m) = mvp {
            headlines.push(format!("{} tops the value board with {:.1} points.", m.label, m.value));
        }
        if let (Some(m), Some(f)) = (mvp, finisher) {
            if same_player(m, f) {
                headlines.push(format!("{} is both the MVP and the clinical finisher.", m.label));
            }
        }
        if let Some(top) = first(&insights.goals_per_90) {
            headlines.push(format!("{} leads goals per 90 at {:.2}.", top.label, top.value));
        }
        if let Some(best) = insights
            .age_profile
            .ready()
            .and_then(|b| b.iter().max_by(|a, b| a.average.total_cmp(&b.average)))
        {
            headlines.push(format!(
                "{} players carry the highest average value score ({:.1}).",
                best.label, best.average
            ));
        }

        Self { headlines }
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }
}

fn first(board: &Outcome<Vec<RankedRow>>) -> Option<&RankedRow> {
    board.ready().and_then(|rows| rows.first())
}

fn same_player(a: &RankedRow, b: &RankedRow) -> bool {
    a.label == b.label && a.team == b.team
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::extended_insights;
    use crate::models::PlayerRecord;

    fn regular(name: &str, goals: u32, xg: f64, minutes: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new(name, "TeamA", "FW");
        r.age = Some(26);
        r.minutes = Some(minutes);
        r.goals = Some(goals);
        r.expected_goals = Some(xg);
        r
    }

    #[test]
    fn test_cross_reference_when_mvp_is_finisher() {
        let data = vec![regular("Star", 20, 12.0, 3000), regular("Other", 3, 4.0, 1000)];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let summary = InsightSummary::from_insights(&extended_insights(&rows));
        assert!(summary
            .headlines
            .iter()
            .any(|h| h == "Star is both the MVP and the clinical finisher."));
    }

    #[test]
    fn test_no_cross_reference_for_different_players() {
        let data = vec![regular("Sniper", 8, 2.0, 900), regular("Workhorse", 10, 11.0, 3400)];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let summary = InsightSummary::from_insights(&extended_insights(&rows));
        assert!(!summary.headlines.iter().any(|h| h.contains("both")));
        assert!(summary.headlines[0].starts_with("Sniper"));
    }

    #[test]
    fn test_empty_insights_give_empty_summary() {
        let data = vec![regular("Cameo", 1, 0.5, 20)];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        assert!(InsightSummary::from_insights(&extended_insights(&rows)).is_empty());
    }
}

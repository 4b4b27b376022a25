//! Headline KPIs.

use serde::Serialize;

use super::aggregate::{group_ratio, sort_desc, top_by, Aggregation, GroupTotal};
use crate::models::{Field, GroupKey, PlayerRecord};

/// One KPI card: who leads, by how much, and the formatted figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub description: &'static str,
    pub player: String,
    pub value: f64,
    pub display: String,
}

/// The six KPIs. A KPI is `None` when no row carries its input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiReport {
    pub top_scorer: Option<Kpi>,
    pub assist_leader: Option<Kpi>,
    pub iron_man: Option<Kpi>,
    pub goals_per_90: Option<Kpi>,
    pub pass_accuracy: Option<Kpi>,
    pub most_booked: Option<Kpi>,
}

impl KpiReport {
    /// Present KPIs in display order
    pub fn cards(&self) -> Vec<&Kpi> {
        [
            &self.top_scorer,
            &self.assist_leader,
            &self.iron_man,
            &self.goals_per_90,
            &self.pass_accuracy,
            &self.most_booked,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn card(
    total: Option<GroupTotal>,
    label: &'static str,
    description: &'static str,
    display: impl Fn(f64) -> String,
) -> Option<Kpi> {
    total.map(|t| Kpi {
        label,
        description,
        display: display(t.value),
        player: t.key,
        value: t.value,
    })
}

/// Compute every KPI over the given rows, grouped by player name.
pub fn compute_kpis(rows: &[&PlayerRecord]) -> KpiReport {
    let sum = |field: Field| top_by(rows, GroupKey::Player, field.into(), Aggregation::Sum);

    let goals_per_90 = {
        let mut ratios = group_ratio(rows, GroupKey::Player, Field::Goals, Field::Minutes, 90.0);
        sort_desc(&mut ratios);
        ratios.into_iter().next()
    };
    let pass_accuracy = top_by(rows, GroupKey::Player, Field::PassCompletion.into(), Aggregation::Mean);

    KpiReport {
        top_scorer: card(
            sum(Field::Goals),
            "Top Scorer",
            "Player with most goals (the finisher)",
            |v| format!("{} Goals", v as u64),
        ),
        assist_leader: card(
            sum(Field::Assists),
            "Assist King",
            "Player who creates most goals for teammates",
            |v| format!("{} Assists", v as u64),
        ),
        iron_man: card(
            sum(Field::Minutes),
            "Iron Man",
            "Most reliable player (plays most minutes)",
            |v| format!("{} mins", v as u64),
        ),
        goals_per_90: card(
            goals_per_90,
            "Goals per 90",
            "Most efficient scorer (goals per full game)",
            |v| format!("{:.2}", v),
        ),
        pass_accuracy: card(
            pass_accuracy,
            "Pass Accuracy",
            "Most precise passer (rarely loses the ball)",
            |v| format!("{}%", v as u64),
        ),
        most_booked: card(
            sum(Field::YellowCards),
            "Most Booked",
            "Most aggressive/fouling player",
            |v| format!("{} Yellows", v as u64),
        ),
    }
}

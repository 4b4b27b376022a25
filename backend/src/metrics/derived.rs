//! Derived per-row scores.
//!
//! Scores are computed on demand and never stored on a record, so one
//! question's derived column cannot leak into another.

use serde::{Deserialize, Serialize};

use crate::models::{Field, PlayerRecord};

/// A named numeric function of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedMetric {
    /// goals / minutes × 90
    GoalsPer90,
    /// touches / minutes
    TouchesPerMinute,
    /// (goals + assists) / minutes × 90
    ImpactPer90,
    /// goals − xG
    Efficiency,
    /// assists + 0.5 × shot-creating actions
    CreativityIndex,
    /// 2 × (goals + assists) + tackles
    CompletePlayerIndex,
    /// 3×goals + 2×assists + 1.5×xG + pass%/20 + minutes/10
    ValueScore,
}

impl DerivedMetric {
    /// Compute the score for one record.
    ///
    /// `None` when the record lacks the inputs that define the score (e.g.
    /// efficiency without xG); other missing inputs count as zero. Per-minute
    /// scores are zero when minutes are zero or missing.
    pub fn compute(self, r: &PlayerRecord) -> Option<f64> {
        let goals = r.goals.map(f64::from);
        let assists = r.assists.map(f64::from);
        let minutes = r.minutes_or_zero();
        let z = |v: Option<f64>| v.unwrap_or(0.0);

        match self {
            DerivedMetric::GoalsPer90 => goals.map(|g| per_minutes(g, minutes) * 90.0),
            DerivedMetric::TouchesPerMinute => r.touches.map(|t| per_minutes(t, minutes)),
            DerivedMetric::ImpactPer90 => {
                any_present(&[goals, assists]).then(|| per_minutes(z(goals) + z(assists), minutes) * 90.0)
            }
            DerivedMetric::Efficiency => Some(goals? - r.expected_goals?),
            DerivedMetric::CreativityIndex => any_present(&[assists, r.shot_creating_actions])
                .then(|| z(assists) + 0.5 * z(r.shot_creating_actions)),
            DerivedMetric::CompletePlayerIndex => any_present(&[goals, assists, r.tackles])
                .then(|| 2.0 * (z(goals) + z(assists)) + z(r.tackles)),
            DerivedMetric::ValueScore => {
                any_present(&[goals, assists, r.expected_goals, r.pass_completion, r.minutes.map(f64::from)]).then(|| {
                    3.0 * z(goals)
                        + 2.0 * z(assists)
                        + 1.5 * z(r.expected_goals)
                        + z(r.pass_completion) / 20.0
                        + minutes / 10.0
                })
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DerivedMetric::GoalsPer90 => "Goals per 90",
            DerivedMetric::TouchesPerMinute => "Touches per Minute",
            DerivedMetric::ImpactPer90 => "Impact per 90",
            DerivedMetric::Efficiency => "Efficiency (Goals - xG)",
            DerivedMetric::CreativityIndex => "Creativity Index",
            DerivedMetric::CompletePlayerIndex => "Complete Player Index",
            DerivedMetric::ValueScore => "Value Score",
        }
    }
}

fn per_minutes(value: f64, minutes: f64) -> f64 {
    if minutes > 0.0 {
        value / minutes
    } else {
        0.0
    }
}

fn any_present(values: &[Option<f64>]) -> bool {
    values.iter().any(Option::is_some)
}

/// What a ranking or aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Measure {
    Field(Field),
    Derived(DerivedMetric),
}

impl Measure {
    pub fn value(self, record: &PlayerRecord) -> Option<f64> {
        match self {
            Measure::Field(field) => field.value(record),
            Measure::Derived(metric) => metric.compute(record),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Measure::Field(field) => field.column(),
            Measure::Derived(metric) => metric.label(),
        }
    }
}

impl From<Field> for Measure {
    fn from(field: Field) -> Self {
        Measure::Field(field)
    }
}

impl From<DerivedMetric> for Measure {
    fn from(metric: DerivedMetric) -> Self {
        Measure::Derived(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(goals: u32, assists: u32, minutes: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new("P", "T", "FW");
        r.goals = Some(goals);
        r.assists = Some(assists);
        r.minutes = Some(minutes);
        r
    }

    #[test]
    fn test_goals_per_90() {
        let r = record(5, 0, 450);
        assert!((DerivedMetric::GoalsPer90.compute(&r).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_minutes_never_divides() {
        let r = record(3, 2, 0);
        assert_eq!(DerivedMetric::GoalsPer90.compute(&r), Some(0.0));
        assert_eq!(DerivedMetric::ImpactPer90.compute(&r), Some(0.0));

        let mut no_minutes = record(3, 2, 0);
        no_minutes.minutes = None;
        no_minutes.touches = Some(50.0);
        assert_eq!(DerivedMetric::TouchesPerMinute.compute(&no_minutes), Some(0.0));
    }

    #[test]
    fn test_efficiency_needs_xg() {
        let mut r = record(12, 0, 2000);
        assert_eq!(DerivedMetric::Efficiency.compute(&r), None);
        r.expected_goals = Some(9.5);
        assert_eq!(DerivedMetric::Efficiency.compute(&r), Some(2.5));
    }

    #[test]
    fn test_composite_indices() {
        let mut r = record(10, 6, 1800);
        r.shot_creating_actions = Some(40.0);
        r.tackles = Some(20.0);
        r.expected_goals = Some(8.0);
        r.pass_completion = Some(80.0);

        assert_eq!(DerivedMetric::CreativityIndex.compute(&r), Some(26.0));
        assert_eq!(DerivedMetric::CompletePlayerIndex.compute(&r), Some(52.0));
        // 30 + 12 + 12 + 4 + 180
        assert_eq!(DerivedMetric::ValueScore.compute(&r), Some(238.0));
    }

    #[test]
    fn test_measure_dispatch() {
        let r = record(4, 1, 900);
        assert_eq!(Measure::from(Field::Goals).value(&r), Some(4.0));
        assert_eq!(Measure::from(DerivedMetric::ImpactPer90).label(), "Impact per 90");
    }
}

//! Metrics engine.
//!
//! Everything here reads borrowed rows and returns new values; nothing is
//! written back to the table.
//!
//! - [`aggregate`] - group/aggregate/sort/top-N primitives
//! - [`derived`] - per-row derived scores
//! - [`kpi`] - the six headline KPIs
//! - [`questions`] - ranked question tables with chart descriptions
//! - [`buckets`] - interval bucketing with per-bucket averages
//! - [`insights`] - extended analytical questions over regular players
//! - [`summary`] - headline sentences built from insight results

pub mod aggregate;
pub mod buckets;
pub mod derived;
pub mod insights;
pub mod kpi;
pub mod questions;
pub mod summary;

use serde::Serialize;

pub use aggregate::{group_ratio, group_totals, rank_records, top_by, top_n, Aggregation, GroupTotal, RankedRow};
pub use buckets::{bucketize, BucketAverage, BucketSpec};
pub use derived::{DerivedMetric, Measure};
pub use insights::{extended_insights, qualifying_players, ExtendedInsights, MIN_MINUTES};
pub use kpi::{compute_kpis, Kpi, KpiReport};
pub use questions::{basic_questions, run_basic_questions, ChartSpec, QuestionResult, QuestionSpec};
pub use summary::InsightSummary;

/// Reason reported when a minutes threshold leaves nobody.
pub const NO_QUALIFYING_PLAYERS: &str = "no qualifying players";

/// A selection with zero rows. A normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptySelection {
    pub reason: String,
}

impl EmptySelection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn no_qualifying_players() -> Self {
        Self::new(NO_QUALIFYING_PLAYERS)
    }
}

impl std::fmt::Display for EmptySelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Result of one independent question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ready(T),
    Empty(EmptySelection),
}

impl<T> Outcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty(_))
    }

    /// `Ready` for `Some`, otherwise `Empty` with the given reason.
    pub fn from_option(value: Option<T>, reason: &str) -> Self {
        match value {
            Some(v) => Outcome::Ready(v),
            None => Outcome::Empty(EmptySelection::new(reason)),
        }
    }
}

impl<T> Outcome<Vec<T>> {
    /// An empty list becomes `Empty`.
    pub fn from_vec(values: Vec<T>, reason: &str) -> Self {
        if values.is_empty() {
            Outcome::Empty(EmptySelection::new(reason))
        } else {
            Outcome::Ready(values)
        }
    }
}

//! Group, aggregate, sort and top-N.
//!
//! Groups are kept in first-appearance order and every sort is stable and
//! descending, so on equal values the group (or row) that appears first in
//! the input wins. Missing values are skipped; a group with no values at all
//! is left out.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::derived::Measure;
use crate::models::{Field, GroupKey, PlayerRecord};

/// How values inside a group are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Aggregated value for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
    /// Rows that contributed a value
    pub count: usize,
}

/// One ranked entry; `team` is set when ranking individual rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub value: f64,
}

struct Accumulator {
    sum: f64,
    count: usize,
}

/// Aggregate a measure per group, in first-appearance order.
pub fn group_totals(
    rows: &[&PlayerRecord],
    key: GroupKey,
    measure: Measure,
    aggregation: Aggregation,
) -> Vec<GroupTotal> {
    let mut order: Vec<&str> = Vec::new();
    let mut acc: HashMap<&str, Accumulator> = HashMap::new();

    for row in rows {
        let Some(value) = measure.value(row) else { continue };
        let group = row.key(key);
        let entry = acc.entry(group).or_insert_with(|| {
            order.push(group);
            Accumulator { sum: 0.0, count: 0 }
        });
        entry.sum += value;
        entry.count += 1;
    }

    order
        .into_iter()
        .filter_map(|group| {
            let a = acc.get(group)?;
            let value = match aggregation {
                Aggregation::Sum => a.sum,
                Aggregation::Mean => a.sum / a.count as f64,
            };
            Some(GroupTotal {
                key: group.to_string(),
                value,
                count: a.count,
            })
        })
        .collect()
}

/// Ratio of per-group sums, `numerator / denominator × scale`, zero when the
/// denominator sums to zero.
pub fn group_ratio(
    rows: &[&PlayerRecord],
    key: GroupKey,
    numerator: Field,
    denominator: Field,
    scale: f64,
) -> Vec<GroupTotal> {
    let nums = group_totals(rows, key, numerator.into(), Aggregation::Sum);
    let dens: HashMap<String, f64> = group_totals(rows, key, denominator.into(), Aggregation::Sum)
        .into_iter()
        .map(|g| (g.key, g.value))
        .collect();

    nums.into_iter()
        .map(|g| {
            let den = dens.get(&g.key).copied().unwrap_or(0.0);
            let value = if den > 0.0 { g.value / den * scale } else { 0.0 };
            GroupTotal { value, ..g }
        })
        .collect()
}

/// Stable descending sort on value.
pub fn sort_desc(totals: &mut [GroupTotal]) {
    totals.sort_by(|a, b| desc(a.value, b.value));
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// The single group with the largest aggregate; ties go to the group seen
/// first. `None` for an empty input.
pub fn top_by(
    rows: &[&PlayerRecord],
    key: GroupKey,
    measure: Measure,
    aggregation: Aggregation,
) -> Option<GroupTotal> {
    let mut totals = group_totals(rows, key, measure, aggregation);
    sort_desc(&mut totals);
    totals.into_iter().next()
}

/// The `n` groups with the largest aggregates, largest first.
pub fn top_n(
    rows: &[&PlayerRecord],
    key: GroupKey,
    measure: Measure,
    aggregation: Aggregation,
    n: usize,
) -> Vec<GroupTotal> {
    let mut totals = group_totals(rows, key, measure, aggregation);
    sort_desc(&mut totals);
    totals.truncate(n);
    totals
}

/// Rank individual rows by a measure, largest first, at most `n`.
pub fn rank_records(rows: &[&PlayerRecord], measure: Measure, n: usize) -> Vec<RankedRow> {
    let mut scored: Vec<(&PlayerRecord, f64)> = rows
        .iter()
        .filter_map(|r| measure.value(r).map(|v| (*r, v)))
        .collect();
    scored.sort_by(|a, b| desc(a.1, b.1));

    scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (r, value))| RankedRow {
            rank: i + 1,
            label: r.name.clone(),
            team: Some(r.team.clone()),
            value,
        })
        .collect()
}

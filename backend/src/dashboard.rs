//! Full dashboard report for one filter selection.

use serde::Serialize;

use crate::filter::{apply_filters, FilterSet};
use crate::metrics::{compute_kpis, extended_insights, run_basic_questions};
use crate::metrics::{ExtendedInsights, InsightSummary, KpiReport, QuestionResult};
use crate::models::PlayerTable;

/// Everything a dashboard renders, computed from one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub filters: FilterSet,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub kpis: KpiReport,
    pub questions: Vec<QuestionResult>,
    pub insights: ExtendedInsights,
    pub summary: InsightSummary,
}

/// Filter the table once and run every computation on that view.
pub fn build_dashboard(table: &PlayerTable, filters: &FilterSet) -> DashboardReport {
    let rows = apply_filters(table, filters);
    let insights = extended_insights(&rows);
    let summary = InsightSummary::from_insights(&insights);

    DashboardReport {
        filters: filters.clone(),
        total_rows: table.len(),
        filtered_rows: rows.len(),
        kpis: compute_kpis(&rows),
        questions: run_basic_questions(&rows),
        insights,
        summary,
    }
}

//! REST API types for frontend integration.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::dashboard::DashboardReport;
use crate::error::{FieldParseError, LoadError, PipelineError, ServerError};
use crate::filter::FilterOptions;
use crate::models::{PlayerRecord, PlayerTable};

/// Dashboard for one filter selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Unique report identifier
    pub report_id: String,

    /// "ready", or "empty" when no row matched the filters
    pub status: String,

    pub report: DashboardReport,
}

impl From<DashboardReport> for DashboardResponse {
    fn from(report: DashboardReport) -> Self {
        DashboardResponse {
            report_id: Uuid::new_v4().to_string(),
            status: if report.filtered_rows == 0 { "empty" } else { "ready" }.to_string(),
            report,
        }
    }
}

/// Cleaned rows plus the cells that were treated as missing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersResponse {
    pub total: usize,
    pub columns: Vec<String>,
    pub players: Vec<PlayerRecord>,
    pub parse_errors: Vec<FieldParseError>,
}

impl From<&PlayerTable> for PlayersResponse {
    fn from(table: &PlayerTable) -> Self {
        PlayersResponse {
            total: table.len(),
            columns: table.columns.clone(),
            players: table.records.clone(),
            parse_errors: table.parse_errors.clone(),
        }
    }
}

/// Filter widget domains
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub options: FilterOptions,
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "reportId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

impl ServerError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Pipeline(PipelineError::Load(LoadError::DataUnavailable { .. })) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Pipeline(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::LoadTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

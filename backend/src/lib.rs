//! # PL Analyzer - Premier League player statistics
//!
//! Loads a season's player statistics from a delimited text file, cleans it
//! into typed records and answers a fixed battery of questions over any
//! filtered view: headline KPIs, ranked top-N tables with chart
//! descriptions, derived performance scores and age-group averages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Cleaning   │────▶│ PlayerTable │
//! │ (any enc.)  │     │ (auto-enc)  │     │   (plan)    │     │  (cached)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//!                      FilterSet ──▶ filtered rows ──▶ KPIs / questions / insights
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pl_analyzer::{build_dashboard, default_plan, load_players, FilterSet};
//! use std::path::Path;
//!
//! let table = load_players(Path::new("database.csv"), &default_plan()).unwrap();
//! let report = build_dashboard(&table, &FilterSet::default());
//! if let Some(top) = report.kpis.top_scorer {
//!     println!("{} ({})", top.player, top.display);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Player records, fields, group keys
//! - [`parser`] - Delimited-text parsing with auto-detection
//! - [`transform`] - Cleaning plan and load pipeline
//! - [`filter`] - Filter sets and options
//! - [`metrics`] - KPIs, questions, derived scores, buckets, insights
//! - [`dashboard`] - One report per filter selection
//! - [`cache`] - Memoized table loading
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server and log stream

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod parser;
pub mod transform;

// Analysis
pub mod dashboard;
pub mod filter;
pub mod metrics;

// Caching
pub mod cache;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ConfigError, FieldParseError, LoadError, PipelineError, PlanError, ServerError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Field, GroupKey, PlayerRecord, PlayerTable};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use parser::{detect_delimiter, detect_encoding, parse_bytes_auto, parse_file_auto, ParseResult};
pub use transform::{
    default_plan, load_players, load_players_from_bytes, operations_description, CleaningPlan,
    Operation, SourceInfo,
};

// =============================================================================
// Re-exports - Analysis
// =============================================================================

pub use dashboard::{build_dashboard, DashboardReport};
pub use filter::{apply_filters, FilterOptions, FilterSet, RangeFilter, TeamSelection};
pub use metrics::{
    basic_questions, bucketize, compute_kpis, extended_insights, run_basic_questions, top_by,
    top_n, Aggregation, BucketSpec, DerivedMetric, EmptySelection, ExtendedInsights,
    InsightSummary, KpiReport, Measure, Outcome,
};

// =============================================================================
// Re-exports - Cache & Config
// =============================================================================

pub use cache::{load_cached, TableCache};
pub use config::AppConfig;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}

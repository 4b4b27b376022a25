//! Error types for the player-statistics pipeline.
//!
//! - [`LoadError`] - fatal loader failures (missing or malformed source)
//! - [`FieldParseError`] - a single cell that could not be coerced
//! - [`PlanError`] - invalid cleaning plan
//! - [`ConfigError`] - unusable environment configuration
//! - [`PipelineError`] - top-level orchestration errors
//! - [`ServerError`] - HTTP adapter errors
//!
//! An empty selection is not an error; see [`crate::metrics::EmptySelection`].

use thiserror::Error;

// =============================================================================
// Loader Errors
// =============================================================================

/// Errors that make the whole dataset unusable.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is missing or cannot be read.
    #[error("Data file '{path}' is unavailable: {source}")]
    DataUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source is present but empty or not a parseable table.
    #[error("Data file is malformed: {0}")]
    DataMalformed(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::DataMalformed(err.to_string())
    }
}

// =============================================================================
// Cell Errors
// =============================================================================

/// A cell whose value could not be coerced to the column's type.
///
/// These never abort a load: the cell becomes missing and the error is
/// collected into the load report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Error)]
#[error("{}", self.describe())]
pub struct FieldParseError {
    /// Column the cell belongs to (empty until the executor fills it in).
    pub column: String,
    /// Zero-based data row, when known.
    pub row: Option<usize>,
    /// Raw cell text.
    pub value: String,
    /// What went wrong.
    pub reason: String,
}

impl FieldParseError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            column: String::new(),
            row: None,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Message naming as much of the cell's location as is known.
    fn describe(&self) -> String {
        match (self.row, self.column.is_empty()) {
            (Some(row), false) => format!(
                "Row {}, column '{}' (value '{}'): {}",
                row, self.column, self.value, self.reason
            ),
            (None, false) => format!(
                "Column '{}' (value '{}'): {}",
                self.column, self.value, self.reason
            ),
            _ => format!("Value '{}': {}", self.value, self.reason),
        }
    }
}

// =============================================================================
// Cleaning Plan Errors
// =============================================================================

/// Errors loading or validating a cleaning plan.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Plan file could not be read.
    #[error("Failed to read cleaning plan: {0}")]
    Io(#[from] std::io::Error),

    /// Plan JSON is invalid.
    #[error("Invalid cleaning plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Plan is structurally wrong.
    #[error("Invalid cleaning plan: {0}")]
    Invalid(String),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors, returned by [`crate::transform::load_players`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading the dataset failed.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// The cleaning plan is unusable.
    #[error("Cleaning plan error: {0}")]
    Plan(#[from] PlanError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The blocking table load panicked or was cancelled.
    #[error("Table load task failed: {0}")]
    LoadTask(#[from] tokio::task::JoinError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for single-cell coercions.
pub type FieldResult<T> = Result<T, FieldParseError>;

/// Result type for cleaning plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let load_err = LoadError::DataMalformed("file is empty".into());
        let pipeline_err: PipelineError = load_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let plan_err = PlanError::Invalid("duplicate rule for 'Age'".into());
        let pipeline_err: PipelineError = plan_err.into();
        assert!(pipeline_err.to_string().contains("Age"));
    }

    #[test]
    fn test_field_error_format() {
        let err = FieldParseError::new("abc", "no leading digits")
            .in_column("Age")
            .at_row(4);
        let msg = err.to_string();
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("column 'Age'"));
        assert!(msg.contains("value 'abc'"));

        let bare = FieldParseError::new("abc", "no leading digits");
        assert_eq!(bare.to_string(), "Value 'abc': no leading digits");
        assert_eq!(
            bare.in_column("Age").to_string(),
            "Column 'Age' (value 'abc'): no leading digits"
        );
    }

    #[test]
    fn test_field_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(FieldParseError::new("x", "bad"));
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Value 'x': bad");
    }

    #[test]
    fn test_unavailable_mentions_path() {
        let err = LoadError::DataUnavailable {
            path: "database.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("database.csv"));
    }
}

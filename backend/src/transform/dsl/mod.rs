//! Cleaning DSL
//!
//! - `plan`: what to do to each column (JSON-serializable)
//! - `operations`: the available cell operations
//! - `executor`: run a plan over parsed rows
//!
//! ```text
//! parser::parse_file_auto → executor::execute(plan) → typed PlayerTable
//! ```

pub mod executor;
pub mod operations;
pub mod plan;

pub use executor::{execute, CleanResult};
pub use operations::{age_operations, operations_description, parse_age, parse_pass_completion, Operation};
pub use plan::{default_plan, CleaningPlan, ColumnRename, FieldRule, LOW_VALUE_COLUMNS};

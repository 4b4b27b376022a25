//! Loading and cleaning.
//!
//! - DSL: cleaning plan, cell operations, executor
//! - Pipeline: file to typed [`crate::models::PlayerTable`]

pub mod dsl;
pub mod pipeline;

pub use dsl::*;
pub use pipeline::*;

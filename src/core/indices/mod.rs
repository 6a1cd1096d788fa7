//! Indices data source
//!
//! Drives the reconciliation engine once per index matched by a target and
//! turns the results into [`IndexModel`]s.
//!
//! - [`data_source`] - Fetch, reconcile and apply the failure policy
//! - [`model`] - The per-index output model
//! - [`summary`] - Read counts, timing and skipped indices

pub mod data_source;
pub mod model;
pub mod summary;

pub use data_source::{IndicesDataSource, IndicesReadOutcome};
pub use model::IndexModel;
pub use summary::{ReadSummary, SkippedIndex};

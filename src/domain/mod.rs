//! Domain models and types for esindex.
//!
//! This module contains the value types every other layer shares.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`IndexName`])
//! - **Untyped setting values** ([`SettingValue`], [`SettingsMap`]) and the
//!   declared semantic types they are coerced into ([`SettingKind`])
//! - **Error types** ([`EsIndexError`], [`ElasticsearchError`], [`ReconcileError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the engine return [`Result<T, EsIndexError>`]:
//!
//! ```rust
//! use esindex::domain::{EsIndexError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = esindex::config::load_config("esindex.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{
    CoercionError, ElasticsearchError, EsIndexError, ReconcileError, StructuralError,
};
pub use ids::IndexName;
pub use result::Result;
pub use value::{SettingKind, SettingValue, SettingsMap};

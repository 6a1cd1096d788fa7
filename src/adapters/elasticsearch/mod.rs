//! Elasticsearch adapter implementation
//!
//! This module provides the REST client that reports index settings, the
//! [`SettingsSource`] trait it implements, and the API models.

pub mod client;
pub mod models;
pub mod source;

pub use client::ElasticsearchClient;
pub use models::IndexDocument;
pub use source::SettingsSource;

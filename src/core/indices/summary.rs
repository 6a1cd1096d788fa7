//! Read summary and skipped-index reporting

use crate::domain::{IndexName, ReconcileError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// An index left out of a read because it failed to reconcile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedIndex {
    /// Index that failed
    pub index: IndexName,

    /// Field identifier involved, if the failure is tied to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Rendered error
    pub error: String,
}

impl SkippedIndex {
    /// Record a reconciliation failure for `index`
    pub fn new(index: IndexName, error: &ReconcileError) -> Self {
        Self {
            index,
            field: error.field().map(str::to_string),
            error: error.to_string(),
        }
    }
}

/// Summary of one read
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadSummary {
    /// When reconciliation of the matched indices started
    pub started_at: DateTime<Utc>,

    /// Indices the target matched
    pub matched: usize,

    /// Indices reconciled into models
    pub reconciled: usize,

    /// Indices skipped after a reconcile failure
    pub skipped: usize,

    /// Wall-clock time of the read
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ReadSummary {
    /// Start a summary for a read matching `matched` indices
    pub fn started(matched: usize) -> Self {
        Self {
            started_at: Utc::now(),
            matched,
            ..Default::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if every matched index was reconciled
    pub fn is_complete(&self) -> bool {
        self.skipped == 0 && self.reconciled == self.matched
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            matched = self.matched,
            reconciled = self.reconciled,
            skipped = self.skipped,
            duration_ms = self.duration.as_millis() as u64,
            started_at = %self.started_at.to_rfc3339(),
            "Index read completed"
        );

        if self.skipped > 0 {
            tracing::warn!(skipped = self.skipped, "Index read completed with skipped indices");
        }
    }
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_millis() as u64)
}

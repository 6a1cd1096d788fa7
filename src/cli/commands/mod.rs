//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 3 | Reconcile or registry error |
//! | 4 | Cluster connection or request error |
//! | 5 | Fatal error |

pub mod check_registry;
pub mod init;
pub mod read;
pub mod settings;
pub mod validate;

use crate::domain::EsIndexError;
use std::io::{self, Write};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_RECONCILE: i32 = 3;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Map an error to the exit code of the command that hit it
pub fn exit_code_for(error: &EsIndexError) -> i32 {
    match error {
        EsIndexError::Configuration(_) | EsIndexError::Validation(_) => EXIT_CONFIG,
        EsIndexError::Reconcile(_) | EsIndexError::Registry(_) => EXIT_RECONCILE,
        EsIndexError::Elasticsearch(_) => EXIT_CONNECTION,
        EsIndexError::Serialization(_) | EsIndexError::Io(_) | EsIndexError::Other(_) => {
            EXIT_FATAL
        }
    }
}

/// Print a failure to stderr and return the matching exit code
///
/// Stdout carries only command output.
pub(crate) fn report_failure(action: &str, error: &EsIndexError) -> i32 {
    tracing::error!(error = %error, "{action} failed");
    // A closed stderr leaves nothing else to report to
    let _ = write_failure(&mut std::io::stderr().lock(), action, error);
    exit_code_for(error)
}

fn write_failure(out: &mut impl Write, action: &str, error: &EsIndexError) -> io::Result<()> {
    writeln!(out, "❌ {action} failed")?;
    writeln!(out, "   Error: {error}")
}

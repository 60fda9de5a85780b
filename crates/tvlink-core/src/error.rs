// ── Core error types ──
//
// User-facing errors from tvlink-core. Executor failures are carried
// through unchanged inside `Executor` so a UI can render the backend's
// own message. Unparseable replies are never errors.

use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Dispatch errors ──────────────────────────────────────────────
    #[error("No TV selected")]
    NoDeviceSelected,

    #[error("Error sending command: {0}")]
    Executor(#[from] tvlink_api::Error),

    #[error("Command timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Selection changed while a command to {address} was in flight")]
    Superseded { address: String },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Session store failed on '{name}': {source}")]
    Persistence {
        name: String,
        #[source]
        source: StoreError,
    },
}

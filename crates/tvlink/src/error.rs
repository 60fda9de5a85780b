//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use tvlink_config::ConfigError;
use tvlink_core::{CoreError, StoreError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NO_DEVICE: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Session ──────────────────────────────────────────────────────

    #[error("No TV selected")]
    #[diagnostic(
        code(tvlink::no_device),
        help(
            "Select one with: tvlink select <ADDRESS> --brand <BRAND>\n\
             Or pass --missing-device skip to ignore keys sent without a TV."
        )
    )]
    NoDevice,

    #[error("Selection changed to another TV while the command to {address} was in flight")]
    #[diagnostic(code(tvlink::superseded))]
    Superseded { address: String },

    #[error("Session store failed on '{name}'")]
    #[diagnostic(
        code(tvlink::session_store),
        help("Check that the session file is writable, or choose another with --state-file.")
    )]
    SessionStore {
        name: String,
        #[source]
        source: StoreError,
    },

    // ── Executor ─────────────────────────────────────────────────────

    #[error("Could not reach the command executor")]
    #[diagnostic(
        code(tvlink::connection_failed),
        help(
            "Check that the executor service is running and accessible.\n\
             Point at it with --executor <URL> or executor_url in the config file."
        )
    )]
    ExecutorUnreachable {
        #[source]
        source: tvlink_api::Error,
    },

    #[error("Command executor failed: {source}")]
    #[diagnostic(code(tvlink::executor))]
    Executor {
        #[source]
        source: tvlink_api::Error,
    },

    #[error("Command timed out after {timeout:?}")]
    #[diagnostic(
        code(tvlink::timeout),
        help("Increase timeout with --timeout or check that the TV is powered on.")
    )]
    Timeout { timeout: Duration },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tvlink::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(tvlink::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(tvlink::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(tvlink::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevice => exit_code::NO_DEVICE,
            Self::ExecutorUnreachable { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoDeviceSelected => Self::NoDevice,
            CoreError::Executor(source) => source.into(),
            CoreError::Timeout { timeout } => Self::Timeout { timeout },
            CoreError::Superseded { address } => Self::Superseded { address },
            CoreError::Persistence { name, source } => Self::SessionStore { name, source },
        }
    }
}

impl From<tvlink_api::Error> for CliError {
    fn from(source: tvlink_api::Error) -> Self {
        if source.is_unreachable() || matches!(source, tvlink_api::Error::Tls(_)) {
            Self::ExecutorUnreachable { source }
        } else {
            Self::Executor { source }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(source: StoreError) -> Self {
        Self::SessionStore {
            name: "session file".into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_device_maps_to_its_own_exit_code() {
        let err = CliError::from(CoreError::NoDeviceSelected);
        assert_eq!(err.exit_code(), exit_code::NO_DEVICE);
    }

    #[test]
    fn timeout_maps_to_timeout_exit_code() {
        let err = CliError::from(CoreError::Timeout {
            timeout: Duration::from_secs(3),
        });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
        assert_eq!(err.to_string(), "Command timed out after 3s");
    }

    #[test]
    fn sub_second_timeout_is_not_rounded_to_zero() {
        let err = CliError::from(CoreError::Timeout {
            timeout: Duration::from_millis(250),
        });
        assert_eq!(err.to_string(), "Command timed out after 250ms");
    }

    #[test]
    fn rejected_executor_call_is_general_failure() {
        let err = CliError::from(CoreError::Executor(tvlink_api::Error::Rejected {
            status: 500,
            message: "TV refused".into(),
        }));
        assert!(matches!(err, CliError::Executor { .. }));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn tls_failure_counts_as_connection_problem() {
        let err = CliError::from(tvlink_api::Error::Tls("bad cert".into()));
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn config_validation_is_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}

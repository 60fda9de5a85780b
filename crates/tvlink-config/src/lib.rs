//! Shared configuration for tvlink.
//!
//! TOML config file with an environment overlay, platform paths, the
//! file-backed session store, and translation to the runtime types of
//! `tvlink_core` and `tvlink_api`.

mod file_store;

pub use file_store::FileStore;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use tvlink_api::transport::{TlsMode, TransportConfig};
use tvlink_core::{CredentialScope, DispatchConfig, MissingDevicePolicy};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Environment variables (after the `TVLINK_` prefix) that override the file.
const ENV_KEYS: &[&str] = &[
    "executor_url",
    "timeout",
    "missing_device",
    "credential_scope",
    "insecure",
    "ca_cert",
    "state_file",
];

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the command executor service.
    #[serde(default = "default_executor_url")]
    pub executor_url: String,

    /// Per-command timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// What `send` does with no TV selected: "reject" or "skip".
    #[serde(default)]
    pub missing_device: MissingDevicePolicy,

    /// Pairing credential scope: "global" or "per-device".
    #[serde(default)]
    pub credential_scope: CredentialScope,

    /// Accept any TLS certificate from the executor.
    #[serde(default)]
    pub insecure: bool,

    /// Custom CA certificate for the executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override for the session file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executor_url: default_executor_url(),
            timeout: default_timeout(),
            missing_device: MissingDevicePolicy::default(),
            credential_scope: CredentialScope::default(),
            insecure: false,
            ca_cert: None,
            state_file: None,
        }
    }
}

fn default_executor_url() -> String {
    "http://127.0.0.1:8765".into()
}
fn default_timeout() -> u64 {
    10
}

impl Config {
    /// Session file path: the explicit override, else the platform data dir.
    pub fn state_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(default_state_path)
    }

    pub fn executor_url(&self) -> Result<Url, ConfigError> {
        self.executor_url
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "executor_url".into(),
                reason: format!("invalid URL '{}': {e}", self.executor_url),
            })
    }

    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            ..TransportConfig::default()
        }
    }

    pub fn dispatch_config(&self) -> Result<DispatchConfig, ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(DispatchConfig {
            timeout: Duration::from_secs(self.timeout),
            missing_device: self.missing_device,
        })
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tvlink", "tvlink")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default session file path in the platform data dir.
pub fn default_state_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("session.toml"),
        |dirs| dirs.data_dir().join("session.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tvlink");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TVLINK_").only(ENV_KEYS));

    Ok(figment.extract()?)
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg.executor_url, "http://127.0.0.1:8765");
        assert_eq!(cfg.timeout, 10);
        assert_eq!(cfg.missing_device, MissingDevicePolicy::Reject);
        assert_eq!(cfg.credential_scope, CredentialScope::Global);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
executor_url = "http://10.0.0.5:9000"
timeout = 3
missing_device = "skip"
credential_scope = "per-device"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.executor_url, "http://10.0.0.5:9000");
        assert_eq!(cfg.missing_device, MissingDevicePolicy::Skip);
        assert_eq!(cfg.credential_scope, CredentialScope::PerDevice);
        assert_eq!(cfg.dispatch_config().unwrap().timeout, Duration::from_secs(3));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            missing_device: MissingDevicePolicy::Skip,
            state_file: Some(dir.path().join("session.toml")),
            ..Config::default()
        };

        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config {
            timeout: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.dispatch_config(),
            Err(ConfigError::Validation { ref field, .. }) if field == "timeout"
        ));
    }

    #[test]
    fn invalid_executor_url_is_rejected() {
        let cfg = Config {
            executor_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.executor_url(),
            Err(ConfigError::Validation { ref field, .. }) if field == "executor_url"
        ));
    }

    #[test]
    fn insecure_wins_over_custom_ca() {
        let cfg = Config {
            insecure: true,
            ca_cert: Some(PathBuf::from("/etc/tvlink/ca.pem")),
            ..Config::default()
        };
        assert_eq!(cfg.transport().tls, TlsMode::DangerAcceptInvalid);

        let cfg = Config {
            ca_cert: Some(PathBuf::from("/etc/tvlink/ca.pem")),
            ..Config::default()
        };
        assert_eq!(
            cfg.transport().tls,
            TlsMode::CustomCa(PathBuf::from("/etc/tvlink/ca.pem"))
        );
    }

    #[test]
    fn explicit_state_file_wins() {
        let cfg = Config {
            state_file: Some(PathBuf::from("/tmp/tvlink-session.toml")),
            ..Config::default()
        };
        assert_eq!(cfg.state_path(), PathBuf::from("/tmp/tvlink-session.toml"));
    }
}

// ── Runtime dispatch configuration ──
//
// These types describe *how* a session dispatches keys and scopes its
// pairing credential. They never touch disk: `tvlink-config` builds a
// `DispatchConfig` and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What `send_key` does when no TV is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MissingDevicePolicy {
    /// Fail with [`CoreError::NoDeviceSelected`](crate::CoreError::NoDeviceSelected).
    #[default]
    Reject,
    /// Log a warning and return [`SendOutcome::Skipped`](crate::SendOutcome::Skipped)
    /// without contacting the executor. Matches the historical UI behavior.
    Skip,
}

/// How many pairing credentials a session keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CredentialScope {
    /// One slot shared by every TV; each new pairing overwrites it.
    #[default]
    Global,
    /// One slot per TV address.
    PerDevice,
}

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound on a single executor call.
    pub timeout: Duration,
    /// Behavior when `send_key` runs with no TV selected.
    pub missing_device: MissingDevicePolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            missing_device: MissingDevicePolicy::default(),
        }
    }
}

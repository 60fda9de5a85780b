// Transport configuration for the HTTP executor bridge.
//
// The executor backend usually runs on loopback, but it may sit behind
// TLS with a self-signed certificate, so the same three verification
// modes as any LAN appliance client are supported.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

/// TLS verification mode for the executor connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate.
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Connect timeout. The per-command deadline is enforced by the dispatcher.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(concat!("tvlink/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_and_accept_invalid_modes_build() {
        assert!(TransportConfig::default().build_client().is_ok());

        let insecure = TransportConfig {
            tls: TlsMode::DangerAcceptInvalid,
            ..TransportConfig::default()
        };
        assert!(insecure.build_client().is_ok());
    }

    #[test]
    fn missing_custom_ca_is_a_tls_error() {
        let dir = std::env::temp_dir().join("tvlink-transport-test-nonexistent");
        let config = TransportConfig {
            tls: TlsMode::CustomCa(dir.join("ca.pem")),
            ..TransportConfig::default()
        };

        let err = config.build_client().expect_err("CA file does not exist");

        assert!(
            matches!(err, Error::Tls(ref msg) if msg.starts_with("failed to read CA cert")),
            "got {err:?}"
        );
    }
}

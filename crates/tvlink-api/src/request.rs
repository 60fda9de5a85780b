// Wire shape of a single keypress handed to the executor.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

/// One keypress addressed to one television.
///
/// Serializes as `{ "address", "key", "brand", "credential" }`. The
/// credential is `null` when the session is not paired, never `""`, so
/// the executor can tell "no credential" apart from an empty one.
#[derive(Debug, Clone, Serialize)]
pub struct KeyRequest {
    /// Network address of the target TV.
    pub address: String,
    /// Remote-control key name (e.g. `KEY_POWER`, `VOLUME_UP`).
    pub key: String,
    /// Brand/model identifier selected alongside the address.
    pub brand: String,
    /// Pairing credential for brands that require one.
    #[serde(serialize_with = "expose_credential")]
    pub credential: Option<SecretString>,
}

impl KeyRequest {
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

#[allow(clippy::ref_option)]
fn expose_credential<S: Serializer>(
    credential: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match credential {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request(credential: Option<&str>) -> KeyRequest {
        KeyRequest {
            address: "192.168.1.50".into(),
            key: "POWER".into(),
            brand: "LG".into(),
            credential: credential.map(|c| SecretString::from(c.to_owned())),
        }
    }

    #[test]
    fn missing_credential_serializes_as_null() {
        let value = serde_json::to_value(request(None)).expect("serialize");
        assert_eq!(
            value,
            json!({
                "address": "192.168.1.50",
                "key": "POWER",
                "brand": "LG",
                "credential": null,
            })
        );
    }

    #[test]
    fn credential_is_exposed_on_the_wire_only() {
        let req = request(Some("abc"));
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(value["credential"], json!("abc"));

        let debug = format!("{req:?}");
        assert!(!debug.contains("abc"), "credential leaked into Debug: {debug}");
    }
}

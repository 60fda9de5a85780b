// ── Session domain types ──

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Brand/model identifier of a TV.
///
/// Open-ended: whatever the caller selected is stored and reported
/// verbatim. Behavioral checks compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brand(String);

impl Brand {
    /// Brand assumed when none was ever selected.
    pub const DEFAULT: &'static str = "samsung";

    pub fn new(brand: impl Into<String>) -> Self {
        Self(brand.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// LG sets hand out a client key on first connection and expect it back
    /// on every later one.
    pub fn requires_pairing(&self) -> bool {
        self.0.eq_ignore_ascii_case("lg")
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Brand {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Brand {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A TV as reported by network discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TvDevice {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub location: String,
    pub model: String,
}

/// Observable session state: which TV, which brand, which credential.
///
/// An empty `address` means no TV is selected. `credential` is the one
/// that applies to the current selection under the session's
/// [`CredentialScope`](crate::CredentialScope).
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub address: String,
    pub brand: Brand,
    pub credential: Option<SecretString>,
}

impl SessionState {
    pub fn is_selected(&self) -> bool {
        !self.address.is_empty()
    }

    pub fn is_paired(&self) -> bool {
        self.credential.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_brand_is_generic() {
        assert_eq!(Brand::default().as_str(), "samsung");
        assert!(!Brand::default().requires_pairing());
    }

    #[test]
    fn lg_requires_pairing_in_any_case() {
        assert!(Brand::from("LG").requires_pairing());
        assert!(Brand::from("lg").requires_pairing());
        assert_eq!(Brand::from("LG").as_str(), "LG");
    }

    #[test]
    fn default_state_is_unselected_and_unpaired() {
        let state = SessionState::default();
        assert!(!state.is_selected());
        assert!(!state.is_paired());
    }
}

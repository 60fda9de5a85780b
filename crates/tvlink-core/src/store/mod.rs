// ── Durable session store ──
//
// A flat string key-value mirror of the session. Every in-memory
// mutation is written through immediately; there is no batching.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

/// Stable names of the durable fields. Changing these breaks persistence
/// across upgrades.
pub mod keys {
    /// Selected TV address.
    pub const ADDRESS: &str = "saved_tv_ip";
    /// Selected TV brand/model identifier.
    pub const BRAND: &str = "saved_tv_model";
    /// Pairing credential (global slot, or prefix of the per-device slots).
    pub const CREDENTIAL: &str = "tv_client_key";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store contents: {0}")]
    Malformed(String),
}

/// Durable key-value storage backing a [`Session`](crate::Session).
pub trait SessionStore: Send + Sync {
    /// Read a value; `Ok(None)` when the name was never written.
    fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, name: &str, value: &str) -> Result<(), StoreError>;
}

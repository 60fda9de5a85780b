use dashmap::DashMap;

use super::{SessionStore, StoreError};

/// Process-local store. Useful for tests and for embedders that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, as if a previous process had written these values.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (k, v) in values {
            store.values.insert(k.into(), v.into());
        }
        store
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(name).map(|v| v.value().clone()))
    }

    fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_name() {
        let store = MemoryStore::new();
        assert!(store.get("saved_tv_ip").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = MemoryStore::with_values([("saved_tv_ip", "10.0.0.2")]);
        store.set("saved_tv_ip", "10.0.0.3").unwrap();
        assert_eq!(store.get("saved_tv_ip").unwrap().as_deref(), Some("10.0.0.3"));
        assert_eq!(store.len(), 1);
    }
}

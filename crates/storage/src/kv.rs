use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{StorageError, StorageResult};

/// Well-known persisted keys. Each store owns exactly one.
pub mod keys {
    /// Serialized company → employee-sequence mapping.
    pub const EMPLOYEES: &str = "employees";
    /// Serialized session, absent when logged out.
    pub const USER: &str = "user";
    /// `"dark"` or `"light"`.
    pub const THEME: &str = "theme";
}

/// String-keyed blob store with full-overwrite semantics.
///
/// Every `set` replaces the whole value for the key; there are no partial
/// writes, transactions or versions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Remove the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Process-local store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Keys currently present, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = match self.inner.read() {
            Ok(map) => map.keys().cloned().collect(),
            Err(_) => return vec![],
        };
        keys.sort();
        keys
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let map = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_whole_value() {
        let store = InMemoryKeyValueStore::new();
        store.set(keys::THEME, "dark").unwrap();
        store.set(keys::THEME, "light").unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        store.set(keys::USER, "{}").unwrap();
        store.remove(keys::USER).unwrap();
        store.remove(keys::USER).unwrap();
        assert_eq!(store.get(keys::USER).unwrap(), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn arc_handles_share_state() {
        let store = InMemoryKeyValueStore::arc();
        let other: Arc<dyn KeyValueStore> = store.clone();
        other.set(keys::EMPLOYEES, "{}").unwrap();
        assert_eq!(store.keys(), vec![keys::EMPLOYEES.to_string()]);
    }
}

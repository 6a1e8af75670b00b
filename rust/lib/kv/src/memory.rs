use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

/// MemoryKV is an in-process storage area.
///
/// It behaves like a browser tab's session storage: contents live as long as
/// the value does and are gone afterwards. Batches are applied under a single
/// write lock, so readers never observe half of a batch.
#[derive(Default)]
pub struct MemoryKV {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKV {
    /// Create an empty storage area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries
            .read()
            .map_err(|e| KVError::Storage(format!("memory area poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries
            .write()
            .map_err(|e| KVError::Storage(format!("memory area poisoned: {}", e)))
    }
}

impl KVStore for MemoryKV {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), KVError> {
        let mut entries = self.write()?;
        debug!("MemoryKV: clearing {} entries", entries.len());
        entries.clear();
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let mut map = self.write()?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let mut map = self.write()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KVError> {
        Ok(self.read()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_returns_none() {
        let kv = MemoryKV::new();
        assert_eq!(kv.get("token_info").unwrap(), None);
    }

    #[test]
    fn set_get_delete() {
        let kv = MemoryKV::new();
        kv.set("user_info", b"{}").unwrap();
        assert_eq!(kv.get("user_info").unwrap(), Some(b"{}".to_vec()));

        kv.set("user_info", b"[]").unwrap();
        assert_eq!(kv.get("user_info").unwrap(), Some(b"[]".to_vec()));

        kv.delete("user_info").unwrap();
        assert_eq!(kv.get("user_info").unwrap(), None);
    }

    #[test]
    fn delete_absent_key_is_noop() {
        let kv = MemoryKV::new();
        kv.delete("nothing").unwrap();
        kv.batch_delete(&["a", "b"]).unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn batch_set_writes_all_entries() {
        let kv = MemoryKV::new();
        kv.batch_set(&[("a", &b"1"[..]), ("b", &b"2"[..])]).unwrap();
        assert_eq!(kv.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn clear_removes_everything() {
        let kv = MemoryKV::new();
        kv.set("token_info", b"x").unwrap();
        kv.set("theme", b"dark").unwrap();
        assert_eq!(kv.len(), 2);

        kv.clear().unwrap();
        assert!(kv.is_empty());
        assert!(kv.keys().unwrap().is_empty());
    }
}

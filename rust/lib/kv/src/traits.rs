use crate::error::KVError;

/// KVStore is the storage-area capability the session gate depends on.
///
/// Keys are plain strings (`token_info`, `user_info`, ...); values are opaque
/// bytes, JSON in practice. Every single-key operation is atomic. Whether a
/// batch is atomic depends on the implementation; see [`KVStore::batch_set`].
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Remove every key in the storage area.
    fn clear(&self) -> Result<(), KVError>;

    /// Set several keys.
    ///
    /// The default writes one key at a time and stops at the first failure,
    /// leaving earlier writes in place. Backends with transactions override
    /// this to commit all entries or none.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Delete several keys. Same atomicity caveat as `batch_set`.
    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        for key in keys {
            self.delete(key)?;
        }
        Ok(())
    }

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>, KVError>;
}

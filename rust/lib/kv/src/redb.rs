use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("session_area");

/// RedbStore is a KVStore backed by redb, an embedded pure-Rust database.
///
/// It keeps the storage area on disk so separate processes (one CLI
/// invocation after another) see the same session. Batches run in a single
/// write transaction and are therefore all-or-nothing.
pub struct RedbStore {
    db: Arc<Database>,
}

fn storage<E: std::fmt::Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;

        // Ensure the table exists so readers never hit a missing table.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("RedbStore: opened {:?}", path);
        Ok(Self { db: Arc::new(db) })
    }

    fn write_with<F>(&self, f: F) -> Result<(), KVError>
    where
        F: FnOnce(&mut redb::Table<'_, &'static str, &'static [u8]>) -> Result<(), KVError>,
    {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            f(&mut table)?;
        }
        write_txn.commit().map_err(storage)
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write_with(|table| {
            table.insert(key, value).map_err(storage)?;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write_with(|table| {
            table.remove(key).map_err(storage)?;
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), KVError> {
        let mut removed = 0usize;
        self.write_with(|table| {
            table
                .retain(|_, _| {
                    removed += 1;
                    false
                })
                .map_err(storage)
        })?;
        debug!("RedbStore: cleared {} entries", removed);
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        self.write_with(|table| {
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage)?;
            }
            Ok(())
        })
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        self.write_with(|table| {
            for key in keys {
                table.remove(*key).map_err(storage)?;
            }
            Ok(())
        })
    }

    fn keys(&self) -> Result<Vec<String>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut keys = Vec::new();
        for entry in table.iter().map_err(storage)? {
            let (key, _) = entry.map_err(storage)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, RedbStore) {
        let tmp = TempDir::new().unwrap();
        let store = RedbStore::open(&tmp.path().join("area.redb")).unwrap();
        (tmp, store)
    }

    #[test]
    fn set_get_delete() {
        let (_tmp, store) = open_tmp();
        assert_eq!(store.get("token_info").unwrap(), None);

        store.set("token_info", b"{\"a\":1}").unwrap();
        assert_eq!(store.get("token_info").unwrap(), Some(b"{\"a\":1}".to_vec()));

        store.delete("token_info").unwrap();
        assert_eq!(store.get("token_info").unwrap(), None);

        // Deleting again is fine.
        store.delete("token_info").unwrap();
    }

    #[test]
    fn batch_set_and_keys() {
        let (_tmp, store) = open_tmp();
        store
            .batch_set(&[("user_info", &b"u"[..]), ("token_info", &b"t"[..])])
            .unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["token_info".to_string(), "user_info".to_string()]
        );

        store.batch_delete(&["user_info", "token_info"]).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn clear_wipes_area() {
        let (_tmp, store) = open_tmp();
        store.set("token_info", b"t").unwrap();
        store.set("locale", b"en").unwrap();

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert_eq!(store.get("locale").unwrap(), None);
    }

    #[test]
    fn clear_commits_in_one_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("area.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store
                .batch_set(&[
                    ("token_info", &b"t"[..]),
                    ("user_info", &b"u"[..]),
                    ("locale", &b"en"[..]),
                ])
                .unwrap();
            store.clear().unwrap();
            // Clearing an empty area is a no-op.
            store.clear().unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        store.set("locale", b"de").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["locale".to_string()]);
    }

    #[test]
    fn persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("area.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("user_info", b"{}").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("user_info").unwrap(), Some(b"{}".to_vec()));
    }
}

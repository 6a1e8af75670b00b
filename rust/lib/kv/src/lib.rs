//! Key-value storage port for the session gate.
//!
//! The session store never touches a concrete storage engine. It is handed an
//! `Arc<dyn KVStore>` at construction: `MemoryKV` models a tab-scoped storage
//! area (and is the test fake), `RedbStore` keeps the area on disk so a
//! command-line host can share it across invocations.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryKV;
pub use redb::RedbStore;
pub use traits::KVStore;

use std::sync::Arc;

use rentdesk_kv::KVStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::model::{AuthenticatedInfo, Session, TokenRecord, UserSnapshot};
use crate::role::Authorization;

/// Storage key holding the JSON-encoded [`TokenRecord`].
pub const TOKEN_KEY: &str = "token_info";

/// Storage key holding the JSON-encoded [`UserSnapshot`].
pub const USER_INFO_KEY: &str = "user_info";

/// How much of a session the storage area currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionConsistency {
    /// Neither key decodes.
    Absent,
    /// Exactly one of the two keys decodes. Nothing in the gate repairs this.
    Partial { token: bool, user: bool },
    /// Both keys decode.
    Complete,
}

/// SessionStore owns the authentication session inside a storage area.
///
/// Accessors come in two flavours:
/// - `load_token` / `load_user` return `Result<Option<_>>` and report
///   malformed data as [`SessionError::Malformed`].
/// - `token`, `user` and everything derived from them treat malformed data
///   and storage failures as absent, logging a warning. The gate fails closed.
///
/// Nothing is cached; each call reads the area again.
pub struct SessionStore {
    kv: Arc<dyn KVStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// The storage area this store reads and writes.
    pub fn kv(&self) -> &Arc<dyn KVStore> {
        &self.kv
    }

    // ====================================================================
    // Writes
    // ====================================================================

    /// Persist both halves of a session.
    ///
    /// Both keys go through one `batch_set`. `MemoryKV` and `RedbStore` commit
    /// that atomically. A port relying on the default `batch_set` writes the
    /// token first and the user second; if the second write fails the token
    /// stays behind and `consistency()` reports `Partial`.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let token = encode(TOKEN_KEY, &session.token)?;
        let user = encode(USER_INFO_KEY, &session.user)?;
        self.kv.batch_set(&[
            (TOKEN_KEY, token.as_slice()),
            (USER_INFO_KEY, user.as_slice()),
        ])?;
        debug!(
            "session saved for user '{}' with roles {:?}",
            session.user.username, session.user.roles
        );
        Ok(())
    }

    /// Save the flat login response handed over by the login collaborator.
    pub fn save_authenticated(&self, info: AuthenticatedInfo) -> Result<(), SessionError> {
        self.save(&Session::from(info))
    }

    /// Delete both session keys. Absent keys are not an error.
    pub fn remove(&self) -> Result<(), SessionError> {
        self.kv.batch_delete(&[TOKEN_KEY, USER_INFO_KEY])?;
        debug!("session removed");
        Ok(())
    }

    /// Wipe the whole storage area, session or not. Anything else kept in the
    /// same area is lost too.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.kv.clear()?;
        debug!("storage area cleared");
        Ok(())
    }

    // ====================================================================
    // Strict reads
    // ====================================================================

    pub fn load_token(&self) -> Result<Option<TokenRecord>, SessionError> {
        self.load(TOKEN_KEY)
    }

    pub fn load_user(&self) -> Result<Option<UserSnapshot>, SessionError> {
        self.load(USER_INFO_KEY)
    }

    fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, SessionError> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| SessionError::Malformed { key, source })
    }

    // ====================================================================
    // Lenient reads
    // ====================================================================

    /// The stored token record, or None when absent or unreadable.
    pub fn token(&self) -> Option<TokenRecord> {
        absent_on_error(TOKEN_KEY, self.load_token())
    }

    /// The stored user snapshot, or None when absent or unreadable.
    pub fn user(&self) -> Option<UserSnapshot> {
        absent_on_error(USER_INFO_KEY, self.load_user())
    }

    pub fn access_token(&self) -> Option<String> {
        self.token().map(|t| t.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.token().map(|t| t.refresh_token)
    }

    /// True iff a user snapshot is present.
    ///
    /// Token expiry is not consulted: a stale token next to a valid snapshot
    /// still counts as authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// The snapshot's roles, or empty when there is no session.
    pub fn roles(&self) -> Vec<String> {
        self.user().map(|u| u.roles).unwrap_or_default()
    }

    pub fn is_super_admin(&self) -> bool {
        self.authorization().super_admin
    }

    pub fn is_admin(&self) -> bool {
        self.authorization().admin
    }

    /// All authorization facts from a single read of `user_info`.
    pub fn authorization(&self) -> Authorization {
        Authorization::from_user(self.user().as_ref())
    }

    /// Both halves, if both are present and readable.
    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.token()?,
            user: self.user()?,
        })
    }

    pub fn consistency(&self) -> SessionConsistency {
        let token = self.token().is_some();
        let user = self.user().is_some();
        match (token, user) {
            (true, true) => SessionConsistency::Complete,
            (false, false) => SessionConsistency::Absent,
            _ => {
                warn!("partial session in storage: token={}, user={}", token, user);
                SessionConsistency::Partial { token, user }
            }
        }
    }
}

fn encode<T: Serialize>(key: &'static str, value: &T) -> Result<Vec<u8>, SessionError> {
    serde_json::to_vec(value).map_err(|source| SessionError::Encode { key, source })
}

fn absent_on_error<T>(key: &str, result: Result<Option<T>, SessionError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("treating '{}' as absent: {}", key, e);
            None
        }
    }
}

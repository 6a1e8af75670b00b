//! Session persistence and role classification.
//!
//! The [`SessionStore`] keeps the logged-in actor's token record and user
//! snapshot in a storage area reached through [`rentdesk_kv::KVStore`]. It
//! never caches: every accessor re-reads the area, so a login or logout
//! written by another component is visible on the next call.
//!
//! [`Authorization`] is the role classifier. It turns a user snapshot into
//! the three facts the router branches on: authenticated, admin, super-admin.

pub mod error;
pub mod model;
pub mod role;
pub mod store;

pub use error::SessionError;
pub use model::{AuthenticatedInfo, Session, TokenRecord, UserSnapshot};
pub use role::{AccessPhase, Authorization, role_marker};
pub use store::{SessionConsistency, SessionStore, TOKEN_KEY, USER_INFO_KEY};

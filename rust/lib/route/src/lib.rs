//! Role-based route selection for the rental console.
//!
//! Three route trees exist: one for admins, one for authenticated non-admins
//! and one for visitors without a session. [`RouteSelector`] picks the tree
//! from an [`Authorization`](rentdesk_session::Authorization) and resolves a
//! path inside it to either a rendered [`View`] or a redirect.
//! [`Navigator`] wires the selector to a live
//! [`SessionStore`](rentdesk_session::SessionStore).
//!
//! Path strings are part of the public contract: bookmarks and other
//! components navigate by them.

pub mod error;
pub mod flow;
pub mod navigator;
pub mod path;
pub mod selector;
pub mod table;

pub use error::RouteError;
pub use flow::{ConfirmationAction, ReservationConfirmation};
pub use navigator::{MountedRoutes, Navigator};
pub use selector::{MAX_REDIRECTS, Outcome, Resolution, RouteDecision, RouteSelector, RouteTree};
pub use table::{RoleClass, Route, RouteTable, View};

use tracing::debug;

use rentdesk_session::{Authorization, SessionStore};

use crate::error::RouteError;
use crate::selector::{Resolution, RouteDecision, RouteSelector};

/// Route selection bound to a live session store.
///
/// `navigate` and `resolve` read the session on every call, so a login or
/// logout written in between is picked up by the next navigation.
/// `mount` instead takes one snapshot and keeps using it, the way a router
/// built once per page load behaves.
pub struct Navigator<'a> {
    sessions: &'a SessionStore,
    selector: &'a RouteSelector,
}

impl<'a> Navigator<'a> {
    pub fn new(sessions: &'a SessionStore, selector: &'a RouteSelector) -> Self {
        Self { sessions, selector }
    }

    pub fn navigate(&self, path: &str) -> RouteDecision {
        let auth = self.sessions.authorization();
        let decision = self.selector.select(&auth, path);
        debug!("navigate {} -> {:?}", path, decision.outcome);
        decision
    }

    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        self.selector.resolve(&self.sessions.authorization(), path)
    }

    /// Freeze the current authorization. The result does not notice later
    /// session writes; mount again to pick them up.
    pub fn mount(&self) -> MountedRoutes<'a> {
        MountedRoutes {
            auth: self.sessions.authorization(),
            selector: self.selector,
        }
    }
}

/// Routes evaluated against an authorization captured at mount time.
pub struct MountedRoutes<'a> {
    auth: Authorization,
    selector: &'a RouteSelector,
}

impl MountedRoutes<'_> {
    pub fn authorization(&self) -> Authorization {
        self.auth
    }

    pub fn navigate(&self, path: &str) -> RouteDecision {
        self.selector.select(&self.auth, path)
    }

    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        self.selector.resolve(&self.auth, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rentdesk_kv::MemoryKV;
    use rentdesk_session::{Session, TokenRecord, UserSnapshot};

    use crate::selector::{Outcome, RouteTree};
    use crate::table::View;

    fn session(roles: &[&str]) -> Session {
        Session {
            token: TokenRecord {
                token_type: "Bearer".into(),
                access_token: "a".into(),
                refresh_token: "r".into(),
            },
            user: UserSnapshot {
                id: 5,
                username: "nav".into(),
                email: "nav@example.com".into(),
                firstname: "Na".into(),
                lastname: "V".into(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        }
    }

    #[test]
    fn navigate_rereads_session_each_time() {
        let store = SessionStore::new(Arc::new(MemoryKV::new()));
        let selector = RouteSelector::default();
        let nav = Navigator::new(&store, &selector);

        assert_eq!(nav.navigate("/users").tree, RouteTree::Unauthenticated);

        store.save(&session(&["ADMIN"])).unwrap();
        assert_eq!(nav.navigate("/users").outcome, Outcome::Render(View::Users));

        store.save(&session(&[])).unwrap();
        assert_eq!(
            nav.navigate("/users").outcome,
            Outcome::Redirect("/rentals".into())
        );

        store.remove().unwrap();
        assert_eq!(nav.navigate("/users").outcome, Outcome::Render(View::Login));
    }

    #[test]
    fn mounted_routes_stay_stale_until_remount() {
        let store = SessionStore::new(Arc::new(MemoryKV::new()));
        let selector = RouteSelector::default();
        let nav = Navigator::new(&store, &selector);

        let mounted = nav.mount();
        store.save(&session(&["ADMIN"])).unwrap();

        // Still the pre-login snapshot.
        assert!(!mounted.authorization().authenticated);
        assert_eq!(mounted.navigate("/dashboards").outcome, Outcome::Render(View::Login));

        let remounted = nav.mount();
        assert_eq!(
            remounted.navigate("/dashboards").outcome,
            Outcome::Render(View::Dashboard)
        );
    }

    #[test]
    fn resolve_uses_current_session() {
        let store = SessionStore::new(Arc::new(MemoryKV::new()));
        let selector = RouteSelector::default();
        let nav = Navigator::new(&store, &selector);

        store.save(&session(&["USER"])).unwrap();
        let resolution = nav.resolve("/").unwrap();
        assert_eq!(resolution.view, View::Rentals);
        assert_eq!(resolution.final_path(), "/rentals");
    }
}

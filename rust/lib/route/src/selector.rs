use serde::Serialize;
use tracing::debug;

use rentdesk_session::{AccessPhase, Authorization};

use crate::error::RouteError;
use crate::path;
use crate::table::{RouteTable, View};

/// Upper bound on redirects followed by [`RouteSelector::resolve`]. The
/// standard table never needs more than one.
pub const MAX_REDIRECTS: usize = 8;

/// The route tree mounted for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTree {
    Admin,
    NonAdmin,
    Unauthenticated,
}

impl RouteTree {
    pub fn for_authorization(auth: &Authorization) -> Self {
        match auth.phase() {
            AccessPhase::Unauthenticated => RouteTree::Unauthenticated,
            AccessPhase::AuthenticatedAdmin => RouteTree::Admin,
            AccessPhase::AuthenticatedNonAdmin => RouteTree::NonAdmin,
        }
    }

    /// Admin and non-admin trees share the authorized layout.
    pub fn is_authorized(&self) -> bool {
        !matches!(self, RouteTree::Unauthenticated)
    }
}

/// What happens at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Outcome {
    Render(View),
    Redirect(String),
}

/// One navigation evaluated against one authorization snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub tree: RouteTree,
    /// The normalised path that was evaluated.
    pub path: String,
    pub outcome: Outcome,
}

/// Where a navigation ends up after following redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub tree: RouteTree,
    pub view: View,
    /// Every path visited, starting with the requested one. The last entry
    /// is the path that rendered.
    pub trail: Vec<String>,
}

impl Resolution {
    pub fn final_path(&self) -> &str {
        self.trail.last().map(String::as_str).unwrap_or(path::ROOT)
    }

    pub fn redirected(&self) -> bool {
        self.trail.len() > 1
    }
}

/// Chooses the route tree and resolves paths inside it.
#[derive(Debug, Clone, Default)]
pub struct RouteSelector {
    table: RouteTable,
}

impl RouteSelector {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Evaluate a single navigation. Never fails: role mismatches become
    /// redirects, unknown paths become the error view (or the login view
    /// when there is no session).
    pub fn select(&self, auth: &Authorization, raw_path: &str) -> RouteDecision {
        let path = path::normalize(raw_path);
        let tree = RouteTree::for_authorization(auth);

        let outcome = if !tree.is_authorized() {
            if path == path::SIGNUP {
                Outcome::Render(View::Signup)
            } else {
                Outcome::Render(View::Login)
            }
        } else {
            match self.table.find(&path) {
                None => Outcome::Render(View::Error),
                Some(route) if route.requires.admits(auth) => Outcome::Render(route.view),
                Some(route) => {
                    let target = self.table.landing_for(auth).to_string();
                    debug!(
                        "{} requires {:?}; redirecting {} actor to {}",
                        route.path,
                        route.requires,
                        auth.phase().as_str(),
                        target
                    );
                    Outcome::Redirect(target)
                }
            }
        };

        RouteDecision { tree, path, outcome }
    }

    /// Follow redirects until a view renders.
    ///
    /// Fails with [`RouteError::RedirectLoop`] when a path repeats or more
    /// than [`MAX_REDIRECTS`] hops are needed.
    pub fn resolve(&self, auth: &Authorization, raw_path: &str) -> Result<Resolution, RouteError> {
        let mut decision = self.select(auth, raw_path);
        let mut trail = vec![decision.path.clone()];

        loop {
            match decision.outcome {
                Outcome::Render(view) => {
                    return Ok(Resolution {
                        tree: decision.tree,
                        view,
                        trail,
                    });
                }
                Outcome::Redirect(target) => {
                    let target = path::normalize(&target);
                    if trail.contains(&target) || trail.len() > MAX_REDIRECTS {
                        trail.push(target);
                        return Err(RouteError::RedirectLoop { chain: trail });
                    }
                    decision = self.select(auth, &target);
                    trail.push(target);
                }
            }
        }
    }
}

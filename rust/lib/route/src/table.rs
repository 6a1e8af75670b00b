use serde::Serialize;

use rentdesk_session::Authorization;

use crate::error::RouteError;
use crate::path;

/// Page a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Users,
    Vehicles,
    Rentals,
    ReservationConfirm,
    MyReservations,
    Login,
    Signup,
    Error,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Users => "users",
            View::Vehicles => "vehicles",
            View::Rentals => "rentals",
            View::ReservationConfirm => "reservation_confirm",
            View::MyReservations => "my_reservations",
            View::Login => "login",
            View::Signup => "signup",
            View::Error => "error",
        }
    }
}

/// Which authenticated actors a route admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleClass {
    AdminOnly,
    NonAdminOnly,
}

impl RoleClass {
    pub fn admits(&self, auth: &Authorization) -> bool {
        match self {
            RoleClass::AdminOnly => auth.admin,
            RoleClass::NonAdminOnly => !auth.admin,
        }
    }
}

/// A named route of the authenticated trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub view: View,
    pub requires: RoleClass,
}

/// Route definitions plus the landing path of each role class.
///
/// A role/route mismatch redirects to the landing path of the actor's own
/// class: non-admins land on `member_landing`, admins on `admin_landing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
    admin_landing: String,
    member_landing: String,
}

const STANDARD_ROUTES: &[Route] = &[
    // `/` is the dashboard under another name.
    Route {
        path: path::ROOT,
        view: View::Dashboard,
        requires: RoleClass::AdminOnly,
    },
    Route {
        path: path::DASHBOARDS,
        view: View::Dashboard,
        requires: RoleClass::AdminOnly,
    },
    Route {
        path: path::USERS,
        view: View::Users,
        requires: RoleClass::AdminOnly,
    },
    Route {
        path: path::VEHICLES,
        view: View::Vehicles,
        requires: RoleClass::AdminOnly,
    },
    Route {
        path: path::RENTALS,
        view: View::Rentals,
        requires: RoleClass::NonAdminOnly,
    },
    Route {
        path: path::CONFIRM,
        view: View::ReservationConfirm,
        requires: RoleClass::NonAdminOnly,
    },
    Route {
        path: path::RESERVATIONS,
        view: View::MyReservations,
        requires: RoleClass::NonAdminOnly,
    },
];

impl RouteTable {
    /// The console's routes with `/dashboards` and `/rentals` as landings.
    pub fn standard() -> Self {
        Self {
            routes: STANDARD_ROUTES.to_vec(),
            admin_landing: path::DASHBOARDS.to_string(),
            member_landing: path::RENTALS.to_string(),
        }
    }

    /// The standard routes with different landing paths. Landings are
    /// normalised and checked with [`RouteTable::validate`].
    pub fn with_landings(admin_landing: &str, member_landing: &str) -> Result<Self, RouteError> {
        let table = Self::with_landings_unchecked(admin_landing, member_landing);
        table.validate()?;
        Ok(table)
    }

    /// Like `with_landings` without validation. A bad landing shows up as a
    /// `RedirectLoop` when resolving.
    pub fn with_landings_unchecked(admin_landing: &str, member_landing: &str) -> Self {
        Self {
            routes: STANDARD_ROUTES.to_vec(),
            admin_landing: path::normalize(admin_landing),
            member_landing: path::normalize(member_landing),
        }
    }

    /// Each landing must be a route its own class is admitted to, otherwise
    /// a mismatch redirect would bounce between the trees.
    pub fn validate(&self) -> Result<(), RouteError> {
        for (class, landing) in [
            (RoleClass::AdminOnly, &self.admin_landing),
            (RoleClass::NonAdminOnly, &self.member_landing),
        ] {
            match self.find(landing) {
                Some(route) if route.requires == class => {}
                _ => {
                    return Err(RouteError::InvalidFallback {
                        class,
                        path: landing.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Route definition for an already normalised path.
    pub fn find(&self, normalized: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == normalized)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn admin_landing(&self) -> &str {
        &self.admin_landing
    }

    pub fn member_landing(&self) -> &str {
        &self.member_landing
    }

    /// Where a mismatch sends this actor.
    pub fn landing_for(&self, auth: &Authorization) -> &str {
        if auth.admin {
            &self.admin_landing
        } else {
            &self.member_landing
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

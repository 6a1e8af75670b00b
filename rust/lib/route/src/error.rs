use thiserror::Error;

use crate::table::RoleClass;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Following redirects revisited a path or exceeded the hop limit.
    #[error("redirect loop: {}", chain.join(" -> "))]
    RedirectLoop { chain: Vec<String> },

    /// A landing path does not render for the class that lands on it.
    #[error("landing path '{path}' for {class:?} does not render a view for that class")]
    InvalidFallback { class: RoleClass, path: String },
}

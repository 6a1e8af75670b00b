//! Route paths and path normalisation.

pub const ROOT: &str = "/";
pub const DASHBOARDS: &str = "/dashboards";
pub const USERS: &str = "/users";
pub const VEHICLES: &str = "/vehicles";
pub const RENTALS: &str = "/rentals";
pub const CONFIRM: &str = "/confirm";
pub const RESERVATIONS: &str = "/reservations";
pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";

/// Catch-all pattern. Only meaningful in listings; matching falls through to
/// it implicitly.
pub const WILDCARD: &str = "*";

/// Reduce a navigation target to the form route definitions are written in.
///
/// - query string and fragment are dropped
/// - a missing leading `/` is added
/// - trailing slashes are trimmed (except for the root itself)
/// - ASCII letters are lower-cased; route matching is case-insensitive
pub fn normalize(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = raw[..end].trim().trim_end_matches('/');

    let mut out = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        out.push('/');
    }
    out.push_str(&trimmed.to_ascii_lowercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cases() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("///"), "/");
        assert_eq!(normalize("/users/"), "/users");
        assert_eq!(normalize("users"), "/users");
        assert_eq!(normalize("/Rentals?page=2"), "/rentals");
        assert_eq!(normalize("/confirm#summary"), "/confirm");
        assert_eq!(normalize("  /login  "), "/login");
        assert_eq!(normalize("/?next=/users"), "/");
    }

    #[test]
    fn nested_paths_are_kept() {
        assert_eq!(normalize("/users/42"), "/users/42");
    }
}

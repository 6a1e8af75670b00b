//! Navigation commands.

use anyhow::Result;
use rentdesk_route::{
    ConfirmationAction, Navigator, Outcome, ReservationConfirmation, RouteDecision,
    RouteSelector, path,
};
use rentdesk_session::SessionStore;

/// Evaluate a path for the current session and follow redirects.
pub fn navigate(
    store: &SessionStore,
    selector: &RouteSelector,
    target: &str,
    json_output: bool,
) -> Result<()> {
    print!("{}", render_navigate(store, selector, target, json_output)?);
    Ok(())
}

pub fn render_navigate(
    store: &SessionStore,
    selector: &RouteSelector,
    target: &str,
    json_output: bool,
) -> Result<String> {
    let nav = Navigator::new(store, selector);
    let decision = nav.navigate(target);
    let resolution = nav.resolve(target)?;

    if json_output {
        let body = serde_json::json!({
            "decision": decision,
            "resolution": resolution,
        });
        return Ok(format!("{}\n", serde_json::to_string_pretty(&body)?));
    }

    let mut out = String::new();
    out.push_str(&format!("{:<8} {:?}\n", "TREE", decision.tree));
    out.push_str(&format!("{:<8} {}\n", "PATH", decision.path));
    out.push_str(&format!("{:<8} {}\n", "OUTCOME", describe(&decision)));
    if resolution.redirected() {
        out.push_str(&format!("{:<8} {}\n", "TRAIL", resolution.trail.join(" -> ")));
    }
    out.push_str(&format!("{:<8} {}\n", "VIEW", resolution.view.as_str()));
    Ok(out)
}

/// List how every known path behaves for the current session.
pub fn routes(store: &SessionStore, selector: &RouteSelector, json_output: bool) -> Result<()> {
    let nav = Navigator::new(store, selector);
    let mounted = nav.mount();

    let mut paths: Vec<&str> = selector.table().routes().iter().map(|r| r.path).collect();
    paths.extend([path::LOGIN, path::SIGNUP, path::WILDCARD]);

    let decisions: Vec<RouteDecision> = paths.iter().map(|p| mounted.navigate(p)).collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    println!("{:<16} {}", "PATH", "OUTCOME");
    for (p, decision) in paths.iter().zip(&decisions) {
        println!("{:<16} {}", p, describe(decision));
    }
    Ok(())
}

/// Leave the reservation confirmation view through one of its actions.
pub fn confirm(
    store: &SessionStore,
    selector: &RouteSelector,
    action: ConfirmationAction,
    reservation_id: Option<i64>,
) -> Result<()> {
    let confirmation = ReservationConfirmation::new(reservation_id);
    let nav = Navigator::new(store, selector);
    let resolution = confirmation.follow(action, &nav)?;

    println!("{}", confirmation.order_label());
    println!(
        "{} -> {} ({})",
        action,
        resolution.final_path(),
        resolution.view.as_str()
    );
    Ok(())
}

fn describe(decision: &RouteDecision) -> String {
    match &decision.outcome {
        Outcome::Render(view) => format!("render {}", view.as_str()),
        Outcome::Redirect(target) => format!("redirect {}", target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rentdesk_kv::MemoryKV;
    use rentdesk_session::{Session, TokenRecord, UserSnapshot};

    fn store_with(roles: Option<&[&str]>) -> SessionStore {
        let store = SessionStore::new(Arc::new(MemoryKV::new()));
        if let Some(roles) = roles {
            store
                .save(&Session {
                    token: TokenRecord {
                        token_type: "Bearer".into(),
                        access_token: "a".into(),
                        refresh_token: "r".into(),
                    },
                    user: UserSnapshot {
                        id: 3,
                        username: "cli".into(),
                        email: "cli@example.com".into(),
                        firstname: "C".into(),
                        lastname: "Li".into(),
                        roles: roles.iter().map(|r| r.to_string()).collect(),
                    },
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn navigate_shows_redirect_trail() {
        let store = store_with(Some(&["USER"]));
        let selector = RouteSelector::default();
        let out = render_navigate(&store, &selector, "/users", false).unwrap();
        assert!(out.contains("OUTCOME  redirect /rentals"));
        assert!(out.contains("TRAIL    /users -> /rentals"));
        assert!(out.contains("VIEW     rentals"));
    }

    #[test]
    fn navigate_json_for_anonymous() {
        let store = store_with(None);
        let selector = RouteSelector::default();
        let out = render_navigate(&store, &selector, "/dashboards", true).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["decision"]["tree"], "unauthenticated");
        assert_eq!(v["decision"]["outcome"]["kind"], "render");
        assert_eq!(v["decision"]["outcome"]["target"], "login");
        assert_eq!(v["resolution"]["view"], "login");
    }

    #[test]
    fn navigate_without_redirect_has_no_trail() {
        let store = store_with(Some(&["ADMIN"]));
        let selector = RouteSelector::default();
        let out = render_navigate(&store, &selector, "/vehicles", false).unwrap();
        assert!(!out.contains("TRAIL"));
        assert!(out.contains("VIEW     vehicles"));
    }
}

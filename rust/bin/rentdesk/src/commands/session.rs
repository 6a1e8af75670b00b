//! Login / logout and session inspection commands.

use anyhow::Result;
use rentdesk_session::{AuthenticatedInfo, SessionConsistency, SessionStore};
use tracing::info;

/// Store the login response handed over by the login collaborator.
pub fn login(store: &SessionStore, info: AuthenticatedInfo) -> Result<()> {
    let username = info.username.clone();
    store.save_authenticated(info)?;
    let auth = store.authorization();
    info!("logged in as {} ({})", username, auth.phase().as_str());
    println!("Logged in as {} ({}).", username, auth.phase().as_str());
    Ok(())
}

/// Logout: remove the session keys, leave the rest of the area alone.
pub fn logout(store: &SessionStore) -> Result<()> {
    let was_authenticated = store.is_authenticated();
    store.remove()?;
    if was_authenticated {
        println!("Logged out.");
    } else {
        println!("No session to log out from.");
    }
    Ok(())
}

/// Wipe the entire storage area.
pub fn clear(store: &SessionStore) -> Result<()> {
    let count = store.kv().keys()?.len();
    store.clear()?;
    println!("Cleared {} key(s) from the storage area.", count);
    Ok(())
}

pub fn whoami(store: &SessionStore, json_output: bool) -> Result<()> {
    print!("{}", render_whoami(store, json_output)?);
    Ok(())
}

pub fn keys(store: &SessionStore) -> Result<()> {
    for key in store.kv().keys()? {
        println!("{}", key);
    }
    Ok(())
}

pub fn render_whoami(store: &SessionStore, json_output: bool) -> Result<String> {
    let user = store.user();
    let auth = store.authorization();
    let consistency = store.consistency();

    if json_output {
        let body = serde_json::json!({
            "user": user,
            "authenticated": auth.authenticated,
            "admin": auth.admin,
            "superAdmin": auth.super_admin,
            "phase": auth.phase().as_str(),
            "consistency": consistency_label(consistency),
        });
        return Ok(format!("{}\n", serde_json::to_string_pretty(&body)?));
    }

    let mut out = String::new();
    match user {
        None => out.push_str("Not logged in.\n"),
        Some(user) => {
            out.push_str(&format!("{:<12} {}\n", "USER", user.username));
            out.push_str(&format!("{:<12} {}\n", "NAME", user.display_name()));
            out.push_str(&format!("{:<12} {}\n", "EMAIL", user.email));
            out.push_str(&format!("{:<12} {}\n", "ROLES", user.roles.join(", ")));
        }
    }
    out.push_str(&format!("{:<12} {}\n", "PHASE", auth.phase().as_str()));
    if let SessionConsistency::Partial { .. } = consistency {
        out.push_str(&format!("{:<12} {}\n", "WARNING", consistency_label(consistency)));
    }
    Ok(out)
}

fn consistency_label(consistency: SessionConsistency) -> &'static str {
    match consistency {
        SessionConsistency::Absent => "absent",
        SessionConsistency::Complete => "complete",
        SessionConsistency::Partial { token: true, .. } => "partial: token without user",
        SessionConsistency::Partial { .. } => "partial: user without token",
    }
}

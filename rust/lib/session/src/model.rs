use serde::{Deserialize, Deserializer, Serialize};

/// Credentials issued at login. Stored under `token_info`.
///
/// Replaced as a whole on re-login or refresh, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    /// Usually "Bearer".
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Identity of the logged-in actor. Stored under `user_info`.
///
/// Only `id` and `username` are required. Profile fields and `roles` may be
/// missing or `null` in records written by other clients and decode empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub firstname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lastname: String,

    /// Role markers in the order the identity provider issued them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserSnapshot {
    /// "First Last", falling back to the username when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.firstname.trim(), self.lastname.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn has_role(&self, marker: &str) -> bool {
        self.roles.iter().any(|r| r == marker)
    }
}

/// A complete session: both halves present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: TokenRecord,
    pub user: UserSnapshot,
}

/// Flat login response handed to the login collaborator.
///
/// The backend returns token and identity fields side by side; the session
/// store keeps them under separate keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedInfo {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
}

impl From<AuthenticatedInfo> for Session {
    fn from(info: AuthenticatedInfo) -> Self {
        Session {
            token: TokenRecord {
                token_type: info.token_type,
                access_token: info.access_token,
                refresh_token: info.refresh_token,
            },
            user: UserSnapshot {
                id: info.id,
                username: info.username,
                email: info.email,
                firstname: info.firstname,
                lastname: info.lastname,
                roles: info.roles,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_record_uses_camel_case_fields() {
        let token = TokenRecord {
            token_type: "Bearer".into(),
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tokenType": "Bearer", "accessToken": "a", "refreshToken": "r"})
        );
    }

    #[test]
    fn user_snapshot_without_roles_decodes_empty() {
        let user: UserSnapshot = serde_json::from_str(
            r#"{"id":7,"username":"kim","email":"kim@example.com","firstname":"Kim","lastname":"Lee"}"#,
        )
        .unwrap();
        assert!(user.roles.is_empty());
        assert_eq!(user.display_name(), "Kim Lee");
    }

    #[test]
    fn user_snapshot_tolerates_null_and_missing_profile_fields() {
        let user: UserSnapshot = serde_json::from_str(
            r#"{"id":7,"username":"kim","email":null,"firstname":null,"roles":null}"#,
        )
        .unwrap();
        assert_eq!(user.email, "");
        assert_eq!(user.firstname, "");
        assert_eq!(user.lastname, "");
        assert!(user.roles.is_empty());
        assert_eq!(user.display_name(), "kim");

        // Identity is still required.
        let no_username = serde_json::from_str::<UserSnapshot>(r#"{"id":7,"roles":[]}"#);
        assert!(no_username.is_err());
        let null_id = serde_json::from_str::<UserSnapshot>(r#"{"id":null,"username":"kim"}"#);
        assert!(null_id.is_err());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = UserSnapshot {
            id: 1,
            username: "ops".into(),
            email: String::new(),
            firstname: " ".into(),
            lastname: String::new(),
            roles: vec![],
        };
        assert_eq!(user.display_name(), "ops");
    }

    #[test]
    fn authenticated_info_splits_into_session() {
        let info: AuthenticatedInfo = serde_json::from_value(serde_json::json!({
            "tokenType": "Bearer",
            "accessToken": "acc",
            "refreshToken": "ref",
            "id": 3,
            "username": "admin",
            "email": "admin@example.com",
            "firstname": "Ada",
            "lastname": "Min",
            "roles": ["ADMIN", "USER"]
        }))
        .unwrap();

        let session = Session::from(info);
        assert_eq!(session.token.access_token, "acc");
        assert_eq!(session.token.refresh_token, "ref");
        assert_eq!(session.user.id, 3);
        assert_eq!(session.user.roles, vec!["ADMIN".to_string(), "USER".to_string()]);
        assert!(session.user.has_role("ADMIN"));
        assert!(!session.user.has_role("admin"));
    }
}

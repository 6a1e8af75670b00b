//! Client configuration.
//!
//! Reads/writes `~/.rentdesk/config.toml`.

use std::path::{Path, PathBuf};

use rentdesk_route::RouteTable;
use serde::{Deserialize, Serialize};

/// Landing paths used when a role/route mismatch redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_admin_landing")]
    pub admin_landing: String,

    #[serde(default = "default_member_landing")]
    pub member_landing: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            admin_landing: default_admin_landing(),
            member_landing: default_member_landing(),
        }
    }
}

fn default_admin_landing() -> String {
    "/dashboards".to_string()
}

fn default_member_landing() -> String {
    "/rentals".to_string()
}

fn default_log() -> String {
    "warn".to_string()
}

/// Client configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Storage area database. Defaults to `~/.rentdesk/session.redb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log")]
    pub log: String,

    #[serde(default)]
    pub routes: RouteConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log: default_log(),
            routes: RouteConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.rentdesk/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The storage database path, falling back to `~/.rentdesk/session.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| dirs_path().join("session.redb"))
    }

    /// Build and validate the route table from `[routes]`.
    pub fn route_table(&self) -> anyhow::Result<RouteTable> {
        let table =
            RouteTable::with_landings(&self.routes.admin_landing, &self.routes.member_landing)?;
        Ok(table)
    }
}

/// Return the rentdesk config directory (~/.rentdesk).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".rentdesk")
}

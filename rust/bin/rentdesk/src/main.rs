//! `rentdesk`: session gate host for the rental console.
//!
//! Plays the part of the browser shell: a login collaborator stores the
//! session, a logout action removes it, and navigation intents are resolved
//! against the route table. The storage area lives in a redb file so that
//! one invocation sees what the previous one wrote.

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rentdesk_kv::{KVStore, RedbStore};
use rentdesk_route::{ConfirmationAction, RouteSelector};
use rentdesk_session::{AuthenticatedInfo, SessionStore};
use tracing::debug;

use config::ClientConfig;

/// Rental console session gate.
#[derive(Parser, Debug)]
#[command(name = "rentdesk", about = "Rental console session gate")]
struct Cli {
    /// Path to client config file (default: ~/.rentdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Storage area database (overrides `db_path` from the config file).
    #[arg(long = "db", global = true)]
    db: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a session from a login response.
    Login(LoginArgs),

    /// Remove the session keys.
    Logout,

    /// Wipe the whole storage area, not just the session.
    Clear {
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Show the current user and authorization.
    Whoami,

    /// List keys in the storage area.
    Keys,

    /// Resolve a path for the current session.
    Navigate {
        /// Path to open, e.g. /users.
        path: String,
    },

    /// Show how every route behaves for the current session.
    Routes,

    /// Leave the reservation confirmation view.
    Confirm {
        /// view-reservations or continue-booking.
        #[arg(long)]
        action: ConfirmationAction,
        /// Reservation id shown as the order number.
        #[arg(long)]
        reservation: Option<i64>,
    },

    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Show,
}

#[derive(clap::Args, Debug)]
struct LoginArgs {
    /// Login response as JSON.
    #[arg(long = "json")]
    json_body: Option<String>,
    /// Read the login response from a file.
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    #[arg(long, default_value = "Bearer")]
    token_type: String,
    #[arg(long)]
    access_token: Option<String>,
    #[arg(long)]
    refresh_token: Option<String>,
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    firstname: String,
    #[arg(long, default_value = "")]
    lastname: String,
    /// Role marker; repeat for several roles.
    #[arg(long = "role")]
    roles: Vec<String>,
}

impl LoginArgs {
    fn into_info(self) -> anyhow::Result<AuthenticatedInfo> {
        let body = if let Some(path) = self.file {
            Some(std::fs::read_to_string(&path)?)
        } else {
            self.json_body
        };
        if let Some(body) = body {
            return Ok(serde_json::from_str(&body)?);
        }

        let (Some(access_token), Some(refresh_token), Some(id), Some(username)) =
            (self.access_token, self.refresh_token, self.id, self.username)
        else {
            anyhow::bail!(
                "Provide --json, -f <file>, or --access-token, --refresh-token, --id and --username."
            );
        };

        Ok(AuthenticatedInfo {
            token_type: self.token_type,
            access_token,
            refresh_token,
            id,
            username,
            email: self.email,
            firstname: self.firstname,
            lastname: self.lastname,
            roles: self.roles,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let mut client_config = ClientConfig::load(&config_path)?;
    if let Some(db) = cli.db {
        client_config.db_path = Some(PathBuf::from(db));
    }

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| client_config.log.as_str().into()),
        )
        .init();

    let json_output = cli.output == "json";

    // Commands that do not touch the storage area.
    match &cli.command {
        Commands::Version => {
            println!("rentdesk v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Config { action } => {
            return match action {
                ConfigAction::Init { force } => commands::config::init(&config_path, *force),
                ConfigAction::Show => commands::config::show(&client_config),
            };
        }
        _ => {}
    }

    let selector = RouteSelector::new(client_config.route_table()?);

    let db_path = client_config.resolve_db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!("opening storage area {}", db_path.display());
    let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&db_path)?);
    let store = SessionStore::new(kv);

    match cli.command {
        Commands::Login(args) => {
            commands::session::login(&store, args.into_info()?)?;
        }

        Commands::Logout => {
            commands::session::logout(&store)?;
        }

        Commands::Clear { yes } => {
            if !yes {
                eprint!("This removes every key in the storage area. Continue? [y/N]: ");
                let mut s = String::new();
                std::io::stdin().read_line(&mut s)?;
                if !s.trim().eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::session::clear(&store)?;
        }

        Commands::Whoami => {
            commands::session::whoami(&store, json_output)?;
        }

        Commands::Keys => {
            commands::session::keys(&store)?;
        }

        Commands::Navigate { path } => {
            commands::route::navigate(&store, &selector, &path, json_output)?;
        }

        Commands::Routes => {
            commands::route::routes(&store, &selector, json_output)?;
        }

        Commands::Confirm {
            action,
            reservation,
        } => {
            commands::route::confirm(&store, &selector, action, reservation)?;
        }

        Commands::Version | Commands::Config { .. } => {}
    }

    Ok(())
}

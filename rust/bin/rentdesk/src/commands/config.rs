//! Config file commands.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

/// Write a config file with default values, unless one exists.
pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite.",
            config_path.display()
        );
    }
    ClientConfig::default().save(config_path)?;
    println!("Wrote {}.", config_path.display());
    Ok(())
}

/// Print the effective configuration.
pub fn show(config: &ClientConfig) -> Result<()> {
    print!("{}", render_show(config)?);
    Ok(())
}

/// Landing paths are shown as the route table uses them: normalised and
/// validated.
pub fn render_show(config: &ClientConfig) -> Result<String> {
    let table = config.route_table()?;
    let mut out = String::new();
    out.push_str(&format!("{:<16} {}\n", "db", config.resolve_db_path().display()));
    out.push_str(&format!("{:<16} {}\n", "log", config.log));
    out.push_str(&format!("{:<16} {}\n", "admin_landing", table.admin_landing()));
    out.push_str(&format!("{:<16} {}\n", "member_landing", table.member_landing()));
    Ok(out)
}

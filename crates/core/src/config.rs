//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `catalog.toml` (or the file named by `CATALOG_CONFIG`), `CATALOG_*`
//! environment variables, then the bare `PORT` and `ADMIN_PASSCODE` variables.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Passcode used when none is configured. Not for production.
pub const DEFAULT_ADMIN_PASSCODE: &str = "changeme";

/// Runtime settings for the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// TCP port the HTTP server listens on.
    pub port: u16,
    /// JSON file holding the listing collection.
    pub items_path: PathBuf,
    /// JSON file holding contact messages (read-only).
    pub messages_path: PathBuf,
    /// Directory of static assets.
    pub public_dir: PathBuf,
    /// Passcode accepted by the admin login.
    pub admin_passcode: String,
    /// Minutes before an admin token expires. Unset means never.
    #[serde(default)]
    pub session_ttl_minutes: Option<u64>,
    /// Directory receiving the log file.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            items_path: PathBuf::from("data/items.json"),
            messages_path: PathBuf::from("data/messages.json"),
            public_dir: PathBuf::from("public"),
            admin_passcode: DEFAULT_ADMIN_PASSCODE.to_string(),
            session_ttl_minutes: None,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration using `path` as the optional config file.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let defaults = AppConfig::default();

        let settings = Config::builder()
            .set_default("port", i64::from(defaults.port))?
            .set_default("items_path", path_value(&defaults.items_path))?
            .set_default("messages_path", path_value(&defaults.messages_path))?
            .set_default("public_dir", path_value(&defaults.public_dir))?
            .set_default("admin_passcode", defaults.admin_passcode)?
            .set_default("log_dir", path_value(&defaults.log_dir))?
            .add_source(File::from(path.clone()).required(false))
            .add_source(Environment::with_prefix("CATALOG").try_parsing(true))
            .set_override_option("port", env::var("PORT").ok())?
            .set_override_option("admin_passcode", env::var("ADMIN_PASSCODE").ok())?
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot be used at runtime.
    pub fn validate(&self) -> Result<()> {
        if let Some(minutes) = self.session_ttl_minutes {
            if ttl_from_minutes(minutes).is_none() {
                bail!("session_ttl_minutes = {minutes} is out of range");
            }
        }
        Ok(())
    }

    /// Log warnings about settings that are unsafe outside development.
    pub fn warn_on_defaults(&self) {
        if self.admin_passcode == DEFAULT_ADMIN_PASSCODE {
            warn!("ADMIN_PASSCODE not set, using the default passcode");
        }
    }

    /// Session lifetime as a duration, if expiry is enabled.
    ///
    /// Only meaningful on a configuration that passed [`AppConfig::validate`].
    pub fn session_ttl(&self) -> Option<chrono::Duration> {
        self.session_ttl_minutes.and_then(ttl_from_minutes)
    }
}

fn ttl_from_minutes(minutes: u64) -> Option<chrono::Duration> {
    i64::try_from(minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
}

/// Config file named by `CATALOG_CONFIG`, falling back to [`DEFAULT_CONFIG_FILE`].
pub fn config_path() -> PathBuf {
    env::var_os("CATALOG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
items_path = "/srv/site/items.json"
public_dir = "/srv/site/public"
session_ttl_minutes = 30
"#,
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.items_path, PathBuf::from("/srv/site/items.json"));
        assert_eq!(config.public_dir, PathBuf::from("/srv/site/public"));
        assert_eq!(config.messages_path, PathBuf::from("data/messages.json"));
        assert_eq!(config.session_ttl(), Some(chrono::Duration::minutes(30)));
        Ok(())
    }

    #[test]
    fn overflowing_session_ttl_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "session_ttl_minutes = 200000000000000\n")?;

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let config = AppConfig {
            session_ttl_minutes: Some(u64::MAX),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.session_ttl().is_none());
        Ok(())
    }

    #[test]
    fn default_session_ttl_is_unbounded() {
        assert!(AppConfig::default().session_ttl().is_none());
    }
}

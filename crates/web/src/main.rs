use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use catalog_core::{config::config_path, AppConfig};
use catalog_web::{start_server, state::AppState};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let log_path = init_logging(&config.log_dir, &config_path())?;
    info!("logging to {}", log_path.display());
    config.warn_on_defaults();

    let state = AppState::new(config)?;
    start_server(state).await
}

/// Log file for a given config file: `catalog.toml` logs to `catalog.log`.
fn log_file_for(log_dir: &Path, config_file: &Path) -> PathBuf {
    let stem = config_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("catalog");
    log_dir.join(format!("{stem}.log"))
}

fn init_logging(log_dir: &Path, config_file: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_file_for(log_dir, config_file);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_named_after_config_file() {
        let dir = Path::new("logs");
        assert_eq!(
            log_file_for(dir, Path::new("conf/shop.toml")),
            dir.join("shop.log")
        );
        assert_eq!(log_file_for(dir, Path::new("")), dir.join("catalog.log"));
    }
}

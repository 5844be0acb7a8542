use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_core::{AdminSessions, AppConfig, Catalog, ItemStore, MessageStore};

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub sessions: AdminSessions,
    pub messages: MessageStore,
}

impl AppState {
    /// Load the catalog from disk. Fails on invalid settings or a missing or invalid items file.
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let store = ItemStore::load(&config.items_path).context("catalog unavailable")?;
        let catalog = Catalog::new(store);
        let sessions =
            AdminSessions::new(config.admin_passcode.clone()).with_ttl(config.session_ttl());
        let messages = MessageStore::new(&config.messages_path);

        Ok(Arc::new(Self {
            config,
            catalog,
            sessions,
            messages,
        }))
    }
}

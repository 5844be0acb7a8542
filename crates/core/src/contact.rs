//! Contact form validation and the read-only message inbox.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    error::{CatalogError, CatalogResult},
    models::ContactMessage,
};

/// Fields posted from the public contact page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    /// Sender name.
    #[serde(default)]
    pub name: String,
    /// Sender email address.
    #[serde(default)]
    pub email: String,
    /// Message body.
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// All three fields must be present and non-blank.
    pub fn validate(&self) -> CatalogResult<()> {
        let blank = [&self.name, &self.email, &self.message]
            .iter()
            .any(|value| value.trim().is_empty());
        if blank {
            return Err(CatalogError::validation("All fields are required."));
        }
        Ok(())
    }
}

/// Messages file shown on the admin dashboard.
///
/// Nothing in the site writes to this file; it is only read.
#[derive(Debug, Clone)]
pub struct MessageStore {
    path: PathBuf,
}

impl MessageStore {
    /// Point the inbox at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the messages file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored messages. A missing file is an empty inbox.
    pub fn load(&self) -> Result<Vec<ContactMessage>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read messages {}", self.path.display()))?;
        let messages = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse messages {}", self.path.display()))?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn contact_form_requires_every_field() {
        let complete = ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Is the Civic still available?".to_string(),
        };
        assert!(complete.validate().is_ok());

        let missing = ContactForm {
            message: "  ".to_string(),
            ..complete
        };
        let err = missing.validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required.");
    }

    #[test]
    fn missing_messages_file_is_empty_inbox() -> Result<()> {
        let dir = tempdir()?;
        let store = MessageStore::new(dir.path().join("messages.json"));
        assert!(store.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn reads_stored_messages() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("messages.json");
        fs::write(
            &path,
            json!([
                {"name": "Ada", "email": "ada@example.com", "message": "Hi"},
                {"name": "Bob", "email": "bob@example.com", "message": "Price?",
                 "received_at": "2024-03-01T10:00:00Z"}
            ])
            .to_string(),
        )?;

        let messages = MessageStore::new(&path).load()?;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].name, "Ada");
        assert!(messages[0].received_at.is_none());
        assert!(messages[1].received_at.is_some());
        Ok(())
    }

    #[test]
    fn corrupt_messages_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("messages.json");
        fs::write(&path, "oops")?;
        assert!(MessageStore::new(&path).load().is_err());
        Ok(())
    }
}

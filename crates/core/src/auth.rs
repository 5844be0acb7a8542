//! Admin sessions backed by an in-memory token set.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Login failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied passcode did not match the configured one.
    #[error("invalid passcode")]
    InvalidPasscode,
}

/// Live admin tokens. Cloning shares the same token set.
///
/// Tokens live until logout or process restart unless a time-to-live is set.
#[derive(Debug, Clone)]
pub struct AdminSessions {
    passcode: Arc<str>,
    ttl: Option<Duration>,
    tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl AdminSessions {
    /// Create a session store checking logins against `passcode`.
    pub fn new(passcode: impl Into<String>) -> Self {
        Self {
            passcode: Arc::from(passcode.into()),
            ttl: None,
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Expire tokens `ttl` after they were issued.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Check the passcode and mint a fresh token on success.
    pub fn login(&self, passcode: &str) -> Result<String, AuthError> {
        if passcode != &*self.passcode {
            warn!("rejected admin login attempt");
            return Err(AuthError::InvalidPasscode);
        }

        let token = Uuid::new_v4().simple().to_string();
        self.tokens.write().insert(token.clone(), Utc::now());
        info!("admin logged in");
        Ok(token)
    }

    /// Whether `token` belongs to a live session.
    pub fn is_valid(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }

        let issued_at = match self.tokens.read().get(token) {
            Some(issued_at) => *issued_at,
            None => return false,
        };

        if self.is_expired(issued_at, Utc::now()) {
            debug!("dropping expired admin token");
            self.tokens.write().remove(token);
            return false;
        }
        true
    }

    /// End the session for `token`. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        if self.tokens.write().remove(token).is_some() {
            info!("admin logged out");
        }
    }

    /// Drop every expired token, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut tokens = self.tokens.write();
        let before = tokens.len();
        tokens.retain(|_, issued_at| !self.is_expired(*issued_at, now));
        before - tokens.len()
    }

    /// Number of tokens currently held.
    pub fn active(&self) -> usize {
        self.tokens.read().len()
    }

    fn is_expired(&self, issued_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.ttl
            .map(|ttl| now - issued_at >= ttl)
            .unwrap_or(false)
    }
}

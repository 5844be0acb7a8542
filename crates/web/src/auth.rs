//! Admin credential extraction from the `Cookie` header.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
    response::Redirect,
};

use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "admin_token";
pub const LOGIN_PATH: &str = "/admin/login";

/// A token that was present in the request and is currently valid.
pub struct AdminToken(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminToken {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match token_from_headers(&parts.headers) {
            Some(token) if state.sessions.is_valid(&token) => Ok(AdminToken(token)),
            _ => Err(Redirect::to(LOGIN_PATH)),
        }
    }
}

/// Value of the admin cookie across all `Cookie` headers, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn cleared_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use catalog_core::{CatalogError, ListingInput};
use serde::Deserialize;
use tracing::warn;

use crate::{
    auth::{self, AdminToken, LOGIN_PATH},
    error::AppError,
    state::AppState,
    views,
};

const DASHBOARD_PATH: &str = "/admin";

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    passcode: String,
}

pub async fn login_form() -> Html<String> {
    views::login(None)
}

pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    match state.sessions.login(&form.passcode) {
        Ok(token) => (
            [(SET_COOKIE, auth::session_cookie(&token))],
            Redirect::to(DASHBOARD_PATH),
        )
            .into_response(),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            views::login(Some("Incorrect passcode.")),
        )
            .into_response(),
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = auth::token_from_headers(&headers) {
        state.sessions.logout(&token);
    }
    (
        [(SET_COOKIE, auth::cleared_cookie())],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

pub async fn dashboard(_admin: AdminToken, State(state): State<Arc<AppState>>) -> Html<String> {
    let messages = state.messages.load().unwrap_or_else(|err| {
        warn!("failed to load contact messages: {err:#}");
        Vec::new()
    });
    views::dashboard(&state.catalog.all(), &messages)
}

pub async fn new_form(_admin: AdminToken) -> Html<String> {
    views::listing_form(None, &ListingInput::default(), None)
}

pub async fn create(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Form(input): Form<ListingInput>,
) -> Result<Response, AppError> {
    match state.catalog.create(&input) {
        Ok(_) => Ok(Redirect::to(DASHBOARD_PATH).into_response()),
        Err(CatalogError::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            views::listing_form(None, &input, Some(&message)),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_form(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let listing = state.catalog.find_by_slug(&slug).ok_or(AppError::NotFound)?;
    Ok(views::listing_form(
        Some(&listing.slug),
        &ListingInput::from(&listing),
        None,
    ))
}

pub async fn update(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Form(input): Form<ListingInput>,
) -> Result<Response, AppError> {
    match state.catalog.update(&slug, &input) {
        Ok(_) => Ok(Redirect::to(DASHBOARD_PATH).into_response()),
        Err(CatalogError::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            views::listing_form(Some(&slug), &input, Some(&message)),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn delete(
    _admin: AdminToken,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    state.catalog.delete(&slug)?;
    Ok(Redirect::to(DASHBOARD_PATH))
}

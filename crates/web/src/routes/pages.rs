use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use catalog_core::ContactForm;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::AppError,
    state::AppState,
    views::{self, Notice},
};

#[derive(Deserialize)]
pub struct HomeQuery {
    #[serde(rename = "forceError")]
    force_error: Option<String>,
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, AppError> {
    if query.force_error.as_deref() == Some("1") {
        return Err(anyhow!("Forced error via query").into());
    }

    Ok(views::home(
        &state.catalog.list_featured(),
        &state.catalog.categories(),
    ))
}

pub async fn about() -> Html<String> {
    views::static_page("About", "We buy and sell quality used vehicles.")
}

pub async fn services() -> Html<String> {
    views::static_page("Services", "Sales, trade-ins and vehicle sourcing.")
}

pub async fn blog() -> Html<String> {
    views::static_page("Blog", "News and updates are coming soon.")
}

pub async fn contact_form() -> Html<String> {
    views::contact(None)
}

pub async fn contact_submit(Form(form): Form<ContactForm>) -> Response {
    match form.validate() {
        Ok(()) => {
            info!("contact message received from {}", form.email.trim());
            views::contact(Some(Notice::Success("Thanks, your message was sent."))).into_response()
        }
        Err(err) => (
            StatusCode::BAD_REQUEST,
            views::contact(Some(Notice::Error(&err.to_string()))),
        )
            .into_response(),
    }
}

/// Always fails, for checking the 500 page.
pub async fn forced_error() -> Result<Html<String>, AppError> {
    Err(anyhow!("Forced test error").into())
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::{error::AppError, state::AppState, views};

pub async fn collection(State(state): State<Arc<AppState>>) -> Html<String> {
    views::collection("Collection", &state.catalog.all())
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let listing = state.catalog.find_by_slug(&slug).ok_or(AppError::NotFound)?;
    Ok(views::detail(&listing))
}

pub async fn category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Html<String> {
    let listings = state.catalog.find_by_category(&category);
    views::collection(&category, &listings)
}

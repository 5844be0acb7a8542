use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::CatalogError;
use thiserror::Error;
use tracing::error;

use crate::views;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("Changes may not have been saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(message) => AppError::BadRequest(message),
            CatalogError::NotFound(_) => AppError::NotFound,
            err @ CatalogError::Persistence { .. } => AppError::Persistence(err.to_string()),
            err @ CatalogError::Load { .. } => AppError::Internal(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, views::not_found()).into_response(),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, views::message_page("Bad Request", &message))
                    .into_response()
            }
            AppError::Persistence(message) => {
                error!("{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::message_page(
                        "Save Failed",
                        "Your changes may not have been saved. Please try again.",
                    ),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                error!("{err:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, views::server_error()).into_response()
            }
        }
    }
}

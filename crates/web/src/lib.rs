//! HTTP frontend for the listings site.
//!
//! Public pages browse the catalog; `/admin` routes are gated by the
//! `admin_token` cookie and drive the catalog mutations in `catalog-core`.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, Level};

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

use routes::{admin, items, pages};
use state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub fn build_router(state: Arc<AppState>) -> Router {
    let assets =
        ServeDir::new(&state.config.public_dir).not_found_service(pages::not_found.into_service());

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/blog", get(pages::blog))
        .route("/contact", get(pages::contact_form).post(pages::contact_submit))
        .route("/error", get(pages::forced_error))
        .route("/items", get(items::collection))
        .route("/items/:slug", get(items::detail))
        .route("/category/:category", get(items::category))
        .route("/admin", get(admin::dashboard))
        .route("/admin/login", get(admin::login_form).post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/items", post(admin::create))
        .route("/admin/items/new", get(admin::new_form))
        .route("/admin/items/:slug", post(admin::update))
        .route("/admin/items/:slug/edit", get(admin::edit_form))
        .route("/admin/items/:slug/delete", post(admin::delete))
        .fallback_service(assets)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn start_server(state: Arc<AppState>) -> Result<()> {
    if state.config.session_ttl().is_some() {
        let sessions = state.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let purged = sessions.purge_expired();
                if purged > 0 {
                    debug!("purged {purged} expired admin sessions");
                }
            }
        });
    }

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = build_router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on http://localhost:{}", listener.local_addr()?.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

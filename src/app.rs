use crate::config::{Config, MISSING_IMAGE_URL};
use crate::controller::{episodes_and_display, search_and_display, Outcome};
use crate::directory::{DirectoryApi, TvMazeClient};
use crate::render::Page;
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const MISSING_IMAGE_SVG: &str = include_str!("../static/missing-image.svg");

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn DirectoryApi>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub term: Option<String>,
    pub show: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    let client = TvMazeClient::new(config.http_timeout)
        .context("Failed to build TVMaze HTTP client")?;
    info!("Using directory at {}", client.base_url());

    let state = AppState {
        directory: Arc::new(client),
    };
    let app = build_router(state);

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fragments/shows", get(shows_fragment))
        .route("/fragments/shows/:id/episodes", get(episodes_fragment))
        .route(MISSING_IMAGE_URL, get(missing_image))
        .route("/health", get(health))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Full page. `term` runs the search trigger (an empty term is still a
/// search); `show` then runs the episode trigger for that id.
async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let mut page = Page::new();
    if let Some(term) = query.term.as_deref() {
        search_and_display(state.directory.as_ref(), &mut page, term).await;
    }
    if let Some(show_id) = query.show {
        episodes_and_display(state.directory.as_ref(), &mut page, show_id).await;
    }
    Html(page.to_document())
}

async fn shows_fragment(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let mut page = Page::new();
    let outcome = search_and_display(state.directory.as_ref(), &mut page, &query.term).await;
    fragment(outcome, page.shows.to_html())
}

async fn episodes_fragment(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut page = Page::new();
    let outcome = episodes_and_display(state.directory.as_ref(), &mut page, id).await;
    fragment(outcome, page.episodes.to_html())
}

fn fragment(outcome: Outcome, html: String) -> Response {
    let status = if outcome.is_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Html(html)).into_response()
}

async fn missing_image() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        MISSING_IMAGE_SVG,
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}

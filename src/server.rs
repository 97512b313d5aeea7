//! HTTP server: routes, handlers, and the route-level failure policy.
//!
//! ## Routes
//!
//! | Route | Page |
//! |-------|------|
//! | `GET /` | Home: slider + genre links |
//! | `GET /portfolio` | Genre overview with representative thumbnails |
//! | `GET /portfolio/{genre}` | Gallery for one active genre, 404 otherwise |
//! | `GET /about`, `GET /contact` | Static pages |
//! | `GET {static_prefix}/photos/{dir}/{file}` | Photo bytes from the photo root |
//! | `/tester/...` | Diagnostics, only with the `tester` feature |
//!
//! Anything else falls through to the not-found page.
//!
//! ## Failure Policy
//!
//! Catalog queries already degrade to empty results on filesystem errors.
//! On top of that, every page handler runs its catalog work and rendering on
//! the blocking pool; if that task fails for any reason the handler logs
//! it and answers with a short plain-text 500 instead of a fault trace.

use crate::catalog::{self, Catalog};
use crate::config::{ConfigError, PagesConfig, SiteConfig, SiteInfo};
use crate::genre::SLIDER_DIR;
use crate::render;
use crate::types::PageContext;
use axum::Router;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path as UrlPath, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Datelike;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{Instrument, error, info, info_span, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),
}

/// Failure that escaped catalog-level handling while building a page.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("page task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    settings: Arc<Settings>,
}

struct Settings {
    site: SiteInfo,
    pages: PagesConfig,
    css: String,
}

impl AppState {
    /// Build the state from a validated config.
    ///
    /// The genre table is constructed here, once, and never changes afterwards.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        let genres = Arc::new(config.genre_table()?);
        let catalog = Catalog::new(&config.photo_root, genres, &config.static_prefix);
        Ok(Self {
            catalog,
            settings: Arc::new(Settings {
                site: config.site.clone(),
                pages: config.pages.clone(),
                css: render::page_css(&config.colors),
            }),
        })
    }

    /// Run `f` with the per-request page context: current year, genre table,
    /// and the genres active right now.
    fn with_context<R>(&self, f: impl FnOnce(&PageContext) -> R) -> R {
        let active = self.catalog.active_genres();
        let ctx = PageContext {
            year: chrono::Local::now().year(),
            genres: self.catalog.genres(),
            active: &active,
            site_title: &self.settings.site.title,
            author: &self.settings.site.author,
            css: &self.settings.css,
        };
        f(&ctx)
    }
}

pub fn build_router(state: AppState) -> Router {
    let photos_route = format!(
        "{}/photos/:dir/:file",
        state.catalog.static_prefix().trim_end_matches('/')
    );

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/portfolio", get(portfolio_handler))
        .route("/portfolio/:genre", get(genre_handler))
        .route("/about", get(about_handler))
        .route("/contact", get(contact_handler))
        .route(&photos_route, get(photo_handler));

    #[cfg(feature = "tester")]
    let router = {
        info!("tester registered under /tester");
        router.nest("/tester", crate::tester::router())
    };
    #[cfg(not(feature = "tester"))]
    info!("tester not registered: built without the `tester` feature");

    router
        .fallback(not_found_handler)
        .layer(middleware::from_fn(log_request_timing))
        .with_state(state)
}

/// Bind `addr` and serve until SIGINT/SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("folio listening on {addr}");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("cannot register signal handlers, waiting for ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}

async fn log_request_timing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!("http.request", method = %method, path = %path);

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed = start.elapsed();

    info!(
        parent: &span,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "request {path} took {:.2}s",
        elapsed.as_secs_f64()
    );
    response
}

// ============================================================================
// Page plumbing
// ============================================================================

/// Build a page on the blocking pool, converting any escaped failure into a
/// plain-text 500 carrying `failure_text`.
async fn page<F>(state: AppState, route: &'static str, failure_text: &'static str, build: F) -> Response
where
    F: FnOnce(&AppState) -> Response + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || build(&state))
        .await
        .map_err(PageError::from);
    match result {
        Ok(response) => response,
        Err(e) => {
            error!(route, "{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, failure_text).into_response()
        }
    }
}

fn not_found_page(state: &AppState) -> Response {
    let markup = state.with_context(render::render_not_found);
    (StatusCode::NOT_FOUND, markup).into_response()
}

/// Read an optional markdown page body; unreadable files fall back to `None`.
fn read_page_body(path: Option<&str>, page: &str) -> Option<String> {
    let path = PathBuf::from(path?);
    match fs::read_to_string(&path) {
        Ok(body) => Some(body),
        Err(e) => {
            error!(page, path = %path.display(), "cannot read page body: {e}");
            None
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn index_handler(State(state): State<AppState>) -> Response {
    page(state, "index", "Error loading page", |state| {
        let slider = state.catalog.slider_images();
        state
            .with_context(|ctx| render::render_home(ctx, &slider))
            .into_response()
    })
    .await
}

async fn portfolio_handler(State(state): State<AppState>) -> Response {
    page(state, "portfolio", "Error loading portfolio", |state| {
        let entries = state.catalog.portfolio_overview();
        state
            .with_context(|ctx| render::render_portfolio(ctx, &entries))
            .into_response()
    })
    .await
}

/// Gallery for one active genre. A segment that fails to decode is treated
/// like any other unknown genre.
async fn genre_handler(
    State(state): State<AppState>,
    genre: Result<UrlPath<String>, PathRejection>,
) -> Response {
    let Ok(UrlPath(genre)) = genre else {
        return page(state, "portfolio_genre", "Error loading genre", not_found_page).await;
    };
    page(state, "portfolio_genre", "Error loading genre", move |state| {
        state.with_context(|ctx| {
            if !ctx.active.iter().any(|g| *g == genre) {
                return (StatusCode::NOT_FOUND, render::render_not_found(ctx)).into_response();
            }
            let images = state.catalog.genre_image_urls(&genre);
            render::render_genre(ctx, &genre, &images).into_response()
        })
    })
    .await
}

async fn about_handler(State(state): State<AppState>) -> Response {
    page(state, "about", "Error loading about", |state| {
        let body = read_page_body(state.settings.pages.about.as_deref(), "about");
        state
            .with_context(|ctx| render::render_about(ctx, body.as_deref()))
            .into_response()
    })
    .await
}

async fn contact_handler(State(state): State<AppState>) -> Response {
    page(state, "contact", "Error loading contact", |state| {
        let body = read_page_body(state.settings.pages.contact.as_deref(), "contact");
        let email = state.settings.site.email.as_deref();
        state
            .with_context(|ctx| render::render_contact(ctx, body.as_deref(), email))
            .into_response()
    })
    .await
}

async fn not_found_handler(State(state): State<AppState>) -> Response {
    page(state, "not_found", "Error loading page", not_found_page).await
}

/// Serve a photo file from `main/` or a known genre directory.
async fn photo_handler(
    State(state): State<AppState>,
    segments: Result<UrlPath<(String, String)>, PathRejection>,
) -> Response {
    let Ok(UrlPath((dir, file))) = segments else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let known_dir = dir == SLIDER_DIR || state.catalog.genres().contains(&dir);
    if !known_dir || !catalog::is_plain_segment(&file) || !catalog::has_image_extension(&file) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.catalog.root().join(&dir).join(&file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::IsADirectory) => {
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            error!(path = %path.display(), "cannot read photo: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading photo").into_response()
        }
    }
}

/// MIME type for an allowed image filename.
fn content_type(file: &str) -> &'static str {
    let ext = std::path::Path::new(file)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

//! Diagnostic sub-router mounted under `/tester`.
//!
//! Compiled only with the `tester` feature. The main site never depends on
//! it: without the feature, `/tester` paths are ordinary 404s.

use crate::genre::GenreTable;
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

/// Snapshot of what the catalog sees on disk right now.
#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub photo_root: String,
    pub genres: GenreTable,
    pub active: Vec<ActiveGenre>,
    pub slider_images: usize,
}

#[derive(Debug, Serialize)]
pub struct ActiveGenre {
    pub id: &'static str,
    pub images: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report_handler))
        .route("/health", get(|| async { "ok" }))
}

/// Build the report with the same catalog queries the pages use.
pub fn catalog_report(state: &AppState) -> CatalogReport {
    let catalog = &state.catalog;
    CatalogReport {
        photo_root: catalog.root().display().to_string(),
        genres: catalog.genres().clone(),
        active: catalog
            .active_genres()
            .into_iter()
            .map(|id| ActiveGenre {
                id,
                images: catalog.images_in_genre(id).len(),
            })
            .collect(),
        slider_images: catalog.slider_images().len(),
    }
}

async fn report_handler(State(state): State<AppState>) -> Response {
    match tokio::task::spawn_blocking(move || catalog_report(&state)).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            error!(route = "tester", "report task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading report").into_response()
        }
    }
}

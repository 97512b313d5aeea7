//! # Folio
//!
//! A small web server for a photographer's portfolio. The filesystem is the
//! data source: each genre is a folder under the photo root, the folder
//! `main` feeds the home page slider, and pages are rendered on every request
//! so new photos show up without a restart.
//!
//! # Request Flow
//!
//! ```text
//! request → server (route, spawn_blocking)
//!         → catalog (read photo root, degrade on errors)
//!         → render (Maud page with nav, header, footer)
//!         → response
//! ```
//!
//! Nothing is cached between requests. A genre appears in the navigation
//! exactly when its folder exists at the moment the page is built.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`genre`] | Fixed genre table (id → display label) and the slider folder name |
//! | [`catalog`] | Photo root queries: active genres, image listings, portfolio overview |
//! | [`urls`] | Public URLs for photo files under the static prefix |
//! | [`render`] | Maud templates for every page, embedded CSS and slider script |
//! | [`server`] | Axum router, handlers, request timing, graceful shutdown |
//! | `tester` | Diagnostic routes under `/tester` (feature `tester`) |
//! | [`config`] | `folio.toml` loading, validation, stock defaults, color CSS |
//! | [`inventory`] | Content inventory behind `folio check` |
//! | [`output`] | CLI formatting of the inventory |
//! | [`types`] | Shared view types passed from catalog to templates |
//!
//! # Design Decisions
//!
//! ## Filesystem Over Database
//!
//! Photographers manage the site by copying files into folders. There is no
//! upload form, no index file, no metadata store. Images are ordered by
//! filename, compared byte-wise, so `01-bridge.jpg` sorts before `02-dock.jpg`
//! and uppercase names sort before lowercase ones.
//!
//! ## Degrade, Don't Fail
//!
//! A missing or unreadable photo root is not fatal. Catalog queries log the
//! error and return empty results, so the site keeps serving its pages with
//! no photos instead of 500s. Only a failure of the page task itself turns
//! into a short plain-text 500.
//!
//! ## Maud Over Template Engines
//!
//! Pages are built with [Maud](https://maud.lambda.xyz/), so templates are
//! type-checked at compile time and every interpolation is escaped. The
//! stylesheet and slider script are compiled into the binary; the only files
//! served from disk are the photos.

pub mod catalog;
pub mod config;
pub mod genre;
pub mod inventory;
pub mod output;
pub mod render;
pub mod server;
#[cfg(feature = "tester")]
pub mod tester;
pub mod types;
pub mod urls;

pub use server::{AppState, build_router, serve};

#[cfg(test)]
pub(crate) mod test_helpers;

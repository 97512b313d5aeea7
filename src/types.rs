//! Shared types passed from the catalog and server into page rendering.

use crate::genre::GenreTable;
use serde::Serialize;

/// One genre card on the portfolio overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    pub genre: &'static str,
    /// URL of the first image by sort order; `None` for a genre with no images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Values injected into every rendered page for navigation and footer.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Current calendar year, shown in the footer.
    pub year: i32,
    /// Full identifier → label mapping, including inactive genres.
    pub genres: &'a GenreTable,
    /// Genres whose directory currently exists.
    pub active: &'a [&'static str],
    pub site_title: &'a str,
    pub author: &'a str,
    /// CSS served inline in every page.
    pub css: &'a str,
}

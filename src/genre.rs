//! The fixed set of photo genres.
//!
//! Genres are known at compile time: each identifier doubles as the name of
//! its directory under the photo root. A genre is *active* when that directory
//! exists, which is decided per request by [`crate::catalog`]. This module only
//! holds the identifier → label mapping.
//!
//! ```text
//! landscapes  → Landscapes
//! portraits   → Portraits
//! subject     → Still life
//! city        → City
//! other       → Other
//! ```
//!
//! The table is built once at startup (optionally with relabelled entries
//! from `folio.toml`) and shared read-only for the life of the process.
//! Identifiers and their order never change.

use serde::Serialize;
use std::collections::BTreeMap;

/// Name of the photo-root subdirectory that feeds the home page slider.
pub const SLIDER_DIR: &str = "main";

const BUILTIN: [(&str, &str); 5] = [
    ("landscapes", "Landscapes"),
    ("portraits", "Portraits"),
    ("subject", "Still life"),
    ("city", "City"),
    ("other", "Other"),
];

/// A genre identifier paired with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: &'static str,
    pub label: String,
}

/// Immutable, ordered identifier → label mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenreTable {
    genres: Vec<Genre>,
}

impl Default for GenreTable {
    fn default() -> Self {
        Self {
            genres: BUILTIN
                .iter()
                .map(|&(id, label)| Genre {
                    id,
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

impl GenreTable {
    /// Built-in table with labels replaced for the given identifiers.
    ///
    /// Returns the first identifier that is not a known genre as the error.
    pub fn with_labels(overrides: &BTreeMap<String, String>) -> Result<Self, String> {
        let mut table = Self::default();
        for (id, label) in overrides {
            let genre = table
                .genres
                .iter_mut()
                .find(|g| g.id == id.as_str())
                .ok_or_else(|| id.clone())?;
            genre.label = label.clone();
        }
        Ok(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.genres.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.genres.iter().map(|g| g.id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.genres.iter().any(|g| g.id == id)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

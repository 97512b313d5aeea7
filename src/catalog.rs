//! Content catalog: genres and images discovered from the photo root.
//!
//! The photo root is the only source of content. Nothing is cached; every
//! query re-reads the directory tree, so adding or removing a folder shows
//! up on the next page load.
//!
//! ## Directory Structure
//!
//! ```text
//! static/photos/              # Photo root
//! ├── main/                   # Home page slider
//! │   └── 1.jpg
//! ├── landscapes/             # Genre (active because the directory exists)
//! │   ├── A.JPG
//! │   ├── b.png
//! │   └── note.txt            # Ignored: not an image extension
//! ├── portraits/              # Active but empty: listed, no thumbnail
//! └── travel/                 # Ignored: not a known genre
//! ```
//!
//! ## Queries
//!
//! - [`Catalog::active_genres`]: known genres whose directory exists, in the
//!   static order of the [`GenreTable`]
//! - [`Catalog::images_in_genre`]: image filenames in a genre, sorted ascending
//! - [`Catalog::slider_images`]: asset URLs for the images in `main/`
//! - [`Catalog::portfolio_overview`]: active genres with their representative
//!   thumbnail (the first image by sort order)
//!
//! ## Failure Policy
//!
//! Queries never return an error. A filesystem failure while scanning is
//! logged with the name of the failing query and the query answers with an
//! empty list, so pages render with "no content" instead of failing.

use crate::genre::{GenreTable, SLIDER_DIR};
use crate::types::PortfolioEntry;
use crate::urls;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("photo root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),
}

impl CatalogError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
            Self::RootNotADirectory(path) => path,
        }
    }
}

/// Allowed image extensions, compared against the lowercased file extension.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Read-only view of the photo root.
///
/// Holds no state besides its configuration; cloning is cheap.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    genres: Arc<GenreTable>,
    static_prefix: String,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>, genres: Arc<GenreTable>, static_prefix: &str) -> Self {
        Self {
            root: root.into(),
            genres,
            static_prefix: static_prefix.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    /// Known genres whose directory currently exists, in static table order.
    pub fn active_genres(&self) -> Vec<&'static str> {
        self.try_active_genres()
            .unwrap_or_else(|e| degrade("list_active_genres", &e))
    }

    /// Sorted image filenames in a genre directory.
    ///
    /// A missing directory is not an error and yields an empty list. The
    /// identifier is not checked against the genre table here.
    pub fn images_in_genre(&self, genre: &str) -> Vec<String> {
        self.try_list_images(genre)
            .unwrap_or_else(|e| degrade("images_in_genre", &e))
    }

    /// Asset URLs for the slider images in `main/`, sorted by filename.
    pub fn slider_images(&self) -> Vec<String> {
        match self.try_list_images(SLIDER_DIR) {
            Ok(files) => files
                .iter()
                .map(|f| urls::photo_url(&self.static_prefix, SLIDER_DIR, f))
                .collect(),
            Err(e) => degrade("list_slider_images", &e),
        }
    }

    /// Asset URLs for every image in a genre, in listing order.
    pub fn genre_image_urls(&self, genre: &str) -> Vec<String> {
        self.images_in_genre(genre)
            .iter()
            .map(|f| urls::photo_url(&self.static_prefix, genre, f))
            .collect()
    }

    /// Every active genre paired with its representative thumbnail.
    ///
    /// The thumbnail is the first image in sort order. Empty genres are
    /// still listed, with no thumbnail.
    pub fn portfolio_overview(&self) -> Vec<PortfolioEntry> {
        self.active_genres()
            .into_iter()
            .map(|genre| {
                let thumbnail = self
                    .images_in_genre(genre)
                    .first()
                    .map(|f| urls::photo_url(&self.static_prefix, genre, f));
                PortfolioEntry { genre, thumbnail }
            })
            .collect()
    }

    fn try_active_genres(&self) -> Result<Vec<&'static str>, CatalogError> {
        let meta = fs::metadata(&self.root).map_err(|e| CatalogError::io(&self.root, e))?;
        if !meta.is_dir() {
            return Err(CatalogError::RootNotADirectory(self.root.clone()));
        }

        let mut active = Vec::new();
        for id in self.genres.ids() {
            let dir = self.root.join(id);
            match fs::metadata(&dir) {
                Ok(m) if m.is_dir() => active.push(id),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(CatalogError::io(&dir, e)),
            }
        }
        Ok(active)
    }

    fn try_list_images(&self, dir_name: &str) -> Result<Vec<String>, CatalogError> {
        if !is_plain_segment(dir_name) {
            debug!(dir = dir_name, "refusing to list a non-segment directory name");
            return Ok(Vec::new());
        }

        let dir = self.root.join(dir_name);
        match fs::metadata(&dir) {
            Ok(m) if m.is_dir() => {}
            Ok(_) => return Ok(Vec::new()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogError::io(&dir, e)),
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| CatalogError::io(&dir, e))? {
            let entry = entry.map_err(|e| CatalogError::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %path.display(), "skipping non UTF-8 filename");
                continue;
            };
            if has_image_extension(&name) {
                files.push(name);
            }
        }

        files.sort();
        Ok(files)
    }
}

fn degrade<T>(operation: &str, err: &CatalogError) -> Vec<T> {
    error!(operation, path = %err.path().display(), "catalog scan failed: {err}");
    Vec::new()
}

/// Whether a filename carries one of the allowed image extensions.
///
/// Only the extension is checked; file content is never inspected.
pub fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// A name that can be joined onto a directory without escaping it.
pub fn is_plain_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

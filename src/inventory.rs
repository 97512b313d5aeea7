//! Content inventory for `folio check`.
//!
//! Collects what the site would show right now, using the same catalog
//! queries as the pages, plus a walk over the photo root to find entries the
//! site ignores (unknown folders, non-image files).

use crate::catalog::{self, Catalog};
use crate::genre::SLIDER_DIR;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Inventory {
    pub root: PathBuf,
    /// Whether the photo root exists and is a directory.
    pub root_ok: bool,
    /// Every known genre in static order, active or not.
    pub genres: Vec<GenreStatus>,
    /// Slider image filenames.
    pub slider: Vec<String>,
    /// Paths relative to the root that the site never shows; directories
    /// end in `/`.
    pub ignored: Vec<String>,
}

#[derive(Debug)]
pub struct GenreStatus {
    pub id: &'static str,
    pub label: String,
    pub active: bool,
    pub images: Vec<String>,
}

pub fn take_inventory(catalog: &Catalog) -> Inventory {
    let root = catalog.root();
    let active = catalog.active_genres();

    let genres = catalog
        .genres()
        .iter()
        .map(|g| {
            let is_active = active.contains(&g.id);
            GenreStatus {
                id: g.id,
                label: g.label.clone(),
                active: is_active,
                images: if is_active {
                    catalog.images_in_genre(g.id)
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    Inventory {
        root: root.to_path_buf(),
        root_ok: root.is_dir(),
        genres,
        slider: catalog.images_in_genre(SLIDER_DIR),
        ignored: ignored_entries(catalog),
    }
}

/// Entries under the root that no page will ever reference.
fn ignored_entries(catalog: &Catalog) -> Vec<String> {
    let root = catalog.root();
    let mut ignored = Vec::new();

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cannot inspect photo root entry: {e}");
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy();
        let is_dir = entry.file_type().is_dir();
        let rel = relative(root, entry.path(), is_dir);

        if entry.depth() == 1 {
            let known = name == SLIDER_DIR || catalog.genres().contains(&name);
            if !is_dir || !known {
                if is_dir {
                    walker.skip_current_dir();
                }
                ignored.push(rel);
            }
        } else if !entry.path().is_file() || !catalog::has_image_extension(&name) {
            ignored.push(rel);
        }
    }

    ignored
}

fn relative(root: &Path, path: &Path, is_dir: bool) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path).display().to_string();
    if is_dir { format!("{rel}/") } else { rel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn inventory_of_fixtures() {
        let tmp = setup_fixtures();
        let inventory = take_inventory(&catalog_for(tmp.path()));

        assert!(inventory.root_ok);
        let active: Vec<&str> = inventory
            .genres
            .iter()
            .filter(|g| g.active)
            .map(|g| g.id)
            .collect();
        assert_eq!(active, vec!["landscapes", "portraits", "city"]);
        assert_eq!(inventory.genres.len(), 5);
        assert_eq!(inventory.genres[0].images, vec!["A.JPG", "b.png"]);
        assert_eq!(inventory.slider, vec!["1.jpg"]);
    }

    #[test]
    fn ignored_entries_cover_unknown_dirs_and_non_images() {
        let tmp = setup_fixtures();
        let inventory = take_inventory(&catalog_for(tmp.path()));

        let ignored = &inventory.ignored;
        assert!(ignored.contains(&"landscapes/note.txt".to_string()));
        assert!(ignored.contains(&"portraits/.keep".to_string()));
        assert!(ignored.contains(&"travel/".to_string()));
        // Contents of an unknown directory are not listed one by one
        assert!(!ignored.contains(&"travel/x.jpg".to_string()));
        assert!(!ignored.contains(&"main/1.jpg".to_string()));
    }

    #[test]
    fn stray_file_at_root_is_ignored() {
        let tmp = photo_root(&[("city", &["a.jpg"])]);
        std::fs::write(tmp.path().join("cover.jpg"), "fake image").unwrap();
        let inventory = take_inventory(&catalog_for(tmp.path()));

        assert_eq!(inventory.ignored, vec!["cover.jpg"]);
    }

    #[test]
    fn missing_root_gives_empty_inventory() {
        let tmp = photo_root(&[]);
        let inventory = take_inventory(&catalog_for(&tmp.path().join("gone")));

        assert!(!inventory.root_ok);
        assert!(inventory.genres.iter().all(|g| !g.active));
        assert!(inventory.slider.is_empty());
        assert!(inventory.ignored.is_empty());
    }
}

//! Shared test utilities for the folio test suite.
//!
//! Builds throwaway photo roots on disk. Image files are written as short
//! text blobs: the catalog only looks at extensions, so no real image
//! bytes are needed.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = photo_root(&[
//!     ("landscapes", &["b.png", "A.JPG", "note.txt"]),
//!     ("main", &["1.jpg"]),
//! ]);
//! let catalog = catalog_for(tmp.path());
//! assert_eq!(catalog.images_in_genre("landscapes"), vec!["A.JPG", "b.png"]);
//! ```

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use crate::catalog::Catalog;
use crate::genre::GenreTable;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/photos/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/photos");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Create a photo root with the given directories and files.
///
/// Each entry is `(directory, files)`. Use `&[]` for an empty directory.
pub fn photo_root(layout: &[(&str, &[&str])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (dir, files) in layout {
        let dir_path = tmp.path().join(dir);
        std::fs::create_dir_all(&dir_path).unwrap();
        for file in *files {
            std::fs::write(dir_path.join(file), "fake image").unwrap();
        }
    }
    tmp
}

/// Catalog over `root` with the built-in genre table and `/static` prefix.
pub fn catalog_for(root: &Path) -> Catalog {
    Catalog::new(root, Arc::new(GenreTable::default()), "/static")
}

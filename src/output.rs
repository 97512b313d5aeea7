//! CLI output formatting for `folio check`.
//!
//! # Information-First Display
//!
//! Each genre leads with its positional index and display label. The folder
//! it comes from is secondary context on an indented `Source:` line, so the
//! output reads as a content inventory of the site while still pointing back
//! at the filesystem.
//!
//! # Output Format
//!
//! ```text
//! Photo root: static/photos
//!
//! Genres
//! 001 Landscapes (2 photos)
//!     Source: landscapes/
//!     001 A.JPG
//!     002 b.png
//! 002 Portraits (0 photos)
//!     Source: portraits/
//! 003 Still life (not shown)
//!     Source: subject/
//!
//! Slider (1 photos)
//!     001 1.jpg
//!
//! Ignored
//!     landscapes/note.txt
//!     travel/
//! ```
//!
//! # Architecture
//!
//! [`format_check_output`] returns `Vec<String>` for testability and
//! [`print_check_output`] writes it to stdout. Formatting does no I/O.

use crate::inventory::Inventory;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Genre header: index + label, then either a photo count or `not shown`.
///
/// ```text
/// 001 Landscapes (5 photos)
/// 003 Still life (not shown)
/// ```
fn genre_header(index: usize, label: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({} photos)", format_index(index), label, n),
        None => format!("{} {} (not shown)", format_index(index), label),
    }
}

fn image_list(lines: &mut Vec<String>, depth: usize, files: &[String]) {
    for (i, file) in files.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(depth), format_index(i + 1), file));
    }
}

// ============================================================================
// Check output
// ============================================================================

pub fn format_check_output(inventory: &Inventory) -> Vec<String> {
    let mut lines = Vec::new();

    let root = inventory.root.display();
    if inventory.root_ok {
        lines.push(format!("Photo root: {root}"));
    } else {
        lines.push(format!("Photo root: {root} (missing, site will show no photos)"));
    }

    lines.push(String::new());
    lines.push("Genres".to_string());
    for (i, genre) in inventory.genres.iter().enumerate() {
        let count = genre.active.then_some(genre.images.len());
        lines.push(genre_header(i + 1, &genre.label, count));
        lines.push(format!("{}Source: {}/", indent(1), genre.id));
        image_list(&mut lines, 1, &genre.images);
    }

    lines.push(String::new());
    lines.push(format!("Slider ({} photos)", inventory.slider.len()));
    image_list(&mut lines, 1, &inventory.slider);

    if !inventory.ignored.is_empty() {
        lines.push(String::new());
        lines.push("Ignored".to_string());
        for path in &inventory.ignored {
            lines.push(format!("{}{}", indent(1), path));
        }
    }

    lines
}

pub fn print_check_output(inventory: &Inventory) {
    for line in format_check_output(inventory) {
        println!("{}", line);
    }
}

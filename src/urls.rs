//! Static asset URL construction.
//!
//! Photos are served from `<static_prefix>/photos/<dir>/<file>`, where `<dir>`
//! is either a genre identifier or the slider directory. Filenames come
//! straight from disk, so every segment is percent-encoded before it lands in
//! an `href` or `src` attribute.

/// Build the public URL for a photo file.
///
/// - `("/static", "main", "1.jpg")` → `/static/photos/main/1.jpg`
/// - `("/static/", "city", "night bus.jpg")` → `/static/photos/city/night%20bus.jpg`
/// - `("", "other", "a.png")` → `/photos/other/a.png`
pub fn photo_url(static_prefix: &str, dir: &str, file: &str) -> String {
    format!(
        "{}/photos/{}/{}",
        static_prefix.trim_end_matches('/'),
        encode_segment(dir),
        encode_segment(file)
    )
}

/// Percent-encode a single path segment.
///
/// RFC 3986 unreserved characters pass through; every other byte of the
/// UTF-8 encoding becomes `%XX`.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_url_is_rooted_at_photos_main() {
        assert_eq!(photo_url("/static", "main", "1.jpg"), "/static/photos/main/1.jpg");
    }

    #[test]
    fn trailing_slash_on_prefix_is_trimmed() {
        assert_eq!(photo_url("/static/", "city", "a.png"), "/static/photos/city/a.png");
    }

    #[test]
    fn empty_prefix() {
        assert_eq!(photo_url("", "other", "a.png"), "/photos/other/a.png");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(
            photo_url("/static", "landscapes", "A.JPG"),
            "/static/photos/landscapes/A.JPG"
        );
    }

    #[test]
    fn spaces_and_reserved_characters_are_encoded() {
        assert_eq!(encode_segment("night bus.jpg"), "night%20bus.jpg");
        assert_eq!(encode_segment("a#b?c.png"), "a%23b%3Fc.png");
        assert_eq!(encode_segment("50%.gif"), "50%25.gif");
    }

    #[test]
    fn non_ascii_is_encoded_as_utf8_bytes() {
        assert_eq!(encode_segment("é.jpg"), "%C3%A9.jpg");
    }
}

//! Site configuration module.
//!
//! Handles loading, validating, and merging `folio.toml`. Stock defaults are
//! the base layer; the user file overrides only the keys it names, and CLI
//! flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! photo_root = "static/photos"  # Directory holding main/ and the genre folders
//! static_prefix = "/static"     # URL prefix for photo assets
//!
//! [server]
//! bind = "0.0.0.0:8081"
//!
//! [site]
//! title = "Portfolio"
//! author = "Photographer"
//! # email = "hello@example.com"   # Shown on the contact page
//!
//! [genres]                      # Display label overrides (known genres only)
//! # landscapes = "Пейзажи"
//!
//! [pages]                       # Optional markdown bodies
//! # about = "pages/about.md"
//! # contact = "pages/contact.md"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"        # Nav, footer, captions
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Genre identifiers are
//! fixed in code; `[genres]` can relabel them but not add new ones.

use crate::genre::GenreTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `folio.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding `main/` and one subdirectory per genre.
    pub photo_root: String,
    /// URL prefix under which `photos/...` assets are served.
    pub static_prefix: String,
    pub server: ServerConfig,
    pub site: SiteInfo,
    /// Display label overrides keyed by genre identifier.
    pub genres: BTreeMap<String, String>,
    pub pages: PagesConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            photo_root: "static/photos".to_string(),
            static_prefix: "/static".to_string(),
            server: ServerConfig::default(),
            site: SiteInfo::default(),
            genres: BTreeMap::new(),
            pages: PagesConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photo_root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "photo_root must not be empty".into(),
            ));
        }
        if !self.static_prefix.is_empty() && !self.static_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "static_prefix must be empty or start with '/'".into(),
            ));
        }
        if self.static_prefix.contains([':', '*', '{', '}', '?']) {
            return Err(ConfigError::Validation(format!(
                "static_prefix must not contain ':', '*', '{{', '}}' or '?': {}",
                self.static_prefix
            )));
        }
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        if let Some((id, _)) = self.genres.iter().find(|(_, label)| label.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "genres.{id} label must not be empty"
            )));
        }
        self.genre_table()?;
        Ok(())
    }

    /// The built-in genre table with this config's label overrides applied.
    pub fn genre_table(&self) -> Result<GenreTable, ConfigError> {
        GenreTable::with_labels(&self.genres).map_err(|id| {
            ConfigError::Validation(format!("genres.{id} is not a known genre"))
        })
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Identity shown in the header and footer of every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub author: String,
    /// Contact address shown on the contact page.
    pub email: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: "Photographer".to_string(),
            email: None,
        }
    }
}

/// Optional markdown files for the about and contact pages.
///
/// Files are read on every request, like the photo root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    pub about: Option<String>,
    pub contact: Option<String>,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted/secondary text color (nav, footer, captions).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults if it is missing.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// Load config from `path`, which must exist.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    match load_raw_config(path)? {
        Some(overlay) => resolve_config(stock_defaults_value(), Some(overlay)),
        None => Err(ConfigError::NotFound(path.to_path_buf())),
    }
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory holding main/ (home page slider) and one folder per genre:
#   landscapes/ portraits/ subject/ city/ other/
# A genre appears on the site as soon as its folder exists.
photo_root = "static/photos"

# URL prefix for photo assets: <static_prefix>/photos/<genre>/<file>
static_prefix = "/static"

# ---------------------------------------------------------------------------
# Server
# ---------------------------------------------------------------------------
[server]
bind = "0.0.0.0:8081"

# ---------------------------------------------------------------------------
# Site identity (header, footer, contact page)
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
author = "Photographer"
# email = "hello@example.com"

# ---------------------------------------------------------------------------
# Genre labels
# ---------------------------------------------------------------------------
# Relabel the built-in genres. Identifiers are fixed; only labels change.
[genres]
# landscapes = "Landscapes"
# portraits = "Portraits"
# subject = "Still life"
# city = "City"
# other = "Other"

# ---------------------------------------------------------------------------
# Page bodies
# ---------------------------------------------------------------------------
# Markdown files for the about and contact pages. Read on every request.
[pages]
# about = "pages/about.md"
# contact = "pages/contact.md"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Nav, footer, captions
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.photo_root, "static/photos");
        assert_eq!(config.static_prefix, "/static");
        assert_eq!(config.server.bind, "0.0.0.0:8081");
        assert!(config.genres.is_empty());
        assert!(config.pages.about.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
photo_root = "/srv/photos"

[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.photo_root, "/srv/photos");
        assert_eq!(config.colors.light.background, "#fafafa");
        // Default values preserved
        assert_eq!(config.colors.light.text, "#111111");
        assert_eq!(config.static_prefix, "/static");
        assert_eq!(config.site.title, "Portfolio");
    }

    #[test]
    fn parse_genre_labels() {
        let toml = r#"
[genres]
landscapes = "Пейзажи"
subject = "Предметная"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let table = config.genre_table().unwrap();
        assert_eq!(table.label("landscapes"), Some("Пейзажи"));
        assert_eq!(table.label("subject"), Some("Предметная"));
        assert_eq!(table.label("city"), Some("City"));
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(DEFAULT_CONFIG_FILE)).unwrap();

        assert_eq!(config.photo_root, "static/photos");
        assert_eq!(config.colors.dark.background, "#0a0a0a");
    }

    #[test]
    fn load_config_file_requires_existing_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_config_file(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r##"
static_prefix = "/assets"

[server]
bind = "127.0.0.1:9000"

[site]
title = "Anna Petrova"
email = "anna@example.com"
"##,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.static_prefix, "/assets");
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.site.title, "Anna Petrova");
        assert_eq!(config.site.email.as_deref(), Some("anna@example.com"));
        // Unspecified values should be defaults
        assert_eq!(config.site.author, "Photographer");
        assert_eq!(config.photo_root, "static/photos");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"photo_root = "a""#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"photo_root = "b""#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["photo_root"].as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[site]
title = "T"
author = "A"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[site]
author = "B"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["site"]["title"].as_str(), Some("T"));
        assert_eq!(merged["site"]["author"].as_str(), Some("B"));
    }

    #[test]
    fn merge_onto_stock_defaults() {
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.dark]
background = "#000000"
"##,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.colors.dark.background, "#000000");
        assert_eq!(config.colors.dark.text, "#eeeeee");
        assert_eq!(config.server.bind, "0.0.0.0:8081");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(r#"photo_dir = "x""#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
[server]
port = 80
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_genre_label_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
[genres]
macro = "Macro"
"#,
        )
        .unwrap();

        let result = load_config(&path);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("macro"))
        );
    }

    #[test]
    fn validate_empty_label() {
        let mut config = SiteConfig::default();
        config.genres.insert("city".into(), "  ".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_static_prefix() {
        let mut config = SiteConfig::default();
        config.static_prefix = "static".into();
        assert!(config.validate().is_err());
        config.static_prefix = String::new();
        assert!(config.validate().is_ok());
        for prefix in ["/a*b", "/:x", "/{x}", "/a?b"] {
            config.static_prefix = prefix.into();
            assert!(config.validate().is_err(), "{prefix} accepted");
        }
        config.static_prefix = "/assets/v2".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_bind_address() {
        let mut config = SiteConfig::default();
        config.server.bind = "localhost".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.photo_root, defaults.photo_root);
        assert_eq!(config.server.bind, defaults.server.bind);
        assert_eq!(config.colors.light.background, defaults.colors.light.background);
        assert!(config.genres.is_empty());
        assert!(config.validate().is_ok());
    }
}

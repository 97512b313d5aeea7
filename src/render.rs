//! HTML page rendering.
//!
//! Every page shares one layout: a header with the site title and navigation,
//! the page body, and a footer carrying the current year. Navigation lists
//! the *active* genres only, labelled through the genre table, so a genre
//! shows up in the menu exactly when its folder exists.
//!
//! ## Pages
//!
//! - **Home** (`/`): rotating slider fed from `main/`, plus genre links
//! - **Portfolio** (`/portfolio`): one card per active genre with its
//!   representative thumbnail (or a placeholder when the genre is empty)
//! - **Genre** (`/portfolio/{genre}`): every image of one genre
//! - **About** / **Contact**: markdown body or a built-in fallback text
//! - **Not found**: shared 404 body
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/slider.js`: Slide rotation for the home page
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated values are escaped.

use crate::config::{self, ColorConfig};
use crate::types::{PageContext, PortfolioEntry};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const SLIDER_JS: &str = include_str!("../static/slider.js");

const ABOUT_FALLBACK: &str = "Photographs of landscapes, people, objects and cities.";
const CONTACT_FALLBACK: &str = "Get in touch about prints, commissions or collaborations.";

/// Full stylesheet: color variables from config followed by the base sheet.
pub fn page_css(colors: &ColorConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(colors), CSS_STATIC)
}

/// Convert markdown to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, ctx: &PageContext, current_path: &str, content: Markup) -> Markup {
    let page_title = if title.is_empty() {
        ctx.site_title.to_string()
    } else {
        format!("{} · {}", title, ctx.site_title)
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                style { (PreEscaped(ctx.css)) }
            }
            body {
                (site_header(ctx, current_path))
                (content)
                (site_footer(ctx))
            }
        }
    }
}

/// Renders the site header with title and navigation
fn site_header(ctx: &PageContext, current_path: &str) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (ctx.site_title) }
            nav.site-nav {
                (render_nav(ctx, current_path))
            }
        }
    }
}

/// Renders the navigation menu: fixed pages plus one link per active genre.
pub fn render_nav(ctx: &PageContext, current_path: &str) -> Markup {
    html! {
        ul {
            (nav_link("/", "Home", current_path))
            (nav_link("/portfolio", "Portfolio", current_path))
            @for genre in ctx.active {
                @let href = format!("/portfolio/{genre}");
                (nav_link(&href, genre_label(ctx, genre), current_path))
            }
            (nav_link("/about", "About", current_path))
            (nav_link("/contact", "Contact", current_path))
        }
    }
}

fn nav_link(href: &str, label: &str, current_path: &str) -> Markup {
    let is_current = href == current_path;
    html! {
        li class=[is_current.then_some("current")] {
            a href=(href) { (label) }
        }
    }
}

fn site_footer(ctx: &PageContext) -> Markup {
    html! {
        footer.site-footer {
            "© " (ctx.year) " " (ctx.author)
        }
    }
}

/// Display label for a genre; falls back to the identifier.
fn genre_label<'a>(ctx: &'a PageContext, genre: &'a str) -> &'a str {
    ctx.genres.label(genre).unwrap_or(genre)
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with the slider and genre links
pub fn render_home(ctx: &PageContext, slider: &[String]) -> Markup {
    let content = html! {
        main.home-page {
            @if !slider.is_empty() {
                div.slider {
                    @for (idx, src) in slider.iter().enumerate() {
                        img class=[(idx == 0).then_some("active")] src=(src) alt={ "Slide " (idx + 1) };
                    }
                }
                @if slider.len() > 1 {
                    script { (PreEscaped(SLIDER_JS)) }
                }
            }
            @if !ctx.active.is_empty() {
                ul.genre-links {
                    @for genre in ctx.active {
                        li {
                            a href={ "/portfolio/" (genre) } { (genre_label(ctx, genre)) }
                        }
                    }
                }
            }
        }
    };

    base_document("", ctx, "/", content)
}

/// Renders the portfolio overview with one card per active genre
pub fn render_portfolio(ctx: &PageContext, entries: &[PortfolioEntry]) -> Markup {
    let content = html! {
        main.portfolio-page {
            h1 { "Portfolio" }
            div.genre-grid {
                @for entry in entries {
                    @let label = genre_label(ctx, entry.genre);
                    a.genre-card href={ "/portfolio/" (entry.genre) } {
                        @if let Some(thumb) = &entry.thumbnail {
                            img src=(thumb) alt=(label) loading="lazy";
                        } @else {
                            div.placeholder {}
                        }
                        span.genre-title { (label) }
                    }
                }
            }
        }
    };

    base_document("Portfolio", ctx, "/portfolio", content)
}

/// Renders a single genre gallery
pub fn render_genre(ctx: &PageContext, genre: &str, images: &[String]) -> Markup {
    let label = genre_label(ctx, genre);
    let current = format!("/portfolio/{genre}");

    let content = html! {
        main.genre-page {
            h1 { (label) }
            @if images.is_empty() {
                p.empty { "No photographs here yet." }
            } @else {
                div.gallery {
                    @for (idx, src) in images.iter().enumerate() {
                        img src=(src) alt={ (label) " " (idx + 1) } loading="lazy";
                    }
                }
            }
        }
    };

    base_document(label, ctx, &current, content)
}

/// Renders the about page; `body` is markdown
pub fn render_about(ctx: &PageContext, body: Option<&str>) -> Markup {
    let content = html! {
        main.about-page {
            article.page-content {
                @match body {
                    Some(md) => { (PreEscaped(markdown_to_html(md))) }
                    None => {
                        h1 { "About" }
                        p { (ABOUT_FALLBACK) }
                    }
                }
            }
        }
    };

    base_document("About", ctx, "/about", content)
}

/// Renders the contact page; `body` is markdown
pub fn render_contact(ctx: &PageContext, body: Option<&str>, email: Option<&str>) -> Markup {
    let content = html! {
        main.contact-page {
            article.page-content {
                @match body {
                    Some(md) => { (PreEscaped(markdown_to_html(md))) }
                    None => {
                        h1 { "Contact" }
                        p { (CONTACT_FALLBACK) }
                    }
                }
                @if let Some(email) = email {
                    p.contact-email {
                        a href={ "mailto:" (email) } { (email) }
                    }
                }
            }
        }
    };

    base_document("Contact", ctx, "/contact", content)
}

/// Renders the 404 page
pub fn render_not_found(ctx: &PageContext) -> Markup {
    let content = html! {
        main.not-found-page {
            h1 { "Page not found" }
            p { a href="/" { "Back to the home page" } }
        }
    };

    base_document("Not found", ctx, "", content)
}

// ============================================================================
// Tests
// ============================================================================

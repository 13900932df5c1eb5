//! Small helpers over `scraper` shared by the HTML adapters.

use scraper::{ElementRef, Selector};
use url::Url;

use super::{SourceError, SourceResult};

/// Parses a CSS selector, mapping failures into [`SourceError::Parse`].
pub fn selector(css: &str) -> SourceResult<Selector> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("selector `{css}`: {e}")))
}

/// Parses several selectors, keeping their order.
pub fn selectors(css: &[&str]) -> SourceResult<Vec<Selector>> {
    css.iter().map(|c| selector(c)).collect()
}

/// Concatenated text of `el` with every text node trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    text_joined(el, "")
}

/// Text nodes of `el`, trimmed, non-empty, joined with `sep`.
pub fn text_joined(el: ElementRef<'_>, sep: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// First descendant of `el` matching any of `candidates`, tried in order.
pub fn first_match<'a>(el: ElementRef<'a>, candidates: &[Selector]) -> Option<ElementRef<'a>> {
    candidates.iter().find_map(|s| el.select(s).next())
}

/// Resolves `href` against `base`. Protocol-relative and root-relative links
/// become absolute; unparseable input comes back unchanged.
pub fn absolutize(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

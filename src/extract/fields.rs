//! First-match-wins selector combinators for single-field extraction.
//!
//! Selector strings come from either a caller hint or a built-in fallback
//! chain; either way a malformed selector is never an error; it simply
//! matches nothing and the chain moves on. Per selector only the *first*
//! matched descendant is consulted: an empty first match advances to the
//! next selector, not to the next match.

use scraper::{ElementRef, Selector};

use super::text::{element_text, normalize};
use super::urls;

/// All descendants of `scope` matching `selector`, in document order.
///
/// Unparseable selectors yield an empty list.
pub fn select_all<'a>(scope: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(sel) => scope.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// First descendant of `scope` matching `selector`, if any.
pub fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    scope.select(&sel).next()
}

/// Try each selector in order; return the normalized text of the first
/// selector whose first match has non-empty text.
pub fn first_non_empty<'a, I>(scope: ElementRef<'_>, selectors: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    for selector in selectors {
        if let Some(el) = select_first(scope, selector) {
            let text = normalize(&element_text(&el));
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Extract one text field: a present hint fully replaces the fallback
/// chain (no merging), a miss is an empty string, never an error.
pub fn extract_field(scope: ElementRef<'_>, hint: Option<&str>, fallback: &[String]) -> String {
    match hint {
        Some(h) => first_non_empty(scope, [h]),
        None => first_non_empty(scope, fallback.iter().map(String::as_str)),
    }
    .unwrap_or_default()
}

/// Extract a link: `href` of the first match of the hint (default `a`),
/// resolved against the page URL.
pub fn extract_link(scope: ElementRef<'_>, hint: Option<&str>, page_url: &str) -> String {
    let selector = hint.unwrap_or("a");
    select_first(scope, selector)
        .and_then(|el| el.value().attr("href"))
        .map(|href| urls::resolve(page_url, href))
        .unwrap_or_default()
}

/// Extract an image URL: `src` of the first match of the hint (default
/// `img`), falling back to `data-src` for lazy-loaded images, resolved
/// against the page URL.
pub fn extract_image(scope: ElementRef<'_>, hint: Option<&str>, page_url: &str) -> String {
    let selector = hint.unwrap_or("img");
    select_first(scope, selector)
        .and_then(|el| {
            el.value()
                .attr("src")
                .or_else(|| el.value().attr("data-src"))
                .map(str::to_string)
        })
        .map(|src| urls::resolve(page_url, &src))
        .unwrap_or_default()
}

/// Extract a date: text content first, then the `datetime` attribute of
/// the same element when the text is empty.
pub fn extract_date(scope: ElementRef<'_>, chain: &[String]) -> String {
    for selector in chain {
        if let Some(el) = select_first(scope, selector) {
            let text = normalize(&element_text(&el));
            if !text.is_empty() {
                return text;
            }
            if let Some(dt) = el.value().attr("datetime") {
                let dt = normalize(dt);
                if !dt.is_empty() {
                    return dt;
                }
            }
        }
    }
    String::new()
}

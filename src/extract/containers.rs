//! Container selection strategy: decides which elements are "the records".
//!
//! There is no universal page schema, so the strategy trades precision for
//! coverage: the most specific structural signal available wins, and only
//! when nothing matches do the low-precision heuristics (list items,
//! density-filtered divs) fire. Document order is always preserved and
//! matched elements are never deduplicated.

use scraper::{ElementRef, Html};

use super::fields::select_all;
use super::profiles::SelectorProfile;
use super::text::element_text;
use super::SelectorHints;

/// List items only count as containers when the page has more than this
/// many of them.
const MIN_LIST_ITEMS: usize = 3;

/// Density filter bounds for the final `div` fallback (exclusive).
const DIV_TEXT_MIN: usize = 20;
const DIV_TEXT_MAX: usize = 500;

/// Pick the container element set for one extraction pass.
///
/// Decision order: caller override, then selector families in fixed
/// priority (sports family only in sports mode), then list items, then
/// density-filtered divs. The override always wins even when it matches
/// nothing: "you asked for this selector, you get its result".
pub fn select_containers<'a>(
    doc: &'a Html,
    hints: &SelectorHints,
    sports: bool,
    profile: &SelectorProfile,
) -> Vec<ElementRef<'a>> {
    let root = doc.root_element();

    if let Some(container) = hints.container() {
        let found = select_all(root, container);
        tracing::debug!(selector = container, count = found.len(), "container override");
        return found;
    }

    let mut families: Vec<&[String]> = Vec::with_capacity(4);
    if sports {
        families.push(&profile.containers.sports);
    }
    families.push(&profile.containers.products);
    families.push(&profile.containers.articles);
    families.push(&profile.containers.generic);

    for family in families {
        for selector in family {
            let found = select_all(root, selector);
            if !found.is_empty() {
                tracing::debug!(selector = selector.as_str(), count = found.len(), "container family hit");
                return found;
            }
        }
    }

    let list_items = select_all(root, "li");
    if list_items.len() > MIN_LIST_ITEMS {
        return list_items;
    }

    // Last resort: divs with a plausible amount of text. Rejects both
    // icon-only divs and huge page wrappers. The bounds apply to the raw
    // trimmed length; internal whitespace runs count as-is.
    select_all(root, "div")
        .into_iter()
        .filter(|el| {
            let len = element_text(el).trim().chars().count();
            len > DIV_TEXT_MIN && len < DIV_TEXT_MAX
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::profiles::default_profile;
    use super::super::text::normalize;
    use super::super::SelectorHints;
    use super::*;

    fn containers<'a>(doc: &'a Html, hints: &SelectorHints) -> Vec<ElementRef<'a>> {
        select_containers(doc, hints, false, default_profile())
    }

    #[test]
    fn test_product_family_beats_article_family() {
        let doc = Html::parse_document(
            "<html><body>\
             <article><h2>Post</h2></article>\
             <div class=\"product-card\"><h2>Widget</h2></div>\
             </body></html>",
        );
        let found = containers(&doc, &SelectorHints::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value().attr("class"), Some("product-card"));
    }

    #[test]
    fn test_article_family_when_no_products() {
        let doc = Html::parse_document(
            "<html><body><article>A</article><article>B</article></body></html>",
        );
        let found = containers(&doc, &SelectorHints::default());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_list_items_need_more_than_three() {
        let three = Html::parse_document(
            "<html><body><ul><li>a</li><li>b</li><li>c</li></ul></body></html>",
        );
        assert!(containers(&three, &SelectorHints::default()).is_empty());

        let four = Html::parse_document(
            "<html><body><ul><li>a</li><li>b</li><li>c</li><li>d</li></ul></body></html>",
        );
        assert_eq!(containers(&four, &SelectorHints::default()).len(), 4);
    }

    #[test]
    fn test_density_filtered_div_fallback() {
        let long = "x".repeat(600);
        let html = format!(
            "<html><body>\
             <div>tiny</div>\
             <div>this div has a perfectly reasonable amount of text in it</div>\
             <div>{long}</div>\
             </body></html>"
        );
        let doc = Html::parse_document(&html);
        let found = containers(&doc, &SelectorHints::default());
        assert_eq!(found.len(), 1);
        assert!(normalize(&element_text(&found[0])).starts_with("this div"));
    }

    #[test]
    fn test_density_filter_counts_raw_trimmed_length() {
        // Six visible chars around a 30-space run: 36 raw chars sits
        // inside the bounds even though the collapsed form is only 7.
        let spaced = format!("abc{}def", " ".repeat(30));
        let html = format!("<html><body><div>{spaced}</div></body></html>");
        let doc = Html::parse_document(&html);
        let found = containers(&doc, &SelectorHints::default());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_empty_document_reaches_final_fallback_without_panic() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert!(containers(&doc, &SelectorHints::default()).is_empty());
    }

    #[test]
    fn test_container_override_wins_even_when_empty() {
        let doc = Html::parse_document(
            "<html><body><div class=\"product-card\">Widget here</div></body></html>",
        );
        let hints = SelectorHints {
            container: Some(".does-not-exist".to_string()),
            ..Default::default()
        };
        // The fallback families would have matched, but the override's
        // empty result is final.
        assert!(containers(&doc, &hints).is_empty());
    }

    #[test]
    fn test_container_override_blank_is_ignored() {
        let doc = Html::parse_document(
            "<html><body><div class=\"product-card\">Widget here</div></body></html>",
        );
        let hints = SelectorHints {
            container: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(containers(&doc, &hints).len(), 1);
    }

    #[test]
    fn test_sports_family_tried_first_in_sports_mode() {
        let doc = Html::parse_document(
            "<html><body>\
             <div class=\"product-card\">p</div>\
             <div class=\"match-item\">m</div>\
             </body></html>",
        );
        let found = select_containers(&doc, &SelectorHints::default(), true, default_profile());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value().attr("class"), Some("match-item"));
    }

    #[test]
    fn test_document_order_is_stable() {
        let doc = Html::parse_document(
            "<html><body>\
             <div class=\"item\">one</div>\
             <div class=\"item\">two</div>\
             <div class=\"item\">three</div>\
             </body></html>",
        );
        let found = containers(&doc, &SelectorHints::default());
        let texts: Vec<String> = found
            .iter()
            .map(|el| normalize(&element_text(el)))
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }
}

//! Text cleanup helpers shared by every extraction mode.

use scraper::ElementRef;

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`normalize`], treating absent text as empty.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Concatenated text of an element and all its descendants.
///
/// Raw, not normalized; callers decide whether they need the collapsed
/// form or the original length.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  a\n\tb   c "), "a b c");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_normalize_opt_none_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" x  y ")), "x y");
    }

    #[test]
    fn test_element_text_joins_descendants() {
        let doc = Html::parse_fragment("<div><span>Hello</span> <b>world</b></div>");
        let el = doc.root_element();
        assert_eq!(normalize(&element_text(&el)), "Hello world");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 10), "ab");
        // Multi-byte chars count as one.
        assert_eq!(truncate_chars("äöü", 2), "äö");
    }
}

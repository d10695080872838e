//! Base-relative URL resolution for extracted links and images.

use url::Url;

/// Resolve `candidate` against `base`, degrading to the raw string.
///
/// Handles absolute URLs, protocol-relative, path-relative, and
/// query/fragment-only candidates. On any parse failure the candidate is
/// returned unchanged: a malformed href is still useful to the caller,
/// so resolution never errors and never produces an empty string unless
/// the candidate itself was empty.
pub fn resolve(base: &str, candidate: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(candidate)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => candidate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve("https://a.com/x/", "y.png"),
            "https://a.com/x/y.png"
        );
    }

    #[test]
    fn test_resolve_absolute_candidate_wins() {
        assert_eq!(
            resolve("https://a.com/x/", "https://b.org/z"),
            "https://b.org/z"
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve("https://a.com/page", "//cdn.a.com/img.jpg"),
            "https://cdn.a.com/img.jpg"
        );
    }

    #[test]
    fn test_resolve_query_and_fragment_only() {
        assert_eq!(resolve("https://a.com/p", "?page=2"), "https://a.com/p?page=2");
        assert_eq!(resolve("https://a.com/p", "#top"), "https://a.com/p#top");
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(resolve("https://a.com/x/y", "/z"), "https://a.com/z");
    }

    #[test]
    fn test_resolve_garbage_degrades_to_raw() {
        let out = resolve("https://a.com", "not a url at all///");
        assert!(!out.is_empty());
        // Never panics and never loses the candidate entirely.
        let out = resolve("not a base", "still-not-a-url");
        assert_eq!(out, "still-not-a-url");
    }

    #[test]
    fn test_resolve_empty_candidate() {
        assert_eq!(resolve("https://a.com/x/", ""), "https://a.com/x/");
        assert_eq!(resolve("::bad::", ""), "");
    }
}

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Matches `url(...)` with optional quotes.
static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^)'"\s]*))\s*\)"#).unwrap()
});

/// A `url(...)` reference within a stylesheet.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct UrlReference<'a> {
    /// Byte range of the whole `url(...)` expression.
    pub(super) range: Range<usize>,
    pub(super) href: &'a str,
}

/// Every non-empty `url(...)` in `css`, including fragment-only
/// (`url(#clip)`) and external references.
pub(super) fn url_references(css: &str) -> Vec<UrlReference<'_>> {
    CSS_URL
        .captures_iter(css)
        .filter_map(|caps| {
            let href = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
            let href = href.as_str().trim();

            if href.is_empty() {
                return None;
            }
            Some(UrlReference {
                range: caps.get(0)?.range(),
                href,
            })
        })
        .collect()
}

/// Formats a double-quoted `url("...")` expression pointing at `href`.
pub(super) fn url(href: &str) -> String {
    format!("url(\"{}\")", href.replace('"', "\\\""))
}

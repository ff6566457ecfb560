//! Markup scanning for `<link>` and `<a>` endpoint references.

use scraper::{Html, Selector};

use crate::core::constants::protocol;

/// Relation matcher for markup: only the bare `webmention` token counts.
///
/// `rel` is a space-separated token list in HTML, so `rel="me webmention"`
/// qualifies while `rel="http://webmention.org/"` does not.
pub fn is_webmention_rel(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case(protocol::REL_WEBMENTION))
}

/// Unresolved `href`s of webmention `<link>`/`<a>` elements, in document order.
///
/// Elements with an empty or missing `href` are skipped.
pub fn webmention_hrefs(body: &str) -> Vec<String> {
    let selector = match Selector::parse("link[rel], a[rel]") {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    let document = Html::parse_document(body);
    document
        .select(&selector)
        .filter(|el| el.value().attr("rel").is_some_and(is_webmention_rel))
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(str::to_string)
        .collect()
}

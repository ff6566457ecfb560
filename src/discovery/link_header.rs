//! `Link` response header scanning.
//!
//! The header is split naively on commas, so a comma inside a quoted URL
//! breaks that entry. Receivers do not send such URLs in practice.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::constants::protocol;

/// `<url>` followed by its parameters.
static LINK_ENTRY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([^>]+)>(.*)$").expect("Link entry pattern is valid"));

/// One comma-separated entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeaderEntry {
    /// Target between the angle brackets, unresolved
    pub url: String,
    /// Tokens of the `rel` parameter, in order
    pub rels: Vec<String>,
}

impl LinkHeaderEntry {
    /// Parse a single entry such as `</wm>; rel="webmention"`.
    pub fn parse(entry: &str) -> Option<Self> {
        let captures = LINK_ENTRY_PATTERN.captures(entry.trim())?;
        let url = captures.get(1)?.as_str().trim().to_string();
        let params = captures.get(2).map_or("", |m| m.as_str());

        let rels = params
            .split(';')
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("rel"))
            .map(|(_, value)| {
                unquote(value.trim())
                    .split_whitespace()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { url, rels })
    }

    pub fn is_webmention(&self) -> bool {
        self.rels.iter().any(|rel| is_webmention_rel(rel))
    }
}

/// Relation matcher for headers: the bare token or its historical URI form.
///
/// Accepts `webmention`, `http://webmention.org`, `https://webmention.org/`
/// and so on, ignoring case.
pub fn is_webmention_rel(rel: &str) -> bool {
    let rel = rel.to_ascii_lowercase();
    let rel = rel
        .strip_prefix("https://")
        .or_else(|| rel.strip_prefix("http://"))
        .unwrap_or(&rel);
    let rel = rel
        .strip_suffix(".org/")
        .or_else(|| rel.strip_suffix(".org"))
        .unwrap_or(rel);

    rel == protocol::REL_WEBMENTION
}

/// Parse every entry of the given `Link` header values.
pub fn parse_link_headers(values: &[&str]) -> Vec<LinkHeaderEntry> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .filter_map(LinkHeaderEntry::parse)
        .collect()
}

/// Unresolved URLs of the webmention entries, in header order.
pub fn webmention_urls(values: &[&str]) -> Vec<String> {
    parse_link_headers(values)
        .into_iter()
        .filter(LinkHeaderEntry::is_webmention)
        .map(|entry| entry.url)
        .collect()
}

fn unquote(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}

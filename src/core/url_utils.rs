//! URL helpers: absolute-URL validation, relative resolution against a base
//! and fragment stripping.

use url::Url;

use crate::core::constants::error_messages;
use crate::core::error::{Result, WebmentionError};

/// Parse `raw` as an absolute URL with a non-empty host.
///
/// Used for every URL argument of the public API before any request is made.
pub fn require_absolute_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(WebmentionError::InvalidArgument(
            error_messages::EMPTY_URL.to_string(),
        ));
    }

    let url = Url::parse(raw)
        .map_err(|e| WebmentionError::InvalidArgument(format!("'{raw}': {e}")))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(WebmentionError::InvalidArgument(format!(
            "'{raw}': {}",
            error_messages::MISSING_HOST
        ))),
    }
}

/// Resolve `reference` against `base` (RFC 3986) and drop any fragment.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference.trim()).ok().map(fragmentless)
}

/// Return `url` with its fragment removed.
pub fn fragmentless(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

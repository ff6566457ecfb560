//! Webmention endpoint discovery
//!
//! This module locates a target's webmention endpoint from the `Link`
//! response header or, failing that, from `<link>`/`<a>` markup in an
//! HTML body.

pub mod discoverer;
pub mod html;
pub mod link_header;

// Re-export commonly used items
pub use discoverer::{DiscoveryResult, discover, find_endpoint};
pub use link_header::LinkHeaderEntry;

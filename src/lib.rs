//! webmention - a client for the Webmention protocol
//!
//! Two operations make up the protocol's sending side:
//!
//! - [`discover`] fetches a target page and finds the endpoint it
//!   advertises, from the `Link` header first and `<link>`/`<a>` markup second.
//! - [`send`] POSTs a `source`/`target` form to a known endpoint.
//!
//! [`mention`] and [`mention_all`] chain the two for one or many targets.

pub mod config;
pub mod core;
pub mod discovery;
pub mod http;
pub mod mention;
pub mod reporting;
pub mod sending;
pub mod ui;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use core::{Result, WebmentionError};
pub use discovery::{DiscoveryResult, discover};
pub use http::{HttpResponse, RequestOptions};
pub use mention::{MentionOutcome, MentionStatus, mention, mention_all};
pub use sending::send;

//! Webmention delivery
//!
//! Posts the `source`/`target` notification to a discovered endpoint.

pub mod sender;

pub use sender::send;

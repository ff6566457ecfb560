//! HTTP plumbing shared by discovery and sending
//!
//! `RequestOptions` carries the caller's transport settings and builds a
//! `reqwest::Client` per call with the redirect policy the operation needs.
//! `HttpResponse` is a fully read response that can be both inspected and
//! handed back to the caller.

pub mod options;
pub mod response;

pub use options::{RequestOptions, parse_header};
pub use response::HttpResponse;

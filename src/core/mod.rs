//! Core types and foundational components
//!
//! This module contains the error type, protocol constants and the URL
//! helpers shared by discovery and sending.

pub mod constants;
pub mod error;
pub mod url_utils;

// Re-export commonly used items for convenience
pub use error::{Result, WebmentionError};
pub use url_utils::{fragmentless, require_absolute_url, resolve};

//! Reporting
//!
//! This module handles structured logging and rendering of discovery, send
//! and mention results for the command line.

pub mod logging;
pub mod output;

// Re-export commonly used items
pub use output::{render_discovery, render_mentions, render_send};

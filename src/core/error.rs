use std::fmt;

use crate::http::HttpResponse;

/// Error types for webmention discovery, sending and configuration
#[derive(Debug)]
pub enum WebmentionError {
    /// Missing or malformed URL argument, detected before any network access
    InvalidArgument(String),

    /// DNS, connection, timeout or body-read failure from the HTTP client
    Transport(reqwest::Error),

    /// Non-success status from a webmention endpoint (sending only)
    HttpStatus(Box<HttpResponse>),

    /// Header name or value that cannot be sent
    InvalidHeader(String),

    /// Configuration error
    Config(String),

    /// IO error (config file reads, etc.)
    Io(std::io::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),
}

impl WebmentionError {
    /// The endpoint response behind an `HttpStatus` error.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            WebmentionError::HttpStatus(response) => Some(response),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP (connect, DNS, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, WebmentionError::Transport(_))
    }
}

impl fmt::Display for WebmentionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebmentionError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            WebmentionError::Transport(err) => write!(f, "Transport error: {err}"),
            WebmentionError::HttpStatus(response) => write!(
                f,
                "HTTP error: {} from {}",
                response.status(),
                response.url()
            ),
            WebmentionError::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            WebmentionError::Config(msg) => write!(f, "Configuration error: {msg}"),
            WebmentionError::Io(err) => write!(f, "IO error: {err}"),
            WebmentionError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
        }
    }
}

impl std::error::Error for WebmentionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebmentionError::Transport(err) => Some(err),
            WebmentionError::Io(err) => Some(err),
            WebmentionError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WebmentionError {
    fn from(err: reqwest::Error) -> Self {
        WebmentionError::Transport(err)
    }
}

impl From<std::io::Error> for WebmentionError {
    fn from(err: std::io::Error) -> Self {
        WebmentionError::Io(err)
    }
}

impl From<toml::de::Error> for WebmentionError {
    fn from(err: toml::de::Error) -> Self {
        WebmentionError::TomlParsing(err)
    }
}

/// Type alias for Results using WebmentionError
pub type Result<T> = std::result::Result<T, WebmentionError>;

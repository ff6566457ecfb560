/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Protocol tokens, header names and configuration defaults live here so the
/// discovery, sending and configuration layers agree on them.
/// Webmention protocol tokens
pub mod protocol {
    /// Bare relation token used in `rel` attributes and Link header parameters
    pub const REL_WEBMENTION: &str = "webmention";
    /// Media type of the document that may carry markup discovery links
    pub const HTML_CONTENT_TYPE: &str = "text/html";
    /// Form field carrying the URL of the page that mentions the target
    pub const SOURCE_FIELD: &str = "source";
    /// Form field carrying the URL of the page being mentioned
    pub const TARGET_FIELD: &str = "target";
    /// Accept header value sent with notifications unless the caller sets one
    pub const DEFAULT_ACCEPT: &str = "*/*";
}

/// Output format constants
pub mod output_formats {
    /// Text output format - human readable summary
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - one line per result, no decoration
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds used by the CLI configuration
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Maximum accepted timeout in seconds (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86400;
}

/// Default configuration values
pub mod defaults {
    /// Redirects followed by the discovery GET
    pub const MAX_REDIRECTS: usize = 10;
    /// Upper bound accepted for `max_redirects`
    pub const MAX_REDIRECTS_LIMIT: usize = 50;
    /// Upper bound accepted for `concurrency`
    pub const MAX_CONCURRENCY: usize = 1000;
    /// Config file searched for in the current and parent directories
    pub const CONFIG_FILE_NAME: &str = ".webmention.toml";
    /// Parent directories searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Error message constants
pub mod error_messages {
    /// Reported when a required URL argument is blank
    pub const EMPTY_URL: &str = "URL must not be empty";
    /// Reported when a URL parses but carries no host
    pub const MISSING_HOST: &str = "URL has no host";
}

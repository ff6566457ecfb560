use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::core::constants::defaults;
use crate::core::error::{Result, WebmentionError};

/// Transport settings supplied by the caller for a single discover or send.
///
/// The library imposes no deadline of its own: without `timeout` a request
/// waits as long as the underlying client does.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Extra request headers, e.g. `Authorization`
    pub headers: HeaderMap,

    /// Overall deadline for the request
    pub timeout: Option<Duration>,

    /// User-Agent header; defaults to `webmention/<version>`
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,

    /// Redirects followed by the discovery GET. Sending never follows redirects.
    pub max_redirects: usize,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            timeout: None,
            user_agent: None,
            proxy: None,
            accept_invalid_certs: false,
            max_redirects: defaults::MAX_REDIRECTS,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request header, replacing any previous value for `name`.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| WebmentionError::InvalidHeader(format!("'{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| WebmentionError::InvalidHeader(format!("value for '{name}': {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Redirect policy for the discovery GET.
    pub(crate) fn discovery_redirect_policy(&self) -> Policy {
        Policy::limited(self.max_redirects)
    }

    /// Build a client for one request using `redirect` as its redirect policy.
    pub(crate) fn build_client(&self, redirect: Policy) -> Result<Client> {
        let user_agent = self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let mut client_builder = Client::builder()
            .redirect(redirect)
            .user_agent(user_agent);

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        // SSL verification
        if self.accept_invalid_certs {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        // Proxy configuration
        if let Some(ref proxy_url) = self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                WebmentionError::Config(format!("Invalid proxy URL '{proxy_url}': {e}"))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        Ok(client_builder.build()?)
    }
}

/// Parse a `Name: value` header line as given on the command line.
pub fn parse_header(line: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = line.split_once(':').ok_or_else(|| {
        WebmentionError::InvalidHeader(format!("'{line}' is not in 'Name: value' form"))
    })?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| WebmentionError::InvalidHeader(format!("'{}': {e}", name.trim())))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| WebmentionError::InvalidHeader(format!("value for '{name}': {e}")))?;

    Ok((name, value))
}

use log::debug;
use reqwest::header::LINK;
use std::ops::Deref;
use url::Url;

use crate::core::constants::protocol;
use crate::core::error::Result;
use crate::core::url_utils::{require_absolute_url, resolve};
use crate::discovery::{html, link_header};
use crate::http::{HttpResponse, RequestOptions};

/// Outcome of a discovery attempt.
///
/// `response` is the GET that was performed, kept even when no endpoint was
/// found so callers can look at its status and headers.
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    /// Absolute, fragment-free endpoint URL
    pub endpoint: Option<String>,
    pub response: HttpResponse,
}

impl DiscoveryResult {
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn is_found(&self) -> bool {
        self.endpoint.is_some()
    }
}

/// Result of one step in the discovery chain.
#[derive(Debug, PartialEq, Eq)]
enum Check {
    Found(Url),
    /// No endpoint, and later steps must not run
    Stop,
    Continue,
}

type DiscoveryCheck = fn(&Url, &HttpResponse) -> Check;

/// Discovery steps in precedence order.
const CHECKS: [(&str, DiscoveryCheck); 3] = [
    ("Link header", check_link_header),
    ("content type", check_content_type),
    ("HTML", check_markup),
];

/// Discover the webmention endpoint advertised by `url`.
///
/// The HTTP status of the GET is not checked: error pages may still carry a
/// `Link` header or markup. Fails with `InvalidArgument` before any request
/// when `url` is not an absolute URL with a host, and with `Transport` when
/// the GET itself fails.
pub async fn discover(url: &str, options: &RequestOptions) -> Result<DiscoveryResult> {
    let request_url = require_absolute_url(url)?;

    debug!("Webmention discovery: attempting for {request_url}");

    let client = options.build_client(options.discovery_redirect_policy())?;
    let response = client
        .get(request_url.clone())
        .headers(options.headers.clone())
        .send()
        .await?;
    let response = HttpResponse::read(response).await?;

    let endpoint = find_endpoint(&request_url, &response).map(String::from);
    Ok(DiscoveryResult { endpoint, response })
}

/// Run the discovery chain over an already fetched response.
///
/// Relative references resolve against `request_url`, the URL that was
/// requested, not the one a redirect may have ended on.
pub fn find_endpoint(request_url: &Url, response: &HttpResponse) -> Option<Url> {
    for (name, check) in CHECKS {
        match check(request_url, response) {
            Check::Found(endpoint) => {
                debug!("Webmention discovery: got endpoint in {name}: {endpoint}");
                return Some(endpoint);
            }
            Check::Stop => return None,
            Check::Continue => {}
        }
    }

    debug!("Webmention discovery: no endpoint in headers or HTML");
    None
}

fn check_link_header(request_url: &Url, response: &HttpResponse) -> Check {
    let values = response.header_values(LINK.as_str());
    let values: Vec<&str> = values.iter().map(Deref::deref).collect();
    first_resolved(request_url, link_header::webmention_urls(&values))
}

/// A blank `Content-Type` counts as absent.
fn check_content_type(_request_url: &Url, response: &HttpResponse) -> Check {
    match response.content_type() {
        Some(content_type) if !content_type.trim().is_empty() && !is_html(&content_type) => {
            debug!(
                "Webmention discovery: no endpoint in headers and content type {content_type} is not HTML"
            );
            Check::Stop
        }
        _ => Check::Continue,
    }
}

fn check_markup(request_url: &Url, response: &HttpResponse) -> Check {
    first_resolved(request_url, html::webmention_hrefs(response.text()))
}

fn first_resolved(base: &Url, references: Vec<String>) -> Check {
    references
        .iter()
        .find_map(|reference| resolve(base, reference))
        .map_or(Check::Continue, Check::Found)
}

fn is_html(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .eq_ignore_ascii_case(protocol::HTML_CONTENT_TYPE)
}

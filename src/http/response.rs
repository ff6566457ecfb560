use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION};
use std::borrow::Cow;
use url::Url;

use crate::core::error::Result;

/// A fully read HTTP response: final URL, status, headers and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl HttpResponse {
    pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            url,
            status,
            headers,
            body,
        }
    }

    /// Drain a `reqwest::Response` into a snapshot.
    ///
    /// Failing to read the body is a transport failure, like failing to connect.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::new(url, status, headers, body))
    }

    /// URL the response was served from, after any followed redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// First value of header `name` (case-insensitive).
    ///
    /// Bytes outside visible ASCII are decoded lossily rather than dropping
    /// the whole value.
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(decode)
    }

    /// Every value of header `name`, in received order.
    pub fn header_values(&self, name: &str) -> Vec<Cow<'_, str>> {
        self.headers.get_all(name).iter().map(decode).collect()
    }

    pub fn content_type(&self) -> Option<Cow<'_, str>> {
        self.header(CONTENT_TYPE.as_str())
    }

    /// `Location` of a redirect response, left unfollowed by `send`.
    pub fn location(&self) -> Option<Cow<'_, str>> {
        self.header(LOCATION.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_redirection(&self) -> bool {
        self.status.is_redirection()
    }
}

fn decode(value: &HeaderValue) -> Cow<'_, str> {
    String::from_utf8_lossy(value.as_bytes())
}

use log::debug;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::redirect::Policy;

use crate::core::constants::protocol;
use crate::core::error::{Result, WebmentionError};
use crate::core::url_utils::require_absolute_url;
use crate::http::{HttpResponse, RequestOptions};

/// Send a webmention telling `endpoint` that `source` links to `target`.
///
/// Redirects are never followed: following a 3xx would replay the
/// notification as a GET. A 3xx comes back as `Ok` and the caller decides
/// what it means. Any other non-2xx status fails with `HttpStatus`;
/// transport failures propagate unchanged. Exactly one attempt is made.
pub async fn send(
    endpoint: &str,
    source: &str,
    target: &str,
    options: &RequestOptions,
) -> Result<HttpResponse> {
    let endpoint_url = require_absolute_url(endpoint)?;
    require_absolute_url(source)?;
    require_absolute_url(target)?;

    debug!("Webmention send: {source} -> {target}");

    let mut headers = options.headers.clone();
    headers
        .entry(ACCEPT)
        .or_insert(HeaderValue::from_static(protocol::DEFAULT_ACCEPT));

    let client = options.build_client(Policy::none())?;
    let form = [
        (protocol::SOURCE_FIELD, source),
        (protocol::TARGET_FIELD, target),
    ];

    let response = match client
        .post(endpoint_url)
        .headers(headers)
        .form(&form)
        .send()
        .await
    {
        Ok(response) => HttpResponse::read(response).await,
        Err(err) => Err(err.into()),
    }
    .inspect_err(|e| debug!("Webmention send: got {e}"))?;

    debug!("Webmention send: got HTTP {}", response.status());

    if response.is_success() || response.is_redirection() {
        Ok(response)
    } else {
        Err(WebmentionError::HttpStatus(Box::new(response)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};
    use reqwest::StatusCode;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn form_body(source: &str, target: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("source".into(), source.into()),
            Matcher::UrlEncoded("target".into(), target.into()),
        ])
    }

    #[tokio::test]
    async fn test_send__success() -> TestResult {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/wm")
            .match_header("accept", "*/*")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(form_body("https://a.example/", "https://b.example/"))
            .with_status(202)
            .create_async()
            .await;

        let response = send(
            &(server.url() + "/wm"),
            "https://a.example/",
            "https://b.example/",
            &RequestOptions::default(),
        )
        .await?;

        m.assert_async().await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        Ok(())
    }

    #[tokio::test]
    async fn test_send__redirect_is_returned_not_followed() -> TestResult {
        let mut server = Server::new_async().await;
        let _moved = server
            .mock("POST", "/wm")
            .with_status(301)
            .with_header("location", "/elsewhere")
            .create_async()
            .await;
        let followed_post = server
            .mock("POST", "/elsewhere")
            .expect(0)
            .create_async()
            .await;
        let followed_get = server
            .mock("GET", "/elsewhere")
            .expect(0)
            .create_async()
            .await;

        let response = send(
            &(server.url() + "/wm"),
            "http://source",
            "http://target",
            &RequestOptions::default(),
        )
        .await?;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert!(response.is_redirection());
        assert_eq!(response.location().as_deref(), Some("/elsewhere"));
        followed_post.assert_async().await;
        followed_get.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_send__server_error_is_http_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/wm")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let result = send(
            &(server.url() + "/wm"),
            "http://source",
            "http://target",
            &RequestOptions::default(),
        )
        .await;

        match result {
            Err(WebmentionError::HttpStatus(response)) => {
                assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(response.text(), "boom");
            }
            other => panic!("Expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send__client_error_is_http_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/wm")
            .with_status(400)
            .create_async()
            .await;

        let result = send(
            &(server.url() + "/wm"),
            "http://source",
            "http://target",
            &RequestOptions::default(),
        )
        .await;

        assert_eq!(
            result.unwrap_err().response().map(|r| r.status()),
            Some(StatusCode::BAD_REQUEST)
        );
    }

    #[tokio::test]
    async fn test_send__bad_urls_rejected_before_request() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let good = server.url() + "/wm";
        let options = RequestOptions::default();

        for bad in ["", "asdf", "/relative", "mailto:x@example.com"] {
            for (endpoint, source, target) in [
                (bad, "http://x", "http://x"),
                (good.as_str(), bad, "http://x"),
                (good.as_str(), "http://x", bad),
            ] {
                let result = send(endpoint, source, target, &options).await;
                assert!(
                    matches!(result, Err(WebmentionError::InvalidArgument(_))),
                    "({endpoint:?}, {source:?}, {target:?}) should be rejected"
                );
            }
        }

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_send__preserves_endpoint_query() -> TestResult {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/wm")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("x".into(), "y".into()),
                Matcher::UrlEncoded("a".into(), "b".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        send(
            &(server.url() + "/wm?x=y&a=b"),
            "http://source",
            "http://target",
            &RequestOptions::default(),
        )
        .await?;

        m.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_send__caller_accept_is_kept() -> TestResult {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/wm")
            .match_header("accept", "application/json")
            .match_header("authorization", "Bearer token")
            .with_status(201)
            .create_async()
            .await;

        let options = RequestOptions::new()
            .with_header("Accept", "application/json")?
            .with_header("Authorization", "Bearer token")?;
        send(&(server.url() + "/wm"), "http://source", "http://target", &options).await?;

        m.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_send__connection_error_propagates() {
        let result = send(
            "http://127.0.0.1:1/wm",
            "http://source",
            "http://target",
            &RequestOptions::default(),
        )
        .await;

        assert!(matches!(result, Err(WebmentionError::Transport(_))));
    }
}

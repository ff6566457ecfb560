//! Discover-then-send for one or many targets.
//!
//! Each target gets its own independent discovery and delivery; no state is
//! shared between them, so running them concurrently needs no locking.

use futures::{StreamExt, stream};
use log::debug;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use crate::core::error::{Result, WebmentionError};
use crate::core::url_utils::require_absolute_url;
use crate::discovery::discover;
use crate::http::{HttpResponse, RequestOptions};
use crate::sending::send;

/// How a single mention ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionStatus {
    /// Endpoint accepted the notification (2xx)
    Sent,
    /// Target advertises no endpoint
    NoEndpoint,
    /// Endpoint answered with a redirect, which was not followed
    Redirected,
    /// Discovery or delivery failed
    Failed,
}

impl fmt::Display for MentionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            MentionStatus::Sent => "sent",
            MentionStatus::NoEndpoint => "no endpoint",
            MentionStatus::Redirected => "redirected",
            MentionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Result of mentioning one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionOutcome {
    pub target: String,
    pub status: MentionStatus,
    pub endpoint: Option<String>,
    pub status_code: Option<u16>,
    /// `Location` of an unfollowed redirect
    pub location: Option<String>,
    pub error: Option<String>,
}

impl MentionOutcome {
    pub fn no_endpoint(target: &str) -> Self {
        Self {
            target: target.to_string(),
            status: MentionStatus::NoEndpoint,
            endpoint: None,
            status_code: None,
            location: None,
            error: None,
        }
    }

    pub fn delivered(target: &str, endpoint: &str, response: &HttpResponse) -> Self {
        let status = if response.is_redirection() {
            MentionStatus::Redirected
        } else {
            MentionStatus::Sent
        };

        Self {
            target: target.to_string(),
            status,
            endpoint: Some(endpoint.to_string()),
            status_code: Some(response.status().as_u16()),
            location: response.location().map(Cow::into_owned),
            error: None,
        }
    }

    pub fn failed(target: &str, endpoint: Option<&str>, error: &WebmentionError) -> Self {
        Self {
            target: target.to_string(),
            status: MentionStatus::Failed,
            endpoint: endpoint.map(str::to_string),
            status_code: error.response().map(|r| r.status().as_u16()),
            location: None,
            error: Some(error.to_string()),
        }
    }

    /// Redirects count as issues: nobody confirmed the mention was received.
    pub fn is_issue(&self) -> bool {
        matches!(
            self.status,
            MentionStatus::Failed | MentionStatus::Redirected
        )
    }
}

/// Discover `target`'s endpoint and, if there is one, send it a webmention.
///
/// Errors from either step propagate; use [`mention_all`] to collect them as
/// outcomes instead.
pub async fn mention(
    source: &str,
    target: &str,
    options: &RequestOptions,
) -> Result<MentionOutcome> {
    require_absolute_url(source)?;

    Ok(match deliver(source, target, options).await? {
        Some((endpoint, sent)) => MentionOutcome::delivered(target, &endpoint, &sent?),
        None => MentionOutcome::no_endpoint(target),
    })
}

/// Mention every unique target, running up to `concurrency` at once.
///
/// Outcomes come back in target order. Only an invalid `source` fails the
/// whole call; per-target failures become `Failed` outcomes.
pub async fn mention_all(
    source: &str,
    targets: &[String],
    options: &RequestOptions,
    concurrency: usize,
) -> Result<Vec<MentionOutcome>> {
    require_absolute_url(source)?;

    let unique_targets = deduplicate_targets(targets);
    debug!(
        "Mentioning {} unique target(s) from {source} with concurrency {concurrency}",
        unique_targets.len()
    );

    let outcomes: Vec<MentionOutcome> = stream::iter(unique_targets)
        .map(|target| async move {
            match deliver(source, target, options).await {
                Ok(Some((endpoint, Ok(response)))) => {
                    MentionOutcome::delivered(target, &endpoint, &response)
                }
                Ok(Some((endpoint, Err(err)))) => {
                    MentionOutcome::failed(target, Some(&endpoint), &err)
                }
                Ok(None) => MentionOutcome::no_endpoint(target),
                Err(err) => MentionOutcome::failed(target, None, &err),
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    Ok(outcomes)
}

/// Discover, then send when an endpoint exists.
///
/// Discovery errors propagate. The send result is returned next to the
/// endpoint so a failed delivery can still report where it went.
async fn deliver(
    source: &str,
    target: &str,
    options: &RequestOptions,
) -> Result<Option<(String, Result<HttpResponse>)>> {
    let discovery = discover(target, options).await?;
    let Some(endpoint) = discovery.endpoint() else {
        debug!("No webmention endpoint for {target}");
        return Ok(None);
    };

    let sent = send(endpoint, source, target, options).await;
    Ok(Some((endpoint.to_string(), sent)))
}

/// Drop repeated targets, keeping first-seen order.
pub fn deduplicate_targets(targets: &[String]) -> Vec<&str> {
    let mut seen = FxHashSet::with_capacity_and_hasher(targets.len(), Default::default());
    targets
        .iter()
        .map(String::as_str)
        .filter(|target| seen.insert(*target))
        .collect()
}

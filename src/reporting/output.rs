//! Rendering of results in the `text`, `minimal` and `json` output formats.

use serde_json::json;

use crate::core::constants::output_formats;
use crate::discovery::DiscoveryResult;
use crate::http::HttpResponse;
use crate::mention::{MentionOutcome, MentionStatus};

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Render a discovery result for `url`.
pub fn render_discovery(url: &str, result: &DiscoveryResult, output_format: &str) -> String {
    let status_code = result.response.status().as_u16();

    match output_format {
        output_formats::JSON => format!(
            "{:#}",
            json!({
                "url": url,
                "endpoint": result.endpoint(),
                "status_code": status_code,
                "checked_at": timestamp(),
            })
        ),
        output_formats::MINIMAL => result.endpoint().unwrap_or("none").to_string(),
        _ => match result.endpoint() {
            Some(endpoint) => format!("Webmention endpoint for {url}: {endpoint}"),
            None => format!("No webmention endpoint found for {url} (HTTP {status_code})"),
        },
    }
}

/// Render the response of a successful or redirected send.
pub fn render_send(endpoint: &str, response: &HttpResponse, output_format: &str) -> String {
    let status_code = response.status().as_u16();

    match output_format {
        output_formats::JSON => format!(
            "{:#}",
            json!({
                "endpoint": endpoint,
                "status_code": status_code,
                "redirected": response.is_redirection(),
                "location": response.location(),
                "checked_at": timestamp(),
            })
        ),
        output_formats::MINIMAL => format!("{status_code} {endpoint}"),
        _ if response.is_redirection() => format!(
            "Endpoint {endpoint} answered HTTP {status_code} redirecting to {}; not followed",
            response.location().as_deref().unwrap_or("an unknown location")
        ),
        _ => format!("Webmention sent to {endpoint}: HTTP {status_code}"),
    }
}

/// Render the outcomes of mentioning several targets from `source`.
pub fn render_mentions(source: &str, outcomes: &[MentionOutcome], output_format: &str) -> String {
    let count = |status: MentionStatus| outcomes.iter().filter(|o| o.status == status).count();

    match output_format {
        output_formats::JSON => format!(
            "{:#}",
            json!({
                "source": source,
                "checked_at": timestamp(),
                "summary": {
                    "total": outcomes.len(),
                    "sent": count(MentionStatus::Sent),
                    "no_endpoint": count(MentionStatus::NoEndpoint),
                    "redirected": count(MentionStatus::Redirected),
                    "failed": count(MentionStatus::Failed),
                },
                "results": outcomes,
            })
        ),
        output_formats::MINIMAL => outcomes
            .iter()
            .map(|o| format!("{} {}", o.status, o.target))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => {
            let mut lines = vec![format!(
                "Mentioned {} target(s) from {source}",
                outcomes.len()
            )];
            for (i, outcome) in outcomes.iter().enumerate() {
                lines.push(format!("{:4}. {}", i + 1, describe(outcome)));
            }
            lines.push(format!(
                "Sent: {}, no endpoint: {}, redirected: {}, failed: {}",
                count(MentionStatus::Sent),
                count(MentionStatus::NoEndpoint),
                count(MentionStatus::Redirected),
                count(MentionStatus::Failed)
            ));
            lines.join("\n")
        }
    }
}

fn describe(outcome: &MentionOutcome) -> String {
    let mut line = format!("{} - {}", outcome.status, outcome.target);
    if let Some(ref endpoint) = outcome.endpoint {
        line.push_str(&format!(" - {endpoint}"));
    }
    if let Some(code) = outcome.status_code {
        line.push_str(&format!(" - HTTP {code}"));
    }
    if let Some(ref location) = outcome.location {
        line.push_str(&format!(" -> {location}"));
    }
    if let Some(ref error) = outcome.error {
        line.push_str(&format!(" ({error})"));
    }
    line
}

use crate::config::Config;
use crate::discovery::DiscoveryResult;
use crate::mention::MentionOutcome;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let max_redirects = config.max_redirects.unwrap_or_default();
    let skip_ssl_verification = config.skip_ssl_verification.unwrap_or(false);
    let header_count = config.headers.as_ref().map_or(0, |h| h.len());

    info!("Configuration: timeout={timeout}s, max_redirects={max_redirects}");
    info!("HTTP: extra_headers={header_count}, skip_ssl={skip_ssl_verification}");
    if let Some(ref proxy) = config.proxy {
        info!("HTTP: proxy={proxy}");
    }
}

/// Log the outcome of a discovery
pub fn log_discovery_result(url: &str, result: &DiscoveryResult) {
    match result.endpoint() {
        Some(endpoint) => info!("✓ {url} -> endpoint {endpoint}"),
        None => info!(
            "✗ {url} -> no endpoint (HTTP {})",
            result.response.status().as_u16()
        ),
    }
}

/// Log the outcome of one mention
pub fn log_mention_outcome(outcome: &MentionOutcome) {
    match (outcome.status_code, outcome.error.as_deref()) {
        (_, Some(err)) => warn!("✗ {} -> {err}", outcome.target),
        (Some(code), None) => info!("✓ {} -> {} ({code})", outcome.target, outcome.status),
        (None, None) => info!("- {} -> {}", outcome.target, outcome.status),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments, and turns it into `RequestOptions`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, output_formats, timeouts};
use crate::core::error::{Result, WebmentionError};
use crate::http::{RequestOptions, parse_header};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for HTTP requests
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// Redirects followed while discovering an endpoint
    pub max_redirects: Option<usize>,

    /// Extra headers sent with every request, keyed by lowercase name
    pub headers: Option<BTreeMap<String, String>>,

    /// Concurrent targets when mentioning several at once
    pub concurrency: Option<usize>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            user_agent: None,
            proxy: None,
            skip_ssl_verification: Some(false),
            max_redirects: Some(defaults::MAX_REDIRECTS),
            headers: None,
            concurrency: None, // Will default to CPU core count
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WebmentionError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            WebmentionError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        for i in 1..=defaults::CONFIG_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) -> Result<()> {
        // Network
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
        if let Some(max_redirects) = cli_config.max_redirects {
            self.max_redirects = Some(max_redirects);
        }
        if !cli_config.headers.is_empty() {
            let headers = self.headers.get_or_insert_with(BTreeMap::new);
            for line in &cli_config.headers {
                let (name, value) = parse_header(line)?;
                let value = value.to_str().map_err(|e| {
                    WebmentionError::InvalidHeader(format!("value for '{name}': {e}"))
                })?;
                headers.insert(name.as_str().to_string(), value.to_string());
            }
        }

        // Behavior & output
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        Ok(())
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Concurrency to use, falling back to the number of CPU cores
    pub fn concurrency_or_default(&self) -> usize {
        self.concurrency.unwrap_or_else(num_cpus::get)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Build the request options every discover/send call uses
    pub fn request_options(&self) -> Result<RequestOptions> {
        let mut options = RequestOptions {
            timeout: Some(self.timeout_duration()),
            user_agent: self.user_agent.clone(),
            proxy: self.proxy.clone(),
            accept_invalid_certs: self.skip_ssl_verification.unwrap_or(false),
            max_redirects: self.max_redirects.unwrap_or(defaults::MAX_REDIRECTS),
            ..Default::default()
        };

        if let Some(ref headers) = self.headers {
            for (name, value) in headers {
                options = options.with_header(name, value)?;
            }
        }

        Ok(options)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(WebmentionError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(WebmentionError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        // Validate concurrency
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(WebmentionError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(WebmentionError::Config(format!(
                    "Concurrency of {concurrency} is extremely high. Consider using a smaller value."
                )));
            }
        }

        // Validate redirect limit
        if let Some(max_redirects) = self.max_redirects
            && max_redirects > defaults::MAX_REDIRECTS_LIMIT
        {
            return Err(WebmentionError::Config(format!(
                "Max redirects of {max_redirects} is above the limit of {}.",
                defaults::MAX_REDIRECTS_LIMIT
            )));
        }

        // Validate output format
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(WebmentionError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        // Validate headers by building the request options
        self.request_options()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Network
    pub timeout: Option<u64>,             // --timeout
    pub user_agent: Option<String>,       // --user-agent
    pub proxy: Option<String>,            // --proxy
    pub skip_ssl_verification: bool,      // --insecure
    pub max_redirects: Option<usize>,     // --max-redirects
    pub headers: Vec<String>,             // --header

    // Behavior & output
    pub concurrency: Option<usize>,    // --concurrency
    pub output_format: Option<String>, // --format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout, Some(timeouts::DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.max_redirects, Some(defaults::MAX_REDIRECTS));
        assert_eq!(config.skip_ssl_verification, Some(false));
        assert_eq!(config.output_format(), output_formats::DEFAULT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"timeout = 60\nuser_agent = \"test-agent\"\n\n[headers]\nAuthorization = \"Bearer abc\"\n",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.timeout, Some(60));
        assert_eq!(config.user_agent, Some("test-agent".to_string()));

        let options = config.request_options()?;
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));
        assert_eq!(options.headers.get("authorization").unwrap(), "Bearer abc");
        Ok(())
    }

    #[test]
    fn test_config_load_from_file_invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = [")?;

        match Config::load_from_file(file.path()) {
            Err(WebmentionError::Config(msg)) => assert!(msg.contains("Invalid TOML")),
            other => panic!("Expected Config error, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_config_load_from_missing_file() {
        let result = Config::load_from_file("definitely-not-here.toml");
        assert!(matches!(result, Err(WebmentionError::Config(_))));
    }

    #[test]
    fn test_config_merge_with_cli() -> Result<()> {
        let mut config = Config {
            headers: Some(BTreeMap::from([(
                "authorization".to_string(),
                "from-file".to_string(),
            )])),
            ..Default::default()
        };
        let cli_config = CliConfig {
            timeout: Some(45),
            skip_ssl_verification: true,
            headers: vec!["Authorization: from-cli".to_string(), "X-Trace: 1".to_string()],
            verbose: true,
            ..Default::default()
        };

        config.merge_with_cli(&cli_config)?;

        assert_eq!(config.timeout, Some(45));
        assert_eq!(config.skip_ssl_verification, Some(true));
        assert_eq!(config.verbose, Some(true));
        let headers = config.headers.unwrap();
        assert_eq!(headers.get("authorization").map(String::as_str), Some("from-cli"));
        assert_eq!(headers.get("x-trace").map(String::as_str), Some("1"));
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli_bad_header() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            headers: vec!["missing colon".to_string()],
            ..Default::default()
        };

        assert!(matches!(
            config.merge_with_cli(&cli_config),
            Err(WebmentionError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = vec![
            Config {
                timeout: Some(0),
                ..Default::default()
            },
            Config {
                timeout: Some(timeouts::MAX_TIMEOUT_SECONDS + 1),
                ..Default::default()
            },
            Config {
                concurrency: Some(0),
                ..Default::default()
            },
            Config {
                max_redirects: Some(defaults::MAX_REDIRECTS_LIMIT + 1),
                ..Default::default()
            },
            Config {
                output_format: Some("xml".to_string()),
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(WebmentionError::Config(_))),
                "{config:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_header_name() {
        let config = Config {
            headers: Some(BTreeMap::from([("bad name".to_string(), "x".to_string())])),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(WebmentionError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_concurrency_or_default() {
        let config = Config {
            concurrency: Some(3),
            ..Default::default()
        };
        assert_eq!(config.concurrency_or_default(), 3);
        assert!(Config::default().concurrency_or_default() >= 1);
    }

    #[test]
    fn test_timeout_duration() {
        let config = Config {
            timeout: None,
            ..Default::default()
        };
        assert_eq!(
            config.timeout_duration(),
            Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS)
        );
    }
}

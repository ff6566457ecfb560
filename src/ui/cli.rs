// Command-line interface definitions and parsing for webmention

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Network Options
    /// Request timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        global = true,
        value_name = "SECONDS",
        help_heading = "Network Options"
    )]
    pub timeout: Option<u64>,

    /// Extra request header, e.g. "Authorization: Bearer TOKEN" (repeatable)
    #[arg(
        short = 'H',
        long = "header",
        global = true,
        value_name = "HEADER",
        help_heading = "Network Options"
    )]
    pub headers: Vec<String>,

    /// Custom User-Agent header
    #[arg(long, global = true, value_name = "AGENT", help_heading = "Network Options")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, global = true, value_name = "URL", help_heading = "Network Options")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, global = true, help_heading = "Network Options")]
    pub insecure: bool,

    /// Redirects followed during discovery (default: 10)
    #[arg(long, global = true, value_name = "COUNT", help_heading = "Network Options")]
    pub max_redirects: Option<usize>,

    /// Targets mentioned at once (default: CPU cores)
    #[arg(long, global = true, value_name = "COUNT", help_heading = "Network Options")]
    pub concurrency: Option<usize>,

    // Output & Verbosity
    /// Suppress log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, global = true, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the webmention endpoint advertised by a URL
    Discover {
        /// Page to inspect
        url: String,
    },
    /// Send a webmention to a known endpoint (redirects are not followed)
    Send {
        /// Endpoint receiving the notification
        endpoint: String,
        /// Page that links to the target
        source: String,
        /// Page being linked to
        target: String,
    },
    /// Discover each target's endpoint and send it a webmention
    Mention {
        /// Page that links to the targets
        source: String,
        /// Pages being linked to
        #[arg(required = true)]
        targets: Vec<String>,
    },
    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments to a CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        // Network
        timeout: cli.timeout,
        user_agent: cli.user_agent.clone(),
        proxy: cli.proxy.clone(),
        skip_ssl_verification: cli.insecure,
        max_redirects: cli.max_redirects,
        headers: cli.headers.clone(),

        // Behavior & output
        concurrency: cli.concurrency,
        output_format: cli.format.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,

        // Configuration
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

use clap::{CommandFactory, Parser};
use webmention::config::{CliConfig, Config};
use webmention::http::RequestOptions;
use webmention::reporting::logging;
use webmention::reporting::{render_discovery, render_mentions, render_send};
use webmention::ui::{Cli, Commands, cli_to_config, print_completions};
use webmention::{discover, mention_all, send};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::Completion { shell } => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main logic extracted from main() for testing
pub async fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    let options = config.request_options().inspect_err(|e| {
        logging::log_error("Could not build request options", Some(e));
    })?;
    let output_format = config.output_format();

    match cli.command {
        Commands::Discover { ref url } => {
            let result = discover(url, &options).await?;
            logging::log_discovery_result(url, &result);
            println!("{}", render_discovery(url, &result, output_format));
            Ok(0)
        }
        Commands::Send {
            ref endpoint,
            ref source,
            ref target,
        } => {
            let response = send(endpoint, source, target, &options).await?;
            println!("{}", render_send(endpoint, &response, output_format));
            Ok(send_exit_code(response.is_redirection()))
        }
        Commands::Mention {
            ref source,
            ref targets,
        } => {
            mention_targets(source, targets, &options, &config, output_format).await
        }
        Commands::Completion { .. } => Ok(0),
    }
}

async fn mention_targets(
    source: &str,
    targets: &[String],
    options: &RequestOptions,
    config: &Config,
    output_format: &str,
) -> Result<i32, Box<dyn std::error::Error>> {
    let outcomes = mention_all(source, targets, options, config.concurrency_or_default()).await?;
    for outcome in &outcomes {
        logging::log_mention_outcome(outcome);
    }

    println!("{}", render_mentions(source, &outcomes, output_format));

    let issues_found = outcomes.iter().filter(|o| o.is_issue()).count();
    Ok(determine_exit_code(issues_found))
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config)?;
    config.validate()?;
    Ok(config)
}

/// An unfollowed redirect means the mention was not confirmed
pub fn send_exit_code(redirected: bool) -> i32 {
    if redirected { 1 } else { 0 }
}

pub fn determine_exit_code(issues_found: usize) -> i32 {
    if issues_found > 0 { 1 } else { 0 }
}

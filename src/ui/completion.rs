//! Shell completion generation for the webmention CLI

use clap::Command;
use clap_complete::{Generator, generate};

/// Generate shell completions for the given shell
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    generate(
        generator,
        app,
        app.get_name().to_string(),
        &mut std::io::stdout(),
    );
}

/// Generate completions into a string, for tests and packaging scripts
pub fn completion_script<G: Generator>(generator: G, app: &mut Command) -> String {
    let mut buffer = Vec::new();
    generate(generator, app, app.get_name().to_string(), &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

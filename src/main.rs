use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wellcharted::cli::orchestration::{self, Workspace, EXIT_FAILURE, EXIT_SUCCESS};
use wellcharted::cli::{Action, Cli};
use wellcharted::ui::{BasicUi, Ui};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let _ = e.print();
            process::exit(if e.use_stderr() {
                EXIT_FAILURE
            } else {
                EXIT_SUCCESS
            });
        }
    };

    init_tracing(cli.verbose);

    let mut ui = BasicUi::stdio();
    let code = match run(cli, &mut ui) {
        Ok(code) => code,
        Err(e) => {
            ui.error(&format!("{:#}", e));
            EXIT_FAILURE
        }
    };

    process::exit(code);
}

fn run<U: Ui>(cli: Cli, ui: &mut U) -> Result<i32> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let workspace = Workspace::load(cwd, cli.config.as_deref())?;
    let action = Action::from(cli.command);

    Ok(orchestration::execute(&action, &workspace, ui))
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

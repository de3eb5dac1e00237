// src/bin/armature.rs

use anyhow::Result;
use armature::cli::{Cli, dispatcher};
use clap::Parser;
use colored::Colorize;
use std::env;

/// The main entry point of the `armature` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    // The entire application logic is wrapped in a Result to enable
    // centralized error handling and a single exit-code decision point.
    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        let code = e
            .downcast_ref::<dispatcher::DispatchError>()
            .map(dispatcher::DispatchError::exit_code)
            .unwrap_or(dispatcher::EXIT_FAILURE);
        std::process::exit(code);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    let project_root = env::current_dir()?;
    dispatcher::dispatch(cli.command, cli.args, &project_root)
}

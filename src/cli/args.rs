// src/cli/args.rs
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)] // The command token is consumed by the dispatcher.
pub struct MakeArgs {
    /// The artifact name, optionally path-like ("admin/settings").
    pub name: String,

    /// Overwrite the target file if it already exists.
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct PageArgs {
    /// The page name, optionally path-like ("admin/settings").
    pub name: String,

    /// Overwrite the target file if it already exists.
    #[arg(long, short)]
    pub force: bool,

    /// Register the route behind the authentication guard.
    #[arg(long)]
    pub auth: bool,

    /// Register the route as the application's initial route.
    #[arg(long)]
    pub initial: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct CommandArgs {
    /// The custom command name.
    pub name: String,

    /// The category the command is dispatched under.
    #[arg(long, default_value = crate::constants::DEFAULT_COMMAND_CATEGORY)]
    pub category: String,

    /// Overwrite the script file if it already exists.
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
pub struct SlateArgs {
    /// Path to the slate package file (a JSON batch of artifact templates).
    pub file: String,

    /// Overwrite existing files instead of skipping conflicting artifacts.
    #[arg(long, short)]
    pub force: bool,
}

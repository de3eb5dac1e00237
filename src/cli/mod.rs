use clap::Parser;

pub mod args;
pub mod dispatcher;
pub mod handlers;
pub mod stubs;

/// armature: scaffold artifacts and wire them into your project.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The command to run, as `<category>:<action>` (e.g. `make:controller`).
    pub command: Option<String>,

    /// Arguments forwarded to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

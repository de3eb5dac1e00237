// src/cli/handlers/project.rs

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::constants::INSTALL_COMMAND;
use crate::system::executor;

/// The `project:install` handler: fetches the project's declared
/// dependencies through the platform toolchain.
pub fn install(root: &Path, _args: Vec<String>) -> Result<()> {
    println!("Running '{}'...", INSTALL_COMMAND.bold());
    let code = executor::run_command(INSTALL_COMMAND, root)?;
    if code == 0 {
        println!("{} Dependencies installed.", "✓".green().bold());
    } else {
        // The child's own output already explains the failure.
        println!(
            "{} '{}' exited with code {}.",
            "!".yellow().bold(),
            INSTALL_COMMAND,
            code
        );
    }
    Ok(())
}

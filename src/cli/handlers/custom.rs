// src/cli/handlers/custom.rs

use std::path::Path;

use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::constants::{COMMANDS_DIR, SCRIPT_INTERPRETER};
use crate::models::CustomCommandSpec;
use crate::system::executor;

/// Executes a manifest-registered command: `dart <script> [args...]` from
/// the project root. A missing script file is reported before spawning.
pub fn execute(root: &Path, spec: &CustomCommandSpec, args: &[String]) -> Result<()> {
    let script = root.join(COMMANDS_DIR).join(&spec.script);
    if !script.exists() {
        return Err(anyhow!(
            "Script '{}' for command '{}:{}' does not exist. \
             Remove the manifest entry or restore the file.",
            script.display(),
            spec.category,
            spec.name
        ));
    }

    let mut parts = vec![
        SCRIPT_INTERPRETER.to_string(),
        script.display().to_string(),
    ];
    parts.extend(args.iter().cloned());
    let command_line = shlex::try_join(parts.iter().map(String::as_str))
        .map_err(|e| anyhow!("Could not assemble command line: {e}"))?;

    log::debug!("Executing custom command: {}", command_line);
    let code = executor::run_command(&command_line, root)?;
    if code != 0 {
        println!(
            "{} Command '{}:{}' exited with code {}.",
            "!".yellow().bold(),
            spec.category,
            spec.name,
            code
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_script_is_reported_before_spawning() {
        let dir = tempdir().unwrap();
        let spec = CustomCommandSpec {
            name: "seed".to_string(),
            category: "app".to_string(),
            script: "seed.dart".to_string(),
        };
        let err = execute(dir.path(), &spec, &[]).unwrap_err();
        assert!(err.to_string().contains("seed.dart"));
    }
}

// src/system/executor.rs

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// Spawns an external process with the parent's standard I/O and blocks
/// until it exits, returning the child's exit code.
///
/// A non-zero exit code is reported to the caller through the return value,
/// never as an error. There is no timeout or cancellation: a hung child
/// hangs the invoking command.
pub fn run_command(command_line: &str, cwd: &Path) -> Result<i32, ExecutionError> {
    let trimmed_command = command_line.trim();
    if trimmed_command.is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }

    let parts = shlex::split(trimmed_command)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed_command.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Err(ExecutionError::EmptyCommand);
    };
    let clean_cwd = dunce::simplified(cwd);

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .current_dir(clean_cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // Fallback for Windows shell built-ins: retry through `cmd /C` when the
    // program itself cannot be found.
    let status = match command.status() {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound && cfg!(target_os = "windows") => {
            log::debug!("Command '{}' not found. Retrying with cmd /C.", program);
            StdCommand::new("cmd")
                .arg("/C")
                .arg(trimmed_command)
                .current_dir(clean_cwd)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?
        }
        Err(e) => {
            return Err(ExecutionError::CommandFailed(trimmed_command.to_string(), e));
        }
    };

    let code = status.code().unwrap_or(-1);
    if !status.success() {
        log::warn!("Command '{}' exited with code {}.", trimmed_command, code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn empty_command_is_rejected() {
        let cwd = env::current_dir().unwrap();
        assert!(matches!(
            run_command("   ", &cwd),
            Err(ExecutionError::EmptyCommand)
        ));
    }

    #[test]
    fn unparseable_command_is_rejected() {
        let cwd = env::current_dir().unwrap();
        assert!(matches!(
            run_command("echo 'unterminated", &cwd),
            Err(ExecutionError::CommandParse(_))
        ));
    }
}

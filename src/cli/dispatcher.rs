// src/cli/dispatcher.rs

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;

use crate::cli::handlers;
use crate::constants::CUSTOM_COMMANDS_MANIFEST;
use crate::core::registry::CustomCommandRegistry;
use crate::system::fs::OsFileSystem;

/// Process exit code for a command that failed or was not recognized.
pub const EXIT_FAILURE: i32 = 1;
/// Process exit code for a syntactically invalid command token.
pub const EXIT_MALFORMED: i32 = 2;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Invalid command '{0}'. Commands use the form <category>:<action>, e.g. make:controller.")]
    MalformedToken(String),
    #[error("Unknown command '{0}:{1}'. Run without arguments to list available commands.")]
    UnknownCommand(String, String),
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedToken(_) => EXIT_MALFORMED,
            Self::UnknownCommand(..) => EXIT_FAILURE,
        }
    }
}

/// Defines a built-in command and its synchronous handler function.
/// The handler signature is kept consistent across all commands for
/// simplicity in the registry.
struct CommandDefinition {
    category: &'static str,
    name: &'static str,
    summary: &'static str,
    handler: fn(&Path, Vec<String>) -> Result<()>,
}

/// The single source of truth for all built-in commands. To add a new
/// command, simply add a new entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        category: "make",
        name: "controller",
        summary: "Create a controller and register it",
        handler: handlers::make::controller,
    },
    CommandDefinition {
        category: "make",
        name: "page",
        summary: "Create a page and add its route",
        handler: handlers::make::page,
    },
    CommandDefinition {
        category: "make",
        name: "navigation_hub",
        summary: "Create a navigation hub and add its route",
        handler: handlers::make::navigation_hub,
    },
    CommandDefinition {
        category: "make",
        name: "model",
        summary: "Create a model and register its decoders",
        handler: handlers::make::model,
    },
    CommandDefinition {
        category: "make",
        name: "theme",
        summary: "Create a theme and register it",
        handler: handlers::make::theme,
    },
    CommandDefinition {
        category: "make",
        name: "theme_colors",
        summary: "Create a theme color palette",
        handler: handlers::make::theme_colors,
    },
    CommandDefinition {
        category: "make",
        name: "provider",
        summary: "Create a provider and register it",
        handler: handlers::make::provider,
    },
    CommandDefinition {
        category: "make",
        name: "route_guard",
        summary: "Create a route guard",
        handler: handlers::make::route_guard,
    },
    CommandDefinition {
        category: "make",
        name: "form",
        summary: "Create a form",
        handler: handlers::make::form,
    },
    CommandDefinition {
        category: "make",
        name: "command",
        summary: "Create a custom command script",
        handler: handlers::make::command,
    },
    CommandDefinition {
        category: "make",
        name: "event",
        summary: "Create an event and register it",
        handler: handlers::make::event,
    },
    CommandDefinition {
        category: "make",
        name: "api_service",
        summary: "Create an API service and register it",
        handler: handlers::make::api_service,
    },
    CommandDefinition {
        category: "make",
        name: "interceptor",
        summary: "Create a networking interceptor",
        handler: handlers::make::interceptor,
    },
    CommandDefinition {
        category: "make",
        name: "stateless_widget",
        summary: "Create a stateless widget",
        handler: handlers::make::stateless_widget,
    },
    CommandDefinition {
        category: "make",
        name: "stateful_widget",
        summary: "Create a stateful widget",
        handler: handlers::make::stateful_widget,
    },
    CommandDefinition {
        category: "make",
        name: "journey_widget",
        summary: "Create a journey widget",
        handler: handlers::make::journey_widget,
    },
    CommandDefinition {
        category: "make",
        name: "state_managed_widget",
        summary: "Create a state managed widget",
        handler: handlers::make::state_managed_widget,
    },
    CommandDefinition {
        category: "slate",
        name: "apply",
        summary: "Apply a slate package of artifact templates",
        handler: handlers::slate::apply,
    },
    CommandDefinition {
        category: "project",
        name: "install",
        summary: "Fetch the project's declared dependencies",
        handler: handlers::project::install,
    },
];

/// Finds a built-in command definition by its category and action.
fn find_command(category: &str, name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.category == category && cmd.name == name)
}

/// Splits a `<category>:<action>` token. Both sides must be non-empty and
/// the token must contain exactly one separator.
pub fn parse_command_token(token: &str) -> Result<(&str, &str), DispatchError> {
    match token.split_once(':') {
        Some((category, action))
            if !category.is_empty() && !action.is_empty() && !action.contains(':') =>
        {
            Ok((category, action))
        }
        _ => Err(DispatchError::MalformedToken(token.to_string())),
    }
}

/// The main application dispatcher. Routes a parsed command token to its
/// built-in handler, falling back to the project's custom command manifest.
pub fn dispatch(command: Option<String>, args: Vec<String>, project_root: &Path) -> Result<()> {
    log::debug!("Dispatching command {:?} with args {:?}", command, args);

    let Some(token) = command else {
        print_menu(project_root)?;
        return Ok(());
    };

    let (category, action) = parse_command_token(&token)?;
    if let Some(command) = find_command(category, action) {
        return (command.handler)(project_root, args);
    }

    // Not built-in: check the project's custom command manifest.
    let fs = OsFileSystem;
    let registry = CustomCommandRegistry::new(&fs, project_root.join(CUSTOM_COMMANDS_MANIFEST));
    let customs = registry.load()?;
    if let Some(spec) = customs
        .iter()
        .find(|spec| spec.category == category && spec.name == action)
    {
        return handlers::custom::execute(project_root, spec, &args);
    }

    Err(DispatchError::UnknownCommand(category.to_string(), action.to_string()).into())
}

/// Prints the command menu: built-ins merged with the project's custom
/// commands, sorted by `(category, name)`.
fn print_menu(project_root: &Path) -> Result<()> {
    let mut rows: Vec<(String, String, String)> = COMMAND_REGISTRY
        .iter()
        .map(|cmd| {
            (
                cmd.category.to_string(),
                cmd.name.to_string(),
                cmd.summary.to_string(),
            )
        })
        .collect();

    let fs = OsFileSystem;
    let registry = CustomCommandRegistry::new(&fs, project_root.join(CUSTOM_COMMANDS_MANIFEST));
    for spec in registry.load()? {
        rows.push((spec.category, spec.name, format!("Run {}", spec.script)));
    }
    rows.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

    println!("{}", "Available commands:".bold());
    let mut current_category = "";
    for (category, name, summary) in &rows {
        if category != current_category {
            println!("\n  {}", category.cyan().bold());
            current_category = category;
        }
        println!("    {}:{:<24} {}", category, name, summary.dimmed());
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn command_tokens_split_on_a_single_colon() {
        assert_eq!(parse_command_token("make:controller").unwrap(), ("make", "controller"));
        assert_eq!(parse_command_token("slate:apply").unwrap(), ("slate", "apply"));

        for bad in ["make", "make:", ":controller", "a:b:c", ""] {
            assert!(matches!(
                parse_command_token(bad),
                Err(DispatchError::MalformedToken(_))
            ));
        }
    }

    #[test]
    fn malformed_and_unknown_commands_carry_distinct_exit_codes() {
        assert_eq!(
            DispatchError::MalformedToken("x".to_string()).exit_code(),
            EXIT_MALFORMED
        );
        assert_eq!(
            DispatchError::UnknownCommand("make".to_string(), "widget".to_string()).exit_code(),
            EXIT_FAILURE
        );
    }

    #[test]
    fn every_artifact_kind_has_a_make_command() {
        use crate::models::ArtifactKind;
        for kind in [
            ArtifactKind::Controller,
            ArtifactKind::Page,
            ArtifactKind::NavigationHub,
            ArtifactKind::Model,
            ArtifactKind::Theme,
            ArtifactKind::ThemeColors,
            ArtifactKind::Provider,
            ArtifactKind::RouteGuard,
            ArtifactKind::Form,
            ArtifactKind::Command,
            ArtifactKind::Event,
            ArtifactKind::ApiService,
            ArtifactKind::Interceptor,
            ArtifactKind::StatelessWidget,
            ArtifactKind::StatefulWidget,
            ArtifactKind::JourneyWidget,
            ArtifactKind::StateManagedWidget,
        ] {
            assert!(
                find_command("make", kind.label()).is_some(),
                "no make command for {:?}",
                kind
            );
        }
    }

    #[test]
    fn unknown_command_is_reported_after_checking_the_manifest() {
        let dir = tempdir().unwrap();
        let err = dispatch(Some("make:widget".to_string()), vec![], dir.path()).unwrap_err();
        let dispatch_err = err.downcast_ref::<DispatchError>().unwrap();
        assert!(matches!(dispatch_err, DispatchError::UnknownCommand(..)));
    }

    #[test]
    fn bare_invocation_prints_the_menu_and_succeeds() {
        let dir = tempdir().unwrap();
        assert!(dispatch(None, vec![], dir.path()).is_ok());
    }
}

// src/cli/handlers/make.rs
//
// One handler per `make:` action. Each parses its own arguments, renders
// the default stub and hands the request to the scaffold engine.

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::args::{CommandArgs, MakeArgs, PageArgs};
use crate::cli::stubs;
use crate::core::generators::{ScaffoldEngine, artifact_identity};
use crate::core::patcher::PatchOutcome;
use crate::models::{ArtifactKind, ArtifactRequest, RouteOptions};
use crate::system::fs::OsFileSystem;

pub fn controller(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Controller, args)
}

pub fn page(root: &Path, args: Vec<String>) -> Result<()> {
    routed(root, ArtifactKind::Page, args)
}

pub fn navigation_hub(root: &Path, args: Vec<String>) -> Result<()> {
    routed(root, ArtifactKind::NavigationHub, args)
}

pub fn model(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Model, args)
}

pub fn theme(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Theme, args)
}

pub fn theme_colors(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::ThemeColors, args)
}

pub fn provider(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Provider, args)
}

pub fn route_guard(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::RouteGuard, args)
}

pub fn form(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Form, args)
}

pub fn event(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Event, args)
}

pub fn api_service(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::ApiService, args)
}

pub fn interceptor(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::Interceptor, args)
}

pub fn stateless_widget(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::StatelessWidget, args)
}

pub fn stateful_widget(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::StatefulWidget, args)
}

pub fn journey_widget(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::JourneyWidget, args)
}

pub fn state_managed_widget(root: &Path, args: Vec<String>) -> Result<()> {
    simple(root, ArtifactKind::StateManagedWidget, args)
}

/// The `make:command` handler: writes the script stub, then registers the
/// command in the manifest so the dispatcher can route to it.
pub fn command(root: &Path, args: Vec<String>) -> Result<()> {
    let parsed = CommandArgs::try_parse_from(&args)?;

    let fs = OsFileSystem;
    let engine = ScaffoldEngine::new(&fs, root.to_path_buf());
    let identity = artifact_identity(ArtifactKind::Command, &parsed.name)?;
    let stub = stubs::stub_for(&identity);

    let (artifact, added) =
        engine.make_command(&parsed.name, &parsed.category, parsed.force, &stub)?;
    println!(
        "{} Created command at '{}'.",
        "✓".green().bold(),
        artifact.file.display()
    );
    if added {
        println!(
            "{} Registered '{}:{}' in the command manifest.",
            "✓".green().bold(),
            parsed.category,
            identity.base
        );
    } else {
        println!(
            "{} A command named '{}' is already in the manifest; left unchanged.",
            "!".yellow().bold(),
            identity.base
        );
    }
    Ok(())
}

/// Shared path for kinds whose only inputs are a name and `--force`.
fn simple(root: &Path, kind: ArtifactKind, args: Vec<String>) -> Result<()> {
    let parsed = MakeArgs::try_parse_from(&args)?;
    scaffold(root, kind, &parsed.name, parsed.force, RouteOptions::default())
}

/// Shared path for pages and navigation hubs, which carry route flags.
fn routed(root: &Path, kind: ArtifactKind, args: Vec<String>) -> Result<()> {
    let parsed = PageArgs::try_parse_from(&args)?;
    scaffold(
        root,
        kind,
        &parsed.name,
        parsed.force,
        RouteOptions {
            authenticated: parsed.auth,
            initial: parsed.initial,
        },
    )
}

fn scaffold(
    root: &Path,
    kind: ArtifactKind,
    name: &str,
    force: bool,
    route: RouteOptions,
) -> Result<()> {
    let fs = OsFileSystem;
    let engine = ScaffoldEngine::new(&fs, root.to_path_buf());
    let identity = artifact_identity(kind, name)?;
    let request = ArtifactRequest {
        name: name.to_string(),
        kind,
        force,
        stub: stubs::stub_for(&identity),
        route,
    };

    let artifact = engine.make(&request)?;
    println!(
        "{} Created {} '{}' at '{}'.",
        "✓".green().bold(),
        kind.label(),
        artifact.class_name,
        artifact.file.display()
    );
    match artifact.registration {
        Some(PatchOutcome::Applied { .. }) => {
            println!("{} Wired into the project's registrations.", "✓".green().bold());
        }
        Some(PatchOutcome::AlreadyPresent) => {
            println!("{} Already wired in; registration left unchanged.", "✓".green().bold());
        }
        Some(PatchOutcome::PatternNotFound) => {
            println!(
                "{} Could not find a known registration block; add '{}' by hand.",
                "!".yellow().bold(),
                artifact.class_name
            );
        }
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_name_surfaces_as_a_parse_error() {
        let dir = tempdir().unwrap();
        assert!(controller(dir.path(), vec![]).is_err());
    }

    #[test]
    fn controller_handler_creates_the_file() {
        let dir = tempdir().unwrap();
        controller(dir.path(), vec!["user".to_string()]).unwrap();
        assert!(
            dir.path()
                .join("lib/app/controllers/user_controller.dart")
                .exists()
        );
    }

    #[test]
    fn page_handler_accepts_route_flags() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("lib/routes")).unwrap();
        std::fs::write(
            dir.path().join("lib/routes/router.dart"),
            "appRouter() => nyRoutes((router) {\n});\n",
        )
        .unwrap();

        page(
            dir.path(),
            vec!["login".to_string(), "--auth".to_string()],
        )
        .unwrap();
        let router = std::fs::read_to_string(dir.path().join("lib/routes/router.dart")).unwrap();
        assert!(router.contains("router.add(LoginPage.path, authenticatedRoute: true);"));
    }
}

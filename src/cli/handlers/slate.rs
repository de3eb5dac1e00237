// src/cli/handlers/slate.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use crate::cli::args::SlateArgs;
use crate::core::generators::ScaffoldEngine;
use crate::core::slate;
use crate::models::SlatePackage;
use crate::system::fs::OsFileSystem;

/// The `slate:apply` handler: reads a slate package file and applies its
/// templates to the project.
pub fn apply(root: &Path, args: Vec<String>) -> Result<()> {
    let parsed = SlateArgs::try_parse_from(&args)?;

    let text = fs::read_to_string(&parsed.file)
        .with_context(|| format!("Could not read slate file '{}'.", parsed.file))?;
    let package: SlatePackage = serde_json::from_str(&text)
        .with_context(|| format!("Slate file '{}' is not a valid package.", parsed.file))?;

    println!(
        "Applying slate '{}' ({} template(s))...",
        package.name.bold(),
        package.templates.len()
    );

    let fs = OsFileSystem;
    let engine = ScaffoldEngine::new(&fs, root.to_path_buf());
    let report = slate::apply(&engine, &package, parsed.force)?;

    for file in &report.created {
        println!("  {} {}", "✓".green().bold(), file.display());
    }
    for (name, path) in &report.skipped {
        println!(
            "  {} Skipped '{}': a file already exists at '{}'.",
            "!".yellow().bold(),
            name,
            path
        );
    }
    println!(
        "{} Slate '{}' applied: {} created, {} skipped.",
        "✓".green().bold(),
        package.name,
        report.created.len(),
        report.skipped.len()
    );
    Ok(())
}

// src/core/slate.rs
//
// Batch application of artifact templates. The dependency pre-flight runs
// before anything is created; once creation starts there is no rollback of
// already-written files. A mid-batch conflict skips that artifact only.

use std::path::PathBuf;

use crate::constants::DEPENDENCY_MANIFEST;
use crate::core::generators::{ScaffoldEngine, ScaffoldError};
use crate::core::materializer::MaterializeError;
use crate::core::pubspec;
use crate::models::{ArtifactRequest, SlatePackage};
use crate::system::fs::FileSystem;

/// What a batch run actually did.
#[derive(Debug, Default)]
pub struct SlateReport {
    pub created: Vec<PathBuf>,
    /// `(artifact name, reason)` pairs for artifacts that were skipped.
    pub skipped: Vec<(String, String)>,
}

/// Applies every template in `package`, strictly sequentially in input
/// order.
///
/// Pre-flight: all `required_packages` must already be declared in the
/// project's dependency manifest; any missing package aborts the whole
/// batch before a single file is touched. A per-artifact file conflict
/// (without force) skips just that artifact; any other failure aborts the
/// remainder of the batch without undoing earlier writes.
pub fn apply<F: FileSystem>(
    engine: &ScaffoldEngine<'_, F>,
    package: &SlatePackage,
    force: bool,
) -> Result<SlateReport, ScaffoldError> {
    let manifest_text = engine.read_project_file_or_empty(DEPENDENCY_MANIFEST)?;
    let missing: Vec<&str> = package
        .required_packages
        .iter()
        .map(String::as_str)
        .filter(|pkg| !pubspec::has_declared_package(&manifest_text, pkg))
        .collect();
    if !missing.is_empty() {
        return Err(ScaffoldError::MissingDependency {
            manifest: DEPENDENCY_MANIFEST.to_string(),
            packages: missing.join(", "),
        });
    }

    let mut report = SlateReport::default();
    for template in &package.templates {
        let request = ArtifactRequest {
            name: template.name.clone(),
            kind: template.kind,
            force,
            stub: template.stub.clone(),
            route: template.route,
        };
        match engine.make(&request) {
            Ok(artifact) => report.created.push(artifact.file),
            Err(ScaffoldError::Materialize(MaterializeError::FileConflict { path })) => {
                log::warn!(
                    "Skipping '{}' from slate '{}': a file already exists at '{}'.",
                    template.name,
                    package.name,
                    path
                );
                report.skipped.push((template.name.clone(), path));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}

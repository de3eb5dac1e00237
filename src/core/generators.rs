// src/core/generators.rs
//
// Each artifact kind is a fixed recipe over the same three collaborators:
// the path resolver derives the file location, the materializer writes the
// stub, and the registration patcher wires the artifact into its config
// file. Wiring failures degrade gracefully: the file is already safely
// written, so a missed pattern is logged and the command still succeeds.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{CUSTOM_COMMANDS_MANIFEST, DEPENDENCY_MANIFEST, ROUTER_FILE};
use crate::core::materializer::{FileMaterializer, MaterializeError};
use crate::core::patcher::{PatchError, PatchOutcome, RegistrationEdit, RegistrationPatcher};
use crate::core::paths;
use crate::core::pubspec;
use crate::core::registry::{CustomCommandRegistry, RegistryError};
use crate::core::schemas::RegistrationTarget;
use crate::models::{ArtifactKind, ArtifactRequest, CustomCommandSpec, RouteOptions};
use crate::system::fs::FileSystem;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Artifact name cannot be empty.")]
    EmptyName,
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(
        "Missing required package(s) in {manifest}: {packages}. \
         Declare them and run the batch again."
    )]
    MissingDependency { manifest: String, packages: String },
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The resolved naming identity of an artifact: everything stubs and
/// registration entries need to refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactIdentity {
    pub kind: ArtifactKind,
    /// Snake-cased base name with the kind's suffix stripped.
    pub base: String,
    /// Dart class name, suffix included (`user` -> `UserController`).
    pub class_name: String,
    /// Generated file name (`user_controller.dart`).
    pub file_name: String,
    /// Optional nested directory path mirrored from a path-like input name.
    pub creation_path: Option<String>,
}

/// Derives the naming identity for a raw, possibly path-like artifact name.
pub fn artifact_identity(kind: ArtifactKind, raw_name: &str) -> Result<ArtifactIdentity, ScaffoldError> {
    let (creation_path, raw_base) = paths::split_creation_path(raw_name);
    if raw_base.trim().is_empty() {
        return Err(ScaffoldError::EmptyName);
    }
    let base = match kind.suffix() {
        Some(suffix) => paths::strip_suffix_token(&raw_base, suffix),
        None => paths::snake_case(&raw_base),
    };
    let class_name = match kind.suffix() {
        Some(suffix) => paths::pascal_case(&format!("{base}_{suffix}")),
        None => paths::pascal_case(&base),
    };
    Ok(ArtifactIdentity {
        kind,
        file_name: paths::dart_file_name(&raw_base, kind.suffix()),
        base,
        class_name,
        creation_path,
    })
}

/// Outcome of one artifact creation.
#[derive(Debug)]
pub struct GeneratedArtifact {
    pub file: PathBuf,
    pub class_name: String,
    /// `None` for kinds that do not participate in a registration map.
    pub registration: Option<PatchOutcome>,
}

/// The scaffolding service, rooted at a project directory and parameterized
/// over a filesystem so callers decide how failures surface.
#[derive(Debug)]
pub struct ScaffoldEngine<'a, F: FileSystem> {
    fs: &'a F,
    project_root: PathBuf,
}

impl<'a, F: FileSystem> ScaffoldEngine<'a, F> {
    pub fn new(fs: &'a F, project_root: PathBuf) -> Self {
        Self { fs, project_root }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Reads a project-relative file, mapping errors to the engine taxonomy.
    pub fn read_project_file(&self, relative: &str) -> Result<String, ScaffoldError> {
        let path = self.project_root.join(relative);
        self.fs.read_to_string(&path).map_err(|e| ScaffoldError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Like [`Self::read_project_file`], but a missing file reads as empty.
    pub fn read_project_file_or_empty(&self, relative: &str) -> Result<String, ScaffoldError> {
        match self.read_project_file(relative) {
            Ok(text) => Ok(text),
            Err(ScaffoldError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Creates one artifact: resolve, conflict-check, write, wire in.
    pub fn make(&self, request: &ArtifactRequest) -> Result<GeneratedArtifact, ScaffoldError> {
        let identity = artifact_identity(request.kind, &request.name)?;

        // Kinds that only make sense with a supporting package abort before
        // any mutation when the manifest does not declare it.
        if let Some(package) = request.kind.required_package() {
            let manifest = self.read_project_file_or_empty(DEPENDENCY_MANIFEST)?;
            if !pubspec::has_declared_package(&manifest, package) {
                return Err(ScaffoldError::MissingDependency {
                    manifest: DEPENDENCY_MANIFEST.to_string(),
                    packages: package.to_string(),
                });
            }
        }

        let materializer = FileMaterializer::new(self.fs);

        let folder = self.project_root.join(request.kind.folder());
        materializer.ensure_directory(&folder)?;

        // Nested creation-path segments are created one level at a time,
        // tracking the growing directory.
        let mut dir = folder.clone();
        if let Some(cp) = &identity.creation_path {
            for segment in cp.split('/') {
                dir = dir.join(segment);
                materializer.ensure_directory(&dir)?;
            }
        }

        let file = paths::dart_file_path(
            &folder,
            identity.file_name.trim_end_matches(".dart"),
            None,
            identity.creation_path.as_deref(),
        );
        materializer.assert_absent(&file, request.force)?;
        materializer.write_file(&file, &request.stub)?;
        log::debug!("Created {} at '{}'.", request.kind.label(), file.display());

        let registration = self.register(&identity, request.route)?;
        if matches!(registration, Some(PatchOutcome::PatternNotFound)) {
            log::warn!(
                "No known registration signature found for '{}'; the file was created but not wired in.",
                identity.class_name
            );
        }

        Ok(GeneratedArtifact {
            file,
            class_name: identity.class_name,
            registration,
        })
    }

    /// Creates a custom command script and registers it in the command
    /// manifest. Returns the artifact and whether the manifest changed.
    pub fn make_command(
        &self,
        name: &str,
        category: &str,
        force: bool,
        stub: &str,
    ) -> Result<(GeneratedArtifact, bool), ScaffoldError> {
        let identity = artifact_identity(ArtifactKind::Command, name)?;
        let request = ArtifactRequest {
            name: name.to_string(),
            kind: ArtifactKind::Command,
            force,
            stub: stub.to_string(),
            route: RouteOptions::default(),
        };
        let artifact = self.make(&request)?;

        let script = match &identity.creation_path {
            Some(cp) => format!("{}/{}", cp, identity.file_name),
            None => identity.file_name.clone(),
        };
        let registry =
            CustomCommandRegistry::new(self.fs, self.project_root.join(CUSTOM_COMMANDS_MANIFEST));
        let added = registry.register(&CustomCommandSpec {
            name: identity.base.clone(),
            category: category.to_string(),
            script,
        })?;
        Ok((artifact, added))
    }

    /// Wires the artifact into its registration file, when its kind
    /// participates in one.
    fn register(
        &self,
        identity: &ArtifactIdentity,
        route: RouteOptions,
    ) -> Result<Option<PatchOutcome>, ScaffoldError> {
        let patcher = RegistrationPatcher::new(self.fs);
        let class = &identity.class_name;

        let (target, entries) = match identity.kind {
            ArtifactKind::Controller => (
                RegistrationTarget::Controllers,
                vec![format!("{class}: () => {class}()")],
            ),
            ArtifactKind::Model => (
                RegistrationTarget::ModelDecoders,
                vec![
                    format!(
                        "List<{class}>: (data) => List.from(data).map((json) => {class}.fromJson(json)).toList()"
                    ),
                    format!("{class}: (data) => {class}.fromJson(data)"),
                ],
            ),
            ArtifactKind::ApiService => (
                RegistrationTarget::ApiDecoders,
                vec![format!("{class}: () => {class}()")],
            ),
            ArtifactKind::Provider => (
                RegistrationTarget::Providers,
                vec![format!("{class}: {class}()")],
            ),
            ArtifactKind::Event => (
                RegistrationTarget::Events,
                vec![format!("{class}: {class}()")],
            ),
            ArtifactKind::Theme => {
                let base = &identity.base;
                let display = base.replace('_', " ");
                let theme_fn = paths::camel_case(&format!("{base}_theme"));
                let colors_class = paths::pascal_case(&format!("{base}_theme_colors"));
                (
                    RegistrationTarget::AppThemes,
                    vec![format!(
                        "BaseThemeConfig<ColorStyles>(id: '{base}_theme', description: \"{display} theme\", theme: {theme_fn}, colors: {colors_class}())"
                    )],
                )
            }
            ArtifactKind::Page | ArtifactKind::NavigationHub => {
                let outcome = patcher.apply_router(
                    &self.project_root.join(ROUTER_FILE),
                    &self.import_line(identity),
                    &route_call(class, route),
                )?;
                return Ok(Some(outcome));
            }
            // Remaining kinds are not wired into any registration file.
            _ => return Ok(None),
        };

        let edit = RegistrationEdit {
            target: self.project_root.join(target.file()),
            import_line: self.import_line(identity),
            entries,
        };
        let outcome = patcher.apply(&edit, target.matchers())?;
        if let PatchOutcome::Applied { matcher } = &outcome {
            log::debug!(
                "Registered '{}' in '{}' (schema: {}).",
                class,
                target.file(),
                matcher
            );
        }
        Ok(Some(outcome))
    }

    /// Import statement for a generated file, using the project's
    /// lib-rooted import convention.
    fn import_line(&self, identity: &ArtifactIdentity) -> String {
        let folder = identity
            .kind
            .folder()
            .strip_prefix("lib/")
            .unwrap_or(identity.kind.folder());
        match &identity.creation_path {
            Some(cp) => format!("import '/{}/{}/{}';", folder, cp, identity.file_name),
            None => format!("import '/{}/{}';", folder, identity.file_name),
        }
    }
}

/// Renders the `router.add` call for a page or navigation hub,
/// parameterized by the optional route flags.
fn route_call(class_name: &str, route: RouteOptions) -> String {
    let mut args = format!("{class_name}.path");
    if route.authenticated {
        args.push_str(", authenticatedRoute: true");
    }
    if route.initial {
        args.push_str(", initialRoute: true");
    }
    format!("router.add({args});")
}

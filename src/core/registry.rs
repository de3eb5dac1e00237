// src/core/registry.rs

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::DEFAULT_COMMAND_CATEGORY;
use crate::models::CustomCommandSpec;
use crate::system::fs::FileSystem;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Could not access command manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The manifest is unreadable as a JSON array. The message carries
    /// file-specific guidance because the user owns this file.
    #[error(
        "Command manifest '{path}' is not a valid JSON array: {source}. \
         Fix the file by hand or delete it to start over with an empty manifest."
    )]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Command manifest '{path}': entry {index} is missing required key '{key}'.")]
    MissingKey {
        path: String,
        index: usize,
        key: &'static str,
    },
}

/// Loads and mutates the JSON manifest of user-defined commands.
///
/// The manifest file is the persistent store; specs are loaded once per
/// process and held in memory for the duration of the run.
#[derive(Debug)]
pub struct CustomCommandRegistry<'a, F: FileSystem> {
    fs: &'a F,
    manifest_path: PathBuf,
}

impl<'a, F: FileSystem> CustomCommandRegistry<'a, F> {
    pub fn new(fs: &'a F, manifest_path: PathBuf) -> Self {
        Self { fs, manifest_path }
    }

    /// Loads the manifest, deduplicates by name (first occurrence wins) and
    /// sorts by `(category, name)` for stable listing output.
    ///
    /// A missing manifest is an empty registry, not an error. An entry
    /// missing a required key is skipped with a warning; the other entries
    /// stay usable.
    pub fn load(&self) -> Result<Vec<CustomCommandSpec>, RegistryError> {
        let raw = match self.read_manifest()? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let mut specs = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match self.spec_from_value(&value, index) {
                Ok(spec) => specs.push(spec),
                Err(e) => log::warn!("{e} Skipping this entry."),
            }
        }

        // First-wins duplicate resolution, by manifest file order.
        let mut seen = HashSet::new();
        specs.retain(|spec| {
            let fresh = seen.insert(spec.name.clone());
            if !fresh {
                log::warn!(
                    "Duplicate custom command '{}' in manifest; keeping the first occurrence.",
                    spec.name
                );
            }
            fresh
        });

        specs.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        Ok(specs)
    }

    /// Appends `spec` to the manifest unless an entry with the same name
    /// already exists. Creates the manifest as an empty array first if it is
    /// absent. Returns whether the manifest was modified.
    pub fn register(&self, spec: &CustomCommandSpec) -> Result<bool, RegistryError> {
        let mut raw = self.read_manifest()?.unwrap_or_default();

        let name_taken = raw
            .iter()
            .any(|value| value.get("name").and_then(|n| n.as_str()) == Some(spec.name.as_str()));
        if name_taken {
            log::debug!(
                "Custom command '{}' already registered; manifest left unchanged.",
                spec.name
            );
            return Ok(false);
        }

        raw.push(serde_json::json!({
            "name": spec.name,
            "category": spec.category,
            "script": spec.script,
        }));

        let serialized = serde_json::to_string_pretty(&raw).map_err(|e| RegistryError::Corrupt {
            path: self.manifest_path.display().to_string(),
            source: e,
        })?;
        self.fs
            .write(&self.manifest_path, &serialized)
            .map_err(|e| RegistryError::Io {
                path: self.manifest_path.display().to_string(),
                source: e,
            })?;
        Ok(true)
    }

    /// Reads the manifest as a raw JSON array. `None` when the file does
    /// not exist yet.
    fn read_manifest(&self) -> Result<Option<Vec<serde_json::Value>>, RegistryError> {
        let text = match self.fs.read_to_string(&self.manifest_path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RegistryError::Io {
                    path: self.manifest_path.display().to_string(),
                    source: e,
                });
            }
        };
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| RegistryError::Corrupt {
                path: self.manifest_path.display().to_string(),
                source: e,
            })?;
        Ok(Some(raw))
    }

    fn spec_from_value(
        &self,
        value: &serde_json::Value,
        index: usize,
    ) -> Result<CustomCommandSpec, RegistryError> {
        let field = |key: &'static str| -> Result<String, RegistryError> {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or(RegistryError::MissingKey {
                    path: self.manifest_path.display().to_string(),
                    index,
                    key,
                })
        };
        Ok(CustomCommandSpec {
            name: field("name")?,
            script: field("script")?,
            category: value
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_COMMAND_CATEGORY)
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fs::OsFileSystem;
    use std::path::Path;
    use tempfile::tempdir;

    fn registry_in(dir: &Path) -> (OsFileSystem, PathBuf) {
        (OsFileSystem, dir.join("custom_commands.json"))
    }

    #[test]
    fn missing_manifest_is_an_empty_registry() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        let registry = CustomCommandRegistry::new(&fs, path);
        assert!(registry.load().unwrap().is_empty());
    }

    #[test]
    fn duplicates_are_dropped_first_wins() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        std::fs::write(
            &path,
            r#"[
  {"name": "seed", "script": "seed_v1.dart"},
  {"name": "deploy", "category": "ops", "script": "deploy.dart"},
  {"name": "seed", "script": "seed_v2.dart"}
]"#,
        )
        .unwrap();

        let registry = CustomCommandRegistry::new(&fs, path);
        let specs = registry.load().unwrap();
        assert_eq!(specs.len(), 2);
        let seed = specs.iter().find(|s| s.name == "seed").unwrap();
        assert_eq!(seed.script, "seed_v1.dart");
    }

    #[test]
    fn load_sorts_by_category_then_name() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        std::fs::write(
            &path,
            r#"[
  {"name": "2", "category": "b", "script": "x.dart"},
  {"name": "1", "category": "a", "script": "x.dart"},
  {"name": "2", "category": "a", "script": "x.dart"},
  {"name": "1", "category": "b", "script": "x.dart"}
]"#,
        )
        .unwrap();

        let registry = CustomCommandRegistry::new(&fs, path);
        let order: Vec<(String, String)> = registry
            .load()
            .unwrap()
            .into_iter()
            .map(|s| (s.category, s.name))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string()),
                ("b".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn entry_missing_a_required_key_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        std::fs::write(
            &path,
            r#"[
  {"name": "seed"},
  {"name": "deploy", "category": "ops", "script": "deploy.dart"}
]"#,
        )
        .unwrap();

        let registry = CustomCommandRegistry::new(&fs, path);
        let specs = registry.load().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "deploy");
    }

    #[test]
    fn corrupt_manifest_is_reported_with_guidance() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        std::fs::write(&path, "not json").unwrap();

        let registry = CustomCommandRegistry::new(&fs, path);
        let err = registry.load().unwrap_err();
        assert!(err.to_string().contains("delete it to start over"));
    }

    #[test]
    fn register_round_trip_creates_and_preserves_manifest() {
        let dir = tempdir().unwrap();
        let (fs, path) = registry_in(dir.path());
        let registry = CustomCommandRegistry::new(&fs, path.clone());

        let spec = CustomCommandSpec {
            name: "seed".to_string(),
            category: "app".to_string(),
            script: "seed.dart".to_string(),
        };
        assert!(registry.register(&spec).unwrap());

        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            parsed,
            vec![serde_json::json!({
                "name": "seed",
                "category": "app",
                "script": "seed.dart"
            })]
        );

        // Registering the same name again leaves the manifest unchanged.
        let before = std::fs::read_to_string(&path).unwrap();
        assert!(!registry.register(&spec).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}

// src/core/pubspec.rs

use regex::Regex;

/// Checks whether `package` is declared as a key anywhere in the project's
/// dependency manifest text.
///
/// This is deliberately a textual check against the manifest, not a YAML
/// parse: the engine only needs to know the key is present before a batch
/// is allowed to create files.
pub fn has_declared_package(manifest_text: &str, package: &str) -> bool {
    let pattern = format!(r"(?m)^\s+{}\s*:", regex::escape(package));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(manifest_text),
        Err(e) => {
            log::error!("Invalid package name pattern for '{}': {}", package, e);
            false
        }
    }
}

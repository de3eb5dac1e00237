// src/core/paths.rs

use std::path::{Path, PathBuf};

/// Converts a raw artifact name (PascalCase, camelCase, kebab-case or
/// space-separated) to snake_case.
pub fn snake_case(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p).copied());
            let next = chars.get(i + 1).copied();
            // A word boundary sits before an uppercase letter that follows a
            // lowercase/digit, or that starts a new word after an acronym run
            // ("HTTPClient" -> "http_client").
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => {
                    next.is_some_and(|n| n.is_ascii_lowercase())
                }
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out.trim_matches('_').to_string()
}

/// Converts a name to PascalCase (`user_api_service` -> `UserApiService`).
pub fn pascal_case(raw: &str) -> String {
    snake_case(raw)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut cs = part.chars();
            match cs.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + cs.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a name to lowerCamelCase (`dark_mode` -> `darkMode`).
pub fn camel_case(raw: &str) -> String {
    let pascal = pascal_case(raw);
    let mut cs = pascal.chars();
    match cs.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + cs.as_str(),
        None => String::new(),
    }
}

/// Snake-cases a name and removes one trailing `_{suffix}` token if present.
///
/// Stripping is idempotent: `strip(strip(x)) == strip(x)`. A name that *is*
/// the suffix ("controller") is left intact rather than reduced to nothing.
pub fn strip_suffix_token(raw: &str, suffix: &str) -> String {
    let snake = snake_case(raw);
    match snake.strip_suffix(&format!("_{suffix}")) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => snake,
    }
}

/// Splits a path-like artifact name (`admin/sub/Foo`) into an optional
/// `/`-joined creation path (`admin/sub`) and the base name (`Foo`).
/// Creation path segments are snake-cased; the base name is left raw so the
/// caller can still derive a class name from it.
pub fn split_creation_path(raw: &str) -> (Option<String>, String) {
    let trimmed = raw.trim().trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((prefix, base)) => {
            let creation_path: Vec<String> = prefix
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(snake_case)
                .collect();
            if creation_path.is_empty() {
                (None, base.to_string())
            } else {
                (Some(creation_path.join("/")), base.to_string())
            }
        }
        None => (None, trimmed.to_string()),
    }
}

/// The generated file name for an artifact: `snake(name)[_suffix].dart`.
pub fn dart_file_name(raw_name: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(s) => format!("{}_{}.dart", strip_suffix_token(raw_name, s), s),
        None => format!("{}.dart", snake_case(raw_name)),
    }
}

/// Derives the canonical file path for a generated artifact:
/// `folder[/creation_path]/name[_suffix].dart`.
///
/// Pure: identical inputs always yield the identical path.
pub fn dart_file_path(
    folder: &Path,
    raw_name: &str,
    suffix: Option<&str>,
    creation_path: Option<&str>,
) -> PathBuf {
    let mut path = folder.to_path_buf();
    if let Some(cp) = creation_path {
        for segment in cp.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
    }
    path.push(dart_file_name(raw_name, suffix));
    path
}

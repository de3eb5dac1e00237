// src/core/patcher.rs
//
// Structural patching of registration literals inside existing config
// files. The target is modeled as a minimal "named literal + entries" view,
// never a full language parse: just enough structure to append one entry
// safely and to detect that it is already present. A failed match must
// never produce malformed output; the file is left untouched instead.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::schemas::SchemaMatcher;
use crate::system::fs::FileSystem;

/// One append-only change to a configuration file.
///
/// Edits never remove or reorder existing entries. Applying an edit whose
/// import line already exists in the target file is a no-op.
#[derive(Debug, Clone)]
pub struct RegistrationEdit {
    pub target: PathBuf,
    /// Import statement prepended to the file when the edit applies.
    pub import_line: String,
    /// Rendered entry texts, without trailing commas.
    pub entries: Vec<String>,
}

/// The result of attempting a registration edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The edit was written; `matcher` names the schema generation that matched.
    Applied { matcher: &'static str },
    /// The registration is already in place; nothing was written.
    AlreadyPresent,
    /// No known literal signature was found; the file was left untouched.
    PatternNotFound,
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A located map/list literal: the byte span of its delimited body and the
/// parsed, whitespace-normalized entries inside it.
#[derive(Debug)]
struct NamedLiteral {
    matcher: &'static str,
    /// Byte index of the opening delimiter.
    open: usize,
    /// Byte index of the matching closing delimiter.
    close: usize,
    entries: Vec<String>,
}

impl NamedLiteral {
    fn contains_entry(&self, entry: &str) -> bool {
        let wanted = normalize_entry(entry);
        self.entries.iter().any(|existing| *existing == wanted)
    }
}

/// Applies registration edits through a filesystem seam.
#[derive(Debug)]
pub struct RegistrationPatcher<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> RegistrationPatcher<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Applies `edit` against the first literal signature in `matchers` that
    /// is found in the target file.
    ///
    /// Idempotence is guaranteed twice over: a file already containing the
    /// import line verbatim is skipped outright, and entry presence is
    /// checked against the parsed entry list before any text is built.
    pub fn apply(
        &self,
        edit: &RegistrationEdit,
        matchers: &[SchemaMatcher],
    ) -> Result<PatchOutcome, PatchError> {
        let text = self.read_or_empty(&edit.target)?;

        if text.contains(&edit.import_line) {
            log::debug!(
                "Import already present in '{}'; registration considered applied.",
                edit.target.display()
            );
            return Ok(PatchOutcome::AlreadyPresent);
        }

        for matcher in matchers {
            let Some(literal) = locate_literal(&text, matcher) else {
                continue;
            };

            let missing: Vec<&String> = edit
                .entries
                .iter()
                .filter(|entry| !literal.contains_entry(entry))
                .collect();
            if missing.is_empty() {
                return Ok(PatchOutcome::AlreadyPresent);
            }

            let patched = insert_entries(&text, &literal, &missing);
            let final_text = format!("{}\n{}", edit.import_line, patched);
            self.fs
                .write(&edit.target, &final_text)
                .map_err(|e| PatchError::Write {
                    path: edit.target.display().to_string(),
                    source: e,
                })?;
            return Ok(PatchOutcome::Applied {
                matcher: literal.matcher,
            });
        }

        Ok(PatchOutcome::PatternNotFound)
    }

    /// The router variant: appends a `router.add(...)` call immediately
    /// before the final `});`, skipping when the exact call string is
    /// already present. Trailing whitespace before the closing delimiter is
    /// normalized so repeated runs do not accumulate blank lines.
    pub fn apply_router(
        &self,
        target: &Path,
        import_line: &str,
        route_call: &str,
    ) -> Result<PatchOutcome, PatchError> {
        let text = self.read_or_empty(target)?;

        if text.contains(route_call) {
            return Ok(PatchOutcome::AlreadyPresent);
        }

        let Some(close) = text.rfind("});") else {
            return Ok(PatchOutcome::PatternNotFound);
        };

        let head = text[..close].trim_end();
        let tail = &text[close..];
        let final_text = if text.contains(import_line) {
            format!("{head}\n  {route_call}\n{tail}")
        } else {
            format!("{import_line}\n{head}\n  {route_call}\n{tail}")
        };
        self.fs
            .write(target, &final_text)
            .map_err(|e| PatchError::Write {
                path: target.display().to_string(),
                source: e,
            })?;
        Ok(PatchOutcome::Applied { matcher: "router-add" })
    }

    /// A missing target file is treated as empty text; the matchers decide
    /// whether anything can be done with it.
    fn read_or_empty(&self, path: &Path) -> Result<String, PatchError> {
        match self.fs.read_to_string(path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(PatchError::Read {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}

/// Finds `matcher`'s declaration in `text` and balance-scans the delimited
/// body. Returns `None` when the declaration is absent or the body never
/// closes (treated as "no match" so a broken file is never rewritten).
fn locate_literal(text: &str, matcher: &SchemaMatcher) -> Option<NamedLiteral> {
    let m = matcher.declaration.find(text)?;
    let open = m.end().checked_sub(1)?;
    if !text[open..].starts_with(matcher.open) {
        return None;
    }

    let close = find_closing_delimiter(text, open, matcher.open, matcher.close)?;
    let body = &text[open + matcher.open.len_utf8()..close];
    Some(NamedLiteral {
        matcher: matcher.name,
        open,
        close,
        entries: split_entries(body),
    })
}

/// Scans forward from the opening delimiter, balancing nested delimiters
/// and skipping string literals and line comments, until depth returns to
/// zero. Returns the byte index of the closing delimiter.
fn find_closing_delimiter(text: &str, open: usize, open_ch: char, close_ch: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (idx, c) in text[open..].char_indices() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            prev = Some(c);
            continue;
        }
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            prev = Some(c);
            continue;
        }
        match c {
            '\'' | '"' => in_string = Some(c),
            '/' if prev == Some('/') => in_line_comment = true,
            _ if c == open_ch => depth += 1,
            _ if c == close_ch => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
        prev = Some(c);
    }
    None
}

/// Splits a literal body at depth-zero commas, producing the normalized
/// entry list. Line comments are dropped and presence checks run against
/// this parsed list rather than raw substring search, so incidental text
/// matches elsewhere in the file never count as an existing entry.
fn split_entries(body: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for c in body.chars() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
                current.push(c);
            }
            prev = Some(c);
            continue;
        }
        if let Some(quote) = in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            prev = Some(c);
            continue;
        }
        match c {
            '\'' | '"' => {
                in_string = Some(c);
                current.push(c);
            }
            '/' if prev == Some('/') => {
                in_line_comment = true;
                current.pop();
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '<' => {
                angle += 1;
                current.push(c);
            }
            // `>` closes a generic only; the `>` of a `=>` arrow is plain text.
            '>' => {
                if prev != Some('=') {
                    angle = angle.saturating_sub(1);
                }
                current.push(c);
            }
            ',' if depth == 0 && angle == 0 => {
                let entry = normalize_entry(&current);
                if !entry.is_empty() {
                    entries.push(entry);
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let last = normalize_entry(&current);
    if !last.is_empty() {
        entries.push(last);
    }
    entries
}

/// Collapses all whitespace runs to single spaces so entry comparison is
/// insensitive to formatting.
fn normalize_entry(entry: &str) -> String {
    entry.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rebuilds the file text with `new_entries` inserted immediately before
/// the literal's closing delimiter. Existing entries are preserved
/// byte-for-byte: only the span between the last entry and the closing
/// delimiter is touched. The separator comma is placed after the last
/// entry's code, so a trailing line comment stays attached to its entry.
fn insert_entries(text: &str, literal: &NamedLiteral, new_entries: &[&String]) -> String {
    let body_start = literal.open + 1;
    let body = &text[body_start..literal.close];
    let code_end = end_of_last_code(body);
    let needs_comma = code_end > 0 && !body[..code_end].ends_with(',');
    // Text between the last code character and the closing delimiter,
    // typically empty or a trailing comment.
    let rest = body[code_end..].trim_end();

    let mut insertion = String::new();
    if needs_comma {
        insertion.push(',');
    }
    insertion.push_str(rest);
    for entry in new_entries {
        insertion.push_str("\n  ");
        insertion.push_str(entry);
        insertion.push(',');
    }
    insertion.push('\n');

    let mut out = String::with_capacity(text.len() + insertion.len());
    out.push_str(&text[..body_start + code_end]);
    out.push_str(&insertion);
    out.push_str(&text[literal.close..]);
    out
}

/// Byte offset just past the last code character in `body`. Whitespace and
/// line comments do not count as code; string literal contents do.
fn end_of_last_code(body: &str) -> usize {
    let mut last = 0usize;
    let mut before_last = 0usize;
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (idx, c) in body.char_indices() {
        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            prev = Some(c);
            continue;
        }
        if let Some(quote) = in_string {
            before_last = last;
            last = idx + c.len_utf8();
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_string = None;
            }
            prev = Some(c);
            continue;
        }
        match c {
            '\'' | '"' => {
                in_string = Some(c);
                before_last = last;
                last = idx + c.len_utf8();
            }
            // The first `/` was recorded as code; roll it back.
            '/' if prev == Some('/') => {
                in_line_comment = true;
                last = before_last;
            }
            _ if c.is_whitespace() => {}
            _ => {
                before_last = last;
                last = idx + c.len_utf8();
            }
        }
        prev = Some(c);
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schemas::RegistrationTarget;
    use crate::system::fs::OsFileSystem;
    use tempfile::tempdir;

    const DECODERS: &str = r#"import '/app/controllers/home_controller.dart';

final Map<Type, BaseController Function()> controllers = {
  HomeController: () => HomeController(),
};

final Map<Type, dynamic> modelDecoders = {};
"#;

    fn edit(target: &Path) -> RegistrationEdit {
        RegistrationEdit {
            target: target.to_path_buf(),
            import_line: "import '/app/controllers/user_controller.dart';".to_string(),
            entries: vec!["UserController: () => UserController()".to_string()],
        }
    }

    #[test]
    fn appends_entry_before_closing_delimiter() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        std::fs::write(&target, DECODERS).unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply(&edit(&target), RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::Applied {
                matcher: "controllers-typed"
            }
        );

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.starts_with("import '/app/controllers/user_controller.dart';\n"));
        // Existing entry preserved verbatim, new entry inserted before `};`.
        assert!(text.contains("  HomeController: () => HomeController(),\n"));
        assert!(text.contains("  UserController: () => UserController(),\n};"));
    }

    #[test]
    fn applying_twice_is_byte_identical_to_once() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        std::fs::write(&target, DECODERS).unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let matchers = RegistrationTarget::Controllers.matchers();
        patcher.apply(&edit(&target), matchers).unwrap();
        let once = std::fs::read_to_string(&target).unwrap();

        let outcome = patcher.apply(&edit(&target), matchers).unwrap();
        assert_eq!(outcome, PatchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), once);
    }

    #[test]
    fn entry_presence_uses_parsed_entries_not_substring() {
        // The entry text appears inside a comment but not inside the map
        // literal: the patch must still apply.
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        std::fs::write(
            &target,
            "// UserController: () => UserController()\n\
             final Map<Type, dynamic> controllers = {\n};\n",
        )
        .unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply(&edit(&target), RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert_eq!(
            outcome,
            PatchOutcome::Applied {
                matcher: "controllers-dynamic"
            }
        );
        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.contains("controllers = {\n  UserController: () => UserController(),\n};"));
    }

    #[test]
    fn unknown_shape_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        let original = "const somethingElse = 1;\n";
        std::fs::write(&target, original).unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply(&edit(&target), RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert_eq!(outcome, PatchOutcome::PatternNotFound);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), original);
    }

    #[test]
    fn missing_file_reports_pattern_not_found() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply(&edit(&target), RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert_eq!(outcome, PatchOutcome::PatternNotFound);
        assert!(!target.exists());
    }

    #[test]
    fn multiple_entries_insert_together() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        std::fs::write(&target, "final Map<Type, dynamic> modelDecoders = {};\n").unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let edit = RegistrationEdit {
            target: target.clone(),
            import_line: "import '/app/models/user.dart';".to_string(),
            entries: vec![
                "List<User>: (data) => List.from(data).map((json) => User.fromJson(json)).toList()"
                    .to_string(),
                "User: (data) => User.fromJson(data)".to_string(),
            ],
        };
        patcher
            .apply(&edit, RegistrationTarget::ModelDecoders.matchers())
            .unwrap();
        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.contains("List<User>:"));
        assert!(text.contains("  User: (data) => User.fromJson(data),\n};"));
    }

    #[test]
    fn router_variant_inserts_before_final_closure() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("router.dart");
        std::fs::write(
            &target,
            "appRouter() => nyRoutes((router) {\n  router.add(HomePage.path);\n\n\n});\n",
        )
        .unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply_router(
                &target,
                "import '/resources/pages/settings_page.dart';",
                "router.add(SettingsPage.path);",
            )
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Applied { matcher: "router-add" });

        let text = std::fs::read_to_string(&target).unwrap();
        // Blank lines before the closing delimiter were normalized away.
        assert!(text.contains("router.add(HomePage.path);\n  router.add(SettingsPage.path);\n});"));

        // Re-running with the same call is a no-op.
        let again = patcher
            .apply_router(
                &target,
                "import '/resources/pages/settings_page.dart';",
                "router.add(SettingsPage.path);",
            )
            .unwrap();
        assert_eq!(again, PatchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), text);
    }

    #[test]
    fn separator_comma_lands_on_the_entry_not_its_trailing_comment() {
        // Last entry has no trailing comma and carries a line comment; the
        // inserted separator must go after the code, before the comment.
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        std::fs::write(
            &target,
            "final Map<Type, dynamic> controllers = {\n\
             \x20 HomeController: () => HomeController() // keep\n\
             };\n",
        )
        .unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let outcome = patcher
            .apply(&edit(&target), RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert!(matches!(outcome, PatchOutcome::Applied { .. }));

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.contains("HomeController: () => HomeController(), // keep\n"));
        assert!(!text.contains("// keep,"));
        assert!(text.contains("  UserController: () => UserController(),\n};"));
    }

    #[test]
    fn arrow_inside_nested_parens_does_not_split_an_entry() {
        // The `>` of a `=>` arrow must not close delimiters opened by `(`,
        // or the entry would be parsed in two at its inner comma and the
        // presence check would miss it.
        let dir = tempdir().unwrap();
        let target = dir.path().join("decoders.dart");
        let original = "final Map<Type, dynamic> controllers = {\n\
                        \x20 Foo: (d) => bar((x) => x, 1),\n\
                        };\n";
        std::fs::write(&target, original).unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let edit = RegistrationEdit {
            target: target.clone(),
            import_line: "import '/app/controllers/foo_controller.dart';".to_string(),
            entries: vec!["Foo: (d) => bar((x) => x, 1)".to_string()],
        };
        let outcome = patcher
            .apply(&edit, RegistrationTarget::Controllers.matchers())
            .unwrap();
        assert_eq!(outcome, PatchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), original);
    }

    #[test]
    fn balance_scan_ignores_braces_in_strings_and_comments() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("events.dart");
        std::fs::write(
            &target,
            "final Map<Type, NyEvent> events = {\n\
             \x20 // a } comment\n\
             \x20 LoginEvent: LoginEvent(), // trailing {\n\
             };\n",
        )
        .unwrap();

        let fs = OsFileSystem;
        let patcher = RegistrationPatcher::new(&fs);
        let edit = RegistrationEdit {
            target: target.clone(),
            import_line: "import '/app/events/logout_event.dart';".to_string(),
            entries: vec!["LogoutEvent: LogoutEvent()".to_string()],
        };
        let outcome = patcher
            .apply(&edit, RegistrationTarget::Events.matchers())
            .unwrap();
        assert!(matches!(outcome, PatchOutcome::Applied { .. }));
        let text = std::fs::read_to_string(&target).unwrap();
        assert!(text.contains("LogoutEvent: LogoutEvent(),\n};"));
    }
}

// src/core/schemas.rs
//
// Known declaration signatures of the registration literals this engine
// patches. Each registration file has an ordered list of named matchers,
// newest schema generation first; the patcher records which one matched so
// schema-evolution support stays explicit and testable.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{DECODERS_FILE, EVENTS_FILE, PROVIDERS_FILE, THEME_FILE};

/// One recognizable declaration signature of a named map/list literal.
///
/// Invariant: `declaration` must match up to and including the literal's
/// opening delimiter, so the match end marks the start of the body scan.
#[derive(Debug)]
pub struct SchemaMatcher {
    pub name: &'static str,
    pub declaration: Regex,
    pub open: char,
    pub close: char,
}

fn map_matcher(name: &'static str, pattern: &str) -> SchemaMatcher {
    SchemaMatcher {
        name,
        declaration: Regex::new(pattern).unwrap(),
        open: '{',
        close: '}',
    }
}

fn list_matcher(name: &'static str, pattern: &str) -> SchemaMatcher {
    SchemaMatcher {
        name,
        declaration: Regex::new(pattern).unwrap(),
        open: '[',
        close: ']',
    }
}

lazy_static! {
    static ref CONTROLLERS: Vec<SchemaMatcher> = vec![
        map_matcher(
            "controllers-typed",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*BaseController\s+Function\(\)>\s+controllers\s*=\s*\{",
        ),
        map_matcher(
            "controllers-dynamic",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic>\s+controllers\s*=\s*\{",
        ),
    ];
    static ref MODEL_DECODERS: Vec<SchemaMatcher> = vec![
        map_matcher(
            "model-decoders-typed",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic\s+Function\(dynamic\)>\s+modelDecoders\s*=\s*\{",
        ),
        map_matcher(
            "model-decoders-dynamic",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic>\s+modelDecoders\s*=\s*\{",
        ),
    ];
    static ref API_DECODERS: Vec<SchemaMatcher> = vec![
        map_matcher(
            "api-decoders-typed",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*BaseApiService\s+Function\(\)>\s+apiDecoders\s*=\s*\{",
        ),
        map_matcher(
            "api-decoders-dynamic",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic>\s+apiDecoders\s*=\s*\{",
        ),
    ];
    static ref PROVIDERS: Vec<SchemaMatcher> = vec![
        map_matcher(
            "providers-typed",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*NyProvider>\s+providers\s*=\s*\{",
        ),
        map_matcher(
            "providers-dynamic",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic>\s+providers\s*=\s*\{",
        ),
    ];
    static ref EVENTS: Vec<SchemaMatcher> = vec![
        map_matcher(
            "events-typed",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*NyEvent>\s+events\s*=\s*\{",
        ),
        map_matcher(
            "events-dynamic",
            r"(?m)^\s*(?:final\s+)?Map<Type,\s*dynamic>\s+events\s*=\s*\{",
        ),
    ];
    static ref APP_THEMES: Vec<SchemaMatcher> = vec![
        list_matcher(
            "app-themes-colored",
            r"(?m)^\s*(?:final\s+)?List<BaseThemeConfig<ColorStyles>>\s+appThemes\s*=\s*\[",
        ),
        list_matcher(
            "app-themes-untyped",
            r"(?m)^\s*(?:final\s+)?List<BaseThemeConfig>\s+appThemes\s*=\s*\[",
        ),
    ];
}

/// The registration literals a generated artifact can be wired into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationTarget {
    Controllers,
    ModelDecoders,
    ApiDecoders,
    Providers,
    Events,
    AppThemes,
}

impl RegistrationTarget {
    /// Project-relative path of the configuration file that owns the literal.
    pub fn file(self) -> &'static str {
        match self {
            Self::Controllers | Self::ModelDecoders | Self::ApiDecoders => DECODERS_FILE,
            Self::Providers => PROVIDERS_FILE,
            Self::Events => EVENTS_FILE,
            Self::AppThemes => THEME_FILE,
        }
    }

    /// Ordered matchers for this literal, newest schema generation first.
    pub fn matchers(self) -> &'static [SchemaMatcher] {
        match self {
            Self::Controllers => &CONTROLLERS,
            Self::ModelDecoders => &MODEL_DECODERS,
            Self::ApiDecoders => &API_DECODERS,
            Self::Providers => &PROVIDERS,
            Self::Events => &EVENTS,
            Self::AppThemes => &APP_THEMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_generation_is_preferred_over_dynamic() {
        let text = "final Map<Type, BaseController Function()> controllers = {};";
        let matchers = RegistrationTarget::Controllers.matchers();
        let hit = matchers
            .iter()
            .find(|m| m.declaration.is_match(text))
            .unwrap();
        assert_eq!(hit.name, "controllers-typed");
    }

    #[test]
    fn older_dynamic_generation_still_matches() {
        let text = "final Map<Type, dynamic> controllers = {};";
        let matchers = RegistrationTarget::Controllers.matchers();
        let hit = matchers
            .iter()
            .find(|m| m.declaration.is_match(text))
            .unwrap();
        assert_eq!(hit.name, "controllers-dynamic");
    }

    #[test]
    fn theme_list_matcher_ends_at_opening_bracket() {
        let text = "final List<BaseThemeConfig<ColorStyles>> appThemes = [\n];";
        let matcher = &RegistrationTarget::AppThemes.matchers()[0];
        let m = matcher.declaration.find(text).unwrap();
        assert_eq!(&text[m.end() - 1..m.end()], "[");
    }
}

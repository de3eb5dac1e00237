// src/models.rs

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COMMAND_CATEGORY;

/// Every artifact kind the engine knows how to scaffold.
///
/// The kind decides which naming suffix is stripped from raw names, which
/// folder receives the generated file, and which registration file (if any)
/// is patched afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Controller,
    Page,
    NavigationHub,
    Model,
    Theme,
    ThemeColors,
    Provider,
    RouteGuard,
    Form,
    Command,
    Event,
    ApiService,
    Interceptor,
    StatelessWidget,
    StatefulWidget,
    JourneyWidget,
    StateManagedWidget,
}

impl ArtifactKind {
    /// The `make:<action>` token this kind answers to.
    pub fn label(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Page => "page",
            Self::NavigationHub => "navigation_hub",
            Self::Model => "model",
            Self::Theme => "theme",
            Self::ThemeColors => "theme_colors",
            Self::Provider => "provider",
            Self::RouteGuard => "route_guard",
            Self::Form => "form",
            Self::Command => "command",
            Self::Event => "event",
            Self::ApiService => "api_service",
            Self::Interceptor => "interceptor",
            Self::StatelessWidget => "stateless_widget",
            Self::StatefulWidget => "stateful_widget",
            Self::JourneyWidget => "journey_widget",
            Self::StateManagedWidget => "state_managed_widget",
        }
    }

    /// Project-relative folder that receives files of this kind.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Controller => "lib/app/controllers",
            Self::Page | Self::NavigationHub => "lib/resources/pages",
            Self::Model => "lib/app/models",
            Self::Theme => "lib/resources/themes",
            Self::ThemeColors => "lib/resources/themes/styles",
            Self::Provider => "lib/app/providers",
            Self::RouteGuard => "lib/routes/guards",
            Self::Form => "lib/app/forms",
            Self::Command => "lib/app/commands",
            Self::Event => "lib/app/events",
            Self::ApiService => "lib/app/networking",
            Self::Interceptor => "lib/app/networking/dio/interceptors",
            Self::StatelessWidget
            | Self::StatefulWidget
            | Self::JourneyWidget
            | Self::StateManagedWidget => "lib/resources/widgets",
        }
    }

    /// Package that must already be declared in the project's dependency
    /// manifest before files of this kind are generated.
    pub fn required_package(self) -> Option<&'static str> {
        match self {
            Self::Interceptor => Some("dio"),
            _ => None,
        }
    }

    /// The conventional suffix token stripped from raw names and appended to
    /// the generated file name (`user` -> `user_controller.dart`).
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Controller => Some("controller"),
            Self::Page => Some("page"),
            Self::NavigationHub => Some("navigation_hub"),
            Self::Theme => Some("theme"),
            Self::ThemeColors => Some("theme_colors"),
            Self::Provider => Some("provider"),
            Self::RouteGuard => Some("route_guard"),
            Self::Form => Some("form"),
            Self::Event => Some("event"),
            Self::ApiService => Some("api_service"),
            Self::Interceptor => Some("interceptor"),
            Self::StatelessWidget
            | Self::StatefulWidget
            | Self::JourneyWidget
            | Self::StateManagedWidget => Some("widget"),
            Self::Model | Self::Command => None,
        }
    }
}

/// Route registration flags carried by page and navigation hub requests.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// Register the route behind the authentication guard.
    #[serde(default)]
    pub authenticated: bool,
    /// Register the route as the application's initial route.
    #[serde(default)]
    pub initial: bool,
}

/// A single "create X" intent, constructed and consumed within one command
/// invocation.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    /// Logical name, possibly path-like (`admin/settings`).
    pub name: String,
    pub kind: ArtifactKind,
    /// Permit overwriting an existing target file.
    pub force: bool,
    /// Opaque stub payload written verbatim as the new file's contents.
    pub stub: String,
    /// Only meaningful for `Page` and `NavigationHub`.
    pub route: RouteOptions,
}

/// One entry in the custom command JSON manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CustomCommandSpec {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Script file name, relative to the commands directory.
    pub script: String,
}

fn default_category() -> String {
    DEFAULT_COMMAND_CATEGORY.to_string()
}

/// One artifact template inside a slate package.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SlateTemplate {
    pub kind: ArtifactKind,
    pub name: String,
    /// Opaque stub payload supplied by the slate author.
    pub stub: String,
    #[serde(default)]
    pub route: RouteOptions,
}

/// A batch of artifact templates applied together, with a pre-flight
/// dependency check against the project manifest.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SlatePackage {
    pub name: String,
    /// Packages that must already be declared in `pubspec.yaml`.
    #[serde(default)]
    pub required_packages: Vec<String>,
    pub templates: Vec<SlateTemplate>,
}

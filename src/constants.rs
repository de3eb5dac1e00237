// src/constants.rs

/// Registration file holding the `controllers`, `modelDecoders` and
/// `apiDecoders` map literals.
pub const DECODERS_FILE: &str = "lib/config/decoders.dart";

/// Registration file holding the `providers` map literal.
pub const PROVIDERS_FILE: &str = "lib/config/providers.dart";

/// Registration file holding the `events` map literal.
pub const EVENTS_FILE: &str = "lib/config/events.dart";

/// Registration file holding the `appThemes` list literal.
pub const THEME_FILE: &str = "lib/config/theme.dart";

/// Registration file holding the trailing `router.add(...)` call sequence.
pub const ROUTER_FILE: &str = "lib/routes/router.dart";

/// The JSON manifest of user-defined commands.
pub const CUSTOM_COMMANDS_MANIFEST: &str = "lib/app/commands/custom_commands.json";

/// Directory containing user-defined command scripts.
pub const COMMANDS_DIR: &str = "lib/app/commands";

/// The project's dependency manifest, consulted before batch generation.
pub const DEPENDENCY_MANIFEST: &str = "pubspec.yaml";

/// Category assigned to custom commands that do not declare one.
pub const DEFAULT_COMMAND_CATEGORY: &str = "app";

/// Interpreter used to execute custom command scripts.
pub const SCRIPT_INTERPRETER: &str = "dart";

/// Command spawned by `project:install` to fetch declared dependencies.
pub const INSTALL_COMMAND: &str = "flutter pub get";

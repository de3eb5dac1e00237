// src/cli/stubs.rs
//
// Built-in stub payloads for the `make:` commands. The engine treats stubs
// as opaque text; these are only the defaults the CLI layer supplies.
// Slate packages and library callers provide their own.

use crate::core::generators::ArtifactIdentity;
use crate::models::ArtifactKind;

/// Renders the default stub for an artifact.
pub fn stub_for(identity: &ArtifactIdentity) -> String {
    let class = &identity.class_name;
    let base = &identity.base;
    match identity.kind {
        ArtifactKind::Controller => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends Controller {{\n\
             \x20 @override\n\
             \x20 construct(BuildContext context) {{\n\
             \x20   super.construct(context);\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::Page => {
            let route = base.replace('_', "-");
            format!(
                "import 'package:flutter/material.dart';\n\
                 import 'package:nylo_framework/nylo_framework.dart';\n\n\
                 class {class} extends NyStatefulWidget {{\n\
                 \x20 static RouteView path = (\"/{route}\", (_) => {class}());\n\n\
                 \x20 {class}({{super.key}}) : super(child: () => _{class}State());\n\
                 }}\n\n\
                 class _{class}State extends NyPage<{class}> {{\n\
                 \x20 @override\n\
                 \x20 get init => () {{}};\n\n\
                 \x20 @override\n\
                 \x20 Widget view(BuildContext context) {{\n\
                 \x20   return Scaffold(\n\
                 \x20     body: SafeArea(\n\
                 \x20       child: Container(),\n\
                 \x20     ),\n\
                 \x20   );\n\
                 \x20 }}\n\
                 }}\n"
            )
        }
        ArtifactKind::NavigationHub => {
            let route = base.replace('_', "-");
            format!(
                "import 'package:flutter/material.dart';\n\
                 import 'package:nylo_framework/nylo_framework.dart';\n\n\
                 class {class} extends NyStatefulWidget {{\n\
                 \x20 static RouteView path = (\"/{route}\", (_) => {class}());\n\n\
                 \x20 {class}({{super.key}}) : super(child: () => _{class}State());\n\
                 }}\n\n\
                 class _{class}State extends NavigationHub<{class}> {{\n\
                 \x20 @override\n\
                 \x20 NavigationHubLayout? layout = NavigationHubLayout.bottomNav();\n\n\
                 \x20 @override\n\
                 \x20 Map<int, NavigationTab> pages() => {{\n\
                 \x20   0: NavigationTab(title: \"Home\", page: Container()),\n\
                 \x20 }};\n\
                 }}\n"
            )
        }
        ArtifactKind::Model => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends Model {{\n\
             \x20 static StorageKey key = \"{base}\";\n\n\
             \x20 {class}() : super(key: key);\n\n\
             \x20 {class}.fromJson(dynamic data) {{\n\
             \x20   // map your fields from data\n\
             \x20 }}\n\n\
             \x20 @override\n\
             \x20 toJson() => {{}};\n\
             }}\n"
        ),
        ArtifactKind::Theme => {
            let theme_fn = crate::core::paths::camel_case(&format!("{base}_theme"));
            format!(
                "import 'package:flutter/material.dart';\n\
                 import '/resources/themes/styles/color_styles.dart';\n\n\
                 ThemeData {theme_fn}(ColorStyles color) {{\n\
                 \x20 return ThemeData(\n\
                 \x20   primaryColor: color.content,\n\
                 \x20   brightness: Brightness.light,\n\
                 \x20 );\n\
                 }}\n"
            )
        }
        ArtifactKind::ThemeColors => format!(
            "import 'package:flutter/material.dart';\n\
             import '/resources/themes/styles/color_styles.dart';\n\n\
             class {class} implements ColorStyles {{\n\
             \x20 @override\n\
             \x20 Color get background => const Color(0xFFFFFFFF);\n\n\
             \x20 @override\n\
             \x20 Color get content => const Color(0xFF000000);\n\
             }}\n"
        ),
        ArtifactKind::Provider => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} implements NyProvider {{\n\
             \x20 @override\n\
             \x20 boot(Nylo nylo) async {{\n\
             \x20   return nylo;\n\
             \x20 }}\n\n\
             \x20 @override\n\
             \x20 afterBoot(Nylo nylo) async {{}}\n\
             }}\n"
        ),
        ArtifactKind::RouteGuard => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends NyRouteGuard {{\n\
             \x20 {class}();\n\n\
             \x20 @override\n\
             \x20 onRequest(PageRequest pageRequest) async {{\n\
             \x20   return pageRequest;\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::Form => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends NyFormData {{\n\
             \x20 {class}({{String? name}}) : super(name ?? \"{base}\");\n\n\
             \x20 @override\n\
             \x20 fields() => [\n\
             \x20   Field.text(\"name\"),\n\
             \x20 ];\n\
             }}\n"
        ),
        ArtifactKind::Command => format!(
            "void main(List<String> arguments) async {{\n\
             \x20 // {base}: implement your command logic\n\
             }}\n"
        ),
        ArtifactKind::Event => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} implements NyEvent {{\n\
             \x20 @override\n\
             \x20 final providers = {{}};\n\
             }}\n"
        ),
        ArtifactKind::ApiService => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\
             import '/config/decoders.dart';\n\n\
             class {class} extends NyApiService {{\n\
             \x20 {class}({{BuildContext? buildContext}})\n\
             \x20     : super(buildContext, decoders: modelDecoders);\n\n\
             \x20 @override\n\
             \x20 String get baseUrl => getEnv('API_BASE_URL');\n\
             }}\n"
        ),
        ArtifactKind::Interceptor => format!(
            "import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends Interceptor {{\n\
             \x20 @override\n\
             \x20 void onRequest(RequestOptions options, RequestInterceptorHandler handler) {{\n\
             \x20   handler.next(options);\n\
             \x20 }}\n\n\
             \x20 @override\n\
             \x20 void onResponse(Response response, ResponseInterceptorHandler handler) {{\n\
             \x20   handler.next(response);\n\
             \x20 }}\n\n\
             \x20 @override\n\
             \x20 void onError(DioException err, ErrorInterceptorHandler handler) {{\n\
             \x20   handler.next(err);\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::StatelessWidget => format!(
            "import 'package:flutter/material.dart';\n\n\
             class {class} extends StatelessWidget {{\n\
             \x20 const {class}({{super.key}});\n\n\
             \x20 @override\n\
             \x20 Widget build(BuildContext context) {{\n\
             \x20   return Container();\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::StatefulWidget => format!(
            "import 'package:flutter/material.dart';\n\n\
             class {class} extends StatefulWidget {{\n\
             \x20 const {class}({{super.key}});\n\n\
             \x20 @override\n\
             \x20 State<{class}> createState() => _{class}State();\n\
             }}\n\n\
             class _{class}State extends State<{class}> {{\n\
             \x20 @override\n\
             \x20 Widget build(BuildContext context) {{\n\
             \x20   return Container();\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::JourneyWidget => format!(
            "import 'package:flutter/material.dart';\n\
             import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends StatefulWidget {{\n\
             \x20 const {class}({{super.key}});\n\n\
             \x20 @override\n\
             \x20 createState() => _{class}State();\n\
             }}\n\n\
             class _{class}State extends NyJourneyState<{class}> {{\n\
             \x20 _{class}State() : super(path: \"{base}\");\n\n\
             \x20 @override\n\
             \x20 Widget view(BuildContext context) {{\n\
             \x20   return Container();\n\
             \x20 }}\n\
             }}\n"
        ),
        ArtifactKind::StateManagedWidget => format!(
            "import 'package:flutter/material.dart';\n\
             import 'package:nylo_framework/nylo_framework.dart';\n\n\
             class {class} extends NyStatefulWidget {{\n\
             \x20 static String state = \"{base}\";\n\n\
             \x20 {class}({{super.key}}) : super(child: () => _{class}State());\n\
             }}\n\n\
             class _{class}State extends NyState<{class}> {{\n\
             \x20 _{class}State() : super(stateName: {class}.state);\n\n\
             \x20 @override\n\
             \x20 Widget build(BuildContext context) {{\n\
             \x20   return Container();\n\
             \x20 }}\n\
             }}\n"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generators::artifact_identity;

    #[test]
    fn controller_stub_uses_the_class_name() {
        let identity = artifact_identity(ArtifactKind::Controller, "user").unwrap();
        let stub = stub_for(&identity);
        assert!(stub.contains("class UserController extends Controller"));
    }

    #[test]
    fn page_stub_derives_a_route_path() {
        let identity = artifact_identity(ArtifactKind::Page, "user_settings").unwrap();
        let stub = stub_for(&identity);
        assert!(stub.contains("\"/user-settings\""));
        assert!(stub.contains("class UserSettingsPage extends NyStatefulWidget"));
    }
}

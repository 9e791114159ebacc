// Shared test helpers for integration tests
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Creates a temporary project tree shaped like the client/server split the
/// router is built around: browser component tests, node unit tests, a file
/// both projects reject, plain sources, and directories discovery must skip.
pub fn setup_test_environment() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let root = temp_dir.path();

    let files = [
        "src/ui/button.svelte.test.ts",
        "src/ui/input.svelte.test.ts",
        "src/util/format.test.ts",
        "src/lib/server/widget.svelte.test.ts",
        "src/app.ts",
        "src/lib/helpers.ts",
        "node_modules/pkg/index.test.ts",
        ".hidden/secret.test.ts",
    ];
    for file in files {
        write_file(root, file, "// test fixture\n");
    }

    temp_dir
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

/// The default two-project configuration used by most integration tests.
pub fn client_server_config() -> &'static str {
    r#"
language = "en"

[[projects]]
name = "client"
environment = "browser"
include = ["src/**/*.svelte.test.ts"]
exclude = ["src/lib/server/**"]
setup_files = ["./setup-client.ts"]

[projects.environment_options]
engine = "chromium"

[[projects]]
name = "server"
environment = "node"
include = ["src/**/*.test.ts"]
exclude = ["src/**/*.svelte.test.ts"]
"#
}

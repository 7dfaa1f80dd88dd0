//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/linkage to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and runs it directly
pub fn get_linkage_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "linkage", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build linkage");

    assert!(status.success(), "Failed to build linkage binary");

    workspace.join("target/debug/linkage")
}

/// Run the linkage binary directly in the specified directory
pub fn run_linkage_in_dir(dir: &Path, args: &[&str]) -> Output {
    let binary = get_linkage_binary();

    Command::new(&binary)
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute linkage")
}

/// Connect two nodes in an initialized diagram, returning the new edge id.
pub fn connect(dir: &Path, source: &str, target: &str) -> String {
    let output = run_linkage_in_dir(dir, &["--json", "connect", source, target]);
    assert!(
        output.status.success(),
        "connect failed: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("connect --json output");
    value["edge"]["id"]
        .as_str()
        .expect("edge id in connect output")
        .to_string()
}

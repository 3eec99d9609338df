//! End-to-end tests for the `vx-config-generator` binary.
//!
//! Each test copies a fixture into a temp directory and runs the built
//! binary against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vx-config-generator"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run vx-config-generator")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn setup(name: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::copy(fixture(name), tmp.path().join(name)).unwrap();
    tmp
}

#[test]
fn generates_both_files_into_default_output() {
    let tmp = setup("site.json");
    let output = run(tmp.path(), &["-c", "site.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(tmp.path().join("public/manifest.json").is_file());
    assert!(tmp.path().join("public/browserconfig.xml").is_file());
    assert!(stdout(&output).contains("Generated files:"));
}

#[test]
fn manifest_matches_config() {
    let tmp = setup("site.json");
    let output = run(
        tmp.path(),
        &["-c", "site.json", "-o", "dist", "--cdn-base", "https://cdn.x.com"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(tmp.path().join("dist/manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["id"], "vezham-playground");
    assert_eq!(manifest["theme_color"], "#000000");
    assert_eq!(manifest["background_color"], "#ffffff");
    assert_eq!(
        manifest["screenshots"][0]["src"],
        "https://cdn.x.com/screenshots/home-512x512.png?vx=1.0.5"
    );
}

#[test]
fn version_flag_overrides_config() {
    let tmp = setup("basic.toml");
    let output = run(tmp.path(), &["-c", "basic.toml", "--version", "3.1.4"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let xml = std::fs::read_to_string(tmp.path().join("public/browserconfig.xml")).unwrap();
    assert!(xml.contains("icon-square-70x70.png?vx=3.1.4"));
}

#[test]
fn custom_file_names() {
    let tmp = setup("basic.json");
    let output = run(
        tmp.path(),
        &[
            "-c",
            "basic.json",
            "--manifest-name",
            "site.webmanifest",
            "--browserconfig-name",
            "tiles.xml",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(tmp.path().join("public/site.webmanifest").is_file());
    assert!(tmp.path().join("public/tiles.xml").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = setup("site.json");
    let output = run(tmp.path(), &["-c", "site.json", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Would generate:"));
    assert!(out.contains("manifest.json"));
    assert!(out.contains("browserconfig.xml"));
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn invalid_config_exits_non_zero() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("site.json"),
        r#"{ "site": { "description": "no name" } }"#,
    )
    .unwrap();

    let output = run(tmp.path(), &["-c", "site.json"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Configuration validation failed:"));
    assert!(err.contains("\u{2022} site.name is required"));
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn missing_config_exits_non_zero() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["-c", "nope.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration file not found"));
}

#[test]
fn script_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("site.ts"), "export default {}").unwrap();

    let output = run(tmp.path(), &["-c", "site.ts"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Refusing to evaluate script module"));
}

#[test]
fn print_meta_outputs_head_block() {
    let tmp = setup("basic.json");
    let output = run(tmp.path(), &["-c", "basic.json", "--print-meta"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("<title>Basic App - Simple and Clean</title>"));
    assert!(out.contains(r#"<meta property="twitter:image" content="/twitter-image.png">"#));
}

#[test]
fn config_flag_is_required() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &[]);
    assert!(!output.status.success());
}

//! End-to-end tests driving the `pkgidx` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context with a base index, two feed roots, and a config file
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("staging")).expect("failed to create staging parent");
        fs::write(
            root.join("pkgidx.toml"),
            r#"
base = "package_index.json"
staging_dir = "staging"

[[feed]]
name = "esp32"
root = "feeds/esp32"
file = "package_esp32_index.json"

[[feed]]
name = "esp8266"
root = "feeds/esp8266"
file = "package_esp8266_index.json"
"#,
        )
        .expect("failed to write config");
        Self { temp_dir }
    }

    fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    fn base(&self) -> PathBuf {
        self.root().join("package_index.json")
    }

    fn write_base(&self, json: &str) {
        fs::write(self.base(), json).expect("failed to write base");
    }

    fn write_feed(&self, feed: &str, version: &str, json: &str) {
        let dir = self.root().join("feeds").join(feed).join(version);
        fs::create_dir_all(&dir).expect("failed to create feed dir");
        fs::write(dir.join(format!("package_{feed}_index.json")), json)
            .expect("failed to write feed");
    }

    fn pkgidx(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_pkgidx"))
            .current_dir(self.root())
            .env_remove("PKGIDX_CONFIG")
            .args(args)
            .output()
            .expect("failed to run pkgidx")
    }

    fn staging_is_empty(&self) -> bool {
        fs::read_dir(self.root().join("staging"))
            .expect("staging parent missing")
            .next()
            .is_none()
    }
}

const BASE: &str = r#"{
  "packages": [
    {
      "name": "esp32",
      "maintainer": "Espressif Systems",
      "websiteURL": "https://github.com/espressif/arduino-esp32",
      "help": { "online": "http://esp32.com" },
      "platforms": [
        { "name": "esp32", "architecture": "esp32", "version": "1.0.0", "size": "1" },
        { "name": "esp32", "architecture": "esp32", "version": "0.9.0", "size": "2" }
      ],
      "tools": [ { "name": "legacy-gcc", "version": "5.2.0" } ]
    }
  ]
}"#;

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.pkgidx(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("merge"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.pkgidx(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with(&format!("pkgidx {}", env!("CARGO_PKG_VERSION"))),
        "stdout: {stdout}"
    );
}

#[test]
fn test_merge_rewrites_base() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    ctx.write_feed(
        "esp32",
        "2.0.0",
        r#"{"packages":[{"platforms":[{"name":"esp32","architecture":"esp32","version":"1.0.0","size":"99"}],"tools":[{"name":"xtensa-esp32-elf-gcc","version":"8.4.0"}]}]}"#,
    );
    ctx.write_feed(
        "esp8266",
        "3.1.2",
        r#"{"packages":[{"platforms":[{"name":"esp8266","architecture":"esp8266","version":"3.1.2"}],"tools":[{"name":"xtensa-esp32-elf-gcc","version":"8.4.0"},{"name":"mkspiffs","version":"0.2.3"}]}]}"#,
    );

    let output = ctx.pkgidx(&["merge"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("esp8266"), "stdout: {stdout}");

    let merged: serde_json::Value =
        serde_json::from_slice(&fs::read(ctx.base()).unwrap()).unwrap();
    let pkg = &merged["packages"][0];
    assert_eq!(pkg["maintainer"], "Espressif Systems");
    assert_eq!(pkg["help"]["online"], "http://esp32.com");

    let platforms = pkg["platforms"].as_array().unwrap();
    let keys: Vec<(String, String)> = platforms
        .iter()
        .map(|p| {
            (
                p["architecture"].as_str().unwrap().to_string(),
                p["version"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("esp32".to_string(), "1.0.0".to_string()),
            ("esp8266".to_string(), "3.1.2".to_string()),
            ("esp32".to_string(), "0.9.0".to_string()),
        ]
    );
    assert_eq!(platforms[0]["size"], "99");

    let tools: Vec<&str> = pkg["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tools, vec!["xtensa-esp32-elf-gcc", "mkspiffs"]);
    assert!(ctx.staging_is_empty());
}

#[test]
fn test_dry_run_does_not_write() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    ctx.write_feed("esp32", "1.0.0", r#"{"packages":[{}]}"#);
    ctx.write_feed("esp8266", "1.0.0", r#"{"packages":[{}]}"#);

    let output = ctx.pkgidx(&["--dry-run", "merge"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(ctx.base()).unwrap(), BASE);
}

#[test]
fn test_missing_feed_fails_and_keeps_base() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    ctx.write_feed("esp32", "1.0.0", r#"{"packages":[{}]}"#);

    let output = ctx.pkgidx(&["merge"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing input"), "stderr: {stderr}");
    assert_eq!(fs::read_to_string(ctx.base()).unwrap(), BASE);
    assert!(ctx.staging_is_empty());
}

#[test]
fn test_missing_base_fails() {
    let ctx = TestContext::new();
    ctx.write_feed("esp32", "1.0.0", r#"{"packages":[{}]}"#);
    ctx.write_feed("esp8266", "1.0.0", r#"{"packages":[{}]}"#);

    let output = ctx.pkgidx(&["merge"]);
    assert!(!output.status.success());
    assert!(!ctx.base().exists());
}

#[test]
fn test_malformed_feed_fails_and_keeps_base() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    ctx.write_feed("esp32", "1.0.0", r#"{"packages":[{}]}"#);
    ctx.write_feed("esp8266", "1.0.0", r#"{"packages": []}"#);

    let output = ctx.pkgidx(&["merge"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed input"), "stderr: {stderr}");
    assert_eq!(fs::read_to_string(ctx.base()).unwrap(), BASE);
}

#[test]
fn test_check_command() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    let output = ctx.pkgidx(&["check", "package_index.json"]);
    assert!(output.status.success());

    fs::write(
        ctx.root().join("dup.json"),
        r#"{"packages":[{"tools":[{"name":"t","version":"1"},{"name":"t","version":"1"}]}]}"#,
    )
    .unwrap();
    let output = ctx.pkgidx(&["check", "package_index.json", "dup.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate tool t_1"), "stderr: {stderr}");
}

#[test]
fn test_show_command() {
    let ctx = TestContext::new();
    ctx.write_base(BASE);
    let output = ctx.pkgidx(&["show", "package_index.json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Espressif Systems"));
    assert!(stdout.contains("legacy-gcc"));
}

#[test]
fn test_latest_command() {
    let ctx = TestContext::new();
    ctx.write_feed("esp32", "2.0.9", "{}");
    ctx.write_feed("esp32", "2.0.10", "{}");

    let output = ctx.pkgidx(&["latest", "feeds/esp32"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("2.0.10\t"), "stdout: {stdout}");
}

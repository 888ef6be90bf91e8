//! End-to-end tests for the relock CLI
//!
//! These tests verify:
//! - Argument validation
//! - JSON output schema for success and failure
//! - Exit codes for success, tool failure and temporary failure
//! - Environment scoping of the pnpm process
//!
//! A shell script named `pnpm` placed first on PATH stands in for the real tool.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a test project with a package.json
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let package_json = r#"{
  "name": "test-project",
  "version": "1.0.0",
  "packageManager": "pnpm@8.6.0",
  "dependencies": {
    "lodash": "^4.17.21"
  }
}"#;
    fs::write(temp_dir.path().join("package.json"), package_json).unwrap();
    temp_dir
}

fn relock() -> Command {
    Command::cargo_bin("relock").unwrap()
}

#[test]
fn test_help() {
    relock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Regenerate pnpm-lock.yaml"))
        .stdout(predicate::str::contains("--lock-file-maintenance"));
}

#[test]
fn test_invalid_upgrade_rejected() {
    relock()
        .args(["--upgrade", "pnpm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME@VERSION").or(predicate::str::contains("pnpm")));
}

#[test]
fn test_missing_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    relock()
        .arg(temp_dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_invalid_config_file_fails() {
    let project = create_test_project();
    fs::write(project.path().join("relock.toml"), "unknown_key = 1\n").unwrap();
    relock()
        .arg(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("relock.toml"));
}

#[cfg(unix)]
mod with_fake_pnpm {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Install a fake `pnpm` whose subcommands run the given shell snippets
    fn fake_pnpm(install: &str, dedupe: &str) -> TempDir {
        let bin = tempfile::tempdir().unwrap();
        let script = format!(
            "#!/bin/sh\ncase \"$1\" in\n  --version) echo 8.6.0 ;;\n  install) {} ;;\n  dedupe) {} ;;\n  *) exit 2 ;;\nesac\n",
            install, dedupe
        );
        let path = bin.path().join("pnpm");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        bin
    }

    fn path_with(bin: &Path) -> String {
        let mut paths: Vec<PathBuf> = vec![bin.to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths)
            .unwrap()
            .to_string_lossy()
            .to_string()
    }

    fn json_output(output: &[u8]) -> serde_json::Value {
        serde_json::from_slice(output).expect("Output should be valid JSON")
    }

    const WRITE_LOCK_FILE: &str = "printf \"lockfileVersion: '6.0'\\n\" > pnpm-lock.yaml";

    #[test]
    fn test_success_json() {
        let project = create_test_project();
        let bin = fake_pnpm(WRITE_LOCK_FILE, "exit 0");

        let assert = relock()
            .arg(project.path())
            .arg("--json")
            .env("PATH", path_with(bin.path()))
            .assert()
            .success();

        let json = json_output(&assert.get_output().stdout);
        assert_eq!(json["status"], "success");
        assert_eq!(json["lock_file"], "lockfileVersion: '6.0'\n");
        assert!(json["path"]
            .as_str()
            .unwrap()
            .ends_with("pnpm-lock.yaml"));
    }

    #[test]
    fn test_success_text() {
        let project = create_test_project();
        let bin = fake_pnpm(WRITE_LOCK_FILE, "exit 0");

        relock()
            .arg(project.path())
            .env("PATH", path_with(bin.path()))
            .assert()
            .success()
            .stdout(predicate::str::contains("Regenerated pnpm-lock.yaml"));

        let content = fs::read_to_string(project.path().join("pnpm-lock.yaml")).unwrap();
        assert_eq!(content, "lockfileVersion: '6.0'\n");
    }

    #[test]
    fn test_quiet_success_prints_nothing() {
        let project = create_test_project();
        let bin = fake_pnpm(WRITE_LOCK_FILE, "exit 0");

        relock()
            .arg(project.path())
            .arg("--quiet")
            .env("PATH", path_with(bin.path()))
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_tool_failure_json() {
        let project = create_test_project();
        let bin = fake_pnpm("echo ERR_PNPM_FETCH_404 >&2; exit 1", "exit 0");

        let assert = relock()
            .arg(project.path())
            .arg("--json")
            .env("PATH", path_with(bin.path()))
            .assert()
            .code(1);

        let json = json_output(&assert.get_output().stdout);
        assert_eq!(json["status"], "failure");
        assert_eq!(json["stderr"], "ERR_PNPM_FETCH_404\n");
    }

    #[test]
    fn test_missing_pnpm_is_reported() {
        let project = create_test_project();
        let empty_bin = tempfile::tempdir().unwrap();

        relock()
            .arg(project.path())
            .env("PATH", empty_bin.path())
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Failed to regenerate"))
            .stdout(predicate::str::contains("failed to start command #0"));
    }

    #[test]
    fn test_dedupe_failure_after_install() {
        let project = create_test_project();
        let bin = fake_pnpm(WRITE_LOCK_FILE, "echo dedupe broke >&2; exit 1");

        relock()
            .arg(project.path())
            .arg("--dedupe")
            .env("PATH", path_with(bin.path()))
            .assert()
            .code(1)
            .stdout(predicate::str::contains("dedupe broke"));
    }

    #[test]
    fn test_killed_tool_is_temporary() {
        let project = create_test_project();
        let bin = fake_pnpm("kill -9 $$", "exit 0");

        relock()
            .arg(project.path())
            .env("PATH", path_with(bin.path()))
            .assert()
            .code(75)
            .stderr(predicate::str::contains("temporary-error"));
    }

    #[test]
    fn test_timeout_is_temporary() {
        let project = create_test_project();
        let bin = fake_pnpm("sleep 5", "exit 0");

        relock()
            .arg(project.path())
            .args(["--timeout", "1"])
            .env("PATH", path_with(bin.path()))
            .assert()
            .code(75);
    }

    #[test]
    fn test_maintenance_removes_stale_lock_file() {
        let project = create_test_project();
        fs::write(project.path().join("pnpm-lock.yaml"), "stale\n").unwrap();
        // Appends, so stale content would survive without the removal
        let bin = fake_pnpm("echo fresh >> pnpm-lock.yaml", "exit 0");

        relock()
            .arg(project.path())
            .arg("--lock-file-maintenance")
            .env("PATH", path_with(bin.path()))
            .assert()
            .success();

        let content = fs::read_to_string(project.path().join("pnpm-lock.yaml")).unwrap();
        assert_eq!(content, "fresh\n");
    }

    #[test]
    fn test_credentials_hidden_by_default() {
        let project = create_test_project();
        let bin = fake_pnpm(
            "printf 'auth=%s cache=%s\\n' \"$NPM_AUTH\" \"$NPM_CONFIG_CACHE\" > pnpm-lock.yaml",
            "exit 0",
        );

        let assert = relock()
            .arg(project.path())
            .arg("--json")
            .env("PATH", path_with(bin.path()))
            .env("NPM_AUTH", "secret-token")
            .env("NPM_CONFIG_CACHE", "/tmp/npm-cache")
            .assert()
            .success();

        let json = json_output(&assert.get_output().stdout);
        assert_eq!(json["lock_file"], "auth= cache=/tmp/npm-cache\n");
    }

    #[test]
    fn test_credentials_exposed_on_request() {
        let project = create_test_project();
        let bin = fake_pnpm(
            "printf 'auth=%s\\n' \"$NPM_AUTH\" > pnpm-lock.yaml",
            "exit 0",
        );

        let assert = relock()
            .arg(project.path())
            .args(["--json", "--expose-all-env"])
            .env("PATH", path_with(bin.path()))
            .env("NPM_AUTH", "secret-token")
            .assert()
            .success();

        let json = json_output(&assert.get_output().stdout);
        assert_eq!(json["lock_file"], "auth=secret-token\n");
    }
}

#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;

fn branchmap_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("branchmap").unwrap()
}

/// A self-contained config: `no-external-lookup` keeps the cascade from
/// picking up configs outside the temp dir.
const TEST_CONFIG: &str = r#"
no-external-lookup = true

[[defaults]]
type = "parameters"
action_label = "Default run"

[[rules]]
pattern = "master,release/*"

[[rules.properties]]
type = "release"
action_label = "Cut a release"

[[rules.properties.parameters]]
name = "RELEASE_VERSION"
default = "0.0.0"

[[rules.properties.parameters]]
name = "TARGET"
kind = "choice"
choices = ["staging", "production"]
"#;

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	branchmap_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"CLI tool for mapping branch names",
		));
}

#[test]
fn test_version_flag() {
	branchmap_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("branchmap"));
}

#[test]
fn test_no_args_shows_help() {
	// With arg_required_else_help, no args should show help
	branchmap_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".branchmap.toml");

	branchmap_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .branchmap.toml"));

	assert!(config_path.exists());

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("[[rules]]"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".branchmap.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	branchmap_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".branchmap.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	branchmap_cmd()
		.args(["--init", "--force"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

// ============================================================================
// check tests
// ============================================================================

#[test]
fn test_check_match_exits_zero() {
	branchmap_cmd()
		.args(["check", "sandbox/acme", "sandbox/*"])
		.assert()
		.success()
		.stdout(predicate::str::contains("matches"));
}

#[test]
fn test_check_no_match_exits_nonzero() {
	branchmap_cmd()
		.args(["check", "sandbox/coyote/wiley", "sandbox/*"])
		.assert()
		.failure()
		.stdout(predicate::str::contains("does not match"));
}

#[test]
fn test_check_invert_with_exception() {
	branchmap_cmd()
		.args(["check", "staging/test", "!staging/**,staging/test/**"])
		.assert()
		.success();

	branchmap_cmd()
		.args(["check", "staging/acme", "!staging/**,staging/test/**"])
		.assert()
		.failure();
}

#[test]
fn test_check_escaped_invert_marker() {
	branchmap_cmd()
		.args(["check", "!hotfix", "\\!hotfix"])
		.assert()
		.success();
}

// ============================================================================
// resolve tests
// ============================================================================

#[test]
fn test_resolve_matching_branch() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["resolve", "master"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Cut a release"))
		.stdout(predicate::str::contains("[release]"))
		// default badge template expanded with the configured default
		.stdout(predicate::str::contains("Release #0.0.0"));
}

#[test]
fn test_resolve_glob_branch() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["resolve", "release/1.4"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Cut a release"));
}

#[test]
fn test_resolve_falls_back_to_defaults() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["resolve", "dev"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("defaults, no rule matched"))
		.stdout(predicate::str::contains("Default run"));
}

#[test]
fn test_resolve_without_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	branchmap_cmd()
		.args(["resolve", "master"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No properties for branch master"));
}

// ============================================================================
// env tests
// ============================================================================

#[test]
fn test_env_exports_defaults_and_overrides() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["env", "master", "--param", "TARGET=production"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("BRANCHMAP_BRANCH=master"))
		.stdout(predicate::str::contains("BRANCHMAP_PARAM_COUNT=2"))
		.stdout(predicate::str::contains("RELEASE_VERSION=0.0.0"))
		.stdout(predicate::str::contains("TARGET=production"));
}

#[test]
fn test_env_choice_falls_back_to_first_choice() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["env", "master"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("TARGET=staging"));
}

#[test]
fn test_env_rejects_undeclared_parameter() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["env", "master", "--param", "MYSTERY=1"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Unknown parameter"));
}

#[test]
fn test_env_rejects_invalid_choice_value() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["env", "master", "--param", "TARGET=qa"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid value for parameter"));
}

#[test]
fn test_env_rejects_malformed_override() {
	branchmap_cmd()
		.args(["env", "master", "--param", "NOVALUE"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_env_without_matches_uses_defaults() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	// The default property declares no parameters
	branchmap_cmd()
		.args(["env", "dev"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("BRANCHMAP_BRANCH=dev"))
		.stdout(predicate::str::contains("BRANCHMAP_PARAM_COUNT=0"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	branchmap_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_rejects_empty_pattern() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".branchmap.toml"),
		r#"
no-external-lookup = true

[[rules]]
pattern = ""
"#,
	)
	.unwrap();

	branchmap_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_show_lists_rules() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".branchmap.toml"), TEST_CONFIG).unwrap();

	branchmap_cmd()
		.args(["config", "show"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains(".branchmap.toml"))
		.stdout(predicate::str::contains("pattern: master,release/*"))
		.stdout(predicate::str::contains("Cut a release"));
}

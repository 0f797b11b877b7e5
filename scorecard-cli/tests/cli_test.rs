use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use scorecard_test_utils::{GitRepoTestGuard, ServiceTreeBuilder, complete_csproj, csproj_with_properties};
use tempfile::TempDir;

/// The binary with an isolated home and no provider credentials
fn scorecard(home: &TempDir) -> Command {
  let mut cmd = cargo_bin_cmd!("scorecard");
  cmd
    .env("HOME", home.path())
    .env("XDG_CONFIG_HOME", home.path().join(".config"))
    .env_remove("AZURE_DEVOPS_PAT")
    .env_remove("GITHUB_TOKEN")
    .env_remove("RUST_LOG");
  cmd
}

#[test]
fn help_lists_subcommands() {
  let home = TempDir::new().unwrap();

  scorecard(&home)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("run"))
    .stdout(predicate::str::contains("remote"))
    .stdout(predicate::str::contains("config"));
}

#[test]
fn config_prints_defaults() {
  let home = TempDir::new().unwrap();
  let working_dir = TempDir::new().unwrap();

  scorecard(&home)
    .args(["config", "--working-dir"])
    .arg(working_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("name = \"Gold\""))
    .stdout(predicate::str::contains("implicit-assembly-info"));
}

#[test]
fn config_prefers_working_dir_file() {
  let home = TempDir::new().unwrap();
  let working_dir = TempDir::new().unwrap();
  fs::write(
    working_dir.path().join("scorecard.toml"),
    "output = \"wiki/health.md\"\n\n[[groups]]\nname = \"Platinum\"\nchecks = [\"dependency-upgrades\"]\n",
  )
  .unwrap();

  scorecard(&home)
    .args(["config", "--working-dir"])
    .arg(working_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("wiki/health.md"))
    .stdout(predicate::str::contains("name = \"Platinum\""))
    .stdout(predicate::str::contains("Gold").not());
}

#[test]
fn remote_prints_identity() {
  let home = TempDir::new().unwrap();
  let git_repo = GitRepoTestGuard::with_origin("git@ssh.dev.azure.com:v3/acme/widgets/svc1");

  scorecard(&home)
    .arg("remote")
    .arg(git_repo.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("AzureDevOps: acme/widgets/svc1"));
}

#[test]
fn remote_fails_outside_git() {
  let home = TempDir::new().unwrap();
  let not_a_repo = TempDir::new().unwrap();

  scorecard(&home).arg("remote").arg(not_a_repo.path()).assert().failure();
}

#[test]
fn run_writes_report() {
  let home = TempDir::new().unwrap();
  let working_dir = TempDir::new().unwrap();
  ServiceTreeBuilder::new(working_dir.path())
    .service("services/Complete", &complete_csproj())
    .unwrap()
    .service("services/Sparse", &csproj_with_properties(&[("Company", "Acme")]))
    .unwrap();

  scorecard(&home)
    .args(["--colors", "never", "run", "--working-dir"])
    .arg(working_dir.path())
    .args(["--output", "wiki/scorecard.md"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Scorecard written to"))
    .stdout(predicate::str::contains("services/Complete 100"));

  let page = fs::read_to_string(working_dir.path().join("wiki/scorecard.md")).unwrap();
  assert!(page.starts_with("<!-- !!! THIS FILE IS AUTOGENERATED - DO NOT EDIT IT MANUALLY !!! -->"));
  assert!(page.contains("<table"));
  assert!(page.contains("<span title=\"services/Sparse\">Sparse</span>"));
  assert!(page.contains("Scorecard generated at: "));
}

#[test]
fn run_rejects_unknown_check() {
  let home = TempDir::new().unwrap();
  let working_dir = TempDir::new().unwrap();
  let config = working_dir.path().join("custom.toml");
  fs::write(&config, "[[groups]]\nname = \"Gold\"\nchecks = [\"code-coverage\"]\n").unwrap();

  scorecard(&home)
    .args(["run", "--working-dir"])
    .arg(working_dir.path())
    .arg("--config")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("code-coverage"));
}

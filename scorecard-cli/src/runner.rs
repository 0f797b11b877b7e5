//! # Check Runner
//!
//! Discovers services below a working directory and runs every configured
//! check against each of them, collecting the results into a [`RunInfo`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use futures::future::join_all;
use scorecard_core::{CheckGroup, CheckResult, RunInfo, ScorecardConfig, ServiceScorecard};
use tracing::{debug, error, info};

use crate::checks::Check;

/// Directory names never searched for services
const SKIPPED_DIRECTORIES: &[&str] = &["bin", "obj", "node_modules", "target"];

/// Relative paths (with `/` separators) of every service root below
/// `working_dir`, sorted.
///
/// A service root is a directory holding a file that matches one of the
/// configured service markers. A marker directly in `working_dir` makes it
/// a service named `.`.
pub fn discover_services(working_dir: &Path, config: &ScorecardConfig) -> Result<Vec<String>> {
  let mut services = Vec::new();
  visit(working_dir, working_dir, config, &mut services)?;
  services.sort();
  debug!("Discovered {} services below {}", services.len(), working_dir.display());
  Ok(services)
}

fn visit(root: &Path, dir: &Path, config: &ScorecardConfig, services: &mut Vec<String>) -> Result<()> {
  let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

  let mut is_service = false;
  let mut subdirectories = Vec::new();
  for entry in entries {
    let entry = entry.with_context(|| format!("Failed to read an entry of {}", dir.display()))?;
    let file_type = entry.file_type()?;
    let name = entry.file_name();
    let name = name.to_string_lossy();

    if file_type.is_dir() {
      if !name.starts_with('.') && !SKIPPED_DIRECTORIES.contains(&&*name) {
        subdirectories.push(entry.path());
      }
    } else if file_type.is_file() && config.is_service_marker(&name) {
      is_service = true;
    }
  }

  if is_service {
    services.push(relative_service_path(root, dir));
  }

  for subdirectory in subdirectories {
    visit(root, &subdirectory, config, services)?;
  }

  Ok(())
}

fn relative_service_path(root: &Path, dir: &Path) -> String {
  let relative = dir.strip_prefix(root).unwrap_or(dir);
  let parts: Vec<_> = relative
    .components()
    .map(|component| component.as_os_str().to_string_lossy().into_owned())
    .collect();

  if parts.is_empty() { ".".to_string() } else { parts.join("/") }
}

/// A presentation group and the checks it holds
pub struct CheckGroupRun {
  pub name: String,
  pub checks: Vec<Box<dyn Check>>,
}

/// Runs grouped checks against services
pub struct CheckRunner {
  groups: Vec<CheckGroupRun>,
}

impl CheckRunner {
  pub fn new(groups: Vec<CheckGroupRun>) -> Self {
    Self { groups }
  }

  fn checks(&self) -> impl Iterator<Item = &dyn Check> {
    self
      .groups
      .iter()
      .flat_map(|group| group.checks.iter().map(|check| check.as_ref()))
  }

  /// Descriptors of the configured groups, in order
  pub fn check_groups(&self) -> Vec<CheckGroup> {
    self
      .groups
      .iter()
      .map(|group| CheckGroup {
        name: group.name.clone(),
        checks: group.checks.iter().map(|check| check.info()).collect(),
      })
      .collect()
  }

  /// Run every check against one service.
  ///
  /// Checks run concurrently. A check that fails is logged and recorded
  /// with no deductions.
  pub async fn run_service(&self, working_dir: &Path, service: &str) -> ServiceScorecard {
    info!("Checking {service}");

    let results = join_all(self.checks().map(|check| async move {
      let result = check.run(working_dir, service).await;
      (check.name().to_string(), result)
    }))
    .await;

    let mut deductions_by_check: BTreeMap<String, CheckResult> = BTreeMap::new();
    for (name, result) in results {
      let deductions = result.unwrap_or_else(|failure| {
        error!("Check {name} failed for {service}: {failure:#}");
        Vec::new()
      });
      deductions_by_check.insert(name, deductions);
    }

    ServiceScorecard::new(deductions_by_check)
  }

  /// Run every check against every service
  pub async fn run(&self, working_dir: &Path, services: &[String]) -> RunInfo {
    let mut service_scores = BTreeMap::new();
    for service in services {
      let scorecard = self.run_service(working_dir, service).await;
      service_scores.insert(service.clone(), scorecard);
    }

    RunInfo::new(self.check_groups(), service_scores)
  }
}

#[cfg(test)]
mod tests {
  use anyhow::bail;
  use futures::FutureExt;
  use futures::future::BoxFuture;
  use scorecard_core::{Deduction, ServiceMarkers};
  use scorecard_test_utils::ServiceTreeBuilder;
  use tempfile::TempDir;

  use super::*;

  struct FixedCheck {
    name: &'static str,
    weights: Vec<u32>,
  }

  impl Check for FixedCheck {
    fn name(&self) -> &str {
      self.name
    }

    fn description(&self) -> &str {
      "fixed"
    }

    fn run<'a>(&'a self, _working_dir: &'a Path, service: &'a str) -> BoxFuture<'a, Result<Vec<Deduction>>> {
      async move {
        Ok(
          self
            .weights
            .iter()
            .map(|weight| Deduction::create(*weight, format!("{service} loses {weight}")))
            .collect(),
        )
      }
      .boxed()
    }
  }

  struct FailingCheck;

  impl Check for FailingCheck {
    fn name(&self) -> &str {
      "failing"
    }

    fn description(&self) -> &str {
      "always fails"
    }

    fn run<'a>(&'a self, _working_dir: &'a Path, _service: &'a str) -> BoxFuture<'a, Result<Vec<Deduction>>> {
      async move { bail!("boom") }.boxed()
    }
  }

  fn fixed(name: &'static str, weights: &[u32]) -> Box<dyn Check> {
    Box::new(FixedCheck {
      name,
      weights: weights.to_vec(),
    })
  }

  #[test]
  fn test_discover_services() {
    let temp_dir = TempDir::new().unwrap();
    ServiceTreeBuilder::new(temp_dir.path())
      .file("services/b/B.csproj", "")
      .unwrap()
      .file("services/a/A.csproj", "")
      .unwrap()
      .file("services/a/bin/Debug/Copy.csproj", "")
      .unwrap()
      .file("services/a/tests/A.Tests.csproj", "")
      .unwrap()
      .file(".hidden/H.csproj", "")
      .unwrap()
      .file("node_modules/pkg/P.csproj", "")
      .unwrap()
      .file("docs/readme.md", "")
      .unwrap();

    let services = discover_services(temp_dir.path(), &ScorecardConfig::default()).unwrap();

    assert_eq!(services, vec!["services/a", "services/a/tests", "services/b"]);
  }

  #[test]
  fn test_discover_services_at_root_with_custom_marker() {
    let temp_dir = TempDir::new().unwrap();
    ServiceTreeBuilder::new(temp_dir.path())
      .file("package.json", "{}")
      .unwrap()
      .file("web/package.json", "{}")
      .unwrap();
    let config = ScorecardConfig {
      service_markers: ServiceMarkers::new(["package.json"]).unwrap(),
      ..ScorecardConfig::default()
    };

    let services = discover_services(temp_dir.path(), &config).unwrap();

    assert_eq!(services, vec![".", "web"]);
  }

  #[test]
  fn test_discover_services_with_glob_marker() {
    let temp_dir = TempDir::new().unwrap();
    ServiceTreeBuilder::new(temp_dir.path())
      .file("a/Svc1.csproj", "")
      .unwrap()
      .file("b/svc2.csproj", "")
      .unwrap()
      .file("c/Tools.csproj", "")
      .unwrap();
    let config = ScorecardConfig {
      service_markers: ServiceMarkers::new(["[Ss]vc?.csproj"]).unwrap(),
      ..ScorecardConfig::default()
    };

    let services = discover_services(temp_dir.path(), &config).unwrap();

    assert_eq!(services, vec!["a", "b"]);
  }

  #[tokio::test]
  async fn test_run_collects_scores_by_check() {
    let temp_dir = TempDir::new().unwrap();
    let runner = CheckRunner::new(vec![
      CheckGroupRun {
        name: "Gold".to_string(),
        checks: vec![fixed("check-b", &[20, 20]), fixed("check-a", &[])],
      },
      CheckGroupRun {
        name: "Silver".to_string(),
        checks: vec![Box::new(FailingCheck)],
      },
    ]);

    let run_info = runner
      .run(temp_dir.path(), &["svc2".to_string(), "svc1".to_string()])
      .await;

    let services: Vec<_> = run_info.service_scores().keys().cloned().collect();
    assert_eq!(services, vec!["svc1", "svc2"]);

    let scorecard = &run_info.service_scores()["svc1"];
    assert_eq!(scorecard.score_for("check-b"), Some(60));
    assert_eq!(scorecard.score_for("check-a"), Some(100));
    assert_eq!(scorecard.score_for("failing"), Some(100));
    assert_eq!(scorecard.average(), 87);

    let check_names: Vec<_> = run_info.checks().map(|check| check.name.as_str()).collect();
    assert_eq!(check_names, vec!["check-b", "check-a", "failing"]);
    assert_eq!(run_info.groups()[1].name, "Silver");
  }
}

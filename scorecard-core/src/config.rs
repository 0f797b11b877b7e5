//! # Configuration Management
//!
//! Loads `scorecard.toml`, which names the report path, the files that mark
//! a directory as a service root and the ordered check groups. Lookup falls
//! back from an explicit path to the working directory, then to the XDG
//! config directory, then to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "scorecard.toml";

/// Default report path, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "scorecard.md";

/// Service marker used when none is configured
pub const DEFAULT_SERVICE_MARKER: &str = "*.csproj";

/// Name of the implicit-assembly-info check
pub const IMPLICIT_ASSEMBLY_INFO: &str = "implicit-assembly-info";

/// Name of the dependency-upgrade check
pub const DEPENDENCY_UPGRADES: &str = "dependency-upgrades";

/// One named, ordered group of checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
  pub name: String,
  #[serde(default)]
  pub checks: Vec<String>,
}

impl GroupConfig {
  fn new(name: &str, checks: &[&str]) -> Self {
    Self {
      name: name.to_string(),
      checks: checks.iter().map(|check| check.to_string()).collect(),
    }
  }
}

/// Glob patterns matching the file names that mark a service root.
///
/// Patterns are compiled once, when the configuration is built or loaded;
/// an invalid pattern fails the load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ServiceMarkers {
  patterns: Vec<String>,
  set: GlobSet,
}

impl ServiceMarkers {
  pub fn new<I, S>(patterns: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();

    let mut builder = GlobSetBuilder::new();
    for pattern in &patterns {
      let glob = Glob::new(pattern).with_context(|| format!("Invalid service marker pattern '{pattern}'"))?;
      builder.add(glob);
    }
    let set = builder.build().context("Failed to build service marker patterns")?;

    Ok(Self { patterns, set })
  }

  pub fn patterns(&self) -> &[String] {
    &self.patterns
  }

  /// Whether `file_name` matches any pattern
  pub fn is_match(&self, file_name: &str) -> bool {
    self.set.is_match(file_name)
  }
}

impl Default for ServiceMarkers {
  fn default() -> Self {
    Self::new([DEFAULT_SERVICE_MARKER]).expect("default service marker is a valid glob")
  }
}

impl PartialEq for ServiceMarkers {
  fn eq(&self, other: &Self) -> bool {
    self.patterns == other.patterns
  }
}

impl Eq for ServiceMarkers {}

impl TryFrom<Vec<String>> for ServiceMarkers {
  type Error = String;

  fn try_from(patterns: Vec<String>) -> Result<Self, Self::Error> {
    Self::new(patterns).map_err(|error| format!("{error:#}"))
  }
}

impl From<ServiceMarkers> for Vec<String> {
  fn from(markers: ServiceMarkers) -> Self {
    markers.patterns
  }
}

/// Effective configuration of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
  /// Report path; relative paths resolve against the working directory
  pub output: PathBuf,
  /// File-name globs marking a service root
  pub service_markers: ServiceMarkers,
  pub groups: Vec<GroupConfig>,
}

impl Default for ScorecardConfig {
  fn default() -> Self {
    Self {
      output: PathBuf::from(DEFAULT_OUTPUT),
      service_markers: ServiceMarkers::default(),
      groups: vec![
        GroupConfig::new("Gold", &[IMPLICIT_ASSEMBLY_INFO]),
        GroupConfig::new("Silver", &[DEPENDENCY_UPGRADES]),
        GroupConfig::new("Bronze", &[]),
      ],
    }
  }
}

impl ScorecardConfig {
  /// Load configuration from `path`
  pub fn load(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }

  /// Find and load the effective configuration.
  ///
  /// An explicit path must exist; the implicit locations are optional.
  pub fn discover(explicit: Option<&Path>, working_dir: &Path, dirs: Option<&ConfigDirs>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load(path);
    }

    let local = working_dir.join(CONFIG_FILE_NAME);
    if local.is_file() {
      debug!("Using config from {}", local.display());
      return Self::load(&local);
    }

    if let Some(dirs) = dirs {
      let global = dirs.config_path();
      if global.is_file() {
        debug!("Using config from {}", global.display());
        return Self::load(&global);
      }
    }

    debug!("No config file found, using defaults");
    Ok(Self::default())
  }

  /// Serialize as pretty TOML
  pub fn to_toml(&self) -> Result<String> {
    toml::to_string_pretty(self).context("Failed to serialize config to TOML")
  }

  /// Whether `file_name` matches any configured service marker
  pub fn is_service_marker(&self, file_name: &str) -> bool {
    self.service_markers.is_match(file_name)
  }
}

/// Configuration directories for the scorecard application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  pub fn new() -> Result<Self> {
    let proj_dirs =
      ProjectDirs::from("", "", "scorecard").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Path of the user-wide `scorecard.toml`
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;
  use test_case::test_case;

  use super::*;

  #[test]
  fn test_default_groups() {
    let config = ScorecardConfig::default();

    let names: Vec<_> = config.groups.iter().map(|group| group.name.as_str()).collect();
    assert_eq!(names, vec!["Gold", "Silver", "Bronze"]);
    assert_eq!(config.groups[0].checks, vec![IMPLICIT_ASSEMBLY_INFO]);
    assert_eq!(config.groups[1].checks, vec![DEPENDENCY_UPGRADES]);
    assert!(config.groups[2].checks.is_empty());
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "output = \"docs/health.md\"\n").unwrap();

    let config = ScorecardConfig::load(&path).unwrap();

    assert_eq!(config.output, PathBuf::from("docs/health.md"));
    assert_eq!(config.service_markers.patterns(), ["*.csproj"]);
    assert_eq!(config.groups.len(), 3);
  }

  #[test]
  fn test_groups_keep_file_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
      &path,
      r#"
service_markers = ["package.json"]

[[groups]]
name = "Tier 1"
checks = ["dependency-upgrades"]

[[groups]]
name = "Tier 2"
"#,
    )
    .unwrap();

    let config = ScorecardConfig::load(&path).unwrap();

    assert_eq!(config.groups[0], GroupConfig::new("Tier 1", &[DEPENDENCY_UPGRADES]));
    assert_eq!(config.groups[1], GroupConfig::new("Tier 2", &[]));
    assert_eq!(config.service_markers.patterns(), ["package.json"]);
  }

  #[test]
  fn test_discover_prefers_working_dir_over_config_dir() {
    let working = TempDir::new().unwrap();
    let global = TempDir::new().unwrap();
    fs::write(working.path().join(CONFIG_FILE_NAME), "output = \"local.md\"\n").unwrap();
    fs::write(global.path().join(CONFIG_FILE_NAME), "output = \"global.md\"\n").unwrap();
    let dirs = ConfigDirs {
      config_dir: global.path().to_path_buf(),
    };

    let config = ScorecardConfig::discover(None, working.path(), Some(&dirs)).unwrap();
    assert_eq!(config.output, PathBuf::from("local.md"));

    fs::remove_file(working.path().join(CONFIG_FILE_NAME)).unwrap();
    let config = ScorecardConfig::discover(None, working.path(), Some(&dirs)).unwrap();
    assert_eq!(config.output, PathBuf::from("global.md"));
  }

  #[test]
  fn test_discover_falls_back_to_defaults() {
    let working = TempDir::new().unwrap();
    let config = ScorecardConfig::discover(None, working.path(), None).unwrap();
    assert_eq!(config, ScorecardConfig::default());
  }

  #[test]
  fn test_discover_explicit_path_must_exist() {
    let working = TempDir::new().unwrap();
    let missing = working.path().join("missing.toml");
    assert!(ScorecardConfig::discover(Some(&missing), working.path(), None).is_err());
  }

  #[test]
  fn test_to_toml_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    let config = ScorecardConfig::default();
    fs::write(&path, config.to_toml().unwrap()).unwrap();

    assert_eq!(ScorecardConfig::load(&path).unwrap(), config);
  }

  #[test_case("*.csproj", "Svc1.csproj", true ; "extension wildcard")]
  #[test_case("*.csproj", "Svc1.csproj.user", false ; "trailing text")]
  #[test_case("package.json", "package.json", true ; "exact name")]
  #[test_case("package.json", "package.json5", false ; "exact name mismatch")]
  #[test_case("Svc*.*proj", "Svc1.fsproj", true ; "multiple wildcards")]
  #[test_case("[Ss]vc*.csproj", "svc1.csproj", true ; "character class")]
  #[test_case("[Ss]vc*.csproj", "Tvc1.csproj", false ; "character class mismatch")]
  #[test_case("Svc?.csproj", "Svc1.csproj", true ; "single character")]
  #[test_case("Svc?.csproj", "Svc12.csproj", false ; "single character too long")]
  #[test_case("*.{cs,fs}proj", "Svc1.fsproj", true ; "alternation")]
  fn test_service_markers_match(pattern: &str, name: &str, expected: bool) {
    let markers = ServiceMarkers::new([pattern]).unwrap();
    assert_eq!(markers.is_match(name), expected);
  }

  #[test]
  fn test_service_markers_match_any_pattern() {
    let markers = ServiceMarkers::new(["*.csproj", "package.json"]).unwrap();

    assert!(markers.is_match("package.json"));
    assert!(markers.is_match("Svc1.csproj"));
    assert!(!markers.is_match("README.md"));
  }

  #[test]
  fn test_invalid_service_marker_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "service_markers = [\"[unclosed\"]\n").unwrap();

    let error = ScorecardConfig::load(&path).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("Failed to parse config from"));
    assert!(message.contains("Invalid service marker pattern '[unclosed'"));
  }
}

//! # Credential Discovery
//!
//! Pre-issued provider credentials are looked up once per run, in this order:
//! an explicit value from the command line, an environment variable, then the
//! user's `.netrc` file. Nothing here refreshes or rotates a credential.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// `.netrc` machine holding the Azure DevOps personal access token
pub const AZURE_DEVOPS_MACHINE: &str = "dev.azure.com";

/// `.netrc` machine holding the GitHub token
pub const GITHUB_MACHINE: &str = "github.com";

/// Environment variable carrying the Azure DevOps personal access token
pub const ENV_AZURE_DEVOPS_PAT: &str = "AZURE_DEVOPS_PAT";

/// Environment variable carrying the GitHub token
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Represents credentials for a provider
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  /// Azure DevOps authenticates a PAT as the password of an empty username
  pub fn personal_access_token(token: &str) -> Self {
    Self {
      username: String::new(),
      password: token.to_string(),
    }
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Returns the path to the `.netrc` file for the provided home directory.
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. A missing machine, or one without both `login` and
/// `password`, yields `Ok(None)`.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let reader = BufReader::new(file);

  let mut tokens = Vec::new();
  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    tokens.extend(line.split_whitespace().map(str::to_string));
  }

  Ok(find_machine(&tokens, target_machine))
}

fn find_machine(tokens: &[String], target_machine: &str) -> Option<Credentials> {
  let mut current_machine: Option<&str> = None;
  let mut username: Option<&str> = None;
  let mut password: Option<&str> = None;

  let mut iter = tokens.iter();
  while let Some(token) = iter.next() {
    match token.as_str() {
      "machine" => {
        if current_machine == Some(target_machine)
          && let (Some(username), Some(password)) = (username, password)
        {
          return Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
          });
        }
        current_machine = iter.next().map(String::as_str);
        username = None;
        password = None;
      }
      "login" => username = iter.next().map(String::as_str),
      "password" => password = iter.next().map(String::as_str),
      _ => {}
    }
  }

  match (current_machine, username, password) {
    (Some(machine), Some(username), Some(password)) if machine == target_machine => Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    }),
    _ => None,
  }
}

/// Resolve the Azure DevOps PAT for this run.
///
/// The `.netrc` login is ignored: Azure DevOps expects an empty username.
pub fn azure_devops_credentials(explicit: Option<&str>, home: Option<&Path>) -> Result<Option<Credentials>> {
  let env_value = std::env::var(ENV_AZURE_DEVOPS_PAT).ok();
  let found = lookup(explicit, env_value, home, AZURE_DEVOPS_MACHINE)?;
  Ok(found.map(|creds| Credentials::personal_access_token(&creds.password)))
}

/// Resolve the GitHub credentials for this run.
///
/// A bare token (flag or environment) comes back with an empty username; a
/// `.netrc` entry keeps its login.
pub fn github_credentials(explicit: Option<&str>, home: Option<&Path>) -> Result<Option<Credentials>> {
  let env_value = std::env::var(ENV_GITHUB_TOKEN).ok();
  lookup(explicit, env_value, home, GITHUB_MACHINE)
}

fn lookup(
  explicit: Option<&str>,
  env_value: Option<String>,
  home: Option<&Path>,
  machine: &str,
) -> Result<Option<Credentials>> {
  if let Some(token) = explicit.filter(|token| !token.is_empty()) {
    return Ok(Some(Credentials::personal_access_token(token)));
  }

  if let Some(token) = env_value.filter(|token| !token.is_empty()) {
    return Ok(Some(Credentials::personal_access_token(&token)));
  }

  let Some(home) = home else {
    return Ok(None);
  };

  let netrc_path = get_netrc_path(home);
  if !netrc_path.exists() {
    return Ok(None);
  }

  parse_netrc_file(&netrc_path, machine)
}

/// The user's home directory, if one can be determined.
pub fn home_dir() -> Option<PathBuf> {
  directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use scorecard_test_utils::EnvVarGuard;
  use tempfile::TempDir;

  use super::*;

  fn create_test_netrc(content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(get_netrc_path(temp_dir.path()), content).unwrap();
    temp_dir
  }

  #[test]
  fn test_parse_netrc_file_multiple_machines() {
    let content = r#"machine dev.azure.com
  login anything
  password azure-pat

machine github.com
  login octocat
  password gh-token
"#;
    let home = create_test_netrc(content);

    let creds = parse_netrc_file(&get_netrc_path(home.path()), GITHUB_MACHINE)
      .unwrap()
      .unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "gh-token");

    let creds = parse_netrc_file(&get_netrc_path(home.path()), AZURE_DEVOPS_MACHINE)
      .unwrap()
      .unwrap();
    assert_eq!(creds.password, "azure-pat");
  }

  #[test]
  fn test_parse_netrc_file_single_line() {
    let home = create_test_netrc("machine github.com login octocat password gh-token\n");

    let creds = parse_netrc_file(&get_netrc_path(home.path()), GITHUB_MACHINE)
      .unwrap()
      .unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "gh-token");
  }

  #[test]
  fn test_parse_netrc_file_incomplete_entry() {
    let home = create_test_netrc("machine github.com\n  login octocat\n");

    let result = parse_netrc_file(&get_netrc_path(home.path()), GITHUB_MACHINE).unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn test_lookup_prefers_explicit_value() {
    let home = create_test_netrc("machine github.com login octocat password from-netrc\n");

    let creds = lookup(
      Some("from-flag"),
      Some("from-env".to_string()),
      Some(home.path()),
      GITHUB_MACHINE,
    )
    .unwrap()
    .unwrap();
    assert_eq!(creds.password, "from-flag");
    assert!(creds.username.is_empty());
  }

  #[test]
  fn test_lookup_falls_back_to_environment_then_netrc() {
    let home = create_test_netrc("machine github.com login octocat password from-netrc\n");

    let creds = lookup(None, Some("from-env".to_string()), Some(home.path()), GITHUB_MACHINE)
      .unwrap()
      .unwrap();
    assert_eq!(creds.password, "from-env");

    let creds = lookup(None, Some(String::new()), Some(home.path()), GITHUB_MACHINE)
      .unwrap()
      .unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "from-netrc");
  }

  #[test]
  fn test_lookup_without_any_source() {
    let home = TempDir::new().unwrap();
    assert!(lookup(None, None, Some(home.path()), GITHUB_MACHINE).unwrap().is_none());
    assert!(lookup(None, None, None, GITHUB_MACHINE).unwrap().is_none());
  }

  #[test]
  fn test_azure_devops_credentials_drop_netrc_login() {
    let home = create_test_netrc("machine dev.azure.com login someone password azure-pat\n");
    let _env = EnvVarGuard::new().remove(ENV_AZURE_DEVOPS_PAT);

    let creds = azure_devops_credentials(None, Some(home.path())).unwrap().unwrap();
    assert!(creds.username.is_empty());
    assert_eq!(creds.password, "azure-pat");
  }

  #[test]
  fn test_github_credentials_read_environment() {
    let home = create_test_netrc("machine github.com login octocat password from-netrc\n");
    let _env = EnvVarGuard::new().set(ENV_GITHUB_TOKEN, "from-env");

    let creds = github_credentials(None, Some(home.path())).unwrap().unwrap();
    assert!(creds.username.is_empty());
    assert_eq!(creds.password, "from-env");

    let creds = github_credentials(Some("from-flag"), Some(home.path())).unwrap().unwrap();
    assert_eq!(creds.password, "from-flag");
  }

  #[test]
  fn test_credentials_debug_redacts_password() {
    let rendered = format!("{:?}", Credentials::personal_access_token("secret"));
    assert!(!rendered.contains("secret"));
  }
}

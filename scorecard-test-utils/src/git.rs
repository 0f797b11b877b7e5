//! Git repository management for testing
//!
//! Creates temporary git repositories whose remotes can be configured, so
//! remote listing and resolution can run against real git metadata.

use std::path::Path;

use anyhow::Result;
use git2::Repository;
use tempfile::TempDir;

/// A test guard owning a temporary git repository.
///
/// The repository is deleted when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new test git repository
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let repo = Repository::init(temp_path).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Scorecard Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "scorecard-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Create a test repository with a single `origin` remote
  pub fn with_origin(url: &str) -> Self {
    let guard = Self::new();
    guard.add_remote("origin", url).expect("Failed to add origin remote");
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Add a remote named `name` fetching from `url`
  pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
    self.repo.remote(name, url)?;
    Ok(())
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

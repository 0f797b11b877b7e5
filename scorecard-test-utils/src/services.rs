//! Service tree fixtures
//!
//! Builds directory trees of services (directories holding project files)
//! under an arbitrary root, typically a [`tempfile::TempDir`] or a
//! [`crate::GitRepoTestGuard`] work tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Every property the implicit-assembly-info check looks for
pub const ASSEMBLY_PROPERTIES: &[&str] = &[
  "Company",
  "Copyright",
  "Description",
  "FileVersion",
  "InformalVersion",
  "Product",
  "UserSecretsId",
];

/// Render a minimal SDK-style project file holding `properties`
pub fn csproj_with_properties(properties: &[(&str, &str)]) -> String {
  let mut content = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n");
  for (name, value) in properties {
    content.push_str(&format!("    <{name}>{value}</{name}>\n"));
  }
  content.push_str("  </PropertyGroup>\n</Project>\n");
  content
}

/// Project file with every assembly property and generation enabled
pub fn complete_csproj() -> String {
  let mut properties: Vec<(&str, &str)> = ASSEMBLY_PROPERTIES.iter().map(|name| (*name, "value")).collect();
  properties.push(("GenerateAssemblyInfo", "true"));
  csproj_with_properties(&properties)
}

/// Writes files below a root directory
pub struct ServiceTreeBuilder {
  root: PathBuf,
}

impl ServiceTreeBuilder {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
    }
  }

  /// Write `content` to `relative_path`, creating parent directories
  pub fn file(self, relative_path: &str, content: &str) -> Result<Self> {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(self)
  }

  /// Create a service directory holding `{name}.csproj`
  pub fn service(self, relative_dir: &str, csproj: &str) -> Result<Self> {
    let name = Path::new(relative_dir)
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or("Service")
      .to_string();
    self.file(&format!("{relative_dir}/{name}.csproj"), csproj)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_service_writes_project_file() {
    let temp_dir = TempDir::new().unwrap();

    ServiceTreeBuilder::new(temp_dir.path())
      .service("services/svc1", &complete_csproj())
      .unwrap();

    let content = fs::read_to_string(temp_dir.path().join("services/svc1/svc1.csproj")).unwrap();
    assert!(content.contains("<Company>value</Company>"));
    assert!(content.contains("<GenerateAssemblyInfo>true</GenerateAssemblyInfo>"));
  }
}

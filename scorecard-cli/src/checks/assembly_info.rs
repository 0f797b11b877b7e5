//! # Implicit Assembly Info Check
//!
//! SDK-style projects can generate assembly attributes from project
//! properties. This check expects every descriptive property to be set and
//! generation to be switched on.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;
use scorecard_core::Deduction;
use scorecard_core::config::IMPLICIT_ASSEMBLY_INFO;

use super::{Check, first_project_file};

/// Properties that must appear in a `<PropertyGroup>`
pub const REQUIRED_PROPERTIES: &[&str] = &[
  "Company",
  "Copyright",
  "Description",
  "FileVersion",
  "InformalVersion",
  "Product",
  "UserSecretsId",
];

const MISSING_PROPERTY_WEIGHT: u32 = 20;
const GENERATION_WEIGHT: u32 = 100;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));

/// Opening, closing or self-closing element tag; quoted attribute values may hold `>`
static TAG: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<(/)?([A-Za-z_][\w.:\-]*)(?:[^>"']|"[^"]*"|'[^']*')*?(/)?>"#).expect("valid tag pattern")
});

/// Checks that the project file describes its assembly
pub struct ImplicitAssemblyInfo;

impl Check for ImplicitAssemblyInfo {
  fn name(&self) -> &str {
    IMPLICIT_ASSEMBLY_INFO
  }

  fn description(&self) -> &str {
    "Project files set Company, Copyright, Description, FileVersion, InformalVersion, Product and \
     UserSecretsId, and generate assembly info from them"
  }

  fn run<'a>(&'a self, working_dir: &'a Path, relative_service_path: &'a str) -> BoxFuture<'a, Result<Vec<Deduction>>> {
    async move { inspect(&working_dir.join(relative_service_path)) }.boxed()
  }
}

fn inspect(service_root: &Path) -> Result<Vec<Deduction>> {
  let Some(csproj) = first_project_file(service_root)? else {
    return Ok(vec![Deduction::create(
      GENERATION_WEIGHT,
      format!("No csproj file found at {}", service_root.display()),
    )]);
  };

  let content = fs::read_to_string(&csproj).with_context(|| format!("Failed to read {}", csproj.display()))?;
  let properties = property_group_elements(&content);
  let lookup = |name: &str| {
    properties
      .iter()
      .find(|(property, _)| property == name)
      .map(|(_, value)| value.as_str())
  };

  let mut deductions: Vec<Deduction> = REQUIRED_PROPERTIES
    .iter()
    .filter(|name| lookup(**name).is_none())
    .map(|name| {
      Deduction::create(
        MISSING_PROPERTY_WEIGHT,
        format!("No <{name}> element found in {}", csproj.display()),
      )
    })
    .collect();

  match lookup("GenerateAssemblyInfo").filter(|value| !value.is_empty()) {
    None => deductions.push(Deduction::create(
      GENERATION_WEIGHT,
      format!("No <GenerateAssemblyInfo> element found in {}", csproj.display()),
    )),
    Some(value) if !value.eq_ignore_ascii_case("true") => deductions.push(Deduction::create(
      GENERATION_WEIGHT,
      format!("Expected: <GenerateAssemblyInfo> should contain 'true'. Actual: '{value}'"),
    )),
    Some(_) => {}
  }

  Ok(deductions)
}

/// Direct children of every `/Project/PropertyGroup` as `(name, trimmed
/// text)` pairs, in document order.
///
/// Text is the concatenated text of the element and its descendants.
fn property_group_elements(content: &str) -> Vec<(String, String)> {
  let content = COMMENT.replace_all(content, "");

  let mut elements = Vec::new();
  let mut open: Vec<&str> = Vec::new();
  // Name and content offset of the property being read
  let mut property: Option<(&str, usize)> = None;

  for tag in TAG.captures_iter(&content) {
    let Some(whole) = tag.get(0) else {
      continue;
    };
    let name = tag.get(2).map_or("", |name| name.as_str());

    if tag.get(1).is_some() {
      open.pop();
      if open.len() == 2
        && let Some((property_name, start)) = property.take()
      {
        let text = TAG.replace_all(&content[start..whole.start()], "");
        elements.push((property_name.to_string(), text.trim().to_string()));
      }
      continue;
    }

    let is_property = matches!(open.as_slice(), ["Project", "PropertyGroup"]);
    if tag.get(3).is_some() {
      if is_property {
        elements.push((name.to_string(), String::new()));
      }
      continue;
    }

    if is_property {
      property = Some((name, whole.end()));
    }
    open.push(name);
  }

  elements
}

#[cfg(test)]
mod tests {
  use scorecard_test_utils::{ServiceTreeBuilder, complete_csproj, csproj_with_properties};
  use tempfile::TempDir;

  use super::*;

  async fn run_on(csproj: Option<&str>) -> (TempDir, Vec<Deduction>) {
    let temp_dir = TempDir::new().unwrap();
    let builder = ServiceTreeBuilder::new(temp_dir.path());
    match csproj {
      Some(content) => builder.service("services/Svc1", content).unwrap(),
      None => builder.file("services/Svc1/readme.md", "").unwrap(),
    };

    let deductions = ImplicitAssemblyInfo
      .run(temp_dir.path(), "services/Svc1")
      .await
      .unwrap();
    (temp_dir, deductions)
  }

  #[tokio::test]
  async fn test_complete_project_has_no_deductions() {
    let (_temp_dir, deductions) = run_on(Some(&complete_csproj())).await;
    assert!(deductions.is_empty());
  }

  #[tokio::test]
  async fn test_missing_project_file() {
    let (_temp_dir, deductions) = run_on(None).await;

    assert_eq!(deductions.len(), 1);
    assert_eq!(deductions[0].weight(), Some(100));
    assert!(deductions[0].message().starts_with("No csproj file found at "));
    assert!(deductions[0].message().ends_with("Svc1"));
  }

  #[tokio::test]
  async fn test_missing_properties_and_generation() {
    let csproj = csproj_with_properties(&[("Company", "Acme"), ("Product", "")]);
    let (_temp_dir, deductions) = run_on(Some(&csproj)).await;

    let messages: Vec<_> = deductions
      .iter()
      .map(|deduction| deduction.message().split(" found in ").next().unwrap_or_default().to_string())
      .collect();
    assert_eq!(
      messages,
      vec![
        "No <Copyright> element",
        "No <Description> element",
        "No <FileVersion> element",
        "No <InformalVersion> element",
        "No <UserSecretsId> element",
        "No <GenerateAssemblyInfo> element",
      ]
    );
    let weights: Vec<_> = deductions.iter().filter_map(Deduction::weight).collect();
    assert_eq!(weights, vec![20, 20, 20, 20, 20, 100]);
  }

  #[tokio::test]
  async fn test_generation_must_be_true() {
    let mut properties: Vec<(&str, &str)> = REQUIRED_PROPERTIES.iter().map(|name| (*name, "x")).collect();
    properties.push(("GenerateAssemblyInfo", "false"));
    let (_temp_dir, deductions) = run_on(Some(&csproj_with_properties(&properties))).await;

    assert_eq!(deductions.len(), 1);
    assert_eq!(
      deductions[0].message(),
      "Expected: <GenerateAssemblyInfo> should contain 'true'. Actual: 'false'"
    );
  }

  #[test]
  fn test_generation_flag_is_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    let mut properties: Vec<(&str, &str)> = REQUIRED_PROPERTIES.iter().map(|name| (*name, "x")).collect();
    properties.push(("GenerateAssemblyInfo", "True"));
    ServiceTreeBuilder::new(temp_dir.path())
      .service("Svc1", &csproj_with_properties(&properties))
      .unwrap();

    assert!(inspect(&temp_dir.path().join("Svc1")).unwrap().is_empty());
  }

  #[test]
  fn test_property_group_elements_ignore_nested_elements() {
    let content = r#"<Project>
  <PropertyGroup>
    <Company><Name>Acme</Name> Corp</Company>
    <Extra>
      <Product>Widgets</Product>
    </Extra>
  </PropertyGroup>
  <Target Name="Build">
    <PropertyGroup>
      <Description>inside a target</Description>
    </PropertyGroup>
  </Target>
</Project>"#;

    assert_eq!(
      property_group_elements(content),
      vec![
        ("Company".to_string(), "Acme Corp".to_string()),
        ("Extra".to_string(), "Widgets".to_string()),
      ]
    );
  }

  #[tokio::test]
  async fn test_nested_property_is_missing() {
    let mut properties: Vec<(&str, &str)> = REQUIRED_PROPERTIES
      .iter()
      .filter(|name| **name != "Product")
      .map(|name| (*name, "x"))
      .collect();
    properties.push(("GenerateAssemblyInfo", "true"));
    properties.push(("Extra", "<Product>Widgets</Product>"));
    let (_temp_dir, deductions) = run_on(Some(&csproj_with_properties(&properties))).await;

    assert_eq!(deductions.len(), 1);
    assert!(deductions[0].message().starts_with("No <Product> element found in "));
  }

  #[test]
  fn test_attribute_values_may_contain_angle_brackets() {
    let content = r#"<Project>
  <PropertyGroup Condition="'$(Major)' > '1'">
    <Company>Acme</Company>
  </PropertyGroup>
</Project>"#;

    assert_eq!(
      property_group_elements(content),
      vec![("Company".to_string(), "Acme".to_string())]
    );
  }

  #[test]
  fn test_property_group_elements() {
    let content = r#"<Project Sdk="Microsoft.NET.Sdk">
  <!-- <Company>Commented</Company> -->
  <PropertyGroup Condition="'$(Configuration)' == 'Release'">
    <Company>Acme</Company>
    <UserSecretsId />
  </PropertyGroup>
  <ItemGroup>
    <Description>not a property</Description>
  </ItemGroup>
  <PropertyGroup>
    <Product>
      Widgets
    </Product>
  </PropertyGroup>
</Project>"#;

    assert_eq!(
      property_group_elements(content),
      vec![
        ("Company".to_string(), "Acme".to_string()),
        ("UserSecretsId".to_string(), String::new()),
        ("Product".to_string(), "Widgets".to_string()),
      ]
    );
  }
}

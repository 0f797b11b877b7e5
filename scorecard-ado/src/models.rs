use serde::Deserialize;

/// Envelope Azure DevOps wraps around every collection
#[derive(Debug, Clone, Deserialize)]
pub struct AzureList<T> {
  #[serde(default = "Vec::new")]
  pub value: Vec<T>,
}

/// Represents an Azure DevOps pull request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzurePullRequest {
  pub pull_request_id: u64,
  pub source_ref_name: String,
  pub repository: AzureRepository,
}

/// Repository reference embedded in a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct AzureRepository {
  pub id: String,
  pub name: String,
}

/// One push within a pull request's lifetime
#[derive(Debug, Clone, Deserialize)]
pub struct AzureIteration {
  pub id: u64,
}

/// Changes introduced by one iteration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureChanges {
  #[serde(default)]
  pub change_entries: Vec<AzureChangeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureChangeEntry {
  #[serde(default)]
  pub item: Option<AzureChangeItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureChangeItem {
  #[serde(default)]
  pub path: Option<String>,
}

impl AzureChanges {
  /// Paths of all entries carrying one, in entry order
  pub fn paths(self) -> impl Iterator<Item = String> {
    self
      .change_entries
      .into_iter()
      .filter_map(|entry| entry.item.and_then(|item| item.path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pull_request_list_decodes_camel_case() {
    let list: AzureList<AzurePullRequest> = serde_json::from_value(serde_json::json!({
      "value": [{
        "pullRequestId": 17,
        "sourceRefName": "refs/heads/renovate/widget-1.x",
        "status": "active",
        "repository": {"id": "3411ebc1", "name": "svc1", "url": "https://dev.azure.com/..."}
      }],
      "count": 1
    }))
    .unwrap();

    assert_eq!(list.value[0].pull_request_id, 17);
    assert_eq!(list.value[0].repository.name, "svc1");
  }

  #[test]
  fn test_changes_skip_entries_without_path() {
    let changes: AzureChanges = serde_json::from_value(serde_json::json!({
      "changeEntries": [
        {"changeType": "edit", "item": {"path": "/services/svc1/pkg.json"}},
        {"changeType": "add", "item": {"gitObjectType": "tree"}},
        {"changeType": "delete"}
      ]
    }))
    .unwrap();

    assert_eq!(changes.paths().collect::<Vec<_>>(), vec!["/services/svc1/pkg.json"]);
  }
}

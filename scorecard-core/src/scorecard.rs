//! # Scorecard Aggregation
//!
//! Scores are computed from deduction lists only: every check starts at
//! [`MAX_SCORE`], loses the summed weights of its deductions (floored at
//! zero) and drops straight to zero on any disqualification. A service's
//! average is the mean over all of its checks, independent of grouping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::deduction::Deduction;

/// Score of a check with no deductions
pub const MAX_SCORE: u32 = 100;

/// Deductions produced by one check against one service, in discovery order
pub type CheckResult = Vec<Deduction>;

/// Score a single check's deductions
pub fn score(deductions: &[Deduction]) -> u32 {
  let mut total: u32 = 0;
  for deduction in deductions {
    match deduction.weight() {
      Some(weight) => total = total.saturating_add(weight),
      None => return 0,
    }
  }

  MAX_SCORE.saturating_sub(total)
}

/// Arithmetic mean of `scores`, rounded half up.
///
/// An empty set averages to [`MAX_SCORE`].
pub fn average<I>(scores: I) -> u32
where
  I: IntoIterator<Item = u32>,
{
  let (sum, count) = scores
    .into_iter()
    .fold((0u64, 0u64), |(sum, count), score| (sum + u64::from(score), count + 1));

  if count == 0 {
    return MAX_SCORE;
  }

  // (2 * sum + count) / (2 * count) == floor(sum / count + 1/2)
  let rounded = (2 * sum + count) / (2 * count);
  u32::try_from(rounded).unwrap_or(MAX_SCORE)
}

/// Per-service results of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceScorecard {
  deductions_by_check: BTreeMap<String, CheckResult>,
  average: u32,
}

impl ServiceScorecard {
  /// Build a scorecard; the average is derived here and never changes
  pub fn new(deductions_by_check: BTreeMap<String, CheckResult>) -> Self {
    let average = average(deductions_by_check.values().map(|deductions| score(deductions)));
    Self {
      deductions_by_check,
      average,
    }
  }

  pub fn average(&self) -> u32 {
    self.average
  }

  /// Score of `check`, if it ran for this service
  pub fn score_for(&self, check: &str) -> Option<u32> {
    self.deductions_by_check.get(check).map(|deductions| score(deductions))
  }

  /// Deductions of `check`, if it ran for this service
  pub fn deductions_for(&self, check: &str) -> Option<&[Deduction]> {
    self.deductions_by_check.get(check).map(Vec::as_slice)
  }

  /// Check names with their scores, sorted by name
  pub fn scores(&self) -> impl Iterator<Item = (&str, u32)> {
    self
      .deductions_by_check
      .iter()
      .map(|(name, deductions)| (name.as_str(), score(deductions)))
  }
}

/// Descriptor of one configured check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInfo {
  pub name: String,
  pub description: String,
}

impl CheckInfo {
  pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      description: description.into(),
    }
  }
}

/// A presentation group of checks (for example a tier label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckGroup {
  pub name: String,
  pub checks: Vec<CheckInfo>,
}

/// Everything one invocation produced, handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInfo {
  checks: Vec<CheckGroup>,
  service_scores: BTreeMap<String, ServiceScorecard>,
}

impl RunInfo {
  pub fn new(checks: Vec<CheckGroup>, service_scores: BTreeMap<String, ServiceScorecard>) -> Self {
    Self { checks, service_scores }
  }

  /// Groups in configured order
  pub fn groups(&self) -> &[CheckGroup] {
    &self.checks
  }

  /// All checks in column order
  pub fn checks(&self) -> impl Iterator<Item = &CheckInfo> {
    self.checks.iter().flat_map(|group| group.checks.iter())
  }

  /// Scorecards sorted by service path
  pub fn service_scores(&self) -> &BTreeMap<String, ServiceScorecard> {
    &self.service_scores
  }
}

//! # Deductions
//!
//! A deduction is one weighted penalty against a check, carrying a fully
//! rendered justification. Messages are formatted by the caller at creation
//! time and logged immediately, so the log doubles as an audit trail.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Weight of a deduction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionKind {
  /// Subtracts the given number of points from the check's score
  Points(u32),
  /// Forces the check's score to zero whatever else was deducted
  Disqualification,
}

/// A single penalty applied to a check's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
  kind: DeductionKind,
  message: String,
}

impl Deduction {
  /// Create a point deduction
  pub fn create(weight: u32, message: impl Into<String>) -> Self {
    let message = message.into();
    info!(weight, "Deduction: {message}");

    Self {
      kind: DeductionKind::Points(weight),
      message,
    }
  }

  /// Create a disqualification
  pub fn create_disqualification(message: impl Into<String>) -> Self {
    let message = message.into();
    warn!("Disqualification: {message}");

    Self {
      kind: DeductionKind::Disqualification,
      message,
    }
  }

  pub fn kind(&self) -> DeductionKind {
    self.kind
  }

  /// Point weight, or `None` for a disqualification
  pub fn weight(&self) -> Option<u32> {
    match self.kind {
      DeductionKind::Points(weight) => Some(weight),
      DeductionKind::Disqualification => None,
    }
  }

  pub fn is_disqualification(&self) -> bool {
    self.kind == DeductionKind::Disqualification
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for Deduction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      DeductionKind::Points(weight) => write!(f, "-{weight}: {}", self.message),
      DeductionKind::Disqualification => write!(f, "Disqualified: {}", self.message),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_keeps_rendered_message() {
    let deduction = Deduction::create(20, format!("justification: {}", "value"));

    assert_eq!(deduction.weight(), Some(20));
    assert_eq!(deduction.message(), "justification: value");
    assert!(!deduction.is_disqualification());
    assert_eq!(deduction.to_string(), "-20: justification: value");
  }

  #[test]
  fn test_create_disqualification() {
    let deduction = Deduction::create_disqualification("disqualify: disqualification");

    assert_eq!(deduction.weight(), None);
    assert!(deduction.is_disqualification());
    assert_eq!(deduction.to_string(), "Disqualified: disqualify: disqualification");
  }

  #[test]
  fn test_zero_weight_is_allowed() {
    let deduction = Deduction::create(0, "informational");
    assert_eq!(deduction.kind(), DeductionKind::Points(0));
  }

  #[test]
  fn test_serialization_shape() {
    let json = serde_json::to_value(Deduction::create(10, "why")).unwrap();
    assert_eq!(json, serde_json::json!({"kind": {"Points": 10}, "message": "why"}));

    let json = serde_json::to_value(Deduction::create_disqualification("why")).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "Disqualification", "message": "why"}));
  }
}

//! Environment variable management for testing
//!
//! Credentials and config discovery read process environment variables.
//! [`EnvVarGuard`] sets or clears them for the lifetime of a test and
//! restores the previous values on drop.

use std::env;

/// Overrides a set of environment variables until dropped
pub struct EnvVarGuard {
  /// Variable names with their values before the guard touched them
  originals: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
  pub fn new() -> Self {
    Self { originals: Vec::new() }
  }

  /// Set `name` to `value`
  pub fn set(mut self, name: &str, value: &str) -> Self {
    self.remember(name);
    unsafe {
      env::set_var(name, value);
    }
    self
  }

  /// Remove `name` from the environment
  pub fn remove(mut self, name: &str) -> Self {
    self.remember(name);
    unsafe {
      env::remove_var(name);
    }
    self
  }

  fn remember(&mut self, name: &str) {
    if self.originals.iter().all(|(existing, _)| existing != name) {
      self.originals.push((name.to_string(), env::var(name).ok()));
    }
  }
}

impl Default for EnvVarGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    for (name, original) in self.originals.drain(..).rev() {
      match original {
        Some(value) => unsafe {
          env::set_var(&name, value);
        },
        None => unsafe {
          env::remove_var(&name);
        },
      }
    }
  }
}

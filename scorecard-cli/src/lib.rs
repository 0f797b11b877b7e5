//! # Scorecard CLI Library
//!
//! The checks, the runner that applies them to every discovered service,
//! the wiki table renderer and the command handlers behind the `scorecard`
//! binary.

pub mod checks;
pub mod cli;
pub mod provider;
pub mod render;
pub mod runner;

//! repo-config finishes projects generated from the repository template and
//! provides the lint/type-check/test automation presets shared by them.

/// Template answers and repository types
pub mod answers;

/// Command-line interface module for the repo-config application
pub mod cli;

pub mod constants;

/// Error types and handling for the repo-config application
pub mod error;

/// `.gitmodules` parsing
pub mod gitmodules;

/// Post-generation hook
/// Adjusts the generated tree per project type and records it in git
pub mod hook;

/// JSON/YAML document loading from files or stdin
pub mod loader;

pub mod logger;

/// Automation presets and configuration
pub mod nox;

/// Per-step results and colored status lines
pub mod report;

/// External command execution
pub mod runner;

//! Error handling for repo-config.
//! Defines the error type and result alias used by the entry points.
//!
//! The post-generation hook never returns these: its failures are reported
//! as warnings inside [`crate::report::StepReport`] values.

use std::io;
use thiserror::Error;

/// Custom error types for repo-config operations.
#[derive(Error, Debug)]
pub enum RepoConfigError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors in configuration overrides
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents missing or invalid template answers
    #[error("Answers error: {0}.")]
    AnswersError(String),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience type alias for Results with [`RepoConfigError`] as the error type.
pub type RepoConfigResult<T> = Result<T, RepoConfigError>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: RepoConfigError) {
    eprintln!("{err}");
    std::process::exit(1);
}

//! Template answers describing the project being generated.
//!
//! The templating engine dumps its context once per generation run; it is
//! parsed here into a [`ProjectAnswers`] value that is passed explicitly to
//! everything that needs it and never mutated afterwards.

use crate::constants::{DEFAULT_GITHUB_ORG, DEFAULT_LICENSE};
use crate::error::{RepoConfigError, RepoConfigResult};
use crate::loader::load_document;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The kinds of repositories the template can generate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryType {
    /// SDK actors
    Actor,
    /// gRPC APIs
    Api,
    /// SDK applications
    App,
    /// General purpose Python libraries
    Lib,
    /// SDK machine learning models
    Model,
}

impl RepositoryType {
    pub const ALL: [RepositoryType; 5] = [
        RepositoryType::Actor,
        RepositoryType::Api,
        RepositoryType::App,
        RepositoryType::Lib,
        RepositoryType::Model,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryType::Actor => "actor",
            RepositoryType::Api => "api",
            RepositoryType::App => "app",
            RepositoryType::Lib => "lib",
            RepositoryType::Model => "model",
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_license() -> String {
    DEFAULT_LICENSE.to_string()
}

fn default_github_org() -> String {
    DEFAULT_GITHUB_ORG.to_string()
}

/// Answers given to the template questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnswers {
    /// Kind of repository
    #[serde(rename = "type")]
    pub repo_type: RepositoryType,

    /// Short project name, e.g. `repo-config`
    pub name: String,

    #[serde(default = "default_license")]
    pub license: String,

    #[serde(default = "default_github_org")]
    pub github_org: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    github_repo_name: Option<String>,

    /// Every other answer, in the order the template declared it
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl ProjectAnswers {
    /// Builds the answers from a raw templating-engine context.
    ///
    /// Keys starting with `_` are private to the templating engine and are
    /// dropped before deserializing.
    pub fn from_value(value: serde_json::Value) -> RepoConfigResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(RepoConfigError::AnswersError(
                "expected a mapping of template answers".to_string(),
            ));
        };

        let filtered: serde_json::Map<String, serde_json::Value> = map
            .into_iter()
            .filter(|(key, _)| {
                let private = key.starts_with('_');
                if private {
                    debug!("Ignoring private answer '{key}'");
                }
                !private
            })
            .collect();

        serde_json::from_value(serde_json::Value::Object(filtered))
            .map_err(|e| RepoConfigError::AnswersError(e.to_string()))
    }

    /// GitHub repository name, `frequenz-{type}-{name}` unless answered.
    pub fn repo_name(&self) -> String {
        match &self.github_repo_name {
            Some(name) => name.clone(),
            None => format!("frequenz-{}-{}", self.repo_type, self.name),
        }
    }

    pub fn with_repo_name<S: Into<String>>(mut self, repo_name: S) -> Self {
        self.github_repo_name = Some(repo_name.into());
        self
    }
}

/// Reads the answers from `path`, or stdin when no path is given.
pub fn load_answers(path: Option<&Path>) -> RepoConfigResult<ProjectAnswers> {
    let raw: serde_json::Value = load_document(path)?;
    ProjectAnswers::from_value(raw)
}

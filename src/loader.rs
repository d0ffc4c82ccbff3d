//! Loading of the JSON/YAML documents repo-config consumes.
//! Handles both regular files and standard input as sources.
use crate::error::{RepoConfigError, RepoConfigResult};
use log::debug;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Represents where a document is read from.
#[derive(Debug, PartialEq, Eq)]
pub enum DocumentSource<'a> {
    /// Regular file on disk
    File(&'a Path),
    /// Standard input of the process
    Stdin,
}

impl std::fmt::Display for DocumentSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "file '{}'", path.display()),
            DocumentSource::Stdin => write!(f, "standard input"),
        }
    }
}

impl<'a> DocumentSource<'a> {
    /// No path, or `-`, means standard input.
    pub fn from_path(path: Option<&'a Path>) -> Self {
        match path {
            Some(path) if path != Path::new("-") => Self::File(path),
            _ => Self::Stdin,
        }
    }

    /// Reads the whole document as a string.
    pub fn read(&self) -> RepoConfigResult<String> {
        debug!("Reading document from {self}");
        match self {
            DocumentSource::File(path) => {
                if !path.is_file() {
                    return Err(RepoConfigError::ConfigError(format!(
                        "'{}' is not a readable file",
                        path.display()
                    )));
                }
                Ok(std::fs::read_to_string(path)?)
            }
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Parses `content` as JSON, falling back to YAML.
pub fn parse_document<T: DeserializeOwned>(content: &str) -> RepoConfigResult<T> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            debug!("Not a JSON document ({json_err}), trying YAML");
            Ok(serde_yaml::from_str(content)?)
        }
    }
}

/// Reads and parses a document from `path` (or stdin).
pub fn load_document<T: DeserializeOwned>(path: Option<&Path>) -> RepoConfigResult<T> {
    let content = DocumentSource::from_path(path).read()?;
    parse_document(&content)
}

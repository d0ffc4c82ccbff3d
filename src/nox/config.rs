//! Configuration of the automation sessions.
//!
//! A [`Config`] tells the sessions which flags to pass to each tool
//! ([`CommandsOptions`]), which sessions to run and which paths to check.
//! Presets for every repository type live in [`crate::nox::default`]; they
//! are specialized by copying them and overriding fields, either in code or
//! from a [`ConfigOverrides`] document.

use crate::error::{RepoConfigError, RepoConfigResult};
use crate::loader::load_document;
use crate::nox::util::{deduplicate, existing_paths, find_toplevel_package_dirs, path_to_package};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The tools invoked by the sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Formatter
    Black,
    /// Docstring content checker
    Darglint,
    /// Import sorter
    Isort,
    /// Type checker
    Mypy,
    /// Docstring style checker
    Pydocstyle,
    /// Linter
    Pylint,
    /// Test runner
    Pytest,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Black,
        Tool::Darglint,
        Tool::Isort,
        Tool::Mypy,
        Tool::Pydocstyle,
        Tool::Pylint,
        Tool::Pytest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Black => "black",
            Tool::Darglint => "darglint",
            Tool::Isort => "isort",
            Tool::Mypy => "mypy",
            Tool::Pydocstyle => "pydocstyle",
            Tool::Pylint => "pylint",
            Tool::Pytest => "pytest",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command-line options for each tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandsOptions {
    pub black: Vec<String>,
    pub darglint: Vec<String>,
    pub isort: Vec<String>,
    pub mypy: Vec<String>,
    pub pydocstyle: Vec<String>,
    pub pylint: Vec<String>,
    pub pytest: Vec<String>,
}

impl CommandsOptions {
    /// Returns an independent copy; changing it never affects `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn get(&self, tool: Tool) -> &Vec<String> {
        match tool {
            Tool::Black => &self.black,
            Tool::Darglint => &self.darglint,
            Tool::Isort => &self.isort,
            Tool::Mypy => &self.mypy,
            Tool::Pydocstyle => &self.pydocstyle,
            Tool::Pylint => &self.pylint,
            Tool::Pytest => &self.pytest,
        }
    }

    pub fn get_mut(&mut self, tool: Tool) -> &mut Vec<String> {
        match tool {
            Tool::Black => &mut self.black,
            Tool::Darglint => &mut self.darglint,
            Tool::Isort => &mut self.isort,
            Tool::Mypy => &mut self.mypy,
            Tool::Pydocstyle => &mut self.pydocstyle,
            Tool::Pylint => &mut self.pylint,
            Tool::Pytest => &mut self.pytest,
        }
    }
}

/// Configuration for the automation sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Command-line options for each tool used by the sessions
    pub opts: CommandsOptions,

    /// Sessions to run, in order
    pub sessions: Vec<String>,

    /// Paths containing the sources that end up in the distribution.
    ///
    /// They are searched for packages, and the source path itself is not
    /// part of the package names found in it.
    pub source_paths: Vec<String>,

    /// Extra paths (tests, docs, examples, ...) passed verbatim to the tools.
    pub extra_paths: Vec<String>,
}

impl Config {
    /// Returns an independent copy; changing it never affects `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// File paths to run the checks on.
    ///
    /// `posargs` are used verbatim when given; otherwise, every existing
    /// source path followed by every existing extra path.
    pub fn path_args<S: AsRef<str>>(&self, root: &Path, posargs: &[S]) -> Vec<String> {
        if !posargs.is_empty() {
            return posargs.iter().map(|arg| arg.as_ref().to_string()).collect();
        }

        existing_paths(root, &self.source_paths)
            .into_iter()
            .chain(existing_paths(root, &self.extra_paths))
            .map(str::to_string)
            .collect()
    }

    /// Package names to run the checks on.
    ///
    /// `posargs` are used verbatim when given; otherwise the top-level
    /// packages found in the existing source paths, followed by the existing
    /// extra paths converted to package names.
    pub fn package_args<S: AsRef<str>>(&self, root: &Path, posargs: &[S]) -> Vec<String> {
        if !posargs.is_empty() {
            return posargs.iter().map(|arg| arg.as_ref().to_string()).collect();
        }

        let mut packages = Vec::new();
        for source in existing_paths(root, &self.source_paths) {
            let source_root = root.join(source);
            for package_dir in find_toplevel_package_dirs(&source_root) {
                packages.push(path_to_package(&package_dir, Some(&source_root)));
            }
        }
        for extra in existing_paths(root, &self.extra_paths) {
            packages.push(path_to_package(Path::new(extra), None));
        }

        deduplicate(packages)
    }

    /// Returns a copy of `self` with `overrides` applied.
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        let mut config = self.copy();

        for (tool, options) in &overrides.opts {
            debug!("Replacing {tool} options with {options:?}");
            *config.opts.get_mut(*tool) = options.clone();
        }
        for (tool, options) in &overrides.extend_opts {
            debug!("Appending {options:?} to {tool} options");
            config.opts.get_mut(*tool).extend(options.iter().cloned());
        }
        if let Some(sessions) = &overrides.sessions {
            config.sessions = sessions.clone();
        }
        if let Some(source_paths) = &overrides.source_paths {
            config.source_paths = source_paths.clone();
        }
        if let Some(extra_paths) = &overrides.extra_paths {
            config.extra_paths = extra_paths.clone();
        }

        config
    }
}

/// Changes to apply on top of a preset.
///
/// ```yaml
/// sessions: [formatting, mypy]
/// extend_opts:
///   black: ["--diff"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Replace the options of these tools
    pub opts: IndexMap<Tool, Vec<String>>,
    /// Append to the options of these tools
    pub extend_opts: IndexMap<Tool, Vec<String>>,
    pub sessions: Option<Vec<String>>,
    pub source_paths: Option<Vec<String>>,
    pub extra_paths: Option<Vec<String>>,
}

/// Reads overrides from a JSON or YAML file.
pub fn load_overrides<P: AsRef<Path>>(path: P) -> RepoConfigResult<ConfigOverrides> {
    let path = path.as_ref();
    load_document(Some(path)).map_err(|e| match e {
        RepoConfigError::IoError(_) => e,
        other => RepoConfigError::ConfigError(format!(
            "invalid overrides in '{}': {other}",
            path.display()
        )),
    })
}

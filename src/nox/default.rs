//! Default automation configuration for each repository type.
//!
//! Every preset is derived from [`common_config`]. They can be specialized
//! by copying them first:
//!
//! ```
//! use repo_config::answers::RepositoryType;
//! use repo_config::nox::default::Presets;
//!
//! let presets = Presets::new();
//! let mut config = presets.config(RepositoryType::Lib).copy();
//! config.opts.black.push("--diff".to_string());
//! assert_eq!(presets.config(RepositoryType::Lib).opts.black, ["--check"]);
//! ```

use crate::answers::RepositoryType;
use crate::nox::config::{CommandsOptions, Config};
use crate::nox::util::replace;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Default command-line options for all types of repositories.
pub fn common_command_options() -> CommandsOptions {
    CommandsOptions {
        black: strings(&["--check"]),
        // verbose error messages
        darglint: strings(&["-v2"]),
        isort: strings(&["--check"]),
        mypy: strings(&[
            "--install-types",
            "--namespace-packages",
            "--non-interactive",
            "--explicit-package-bases",
            "--strict",
        ]),
        pytest: strings(&["-W=all", "-vv"]),
        ..Default::default()
    }
}

/// Default configuration for all types of repositories.
pub fn common_config() -> Config {
    Config {
        opts: common_command_options(),
        sessions: strings(&[
            "formatting",
            "mypy",
            "pylint",
            "docstrings",
            "pytest_min",
            "pytest_max",
        ]),
        source_paths: strings(&["src"]),
        extra_paths: strings(&["benchmarks", "docs", "examples", "noxfile.py", "tests"]),
    }
}

/// Every preset, built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presets {
    pub common_command_options: CommandsOptions,
    pub common_config: Config,
    actor_command_options: CommandsOptions,
    actor_config: Config,
    api_command_options: CommandsOptions,
    api_config: Config,
    app_command_options: CommandsOptions,
    app_config: Config,
    lib_command_options: CommandsOptions,
    lib_config: Config,
    model_command_options: CommandsOptions,
    model_config: Config,
}

impl Presets {
    pub fn new() -> Self {
        let common_command_options = common_command_options();
        let common_config = Config { opts: common_command_options.copy(), ..common_config() };

        let api_command_options = common_command_options.copy();
        // API sources are generated, so they are not checked, and the tests
        // live in `pytests`.
        let api_config = Config {
            opts: api_command_options.copy(),
            source_paths: Vec::new(),
            extra_paths: replace(&common_config.extra_paths, &[("tests", "pytests")]),
            ..common_config.copy()
        };

        Self {
            actor_command_options: common_command_options.copy(),
            actor_config: common_config.copy(),
            api_command_options,
            api_config,
            app_command_options: common_command_options.copy(),
            app_config: common_config.copy(),
            lib_command_options: common_command_options.copy(),
            lib_config: common_config.copy(),
            model_command_options: common_command_options.copy(),
            model_config: common_config.copy(),
            common_command_options,
            common_config,
        }
    }

    /// Default command-line options for `repo_type`.
    pub fn command_options(&self, repo_type: RepositoryType) -> &CommandsOptions {
        match repo_type {
            RepositoryType::Actor => &self.actor_command_options,
            RepositoryType::Api => &self.api_command_options,
            RepositoryType::App => &self.app_command_options,
            RepositoryType::Lib => &self.lib_command_options,
            RepositoryType::Model => &self.model_command_options,
        }
    }

    /// Default configuration for `repo_type`.
    pub fn config(&self, repo_type: RepositoryType) -> &Config {
        match repo_type {
            RepositoryType::Actor => &self.actor_config,
            RepositoryType::Api => &self.api_config,
            RepositoryType::App => &self.app_config,
            RepositoryType::Lib => &self.lib_config,
            RepositoryType::Model => &self.model_config,
        }
    }
}

impl Default for Presets {
    fn default() -> Self {
        Presets::new()
    }
}

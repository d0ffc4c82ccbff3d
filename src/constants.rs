//! Common constants used throughout repo-config.

/// License that ships with the template; any other choice drops the `LICENSE` file.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Organization used when the answers don't name one.
pub const DEFAULT_GITHUB_ORG: &str = "frequenz-floss";

/// Organization whose projects are expected to use [`DEFAULT_LICENSE`].
pub const FLOSS_ORG: &str = "frequenz-floss";

/// License file generated by the template
pub const LICENSE_FILE: &str = "LICENSE";

/// Protocol definitions directory, only kept for API projects
pub const PROTO_DIR: &str = "proto";

/// Submodule descriptor file name
pub const GITMODULES_FILE: &str = ".gitmodules";

/// Number of bytes inspected when deciding whether a file is empty
pub const EMPTY_CHECK_BYTES: u64 = 1024;

/// Marker left by the template in places that need manual review
pub const TODO_MARKER: &str = "TODO(cookiecutter):";

pub const FIRST_COMMIT_MESSAGE: &str = "Initial commit";
pub const REGENERATE_COMMIT_MESSAGE: &str = "Regenerate repository using repo-config";

/// Where problems with generated projects should be reported
pub const ISSUES_URL: &str =
    "https://github.com/frequenz-floss/frequenz-repo-config-python/issues/new";

/// Width of the separator printed before the summary
pub const RULE_WIDTH: usize = 80;

//! repo-config's main application entry point.
//! Handles command-line argument parsing and dispatches to the hook or the
//! automation presets.

use std::path::{Path, PathBuf};

use log::debug;
use repo_config::{
    answers::{load_answers, RepositoryType},
    cli::{get_args, Args, Command, OutputFormat},
    error::{default_error_handler, RepoConfigResult},
    hook::PostGenHook,
    logger::init_logger,
    nox::{config::load_overrides, Config, Presets},
    runner::SystemRunner,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// The preset for `repo_type`, with overrides applied if a file is given.
fn resolve_config(repo_type: RepositoryType, overrides: Option<&Path>) -> RepoConfigResult<Config> {
    let presets = Presets::new();
    let preset = presets.config(repo_type);
    match overrides {
        Some(path) => {
            debug!("Applying overrides from {}", path.display());
            Ok(preset.merged(&load_overrides(path)?))
        }
        None => Ok(preset.copy()),
    }
}

fn post_gen(project_dir: PathBuf, answers: Option<PathBuf>) -> RepoConfigResult<()> {
    let answers = load_answers(answers.as_deref())?;
    let runner = SystemRunner;

    let summary = PostGenHook::new(&project_dir, &answers, &runner).run();
    summary.print();

    debug!("Finished with {} warning(s)", summary.warnings().count());
    Ok(())
}

/// Main application logic execution.
fn run(args: Args) -> RepoConfigResult<()> {
    match args.command {
        Command::PostGen { project_dir, answers } => post_gen(project_dir, answers),
        Command::Config { repo_type, overrides, format } => {
            let config = resolve_config(repo_type, overrides.as_deref())?;
            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
                OutputFormat::Yaml => serde_yaml::to_string(&config)?,
            };
            println!("{}", rendered.trim_end());
            Ok(())
        }
        Command::Paths { repo_type, overrides, root, packages, posargs } => {
            let config = resolve_config(repo_type, overrides.as_deref())?;
            let resolved = if packages {
                config.package_args(&root, &posargs)
            } else {
                config.path_args(&root, &posargs)
            };
            for arg in resolved {
                println!("{arg}");
            }
            Ok(())
        }
    }
}

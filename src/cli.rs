//! Command-line interface implementation for repo-config.
//! Provides argument parsing and help text formatting using clap.

use crate::answers::RepositoryType;
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments structure for repo-config.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "repo-config: finish generated projects and share lint/test automation presets",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Finish the setup of a freshly generated project
    PostGen {
        /// Directory of the generated project
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        project_dir: PathBuf,

        /// Template answers (JSON or YAML). Read from stdin when omitted or `-`
        #[arg(short, long, value_name = "FILE")]
        answers: Option<PathBuf>,
    },

    /// Print the default automation configuration of a repository type
    Config {
        #[arg(value_name = "TYPE", value_enum)]
        repo_type: RepositoryType,

        /// Overrides (JSON or YAML) applied on top of the preset
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Print the paths (or packages) the checks would run on
    Paths {
        #[arg(value_name = "TYPE", value_enum)]
        repo_type: RepositoryType,

        /// Overrides (JSON or YAML) applied on top of the preset
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        /// Project root the paths are relative to
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,

        /// Print Python package names instead of file paths
        #[arg(long)]
        packages: bool,

        /// Explicit paths; when given they are used verbatim
        #[arg(value_name = "ARGS", trailing_var_arg = true)]
        posargs: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand => {
                let mut command = Args::command().help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                );
                if let Err(e) = command.print_help() {
                    eprintln!("{e}");
                }
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    }
}

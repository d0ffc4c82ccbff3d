//! Post-generation hook.
//!
//! Runs once inside a freshly generated project and turns it into its final,
//! type-specific layout:
//!
//! 1. initialize a git repository, unless there already is one
//! 2. remove the files the chosen answers don't need
//! 3. apply the per-type fix-ups (directory renames)
//! 4. add and initialize the submodules declared in `.gitmodules`
//! 5. commit whatever changed
//!
//! Each step is independent: problems are recorded as warnings in the step's
//! [`StepReport`] and the remaining steps still run. The reports are collected
//! in a [`Summary`] that is printed at the end.

use crate::answers::{ProjectAnswers, RepositoryType};
use crate::constants::{
    DEFAULT_LICENSE, FIRST_COMMIT_MESSAGE, FLOSS_ORG, GITMODULES_FILE, ISSUES_URL, LICENSE_FILE,
    PROTO_DIR, REGENERATE_COMMIT_MESSAGE, RULE_WIDTH, TODO_MARKER,
};
use crate::gitmodules::{is_file_empty, parse_submodules};
use crate::report::{Level, Message, Step, StepReport};
use crate::runner::{try_run, CommandOutput, CommandRunner, RunOptions};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct PostGenHook<'a> {
    root: PathBuf,
    answers: &'a ProjectAnswers,
    runner: &'a dyn CommandRunner,
}

impl<'a> PostGenHook<'a> {
    /// Creates a hook operating on the project generated at `root`.
    pub fn new<P: AsRef<Path>>(
        root: P,
        answers: &'a ProjectAnswers,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self { root: root.as_ref().to_path_buf(), answers, runner }
    }

    /// Runs every step and gathers what needs to be shown to the user.
    pub fn run(&self) -> Summary {
        info!(
            "Finishing setup of {} ({} project) in {}",
            self.answers.repo_name(),
            self.answers.repo_type,
            self.root.display()
        );
        let steps = self.finish_setup();
        Summary {
            repo_name: self.answers.repo_name(),
            steps,
            tree: self.generated_tree(),
            todos: self.todos(),
            sanity_warnings: self.sanity_checks(),
        }
    }

    /// Runs the setup steps, in order.
    pub fn finish_setup(&self) -> Vec<StepReport> {
        let (init, was_initialized) = self.initialize_git_repo();
        let removal = self.remove_unneeded_files();
        let type_setup = self.finish_type_setup();
        let (submodules, _) = self.initialize_git_submodules();
        let commit = self.commit_git_changes(was_initialized);

        vec![init, removal, type_setup, submodules, commit]
    }

    fn run_cmd(
        &self,
        cmd: &[&str],
        options: &RunOptions,
        report: &mut StepReport,
    ) -> Option<CommandOutput> {
        try_run(self.runner, &self.root, cmd, options, report)
    }

    /// Initializes a git repository if the project isn't one yet.
    ///
    /// Returns whether initialization was attempted.
    pub fn initialize_git_repo(&self) -> (StepReport, bool) {
        let mut report = StepReport::new(Step::InitRepository);
        if self.root.join(".git").exists() {
            debug!("Already a git repository, not initializing");
            report.skip();
            return (report, false);
        }

        report.note("Initializing git repository...");
        self.run_cmd(
            &["git", "init"],
            &RunOptions::loud(
                "Failed to initialize the git repository!",
                "Please initialize the git repository manually.",
            ),
            &mut report,
        );
        (report, true)
    }

    /// Removes the license file for non-default licenses, and the protocol
    /// definitions for everything but APIs.
    pub fn remove_unneeded_files(&self) -> StepReport {
        let mut report = StepReport::new(Step::RemoveUnneededFiles);
        let mut removed = false;

        if self.answers.license != DEFAULT_LICENSE {
            removed |= self.remove_path(LICENSE_FILE, &mut report);
        }
        if self.answers.repo_type != RepositoryType::Api {
            removed |= self.remove_path(PROTO_DIR, &mut report);
        }

        if !removed {
            report.skip();
        }
        report
    }

    fn remove_path(&self, relative: &str, report: &mut StepReport) -> bool {
        let path = self.root.join(relative);
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match result {
            Ok(()) => {
                debug!("Removed {}", path.display());
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} doesn't exist, nothing to remove", path.display());
                false
            }
            Err(e) => {
                report.warn(format!("Failed to remove `{relative}`: {e}"));
                report.note(format!("Please remove `{relative}` manually."));
                false
            }
        }
    }

    /// Applies the fix-ups specific to the project type.
    pub fn finish_type_setup(&self) -> StepReport {
        let mut report = StepReport::new(Step::TypeSetup);
        match self.answers.repo_type {
            RepositoryType::Api => self.finish_api_setup(&mut report),
            RepositoryType::Lib => self.finish_lib_setup(&mut report),
            RepositoryType::Actor | RepositoryType::App | RepositoryType::Model => {
                report.skip();
            }
        }
        report
    }

    /// API sources are generated, they live in `py`, and tests in `pytests`.
    fn finish_api_setup(&self, report: &mut StepReport) {
        self.rename_path("src", "py", report);
        self.rename_path("tests", "pytests", report);
    }

    /// Libraries don't get a subdirectory for the type:
    /// `src/frequenz/lib/{name}` becomes `src/frequenz/{name}`.
    fn finish_lib_setup(&self, report: &mut StepReport) {
        let type_dir = format!("src/frequenz/{}", self.answers.repo_type);
        let from = format!("{type_dir}/{}", self.answers.name);
        let to = format!("src/frequenz/{}", self.answers.name);

        if !self.rename_path(&from, &to, report) {
            return;
        }
        if let Err(e) = fs::remove_dir(self.root.join(&type_dir)) {
            report.warn(format!("Failed to remove `{type_dir}`: {e}"));
            report.note(format!("Please remove `{type_dir}` manually."));
        }
    }

    fn rename_path(&self, from: &str, to: &str, report: &mut StepReport) -> bool {
        match fs::rename(self.root.join(from), self.root.join(to)) {
            Ok(()) => {
                debug!("Renamed {from} to {to}");
                true
            }
            Err(e) => {
                report.warn(format!("Failed to rename `{from}` to `{to}`: {e}"));
                report.note(format!("Please rename `{from}` to `{to}` manually."));
                false
            }
        }
    }

    /// Adds the submodules declared in `.gitmodules` and initializes them.
    ///
    /// An empty `.gitmodules` is deleted. Returns whether any submodule was
    /// found to add.
    pub fn initialize_git_submodules(&self) -> (StepReport, bool) {
        let mut report = StepReport::new(Step::Submodules);
        let path = self.root.join(GITMODULES_FILE);

        if !path.exists() {
            report.skip();
            return (report, false);
        }
        if !path.is_file() {
            report.warn("`.gitmodules` exists but is not a file! Ignoring...");
            return (report, false);
        }

        let content = match is_file_empty(&path) {
            Ok(true) => {
                debug!("Removing empty {}", path.display());
                if let Err(e) = fs::remove_file(&path) {
                    report.warn(format!("Failed to remove empty `.gitmodules`: {e}"));
                }
                report.skip();
                return (report, false);
            }
            Ok(false) => fs::read_to_string(&path),
            Err(e) => Err(e),
        };
        let content = match content {
            Ok(content) => content,
            Err(e) => {
                report.warn(format!("Can't read `.gitmodules`: {e}! Ignoring..."));
                return (report, false);
            }
        };

        let parsed = parse_submodules(&content);
        for warning in parsed.warnings {
            report.warn(warning);
        }
        if parsed.submodules.is_empty() {
            report.warn("`.gitmodules` does not contain any valid submodules! Ignoring...");
            return (report, false);
        }

        report.note("Initializing git submodules...");
        for submodule in &parsed.submodules {
            self.run_cmd(
                &submodule.add_command(),
                &RunOptions::loud(
                    format!("Failed to add submodule `{}`!", submodule.name),
                    format!("Please add submodule `{}` manually.", submodule.name),
                ),
                &mut report,
            );
        }
        self.run_cmd(
            &["git", "submodule", "update", "--init"],
            &RunOptions::loud(
                "Failed to initialize git submodules!",
                "Please initialize git submodules manually.",
            ),
            &mut report,
        );
        (report, true)
    }

    /// Stages and commits everything, if the working tree has changes.
    pub fn commit_git_changes(&self, first_commit: bool) -> StepReport {
        let mut report = StepReport::new(Step::Commit);

        let status =
            self.run_cmd(&["git", "status", "--porcelain"], &RunOptions::default(), &mut report);
        let dirty = matches!(&status, Some(out) if out.success() && !out.stdout.trim().is_empty());
        if !dirty {
            debug!("Nothing to commit");
            report.skip();
            return report;
        }

        self.run_cmd(
            &["git", "add", "."],
            &RunOptions::loud(
                "Failed to add all changes to the git repository!",
                "Please add all changes to the git repository manually.",
            ),
            &mut report,
        );
        let message = if first_commit {
            FIRST_COMMIT_MESSAGE
        } else {
            REGENERATE_COMMIT_MESSAGE
        };
        self.run_cmd(
            &["git", "commit", "-s", "-m", message],
            &RunOptions::loud(
                "Failed to commit all changes to the git repository!",
                "Please commit all changes to the git repository manually.",
            ),
            &mut report,
        );
        report
    }

    /// Lists the generated files, if `tree` is available.
    ///
    /// Whatever `tree` printed is kept, even if it exited with an error.
    pub fn generated_tree(&self) -> StepReport {
        let mut report = StepReport::new(Step::Tree);
        match self.run_cmd(&["tree"], &RunOptions::default(), &mut report) {
            Some(output) if !output.stdout.trim().is_empty() => {
                report.info(output.stdout.trim_end())
            }
            _ => report.skip(),
        }
        report
    }

    /// Finds the places the template marked for manual review.
    pub fn todos(&self) -> StepReport {
        let mut report = StepReport::new(Step::Todos);
        let pattern = format!(r"\<{TODO_MARKER}.*");
        let cmd = ["grep", "-r", pattern.as_str(), "."];
        let options = RunOptions {
            warn_on_error: true,
            warn_on_bad_status: Some(format!("No `{TODO_MARKER}` found using `{}`", cmd.join(" "))),
            note_on_failure: Some(format!(
                "Please search for `{TODO_MARKER}` in `{}/` manually.",
                self.answers.repo_name()
            )),
            verbose: false,
        };

        if let Some(output) = self.run_cmd(&cmd, &options, &mut report) {
            if !output.stdout.trim().is_empty() {
                report.info(output.stdout.trim_end());
            }
        }
        report
    }

    /// Flags answer combinations that are likely mistakes.
    pub fn sanity_checks(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.answers.github_org == FLOSS_ORG && self.answers.license != DEFAULT_LICENSE {
            warnings.push(format!(
                "Using a non-{DEFAULT_LICENSE} license with a {FLOSS_ORG} project is not recommended."
            ));
        }

        warnings
    }
}

/// Everything the hook did, ready to be shown to the user.
#[derive(Debug, Clone)]
pub struct Summary {
    pub repo_name: String,
    /// Setup steps, in execution order
    pub steps: Vec<StepReport>,
    pub tree: StepReport,
    pub todos: StepReport,
    pub sanity_warnings: Vec<String>,
}

impl Summary {
    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.reports().find(|report| report.step == step)
    }

    pub fn reports(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().chain([&self.tree, &self.todos])
    }

    /// Every warning produced, including the sanity-check ones.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.reports()
            .flat_map(StepReport::warnings)
            .chain(self.sanity_warnings.iter().map(String::as_str))
    }

    pub fn print(&self) {
        for report in self.steps.iter().filter(|r| !r.messages.is_empty()) {
            println!();
            report.print();
        }

        println!();
        println!("{}", "-".repeat(RULE_WIDTH));
        println!();
        println!(
            "{}",
            Message::new(Level::Success, format!("Your 🍪 {} has been cut!", self.repo_name))
        );
        println!();
        if !self.tree.messages.is_empty() {
            self.tree.print();
            println!();
        }
        println!("Here is a list of things that should be reviewed and fixed:");
        self.todos.print();
        println!();
        println!(
            "After completing it you can amend the previous commit using `git commit \
             --amend` or create a new commit for the changes using `git commit`."
        );
        println!();
        println!(
            "You can make sure linting and tests pass by creating a virtual \
             environment, installing the development dependencies and running `nox`:"
        );
        println!();
        println!("cd {}", self.repo_name);
        println!("python3 -m venv .venv");
        println!(". .venv/bin/activate");
        println!("pip install .[dev-noxfile]");
        println!("nox");
        println!();
        if !self.sanity_warnings.is_empty() {
            for warning in &self.sanity_warnings {
                println!("{}", Message::new(Level::Warning, warning.as_str()));
            }
            println!();
        }
        println!(
            "{}",
            Message::new(
                Level::Note,
                "If you had any issues or find any errors in the generated files, \
                 please report them!"
            )
        );
        println!("{}", Message::new(Level::Note, ISSUES_URL));
        println!();
    }
}

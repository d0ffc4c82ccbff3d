#![allow(dead_code)]

use repo_config::answers::{ProjectAnswers, RepositoryType};
use repo_config::runner::{CommandOutput, CommandRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Records every command and answers with canned results.
///
/// Everything succeeds with empty output unless configured otherwise.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<String>>,
    porcelain: String,
    failing: Vec<String>,
    missing: Vec<String>,
    stdout: HashMap<String, String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `git status --porcelain` reports pending changes.
    pub fn dirty(mut self) -> Self {
        self.porcelain = "?? README.md\n".to_string();
        self
    }

    /// Commands starting with `prefix` exit with status 1, keeping any canned stdout.
    pub fn failing(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    /// `program` can't be started.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn output(mut self, program: &str, stdout: &str) -> Self {
        self.stdout.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|call| call.starts_with(prefix)).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _dir: &Path, cmd: &[&str]) -> io::Result<CommandOutput> {
        let cmdline = cmd.join(" ");
        self.calls.borrow_mut().push(cmdline.clone());

        if self.missing.iter().any(|program| program == cmd[0]) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"));
        }
        if self.failing.iter().any(|prefix| cmdline.starts_with(prefix.as_str())) {
            let stdout = self.stdout.get(cmd[0]).cloned().unwrap_or_default();
            return Ok(CommandOutput { status: Some(1), stdout, stderr: String::new() });
        }

        let stdout = if cmdline == "git status --porcelain" {
            self.porcelain.clone()
        } else {
            self.stdout.get(cmd[0]).cloned().unwrap_or_default()
        };
        Ok(CommandOutput { status: Some(0), stdout, stderr: String::new() })
    }
}

pub fn answers(repo_type: RepositoryType, name: &str, license: &str) -> ProjectAnswers {
    ProjectAnswers::from_value(serde_json::json!({
        "type": repo_type,
        "name": name,
        "license": license,
        "github_org": "frequenz-floss",
        "_template": "gh:frequenz-floss/frequenz-repo-config-python",
    }))
    .unwrap()
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lays out what the template produces before the hook runs.
pub fn generated_project(root: &Path, repo_type: RepositoryType, name: &str) {
    write(root, "LICENSE", "MIT License\n");
    write(root, "README.md", "# TODO(cookiecutter): Write a description\n");
    write(root, "proto/frequenz/api/v1/api.proto", "syntax = \"proto3\";\n");
    write(
        root,
        &format!("src/frequenz/{repo_type}/{name}/__init__.py"),
        "\"\"\"Package.\"\"\"\n",
    );
    write(root, "tests/test_main.py", "def test_main() -> None:\n    pass\n");
}

//! Per-step results of the post-generation hook.
//!
//! Steps never fail. Whatever happens is recorded as a list of [`Message`]s
//! in a [`StepReport`], and the reports are printed together once the hook
//! is done.

use colored::Colorize;
use std::fmt;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Plain output, e.g. the commands being executed
    Info,
    /// Green
    Success,
    /// Cyan
    Note,
    /// Yellow, prefixed with `WARNING:`
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new<S: Into<String>>(level: Level, text: S) -> Self {
        Self { level, text: text.into() }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.text),
            Level::Success => write!(f, "{}", self.text.green()),
            Level::Note => write!(f, "{}", self.text.cyan()),
            Level::Warning => write!(f, "{}", format!("WARNING: {}", self.text).yellow()),
        }
    }
}

/// The steps performed by the hook, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitRepository,
    RemoveUnneededFiles,
    TypeSetup,
    Submodules,
    Commit,
    Tree,
    Todos,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::InitRepository => "initialize repository",
            Step::RemoveUnneededFiles => "remove unneeded files",
            Step::TypeSetup => "type-specific setup",
            Step::Submodules => "initialize submodules",
            Step::Commit => "commit changes",
            Step::Tree => "print generated tree",
            Step::Todos => "list pending to-dos",
        };
        f.write_str(name)
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Nothing to do
    Skipped,
    /// Done at least partially, with warnings
    Warned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    skipped: bool,
    pub messages: Vec<Message>,
}

impl StepReport {
    pub fn new(step: Step) -> Self {
        Self { step, skipped: false, messages: Vec::new() }
    }

    pub fn skip(&mut self) {
        self.skipped = true;
    }

    pub fn push(&mut self, level: Level, text: impl Into<String>) {
        self.messages.push(Message::new(level, text));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Level::Info, text);
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.push(Level::Note, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(Level::Warning, text);
    }

    /// Warnings take precedence over skipping.
    pub fn outcome(&self) -> Outcome {
        if self.messages.iter().any(|m| m.level == Level::Warning) {
            Outcome::Warned
        } else if self.skipped {
            Outcome::Skipped
        } else {
            Outcome::Done
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|m| m.level == Level::Warning)
            .map(|m| m.text.as_str())
    }

    pub fn print(&self) {
        for message in &self.messages {
            println!("{message}");
        }
    }
}

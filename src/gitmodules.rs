//! Parsing of `.gitmodules` submodule descriptors.
//!
//! The format is ini-like:
//!
//! ```text
//! [submodule "api-common-protos"]
//!     path = submodules/api-common-protos
//!     url = https://github.com/googleapis/api-common-protos.git
//! ```
//!
//! Malformed lines and sections are not errors: they are skipped and a
//! warning describing them is returned next to the valid submodules.

use crate::constants::EMPTY_CHECK_BYTES;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<name>.+)\]").expect("valid section regex"));

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[^=:\s][^=:]*?)\s*[=:]\s*(?P<value>.*)$").expect("valid entry regex")
});

const SECTION_HEADING: &str = "submodule \"";
const SECTION_TRAILING: &str = "\"";

/// A submodule declared in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Submodule {
    pub name: String,
    pub path: String,
    pub url: String,
}

impl Submodule {
    /// The `git submodule add` invocation for this submodule.
    pub fn add_command(&self) -> [&str; 7] {
        ["git", "submodule", "add", "--name", &self.name, &self.url, &self.path]
    }
}

/// Key/value entries of each section, in file order. Keys are lowercase.
pub type Sections = IndexMap<String, IndexMap<String, String>>;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedSubmodules {
    pub submodules: Vec<Submodule>,
    pub warnings: Vec<String>,
}

/// Splits the file into sections.
///
/// Repeated sections are merged, with later keys overriding earlier ones.
pub fn parse_sections(content: &str) -> (Sections, Vec<String>) {
    let mut sections = Sections::new();
    let mut warnings = Vec::new();
    let mut current: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(caps) = SECTION_RE.captures(line) {
            let name = caps["name"].trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        if line.starts_with('[') {
            warnings.push(format!(
                "Can't parse `.gitmodules` section header on line {}: `{line}`! Ignoring...",
                index + 1
            ));
            current = None;
            continue;
        }

        match (ENTRY_RE.captures(line), &current) {
            (Some(caps), Some(section)) => {
                let key = caps["key"].trim().to_lowercase();
                let value = caps["value"].trim().to_string();
                debug!("[{section}] {key} = {value}");
                sections.entry(section.clone()).or_default().insert(key, value);
            }
            (Some(_), None) => warnings.push(format!(
                "`.gitmodules` line {} is outside of any section! Ignoring...",
                index + 1
            )),
            (None, _) => warnings.push(format!(
                "Can't parse `.gitmodules` line {}: `{line}`! Ignoring...",
                index + 1
            )),
        }
    }

    (sections, warnings)
}

/// Extracts the well-formed submodules, warning about every other section.
pub fn parse_submodules(content: &str) -> ParsedSubmodules {
    let (sections, mut warnings) = parse_sections(content);
    let mut submodules = Vec::new();

    for (section, entries) in sections {
        let name = match section
            .strip_prefix(SECTION_HEADING)
            .and_then(|rest| rest.strip_suffix(SECTION_TRAILING))
        {
            Some(name) => name,
            None => {
                warnings.push(format!("Can't parse `.gitmodules` section `{section}`! Ignoring..."));
                continue;
            }
        };
        let Some(path) = entries.get("path") else {
            warnings.push(format!(
                "`.gitmodules` contains section `{section}` without `path`! Ignoring..."
            ));
            continue;
        };
        let Some(url) = entries.get("url") else {
            warnings.push(format!(
                "`.gitmodules` contains section `{section}` without `url`! Ignoring..."
            ));
            continue;
        };

        submodules.push(Submodule {
            name: name.to_string(),
            path: path.clone(),
            url: url.clone(),
        });
    }

    ParsedSubmodules { submodules, warnings }
}

/// Whether the first [`EMPTY_CHECK_BYTES`] bytes of the file are all whitespace.
pub fn is_file_empty<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let mut head = Vec::new();
    File::open(path.as_ref())?.take(EMPTY_CHECK_BYTES).read_to_end(&mut head)?;
    Ok(String::from_utf8_lossy(&head).trim().is_empty())
}

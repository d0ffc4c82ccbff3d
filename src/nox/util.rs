//! Path helpers used to compute the arguments passed to the checking tools.

use indexmap::IndexSet;
use log::debug;
use std::hash::Hash;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Replaces the items that have an entry in `mapping`, keeping the order.
///
/// ```
/// use repo_config::nox::util::replace;
///
/// let paths = ["docs", "tests"];
/// assert_eq!(replace(paths, &[("tests", "pytests")]), ["docs", "pytests"]);
/// ```
pub fn replace<I, S>(items: I, mapping: &[(&str, &str)]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| {
            let item = item.as_ref();
            mapping
                .iter()
                .find(|(from, _)| *from == item)
                .map_or(item, |&(_, to)| to)
                .to_string()
        })
        .collect()
}

/// Removes duplicates, keeping the first occurrence of each item.
pub fn deduplicate<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Hash + Eq,
{
    items.into_iter().collect::<IndexSet<T>>().into_iter().collect()
}

/// The `paths` (relative to `root`) that exist.
pub fn existing_paths<'a, S: AsRef<str>>(root: &Path, paths: &'a [S]) -> Vec<&'a str> {
    paths
        .iter()
        .map(|path| path.as_ref())
        .filter(|path| {
            let exists = root.join(path).exists();
            if !exists {
                debug!("Skipping missing path {path}");
            }
            exists
        })
        .collect()
}

/// Finds the outermost Python packages (directories with an `__init__.py`) below `path`.
///
/// Directories without `__init__.py`, like namespace packages, are searched
/// recursively; packages are not, so sub-packages are never returned.
pub fn find_toplevel_package_dirs(path: &Path) -> Vec<PathBuf> {
    let mut packages = Vec::new();
    let mut walker = WalkDir::new(path).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Can't inspect {}: {e}", path.display());
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.path().join("__init__.py").is_file() {
            packages.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    packages
}

/// Converts a path to a dotted Python package name.
///
/// `root` is stripped first, if given, and a `.py`/`.pyi` suffix is removed.
pub fn path_to_package(path: &Path, root: Option<&Path>) -> String {
    let relative = root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);

    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        if let Some(stem) = last.strip_suffix(".pyi").or_else(|| last.strip_suffix(".py")) {
            *last = stem.to_string();
        }
    }

    parts.join(".")
}

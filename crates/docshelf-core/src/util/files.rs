//! File utilities for the Docshelf ecosystem.
//!
//! Provides the file discovery and reading operations shared by the
//! content and CLI crates.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use log::debug;
use tokio::fs;

use crate::{Error, Result};

/// Glob matching rules used for file discovery.
///
/// Case sensitive, `*` never crosses a path separator and never matches a
/// leading dot, which mirrors how shell globbing treats hidden files.
pub const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// List the names of regular files directly inside `base_path` whose name
/// matches `pattern` (e.g. `"*.md"`).
///
/// The result is sorted lexicographically. Discovery is lenient: a missing
/// or unreadable directory, an invalid pattern, or an unreadable entry
/// yields fewer (or no) names rather than an error.
///
/// # Example
///
/// ```no_run
/// # use docshelf_core::util::files::list_file_names;
/// # use std::path::Path;
/// let names = list_file_names(Path::new("doc"), "*.md");
/// for name in names {
///     println!("{name}");
/// }
/// ```
pub fn list_file_names(base_path: &Path, pattern: &str) -> Vec<String> {
    let base = if base_path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        base_path
    };

    let full_pattern = format!(
        "{}/{}",
        Pattern::escape(&base.to_string_lossy()),
        pattern
    );

    let entries = match glob::glob_with(&full_pattern, MATCH_OPTIONS) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("invalid glob pattern {full_pattern:?}: {e}");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .filter_map(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(String::from)
        })
        .collect();

    names.sort();
    names
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

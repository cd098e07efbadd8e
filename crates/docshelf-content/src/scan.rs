//! Documentation directory scanning.

use std::path::Path;

use docshelf_core::util::files;

/// Pattern matched against names in the documentation root.
pub const DOC_PATTERN: &str = "*.md";

/// Names starting with this prefix are partials, kept out of listings.
pub const HIDDEN_PREFIX: char = '_';

/// Whether `file` is a partial that should not be listed.
pub fn is_hidden(file: &str) -> bool {
    file.starts_with(HIDDEN_PREFIX)
}

/// List the documentation files directly inside `root`.
///
/// Returns bare filenames in lexicographic order, without partials. A
/// missing or unreadable root yields an empty list.
pub fn list_document_files(root: &Path) -> Vec<String> {
    files::list_file_names(root, DOC_PATTERN)
        .into_iter()
        .filter(|file| !is_hidden(file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_list_excludes_partials() {
        let temp = TempDir::new().unwrap();
        for name in ["a.md", "_b.md", "c.md"] {
            std::fs::write(temp.path().join(name), name).unwrap();
        }

        let files: HashSet<String> = list_document_files(temp.path()).into_iter().collect();

        let expected: HashSet<String> = ["a.md", "c.md"].iter().map(|s| s.to_string()).collect();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_list_ignores_other_extensions() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.txt"), "x").unwrap();
        std::fs::write(temp.path().join("page.markdown"), "x").unwrap();
        std::fs::write(temp.path().join("page.md"), "x").unwrap();

        assert_eq!(list_document_files(temp.path()), vec!["page.md"]);
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_document_files(&temp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden("_partial.md"));
        assert!(!is_hidden("page_one.md"));
    }
}

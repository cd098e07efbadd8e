//! Path resolution utilities.
//!
//! Configuration values name directories as strings that may contain `~` or
//! environment variables and may be relative to a project base path. These
//! helpers turn them into concrete paths.

use std::path::{Path, PathBuf};

use log::debug;

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use docshelf_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/documents");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Expands `~` and `$VAR` / `${VAR}` references in a configured path.
///
/// Unknown variables leave the input untouched apart from tilde expansion.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            debug!("could not expand {raw:?}: {e}");
            expand_tilde(raw)
        }
    }
}

/// Resolve a configured path against `base`.
///
/// The raw value is expanded first; absolute results are returned as-is,
/// relative ones are joined onto `base`.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use docshelf_core::util::paths::resolve_against;
///
/// assert_eq!(resolve_against(Path::new("/srv/app"), "doc"), PathBuf::from("/srv/app/doc"));
/// assert_eq!(resolve_against(Path::new("/srv/app"), "/opt/doc"), PathBuf::from("/opt/doc"));
/// ```
pub fn resolve_against(base: &Path, raw: &str) -> PathBuf {
    let expanded = expand_path(raw);
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

//! Core traits for Docshelf.
//!
//! [`ConfigProvider`] abstracts where a Docshelf application finds its data:
//! the project identity, a base path, and the documentation root.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// Every Docshelf front end implements this trait to tell the content
/// layer where documentation lives.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use docshelf_core::traits::ConfigProvider;
/// use docshelf_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     base: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "handbook"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.base.clone())
///     }
///
///     fn docs_root(&self) -> Result<PathBuf> {
///         Ok(self.base.join("doc"))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path against which relative paths are resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g., the
    /// current directory is unavailable).
    fn base_path(&self) -> Result<PathBuf>;

    /// Directory holding the documentation `*.md` files.
    ///
    /// # Errors
    ///
    /// Returns an error if the base path cannot be resolved.
    fn docs_root(&self) -> Result<PathBuf>;
}

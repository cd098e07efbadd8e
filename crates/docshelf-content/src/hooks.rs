//! Injectable extension points.
//!
//! Three behaviours can be customised when building a
//! [`DocLibrary`](crate::DocLibrary):
//!
//! | hook                         | default          |
//! |------------------------------|------------------|
//! | [`PathResolver`]             | [`StaticRoot`]   |
//! | [`FileListFilter`]           | [`KeepAll`]      |
//! | [`FrontMatterPostProcessor`] | [`NoPostProcess`]|
//!
//! Closures implement the filter and post-processor traits directly.

use std::path::PathBuf;
use std::sync::Arc;

use docshelf_core::{ConfigProvider, Result};

use crate::frontmatter::FrontMatter;

/// Resolves the directory holding the documentation files.
pub trait PathResolver: Send + Sync {
    /// Documentation root.
    fn doc_root(&self) -> Result<PathBuf>;
}

/// A fixed documentation root.
#[derive(Debug, Clone)]
pub struct StaticRoot(pub PathBuf);

impl StaticRoot {
    /// Create a resolver for `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }
}

impl PathResolver for StaticRoot {
    fn doc_root(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Resolves the documentation root from a [`ConfigProvider`].
#[derive(Debug)]
pub struct ConfigRoot<C: ConfigProvider> {
    config: Arc<C>,
}

impl<C: ConfigProvider> ConfigRoot<C> {
    /// Wrap a configuration provider.
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }
}

impl<C: ConfigProvider> PathResolver for ConfigRoot<C> {
    fn doc_root(&self) -> Result<PathBuf> {
        self.config.docs_root()
    }
}

/// Adjusts the list of discovered documentation files.
///
/// The filter sees the scanner's output (hidden files already removed) and
/// its result decides which pages exist and in what order they appear in
/// the menu.
pub trait FileListFilter: Send + Sync {
    /// Return the files to expose.
    fn filter(&self, files: Vec<String>) -> Vec<String>;
}

/// Leaves the file list unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl FileListFilter for KeepAll {
    fn filter(&self, files: Vec<String>) -> Vec<String> {
        files
    }
}

impl<F> FileListFilter for F
where
    F: Fn(Vec<String>) -> Vec<String> + Send + Sync,
{
    fn filter(&self, files: Vec<String>) -> Vec<String> {
        self(files)
    }
}

/// Adjusts sanitised frontmatter before a document is cached.
pub trait FrontMatterPostProcessor: Send + Sync {
    /// Modify `front_matter` of `file` in place.
    fn process(&self, front_matter: &mut FrontMatter, file: &str);
}

/// Leaves frontmatter unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPostProcess;

impl FrontMatterPostProcessor for NoPostProcess {
    fn process(&self, _front_matter: &mut FrontMatter, _file: &str) {}
}

impl<F> FrontMatterPostProcessor for F
where
    F: Fn(&mut FrontMatter, &str) + Send + Sync,
{
    fn process(&self, front_matter: &mut FrontMatter, file: &str) {
        self(front_matter, file)
    }
}

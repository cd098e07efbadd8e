//! The documentation library context.
//!
//! [`DocLibrary`] owns everything needed to serve documentation: the root
//! resolver, the file-list filter, and the document cache. One library is
//! created per application and passed by reference to whatever renders
//! pages or menus.
//!
//! # Example
//!
//! ```no_run
//! use docshelf_content::DocLibrary;
//!
//! # async fn example() -> docshelf_core::Result<()> {
//! let library = DocLibrary::at("doc");
//! let menu = library.build_menu().await?;
//! let html = library.render_document_page(&menu.root().file).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use docshelf_core::{Error, Result};
use log::warn;

use crate::cache::{CacheStore, DocumentCache, MemoryStore};
use crate::document::{Document, DocumentLoader, DocumentSource, FsSource};
use crate::frontmatter::DelimiterMode;
use crate::hooks::{
    FileListFilter, FrontMatterPostProcessor, KeepAll, NoPostProcess, PathResolver, StaticRoot,
};
use crate::menu::{self, Menu};
use crate::render;
use crate::scan;

/// Application context for documentation pages.
#[derive(Clone)]
pub struct DocLibrary {
    resolver: Arc<dyn PathResolver>,
    filter: Arc<dyn FileListFilter>,
    cache: DocumentCache,
}

impl DocLibrary {
    /// Start building a library resolving its root through `resolver`.
    pub fn builder(resolver: impl PathResolver + 'static) -> DocLibraryBuilder {
        DocLibraryBuilder::new(Arc::new(resolver))
    }

    /// A library over a fixed root with default hooks.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::builder(StaticRoot::new(root)).build()
    }

    /// The documentation root.
    pub fn doc_root(&self) -> Result<PathBuf> {
        self.resolver.doc_root()
    }

    /// The document cache.
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Discovered documentation files, after the file-list filter.
    ///
    /// An unresolvable root is treated like an empty directory.
    pub fn list_document_files(&self) -> Vec<String> {
        let files = match self.resolver.doc_root() {
            Ok(root) => scan::list_document_files(&root),
            Err(e) => {
                warn!("Could not resolve the documentation root: {e}");
                Vec::new()
            }
        };
        self.filter.filter(files)
    }

    /// Get a document through the cache.
    pub async fn get_document(&self, file: &str) -> Result<Arc<Document>> {
        self.cache.get_document(file).await
    }

    /// Render the page for `file`.
    pub async fn render_document_page(&self, file: &str) -> Result<String> {
        render::render_document_page(&self.cache, file).await
    }

    /// Render the page behind the root menu entry (the first file).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDocumentSet`] when there are no files.
    pub async fn render_root_page(&self) -> Result<String> {
        let files = self.list_document_files();
        let first = files.first().ok_or(Error::EmptyDocumentSet)?;
        self.render_document_page(first).await
    }

    /// Build the menu over every discovered file.
    pub async fn build_menu(&self) -> Result<Menu> {
        let files = self.list_document_files();
        menu::build_menu(&self.cache, &files).await
    }
}

/// Builder for [`DocLibrary`].
pub struct DocLibraryBuilder {
    resolver: Arc<dyn PathResolver>,
    filter: Arc<dyn FileListFilter>,
    post_processor: Arc<dyn FrontMatterPostProcessor>,
    mode: DelimiterMode,
    source: Option<Arc<dyn DocumentSource>>,
    store: Option<Arc<dyn CacheStore>>,
}

impl DocLibraryBuilder {
    fn new(resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            resolver,
            filter: Arc::new(KeepAll),
            post_processor: Arc::new(NoPostProcess),
            mode: DelimiterMode::default(),
            source: None,
            store: None,
        }
    }

    /// Filter the discovered file list.
    pub fn file_filter(mut self, filter: impl FileListFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    /// Post-process sanitised frontmatter.
    pub fn post_processor(mut self, post_processor: impl FrontMatterPostProcessor + 'static) -> Self {
        self.post_processor = Arc::new(post_processor);
        self
    }

    /// Choose how frontmatter delimiters are located.
    pub fn delimiter_mode(mut self, mode: DelimiterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Read documents from `source` instead of the filesystem.
    pub fn source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Back the cache with `store` instead of a private [`MemoryStore`].
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Finish building.
    pub fn build(self) -> DocLibrary {
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(FsSource::new(Arc::clone(&self.resolver))));
        let loader = DocumentLoader::new(source)
            .with_post_processor(self.post_processor)
            .with_delimiter_mode(self.mode);
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));

        DocLibrary {
            resolver: self.resolver,
            filter: self.filter,
            cache: DocumentCache::with_store(loader, store),
        }
    }
}

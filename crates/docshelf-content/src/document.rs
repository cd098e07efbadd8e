//! Documents and the loader that builds them.
//!
//! A [`Document`] is the parsed form of one documentation file: its name,
//! sanitised [`FrontMatter`], and the Markdown body left after the header is
//! removed. [`DocumentLoader`] reads raw text through a [`DocumentSource`] and
//! performs the parsing.

use std::path::{Component, Path};
use std::sync::Arc;

use async_trait::async_trait;
use docshelf_core::util::files;
use docshelf_core::{Error, Result};
use log::debug;
use serde::Serialize;

use crate::frontmatter::{self, DelimiterMode, FrontMatter};
use crate::hooks::{FrontMatterPostProcessor, NoPostProcess, PathResolver};

/// A parsed documentation file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    file: String,
    front_matter: FrontMatter,
    body: String,
}

impl Document {
    /// Parse raw file content.
    ///
    /// Frontmatter problems never fail parsing; they are logged and the
    /// defaults apply.
    pub fn parse(file: impl Into<String>, raw: &str, mode: DelimiterMode) -> Self {
        let file = file.into();
        let (mapping, body) = frontmatter::split(raw, mode);
        let front_matter = frontmatter::sanitize(mapping, &file);
        Self {
            file,
            front_matter,
            body,
        }
    }

    /// Filename, relative to the documentation root.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Sanitised frontmatter.
    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Markdown body without the frontmatter block.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Page title.
    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    /// Menu title.
    pub fn menu_title(&self) -> &str {
        &self.front_matter.menu_title
    }

    /// Capability required to view the page.
    pub fn capability(&self) -> &str {
        &self.front_matter.capability
    }
}

/// Where raw document text comes from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Read the full text of `file`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] when the file cannot be read.
    async fn read(&self, file: &str) -> Result<String>;
}

/// Reads documents from the filesystem below the resolved root.
pub struct FsSource {
    resolver: Arc<dyn PathResolver>,
}

impl FsSource {
    /// Create a source reading below `resolver`'s root.
    pub fn new(resolver: Arc<dyn PathResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    async fn read(&self, file: &str) -> Result<String> {
        ensure_plain_file_name(file)?;
        let path = self.resolver.doc_root()?.join(file);
        debug!("reading document {}", path.display());
        files::read_file(&path).await.map_err(|e| match e {
            Error::IoPath { source, .. } => Error::read(file, source),
            other => other,
        })
    }
}

/// Document names are bare filenames; anything that would step outside the
/// root is rejected.
fn ensure_plain_file_name(file: &str) -> Result<()> {
    let mut components = Path::new(file).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::invalid_data(format!(
            "'{file}' is not a documentation filename"
        ))),
    }
}

/// Loads and parses documents.
#[derive(Clone)]
pub struct DocumentLoader {
    source: Arc<dyn DocumentSource>,
    post_processor: Arc<dyn FrontMatterPostProcessor>,
    mode: DelimiterMode,
}

impl DocumentLoader {
    /// Create a loader over `source` with default hooks.
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            post_processor: Arc::new(NoPostProcess),
            mode: DelimiterMode::default(),
        }
    }

    /// Set the frontmatter post-processing hook.
    pub fn with_post_processor(mut self, post_processor: Arc<dyn FrontMatterPostProcessor>) -> Self {
        self.post_processor = post_processor;
        self
    }

    /// Set how frontmatter delimiters are located.
    pub fn with_delimiter_mode(mut self, mode: DelimiterMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured delimiter mode.
    pub fn delimiter_mode(&self) -> DelimiterMode {
        self.mode
    }

    /// Read and parse `file`.
    ///
    /// # Errors
    ///
    /// Propagates read failures from the source. Frontmatter problems are
    /// not errors.
    pub async fn load(&self, file: &str) -> Result<Document> {
        let raw = self.source.read(file).await?;
        let mut doc = Document::parse(file, &raw, self.mode);
        self.post_processor.process(&mut doc.front_matter, file);
        Ok(doc)
    }
}

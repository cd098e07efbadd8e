//! Documentation menu construction.
//!
//! The menu has one root entry labelled [`MENU_LABEL`] that shows the first
//! document, plus one sub-entry per document when there is more than one.
//! The first document therefore appears twice when sub-entries exist: once
//! behind the root entry and once as the first sub-entry.

use std::sync::Arc;

use docshelf_core::{Error, Result};
use serde::Serialize;

use crate::access::CapabilityCheck;
use crate::cache::DocumentCache;
use crate::document::Document;

/// Label of the root menu entry.
pub const MENU_LABEL: &str = "Documentation";

/// Slug of the root menu entry; sub-entry slugs extend it with `/<file>`.
pub const ROOT_SLUG: &str = "docshelf/documentation";

/// Slug of the sub-entry showing `file`.
pub fn submenu_slug(file: &str) -> String {
    format!("{ROOT_SLUG}/{file}")
}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuPage {
    /// Title of the page the entry opens.
    pub page_title: String,
    /// Text shown in the menu.
    pub menu_title: String,
    /// Capability required to see the entry.
    pub capability: String,
    /// Unique page identifier.
    pub slug: String,
    /// Documentation file rendered by the page.
    pub file: String,
}

/// A root entry and its ordered sub-entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    root: MenuPage,
    submenu: Vec<MenuPage>,
}

/// Receives menu pages, typically to register them with a host interface.
pub trait PageRegistrar {
    /// Register the top-level page.
    fn add_menu_page(&mut self, page: &MenuPage) -> Result<()>;

    /// Register a page below `parent_slug`.
    fn add_submenu_page(&mut self, parent_slug: &str, page: &MenuPage) -> Result<()>;
}

impl Menu {
    /// Build a menu from loaded documents, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDocumentSet`] when `docs` is empty.
    pub fn from_documents(docs: &[Arc<Document>]) -> Result<Self> {
        let first = docs.first().ok_or(Error::EmptyDocumentSet)?;

        let root = MenuPage {
            page_title: MENU_LABEL.to_string(),
            menu_title: MENU_LABEL.to_string(),
            capability: first.capability().to_string(),
            slug: ROOT_SLUG.to_string(),
            file: first.file().to_string(),
        };

        let submenu = if docs.len() > 1 {
            docs.iter().map(|doc| sub_page(doc)).collect()
        } else {
            Vec::new()
        };

        Ok(Self { root, submenu })
    }

    /// The root entry.
    pub fn root(&self) -> &MenuPage {
        &self.root
    }

    /// Sub-entries, in document order.
    pub fn submenu(&self) -> &[MenuPage] {
        &self.submenu
    }

    /// Root entry followed by every sub-entry.
    pub fn pages(&self) -> impl Iterator<Item = &MenuPage> {
        std::iter::once(&self.root).chain(self.submenu.iter())
    }

    /// Hand every entry to `registrar`, root first.
    pub fn register(&self, registrar: &mut dyn PageRegistrar) -> Result<()> {
        registrar.add_menu_page(&self.root)?;
        for page in &self.submenu {
            registrar.add_submenu_page(&self.root.slug, page)?;
        }
        Ok(())
    }

    /// The part of the menu a viewer may see.
    ///
    /// Returns `None` when the viewer lacks the root capability; otherwise
    /// sub-entries whose capability the viewer lacks are dropped.
    pub fn visible_to(&self, viewer: &dyn CapabilityCheck) -> Option<Menu> {
        if !viewer.has_capability(&self.root.capability) {
            return None;
        }
        let submenu = self
            .submenu
            .iter()
            .filter(|page| viewer.has_capability(&page.capability))
            .cloned()
            .collect();
        Some(Menu {
            root: self.root.clone(),
            submenu,
        })
    }

    /// The file rendered by the page with `slug`.
    pub fn file_for_slug(&self, slug: &str) -> Option<&str> {
        if slug == self.root.slug {
            return Some(&self.root.file);
        }
        self.submenu
            .iter()
            .find(|page| page.slug == slug)
            .map(|page| page.file.as_str())
    }
}

fn sub_page(doc: &Document) -> MenuPage {
    MenuPage {
        page_title: doc.title().to_string(),
        menu_title: doc.menu_title().to_string(),
        capability: doc.capability().to_string(),
        slug: submenu_slug(doc.file()),
        file: doc.file().to_string(),
    }
}

/// Load every file through the cache and build the menu.
///
/// # Errors
///
/// Returns [`Error::EmptyDocumentSet`] for an empty `files`, or the first
/// load error encountered.
pub async fn build_menu(cache: &DocumentCache, files: &[String]) -> Result<Menu> {
    if files.is_empty() {
        return Err(Error::EmptyDocumentSet);
    }
    let mut docs = Vec::with_capacity(files.len());
    for file in files {
        docs.push(cache.get_document(file).await?);
    }
    Menu::from_documents(&docs)
}

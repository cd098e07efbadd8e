//! Markdown documents, frontmatter extraction, and rendering.
//!
//! This crate provides the content side of Docshelf: everything between a
//! directory of `*.md` files and a set of rendered pages plus the menu that
//! links them.
//!
//! # Features
//!
//! - Frontmatter extraction and defaulting
//! - Read-through document caching
//! - Markdown to HTML rendering
//! - Menu construction with per-page capabilities

#![doc = include_str!("../README.md")]

pub mod access;
pub mod cache;
pub mod document;
pub mod frontmatter;
pub mod hooks;
pub mod library;
pub mod menu;
pub mod render;
pub mod scan;

pub use access::{AllowAll, CapabilityCheck, CapabilitySet};
pub use cache::{CacheStore, DocumentCache, MemoryStore};
pub use document::{Document, DocumentLoader, DocumentSource, FsSource};
pub use frontmatter::{DEFAULT_CAPABILITY, DelimiterMode, FrontMatter};
pub use hooks::{
    ConfigRoot, FileListFilter, FrontMatterPostProcessor, KeepAll, NoPostProcess, PathResolver,
    StaticRoot,
};
pub use library::{DocLibrary, DocLibraryBuilder};
pub use menu::{Menu, MenuPage, PageRegistrar};
